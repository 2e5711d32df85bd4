use serde::{Deserialize, Serialize};

use crate::store::{Collection, Entity};

/// A page section. Stored layouts hold section names as plain strings so
/// names outside this set survive a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    About,
    Skills,
    WorkExperience,
    Projects,
    Education,
    Achievements,
    Contact,
}

/// Reference order used to place a section that becomes visible again.
pub const CANONICAL_SECTIONS: [Section; 7] = [
    Section::About,
    Section::Skills,
    Section::WorkExperience,
    Section::Projects,
    Section::Education,
    Section::Achievements,
    Section::Contact,
];

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Skills => "Skills",
            Section::WorkExperience => "WorkExperience",
            Section::Projects => "Projects",
            Section::Education => "Education",
            Section::Achievements => "Achievements",
            Section::Contact => "Contact",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        CANONICAL_SECTIONS.into_iter().find(|s| s.name() == name)
    }
}

pub fn canonical_section_names() -> Vec<String> {
    CANONICAL_SECTIONS
        .iter()
        .map(|s| s.name().to_string())
        .collect()
}

pub const DEFAULT_NAV_LINKS: &[(&str, &str)] = &[
    ("Home", "#home"),
    ("About", "#about"),
    ("Skills", "#skills"),
    ("Experience", "#experience"),
    ("Projects", "#projects"),
    ("Education", "#education"),
    ("Achievements", "#achievements"),
    ("Contact", "#contact"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
}

impl NavLink {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            href: href.into(),
        }
    }
}

pub fn default_nav_links() -> Vec<NavLink> {
    DEFAULT_NAV_LINKS
        .iter()
        .map(|(name, href)| NavLink::new(*name, *href))
        .collect()
}

/// Every canonical section, visible, in canonical order.
pub fn default_sections() -> Vec<String> {
    canonical_section_names()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub nav_links: Vec<NavLink>,
    pub sections: Vec<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            nav_links: default_nav_links(),
            sections: default_sections(),
        }
    }
}

/// The persisted singleton. Either list may be missing from older records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLayout {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nav_links: Option<Vec<NavLink>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<String>>,
}

impl StoredLayout {
    /// Missing lists fall back to their defaults. Present lists, even empty
    /// ones, are kept as stored.
    pub fn merge_with_defaults(self) -> Layout {
        Layout {
            nav_links: self.nav_links.unwrap_or_else(default_nav_links),
            sections: self.sections.unwrap_or_else(default_sections),
        }
    }
}

impl From<Layout> for StoredLayout {
    fn from(layout: Layout) -> Self {
        Self {
            nav_links: Some(layout.nav_links),
            sections: Some(layout.sections),
        }
    }
}

impl Entity for StoredLayout {
    const COLLECTION: Collection = Collection::Layout;
    const LABEL: &'static str = "Layout";
}
