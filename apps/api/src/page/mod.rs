//! Public page and dashboard composition.
//!
//! Every read here is side-effect free. Collections are fetched concurrently
//! and sections are emitted in layout order; names with no renderer are
//! skipped.

pub mod handlers;
pub mod views;

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::layout::get_layout;
use crate::models::content::{
    About, Achievement, Certification, Education, ProfileLink, Project, Skill, WorkExperience,
};
use crate::models::layout::{Layout, NavLink, Section};
use crate::store::{Collection, CollectionHandle, DocumentStore, Entity, StoreError};
use views::{
    AboutView, AchievementView, CertificationView, EducationView, PositionView, ProfileLinkView,
    ProjectView, SkillView,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "section")]
pub enum PageSection {
    About { about: Option<AboutView> },
    Skills { skills: Vec<SkillView> },
    WorkExperience { positions: Vec<PositionView> },
    Projects { projects: Vec<ProjectView> },
    Education { entries: Vec<EducationView> },
    Achievements {
        achievements: Vec<AchievementView>,
        certifications: Vec<CertificationView>,
    },
    Contact {
        email: Option<String>,
        links: Vec<ProfileLinkView>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPage {
    pub nav_links: Vec<NavLink>,
    pub about: Option<AboutView>,
    pub profile_links: Vec<ProfileLinkView>,
    pub sections: Vec<PageSection>,
}

async fn list_views<T, V>(store: &Arc<dyn DocumentStore>) -> Result<Vec<V>, StoreError>
where
    T: Entity,
    V: From<crate::store::Record<T>>,
{
    Ok(CollectionHandle::<T>::resolve(store)
        .list()
        .await?
        .into_iter()
        .map(V::from)
        .collect())
}

pub async fn compose_public_page(
    store: &Arc<dyn DocumentStore>,
) -> Result<PublicPage, StoreError> {
    let about_handle = CollectionHandle::<About>::resolve(store);
    let (
        layout,
        about,
        skills,
        mut positions,
        projects,
        mut education,
        achievements,
        certifications,
        links,
    ) = tokio::try_join!(
        async { Ok::<Layout, StoreError>(get_layout(store).await) },
        about_handle.singleton(),
        list_views::<Skill, SkillView>(store),
        list_views::<WorkExperience, PositionView>(store),
        list_views::<Project, ProjectView>(store),
        list_views::<Education, EducationView>(store),
        list_views::<Achievement, AchievementView>(store),
        list_views::<Certification, CertificationView>(store),
        list_views::<ProfileLink, ProfileLinkView>(store),
    )?;

    // Dates are YYYY-MM or YYYY-MM-DD, so string order is date order.
    positions.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    education.sort_by(|a, b| b.start_date.cmp(&a.start_date));

    let about = about.map(AboutView::from);
    let email = about.as_ref().and_then(|a| a.email.clone());

    let mut sections = Vec::with_capacity(layout.sections.len());
    for name in &layout.sections {
        let Some(section) = Section::from_name(name) else {
            debug!("No renderer for section {name}, skipping");
            continue;
        };
        sections.push(match section {
            Section::About => PageSection::About {
                about: about.clone(),
            },
            Section::Skills => PageSection::Skills {
                skills: skills.clone(),
            },
            Section::WorkExperience => PageSection::WorkExperience {
                positions: positions.clone(),
            },
            Section::Projects => PageSection::Projects {
                projects: projects.clone(),
            },
            Section::Education => PageSection::Education {
                entries: education.clone(),
            },
            Section::Achievements => PageSection::Achievements {
                achievements: achievements.clone(),
                certifications: certifications.clone(),
            },
            Section::Contact => PageSection::Contact {
                email: email.clone(),
                links: links.clone(),
            },
        });
    }

    Ok(PublicPage {
        nav_links: layout.nav_links,
        about,
        profile_links: links,
        sections,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Record counts keyed by collection name.
    pub counts: BTreeMap<&'static str, u64>,
    pub layout: Layout,
}

pub async fn dashboard_summary(
    store: &Arc<dyn DocumentStore>,
) -> Result<DashboardSummary, StoreError> {
    let mut counts = BTreeMap::new();
    for collection in Collection::ALL {
        if collection == Collection::Layout {
            continue;
        }
        counts.insert(collection.name(), store.count(collection).await?);
    }
    Ok(DashboardSummary {
        counts,
        layout: get_layout(store).await,
    })
}
