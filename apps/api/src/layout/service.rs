use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::actions::{ActionResult, FieldErrors};
use crate::layout::ordering::{move_item, toggle_section_visibility, Direction};
use crate::models::layout::{canonical_section_names, Layout, NavLink, Section, StoredLayout};
use crate::store::{CollectionHandle, DocumentStore, StoreError};

/// Reads the stored layout, filling in defaults for an absent record or
/// missing lists. Store failures are returned.
pub async fn read_layout(store: &Arc<dyn DocumentStore>) -> Result<Layout, StoreError> {
    Ok(CollectionHandle::<StoredLayout>::resolve(store)
        .singleton()
        .await?
        .map(|record| record.data.merge_with_defaults())
        .unwrap_or_default())
}

/// Layout for rendering. Never fails: any store problem degrades to defaults,
/// and nothing is written.
pub async fn get_layout(store: &Arc<dyn DocumentStore>) -> Layout {
    match read_layout(store).await {
        Ok(layout) => layout,
        Err(e) => {
            warn!("Layout unavailable, serving defaults: {e}");
            Layout::default()
        }
    }
}

/// Names in `sections` outside the canonical set.
pub fn unknown_sections(sections: &[String]) -> Vec<&str> {
    sections
        .iter()
        .map(String::as_str)
        .filter(|name| Section::from_name(name).is_none())
        .collect()
}

/// Whole-record upsert. Both lists are stored verbatim; unknown section names
/// are kept and only logged.
pub async fn save_layout(
    store: &Arc<dyn DocumentStore>,
    layout: &Layout,
) -> Result<(), StoreError> {
    let unknown = unknown_sections(&layout.sections);
    if !unknown.is_empty() {
        warn!("Saving layout with unknown sections: {}", unknown.join(", "));
    }

    CollectionHandle::<StoredLayout>::resolve(store)
        .upsert(&StoredLayout::from(layout.clone()))
        .await?;

    info!(
        "Saved layout ({} nav links, {} sections)",
        layout.nav_links.len(),
        layout.sections.len()
    );
    Ok(())
}

/// Layout form: both lists arrive JSON-encoded.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutForm {
    pub nav_links: Option<String>,
    pub sections: Option<String>,
}

impl LayoutForm {
    pub fn validate(self) -> Result<Layout, FieldErrors> {
        let mut errors = FieldErrors::new();

        let nav_links = match self.nav_links.as_deref().map(serde_json::from_str::<Vec<NavLink>>) {
            Some(Ok(links)) => links,
            Some(Err(_)) => {
                errors.add("navLinks", "Navigation links are not valid JSON.");
                Vec::new()
            }
            None => {
                errors.add("navLinks", "This field is required.");
                Vec::new()
            }
        };
        let sections = match self.sections.as_deref().map(serde_json::from_str::<Vec<String>>) {
            Some(Ok(sections)) => sections,
            Some(Err(_)) => {
                errors.add("sections", "Sections are not valid JSON.");
                Vec::new()
            }
            None => {
                errors.add("sections", "This field is required.");
                Vec::new()
            }
        };

        errors.into_result(Layout {
            nav_links,
            sections,
        })
    }
}

pub async fn submit_layout(store: &Arc<dyn DocumentStore>, form: LayoutForm) -> ActionResult {
    let layout = match form.validate() {
        Ok(layout) => layout,
        Err(errors) => return ActionResult::invalid(errors),
    };
    match save_layout(store, &layout).await {
        Ok(()) => ActionResult::ok("Layout saved successfully."),
        Err(e) => {
            error!("Failed to save layout: {e}");
            ActionResult::failed("Failed to save layout. Please try again.")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutList {
    NavLinks,
    Sections,
}

/// Applies one `move_item` to the stored layout and saves it.
pub async fn move_layout_item(
    store: &Arc<dyn DocumentStore>,
    list: LayoutList,
    index: usize,
    direction: Direction,
) -> Result<Layout, StoreError> {
    let mut layout = read_layout(store).await?;
    match list {
        LayoutList::NavLinks => layout.nav_links = move_item(&layout.nav_links, index, direction),
        LayoutList::Sections => layout.sections = move_item(&layout.sections, index, direction),
    }
    save_layout(store, &layout).await?;
    Ok(layout)
}

/// Shows or hides one section of the stored layout and saves it.
pub async fn toggle_layout_section(
    store: &Arc<dyn DocumentStore>,
    name: &str,
) -> Result<Layout, StoreError> {
    let mut layout = read_layout(store).await?;
    layout.sections =
        toggle_section_visibility(&layout.sections, &canonical_section_names(), name);
    save_layout(store, &layout).await?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::layout::{default_nav_links, default_sections};
    use crate::store::memory::MemoryDocumentStore;
    use crate::store::Collection;

    fn memory() -> Arc<dyn DocumentStore> {
        Arc::new(MemoryDocumentStore::default())
    }

    #[tokio::test]
    async fn test_empty_store_serves_defaults_without_writing() {
        let store = memory();
        let layout = get_layout(&store).await;
        assert_eq!(layout.nav_links, default_nav_links());
        assert_eq!(layout.sections, default_sections());
        assert_eq!(store.count(Collection::Layout).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_store_failure_serves_defaults() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::failing());
        assert_eq!(get_layout(&store).await, Layout::default());
    }

    #[tokio::test]
    async fn test_partial_record_is_merged() {
        let store = memory();
        store
            .upsert_one(Collection::Layout, serde_json::json!({ "sections": ["Contact"] }))
            .await
            .unwrap();
        let layout = get_layout(&store).await;
        assert_eq!(layout.sections, vec!["Contact"]);
        assert_eq!(layout.nav_links, default_nav_links());
    }

    #[tokio::test]
    async fn test_submit_layout_round_trips_and_keeps_unknown_sections() {
        let store = memory();
        let form = LayoutForm {
            nav_links: Some(r##"[{"name":"Work","href":"#projects"}]"##.into()),
            sections: Some(r#"["Projects","Blog","About"]"#.into()),
        };
        assert!(submit_layout(&store, form).await.success);

        let layout = get_layout(&store).await;
        assert_eq!(layout.nav_links, vec![NavLink::new("Work", "#projects")]);
        assert_eq!(layout.sections, vec!["Projects", "Blog", "About"]);
        assert_eq!(unknown_sections(&layout.sections), vec!["Blog"]);
    }

    #[tokio::test]
    async fn test_submit_layout_rejects_undecodable_lists() {
        let store = memory();
        let result = submit_layout(
            &store,
            LayoutForm {
                nav_links: Some("not json".into()),
                sections: None,
            },
        )
        .await;
        assert!(!result.success);
        assert!(result.errors.get("navLinks").is_some());
        assert!(result.errors.get("sections").is_some());
        assert_eq!(store.count(Collection::Layout).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_move_then_toggle_persists() {
        let store = memory();
        let moved = move_layout_item(&store, LayoutList::Sections, 0, Direction::Down)
            .await
            .unwrap();
        assert_eq!(&moved.sections[..2], &["Skills".to_string(), "About".to_string()]);

        let hidden = toggle_layout_section(&store, "About").await.unwrap();
        assert!(!hidden.sections.iter().any(|s| s == "About"));

        let shown = toggle_layout_section(&store, "About").await.unwrap();
        assert_eq!(shown.sections[0], "About");
        assert_eq!(get_layout(&store).await, shown);
    }

    #[tokio::test]
    async fn test_edits_do_not_overwrite_on_read_failure() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::failing());
        assert!(toggle_layout_section(&store, "About").await.is_err());
    }
}
