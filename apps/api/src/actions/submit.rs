use std::sync::Arc;

use tracing::{error, info};

use crate::actions::forms::{Form, Validated};
use crate::actions::validate::parse_id;
use crate::actions::{ActionResult, FieldErrors};
use crate::media::MediaUploader;
use crate::store::{CollectionHandle, DocumentStore, Entity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    Insert,
    Upsert,
}

/// Validates and inserts a new record.
pub async fn submit_create<F: Form>(
    store: &Arc<dyn DocumentStore>,
    media: &dyn MediaUploader,
    form: F,
) -> ActionResult {
    submit(store, media, form, WriteMode::Insert).await
}

/// Validates and replaces the singleton record of the form's collection.
pub async fn submit_upsert<F: Form>(
    store: &Arc<dyn DocumentStore>,
    media: &dyn MediaUploader,
    form: F,
) -> ActionResult {
    submit(store, media, form, WriteMode::Upsert).await
}

async fn submit<F: Form>(
    store: &Arc<dyn DocumentStore>,
    media: &dyn MediaUploader,
    form: F,
    mode: WriteMode,
) -> ActionResult {
    let label = <F::Entity as Entity>::LABEL;

    let Validated { mut entity, image } = match form.validate() {
        Ok(validated) => validated,
        Err(errors) => return ActionResult::invalid(errors),
    };

    if let Some(image) = image {
        match media.upload(image).await {
            Ok(url) => F::attach_image(&mut entity, url),
            Err(e) => {
                error!("{label}: {e}");
                return ActionResult::failed("Image upload failed");
            }
        }
    }

    let handle = CollectionHandle::<F::Entity>::resolve(store);
    let written = match mode {
        WriteMode::Insert => handle.insert(&entity).await,
        WriteMode::Upsert => handle.upsert(&entity).await,
    };

    match written {
        Ok(id) => {
            info!("Saved {label} {id}");
            ActionResult::ok(format!("{label} saved successfully."))
        }
        Err(e) => {
            error!("Failed to save {label}: {e}");
            ActionResult::failed(format!(
                "Failed to save {}. Please try again.",
                label.to_lowercase()
            ))
        }
    }
}

/// Deletes one record by its id string.
pub async fn submit_delete<T: Entity>(store: &Arc<dyn DocumentStore>, id: &str) -> ActionResult {
    let mut errors = FieldErrors::new();
    let Some(id) = parse_id(&mut errors, id) else {
        return ActionResult::invalid(errors);
    };

    match CollectionHandle::<T>::resolve(store).delete(id).await {
        Ok(true) => {
            info!("Deleted {} {id}", T::LABEL);
            ActionResult::ok(format!("{} deleted.", T::LABEL))
        }
        Ok(false) => ActionResult::failed(format!("{} not found.", T::LABEL)),
        Err(e) => {
            error!("Failed to delete {} {id}: {e}", T::LABEL);
            ActionResult::failed(format!(
                "Failed to delete {}. Please try again.",
                T::LABEL.to_lowercase()
            ))
        }
    }
}
