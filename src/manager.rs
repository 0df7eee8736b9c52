// src/manager.rs

//! The collection manager behind every dashboard screen.
//!
//! Holds one resource's fetched list, the search query and the modal state.
//! The backend is the only source of truth: creates and updates re-fetch the
//! list, deletes drop the row locally.

use std::sync::Arc;

use crate::api::{self, Backend};
use crate::confirm::Confirm;
use crate::error::AdminError;
use crate::models::{Entity, matches_query};
use crate::resources::{Draft, Resource};

/// What the screen's modal is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Modal<D, I> {
    Closed,
    Create(D),
    Edit { id: String, draft: D },
    View(I),
}

pub struct CollectionManager<R: Resource> {
    resource: R,
    backend: Arc<dyn Backend>,
    items: Vec<R::Item>,
    query: String,
    modal: Modal<R::Draft, R::Item>,
}

impl<R: Resource> CollectionManager<R> {
    pub fn new(resource: R, backend: Arc<dyn Backend>) -> Self {
        Self {
            resource,
            backend,
            items: Vec::new(),
            query: String::new(),
            modal: Modal::Closed,
        }
    }

    pub fn resource(&self) -> &R {
        &self.resource
    }

    pub fn items(&self) -> &[R::Item] {
        &self.items
    }

    pub fn modal(&self) -> &Modal<R::Draft, R::Item> {
        &self.modal
    }

    /// Form of the open create/edit modal.
    pub fn draft_mut(&mut self) -> Option<&mut R::Draft> {
        match &mut self.modal {
            Modal::Create(draft) | Modal::Edit { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn close(&mut self) {
        self.modal = Modal::Closed;
    }

    /// Replaces the list with the backend's current collection.
    /// Any failure leaves the list empty.
    pub async fn fetch_list(&mut self) -> Result<usize, AdminError> {
        let user_id = self.backend.user_id();
        let result = match self.resource.list_path(user_id.as_deref()) {
            Ok(path) => match api::get(self.backend.as_ref(), &path).await {
                Ok(data) => api::decode_list::<R::Item>(data),
                Err(e) => Err(e),
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(items) => {
                tracing::info!("Fetched {} {}", items.len(), self.resource.label());
                self.items = items;
                Ok(self.items.len())
            }
            Err(e) => {
                tracing::error!("Failed to fetch {}: {:?}", self.resource.label(), e);
                self.items.clear();
                Err(e)
            }
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Items matching the current query.
    pub fn visible(&self) -> Vec<&R::Item> {
        self.items
            .iter()
            .filter(|item| matches_query(*item, &self.query))
            .collect()
    }

    fn ensure_writable(&self) -> Result<(), AdminError> {
        if self.resource.read_only() {
            return Err(AdminError::ReadOnly(self.resource.label()));
        }
        Ok(())
    }

    /// Opens the create modal with a blank form.
    pub async fn open_create(&mut self) -> Result<&mut R::Draft, AdminError> {
        self.ensure_writable()?;
        let mut draft = self.resource.blank_draft();
        self.resource
            .prepare_draft(self.backend.as_ref(), &mut draft, None)
            .await?;
        self.modal = Modal::Create(draft);
        self.draft_mut()
            .ok_or_else(|| AdminError::Validation("No form is open".to_string()))
    }

    /// Opens the edit modal from a fresh detail fetch; list rows may be summaries.
    pub async fn open_edit(&mut self, id: &str) -> Result<&mut R::Draft, AdminError> {
        self.ensure_writable()?;
        let item = self.fetch_detail(id).await?;
        let mut draft = self.resource.draft_from(&item);
        self.resource
            .prepare_draft(self.backend.as_ref(), &mut draft, Some(id))
            .await?;
        self.modal = Modal::Edit {
            id: id.to_string(),
            draft,
        };
        self.draft_mut()
            .ok_or_else(|| AdminError::Validation("No form is open".to_string()))
    }

    /// Validates and submits the open form.
    ///
    /// Success closes the modal and re-fetches the list. On failure the
    /// modal stays open with the form intact.
    pub async fn save(&mut self) -> Result<(), AdminError> {
        self.ensure_writable()?;
        let (editing, payload) = match &self.modal {
            Modal::Create(draft) => {
                draft.check(true)?;
                (None, draft.payload(true)?)
            }
            Modal::Edit { id, draft } => {
                draft.check(false)?;
                (Some(id.clone()), draft.payload(false)?)
            }
            _ => return Err(AdminError::Validation("No form is open".to_string())),
        };

        let backend = self.backend.as_ref();
        let result = match &editing {
            None => api::post(backend, &self.resource.create_path(), payload).await,
            Some(id) => api::put(backend, &self.resource.detail_path(id), payload).await,
        };

        if let Err(e) = result {
            tracing::error!("Failed to save {} ({:?}): {:?}", self.resource.label(), editing, e);
            return Err(e);
        }

        tracing::info!(
            "{} {}",
            if editing.is_some() { "Updated" } else { "Created" },
            self.resource.label()
        );
        self.modal = Modal::Closed;
        // a failed refresh is logged by fetch_list; the save itself went through
        let _ = self.fetch_list().await;
        Ok(())
    }

    /// Deletes `id` after confirmation and drops it from the local list.
    ///
    /// Returns `Ok(false)` when the confirmation is declined. A failed delete
    /// leaves the list untouched.
    pub async fn remove(&mut self, id: &str, confirm: &dyn Confirm) -> Result<bool, AdminError> {
        self.ensure_writable()?;
        let name = self
            .items
            .iter()
            .find(|item| item.id() == Some(id))
            .map(|item| item.title().to_string())
            .unwrap_or_else(|| id.to_string());

        if !confirm.confirm(&format!("Are you sure you want to delete \"{}\"?", name)) {
            return Ok(false);
        }

        let path = self.resource.detail_path(id);
        api::delete(self.backend.as_ref(), &path).await.map_err(|e| {
            tracing::error!("Failed to delete {} {}: {:?}", self.resource.label(), id, e);
            e
        })?;

        self.items.retain(|item| item.id() != Some(id));
        let open_on_deleted = match &self.modal {
            Modal::Edit { id: open, .. } => open == id,
            Modal::View(item) => item.id() == Some(id),
            _ => false,
        };
        if open_on_deleted {
            self.modal = Modal::Closed;
        }
        tracing::info!("Deleted {} {}", self.resource.label(), id);
        Ok(true)
    }

    /// Opens the read-only view of `id`.
    pub async fn view(&mut self, id: &str) -> Result<R::Item, AdminError> {
        let held = self.items.iter().find(|item| item.id() == Some(id)).cloned();
        let item = match held {
            Some(item) if !self.resource.view_fetches_detail() => item,
            _ => self.fetch_detail(id).await?,
        };
        self.modal = Modal::View(item.clone());
        Ok(item)
    }

    async fn fetch_detail(&self, id: &str) -> Result<R::Item, AdminError> {
        let path = self.resource.detail_path(id);
        api::fetch::<R::Item>(self.backend.as_ref(), &path)
            .await
            .map_err(|e| {
                tracing::error!("Failed to fetch {} {}: {:?}", self.resource.label(), id, e);
                e
            })
    }
}
