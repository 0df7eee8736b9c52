// src/resources/mod.rs

pub mod banner;
pub mod question;
pub mod section;
pub mod voucher;

use async_trait::async_trait;

use crate::api::{Backend, Payload};
use crate::error::AdminError;
use crate::models::Entity;

pub use banner::{BannerDraft, BannerResource};
pub use mock_test::MockTestResource;
pub use question::{QuestionDraft, QuestionResource};
pub use section::{SectionDraft, SectionResource};
pub use voucher::VoucherOrderResource;

/// Form state of a create or edit modal.
pub trait Draft: Send + Sync {
    /// Client-side checks. `creating` is false when editing an existing record.
    fn check(&self, creating: bool) -> Result<(), AdminError>;

    /// Request body; multipart when a file is attached.
    fn payload(&self, creating: bool) -> Result<Payload, AdminError>;
}

/// One collection screen: where its records live and how its form behaves.
#[async_trait]
pub trait Resource: Send + Sync {
    type Item: Entity;
    type Draft: Draft;

    /// REST path segment, e.g. `banner`.
    fn segment(&self) -> &str;

    /// Human name used in logs and prompts.
    fn label(&self) -> String;

    fn list_path(&self, _user_id: Option<&str>) -> Result<String, AdminError> {
        Ok(self.segment().to_string())
    }

    fn detail_path(&self, id: &str) -> String {
        format!("{}/{}", self.segment(), id)
    }

    fn create_path(&self) -> String {
        self.segment().to_string()
    }

    /// Collections the dashboard can only browse.
    fn read_only(&self) -> bool {
        false
    }

    /// Whether the view modal needs the populated detail record.
    fn view_fetches_detail(&self) -> bool {
        false
    }

    fn blank_draft(&self) -> Self::Draft;

    fn draft_from(&self, item: &Self::Item) -> Self::Draft;

    /// Runs after a draft is built and before the modal opens.
    /// `editing` is the id of the record being edited.
    async fn prepare_draft(
        &self,
        _backend: &dyn Backend,
        _draft: &mut Self::Draft,
        _editing: Option<&str>,
    ) -> Result<(), AdminError> {
        Ok(())
    }
}

/// Shared title rule for every form.
pub(crate) fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("required");
        err.message = Some("Title is required".into());
        return Err(err);
    }
    Ok(())
}
