// src/resources/voucher.rs

use super::{Draft, Resource};
use crate::api::Payload;
use crate::error::AdminError;
use crate::models::voucher::VoucherOrder;

/// Voucher orders, listed per admin at `/voucherorder/get/:userId`.
pub struct VoucherOrderResource;

/// Placeholder form; voucher orders cannot be created or edited here.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoForm;

impl Draft for NoForm {
    fn check(&self, _creating: bool) -> Result<(), AdminError> {
        Err(AdminError::ReadOnly("voucher orders".to_string()))
    }

    fn payload(&self, _creating: bool) -> Result<Payload, AdminError> {
        Err(AdminError::ReadOnly("voucher orders".to_string()))
    }
}

impl Resource for VoucherOrderResource {
    type Item = VoucherOrder;
    type Draft = NoForm;

    fn segment(&self) -> &str {
        "voucherorder"
    }

    fn label(&self) -> String {
        "voucher orders".to_string()
    }

    fn list_path(&self, user_id: Option<&str>) -> Result<String, AdminError> {
        let user_id = user_id.ok_or_else(|| {
            AdminError::Config("voucher orders need PTE_ADMIN_USER_ID or a token carrying a user id".to_string())
        })?;
        Ok(format!("{}/get/{}", self.segment(), user_id))
    }

    fn read_only(&self) -> bool {
        true
    }

    fn blank_draft(&self) -> NoForm {
        NoForm
    }

    fn draft_from(&self, _item: &VoucherOrder) -> NoForm {
        NoForm
    }
}
