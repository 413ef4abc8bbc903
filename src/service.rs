//! Thin orchestration layer over a [`VoucherRepository`]

use crate::core::error::{Result, VoucherError};
use crate::core::filter::FilterCondition;
use crate::core::page::{PageRequest, PageResult};
use crate::core::repository::VoucherRepository;
use crate::core::voucher::{Voucher, VoucherKind};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Voucher use cases exposed to calling layers (console, HTTP, ...).
///
/// The service validates nothing itself: voucher invariants live in the
/// variant constructors, and construction failures surface unchanged.
/// Its one piece of translation is turning the repository's empty
/// optional into [`VoucherError::VoucherNotFound`], the reportable
/// "no such voucher" condition.
#[derive(Clone)]
pub struct VoucherService {
    repository: Arc<dyn VoucherRepository>,
}

impl VoucherService {
    /// Build the service around an explicitly constructed store.
    pub fn new(repository: Arc<dyn VoucherRepository>) -> Self {
        Self { repository }
    }

    /// Create and persist a voucher of the given kind.
    pub async fn create_voucher(
        &self,
        kind: VoucherKind,
        discount_value: i64,
        quantity: i64,
        expiration_at: DateTime<Utc>,
    ) -> Result<Voucher> {
        let voucher = Voucher::new(kind, discount_value, quantity, expiration_at)?;
        tracing::debug!(voucher_id = %voucher.voucher_id(), %kind, "creating voucher");
        self.repository.insert(voucher).await
    }

    /// Fetch a voucher, failing when it does not exist.
    pub async fn get_voucher(&self, voucher_id: &Uuid) -> Result<Voucher> {
        self.repository
            .find_by_id(voucher_id)
            .await?
            .ok_or(VoucherError::VoucherNotFound {
                voucher_id: *voucher_id,
            })
    }

    /// Filtered, paged listing.
    pub async fn list_vouchers(
        &self,
        request: &PageRequest,
        filter: &FilterCondition,
    ) -> Result<PageResult<Voucher>> {
        self.repository.find_all(request, filter).await
    }

    /// Replace the stored fields of an existing voucher.
    pub async fn update_voucher(&self, voucher: Voucher) -> Result<Voucher> {
        tracing::debug!(voucher_id = %voucher.voucher_id(), "updating voucher");
        self.repository.update(voucher).await
    }

    /// Delete a voucher. Idempotent, like the repository operation.
    pub async fn delete_voucher(&self, voucher_id: &Uuid) -> Result<()> {
        tracing::debug!(%voucher_id, "deleting voucher");
        self.repository.delete_by_voucher_id(voucher_id).await
    }
}
