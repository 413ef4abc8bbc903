//! The persistence contract shared by every voucher store

use crate::core::error::Result;
use crate::core::filter::FilterCondition;
use crate::core::page::{PageRequest, PageResult};
use crate::core::voucher::Voucher;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence abstraction for vouchers.
///
/// Semantics are identical across backends — the in-memory store and the
/// MySQL store are interchangeable behind this trait. The kernel never
/// retries a failed storage call; retry policy belongs to the caller.
#[async_trait]
pub trait VoucherRepository: Send + Sync {
    /// Store a new voucher.
    ///
    /// Fails with [`VoucherError::DuplicateId`](crate::core::error::VoucherError::DuplicateId)
    /// if the voucher id already exists; otherwise returns the persisted
    /// value unchanged.
    async fn insert(&self, voucher: Voucher) -> Result<Voucher>;

    /// Replace the stored fields of an existing voucher.
    ///
    /// Fails with [`VoucherError::NotFound`](crate::core::error::VoucherError::NotFound)
    /// if the id is absent. The stored `updated_at` is stamped with the
    /// update time, strictly greater than its previous value.
    async fn update(&self, voucher: Voucher) -> Result<Voucher>;

    /// Point lookup. Absence is `Ok(None)`, not an error.
    async fn find_by_id(&self, voucher_id: &Uuid) -> Result<Option<Voucher>>;

    /// Delete by id. Idempotent: deleting a nonexistent id is not an error.
    async fn delete_by_voucher_id(&self, voucher_id: &Uuid) -> Result<()>;

    /// Clear the store. Used for test isolation.
    async fn delete_all(&self) -> Result<()>;

    /// Filtered, paged listing.
    ///
    /// Applies every present field of `filter` conjunctively, orders by
    /// the request's sort key/direction with ties broken by `voucher_id`
    /// ascending, and computes totals over the filtered set.
    async fn find_all(
        &self,
        request: &PageRequest,
        filter: &FilterCondition,
    ) -> Result<PageResult<Voucher>>;

    /// Insert a batch atomically: either every voucher is stored or none
    /// are visibly inserted. Returns the number of inserted records.
    async fn bulk_insert(&self, vouchers: Vec<Voucher>) -> Result<usize>;
}
