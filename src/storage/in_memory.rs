//! In-memory implementation of VoucherRepository for testing and development

use crate::core::error::{Result, VoucherError};
use crate::core::filter::FilterCondition;
use crate::core::page::{PageRequest, PageResult, SortDirection, SortKey};
use crate::core::repository::VoucherRepository;
use crate::core::voucher::Voucher;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory voucher repository.
///
/// Useful for testing and development. Mutations serialize through an
/// `RwLock`, so `find_by_id` never observes a half-written record and a
/// bulk insert cannot interleave with concurrent single inserts. A
/// poisoned lock is reported as `StorageUnavailable` — the in-memory
/// transport equivalent of losing the connection.
#[derive(Clone)]
pub struct InMemoryVoucherRepository {
    vouchers: Arc<RwLock<HashMap<Uuid, Voucher>>>,
}

impl InMemoryVoucherRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            vouchers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<Uuid, Voucher>>> {
        self.vouchers
            .read()
            .map_err(|e| VoucherError::StorageUnavailable {
                message: format!("failed to acquire read lock: {e}"),
            })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, Voucher>>> {
        self.vouchers
            .write()
            .map_err(|e| VoucherError::StorageUnavailable {
                message: format!("failed to acquire write lock: {e}"),
            })
    }
}

impl Default for InMemoryVoucherRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordering for a listing: sort key, direction, then `voucher_id`
/// ascending as the tiebreak (the tiebreak ignores the direction so that
/// pagination stays deterministic either way).
fn compare(a: &Voucher, b: &Voucher, key: SortKey, direction: SortDirection) -> Ordering {
    let by_key = match key {
        SortKey::CreatedAt => a.created_at().cmp(&b.created_at()),
        SortKey::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
        SortKey::ExpirationAt => a.expiration_at().cmp(&b.expiration_at()),
        SortKey::DiscountValue => a.discount_value().cmp(&b.discount_value()),
        SortKey::Quantity => a.quantity().cmp(&b.quantity()),
    };
    let by_key = match direction {
        SortDirection::Ascending => by_key,
        SortDirection::Descending => by_key.reverse(),
    };
    by_key.then_with(|| a.voucher_id().cmp(&b.voucher_id()))
}

#[async_trait]
impl VoucherRepository for InMemoryVoucherRepository {
    async fn insert(&self, voucher: Voucher) -> Result<Voucher> {
        let mut vouchers = self.write()?;
        if vouchers.contains_key(&voucher.voucher_id()) {
            return Err(VoucherError::DuplicateId {
                voucher_id: voucher.voucher_id(),
            });
        }
        vouchers.insert(voucher.voucher_id(), voucher.clone());
        Ok(voucher)
    }

    async fn update(&self, voucher: Voucher) -> Result<Voucher> {
        let mut vouchers = self.write()?;
        if !vouchers.contains_key(&voucher.voucher_id()) {
            return Err(VoucherError::NotFound {
                voucher_id: voucher.voucher_id(),
            });
        }
        let mut updated = voucher;
        updated.touch();
        vouchers.insert(updated.voucher_id(), updated.clone());
        Ok(updated)
    }

    async fn find_by_id(&self, voucher_id: &Uuid) -> Result<Option<Voucher>> {
        Ok(self.read()?.get(voucher_id).cloned())
    }

    async fn delete_by_voucher_id(&self, voucher_id: &Uuid) -> Result<()> {
        self.write()?.remove(voucher_id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<()> {
        self.write()?.clear();
        Ok(())
    }

    async fn find_all(
        &self,
        request: &PageRequest,
        filter: &FilterCondition,
    ) -> Result<PageResult<Voucher>> {
        let mut matched: Vec<Voucher> = self
            .read()?
            .values()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect();

        let total_elements = matched.len();
        matched.sort_by(|a, b| compare(a, b, request.sort_key(), request.sort_direction()));

        let items: Vec<Voucher> = matched
            .into_iter()
            .skip(request.offset())
            .take(request.size())
            .collect();

        Ok(PageResult::new(items, request, total_elements))
    }

    async fn bulk_insert(&self, vouchers: Vec<Voucher>) -> Result<usize> {
        let mut store = self.write()?;

        // All-or-nothing: validate the whole batch (against the store and
        // within the batch) before the first insert becomes visible.
        let mut batch_ids = HashSet::with_capacity(vouchers.len());
        for voucher in &vouchers {
            let id = voucher.voucher_id();
            if store.contains_key(&id) || !batch_ids.insert(id) {
                return Err(VoucherError::DuplicateId { voucher_id: id });
            }
        }

        let inserted = vouchers.len();
        for voucher in vouchers {
            store.insert(voucher.voucher_id(), voucher);
        }
        tracing::debug!(inserted, "bulk inserted vouchers into memory store");
        Ok(inserted)
    }
}
