//! Partially-specified query predicates for voucher listings

use crate::core::voucher::{Voucher, VoucherKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable, optional-field predicate for narrowing a listing query.
///
/// Every field is optional; an absent field constrains nothing. All
/// present fields apply conjunctively (AND). The condition carries no
/// storage syntax — each backend translates it into its native filter
/// form (the in-memory store evaluates [`FilterCondition::matches`], the
/// MySQL store assembles `WHERE` clauses from the same fields).
///
/// Built once from caller-supplied search criteria via
/// [`FilterCondition::builder`]; never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    kind: Option<VoucherKind>,
    min_value: Option<i64>,
    max_value: Option<i64>,
    created_after: Option<DateTime<Utc>>,
    created_before: Option<DateTime<Utc>>,
}

impl FilterCondition {
    /// The empty condition: matches every voucher.
    pub fn any() -> Self {
        Self::default()
    }

    /// Start building a condition from raw, possibly-absent criteria.
    pub fn builder() -> FilterConditionBuilder {
        FilterConditionBuilder::default()
    }

    // === Accessors ===

    pub fn kind(&self) -> Option<VoucherKind> {
        self.kind
    }

    pub fn min_value(&self) -> Option<i64> {
        self.min_value
    }

    pub fn max_value(&self) -> Option<i64> {
        self.max_value
    }

    pub fn created_after(&self) -> Option<DateTime<Utc>> {
        self.created_after
    }

    pub fn created_before(&self) -> Option<DateTime<Utc>> {
        self.created_before
    }

    /// Whether no field constrains anything.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.min_value.is_none()
            && self.max_value.is_none()
            && self.created_after.is_none()
            && self.created_before.is_none()
    }

    /// Evaluate the conjunction against a voucher.
    ///
    /// Bounds are inclusive; timestamp bounds compare `created_at`.
    pub fn matches(&self, voucher: &Voucher) -> bool {
        self.kind.is_none_or(|k| voucher.kind() == k)
            && self.min_value.is_none_or(|min| voucher.discount_value() >= min)
            && self.max_value.is_none_or(|max| voucher.discount_value() <= max)
            && self.created_after.is_none_or(|t| voucher.created_at() >= t)
            && self.created_before.is_none_or(|t| voucher.created_at() <= t)
    }
}

/// Builder for [`FilterCondition`].
///
/// Pure data transformation: absent stays absent, nothing is defaulted,
/// nothing can fail. Setters accept either a value or an `Option` so raw
/// search input can be forwarded without branching.
#[derive(Debug, Clone, Default)]
pub struct FilterConditionBuilder {
    kind: Option<VoucherKind>,
    min_value: Option<i64>,
    max_value: Option<i64>,
    created_after: Option<DateTime<Utc>>,
    created_before: Option<DateTime<Utc>>,
}

impl FilterConditionBuilder {
    pub fn kind(mut self, kind: impl Into<Option<VoucherKind>>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn min_value(mut self, min_value: impl Into<Option<i64>>) -> Self {
        self.min_value = min_value.into();
        self
    }

    pub fn max_value(mut self, max_value: impl Into<Option<i64>>) -> Self {
        self.max_value = max_value.into();
        self
    }

    pub fn created_after(mut self, created_after: impl Into<Option<DateTime<Utc>>>) -> Self {
        self.created_after = created_after.into();
        self
    }

    pub fn created_before(mut self, created_before: impl Into<Option<DateTime<Utc>>>) -> Self {
        self.created_before = created_before.into();
        self
    }

    pub fn build(self) -> FilterCondition {
        FilterCondition {
            kind: self.kind,
            min_value: self.min_value,
            max_value: self.max_value,
            created_after: self.created_after,
            created_before: self.created_before,
        }
    }
}
