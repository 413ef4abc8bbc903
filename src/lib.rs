//! # Vouchers
//!
//! A discount voucher domain model with a pluggable, filterable, paginated
//! repository layer for order-processing applications.
//!
//! ## Features
//!
//! - **Closed voucher kinds**: fixed-amount and percent discounts as a
//!   tagged variant with kind-dispatched arithmetic
//! - **Construction-time invariants**: value bounds, non-negative
//!   quantity and future expiration validated once, at creation
//! - **Stable wire codes**: `"1"`/`"2"` kind codes preserved in every
//!   serialized and persisted form
//! - **Repository abstraction**: identical semantics over an in-memory
//!   store and a MySQL store (feature `mysql`)
//! - **Dynamic filtering**: optional-field [`FilterCondition`] applied
//!   conjunctively, translated by each backend into its native form
//! - **Deterministic pagination**: zero-based pages, voucher-id tiebreak,
//!   totals computed over the filtered set
//! - **Atomic bulk insert**: all-or-nothing batches, chunked per
//!   round-trip on the relational backend
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vouchers::prelude::*;
//! use std::sync::Arc;
//!
//! let repository = Arc::new(InMemoryVoucherRepository::new());
//! let service = VoucherService::new(repository);
//!
//! let voucher = service
//!     .create_voucher(VoucherKind::Fixed, 1000, 100, expiration)
//!     .await?;
//! assert_eq!(voucher.discount(9000), 8000);
//!
//! let fixed_only = FilterCondition::builder().kind(VoucherKind::Fixed).build();
//! let page = service
//!     .list_vouchers(&PageRequest::of(0, 10), &fixed_only)
//!     .await?;
//! ```
//!
//! [`FilterCondition`]: crate::core::filter::FilterCondition

pub mod config;
pub mod core;
pub mod service;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{Result, VoucherError},
        filter::{FilterCondition, FilterConditionBuilder},
        page::{PageRequest, PageResult, SortDirection, SortKey},
        repository::VoucherRepository,
        voucher::{Voucher, VoucherKind},
    };

    // === Service ===
    pub use crate::service::VoucherService;

    // === Storage ===
    pub use crate::storage::InMemoryVoucherRepository;
    #[cfg(feature = "mysql")]
    pub use crate::storage::MysqlVoucherRepository;

    // === Config ===
    pub use crate::config::{StorageBackend, StoreConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
