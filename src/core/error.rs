//! Typed error handling for the voucher kernel
//!
//! Every failure this crate can produce is a [`VoucherError`] variant, so
//! callers handle errors specifically instead of matching on strings.
//! "Not found" is a value (`Ok(None)`) at the repository layer; it becomes
//! [`VoucherError::VoucherNotFound`] only at the service layer. Storage
//! failures are propagated, never retried here — retry policy belongs to
//! the caller.

use crate::core::voucher::VoucherKind;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, VoucherError>;

/// The error taxonomy of the voucher kernel.
#[derive(Debug, Clone, PartialEq)]
pub enum VoucherError {
    /// A construction-time magnitude invariant was violated
    InvalidVoucherValue { kind: VoucherKind, value: i64 },

    /// Quantity must be non-negative
    InvalidQuantity { quantity: i64 },

    /// Expiration must be strictly after creation
    InvalidExpiration { expiration_at: DateTime<Utc> },

    /// An external kind code that maps to no known kind
    UnrecognizedKind { code: String },

    /// Insert with a voucher id that already exists
    DuplicateId { voucher_id: Uuid },

    /// Update/lookup targeting a voucher id that does not exist
    NotFound { voucher_id: Uuid },

    /// Service-level "no such voucher" condition
    VoucherNotFound { voucher_id: Uuid },

    /// The storage transport could not be reached
    StorageUnavailable { message: String },

    /// The storage backend rejected the operation (constraint violation,
    /// malformed data reaching the backend)
    StorageRejected { message: String },
}

impl VoucherError {
    /// Stable code for programmatic handling and log correlation.
    pub fn error_code(&self) -> &'static str {
        match self {
            VoucherError::InvalidVoucherValue { .. } => "INVALID_VOUCHER_VALUE",
            VoucherError::InvalidQuantity { .. } => "INVALID_QUANTITY",
            VoucherError::InvalidExpiration { .. } => "INVALID_EXPIRATION",
            VoucherError::UnrecognizedKind { .. } => "UNRECOGNIZED_KIND",
            VoucherError::DuplicateId { .. } => "DUPLICATE_ID",
            VoucherError::NotFound { .. } => "NOT_FOUND",
            VoucherError::VoucherNotFound { .. } => "VOUCHER_NOT_FOUND",
            VoucherError::StorageUnavailable { .. } => "STORAGE_UNAVAILABLE",
            VoucherError::StorageRejected { .. } => "STORAGE_REJECTED",
        }
    }

    /// Whether this is a construction-time validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            VoucherError::InvalidVoucherValue { .. }
                | VoucherError::InvalidQuantity { .. }
                | VoucherError::InvalidExpiration { .. }
        )
    }

    /// Whether this is a backend failure (as opposed to an expected
    /// domain condition a caller should handle).
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            VoucherError::StorageUnavailable { .. } | VoucherError::StorageRejected { .. }
        )
    }
}

impl fmt::Display for VoucherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoucherError::InvalidVoucherValue { kind, value } => {
                write!(f, "invalid discount value {value} for {kind} voucher")
            }
            VoucherError::InvalidQuantity { quantity } => {
                write!(f, "invalid quantity {quantity}: must be non-negative")
            }
            VoucherError::InvalidExpiration { expiration_at } => {
                write!(
                    f,
                    "invalid expiration {expiration_at}: must be after creation"
                )
            }
            VoucherError::UnrecognizedKind { code } => {
                write!(f, "unrecognized voucher kind code: {code}")
            }
            VoucherError::DuplicateId { voucher_id } => {
                write!(f, "voucher {voucher_id} already exists")
            }
            VoucherError::NotFound { voucher_id } => {
                write!(f, "voucher {voucher_id} not found in store")
            }
            VoucherError::VoucherNotFound { voucher_id } => {
                write!(f, "can not find a voucher for {voucher_id}")
            }
            VoucherError::StorageUnavailable { message } => {
                write!(f, "storage unavailable: {message}")
            }
            VoucherError::StorageRejected { message } => {
                write!(f, "storage rejected operation: {message}")
            }
        }
    }
}

impl std::error::Error for VoucherError {}
