//! Voucher entity and its closed set of discount kinds

use crate::core::error::{Result, VoucherError};
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Largest discount a fixed-amount voucher may carry.
pub const FIXED_DISCOUNT_MAX: i64 = 10_000;

/// Largest discount a percent voucher may carry.
pub const PERCENT_DISCOUNT_MAX: i64 = 100;

/// The closed set of discount strategies.
///
/// Each kind has a stable wire code (`"1"` for fixed, `"2"` for percent)
/// that is used both for console input parsing and for the persisted
/// `voucher_type` column. The codes must survive every serialized form
/// exactly, so serde maps the enum to the code string rather than to the
/// variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoucherKind {
    /// Absolute currency amount off the order total
    Fixed,
    /// Percentage off the order total
    Percent,
}

impl VoucherKind {
    /// The stable external wire code for this kind.
    pub const fn code(&self) -> &'static str {
        match self {
            VoucherKind::Fixed => "1",
            VoucherKind::Percent => "2",
        }
    }

    /// Human-readable label, used by [`fmt::Display`] and renderings.
    pub const fn label(&self) -> &'static str {
        match self {
            VoucherKind::Fixed => "fixed",
            VoucherKind::Percent => "percent",
        }
    }

    /// Resolve a wire code back to a kind.
    ///
    /// Unknown codes are an explicit [`VoucherError::UnrecognizedKind`],
    /// never a silent null-like value. Calling layers that reprompt the
    /// user branch on that variant.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "1" => Ok(VoucherKind::Fixed),
            "2" => Ok(VoucherKind::Percent),
            other => Err(VoucherError::UnrecognizedKind {
                code: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for VoucherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for VoucherKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for VoucherKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CodeVisitor;

        impl Visitor<'_> for CodeVisitor {
            type Value = VoucherKind;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a voucher kind wire code (\"1\" or \"2\")")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<VoucherKind, E> {
                VoucherKind::from_code(v)
                    .map_err(|_| de::Error::custom(format!("unrecognized voucher kind code: {v}")))
            }
        }

        deserializer.deserialize_str(CodeVisitor)
    }
}

/// A discount voucher.
///
/// The kind tag selects the discount arithmetic; the kind set is closed,
/// so the entity is one struct rather than an open trait hierarchy.
/// Invariants are enforced at construction and by the explicit setters —
/// no other component re-validates:
///
/// - fixed: `0 < discount_value <= 10_000`
/// - percent: `0 < discount_value <= 100`
/// - `quantity >= 0`
/// - `expiration_at` strictly after `created_at`
/// - timestamps are aligned to microsecond precision
///
/// `updated_at` is refreshed by every mutation and never moves backwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    voucher_id: Uuid,
    kind: VoucherKind,
    discount_value: i64,
    quantity: i64,
    expiration_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Voucher {
    /// Create a fixed-amount voucher.
    pub fn fixed(discount_value: i64, quantity: i64, expiration_at: DateTime<Utc>) -> Result<Self> {
        Self::create(VoucherKind::Fixed, discount_value, quantity, expiration_at)
    }

    /// Create a percent voucher.
    pub fn percent(
        discount_value: i64,
        quantity: i64,
        expiration_at: DateTime<Utc>,
    ) -> Result<Self> {
        Self::create(VoucherKind::Percent, discount_value, quantity, expiration_at)
    }

    /// Create a voucher of the given kind, dispatching to the matching
    /// variant constructor.
    pub fn new(
        kind: VoucherKind,
        discount_value: i64,
        quantity: i64,
        expiration_at: DateTime<Utc>,
    ) -> Result<Self> {
        Self::create(kind, discount_value, quantity, expiration_at)
    }

    fn create(
        kind: VoucherKind,
        discount_value: i64,
        quantity: i64,
        expiration_at: DateTime<Utc>,
    ) -> Result<Self> {
        validate_discount_value(kind, discount_value)?;
        validate_quantity(quantity)?;

        let now = truncate_to_micros(Utc::now());
        let expiration_at = truncate_to_micros(expiration_at);
        if expiration_at <= now {
            return Err(VoucherError::InvalidExpiration { expiration_at });
        }

        Ok(Self {
            voucher_id: Uuid::new_v4(),
            kind,
            discount_value,
            quantity,
            expiration_at,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rehydrate a voucher from persisted fields.
    ///
    /// Storage backends only: the row was validated when the voucher was
    /// created, so no invariants are re-checked here.
    #[allow(clippy::too_many_arguments)]
    pub fn from_stored(
        voucher_id: Uuid,
        kind: VoucherKind,
        discount_value: i64,
        quantity: i64,
        expiration_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            voucher_id,
            kind,
            discount_value,
            quantity,
            expiration_at,
            created_at,
            updated_at,
        }
    }

    // === Accessors ===

    pub fn voucher_id(&self) -> Uuid {
        self.voucher_id
    }

    pub fn kind(&self) -> VoucherKind {
        self.kind
    }

    pub fn discount_value(&self) -> i64 {
        self.discount_value
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn expiration_at(&self) -> DateTime<Utc> {
        self.expiration_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Whether the voucher has expired relative to `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiration_at <= now
    }

    // === Discount arithmetic ===

    /// Apply the discount to a pre-discount amount.
    ///
    /// The result is never negative and the arithmetic cannot overflow
    /// for any `i64` amount: fixed subtraction saturates, and percent
    /// math runs through `i128` before truncating toward zero.
    pub fn discount(&self, amount: i64) -> i64 {
        match self.kind {
            VoucherKind::Fixed => amount.saturating_sub(self.discount_value).max(0),
            VoucherKind::Percent => {
                let kept = i128::from(amount) * i128::from(100 - self.discount_value) / 100;
                kept.clamp(0, i128::from(i64::MAX)) as i64
            }
        }
    }

    // === Mutation ===

    /// Replace the discount value, re-running the kind's magnitude check.
    pub fn set_discount_value(&mut self, discount_value: i64) -> Result<()> {
        validate_discount_value(self.kind, discount_value)?;
        self.discount_value = discount_value;
        self.touch();
        Ok(())
    }

    /// Replace the remaining usable count.
    pub fn set_quantity(&mut self, quantity: i64) -> Result<()> {
        validate_quantity(quantity)?;
        self.quantity = quantity;
        self.touch();
        Ok(())
    }

    /// Replace the expiration timestamp. Must stay strictly after creation.
    pub fn set_expiration_at(&mut self, expiration_at: DateTime<Utc>) -> Result<()> {
        let expiration_at = truncate_to_micros(expiration_at);
        if expiration_at <= self.created_at {
            return Err(VoucherError::InvalidExpiration { expiration_at });
        }
        self.expiration_at = expiration_at;
        self.touch();
        Ok(())
    }

    /// Refresh `updated_at` to now.
    ///
    /// Repositories call this on the update path so the stored timestamp
    /// reflects the update time.
    pub fn touch(&mut self) {
        self.updated_at = truncate_to_micros(Utc::now());
    }
}

impl fmt::Display for Voucher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.kind {
            VoucherKind::Fixed => "amount",
            VoucherKind::Percent => "percent",
        };
        write!(
            f,
            "{} voucher {} ({} {}, quantity {}, expires {})",
            self.kind,
            self.voucher_id,
            unit,
            self.discount_value,
            self.quantity,
            self.expiration_at
        )
    }
}

/// Align a timestamp to microsecond precision, the finest granularity
/// the relational backend's `DATETIME(6)` columns keep. Vouchers carry
/// only aligned timestamps so persisted values decode identically.
fn truncate_to_micros(t: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(t.timestamp_micros()).unwrap_or(t)
}

fn validate_discount_value(kind: VoucherKind, value: i64) -> Result<()> {
    let max = match kind {
        VoucherKind::Fixed => FIXED_DISCOUNT_MAX,
        VoucherKind::Percent => PERCENT_DISCOUNT_MAX,
    };
    if value <= 0 || value > max {
        return Err(VoucherError::InvalidVoucherValue { kind, value });
    }
    Ok(())
}

fn validate_quantity(quantity: i64) -> Result<()> {
    if quantity < 0 {
        return Err(VoucherError::InvalidQuantity { quantity });
    }
    Ok(())
}
