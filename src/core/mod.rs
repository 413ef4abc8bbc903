//! Core module containing the voucher domain model and contracts

pub mod error;
pub mod filter;
pub mod page;
pub mod repository;
pub mod voucher;

pub use error::{Result, VoucherError};
pub use filter::{FilterCondition, FilterConditionBuilder};
pub use page::{PageRequest, PageResult, SortDirection, SortKey};
pub use repository::VoucherRepository;
pub use voucher::{Voucher, VoucherKind};
