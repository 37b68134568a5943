//! Typed wrappers over the service resources.
//!
//! Each module adds methods to [`ApiClient`](crate::ApiClient). Pagination
//! follows each resource's own contract.

mod companies;
mod finance;
mod inventory;
mod logs;
mod stock_orders;
mod users;

pub use companies::{BalanceQuery, CompanyFilter};
pub use inventory::PerformanceRange;
