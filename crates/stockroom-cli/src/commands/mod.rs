//! Subcommand implementations.

pub mod companies;
pub mod finance;
pub mod inventory;
pub mod logs;
pub mod orders;
pub mod session;
pub mod users;
