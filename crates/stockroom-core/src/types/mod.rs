//! Records exchanged with the stockroom service.

pub mod company;
pub mod finance;
pub mod inventory;
pub mod log;
pub mod page;
pub mod stock_order;
mod server_url;
pub mod user;

pub use page::{Page, SkipLimit};
pub use server_url::{API_PREFIX, DEFAULT_SERVER, ServerUrl};
pub use user::{LoginResponse, NewUser, User, UserUpdate};
