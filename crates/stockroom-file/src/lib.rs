//! stockroom-file - filesystem-backed credential storage.
//!
//! Provides [`FileStore`], the durable medium the CLI persists its session
//! in.

mod store;

pub use store::FileStore;
