//! Persistence gateway for Ticklist.
//!
//! This crate is the only component allowed to issue datastore queries.
//! It exposes the [`TodoStore`] trait with a SQLite-backed implementation
//! for production and an in-memory implementation for tests. Every
//! owner-scoped operation takes the caller identity explicitly; a todo or
//! list that exists but belongs to someone else reads as absent.

mod error;
mod memory;
mod schema;
mod sqlite;
mod traits;

pub use error::*;
pub use memory::*;
pub use sqlite::*;
pub use traits::*;
