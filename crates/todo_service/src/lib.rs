//! Owner-scoped services for Ticklist.
//!
//! Thin orchestration over the [`todo_store`] gateway: input validation,
//! ownership verification, and the list-delete cascade. Everything here
//! takes a pre-authenticated owner ID; nothing in this crate touches the
//! datastore directly.

mod error;
mod todo;
mod todo_list;

pub use error::*;
pub use todo::*;
pub use todo_list::*;
