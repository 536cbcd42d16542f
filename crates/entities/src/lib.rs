//! Core entity definitions for Ticklist.
//!
//! This crate defines the data types shared across the Ticklist
//! application: users, todo lists, and the todo items that belong to
//! them.

mod todo;
mod todo_list;
mod user;

pub use todo::*;
pub use todo_list::*;
pub use user::*;
