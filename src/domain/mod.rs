//! Domain module
//!
//! Core domain types and the loan arithmetic the borrowing
//! state machine is built on.

pub mod book;
pub mod borrow;
pub mod loan;
pub mod role;
pub mod user;

pub use book::Book;
pub use borrow::Borrow;
pub use role::Role;
pub use user::User;
