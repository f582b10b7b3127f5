//! Command Handlers module
//!
//! The borrowing state machine. Each handler runs one lifecycle
//! transition as a single database transaction over the persistence
//! gateway.

mod borrow_handler;
mod commands;
mod return_handler;

#[cfg(test)]
mod tests;

pub use borrow_handler::BorrowHandler;
pub use commands::*;
pub use return_handler::ReturnHandler;
