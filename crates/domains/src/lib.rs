//! message-board/crates/domains/src/lib.rs
//!
//! The central domain model and interface definitions for the message board.

pub mod error;
pub mod models;
pub mod ports;
pub mod views;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use ports::*;
pub use views::*;
