//! # storage-adapters
//!
//! Implementations of the `ThreadRepository` port.
//!
//! - [`MemoryThreadRepository`]: always compiled.
//! - [`PgThreadRepository`]: feature `db-postgres`.

pub mod memory;
#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::MemoryThreadRepository;
#[cfg(feature = "db-postgres")]
pub use postgres::PgThreadRepository;
