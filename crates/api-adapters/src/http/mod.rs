//! axum wiring.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use error::{ApiError, ErrorCode};
pub use handlers::AppState;
pub use router::create_router;
