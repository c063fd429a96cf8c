//! # api-adapters
//!
//! The HTTP boundary of the message board: wire formats, and (feature
//! `web-axum`) the axum router that parses requests into `BoardService`
//! calls and serializes the outcome.

pub mod dto;

#[cfg(feature = "web-axum")]
pub mod http;
