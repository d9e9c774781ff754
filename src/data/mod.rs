//! Market data
//!
//! Handles:
//! - Real-time prices over HTTP
//! - Historical prices with JSON file storage
//! - In-memory price sources for tests and demos

pub mod source;
pub mod http;
pub mod history;

pub use source::*;
pub use http::*;
pub use history::*;
