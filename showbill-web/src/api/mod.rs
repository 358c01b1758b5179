//! HTTP API surface

pub mod error;
pub mod handlers;
pub mod server;

pub use server::{create_router, AppContext};
