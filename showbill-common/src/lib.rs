//! # Showbill Common Library
//!
//! Shared code for the showbill booking directory:
//! - Database schema, models and queries
//! - Genre and state-code vocabularies
//! - Form payload validation
//! - Listing aggregation (city grouping, past/upcoming split, search folds)
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod genre;
pub mod listings;
pub mod us_state;

pub use error::{Error, Result};
pub use genre::Genre;
pub use us_state::UsState;
