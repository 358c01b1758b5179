//! # Showbill Web Service
//!
//! HTTP surface for the booking directory: venue/artist/show listings,
//! name search, detail pages and the create/edit/delete endpoints.

pub mod api;
