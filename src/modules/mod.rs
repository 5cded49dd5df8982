//! Modules layer - Infrastructure components for external integrations
//!
//! Contains the screenshot normalization pipeline and clients for the
//! external Google services.

pub mod google;
pub mod image;
