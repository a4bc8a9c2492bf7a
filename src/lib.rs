//! CRM client - client-side state sync for customers, leads and the
//! signed-in session.
//!
//! This library exposes modules for use by the `crm` binary and in
//! integration tests.

pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod state;
pub mod traits;
pub mod validation;
