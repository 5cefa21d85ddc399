//! CampusDesk API server library.
//!
//! Exposes the building blocks (config, state, error handling, session auth,
//! audit interceptor, routes) so integration tests and the binary entrypoint
//! share them.

pub mod auth;
pub mod background;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
