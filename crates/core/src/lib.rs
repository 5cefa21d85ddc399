//! Domain logic shared by the store, the HTTP server, and the client.
//!
//! Nothing in this crate performs I/O.

pub mod audit;
pub mod error;
pub mod hashing;
pub mod refund;
pub mod roles;
pub mod search;
pub mod types;
pub mod validation;
