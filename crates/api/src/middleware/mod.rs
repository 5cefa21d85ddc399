pub mod audit;
pub mod auth;
pub mod pages;
pub mod rbac;
