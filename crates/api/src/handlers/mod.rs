pub mod account;
pub mod audit;
pub mod auth;
pub mod crud;
pub mod dashboard;
pub mod profile;
pub mod student_payment;
