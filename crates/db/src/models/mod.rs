//! Row structs and DTOs, one module per table.

pub mod audit;
pub mod dashboard;
pub mod payment_method;
pub mod payment_plan;
pub mod refund;
pub mod session;
pub mod student;
pub mod student_payment;
pub mod tuition_fee;
pub mod user;
