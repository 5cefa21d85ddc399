//! Zero-sized repositories, one per table family. Generic resources go
//! through [`crate::resource::ResourceRepo`].

pub mod audit_repo;
pub mod dashboard_repo;
pub mod session_repo;
pub mod user_repo;

pub use audit_repo::AuditLogRepo;
pub use dashboard_repo::DashboardRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
