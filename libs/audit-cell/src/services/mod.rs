pub mod audit;

pub use audit::AuditService;
