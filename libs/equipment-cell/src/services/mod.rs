pub mod equipment;
pub mod maintenance;
pub mod quality;

pub use equipment::EquipmentService;
pub use maintenance::MaintenanceService;
pub use quality::QualityControlService;
