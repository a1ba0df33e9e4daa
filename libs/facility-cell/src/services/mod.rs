pub mod department;
pub mod physician;
pub mod room;

pub use department::DepartmentService;
pub use physician::PhysicianService;
pub use room::RoomService;
