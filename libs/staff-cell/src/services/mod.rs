pub mod staff;
pub mod technologist;

pub use staff::StaffService;
pub use technologist::TechnologistService;
