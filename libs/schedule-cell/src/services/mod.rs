pub mod conflict;
pub mod schedule;

pub use schedule::ScheduleService;
