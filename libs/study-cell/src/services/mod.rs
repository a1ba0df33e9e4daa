pub mod annotation;
pub mod protocol;
pub mod report;
pub mod study;

pub use annotation::AnnotationService;
pub use protocol::ProtocolService;
pub use report::ReportService;
pub use study::StudyService;
