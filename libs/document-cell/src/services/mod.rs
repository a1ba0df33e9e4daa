pub mod document;
pub mod share;
pub mod version;

pub use document::DocumentService;
pub use share::ShareService;
pub use version::VersionService;
