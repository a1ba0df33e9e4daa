pub mod allergy;
pub mod history;
pub mod insurance;
pub mod patient;

pub use allergy::AllergyService;
pub use history::MedicalHistoryService;
pub use insurance::InsuranceService;
pub use patient::PatientService;
