use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use shared_database::AppState;
use shared_models::error::AppError;

use crate::models::{
    AllergyQuery, CreateAllergyRequest, CreateInsurancePolicyRequest, CreateMedicalHistoryRequest,
    CreatePatientRequest, InsuranceQuery, MedicalHistoryQuery, PatientSearchQuery,
    UpdateAllergyRequest, UpdateInsurancePolicyRequest, UpdateMedicalHistoryRequest,
    UpdatePatientRequest,
};
use crate::services::{AllergyService, InsuranceService, MedicalHistoryService, PatientService};

// --- Patients ---

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patient = service.create_patient(request).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patient = service.get_patient(patient_id).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn get_patient_by_mrn(
    State(state): State<Arc<AppState>>,
    Path(mrn): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patient = service.get_patient_by_mrn(&mrn).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn search_patients(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PatientSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patients = service.search_patients(query).await?;

    Ok(Json(json!(patients)))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
    Json(request): Json<UpdatePatientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    let patient = service.update_patient(patient_id, request).await?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = PatientService::new(&state);

    service.delete_patient(patient_id).await?;

    Ok(Json(json!({ "message": "Patient deleted successfully" })))
}

// --- Medical history ---

#[axum::debug_handler]
pub async fn create_medical_history(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateMedicalHistoryRequest>,
) -> Result<Json<Value>, AppError> {
    let service = MedicalHistoryService::new(&state);

    let record = service.create_history(request).await?;

    Ok(Json(json!(record)))
}

#[axum::debug_handler]
pub async fn get_medical_history(
    State(state): State<Arc<AppState>>,
    Path(history_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = MedicalHistoryService::new(&state);

    let record = service.get_history(history_id).await?;

    Ok(Json(json!(record)))
}

#[axum::debug_handler]
pub async fn list_medical_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MedicalHistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let service = MedicalHistoryService::new(&state);

    let records = service.list_history(query).await?;

    Ok(Json(json!(records)))
}

#[axum::debug_handler]
pub async fn get_medical_history_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = MedicalHistoryService::new(&state);

    let records = service.get_history_for_patient(patient_id).await?;

    Ok(Json(json!(records)))
}

#[axum::debug_handler]
pub async fn update_medical_history(
    State(state): State<Arc<AppState>>,
    Path(history_id): Path<i64>,
    Json(request): Json<UpdateMedicalHistoryRequest>,
) -> Result<Json<Value>, AppError> {
    let service = MedicalHistoryService::new(&state);

    let record = service.update_history(history_id, request).await?;

    Ok(Json(json!(record)))
}

#[axum::debug_handler]
pub async fn delete_medical_history(
    State(state): State<Arc<AppState>>,
    Path(history_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = MedicalHistoryService::new(&state);

    service.delete_history(history_id).await?;

    Ok(Json(json!({ "message": "Medical history record deleted successfully" })))
}

// --- Allergies ---

#[axum::debug_handler]
pub async fn create_allergy(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAllergyRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AllergyService::new(&state);

    let allergy = service.create_allergy(request).await?;

    Ok(Json(json!(allergy)))
}

#[axum::debug_handler]
pub async fn get_allergy(
    State(state): State<Arc<AppState>>,
    Path(allergy_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AllergyService::new(&state);

    let allergy = service.get_allergy(allergy_id).await?;

    Ok(Json(json!(allergy)))
}

#[axum::debug_handler]
pub async fn list_allergies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AllergyQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AllergyService::new(&state);

    let allergies = service.list_allergies(query).await?;

    Ok(Json(json!(allergies)))
}

#[axum::debug_handler]
pub async fn get_allergies_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AllergyService::new(&state);

    let allergies = service.get_allergies_for_patient(patient_id, false).await?;

    Ok(Json(json!(allergies)))
}

#[axum::debug_handler]
pub async fn get_active_allergies_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AllergyService::new(&state);

    let allergies = service.get_allergies_for_patient(patient_id, true).await?;

    Ok(Json(json!(allergies)))
}

#[axum::debug_handler]
pub async fn update_allergy(
    State(state): State<Arc<AppState>>,
    Path(allergy_id): Path<i64>,
    Json(request): Json<UpdateAllergyRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AllergyService::new(&state);

    let allergy = service.update_allergy(allergy_id, request).await?;

    Ok(Json(json!(allergy)))
}

#[axum::debug_handler]
pub async fn delete_allergy(
    State(state): State<Arc<AppState>>,
    Path(allergy_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = AllergyService::new(&state);

    service.delete_allergy(allergy_id).await?;

    Ok(Json(json!({ "message": "Allergy deleted successfully" })))
}

// --- Insurance policies ---

#[axum::debug_handler]
pub async fn create_insurance_policy(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateInsurancePolicyRequest>,
) -> Result<Json<Value>, AppError> {
    let service = InsuranceService::new(&state);

    let policy = service.create_policy(request).await?;

    Ok(Json(json!(policy)))
}

#[axum::debug_handler]
pub async fn get_insurance_policy(
    State(state): State<Arc<AppState>>,
    Path(policy_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = InsuranceService::new(&state);

    let policy = service.get_policy(policy_id).await?;

    Ok(Json(json!(policy)))
}

#[axum::debug_handler]
pub async fn list_insurance_policies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<InsuranceQuery>,
) -> Result<Json<Value>, AppError> {
    let service = InsuranceService::new(&state);

    let policies = service.list_policies(query).await?;

    Ok(Json(json!(policies)))
}

#[axum::debug_handler]
pub async fn get_insurance_policies_for_patient(
    State(state): State<Arc<AppState>>,
    Path(patient_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = InsuranceService::new(&state);

    let policies = service.get_policies_for_patient(patient_id).await?;

    Ok(Json(json!(policies)))
}

#[axum::debug_handler]
pub async fn update_insurance_policy(
    State(state): State<Arc<AppState>>,
    Path(policy_id): Path<i64>,
    Json(request): Json<UpdateInsurancePolicyRequest>,
) -> Result<Json<Value>, AppError> {
    let service = InsuranceService::new(&state);

    let policy = service.update_policy(policy_id, request).await?;

    Ok(Json(json!(policy)))
}

#[axum::debug_handler]
pub async fn delete_insurance_policy(
    State(state): State<Arc<AppState>>,
    Path(policy_id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let service = InsuranceService::new(&state);

    service.delete_policy(policy_id).await?;

    Ok(Json(json!({ "message": "Insurance policy deleted successfully" })))
}
