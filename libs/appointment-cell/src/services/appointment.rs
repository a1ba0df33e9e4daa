use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::debug;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    Appointment, AppointmentError, AppointmentQuery, AppointmentStatus, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};

pub struct AppointmentService {
    store: PostgrestClient,
}

impl AppointmentService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Creating appointment for patient {} at {}",
            request.patient_id, request.scheduled_time
        );

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "patient_id": request.patient_id,
            "scheduled_time": request.scheduled_time,
            "appointment_type": request.appointment_type,
            "status": request.status.unwrap_or(AppointmentStatus::Scheduled),
            "reason": request.reason,
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<Appointment> = self
            .store
            .mutate(Method::POST, &TableQuery::new("appointments").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(AppointmentError::Database(
                "Failed to create appointment".to_string(),
            ));
        }
        Ok(result.remove(0))
    }

    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        let path = TableQuery::new("appointments").eq("id", appointment_id).path();
        let mut rows: Vec<Appointment> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(AppointmentError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_appointments(
        &self,
        query: AppointmentQuery,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut q = TableQuery::new("appointments");

        if let Some(patient_id) = query.patient_id {
            q = q.eq("patient_id", patient_id);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status.as_str());
        }
        if let Some(appointment_type) = query.appointment_type {
            q = q.eq("appointment_type", appointment_type.as_str());
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("scheduled_time.asc").paginate(limit, offset).path();

        let rows: Vec<Appointment> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_appointments_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = TableQuery::new("appointments")
            .eq("patient_id", patient_id)
            .order("scheduled_time.asc")
            .path();
        let rows: Vec<Appointment> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_appointment(
        &self,
        appointment_id: i64,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let mut update = Map::new();

        if let Some(scheduled_time) = request.scheduled_time {
            update.insert("scheduled_time".to_string(), json!(scheduled_time));
        }
        if let Some(appointment_type) = request.appointment_type {
            update.insert("appointment_type".to_string(), json!(appointment_type));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(reason) = request.reason {
            update.insert("reason".to_string(), json!(reason));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("appointments").eq("id", appointment_id).path();
        let mut result: Vec<Appointment> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(AppointmentError::NotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_appointment(&self, appointment_id: i64) -> Result<(), AppointmentError> {
        let path = TableQuery::new("appointments").eq("id", appointment_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(AppointmentError::NotFound);
        }
        Ok(())
    }
}
