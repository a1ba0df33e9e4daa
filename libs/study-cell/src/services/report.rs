use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    CreateReportRequest, RadiologyReport, ReportQuery, ReportStatus, StudyError, UpdateReportRequest,
};

pub struct ReportService {
    store: PostgrestClient,
}

impl ReportService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_report(
        &self,
        request: CreateReportRequest,
    ) -> Result<RadiologyReport, StudyError> {
        debug!("Creating report for study {}", request.study_id);

        if request.critical_findings.unwrap_or(false) {
            warn!(
                "Report for study {} flagged with critical findings",
                request.study_id
            );
        }

        let now = Utc::now().to_rfc3339();
        let row = json!({
            "study_id": request.study_id,
            "patient_id": request.patient_id,
            "radiologist_id": request.radiologist_id,
            "findings": request.findings,
            "impression": request.impression,
            "recommendations": request.recommendations,
            "status": request.status.unwrap_or(ReportStatus::Draft),
            "critical_findings": request.critical_findings.unwrap_or(false),
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<RadiologyReport> = self
            .store
            .mutate(Method::POST, &TableQuery::new("radiology_reports").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(StudyError::Database("Failed to create report".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_report(&self, report_id: i64) -> Result<RadiologyReport, StudyError> {
        let path = TableQuery::new("radiology_reports").eq("id", report_id).path();
        let mut rows: Vec<RadiologyReport> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(StudyError::ReportNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_reports(&self, query: ReportQuery) -> Result<Vec<RadiologyReport>, StudyError> {
        let mut q = TableQuery::new("radiology_reports");

        if let Some(study_id) = query.study_id {
            q = q.eq("study_id", study_id);
        }
        if let Some(patient_id) = query.patient_id {
            q = q.eq("patient_id", patient_id);
        }
        if let Some(radiologist_id) = query.radiologist_id {
            q = q.eq("radiologist_id", radiologist_id);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status.as_str());
        }
        if let Some(start_date) = query.start_date {
            q = q.gte("created_at", start_date);
        }
        if let Some(end_date) = query.end_date {
            q = q.lte("created_at", end_date);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<RadiologyReport> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    /// A study carries at most one report; answers the first match.
    pub async fn get_report_for_study(&self, study_id: i64) -> Result<RadiologyReport, StudyError> {
        let path = TableQuery::new("radiology_reports").eq("study_id", study_id).path();
        let mut rows: Vec<RadiologyReport> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(StudyError::ReportNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn get_reports_for_patient(
        &self,
        patient_id: i64,
    ) -> Result<Vec<RadiologyReport>, StudyError> {
        let path = TableQuery::new("radiology_reports")
            .eq("patient_id", patient_id)
            .order("created_at.desc")
            .path();
        let rows: Vec<RadiologyReport> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_reports_for_radiologist(
        &self,
        radiologist_id: i64,
    ) -> Result<Vec<RadiologyReport>, StudyError> {
        let path = TableQuery::new("radiology_reports")
            .eq("radiologist_id", radiologist_id)
            .order("created_at.desc")
            .path();
        let rows: Vec<RadiologyReport> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_reports_by_status(
        &self,
        status: &str,
    ) -> Result<Vec<RadiologyReport>, StudyError> {
        let path = TableQuery::new("radiology_reports").eq("status", status).path();
        let rows: Vec<RadiologyReport> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_critical_findings_reports(&self) -> Result<Vec<RadiologyReport>, StudyError> {
        let path = TableQuery::new("radiology_reports").eq("critical_findings", true).path();
        let rows: Vec<RadiologyReport> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_report(
        &self,
        report_id: i64,
        request: UpdateReportRequest,
    ) -> Result<RadiologyReport, StudyError> {
        let mut update = Map::new();

        if let Some(findings) = request.findings {
            update.insert("findings".to_string(), json!(findings));
        }
        if let Some(impression) = request.impression {
            update.insert("impression".to_string(), json!(impression));
        }
        if let Some(recommendations) = request.recommendations {
            update.insert("recommendations".to_string(), json!(recommendations));
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(critical_findings) = request.critical_findings {
            update.insert("critical_findings".to_string(), json!(critical_findings));
        }
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("radiology_reports").eq("id", report_id).path();
        let mut result: Vec<RadiologyReport> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(StudyError::ReportNotFound);
        }
        Ok(result.remove(0))
    }

    /// Signing stamps the signer and moves the report to its final state.
    pub async fn sign_report(
        &self,
        report_id: i64,
        signed_by: i64,
    ) -> Result<RadiologyReport, StudyError> {
        let now = Utc::now().to_rfc3339();
        let update = json!({
            "status": ReportStatus::Final,
            "signed_by": signed_by,
            "signed_at": now,
            "updated_at": now,
        });

        let path = TableQuery::new("radiology_reports").eq("id", report_id).path();
        let mut result: Vec<RadiologyReport> = self
            .store
            .mutate(Method::PATCH, &path, Some(update))
            .await?;

        if result.is_empty() {
            return Err(StudyError::ReportNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_report(&self, report_id: i64) -> Result<(), StudyError> {
        let path = TableQuery::new("radiology_reports").eq("id", report_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(StudyError::ReportNotFound);
        }
        Ok(())
    }
}
