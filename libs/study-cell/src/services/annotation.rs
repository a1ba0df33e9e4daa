use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Map, Value};

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{
    AnnotationQuery, CreateAnnotationRequest, ImageAnnotation, ReviewAnnotationRequest, StudyError,
    UpdateAnnotationRequest,
};

pub struct AnnotationService {
    store: PostgrestClient,
}

impl AnnotationService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    pub async fn create_annotation(
        &self,
        request: CreateAnnotationRequest,
    ) -> Result<ImageAnnotation, StudyError> {
        let now = Utc::now().to_rfc3339();
        let row = json!({
            "study_id": request.study_id,
            "image_id": request.image_id,
            "created_by": request.created_by,
            "type": request.annotation_type,
            "data": request.data,
            "status": request.status.unwrap_or_else(|| "pending".to_string()),
            "notes": request.notes,
            "version": 1,
            "is_ai_generated": request.is_ai_generated.unwrap_or(false),
            "created_at": now,
            "updated_at": now,
        });

        let mut result: Vec<ImageAnnotation> = self
            .store
            .mutate(Method::POST, &TableQuery::new("image_annotations").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(StudyError::Database("Failed to create annotation".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_annotation(&self, annotation_id: i64) -> Result<ImageAnnotation, StudyError> {
        let path = TableQuery::new("image_annotations").eq("id", annotation_id).path();
        let mut rows: Vec<ImageAnnotation> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(StudyError::AnnotationNotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_annotations(
        &self,
        query: AnnotationQuery,
    ) -> Result<Vec<ImageAnnotation>, StudyError> {
        let mut q = TableQuery::new("image_annotations");

        if let Some(study_id) = query.study_id {
            q = q.eq("study_id", study_id);
        }
        if let Some(created_by) = query.created_by {
            q = q.eq("created_by", created_by);
        }
        if let Some(annotation_type) = query.annotation_type {
            q = q.eq("type", annotation_type);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }
        if let Some(is_ai_generated) = query.is_ai_generated {
            q = q.eq("is_ai_generated", is_ai_generated);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.paginate(limit, offset).path();

        let rows: Vec<ImageAnnotation> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_annotations_for_study(
        &self,
        study_id: i64,
    ) -> Result<Vec<ImageAnnotation>, StudyError> {
        let path = TableQuery::new("image_annotations")
            .eq("study_id", study_id)
            .order("created_at.desc")
            .path();
        let rows: Vec<ImageAnnotation> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_annotations_by_annotator(
        &self,
        user_id: i64,
    ) -> Result<Vec<ImageAnnotation>, StudyError> {
        let path = TableQuery::new("image_annotations")
            .eq("created_by", user_id)
            .order("created_at.desc")
            .path();
        let rows: Vec<ImageAnnotation> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_ai_generated_annotations(&self) -> Result<Vec<ImageAnnotation>, StudyError> {
        let path = TableQuery::new("image_annotations")
            .eq("is_ai_generated", true)
            .order("created_at.desc")
            .path();
        let rows: Vec<ImageAnnotation> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    /// Each content update bumps the annotation's version counter.
    pub async fn update_annotation(
        &self,
        annotation_id: i64,
        request: UpdateAnnotationRequest,
    ) -> Result<ImageAnnotation, StudyError> {
        let current = self.get_annotation(annotation_id).await?;

        let mut update = Map::new();

        if let Some(image_id) = request.image_id {
            update.insert("image_id".to_string(), json!(image_id));
        }
        if let Some(annotation_type) = request.annotation_type {
            update.insert("type".to_string(), json!(annotation_type));
        }
        if let Some(data) = request.data {
            update.insert("data".to_string(), data);
        }
        if let Some(status) = request.status {
            update.insert("status".to_string(), json!(status));
        }
        if let Some(notes) = request.notes {
            update.insert("notes".to_string(), json!(notes));
        }
        update.insert("version".to_string(), json!(current.version + 1));
        update.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = TableQuery::new("image_annotations").eq("id", annotation_id).path();
        let mut result: Vec<ImageAnnotation> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(StudyError::AnnotationNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn review_annotation(
        &self,
        annotation_id: i64,
        reviewer_id: i64,
        request: ReviewAnnotationRequest,
    ) -> Result<ImageAnnotation, StudyError> {
        let now = Utc::now().to_rfc3339();
        let mut update = Map::new();
        update.insert("status".to_string(), json!(request.status));
        update.insert("reviewed_by".to_string(), json!(reviewer_id));
        update.insert("reviewed_at".to_string(), json!(now));
        if let Some(notes) = request.notes {
            update.insert("notes".to_string(), json!(notes));
        }
        update.insert("updated_at".to_string(), json!(now));

        let path = TableQuery::new("image_annotations").eq("id", annotation_id).path();
        let mut result: Vec<ImageAnnotation> = self
            .store
            .mutate(Method::PATCH, &path, Some(Value::Object(update)))
            .await?;

        if result.is_empty() {
            return Err(StudyError::AnnotationNotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_annotation(&self, annotation_id: i64) -> Result<(), StudyError> {
        let path = TableQuery::new("image_annotations").eq("id", annotation_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(StudyError::AnnotationNotFound);
        }
        Ok(())
    }
}
