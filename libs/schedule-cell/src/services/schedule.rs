use chrono::{NaiveDate, NaiveTime, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_database::{AppState, PostgrestClient, TableQuery};
use shared_utils::pagination::page_bounds;

use crate::models::{Schedule, ScheduleError, ScheduleQuery, ScheduleRequest};
use crate::services::conflict::{has_conflict, BookedSlot};

pub struct ScheduleService {
    store: PostgrestClient,
}

impl ScheduleService {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Loads every booking for the staff member on the given day and runs
    /// the overlap check in memory. Read-then-decide: there is no locking
    /// between this check and the subsequent insert, matching the store's
    /// single-request consistency model.
    pub async fn check_conflict(
        &self,
        staff_id: i64,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude_id: Option<i64>,
    ) -> Result<bool, ScheduleError> {
        let path = TableQuery::new("schedules")
            .eq("staff_id", staff_id)
            .eq("date", date)
            .path();
        let rows: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;

        let slots: Vec<BookedSlot> = rows
            .iter()
            .map(|s| BookedSlot {
                id: s.id,
                start_time: s.start_time,
                end_time: s.end_time,
            })
            .collect();

        Ok(has_conflict(&slots, start_time, end_time, exclude_id))
    }

    fn validate_range(request: &ScheduleRequest) -> Result<(), ScheduleError> {
        if request.start_time >= request.end_time {
            return Err(ScheduleError::InvalidTimeRange);
        }
        Ok(())
    }

    fn to_row(request: &ScheduleRequest) -> Value {
        json!({
            "staff_id": request.staff_id,
            "department_id": request.department_id,
            "date": request.date.format("%Y-%m-%d").to_string(),
            "start_time": request.start_time.format("%H:%M:%S").to_string(),
            "end_time": request.end_time.format("%H:%M:%S").to_string(),
            "shift_type": request.shift_type,
            "status": request.status.as_deref().unwrap_or("scheduled"),
            "notes": request.notes,
            "updated_at": Utc::now().to_rfc3339(),
        })
    }

    pub async fn create_schedule(&self, request: ScheduleRequest) -> Result<Schedule, ScheduleError> {
        Self::validate_range(&request)?;

        let conflict = self
            .check_conflict(
                request.staff_id,
                request.date,
                request.start_time,
                request.end_time,
                None,
            )
            .await?;
        if conflict {
            return Err(ScheduleError::ConflictDetected);
        }

        debug!("Creating schedule for staff {} on {}", request.staff_id, request.date);

        let mut row = Self::to_row(&request);
        row["created_at"] = json!(Utc::now().to_rfc3339());

        let mut result: Vec<Schedule> = self
            .store
            .mutate(Method::POST, &TableQuery::new("schedules").path(), Some(row))
            .await?;

        if result.is_empty() {
            return Err(ScheduleError::Database("Failed to create schedule".to_string()));
        }
        Ok(result.remove(0))
    }

    pub async fn get_schedule(&self, schedule_id: i64) -> Result<Schedule, ScheduleError> {
        let path = TableQuery::new("schedules").eq("id", schedule_id).path();
        let mut rows: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;

        if rows.is_empty() {
            return Err(ScheduleError::NotFound);
        }
        Ok(rows.remove(0))
    }

    pub async fn list_schedules(&self, query: ScheduleQuery) -> Result<Vec<Schedule>, ScheduleError> {
        let mut q = TableQuery::new("schedules");

        if let Some(staff_id) = query.staff_id {
            q = q.eq("staff_id", staff_id);
        }
        if let Some(department_id) = query.department_id {
            q = q.eq("department_id", department_id);
        }
        if let Some(status) = query.status {
            q = q.eq("status", status);
        }
        if let Some(start_date) = query.start_date {
            q = q.gte("date", start_date);
        }
        if let Some(end_date) = query.end_date {
            q = q.lte("date", end_date);
        }

        let (limit, offset) = page_bounds(query.limit, query.offset);
        let path = q.order("date.asc,start_time.asc").paginate(limit, offset).path();

        let rows: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn update_schedule(
        &self,
        schedule_id: i64,
        request: ScheduleRequest,
    ) -> Result<Schedule, ScheduleError> {
        Self::validate_range(&request)?;

        // The schedule being updated is excluded so a no-op reschedule
        // never collides with itself.
        let conflict = self
            .check_conflict(
                request.staff_id,
                request.date,
                request.start_time,
                request.end_time,
                Some(schedule_id),
            )
            .await?;
        if conflict {
            return Err(ScheduleError::ConflictDetected);
        }

        let path = TableQuery::new("schedules").eq("id", schedule_id).path();
        let mut result: Vec<Schedule> = self
            .store
            .mutate(Method::PATCH, &path, Some(Self::to_row(&request)))
            .await?;

        if result.is_empty() {
            return Err(ScheduleError::NotFound);
        }
        Ok(result.remove(0))
    }

    pub async fn delete_schedule(&self, schedule_id: i64) -> Result<(), ScheduleError> {
        let path = TableQuery::new("schedules").eq("id", schedule_id).path();
        let deleted: Vec<Value> = self.store.mutate(Method::DELETE, &path, None).await?;

        if deleted.is_empty() {
            return Err(ScheduleError::NotFound);
        }
        Ok(())
    }

    pub async fn get_staff_schedules(&self, staff_id: i64) -> Result<Vec<Schedule>, ScheduleError> {
        let path = TableQuery::new("schedules")
            .eq("staff_id", staff_id)
            .order("date.asc,start_time.asc")
            .path();
        let rows: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_department_schedules(
        &self,
        department_id: i64,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        let path = TableQuery::new("schedules")
            .eq("department_id", department_id)
            .order("date.asc,start_time.asc")
            .path();
        let rows: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_schedules_by_date_range(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<Schedule>, ScheduleError> {
        let path = TableQuery::new("schedules")
            .gte("date", start_date)
            .lte("date", end_date)
            .order("date.asc,start_time.asc")
            .path();
        let rows: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    pub async fn get_schedules_by_status(&self, status: &str) -> Result<Vec<Schedule>, ScheduleError> {
        let path = TableQuery::new("schedules")
            .eq("status", status)
            .order("date.asc,start_time.asc")
            .path();
        let rows: Vec<Schedule> = self.store.request(Method::GET, &path, None).await?;
        Ok(rows)
    }
}
