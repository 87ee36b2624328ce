//! Attendance aggregation service
//!
//! Fans out one stats request per enrolled class, merges whatever subset
//! succeeds, deduplicates and filters the result into the attendance
//! working set, and exposes the derived percentages and target
//! projections computed over it.

use std::collections::{HashMap, HashSet};

use futures::future::join_all;
use tracing::{debug, warn};

use crate::http::{ApiClient, ApiEnvelope};
use crate::models::{
    self, AttendanceRecord, AttendanceStats, ClassEnrollment, SubjectProjection,
};
use crate::state::SessionStore;
use crate::utils::errors::{ClientError, Result};
use crate::utils::logging::log_fetch;

/// Attendance aggregation service
#[derive(Clone)]
pub struct AttendanceService {
    api: ApiClient,
    store: SessionStore,
}

impl AttendanceService {
    /// Create a new AttendanceService instance
    pub fn new(api: ApiClient, store: SessionStore) -> Self {
        Self { api, store }
    }

    /// Fetch the student's enrolled classes and store them
    pub async fn load_class_list(&self) -> Result<Vec<ClassEnrollment>> {
        let envelope: ApiEnvelope<Vec<ClassEnrollment>> =
            self.api.get_json("/api/classroom/linked").await?;
        let classes = envelope.data.unwrap_or_default();
        log_fetch("/api/classroom/linked", classes.len(), 0);
        self.store.set_classes(classes.clone()).await;
        Ok(classes)
    }

    /// Load the attendance working set across all enrolled classes
    ///
    /// One stats request is issued per class, concurrently; a failing
    /// request only loses that class's data. Classes are processed in
    /// ascending classroom id order, which makes the first-wins
    /// deduplication deterministic. The resulting set replaces the
    /// stored one unless a reset superseded this load while it was in
    /// flight.
    pub async fn load_all_attendance(&self) -> Result<Vec<AttendanceRecord>> {
        let mut classes = self.store.classes().await;
        if classes.is_empty() {
            classes = self.load_class_list().await?;
        }
        if classes.is_empty() {
            return Err(ClientError::InvalidInput(
                "no enrolled classes found".to_string(),
            ));
        }

        let student_id = self.resolve_student_id(&classes).await?;
        let academic_session_id = classes[0].academic_session_id.ok_or_else(|| {
            ClientError::InvalidInput("missing academic session id".to_string())
        })?;

        let generation = self.store.generation();
        classes.sort_by_key(|c| c.classroom_generated_id);

        let requests = classes.iter().map(|class| {
            let api = self.api.clone();
            let path = format!(
                "/api/attendance/studentclassroomStatsTillDate?studentIds={}&academicSessionId={}&classroomGeneratedIds={}",
                urlencoding::encode(&student_id),
                academic_session_id,
                class.classroom_generated_id,
            );
            let class_id = class.classroom_generated_id;
            async move {
                let outcome: Result<ApiEnvelope<Vec<AttendanceStats>>> =
                    api.get_json(&path).await;
                (class_id, outcome)
            }
        });

        let outcomes = join_all(requests).await;

        let by_id: HashMap<i64, &ClassEnrollment> = classes
            .iter()
            .map(|c| (c.classroom_generated_id, c))
            .collect();

        let mut failed = 0usize;
        let mut merged = Vec::new();
        for (class_id, outcome) in outcomes {
            match outcome {
                Ok(envelope) => {
                    for stats in envelope.data.unwrap_or_default() {
                        let enrollment = by_id.get(&stats.classroom_generated_id).copied();
                        merged.push(AttendanceRecord::from_stats(stats, enrollment));
                    }
                }
                Err(e) => {
                    failed += 1;
                    warn!(class_id = class_id, error = %e, "Attendance stats request failed");
                }
            }
        }

        let records = filter_noise(dedup_records(merged));
        log_fetch("/api/attendance/studentclassroomStatsTillDate", records.len(), failed);

        if !self.store.commit_attendance(generation, records.clone()).await {
            debug!("Attendance load superseded by a newer reset");
        }

        Ok(records)
    }

    async fn resolve_student_id(&self, classes: &[ClassEnrollment]) -> Result<String> {
        if let Some(user) = self.store.user().await {
            return Ok(user.user_id);
        }
        classes
            .first()
            .and_then(|c| c.classroom_student_linking_models.first())
            .and_then(|link| link.student_id.clone())
            .ok_or_else(|| ClientError::InvalidInput("missing student id".to_string()))
    }

    /// Overall attendance percentage over the current working set
    pub async fn overall_percent(&self) -> f64 {
        models::overall_percent(&self.store.attendance().await)
    }

    /// Overall theory percentage over the current working set
    pub async fn overall_theory_percent(&self) -> f64 {
        models::overall_theory_percent(&self.store.attendance().await)
    }

    /// Overall practical percentage over the current working set
    pub async fn overall_practical_percent(&self) -> f64 {
        models::overall_practical_percent(&self.store.attendance().await)
    }

    /// Per-subject projections towards the given target percentage
    pub async fn projections(&self, target_percent: f64) -> Vec<(AttendanceRecord, SubjectProjection)> {
        self.store
            .attendance()
            .await
            .into_iter()
            .map(|record| {
                let projection = models::project_subject(&record, target_percent);
                (record, projection)
            })
            .collect()
    }

    /// Drop the working set and invalidate in-flight loads
    pub async fn clear(&self) {
        self.store.clear_attendance().await;
    }
}

/// Drop records whose classroom id or course id was already seen; the
/// first occurrence wins
pub fn dedup_records(records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
    let mut seen_ids: HashSet<i64> = HashSet::new();
    let mut seen_courses: HashSet<String> = HashSet::new();

    records
        .into_iter()
        .filter(|record| {
            if seen_ids.contains(&record.classroom_generated_id)
                || seen_courses.contains(&record.course_id)
            {
                return false;
            }
            seen_ids.insert(record.classroom_generated_id);
            seen_courses.insert(record.course_id.clone());
            true
        })
        .collect()
}

/// Drop 0/0-theory noise records
pub fn filter_noise(records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
    records.into_iter().filter(|r| !r.is_noise()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, course: &str, theory: (f64, f64)) -> AttendanceRecord {
        AttendanceRecord {
            classroom_generated_id: id,
            course_id: course.to_string(),
            course_name: format!("Course {}", course),
            attended_theory_class_count: theory.0,
            theory_class_count: theory.1,
            attended_practical_class_count: 0.0,
            practical_class_count: 0.0,
        }
    }

    #[test]
    fn test_dedup_by_classroom_id() {
        let records = vec![
            record(1, "CS101", (9.0, 10.0)),
            record(1, "CS102", (5.0, 10.0)),
        ];
        let deduped = dedup_records(records);
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].course_id, "CS101");
    }

    #[test]
    fn test_dedup_by_course_id_first_wins() {
        let records = vec![
            record(1, "CS101", (9.0, 10.0)),
            record(2, "CS101", (5.0, 10.0)),
            record(3, "CS102", (7.0, 10.0)),
        ];
        let deduped = dedup_records(records);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].classroom_generated_id, 1);
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let records = vec![
            record(1, "CS101", (9.0, 10.0)),
            record(1, "CS101", (9.0, 10.0)),
            record(2, "CS102", (7.0, 10.0)),
        ];
        let once = dedup_records(records);
        let twice = dedup_records(once.clone());
        assert_eq!(once.len(), twice.len());
        assert_eq!(
            once.iter().map(|r| r.classroom_generated_id).collect::<Vec<_>>(),
            twice.iter().map(|r| r.classroom_generated_id).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn test_noise_filter_drops_empty_theory() {
        let records = vec![
            record(1, "CS101", (0.0, 0.0)),
            record(2, "CS102", (7.0, 10.0)),
        ];
        let filtered = filter_noise(records);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].classroom_generated_id, 2);
    }
}
