//! Attendance models and derived-metric calculations
//!
//! Wire-level attendance types plus the pure derivation logic used for
//! the attendance view: overall percentages and the "classes needed to
//! reach target" projection. All derivations are recomputed on every
//! read; nothing here caches.

use serde::{Deserialize, Serialize};

use crate::utils::round2;

/// A class the student is enrolled in, fetched once per session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassEnrollment {
    pub classroom_generated_id: i64,
    #[serde(default)]
    pub course_id: Option<String>,
    #[serde(default)]
    pub course_name: Option<String>,
    #[serde(default)]
    pub academic_session_id: Option<i64>,
    #[serde(default)]
    pub classroom_student_linking_models: Vec<StudentLink>,
}

/// Student linkage row inside a classroom record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentLink {
    #[serde(default)]
    pub student_id: Option<String>,
}

/// Raw per-class attendance counters from the stats-till-date endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub classroom_generated_id: i64,
    #[serde(default)]
    pub theory_class_count: f64,
    #[serde(default)]
    pub attended_theory_class_count: f64,
    #[serde(default)]
    pub practical_class_count: f64,
    #[serde(default)]
    pub attended_practical_class_count: f64,
}

/// Attendance counters joined with the owning enrollment's course info
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub classroom_generated_id: i64,
    pub course_id: String,
    pub course_name: String,
    pub theory_class_count: f64,
    pub attended_theory_class_count: f64,
    pub practical_class_count: f64,
    pub attended_practical_class_count: f64,
}

impl AttendanceRecord {
    /// Join raw stats with the matching enrollment's course info
    pub fn from_stats(stats: AttendanceStats, enrollment: Option<&ClassEnrollment>) -> Self {
        let course_name = enrollment
            .and_then(|e| e.course_name.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let course_id = enrollment
            .and_then(|e| e.course_id.clone())
            .unwrap_or_else(|| "N/A".to_string());

        Self {
            classroom_generated_id: stats.classroom_generated_id,
            course_id,
            course_name,
            theory_class_count: stats.theory_class_count,
            attended_theory_class_count: stats.attended_theory_class_count,
            practical_class_count: stats.practical_class_count,
            attended_practical_class_count: stats.attended_practical_class_count,
        }
    }

    /// Records with no theory classes held or attended carry no signal
    pub fn is_noise(&self) -> bool {
        self.theory_class_count == 0.0 && self.attended_theory_class_count == 0.0
    }

    pub fn theory_percent(&self) -> f64 {
        round2(percent(self.attended_theory_class_count, self.theory_class_count))
    }

    pub fn practical_percent(&self) -> f64 {
        round2(percent(
            self.attended_practical_class_count,
            self.practical_class_count,
        ))
    }

    /// Combined theory + practical percentage
    pub fn total_percent(&self) -> f64 {
        round2(percent(
            self.attended_theory_class_count + self.attended_practical_class_count,
            self.theory_class_count + self.practical_class_count,
        ))
    }
}

fn percent(attended: f64, held: f64) -> f64 {
    if held <= 0.0 {
        0.0
    } else {
        attended / held * 100.0
    }
}

/// Overall attendance percentage, weighted over every class held
///
/// This is the weighted combination of theory and practical counts, not
/// the unweighted mean of per-subject percentages.
pub fn overall_percent(records: &[AttendanceRecord]) -> f64 {
    let attended: f64 = records
        .iter()
        .map(|r| r.attended_theory_class_count + r.attended_practical_class_count)
        .sum();
    let held: f64 = records
        .iter()
        .map(|r| r.theory_class_count + r.practical_class_count)
        .sum();
    round2(percent(attended, held))
}

/// Overall theory attendance percentage across all subjects
pub fn overall_theory_percent(records: &[AttendanceRecord]) -> f64 {
    let attended: f64 = records.iter().map(|r| r.attended_theory_class_count).sum();
    let held: f64 = records.iter().map(|r| r.theory_class_count).sum();
    round2(percent(attended, held))
}

/// Overall practical attendance percentage
///
/// Subjects without a practical component contribute to neither the
/// numerator nor the denominator.
pub fn overall_practical_percent(records: &[AttendanceRecord]) -> f64 {
    let with_practical: Vec<&AttendanceRecord> = records
        .iter()
        .filter(|r| r.practical_class_count > 0.0)
        .collect();
    let attended: f64 = with_practical
        .iter()
        .map(|r| r.attended_practical_class_count)
        .sum();
    let held: f64 = with_practical.iter().map(|r| r.practical_class_count).sum();
    round2(percent(attended, held))
}

/// Outcome of a "reach target attendance" projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetOutcome {
    /// Already at or above the target
    Met,
    /// Number of consecutive classes to attend to reach the target
    Needed(u32),
    /// Target cannot be reached by attending more classes (target of 100%
    /// with classes already missed)
    Unreachable,
}

/// Additional consecutive classes needed so (attended + n) / (held + n)
/// reaches the target percentage
pub fn classes_needed(attended: f64, held: f64, target_percent: f64) -> TargetOutcome {
    if held <= 0.0 || percent(attended, held) >= target_percent {
        return TargetOutcome::Met;
    }
    let fraction = target_percent / 100.0;
    if fraction >= 1.0 {
        return TargetOutcome::Unreachable;
    }
    let needed = ((fraction * held - attended) / (1.0 - fraction)).ceil();
    TargetOutcome::Needed(needed.max(0.0) as u32)
}

/// Per-subject projection towards a target percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectProjection {
    pub theory: TargetOutcome,
    /// Absent for subjects with no practical component
    pub practical: Option<TargetOutcome>,
    pub total: TargetOutcome,
}

/// Project theory, practical and total requirements for one subject
///
/// The total projection is gated on the combined percentage but counts
/// additional classes against the theory counters, matching the behavior
/// students already rely on in the portal.
pub fn project_subject(record: &AttendanceRecord, target_percent: f64) -> SubjectProjection {
    let theory = classes_needed(
        record.attended_theory_class_count,
        record.theory_class_count,
        target_percent,
    );

    let practical = if record.practical_class_count > 0.0 {
        Some(classes_needed(
            record.attended_practical_class_count,
            record.practical_class_count,
            target_percent,
        ))
    } else {
        None
    };

    let total_attended =
        record.attended_theory_class_count + record.attended_practical_class_count;
    let total_held = record.theory_class_count + record.practical_class_count;
    let total = if total_held <= 0.0 || percent(total_attended, total_held) >= target_percent {
        TargetOutcome::Met
    } else {
        classes_needed(
            record.attended_theory_class_count,
            record.theory_class_count,
            target_percent,
        )
    };

    SubjectProjection {
        theory,
        practical,
        total,
    }
}
