//! Data models for the SymphonyX client

pub mod attendance;
pub mod exams;
pub mod feedback;
pub mod leave;
pub mod timetable;
pub mod user;

pub use attendance::{
    classes_needed, overall_percent, overall_practical_percent, overall_theory_percent,
    project_subject, AttendanceRecord, AttendanceStats, ClassEnrollment, SubjectProjection,
    TargetOutcome,
};
pub use exams::{weighted_cgpa, AdmitCard, SemesterResult, SubjectResult};
pub use feedback::{FeedbackCourse, FeedbackSet};
pub use leave::{LeaveApplication, LeaveDocument, LeaveRequest};
pub use timetable::LectureSlot;
pub use user::{AcademicSession, UserProfile};
