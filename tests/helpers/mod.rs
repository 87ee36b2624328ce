//! Test helpers
//!
//! A mock SymphonyX backend built on wiremock, plus factory setup
//! pointed at it. Each test starts its own server and mounts only the
//! endpoints it exercises.

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use symphonyx_client::config::{ApiConfig, CredentialsConfig, LoggingConfig, Settings};
use symphonyx_client::services::ServiceFactory;

pub const TEST_STUDENT_ID: &str = "223/146";
pub const TEST_SESSION_ID: i64 = 2511;
pub const TEST_ACADEMIC_SESSION_ID: i64 = 77;

/// Mock SymphonyX backend for integration tests
pub struct SymphonyXMockServer {
    pub server: MockServer,
}

impl SymphonyXMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Settings pointed at this mock server
    pub fn settings(&self) -> Settings {
        Settings {
            api: ApiConfig {
                base_url: self.server.uri(),
                timeout_seconds: 5,
                institute_id: 1,
                campus_id: 3,
                college_id: 3,
            },
            credentials: CredentialsConfig { store_path: None },
            logging: LoggingConfig {
                level: "debug".to_string(),
                file_path: None,
            },
        }
    }

    /// A service factory wired to this mock server
    pub fn factory(&self) -> ServiceFactory {
        ServiceFactory::new(self.settings()).unwrap()
    }

    /// Service bootstrap endpoint handing out a token via the
    /// Authorization response header
    pub async fn mock_bootstrap(&self, token: &str) {
        Mock::given(method("GET"))
            .and(path("/api/slmCore/getServiceUrls"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("authorization", token)
                    .set_body_json(json!({})),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mock_bootstrap_failure(&self) {
        Mock::given(method("GET"))
            .and(path("/api/slmCore/getServiceUrls"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    /// Successful login handing out the user token via header
    pub async fn mock_login_success(&self, token: &str) {
        Mock::given(method("POST"))
            .and(path("/login/verify/password"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("authorization", token)
                    .set_body_json(json!({ "flag": 1 })),
            )
            .mount(&self.server)
            .await;
    }

    /// Rejected login; the backend replies 200 with a rejection body
    pub async fn mock_login_rejected(&self, messages: &[&str]) {
        Mock::given(method("POST"))
            .and(path("/login/verify/password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": false,
                "message": messages,
            })))
            .mount(&self.server)
            .await;
    }

    /// Dashboard with the default test profile
    pub async fn mock_dashboard(&self) {
        self.mock_dashboard_with_user(Some(default_user())).await;
    }

    pub async fn mock_dashboard_with_user(&self, user: Option<Value>) {
        Mock::given(method("GET"))
            .and(path("/api/dashboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "userModel": user,
                    "academicSessionModels": [{
                        "sessionId": TEST_SESSION_ID,
                        "academicSessionId": TEST_ACADEMIC_SESSION_ID,
                        "year": "2024-25",
                    }],
                }
            })))
            .mount(&self.server)
            .await;
    }

    /// Enrolled class list
    pub async fn mock_class_list(&self, classes: Value) {
        Mock::given(method("GET"))
            .and(path("/api/classroom/linked"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": classes })))
            .mount(&self.server)
            .await;
    }

    /// Per-class attendance stats, matched on the classroom id
    pub async fn mock_attendance_stats(&self, class_id: i64, stats: Value) {
        Mock::given(method("GET"))
            .and(path("/api/attendance/studentclassroomStatsTillDate"))
            .and(query_param("classroomGeneratedIds", class_id.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": stats })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_attendance_failure(&self, class_id: i64) {
        Mock::given(method("GET"))
            .and(path("/api/attendance/studentclassroomStatsTillDate"))
            .and(query_param("classroomGeneratedIds", class_id.to_string()))
            .respond_with(ResponseTemplate::new(500))
            .mount(&self.server)
            .await;
    }

    /// Semester result, matched on the semester field of the request body
    pub async fn mock_semester_result(&self, semester: u32, result: Value) {
        Mock::given(method("POST"))
            .and(path("/api/slmResult/student/getStudentResult"))
            .and(body_partial_json(json!({ "semester": semester.to_string() })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": result })))
            .mount(&self.server)
            .await;
    }

    /// Upload-to-temp endpoint returning a temporary file name
    pub async fn mock_upload_to_temp(&self, temp_name: &str) {
        Mock::given(method("POST"))
            .and(path("/api/slmCore/uploadFileToTemp"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "tempImageName": temp_name },
            })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_apply_leave(&self, flag: i32) {
        Mock::given(method("POST"))
            .and(path("/api/slmStudent/applyLeaves"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "flag": flag })))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_admit_card(&self, flag: i32, download_url: Option<&str>) {
        Mock::given(method("POST"))
            .and(path("/api/slmExamSchedule/generateAdmitCard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "flag": flag,
                "data": download_url,
            })))
            .mount(&self.server)
            .await;
    }
}

/// The default test student profile
pub fn default_user() -> Value {
    json!({
        "userId": TEST_STUDENT_ID,
        "name": "Test Student",
        "collegeId": 3,
        "instituteId": 1,
        "currentStage": 3,
        "sessionId": TEST_SESSION_ID,
    })
}

/// An enrollment row for the class list endpoint
pub fn class(id: i64, course_id: &str, course_name: &str) -> Value {
    json!({
        "classroomGeneratedId": id,
        "courseId": course_id,
        "courseName": course_name,
        "academicSessionId": TEST_ACADEMIC_SESSION_ID,
        "classroomStudentLinkingModels": [{ "studentId": TEST_STUDENT_ID }],
    })
}

/// A stats row for the attendance endpoint
pub fn stats(class_id: i64, theory: (u32, u32), practical: (u32, u32)) -> Value {
    json!({
        "classroomGeneratedId": class_id,
        "attendedTheoryClassCount": theory.0,
        "theoryClassCount": theory.1,
        "attendedPracticalClassCount": practical.0,
        "practicalClassCount": practical.1,
    })
}

/// A semester result with one uniform-credit subject row per credit entry
pub fn semester_result(sgpa: f64, credits: &[f64]) -> Value {
    let rows: Vec<Value> = credits
        .iter()
        .enumerate()
        .map(|(i, credit)| {
            json!({
                "courseId": format!("CS10{}", i),
                "credit": credit,
                "grade": "A",
            })
        })
        .collect();
    json!({ "sgpa": sgpa, "studentResultList": rows })
}

/// Log in against a server that has login + dashboard mocks mounted
pub async fn login(factory: &ServiceFactory) {
    factory
        .session_service
        .login(TEST_STUDENT_ID, "secret", false)
        .await
        .unwrap();
}
