//! SymphonyX student client
//!
//! Demo entry point: logs in with credentials from the environment and
//! prints an attendance and result summary.

use anyhow::bail;
use tracing::{info, warn};

use symphonyx_client::models::TargetOutcome;
use symphonyx_client::{config::Settings, services::ServiceFactory, utils::logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().unwrap_or_default();
    settings.validate()?;

    // Initialize logging
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}", symphonyx_client::info());

    let services = ServiceFactory::new(settings)?;

    // Acquire the anonymous service token first; login supersedes it.
    services.session_service.bootstrap().await;

    let profile = match services.session_service.auto_login().await? {
        Some(profile) => profile,
        None => {
            let login_id = std::env::var("SYMPHONYX_LOGIN_ID")?;
            let password = std::env::var("SYMPHONYX_PASSWORD")?;
            match services
                .session_service
                .login(&login_id, &password, false)
                .await?
            {
                Some(profile) => profile,
                None => bail!("login did not produce a profile"),
            }
        }
    };
    println!("Logged in as {}", profile.name.as_deref().unwrap_or("?"));

    // Attendance summary with a 75% target projection
    let records = services.attendance_service.load_all_attendance().await?;
    let overall = services.attendance_service.overall_percent().await;
    println!(
        "Overall attendance: {overall:.2}% across {} subjects",
        records.len()
    );
    for (record, projection) in services.attendance_service.projections(75.0).await {
        if let TargetOutcome::Needed(classes) = projection.total {
            println!(
                "  {}: attend {} more classes to reach 75%",
                record.course_name, classes
            );
        }
    }

    // CGPA across completed semesters
    match services.exam_service.compute_cgpa().await {
        Ok(cgpa) => println!("CGPA: {cgpa:.2}"),
        Err(e) => warn!(error = %e, "CGPA computation failed"),
    }

    Ok(())
}
