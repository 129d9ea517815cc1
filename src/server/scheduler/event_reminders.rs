use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::event::EventService};

/// Every 15 minutes, at second 0.
const REMINDER_SCHEDULE: &str = "0 */15 * * * *";

/// Starts the event reminder scheduler.
///
/// Every 15 minutes, participants of events starting within the next 24 hours receive
/// one reminder notification per event.
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it alive for the jobs to fire
/// - `Err(AppError::SchedulerErr)` - Failed to create or start the scheduler
pub async fn start_scheduler(db: DatabaseConnection) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(REMINDER_SCHEDULE, move |_uuid, _lock| {
        let db = db.clone();

        Box::pin(async move {
            match EventService::new(&db).send_due_reminders(Utc::now()).await {
                Ok(0) => {}
                Ok(count) => tracing::info!("Sent reminders for {} events", count),
                Err(e) => tracing::error!("Error sending event reminders: {}", e),
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Event reminder scheduler started");

    Ok(scheduler)
}
