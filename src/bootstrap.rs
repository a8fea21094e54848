use crate::api::middleware::AppState;
use crate::config::Config;
use crate::domain::entities::WorkCalendar;
use crate::domain::ports::CalendarStore;
use crate::infrastructure::persistence::Database;
use crate::services::calendar_service::CalendarService;
use std::sync::Arc;

/// One-time calendar load. The durable store is read only here; afterwards
/// all reads go through the coordinator's in-memory snapshot.
pub async fn initialize_calendar(
    db: &Database,
    config: &Config,
) -> anyhow::Result<Arc<CalendarService>> {
    let store: Arc<dyn CalendarStore> = Arc::new(db.clone());

    let calendar = match store.read_calendar(&config.calendar_id).await? {
        Some(calendar) => {
            tracing::info!(
                calendar_id = %config.calendar_id,
                days = calendar.days.len(),
                "Work calendar loaded"
            );
            calendar
        }
        None => {
            let calendar = WorkCalendar::default();
            store.create_calendar(&config.calendar_id, &calendar).await?;
            tracing::info!(
                calendar_id = %config.calendar_id,
                "Created default work calendar (weekend: Saturday/Sunday, 8h days)"
            );
            calendar
        }
    };

    Ok(Arc::new(CalendarService::new(
        config.calendar_id.clone(),
        store,
        calendar,
    )))
}

pub async fn build_app_state(db: Database, config: &Config) -> anyhow::Result<AppState> {
    let calendar_service = initialize_calendar(&db, config).await?;
    tracing::info!("Calendar service initialized");

    Ok(AppState { calendar_service })
}
