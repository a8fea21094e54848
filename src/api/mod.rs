pub mod calendar;
pub mod middleware;

pub use middleware::*;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/calendar", get(calendar::get_calendar))
        .route(
            "/api/calendar/weekend-days",
            put(calendar::update_weekend_days),
        )
        .route(
            "/api/calendar/working-time-rules",
            put(calendar::update_working_time_rules),
        )
        .route("/api/calendar/stats/:year", get(calendar::get_stats))
        .route(
            "/api/calendar/days/:date",
            get(calendar::get_day)
                .put(calendar::upsert_day)
                .delete(calendar::delete_day),
        )
        .route("/api/calendar/days/:date/type", get(calendar::get_day_type))
        .route("/api/calendar/days/:date/move", post(calendar::move_day))
        .route("/api/calendar/days/:date/events", post(calendar::add_event))
        .route(
            "/api/calendar/days/:date/events/:event_id",
            delete(calendar::remove_event),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Hrdesk HR Administration API"
}

async fn health_handler() -> &'static str {
    "OK"
}
