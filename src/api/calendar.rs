use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::api::middleware::{ApiError, ApiResult, AppState};
use crate::domain::calendar_date::CalendarDate;
use crate::domain::entities::{
    CalendarDay, CalendarEvent, CalendarStats, DayEdit, DayType, WorkCalendar, WorkingTimeRules,
};

// ========================================
// Request/Response Types
// ========================================

#[derive(Debug, Deserialize)]
pub struct MoveDayRequest {
    pub to: String,
    #[serde(flatten)]
    pub edit: DayEdit,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWeekendDaysRequest {
    pub weekend_days: BTreeSet<u8>,
}

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
}

#[derive(Debug, Serialize)]
pub struct DayTypeResponse {
    pub date: CalendarDate,
    pub day_type: DayType,
}

// ========================================
// Handlers
// ========================================

pub async fn get_calendar(State(state): State<AppState>) -> Json<WorkCalendar> {
    Json(state.calendar_service.snapshot().await)
}

pub async fn get_stats(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> Json<CalendarStats> {
    Json(state.calendar_service.stats(year).await)
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<CalendarDay>> {
    let date = CalendarDate::parse(&date)?;
    match state.calendar_service.day_data(date).await {
        Some(day) => Ok(Json(day)),
        None => Err(ApiError::NotFound(format!("no calendar data at {}", date))),
    }
}

pub async fn get_day_type(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<Json<DayTypeResponse>> {
    let date = CalendarDate::parse(&date)?;
    let day_type = state.calendar_service.resolve(date).await;
    Ok(Json(DayTypeResponse { date, day_type }))
}

pub async fn upsert_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(edit): Json<DayEdit>,
) -> ApiResult<Json<CalendarDay>> {
    let date = CalendarDate::parse(&date)?;
    let day = state.calendar_service.save_day(date, edit).await?;
    Ok(Json(day))
}

pub async fn delete_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<StatusCode> {
    let date = CalendarDate::parse(&date)?;
    state.calendar_service.delete_day(date).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn move_day(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(request): Json<MoveDayRequest>,
) -> ApiResult<Json<CalendarDay>> {
    let from = CalendarDate::parse(&date)?;
    let to = CalendarDate::parse(&request.to)?;
    let day = state.calendar_service.move_day(from, to, request.edit).await?;
    Ok(Json(day))
}

pub async fn add_event(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(request): Json<CreateEventRequest>,
) -> ApiResult<Json<CalendarDay>> {
    let date = CalendarDate::parse(&date)?;
    let mut event = CalendarEvent::new(request.title, request.event_type);
    event.description = request.description;
    event.is_recurring = request.is_recurring;
    let day = state.calendar_service.add_event(date, event).await?;
    Ok(Json(day))
}

pub async fn remove_event(
    State(state): State<AppState>,
    Path((date, event_id)): Path<(String, String)>,
) -> ApiResult<Json<CalendarDay>> {
    let date = CalendarDate::parse(&date)?;
    let day = state.calendar_service.remove_event(date, &event_id).await?;
    Ok(Json(day))
}

pub async fn update_weekend_days(
    State(state): State<AppState>,
    Json(request): Json<UpdateWeekendDaysRequest>,
) -> ApiResult<StatusCode> {
    state
        .calendar_service
        .set_weekend_days(request.weekend_days)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_working_time_rules(
    State(state): State<AppState>,
    Json(rules): Json<WorkingTimeRules>,
) -> ApiResult<StatusCode> {
    state.calendar_service.set_working_time_rules(rules).await?;
    Ok(StatusCode::NO_CONTENT)
}
