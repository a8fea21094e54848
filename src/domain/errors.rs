use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Invalid calendar date: {0}")]
    InvalidDate(String),
    #[error("Unknown day type: {0}")]
    UnknownDayType(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("No calendar entry at {0}")]
    DayNotFound(String),
    #[error("No event {event_id} on {date}")]
    EventNotFound { date: String, event_id: String },
    #[error("Calendar {0} not found")]
    CalendarNotFound(String),
    #[error("Durable store error: {0}")]
    Store(String),
    #[error("Move left {from} cleared in the store but the write to {to} failed: {reason}")]
    MoveInterrupted {
        from: String,
        to: String,
        reason: String,
    },
}

pub type CalendarResult<T> = Result<T, CalendarError>;
