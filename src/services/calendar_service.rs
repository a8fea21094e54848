use crate::domain::calendar_date::CalendarDate;
use crate::domain::entities::{
    CalendarDay, CalendarEvent, CalendarStats, DayEdit, DayType, WorkCalendar, WorkingTimeRules,
};
use crate::domain::errors::{CalendarError, CalendarResult};
use crate::domain::ports::CalendarStore;
use crate::services::day_resolver::CalendarView;
use crate::services::statistics_service::compute_stats;
use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Mutation coordinator for the work calendar.
///
/// Owns the one mutable in-memory snapshot and reconciles every edit with
/// the durable store: the edit is applied optimistically first (visible to
/// readers immediately), then the durable write is awaited, and on failure
/// the edit is compensated so the visible state is bit-for-bit its
/// pre-attempt value. There is no per-date queue or lock; overlapping
/// mutations on the same date race, last write wins.
pub struct CalendarService {
    calendar_id: String,
    store: Arc<dyn CalendarStore>,
    snapshot: Arc<RwLock<WorkCalendar>>,
}

impl CalendarService {
    pub fn new(
        calendar_id: impl Into<String>,
        store: Arc<dyn CalendarStore>,
        calendar: WorkCalendar,
    ) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            store,
            snapshot: Arc::new(RwLock::new(calendar)),
        }
    }

    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    /// Clone of the current in-memory calendar. Readers run resolution and
    /// aggregation against this immutable copy.
    pub async fn snapshot(&self) -> WorkCalendar {
        self.snapshot.read().await.clone()
    }

    pub async fn resolve(&self, date: CalendarDate) -> DayType {
        let calendar = self.snapshot().await;
        CalendarView::new(&calendar).day_type(date)
    }

    pub async fn day_data(&self, date: CalendarDate) -> Option<CalendarDay> {
        let calendar = self.snapshot().await;
        CalendarView::new(&calendar).day_data(date)
    }

    pub async fn stats(&self, year: i32) -> CalendarStats {
        let calendar = self.snapshot().await;
        compute_stats(Some(&calendar), year).unwrap_or_else(|| CalendarStats::empty(year))
    }

    /// Create or replace the entry at `date` from a partial edit.
    ///
    /// Rollback on durable failure is an unconditional removal of the key:
    /// save is create-or-replace, there is no prior value to restore to.
    pub async fn save_day(&self, date: CalendarDate, edit: DayEdit) -> CalendarResult<CalendarDay> {
        validate_hours(edit.working_hours)?;
        let day = edit.into_day(date);
        let key = date.to_string();

        let store = Arc::clone(&self.store);
        let calendar_id = self.calendar_id.clone();
        let persisted = day.clone();
        let forward_key = key.clone();
        let forward_day = day.clone();

        self.apply_optimistic(
            "save_day",
            move |calendar| {
                calendar.days.insert(forward_key, forward_day);
            },
            move || async move { store.upsert_day(&calendar_id, &date, &persisted).await },
            move |calendar, ()| {
                calendar.days.remove(&key);
            },
        )
        .await?;
        Ok(day)
    }

    /// Remove the entry at `date`. Defined only for present entries.
    pub async fn delete_day(&self, date: CalendarDate) -> CalendarResult<()> {
        let key = date.to_string();
        {
            let calendar = self.snapshot.read().await;
            if !calendar.days.contains_key(&key) {
                return Err(CalendarError::DayNotFound(key));
            }
        }

        let store = Arc::clone(&self.store);
        let calendar_id = self.calendar_id.clone();
        let forward_key = key.clone();
        let restore_key = key;

        self.apply_optimistic(
            "delete_day",
            move |calendar| calendar.days.remove(&forward_key),
            move || async move { store.delete_day(&calendar_id, &date).await },
            move |calendar, prior| {
                if let Some(day) = prior {
                    calendar.days.insert(restore_key, day);
                }
            },
        )
        .await
    }

    /// Move the entry at `from` to `to`, replacing it with the canonical
    /// day built from `edit` (tagged with `date = to`).
    ///
    /// The durable side is two writes, delete-then-upsert, which are not
    /// atomic: when the delete has landed and the upsert fails, the
    /// in-memory state is still rolled back in full but the error is the
    /// distinguishable [`CalendarError::MoveInterrupted`], because the
    /// store is left missing `from` without yet having `to`.
    pub async fn move_day(
        &self,
        from: CalendarDate,
        to: CalendarDate,
        edit: DayEdit,
    ) -> CalendarResult<CalendarDay> {
        validate_hours(edit.working_hours)?;
        let from_key = from.to_string();
        let to_key = to.to_string();
        {
            let calendar = self.snapshot.read().await;
            if !calendar.days.contains_key(&from_key) {
                return Err(CalendarError::DayNotFound(from_key));
            }
        }
        let day = edit.into_day(to);

        let store = Arc::clone(&self.store);
        let calendar_id = self.calendar_id.clone();
        let persisted = day.clone();
        let forward_from = from_key.clone();
        let forward_to = to_key.clone();
        let forward_day = day.clone();
        let restore_from = from_key;
        let restore_to = to_key;

        self.apply_optimistic(
            "move_day",
            move |calendar| {
                let prior_from = calendar.days.remove(&forward_from);
                let prior_to = calendar.days.insert(forward_to, forward_day);
                (prior_from, prior_to)
            },
            move || async move {
                store.delete_day(&calendar_id, &from).await?;
                store
                    .upsert_day(&calendar_id, &to, &persisted)
                    .await
                    .map_err(|err| CalendarError::MoveInterrupted {
                        from: from.to_string(),
                        to: to.to_string(),
                        reason: err.to_string(),
                    })
            },
            move |calendar, (prior_from, prior_to)| {
                calendar.days.remove(&restore_to);
                if let Some(day) = prior_to {
                    calendar.days.insert(restore_to, day);
                }
                if let Some(day) = prior_from {
                    calendar.days.insert(restore_from, day);
                }
            },
        )
        .await?;
        Ok(day)
    }

    /// Replace the weekend pattern. Entries must be weekday numbers in
    /// `0..=6` (0 = Sunday).
    pub async fn set_weekend_days(&self, weekend_days: BTreeSet<u8>) -> CalendarResult<()> {
        if let Some(day) = weekend_days.iter().find(|day| **day > 6) {
            return Err(CalendarError::Validation(format!(
                "weekend day {} outside 0..=6",
                day
            )));
        }
        let rules = self.snapshot.read().await.working_time_rules.clone();

        let store = Arc::clone(&self.store);
        let calendar_id = self.calendar_id.clone();
        let persisted_days = weekend_days.clone();

        self.apply_optimistic(
            "set_weekend_days",
            move |calendar| std::mem::replace(&mut calendar.weekend_days, weekend_days),
            move || async move {
                store
                    .update_settings(&calendar_id, &persisted_days, &rules)
                    .await
            },
            move |calendar, prior| calendar.weekend_days = prior,
        )
        .await
    }

    pub async fn set_working_time_rules(&self, rules: WorkingTimeRules) -> CalendarResult<()> {
        for (field, value) in [
            (
                "standard_working_hours_per_day",
                rules.standard_working_hours_per_day,
            ),
            ("working_hours_per_week", rules.working_hours_per_week),
            ("half_day_hours", rules.half_day_hours),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CalendarError::Validation(format!(
                    "{} must be a non-negative number",
                    field
                )));
            }
        }
        let weekend_days = self.snapshot.read().await.weekend_days.clone();

        let store = Arc::clone(&self.store);
        let calendar_id = self.calendar_id.clone();
        let persisted_rules = rules.clone();

        self.apply_optimistic(
            "set_working_time_rules",
            move |calendar| std::mem::replace(&mut calendar.working_time_rules, rules),
            move || async move {
                store
                    .update_settings(&calendar_id, &weekend_days, &persisted_rules)
                    .await
            },
            move |calendar, prior| calendar.working_time_rules = prior,
        )
        .await
    }

    /// Attach an informational event to `date`.
    ///
    /// When no entry exists, a carrier entry is synthesized with the
    /// date's currently resolved type, so attaching an event never
    /// reclassifies the day.
    pub async fn add_event(
        &self,
        date: CalendarDate,
        event: CalendarEvent,
    ) -> CalendarResult<CalendarDay> {
        let updated = {
            let calendar = self.snapshot.read().await;
            let mut day = match calendar.day(&date) {
                Some(day) => day.clone(),
                None => CalendarDay::new(date, CalendarView::new(&calendar).day_type(date)),
            };
            day.events.push(event);
            day
        };
        self.persist_day_replacement("add_event", date, updated.clone())
            .await?;
        Ok(updated)
    }

    /// Remove one event by id from the entry at `date`.
    pub async fn remove_event(
        &self,
        date: CalendarDate,
        event_id: &str,
    ) -> CalendarResult<CalendarDay> {
        let key = date.to_string();
        let updated = {
            let calendar = self.snapshot.read().await;
            let day = calendar
                .day(&date)
                .ok_or_else(|| CalendarError::DayNotFound(key.clone()))?;
            let mut day = day.clone();
            let before = day.events.len();
            day.events.retain(|event| event.id != event_id);
            if day.events.len() == before {
                return Err(CalendarError::EventNotFound {
                    date: key,
                    event_id: event_id.to_string(),
                });
            }
            day
        };
        self.persist_day_replacement("remove_event", date, updated.clone())
            .await?;
        Ok(updated)
    }

    /// Replace the entry at `date` with `day`, restoring the exact prior
    /// state (present or absent) on durable failure.
    async fn persist_day_replacement(
        &self,
        op: &'static str,
        date: CalendarDate,
        day: CalendarDay,
    ) -> CalendarResult<()> {
        let key = date.to_string();
        let store = Arc::clone(&self.store);
        let calendar_id = self.calendar_id.clone();
        let persisted = day.clone();
        let forward_key = key.clone();

        self.apply_optimistic(
            op,
            move |calendar| calendar.days.insert(forward_key, day),
            move || async move { store.upsert_day(&calendar_id, &date, &persisted).await },
            move |calendar, prior| match prior {
                Some(previous) => {
                    calendar.days.insert(key, previous);
                }
                None => {
                    calendar.days.remove(&key);
                }
            },
        )
        .await
    }

    /// The one optimistic-apply-then-reconcile protocol all mutations run
    /// through. `forward` mutates the snapshot and returns the undo token;
    /// `compensate` must exactly undo `forward` given that token. The
    /// write lock is not held across the durable await, so the optimistic
    /// state is visible to readers during the suspended window.
    async fn apply_optimistic<U, F, D, Fut, C>(
        &self,
        op: &'static str,
        forward: F,
        durable: D,
        compensate: C,
    ) -> CalendarResult<()>
    where
        F: FnOnce(&mut WorkCalendar) -> U,
        D: FnOnce() -> Fut,
        Fut: Future<Output = CalendarResult<()>>,
        C: FnOnce(&mut WorkCalendar, U),
    {
        let undo = {
            let mut calendar = self.snapshot.write().await;
            forward(&mut calendar)
        };
        match durable().await {
            Ok(()) => Ok(()),
            Err(err) => {
                let mut calendar = self.snapshot.write().await;
                compensate(&mut calendar, undo);
                tracing::warn!(
                    operation = op,
                    error = %err,
                    "durable write failed, optimistic edit rolled back"
                );
                Err(err)
            }
        }
    }
}

fn validate_hours(hours: Option<f64>) -> CalendarResult<()> {
    match hours {
        Some(value) if !value.is_finite() || value < 0.0 => Err(CalendarError::Validation(
            format!("working_hours must be a non-negative number, got {}", value),
        )),
        _ => Ok(()),
    }
}
