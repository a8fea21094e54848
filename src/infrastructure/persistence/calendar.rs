use crate::domain::calendar_date::CalendarDate;
use crate::domain::entities::{CalendarDay, WorkCalendar, WorkingTimeRules};
use crate::domain::errors::{CalendarError, CalendarResult};
use crate::domain::ports::CalendarStore;
use crate::infrastructure::persistence::Database;
use sqlx::Row;
use std::collections::{BTreeMap, BTreeSet};

const UPSERT_DAY_SQL: &str = "INSERT INTO work_calendar_days (calendar_id, date, data, updated_at)
     VALUES (?, ?, ?, ?)
     ON CONFLICT(calendar_id, date)
     DO UPDATE SET data = excluded.data, updated_at = excluded.updated_at";

fn store_error(err: sqlx::Error) -> CalendarError {
    CalendarError::Store(err.to_string())
}

fn encode<T: serde::Serialize>(value: &T) -> CalendarResult<String> {
    serde_json::to_string(value).map_err(|err| CalendarError::Store(err.to_string()))
}

#[async_trait::async_trait]
impl CalendarStore for Database {
    async fn read_calendar(&self, calendar_id: &str) -> CalendarResult<Option<WorkCalendar>> {
        let row = sqlx::query(
            "SELECT weekend_days, working_time_rules FROM work_calendars WHERE id = ?",
        )
        .bind(calendar_id)
        .fetch_optional(self.pool())
        .await
        .map_err(store_error)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let weekend_days_json: String = row.try_get("weekend_days").map_err(store_error)?;
        let rules_json: String = row.try_get("working_time_rules").map_err(store_error)?;
        let weekend_days: BTreeSet<u8> = serde_json::from_str(&weekend_days_json)
            .map_err(|err| CalendarError::Store(format!("weekend_days payload: {}", err)))?;
        let working_time_rules: WorkingTimeRules = serde_json::from_str(&rules_json)
            .map_err(|err| CalendarError::Store(format!("working_time_rules payload: {}", err)))?;

        let day_rows = sqlx::query(
            "SELECT date, data FROM work_calendar_days WHERE calendar_id = ? ORDER BY date ASC",
        )
        .bind(calendar_id)
        .fetch_all(self.pool())
        .await
        .map_err(store_error)?;

        let mut days = BTreeMap::new();
        for day_row in day_rows {
            let date: String = day_row.try_get("date").map_err(store_error)?;
            let data: String = day_row.try_get("data").map_err(store_error)?;
            // A corrupt legacy row must not sink the whole calendar.
            match serde_json::from_str::<CalendarDay>(&data) {
                Ok(day) => {
                    days.insert(date, day);
                }
                Err(err) => {
                    tracing::warn!(date = %date, error = %err, "skipping undecodable calendar day row");
                }
            }
        }

        Ok(Some(WorkCalendar {
            weekend_days,
            working_time_rules,
            days,
        }))
    }

    async fn create_calendar(
        &self,
        calendar_id: &str,
        calendar: &WorkCalendar,
    ) -> CalendarResult<()> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO work_calendars (id, weekend_days, working_time_rules, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(calendar_id)
        .bind(encode(&calendar.weekend_days)?)
        .bind(encode(&calendar.working_time_rules)?)
        .bind(&now)
        .bind(&now)
        .execute(self.pool())
        .await
        .map_err(store_error)?;

        for (date, day) in &calendar.days {
            sqlx::query(UPSERT_DAY_SQL)
                .bind(calendar_id)
                .bind(date)
                .bind(encode(day)?)
                .bind(&now)
                .execute(self.pool())
                .await
                .map_err(store_error)?;
        }

        Ok(())
    }

    async fn update_settings(
        &self,
        calendar_id: &str,
        weekend_days: &BTreeSet<u8>,
        rules: &WorkingTimeRules,
    ) -> CalendarResult<()> {
        let now = chrono::Utc::now().to_rfc3339();
        let result = sqlx::query(
            "UPDATE work_calendars SET weekend_days = ?, working_time_rules = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(encode(weekend_days)?)
        .bind(encode(rules)?)
        .bind(&now)
        .bind(calendar_id)
        .execute(self.pool())
        .await
        .map_err(store_error)?;

        if result.rows_affected() == 0 {
            return Err(CalendarError::CalendarNotFound(calendar_id.to_string()));
        }
        Ok(())
    }

    async fn upsert_day(
        &self,
        calendar_id: &str,
        date: &CalendarDate,
        day: &CalendarDay,
    ) -> CalendarResult<()> {
        let now = chrono::Utc::now().to_rfc3339();
        sqlx::query(UPSERT_DAY_SQL)
            .bind(calendar_id)
            .bind(date.to_string())
            .bind(encode(day)?)
            .bind(&now)
            .execute(self.pool())
            .await
            .map_err(store_error)?;
        Ok(())
    }

    async fn delete_day(&self, calendar_id: &str, date: &CalendarDate) -> CalendarResult<()> {
        sqlx::query("DELETE FROM work_calendar_days WHERE calendar_id = ? AND date = ?")
            .bind(calendar_id)
            .bind(date.to_string())
            .execute(self.pool())
            .await
            .map_err(store_error)?;
        Ok(())
    }
}
