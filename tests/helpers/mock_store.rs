#![allow(dead_code)]
use hrdesk::{
    CalendarDate, CalendarDay, CalendarError, CalendarResult, CalendarStore, WorkCalendar,
    WorkingTimeRules,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// In-memory store double with failure injection, used to drive the
/// coordinator's rollback paths.
#[derive(Default)]
pub struct MockCalendarStore {
    pub days: Mutex<HashMap<String, CalendarDay>>,
    pub settings_writes: Mutex<Vec<(BTreeSet<u8>, WorkingTimeRules)>>,
    fail_upserts: AtomicBool,
    fail_deletes: AtomicBool,
    fail_settings: AtomicBool,
}

impl MockCalendarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_upserts(&self, fail: bool) {
        self.fail_upserts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_settings(&self, fail: bool) {
        self.fail_settings.store(fail, Ordering::SeqCst);
    }

    pub fn stored_day(&self, key: &str) -> Option<CalendarDay> {
        self.days.lock().unwrap().get(key).cloned()
    }

    pub fn stored_day_count(&self) -> usize {
        self.days.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CalendarStore for MockCalendarStore {
    async fn read_calendar(&self, _calendar_id: &str) -> CalendarResult<Option<WorkCalendar>> {
        Ok(None)
    }

    async fn create_calendar(
        &self,
        _calendar_id: &str,
        calendar: &WorkCalendar,
    ) -> CalendarResult<()> {
        let mut days = self.days.lock().unwrap();
        for (key, day) in &calendar.days {
            days.insert(key.clone(), day.clone());
        }
        Ok(())
    }

    async fn update_settings(
        &self,
        _calendar_id: &str,
        weekend_days: &BTreeSet<u8>,
        rules: &WorkingTimeRules,
    ) -> CalendarResult<()> {
        if self.fail_settings.load(Ordering::SeqCst) {
            return Err(CalendarError::Store("injected settings failure".to_string()));
        }
        self.settings_writes
            .lock()
            .unwrap()
            .push((weekend_days.clone(), rules.clone()));
        Ok(())
    }

    async fn upsert_day(
        &self,
        _calendar_id: &str,
        date: &CalendarDate,
        day: &CalendarDay,
    ) -> CalendarResult<()> {
        if self.fail_upserts.load(Ordering::SeqCst) {
            return Err(CalendarError::Store("injected upsert failure".to_string()));
        }
        self.days
            .lock()
            .unwrap()
            .insert(date.to_string(), day.clone());
        Ok(())
    }

    async fn delete_day(&self, _calendar_id: &str, date: &CalendarDate) -> CalendarResult<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(CalendarError::Store("injected delete failure".to_string()));
        }
        self.days.lock().unwrap().remove(&date.to_string());
        Ok(())
    }
}
