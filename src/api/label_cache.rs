use std::collections::HashMap;

use crate::core::Timestamp;

/// Runtime metrics exposed by the calendar label cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarLabelCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
}

/// Shape of a calendar label; part of the cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum LabelPattern {
    Year,
    Quarter,
    MonthName,
    MonthYear,
    IsoWeek,
    WeekdayDay,
    WeekdayDayMonth,
    Hour,
    HourMinute,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(super) struct CalendarLabelCacheKey {
    pub(super) locale: String,
    pub(super) pattern: LabelPattern,
    pub(super) instant: Timestamp,
}

/// Pure memo of formatted labels; safe to share across layouts.
#[derive(Debug, Default)]
pub(super) struct CalendarLabelCache {
    entries: HashMap<CalendarLabelCacheKey, String>,
    hits: u64,
    misses: u64,
}

impl CalendarLabelCache {
    const MAX_ENTRIES: usize = 8192;

    pub(super) fn get_or_insert_with<F>(&mut self, key: CalendarLabelCacheKey, format: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(value) = self.entries.get(&key) {
            self.hits = self.hits.saturating_add(1);
            return value.clone();
        }
        self.misses = self.misses.saturating_add(1);
        if self.entries.len() >= Self::MAX_ENTRIES {
            self.entries.clear();
        }
        let value = format();
        self.entries.insert(key, value.clone());
        value
    }

    pub(super) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(super) fn stats(&self) -> CalendarLabelCacheStats {
        CalendarLabelCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
        }
    }
}
