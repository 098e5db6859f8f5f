//! Two-row calendar header over the tick sequence.

use chrono::{DateTime, Datelike, Locale, Timelike, Utc};

use crate::core::primitives::millis_to_datetime;
use crate::core::{Timestamp, ViewMode};
use crate::render::{CalendarHeader, HeaderCell, Renderer};

use super::label_cache::{
    CalendarLabelCache, CalendarLabelCacheKey, CalendarLabelCacheStats, LabelPattern,
};
use super::GanttEngine;

/// Inputs of [`build_calendar_header`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct HeaderLayout<'a> {
    pub(super) view_mode: ViewMode,
    pub(super) locale: &'a str,
    pub(super) column_width: f64,
    pub(super) header_height: f64,
    pub(super) rtl: bool,
}

impl<R: Renderer> GanttEngine<R> {
    /// Builds the header for the current ticks, memoising every label.
    pub fn calendar_header(&mut self) -> CalendarHeader {
        let layout = HeaderLayout {
            view_mode: self.config.view_mode,
            locale: &self.config.locale,
            column_width: self.config.column_width,
            header_height: self.config.header_height,
            rtl: self.config.rtl,
        };
        let ticks = self.layout.ticks();
        build_calendar_header(ticks, layout, &mut self.label_cache)
    }

    #[must_use]
    pub fn label_cache_stats(&self) -> CalendarLabelCacheStats {
        self.label_cache.stats()
    }

    pub fn clear_label_cache(&mut self) {
        self.label_cache.clear();
    }
}

pub(super) fn build_calendar_header(
    ticks: &[Timestamp],
    layout: HeaderLayout<'_>,
    cache: &mut CalendarLabelCache,
) -> CalendarHeader {
    let mut header = CalendarHeader {
        height: layout.header_height,
        top: Vec::new(),
        bottom: Vec::with_capacity(ticks.len()),
    };
    let dates: Vec<DateTime<Utc>> = ticks
        .iter()
        .filter_map(|&tick| millis_to_datetime(tick).ok())
        .collect();
    if dates.len() != ticks.len() {
        return header;
    }

    let count = ticks.len();
    let cw = layout.column_width;
    let column_x = |index: usize| {
        if layout.rtl {
            (count - 1 - index) as f64 * cw
        } else {
            index as f64 * cw
        }
    };
    let (bottom_pattern, top_pattern) = patterns(layout.view_mode);
    let locale = resolve_locale(layout.locale);

    for (index, (&tick, date)) in ticks.iter().zip(&dates).enumerate() {
        let label = cached_label(cache, layout.locale, locale, bottom_pattern, tick, date);
        let x = column_x(index);
        header.bottom.push(HeaderCell {
            label,
            tick_index: index,
            x,
            width: cw,
            text_x: x + cw * 0.5,
            text_y: layout.header_height * 0.8,
        });
    }

    let mut group_start = 0;
    for index in 1..=count {
        let closes_group = index == count
            || group_key(layout.view_mode, &dates[index])
                != group_key(layout.view_mode, &dates[group_start]);
        if !closes_group {
            continue;
        }
        let span = index - group_start;
        let x = if layout.rtl {
            column_x(index - 1)
        } else {
            column_x(group_start)
        };
        let width = span as f64 * cw;
        let label = cached_label(
            cache,
            layout.locale,
            locale,
            top_pattern,
            ticks[group_start],
            &dates[group_start],
        );
        header.top.push(HeaderCell {
            label,
            tick_index: group_start,
            x,
            width,
            text_x: x + width * 0.5,
            text_y: layout.header_height * 0.5 * 0.9,
        });
        group_start = index;
    }

    header
}

/// `(bottom, top)` label patterns per view mode.
fn patterns(view_mode: ViewMode) -> (LabelPattern, LabelPattern) {
    match view_mode {
        ViewMode::Year => (LabelPattern::Year, LabelPattern::Year),
        ViewMode::QuarterYear => (LabelPattern::Quarter, LabelPattern::Year),
        ViewMode::Month => (LabelPattern::MonthName, LabelPattern::Year),
        ViewMode::Week => (LabelPattern::IsoWeek, LabelPattern::MonthYear),
        ViewMode::Day => (LabelPattern::WeekdayDay, LabelPattern::MonthName),
        ViewMode::QuarterDay | ViewMode::HalfDay | ViewMode::Hour => {
            (LabelPattern::Hour, LabelPattern::WeekdayDayMonth)
        }
        ViewMode::HalfHour => (LabelPattern::HourMinute, LabelPattern::WeekdayDayMonth),
    }
}

/// Consecutive ticks with the same key share one top cell.
fn group_key(view_mode: ViewMode, date: &DateTime<Utc>) -> (i32, u32, u32) {
    match view_mode {
        ViewMode::Year | ViewMode::QuarterYear | ViewMode::Month => (date.year(), 0, 0),
        ViewMode::Week | ViewMode::Day => (date.year(), date.month(), 0),
        ViewMode::QuarterDay | ViewMode::HalfDay | ViewMode::Hour | ViewMode::HalfHour => {
            (date.year(), date.month(), date.day())
        }
    }
}

fn cached_label(
    cache: &mut CalendarLabelCache,
    locale_tag: &str,
    locale: Locale,
    pattern: LabelPattern,
    tick: Timestamp,
    date: &DateTime<Utc>,
) -> String {
    let key = CalendarLabelCacheKey {
        locale: locale_tag.to_owned(),
        pattern,
        instant: tick,
    };
    cache.get_or_insert_with(key, || format_label(pattern, date, locale))
}

/// Formats one label; month and weekday names follow `locale`.
pub(super) fn format_label(pattern: LabelPattern, date: &DateTime<Utc>, locale: Locale) -> String {
    match pattern {
        LabelPattern::Year => date.year().to_string(),
        LabelPattern::Quarter => format!("Q{}", (date.month0() + 3) / 3),
        LabelPattern::MonthName => month_name(date, locale),
        LabelPattern::MonthYear => format!("{}, {}", month_name(date, locale), date.year()),
        LabelPattern::IsoWeek => format!("W{:02}", date.iso_week().week()),
        LabelPattern::WeekdayDay => format!("{}, {}", weekday_short(date, locale), date.day()),
        LabelPattern::WeekdayDayMonth => format!(
            "{}, {} {}",
            weekday_short(date, locale),
            date.day(),
            month_name(date, locale)
        ),
        LabelPattern::Hour => format!("{}", date.hour()),
        LabelPattern::HourMinute => format!("{:02}:{:02}", date.hour(), date.minute()),
    }
}

/// Maps a BCP-47 style tag (`en-GB`) to a chrono locale; POSIX when unknown.
pub(super) fn resolve_locale(tag: &str) -> Locale {
    let normalized = tag.replace('-', "_");
    Locale::try_from(normalized.as_str())
        .or_else(|_| {
            let language = normalized.split('_').next().unwrap_or_default();
            Locale::try_from(language)
        })
        .unwrap_or(Locale::POSIX)
}

fn month_name(date: &DateTime<Utc>, locale: Locale) -> String {
    capitalize(&date.format_localized("%B", locale).to_string())
}

fn weekday_short(date: &DateTime<Utc>, locale: Locale) -> String {
    date.format_localized("%a", locale).to_string()
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
