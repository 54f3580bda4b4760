//! Plain-text rendering of a computed day.

use std::fmt::Write;

use itinerary_core::model::{Day, Place, TransitSegment, ViewMode};
use itinerary_core::time::{format_duration, format_duration_long, RANGE_SEPARATOR};
use itinerary_core::timeline::{check_opening_hours, DaySchedule, OpeningStatus};
use itinerary_core::{ClockFormat, ClockTime};

/// Display settings for [`render_day`].
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub view: ViewMode,
    pub clock: ClockFormat,
    pub show_notes: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            view: ViewMode::Detail,
            clock: ClockFormat::TwentyFourHour,
            show_notes: true,
        }
    }
}

impl RenderOptions {
    fn time(&self, time: ClockTime) -> String {
        self.clock.format(time)
    }

    fn range(&self, start: ClockTime, minutes: u32) -> String {
        let end = start.add_minutes(i64::from(minutes));
        format!("{}{RANGE_SEPARATOR}{}", self.time(start), self.time(end))
    }
}

/// `WALK 12 min via Lafayette St`
pub fn transit_row(segment: &TransitSegment) -> String {
    let mut row = format!("{} {} min", segment.mode.label(), segment.duration);
    if !segment.route_summary.is_empty() {
        row.push(' ');
        row.push_str(&segment.route_summary);
    }
    row
}

/// `! 6h 48m gap before Carbone`; a negative gap reads as an overlap.
pub fn gap_line(minutes: i64, next: &Place) -> String {
    let label = format_duration_long(u32::try_from(minutes.unsigned_abs()).unwrap_or(u32::MAX));
    if minutes < 0 {
        format!("! {label} overlap before {}", next.name)
    } else {
        format!("! {label} gap before {}", next.name)
    }
}

pub fn day_header(day: &Day, opts: &RenderOptions) -> String {
    format!(
        "Day {} · {} · starts {}",
        day.day_number,
        day.date.format("%a, %b %-d"),
        opts.time(day.start_time)
    )
}

/// Render `day` with its computed `schedule`.
pub fn render_day(day: &Day, schedule: &DaySchedule, opts: &RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", day_header(day, opts));
    if day.places.is_empty() {
        let _ = writeln!(out, "  (no places planned)");
        return out;
    }

    match opts.view {
        ViewMode::Map => render_map(&mut out, day, schedule, opts),
        ViewMode::Detail | ViewMode::Compact => render_list(&mut out, day, schedule, opts),
    }
    out
}

fn render_list(out: &mut String, day: &Day, schedule: &DaySchedule, opts: &RenderOptions) {
    let detail = opts.view == ViewMode::Detail;
    let hours = check_opening_hours(day, schedule);
    let last = day.places.len() - 1;

    for (i, place) in day.places.iter().enumerate() {
        let Some(start) = schedule.start_of(&place.id) else {
            continue;
        };
        let anchor = if place.is_anchored() { "  [anchored]" } else { "" };
        let _ = writeln!(
            out,
            "{:>2}. {}  {}  ({}){anchor}",
            i + 1,
            opts.range(start, place.duration),
            place.name,
            format_duration(place.duration),
        );

        if detail {
            if !place.address.is_empty() {
                let _ = writeln!(out, "      {}", place.address);
            }
            if opts.show_notes && !place.notes.is_empty() {
                let _ = writeln!(out, "      {}", place.notes);
            }
        }
        let outside = hours
            .iter()
            .any(|(id, status)| id == &place.id && *status == OpeningStatus::OutsideHours);
        if outside {
            let _ = writeln!(out, "      ! outside opening hours");
        }

        if i < last {
            if let Some(segment) = day.transit_from(&place.id) {
                let _ = writeln!(out, "      {}", transit_row(segment));
            }
        }
        let next = day.places.get(i + 1);
        if let (Some(minutes), Some(next)) = (schedule.gap_after(&place.id), next) {
            let _ = writeln!(out, "      {}", gap_line(minutes, next));
        }
    }
}

fn render_map(out: &mut String, day: &Day, schedule: &DaySchedule, opts: &RenderOptions) {
    for (i, place) in day.places.iter().enumerate() {
        let time = schedule
            .start_of(&place.id)
            .map(|t| opts.range(t, place.duration))
            .unwrap_or_default();
        let street = place.address.split(',').next().unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>2}. {}  {}  {}  ({:.4}, {:.4})",
            i + 1,
            place.name,
            time,
            street,
            place.coordinates.lat,
            place.coordinates.lng,
        );
    }
}
