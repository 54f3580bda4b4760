//! Seed data shown on first launch.

use chrono::{NaiveDate, Weekday};

use crate::model::{
    Coordinates, Day, EmbedKind, EmbedSource, OpeningWindow, Place, PlaceCategory, PlaceEmbed,
    TransitMode, TransitSegment, Trip, WeeklyHours,
};
use crate::time::ClockTime;

fn clock(hours: u32, minutes: u32) -> ClockTime {
    ClockTime::new(hours, minutes).unwrap_or(ClockTime::from_minute_of_day(0))
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, day).unwrap_or_default()
}

fn saturday(open: u32, close: u32) -> Option<WeeklyHours> {
    let mut hours = WeeklyHours::default();
    hours.set(
        Weekday::Sat,
        Some(OpeningWindow {
            open: clock(open, 0),
            close: clock(close, 0),
        }),
    );
    Some(hours)
}

fn embed(id: &str, url: &str, source: EmbedSource, kind: EmbedKind) -> PlaceEmbed {
    PlaceEmbed {
        id: id.into(),
        url: url.into(),
        thumbnail_url: String::new(),
        source,
        kind,
        title: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn place(
    id: &str,
    order: usize,
    name: &str,
    address: &str,
    (lat, lng): (f64, f64),
    duration: u32,
    category: PlaceCategory,
    notes: &str,
) -> Place {
    Place {
        order,
        address: address.into(),
        coordinates: Coordinates { lat, lng },
        notes: notes.into(),
        ..Place::new(name)
            .with_id(id)
            .with_duration(duration)
            .with_category(category)
    }
}

fn walk(id: &str, from: &str, to: &str, duration: u32, route: &str) -> TransitSegment {
    TransitSegment {
        id: id.into(),
        route_summary: route.into(),
        ..TransitSegment::new(from.into(), to.into(), TransitMode::Walk, duration)
    }
}

fn empty_day(id: &str, number: u32, day: u32, start: ClockTime) -> Day {
    Day {
        id: id.into(),
        ..Day::new(number, date(day), start)
    }
}

/// Three days in New York; day 1 is fully planned.
pub fn sample_trip() -> Trip {
    let mut florea = place(
        "place-1",
        0,
        "Florea",
        "41 Spring St, New York, NY 10012",
        (40.7223, -73.9969),
        90,
        PlaceCategory::Cafe,
        "Get the matcha croissant. The space is small so you might want to take your order to go and walk around SoHo.",
    );
    florea.hours = saturday(10, 18);
    florea.embeds = vec![
        embed("embed-1", "https://tiktok.com/example", EmbedSource::Tiktok, EmbedKind::Video),
        embed("embed-2", "https://instagram.com/example", EmbedSource::Instagram, EmbedKind::Slideshow),
    ];

    let mut coming_soon = place(
        "place-2",
        1,
        "Coming Soon",
        "53 Howard St, New York, NY 10013",
        (40.7195, -73.9995),
        120,
        PlaceCategory::Shopping,
        "Best vintage in SoHo. Pricey but quality pieces. Check for new arrivals on Fridays.",
    );
    coming_soon.hours = saturday(11, 19);
    coming_soon.embeds = vec![
        embed("embed-3", "https://instagram.com/example2", EmbedSource::Instagram, EmbedKind::Slideshow),
        embed("embed-4", "https://instagram.com/reel", EmbedSource::Reel, EmbedKind::Video),
    ];

    let mut mcnally = place(
        "place-3",
        2,
        "McNally Jackson",
        "52 Prince St, New York, NY 10012",
        (40.7234, -73.9945),
        45,
        PlaceCategory::Bookstore,
        "Independent bookstore. Check the design section upstairs. They also have a nice stationery selection.",
    );
    mcnally.hours = saturday(10, 21);
    mcnally.embeds = vec![embed(
        "embed-5",
        "https://youtube.com/example",
        EmbedSource::Youtube,
        EmbedKind::Video,
    )];

    let mut carbone = place(
        "place-4",
        3,
        "Carbone",
        "181 Thompson St, New York, NY 10012",
        (40.7272, -73.9993),
        120,
        PlaceCategory::Restaurant,
        "Reservation confirmed. Ask for the spicy rigatoni. Dress code: smart casual.",
    );
    carbone.anchor_time = Some(clock(19, 30));
    carbone.hours = saturday(17, 23);
    carbone.embeds = vec![
        embed("embed-6", "https://tiktok.com/example2", EmbedSource::Tiktok, EmbedKind::Video),
        embed("embed-7", "https://instagram.com/example3", EmbedSource::Instagram, EmbedKind::Slideshow),
    ];

    let mut first = empty_day("day-1", 1, 18, clock(10, 0));
    first.places = vec![florea, coming_soon, mcnally, carbone];
    first.transit_segments = vec![
        walk("transit-1", "place-1", "place-2", 12, "via Lafayette St"),
        walk("transit-2", "place-2", "place-3", 8, "via Broadway"),
        walk("transit-3", "place-3", "place-4", 10, "via Thompson St"),
    ];

    Trip {
        id: "trip-1".into(),
        title: "A's NYC Favorites".into(),
        start_date: date(18),
        end_date: date(20),
        days: vec![
            first,
            empty_day("day-2", 2, 19, clock(9, 30)),
            empty_day("day-3", 3, 20, clock(10, 0)),
        ],
    }
}
