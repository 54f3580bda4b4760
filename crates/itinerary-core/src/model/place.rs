use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::{EmbedId, PlaceId};
use crate::time::ClockTime;

/// Default visit length for newly added places, in minutes.
pub const DEFAULT_PLACE_DURATION: u32 = 60;

/// A stop on a day's plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    /// Dense position within the day, re-derived after every mutation.
    pub order: usize,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub coordinates: Coordinates,
    /// Visit length in minutes. Always positive.
    pub duration: u32,
    /// Fixed start time overriding the computed one.
    #[serde(default)]
    pub anchor_time: Option<ClockTime>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub embeds: Vec<PlaceEmbed>,
    #[serde(default)]
    pub hours: Option<WeeklyHours>,
    #[serde(default)]
    pub category: PlaceCategory,
}

impl Place {
    /// A blank place with a fresh id, as created by "add place".
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PlaceId::generate(),
            order: 0,
            name: name.into(),
            address: String::new(),
            coordinates: Coordinates::default(),
            duration: DEFAULT_PLACE_DURATION,
            anchor_time: None,
            notes: String::new(),
            photos: Vec::new(),
            embeds: Vec::new(),
            hours: None,
            category: PlaceCategory::Other,
        }
    }

    pub fn with_id(mut self, id: impl Into<PlaceId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_anchor(mut self, anchor: ClockTime) -> Self {
        self.anchor_time = Some(anchor);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_category(mut self, category: PlaceCategory) -> Self {
        self.category = category;
        self
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor_time.is_some()
    }

    /// Copy under a fresh id, name suffixed with `(copy)`.
    pub fn duplicate(&self) -> Self {
        Self {
            id: PlaceId::generate(),
            name: format!("{} (copy)", self.name),
            order: self.order + 1,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Cafe,
    Restaurant,
    Shopping,
    Bookstore,
    Museum,
    Park,
    Bar,
    Hotel,
    #[default]
    #[serde(other)]
    Other,
}

impl PlaceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
            Self::Shopping => "shopping",
            Self::Bookstore => "bookstore",
            Self::Museum => "museum",
            Self::Park => "park",
            Self::Bar => "bar",
            Self::Hotel => "hotel",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for PlaceCategory {
    type Err = std::convert::Infallible;

    /// Unknown categories fall back to `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "cafe" => Self::Cafe,
            "restaurant" => Self::Restaurant,
            "shopping" => Self::Shopping,
            "bookstore" => Self::Bookstore,
            "museum" => Self::Museum,
            "park" => Self::Park,
            "bar" => Self::Bar,
            "hotel" => Self::Hotel,
            _ => Self::Other,
        })
    }
}

/// Social-media clip or link attached to a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceEmbed {
    pub id: EmbedId,
    pub url: String,
    pub thumbnail_url: String,
    pub source: EmbedSource,
    #[serde(rename = "type")]
    pub kind: EmbedKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedSource {
    Tiktok,
    Instagram,
    Youtube,
    Reel,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedKind {
    Video,
    Slideshow,
    Link,
}

/// Open/close pair for one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningWindow {
    pub open: ClockTime,
    pub close: ClockTime,
}

impl OpeningWindow {
    /// Whether `close` is on the following day (e.g. 17:00-02:00).
    pub fn is_overnight(&self) -> bool {
        self.close < self.open
    }

    /// Whether a visit `[start, start + duration]` fits inside the window.
    pub fn contains_visit(&self, start: ClockTime, duration: u32) -> bool {
        let open = self.open.minute_of_day();
        let mut close = self.close.minute_of_day();
        let mut begin = start.minute_of_day();
        if self.is_overnight() {
            close += 24 * 60;
            if begin < open {
                begin += 24 * 60;
            }
        }
        let end = begin + i64::from(duration);
        begin >= open && end <= close
    }
}

/// Opening hours keyed by weekday. A missing day means "unknown".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeeklyHours {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monday: Option<OpeningWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuesday: Option<OpeningWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wednesday: Option<OpeningWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thursday: Option<OpeningWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friday: Option<OpeningWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saturday: Option<OpeningWindow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunday: Option<OpeningWindow>,
}

impl WeeklyHours {
    pub fn for_weekday(&self, weekday: Weekday) -> Option<&OpeningWindow> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }

    pub fn set(&mut self, weekday: Weekday, window: Option<OpeningWindow>) {
        let slot = match weekday {
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
            Weekday::Sun => &mut self.sunday,
        };
        *slot = window;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(open: &str, close: &str) -> OpeningWindow {
        OpeningWindow {
            open: open.parse().unwrap(),
            close: close.parse().unwrap(),
        }
    }

    #[test]
    fn duplicate_gets_fresh_id_and_copy_suffix() {
        let place = Place::new("Florea").with_id("place-1");
        let copy = place.duplicate();
        assert_ne!(copy.id, place.id);
        assert_eq!(copy.name, "Florea (copy)");
        assert_eq!(copy.duration, place.duration);
    }

    #[test]
    fn deserializes_camel_case_document() {
        let json = r#"{
            "id": "place-4",
            "order": 3,
            "name": "Carbone",
            "address": "181 Thompson St",
            "coordinates": { "lat": 40.7272, "lng": -73.9993 },
            "duration": 120,
            "anchorTime": "19:30",
            "notes": "",
            "photos": [],
            "embeds": [{
                "id": "embed-6",
                "url": "https://tiktok.com/example2",
                "thumbnailUrl": "https://example.com/t.jpg",
                "source": "tiktok",
                "type": "video"
            }],
            "hours": { "saturday": { "open": "17:00", "close": "23:00" } },
            "category": "restaurant"
        }"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.anchor_time, Some("19:30".parse().unwrap()));
        assert_eq!(place.embeds[0].source, EmbedSource::Tiktok);
        assert_eq!(place.embeds[0].kind, EmbedKind::Video);
        let hours = place.hours.unwrap();
        assert_eq!(hours.for_weekday(Weekday::Sat), Some(&window("17:00", "23:00")));
        assert_eq!(hours.for_weekday(Weekday::Mon), None);
    }

    #[test]
    fn unknown_category_falls_back_to_other() {
        let json = r#"{ "id": "p", "order": 0, "name": "x", "duration": 30, "category": "spa" }"#;
        let place: Place = serde_json::from_str(json).unwrap();
        assert_eq!(place.category, PlaceCategory::Other);
        assert_eq!("Cafe".parse::<PlaceCategory>().unwrap(), PlaceCategory::Cafe);
    }

    #[test]
    fn category_parse_matches_serialized_names() {
        for category in [
            PlaceCategory::Cafe,
            PlaceCategory::Restaurant,
            PlaceCategory::Shopping,
            PlaceCategory::Bookstore,
            PlaceCategory::Museum,
            PlaceCategory::Park,
            PlaceCategory::Bar,
            PlaceCategory::Hotel,
            PlaceCategory::Other,
        ] {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            assert_eq!(category.as_str().parse::<PlaceCategory>().unwrap(), category);
        }
        assert_eq!(" MUSEUM ".parse::<PlaceCategory>().unwrap(), PlaceCategory::Museum);
        assert_eq!("spa".parse::<PlaceCategory>().unwrap(), PlaceCategory::Other);
    }

    #[test]
    fn opening_window_contains_visit() {
        let w = window("10:00", "18:00");
        assert!(w.contains_visit("10:00".parse().unwrap(), 90));
        assert!(w.contains_visit("16:00".parse().unwrap(), 120));
        assert!(!w.contains_visit("17:00".parse().unwrap(), 90));
        assert!(!w.contains_visit("09:30".parse().unwrap(), 30));
    }

    #[test]
    fn overnight_window_spans_midnight() {
        let w = window("20:00", "02:00");
        assert!(w.is_overnight());
        assert!(w.contains_visit("23:30".parse().unwrap(), 120));
        assert!(w.contains_visit("00:30".parse().unwrap(), 60));
        assert!(!w.contains_visit("01:30".parse().unwrap(), 60));
    }
}
