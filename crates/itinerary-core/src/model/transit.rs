use serde::{Deserialize, Serialize};

use super::{PlaceId, TransitId};

/// How the traveller gets between two places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitMode {
    #[default]
    Walk,
    Drive,
    Transit,
    Custom,
}

impl TransitMode {
    pub const ALL: [TransitMode; 4] = [Self::Walk, Self::Drive, Self::Transit, Self::Custom];

    /// Next mode in the walk → drive → transit → custom cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Walk => Self::Drive,
            Self::Drive => Self::Transit,
            Self::Transit => Self::Custom,
            Self::Custom => Self::Walk,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Walk => "WALK",
            Self::Drive => "DRIVE",
            Self::Transit => "TRANSIT",
            Self::Custom => "CUSTOM",
        }
    }
}

impl std::str::FromStr for TransitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "walk" => Ok(Self::Walk),
            "drive" => Ok(Self::Drive),
            "transit" => Ok(Self::Transit),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown transit mode: {other}")),
        }
    }
}

/// Directed travel leg `from_place_id -> to_place_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitSegment {
    pub id: TransitId,
    pub from_place_id: PlaceId,
    pub to_place_id: PlaceId,
    #[serde(default)]
    pub mode: TransitMode,
    /// Travel time in minutes.
    pub duration: u32,
    #[serde(default)]
    pub route_summary: String,
}

impl TransitSegment {
    pub fn new(from: PlaceId, to: PlaceId, mode: TransitMode, duration: u32) -> Self {
        Self {
            id: TransitId::generate(),
            from_place_id: from,
            to_place_id: to,
            mode,
            duration,
            route_summary: String::new(),
        }
    }

    pub fn touches(&self, place_id: &PlaceId) -> bool {
        &self.from_place_id == place_id || &self.to_place_id == place_id
    }

    pub fn connects(&self, from: &PlaceId, to: &PlaceId) -> bool {
        &self.from_place_id == from && &self.to_place_id == to
    }
}
