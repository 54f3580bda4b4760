//! Transit leg commands for the current day.

use clap::Subcommand;
use itinerary_core::model::{PlaceId, TransitId, TransitMode};
use itinerary_core::store::{Action, TransitPatch};
use itinerary_core::time::parse_duration_input;

use crate::common::{CmdResult, Session};
use crate::render::transit_row;

#[derive(Subcommand)]
pub enum TransitAction {
    /// List transit legs of the current day
    List,
    /// Create or replace the leg between two places
    Set {
        /// Origin place ID
        from: String,
        /// Destination place ID
        to: String,
        /// walk, drive, transit or custom
        #[arg(long, default_value = "walk")]
        mode: TransitMode,
        /// Travel time, e.g. "12" or "1h 5m"
        #[arg(long)]
        duration: String,
        /// Route description, e.g. "via Broadway"
        #[arg(long, default_value = "")]
        route: String,
    },
    /// Update fields of a leg
    Update {
        /// Transit ID
        id: String,
        #[arg(long)]
        mode: Option<TransitMode>,
        /// Travel time, e.g. "12" or "1h 5m"
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        route: Option<String>,
    },
    /// Switch to the next mode (walk, drive, transit, custom)
    Cycle {
        /// Transit ID
        id: String,
    },
    /// Delete a leg
    Delete {
        /// Transit ID
        id: String,
    },
}

pub fn run(action: TransitAction) -> CmdResult {
    let mut session = Session::open()?;
    let (trip_id, day_id) = session.selection()?;

    let action = match action {
        TransitAction::List => {
            let day = session.current_day()?;
            for leg in &day.transit_segments {
                println!(
                    "{}  {} -> {}  {}",
                    leg.id,
                    leg.from_place_id,
                    leg.to_place_id,
                    transit_row(leg)
                );
            }
            return Ok(());
        }
        TransitAction::Set {
            from,
            to,
            mode,
            duration,
            route,
        } => Action::SetTransit {
            trip_id,
            day_id,
            from: PlaceId::from(from),
            to: PlaceId::from(to),
            mode,
            duration: parse_duration_input(&duration)?,
            route_summary: route,
        },
        TransitAction::Update {
            id,
            mode,
            duration,
            route,
        } => Action::UpdateTransit {
            trip_id,
            day_id,
            transit_id: TransitId::from(id),
            patch: TransitPatch {
                mode,
                duration: duration.as_deref().map(parse_duration_input).transpose()?,
                route_summary: route,
            },
        },
        TransitAction::Cycle { id } => Action::CycleTransitMode {
            trip_id,
            day_id,
            transit_id: TransitId::from(id),
        },
        TransitAction::Delete { id } => Action::DeleteTransit {
            trip_id,
            day_id,
            transit_id: TransitId::from(id),
        },
    };

    session.apply(action)?;
    session.print_current_day()
}
