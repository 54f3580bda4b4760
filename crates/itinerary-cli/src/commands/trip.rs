//! Trip management commands.

use chrono::NaiveDate;
use clap::Subcommand;
use itinerary_core::model::{Trip, TripId};
use itinerary_core::store::{Action, TripPatch};

use crate::common::{CmdResult, Session};

#[derive(Subcommand)]
pub enum TripAction {
    /// List all trips
    List,
    /// Show the current trip and its days
    Show,
    /// Create a trip with one day per date and select it
    Create {
        /// Trip title
        title: String,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
    /// Select a trip
    Select {
        /// Trip ID
        id: String,
    },
    /// Rename a trip
    Rename {
        /// Trip ID
        id: String,
        /// New title
        title: String,
    },
    /// Delete a trip
    Delete {
        /// Trip ID
        id: String,
    },
}

pub fn run(action: TripAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        TripAction::List => {
            let current = session.state.current_trip_id.clone();
            for trip in &session.state.trips {
                let marker = if current.as_ref() == Some(&trip.id) { "*" } else { " " };
                println!(
                    "{marker} {}  {}  {}..{}  ({} days)",
                    trip.id,
                    trip.title,
                    trip.start_date,
                    trip.end_date,
                    trip.days.len()
                );
            }
        }
        TripAction::Show => {
            let trip = session
                .state
                .current_trip()
                .ok_or("no trip selected")?;
            print_trip(trip, session.state.current_day_id.as_ref().map(|d| d.as_str()));
        }
        TripAction::Create { title, start, end } => {
            let trip = Trip::with_date_range(
                title,
                start,
                end,
                session.config.schedule.default_start_time,
            )?;
            let id = trip.id.clone();
            session.apply(Action::AddTrip(trip))?;
            session.apply(Action::SetCurrentTrip(id.clone()))?;
            println!("Trip created: {id}");
        }
        TripAction::Select { id } => {
            session.apply(Action::SetCurrentTrip(TripId::from(id)))?;
            session.print_current_day()?;
        }
        TripAction::Rename { id, title } => {
            session.apply(Action::UpdateTrip {
                trip_id: TripId::from(id),
                patch: TripPatch {
                    title: Some(title),
                    ..TripPatch::default()
                },
            })?;
            println!("ok");
        }
        TripAction::Delete { id } => {
            session.apply(Action::DeleteTrip(TripId::from(id)))?;
            println!("ok");
        }
    }
    Ok(())
}

fn print_trip(trip: &Trip, current_day: Option<&str>) {
    println!("{} ({})", trip.title, trip.id);
    println!("{} to {}", trip.start_date, trip.end_date);
    for day in &trip.days {
        let marker = if current_day == Some(day.id.as_str()) { "*" } else { " " };
        println!(
            "{marker} Day {}  {}  {}  {} places",
            day.day_number,
            day.date,
            day.id,
            day.places.len()
        );
    }
}
