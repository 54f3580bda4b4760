//! Day commands for the current trip.

use clap::Subcommand;
use itinerary_core::model::DayId;
use itinerary_core::store::{Action, DayPatch};
use itinerary_core::time::format_duration;
use itinerary_core::ClockTime;

use crate::common::{CmdResult, Session};

#[derive(Subcommand)]
pub enum DayAction {
    /// List days of the current trip
    List,
    /// Show a day's computed schedule
    Show {
        /// Day ID (defaults to the current day)
        #[arg(long)]
        day: Option<String>,
        /// Output the day and its schedule as JSON
        #[arg(long)]
        json: bool,
    },
    /// Select a day of the current trip
    Select {
        /// Day ID
        id: String,
    },
    /// Set the current day's start time (e.g. "09:30" or "7:30 PM")
    Start {
        time: String,
    },
}

pub fn run(action: DayAction) -> CmdResult {
    let mut session = Session::open()?;

    match action {
        DayAction::List => {
            let trip = session.state.current_trip().ok_or("no trip selected")?;
            let current = session.state.current_day_id.as_ref();
            for day in &trip.days {
                let marker = if current == Some(&day.id) { "*" } else { " " };
                println!(
                    "{marker} {}  Day {}  {}  starts {}  {} places  {} planned",
                    day.id,
                    day.day_number,
                    day.date,
                    session.config.display.clock_format.format(day.start_time),
                    day.places.len(),
                    format_duration(day.total_visit_minutes())
                );
            }
        }
        DayAction::Show { day, json } => {
            let trip = session.state.current_trip().ok_or("no trip selected")?;
            let day = match day {
                Some(id) => {
                    let id = DayId::from(id);
                    trip.day(&id).ok_or_else(|| format!("day not found: {id}"))?
                }
                None => session.current_day()?,
            };
            if json {
                let schedule = session.schedule(day)?;
                let output = serde_json::json!({ "day": day, "schedule": schedule });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print!("{}", session.render(day)?);
            }
        }
        DayAction::Select { id } => {
            session.apply(Action::SetCurrentDay(DayId::from(id)))?;
            session.print_current_day()?;
        }
        DayAction::Start { time } => {
            let start = ClockTime::parse_user_input(&time)?;
            let (trip_id, day_id) = session.selection()?;
            session.apply(Action::UpdateDay {
                trip_id,
                day_id,
                patch: DayPatch {
                    start_time: Some(start),
                    ..DayPatch::default()
                },
            })?;
            session.print_current_day()?;
        }
    }
    Ok(())
}
