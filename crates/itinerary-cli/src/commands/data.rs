use clap::Subcommand;
use itinerary_core::AppState;

use crate::common::{CmdResult, Session};

#[derive(Subcommand)]
pub enum DataAction {
    /// Replace stored trips with the sample trip
    Reset,
    /// Remove stored trips (the sample trip is seeded on next load)
    Clear,
}

pub fn run(action: DataAction) -> CmdResult {
    let mut session = Session::open()?;
    match action {
        DataAction::Reset => {
            session.replace(AppState::sample());
            println!("data reset to sample trip");
        }
        DataAction::Clear => {
            session.clear()?;
            println!("stored data cleared");
        }
    }
    Ok(())
}
