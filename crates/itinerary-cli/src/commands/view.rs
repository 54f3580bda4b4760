use itinerary_core::model::ViewMode;
use itinerary_core::store::Action;

use crate::common::{CmdResult, Session};

pub fn run(mode: ViewMode) -> CmdResult {
    let mut session = Session::open()?;
    session.apply(Action::SetViewMode(mode))?;
    if session.state.current_day().is_some() {
        session.print_current_day()?;
    }
    Ok(())
}
