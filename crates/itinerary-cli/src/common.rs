//! Shared command plumbing: load state, apply one action, persist, print.

use itinerary_core::model::{Day, DayId, TripId};
use itinerary_core::store::Action;
use itinerary_core::timeline::{DaySchedule, ScheduleCalculator};
use itinerary_core::{AppState, BlobStore, Config, StoreError};
use tracing::warn;

use crate::render::{render_day, RenderOptions};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Loaded state plus the store it came from.
pub struct Session {
    store: BlobStore,
    pub state: AppState,
    pub config: Config,
}

impl Session {
    /// Open the on-disk store, falling back to memory when it is unavailable.
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let store = match BlobStore::open() {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "store unavailable, changes will not be saved");
                BlobStore::open_memory()?
            }
        };
        let state = store.load_state_or_seed();
        let config = Config::load_or_default();
        Ok(Self {
            store,
            state,
            config,
        })
    }

    pub fn selection(&self) -> Result<(TripId, DayId), StoreError> {
        self.state.selection()
    }

    pub fn current_day(&self) -> Result<&Day, StoreError> {
        self.state
            .current_day()
            .ok_or(StoreError::NoSelection("day"))
    }

    /// Apply one action and persist the resulting snapshot.
    pub fn apply(&mut self, action: Action) -> Result<(), StoreError> {
        self.state = self.state.apply(action)?;
        self.store.save_state(&self.state);
        Ok(())
    }

    /// Replace the whole state and persist it.
    pub fn replace(&mut self, state: AppState) {
        self.state = state;
        self.store.save_state(&self.state);
    }

    pub fn clear(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.store.clear()?;
        self.state = AppState::default();
        Ok(())
    }

    pub fn calculator(&self) -> ScheduleCalculator {
        ScheduleCalculator::new().with_gap_threshold(self.config.schedule.gap_threshold_minutes)
    }

    pub fn schedule(&self, day: &Day) -> Result<DaySchedule, Box<dyn std::error::Error>> {
        Ok(self.calculator().compute(day)?)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            view: self.state.view_mode,
            clock: self.config.display.clock_format,
            show_notes: self.config.display.show_notes,
        }
    }

    pub fn render(&self, day: &Day) -> Result<String, Box<dyn std::error::Error>> {
        let schedule = self.schedule(day)?;
        Ok(render_day(day, &schedule, &self.render_options()))
    }

    /// Print the selected day, as after every mutation.
    pub fn print_current_day(&self) -> CmdResult {
        print!("{}", self.render(self.current_day()?)?);
        Ok(())
    }
}
