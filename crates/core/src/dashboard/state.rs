//! Dashboard state and reducer
//!
//! `update` is the only place state changes. It consumes the current state
//! and one event and returns the next state along with the effects the
//! runtime has to perform, so the whole loop can be tested without a
//! terminal or a cluster.

use super::input::{on_key, Action};
use crate::error::ProviderError;
use crate::models::UsagePercentage;
use crate::scheduler::{Effect, PollingScheduler};
use chrono::{DateTime, Local};
use crossterm::event::KeyEvent;
use std::time::Duration;
use tracing::debug;

/// Events serialized through the single event loop
#[derive(Debug)]
pub enum Event {
    /// Loop started
    Start,
    /// A timer armed by `Effect::ScheduleTick` fired
    Tick { generation: u64 },
    /// A fetch finished, successfully or not
    FetchCompleted(FetchOutcome),
    /// Keyboard input
    Key(KeyEvent),
    /// Terminal resized; only triggers a redraw
    Resize,
}

/// Result of one fetch-compute cycle, produced off the main loop
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    pub result: Result<Vec<UsagePercentage>, ProviderError>,
    pub fetched_at: DateTime<Local>,
    pub elapsed: Duration,
}

/// When the displayed data was fetched and how long it took
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchStamp {
    pub at: DateTime<Local>,
    pub elapsed: Duration,
}

/// What the view renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Percentages from the last successful fetch, in display order
    pub latest: Vec<UsagePercentage>,
    /// Error from the most recent fetch, cleared by the next success
    pub last_error: Option<ProviderError>,
    pub quitting: bool,
    pub last_update: Option<FetchStamp>,
}

impl DashboardState {
    /// Next state after a fetch; failures keep the previous percentages
    fn with_outcome(self, outcome: FetchOutcome) -> Self {
        match outcome.result {
            Ok(latest) => Self {
                latest,
                last_error: None,
                last_update: Some(FetchStamp {
                    at: outcome.fetched_at,
                    elapsed: outcome.elapsed,
                }),
                ..self
            },
            Err(err) => Self {
                last_error: Some(err),
                ..self
            },
        }
    }
}

/// Everything the event loop owns
#[derive(Debug, Clone)]
pub struct AppState {
    dashboard: DashboardState,
    scheduler: PollingScheduler,
}

impl AppState {
    pub fn new(interval: Duration) -> Self {
        Self {
            dashboard: DashboardState::default(),
            scheduler: PollingScheduler::new(interval),
        }
    }

    pub fn dashboard(&self) -> &DashboardState {
        &self.dashboard
    }

    pub fn scheduler(&self) -> &PollingScheduler {
        &self.scheduler
    }
}

/// Fold one event into the state
pub fn update(mut state: AppState, event: Event) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    match event {
        Event::Start => effects.extend(state.scheduler.start()),
        Event::Tick { generation } => effects.extend(state.scheduler.on_tick(generation)),
        Event::FetchCompleted(outcome) => {
            if state.scheduler.is_cancelled() {
                debug!("Discarding fetch result received after quit");
            } else {
                state.dashboard = state.dashboard.with_outcome(outcome);
                effects.extend(state.scheduler.on_fetch_complete());
            }
        }
        Event::Key(key) => match on_key(&key) {
            Action::Quit => {
                if state.scheduler.cancel() {
                    state.dashboard = DashboardState {
                        quitting: true,
                        ..state.dashboard
                    };
                    effects.push(Effect::Exit);
                }
            }
            Action::ManualRefresh => effects.extend(state.scheduler.request_refresh()),
            Action::NoOp => {}
        },
        Event::Resize => {}
    }

    (state, effects)
}
