//! Live terminal dashboard
//!
//! The dashboard is split the same way the loop runs:
//! - `input` maps key presses to actions
//! - `state` holds the reducer that folds events into state and effects
//! - `view` turns state into display lines
//! - `runtime` owns the terminal and executes effects

mod input;
mod runtime;
mod state;
mod view;


pub use input::{on_key, Action};
pub use runtime::{fetch_outcome, run};
pub use state::{update, AppState, DashboardState, Event, FetchOutcome, FetchStamp};
pub use view::{
    filled_cells, progress_bar, render, truncate_name, Status, ViewOptions, DEFAULT_BAR_WIDTH,
    DEFAULT_NAME_WIDTH,
};
