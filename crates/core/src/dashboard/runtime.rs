//! Terminal event loop
//!
//! Serializes keyboard input, timer ticks and fetch results through one
//! channel, feeds them to the reducer, executes the returned effects and
//! redraws after every event.

use super::state::{update, AppState, Event, FetchOutcome};
use super::view::render;
use crate::config::MonitorConfig;
use crate::engine::compute_percentages;
use crate::observability::StructuredLogger;
use crate::provider::ResourceSnapshotProvider;
use crate::scheduler::Effect;
use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{self, Event as CrosstermEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::ops::ControlFlow;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// How long the input thread blocks before checking whether the loop is gone
const INPUT_POLL: Duration = Duration::from_millis(200);

/// Run the dashboard until the user quits
pub async fn run(
    provider: Arc<dyn ResourceSnapshotProvider>,
    config: &MonitorConfig,
) -> Result<()> {
    let logger = StructuredLogger::new(config.namespace.clone());
    let mut terminal = TerminalGuard::enter().context("Failed to set up terminal")?;

    let (tx, mut rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx.clone());

    let (mut state, mut effects) = update(AppState::new(config.interval), Event::Start);

    loop {
        if execute(std::mem::take(&mut effects), &provider, &logger, &tx).is_break() {
            logger.log_shutdown("user quit");
            return Ok(());
        }

        terminal
            .draw(|frame| {
                let lines = render(state.dashboard(), &config.view, &config.namespace);
                frame.render_widget(Paragraph::new(lines), frame.area());
            })
            .context("Failed to draw dashboard")?;

        let Some(event) = rx.recv().await else {
            return Ok(());
        };
        (state, effects) = update(state, event);
    }
}

/// Carry out effects in order; breaks on `Effect::Exit`
///
/// Fetches and timers run on spawned tasks and report back through `tx`.
fn execute(
    effects: Vec<Effect>,
    provider: &Arc<dyn ResourceSnapshotProvider>,
    logger: &StructuredLogger,
    tx: &mpsc::UnboundedSender<Event>,
) -> ControlFlow<()> {
    for effect in effects {
        match effect {
            Effect::Fetch => spawn_fetch(Arc::clone(provider), logger.clone(), tx.clone()),
            Effect::ScheduleTick { generation, delay } => {
                spawn_tick(generation, delay, tx.clone())
            }
            Effect::Exit => return ControlFlow::Break(()),
        }
    }
    ControlFlow::Continue(())
}

/// Fetch a snapshot and compute percentages
pub async fn fetch_outcome(
    provider: &dyn ResourceSnapshotProvider,
    namespace: &str,
) -> FetchOutcome {
    let started = Instant::now();
    let result = provider
        .fetch_snapshot(namespace)
        .await
        .map(|snapshot| compute_percentages(&snapshot.limits, &snapshot.usages));

    FetchOutcome {
        result,
        fetched_at: Local::now(),
        elapsed: started.elapsed(),
    }
}

fn spawn_fetch(
    provider: Arc<dyn ResourceSnapshotProvider>,
    logger: StructuredLogger,
    tx: mpsc::UnboundedSender<Event>,
) {
    tokio::spawn(async move {
        let outcome = fetch_outcome(provider.as_ref(), logger.namespace()).await;
        match &outcome.result {
            Ok(percentages) => logger.log_fetch_completed(percentages.len(), outcome.elapsed),
            Err(err) => logger.log_fetch_failed(err, outcome.elapsed),
        }
        // The loop may already have exited; the result is dropped then.
        let _ = tx.send(Event::FetchCompleted(outcome));
    });
}

fn spawn_tick(generation: u64, delay: Duration, tx: mpsc::UnboundedSender<Event>) {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(Event::Tick { generation });
    });
}

/// Forward terminal input from a dedicated thread
fn spawn_input_reader(tx: mpsc::UnboundedSender<Event>) {
    thread::spawn(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!(error = %e, "Failed to poll terminal input");
                    break;
                }
            }

            let event = match event::read() {
                Ok(CrosstermEvent::Key(key)) => Event::Key(key),
                Ok(CrosstermEvent::Resize(..)) => Event::Resize,
                Ok(_) => continue,
                Err(e) => {
                    warn!(error = %e, "Failed to read terminal input");
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
        debug!("Input reader stopped");
    });
}

/// Raw-mode alternate screen, restored on drop
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                Err(e)
            }
        }
    }

    fn draw<F>(&mut self, render: F) -> io::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render).map(|_| ())
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
