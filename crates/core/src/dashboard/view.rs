//! Dashboard rendering
//!
//! Pure functions from [`DashboardState`] to ratatui lines. Nothing here
//! touches the terminal.

use super::state::DashboardState;
use crate::models::UsagePercentage;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub const DEFAULT_NAME_WIDTH: usize = 22;
pub const DEFAULT_BAR_WIDTH: usize = 10;

const BAR_FILLED: char = '█';
const BAR_EMPTY: char = '░';

/// Layout options for the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewOptions {
    /// Width of the name column; longer names are truncated
    pub name_width: usize,
    /// Width of each progress bar; `0` hides the bars
    pub bar_width: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            name_width: DEFAULT_NAME_WIDTH,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }
}

/// Row status derived from the higher of CPU and memory utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Below 70%
    Normal,
    /// 70% up to, not including, 90%
    Warning,
    /// 90% and above
    High,
}

impl Status {
    pub fn classify(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Status::High
        } else if percentage >= 70.0 {
            Status::Warning
        } else {
            Status::Normal
        }
    }

    pub fn of(usage: &UsagePercentage) -> Self {
        Self::classify(usage.peak())
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Normal => "OK",
            Status::Warning => "WARN",
            Status::High => "HIGH",
        }
    }

    fn color(&self) -> Color {
        match self {
            Status::Normal => Color::Green,
            Status::Warning => Color::Yellow,
            Status::High => Color::Red,
        }
    }
}

/// Cut `name` to `width` characters, marking the cut with `...` when it fits
pub fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    if width <= 3 {
        return name.chars().take(width).collect();
    }

    let mut truncated: String = name.chars().take(width - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Number of filled cells for a bar of `width` cells
pub fn filled_cells(percentage: f64, width: usize) -> usize {
    let clamped = percentage.clamp(0.0, 100.0);
    let filled = (clamped / 100.0 * width as f64).floor();
    // NaN casts to 0
    (filled as usize).min(width)
}

/// Text progress bar, e.g. `███░░░░░░░` for 30% at width 10
pub fn progress_bar(percentage: f64, width: usize) -> String {
    let filled = filled_cells(percentage, width);
    let mut bar = String::with_capacity(width * BAR_FILLED.len_utf8());
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(width - filled));
    bar
}

/// Render the full dashboard
pub fn render(
    state: &DashboardState,
    options: &ViewOptions,
    namespace: &str,
) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let dim = Style::default().fg(Color::DarkGray);
    let rule = "─".repeat(table_width(options));

    let updated = match &state.last_update {
        Some(stamp) => format!(
            "updated {} ({} ms)",
            stamp.at.format("%H:%M:%S"),
            stamp.elapsed.as_millis()
        ),
        None => "waiting for first update".to_string(),
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Kubernetes Resource Monitor", bold),
            Span::raw(format!("  namespace: {namespace}  ")),
            Span::styled(updated, dim),
        ]),
        Line::raw(""),
        Line::styled(header_row(options), bold),
        Line::styled(rule.clone(), dim),
    ];

    if state.latest.is_empty() {
        // an empty successful fetch is not the same as no fetch yet
        let placeholder = if state.last_update.is_some() {
            "No data available"
        } else {
            "Loading resource usage..."
        };
        lines.push(Line::styled(
            format!("{:^width$}", placeholder, width = table_width(options)),
            dim,
        ));
    } else {
        lines.extend(state.latest.iter().map(|usage| usage_row(usage, options)));
    }

    lines.push(Line::styled(rule, dim));
    lines.push(Line::raw(""));
    lines.push(legend());
    lines.push(Line::styled(
        "Controls: q / Esc / Ctrl+C quit, r refresh now",
        dim,
    ));

    if let Some(err) = &state.last_error {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    }

    lines
}

fn bar_column_width(options: &ViewOptions) -> usize {
    if options.bar_width == 0 {
        0
    } else {
        options.bar_width + 1
    }
}

fn table_width(options: &ViewOptions) -> usize {
    // name, two "  100.00%" columns with optional bars, status
    options.name_width + 2 * (10 + bar_column_width(options)) + 2 + 4
}

fn header_row(options: &ViewOptions) -> String {
    let bars = bar_column_width(options);
    format!(
        "{:<name$}  {:>8}{:bars$}  {:>8}{:bars$}  {}",
        "NAME",
        "CPU %",
        "",
        "MEMORY %",
        "",
        "STATUS",
        name = options.name_width,
        bars = bars,
    )
}

fn usage_row(usage: &UsagePercentage, options: &ViewOptions) -> Line<'static> {
    let status = Status::of(usage);
    let name = truncate_name(&usage.name, options.name_width);

    let mut spans = vec![Span::raw(format!("{name:<width$}", width = options.name_width))];
    for percentage in [usage.cpu_percentage, usage.memory_percentage] {
        spans.push(Span::raw(format!("  {percentage:>7.2}%")));
        if options.bar_width > 0 {
            spans.push(Span::styled(
                format!(" {}", progress_bar(percentage, options.bar_width)),
                Style::default().fg(Status::classify(percentage).color()),
            ));
        }
    }
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        status.label(),
        Style::default().fg(status.color()).add_modifier(Modifier::BOLD),
    ));

    Line::from(spans)
}

fn legend() -> Line<'static> {
    let mut spans = vec![Span::raw("Status: ")];
    for (status, text) in [
        (Status::Normal, "OK (<70%)"),
        (Status::Warning, "WARN (70-90%)"),
        (Status::High, "HIGH (>=90%)"),
    ] {
        spans.push(Span::styled("● ", Style::default().fg(status.color())));
        spans.push(Span::raw(format!("{text}   ")));
    }
    Line::from(spans)
}
