//! Colorful console output for engine events.
//!
//! Provides a `tracing` layer that renders optimizer and simulator events
//! with colors. Enabled by the `console` feature.

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_FILTER: &str = "lineupforge=info,lineupforge_solver=info,lineupforge_simulation=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` replaces the default filter when set.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Another subscriber may already be installed by the host
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(EngineConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 _     _                        _____
| |   (_)_ __   ___ _   _ _ __ |  ___|__  _ __ __ _  ___
| |   | | '_ \ / _ \ | | | '_ \| |_ / _ \| '__/ _` |/ _ \
| |___| | | | |  __/ |_| | |_) |  _| (_) | | | (_| |  __/
|_____|_|_| |_|\___|\__,_| .__/|_|  \___/|_|  \__, |\___|
                         |_|                  |___/
"#;

    let version_line = format!(
        "                 v{} - Lineup Optimizer and Simulator\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats engine events with colors.
pub struct EngineConsoleLayer;

impl<S: Subscriber> Layer<S> for EngineConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !event.metadata().target().starts_with("lineupforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    text: Vec<(&'static str, String)>,
    numbers: Vec<(&'static str, u64)>,
    flags: Vec<(&'static str, bool)>,
}

impl EventVisitor {
    fn number(&self, name: &str) -> u64 {
        self.numbers
            .iter()
            .find(|(n, _)| *n == name)
            .map_or(0, |(_, v)| *v)
    }

    fn text(&self, name: &str) -> &str {
        self.text
            .iter()
            .find(|(n, _)| *n == name)
            .map_or("N/A", |(_, v)| v.as_str())
    }

    fn flag(&self, name: &str) -> bool {
        self.flags.iter().any(|(n, v)| *n == name && *v)
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        if field.name() == "event" {
            self.event = Some(s);
        } else {
            self.text.push((field.name(), s));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "event" {
            self.event = Some(value.to_string());
        } else {
            self.text.push((field.name(), value.to_string()));
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.numbers.push((field.name(), value));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.flags.push((field.name(), value));
    }
}

fn format_event(v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "optimize_start" => format_optimize_start(v),
        "lineup_accepted" => format_lineup_accepted(v),
        "diversity_relaxed" => format_diversity_relaxed(v),
        "optimize_terminated" => warn_line("[Optimizer]", v.text("reason")),
        "exposure_exhausted" => warn_line(
            "[Optimizer]",
            &format!(
                "exposure limits exhausted after {} of {} lineups",
                v.number("completed"),
                v.number("requested")
            ),
        ),
        "diversity_exhausted" => warn_line(
            "[Optimizer]",
            &format!(
                "no further diverse lineup after {} of {} lineups",
                v.number("completed"),
                v.number("requested")
            ),
        ),
        "exposure_above_cap" => warn_line(
            "[Optimizer]",
            &format!(
                "player {} in {} of {} lineups, cap {}",
                v.text("player"),
                v.number("count"),
                v.number("lineups"),
                v.number("max_count")
            ),
        ),
        "optimize_end" => format_optimize_end(v),
        "simulate_start" => format_simulate_start(v),
        "simulate_terminated" => warn_line(
            "[Simulator]",
            &format!(
                "stopped after {} of {} iterations",
                count(v.number("completed")),
                count(v.number("requested"))
            ),
        ),
        "simulate_end" => format_simulate_end(v),
        _ => String::new(),
    }
}

fn info_prefix(component: &str) -> String {
    format!(
        "{} {} {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        component.bright_cyan()
    )
}

fn warn_line(component: &str, message: &str) -> String {
    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        component.bright_cyan(),
        message.yellow()
    )
}

fn count(n: u64) -> String {
    n.to_formatted_string(&Locale::en)
}

fn format_optimize_start(v: &EventVisitor) -> String {
    format!(
        "{} {} contest ({}), players ({}), lineups requested ({}), min different ({}), stacks ({})",
        info_prefix("[Optimizer]"),
        v.text("sport").white().bold(),
        v.number("contest_id").to_string().yellow(),
        count(v.number("players")).bright_yellow(),
        count(v.number("requested")).bright_yellow(),
        v.number("min_different").to_string().yellow(),
        v.number("stacks").to_string().yellow(),
    )
}

fn format_lineup_accepted(v: &EventVisitor) -> String {
    format!(
        "    {} Lineup {:>4} | salary {} | {}",
        "->".bright_blue(),
        (v.number("lineup") + 1).to_string().white(),
        count(v.number("salary")).white(),
        format_score(v.text("score")),
    )
}

fn format_diversity_relaxed(v: &EventVisitor) -> String {
    warn_line(
        "[Optimizer]",
        &format!(
            "diversity relaxed from {} to {} players at lineup {}",
            v.number("from"),
            v.number("to"),
            v.number("lineup") + 1
        ),
    )
}

fn format_optimize_end(v: &EventVisitor) -> String {
    let built = v.number("lineups");
    let requested = v.number("requested");
    let complete = built >= requested && !v.flag("terminated_early");

    let mut output = format!(
        "{} Optimization ended: time spent ({}), move evaluation speed ({}/sec), step total ({})",
        info_prefix("[Optimizer]"),
        format_duration_ms(v.number("duration_ms")).yellow(),
        count(v.number("moves_per_second")).bright_magenta().bold(),
        count(v.number("steps")).white(),
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');

    let status_text = if complete {
        "BATCH COMPLETE"
    } else {
        "PARTIAL BATCH"
    };
    let status_colored = if complete {
        format!("  {}  ", status_text).bright_green().bold().to_string()
    } else {
        format!("  {}  ", status_text).bright_yellow().bold().to_string()
    };
    let status_padding = 56 - status_text.len() - 4;
    let left_pad = status_padding / 2;
    let right_pad = status_padding - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╠══════════════════════════════════════════════════════════╣".bright_cyan().to_string());
    output.push('\n');

    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Lineups:",
        format!("{} / {}", built, requested),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Attempts:",
        count(v.number("attempts")),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_simulate_start(v: &EventVisitor) -> String {
    format!(
        "{} lineups ({}), players ({}), clusters ({}), iterations ({}) in {} chunks on {} workers",
        info_prefix("[Simulator]"),
        count(v.number("lineups")).bright_yellow(),
        count(v.number("players")).bright_yellow(),
        v.number("clusters").to_string().yellow(),
        count(v.number("iterations")).bright_yellow(),
        count(v.number("chunks")).yellow(),
        v.number("workers").to_string().yellow(),
    )
}

fn format_simulate_end(v: &EventVisitor) -> String {
    let elapsed_ms = v.number("elapsed_ms");
    let iterations = v.number("iterations");
    let rate = if elapsed_ms > 0 {
        iterations.saturating_mul(1000) / elapsed_ms
    } else {
        iterations
    };
    format!(
        "{} Simulation ended: time spent ({}), iterations ({}), speed ({}/sec)",
        info_prefix("[Simulator]"),
        format_duration_ms(elapsed_ms).yellow(),
        count(iterations).white(),
        count(rate).bright_magenta().bold(),
    )
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Colors a `"{hard}hard/{value}pts"` lineup score.
fn format_score(score: &str) -> String {
    if let Some((hard, value)) = score.split_once('/') {
        let hard_num: i64 = hard.trim_end_matches("hard").parse().unwrap_or(0);
        let hard_str = if hard_num < 0 {
            hard.bright_red().to_string()
        } else {
            hard.bright_green().to_string()
        };
        return format!("{}/{}", hard_str, value.bright_white());
    }
    score.white().to_string()
}
