use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use workflow::clock::Simulation;
use workflow::sequence::{process_flow_renderer, render_process_flow};
use workflow::timeline::StageWrite;
use workflow::{Fired, RunId, Stage, TimelineConfig};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid timeline: {0}")]
    Timeline(#[from] workflow::TimelineError),
    #[error("diagram render failed: {0}")]
    Render(#[from] mermaid::RenderError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    Unhealthy(u16),
}

#[derive(Parser, Debug)]
#[command(name = "testwise", about = "TestWise workflow simulator and diagram renderer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the workflow animation on a virtual clock and print each event.
    Timeline {
        /// Number of complete runs to simulate (replays included).
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        runs: u32,
        /// Playback speed multiplier.
        #[arg(long, default_value_t = 1.0)]
        speed: f64,
        /// Emit one JSON object per line.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the process-flow sequence diagram as SVG.
    Sequence {
        #[arg(long, default_value = "mermaid-process-flow")]
        id: String,
    },
    /// Print the static architecture layout as JSON.
    Architecture,
    /// Check a running server's `/healthz`.
    Ping {
        #[arg(long, env = "TESTWISE_BASE_URL", default_value = "http://127.0.0.1:3000")]
        base_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Timeline { runs, speed, json } => run_timeline(runs, speed, json),
        Command::Sequence { id } => run_sequence(&id),
        Command::Architecture => run_architecture(),
        Command::Ping { base_url } => run_ping(&base_url).await,
    }
}

// ── timeline ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum TimelineEvent {
    Step { at_ms: u64, run: RunId, step: usize, writes: Vec<StageWrite>, processing: Option<Stage> },
    Settled { at_ms: u64, run: RunId },
    Replayed { at_ms: u64, run: RunId },
}

fn run_timeline(runs: u32, speed: f64, json: bool) -> Result<(), CliError> {
    let config = TimelineConfig::default().with_speed(speed)?;
    config.validate()?;
    for event in simulate(config, runs) {
        if json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("{}", format_event(&event));
        }
    }
    Ok(())
}

/// Drive `runs` playthroughs, stopping once the last one settles.
fn simulate(config: TimelineConfig, runs: u32) -> Vec<TimelineEvent> {
    let end_ms = simulation_end_ms(&config, runs);
    let mut sim = Simulation::new(config);
    sim.start();

    let mut events = Vec::new();
    while let Some(due) = sim.next_due_ms() {
        if due > end_ms {
            break;
        }
        sim.advance_to(due);
        for entry in sim.take_trace() {
            let at_ms = entry.at_ms;
            match entry.fired {
                Fired::Step { run, step, writes, .. } => events.push(TimelineEvent::Step {
                    at_ms,
                    run,
                    step: step + 1,
                    writes: writes.to_vec(),
                    processing: sim.machine().processing(),
                }),
                Fired::Settled { run, .. } => events.push(TimelineEvent::Settled { at_ms, run }),
                Fired::Replayed { run, .. } => events.push(TimelineEvent::Replayed { at_ms, run }),
                Fired::Stale => tracing::debug!(at_ms, "stale timer ignored"),
            }
        }
    }
    sim.teardown();
    events
}

/// Virtual time at which run `runs` settles. Saturates instead of overflowing.
fn simulation_end_ms(config: &TimelineConfig, runs: u32) -> u64 {
    config
        .cycle_ms()
        .saturating_mul(u64::from(runs.saturating_sub(1)))
        .saturating_add(config.run_length_ms())
        .saturating_add(u64::from(config.settle_ms))
}

fn format_event(event: &TimelineEvent) -> String {
    match event {
        TimelineEvent::Step { at_ms, run, step, writes, processing } => {
            let writes: String = writes.iter().map(|w| format!(" {}={}", w.stage, w.state.as_str())).collect();
            let processing = processing.map_or_else(|| "-".to_owned(), |stage| stage.to_string());
            format!("{at_ms:>7}ms  run {run}  step {step}/8 {writes}  processing={processing}")
        }
        TimelineEvent::Settled { at_ms, run } => format!("{at_ms:>7}ms  run {run}  settled"),
        TimelineEvent::Replayed { at_ms, run } => format!("{at_ms:>7}ms  run {run}  replay"),
    }
}

// ── diagrams ────────────────────────────────────────────────────

fn run_sequence(id: &str) -> Result<(), CliError> {
    let svg = render_sequence(id)?;
    println!("{svg}");
    Ok(())
}

fn render_sequence(id: &str) -> Result<String, CliError> {
    Ok(render_process_flow(&process_flow_renderer(), id)?)
}

fn run_architecture() -> Result<(), CliError> {
    println!("{}", architecture_json()?);
    Ok(())
}

fn architecture_json() -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(&workflow::architecture::default_layout())?)
}

// ── ping ────────────────────────────────────────────────────────

async fn run_ping(base_url: &str) -> Result<(), CliError> {
    let url = format!("{}/healthz", base_url.trim_end_matches('/'));
    let response = reqwest::Client::new().get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Unhealthy(status.as_u16()));
    }
    println!("ok");
    Ok(())
}
