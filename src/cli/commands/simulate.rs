//! Terminal rendition of the page's simulated demos.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::icons::{arrow, success};
use crate::config::Settings;
use crate::simulation::{
    Effect, SimulationEvent, SimulationKind, SimulationRunner, SimulationState,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Run one simulation and print its events as they arrive.
pub async fn cmd_simulate(settings: &Settings, kind: &str) -> anyhow::Result<()> {
    let Some(kind) = SimulationKind::from_str(kind) else {
        let known: Vec<&str> = SimulationKind::all().iter().map(|k| k.as_str()).collect();
        anyhow::bail!(
            "Unknown simulation '{}' (expected one of: {})",
            kind,
            known.join(", ")
        );
    };

    let runner = SimulationRunner::new(settings.pacing);
    let started = runner.start(kind).await;
    println!(
        "{} {} {}",
        arrow(),
        kind.button_label(),
        style(format!(
            "(about {:.1}s)",
            settings.pacing.expected_duration(kind).as_secs_f64()
        ))
        .dim()
    );

    let mut shown = 0;
    let mut spinner: Option<ProgressBar> = None;
    let mut bar: Option<ProgressBar> = None;

    let finished = loop {
        let Some(snapshot) = runner.snapshot(started.id).await else {
            anyhow::bail!("Simulation {} disappeared", started.id);
        };

        for event in &snapshot.events[shown..] {
            match event {
                SimulationEvent::Status { label } => {
                    println!("{} {}", style("▸").cyan(), label);
                }
                SimulationEvent::Message { text } => println!("  {}", text),
                SimulationEvent::StatusComplete { label } => {
                    println!("{} {}", success(), label);
                }
                SimulationEvent::Spinner { text } => {
                    let pb = ProgressBar::new_spinner();
                    pb.set_style(
                        ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?,
                    );
                    pb.enable_steady_tick(Duration::from_millis(100));
                    pb.set_message(text.clone());
                    spinner = Some(pb);
                }
                SimulationEvent::Progress { percent, text } => {
                    if bar.is_none() {
                        let pb = ProgressBar::new(100);
                        pb.set_style(
                            ProgressStyle::default_bar()
                                .template("[{bar:30.cyan/blue}] {pos:>3}% {wide_msg}")?
                                .progress_chars("█▓░"),
                        );
                        bar = Some(pb);
                    }
                    if let Some(ref pb) = bar {
                        pb.set_position(u64::from(*percent));
                        pb.set_message(text.clone());
                    }
                }
                SimulationEvent::Success { message } => {
                    if let Some(pb) = spinner.take() {
                        pb.finish_and_clear();
                    }
                    if let Some(pb) = bar.take() {
                        pb.finish_and_clear();
                    }
                    println!("{} {}", success(), style(message).green());
                }
                SimulationEvent::Toast { message } => {
                    println!("{} {}", style("🔔").dim(), message);
                }
                SimulationEvent::Effect { effect } => match effect {
                    Effect::Balloons => println!("🎈🎈🎈"),
                    Effect::Snow => println!("❄️❄️❄️"),
                },
            }
        }
        shown = snapshot.events.len();

        if snapshot.state.is_finished() {
            break snapshot.state;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    };

    if finished == SimulationState::Cancelled {
        println!("{} Simulation {}", style("!").yellow(), finished.as_str());
    }

    Ok(())
}
