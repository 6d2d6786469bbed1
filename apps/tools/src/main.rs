use std::{fs, path::PathBuf, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use lifecycle::LifecycleController;
use shared::domain::BoxId;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trigger a box at t=0 on a virtual clock and print its state at each
    /// requested offset.
    Timeline {
        #[arg(long, default_value_t = 0)]
        box_id: u32,
        /// Offsets in milliseconds; defaults to one sample per transition.
        #[arg(long = "at")]
        at_ms: Vec<u64>,
    },
    /// Write the showcase page with every box idle.
    Render {
        #[arg(long, default_value = "showcase.html")]
        out: PathBuf,
    },
}

const DEFAULT_SAMPLES_MS: [u64; 5] = [0, 600, 2100, 3600, 6600];

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Timeline { box_id, at_ms } => {
            let box_id = BoxId(box_id);
            let mut controller = LifecycleController::new();
            controller
                .trigger(box_id, Duration::ZERO)
                .with_context(|| format!("failed to trigger box {box_id}"))?;

            let mut samples = if at_ms.is_empty() {
                DEFAULT_SAMPLES_MS.to_vec()
            } else {
                at_ms
            };
            samples.sort_unstable();

            for at in samples {
                controller.advance(Duration::from_millis(at));
                let Some(snapshot) = controller.snapshot(box_id) else {
                    bail!("box {box_id} disappeared from the controller");
                };
                let reward = if snapshot.state == shared::domain::LifecycleState::Revealing {
                    snapshot.reward.as_str()
                } else {
                    "-"
                };
                println!(
                    "t={at:>5}ms box={box_id} state={:<12} stage={} reward={reward}",
                    snapshot.state, snapshot.stage
                );
            }
        }
        Command::Render { out } => {
            let page = render::render_page(&LifecycleController::new().snapshots());
            fs::write(&out, page)
                .with_context(|| format!("failed to write '{}'", out.display()))?;
            println!("wrote {}", out.display());
        }
    }

    Ok(())
}
