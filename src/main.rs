//! Theme Controls scenario replay
//!
//! Replays a recorded page scenario against an in-memory document and prints
//! the resulting state as JSON. Useful for reproducing theme/menu bug reports
//! without a browser.
//!
//! Usage:
//!   theme-replay <scenario.json> [--config <controls.json>]
//!   theme-replay --stdin [--config <controls.json>]
//!   theme-replay --version

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::{bail, Context};
    use std::io::Read;
    use std::path::PathBuf;
    use theme_controls::{config, replay};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "theme_controls=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut scenario_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut from_stdin = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!(
                    "theme-replay {} ({})",
                    env!("THEME_CONTROLS_VERSION"),
                    env!("THEME_CONTROLS_GIT_SHA")
                );
                return Ok(());
            }
            "--stdin" => from_stdin = true,
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                config_path = Some(PathBuf::from(path));
            }
            other if other.starts_with('-') => bail!("unknown option: {}", other),
            other => scenario_path = Some(PathBuf::from(other)),
        }
    }

    let json = match (scenario_path, from_stdin) {
        (Some(path), false) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?,
        (None, true) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read scenario from stdin")?;
            buf
        }
        _ => bail!("usage: theme-replay <scenario.json> | --stdin [--config <controls.json>]"),
    };

    let config = config::load_config(config_path.as_deref())?;
    let scenario = replay::Scenario::from_json(&json)?;
    tracing::info!("Replaying {} events", scenario.events.len());

    let report = replay::replay(&scenario, config);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
