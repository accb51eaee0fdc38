use tracing_subscriber::EnvFilter;

use snakez_runner::{RunOptions, run};
use snakez_swamp::config::SwampConfig;

/// Value of `--name=value` among the process arguments.
fn arg_value(name: &str) -> Option<String> {
    let prefix = format!("--{name}=");
    std::env::args()
        .skip(1)
        .find_map(|a| a.strip_prefix(&prefix).map(String::from))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let defaults = RunOptions::default();
    let frames = arg_value("frames")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(defaults.frames);
    let seed = arg_value("seed")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(defaults.seed);

    let config = match arg_value("config") {
        Some(path) => match SwampConfig::from_path(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::error!("Invalid config {path}: {e}");
                std::process::exit(2);
            },
        },
        None => SwampConfig::load(),
    };

    tracing::info!(frames, seed, "Snakez runner starting");

    let outcome = match run(RunOptions {
        frames,
        seed,
        config,
    }) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Cannot start match: {e}");
            std::process::exit(2);
        },
    };

    match serde_json::to_string_pretty(&outcome) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!("Failed to encode report: {e}");
            std::process::exit(1);
        },
    }
}
