// SPDX-License-Identifier: GPL-3.0-only

//! kbmode command line
//!
//! Replays a recorded script of input-method events against the keyboard
//! mode state machine and prints the layout after every event, one JSON
//! object per line.

use clap::Parser;
use kbmode::app_settings;
use kbmode::config::{builtin_profile_names, resolve_profile};
use kbmode::keyboard::KeyboardState;
use kbmode::script::{parse_script, replay};
use std::error::Error;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Replay input-method events and print the keyboard layout after each one
#[derive(Parser, Debug)]
#[command(name = app_settings::APP_NAME, author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON event script
    #[arg(value_name = "SCRIPT", required_unless_present = "list_profiles")]
    script: Option<PathBuf>,

    /// Built-in profile name or path to a profile file
    #[arg(short, long, value_name = "NAME|PATH", default_value = app_settings::DEFAULT_PROFILE)]
    profile: String,

    /// List the built-in profiles and exit
    #[arg(long)]
    list_profiles: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(app_settings::LOG_DIRECTIVE.parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_profiles {
        for name in builtin_profile_names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let Some(script_path) = cli.script else {
        return Err("no script given".into());
    };

    let profile = resolve_profile(&cli.profile)?;
    tracing::info!("Using keyboard profile '{}'", profile.name);

    let json = fs::read_to_string(&script_path)
        .map_err(|e| format!("cannot read script '{}': {}", script_path.display(), e))?;
    let events = parse_script(&json)?;

    let mut state = KeyboardState::new();
    state.load_profile(&profile);
    let steps = replay(&mut state, &events)?;
    match steps.last() {
        Some(last) => tracing::info!(
            "Replayed {} event(s), ending on layout {} ({})",
            steps.len(),
            last.layout,
            last.layout as u8
        ),
        None => tracing::info!("Script has no events"),
    }

    let mut out = BufWriter::new(io::stdout().lock());
    for step in &steps {
        serde_json::to_writer(&mut out, step)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(())
}
