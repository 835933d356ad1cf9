mod bootstrap;

use std::path::Path;
use std::process::ExitCode;

use summary_charts::{draw_sent_volume_chart, draw_unique_contacts_chart};
use summary_core::paths::OutputPaths;
use summary_core::settings::Settings;
use summary_core::{Result, SummaryError};
use summary_data::analysis::analyze_events;
use summary_data::reader::load_events;
use summary_data::writer::write_summary_csv;

fn main() -> ExitCode {
    let settings = match Settings::try_from_args(std::env::args_os()) {
        Ok(settings) => settings,
        Err(err) => return fail(&err),
    };

    if let Err(err) = bootstrap::setup_logging(&settings.log_level) {
        eprintln!("Failed to initialise logging: {err}");
    }

    tracing::info!("enron-summary v{} starting", env!("CARGO_PKG_VERSION"));

    match run(&settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err),
    }
}

fn fail(err: &SummaryError) -> ExitCode {
    match err {
        // Usage text is the help the user asked for, so it goes to stdout.
        SummaryError::Usage(text) => println!("{text}"),
        other => eprintln!("Error: {other}"),
    }
    ExitCode::from(err.exit_code())
}

/// Load, aggregate and write all three artifacts for `settings.input`.
fn run(settings: &Settings) -> Result<()> {
    let paths = OutputPaths::for_input(&settings.input)?;
    let tz = settings.resolved_timezone()?;
    tracing::info!("Input {}, timezone {}", settings.input.display(), tz);

    println!("Loading Data...");
    let events = load_events(&settings.input, tz)?;

    println!("Getting Summary Statistics...");
    let analysis = analyze_events(&events, settings.top);

    write_artifacts(&paths, |paths| {
        write_summary_csv(&paths.summary_csv, &analysis.summary)?;

        println!("Preparing Top Senders Sent Graph...");
        draw_sent_volume_chart(&analysis.sent_volume, &paths.sent_chart)?;

        println!("Preparing Top Senders Received Graph...");
        draw_unique_contacts_chart(&analysis.unique_contacts, &paths.received_chart)
    })?;

    println!("Done!");
    Ok(())
}

/// Run `write`, removing every artifact in `paths` if it fails part-way.
fn write_artifacts(
    paths: &OutputPaths,
    write: impl FnOnce(&OutputPaths) -> Result<()>,
) -> Result<()> {
    let result = write(paths);
    if result.is_err() {
        remove_artifacts(&paths.all());
    }
    result
}

fn remove_artifacts(paths: &[&Path]) {
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!("Removed partial artifact {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Could not remove {}: {}", path.display(), e),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
