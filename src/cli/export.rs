use std::fs::File;

use tabled::Table;

use crate::{
    cli::auth::authorized_client,
    config::Config,
    error,
    musicbrainz::MusicBrainzClient,
    pipeline::{Escaping, MetadataResolver, Pipeline, RunSummary},
    prompt::TerminalPrompt,
    stage,
    types::{ResolutionOutcome, ResolutionTableRow, Stage},
};

/// Runs the full export: collect, filter, resolve and write the album queue.
///
/// # Exit Behavior
///
/// Exits with code 1 when no valid Spotify token exists, when the working
/// directory cannot be created, or when the playlist walk or a write fails.
/// Artists that resolve to nothing are only logged.
pub async fn export(config: &Config, escape: bool) {
    stage!(Stage::Start, "Launching Spotify-to-Soulseek export");

    let source = authorized_client(config).await;

    if let Err(e) = async_fs::create_dir_all(&config.working_path).await {
        error!(
            "Cannot create working path {}: {}",
            config.working_path.display(),
            e
        );
    }

    let catalog = match MusicBrainzClient::new(&config.musicbrainz) {
        Ok(catalog) => catalog,
        Err(e) => error!("Cannot create MusicBrainz client: {}", e),
    };

    let escaping = if escape {
        Escaping::Backslash
    } else {
        Escaping::Verbatim
    };

    let output_path = config.output_path();
    let mut pipeline = Pipeline::new(
        source,
        TerminalPrompt::new(),
        MetadataResolver::new(catalog),
        escaping,
    );

    match pipeline.run(|| File::create(&output_path)).await {
        Ok(summary) => {
            print_summary(&summary);
            stage!(
                Stage::Done,
                "All finished. Output saved to: {}",
                output_path.display()
            );
        }
        Err(e) => error!("Export failed: {}", e),
    }
}

fn print_summary(summary: &RunSummary) {
    if summary.resolutions.is_empty() {
        return;
    }

    let rows: Vec<ResolutionTableRow> = summary
        .resolutions
        .iter()
        .map(|r| ResolutionTableRow {
            artist: r.artist.clone(),
            albums: match r.outcome {
                ResolutionOutcome::Written(n) => n,
                _ => 0,
            },
            outcome: r.outcome.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}
