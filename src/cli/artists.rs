use tabled::Table;

use crate::{
    cli::auth::authorized_client,
    config::Config,
    error,
    pipeline::collect_artists,
    types::ArtistTableRow,
};

/// Collects the unique artists of all playlists and prints them as a table.
///
/// Nothing is asked and nothing is looked up, this is a dry run of the
/// collection step.
pub async fn list_artists(config: &Config) {
    let source = authorized_client(config).await;

    let artists = match collect_artists(&source).await {
        Ok(artists) => artists,
        Err(e) => error!("Failed to collect artists: {}", e),
    };

    let table_rows: Vec<ArtistTableRow> = artists
        .into_iter()
        .map(|name| ArtistTableRow { name })
        .collect();

    println!("{}", Table::new(table_rows));
}
