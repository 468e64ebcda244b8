use std::{collections::BTreeSet, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    spotify::{PlaylistSource, SourceError},
    stage,
    types::{Playlist, PlaylistItem, Stage, UNKNOWN_ARTIST},
};

/// Walks every playlist of the source and returns the unique artist names,
/// sorted ascending.
///
/// Both the playlist listing and each track listing are followed until a page
/// comes back without a next cursor. Any failed page fetch aborts the walk
/// with the error, a partial artist set is never returned.
pub async fn collect_artists<S: PlaylistSource>(source: &S) -> Result<Vec<String>, SourceError> {
    let mut artist_names: BTreeSet<String> = BTreeSet::new();
    let mut total_playlists = 0;

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    pb.suspend(|| stage!(Stage::Spotify, "Fetching playlists..."));
    pb.set_message("Fetching playlists...");

    let mut cursor: Option<String> = None;
    loop {
        let page = match source.playlists(cursor.as_deref()).await {
            Ok(page) => page,
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        };

        for playlist in page.items {
            total_playlists += 1;
            pb.suspend(|| {
                stage!(
                    Stage::Spotify,
                    "→ Playlist: {} ({} tracks)",
                    playlist.name,
                    playlist.total_tracks()
                )
            });
            pb.set_message(format!("Reading {}...", playlist.name));

            let track_count = match collect_playlist(source, &playlist, &mut artist_names).await {
                Ok(count) => count,
                Err(e) => {
                    pb.finish_and_clear();
                    return Err(e);
                }
            };

            pb.suspend(|| {
                stage!(
                    Stage::Spotify,
                    "✓ Finished {} ({} tracks)",
                    playlist.name,
                    track_count
                )
            });
        }

        cursor = page.next;
        if cursor.is_none() {
            break;
        }
    }

    pb.finish_and_clear();
    stage!(Stage::Spotify, "Total playlists processed: {}", total_playlists);
    stage!(Stage::Spotify, "Unique artists found: {}", artist_names.len());

    Ok(artist_names.into_iter().collect())
}

/// Adds the artists of every item of `playlist` and returns the number of
/// items visited.
async fn collect_playlist<S: PlaylistSource>(
    source: &S,
    playlist: &Playlist,
    artist_names: &mut BTreeSet<String>,
) -> Result<usize, SourceError> {
    let mut track_count = 0;
    let mut cursor: Option<String> = None;

    loop {
        let page = source
            .playlist_tracks(&playlist.id, cursor.as_deref())
            .await?;

        for item in &page.items {
            artist_names.extend(artist_names_of(item));
            track_count += 1;
        }

        cursor = page.next;
        if cursor.is_none() {
            return Ok(track_count);
        }
    }
}

/// Contributing artist names of one playlist item.
///
/// Missing data never drops the item: an absent track, an absent or empty
/// artist list and an artist without a name each yield [`UNKNOWN_ARTIST`].
pub fn artist_names_of(item: &PlaylistItem) -> Vec<String> {
    let artists = match item.track.as_ref().and_then(|t| t.artists.as_ref()) {
        Some(artists) if !artists.is_empty() => artists,
        _ => return vec![UNKNOWN_ARTIST.to_string()],
    };

    artists
        .iter()
        .map(|a| match a.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => UNKNOWN_ARTIST.to_string(),
        })
        .collect()
}
