use std::io::{self, Write};

use crate::{
    Res,
    musicbrainz::MetadataCatalog,
    pipeline::{
        collector::collect_artists,
        filter::filter_artists,
        resolver::MetadataResolver,
        writer::{Escaping, OutputWriter},
    },
    prompt::YesNoPrompt,
    spotify::PlaylistSource,
    stage,
    types::{ArtistResolution, ResolutionOutcome, Stage},
};

/// Lifecycle of one export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Init,
    AuthReady,
    ArtistsCollected,
    ArtistsFiltered,
    Resolving,
    Writing,
    Done,
}

impl PipelineState {
    /// Whether the driver may move from `self` to `next`.
    ///
    /// Transitions only go forward. The per-artist loop re-enters `Resolving`
    /// from `Writing`, or from `Resolving` when an artist produced nothing.
    pub fn can_advance_to(&self, next: PipelineState) -> bool {
        use PipelineState::*;
        matches!(
            (self, next),
            (Init, AuthReady)
                | (AuthReady, ArtistsCollected)
                | (ArtistsCollected, ArtistsFiltered)
                | (ArtistsFiltered, Resolving)
                | (ArtistsFiltered, Done)
                | (Resolving, Resolving)
                | (Resolving, Writing)
                | (Resolving, Done)
                | (Writing, Resolving)
                | (Writing, Done)
        )
    }
}

/// Totals of a finished run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub artists_collected: usize,
    pub artists_accepted: usize,
    pub artists_processed: usize,
    pub entries_written: usize,
    pub resolutions: Vec<ArtistResolution>,
}

/// Sequences collection, filtering, resolution and writing.
///
/// Everything runs one step after the other: no two catalog or playlist
/// requests are ever in flight at the same time.
pub struct Pipeline<S, P, M>
where
    S: PlaylistSource,
    P: YesNoPrompt,
    M: MetadataCatalog,
{
    source: S,
    prompt: P,
    resolver: MetadataResolver<M>,
    escaping: Escaping,
    state: PipelineState,
}

impl<S, P, M> Pipeline<S, P, M>
where
    S: PlaylistSource,
    P: YesNoPrompt,
    M: MetadataCatalog,
{
    pub fn new(source: S, prompt: P, resolver: MetadataResolver<M>, escaping: Escaping) -> Self {
        Self {
            source,
            prompt,
            resolver,
            escaping,
            state: PipelineState::Init,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn resolver(&self) -> &MetadataResolver<M> {
        &self.resolver
    }

    fn advance(&mut self, next: PipelineState) -> Res<()> {
        if !self.state.can_advance_to(next) {
            return Err(format!("invalid pipeline transition {:?} -> {:?}", self.state, next).into());
        }
        self.state = next;
        Ok(())
    }

    /// Runs the whole export.
    ///
    /// `open_sink` is called once, after filtering, to open the output. Entries
    /// are flushed one by one, so an interrupted run leaves every entry written
    /// before the interruption in place.
    ///
    /// # Errors
    ///
    /// A failed playlist page fetch and a failed write abort the run. Catalog
    /// failures only skip the artist concerned.
    pub async fn run<W, F>(&mut self, open_sink: F) -> Res<RunSummary>
    where
        W: Write,
        F: FnOnce() -> io::Result<W>,
    {
        self.advance(PipelineState::AuthReady)?;

        let artists = collect_artists(&self.source).await?;
        self.advance(PipelineState::ArtistsCollected)?;

        let accepted = filter_artists(&artists, &mut self.prompt);
        self.advance(PipelineState::ArtistsFiltered)?;

        let mut writer = OutputWriter::new(open_sink()?, self.escaping);
        let mut summary = RunSummary {
            artists_collected: artists.len(),
            artists_accepted: accepted.len(),
            ..Default::default()
        };

        let total = accepted.len();
        for (idx, artist) in accepted.iter().enumerate() {
            self.advance(PipelineState::Resolving)?;
            stage!(Stage::Process, "[{}/{}] {}", idx + 1, total, artist);

            let resolved = self.resolver.resolve(artist).await;
            summary.artists_processed += 1;

            let outcome = if resolved.identity.is_none() {
                stage!(Stage::Skip, "Skipping {}: no MBID found", artist);
                ResolutionOutcome::NoIdentity
            } else if resolved.albums.is_empty() {
                stage!(Stage::Skip, "Skipping {}: no albums found", artist);
                ResolutionOutcome::NoAlbums
            } else {
                self.advance(PipelineState::Writing)?;
                for album in &resolved.albums {
                    let entry = writer.write_entry(artist, album)?;
                    stage!(Stage::Write, "✓ {}", entry);
                }
                ResolutionOutcome::Written(resolved.albums.len())
            };

            summary.resolutions.push(ArtistResolution {
                artist: artist.clone(),
                outcome,
            });
        }

        self.advance(PipelineState::Done)?;
        summary.entries_written = writer.written();
        stage!(
            Stage::Done,
            "Processed {} artists, wrote {} entries.",
            summary.artists_processed,
            summary.entries_written
        );

        Ok(summary)
    }
}
