use crate::{
    musicbrainz::MetadataCatalog,
    stage,
    types::{ArtistCandidate, Stage},
};

/// Lower-case title fragments that mark a release group as something other
/// than a studio album.
pub const SKIP_KEYWORDS: &[&str] = &[
    "compilation",
    "greatest hits",
    "anthology",
    "essentials",
    "live",
    "remix",
    "remixes",
    "versions",
    "rarities",
    "b-sides",
    "instrumental",
    "compilations",
    "essential",
];

/// Release groups requested per catalog call.
pub const RELEASE_GROUP_PAGE_SIZE: u32 = 100;

/// Result of resolving one artist.
#[derive(Debug, Clone, Default)]
pub struct Resolved {
    pub identity: Option<ArtistCandidate>,
    pub albums: Vec<String>,
}

/// Returns whether a release group title counts as a studio album.
///
/// A title qualifies when it is not blank and none of `keywords` occurs in it,
/// compared case-insensitively.
pub fn is_studio_title(title: &str, keywords: &[&str]) -> bool {
    let title = title.trim();
    if title.is_empty() {
        return false;
    }

    let lowered = title.to_lowercase();
    !keywords.iter().any(|k| lowered.contains(&k.to_lowercase()))
}

/// Looks up accepted artists in a metadata catalog.
///
/// Holds no state across artists. Catalog failures are logged and turned into
/// an empty result, they never abort the run.
pub struct MetadataResolver<M: MetadataCatalog> {
    catalog: M,
    skip_keywords: Vec<&'static str>,
}

impl<M: MetadataCatalog> MetadataResolver<M> {
    pub fn new(catalog: M) -> Self {
        Self {
            catalog,
            skip_keywords: SKIP_KEYWORDS.to_vec(),
        }
    }

    pub fn catalog(&self) -> &M {
        &self.catalog
    }

    /// Resolves the identity of `artist` and, if found, its studio albums.
    pub async fn resolve(&self, artist: &str) -> Resolved {
        let Some(identity) = self.resolve_identity(artist).await else {
            return Resolved::default();
        };

        let albums = self.resolve_albums(artist, &identity.id).await;
        Resolved {
            identity: Some(identity),
            albums,
        }
    }

    /// Picks the best ranked catalog match for `artist`.
    pub async fn resolve_identity(&self, artist: &str) -> Option<ArtistCandidate> {
        stage!(Stage::Mbid, "Looking up MBID for: {}", artist);

        match self.catalog.search_artist(artist).await {
            Ok(candidates) => match candidates.into_iter().next() {
                Some(best) => {
                    let score = best
                        .score
                        .map_or_else(|| "N/A".to_string(), |s| s.to_string());
                    stage!(
                        Stage::Mbid,
                        "✓ Found: {} → {} (score: {})",
                        best.name,
                        best.id,
                        score
                    );
                    Some(best)
                }
                None => {
                    stage!(Stage::Mbid, "✗ No results found");
                    None
                }
            },
            Err(e) => {
                stage!(Stage::Error, "MBID lookup failed for {}: {}", artist, e);
                None
            }
        }
    }

    /// Lists the studio albums of the artist with MBID `artist_id` in catalog
    /// order, following every page of release groups.
    ///
    /// Spends one rate limit interval per retained album. A failure on a later
    /// page keeps the albums retained so far.
    pub async fn resolve_albums(&self, artist: &str, artist_id: &str) -> Vec<String> {
        stage!(Stage::Albums, "Fetching albums for: {}", artist);

        let mut albums = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let page = match self
                .catalog
                .release_groups(artist_id, offset, RELEASE_GROUP_PAGE_SIZE)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    stage!(Stage::Error, "Album fetch failed for {}: {}", artist, e);
                    return albums;
                }
            };

            if offset == 0 {
                stage!(Stage::Albums, "✓ Found {} release groups", page.total);
            }

            let fetched = page.release_groups.len() as u64;
            for release_group in page.release_groups {
                let title = release_group.title.trim();
                if title.is_empty() {
                    continue;
                }

                if !is_studio_title(title, &self.skip_keywords) {
                    stage!(Stage::Skip, "✗ Skipping album: {}", title);
                    continue;
                }

                albums.push(title.to_string());
                stage!(Stage::Album, "→ {}", title);
                self.catalog.pace().await;
            }

            offset += fetched;
            if fetched == 0 || offset >= page.total {
                return albums;
            }
        }
    }
}
