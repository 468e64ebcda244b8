mod common;

use common::FakeCatalog;
use spotsldl::pipeline::{MetadataResolver, SKIP_KEYWORDS, is_studio_title};

#[test]
fn test_is_studio_title_keyword_scenarios() {
    assert!(!is_studio_title("Greatest Hits (Live)", SKIP_KEYWORDS));
    assert!(is_studio_title("In Rainbows", SKIP_KEYWORDS));
    assert!(is_studio_title("OK Computer", SKIP_KEYWORDS));
}

#[test]
fn test_is_studio_title_is_case_insensitive() {
    assert!(!is_studio_title("LIVE AT THE BBC", SKIP_KEYWORDS));
    assert!(!is_studio_title("The Remixes", SKIP_KEYWORDS));
    assert!(!is_studio_title("B-Sides & Rarities", SKIP_KEYWORDS));
    assert!(!is_studio_title("Instrumentals Vol. 2", SKIP_KEYWORDS));
    assert!(!is_studio_title("The Essential Collection", SKIP_KEYWORDS));
}

#[test]
fn test_is_studio_title_matches_substrings() {
    // Plain substring match, word boundaries are not considered
    assert!(!is_studio_title("Alive", SKIP_KEYWORDS));
    assert!(!is_studio_title("Delivery", SKIP_KEYWORDS));
}

#[test]
fn test_is_studio_title_rejects_blank() {
    assert!(!is_studio_title("", SKIP_KEYWORDS));
    assert!(!is_studio_title("   \t", SKIP_KEYWORDS));
}

#[test]
fn test_is_studio_title_invariant() {
    let titles = [
        "Kid A",
        "Amnesiac",
        "I Might Be Wrong: Live Recordings",
        "TKOL RMX 1234567",
        "Hail to the Thief",
        "Versions",
        "Anthology 1",
        " ",
        "compilation",
        "Pablo Honey",
    ];

    for title in titles {
        let lowered = title.to_lowercase();
        let expected =
            !title.trim().is_empty() && !SKIP_KEYWORDS.iter().any(|k| lowered.contains(k));
        assert_eq!(is_studio_title(title, SKIP_KEYWORDS), expected, "{}", title);
    }
}

#[tokio::test]
async fn test_resolve_skips_artist_without_candidates() {
    let resolver = MetadataResolver::new(FakeCatalog::new());

    let resolved = resolver.resolve("Various").await;

    assert!(resolved.identity.is_none());
    assert!(resolved.albums.is_empty());
    // No release lookup without an identity
    assert_eq!(resolver.catalog().calls(), vec!["search:Various"]);
}

#[tokio::test]
async fn test_resolve_picks_first_ranked_candidate() {
    let catalog = FakeCatalog::new()
        .with_artist("Radiohead", "a74b1b7f", 100)
        .with_artist("Radiohead", "ffffffff", 80)
        .with_albums("a74b1b7f", &["OK Computer"])
        .with_albums("ffffffff", &["Wrong Album"]);
    let resolver = MetadataResolver::new(catalog);

    let resolved = resolver.resolve("Radiohead").await;

    let identity = resolved.identity.unwrap();
    assert_eq!(identity.id, "a74b1b7f");
    assert_eq!(identity.score, Some(100));
    assert_eq!(resolved.albums, vec!["OK Computer"]);
}

#[tokio::test]
async fn test_resolve_search_failure_is_not_fatal() {
    let catalog = FakeCatalog::new().failing_search("Radiohead");
    let resolver = MetadataResolver::new(catalog);

    let resolved = resolver.resolve("Radiohead").await;

    assert!(resolved.identity.is_none());
    assert!(resolved.albums.is_empty());
}

#[tokio::test]
async fn test_resolve_albums_filters_and_keeps_order() {
    let catalog = FakeCatalog::new()
        .with_artist("Radiohead", "rh", 100)
        .with_albums(
            "rh",
            &[
                "Pablo Honey",
                "Greatest Hits (Live)",
                "  ",
                "The Bends",
                "TKOL RMX 1234567",
                "  In Rainbows  ",
                "Radiohead: The Best Of... Compilation",
            ],
        );
    let resolver = MetadataResolver::new(catalog);

    let resolved = resolver.resolve("Radiohead").await;

    assert_eq!(
        resolved.albums,
        vec!["Pablo Honey", "The Bends", "TKOL RMX 1234567", "In Rainbows"]
    );
}

#[tokio::test]
async fn test_resolve_paces_once_per_retained_album() {
    let catalog = FakeCatalog::new()
        .with_artist("Portishead", "ph", 100)
        .with_albums("ph", &["Dummy", "Portishead", "Roseland NYC Live", "Third"]);
    let resolver = MetadataResolver::new(catalog);

    let resolved = resolver.resolve("Portishead").await;

    assert_eq!(resolved.albums.len(), 3);
    assert_eq!(resolver.catalog().paces(), 3);
}

#[tokio::test]
async fn test_resolve_follows_all_release_group_pages() {
    let titles: Vec<String> = (1..=150).map(|i| format!("Album {}", i)).collect();
    let title_refs: Vec<&str> = titles.iter().map(|t| t.as_str()).collect();
    let catalog = FakeCatalog::new()
        .with_artist("Prolific", "pr", 100)
        .with_albums("pr", &title_refs);
    let resolver = MetadataResolver::new(catalog);

    let resolved = resolver.resolve("Prolific").await;

    assert_eq!(resolved.albums.len(), 150);
    assert_eq!(resolved.albums.first().unwrap(), "Album 1");
    assert_eq!(resolved.albums.last().unwrap(), "Album 150");
    assert_eq!(
        resolver.catalog().calls(),
        vec![
            "search:Prolific",
            "release-groups:pr@0",
            "release-groups:pr@100"
        ]
    );
}

#[tokio::test]
async fn test_resolve_keeps_albums_when_later_page_fails() {
    let titles: Vec<String> = (1..=120).map(|i| format!("Album {}", i)).collect();
    let title_refs: Vec<&str> = titles.iter().map(|t| t.as_str()).collect();
    let catalog = FakeCatalog::new()
        .with_artist("Prolific", "pr", 100)
        .with_albums("pr", &title_refs)
        .failing_release_page("pr", 100);
    let resolver = MetadataResolver::new(catalog);

    let resolved = resolver.resolve("Prolific").await;

    assert!(resolved.identity.is_some());
    assert_eq!(resolved.albums.len(), 100);
}

#[tokio::test]
async fn test_resolve_release_failure_yields_no_albums() {
    let catalog = FakeCatalog::new()
        .with_artist("Radiohead", "rh", 100)
        .with_albums("rh", &["OK Computer"])
        .failing_release_page("rh", 0);
    let resolver = MetadataResolver::new(catalog);

    let resolved = resolver.resolve("Radiohead").await;

    assert!(resolved.identity.is_some());
    assert!(resolved.albums.is_empty());
    assert_eq!(resolver.catalog().paces(), 0);
}
