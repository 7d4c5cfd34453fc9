use super::*;
use std::fs;

const FEED: &str = "process,action,resource\nP1,hold,R1\n";

fn memory_session(feeds: MemoryFeedProvider) -> CommandSession<MemoryFeedProvider> {
    let config = AppConfig {
        input_dir: PathBuf::from("cases"),
        ..AppConfig::default()
    };
    CommandSession::with_providers(config, Display::plain(), feeds)
}

#[test]
fn test_feed_path_as_given_when_present() {
    let session = memory_session(MemoryFeedProvider::new().with_feed("local.csv", FEED));
    assert_eq!(
        session.resolve_feed_path(Path::new("local.csv")),
        PathBuf::from("local.csv")
    );
}

#[test]
fn test_feed_path_falls_back_to_input_dir() {
    let session = memory_session(MemoryFeedProvider::new().with_feed("cases/cycle.csv", FEED));
    assert_eq!(
        session.resolve_feed_path(Path::new("cycle.csv")),
        PathBuf::from("cases/cycle.csv")
    );
}

#[test]
fn test_unknown_feed_path_is_returned_unchanged() {
    let session = memory_session(MemoryFeedProvider::new());
    assert_eq!(
        session.resolve_feed_path(Path::new("missing.csv")),
        PathBuf::from("missing.csv")
    );
}

#[test]
fn test_memory_provider_loads_and_lists() {
    let feeds = MemoryFeedProvider::new()
        .with_feed("cases/b.csv", FEED)
        .with_feed("cases/a.CSV", FEED)
        .with_feed("cases/notes.txt", "ignored")
        .with_feed("other/c.csv", FEED);

    assert_eq!(
        feeds.list(Path::new("cases")).unwrap(),
        vec![PathBuf::from("cases/a.CSV"), PathBuf::from("cases/b.csv")]
    );
    assert_eq!(feeds.load(Path::new("cases/b.csv")).unwrap().len(), 1);
    assert!(matches!(
        feeds.load(Path::new("cases/none.csv")),
        Err(FeedError::Io { .. })
    ));
}

#[test]
fn test_live_provider_lists_sorted_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("zeta.csv"), FEED).unwrap();
    fs::write(dir.path().join("alpha.csv"), FEED).unwrap();
    fs::write(dir.path().join("readme.md"), "# cases").unwrap();
    fs::create_dir(dir.path().join("nested.csv")).unwrap();

    let cases = LiveFeedProvider.list(dir.path()).unwrap();
    let names: Vec<_> = cases
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(names, vec!["alpha.csv", "zeta.csv"]);
}

#[test]
fn test_live_provider_missing_dir_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(LiveFeedProvider.list(&dir.path().join("absent")).is_err());
}

#[test]
fn test_session_exposes_config() {
    let session = memory_session(MemoryFeedProvider::new());
    assert_eq!(session.config().input_dir, PathBuf::from("cases"));
    assert!(!session.display().styling().color_enabled());
}
