/*!
 * Tests for subtitle fetcher implementations
 */

use std::path::Path;
use ytfrag::app_config::FetcherConfig;
use ytfrag::errors::FetchError;
use ytfrag::fetcher::{MockFetcher, SubtitleFetcher, SubtitleRequest, TrackKind, YtDlpFetcher};
use ytfrag::identifier::VideoId;
use crate::common::VIDEO_ID;

fn request(language: &str, kind: TrackKind) -> SubtitleRequest {
    SubtitleRequest {
        video_id: VideoId::parse(VIDEO_ID).unwrap(),
        language: language.to_string(),
        kind,
    }
}

#[test]
fn test_build_args_withManualTrack_shouldRequestWrittenSubs() {
    let fetcher = YtDlpFetcher::new();
    let args = fetcher.build_args(&request("en", TrackKind::Manual), Path::new("/tmp/out"));

    assert_eq!(
        args,
        vec![
            "--skip-download",
            "--write-sub",
            "--sub-format",
            "vtt",
            "--sub-lang",
            "en",
            "-o",
            "/tmp/out/%(id)s.%(ext)s",
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        ]
    );
}

#[test]
fn test_build_args_withAutomaticTrackAndExtraArgs_shouldPlaceExtrasBeforeUrl() {
    let config = FetcherConfig {
        extra_args: vec!["--cookies".to_string(), "cookies.txt".to_string()],
        ..FetcherConfig::default()
    };
    let fetcher = YtDlpFetcher::from_config(&config);
    let args = fetcher.build_args(&request("es", TrackKind::Automatic), Path::new("/tmp/out"));

    assert!(args.contains(&"--write-auto-sub".to_string()));
    assert!(!args.contains(&"--write-sub".to_string()));
    let lang_pos = args.iter().position(|a| a == "--sub-lang").unwrap();
    assert_eq!(args[lang_pos + 1], "es");
    assert_eq!(&args[args.len() - 3..args.len() - 1], ["--cookies", "cookies.txt"]);
    assert_eq!(args.last().unwrap(), "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
}

#[test]
fn test_classify_failure_withPrivateVideo_shouldBeUnavailable() {
    let stderr = "[youtube] Extracting URL\nERROR: [youtube] dQw4w9WgXcQ: Private video. Sign in if you've been granted access";
    match YtDlpFetcher::classify_failure(stderr) {
        FetchError::VideoUnavailable(message) => {
            assert!(message.starts_with("ERROR:"));
            assert!(!message.contains("Extracting URL"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    assert!(matches!(
        YtDlpFetcher::classify_failure("ERROR: [youtube] x: Video unavailable. This video has been removed by the uploader"),
        FetchError::VideoUnavailable(_)
    ));
}

#[test]
fn test_classify_failure_withNetworkError_shouldBeBackend() {
    let stderr = "ERROR: Unable to download webpage: <urlopen error [Errno -3] Temporary failure in name resolution>";
    assert!(matches!(YtDlpFetcher::classify_failure(stderr), FetchError::Backend(_)));
}

#[tokio::test]
async fn test_mock_fetcher_automaticOnly_shouldOnlyServeAutomatic() {
    let fetcher = MockFetcher::automatic_only();

    assert!(matches!(fetcher.fetch(&request("en", TrackKind::Manual)).await, Err(FetchError::NotFound)));

    let payload = fetcher.fetch(&request("en", TrackKind::Automatic)).await.unwrap();
    assert_eq!(payload.kind, TrackKind::Automatic);
    assert_eq!(payload.format, "vtt");
    assert!(payload.content.starts_with("WEBVTT"));
    assert_eq!(fetcher.request_count(), 2);
}

#[tokio::test]
async fn test_mock_fetcher_clones_shouldShareRequestLog() {
    let fetcher = MockFetcher::manual();
    let clone = fetcher.clone();

    clone.fetch(&request("de", TrackKind::Manual)).await.unwrap();

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].language, "de");
}

#[test]
fn test_mock_fetcher_customPayload_shouldBeReturned() {
    let fetcher = MockFetcher::manual().with_custom_payload(|req| format!("WEBVTT\n\n00:00.000 --> 00:01.000\n{}", req.language));
    let payload = tokio_test::block_on(fetcher.fetch(&request("it", TrackKind::Manual))).unwrap();
    assert!(payload.content.ends_with("it"));
}

#[test]
fn test_mock_fetcher_failureModes_shouldReturnMatchingErrors() {
    let unavailable = tokio_test::block_on(MockFetcher::unavailable().fetch(&request("en", TrackKind::Manual)));
    assert!(matches!(unavailable, Err(FetchError::VideoUnavailable(_))));

    let failing = tokio_test::block_on(MockFetcher::failing().fetch(&request("en", TrackKind::Manual)));
    assert!(matches!(failing, Err(FetchError::Backend(_))));

    let none = tokio_test::block_on(MockFetcher::no_subtitles().fetch(&request("en", TrackKind::Automatic)));
    assert!(matches!(none, Err(FetchError::NotFound)));
}

#[test]
fn test_track_kind_preference_shouldTryManualFirst() {
    assert_eq!(TrackKind::PREFERENCE, [TrackKind::Manual, TrackKind::Automatic]);
    assert_eq!(TrackKind::Automatic.to_string(), "auto-generated");
}
