use bytes::Bytes;
use mockito::Matcher;

use music_id::{Recognition, RecognitionError, RecognizedTrack, RecognizerClient};

fn sample_audio() -> Bytes {
    Bytes::from_static(b"fake-ogg-voice-payload")
}

#[tokio::test]
async fn full_response_maps_to_track() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "status": "success",
                "result": {
                    "artist": "Daft Punk",
                    "title": "Harder, Better, Faster, Stronger",
                    "album": "Discovery",
                    "apple_music": {"url": "https://music.apple.com/track/1"},
                    "spotify": {"external_urls": {"spotify": "https://open.spotify.com/track/1"}}
                }
            }"#,
        )
        .create_async()
        .await;

    let client = RecognizerClient::with_endpoint(server.url());
    let recognition = client.recognize("token", sample_audio()).await.unwrap();

    let track = match recognition {
        Recognition::Match(track) => track,
        other => panic!("expected a match, got {:?}", other),
    };
    assert_eq!(track.artist, "Daft Punk");
    assert_eq!(track.title, "Harder, Better, Faster, Stronger");
    assert_eq!(track.album.as_deref(), Some("Discovery"));
    assert_eq!(
        track.apple_music_url.as_deref(),
        Some("https://music.apple.com/track/1")
    );
    assert_eq!(
        track.spotify_url.as_deref(),
        Some("https://open.spotify.com/track/1")
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn request_carries_token_method_and_mp3_file() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="api_token""#.to_string()),
            Matcher::Regex(r#"name="return""#.to_string()),
            Matcher::Regex("apple_music,spotify".to_string()),
            Matcher::Regex(r#"name="method""#.to_string()),
            Matcher::Regex("recognize".to_string()),
            Matcher::Regex(r#"filename="audio.mp3""#.to_string()),
            Matcher::Regex("audio/mpeg".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "success", "result": null}"#)
        .create_async()
        .await;

    let client = RecognizerClient::with_endpoint(server.url());
    let recognition = client.recognize("token", sample_audio()).await.unwrap();

    assert_eq!(recognition, Recognition::NoMatch);
    mock.assert_async().await;
}

#[tokio::test]
async fn null_result_is_no_match() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "success", "result": null}"#)
        .create_async()
        .await;

    let client = RecognizerClient::with_endpoint(server.url());
    let recognition = client.recognize("token", sample_audio()).await.unwrap();

    assert_eq!(recognition, Recognition::NoMatch);
}

#[tokio::test]
async fn missing_fields_fall_back_to_unknowns() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "success", "result": {"album": ""}}"#)
        .create_async()
        .await;

    let client = RecognizerClient::with_endpoint(server.url());
    let recognition = client.recognize("token", sample_audio()).await.unwrap();

    let track = match recognition {
        Recognition::Match(track) => track,
        other => panic!("expected a match, got {:?}", other),
    };
    assert_eq!(track.artist, "Unknown Artist");
    assert_eq!(track.title, "Unknown Title");
    // An empty album string upstream must not produce an album line.
    assert_eq!(track.album, None);
    assert_eq!(track.apple_music_url, None);
    assert_eq!(track.spotify_url, None);
}

#[tokio::test]
async fn service_error_status_is_typed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "error", "result": null}"#)
        .create_async()
        .await;

    let client = RecognizerClient::with_endpoint(server.url());
    let err = client
        .recognize("token", sample_audio())
        .await
        .expect_err("service error must not map to a recognition");

    assert!(matches!(err, RecognitionError::Service(status) if status == "error"));
}

#[tokio::test]
async fn malformed_body_is_an_http_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("not json at all")
        .create_async()
        .await;

    let client = RecognizerClient::with_endpoint(server.url());
    let err = client
        .recognize("token", sample_audio())
        .await
        .expect_err("parse failure must surface as an error");

    assert!(matches!(err, RecognitionError::Http(_)));
}

#[tokio::test]
async fn endpoint_failure_is_typed() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(502)
        .with_body("bad gateway")
        .create_async()
        .await;

    let client = RecognizerClient::with_endpoint(server.url());
    let err = client
        .recognize("token", sample_audio())
        .await
        .expect_err("HTTP failure must surface as an error");

    assert!(matches!(err, RecognitionError::Endpoint(status) if status.as_u16() == 502));
}

#[tokio::test]
async fn empty_token_skips_the_network_entirely() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .expect(0)
        .create_async()
        .await;

    let client = RecognizerClient::with_endpoint(server.url());
    let err = client
        .recognize("", sample_audio())
        .await
        .expect_err("missing token must short-circuit");

    assert!(matches!(err, RecognitionError::NoApiKey));
    mock.assert_async().await;
}

#[test]
fn summary_includes_only_present_fields() {
    let full = RecognizedTrack {
        artist: "A".to_string(),
        title: "T".to_string(),
        album: Some("L".to_string()),
        apple_music_url: Some("https://apple.example/t".to_string()),
        spotify_url: Some("https://spotify.example/t".to_string()),
    };
    assert_eq!(
        full.summary(),
        "🎵 A - T\n💿 Album: L\n🍎 Apple Music: https://apple.example/t\n🟢 Spotify: https://spotify.example/t"
    );

    let bare = RecognizedTrack {
        artist: "A".to_string(),
        title: "T".to_string(),
        album: None,
        apple_music_url: None,
        spotify_url: None,
    };
    assert_eq!(bare.summary(), "🎵 A - T");
}
