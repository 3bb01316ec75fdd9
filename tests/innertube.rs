use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use url::Url;
use ytmusic::{
    http::{Downloader, Request, Response},
    protocol::innertube::endpoint::WatchEndpoint,
    Config, ErrorKind, InnerTube, PlayerEngine, Result, StreamResolver,
};

/// Answers each InnerTube endpoint with a canned body and records requests.
#[derive(Default)]
struct CannedDownloader {
    responses: HashMap<String, (u16, Value)>,
    requests: Mutex<Vec<Request>>,
}

impl CannedDownloader {
    fn with(mut self, endpoint: &str, status: u16, body: Value) -> Self {
        self.responses
            .insert(format!("/youtubei/v1/{endpoint}"), (status, body));
        self
    }

    fn last_request(&self) -> Request {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }

    fn last_body(&self) -> Value {
        serde_json::from_slice(self.last_request().body.as_deref().unwrap()).unwrap()
    }
}

#[async_trait]
impl Downloader for CannedDownloader {
    async fn execute(&self, request: Request) -> Result<Response> {
        let (status, body) = self
            .responses
            .get(request.url.path())
            .cloned()
            .unwrap_or((404, Value::Null));
        let final_url = request.url.clone();
        self.requests.lock().unwrap().push(request);

        Ok(Response {
            status: StatusCode::from_u16(status).unwrap(),
            headers: BTreeMap::new(),
            body: body.to_string(),
            final_url,
        })
    }
}

struct StubEngine;

#[async_trait]
impl PlayerEngine for StubEngine {
    async fn signature_timestamp(&self, _video_id: &str) -> Result<u32> {
        Ok(20_000)
    }

    async fn decipher_signature(&self, _video_id: &str, s: &str) -> Result<String> {
        Ok(s.chars().rev().collect())
    }

    async fn deobfuscate_throttling(&self, _video_id: &str, n: &str) -> Result<String> {
        Ok(n.to_uppercase())
    }
}

fn thumbnail() -> Value {
    json!({ "musicThumbnailRenderer": {
        "thumbnail": { "thumbnails": [{ "url": "https://lh3/1" }] }
    } })
}

fn row(video_id: &str) -> Value {
    json!({ "musicResponsiveListItemRenderer": {
        "thumbnail": thumbnail(),
        "flexColumns": [
            { "musicResponsiveListItemFlexColumnRenderer": {
                "text": { "runs": [{ "text": video_id }] }
            } }
        ],
        "playlistItemData": { "videoId": video_id }
    } })
}

fn home() -> Value {
    json!({
        "contents": { "singleColumnBrowseResultsRenderer": { "tabs": [{ "tabRenderer": {
            "content": { "sectionListRenderer": {
                "contents": [{ "musicCarouselShelfRenderer": {
                    "header": { "musicCarouselShelfBasicHeaderRenderer": {
                        "title": { "runs": [{ "text": "Quick picks" }] }
                    } },
                    "contents": [row("v1"), row("v2")]
                } }],
                "continuations": [{ "nextContinuationData": { "continuation": "home2" } }]
            } }
        } }] } }
    })
}

fn client(downloader: CannedDownloader) -> InnerTube<CannedDownloader> {
    let config = Config {
        visitor_data: Some("visitor".to_owned()),
        ..Config::default()
    };
    InnerTube::with_downloader(downloader, config)
}

#[tokio::test]
async fn home_request_carries_client_context() {
    let innertube = client(CannedDownloader::default().with("browse", 200, home()));

    let page = innertube.home().await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].title, "Quick picks");
    assert_eq!(page.items[0].items.len(), 2);
    assert_eq!(page.continuation.as_deref(), Some("home2"));

    let request = innertube.downloader().last_request();
    assert_eq!(request.method, "POST");
    assert_eq!(request.url.query(), Some("prettyPrint=false"));
    assert_eq!(request.headers["x-youtube-client-name"], "67");
    assert_eq!(request.headers["x-goog-visitor-id"], "visitor");
    assert_eq!(request.headers["content-type"], "application/json");

    let body = innertube.downloader().last_body();
    assert_eq!(body["browseId"], "FEmusic_home");
    assert_eq!(body["context"]["client"]["clientName"], "WEB_REMIX");
    assert_eq!(body["context"]["client"]["visitorData"], "visitor");
}

#[tokio::test]
async fn browse_continuation_goes_in_query() {
    let continuation = json!({
        "continuationContents": { "sectionListContinuation": {
            "contents": [{ "musicCarouselShelfRenderer": {
                "header": { "musicCarouselShelfBasicHeaderRenderer": {
                    "title": { "runs": [{ "text": "More" }] }
                } },
                "contents": [row("v3")]
            } }]
        } }
    });
    let innertube = client(CannedDownloader::default().with("browse", 200, continuation));

    let page = innertube.home_continuation("a%3D=b").await.unwrap();
    assert_eq!(page.items[0].title, "More");
    assert!(!page.has_more());

    let url: Url = innertube.downloader().last_request().url;
    let query: HashMap<_, _> = url.query_pairs().into_owned().collect();
    assert_eq!(query["ctoken"], "a%3D=b");
    assert_eq!(query["continuation"], "a%3D=b");
    assert_eq!(query["type"], "next");
}

#[tokio::test]
async fn playlist_id_gets_browse_prefix() {
    let response = json!({
        "contents": { "singleColumnBrowseResultsRenderer": { "tabs": [{ "tabRenderer": {
            "content": { "sectionListRenderer": { "contents": [
                { "musicPlaylistShelfRenderer": { "playlistId": "PL1", "contents": [row("v1")] } }
            ] } }
        } }] } },
        "header": { "musicDetailHeaderRenderer": {
            "title": { "runs": [{ "text": "Playlist" }] },
            "thumbnail": { "croppedSquareThumbnailRenderer": {
                "thumbnail": { "thumbnails": [{ "url": "https://lh3/p" }] }
            } }
        } }
    });
    let innertube = client(CannedDownloader::default().with("browse", 200, response));

    let page = innertube.playlist("PL1").await.unwrap();
    assert_eq!(page.playlist.id, "PL1");
    assert_eq!(innertube.downloader().last_body()["browseId"], "VLPL1");

    innertube.playlist("VLPL1").await.unwrap();
    assert_eq!(innertube.downloader().last_body()["browseId"], "VLPL1");
}

#[tokio::test]
async fn missing_page_is_not_found() {
    let innertube = client(CannedDownloader::default().with("browse", 200, json!({})));

    let err = innertube.album("MPREb_1").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn http_statuses_map_to_errors() {
    let innertube = client(
        CannedDownloader::default()
            .with("search", 503, Value::Null)
            .with("next", 403, Value::Null),
    );

    let err = innertube.search("query", None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unavailable);
    assert!(err.is_transient());

    let err = innertube.next(&WatchEndpoint::default()).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::PermissionDenied);
}

#[tokio::test]
async fn next_continuation_goes_in_body() {
    let response = json!({
        "continuationContents": { "playlistPanelContinuation": {
            "contents": [{ "playlistPanelVideoRenderer": {
                "videoId": "v9",
                "title": { "runs": [{ "text": "Nine" }] },
                "thumbnail": { "thumbnails": [{ "url": "https://i.ytimg/9" }] }
            } }]
        } }
    });
    let innertube = client(CannedDownloader::default().with("next", 200, response));
    let endpoint = WatchEndpoint {
        video_id: Some("v1".to_owned()),
        playlist_id: Some("RDAMVMv1".to_owned()),
        ..WatchEndpoint::default()
    };

    let next = innertube.next_continuation(&endpoint, "radio2").await.unwrap();
    assert_eq!(next.items[0].id, "v9");

    let body = innertube.downloader().last_body();
    assert_eq!(body["continuation"], "radio2");
    assert_eq!(body["videoId"], "v1");
    assert_eq!(body["playlistId"], "RDAMVMv1");
}

#[tokio::test]
async fn stream_url_resolves_best_audio() {
    let player = json!({
        "playabilityStatus": { "status": "OK" },
        "streamingData": { "adaptiveFormats": [
            { "itag": 140, "mimeType": "audio/mp4; codecs=\"mp4a.40.2\"", "bitrate": 130_000,
              "url": "https://rr1/140" },
            { "itag": 251, "mimeType": "audio/webm; codecs=\"opus\"", "bitrate": 160_000,
              "signatureCipher": "s=cba&sp=sig&url=https%3A%2F%2Frr1%2Fvideoplayback%3Fn%3Dabc" }
        ] }
    });
    let innertube = client(CannedDownloader::default().with("player", 200, player));
    let resolver = StreamResolver::new(Arc::new(StubEngine));

    let url = innertube.stream_url("v1", &resolver).await.unwrap();
    let query: HashMap<_, _> = url.query_pairs().into_owned().collect();
    assert_eq!(query["sig"], "abc");
    assert_eq!(query["n"], "ABC");

    let body = innertube.downloader().last_body();
    assert_eq!(
        body["playbackContext"]["contentPlaybackContext"]["signatureTimestamp"],
        20_000
    );
}

#[tokio::test]
async fn unplayable_video_is_an_error() {
    let player = json!({
        "playabilityStatus": { "status": "LOGIN_REQUIRED", "reason": "Sign in to confirm your age" }
    });
    let innertube = client(CannedDownloader::default().with("player", 200, player));
    let resolver = StreamResolver::new(Arc::new(StubEngine));

    let err = innertube.stream_url("v1", &resolver).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);
}
