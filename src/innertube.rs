//! InnerTube request client.
//!
//! Issues `browse`, `search`, `next` and `player` requests on behalf of the
//! configured web client and decodes the responses into the wire model.
//! The page methods ([`InnerTube::home`], [`InnerTube::album`], ...) go one
//! step further and assemble the domain pages.
//!
//! # Request Format
//!
//! Every request is a `POST` with a JSON body carrying the client context:
//!
//! ```json
//! {
//!     "context": {
//!         "client": {
//!             "clientName": "WEB_REMIX",
//!             "clientVersion": "1.20241127.01.00",
//!             "hl": "en",
//!             "gl": "US"
//!         }
//!     },
//!     "browseId": "FEmusic_home"
//! }
//! ```
//!
//! Browse continuations are passed as query parameters, search and next
//! continuations in the body. Continuation tokens are sent back exactly as
//! received.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use url::Url;

use crate::{
    config::Config,
    error::{Error, Result},
    http::{self, Downloader, Request},
    item::SongItem,
    page::{AlbumPage, ArtistPage, HomePage, NextResult, Page, PlaylistPage, SearchResult},
    protocol::{
        self,
        innertube::{
            endpoint::WatchEndpoint,
            player::PlayerResponse,
            response::{BrowseResponse, NextResponse, SearchResponse},
        },
    },
    stream::StreamResolver,
};

/// Client for the InnerTube API, generic over the downloader performing the
/// HTTP requests.
pub struct InnerTube<D = http::Client> {
    downloader: D,
    config: Config,
}

impl InnerTube<http::Client> {
    /// Creates a client that performs requests with [`http::Client`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let downloader = http::Client::new(&config)?;
        Ok(Self { downloader, config })
    }
}

impl<D: Downloader> InnerTube<D> {
    const BASE_URL: &'static str = "https://music.youtube.com/youtubei/v1/";
    const ORIGIN: &'static str = "https://music.youtube.com";

    /// Browse id of the home feed.
    const HOME: &'static str = "FEmusic_home";

    /// Prefix turning a playlist id into a browse id.
    const PLAYLIST_PREFIX: &'static str = "VL";

    #[must_use]
    pub fn with_downloader(downloader: D, config: Config) -> Self {
        Self { downloader, config }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    /// The `context` object identifying the client.
    fn context(&self) -> Value {
        let mut client = json!({
            "clientName": self.config.client_name,
            "clientVersion": self.config.client_version,
            "hl": self.config.hl,
            "gl": self.config.gl,
        });
        if let Some(visitor_data) = &self.config.visitor_data {
            client["visitorData"] = Value::from(visitor_data.as_str());
        }
        json!({ "client": client })
    }

    /// POSTs `body`, extended with the client context, to `endpoint`.
    async fn post<T>(&self, endpoint: &str, query: &[(&str, &str)], body: Value) -> Result<T>
    where
        T: for<'de> Deserialize<'de> + std::fmt::Debug,
    {
        let mut url = Url::parse(Self::BASE_URL)?.join(endpoint)?;
        url.query_pairs_mut()
            .append_pair("prettyPrint", "false")
            .extend_pairs(query);

        let mut payload = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        payload.insert("context".to_owned(), self.context());
        let payload = serde_json::to_vec(&payload)?;

        let mut request = Request::post(url, payload)
            .header("Content-Type", "application/json")?
            .header("X-YouTube-Client-Name", &self.config.client_id.to_string())?
            .header("X-YouTube-Client-Version", &self.config.client_version)?
            .header("X-Origin", Self::ORIGIN)?
            .header("Referer", &format!("{}/", Self::ORIGIN))?;
        if let Some(visitor_data) = &self.config.visitor_data {
            request = request.header("X-Goog-Visitor-Id", visitor_data)?;
        }

        let response = self.downloader.execute(request).await?;
        check_status(response.status, endpoint)?;
        protocol::json(&response.body, endpoint)
    }

    /// Raw `browse` request for `browse_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response doesn't decode.
    pub async fn browse(&self, browse_id: &str, params: Option<&str>) -> Result<BrowseResponse> {
        let mut body = json!({ "browseId": browse_id });
        if let Some(params) = params {
            body["params"] = Value::from(params);
        }
        self.post("browse", &[], body).await
    }

    /// Raw `browse` request for the page after `continuation`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response doesn't decode.
    pub async fn browse_continuation(&self, continuation: &str) -> Result<BrowseResponse> {
        let query = [
            ("ctoken", continuation),
            ("continuation", continuation),
            ("type", "next"),
        ];
        self.post("browse", &query, json!({})).await
    }

    /// Raw `search` request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response doesn't decode.
    pub async fn search_request(
        &self,
        query: &str,
        params: Option<&str>,
    ) -> Result<SearchResponse> {
        let mut body = json!({ "query": query });
        if let Some(params) = params {
            body["params"] = Value::from(params);
        }
        self.post("search", &[], body).await
    }

    /// Raw `next` request for the queue of `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response doesn't decode.
    pub async fn next_request(
        &self,
        endpoint: &WatchEndpoint,
        continuation: Option<&str>,
    ) -> Result<NextResponse> {
        let mut body = json!({
            "enablePersistentPlaylistPanel": true,
            "isAudioOnly": true,
        });
        if let Some(video_id) = &endpoint.video_id {
            body["videoId"] = Value::from(video_id.as_str());
        }
        if let Some(playlist_id) = &endpoint.playlist_id {
            body["playlistId"] = Value::from(playlist_id.as_str());
        }
        if let Some(params) = &endpoint.params {
            body["params"] = Value::from(params.as_str());
        }
        if let Some(continuation) = continuation {
            body["continuation"] = Value::from(continuation);
        }
        self.post("next", &[], body).await
    }

    /// Raw `player` request. Pass the player's signature timestamp so that
    /// returned ciphers can be resolved with that player.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response doesn't decode.
    pub async fn player(
        &self,
        video_id: &str,
        signature_timestamp: Option<u32>,
    ) -> Result<PlayerResponse> {
        let mut body = json!({ "videoId": video_id });
        if let Some(timestamp) = signature_timestamp {
            body["playbackContext"] = json!({
                "contentPlaybackContext": { "signatureTimestamp": timestamp }
            });
        }
        self.post("player", &[], body).await
    }

    /// The home feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no feed.
    pub async fn home(&self) -> Result<HomePage> {
        let response = self.browse(Self::HOME, None).await?;
        HomePage::from_response(&response)
            .ok_or_else(|| Error::not_found("home feed missing from response"))
    }

    /// More sections of the home feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no sections.
    pub async fn home_continuation(&self, continuation: &str) -> Result<HomePage> {
        let response = self.browse_continuation(continuation).await?;
        HomePage::from_continuation(&response)
            .ok_or_else(|| Error::not_found("home feed continuation missing from response"))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not an
    /// artist page.
    pub async fn artist(&self, browse_id: &str) -> Result<ArtistPage> {
        let response = self.browse(browse_id, None).await?;
        ArtistPage::from_response(browse_id, &response)
            .ok_or_else(|| Error::not_found(format!("no artist page for {browse_id}")))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not an
    /// album page.
    pub async fn album(&self, browse_id: &str) -> Result<AlbumPage> {
        let response = self.browse(browse_id, None).await?;
        AlbumPage::from_response(browse_id, &response)
            .ok_or_else(|| Error::not_found(format!("no album page for {browse_id}")))
    }

    /// The playlist `playlist_id`, with or without its `VL` prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not a
    /// playlist page.
    pub async fn playlist(&self, playlist_id: &str) -> Result<PlaylistPage> {
        let browse_id = if playlist_id.starts_with(Self::PLAYLIST_PREFIX) {
            playlist_id.to_owned()
        } else {
            format!("{}{playlist_id}", Self::PLAYLIST_PREFIX)
        };

        let response = self.browse(&browse_id, None).await?;
        PlaylistPage::from_response(&browse_id, &response)
            .ok_or_else(|| Error::not_found(format!("no playlist page for {playlist_id}")))
    }

    /// More songs of a playlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no songs.
    pub async fn playlist_continuation(&self, continuation: &str) -> Result<Page<SongItem>> {
        let response = self.browse_continuation(continuation).await?;
        PlaylistPage::continuation(&response)
            .ok_or_else(|| Error::not_found("playlist continuation missing from response"))
    }

    /// Searches for `query`. `params` selects a filter, like songs only.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no results.
    pub async fn search(&self, query: &str, params: Option<&str>) -> Result<SearchResult> {
        let response = self.search_request(query, params).await?;
        SearchResult::from_response(&response)
            .ok_or_else(|| Error::not_found(format!("no search results for \"{query}\"")))
    }

    /// More search results.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no results.
    pub async fn search_continuation(&self, continuation: &str) -> Result<SearchResult> {
        let body = json!({ "continuation": continuation });
        let response: SearchResponse = self.post("search", &[], body).await?;
        SearchResult::from_continuation(&response)
            .ok_or_else(|| Error::not_found("search continuation missing from response"))
    }

    /// The queue started by `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no queue.
    pub async fn next(&self, endpoint: &WatchEndpoint) -> Result<NextResult> {
        let response = self.next_request(endpoint, None).await?;
        NextResult::from_response(&response)
            .ok_or_else(|| Error::not_found("queue missing from response"))
    }

    /// More of the queue started by `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response has no queue.
    pub async fn next_continuation(
        &self,
        endpoint: &WatchEndpoint,
        continuation: &str,
    ) -> Result<NextResult> {
        let response = self.next_request(endpoint, Some(continuation)).await?;
        NextResult::from_continuation(&response)
            .ok_or_else(|| Error::not_found("queue continuation missing from response"))
    }

    /// Resolves a playable URL for the best audio stream of `video_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the video is not playable, has no audio stream,
    /// or its stream cannot be resolved. See
    /// [`StreamResolver::resolve_stream_url`].
    pub async fn stream_url(&self, video_id: &str, resolver: &StreamResolver) -> Result<Url> {
        let signature_timestamp = match resolver.resolve_signature_timestamp(video_id).await {
            Ok(timestamp) => Some(timestamp),
            Err(e) if e.is_rate_limited() => return Err(e),
            Err(e) => {
                warn!("signature timestamp of {video_id} unavailable: {e}");
                None
            }
        };

        let player = self.player(video_id, signature_timestamp).await?;
        player.ensure_playable()?;

        let format = player
            .best_audio_format()
            .ok_or_else(|| Error::not_found(format!("no audio stream for {video_id}")))?;
        debug!(
            "{video_id}: itag {} ({}, {} bps)",
            format.itag, format.mime_type, format.bitrate
        );

        resolver
            .resolve_stream_url(&format.descriptor(), video_id)
            .await
    }
}

/// Maps unsuccessful HTTP statuses to errors.
fn check_status(status: StatusCode, endpoint: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    let message = format!("{endpoint}: HTTP {status}");
    Err(match status {
        StatusCode::UNAUTHORIZED => Error::unauthenticated(message),
        StatusCode::FORBIDDEN => Error::permission_denied(message),
        StatusCode::NOT_FOUND => Error::not_found(message),
        StatusCode::TOO_MANY_REQUESTS => Error::resource_exhausted(message),
        status if status.is_server_error() => Error::unavailable(message),
        _ => Error::failed_precondition(message),
    })
}
