//! Navigation targets embedded in runs, buttons and renderers.
//!
//! # Wire Format
//!
//! ```json
//! {
//!     "browseEndpoint": {
//!         "browseId": "MPREb_abc",
//!         "browseEndpointContextSupportedConfigs": {
//!             "browseEndpointContextMusicConfig": {
//!                 "pageType": "MUSIC_PAGE_TYPE_ALBUM"
//!             }
//!         }
//!     }
//! }
//! ```
//!
//! ```json
//! {
//!     "watchEndpoint": {
//!         "videoId": "dQw4w9WgXcQ",
//!         "playlistId": "RDAMVMdQw4w9WgXcQ",
//!         "params": "wAEB"
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Raw `navigationEndpoint` object. Zero or more of its fields may be set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationEndpoint {
    pub watch_endpoint: Option<WatchEndpoint>,
    pub watch_playlist_endpoint: Option<WatchEndpoint>,
    pub browse_endpoint: Option<BrowseEndpoint>,
    pub search_endpoint: Option<SearchEndpoint>,
}

impl NavigationEndpoint {
    /// Reduces the raw object to a single target. Watch targets win over
    /// browse targets.
    #[must_use]
    pub fn endpoint(&self) -> Option<Endpoint> {
        if let Some(watch) = self.watch() {
            return Some(Endpoint::Watch(watch.clone()));
        }
        self.browse_endpoint.clone().map(Endpoint::Browse)
    }

    /// The watch or watch-playlist endpoint, in that order.
    #[must_use]
    pub fn watch(&self) -> Option<&WatchEndpoint> {
        self.watch_endpoint
            .as_ref()
            .or(self.watch_playlist_endpoint.as_ref())
    }

    /// The video id of a watch endpoint, if it has a non-empty one.
    #[must_use]
    pub fn video_id(&self) -> Option<&str> {
        self.watch_endpoint
            .as_ref()?
            .video_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    /// The browse id, if non-empty.
    #[must_use]
    pub fn browse_id(&self) -> Option<&str> {
        Some(self.browse_endpoint.as_ref()?.browse_id.as_str()).filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn page_type(&self) -> Option<PageType> {
        self.browse_endpoint.as_ref()?.page_type()
    }
}

/// A navigation target: a content page or a playable queue.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Endpoint {
    Browse(BrowseEndpoint),
    Watch(WatchEndpoint),
}

/// Identifies a playable queue: a single video, a playlist, or a radio.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchEndpoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub playlist_id: Option<String>,

    /// Opaque parameters, e.g. shuffle or radio mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,
}

/// Identifies a content page: artist, album, playlist, or a listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseEndpoint {
    pub browse_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub browse_endpoint_context_supported_configs: Option<BrowseEndpointContext>,
}

impl BrowseEndpoint {
    #[must_use]
    pub fn new(browse_id: impl Into<String>) -> Self {
        Self {
            browse_id: browse_id.into(),
            params: None,
            browse_endpoint_context_supported_configs: None,
        }
    }

    /// The page type tag, when the upstream supplied one.
    #[must_use]
    pub fn page_type(&self) -> Option<PageType> {
        self.browse_endpoint_context_supported_configs
            .as_ref()?
            .browse_endpoint_context_music_config
            .as_ref()?
            .page_type
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseEndpointContext {
    pub browse_endpoint_context_music_config: Option<MusicConfig>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicConfig {
    pub page_type: Option<PageType>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEndpoint {
    pub query: String,
    pub params: Option<String>,
}

/// Kind of page a browse endpoint leads to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PageType {
    #[serde(rename = "MUSIC_PAGE_TYPE_ALBUM")]
    Album,
    #[serde(rename = "MUSIC_PAGE_TYPE_AUDIOBOOK")]
    Audiobook,
    #[serde(rename = "MUSIC_PAGE_TYPE_PLAYLIST")]
    Playlist,
    #[serde(rename = "MUSIC_PAGE_TYPE_ARTIST")]
    Artist,
    #[serde(rename = "MUSIC_PAGE_TYPE_USER_CHANNEL")]
    UserChannel,
    #[serde(rename = "MUSIC_PAGE_TYPE_LIBRARY_ARTIST")]
    LibraryArtist,
    #[serde(other)]
    Unknown,
}

impl PageType {
    #[must_use]
    pub const fn is_album(self) -> bool {
        matches!(self, Self::Album | Self::Audiobook)
    }

    #[must_use]
    pub const fn is_artist(self) -> bool {
        matches!(self, Self::Artist | Self::UserChannel | Self::LibraryArtist)
    }
}
