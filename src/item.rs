//! Domain model: songs, albums, artists, playlists and sections.
//!
//! These are the only types consumers see. They are immutable values built
//! by the [`parser`](crate::parser) from renderer nodes; the wire format
//! never leaks through them.
//!
//! Every item has a non-empty id and a non-empty title. Identifiers are
//! always taken from the upstream response, never synthesized.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};

use crate::protocol::innertube::endpoint::{BrowseEndpoint, WatchEndpoint};

/// Any item that can appear in a section or a search result.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum YTItem {
    Song(SongItem),
    Album(AlbumItem),
    Artist(ArtistItem),
    Playlist(PlaylistItem),
}

impl YTItem {
    /// Video id, album browse id, channel id or playlist id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Song(song) => &song.id,
            Self::Album(album) => &album.browse_id,
            Self::Artist(artist) => &artist.id,
            Self::Playlist(playlist) => &playlist.id,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            Self::Song(song) => &song.title,
            Self::Album(album) => &album.title,
            Self::Artist(artist) => &artist.title,
            Self::Playlist(playlist) => &playlist.title,
        }
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> &str {
        match self {
            Self::Song(song) => &song.thumbnail_url,
            Self::Album(album) => &album.thumbnail_url,
            Self::Artist(artist) => &artist.thumbnail_url,
            Self::Playlist(playlist) => &playlist.thumbnail_url,
        }
    }

    /// Whether the item is marked as explicit. Artists and playlists never
    /// are.
    #[must_use]
    pub fn is_explicit(&self) -> bool {
        match self {
            Self::Song(song) => song.explicit,
            Self::Album(album) => album.explicit,
            Self::Artist(_) | Self::Playlist(_) => false,
        }
    }
}

impl From<SongItem> for YTItem {
    fn from(song: SongItem) -> Self {
        Self::Song(song)
    }
}

impl From<AlbumItem> for YTItem {
    fn from(album: AlbumItem) -> Self {
        Self::Album(album)
    }
}

impl From<ArtistItem> for YTItem {
    fn from(artist: ArtistItem) -> Self {
        Self::Artist(artist)
    }
}

impl From<PlaylistItem> for YTItem {
    fn from(playlist: PlaylistItem) -> Self {
        Self::Playlist(playlist)
    }
}

/// Reference to an artist as credited on another item.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Artist {
    pub name: String,

    /// Channel id. Absent for credits without their own page.
    pub id: Option<String>,
}

/// Reference to the album a song appears on.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Album {
    pub name: String,
    pub id: String,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SongItem {
    /// Video id.
    pub id: String,
    pub title: String,
    pub artists: Vec<Artist>,
    pub album: Option<Album>,

    #[serde_as(as = "Option<DurationSeconds<u64>>")]
    pub duration: Option<Duration>,

    pub thumbnail_url: String,
    pub explicit: bool,

    /// Queue to start when playing the song, e.g. within its playlist.
    pub play_endpoint: Option<WatchEndpoint>,

    /// Position marker of the song inside a playlist.
    pub set_video_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct AlbumItem {
    pub browse_id: String,

    /// Playlist holding the album's tracks, used to play it.
    pub playlist_id: String,

    pub title: String,
    pub artists: Option<Vec<Artist>>,
    pub year: Option<u32>,
    pub thumbnail_url: String,
    pub explicit: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ArtistItem {
    /// Browse id of the artist page.
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub channel_id: Option<String>,
    pub shuffle_endpoint: WatchEndpoint,
    pub radio_endpoint: WatchEndpoint,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PlaylistItem {
    /// Playlist id without the `VL` browse prefix.
    pub id: String,
    pub title: String,
    pub author: Option<Artist>,

    /// Display text like `"42 songs"`, kept verbatim.
    pub song_count_text: Option<String>,

    pub thumbnail_url: String,
    pub play_endpoint: Option<WatchEndpoint>,
    pub shuffle_endpoint: Option<WatchEndpoint>,
    pub radio_endpoint: Option<WatchEndpoint>,
    pub is_editable: bool,
}

/// Titled group of items, like a shelf or carousel on the home feed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Section {
    pub title: String,
    pub items: Vec<YTItem>,

    /// Page with the full listing, if the section is truncated.
    pub more_endpoint: Option<BrowseEndpoint>,
}
