//! Top-level shapes of `browse`, `search` and `next` responses.
//!
//! Only the paths leading to renderer lists, headers and continuation tokens
//! are modeled; everything else in the response is ignored.
//!
//! # Wire Format
//!
//! A browse response for the home feed:
//!
//! ```json
//! {
//!     "contents": {
//!         "singleColumnBrowseResultsRenderer": {
//!             "tabs": [{
//!                 "tabRenderer": {
//!                     "content": {
//!                         "sectionListRenderer": {
//!                             "contents": [{ "musicCarouselShelfRenderer": { ... } }],
//!                             "continuations": [
//!                                 { "nextContinuationData": { "continuation": "..." } }
//!                             ]
//!                         }
//!                     }
//!                 }
//!             }]
//!         }
//!     }
//! }
//! ```
//!
//! Continuation responses replace `contents` with `continuationContents`:
//!
//! ```json
//! {
//!     "continuationContents": {
//!         "sectionListContinuation": { "contents": [...], "continuations": [...] }
//!     }
//! }
//! ```

use serde::Deserialize;
use serde_with::{serde_as, DefaultOnError, VecSkipError};

use super::{
    renderer::{
        continuation_token, trailing_continuation, Badge, Button, Continuation, Menu,
        MusicPlaylistShelfRenderer, MusicShelfRenderer, RendererNode, ThumbnailRenderer,
    },
    runs::Runs,
};

/// Response of the `browse` endpoint.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseResponse {
    pub contents: Option<Contents>,
    pub continuation_contents: Option<ContinuationContents>,

    /// Newer continuation style: items appended to the previous list.
    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub on_response_received_actions: Vec<ResponseAction>,

    /// A header that doesn't decode is dropped, not the whole response.
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub header: Option<Header>,

    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnError")]
    pub microformat: Option<Microformat>,
}

/// Responses of the `search` endpoint have the same outline.
pub type SearchResponse = BrowseResponse;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contents {
    pub single_column_browse_results_renderer: Option<Tabs>,
    pub two_column_browse_results_renderer: Option<TwoColumnResults>,
    pub tabbed_search_results_renderer: Option<Tabs>,
    pub section_list_renderer: Option<SectionListRenderer>,
}

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Tabs {
    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub tabs: Vec<Tab>,
}

impl Tabs {
    /// Content of the first tab, which is the selected one.
    #[must_use]
    pub fn first(&self) -> Option<&TabContent> {
        self.tabs.first()?.tab_renderer.as_ref()?.content.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub tab_renderer: Option<TabRenderer>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TabRenderer {
    pub title: Option<String>,
    pub content: Option<TabContent>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabContent {
    pub section_list_renderer: Option<SectionListRenderer>,
    pub music_queue_renderer: Option<MusicQueueRenderer>,
}

/// Album and playlist pages of the newer layout: header in the first tab,
/// track list in the secondary column.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TwoColumnResults {
    #[serde(flatten)]
    pub tabs: Tabs,
    pub secondary_contents: Option<TabContent>,
}

/// Vertical list of shelves and carousels.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SectionListRenderer {
    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub contents: Vec<RendererNode>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub continuations: Vec<Continuation>,
}

impl SectionListRenderer {
    #[must_use]
    pub fn continuation(&self) -> Option<String> {
        continuation_token(&self.continuations).or_else(|| trailing_continuation(&self.contents))
    }

    /// The first flat shelf in the list.
    #[must_use]
    pub fn music_shelf(&self) -> Option<&MusicShelfRenderer> {
        self.contents.iter().find_map(|node| match node {
            RendererNode::MusicShelf(shelf) => Some(shelf),
            _ => None,
        })
    }

    /// The first playlist shelf in the list.
    #[must_use]
    pub fn playlist_shelf(&self) -> Option<&MusicPlaylistShelfRenderer> {
        self.contents.iter().find_map(|node| match node {
            RendererNode::MusicPlaylistShelf(shelf) => Some(shelf),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationContents {
    pub section_list_continuation: Option<SectionListRenderer>,
    pub music_shelf_continuation: Option<MusicShelfRenderer>,
    pub music_playlist_shelf_continuation: Option<MusicPlaylistShelfRenderer>,
    pub playlist_panel_continuation: Option<PlaylistPanelRenderer>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseAction {
    pub append_continuation_items_action: Option<AppendContinuationItems>,
}

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendContinuationItems {
    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub continuation_items: Vec<RendererNode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Microformat {
    pub microformat_data_renderer: Option<MicroformatData>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroformatData {
    pub url_canonical: Option<String>,
}

/// Page header. Artist pages use one of the first two; albums and
/// playlists the detail header, wrapped when the playlist is editable.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub music_immersive_header_renderer: Option<ArtistHeader>,
    pub music_visual_header_renderer: Option<ArtistHeader>,

    #[serde(alias = "musicResponsiveHeaderRenderer")]
    pub music_detail_header_renderer: Option<DetailHeader>,

    pub music_editable_playlist_detail_header_renderer: Option<EditablePlaylistHeader>,
}

impl Header {
    #[must_use]
    pub fn artist(&self) -> Option<&ArtistHeader> {
        self.music_immersive_header_renderer
            .as_ref()
            .or(self.music_visual_header_renderer.as_ref())
    }

    /// The detail header and whether it belongs to an editable playlist.
    #[must_use]
    pub fn detail(&self) -> Option<(&DetailHeader, bool)> {
        if let Some(header) = &self.music_detail_header_renderer {
            return Some((header, false));
        }
        let editable = self.music_editable_playlist_detail_header_renderer.as_ref()?;
        let header = editable.header.as_ref()?.music_detail_header_renderer.as_ref()?;
        Some((header, true))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistHeader {
    #[serde(default)]
    pub title: Runs,
    pub description: Option<Runs>,
    pub thumbnail: Option<ThumbnailRenderer>,
    pub foreground_thumbnail: Option<ThumbnailRenderer>,
    pub subscription_button: Option<SubscriptionButton>,
    pub play_button: Option<Button>,
    pub start_radio_button: Option<Button>,
}

impl ArtistHeader {
    #[must_use]
    pub fn channel_id(&self) -> Option<&str> {
        self.subscription_button
            .as_ref()?
            .subscribe_button_renderer
            .as_ref()?
            .channel_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail
            .as_ref()
            .or(self.foreground_thumbnail.as_ref())?
            .url()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionButton {
    pub subscribe_button_renderer: Option<SubscribeButton>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeButton {
    pub channel_id: Option<String>,
}

/// Header of album and playlist pages.
///
/// `subtitle` reads like `Album • 2024` or `Playlist • Owner • 2024`,
/// `secondSubtitle` like `12 songs • 48 minutes`.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailHeader {
    #[serde(default)]
    pub title: Runs,
    #[serde(default)]
    pub subtitle: Runs,
    #[serde(default)]
    pub second_subtitle: Runs,
    pub strapline_text_one: Option<Runs>,
    pub thumbnail: Option<ThumbnailRenderer>,
    pub menu: Option<Menu>,
    pub description: Option<Runs>,
    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub subtitle_badges: Vec<Badge>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct EditablePlaylistHeader {
    pub header: Option<EditableHeaderInner>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditableHeaderInner {
    #[serde(alias = "musicResponsiveHeaderRenderer")]
    pub music_detail_header_renderer: Option<DetailHeader>,
}

impl BrowseResponse {
    /// The first tab of either layout, or of the search results.
    fn first_tab(&self) -> Option<&TabContent> {
        let contents = self.contents.as_ref()?;
        contents
            .single_column_browse_results_renderer
            .as_ref()
            .or(contents.tabbed_search_results_renderer.as_ref())
            .or(contents
                .two_column_browse_results_renderer
                .as_ref()
                .map(|results| &results.tabs))?
            .first()
    }

    /// The main section list.
    #[must_use]
    pub fn section_list(&self) -> Option<&SectionListRenderer> {
        self.first_tab()
            .and_then(|tab| tab.section_list_renderer.as_ref())
            .or_else(|| self.contents.as_ref()?.section_list_renderer.as_ref())
    }

    /// Section list of the secondary column, holding the track list in the
    /// two-column layout.
    #[must_use]
    pub fn secondary_section_list(&self) -> Option<&SectionListRenderer> {
        self.contents
            .as_ref()?
            .two_column_browse_results_renderer
            .as_ref()?
            .secondary_contents
            .as_ref()?
            .section_list_renderer
            .as_ref()
    }

    /// Detail header of an album or playlist page, from the response header
    /// or, in the two-column layout, from the first tab. The flag tells
    /// whether the playlist is editable.
    #[must_use]
    pub fn detail_header(&self) -> Option<(&DetailHeader, bool)> {
        if let Some(detail) = self.header.as_ref().and_then(Header::detail) {
            return Some(detail);
        }
        self.section_list()?.contents.iter().find_map(|node| match node {
            RendererNode::MusicResponsiveHeader(header) => Some((header, false)),
            _ => None,
        })
    }

    /// Nodes appended by an `appendContinuationItemsAction`.
    pub fn appended_items(&self) -> impl Iterator<Item = &RendererNode> {
        self.on_response_received_actions
            .iter()
            .filter_map(|action| action.append_continuation_items_action.as_ref())
            .flat_map(|action| action.continuation_items.iter())
    }

    /// Playlist id from the canonical URL (`...?list=OLAK5uy_...`).
    #[must_use]
    pub fn canonical_playlist_id(&self) -> Option<String> {
        let canonical = self
            .microformat
            .as_ref()?
            .microformat_data_renderer
            .as_ref()?
            .url_canonical
            .as_deref()?;
        let url = url::Url::parse(canonical).ok()?;
        crate::util::query_param(&url, "list").filter(|id| !id.is_empty())
    }
}

/// Response of the `next` endpoint: the play queue.
///
/// ```json
/// {
///     "contents": {
///         "singleColumnMusicWatchNextResultsRenderer": {
///             "tabbedRenderer": {
///                 "watchNextTabbedResultsRenderer": {
///                     "tabs": [{ "tabRenderer": { "content": {
///                         "musicQueueRenderer": { "content": {
///                             "playlistPanelRenderer": { "title": "Mix", "contents": [...] }
///                         } }
///                     } } }]
///                 }
///             }
///         }
///     }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextResponse {
    pub contents: Option<NextContents>,
    pub continuation_contents: Option<ContinuationContents>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextContents {
    pub single_column_music_watch_next_results_renderer: Option<WatchNextResults>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchNextResults {
    pub tabbed_renderer: Option<TabbedRenderer>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabbedRenderer {
    pub watch_next_tabbed_results_renderer: Option<Tabs>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MusicQueueRenderer {
    pub content: Option<MusicQueueContent>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicQueueContent {
    pub playlist_panel_renderer: Option<PlaylistPanelRenderer>,
}

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPanelRenderer {
    pub title: Option<String>,
    pub playlist_id: Option<String>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub contents: Vec<RendererNode>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub continuations: Vec<Continuation>,
}

impl PlaylistPanelRenderer {
    #[must_use]
    pub fn continuation(&self) -> Option<String> {
        continuation_token(&self.continuations).or_else(|| trailing_continuation(&self.contents))
    }
}

impl NextResponse {
    /// The queue of the first tab.
    #[must_use]
    pub fn playlist_panel(&self) -> Option<&PlaylistPanelRenderer> {
        self.contents
            .as_ref()?
            .single_column_music_watch_next_results_renderer
            .as_ref()?
            .tabbed_renderer
            .as_ref()?
            .watch_next_tabbed_results_renderer
            .as_ref()?
            .first()?
            .music_queue_renderer
            .as_ref()?
            .content
            .as_ref()?
            .playlist_panel_renderer
            .as_ref()
    }
}
