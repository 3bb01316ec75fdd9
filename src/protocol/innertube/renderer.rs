//! Renderer nodes: the building blocks of every InnerTube response.
//!
//! A renderer node is a JSON object with a single key naming its kind:
//!
//! ```json
//! { "musicTwoRowItemRenderer": { "title": { "runs": [...] }, ... } }
//! ```
//!
//! Nodes are decoded into [`RendererNode`]. A node whose key is not one of
//! the supported kinds, or whose body is malformed, is dropped from the list
//! that contains it; its siblings are unaffected.
//!
//! Every field below the node is optional on the wire. Accessors walk the
//! nested objects and return `None` at the first missing link.

use serde::Deserialize;
use serde_with::{serde_as, VecSkipError};

use super::{
    endpoint::{Endpoint, NavigationEndpoint, PageType, WatchEndpoint},
    response::DetailHeader,
    runs::Runs,
};

/// Badge icon marking explicit content.
pub const EXPLICIT_BADGE: &str = "MUSIC_EXPLICIT_BADGE";

/// Menu icon of the shuffle entry.
pub const SHUFFLE_ICON: &str = "MUSIC_SHUFFLE";

/// Menu icon of the start-radio entry.
pub const RADIO_ICON: &str = "MIX";

/// Menu icon of the edit-playlist entry.
pub const EDIT_ICON: &str = "EDIT";

/// Supported renderer kinds.
#[allow(clippy::large_enum_variant)]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawRendererNode")]
pub enum RendererNode {
    /// Flat, titled list of rows.
    MusicShelf(MusicShelfRenderer),
    /// Horizontally scrolling group with a header.
    MusicCarouselShelf(MusicCarouselShelfRenderer),
    /// Track list of a playlist page.
    MusicPlaylistShelf(MusicPlaylistShelfRenderer),
    /// Row-style item with text columns.
    MusicResponsiveListItem(MusicResponsiveListItemRenderer),
    /// Card-style item with title and subtitle.
    MusicTwoRowItem(MusicTwoRowItemRenderer),
    /// Entry of a play queue.
    PlaylistPanelVideo(PlaylistPanelVideoRenderer),
    /// Trailing marker carrying the token of the next page.
    ContinuationItem(ContinuationItemRenderer),
    /// Album or playlist header placed inside the section list.
    MusicResponsiveHeader(DetailHeader),
}

/// The node as it is on the wire: one populated field out of many.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRendererNode {
    music_shelf_renderer: Option<MusicShelfRenderer>,
    music_carousel_shelf_renderer: Option<MusicCarouselShelfRenderer>,
    music_playlist_shelf_renderer: Option<MusicPlaylistShelfRenderer>,
    music_responsive_list_item_renderer: Option<MusicResponsiveListItemRenderer>,
    music_two_row_item_renderer: Option<MusicTwoRowItemRenderer>,
    playlist_panel_video_renderer: Option<PlaylistPanelVideoRenderer>,
    continuation_item_renderer: Option<ContinuationItemRenderer>,
    music_responsive_header_renderer: Option<DetailHeader>,
}

impl TryFrom<RawRendererNode> for RendererNode {
    type Error = &'static str;

    fn try_from(raw: RawRendererNode) -> Result<Self, Self::Error> {
        if let Some(renderer) = raw.music_carousel_shelf_renderer {
            return Ok(Self::MusicCarouselShelf(renderer));
        }
        if let Some(renderer) = raw.music_shelf_renderer {
            return Ok(Self::MusicShelf(renderer));
        }
        if let Some(renderer) = raw.music_playlist_shelf_renderer {
            return Ok(Self::MusicPlaylistShelf(renderer));
        }
        if let Some(renderer) = raw.music_responsive_list_item_renderer {
            return Ok(Self::MusicResponsiveListItem(renderer));
        }
        if let Some(renderer) = raw.music_two_row_item_renderer {
            return Ok(Self::MusicTwoRowItem(renderer));
        }
        if let Some(renderer) = raw.playlist_panel_video_renderer {
            return Ok(Self::PlaylistPanelVideo(renderer));
        }
        if let Some(renderer) = raw.continuation_item_renderer {
            return Ok(Self::ContinuationItem(renderer));
        }
        if let Some(renderer) = raw.music_responsive_header_renderer {
            return Ok(Self::MusicResponsiveHeader(renderer));
        }
        Err("unsupported renderer")
    }
}

/// Kind of an item renderer, inferred from its structure.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Song,
    Album,
    Playlist,
    Artist,
}

impl ItemKind {
    /// Order in which the kinds are tested.
    const PRIORITY: [Self; 4] = [Self::Song, Self::Album, Self::Playlist, Self::Artist];

    /// The first kind, in the fixed order song, album, playlist, artist,
    /// whose predicate holds. A node carrying both a playable video and an
    /// album link is a song.
    fn infer(is: impl Fn(Self) -> bool) -> Option<Self> {
        Self::PRIORITY.into_iter().find(|&kind| is(kind))
    }
}

/// Continuation tokens attached to shelves and lists.
///
/// ```json
/// "continuations": [{ "nextContinuationData": { "continuation": "4qmFsgJ..." } }]
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Continuation {
    #[serde(alias = "nextRadioContinuationData")]
    pub next_continuation_data: Option<ContinuationData>,
    pub reload_continuation_data: Option<ContinuationData>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ContinuationData {
    pub continuation: String,
}

/// First continuation token of `continuations`, verbatim.
#[must_use]
pub fn continuation_token(continuations: &[Continuation]) -> Option<String> {
    continuations.iter().find_map(|continuation| {
        continuation
            .next_continuation_data
            .as_ref()
            .or(continuation.reload_continuation_data.as_ref())
            .map(|data| data.continuation.clone())
    })
}

/// Token of a trailing [`RendererNode::ContinuationItem`] in `contents`.
#[must_use]
pub fn trailing_continuation(contents: &[RendererNode]) -> Option<String> {
    match contents.last()? {
        RendererNode::ContinuationItem(item) => item.token().map(ToOwned::to_owned),
        _ => None,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationItemRenderer {
    pub continuation_endpoint: Option<ContinuationEndpoint>,
}

impl ContinuationItemRenderer {
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        let command = self.continuation_endpoint.as_ref()?.continuation_command.as_ref()?;
        Some(command.token.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinuationEndpoint {
    pub continuation_command: Option<ContinuationCommand>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ContinuationCommand {
    pub token: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
}

impl Thumbnails {
    /// URL of the last, and by convention largest, thumbnail.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.thumbnails
            .last()
            .map(|thumbnail| thumbnail.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Wrapper around [`Thumbnails`]; album headers use the cropped variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailRenderer {
    pub music_thumbnail_renderer: Option<MusicThumbnailRenderer>,
    pub cropped_square_thumbnail_renderer: Option<MusicThumbnailRenderer>,
}

impl ThumbnailRenderer {
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.music_thumbnail_renderer
            .as_ref()
            .or(self.cropped_square_thumbnail_renderer.as_ref())?
            .thumbnail
            .url()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MusicThumbnailRenderer {
    #[serde(default)]
    pub thumbnail: Thumbnails,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub music_inline_badge_renderer: Option<InlineBadge>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct InlineBadge {
    pub icon: Option<Icon>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    pub icon_type: Option<String>,
}

impl Icon {
    #[must_use]
    pub fn is(&self, icon_type: &str) -> bool {
        self.icon_type.as_deref() == Some(icon_type)
    }
}

/// Whether `badges` contain the explicit-content badge.
#[must_use]
pub fn is_explicit(badges: &[Badge]) -> bool {
    badges.iter().any(|badge| {
        badge
            .music_inline_badge_renderer
            .as_ref()
            .and_then(|renderer| renderer.icon.as_ref())
            .is_some_and(|icon| icon.is(EXPLICIT_BADGE))
    })
}

/// Context menu of an item.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub menu_renderer: Option<MenuRenderer>,
}

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct MenuRenderer {
    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub items: Vec<MenuItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub menu_navigation_item_renderer: Option<MenuNavigationItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNavigationItem {
    #[serde(default)]
    pub text: Runs,
    pub icon: Option<Icon>,
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

impl Menu {
    fn item_with_icon(&self, icon_type: &str) -> Option<&MenuNavigationItem> {
        self.menu_renderer.as_ref()?.items.iter().find_map(|item| {
            item.menu_navigation_item_renderer
                .as_ref()
                .filter(|nav| nav.icon.as_ref().is_some_and(|icon| icon.is(icon_type)))
        })
    }

    /// Watch target of the menu entry with icon `icon_type`.
    #[must_use]
    pub fn watch_endpoint(&self, icon_type: &str) -> Option<&WatchEndpoint> {
        self.item_with_icon(icon_type)?
            .navigation_endpoint
            .as_ref()?
            .watch()
    }

    #[must_use]
    pub fn has_icon(&self, icon_type: &str) -> bool {
        self.item_with_icon(icon_type).is_some()
    }
}

/// Play button drawn over a thumbnail.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub music_item_thumbnail_overlay_renderer: Option<OverlayRenderer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct OverlayRenderer {
    pub content: Option<OverlayContent>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayContent {
    pub music_play_button_renderer: Option<PlayButton>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayButton {
    pub play_navigation_endpoint: Option<NavigationEndpoint>,
}

impl Overlay {
    #[must_use]
    pub fn play_endpoint(&self) -> Option<&NavigationEndpoint> {
        self.music_item_thumbnail_overlay_renderer
            .as_ref()?
            .content
            .as_ref()?
            .music_play_button_renderer
            .as_ref()?
            .play_navigation_endpoint
            .as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub button_renderer: Option<ButtonRenderer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonRenderer {
    pub text: Option<Runs>,
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

impl Button {
    #[must_use]
    pub fn navigation_endpoint(&self) -> Option<&NavigationEndpoint> {
        self.button_renderer.as_ref()?.navigation_endpoint.as_ref()
    }
}

/// Row-style item with one or more text columns.
///
/// ```json
/// {
///     "flexColumns": [
///         { "musicResponsiveListItemFlexColumnRenderer": {
///             "text": { "runs": [{ "text": "Title" }] }
///         } },
///         { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [...] } } }
///     ],
///     "fixedColumns": [
///         { "musicResponsiveListItemFixedColumnRenderer": {
///             "text": { "runs": [{ "text": "3:45" }] }
///         } }
///     ],
///     "playlistItemData": { "videoId": "dQw4w9WgXcQ" },
///     "thumbnail": { "musicThumbnailRenderer": { "thumbnail": { "thumbnails": [...] } } }
/// }
/// ```
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicResponsiveListItemRenderer {
    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub flex_columns: Vec<FlexColumn>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub fixed_columns: Vec<FixedColumn>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub badges: Vec<Badge>,

    pub thumbnail: Option<ThumbnailRenderer>,
    pub menu: Option<Menu>,
    pub playlist_item_data: Option<PlaylistItemData>,
    pub overlay: Option<Overlay>,
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FlexColumn {
    #[serde(rename = "musicResponsiveListItemFlexColumnRenderer")]
    pub renderer: ColumnRenderer,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FixedColumn {
    #[serde(rename = "musicResponsiveListItemFixedColumnRenderer")]
    pub renderer: ColumnRenderer,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ColumnRenderer {
    #[serde(default)]
    pub text: Runs,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemData {
    pub video_id: Option<String>,
    pub playlist_set_video_id: Option<String>,
}

impl MusicResponsiveListItemRenderer {
    /// Runs of flex column `index`.
    #[must_use]
    pub fn flex_column(&self, index: usize) -> Option<&Runs> {
        self.flex_columns.get(index).map(|column| &column.renderer.text)
    }

    /// Runs of fixed column `index`.
    #[must_use]
    pub fn fixed_column(&self, index: usize) -> Option<&Runs> {
        self.fixed_columns.get(index).map(|column| &column.renderer.text)
    }

    /// A row without any navigation target is a song too: album and
    /// playlist track lists omit it.
    #[must_use]
    pub fn is_song(&self) -> bool {
        self.navigation_endpoint
            .as_ref()
            .is_none_or(|endpoint| matches!(endpoint.endpoint(), Some(Endpoint::Watch(_))))
    }

    #[must_use]
    pub fn is_album(&self) -> bool {
        self.page_type().is_some_and(PageType::is_album)
    }

    #[must_use]
    pub fn is_playlist(&self) -> bool {
        self.page_type() == Some(PageType::Playlist)
    }

    #[must_use]
    pub fn is_artist(&self) -> bool {
        self.page_type().is_some_and(PageType::is_artist)
    }

    fn page_type(&self) -> Option<PageType> {
        self.navigation_endpoint.as_ref()?.page_type()
    }

    #[must_use]
    pub fn kind(&self) -> Option<ItemKind> {
        ItemKind::infer(|kind| match kind {
            ItemKind::Song => self.is_song(),
            ItemKind::Album => self.is_album(),
            ItemKind::Playlist => self.is_playlist(),
            ItemKind::Artist => self.is_artist(),
        })
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail.as_ref()?.url()
    }

    /// The video id, from the item data or the title's watch target. Empty
    /// ids count as missing.
    #[must_use]
    pub fn video_id(&self) -> Option<&str> {
        self.playlist_item_data
            .as_ref()
            .and_then(|data| data.video_id.as_deref())
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.flex_column(0)?
                    .runs
                    .first()?
                    .navigation_endpoint
                    .as_ref()?
                    .video_id()
            })
    }
}

/// Card-style item.
///
/// ```json
/// {
///     "title": { "runs": [{ "text": "Album" }] },
///     "subtitle": { "runs": [{ "text": "Album" }, { "text": " • " }, { "text": "2024" }] },
///     "navigationEndpoint": { "browseEndpoint": { ... } },
///     "thumbnailRenderer": { "musicThumbnailRenderer": { ... } }
/// }
/// ```
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicTwoRowItemRenderer {
    #[serde(default)]
    pub title: Runs,
    pub subtitle: Option<Runs>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub subtitle_badges: Vec<Badge>,

    pub menu: Option<Menu>,
    pub thumbnail_renderer: Option<ThumbnailRenderer>,
    pub navigation_endpoint: Option<NavigationEndpoint>,
    pub thumbnail_overlay: Option<Overlay>,
}

impl MusicTwoRowItemRenderer {
    /// A card is a song when it links to a watch target with a video.
    #[must_use]
    pub fn is_song(&self) -> bool {
        self.navigation_endpoint
            .as_ref()
            .and_then(NavigationEndpoint::video_id)
            .is_some()
    }

    #[must_use]
    pub fn is_album(&self) -> bool {
        self.page_type().is_some_and(PageType::is_album)
    }

    #[must_use]
    pub fn is_playlist(&self) -> bool {
        self.page_type() == Some(PageType::Playlist)
    }

    #[must_use]
    pub fn is_artist(&self) -> bool {
        self.page_type().is_some_and(PageType::is_artist)
    }

    fn page_type(&self) -> Option<PageType> {
        self.navigation_endpoint.as_ref()?.page_type()
    }

    #[must_use]
    pub fn kind(&self) -> Option<ItemKind> {
        ItemKind::infer(|kind| match kind {
            ItemKind::Song => self.is_song(),
            ItemKind::Album => self.is_album(),
            ItemKind::Playlist => self.is_playlist(),
            ItemKind::Artist => self.is_artist(),
        })
    }

    #[must_use]
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_renderer.as_ref()?.url()
    }
}

/// Entry of a play queue in a `next` response.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPanelVideoRenderer {
    pub video_id: Option<String>,

    #[serde(default)]
    pub title: Runs,

    pub length_text: Option<Runs>,
    pub long_byline_text: Option<Runs>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub badges: Vec<Badge>,

    #[serde(default)]
    pub thumbnail: Thumbnails,

    pub navigation_endpoint: Option<NavigationEndpoint>,

    #[serde(default)]
    pub selected: bool,
}

/// Flat, titled list.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicShelfRenderer {
    pub title: Option<Runs>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub contents: Vec<RendererNode>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub continuations: Vec<Continuation>,

    pub bottom_endpoint: Option<NavigationEndpoint>,
}

impl MusicShelfRenderer {
    #[must_use]
    pub fn continuation(&self) -> Option<String> {
        continuation_token(&self.continuations).or_else(|| trailing_continuation(&self.contents))
    }
}

/// Carousel with a header.
///
/// ```json
/// {
///     "header": {
///         "musicCarouselShelfBasicHeaderRenderer": {
///             "title": { "runs": [{ "text": "Albums" }] },
///             "moreContentButton": { "buttonRenderer": { "navigationEndpoint": { ... } } }
///         }
///     },
///     "contents": [{ "musicTwoRowItemRenderer": { ... } }]
/// }
/// ```
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicCarouselShelfRenderer {
    pub header: Option<CarouselHeader>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub contents: Vec<RendererNode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselHeader {
    pub music_carousel_shelf_basic_header_renderer: Option<CarouselBasicHeader>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselBasicHeader {
    #[serde(default)]
    pub title: Runs,
    pub strapline: Option<Runs>,
    pub more_content_button: Option<Button>,
}

impl MusicCarouselShelfRenderer {
    #[must_use]
    pub fn basic_header(&self) -> Option<&CarouselBasicHeader> {
        self.header
            .as_ref()?
            .music_carousel_shelf_basic_header_renderer
            .as_ref()
    }
}

/// Track list of a playlist.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MusicPlaylistShelfRenderer {
    pub playlist_id: Option<String>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub contents: Vec<RendererNode>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub continuations: Vec<Continuation>,
}

impl MusicPlaylistShelfRenderer {
    #[must_use]
    pub fn continuation(&self) -> Option<String> {
        continuation_token(&self.continuations).or_else(|| trailing_continuation(&self.contents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nodes(value: serde_json::Value) -> Vec<RendererNode> {
        #[serde_as]
        #[derive(Deserialize)]
        struct List(#[serde_as(as = "VecSkipError<_>")] Vec<RendererNode>);

        serde_json::from_value::<List>(value).unwrap().0
    }

    #[test]
    fn unknown_renderers_are_skipped() {
        let nodes = nodes(json!([
            { "musicDescriptionShelfRenderer": { "description": {} } },
            { "musicTwoRowItemRenderer": { "title": { "runs": [{ "text": "A" }] } } },
            { "somethingElse": 1 }
        ]));

        assert_eq!(nodes.len(), 1);
        assert!(matches!(nodes[0], RendererNode::MusicTwoRowItem(_)));
    }

    #[test]
    fn malformed_node_does_not_poison_siblings() {
        let nodes = nodes(json!([
            { "musicResponsiveListItemRenderer": { "flexColumns": "not a list" } },
            { "musicResponsiveListItemRenderer": {} }
        ]));

        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn explicit_badge_membership() {
        let badges: Vec<Badge> = serde_json::from_value(json!([
            { "musicInlineBadgeRenderer": { "icon": { "iconType": "OTHER" } } },
            { "musicInlineBadgeRenderer": { "icon": {} } },
            { "musicInlineBadgeRenderer": { "icon": { "iconType": "MUSIC_EXPLICIT_BADGE" } } }
        ]))
        .unwrap();

        assert!(is_explicit(&badges));
        assert!(!is_explicit(&badges[..2]));
        let icon = badges[1].music_inline_badge_renderer.as_ref().unwrap().icon.as_ref();
        assert!(icon.is_some_and(|icon| icon.icon_type.is_none()));
    }

    #[test]
    fn reads_both_continuation_styles() {
        let shelf: MusicShelfRenderer = serde_json::from_value(json!({
            "contents": [],
            "continuations": [{ "nextContinuationData": { "continuation": "abc%3D" } }]
        }))
        .unwrap();
        assert_eq!(shelf.continuation().as_deref(), Some("abc%3D"));

        let shelf: MusicShelfRenderer = serde_json::from_value(json!({
            "contents": [
                { "continuationItemRenderer": {
                    "continuationEndpoint": { "continuationCommand": { "token": "xyz" } }
                } }
            ]
        }))
        .unwrap();
        assert_eq!(shelf.continuation().as_deref(), Some("xyz"));
    }

    #[test]
    fn two_row_kind_priority() {
        let renderer: MusicTwoRowItemRenderer = serde_json::from_value(json!({
            "navigationEndpoint": {
                "watchEndpoint": { "videoId": "v1" },
                "browseEndpoint": {
                    "browseId": "MPREb_1",
                    "browseEndpointContextSupportedConfigs": {
                        "browseEndpointContextMusicConfig": { "pageType": "MUSIC_PAGE_TYPE_ALBUM" }
                    }
                }
            }
        }))
        .unwrap();

        assert!(renderer.is_song());
        assert!(renderer.is_album());
        assert_eq!(renderer.kind(), Some(ItemKind::Song));
    }

    #[test]
    fn row_without_endpoint_is_song() {
        let renderer = MusicResponsiveListItemRenderer::default();
        assert_eq!(renderer.kind(), Some(ItemKind::Song));
    }

    #[test]
    fn row_kind_follows_predicates() {
        let row = |page_type: &str| -> MusicResponsiveListItemRenderer {
            serde_json::from_value(json!({ "navigationEndpoint": { "browseEndpoint": {
                "browseId": "X1",
                "browseEndpointContextSupportedConfigs": {
                    "browseEndpointContextMusicConfig": { "pageType": page_type }
                }
            } } }))
            .unwrap()
        };

        let playlist = row("MUSIC_PAGE_TYPE_PLAYLIST");
        assert!(!playlist.is_song());
        assert!(playlist.is_playlist());
        assert_eq!(playlist.kind(), Some(ItemKind::Playlist));

        let artist = row("MUSIC_PAGE_TYPE_LIBRARY_ARTIST");
        assert!(artist.is_artist());
        assert_eq!(artist.kind(), Some(ItemKind::Artist));

        let audiobook = row("MUSIC_PAGE_TYPE_AUDIOBOOK");
        assert!(audiobook.is_album());
        assert_eq!(audiobook.kind(), Some(ItemKind::Album));

        assert_eq!(row("MUSIC_PAGE_TYPE_PODCAST_SHOW").kind(), None);
    }

    #[test]
    fn menu_lookup_by_icon() {
        let menu: Menu = serde_json::from_value(json!({
            "menuRenderer": { "items": [
                { "menuServiceItemRenderer": {} },
                { "menuNavigationItemRenderer": {
                    "icon": { "iconType": "MUSIC_SHUFFLE" },
                    "navigationEndpoint": { "watchPlaylistEndpoint": {
                        "playlistId": "PL1",
                        "params": "wAEB8gECKAE%3D"
                    } }
                } }
            ] }
        }))
        .unwrap();

        let shuffle = menu.watch_endpoint(SHUFFLE_ICON).unwrap();
        assert_eq!(shuffle.playlist_id.as_deref(), Some("PL1"));
        assert!(menu.watch_endpoint(RADIO_ICON).is_none());
        assert!(!menu.has_icon(EDIT_ICON));
    }
}
