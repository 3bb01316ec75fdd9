//! Maps renderer nodes to domain items.
//!
//! Parsing never fails: a node lacking an id, a title or a thumbnail yields
//! `None` and is skipped by the caller, while its siblings still parse. Skips
//! are logged at TRACE level.
//!
//! # Kind Dispatch
//!
//! Renderers don't declare what they represent. [`ItemKind`] is inferred
//! once per node from its navigation target and then selects one builder
//! per variant. See [`MusicTwoRowItemRenderer::kind`] and
//! [`MusicResponsiveListItemRenderer::kind`].
//!
//! # Artists
//!
//! Artist credits are found by [`artists_by_page_type`] and, only when that
//! finds nothing, by the positional [`artists_by_position`].

use crate::{
    item::{Album, AlbumItem, Artist, ArtistItem, PlaylistItem, Section, SongItem, YTItem},
    protocol::innertube::{
        endpoint::{BrowseEndpoint, NavigationEndpoint, PageType, WatchEndpoint},
        renderer::{
            is_explicit, ItemKind, Menu, MusicCarouselShelfRenderer,
            MusicResponsiveListItemRenderer, MusicShelfRenderer, MusicTwoRowItemRenderer,
            PlaylistPanelVideoRenderer, RendererNode, EDIT_ICON, RADIO_ICON, SHUFFLE_ICON,
        },
        runs::{odd_elements, Run, Runs},
    },
    util::parse_time,
};

/// Browse ids of playlists carry this prefix; playlist ids don't.
const PLAYLIST_BROWSE_PREFIX: &str = "VL";

/// Flex column holding the album link in track rows. The column layout is
/// not stable across upstream format versions.
const ALBUM_COLUMN: usize = 2;

/// Maps a shelf or carousel to a section. Sections without any parseable
/// item are dropped.
#[must_use]
pub fn parse_section(node: &RendererNode) -> Option<Section> {
    let section = match node {
        RendererNode::MusicCarouselShelf(carousel) => carousel_section(carousel),
        RendererNode::MusicShelf(shelf) => shelf_section(shelf),
        _ => None,
    };

    if section.is_none() {
        trace!("skipping section {}", node_name(node));
    }
    section
}

/// Maps an item renderer to the item it represents.
#[must_use]
pub fn parse_item(node: &RendererNode) -> Option<YTItem> {
    let item = match node {
        RendererNode::MusicTwoRowItem(renderer) => two_row_item(renderer),
        RendererNode::MusicResponsiveListItem(renderer) => row_item(renderer),
        RendererNode::PlaylistPanelVideo(renderer) => panel_song(renderer).map(YTItem::Song),
        _ => None,
    };

    if item.is_none() {
        trace!("skipping item {}", node_name(node));
    }
    item
}

/// Maps a node to a song, whatever renderer holds it. Nodes of any other
/// kind yield `None`.
#[must_use]
pub fn parse_song(node: &RendererNode) -> Option<SongItem> {
    match parse_item(node)? {
        YTItem::Song(song) => Some(song),
        _ => None,
    }
}

/// Maps a row of an album's track list. Rows there omit what the album
/// header already states, so artists and thumbnail fall back to the
/// album's.
#[must_use]
pub fn parse_album_track(node: &RendererNode, album: &AlbumItem) -> Option<SongItem> {
    let RendererNode::MusicResponsiveListItem(renderer) = node else {
        return None;
    };

    let id = renderer.video_id()?;
    let title = renderer.flex_column(0)?.first_text()?;

    let mut artists = row_artists(renderer);
    if artists.is_empty() {
        artists = album.artists.clone().unwrap_or_default();
    }

    let duration = renderer
        .fixed_column(0)
        .and_then(Runs::first_text)
        .and_then(parse_time);

    Some(SongItem {
        id: id.to_owned(),
        title: title.to_owned(),
        artists,
        album: Some(Album {
            name: album.title.clone(),
            id: album.browse_id.clone(),
        }),
        duration,
        thumbnail_url: renderer
            .thumbnail_url()
            .unwrap_or(&album.thumbnail_url)
            .to_owned(),
        explicit: is_explicit(&renderer.badges),
        play_endpoint: play_endpoint(renderer),
        set_video_id: set_video_id(renderer),
    })
}

/// Collects the runs linking to an artist page from the first of `columns`
/// that has any.
#[must_use]
pub fn artists_by_page_type<'a>(columns: impl IntoIterator<Item = &'a Runs>) -> Vec<Artist> {
    columns
        .into_iter()
        .map(|column| {
            column
                .runs
                .iter()
                .filter(|run| run.page_type().is_some_and(PageType::is_artist))
                .filter_map(artist)
                .collect::<Vec<_>>()
        })
        .find(|artists| !artists.is_empty())
        .unwrap_or_default()
}

/// Reads names from the first group of `column` by position: names and
/// joiners (`" & "`, `", "`) alternate, so every other run is an artist.
#[must_use]
pub fn artists_by_position(column: &Runs) -> Vec<Artist> {
    column
        .split_by_separator()
        .first()
        .map(|group| odd_elements(group).filter_map(artist).collect())
        .unwrap_or_default()
}

/// Finds the album credit: a run linking to an album page, else the first
/// run of the album column when it links anywhere.
#[must_use]
pub fn album_reference(renderer: &MusicResponsiveListItemRenderer) -> Option<Album> {
    let by_page_type = renderer
        .flex_columns
        .iter()
        .flat_map(|column| &column.renderer.text.runs)
        .find(|run| run.page_type().is_some_and(PageType::is_album));

    let run = by_page_type.or_else(|| {
        renderer
            .flex_column(ALBUM_COLUMN)?
            .runs
            .first()
            .filter(|run| run.browse_id().is_some())
    })?;

    Some(Album {
        name: non_empty(&run.text)?.to_owned(),
        id: run.browse_id()?.to_owned(),
    })
}

fn carousel_section(carousel: &MusicCarouselShelfRenderer) -> Option<Section> {
    let header = carousel.basic_header()?;
    let title = non_empty(&header.title.text())?.to_owned();

    let explicit_more = header
        .more_content_button
        .as_ref()
        .and_then(|button| button.navigation_endpoint());

    section(
        title,
        &carousel.contents,
        more_endpoint(explicit_more, &header.title),
    )
}

fn shelf_section(shelf: &MusicShelfRenderer) -> Option<Section> {
    let title_runs = shelf.title.as_ref()?;
    let title = non_empty(&title_runs.text())?.to_owned();

    section(
        title,
        &shelf.contents,
        more_endpoint(shelf.bottom_endpoint.as_ref(), title_runs),
    )
}

fn section(
    title: String,
    contents: &[RendererNode],
    more_endpoint: Option<BrowseEndpoint>,
) -> Option<Section> {
    let items: Vec<_> = contents.iter().filter_map(parse_item).collect();
    if items.is_empty() {
        return None;
    }

    Some(Section {
        title,
        items,
        more_endpoint,
    })
}

/// The "more" target: the explicit endpoint, else the title's link.
fn more_endpoint(explicit: Option<&NavigationEndpoint>, title: &Runs) -> Option<BrowseEndpoint> {
    explicit
        .and_then(|endpoint| endpoint.browse_endpoint.as_ref())
        .or_else(|| {
            title
                .runs
                .first()?
                .navigation_endpoint
                .as_ref()?
                .browse_endpoint
                .as_ref()
        })
        .cloned()
}

fn two_row_item(renderer: &MusicTwoRowItemRenderer) -> Option<YTItem> {
    match renderer.kind()? {
        ItemKind::Song => two_row_song(renderer).map(YTItem::Song),
        ItemKind::Album => two_row_album(renderer).map(YTItem::Album),
        ItemKind::Playlist => two_row_playlist(renderer).map(YTItem::Playlist),
        ItemKind::Artist => two_row_artist(renderer).map(YTItem::Artist),
    }
}

fn two_row_song(renderer: &MusicTwoRowItemRenderer) -> Option<SongItem> {
    let endpoint = renderer.navigation_endpoint.as_ref()?;
    let subtitle = renderer.subtitle.clone().unwrap_or_default();

    let mut artists = artists_by_page_type([&subtitle]);
    if artists.is_empty() {
        artists = artists_by_position(&subtitle);
    }

    let album = subtitle
        .runs
        .iter()
        .find(|run| run.page_type().is_some_and(PageType::is_album))
        .and_then(|run| {
            Some(Album {
                name: non_empty(&run.text)?.to_owned(),
                id: run.browse_id()?.to_owned(),
            })
        });

    Some(SongItem {
        id: endpoint.video_id()?.to_owned(),
        title: renderer.title.first_text()?.to_owned(),
        artists,
        album,
        duration: None,
        thumbnail_url: renderer.thumbnail_url()?.to_owned(),
        explicit: is_explicit(&renderer.subtitle_badges),
        play_endpoint: endpoint.watch().cloned(),
        set_video_id: None,
    })
}

fn two_row_album(renderer: &MusicTwoRowItemRenderer) -> Option<AlbumItem> {
    let subtitle = renderer.subtitle.clone().unwrap_or_default();
    let artists = artists_by_page_type([&subtitle]);

    let playlist_id = renderer
        .thumbnail_overlay
        .as_ref()
        .and_then(|overlay| overlay.play_endpoint()?.watch()?.playlist_id.as_deref())
        .and_then(non_empty)
        .or_else(|| menu_playlist_id(renderer.menu.as_ref()?))?;

    Some(AlbumItem {
        browse_id: renderer.navigation_endpoint.as_ref()?.browse_id()?.to_owned(),
        playlist_id: playlist_id.to_owned(),
        title: renderer.title.first_text()?.to_owned(),
        artists: (!artists.is_empty()).then_some(artists),
        year: subtitle.last_text().and_then(year),
        thumbnail_url: renderer.thumbnail_url()?.to_owned(),
        explicit: is_explicit(&renderer.subtitle_badges),
    })
}

fn two_row_playlist(renderer: &MusicTwoRowItemRenderer) -> Option<PlaylistItem> {
    let subtitle = renderer.subtitle.clone().unwrap_or_default();
    let browse_id = renderer.navigation_endpoint.as_ref()?.browse_id()?;
    let menu = renderer.menu.as_ref();

    Some(PlaylistItem {
        id: playlist_id(browse_id)?,
        title: renderer.title.first_text()?.to_owned(),
        author: author(&subtitle),
        song_count_text: song_count_text(&subtitle),
        thumbnail_url: renderer.thumbnail_url()?.to_owned(),
        play_endpoint: renderer
            .thumbnail_overlay
            .as_ref()
            .and_then(|overlay| overlay.play_endpoint()?.watch())
            .cloned(),
        shuffle_endpoint: menu.and_then(|menu| menu.watch_endpoint(SHUFFLE_ICON)).cloned(),
        radio_endpoint: menu.and_then(|menu| menu.watch_endpoint(RADIO_ICON)).cloned(),
        is_editable: menu.is_some_and(|menu| menu.has_icon(EDIT_ICON)),
    })
}

fn two_row_artist(renderer: &MusicTwoRowItemRenderer) -> Option<ArtistItem> {
    let menu = renderer.menu.as_ref()?;

    Some(ArtistItem {
        id: renderer.navigation_endpoint.as_ref()?.browse_id()?.to_owned(),
        title: renderer.title.first_text()?.to_owned(),
        thumbnail_url: renderer.thumbnail_url()?.to_owned(),
        channel_id: None,
        shuffle_endpoint: menu.watch_endpoint(SHUFFLE_ICON)?.clone(),
        radio_endpoint: menu.watch_endpoint(RADIO_ICON)?.clone(),
    })
}

fn row_item(renderer: &MusicResponsiveListItemRenderer) -> Option<YTItem> {
    match renderer.kind()? {
        ItemKind::Song => row_song(renderer).map(YTItem::Song),
        ItemKind::Album => row_album(renderer).map(YTItem::Album),
        ItemKind::Playlist => row_playlist(renderer).map(YTItem::Playlist),
        ItemKind::Artist => row_artist(renderer).map(YTItem::Artist),
    }
}

/// Artists of a row: by page type across the secondary columns, else by
/// position in the second column.
fn row_artists(renderer: &MusicResponsiveListItemRenderer) -> Vec<Artist> {
    let secondary = renderer
        .flex_columns
        .iter()
        .skip(1)
        .map(|column| &column.renderer.text);

    let artists = artists_by_page_type(secondary);
    if !artists.is_empty() {
        return artists;
    }

    renderer
        .flex_column(1)
        .map(artists_by_position)
        .unwrap_or_default()
}

fn row_song(renderer: &MusicResponsiveListItemRenderer) -> Option<SongItem> {
    // Search results put the duration at the end of the second column.
    let duration = renderer
        .fixed_column(0)
        .and_then(Runs::first_text)
        .or_else(|| {
            renderer
                .flex_column(1)?
                .last_text()
                .filter(|text| text.contains(':'))
        })
        .and_then(parse_time);

    Some(SongItem {
        id: renderer.video_id()?.to_owned(),
        title: renderer.flex_column(0)?.first_text()?.to_owned(),
        artists: row_artists(renderer),
        album: album_reference(renderer),
        duration,
        thumbnail_url: renderer.thumbnail_url()?.to_owned(),
        explicit: is_explicit(&renderer.badges),
        play_endpoint: play_endpoint(renderer),
        set_video_id: set_video_id(renderer),
    })
}

fn row_album(renderer: &MusicResponsiveListItemRenderer) -> Option<AlbumItem> {
    let artists = row_artists(renderer);

    let playlist_id = renderer
        .overlay
        .as_ref()
        .and_then(|overlay| overlay.play_endpoint()?.watch()?.playlist_id.as_deref())
        .and_then(non_empty)
        .or_else(|| menu_playlist_id(renderer.menu.as_ref()?))?;

    Some(AlbumItem {
        browse_id: renderer.navigation_endpoint.as_ref()?.browse_id()?.to_owned(),
        playlist_id: playlist_id.to_owned(),
        title: renderer.flex_column(0)?.first_text()?.to_owned(),
        artists: (!artists.is_empty()).then_some(artists),
        year: renderer
            .flex_column(1)
            .and_then(Runs::last_text)
            .and_then(year),
        thumbnail_url: renderer.thumbnail_url()?.to_owned(),
        explicit: is_explicit(&renderer.badges),
    })
}

fn row_playlist(renderer: &MusicResponsiveListItemRenderer) -> Option<PlaylistItem> {
    let browse_id = renderer.navigation_endpoint.as_ref()?.browse_id()?;
    let secondary = renderer.flex_column(1).cloned().unwrap_or_default();
    let menu = renderer.menu.as_ref();

    Some(PlaylistItem {
        id: playlist_id(browse_id)?,
        title: renderer.flex_column(0)?.first_text()?.to_owned(),
        author: author(&secondary),
        song_count_text: song_count_text(&secondary),
        thumbnail_url: renderer.thumbnail_url()?.to_owned(),
        play_endpoint: renderer
            .overlay
            .as_ref()
            .and_then(|overlay| overlay.play_endpoint()?.watch())
            .cloned(),
        shuffle_endpoint: menu.and_then(|menu| menu.watch_endpoint(SHUFFLE_ICON)).cloned(),
        radio_endpoint: menu.and_then(|menu| menu.watch_endpoint(RADIO_ICON)).cloned(),
        is_editable: menu.is_some_and(|menu| menu.has_icon(EDIT_ICON)),
    })
}

fn row_artist(renderer: &MusicResponsiveListItemRenderer) -> Option<ArtistItem> {
    let menu = renderer.menu.as_ref()?;

    Some(ArtistItem {
        id: renderer.navigation_endpoint.as_ref()?.browse_id()?.to_owned(),
        title: renderer.flex_column(0)?.first_text()?.to_owned(),
        thumbnail_url: renderer.thumbnail_url()?.to_owned(),
        channel_id: None,
        shuffle_endpoint: menu.watch_endpoint(SHUFFLE_ICON)?.clone(),
        radio_endpoint: menu.watch_endpoint(RADIO_ICON)?.clone(),
    })
}

fn panel_song(renderer: &PlaylistPanelVideoRenderer) -> Option<SongItem> {
    let byline = renderer.long_byline_text.clone().unwrap_or_default();

    let mut artists = artists_by_page_type([&byline]);
    if artists.is_empty() {
        artists = artists_by_position(&byline);
    }

    let album = byline
        .runs
        .iter()
        .find(|run| run.page_type().is_some_and(PageType::is_album))
        .and_then(|run| {
            Some(Album {
                name: non_empty(&run.text)?.to_owned(),
                id: run.browse_id()?.to_owned(),
            })
        });

    let id = renderer.video_id.as_deref().or_else(|| {
        renderer
            .navigation_endpoint
            .as_ref()
            .and_then(NavigationEndpoint::video_id)
    })?;

    Some(SongItem {
        id: non_empty(id)?.to_owned(),
        title: renderer.title.first_text()?.to_owned(),
        artists,
        album,
        duration: renderer
            .length_text
            .as_ref()
            .and_then(Runs::first_text)
            .and_then(parse_time),
        thumbnail_url: renderer.thumbnail.url()?.to_owned(),
        explicit: is_explicit(&renderer.badges),
        play_endpoint: renderer
            .navigation_endpoint
            .as_ref()
            .and_then(NavigationEndpoint::watch)
            .cloned(),
        set_video_id: None,
    })
}

fn play_endpoint(renderer: &MusicResponsiveListItemRenderer) -> Option<WatchEndpoint> {
    renderer
        .overlay
        .as_ref()
        .and_then(|overlay| overlay.play_endpoint()?.watch())
        .or_else(|| {
            renderer
                .flex_column(0)?
                .runs
                .first()?
                .navigation_endpoint
                .as_ref()?
                .watch()
        })
        .cloned()
}

fn set_video_id(renderer: &MusicResponsiveListItemRenderer) -> Option<String> {
    renderer
        .playlist_item_data
        .as_ref()?
        .playlist_set_video_id
        .clone()
}

/// Playlist behind the shuffle or radio entry of a menu.
fn menu_playlist_id(menu: &Menu) -> Option<&str> {
    [SHUFFLE_ICON, RADIO_ICON]
        .into_iter()
        .find_map(|icon| non_empty(menu.watch_endpoint(icon)?.playlist_id.as_deref()?))
}

fn artist(run: &Run) -> Option<Artist> {
    Some(Artist {
        name: non_empty(run.text.trim())?.to_owned(),
        id: run.browse_id().map(ToOwned::to_owned),
    })
}

/// The first run of `runs` linking to a page, as the playlist owner.
fn author(runs: &Runs) -> Option<Artist> {
    runs.runs
        .iter()
        .find(|run| run.browse_id().is_some())
        .and_then(artist)
}

/// The last group of `runs` when it states a count, e.g. `"42 songs"`.
fn song_count_text(runs: &Runs) -> Option<String> {
    let groups = runs.split_by_separator();
    if groups.len() < 2 {
        return None;
    }

    let text: String = groups
        .last()?
        .iter()
        .map(|run| run.text.as_str())
        .collect();
    text.contains(|c: char| c.is_ascii_digit()).then_some(text)
}

/// Strips the `VL` browse prefix from a playlist browse id.
fn playlist_id(browse_id: &str) -> Option<String> {
    let id = browse_id
        .strip_prefix(PLAYLIST_BROWSE_PREFIX)
        .unwrap_or(browse_id);
    non_empty(id).map(ToOwned::to_owned)
}

fn year(text: &str) -> Option<u32> {
    let text = text.trim();
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

fn node_name(node: &RendererNode) -> &'static str {
    match node {
        RendererNode::MusicShelf(_) => "musicShelfRenderer",
        RendererNode::MusicCarouselShelf(_) => "musicCarouselShelfRenderer",
        RendererNode::MusicPlaylistShelf(_) => "musicPlaylistShelfRenderer",
        RendererNode::MusicResponsiveListItem(_) => "musicResponsiveListItemRenderer",
        RendererNode::MusicTwoRowItem(_) => "musicTwoRowItemRenderer",
        RendererNode::PlaylistPanelVideo(_) => "playlistPanelVideoRenderer",
        RendererNode::ContinuationItem(_) => "continuationItemRenderer",
        RendererNode::MusicResponsiveHeader(_) => "musicResponsiveHeaderRenderer",
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::{json, Value};

    use super::*;

    fn node(value: Value) -> RendererNode {
        serde_json::from_value(value).unwrap()
    }

    fn thumbnail() -> Value {
        json!({ "musicThumbnailRenderer": { "thumbnail": { "thumbnails": [
            { "url": "https://lh3/small", "width": 60, "height": 60 },
            { "url": "https://lh3/large", "width": 544, "height": 544 }
        ] } } })
    }

    fn browse(id: &str, page_type: &str) -> Value {
        json!({ "browseEndpoint": {
            "browseId": id,
            "browseEndpointContextSupportedConfigs": {
                "browseEndpointContextMusicConfig": { "pageType": page_type }
            }
        } })
    }

    fn menu() -> Value {
        json!({ "menuRenderer": { "items": [
            { "menuNavigationItemRenderer": {
                "icon": { "iconType": "MUSIC_SHUFFLE" },
                "navigationEndpoint": { "watchPlaylistEndpoint": {
                    "playlistId": "RDAO1",
                    "params": "wAEB8gECKAE%3D"
                } }
            } },
            { "menuNavigationItemRenderer": {
                "icon": { "iconType": "MIX" },
                "navigationEndpoint": {
                    "watchPlaylistEndpoint": { "playlistId": "RDEM1", "params": "wAEB" }
                }
            } }
        ] } })
    }

    fn song_row() -> Value {
        json!({ "musicResponsiveListItemRenderer": {
            "thumbnail": thumbnail(),
            "flexColumns": [
                { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [
                    {
                        "text": "Song",
                        "navigationEndpoint": { "watchEndpoint": { "videoId": "v1" } }
                    }
                ] } } },
                { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [
                    { "text": "A", "navigationEndpoint": browse("UC1", "MUSIC_PAGE_TYPE_ARTIST") },
                    { "text": " & " },
                    { "text": "B", "navigationEndpoint": browse("UC2", "MUSIC_PAGE_TYPE_ARTIST") }
                ] } } },
                { "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [
                    {
                        "text": "Album",
                        "navigationEndpoint": browse("MPREb_1", "MUSIC_PAGE_TYPE_ALBUM")
                    }
                ] } } }
            ],
            "fixedColumns": [
                { "musicResponsiveListItemFixedColumnRenderer": {
                    "text": { "runs": [{ "text": "3:45" }] }
                } }
            ],
            "badges": [{ "musicInlineBadgeRenderer": {
                "icon": { "iconType": "MUSIC_EXPLICIT_BADGE" }
            } }],
            "playlistItemData": { "videoId": "v1", "playlistSetVideoId": "set1" }
        } })
    }

    #[test]
    fn parses_song_row() {
        let Some(YTItem::Song(song)) = parse_item(&node(song_row())) else {
            panic!("expected a song");
        };

        assert_eq!(song.id, "v1");
        assert_eq!(song.title, "Song");
        assert_eq!(song.artists.len(), 2);
        assert_eq!(song.artists[1].id.as_deref(), Some("UC2"));
        assert_eq!(song.album.unwrap().id, "MPREb_1");
        assert_eq!(song.duration, Some(Duration::from_secs(225)));
        assert_eq!(song.thumbnail_url, "https://lh3/large");
        assert!(song.explicit);
        assert_eq!(song.set_video_id.as_deref(), Some("set1"));
    }

    #[test]
    fn missing_required_fields_yield_none() {
        let mut without_thumbnail = song_row();
        without_thumbnail["musicResponsiveListItemRenderer"]
            .as_object_mut()
            .unwrap()
            .remove("thumbnail");
        assert!(parse_item(&node(without_thumbnail)).is_none());

        let mut without_title = song_row();
        without_title["musicResponsiveListItemRenderer"]["flexColumns"][0]
            ["musicResponsiveListItemFlexColumnRenderer"]["text"]["runs"][0]["text"] = json!("");
        assert!(parse_item(&node(without_title)).is_none());

        let mut without_id = song_row();
        let row = without_id["musicResponsiveListItemRenderer"].as_object_mut().unwrap();
        row.remove("playlistItemData");
        row["flexColumns"][0]["musicResponsiveListItemFlexColumnRenderer"]["text"]["runs"][0]
            .as_object_mut()
            .unwrap()
            .remove("navigationEndpoint");
        assert!(parse_item(&node(without_id)).is_none());

        let mut empty_video_id = song_row();
        empty_video_id["musicResponsiveListItemRenderer"]["playlistItemData"]["videoId"] =
            json!("");
        empty_video_id["musicResponsiveListItemRenderer"]["flexColumns"][0]
            ["musicResponsiveListItemFlexColumnRenderer"]["text"]["runs"][0]["navigationEndpoint"]
            ["watchEndpoint"]["videoId"] = json!("");
        assert!(parse_item(&node(empty_video_id)).is_none());

        let mut empty_album_id = song_row();
        empty_album_id["musicResponsiveListItemRenderer"]["flexColumns"][2] = json!({
            "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [
                { "text": "Album", "navigationEndpoint": browse("", "MUSIC_PAGE_TYPE_ALBUM") }
            ] } }
        });
        let song = parse_song(&node(empty_album_id)).unwrap();
        assert!(song.album.is_none());
    }

    #[test]
    fn empty_ids_are_missing_ids() {
        let song_card = json!({ "musicTwoRowItemRenderer": {
            "title": { "runs": [{ "text": "Single" }] },
            "thumbnailRenderer": thumbnail(),
            "navigationEndpoint": { "watchEndpoint": { "videoId": "" } }
        } });
        assert!(parse_item(&node(song_card)).is_none());

        let artist_card = json!({ "musicTwoRowItemRenderer": {
            "title": { "runs": [{ "text": "A" }] },
            "thumbnailRenderer": thumbnail(),
            "navigationEndpoint": browse("", "MUSIC_PAGE_TYPE_ARTIST"),
            "menu": menu()
        } });
        assert!(parse_item(&node(artist_card)).is_none());

        let album_card = json!({ "musicTwoRowItemRenderer": {
            "title": { "runs": [{ "text": "Album" }] },
            "thumbnailRenderer": thumbnail(),
            "navigationEndpoint": browse("", "MUSIC_PAGE_TYPE_ALBUM"),
            "menu": menu()
        } });
        assert!(parse_item(&node(album_card)).is_none());

        // An empty overlay playlist id falls back to the menu.
        let album_card = json!({ "musicTwoRowItemRenderer": {
            "title": { "runs": [{ "text": "Album" }] },
            "thumbnailRenderer": thumbnail(),
            "navigationEndpoint": browse("MPREb_1", "MUSIC_PAGE_TYPE_ALBUM"),
            "thumbnailOverlay": { "musicItemThumbnailOverlayRenderer": { "content": {
                "musicPlayButtonRenderer": { "playNavigationEndpoint": {
                    "watchPlaylistEndpoint": { "playlistId": "" }
                } }
            } } },
            "menu": menu()
        } });
        let Some(YTItem::Album(album)) = parse_item(&node(album_card)) else {
            panic!("expected an album");
        };
        assert_eq!(album.playlist_id, "RDAO1");
    }

    #[test]
    fn alternating_runs_give_one_artist_per_name() {
        let runs: Runs = serde_json::from_value(json!({ "runs": [
            { "text": "A" }, { "text": ", " },
            { "text": "B" }, { "text": ", " },
            { "text": "C" }, { "text": " & " }
        ] }))
        .unwrap();

        let names: Vec<_> = artists_by_position(&runs)
            .into_iter()
            .map(|artist| artist.name)
            .collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn positional_fallback_without_page_types() {
        let mut row = song_row();
        row["musicResponsiveListItemRenderer"]["flexColumns"][1] = json!({
            "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [
                { "text": "A" }, { "text": " & " }, { "text": "B" }
            ] } }
        });

        let song = parse_song(&node(row)).unwrap();
        let names: Vec<_> = song.artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert!(song.artists.iter().all(|a| a.id.is_none()));
    }

    #[test]
    fn album_falls_back_to_third_column() {
        let mut row = song_row();
        row["musicResponsiveListItemRenderer"]["flexColumns"][2] = json!({
            "musicResponsiveListItemFlexColumnRenderer": { "text": { "runs": [
                {
                    "text": "Album",
                    "navigationEndpoint": { "browseEndpoint": { "browseId": "MPREb_2" } }
                }
            ] } }
        });

        let song = parse_song(&node(row)).unwrap();
        assert_eq!(
            song.album,
            Some(Album {
                name: "Album".to_owned(),
                id: "MPREb_2".to_owned()
            })
        );
    }

    #[test]
    fn two_row_with_video_and_album_is_song() {
        let mut endpoint = browse("MPREb_1", "MUSIC_PAGE_TYPE_ALBUM");
        endpoint["watchEndpoint"] = json!({ "videoId": "v9" });

        let item = parse_item(&node(json!({ "musicTwoRowItemRenderer": {
            "title": { "runs": [{ "text": "Single" }] },
            "subtitle": { "runs": [
                { "text": "Artist", "navigationEndpoint": browse("UC1", "MUSIC_PAGE_TYPE_ARTIST") }
            ] },
            "thumbnailRenderer": thumbnail(),
            "navigationEndpoint": endpoint
        } })))
        .unwrap();

        assert!(matches!(item, YTItem::Song(ref song) if song.id == "v9"));
    }

    #[test]
    fn parses_two_row_album() {
        let item = parse_item(&node(json!({ "musicTwoRowItemRenderer": {
            "title": { "runs": [{ "text": "Album" }] },
            "subtitle": { "runs": [
                { "text": "Album" }, { "text": " • " },
                { "text": "A", "navigationEndpoint": browse("UC1", "MUSIC_PAGE_TYPE_ARTIST") },
                { "text": " • " }, { "text": "2021" }
            ] },
            "thumbnailRenderer": thumbnail(),
            "navigationEndpoint": browse("MPREb_1", "MUSIC_PAGE_TYPE_ALBUM"),
            "thumbnailOverlay": { "musicItemThumbnailOverlayRenderer": { "content": {
                "musicPlayButtonRenderer": { "playNavigationEndpoint": {
                    "watchPlaylistEndpoint": { "playlistId": "OLAK5uy_1" }
                } }
            } } }
        } })))
        .unwrap();

        let YTItem::Album(album) = item else {
            panic!("expected an album");
        };
        assert_eq!(album.browse_id, "MPREb_1");
        assert_eq!(album.playlist_id, "OLAK5uy_1");
        assert_eq!(album.year, Some(2021));
        assert_eq!(album.artists.unwrap()[0].name, "A");
    }

    #[test]
    fn playlist_strips_browse_prefix() {
        let item = parse_item(&node(json!({ "musicTwoRowItemRenderer": {
            "title": { "runs": [{ "text": "Mix" }] },
            "subtitle": { "runs": [
                { "text": "Playlist" }, { "text": " • " },
                {
                    "text": "Owner",
                    "navigationEndpoint": browse("UC9", "MUSIC_PAGE_TYPE_USER_CHANNEL")
                },
                { "text": " • " }, { "text": "42 songs" }
            ] },
            "thumbnailRenderer": thumbnail(),
            "navigationEndpoint": browse("VLPL123", "MUSIC_PAGE_TYPE_PLAYLIST"),
            "menu": menu()
        } })))
        .unwrap();

        let YTItem::Playlist(playlist) = item else {
            panic!("expected a playlist");
        };
        assert_eq!(playlist.id, "PL123");
        assert_eq!(playlist.author.unwrap().name, "Owner");
        assert_eq!(playlist.song_count_text.as_deref(), Some("42 songs"));
        assert_eq!(
            playlist.shuffle_endpoint.unwrap().playlist_id.as_deref(),
            Some("RDAO1")
        );
        assert!(!playlist.is_editable);
    }

    #[test]
    fn artist_requires_menu_endpoints() {
        let artist = json!({ "musicTwoRowItemRenderer": {
            "title": { "runs": [{ "text": "A" }] },
            "thumbnailRenderer": thumbnail(),
            "navigationEndpoint": browse("UC1", "MUSIC_PAGE_TYPE_ARTIST"),
            "menu": menu()
        } });
        let Some(YTItem::Artist(parsed)) = parse_item(&node(artist.clone())) else {
            panic!("expected an artist");
        };
        assert_eq!(parsed.radio_endpoint.playlist_id.as_deref(), Some("RDEM1"));

        let mut without_menu = artist;
        without_menu["musicTwoRowItemRenderer"]
            .as_object_mut()
            .unwrap()
            .remove("menu");
        assert!(parse_item(&node(without_menu)).is_none());
    }

    #[test]
    fn carousel_becomes_section() {
        let section = parse_section(&node(json!({ "musicCarouselShelfRenderer": {
            "header": { "musicCarouselShelfBasicHeaderRenderer": {
                "title": { "runs": [{ "text": "Quick picks" }] },
                "moreContentButton": { "buttonRenderer": {
                    "navigationEndpoint": { "browseEndpoint": { "browseId": "FEmusic_more" } }
                } }
            } },
            "contents": [song_row(), { "musicTwoRowItemRenderer": {} }]
        } })))
        .unwrap();

        assert_eq!(section.title, "Quick picks");
        assert_eq!(section.items.len(), 1);
        assert_eq!(section.more_endpoint.unwrap().browse_id, "FEmusic_more");
    }

    #[test]
    fn empty_section_is_dropped() {
        let carousel = node(json!({ "musicCarouselShelfRenderer": {
            "header": { "musicCarouselShelfBasicHeaderRenderer": {
                "title": { "runs": [{ "text": "Nothing" }] }
            } },
            "contents": [{ "musicTwoRowItemRenderer": { "title": { "runs": [{ "text": "x" }] } } }]
        } }));
        assert!(parse_section(&carousel).is_none());
    }

    #[test]
    fn shelf_more_from_title_link() {
        let section = parse_section(&node(json!({ "musicShelfRenderer": {
            "title": { "runs": [{
                "text": "Songs",
                "navigationEndpoint": { "browseEndpoint": { "browseId": "VLOLAK", "params": "p" } }
            }] },
            "contents": [song_row()]
        } })))
        .unwrap();

        let more = section.more_endpoint.unwrap();
        assert_eq!(more.browse_id, "VLOLAK");
        assert_eq!(more.params.as_deref(), Some("p"));
    }

    #[test]
    fn album_track_inherits_album() {
        let album = AlbumItem {
            browse_id: "MPREb_1".to_owned(),
            playlist_id: "OLAK5uy_1".to_owned(),
            title: "Album".to_owned(),
            artists: Some(vec![Artist {
                name: "A".to_owned(),
                id: Some("UC1".to_owned()),
            }]),
            year: Some(2021),
            thumbnail_url: "https://lh3/album".to_owned(),
            explicit: false,
        };

        let track = node(json!({ "musicResponsiveListItemRenderer": {
            "flexColumns": [
                { "musicResponsiveListItemFlexColumnRenderer": {
                    "text": { "runs": [{ "text": "Track" }] }
                } },
                { "musicResponsiveListItemFlexColumnRenderer": { "text": {} } }
            ],
            "fixedColumns": [
                { "musicResponsiveListItemFixedColumnRenderer": {
                    "text": { "runs": [{ "text": "1:02:03" }] }
                } }
            ],
            "playlistItemData": { "videoId": "t1" }
        } }));

        let song = parse_album_track(&track, &album).unwrap();
        assert_eq!(song.artists, album.artists.clone().unwrap());
        assert_eq!(song.thumbnail_url, "https://lh3/album");
        assert_eq!(song.album.unwrap().name, "Album");
        assert_eq!(song.duration, Some(Duration::from_secs(3723)));
    }

    #[test]
    fn panel_video_becomes_song() {
        let song = parse_song(&node(json!({ "playlistPanelVideoRenderer": {
            "videoId": "v1",
            "title": { "runs": [{ "text": "Song" }] },
            "longBylineText": { "runs": [
                { "text": "A", "navigationEndpoint": browse("UC1", "MUSIC_PAGE_TYPE_ARTIST") },
                { "text": " • " },
                {
                    "text": "Album",
                    "navigationEndpoint": browse("MPREb_1", "MUSIC_PAGE_TYPE_ALBUM")
                },
                { "text": " • " },
                { "text": "2020" }
            ] },
            "lengthText": { "runs": [{ "text": "4:01" }] },
            "thumbnail": { "thumbnails": [{ "url": "https://i.ytimg/1" }] },
            "navigationEndpoint": { "watchEndpoint": { "videoId": "v1", "playlistId": "RDAMVMv1" } }
        } })))
        .unwrap();

        assert_eq!(song.artists[0].name, "A");
        assert_eq!(song.album.unwrap().id, "MPREb_1");
        assert_eq!(song.duration, Some(Duration::from_secs(241)));
        assert_eq!(
            song.play_endpoint.unwrap().playlist_id.as_deref(),
            Some("RDAMVMv1")
        );
    }
}
