//! Page assembly: lists of parsed items with an opaque continuation token.
//!
//! A [`Page`] maps each renderer node through the parser, drops the nodes
//! that don't parse and carries the continuation token exactly as received.
//! Absence of a token means the end of the list. Fetching the next page is
//! up to the caller, who hands the token back to the InnerTube client.
//!
//! The page structs below build on [`Page`] for the individual browse,
//! search and next responses. Their builders return `None` when the
//! response lacks the part that identifies the page (typically the header),
//! never an error.

use serde::{Deserialize, Serialize};

use crate::{
    item::{AlbumItem, Artist, ArtistItem, PlaylistItem, Section, SongItem, YTItem},
    parser::{self, artists_by_page_type},
    protocol::innertube::{
        endpoint::WatchEndpoint,
        renderer::{is_explicit, trailing_continuation, RendererNode, RADIO_ICON, SHUFFLE_ICON},
        response::{BrowseResponse, NextResponse, SearchResponse},
    },
};

/// Types that can be parsed from a single renderer node.
pub trait Parse: Sized {
    fn parse(node: &RendererNode) -> Option<Self>;
}

impl Parse for YTItem {
    fn parse(node: &RendererNode) -> Option<Self> {
        parser::parse_item(node)
    }
}

impl Parse for Section {
    fn parse(node: &RendererNode) -> Option<Self> {
        parser::parse_section(node)
    }
}

impl Parse for SongItem {
    fn parse(node: &RendererNode) -> Option<Self> {
        parser::parse_song(node)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub continuation: Option<String>,
}

impl<T: Parse> Page<T> {
    /// Parses `contents`, skipping nodes that don't parse, and attaches
    /// `continuation` unchanged.
    #[must_use]
    pub fn assemble(contents: &[RendererNode], continuation: Option<String>) -> Self {
        Self {
            items: contents.iter().filter_map(T::parse).collect(),
            continuation,
        }
    }
}

impl<T> Page<T> {
    /// Whether more items can be fetched with [`Page::continuation`].
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.continuation.is_some()
    }
}

/// The home feed: sections of recommendations.
pub type HomePage = Page<Section>;

impl Page<Section> {
    #[must_use]
    pub fn from_response(response: &BrowseResponse) -> Option<Self> {
        let list = response.section_list()?;
        Some(Self::assemble(&list.contents, list.continuation()))
    }

    #[must_use]
    pub fn from_continuation(response: &BrowseResponse) -> Option<Self> {
        let list = response
            .continuation_contents
            .as_ref()?
            .section_list_continuation
            .as_ref()?;
        Some(Self::assemble(&list.contents, list.continuation()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ArtistPage {
    pub artist: ArtistItem,
    pub sections: Vec<Section>,
    pub description: Option<String>,
}

impl ArtistPage {
    /// Builds the page of the artist browsed as `browse_id`.
    #[must_use]
    pub fn from_response(browse_id: &str, response: &BrowseResponse) -> Option<Self> {
        if browse_id.is_empty() {
            return None;
        }
        let header = response.header.as_ref()?.artist()?;

        let artist = ArtistItem {
            id: browse_id.to_owned(),
            title: header.title.first_text()?.to_owned(),
            thumbnail_url: header.thumbnail_url()?.to_owned(),
            channel_id: header.channel_id().map(ToOwned::to_owned),
            shuffle_endpoint: header
                .play_button
                .as_ref()?
                .navigation_endpoint()?
                .watch()?
                .clone(),
            radio_endpoint: header
                .start_radio_button
                .as_ref()?
                .navigation_endpoint()?
                .watch()?
                .clone(),
        };

        let sections = response
            .section_list()
            .map(|list| list.contents.iter().filter_map(Section::parse).collect())
            .unwrap_or_default();

        let description = header
            .description
            .as_ref()
            .map(|runs| runs.text())
            .filter(|text| !text.is_empty());

        Some(Self {
            artist,
            sections,
            description,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct AlbumPage {
    pub album: AlbumItem,
    pub songs: Vec<SongItem>,
}

impl AlbumPage {
    /// Builds the page of the album browsed as `browse_id`.
    ///
    /// The album's playlist id comes from the canonical URL, else from the
    /// header menu.
    #[must_use]
    pub fn from_response(browse_id: &str, response: &BrowseResponse) -> Option<Self> {
        if browse_id.is_empty() {
            return None;
        }
        let (header, _) = response.detail_header()?;

        let playlist_id = response.canonical_playlist_id().or_else(|| {
            let menu = header.menu.as_ref()?;
            [SHUFFLE_ICON, RADIO_ICON]
                .into_iter()
                .find_map(|icon| menu.watch_endpoint(icon)?.playlist_id.clone())
                .filter(|id| !id.is_empty())
        })?;

        let artists = artists_by_page_type(
            [Some(&header.subtitle), header.strapline_text_one.as_ref()]
                .into_iter()
                .flatten(),
        );

        let album = AlbumItem {
            browse_id: browse_id.to_owned(),
            playlist_id,
            title: header.title.first_text()?.to_owned(),
            artists: (!artists.is_empty()).then_some(artists),
            year: header
                .subtitle
                .last_text()
                .and_then(|text| text.trim().parse().ok())
                .filter(|year| (1000..=9999).contains(year)),
            thumbnail_url: header.thumbnail.as_ref()?.url()?.to_owned(),
            explicit: is_explicit(&header.subtitle_badges),
        };

        let shelf = response
            .secondary_section_list()
            .and_then(|list| list.music_shelf())
            .or_else(|| response.section_list()?.music_shelf());

        let songs = shelf
            .map(|shelf| {
                shelf
                    .contents
                    .iter()
                    .filter_map(|node| parser::parse_album_track(node, &album))
                    .collect()
            })
            .unwrap_or_default();

        Some(Self { album, songs })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PlaylistPage {
    pub playlist: PlaylistItem,
    pub songs: Page<SongItem>,
}

impl PlaylistPage {
    /// Builds the page of the playlist browsed as `browse_id`.
    #[must_use]
    pub fn from_response(browse_id: &str, response: &BrowseResponse) -> Option<Self> {
        let (header, editable) = response.detail_header()?;
        let id = browse_id.strip_prefix("VL").unwrap_or(browse_id);
        if id.is_empty() {
            return None;
        }

        let author = [Some(&header.subtitle), header.strapline_text_one.as_ref()]
            .into_iter()
            .flatten()
            .flat_map(|runs| &runs.runs)
            .find(|run| run.browse_id().is_some())
            .map(|run| Artist {
                name: run.text.clone(),
                id: run.browse_id().map(ToOwned::to_owned),
            });

        let menu = header.menu.as_ref();
        let playlist = PlaylistItem {
            id: id.to_owned(),
            title: header.title.first_text()?.to_owned(),
            author,
            song_count_text: header.second_subtitle.first_text().map(ToOwned::to_owned),
            thumbnail_url: header.thumbnail.as_ref()?.url()?.to_owned(),
            play_endpoint: Some(WatchEndpoint {
                playlist_id: Some(id.to_owned()),
                ..WatchEndpoint::default()
            }),
            shuffle_endpoint: menu.and_then(|menu| menu.watch_endpoint(SHUFFLE_ICON)).cloned(),
            radio_endpoint: menu.and_then(|menu| menu.watch_endpoint(RADIO_ICON)).cloned(),
            is_editable: editable,
        };

        let shelf = response
            .secondary_section_list()
            .and_then(|list| list.playlist_shelf())
            .or_else(|| response.section_list()?.playlist_shelf());

        let songs = shelf.map_or_else(
            || Page {
                items: Vec::new(),
                continuation: None,
            },
            |shelf| Page::assemble(&shelf.contents, shelf.continuation()),
        );

        Some(Self { playlist, songs })
    }

    /// Next page of songs, from either continuation style.
    #[must_use]
    pub fn continuation(response: &BrowseResponse) -> Option<Page<SongItem>> {
        if let Some(shelf) = response
            .continuation_contents
            .as_ref()
            .and_then(|contents| contents.music_playlist_shelf_continuation.as_ref())
        {
            return Some(Page::assemble(&shelf.contents, shelf.continuation()));
        }

        let appended: Vec<_> = response.appended_items().cloned().collect();
        if appended.is_empty() {
            return None;
        }
        let continuation = trailing_continuation(&appended);
        Some(Page::assemble(&appended, continuation))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct SearchResult {
    pub items: Page<YTItem>,
}

impl SearchResult {
    /// Items of every result shelf, in order. The continuation is the last
    /// shelf's.
    #[must_use]
    pub fn from_response(response: &SearchResponse) -> Option<Self> {
        let list = response.section_list()?;
        let shelves: Vec<_> = list
            .contents
            .iter()
            .filter_map(|node| match node {
                RendererNode::MusicShelf(shelf) => Some(shelf),
                _ => None,
            })
            .collect();

        let items = shelves
            .iter()
            .flat_map(|shelf| &shelf.contents)
            .filter_map(YTItem::parse)
            .collect();

        Some(Self {
            items: Page {
                items,
                continuation: shelves.last().and_then(|shelf| shelf.continuation()),
            },
        })
    }

    #[must_use]
    pub fn from_continuation(response: &SearchResponse) -> Option<Self> {
        let shelf = response
            .continuation_contents
            .as_ref()?
            .music_shelf_continuation
            .as_ref()?;

        Some(Self {
            items: Page::assemble(&shelf.contents, shelf.continuation()),
        })
    }
}

/// The play queue started by a watch endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct NextResult {
    pub title: Option<String>,
    pub items: Vec<SongItem>,

    /// Position of the selected song in `items`.
    pub current_index: Option<usize>,

    pub continuation: Option<String>,
}

impl NextResult {
    #[must_use]
    pub fn from_response(response: &NextResponse) -> Option<Self> {
        let panel = response.playlist_panel()?;
        Some(Self::from_panel(
            panel.title.clone(),
            &panel.contents,
            panel.continuation(),
        ))
    }

    #[must_use]
    pub fn from_continuation(response: &NextResponse) -> Option<Self> {
        let panel = response
            .continuation_contents
            .as_ref()?
            .playlist_panel_continuation
            .as_ref()?;
        Some(Self::from_panel(
            panel.title.clone(),
            &panel.contents,
            panel.continuation(),
        ))
    }

    fn from_panel(
        title: Option<String>,
        contents: &[RendererNode],
        continuation: Option<String>,
    ) -> Self {
        let mut items = Vec::with_capacity(contents.len());
        let mut current_index = None;

        for node in contents {
            let Some(song) = SongItem::parse(node) else {
                continue;
            };
            if matches!(node, RendererNode::PlaylistPanelVideo(video) if video.selected) {
                current_index = Some(items.len());
            }
            items.push(song);
        }

        Self {
            title,
            items,
            current_index,
            continuation,
        }
    }
}
