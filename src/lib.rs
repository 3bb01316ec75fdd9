//! Client core for the InnerTube music API.
//!
//! Normalizes renderer JSON trees into songs, albums, artists and playlists
//! ([`item`], [`page`]) and resolves playable stream URLs through an injected
//! player engine ([`stream`]). [`innertube::InnerTube`] ties both to HTTP.
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod http;
pub mod innertube;
pub mod item;
pub mod page;
pub mod parser;
pub mod protocol;
pub mod stream;
pub mod util;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use innertube::InnerTube;
pub use item::{AlbumItem, ArtistItem, PlaylistItem, Section, SongItem, YTItem};
pub use page::{AlbumPage, ArtistPage, HomePage, NextResult, Page, PlaylistPage, SearchResult};
pub use stream::{Backoff, PlayerEngine, StreamDescriptor, StreamResolver};
