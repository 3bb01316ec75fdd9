//! Response of the `player` endpoint: playability and stream formats.
//!
//! # Wire Format
//!
//! ```json
//! {
//!     "playabilityStatus": { "status": "OK" },
//!     "streamingData": {
//!         "expiresInSeconds": "21540",
//!         "adaptiveFormats": [{
//!             "itag": 251,
//!             "mimeType": "audio/webm; codecs=\"opus\"",
//!             "bitrate": 135495,
//!             "contentLength": "3436551",
//!             "audioQuality": "AUDIO_QUALITY_MEDIUM",
//!             "approxDurationMs": "212061",
//!             "audioSampleRate": "48000",
//!             "loudnessDb": -3.42,
//!             "signatureCipher": "s=...&sp=sig&url=https%3A%2F%2F..."
//!         }]
//!     },
//!     "videoDetails": { "videoId": "dQw4w9WgXcQ", "title": "...", "lengthSeconds": "212" }
//! }
//! ```
//!
//! Formats carry either a ready `url` or a `signatureCipher` that has to be
//! resolved through the stream resolver.

use std::time::Duration;

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr, DurationSeconds, VecSkipError};
use veil::Redact;

use super::renderer::Thumbnails;
use crate::{
    error::{Error, Result},
    stream::StreamDescriptor,
};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub playability_status: PlayabilityStatus,
    pub streaming_data: Option<StreamingData>,
    pub video_details: Option<VideoDetails>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PlayabilityStatus {
    pub status: String,
    pub reason: Option<String>,
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamingData {
    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub formats: Vec<Format>,

    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub adaptive_formats: Vec<Format>,

    /// Lifetime of the stream URLs.
    #[serde_as(as = "Option<DurationSeconds<String>>")]
    #[serde(default)]
    pub expires_in_seconds: Option<Duration>,
}

#[serde_as]
#[derive(Clone, PartialEq, Deserialize, Redact)]
#[serde(rename_all = "camelCase")]
pub struct Format {
    pub itag: u32,

    #[redact]
    pub url: Option<String>,

    #[serde(alias = "cipher")]
    #[redact]
    pub signature_cipher: Option<String>,

    pub mime_type: String,

    #[serde(default)]
    pub bitrate: u64,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub content_length: Option<u64>,

    pub audio_quality: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub approx_duration_ms: Option<u64>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub audio_sample_rate: Option<u32>,

    /// Loudness relative to the service's target level, in dB.
    pub loudness_db: Option<f64>,
}

impl Format {
    #[must_use]
    pub fn is_audio(&self) -> bool {
        self.mime_type.starts_with("audio/")
    }

    /// Where to get the stream: the direct URL, else the cipher blob.
    #[must_use]
    pub fn descriptor(&self) -> StreamDescriptor {
        StreamDescriptor {
            direct_url: self.url.clone(),
            cipher_blob: self.signature_cipher.clone(),
        }
    }
}

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub video_id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub author: String,

    pub channel_id: Option<String>,

    #[serde_as(as = "Option<DurationSeconds<String>>")]
    #[serde(default)]
    pub length_seconds: Option<Duration>,

    pub thumbnail: Option<Thumbnails>,
}

impl PlayerResponse {
    /// Maps a playability status other than `OK` to an error carrying the
    /// upstream reason.
    ///
    /// # Errors
    ///
    /// * `Unauthenticated` for `LOGIN_REQUIRED` (age or account gated)
    /// * `PermissionDenied` for `UNPLAYABLE` (e.g. region locked)
    /// * `NotFound` for `ERROR` (removed or nonexistent video)
    /// * `FailedPrecondition` for anything else
    pub fn ensure_playable(&self) -> Result<()> {
        let status = &self.playability_status;
        let reason = status
            .reason
            .clone()
            .unwrap_or_else(|| status.status.clone());

        match status.status.as_str() {
            "OK" => Ok(()),
            "LOGIN_REQUIRED" => Err(Error::unauthenticated(reason)),
            "UNPLAYABLE" => Err(Error::permission_denied(reason)),
            "ERROR" => Err(Error::not_found(reason)),
            _ => Err(Error::failed_precondition(reason)),
        }
    }

    /// All formats, muxed and adaptive.
    pub fn formats(&self) -> impl Iterator<Item = &Format> {
        self.streaming_data
            .iter()
            .flat_map(|data| data.formats.iter().chain(&data.adaptive_formats))
    }

    /// The audio-only format with the highest bitrate.
    #[must_use]
    pub fn best_audio_format(&self) -> Option<&Format> {
        self.formats()
            .filter(|format| format.is_audio())
            .max_by_key(|format| format.bitrate)
    }
}
