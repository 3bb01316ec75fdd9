//! Resolution of playable stream URLs.
//!
//! A format returned by the player endpoint carries either a direct URL or
//! a *signature cipher*: a query-string blob holding a scrambled signature
//! (`s`), the name of the parameter the signature belongs in (`sp`) and the
//! base URL (`url`). Unscrambling is done by the service's own player
//! script, which an external [`PlayerEngine`] evaluates.
//!
//! Stream URLs may additionally carry a throttling parameter (`n`). Unless
//! it is transformed by the player script too, downloads are throttled to a
//! crawl. Transforming it is best effort: when the engine keeps failing the
//! URL is returned untransformed, which still plays.
//!
//! # Retries
//!
//! Only the throttling step is retried, and only on transient errors
//! ([`Error::is_transient`]). The schedule is given by [`Backoff`]. With
//! the defaults that is three attempts with 250 ms and 500 ms between them.
//! Rate limiting is never retried: it is surfaced to the caller, who is in
//! a better position to cool down.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ytmusic::stream::StreamResolver;
//!
//! let resolver = StreamResolver::new(Arc::new(engine));
//! let format = player.best_audio_format().ok_or(...)?;
//! let url = resolver.resolve_stream_url(&format.descriptor(), video_id).await?;
//! ```

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};
use tokio_util::sync::CancellationToken;
use url::Url;
use veil::Redact;

use crate::{
    error::{Error, Result},
    util::{query_param, set_query_param},
};

/// Query parameter holding the throttling challenge.
const THROTTLING_PARAM: &str = "n";

/// Evaluates the service's player script.
///
/// Implementations typically download and compile the player once and
/// cache it across calls; that cache is theirs to manage.
#[async_trait]
pub trait PlayerEngine: Send + Sync {
    /// Signature timestamp of the current player, to be sent with player
    /// requests so that returned ciphers match the player.
    async fn signature_timestamp(&self, video_id: &str) -> Result<u32>;

    /// Unscrambles the signature `s` of a cipher blob.
    async fn decipher_signature(&self, video_id: &str, s: &str) -> Result<String>;

    /// Transforms the throttling parameter `n`.
    async fn deobfuscate_throttling(&self, video_id: &str, n: &str) -> Result<String>;

    /// Drops any cached player, e.g. after the player version changed.
    fn invalidate(&self) {}
}

/// Where a stream can be fetched from: a ready URL, or a signature cipher
/// to resolve first.
#[derive(Clone, Default, PartialEq, Eq, Hash, Deserialize, Serialize, Redact)]
#[redact(all)]
pub struct StreamDescriptor {
    pub direct_url: Option<String>,
    pub cipher_blob: Option<String>,
}

/// Parts of a signature cipher.
#[derive(Clone, PartialEq, Eq, Redact)]
pub struct CipherBlob {
    /// Scrambled signature.
    #[redact]
    pub s: String,

    /// Name of the query parameter that takes the signature.
    pub sp: String,

    /// Stream URL without signature.
    #[redact]
    pub url: Url,
}

impl CipherBlob {
    /// Parses a `signatureCipher` query string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `s`, `sp` or `url` is missing or empty,
    /// or `url` does not parse.
    pub fn parse(blob: &str) -> Result<Self> {
        let mut s = None;
        let mut sp = None;
        let mut base_url = None;

        for (key, value) in url::form_urlencoded::parse(blob.as_bytes()) {
            let slot = match &*key {
                "s" => &mut s,
                "sp" => &mut sp,
                "url" => &mut base_url,
                _ => continue,
            };
            if !value.is_empty() {
                *slot = Some(value.into_owned());
            }
        }

        let missing = |field: &str| Error::invalid_argument(format!("cipher blob without {field}"));
        Ok(Self {
            s: s.ok_or_else(|| missing("s"))?,
            sp: sp.ok_or_else(|| missing("sp"))?,
            url: Url::parse(&base_url.ok_or_else(|| missing("url"))?)?,
        })
    }
}

/// Retry schedule: the first retry waits `initial_delay`, each next one
/// twice as long, up to `max_delay`.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct Backoff {
    /// Total number of attempts, including the first.
    pub max_attempts: u32,

    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub initial_delay: Duration,

    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_millis(2000),
        }
    }
}

impl Backoff {
    /// Delay before retry `retry`, counting from zero.
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry);
        self.initial_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    /// Every delay of the schedule: one less than the number of attempts.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        (0..self.max_attempts.saturating_sub(1)).map(|retry| self.delay(retry))
    }
}

/// Resolves stream descriptors into playable URLs.
pub struct StreamResolver {
    engine: Arc<dyn PlayerEngine>,
    backoff: Backoff,
    cancel: CancellationToken,
}

impl StreamResolver {
    #[must_use]
    pub fn new(engine: Arc<dyn PlayerEngine>) -> Self {
        Self {
            engine,
            backoff: Backoff::default(),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// Aborts retry loops when `cancel` is cancelled.
    #[must_use]
    pub fn with_cancellation_token(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Signature timestamp of the current player. Not retried.
    ///
    /// # Errors
    ///
    /// Returns whatever error the engine reports.
    pub async fn resolve_signature_timestamp(&self, video_id: &str) -> Result<u32> {
        self.engine.signature_timestamp(video_id).await
    }

    /// Turns `descriptor` into a URL that can be downloaded at full speed.
    ///
    /// # Errors
    ///
    /// * `InvalidArgument` if the descriptor has neither a URL nor a valid
    ///   cipher blob
    /// * the engine's error if it fails to decipher the signature
    /// * `ResourceExhausted` if the engine is rate limited while
    ///   transforming the throttling parameter
    /// * `Cancelled` if cancelled during a retry delay
    ///
    /// Other failures of the throttling step are not errors: the URL is
    /// returned without the transformation.
    pub async fn resolve_stream_url(
        &self,
        descriptor: &StreamDescriptor,
        video_id: &str,
    ) -> Result<Url> {
        let url = if let Some(direct_url) = &descriptor.direct_url {
            Url::parse(direct_url)?
        } else if let Some(blob) = &descriptor.cipher_blob {
            let cipher = CipherBlob::parse(blob)?;
            let signature = self.engine.decipher_signature(video_id, &cipher.s).await?;

            let mut url = cipher.url;
            set_query_param(&mut url, &cipher.sp, &signature);
            url
        } else {
            return Err(Error::invalid_argument(format!(
                "no stream url or cipher for {video_id}"
            )));
        };

        self.deobfuscate_throttling(url, video_id).await
    }

    async fn deobfuscate_throttling(&self, url: Url, video_id: &str) -> Result<Url> {
        let Some(n) = query_param(&url, THROTTLING_PARAM) else {
            return Ok(url);
        };

        let mut retry = 0;
        loop {
            self.check_cancelled()?;

            let err = match self.engine.deobfuscate_throttling(video_id, &n).await {
                Ok(transformed) => {
                    let mut url = url;
                    set_query_param(&mut url, THROTTLING_PARAM, &transformed);
                    return Ok(url);
                }
                Err(err) => err,
            };

            if err.is_rate_limited() {
                return Err(err);
            }

            if !err.is_transient() {
                warn!("throttling parameter of {video_id} unresolved: {err}");
                return Ok(url);
            }

            retry += 1;
            if retry >= self.backoff.max_attempts {
                warn!(
                    "throttling parameter of {video_id} unresolved after {retry} attempts: {err}"
                );
                return Ok(url);
            }

            let delay = self.backoff.delay(retry - 1);
            debug!(
                "throttling parameter of {video_id} failed ({err}); retrying in {}ms",
                delay.as_millis()
            );

            tokio::select! {
                () = self.cancel.cancelled() => {}
                () = tokio::time::sleep(delay) => {}
            }
            self.check_cancelled()?;
        }
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(Error::cancelled("stream url resolution cancelled"));
        }
        Ok(())
    }
}
