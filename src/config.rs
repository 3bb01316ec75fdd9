//! Client configuration.
//!
//! The upstream service only answers requests that look like they come from
//! one of its own clients, so the configuration mostly describes *which*
//! client we pretend to be. Defaults match the web remix client.
//!
//! A configuration can be loaded from a TOML file:
//!
//! ```toml
//! user_agent = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0"
//! client_version = "1.20241127.01.00"
//! hl = "nl"
//! gl = "NL"
//! read_timeout = 5000
//!
//! [backoff]
//! max_attempts = 3
//! initial_delay = 250
//! max_delay = 2000
//! ```

use std::{fs, path::Path, time::Duration};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds};

use crate::{
    error::{Error, Result},
    stream::Backoff,
};

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// `User-Agent` injected into requests that don't carry one.
    pub user_agent: String,

    /// InnerTube client name, e.g. `WEB_REMIX`.
    pub client_name: String,

    /// Numeric id of `client_name`, sent as `X-YouTube-Client-Name`.
    pub client_id: u32,

    pub client_version: String,

    /// Interface language.
    pub hl: String,

    /// Content region.
    pub gl: String,

    /// Visitor cookie replacement for unauthenticated sessions.
    pub visitor_data: Option<String>,

    /// Timeout for individual network reads.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub read_timeout: Duration,

    /// Retry schedule for throttling-parameter resolution.
    pub backoff: Backoff,
}

impl Config {
    /// Desktop browser `User-Agent` the service expects from `WEB_REMIX`.
    pub const DEFAULT_USER_AGENT: &'static str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:128.0) Gecko/20100101 Firefox/128.0";

    const DEFAULT_CLIENT_NAME: &'static str = "WEB_REMIX";
    const DEFAULT_CLIENT_ID: u32 = 67;
    const DEFAULT_CLIENT_VERSION: &'static str = "1.20241127.01.00";

    const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(5);

    /// Configuration files are tiny; refuse anything bigger than this.
    const MAX_FILE_SIZE: u64 = 16 * 1024;

    /// Loads the configuration from a TOML file. Missing keys take their
    /// default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is unreasonably large,
    /// is not valid TOML, or holds values that fail [`Config::validate`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Prevent out-of-memory condition: the file should be small.
        let file_size = fs::metadata(path)?.len();
        if file_size > Self::MAX_FILE_SIZE {
            return Err(Error::out_of_range(format!(
                "{} is too large ({file_size} bytes)",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;

        trace!("user agent: {}", config.user_agent);
        Ok(config)
    }

    /// Checks the fields that end up in HTTP headers.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when a header value would be empty or
    /// contains control characters, or when the backoff allows no attempt.
    pub fn validate(&self) -> Result<()> {
        let header_safe = |value: &str| !value.is_empty() && !value.contains(char::is_control);

        if !header_safe(&self.user_agent) {
            return Err(Error::invalid_argument(format!(
                "user agent invalid (\"{}\")",
                self.user_agent
            )));
        }

        if !header_safe(&self.client_name) || !header_safe(&self.client_version) {
            return Err(Error::invalid_argument(format!(
                "client name and/or version invalid (\"{}\"; \"{}\")",
                self.client_name, self.client_version
            )));
        }

        if self.backoff.max_attempts == 0 {
            return Err(Error::invalid_argument(
                "backoff must allow at least one attempt",
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: Self::DEFAULT_USER_AGENT.to_owned(),
            client_name: Self::DEFAULT_CLIENT_NAME.to_owned(),
            client_id: Self::DEFAULT_CLIENT_ID,
            client_version: Self::DEFAULT_CLIENT_VERSION.to_owned(),
            hl: "en".to_owned(),
            gl: "US".to_owned(),
            visitor_data: None,
            read_timeout: Self::DEFAULT_READ_TIMEOUT,
            backoff: Backoff::default(),
        }
    }
}
