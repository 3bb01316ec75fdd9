//! Protocol types for the upstream music service.
//!
//! # Submodules
//!
//! * [`innertube`] - InnerTube browse, search, next and player responses
//!
//! # Usage Example
//!
//! ```
//! use ytmusic::protocol::{self, innertube::response::BrowseResponse};
//!
//! // Parse and log JSON response
//! let response: BrowseResponse = protocol::json(&body, "browse")?;
//! ```

pub mod innertube;

use crate::error::Result;
use serde::Deserialize;
use std::fmt::Debug;

/// Parses and logs a JSON response body.
///
/// # Errors
///
/// Returns `InvalidArgument` if the body is not valid JSON or does not match
/// `T`, and `DataLoss` if it is truncated.
///
/// # Logging
///
/// * Success: parsed structure at TRACE level
/// * Shape mismatch: raw JSON at TRACE level
/// * Invalid JSON: ERROR level, raw text at TRACE level
pub fn json<T>(body: &str, origin: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de> + Debug,
{
    match serde_json::from_str(body) {
        Ok(result) => {
            trace!("{origin}: {result:#?}");
            Ok(result)
        }
        Err(e) => {
            if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
                trace!("{origin}: {json:#?}");
            } else {
                error!("{origin}: failed parsing response ({e:?})");
                trace!("{body}");
            }
            Err(e.into())
        }
    }
}
