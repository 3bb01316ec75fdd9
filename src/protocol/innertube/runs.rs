//! Styled text as a list of runs.
//!
//! A subtitle like `Song • Artist A & Artist B • Album • 3:45` arrives as:
//!
//! ```json
//! {
//!     "runs": [
//!         { "text": "Song" },
//!         { "text": " • " },
//!         {
//!             "text": "Artist A",
//!             "navigationEndpoint": { "browseEndpoint": { "browseId": "UC1" } }
//!         },
//!         { "text": " & " },
//!         {
//!             "text": "Artist B",
//!             "navigationEndpoint": { "browseEndpoint": { "browseId": "UC2" } }
//!         },
//!         ...
//!     ]
//! }
//! ```

use serde::Deserialize;
use serde_with::{serde_as, VecSkipError};

use super::endpoint::{NavigationEndpoint, PageType};

/// Separator between the logical groups of a subtitle line.
pub const SEPARATOR: &str = " • ";

#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Runs {
    #[serde(default)]
    #[serde_as(as = "VecSkipError<_>")]
    pub runs: Vec<Run>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    pub text: String,
    pub navigation_endpoint: Option<NavigationEndpoint>,
}

impl Run {
    #[must_use]
    pub fn browse_id(&self) -> Option<&str> {
        self.navigation_endpoint.as_ref()?.browse_id()
    }

    #[must_use]
    pub fn page_type(&self) -> Option<PageType> {
        self.navigation_endpoint.as_ref()?.page_type()
    }
}

impl Runs {
    /// Text of the first run, if it is not empty.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.runs
            .first()
            .map(|run| run.text.as_str())
            .filter(|text| !text.is_empty())
    }

    #[must_use]
    pub fn last_text(&self) -> Option<&str> {
        self.runs.last().map(|run| run.text.as_str())
    }

    /// All runs concatenated.
    #[must_use]
    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }

    /// Splits the runs into groups at [`SEPARATOR`] runs.
    #[must_use]
    pub fn split_by_separator(&self) -> Vec<&[Run]> {
        self.runs
            .split(|run| run.text == SEPARATOR)
            .filter(|group| !group.is_empty())
            .collect()
    }
}

/// Every other element, starting with the first: indices 0, 2, 4, …
///
/// Multi-artist runs alternate name and joiner (`" & "`, `", "`), so this
/// picks the names.
pub fn odd_elements<T>(items: &[T]) -> impl Iterator<Item = &T> {
    items.iter().step_by(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn runs(texts: &[&str]) -> Runs {
        serde_json::from_value(json!({
            "runs": texts.iter().map(|t| json!({ "text": t })).collect::<Vec<_>>()
        }))
        .unwrap()
    }

    #[test]
    fn splits_on_separator() {
        let runs = runs(&["Song", SEPARATOR, "A", " & ", "B", SEPARATOR, "3:45"]);
        let groups = runs.split_by_separator();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[1].len(), 3);
        assert_eq!(groups[2][0].text, "3:45");
    }

    #[test]
    fn odd_elements_pick_names() {
        let runs = runs(&["A", " & ", "B", ", ", "C"]);
        let names: Vec<_> = odd_elements(&runs.runs).map(|r| r.text.as_str()).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn skips_runs_without_text() {
        let runs: Runs = serde_json::from_value(json!({
            "runs": [{ "text": "ok" }, { "emoji": {} }]
        }))
        .unwrap();
        assert_eq!(runs.runs.len(), 1);
    }

    #[test]
    fn empty_first_text_is_none() {
        assert_eq!(runs(&[""]).first_text(), None);
        assert_eq!(Runs::default().first_text(), None);
    }
}
