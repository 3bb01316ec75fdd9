use std::time::Duration;

use url::Url;

/// Parses a colon-separated duration as shown in the InnerTube UI.
///
/// Accepts `"45"`, `"3:45"` and `"1:02:03"`. Returns `None` on anything
/// else, including empty components and more than three fields.
///
/// # Examples
///
/// ```rust
/// assert_eq!(parse_time("3:45"), Some(Duration::from_secs(225)));
/// ```
#[must_use]
pub fn parse_time(text: &str) -> Option<Duration> {
    let parts = text
        .trim()
        .split(':')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;

    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let seconds = parts
        .iter()
        .try_fold(0u64, |acc, part| acc.checked_mul(60)?.checked_add(*part))?;
    Some(Duration::from_secs(seconds))
}

/// Returns the first value of query parameter `name`, percent-decoded.
#[must_use]
pub fn query_param(url: &Url, name: &str) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Sets query parameter `name` to `value`, replacing every previous
/// occurrence. The relative order of the other parameters is kept.
pub fn set_query_param(url: &mut Url, name: &str, value: &str) {
    let others: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| key != name)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(others)
        .append_pair(name, value);
}
