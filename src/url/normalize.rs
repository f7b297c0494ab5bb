use crate::UrlError;
use url::Url;

/// Scheme prepended to targets that arrive without one
pub const DEFAULT_SCHEME: &str = "http://";

/// Schemes accepted as-is on an incoming target
const KNOWN_SCHEMES: &[&str] = &["http://", "https://"];

/// Prepends the default scheme to a URL that does not carry `http://` or
/// `https://`
///
/// The scheme check ignores ASCII case. Nothing else about the input is
/// touched; the string is not trimmed or validated here.
///
/// # Examples
///
/// ```
/// use mailscout::url::ensure_scheme;
///
/// assert_eq!(ensure_scheme("example.com"), "http://example.com");
/// assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
/// ```
pub fn ensure_scheme(raw: &str) -> String {
    if has_known_scheme(raw) {
        raw.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME, raw)
    }
}

fn has_known_scheme(raw: &str) -> bool {
    KNOWN_SCHEMES.iter().any(|scheme| {
        raw.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

/// Turns a user-supplied target into a URL ready to fetch
///
/// # Steps
///
/// 1. Prepend the default scheme when missing
/// 2. Parse the URL; reject if malformed
/// 3. Reject URLs without a host
///
/// # Arguments
///
/// * `raw` - The URL string as entered by the user or read from a CSV cell
///
/// # Returns
///
/// * `Ok(Url)` - The URL to request
/// * `Err(UrlError)` - The string cannot be turned into a fetchable URL
pub fn normalize_target(raw: &str) -> Result<Url, UrlError> {
    let with_scheme = ensure_scheme(raw);

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlError::MissingHost),
    }
}
