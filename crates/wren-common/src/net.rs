//! Fetch utilities for the Wren engine.
//!
//! Provides a single blocking entry point, [`fetch_text`], used by the
//! document loader and the linked style sheet loader. It understands
//! `http(s)://` URLs, `file://` URLs, plain filesystem paths and `data:` URLs.
//!
//! TODO: Implement proper Fetch Standard (<https://fetch.spec.whatwg.org/>)
use base64::Engine;
use std::time::Duration;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = concat!("wren/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Errors produced while fetching a resource.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be built or the request failed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Status(reqwest::StatusCode),

    /// A local file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// The filesystem path that was read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A `data:` URL was malformed.
    #[error("invalid data URL: {0}")]
    DataUrl(String),

    /// A base64 `data:` URL payload could not be decoded.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The payload was not valid UTF-8.
    #[error("payload is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A parsed `data:` URL that can be decoded into raw bytes.
///
/// Supports both base64 payloads (`data:text/css;base64,...`) and plain
/// percent-encoded payloads (`data:text/html,<p>Hi</p>`).
pub struct DataURL {
    /// The full raw `data:` URL string (e.g. `data:text/html,...`).
    pub raw_data: String,
}

impl DataURL {
    /// Create a new `DataURL` from a raw data URL string.
    #[must_use]
    pub const fn new(raw_data: String) -> Self {
        Self { raw_data }
    }

    /// The media type declared before the payload, if any.
    #[must_use]
    pub fn media_type(&self) -> &str {
        let body = self.raw_data.trim_start_matches("data:");
        let metadata = body.split_once(',').map_or("", |(meta, _)| meta);
        metadata.split(';').next().unwrap_or_default()
    }

    /// Decode the data URL payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::DataUrl`] if the URL has no `,` separator, or
    /// [`FetchError::Base64`] if a base64 payload is malformed.
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        let body = self.raw_data.trim_start_matches("data:");
        let Some((metadata, data)) = body.split_once(',') else {
            return Err(FetchError::DataUrl("missing comma".to_string()));
        };

        if metadata.ends_with(";base64") {
            Ok(base64::engine::general_purpose::STANDARD.decode(data)?)
        } else {
            Ok(percent_decode(data))
        }
    }
}

/// Decode `%XX` escapes; malformed escapes are kept literally.
fn percent_decode(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
            && let Some(byte) = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        {
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

/// Fetch a URL or path and return its body as text.
///
/// # Errors
///
/// Returns a [`FetchError`] if the resource cannot be loaded or is not
/// valid UTF-8.
pub fn fetch_text(url: &str) -> Result<String, FetchError> {
    if url.starts_with("data:") {
        let bytes = DataURL::new(url.to_string()).decode()?;
        return Ok(String::from_utf8(bytes)?);
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        return fetch_http(url);
    }

    let path = url.strip_prefix("file://").unwrap_or(url);
    std::fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: path.to_string(),
        source,
    })
}

/// Blocking HTTP GET returning the body as text.
fn fetch_http(url: &str) -> Result<String, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()?;

    let response = client.get(url).header("User-Agent", USER_AGENT).send()?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    Ok(response.text()?)
}
