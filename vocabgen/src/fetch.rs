//! Resource fetching with a durable on-disk cache.
//!
//! A locator resolves to a byte stream either directly or through a cache
//! file derived from the locator's last path segment. A cache hit is served
//! with zero network access; entries are never invalidated or refreshed.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::error::{Error, FetchCause, Result};

/// Fixed subdirectory of the cache root holding persisted vocabularies.
const CACHE_SUBDIR: &str = "vocabularies";

/// `Accept` header sent when the locator's extension does not determine the
/// format: prefer Turtle, fall back to N-Triples with a lower weight.
pub const ACCEPT_HEADER: &str = "text/turtle, application/n-triples;q=0.9";

/// Serialization formats understood by the statement-stream producer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Turtle (`.ttl`, `text/turtle`).
    Turtle,
    /// N-Triples (`.nt`, `application/n-triples`).
    NTriples,
    /// TriG (`.trig`, `application/trig`).
    TriG,
    /// N-Quads (`.nq`, `application/n-quads`).
    NQuads,
}

impl Format {
    /// All known formats, in probe order.
    pub const ALL: [Format; 4] = [
        Format::Turtle,
        Format::NTriples,
        Format::TriG,
        Format::NQuads,
    ];

    /// Canonical file extension, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Format::Turtle => "ttl",
            Format::NTriples => "nt",
            Format::TriG => "trig",
            Format::NQuads => "nq",
        }
    }

    /// Canonical media type.
    #[must_use]
    pub fn media_type(self) -> &'static str {
        match self {
            Format::Turtle => "text/turtle",
            Format::NTriples => "application/n-triples",
            Format::TriG => "application/trig",
            Format::NQuads => "application/n-quads",
        }
    }

    /// Looks up a format by the extension of a file name, if any.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Format> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" => Some(Format::Turtle),
            "nt" | "ntriples" => Some(Format::NTriples),
            "trig" => Some(Format::TriG),
            "nq" | "nquads" => Some(Format::NQuads),
            _ => None,
        }
    }

    /// Maps a negotiated media type to a format, ignoring parameters.
    #[must_use]
    pub fn from_media_type(media_type: &str) -> Option<Format> {
        let essence = media_type.split(';').next().unwrap_or(media_type).trim();
        match essence {
            "text/turtle" | "application/x-turtle" => Some(Format::Turtle),
            "application/n-triples" => Some(Format::NTriples),
            "application/trig" => Some(Format::TriG),
            "application/n-quads" => Some(Format::NQuads),
            _ => None,
        }
    }
}

/// Fetch behavior knobs.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Serve repeat fetches from the on-disk cache.
    pub use_cache: bool,
    /// Cache root; vocabularies are persisted under a fixed subdirectory.
    pub cache_dir: PathBuf,
    /// Network timeout for a single fetch.
    pub timeout: Duration,
    /// Format assumed when neither extension nor content negotiation
    /// resolves one. `None` makes an undetermined format an error.
    pub fallback_format: Option<Format>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            cache_dir: PathBuf::from(".vocabgen-cache"),
            timeout: Duration::from_secs(30),
            fallback_format: Some(Format::Turtle),
        }
    }
}

/// A fetched vocabulary document: its resolved format and a byte stream.
pub struct Fetched {
    /// Resolved serialization format.
    pub format: Format,
    /// The document bytes.
    pub reader: Box<dyn BufRead>,
}

/// Resolves a locator to a byte stream, honoring the cache policy.
///
/// With `use_cache` set, the cache is probed first and a hit is returned
/// without any network access. On a miss the document is fetched, persisted
/// under the derived cache name, and the persisted copy is returned.
///
/// # Errors
///
/// Returns [`Error::Fetch`] on any connection or I/O failure and
/// [`Error::FormatUnresolved`] when no format can be determined and no
/// fallback is configured.
pub fn fetch(locator: &str, options: &FetchOptions) -> Result<Fetched> {
    let segment = last_segment(locator);
    let by_extension = Format::from_file_name(&segment);

    if !options.use_cache {
        let (bytes, media_type) = load_bytes(locator, by_extension.is_none(), options)?;
        let format = resolve_format(locator, by_extension, media_type.as_deref(), options)?;
        return Ok(Fetched {
            format,
            reader: Box::new(Cursor::new(bytes)),
        });
    }

    let cache_dir = options.cache_dir.join(CACHE_SUBDIR);
    if let Some((path, format)) = probe_cache(&cache_dir, &segment, by_extension) {
        tracing::debug!(locator, cache = %path.display(), "cache hit");
        return open_cached(locator, &path, format);
    }

    let (bytes, media_type) = load_bytes(locator, by_extension.is_none(), options)?;
    let format = resolve_format(locator, by_extension, media_type.as_deref(), options)?;
    let path = cache_dir.join(cache_file_name(&segment, by_extension, format));
    persist(locator, &path, &bytes)?;
    tracing::debug!(locator, cache = %path.display(), "cached");
    open_cached(locator, &path, format)
}

/// Derives the cache file name for a locator segment: the segment itself
/// when its extension is recognized, otherwise the segment with the resolved
/// format's canonical extension appended.
fn cache_file_name(segment: &str, by_extension: Option<Format>, format: Format) -> String {
    if by_extension.is_some() {
        segment.to_string()
    } else {
        format!("{segment}.{}", format.extension())
    }
}

/// Looks for an existing cache entry for the segment. When the extension is
/// unknown, every canonical extension is probed so that a hit never needs
/// the network to re-derive the name.
fn probe_cache(
    cache_dir: &Path,
    segment: &str,
    by_extension: Option<Format>,
) -> Option<(PathBuf, Format)> {
    if let Some(format) = by_extension {
        let path = cache_dir.join(segment);
        return path.exists().then_some((path, format));
    }
    for format in Format::ALL {
        let path = cache_dir.join(format!("{segment}.{}", format.extension()));
        if path.exists() {
            return Some((path, format));
        }
    }
    None
}

fn open_cached(locator: &str, path: &Path, format: Format) -> Result<Fetched> {
    let file = File::open(path).map_err(|e| fetch_error(locator, e))?;
    Ok(Fetched {
        format,
        reader: Box::new(BufReader::new(file)),
    })
}

fn persist(locator: &str, path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| fetch_error(locator, e))?;
    }
    fs::write(path, bytes).map_err(|e| fetch_error(locator, e))
}

/// Loads the raw document bytes, from the network or the filesystem.
/// Returns the bytes and, for HTTP responses, the content type.
fn load_bytes(
    locator: &str,
    negotiate: bool,
    options: &FetchOptions,
) -> Result<(Vec<u8>, Option<String>)> {
    match Url::parse(locator) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            load_remote(locator, negotiate, options)
        }
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|()| fetch_error(locator, format!("invalid file URL: {locator}")))?;
            load_local(locator, &path)
        }
        Ok(url) => Err(fetch_error(
            locator,
            format!("unsupported locator scheme: {}", url.scheme()),
        )),
        // Not an absolute URL: treat as a filesystem path.
        Err(_) => load_local(locator, Path::new(locator)),
    }
}

fn load_local(locator: &str, path: &Path) -> Result<(Vec<u8>, Option<String>)> {
    let bytes = fs::read(path).map_err(|e| fetch_error(locator, e))?;
    Ok((bytes, None))
}

fn load_remote(
    locator: &str,
    negotiate: bool,
    options: &FetchOptions,
) -> Result<(Vec<u8>, Option<String>)> {
    let client = reqwest::blocking::Client::builder()
        .timeout(options.timeout)
        .build()
        .map_err(|e| fetch_error(locator, e))?;

    let mut request = client.get(locator);
    if negotiate {
        request = request.header(reqwest::header::ACCEPT, ACCEPT_HEADER);
    }

    let response = request
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|e| fetch_error(locator, e))?;

    let media_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let bytes = response.bytes().map_err(|e| fetch_error(locator, e))?;
    Ok((bytes.to_vec(), media_type))
}

fn resolve_format(
    locator: &str,
    by_extension: Option<Format>,
    media_type: Option<&str>,
    options: &FetchOptions,
) -> Result<Format> {
    by_extension
        .or_else(|| media_type.and_then(Format::from_media_type))
        .or(options.fallback_format)
        .ok_or_else(|| Error::FormatUnresolved {
            locator: locator.to_string(),
        })
}

/// Returns the locator's last path segment, with query and fragment
/// stripped. Falls back to `"vocabulary"` for locators that end in a bare
/// authority or separator.
fn last_segment(locator: &str) -> String {
    let end = locator.find(['?', '#']).unwrap_or(locator.len());
    let trimmed = locator[..end].trim_end_matches('/');
    let (had_scheme, path) = match trimmed.split_once("://") {
        Some((_, rest)) => (true, rest),
        None => (false, trimmed),
    };
    let segment = match path.rsplit_once('/') {
        Some((_, segment)) => segment,
        // A scheme with no path component leaves only the authority.
        None if had_scheme => "",
        None => path,
    };
    if segment.is_empty() {
        "vocabulary".to_string()
    } else {
        segment.to_string()
    }
}

fn fetch_error(locator: &str, cause: impl Into<FetchCause>) -> Error {
    Error::Fetch {
        locator: locator.to_string(),
        source: cause.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_by_extension() {
        assert_eq!(Format::from_file_name("index.ttl"), Some(Format::Turtle));
        assert_eq!(Format::from_file_name("dump.NT"), Some(Format::NTriples));
        assert_eq!(Format::from_file_name("data.trig"), Some(Format::TriG));
        assert_eq!(Format::from_file_name("noext"), None);
        assert_eq!(Format::from_file_name("schema.rdf"), None);
    }

    #[test]
    fn format_by_media_type() {
        assert_eq!(
            Format::from_media_type("text/turtle; charset=utf-8"),
            Some(Format::Turtle)
        );
        assert_eq!(
            Format::from_media_type("application/n-triples"),
            Some(Format::NTriples)
        );
        assert_eq!(Format::from_media_type("text/html"), None);
    }

    #[test]
    fn segment_extraction() {
        assert_eq!(
            last_segment("http://xmlns.com/foaf/spec/index.ttl"),
            "index.ttl"
        );
        assert_eq!(
            last_segment("http://purl.org/dc/terms/?v=1#frag"),
            "terms"
        );
        assert_eq!(last_segment("http://example.org/"), "vocabulary");
    }

    #[test]
    fn cache_name_appends_resolved_extension() {
        assert_eq!(
            cache_file_name("index.ttl", Some(Format::Turtle), Format::Turtle),
            "index.ttl"
        );
        assert_eq!(
            cache_file_name("terms", None, Format::Turtle),
            "terms.ttl"
        );
    }

    #[test]
    fn unresolved_format_without_fallback_is_an_error() {
        let options = FetchOptions {
            fallback_format: None,
            ..FetchOptions::default()
        };
        let result = resolve_format("http://example.org/v", None, Some("text/html"), &options);
        assert!(matches!(result, Err(Error::FormatUnresolved { .. })));
    }
}
