//! URL resolution utilities.
//!
//! [§ 4.2.4 The link element](https://html.spec.whatwg.org/multipage/semantics.html#the-link-element)
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! Linked style sheets name their location relative to the document that
//! links them. This module turns such an `href` into something
//! [`crate::net::fetch_text`] can load.

/// Schemes that are always treated as absolute, even without `://`.
const OPAQUE_SCHEMES: [&str; 2] = ["data:", "file:"];

/// Returns true if `href` already names a complete location.
#[must_use]
pub fn is_absolute(href: &str) -> bool {
    href.contains("://") || OPAQUE_SCHEMES.iter().any(|s| href.starts_with(s))
}

/// Resolve a potentially relative URL against a base URL.
///
/// # Algorithm
///
/// STEP 1: "If url is an absolute URL, return url."
///
/// STEP 2: Otherwise, resolve url relative to base:
/// - `//host/path` keeps the base scheme,
/// - `/path` keeps the base scheme and authority,
/// - `path`, `./path` and `../path` are joined onto the base directory.
///
/// A base without a scheme is treated as a filesystem path, so a document
/// loaded from `docs/index.html` resolves `style.css` to `docs/style.css`.
///
/// NOTE: This is a simplified implementation. Query strings and fragments
/// are carried through untouched rather than parsed.
#[must_use]
pub fn resolve_url(href: &str, base_url: Option<&str>) -> String {
    let href = href.trim();

    // STEP 1
    if is_absolute(href) {
        return href.to_string();
    }

    let Some(base) = base_url else {
        return href.to_string();
    };

    // STEP 2
    let Some((scheme, rest)) = base.split_once("://") else {
        let dir = base.rsplit_once('/').map_or("", |(dir, _)| dir);
        return join_path(dir, href);
    };

    let (authority, path) = rest
        .find('/')
        .map_or((rest, "/"), |i| (&rest[..i], &rest[i..]));

    if let Some(scheme_relative) = href.strip_prefix("//") {
        return format!("{scheme}://{scheme_relative}");
    }

    if href.starts_with('/') {
        return format!("{scheme}://{authority}{href}");
    }

    let dir = path.rsplit_once('/').map_or("", |(dir, _)| dir);
    let joined = join_path(dir, href);
    if joined.starts_with('/') {
        format!("{scheme}://{authority}{joined}")
    } else {
        format!("{scheme}://{authority}/{joined}")
    }
}

/// Join a relative path onto a directory, folding `.` and `..` segments.
///
/// `..` never climbs above the first segment of `dir`.
fn join_path(dir: &str, href: &str) -> String {
    let rooted = dir.starts_with('/');
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();

    for part in href.split('/') {
        match part {
            ".." => {
                let _ = segments.pop();
            }
            "." => {}
            other => segments.push(other),
        }
    }

    let joined = segments.join("/");
    if rooted { format!("/{joined}") } else { joined }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_href_is_returned_unchanged() {
        assert_eq!(
            resolve_url("https://cdn.example.com/a.css", Some("http://example.org/")),
            "https://cdn.example.com/a.css"
        );
        assert_eq!(resolve_url("data:text/css,p{}", None), "data:text/css,p{}");
    }

    #[test]
    fn test_path_relative() {
        assert_eq!(
            resolve_url("styles/main.css", Some("http://example.org/docs/index.html")),
            "http://example.org/docs/styles/main.css"
        );
    }

    #[test]
    fn test_parent_directory() {
        assert_eq!(
            resolve_url("../main.css", Some("http://example.org/a/b/index.html")),
            "http://example.org/a/main.css"
        );
    }

    #[test]
    fn test_host_relative() {
        assert_eq!(
            resolve_url("/main.css", Some("https://example.org:8080/a/b.html")),
            "https://example.org:8080/main.css"
        );
    }

    #[test]
    fn test_scheme_relative() {
        assert_eq!(
            resolve_url("//static.example.com/s.css", Some("https://example.org/")),
            "https://static.example.com/s.css"
        );
    }

    #[test]
    fn test_base_without_path() {
        assert_eq!(
            resolve_url("s.css", Some("http://example.org")),
            "http://example.org/s.css"
        );
    }

    #[test]
    fn test_filesystem_base() {
        assert_eq!(resolve_url("style.css", Some("docs/index.html")), "docs/style.css");
        assert_eq!(resolve_url("style.css", Some("index.html")), "style.css");
        assert_eq!(
            resolve_url("../style.css", Some("/srv/site/docs/index.html")),
            "/srv/site/style.css"
        );
    }

    #[test]
    fn test_file_url_base() {
        assert_eq!(
            resolve_url("main.css", Some("file:///home/me/page.html")),
            "file:///home/me/main.css"
        );
    }
}
