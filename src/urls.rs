//! URL construction for download links, thumbnails and category pages.
//!
//! Category and preset names come straight from the filesystem and may hold
//! spaces or other characters that are not valid in a URL path. Each path
//! segment is percent-encoded on its own so `/` separators survive.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Characters escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b']')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encode one path segment: `Space Stations` → `Space%20Stations`.
pub fn escape_segment(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Join escaped segments onto a base URL.
///
/// The base is used verbatim apart from trailing slashes; segments are escaped.
pub fn join_url<'a>(base: &str, segments: impl IntoIterator<Item = &'a str>) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        url.push('/');
        url.push_str(&escape_segment(segment));
    }
    url
}
