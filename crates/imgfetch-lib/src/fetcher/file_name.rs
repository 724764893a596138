use super::FetchError;
use percent_encoding::percent_decode_str;
use url::Url;

/// Derive the local file name from the last segment of the URL path.
///
/// Trailing slashes are ignored, so `https://host/a/b/` yields `b`. The segment is
/// unescaped with query semantics: `%XX` escapes are decoded and `+` becomes a space.
pub fn file_name_from_url(url: &Url) -> Result<String, FetchError> {
    let segment = last_path_segment(url.path());
    let decoded = unescape_segment(segment)?;

    if decoded == "." || decoded == ".." || decoded.contains(['/', '\\']) {
        return Err(FetchError::InvalidFileName {
            file_name: segment.to_string(),
            reason: format!("{decoded:?} does not name a file inside the download folder"),
        });
    }

    Ok(decoded)
}

fn last_path_segment(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}

fn unescape_segment(segment: &str) -> Result<String, FetchError> {
    for (index, _) in segment.match_indices('%') {
        let escape = segment.get(index + 1..index + 3);
        if !escape.is_some_and(|hex| hex.bytes().all(|b| b.is_ascii_hexdigit())) {
            let bad = segment
                .get(index..(index + 3).min(segment.len()))
                .unwrap_or("%");
            return Err(FetchError::InvalidFileName {
                file_name: segment.to_string(),
                reason: format!("invalid URL escape {bad:?}"),
            });
        }
    }

    let spaced = segment.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| FetchError::InvalidFileName {
            file_name: segment.to_string(),
            reason: e.to_string(),
        })
}
