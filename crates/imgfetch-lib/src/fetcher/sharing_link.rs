use std::borrow::Cow;

const DROPBOX_HOST: &str = "dropbox.com";
const DROPBOX_PREVIEW_MARKER: &str = "dl=0";
const DROPBOX_RAW_MARKER: &str = "raw=1";

/// Dropbox share links (`...?dl=0`) return an HTML preview page. Switching the first
/// `dl=0` to `raw=1` makes Dropbox serve the file bytes instead.
///
/// This is the only host with a rewrite rule; every other URL is returned untouched.
pub fn rewrite_dropbox_share_link(url: &str) -> Cow<'_, str> {
    if url.contains(DROPBOX_HOST) && url.contains(DROPBOX_PREVIEW_MARKER) {
        Cow::Owned(url.replacen(DROPBOX_PREVIEW_MARKER, DROPBOX_RAW_MARKER, 1))
    } else {
        Cow::Borrowed(url)
    }
}
