use super::SAVED_FILES_ROUTE;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use std::path::{Path, PathBuf};

const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn index_page() -> String {
    r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Image Downloader</title></head>
<body>
<h1>Image Downloader</h1>
<form action="/download" method="post">
<p><label for="urls">Image URLs, one per line:</label></p>
<p><textarea id="urls" name="urls" rows="12" cols="80"></textarea></p>
<p><button type="submit">Download</button></p>
</form>
</body>
</html>
"#
    .to_string()
}

/// Listing of the saved files, each linked to where it is served back.
pub fn result_page(files: &[PathBuf]) -> String {
    let mut items = String::new();
    for file in files {
        let href = escape_html(&saved_file_url(file));
        let label = escape_html(&file.display().to_string());
        items.push_str(&format!(
            "<li><a href=\"{href}\">{label}</a><br><img src=\"{href}\" alt=\"{label}\" style=\"max-width: 320px\"></li>\n"
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>Downloaded Images</title></head>
<body>
<h1>Downloaded Images</h1>
<p>{count} file(s) saved.</p>
<ul>
{items}</ul>
<p><a href="/">Download more</a></p>
</body>
</html>
"#,
        count = files.len()
    )
}

/// URL path under which a saved file is served, e.g. `/downloaded_images/a%20b.png`.
pub fn saved_file_url(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    format!(
        "/{SAVED_FILES_ROUTE}/{}",
        utf8_percent_encode(&file_name, SEGMENT_ENCODE_SET)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
