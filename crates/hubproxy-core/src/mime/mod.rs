//! Content type classification by file extension.

/// Content type used when the extension is unknown.
pub const DEFAULT_MIME: &str = "text/plain";

const MIME_TABLE: &[(&str, &str)] = &[
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("mjs", "application/javascript"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("wav", "audio/wav"),
    ("mp3", "audio/mpeg"),
    ("wasm", "application/wasm"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("ttf", "font/ttf"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
    ("eot", "application/vnd.ms-fontobject"),
    ("otf", "font/otf"),
    ("ico", "image/x-icon"),
    ("dll", "application/octet-stream"),
    ("dat", "application/octet-stream"),
];

/// Result of classifying an asset path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentClass {
    pub mime: &'static str,
    pub is_css: bool,
    pub is_js: bool,
}

impl ContentClass {
    /// True when the body goes through a text rewrite pass.
    pub fn needs_rewrite(&self) -> bool {
        self.is_css || self.is_js
    }
}

/// Lowercase extension of the last path segment, ignoring query and fragment.
fn extension(asset_path: &str) -> Option<String> {
    let path = asset_path
        .split(['?', '#'])
        .next()
        .unwrap_or(asset_path);
    let name = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Classifies `asset_path` by its extension; unknown extensions are `text/plain`.
pub fn classify(asset_path: &str) -> ContentClass {
    let mime = extension(asset_path)
        .and_then(|ext| {
            MIME_TABLE
                .iter()
                .find(|(known, _)| *known == ext)
                .map(|(_, mime)| *mime)
        })
        .unwrap_or(DEFAULT_MIME);
    ContentClass {
        mime,
        is_css: mime == "text/css",
        is_js: mime == "application/javascript",
    }
}
