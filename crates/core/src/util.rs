//! URL helpers shared by the class path and the enumerators.

use percent_encoding::percent_decode_str;
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

/// Separator between the archive and the entry part of an archive URL.
pub const ARCHIVE_SEPARATOR: &str = "!/";

/// Archive prefix under which web archives keep their classes.
pub const WAR_CLASSES_PREFIX: &str = "WEB-INF/classes/";

/// Decoded path component of a URL.
pub fn decoded_path(url: &Url) -> String {
    percent_decode_str(url.path())
        .decode_utf8_lossy()
        .into_owned()
}

/// Local filesystem path of a `file:` URL, or the decoded URL path otherwise.
pub fn to_file_path(url: &Url) -> PathBuf {
    if url.scheme() == "file" {
        if let Ok(path) = url.to_file_path() {
            return path;
        }
    }
    PathBuf::from(decoded_path(url))
}

/// Re-parses a URL after percent-decoding its textual form.
pub fn decode_url(url: &Url) -> Url {
    let decoded = percent_decode_str(url.as_str()).decode_utf8_lossy();
    Url::parse(&decoded).unwrap_or_else(|_| url.clone())
}

/// Entry prefix under which an archive keeps its namespace root.
pub fn archive_root(archive: &Path) -> &'static str {
    let is_war = archive
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("war"));
    if is_war { WAR_CLASSES_PREFIX } else { "" }
}

/// Builds an archive URL such as `jar:file:///lib/app.jar!/db/migration`.
pub fn archive_url(archive: &Path, entry: &str) -> io::Result<Url> {
    let file_url = Url::from_file_path(archive).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("archive path is not absolute: {}", archive.display()),
        )
    })?;
    Url::parse(&format!("jar:{file_url}{ARCHIVE_SEPARATOR}{entry}"))
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
}

/// Splits an archive URL (`jar:`, `zip:`, `wsjar:`) into the archive file and
/// the entry path inside it.
pub fn split_archive_url(url: &Url) -> io::Result<(PathBuf, String)> {
    let path = url.path();
    let (archive, entry) = match path.find(ARCHIVE_SEPARATOR) {
        Some(idx) => (&path[..idx], &path[idx + ARCHIVE_SEPARATOR.len()..]),
        None => (path, ""),
    };

    let archive_path = match Url::parse(archive) {
        Ok(inner) if inner.scheme() == "file" => to_file_path(&inner),
        _ => PathBuf::from(percent_decode_str(archive).decode_utf8_lossy().into_owned()),
    };
    let entry = percent_decode_str(entry).decode_utf8_lossy().into_owned();

    Ok((archive_path, entry))
}
