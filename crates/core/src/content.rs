//! Stream to string helpers used by the resource handles.

use cpscan_api::Charset;
use std::io::{self, Read};

const UTF8_BOM: char = '\u{feff}';

/// Reads the whole stream and decodes it, stripping a leading UTF-8 BOM.
pub fn read_to_string(mut reader: impl Read, charset: Charset) -> io::Result<String> {
    let mut bytes = Vec::with_capacity(4096);
    reader.read_to_end(&mut bytes)?;
    let text = charset.decode(bytes)?;
    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Reads the whole stream and splits it into lines without terminators.
pub fn read_lines(mut reader: impl Read, charset: Charset) -> io::Result<Vec<String>> {
    let mut bytes = Vec::with_capacity(4096);
    reader.read_to_end(&mut bytes)?;
    let text = charset.decode(bytes)?;
    Ok(text.lines().map(str::to_string).collect())
}
