//! Text decoding and line-ending conversion
//!
//! Text is held in memory with bare LF line endings and written to disk in
//! the host's native convention.

use serde::{Deserialize, Serialize};

/// Line-ending convention used when serializing text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineEnding {
    /// Bare `\n`
    #[serde(rename = "lf")]
    Lf,
    /// `\r\n`
    #[serde(rename = "crlf")]
    CrLf,
}

impl LineEnding {
    /// The convention of the host platform
    #[cfg(windows)]
    pub fn native() -> Self {
        LineEnding::CrLf
    }

    #[cfg(not(windows))]
    pub fn native() -> Self {
        LineEnding::Lf
    }

    /// Replace every CRLF with a single LF
    pub fn normalize(text: &str) -> String {
        text.replace("\r\n", "\n")
    }

    /// Replace every LF with this convention's sequence
    pub fn expand(self, text: &str) -> String {
        match self {
            LineEnding::Lf => text.to_string(),
            LineEnding::CrLf => text.replace('\n', "\r\n"),
        }
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::native()
    }
}

/// Decode bytes as UTF-8
///
/// A leading byte-order mark is kept verbatim. Malformed sequences are
/// replaced with U+FFFD rather than failing the decode.
pub fn decode_utf8(bytes: &[u8]) -> String {
    let (result, had_errors) = encoding_rs::UTF_8.decode_without_bom_handling(bytes);

    if had_errors {
        tracing::warn!("Malformed UTF-8 replaced while decoding {} bytes", bytes.len());
    }

    result.into_owned()
}
