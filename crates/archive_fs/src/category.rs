//! Content category sniffing
//!
//! The category of a file is always derived from its bytes, never from its
//! extension. Only the first few bytes (and, for text, the first significant
//! line) are inspected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature at the start of every compiled bytecode file
pub const KSM_MAGIC: [u8; 4] = [b'k', 0x03, b'X', b'E'];

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Number of bytes scanned when looking for the first script statement
const SNIFF_WINDOW: usize = 1024;

/// Leading words that mark a text file as KerboScript source
const SCRIPT_KEYWORDS: &[&str] = &[
    "add", "break", "clearscreen", "compile", "copy", "copypath", "declare",
    "delete", "deletepath", "edit", "for", "from", "function", "global", "if",
    "list", "local", "lock", "log", "on", "parameter", "preserve", "print",
    "reboot", "remove", "rename", "return", "run", "runoncepath", "runpath",
    "set", "shutdown", "stage", "switch", "toggle", "unlock", "unset", "until",
    "wait", "when",
];

/// Sniffed classification of a file's bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileCategory {
    /// Plain text that does not look like a script
    Ascii,
    /// Script source text
    KerboScript,
    /// Compiled bytecode
    Ksm,
    /// Binary data that is neither text nor bytecode
    Other,
    /// Too few bytes to tell
    TooShort,
}

impl FileCategory {
    /// Every category except compiled bytecode is carried as text
    pub fn is_text(self) -> bool {
        !matches!(self, FileCategory::Ksm)
    }

    /// Categories whose line endings are normalized on load
    pub fn normalizes_line_endings(self) -> bool {
        matches!(self, FileCategory::Ascii | FileCategory::KerboScript)
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Ascii => "ASCII",
            FileCategory::KerboScript => "KERBOSCRIPT",
            FileCategory::Ksm => "KSM",
            FileCategory::Other => "OTHER",
            FileCategory::TooShort => "TOOSHORT",
        };
        write!(f, "{}", s)
    }
}

/// Classify raw file bytes
pub fn identify_category(bytes: &[u8]) -> FileCategory {
    if bytes.len() < KSM_MAGIC.len() {
        return FileCategory::TooShort;
    }

    if bytes.starts_with(&KSM_MAGIC) {
        return FileCategory::Ksm;
    }

    let body = bytes.strip_prefix(&UTF8_BOM[..]).unwrap_or(bytes);
    let prefix = &body[..body.len().min(KSM_MAGIC.len())];

    if !prefix.iter().all(|&b| is_text_byte(b)) {
        return FileCategory::Other;
    }

    if looks_like_script(body) {
        FileCategory::KerboScript
    } else {
        FileCategory::Ascii
    }
}

fn is_text_byte(b: u8) -> bool {
    // Bytes >= 0x80 are accepted as parts of multi-byte UTF-8 sequences
    matches!(b, b'\t' | b'\n' | b'\r' | 0x20..=0x7E | 0x80..=0xFF)
}

fn looks_like_script(body: &[u8]) -> bool {
    let window = &body[..body.len().min(SNIFF_WINDOW)];
    let text = String::from_utf8_lossy(window);

    let Some(line) = text.lines().map(str::trim).find(|l| !l.is_empty()) else {
        return false;
    };

    if line.starts_with("//") || line.starts_with('@') || line.starts_with('{') {
        return true;
    }

    let word: String = line
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect::<String>()
        .to_ascii_lowercase();

    SCRIPT_KEYWORDS.contains(&word.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short() {
        assert_eq!(identify_category(b""), FileCategory::TooShort);
        assert_eq!(identify_category(b"abc"), FileCategory::TooShort);
    }

    #[test]
    fn test_bytecode_magic() {
        let mut bytes = KSM_MAGIC.to_vec();
        bytes.extend_from_slice(&[0x00, 0xFF, 0x10]);
        assert_eq!(identify_category(&bytes), FileCategory::Ksm);
        assert_eq!(identify_category(&KSM_MAGIC), FileCategory::Ksm);
    }

    #[test]
    fn test_script_detection() {
        assert_eq!(identify_category(b"print 1\n"), FileCategory::KerboScript);
        assert_eq!(identify_category(b"\r\n\r\nSET x TO 5.\r\n"), FileCategory::KerboScript);
        assert_eq!(identify_category(b"// launch script\n"), FileCategory::KerboScript);
        assert_eq!(identify_category(b"@lazyglobal off.\n"), FileCategory::KerboScript);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(identify_category(b"shopping list: eggs\n"), FileCategory::Ascii);
        assert_eq!(identify_category("héllo wörld".as_bytes()), FileCategory::Ascii);
    }

    #[test]
    fn test_bom_is_skipped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(b"print 1.");
        assert_eq!(identify_category(&bytes), FileCategory::KerboScript);
    }

    #[test]
    fn test_binary_is_other() {
        assert_eq!(identify_category(&[0x00, 0x01, 0x02, 0x03, 0x04]), FileCategory::Other);
        assert_eq!(identify_category(&[b'k', 0x03, b'X', b'F']), FileCategory::Other);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(FileCategory::KerboScript.to_string(), "KERBOSCRIPT");
        assert_eq!(FileCategory::TooShort.to_string(), "TOOSHORT");
        assert!(!FileCategory::Ksm.is_text());
        assert!(FileCategory::Other.is_text());
        assert!(!FileCategory::Other.normalizes_line_endings());
    }
}
