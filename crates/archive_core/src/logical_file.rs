//! LogicalFile - a script as the runtime sees it

use archive_fs::FileCategory;

/// Payload of a logical file: text or opaque bytecode, never both
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

/// A file identified by its bare logical name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalFile {
    name: String,
    category: FileCategory,
    content: FileContent,
}

impl LogicalFile {
    /// Text file of an explicit category
    pub fn text(name: impl Into<String>, category: FileCategory, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category,
            content: FileContent::Text(text.into()),
        }
    }

    /// Script source file
    pub fn script(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::text(name, FileCategory::KerboScript, text)
    }

    /// Compiled bytecode file
    pub fn bytecode(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            category: FileCategory::Ksm,
            content: FileContent::Binary(bytes.into()),
        }
    }

    /// Assemble a file from parts without checking that they agree
    ///
    /// Saving a file whose payload does not match its category is refused.
    pub fn from_parts(name: impl Into<String>, category: FileCategory, content: FileContent) -> Self {
        Self {
            name: name.into(),
            category,
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> FileCategory {
        self.category
    }

    pub fn content(&self) -> &FileContent {
        &self.content
    }

    /// Text payload, if this is a text file
    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            FileContent::Text(s) => Some(s),
            FileContent::Binary(_) => None,
        }
    }

    /// Bytecode payload, if this is a binary file
    pub fn binary_content(&self) -> Option<&[u8]> {
        match &self.content {
            FileContent::Binary(b) => Some(b),
            FileContent::Text(_) => None,
        }
    }

    /// Does the payload kind agree with the category?
    pub fn is_consistent(&self) -> bool {
        match self.content {
            FileContent::Text(_) => self.category.is_text(),
            FileContent::Binary(_) => !self.category.is_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let script = LogicalFile::script("boot", "print 1\n");
        assert_eq!(script.category(), FileCategory::KerboScript);
        assert_eq!(script.text_content(), Some("print 1\n"));
        assert!(script.binary_content().is_none());
        assert!(script.is_consistent());

        let compiled = LogicalFile::bytecode("boot", vec![b'k', 3, b'X', b'E']);
        assert_eq!(compiled.category(), FileCategory::Ksm);
        assert!(compiled.text_content().is_none());
        assert!(compiled.is_consistent());
    }

    #[test]
    fn test_inconsistent_parts() {
        let file = LogicalFile::from_parts("boot", FileCategory::Ksm, FileContent::Text("x".into()));
        assert!(!file.is_consistent());

        let file = LogicalFile::from_parts("boot", FileCategory::Ascii, FileContent::Binary(vec![1]));
        assert!(!file.is_consistent());
    }
}
