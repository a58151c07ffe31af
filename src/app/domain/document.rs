/// A file handed to the source filter: decoded content plus the name cgit
/// passed on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    filename: String,
    content: String,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Decode raw input as UTF-8, substituting U+FFFD for invalid sequences.
    pub fn from_bytes(filename: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(filename, String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// True when the content opens with an interpreter directive.
    pub fn has_shebang(&self) -> bool {
        self.content.starts_with("#!")
    }
}
