use serde::{Deserialize, Serialize};

pub const DEFAULT_PREFIX: &str = "test";
pub const DEFAULT_EXTENSION: &str = "txt";

/// Naming scheme for per-frame metadata files, `<prefix><frame>.<extension>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameFileNaming {
    pub prefix: String,
    pub extension: String,
}

impl Default for FrameFileNaming {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl FrameFileNaming {
    pub fn new(prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn file_name(&self, frame: u64) -> String {
        format!("{}{}.{}", self.prefix, frame, self.extension)
    }

    /// Frame number encoded in `name`, if it follows this scheme.
    pub fn parse(&self, name: &str) -> Option<u64> {
        let digits = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name() {
        let naming = FrameFileNaming::default();
        assert_eq!(naming.file_name(42), "test42.txt");
        assert_eq!(naming.parse("test42.txt"), Some(42));
        assert_eq!(naming.parse("test0.txt"), Some(0));
    }

    #[test]
    fn test_parse_rejects_foreign_names() {
        let naming = FrameFileNaming::default();
        assert_eq!(naming.parse("test.txt"), None);
        assert_eq!(naming.parse("test-1.txt"), None);
        assert_eq!(naming.parse("test12.json"), None);
        assert_eq!(naming.parse("frame12.txt"), None);
        assert_eq!(naming.parse("test12txt"), None);
        assert_eq!(naming.parse("test+3.txt"), None);
        assert_eq!(naming.parse("test99999999999999999999999.txt"), None);
    }

    #[test]
    fn test_custom_scheme() {
        let naming = FrameFileNaming::new("frame_", "json");
        assert_eq!(naming.file_name(7), "frame_7.json");
        assert_eq!(naming.parse("frame_7.json"), Some(7));
    }
}
