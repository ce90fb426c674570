use crate::consts::{EXTERNAL_LINK_REGEX, IMAGE_EXTENSIONS, LINK_EXTENSIONS, VIDEO_EXTENSIONS};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::Path;

/// Media type of a file, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileType {
    Image,
    Video,
    Pdf,
    ExternalLink,
    /// Anything that isn't recognised as one of the above.
    Document,
}
impl FileType {
    /// Classifies a file by its name (or URL). Extension matching is
    /// case-insensitive.
    pub fn from_file_name(name: &str) -> Self {
        let name = name.trim();
        if EXTERNAL_LINK_REGEX.is_match(name) {
            return Self::ExternalLink;
        }
        let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
            return Self::Document;
        };
        let ext = ext.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Self::Pdf,
            e if IMAGE_EXTENSIONS.contains(&e) => Self::Image,
            e if VIDEO_EXTENSIONS.contains(&e) => Self::Video,
            e if LINK_EXTENSIONS.contains(&e) => Self::ExternalLink,
            _ => Self::Document,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Image => "image",
            FileType::Video => "video",
            FileType::Pdf => "pdf",
            FileType::ExternalLink => "externalLink",
            FileType::Document => "document",
        }
    }
}
impl Display for FileType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
