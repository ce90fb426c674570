use regex::Regex;
use std::sync::LazyLock;

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Two-letter language prefix on a file name, e.g. "en_Instructions.pdf".
regex!(LANGUAGE_PREFIX_REGEX, r"^([A-Za-z]{2})_(.+)$");
regex!(EXTERNAL_LINK_REGEX, r"(?i)^https?://");

pub(crate) const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "avif"];
pub(crate) const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "m4v", "mkv", "avi"];
pub(crate) const LINK_EXTENSIONS: &[&str] = &["url", "webloc", "link"];
