//! Plain-text renderings of catalog answers. JSON output goes straight
//! through `serde_json`.

use mediacenter_catalog::{Folder, LanguageOption, RevealPath, View, count_files};
use mediacenter_manifest::FileRecord;
use std::fmt::{Display, Formatter, Result as FmtResult};

const INDENT: &str = "  ";

/// A [`View`] as an indented outline with per-node counts.
pub struct TreeText<'a>(pub &'a View);
impl Display for TreeText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for category in &self.0.categories {
            match &category.icon {
                Some(icon) => writeln!(f, "{icon} {} ({})", category.name, count_files(category))?,
                None => writeln!(f, "{} ({})", category.name, count_files(category))?,
            }
            if let Some(description) = &category.description {
                writeln!(f, "{INDENT}{description}")?;
            }
            folder(f, category, 1)?;
        }
        Ok(())
    }
}

fn folder<F: Folder + ?Sized>(f: &mut Formatter<'_>, node: &F, depth: usize) -> FmtResult {
    let indent = INDENT.repeat(depth);
    for file in node.files() {
        writeln!(f, "{indent}{}", FileLine(file))?;
    }
    for child in node.subfolders() {
        writeln!(f, "{indent}{}/ ({})", child.name, count_files(child))?;
        folder(f, child, depth + 1)?;
    }
    Ok(())
}

struct FileLine<'a>(&'a FileRecord);
impl Display for FileLine<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let file = self.0;
        write!(f, "{} ({}", file.display_name(), file.kind)?;
        if let Some(language) = &file.language {
            write!(f, ", {language}")?;
        }
        write!(f, ") #{}", file.hash)
    }
}

/// One picker option per line: the selection value, then its label.
pub struct LanguagesText<'a>(pub &'a [LanguageOption]);
impl Display for LanguagesText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for option in self.0 {
            writeln!(f, "{}\t{}", option.selection, option.label)?;
        }
        Ok(())
    }
}

/// Node ids down to the file, separated by `/`.
pub struct RevealText<'a>(pub &'a RevealPath);
impl Display for RevealText<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let segments: Vec<&str> = self.0.segments().collect();
        write!(f, "{}", segments.join("/"))
    }
}
