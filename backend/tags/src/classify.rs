//! File classification by extension.

use serde::{Deserialize, Serialize};

/// Broad category of a shared file, carried in the metadata tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Image,
    Text,
    Document,
    Archive,
    Binary,
    Unknown,
}

/// Classify a filename by its lower-cased extension. No extension means
/// the type cannot be guessed at all.
pub fn classify(filename: &str) -> FileType {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return FileType::Unknown;
    };

    match ext.to_lowercase().as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "svg"          => FileType::Image,
        "txt" | "md" | "html" | "htm" | "css" | "js"    => FileType::Text,
        "pdf" | "doc" | "docx"                          => FileType::Document,
        "zip" | "tar" | "gz" | "rar"                    => FileType::Archive,
        _                                               => FileType::Binary,
    }
}
