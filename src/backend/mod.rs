//! Storage surface: config persistence, font catalog, presets and uploads
//!
//! The engine itself never performs I/O. Frontends talk to these traits; the
//! [`LocalBackend`] keeps everything under one directory the way the editor
//! server lays it out, and [`MemoryBackend`] keeps state in memory for tests.

pub mod local;
pub mod memory;

pub use local::LocalBackend;
pub use memory::MemoryBackend;

use crate::config::ConfigDocument;
use crate::presets::ThemePreset;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Load and save the operator's config document
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<ConfigDocument>;
    fn save(&self, doc: &ConfigDocument) -> Result<()>;
}

/// Catalog of uploaded font files, `default` first
pub trait FontSource: Send + Sync {
    fn list_fonts(&self) -> Result<Vec<String>>;
}

/// Named theme presets, in display order
pub trait ThemeSource: Send + Sync {
    fn presets(&self) -> Vec<(String, ThemePreset)> {
        crate::presets::presets()
    }
}

/// Persist uploaded files and report where they ended up
pub trait AssetStore: Send + Sync {
    fn store(&self, kind: AssetKind, filename: &str, bytes: &[u8]) -> Result<StoredAsset>;
}

/// What an upload is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Avatar,
    Logo,
    Background,
    Font,
}

impl AssetKind {
    /// Folder the upload is stored in, relative to the backend root
    pub fn folder(&self) -> &'static str {
        match self {
            AssetKind::Font => "fonts",
            _ => "uploads",
        }
    }
}

impl FromStr for AssetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avatar" => Ok(AssetKind::Avatar),
            "logo" => Ok(AssetKind::Logo),
            "background" => Ok(AssetKind::Background),
            "font" => Ok(AssetKind::Font),
            _ => Err(Error::UnknownAssetKind(s.to_string())),
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AssetKind::Avatar => "avatar",
            AssetKind::Logo => "logo",
            AssetKind::Background => "background",
            AssetKind::Font => "font",
        };
        f.write_str(s)
    }
}

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub kind: AssetKind,
    /// Path the document refers to, e.g. `uploads/avatar.png`
    pub path: String,
    pub filename: String,
}

impl StoredAsset {
    pub fn new(kind: AssetKind, filename: &str) -> Self {
        Self {
            kind,
            path: format!("{}/{}", kind.folder(), filename),
            filename: filename.to_string(),
        }
    }
}

/// Reject names that are empty or would escape the upload folder
pub fn validate_filename(filename: &str) -> Result<()> {
    let bad = filename.trim().is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(['/', '\\', '\0']);
    if bad {
        return Err(Error::InvalidFileName(filename.to_string()));
    }
    Ok(())
}

/// Whether a file name looks like a font the catalog should list
pub fn is_font_file(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower.ends_with(".ttf") || lower.ends_with(".otf")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_kinds_parse() {
        assert_eq!("Avatar".parse::<AssetKind>().unwrap(), AssetKind::Avatar);
        assert_eq!("font".parse::<AssetKind>().unwrap(), AssetKind::Font);
        assert!(matches!(
            "banner".parse::<AssetKind>(),
            Err(Error::UnknownAssetKind(k)) if k == "banner"
        ));
        assert_eq!(AssetKind::Background.to_string(), "background");
    }

    #[test]
    fn stored_paths_follow_folders() {
        assert_eq!(StoredAsset::new(AssetKind::Logo, "l.png").path, "uploads/l.png");
        assert_eq!(StoredAsset::new(AssetKind::Font, "A.ttf").path, "fonts/A.ttf");
    }

    #[test]
    fn filenames_are_validated() {
        assert!(validate_filename("bg.jpg").is_ok());
        assert!(validate_filename("思源黑体.ttf").is_ok());
        for bad in ["", "  ", "..", "../x.png", "a\\b.png"] {
            assert!(validate_filename(bad).is_err(), "{:?} accepted", bad);
        }
    }

    #[test]
    fn font_extensions() {
        assert!(is_font_file("A.TTF"));
        assert!(is_font_file("b.otf"));
        assert!(!is_font_file("c.woff2"));
    }
}
