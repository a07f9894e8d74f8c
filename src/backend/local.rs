//! Directory-backed storage: `config.yaml`, `fonts/` and `uploads/` under one root.

use super::{
    is_font_file, validate_filename, AssetKind, AssetStore, ConfigStore, FontSource,
    StoredAsset, ThemeSource,
};
use crate::config::ConfigDocument;
use crate::rendering::theme::DEFAULT_FONT;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file name under the root
pub const CONFIG_FILE: &str = "config.yaml";

/// Storage rooted at a directory on disk
#[derive(Debug, Clone)]
pub struct LocalBackend {
    root: PathBuf,
    config_path: PathBuf,
}

impl LocalBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config_path = root.join(CONFIG_FILE);
        Self { root, config_path }
    }

    /// Use a different config file; `.json` files are read and written as JSON
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.root.join(AssetKind::Font.folder())
    }

    fn is_json(&self) -> bool {
        self.config_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl ConfigStore for LocalBackend {
    /// A missing config file loads as the empty document
    fn load(&self) -> Result<ConfigDocument> {
        if !self.config_path.exists() {
            log::info!(
                "no config at {}; starting from defaults",
                self.config_path.display()
            );
            return Ok(ConfigDocument::default());
        }
        let text = fs::read_to_string(&self.config_path)?;
        let doc = if self.is_json() {
            ConfigDocument::from_json(&text)?
        } else {
            ConfigDocument::from_yaml(&text)?
        };
        log::debug!("loaded config from {}", self.config_path.display());
        Ok(doc)
    }

    fn save(&self, doc: &ConfigDocument) -> Result<()> {
        let text = if self.is_json() {
            serde_json::to_string_pretty(doc)?
        } else {
            // Multi-line strings come out as block scalars
            serde_yaml::to_string(doc)?
        };
        if let Some(parent) = self.config_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.config_path, text)?;
        log::debug!("saved config to {}", self.config_path.display());
        Ok(())
    }
}

impl FontSource for LocalBackend {
    fn list_fonts(&self) -> Result<Vec<String>> {
        let mut fonts = Vec::new();
        let dir = self.fonts_dir();
        if dir.is_dir() {
            for entry in fs::read_dir(&dir)? {
                let entry = entry?;
                if !entry.file_type()?.is_file() {
                    continue;
                }
                if let Some(name) = entry.file_name().to_str() {
                    if is_font_file(name) {
                        fonts.push(name.to_string());
                    }
                }
            }
        }
        fonts.sort();
        fonts.insert(0, DEFAULT_FONT.to_string());
        Ok(fonts)
    }
}

impl ThemeSource for LocalBackend {}

impl AssetStore for LocalBackend {
    fn store(&self, kind: AssetKind, filename: &str, bytes: &[u8]) -> Result<StoredAsset> {
        validate_filename(filename)?;
        let dir = self.root.join(kind.folder());
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(filename), bytes)?;
        log::info!("stored {} upload {} ({} bytes)", kind, filename, bytes.len());
        Ok(StoredAsset::new(kind, filename))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BotInfo, Item, Section};
    use crate::Error;
    use pretty_assertions::assert_eq;

    fn sample() -> ConfigDocument {
        ConfigDocument {
            bot_info: Some(BotInfo {
                name: Some("Helper".into()),
                notice: Some("line one\nline two".into()),
                ..Default::default()
            }),
            sections: Some(vec![Section {
                name: Some("Fun".into()),
                icon: Some("🎮".into()),
                items: Some(vec![Item::new("🎲", "roll", "dice", "roll 2d6")]),
            }]),
            ..Default::default()
        }
    }

    #[test]
    fn yaml_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path());
        backend.save(&sample()).unwrap();

        let text = fs::read_to_string(dir.path().join("config.yaml")).unwrap();
        assert!(text.contains("notice: |"), "multi-line notice not a block:\n{}", text);
        assert_eq!(backend.load().unwrap(), sample());
    }

    #[test]
    fn json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path()).with_config_path(dir.path().join("menu.json"));
        backend.save(&sample()).unwrap();
        let text = fs::read_to_string(dir.path().join("menu.json")).unwrap();
        assert!(text.trim_start().starts_with('{'));
        assert_eq!(backend.load().unwrap(), sample());
    }

    #[test]
    fn missing_config_is_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path());
        assert_eq!(backend.load().unwrap(), ConfigDocument::default());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.yaml"), "sections: [\n").unwrap();
        let backend = LocalBackend::new(dir.path());
        assert!(matches!(backend.load(), Err(Error::Yaml(_))));
    }

    #[test]
    fn fonts_listing() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path());
        assert_eq!(backend.list_fonts().unwrap(), vec!["default".to_string()]);

        let fonts = dir.path().join("fonts");
        fs::create_dir_all(&fonts).unwrap();
        fs::write(fonts.join("Zed.otf"), b"x").unwrap();
        fs::write(fonts.join("Alpha.ttf"), b"x").unwrap();
        fs::write(fonts.join("notes.txt"), b"x").unwrap();
        assert_eq!(
            backend.list_fonts().unwrap(),
            vec!["default".to_string(), "Alpha.ttf".to_string(), "Zed.otf".to_string()]
        );
    }

    #[test]
    fn uploads_land_in_their_folders() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(dir.path());

        let avatar = backend.store(AssetKind::Avatar, "me.png", b"png").unwrap();
        assert_eq!(avatar.path, "uploads/me.png");
        assert_eq!(fs::read(dir.path().join("uploads/me.png")).unwrap(), b"png");

        let font = backend.store(AssetKind::Font, "Brand.ttf", b"ttf").unwrap();
        assert_eq!(font.path, "fonts/Brand.ttf");
        assert!(backend.list_fonts().unwrap().contains(&"Brand.ttf".to_string()));

        assert!(matches!(
            backend.store(AssetKind::Logo, "../evil.png", b""),
            Err(Error::InvalidFileName(_))
        ));
    }

    #[test]
    fn themes_come_from_builtin_catalog() {
        let backend = LocalBackend::new("unused");
        let presets = backend.presets();
        assert_eq!(presets.len(), 16);
        assert_eq!(presets[0].0, "default");
    }
}
