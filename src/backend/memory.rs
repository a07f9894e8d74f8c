//! In-memory storage for tests and hosts that persist elsewhere

use super::{
    is_font_file, validate_filename, AssetKind, AssetStore, ConfigStore, FontSource, StoredAsset,
    ThemeSource,
};
use crate::config::ConfigDocument;
use crate::rendering::theme::DEFAULT_FONT;
use crate::Result;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

/// Keeps the document and uploads in memory
#[derive(Debug, Default)]
pub struct MemoryBackend {
    doc: Mutex<ConfigDocument>,
    files: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new(doc: ConfigDocument) -> Self {
        Self {
            doc: Mutex::new(doc),
            files: Mutex::new(BTreeMap::new()),
        }
    }

    fn files(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.files.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn doc(&self) -> MutexGuard<'_, ConfigDocument> {
        self.doc.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Bytes stored under `path` (e.g. `uploads/a.png`)
    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.files().get(path).cloned()
    }
}

impl ConfigStore for MemoryBackend {
    fn load(&self) -> Result<ConfigDocument> {
        Ok(self.doc().clone())
    }

    fn save(&self, doc: &ConfigDocument) -> Result<()> {
        *self.doc() = doc.clone();
        Ok(())
    }
}

impl FontSource for MemoryBackend {
    fn list_fonts(&self) -> Result<Vec<String>> {
        let files = self.files();
        let prefix = format!("{}/", AssetKind::Font.folder());
        let fonts = files
            .keys()
            .filter_map(|path| path.strip_prefix(&prefix))
            .filter(|name| is_font_file(name))
            .map(str::to_string);
        Ok(std::iter::once(DEFAULT_FONT.to_string()).chain(fonts).collect())
    }
}

impl ThemeSource for MemoryBackend {}

impl AssetStore for MemoryBackend {
    fn store(&self, kind: AssetKind, filename: &str, bytes: &[u8]) -> Result<StoredAsset> {
        validate_filename(filename)?;
        let asset = StoredAsset::new(kind, filename);
        self.files().insert(asset.path.clone(), bytes.to_vec());
        Ok(asset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_round_trips_state() {
        let backend = MemoryBackend::default();
        assert_eq!(backend.load().unwrap(), ConfigDocument::default());

        let mut doc = ConfigDocument::default();
        doc.bot_info_mut().name = Some("Mem".into());
        backend.save(&doc).unwrap();
        assert_eq!(backend.load().unwrap(), doc);

        backend.store(AssetKind::Font, "B.ttf", b"b").unwrap();
        backend.store(AssetKind::Font, "A.otf", b"a").unwrap();
        backend.store(AssetKind::Avatar, "me.png", b"p").unwrap();
        assert_eq!(backend.list_fonts().unwrap(), vec!["default", "A.otf", "B.ttf"]);
        assert_eq!(backend.file("uploads/me.png"), Some(b"p".to_vec()));
    }

    #[test]
    fn non_font_files_stay_out_of_the_catalog() {
        let backend = MemoryBackend::default();
        backend.store(AssetKind::Font, "Title.TTF", b"t").unwrap();
        backend.store(AssetKind::Font, "readme.txt", b"r").unwrap();
        backend.store(AssetKind::Font, "cover.png", b"c").unwrap();
        assert_eq!(backend.list_fonts().unwrap(), vec!["default", "Title.TTF"]);
    }
}
