//! Editing session: one owned document plus index-based edits.
//!
//! Every edit marks the session dirty; saving is the caller's job (through a
//! [`ConfigStore`](crate::backend::ConfigStore)) followed by
//! [`EditingSession::mark_saved`].

use crate::backend::{AssetKind, StoredAsset};
use crate::color::parse_color;
use crate::config::{resolve, ConfigDocument, Item, ResolvedConfig, Section, DEFAULT_GRADIENT};
use crate::rendering::{build_render_tree, RenderTree};
use crate::{presets, Error, RenderEnv, Result};
use std::fmt;
use std::str::FromStr;

/// Name given to a freshly added section
pub const NEW_SECTION_NAME: &str = "新板块";
/// Name given to a freshly added item
pub const NEW_ITEM_NAME: &str = "新命令";
/// Description given to a freshly added item
pub const NEW_ITEM_DESCRIPTION: &str = "命令描述";

/// Theme color that can be set from free-form color text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    GradientStart,
    GradientEnd,
    BackgroundColor,
    CardBackground,
    CardBorder,
    TitleColor,
    SubtitleColor,
    CardTitleColor,
    CardDescColor,
    IconBackground,
    IconColor,
}

impl ColorSlot {
    const ALL: [(ColorSlot, &'static str); 11] = [
        (ColorSlot::GradientStart, "gradient-start"),
        (ColorSlot::GradientEnd, "gradient-end"),
        (ColorSlot::BackgroundColor, "background-color"),
        (ColorSlot::CardBackground, "card-background"),
        (ColorSlot::CardBorder, "card-border"),
        (ColorSlot::TitleColor, "title-color"),
        (ColorSlot::SubtitleColor, "subtitle-color"),
        (ColorSlot::CardTitleColor, "card-title-color"),
        (ColorSlot::CardDescColor, "card-desc-color"),
        (ColorSlot::IconBackground, "icon-background"),
        (ColorSlot::IconColor, "icon-color"),
    ];

    fn name(self) -> &'static str {
        Self::ALL
            .iter()
            .find(|(slot, _)| *slot == self)
            .map(|(_, name)| *name)
            .unwrap_or_default()
    }
}

impl FromStr for ColorSlot {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .iter()
            .find(|(_, name)| *name == wanted)
            .map(|(slot, _)| *slot)
            .ok_or_else(|| format!("unknown color slot '{}'", s))
    }
}

impl fmt::Display for ColorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Owns the document being edited
#[derive(Debug, Clone, Default)]
pub struct EditingSession {
    doc: ConfigDocument,
    dirty: bool,
}

impl EditingSession {
    pub fn new(doc: ConfigDocument) -> Self {
        Self { doc, dirty: false }
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.doc
    }

    /// Direct access for field edits; marks the session dirty
    pub fn document_mut(&mut self) -> &mut ConfigDocument {
        self.dirty = true;
        &mut self.doc
    }

    pub fn into_document(self) -> ConfigDocument {
        self.doc
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn resolved(&self) -> ResolvedConfig {
        resolve(&self.doc)
    }

    pub fn render(&self, env: &RenderEnv) -> RenderTree {
        build_render_tree(&self.resolved(), env)
    }

    fn section_count(&self) -> usize {
        self.doc.sections.as_ref().map_or(0, Vec::len)
    }

    fn section_mut(&mut self, index: usize) -> Result<&mut Section> {
        let sections = self.doc.sections.as_deref_mut().unwrap_or_default();
        let len = sections.len();
        sections.get_mut(index).ok_or(Error::SectionIndex { index, len })
    }

    fn items_mut(&mut self, section: usize) -> Result<&mut Vec<Item>> {
        Ok(self.section_mut(section)?.items.get_or_insert_with(Vec::new))
    }

    /// Items of `section`, checking that `index` points at one of them
    fn items_at(&mut self, section: usize, index: usize) -> Result<&mut Vec<Item>> {
        let items = self.items_mut(section)?;
        if index >= items.len() {
            return Err(Error::ItemIndex {
                section,
                index,
                len: items.len(),
            });
        }
        Ok(items)
    }

    /// Append a placeholder section; returns its index
    pub fn add_section(&mut self) -> usize {
        let sections = self.doc.sections_mut();
        sections.push(Section {
            name: Some(NEW_SECTION_NAME.to_string()),
            icon: Some(String::new()),
            items: Some(Vec::new()),
        });
        self.dirty = true;
        sections.len() - 1
    }

    pub fn remove_section(&mut self, index: usize) -> Result<Section> {
        let len = self.section_count();
        if index >= len {
            return Err(Error::SectionIndex { index, len });
        }
        self.dirty = true;
        Ok(self.doc.sections_mut().remove(index))
    }

    /// Append a placeholder item to `section`; returns its index
    pub fn add_item(&mut self, section: usize) -> Result<usize> {
        let items = self.items_mut(section)?;
        items.push(placeholder_item());
        let index = items.len() - 1;
        self.dirty = true;
        Ok(index)
    }

    /// Insert a placeholder item right after `index`; returns the new index
    pub fn add_item_below(&mut self, section: usize, index: usize) -> Result<usize> {
        let items = self.items_at(section, index)?;
        items.insert(index + 1, placeholder_item());
        self.dirty = true;
        Ok(index + 1)
    }

    pub fn remove_item(&mut self, section: usize, index: usize) -> Result<Item> {
        let removed = self.items_at(section, index)?.remove(index);
        self.dirty = true;
        Ok(removed)
    }

    /// Swap the item with its predecessor; `Ok(false)` for the first item
    pub fn move_item_up(&mut self, section: usize, index: usize) -> Result<bool> {
        let items = self.items_at(section, index)?;
        if index == 0 {
            return Ok(false);
        }
        items.swap(index - 1, index);
        self.dirty = true;
        Ok(true)
    }

    /// Swap the item with its successor; `Ok(false)` for the last item
    pub fn move_item_down(&mut self, section: usize, index: usize) -> Result<bool> {
        let items = self.items_at(section, index)?;
        if index + 1 == items.len() {
            return Ok(false);
        }
        items.swap(index, index + 1);
        self.dirty = true;
        Ok(true)
    }

    /// Set a theme color from free-form text.
    ///
    /// Returns `false` and leaves the previous value in place when the text
    /// is not a recognizable color.
    pub fn set_theme_color(&mut self, slot: ColorSlot, text: &str) -> bool {
        let Some(hex) = parse_color(text) else {
            log::debug!("ignoring invalid color '{}' for {}", text, slot);
            return false;
        };

        let theme = self.doc.theme_mut();
        let target = match slot {
            ColorSlot::GradientStart | ColorSlot::GradientEnd => {
                let stops = theme.background_gradient.get_or_insert_with(Vec::new);
                while stops.len() < DEFAULT_GRADIENT.len() {
                    stops.push(DEFAULT_GRADIENT[stops.len()].to_string());
                }
                let i = if slot == ColorSlot::GradientStart { 0 } else { 1 };
                stops[i] = hex;
                self.dirty = true;
                return true;
            }
            ColorSlot::BackgroundColor => &mut theme.background_color,
            ColorSlot::CardBackground => &mut theme.card_background,
            ColorSlot::CardBorder => &mut theme.card_border,
            ColorSlot::TitleColor => &mut theme.title_color,
            ColorSlot::SubtitleColor => &mut theme.subtitle_color,
            ColorSlot::CardTitleColor => &mut theme.card_title_color,
            ColorSlot::CardDescColor => &mut theme.card_desc_color,
            ColorSlot::IconBackground => &mut theme.icon_background,
            ColorSlot::IconColor => &mut theme.icon_color,
        };
        *target = Some(hex);
        self.dirty = true;
        true
    }

    /// Point the document at a stored upload.
    ///
    /// Fonts only join the catalog, so attaching one leaves the document
    /// untouched and returns `false`.
    pub fn attach_asset(&mut self, asset: &StoredAsset) -> bool {
        let path = Some(asset.path.clone());
        match asset.kind {
            AssetKind::Avatar => self.doc.bot_info_mut().avatar = path,
            AssetKind::Logo => self.doc.bot_info_mut().logo = path,
            AssetKind::Background => self.doc.theme_mut().background_image = path,
            AssetKind::Font => return false,
        }
        self.dirty = true;
        true
    }

    pub fn clear_avatar(&mut self) {
        self.doc.bot_info_mut().avatar = Some(String::new());
        self.dirty = true;
    }

    pub fn clear_logo(&mut self) {
        self.doc.bot_info_mut().logo = Some(String::new());
        self.dirty = true;
    }

    /// Apply a built-in preset; the document is unchanged on error
    pub fn apply_preset(&mut self, key: &str) -> Result<()> {
        presets::apply_builtin(&mut self.doc, key)?;
        self.dirty = true;
        Ok(())
    }
}

fn placeholder_item() -> Item {
    Item::new("", NEW_ITEM_NAME, NEW_ITEM_DESCRIPTION, "")
}
