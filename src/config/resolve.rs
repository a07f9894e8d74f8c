use super::{
    BackgroundType, BadgePosition, BotInfo, ConfigDocument, FontSettings, Item, LayoutSettings,
    Section, ThemeSettings,
};
use serde::{Deserialize, Serialize};

/// Gradient stops used when the theme supplies none (or fewer than two)
pub const DEFAULT_GRADIENT: [&str; 2] = ["#ffeef8", "#e6f3ff"];

const DEFAULT_ITEMS_PER_ROW: u32 = 3;
const DEFAULT_CARD_WIDTH: u32 = 200;
const DEFAULT_CARD_HEIGHT: u32 = 80;
const DEFAULT_PADDING: u32 = 20;
const DEFAULT_SPACING: u32 = 15;
const DEFAULT_ANGLE: i32 = 135;
const DEFAULT_TITLE_SIZE: u32 = 32;
const DEFAULT_SUBTITLE_SIZE: u32 = 18;
const DEFAULT_CARD_TITLE_SIZE: u32 = 16;
const DEFAULT_CARD_DESC_SIZE: u32 = 12;
const DEFAULT_FONT: &str = "default";

/// A configuration with every field concrete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedConfig {
    pub bot_info: ResolvedBotInfo,
    pub layout: ResolvedLayout,
    pub theme: ResolvedTheme,
    pub fonts: ResolvedFonts,
    pub sections: Vec<ResolvedSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBotInfo {
    pub name: String,
    pub qq: String,
    pub description: String,
    pub notice: String,
    pub corner_badge: String,
    pub corner_badge_position: BadgePosition,
    pub avatar: String,
    pub logo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedLayout {
    pub items_per_row: u32,
    pub card_width: u32,
    pub card_height: u32,
    pub padding: u32,
    pub spacing: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTheme {
    pub name: String,
    pub background_type: BackgroundType,
    pub background_color: String,
    pub background_gradient: Vec<String>,
    pub angle: i32,
    pub background_image: String,
    pub card_background: String,
    pub card_border: String,
    pub title_color: String,
    pub subtitle_color: String,
    pub card_title_color: String,
    pub card_desc_color: String,
    pub icon_background: String,
    pub icon_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFonts {
    pub title_font: String,
    pub content_font: String,
    pub title_bold: bool,
    pub title_italic: bool,
    pub content_bold: bool,
    pub content_italic: bool,
    pub title_size: u32,
    pub subtitle_size: u32,
    pub card_title_size: u32,
    pub card_desc_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSection {
    pub name: String,
    pub icon: String,
    pub items: Vec<ResolvedItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub icon: String,
    pub name: String,
    pub description: String,
    pub usage: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        resolve(&ConfigDocument::default())
    }
}

/// Apply documented defaults to every missing leaf.
///
/// Each leaf falls back on its own: a partially filled group keeps the values
/// it has. Empty strings count as missing; numbers outside their valid range
/// fall back too. This never fails and never reads anything but `doc`.
pub fn resolve(doc: &ConfigDocument) -> ResolvedConfig {
    ResolvedConfig {
        bot_info: resolve_bot_info(doc.bot_info.as_ref()),
        layout: resolve_layout(doc.layout.as_ref()),
        theme: resolve_theme(doc.theme.as_ref()),
        fonts: resolve_fonts(doc.fonts.as_ref()),
        sections: doc
            .sections
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(resolve_section)
            .collect(),
    }
}

fn text(value: Option<&String>, default: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.clone(),
        _ => default.to_string(),
    }
}

fn positive(value: Option<i64>, default: u32) -> u32 {
    value
        .filter(|v| *v >= 1)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

fn non_negative(value: Option<i64>, default: u32) -> u32 {
    value
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

fn resolve_bot_info(info: Option<&BotInfo>) -> ResolvedBotInfo {
    let empty = BotInfo::default();
    let info = info.unwrap_or(&empty);
    ResolvedBotInfo {
        name: text(info.name.as_ref(), ""),
        qq: text(info.qq.as_ref(), ""),
        description: text(info.description.as_ref(), ""),
        notice: text(info.notice.as_ref(), ""),
        corner_badge: text(info.corner_badge.as_ref(), ""),
        corner_badge_position: info.corner_badge_position.unwrap_or_default(),
        avatar: text(info.avatar.as_ref(), ""),
        logo: text(info.logo.as_ref(), ""),
    }
}

fn resolve_layout(layout: Option<&LayoutSettings>) -> ResolvedLayout {
    let empty = LayoutSettings::default();
    let layout = layout.unwrap_or(&empty);
    ResolvedLayout {
        items_per_row: positive(layout.items_per_row, DEFAULT_ITEMS_PER_ROW),
        card_width: positive(layout.card_width, DEFAULT_CARD_WIDTH),
        card_height: positive(layout.card_height, DEFAULT_CARD_HEIGHT),
        padding: non_negative(layout.padding, DEFAULT_PADDING),
        spacing: non_negative(layout.spacing, DEFAULT_SPACING),
    }
}

fn resolve_theme(theme: Option<&ThemeSettings>) -> ResolvedTheme {
    let empty = ThemeSettings::default();
    let theme = theme.unwrap_or(&empty);
    ResolvedTheme {
        name: text(theme.name.as_ref(), "custom"),
        background_type: theme.background_type.unwrap_or_default(),
        background_color: text(theme.background_color.as_ref(), "#f5f5f5"),
        background_gradient: theme
            .background_gradient
            .clone()
            .unwrap_or_else(|| DEFAULT_GRADIENT.iter().map(|c| c.to_string()).collect()),
        angle: theme
            .angle
            .and_then(|a| i32::try_from(a).ok())
            .unwrap_or(DEFAULT_ANGLE),
        background_image: text(theme.background_image.as_ref(), ""),
        card_background: text(theme.card_background.as_ref(), "#ffffff"),
        card_border: text(theme.card_border.as_ref(), "#e0e0e0"),
        title_color: text(theme.title_color.as_ref(), "#333333"),
        subtitle_color: text(theme.subtitle_color.as_ref(), "#666666"),
        card_title_color: text(theme.card_title_color.as_ref(), "#444444"),
        card_desc_color: text(theme.card_desc_color.as_ref(), "#888888"),
        icon_background: text(theme.icon_background.as_ref(), "#f0f0f0"),
        icon_color: text(theme.icon_color.as_ref(), "#666666"),
    }
}

fn resolve_fonts(fonts: Option<&FontSettings>) -> ResolvedFonts {
    let empty = FontSettings::default();
    let fonts = fonts.unwrap_or(&empty);
    ResolvedFonts {
        title_font: text(fonts.title_font.as_ref(), DEFAULT_FONT),
        content_font: text(fonts.content_font.as_ref(), DEFAULT_FONT),
        title_bold: fonts.title_bold.unwrap_or(false),
        title_italic: fonts.title_italic.unwrap_or(false),
        content_bold: fonts.content_bold.unwrap_or(false),
        content_italic: fonts.content_italic.unwrap_or(false),
        title_size: positive(fonts.title_size, DEFAULT_TITLE_SIZE),
        subtitle_size: positive(fonts.subtitle_size, DEFAULT_SUBTITLE_SIZE),
        card_title_size: positive(fonts.card_title_size, DEFAULT_CARD_TITLE_SIZE),
        card_desc_size: positive(fonts.card_desc_size, DEFAULT_CARD_DESC_SIZE),
    }
}

fn resolve_section(section: &Section) -> ResolvedSection {
    ResolvedSection {
        name: text(section.name.as_ref(), ""),
        icon: text(section.icon.as_ref(), ""),
        items: section
            .items
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(resolve_item)
            .collect(),
    }
}

fn resolve_item(item: &Item) -> ResolvedItem {
    ResolvedItem {
        icon: text(item.icon.as_ref(), ""),
        name: text(item.name.as_ref(), ""),
        description: text(item.description.as_ref(), ""),
        usage: text(item.usage.as_ref(), ""),
    }
}
