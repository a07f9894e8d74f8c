//! Help-menu configuration documents.
//!
//! [`ConfigDocument`] is the partial, operator-edited shape: every leaf is
//! optional and deserialization is lenient, so any syntactically valid JSON or
//! YAML document loads. [`resolve`] turns it into a [`ResolvedConfig`] where
//! every field is concrete.

mod lenient;
mod resolve;

pub use resolve::{
    resolve, ResolvedBotInfo, ResolvedConfig, ResolvedFonts, ResolvedItem, ResolvedLayout,
    ResolvedSection, ResolvedTheme, DEFAULT_GRADIENT,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Root configuration document as stored in `config.yaml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    #[serde(deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub bot_info: Option<BotInfo>,
    #[serde(deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutSettings>,
    #[serde(deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeSettings>,
    #[serde(deserialize_with = "lenient::group", skip_serializing_if = "Option::is_none")]
    pub fonts: Option<FontSettings>,
    #[serde(deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<Section>>,
}

/// Bot identity shown in the header and the corner badge
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotInfo {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub qq: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub corner_badge: Option<String>,
    #[serde(deserialize_with = "lenient::keyword", skip_serializing_if = "Option::is_none")]
    pub corner_badge_position: Option<BadgePosition>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Card grid geometry, all values in pixels except `items_per_row`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub items_per_row: Option<i64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub card_width: Option<i64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub card_height: Option<i64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub padding: Option<i64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub spacing: Option<i64>,
}

/// Canvas background and palette
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::keyword", skip_serializing_if = "Option::is_none")]
    pub background_type: Option<BackgroundType>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(deserialize_with = "lenient::string_list", skip_serializing_if = "Option::is_none")]
    pub background_gradient: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub angle: Option<i64>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub card_background: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub card_border: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title_color: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub subtitle_color: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub card_title_color: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub card_desc_color: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub icon_background: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
}

/// Font files, sizes and style flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub title_font: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub content_font: Option<String>,
    #[serde(deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub title_bold: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub title_italic: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub content_bold: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean", skip_serializing_if = "Option::is_none")]
    pub content_italic: Option<bool>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub title_size: Option<i64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub subtitle_size: Option<i64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub card_title_size: Option<i64>,
    #[serde(deserialize_with = "lenient::integer", skip_serializing_if = "Option::is_none")]
    pub card_desc_size: Option<i64>,
}

/// A named group of command cards. Identity is its position in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Item>>,
}

/// A single command entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
}

impl Item {
    /// Item with every field set
    pub fn new(icon: &str, name: &str, description: &str, usage: &str) -> Self {
        Self {
            icon: Some(icon.to_string()),
            name: Some(name.to_string()),
            description: Some(description.to_string()),
            usage: Some(usage.to_string()),
        }
    }
}

/// How the canvas background is filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundType {
    #[default]
    Gradient,
    Solid,
    Image,
}

impl FromStr for BackgroundType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gradient" => Ok(Self::Gradient),
            "solid" => Ok(Self::Solid),
            "image" => Ok(Self::Image),
            other => Err(format!("unknown background type '{}'", other)),
        }
    }
}

impl fmt::Display for BackgroundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Gradient => "gradient",
            Self::Solid => "solid",
            Self::Image => "image",
        };
        f.write_str(s)
    }
}

/// Canvas corner the badge is anchored to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgePosition {
    #[default]
    TopRight,
    BottomRight,
    BottomLeft,
}

impl FromStr for BadgePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top-right" => Ok(Self::TopRight),
            "bottom-right" => Ok(Self::BottomRight),
            "bottom-left" => Ok(Self::BottomLeft),
            other => Err(format!("unknown corner badge position '{}'", other)),
        }
    }
}

impl fmt::Display for BadgePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::TopRight => "top-right",
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
        };
        f.write_str(s)
    }
}

impl ConfigDocument {
    /// Parse a JSON document
    pub fn from_json(text: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a YAML document
    pub fn from_yaml(text: &str) -> crate::Result<Self> {
        // An empty YAML file deserializes as unit; treat it as an empty document
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    /// Sections, created on first mutable access
    pub fn sections_mut(&mut self) -> &mut Vec<Section> {
        self.sections.get_or_insert_with(Vec::new)
    }

    /// Theme group, created on first mutable access
    pub fn theme_mut(&mut self) -> &mut ThemeSettings {
        self.theme.get_or_insert_with(ThemeSettings::default)
    }

    /// Bot info group, created on first mutable access
    pub fn bot_info_mut(&mut self) -> &mut BotInfo {
        self.bot_info.get_or_insert_with(BotInfo::default)
    }
}

impl From<&ResolvedConfig> for ConfigDocument {
    fn from(r: &ResolvedConfig) -> Self {
        let some = |s: &str| Some(s.to_string());
        Self {
            bot_info: Some(BotInfo {
                name: some(&r.bot_info.name),
                qq: some(&r.bot_info.qq),
                description: some(&r.bot_info.description),
                notice: some(&r.bot_info.notice),
                corner_badge: some(&r.bot_info.corner_badge),
                corner_badge_position: Some(r.bot_info.corner_badge_position),
                avatar: some(&r.bot_info.avatar),
                logo: some(&r.bot_info.logo),
            }),
            layout: Some(LayoutSettings {
                items_per_row: Some(r.layout.items_per_row.into()),
                card_width: Some(r.layout.card_width.into()),
                card_height: Some(r.layout.card_height.into()),
                padding: Some(r.layout.padding.into()),
                spacing: Some(r.layout.spacing.into()),
            }),
            theme: Some(ThemeSettings {
                name: some(&r.theme.name),
                background_type: Some(r.theme.background_type),
                background_color: some(&r.theme.background_color),
                background_gradient: Some(r.theme.background_gradient.clone()),
                angle: Some(r.theme.angle.into()),
                background_image: some(&r.theme.background_image),
                card_background: some(&r.theme.card_background),
                card_border: some(&r.theme.card_border),
                title_color: some(&r.theme.title_color),
                subtitle_color: some(&r.theme.subtitle_color),
                card_title_color: some(&r.theme.card_title_color),
                card_desc_color: some(&r.theme.card_desc_color),
                icon_background: some(&r.theme.icon_background),
                icon_color: some(&r.theme.icon_color),
            }),
            fonts: Some(FontSettings {
                title_font: some(&r.fonts.title_font),
                content_font: some(&r.fonts.content_font),
                title_bold: Some(r.fonts.title_bold),
                title_italic: Some(r.fonts.title_italic),
                content_bold: Some(r.fonts.content_bold),
                content_italic: Some(r.fonts.content_italic),
                title_size: Some(r.fonts.title_size.into()),
                subtitle_size: Some(r.fonts.subtitle_size.into()),
                card_title_size: Some(r.fonts.card_title_size.into()),
                card_desc_size: Some(r.fonts.card_desc_size.into()),
            }),
            sections: Some(
                r.sections
                    .iter()
                    .map(|s| Section {
                        name: some(&s.name),
                        icon: some(&s.icon),
                        items: Some(
                            s.items
                                .iter()
                                .map(|i| Item::new(&i.icon, &i.name, &i.description, &i.usage))
                                .collect(),
                        ),
                    })
                    .collect(),
            ),
        }
    }
}

impl From<ResolvedConfig> for ConfigDocument {
    fn from(r: ResolvedConfig) -> Self {
        Self::from(&r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_json_never_fails() {
        let doc = ConfigDocument::from_json(
            r##"{
                "bot_info": "oops",
                "layout": { "items_per_row": "4", "card_width": 180.9, "padding": null },
                "theme": { "background_type": "plaid", "background_gradient": "#fff" },
                "fonts": { "title_bold": "true", "content_italic": 1, "title_size": [] },
                "sections": [ { "name": 12, "items": [ { "name": "help" }, 7 ] }, "junk" ]
            }"##,
        )
        .expect("valid JSON always loads");

        assert_eq!(doc.bot_info, None);
        let layout = doc.layout.as_ref().unwrap();
        assert_eq!(layout.items_per_row, Some(4));
        assert_eq!(layout.card_width, Some(180));
        assert_eq!(layout.padding, None);
        let theme = doc.theme.as_ref().unwrap();
        assert_eq!(theme.background_type, None);
        assert_eq!(theme.background_gradient, None);
        let fonts = doc.fonts.as_ref().unwrap();
        assert_eq!(fonts.title_bold, Some(true));
        assert_eq!(fonts.content_italic, Some(true));
        assert_eq!(fonts.title_size, None);

        let sections = doc.sections.as_ref().unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].name.as_deref(), Some("12"));
        let items = sections[0].items.as_ref().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], Item::default());
        assert_eq!(sections[1], Section::default());
    }

    #[test]
    fn yaml_with_numeric_qq() {
        let doc = ConfigDocument::from_yaml(
            "bot_info:\n  name: Helper\n  qq: 123456\n  corner_badge_position: bottom-left\n",
        )
        .unwrap();
        let info = doc.bot_info.unwrap();
        assert_eq!(info.qq.as_deref(), Some("123456"));
        assert_eq!(info.corner_badge_position, Some(BadgePosition::BottomLeft));
    }

    #[test]
    fn empty_yaml_is_empty_document() {
        assert_eq!(ConfigDocument::from_yaml("").unwrap(), ConfigDocument::default());
    }

    #[test]
    fn keywords_round_trip_through_text() {
        for kind in [BackgroundType::Gradient, BackgroundType::Solid, BackgroundType::Image] {
            assert_eq!(kind.to_string().parse::<BackgroundType>(), Ok(kind));
        }
        assert_eq!("Bottom-Right".parse::<BadgePosition>(), Ok(BadgePosition::BottomRight));
        assert!("middle".parse::<BadgePosition>().is_err());
    }
}
