//! Render tree: the presentation-agnostic description of a help menu.
//!
//! A [`RenderTree`] carries everything a surface needs to paint the menu
//! (canvas width, background, header, corner badge, section grids and cards)
//! with every style value already inherited, overridden and clamped. It is
//! rebuilt from scratch on every edit and never mutated afterwards.

pub mod html;
pub mod layout;
pub mod theme;
pub mod tree;

use crate::config::BadgePosition;
use serde::Serialize;

pub use layout::{compute_geometry, Geometry};
pub use theme::{derive_font_name, resolve_background, FontChain, FontFace};
pub use tree::build_render_tree;

/// Root of the computed layout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderTree {
    pub canvas_width: u64,
    pub padding: u32,
    pub background: Background,
    pub base_text: BaseText,
    pub font_faces: Vec<FontFace>,
    pub header: Header,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_badge: Option<CornerBadge>,
    pub sections: Vec<SectionNode>,
}

/// Canvas fill
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Background {
    LinearGradient { angle: i32, stops: Vec<String> },
    Solid { color: String },
    Image { url: String },
    None,
}

impl Background {
    /// CSS `background` shorthand value, `None` when nothing is painted
    pub fn to_css(&self) -> Option<String> {
        match self {
            Background::LinearGradient { angle, stops } => {
                Some(format!("linear-gradient({}deg, {})", angle, stops.join(", ")))
            }
            Background::Solid { color } => Some(color.clone()),
            Background::Image { url } => Some(format!("url('{}') center/cover", url)),
            Background::None => None,
        }
    }
}

/// Text defaults inherited by the whole canvas
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseText {
    pub font_family: FontChain,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn from_bold(bold: bool) -> Self {
        if bold {
            FontWeight::Bold
        } else {
            FontWeight::Normal
        }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn from_italic(italic: bool) -> Self {
        if italic {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        }
    }

    pub fn as_css(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

/// Fully resolved style of one text run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Pixels; may be fractional (usage lines)
    pub font_size: f64,
    pub color: String,
    pub font_family: FontChain,
    pub font_weight: FontWeight,
    pub font_style: FontStyle,
}

/// Expanded text plus its style
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextNode {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub title: TextNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qq: Option<TextNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<TextNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<TextNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerBadge {
    pub text: TextNode,
    pub position: BadgePosition,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionNode {
    pub title: TextNode,
    pub grid: GridSpec,
    pub cards: Vec<CardNode>,
}

/// Grid the section's cards flow into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSpec {
    pub columns: u32,
    pub card_width_px: u32,
    pub gap_px: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardNode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<IconGlyph>,
    pub title: TextNode,
    pub description: TextNode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TextNode>,
    /// Cards grow with their content; this is only the floor
    pub min_height_px: u32,
    pub background: String,
    pub border: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconGlyph {
    pub glyph: String,
    pub font_size: f64,
}

impl RenderTree {
    /// Pretty JSON for presentation layers that consume the tree directly
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_css() {
        let g = Background::LinearGradient {
            angle: 135,
            stops: vec!["#ffeef8".into(), "#e6f3ff".into()],
        };
        assert_eq!(g.to_css().as_deref(), Some("linear-gradient(135deg, #ffeef8, #e6f3ff)"));
        let i = Background::Image { url: "uploads/bg.png".into() };
        assert_eq!(i.to_css().as_deref(), Some("url('uploads/bg.png') center/cover"));
        assert_eq!(Background::None.to_css(), None);
    }

    #[test]
    fn weight_and_style_keywords() {
        assert_eq!(FontWeight::from_bold(true).as_css(), "bold");
        assert_eq!(FontWeight::from_bold(false).as_css(), "normal");
        assert_eq!(FontStyle::from_italic(true).as_css(), "italic");
        assert_eq!(FontStyle::from_italic(false).as_css(), "normal");
    }
}
