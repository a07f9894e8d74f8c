//! Composes the resolved config into a [`RenderTree`].

use super::layout::{compute_geometry, Geometry};
use super::theme::{font_faces, resolve_background, Typography};
use super::{
    BaseText, CardNode, CornerBadge, FontStyle, FontWeight, GridSpec, Header, IconGlyph,
    RenderTree, SectionNode, TextNode, TextStyle,
};
use crate::config::{ResolvedConfig, ResolvedItem, ResolvedSection};
use crate::markup::expand_markup;
use crate::RenderEnv;

/// Fixed label in front of every usage line
pub const USAGE_LABEL: &str = "用法: ";

/// Title shown when the bot has no name
const FALLBACK_TITLE: &str = "Bot";

const BADGE_MAX_SIZE: u32 = 9;
const ICON_MAX_SIZE: u32 = 20;
const CARD_TITLE_MAX_SIZE: u32 = 16;
const CARD_DESC_MAX_SIZE: u32 = 12;
const USAGE_MAX_SIZE: f64 = 10.0;
const USAGE_SCALE: f64 = 0.85;

/// Build the render tree for an already resolved config.
///
/// Pure and deterministic: the same config and environment always give the
/// same tree. Empty sections keep their slot so section indices stay stable.
pub fn build_render_tree(config: &ResolvedConfig, env: &RenderEnv) -> RenderTree {
    let geometry = compute_geometry(&config.layout);
    let typography = Typography::from_fonts(&config.fonts);
    let builder = TreeBuilder {
        config,
        geometry,
        typography,
    };

    let tree = RenderTree {
        canvas_width: geometry.canvas_width,
        padding: geometry.padding,
        background: resolve_background(&config.theme),
        base_text: BaseText {
            font_family: builder.typography.content_family.clone(),
            color: config.theme.title_color.clone(),
        },
        font_faces: font_faces(&config.fonts, env),
        header: builder.header(),
        corner_badge: builder.corner_badge(),
        sections: config.sections.iter().map(|s| builder.section(s)).collect(),
    };

    log::debug!(
        "built render tree: width={} sections={} cards={}",
        tree.canvas_width,
        tree.sections.len(),
        tree.sections.iter().map(|s| s.cards.len()).sum::<usize>()
    );
    tree
}

struct TreeBuilder<'a> {
    config: &'a ResolvedConfig,
    geometry: Geometry,
    typography: Typography,
}

impl TreeBuilder<'_> {
    /// Style for content-slot text with the configured weight and style
    fn content_style(&self, font_size: f64, color: &str) -> TextStyle {
        TextStyle {
            font_size,
            color: color.to_string(),
            font_family: self.typography.content_family.clone(),
            font_weight: self.typography.content_weight,
            font_style: self.typography.content_style,
        }
    }

    fn text(&self, text: &str, style: TextStyle) -> TextNode {
        TextNode {
            text: expand_markup(text),
            style,
        }
    }

    /// Text node only when `text` is non-empty
    fn optional_text(&self, text: &str, style: TextStyle) -> Option<TextNode> {
        (!text.is_empty()).then(|| self.text(text, style))
    }

    fn header(&self) -> Header {
        let info = &self.config.bot_info;
        let fonts = &self.config.fonts;
        let subtitle_color = &self.config.theme.subtitle_color;

        let name = if info.name.is_empty() {
            FALLBACK_TITLE
        } else {
            info.name.as_str()
        };
        let title_style = TextStyle {
            font_size: fonts.title_size.into(),
            color: self.config.theme.title_color.clone(),
            font_family: self.typography.title_family.clone(),
            font_weight: self.typography.title_weight,
            font_style: self.typography.title_style,
        };
        let desc_size = f64::from(fonts.card_desc_size);

        Header {
            avatar_url: non_empty(&info.avatar),
            logo_url: non_empty(&info.logo),
            title: self.text(name, title_style),
            qq: (!info.qq.is_empty()).then(|| {
                self.text(
                    &format!("QQ: {}", info.qq),
                    self.content_style(fonts.subtitle_size.into(), subtitle_color),
                )
            }),
            description: self.optional_text(
                &info.description,
                self.content_style(desc_size, subtitle_color),
            ),
            notice: self.optional_text(&info.notice, self.content_style(desc_size, subtitle_color)),
        }
    }

    fn corner_badge(&self) -> Option<CornerBadge> {
        let info = &self.config.bot_info;
        if info.corner_badge.is_empty() {
            return None;
        }
        // Badge text never grows past 9px, whatever the description size is
        let size = self.config.fonts.card_desc_size.min(BADGE_MAX_SIZE);
        let mut style = self.content_style(size.into(), &self.config.theme.subtitle_color);
        style.font_style = FontStyle::Normal;

        Some(CornerBadge {
            text: self.text(&info.corner_badge, style),
            position: info.corner_badge_position,
        })
    }

    fn section(&self, section: &ResolvedSection) -> SectionNode {
        let title = if section.icon.is_empty() {
            section.name.clone()
        } else {
            format!("{} {}", section.icon, section.name)
        };
        let style = self.content_style(
            self.config.fonts.subtitle_size.into(),
            &self.config.theme.title_color,
        );

        SectionNode {
            title: self.text(&title, style),
            grid: GridSpec {
                columns: self.geometry.grid_columns,
                card_width_px: self.geometry.card_width_px,
                gap_px: self.geometry.gap_px,
            },
            cards: section.items.iter().map(|item| self.card(item)).collect(),
        }
    }

    fn card(&self, item: &ResolvedItem) -> CardNode {
        let fonts = &self.config.fonts;
        let theme = &self.config.theme;

        let icon = (!item.icon.is_empty()).then(|| IconGlyph {
            glyph: item.icon.clone(),
            font_size: fonts.card_title_size.min(ICON_MAX_SIZE).into(),
        });
        let title = self.text(
            &item.name,
            self.content_style(
                fonts.card_title_size.min(CARD_TITLE_MAX_SIZE).into(),
                &theme.card_title_color,
            ),
        );
        let description = self.text(
            &item.description,
            self.content_style(
                fonts.card_desc_size.min(CARD_DESC_MAX_SIZE).into(),
                &theme.card_desc_color,
            ),
        );
        let usage = (!item.usage.is_empty()).then(|| {
            let size = (f64::from(fonts.card_desc_size) * USAGE_SCALE).min(USAGE_MAX_SIZE);
            let style = TextStyle {
                font_size: size,
                color: theme.card_desc_color.clone(),
                font_family: self.typography.content_family.clone(),
                font_weight: FontWeight::Normal,
                font_style: FontStyle::Italic,
            };
            TextNode {
                text: format!("{}{}", USAGE_LABEL, expand_markup(&item.usage)),
                style,
            }
        });

        CardNode {
            icon,
            title,
            description,
            usage,
            min_height_px: self.geometry.card_min_height_px,
            background: theme.card_background.clone(),
            border: theme.card_border.clone(),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, ConfigDocument, FontSettings, Item, Section};

    fn doc_with_items(items: Vec<Item>) -> ConfigDocument {
        ConfigDocument {
            sections: Some(vec![Section {
                name: Some("Tools".into()),
                icon: Some("🔧".into()),
                items: Some(items),
            }]),
            ..Default::default()
        }
    }

    fn build(doc: &ConfigDocument) -> RenderTree {
        build_render_tree(&resolve(doc), &RenderEnv::default())
    }

    #[test]
    fn card_clamps() {
        let mut doc = doc_with_items(vec![Item::new("🎲", "roll", "dice", "roll 2d6")]);
        doc.fonts = Some(FontSettings {
            card_title_size: Some(30),
            card_desc_size: Some(40),
            ..Default::default()
        });
        let tree = build(&doc);
        let card = &tree.sections[0].cards[0];
        assert_eq!(card.icon.as_ref().unwrap().font_size, 20.0);
        assert_eq!(card.title.style.font_size, 16.0);
        assert_eq!(card.description.style.font_size, 12.0);
        assert_eq!(card.usage.as_ref().unwrap().style.font_size, 10.0);
    }

    #[test]
    fn small_sizes_pass_through_clamps() {
        let mut doc = doc_with_items(vec![Item::new("", "a", "b", "c")]);
        doc.fonts = Some(FontSettings {
            card_title_size: Some(14),
            card_desc_size: Some(10),
            ..Default::default()
        });
        let tree = build(&doc);
        let card = &tree.sections[0].cards[0];
        assert!(card.icon.is_none());
        assert_eq!(card.title.style.font_size, 14.0);
        assert_eq!(card.description.style.font_size, 10.0);
        assert!((card.usage.as_ref().unwrap().style.font_size - 8.5).abs() < 1e-9);
    }

    #[test]
    fn usage_is_labelled_and_italic() {
        let tree = build(&doc_with_items(vec![Item::new("", "help", "", "help **cmd**")]));
        let usage = tree.sections[0].cards[0].usage.as_ref().unwrap();
        assert_eq!(usage.text, "用法: help <b>cmd</b>");
        assert_eq!(usage.style.font_style, FontStyle::Italic);
        assert_eq!(usage.style.font_weight, FontWeight::Normal);
    }

    #[test]
    fn empty_usage_is_omitted() {
        let tree = build(&doc_with_items(vec![Item::new("", "help", "desc", "")]));
        assert!(tree.sections[0].cards[0].usage.is_none());
    }

    #[test]
    fn section_title_includes_icon() {
        let tree = build(&doc_with_items(vec![]));
        assert_eq!(tree.sections[0].title.text, "🔧 Tools");
        assert!(tree.sections[0].cards.is_empty());
        assert_eq!(tree.sections[0].grid.columns, 3);
    }

    #[test]
    fn header_defaults() {
        let tree = build(&ConfigDocument::default());
        assert_eq!(tree.header.title.text, "Bot");
        assert_eq!(tree.header.title.style.font_size, 32.0);
        assert!(tree.header.avatar_url.is_none());
        assert!(tree.header.logo_url.is_none());
        assert!(tree.header.qq.is_none());
        assert!(tree.corner_badge.is_none());
        assert_eq!(tree.canvas_width, 670);
    }
}
