//! Background and font resolution from the theme and font settings.

use super::{Background, FontStyle, FontWeight};
use crate::config::{BackgroundType, ResolvedFonts, ResolvedTheme, DEFAULT_GRADIENT};
use crate::RenderEnv;
use serde::Serialize;

/// Font slot value that selects the built-in chain
pub const DEFAULT_FONT: &str = "default";

const FALLBACK_FAMILIES: [&str; 2] = ["Microsoft YaHei", "sans-serif"];
const GENERIC_FAMILIES: [&str; 5] = ["serif", "sans-serif", "monospace", "cursive", "fantasy"];

/// Ordered font-family fallback chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FontChain(pub Vec<String>);

impl FontChain {
    /// Chain for a font slot value (`default`, empty, or a font file name)
    pub fn for_font_file(file: &str) -> Self {
        let mut families = Vec::with_capacity(3);
        if !is_default_font(file) {
            families.push(derive_font_name(file));
        }
        families.extend(FALLBACK_FAMILIES.iter().map(|f| f.to_string()));
        FontChain(families)
    }

    pub fn families(&self) -> &[String] {
        &self.0
    }

    /// CSS `font-family` value; named families are quoted, generic ones are not
    pub fn to_css(&self) -> String {
        self.0
            .iter()
            .map(|f| {
                if GENERIC_FAMILIES.contains(&f.as_str()) {
                    f.clone()
                } else {
                    format!("'{}'", f.replace('\\', "\\\\").replace('\'', "\\'"))
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A custom font the presentation layer must load before painting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFace {
    /// Family name derived from the file name
    pub family: String,
    pub file: String,
    /// Where the bytes are served from, e.g. `/fonts/Title.ttf`
    pub src: String,
}

/// Strip a trailing `.ttf` / `.otf` (any case) to get the font-face name
pub fn derive_font_name(file: &str) -> String {
    let lower = file.to_ascii_lowercase();
    if lower.ends_with(".ttf") || lower.ends_with(".otf") {
        file[..file.len() - 4].to_string()
    } else {
        file.to_string()
    }
}

fn is_default_font(file: &str) -> bool {
    file.is_empty() || file == DEFAULT_FONT
}

/// Pick the canvas fill for the theme's background type
pub fn resolve_background(theme: &ResolvedTheme) -> Background {
    match theme.background_type {
        BackgroundType::Gradient => {
            let stops = if theme.background_gradient.len() >= 2 {
                theme.background_gradient.clone()
            } else {
                DEFAULT_GRADIENT.iter().map(|c| c.to_string()).collect()
            };
            Background::LinearGradient {
                angle: theme.angle,
                stops,
            }
        }
        BackgroundType::Solid => Background::Solid {
            color: theme.background_color.clone(),
        },
        BackgroundType::Image if !theme.background_image.is_empty() => Background::Image {
            url: theme.background_image.clone(),
        },
        BackgroundType::Image => Background::None,
    }
}

/// Family, weight and style for the title and content slots
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub title_family: FontChain,
    pub title_weight: FontWeight,
    pub title_style: FontStyle,
    pub content_family: FontChain,
    pub content_weight: FontWeight,
    pub content_style: FontStyle,
}

impl Typography {
    pub fn from_fonts(fonts: &ResolvedFonts) -> Self {
        Self {
            title_family: FontChain::for_font_file(&fonts.title_font),
            title_weight: FontWeight::from_bold(fonts.title_bold),
            title_style: FontStyle::from_italic(fonts.title_italic),
            content_family: FontChain::for_font_file(&fonts.content_font),
            content_weight: FontWeight::from_bold(fonts.content_bold),
            content_style: FontStyle::from_italic(fonts.content_italic),
        }
    }
}

/// Distinct custom font files used by the title and content slots, title first
pub fn font_faces(fonts: &ResolvedFonts, env: &RenderEnv) -> Vec<FontFace> {
    let mut faces: Vec<FontFace> = Vec::new();
    for file in [&fonts.title_font, &fonts.content_font] {
        if is_default_font(file) || faces.iter().any(|f| &f.file == file) {
            continue;
        }
        if !env.has_font(file) {
            log::warn!("font '{}' is not in the font catalog; declaring it anyway", file);
        }
        faces.push(FontFace {
            family: derive_font_name(file),
            file: file.clone(),
            src: env.font_url(file),
        });
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, ConfigDocument};

    fn theme() -> ResolvedTheme {
        resolve(&ConfigDocument::default()).theme
    }

    #[test]
    fn derives_names_case_insensitively() {
        assert_eq!(derive_font_name("Title.TTF"), "Title");
        assert_eq!(derive_font_name("body.otf"), "body");
        assert_eq!(derive_font_name("plain.woff"), "plain.woff");
        assert_eq!(derive_font_name("思源黑体.ttf"), "思源黑体");
    }

    #[test]
    fn chains() {
        assert_eq!(
            FontChain::for_font_file("default").to_css(),
            "'Microsoft YaHei', sans-serif"
        );
        assert_eq!(
            FontChain::for_font_file("").families(),
            &["Microsoft YaHei".to_string(), "sans-serif".to_string()]
        );
        assert_eq!(
            FontChain::for_font_file("Brand.ttf").to_css(),
            "'Brand', 'Microsoft YaHei', sans-serif"
        );
    }

    #[test]
    fn gradient_with_short_stop_list_uses_defaults() {
        let mut t = theme();
        t.background_gradient = vec!["#000000".into()];
        t.angle = 90;
        assert_eq!(
            resolve_background(&t),
            Background::LinearGradient {
                angle: 90,
                stops: vec!["#ffeef8".into(), "#e6f3ff".into()],
            }
        );
    }

    #[test]
    fn gradient_keeps_extra_stops() {
        let mut t = theme();
        t.background_gradient = vec!["#a".into(), "#b".into(), "#c".into()];
        match resolve_background(&t) {
            Background::LinearGradient { stops, .. } => assert_eq!(stops.len(), 3),
            other => panic!("unexpected background {:?}", other),
        }
    }

    #[test]
    fn solid_and_image() {
        let mut t = theme();
        t.background_type = BackgroundType::Solid;
        assert_eq!(resolve_background(&t), Background::Solid { color: "#f5f5f5".into() });

        t.background_type = BackgroundType::Image;
        assert_eq!(resolve_background(&t), Background::None);

        t.background_image = "uploads/bg.jpg".into();
        assert_eq!(resolve_background(&t), Background::Image { url: "uploads/bg.jpg".into() });
    }

    #[test]
    fn font_faces_are_deduplicated() {
        let mut fonts = resolve(&ConfigDocument::default()).fonts;
        assert!(font_faces(&fonts, &RenderEnv::default()).is_empty());

        fonts.title_font = "Brand.ttf".into();
        fonts.content_font = "Brand.ttf".into();
        let faces = font_faces(&fonts, &RenderEnv::default());
        assert_eq!(
            faces,
            vec![FontFace {
                family: "Brand".into(),
                file: "Brand.ttf".into(),
                src: "/fonts/Brand.ttf".into(),
            }]
        );

        fonts.content_font = "Body.otf".into();
        let faces = font_faces(&fonts, &RenderEnv::default());
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[1].family, "Body");
    }
}
