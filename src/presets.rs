//! Built-in theme presets.
//!
//! A preset only carries the palette; applying it switches the background to
//! a gradient and leaves the solid color, background image and icon colors of
//! the document alone.

use crate::config::{BackgroundType, ConfigDocument};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Palette of a named preset theme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePreset {
    pub name: String,
    pub background_gradient: Vec<String>,
    pub angle: i32,
    pub card_background: String,
    pub card_border: String,
    pub title_color: String,
    pub subtitle_color: String,
}

/// Keys listed before all the others in pickers
const PRIORITY_KEYS: [&str; 2] = ["default", "dark_mode"];

struct PresetDef {
    key: &'static str,
    name: &'static str,
    gradient: &'static [&'static str],
    angle: i32,
    card_background: &'static str,
    card_border: &'static str,
    title_color: &'static str,
    subtitle_color: &'static str,
}

#[rustfmt::skip]
const PRESETS: &[PresetDef] = &[
    PresetDef { key: "default", name: "Sweet Cherry", gradient: &["#ffe5ec", "#ffd6e0"], angle: 135, card_background: "#ffffff", card_border: "#f0cfd4", title_color: "#c2185b", subtitle_color: "#d81b60" },
    PresetDef { key: "dark_mode", name: "Midnight Deep", gradient: &["#1a1a2e", "#16213e"], angle: 180, card_background: "#1e293b", card_border: "#0f172a", title_color: "#e2e8f0", subtitle_color: "#cbd5e1" },
    PresetDef { key: "purple_dream", name: "Purple Fantasy", gradient: &["#e0c3fc", "#8ec5fc"], angle: 120, card_background: "#ffffff", card_border: "#d4b5f5", title_color: "#512da8", subtitle_color: "#673ab7" },
    PresetDef { key: "green_fresh", name: "Forest Fresh", gradient: &["#c8e6c9", "#81c784"], angle: 90, card_background: "#f1f8e9", card_border: "#a5d6a7", title_color: "#1b5e20", subtitle_color: "#2e7d32" },
    PresetDef { key: "orange_vibrant", name: "Sunset Warmth", gradient: &["#ffe0b2", "#ffb74d"], angle: 45, card_background: "#ffffff", card_border: "#ffd699", title_color: "#e65100", subtitle_color: "#f57c00" },
    PresetDef { key: "sunset", name: "Evening Glow", gradient: &["#ff6b6b", "#ffa94d", "#ffd43b"], angle: 135, card_background: "#ffffff", card_border: "#ffc0d9", title_color: "#c62828", subtitle_color: "#e03131" },
    PresetDef { key: "ocean", name: "Ocean Azure", gradient: &["#0096ff", "#1fc0ff"], angle: 90, card_background: "#f0f8ff", card_border: "#81d4fa", title_color: "#00467f", subtitle_color: "#0277bd" },
    PresetDef { key: "cherry_blossom", name: "Cherry Bloom", gradient: &["#f8bbd0", "#ff80ab"], angle: 120, card_background: "#fff9e6", card_border: "#f8bbd0", title_color: "#880e4f", subtitle_color: "#ad1457" },
    PresetDef { key: "mint_fresh", name: "Mint Cool", gradient: &["#b2dfdb", "#80deea"], angle: 45, card_background: "#e0f2f1", card_border: "#80cbc4", title_color: "#00695c", subtitle_color: "#00796b" },
    PresetDef { key: "lavender_dream", name: "Lavender Dream", gradient: &["#e1bee7", "#ce93d8"], angle: 135, card_background: "#f3e5f5", card_border: "#e0bee7", title_color: "#6a1b9a", subtitle_color: "#7b1fa2" },
    PresetDef { key: "golden_hour", name: "Golden Hour", gradient: &["#fff9c4", "#ffeb3b"], angle: 90, card_background: "#fffde7", card_border: "#ffeb3b", title_color: "#b8860b", subtitle_color: "#cd853f" },
    PresetDef { key: "blush_pink", name: "Blush Pink", gradient: &["#ffccdd", "#ff99cc"], angle: 180, card_background: "#ffffff", card_border: "#ffb3d9", title_color: "#b2102f", subtitle_color: "#d32f2f" },
    PresetDef { key: "teal_elegance", name: "Teal Elegance", gradient: &["#b2dfdb", "#4db6ac"], angle: 120, card_background: "#e0f2f1", card_border: "#80cbc4", title_color: "#00251a", subtitle_color: "#004d40" },
    PresetDef { key: "coral_reef", name: "Coral Reef", gradient: &["#ffab91", "#ff7043"], angle: 45, card_background: "#ffe0d2", card_border: "#ffab91", title_color: "#5d2c0c", subtitle_color: "#8b4513" },
    PresetDef { key: "midnight_blue", name: "Midnight Sapphire", gradient: &["#1a237e", "#283593"], angle: 180, card_background: "#3f51b5", card_border: "#1a237e", title_color: "#e8eaf6", subtitle_color: "#c5cae9" },
    PresetDef { key: "spring_bud", name: "Spring Bud", gradient: &["#dcedc8", "#aed581"], angle: 90, card_background: "#f1f8e9", card_border: "#c5e1a5", title_color: "#33691e", subtitle_color: "#558b2f" },
];

impl PresetDef {
    fn to_preset(&self) -> ThemePreset {
        ThemePreset {
            name: self.name.to_string(),
            background_gradient: self.gradient.iter().map(|c| c.to_string()).collect(),
            angle: self.angle,
            card_background: self.card_background.to_string(),
            card_border: self.card_border.to_string(),
            title_color: self.title_color.to_string(),
            subtitle_color: self.subtitle_color.to_string(),
        }
    }
}

/// All presets as `(key, preset)`, priority keys first, the rest by key
pub fn presets() -> Vec<(String, ThemePreset)> {
    let mut rest: Vec<&PresetDef> = PRESETS
        .iter()
        .filter(|p| !PRIORITY_KEYS.contains(&p.key))
        .collect();
    rest.sort_by_key(|p| p.key);

    PRIORITY_KEYS
        .iter()
        .filter_map(|key| PRESETS.iter().find(|p| p.key == *key))
        .chain(rest)
        .map(|p| (p.key.to_string(), p.to_preset()))
        .collect()
}

/// Look a preset up by key
pub fn find_preset(key: &str) -> Option<ThemePreset> {
    PRESETS.iter().find(|p| p.key == key).map(PresetDef::to_preset)
}

/// Copy a preset's palette into the document's theme
pub fn apply_preset(doc: &mut ConfigDocument, key: &str, preset: &ThemePreset) {
    let theme = doc.theme_mut();
    theme.name = Some(key.to_string());
    theme.background_type = Some(BackgroundType::Gradient);
    theme.background_gradient = Some(preset.background_gradient.clone());
    theme.angle = Some(preset.angle.into());
    theme.card_background = Some(preset.card_background.clone());
    theme.card_border = Some(preset.card_border.clone());
    theme.title_color = Some(preset.title_color.clone());
    theme.subtitle_color = Some(preset.subtitle_color.clone());
    theme.card_title_color = Some(preset.title_color.clone());
    theme.card_desc_color = Some(preset.subtitle_color.clone());
}

/// Apply a built-in preset by key
pub fn apply_builtin(doc: &mut ConfigDocument, key: &str) -> Result<()> {
    let preset = find_preset(key).ok_or_else(|| Error::UnknownTheme(key.to_string()))?;
    apply_preset(doc, key, &preset);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve, ThemeSettings};

    #[test]
    fn catalog_order_puts_priority_first() {
        let all = presets();
        assert_eq!(all.len(), 16);
        assert_eq!(all[0].0, "default");
        assert_eq!(all[0].1.name, "Sweet Cherry");
        assert_eq!(all[1].0, "dark_mode");
        let rest: Vec<&str> = all[2..].iter().map(|(k, _)| k.as_str()).collect();
        let mut sorted = rest.clone();
        sorted.sort();
        assert_eq!(rest, sorted);
    }

    #[test]
    fn sunset_has_three_stops() {
        assert_eq!(find_preset("sunset").unwrap().background_gradient.len(), 3);
        assert!(find_preset("nope").is_none());
    }

    #[test]
    fn applying_keeps_unrelated_theme_fields() {
        let mut doc = ConfigDocument {
            theme: Some(ThemeSettings {
                background_type: Some(BackgroundType::Image),
                background_image: Some("uploads/bg.png".into()),
                background_color: Some("#101010".into()),
                icon_color: Some("#123456".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        apply_builtin(&mut doc, "ocean").unwrap();
        let theme = resolve(&doc).theme;
        assert_eq!(theme.name, "ocean");
        assert_eq!(theme.background_type, BackgroundType::Gradient);
        assert_eq!(theme.angle, 90);
        assert_eq!(theme.card_title_color, "#00467f");
        assert_eq!(theme.card_desc_color, "#0277bd");
        assert_eq!(theme.background_image, "uploads/bg.png");
        assert_eq!(theme.background_color, "#101010");
        assert_eq!(theme.icon_color, "#123456");
    }

    #[test]
    fn unknown_key_is_an_error() {
        let mut doc = ConfigDocument::default();
        assert!(matches!(
            apply_builtin(&mut doc, "neon"),
            Err(Error::UnknownTheme(k)) if k == "neon"
        ));
        assert_eq!(doc, ConfigDocument::default());
    }
}
