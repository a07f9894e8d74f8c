//! Help Menu Engine
//!
//! A pure, deterministic rendering engine for chat-bot help menus: a YAML or
//! JSON config document goes in, a presentation-neutral render tree comes out.
//!
//! # Features
//!
//! - **Lenient config**: missing or malformed fields fall back to defaults,
//!   rendering never fails
//! - **Render tree**: canvas geometry, header, corner badge and card grids
//!   with resolved colors, fonts and sizes
//! - **Editing session**: index-based edits on an owned document
//! - **Live preview** (`preview` feature, default): debounced re-render with
//!   post-render hooks, driven by a config file watcher
//!
//! # Example
//!
//! ```
//! use helpmenu::{ConfigDocument, RenderEnv};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let doc = ConfigDocument::from_yaml(
//!     "bot_info:\n  name: Helper\nsections:\n  - name: Fun\n    items:\n      - name: roll\n",
//! )?;
//! let tree = helpmenu::render(&doc, &RenderEnv::default());
//! assert_eq!(tree.canvas_width, 670);
//! assert_eq!(tree.header.title.text, "Helper");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod color;
pub mod config;
pub mod error;
pub mod markup;
pub mod presets;
pub mod rendering;
pub mod session;

// Debounced live preview on the tokio runtime
#[cfg(feature = "preview")]
pub mod preview;
#[cfg(feature = "preview")]
pub mod watch;

pub use color::parse_color;
pub use config::{resolve, ConfigDocument, ResolvedConfig};
pub use error::{Error, Result};
pub use markup::expand_markup;
pub use presets::{find_preset, presets, ThemePreset};
pub use rendering::html::paint_html;
pub use rendering::RenderTree;
pub use session::EditingSession;

/// URL prefix under which font files are served to the presentation layer
pub const FONT_URL_PREFIX: &str = "/fonts/";

/// Environment the render tree is built against
///
/// The engine never touches the filesystem; whatever it needs to know about
/// the outside world comes through here. The defaults describe an empty font
/// catalog served under `/fonts/`.
///
/// # Examples
///
/// ```
/// let env = helpmenu::RenderEnv::with_fonts(vec!["Title.ttf".into()]);
/// assert!(env.has_font("Title.ttf"));
/// assert_eq!(env.font_url("Title.ttf"), "/fonts/Title.ttf");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderEnv {
    /// Font catalog as listed by the font source, `default` first
    pub available_fonts: Vec<String>,
    /// Prefix joined with a font file name to build its URL
    pub font_url_prefix: String,
}

impl Default for RenderEnv {
    fn default() -> Self {
        Self {
            available_fonts: vec![rendering::theme::DEFAULT_FONT.to_string()],
            font_url_prefix: FONT_URL_PREFIX.to_string(),
        }
    }
}

impl RenderEnv {
    /// Environment with the given font catalog and the default URL prefix
    pub fn with_fonts(available_fonts: Vec<String>) -> Self {
        Self {
            available_fonts,
            ..Default::default()
        }
    }

    /// Whether `file` is in the font catalog
    pub fn has_font(&self, file: &str) -> bool {
        self.available_fonts.iter().any(|f| f == file)
    }

    /// URL the presentation layer loads `file` from
    pub fn font_url(&self, file: &str) -> String {
        format!("{}{}", self.font_url_prefix, file)
    }
}

/// Resolve a document and build its render tree in one step
pub fn render(doc: &ConfigDocument, env: &RenderEnv) -> RenderTree {
    rendering::build_render_tree(&resolve(doc), env)
}
