//! helpmenu command line: render a help-menu config and edit it in place.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use helpmenu::backend::{AssetKind, AssetStore, ConfigStore, FontSource, LocalBackend, ThemeSource};
use helpmenu::session::ColorSlot;
use helpmenu::{paint_html, EditingSession, RenderEnv};

#[derive(Parser, Debug)]
#[command(name = "helpmenu")]
#[command(about = "Render and edit chat-bot help menus")]
struct Args {
    /// Directory holding config.yaml, fonts/ and uploads/
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Config file to use instead of <root>/config.yaml (.json for JSON)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// URL prefix font files are served under
    #[arg(long, value_name = "PREFIX", default_value = helpmenu::FONT_URL_PREFIX)]
    font_url_prefix: String,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the menu as a JSON render tree or HTML
    Render {
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
        /// Wrap HTML output in a standalone page
        #[arg(long)]
        page: bool,
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// List the font catalog
    Fonts,
    /// List the preset themes
    Themes,
    /// Apply a preset theme by key
    ApplyTheme { key: String },
    /// Set a theme color from hex, rgb() or r,g,b text
    SetColor { slot: ColorSlot, color: String },
    /// Append a new section
    AddSection,
    /// Remove a section
    RemoveSection { section: usize },
    /// Append a new item to a section, or insert it below an existing item
    AddItem {
        section: usize,
        #[arg(long, value_name = "ITEM")]
        below: Option<usize>,
    },
    /// Remove an item from a section
    RemoveItem { section: usize, item: usize },
    /// Move an item one slot up or down within its section
    MoveItem {
        section: usize,
        item: usize,
        #[arg(value_enum)]
        direction: Direction,
    },
    /// Store a file as avatar, logo, background or font and reference it
    Upload { kind: AssetKind, file: PathBuf },
    /// Clear the avatar or logo
    Clear {
        #[arg(value_enum)]
        target: ClearTarget,
    },
    /// Re-render HTML whenever the config file changes
    #[cfg(feature = "preview")]
    Watch {
        #[arg(short, long, value_name = "PATH")]
        out: PathBuf,
        /// Quiet period before re-rendering, in milliseconds
        #[arg(long, default_value_t = 800)]
        debounce_ms: u64,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Html,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Direction {
    Up,
    Down,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ClearTarget {
    Avatar,
    Logo,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.verbose);

    let mut backend = LocalBackend::new(&args.root);
    if let Some(path) = &args.config {
        backend = backend.with_config_path(path);
    }

    run(args, backend)
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("helpmenu=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    // The log bridge forwards the library's `log` records to this subscriber
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn render_env(backend: &LocalBackend, prefix: &str) -> Result<RenderEnv> {
    let fonts = backend.list_fonts().context("listing fonts")?;
    Ok(RenderEnv {
        available_fonts: fonts,
        font_url_prefix: prefix.to_string(),
    })
}

fn html_page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Help menu</title></head>\n<body>\n{}\n</body>\n</html>\n",
        body
    )
}

fn run(args: Args, backend: LocalBackend) -> Result<()> {
    let load = || {
        backend
            .load()
            .with_context(|| format!("loading {}", backend.config_path().display()))
    };

    let mut session = match &args.command {
        Command::Render { format, page, out } => {
            let env = render_env(&backend, &args.font_url_prefix)?;
            let tree = helpmenu::render(&load()?, &env);
            let text = match format {
                Format::Json => tree.to_json()?,
                Format::Html if *page => html_page(&paint_html(&tree)),
                Format::Html => paint_html(&tree),
            };
            match out {
                Some(path) => fs::write(path, text)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", text),
            }
            return Ok(());
        }
        Command::Fonts => {
            for font in backend.list_fonts()? {
                println!("{}", font);
            }
            return Ok(());
        }
        Command::Themes => {
            for (key, preset) in backend.presets() {
                println!(
                    "{:<16} {:<18} {}",
                    key,
                    preset.name,
                    preset.background_gradient.join(" -> ")
                );
            }
            return Ok(());
        }
        #[cfg(feature = "preview")]
        Command::Watch { out, debounce_ms } => {
            let env = render_env(&backend, &args.font_url_prefix)?;
            return watch(&backend, env, out.clone(), *debounce_ms);
        }
        _ => EditingSession::new(load()?),
    };

    match args.command {
        Command::ApplyTheme { key } => session.apply_preset(&key)?,
        Command::SetColor { slot, color } => {
            if !session.set_theme_color(slot, &color) {
                bail!("'{}' is not a color (expected #RRGGBB, rgb(r, g, b) or r,g,b)", color);
            }
        }
        Command::AddSection => {
            let index = session.add_section();
            println!("added section {}", index);
        }
        Command::RemoveSection { section } => {
            session.remove_section(section)?;
        }
        Command::AddItem { section, below } => {
            let index = match below {
                Some(item) => session.add_item_below(section, item)?,
                None => session.add_item(section)?,
            };
            println!("added item {} in section {}", index, section);
        }
        Command::RemoveItem { section, item } => {
            session.remove_item(section, item)?;
        }
        Command::MoveItem {
            section,
            item,
            direction,
        } => {
            let moved = match direction {
                Direction::Up => session.move_item_up(section, item)?,
                Direction::Down => session.move_item_down(section, item)?,
            };
            if !moved {
                let edge = match direction {
                    Direction::Up => "top",
                    Direction::Down => "bottom",
                };
                println!("item {} is already at the {}", item, edge);
            }
        }
        Command::Upload { kind, file } => {
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .with_context(|| format!("no usable file name in {}", file.display()))?
                .to_string();
            let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
            let asset = backend.store(kind, &filename, &bytes)?;
            session.attach_asset(&asset);
            println!("{}", asset.path);
        }
        Command::Clear { target } => match target {
            ClearTarget::Avatar => session.clear_avatar(),
            ClearTarget::Logo => session.clear_logo(),
        },
        _ => {}
    }

    if session.is_dirty() {
        backend
            .save(session.document())
            .with_context(|| format!("saving {}", backend.config_path().display()))?;
        session.mark_saved();
    }
    Ok(())
}

#[cfg(feature = "preview")]
fn watch(backend: &LocalBackend, env: RenderEnv, out: PathBuf, debounce_ms: u64) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(watch_loop(backend, env, out, debounce_ms))
}

#[cfg(feature = "preview")]
async fn watch_loop(
    backend: &LocalBackend,
    env: RenderEnv,
    out: PathBuf,
    debounce_ms: u64,
) -> Result<()> {
    use helpmenu::preview::LivePreview;
    use helpmenu::watch::ConfigWatcher;
    use std::time::Duration;

    let mut watcher = ConfigWatcher::new(backend.config_path())
        .with_context(|| format!("watching {}", backend.config_path().display()))?;

    let preview = LivePreview::with_quiescence(Duration::from_millis(debounce_ms));
    preview.on_render(move |tree| match fs::write(&out, html_page(&paint_html(tree))) {
        Ok(()) => log::info!("preview written to {}", out.display()),
        Err(e) => log::error!("writing {}: {}", out.display(), e),
    });

    preview.render_now(&backend.load()?, &env);
    preview.follow(&mut watcher, backend, &env).await;
    bail!("config watcher stopped")
}
