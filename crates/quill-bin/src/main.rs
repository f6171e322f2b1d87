//! Quill entrypoint.
//!
//! Loads a document, highlights it with the configured language profile and
//! prints it as ANSI-colored text followed by a short layout report (blocks,
//! pixel size, caret and selection rectangles).
use anyhow::{Context, Result, bail};
use clap::Parser;
use core_actions::io_ops;
use core_config::{Config, load_from};
use core_state::{EditorState, LayoutMetrics};
use core_syntax::{Highlighter, LanguageProfile, ProfileKind, Rgba, SpanCursor};
use core_text::{Buffer, GlyphSource, MonospaceGlyphs};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "quill.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about = "Quill code buffer inspector")]
struct Args {
    /// File to load. If omitted an empty buffer is used.
    pub path: Option<PathBuf>,
    /// Configuration file path (overrides discovery of `quill.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
    /// Language profile: cpp, python or javascript (overrides the config).
    #[arg(long = "profile")]
    pub profile: Option<ProfileKind>,
    /// Selection to map to rectangles, as `FROM:TO` char offsets.
    #[arg(long = "select", value_parser = parse_selection)]
    pub select: Option<(usize, usize)>,
    /// Print plain text without colors.
    #[arg(long = "no-color")]
    pub no_color: bool,
}

fn parse_selection(s: &str) -> Result<(usize, usize), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got `{s}`"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid offset `{v}`: {e}"))
    };
    Ok((parse(from)?, parse(to)?))
}

struct AppStartup {
    log_guard: Option<WorkerGuard>,
}

impl AppStartup {
    fn new() -> Self {
        Self { log_guard: None }
    }

    fn configure_logging(&mut self) -> Result<()> {
        let log_dir = Path::new(".");
        let log_path = log_dir.join(LOG_FILE);
        if log_path.exists() {
            let _ = std::fs::remove_file(&log_path);
        }

        let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
        let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
        match tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(nb_writer)
            .try_init()
        {
            Ok(_) => {
                self.log_guard = Some(guard);
            }
            Err(_err) => {
                // Global subscriber already installed; dropping the guard stops the writer.
            }
        }
        Ok(())
    }

    fn install_panic_hook() {
        static HOOK: Once = Once::new();
        HOOK.call_once(|| {
            let default_panic = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                tracing::error!(target: "runtime.panic", ?info, "panic");
                default_panic(info);
            }));
        });
    }
}

fn build_state(args: &Args, config: &Config) -> Result<EditorState> {
    let layout_cfg = config.layout();
    let glyphs: Arc<dyn GlyphSource> = Arc::new(MonospaceGlyphs::new(
        layout_cfg.cell_advance,
        layout_cfg.line_height,
    ));
    let profile = args.profile.unwrap_or_else(|| config.profile());
    let layout = LayoutMetrics::new(
        layout_cfg.line_height as f32,
        layout_cfg.top_margin as f32,
        layout_cfg.origin_x,
    );
    let mut state = EditorState::new(
        Buffer::new("untitled", glyphs),
        Highlighter::new(LanguageProfile::for_kind(profile)),
        layout,
    );
    if let Some(path) = &args.path {
        io_ops::load_into(&mut state, path)
            .with_context(|| format!("opening {}", path.display()))?;
    }
    if let Some((from, to)) = args.select {
        state.select(from, to);
        if !state.refresh_selection() {
            warn!(target: "runtime", from, to, "selection_unresolved");
        }
    }
    info!(
        target: "runtime",
        profile = %profile,
        chars = state.len(),
        blocks = state.block_count(),
        "state_ready"
    );
    Ok(state)
}

fn to_color(c: Rgba) -> Color {
    let (r, g, b) = c.to_rgb8();
    Color::Rgb { r, g, b }
}

/// Write the document, coloring each char by the span covering it.
fn render_text<W: Write>(out: &mut W, state: &EditorState, color: bool) -> io::Result<()> {
    let text = state.buffer().chars();
    if !color {
        let plain: String = text.iter().collect();
        queue!(out, Print(plain))?;
        return Ok(());
    }
    let mut cursor = SpanCursor::new(state.highlight_spans());
    let mut current: Option<Rgba> = None;
    for (i, ch) in text.iter().enumerate() {
        let want = cursor.advance(i).map(|s| s.color);
        if want != current {
            match want {
                Some(c) => queue!(out, SetForegroundColor(to_color(c)))?,
                None => queue!(out, ResetColor)?,
            }
            current = want;
        }
        queue!(out, Print(ch))?;
    }
    if current.is_some() {
        queue!(out, ResetColor)?;
    }
    Ok(())
}

fn render_report<W: Write>(out: &mut W, state: &EditorState) -> io::Result<()> {
    let buffer = state.buffer();
    let longest = buffer.longest_block();
    let size = buffer.size();
    let (cx, cy) = state.cursor_pixel();
    writeln!(out)?;
    writeln!(out, "---")?;
    writeln!(out, "name: {}", buffer.name)?;
    writeln!(out, "chars: {}", buffer.len())?;
    writeln!(
        out,
        "blocks: {} (longest: {} with {} chars)",
        state.block_count(),
        longest,
        state.blocks().get(longest).map_or(0, |b| b.span())
    )?;
    writeln!(out, "size: {}x{} px", size.width, size.height)?;
    writeln!(out, "spans: {}", state.highlight_spans().len())?;
    writeln!(out, "caret: ({cx}, {cy})")?;
    if let Some(sel) = state.selection() {
        writeln!(out, "selection: {}..{}", sel.start, sel.end)?;
        for (i, rect) in state.selection_rects().visible() {
            writeln!(
                out,
                "  rect[{i}]: x={} y={} w={} h={}",
                rect.position.0, rect.position.1, rect.size.0, rect.size.1
            )?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut startup = AppStartup::new();
    startup.configure_logging()?;
    AppStartup::install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    if let Some(path) = &args.path
        && path.is_dir()
    {
        bail!("{} is a directory", path.display());
    }
    let state = build_state(&args, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_text(&mut out, &state, !args.no_color)?;
    render_report(&mut out, &state)?;
    out.flush()?;
    info!(target: "runtime", "shutdown");
    Ok(())
}
