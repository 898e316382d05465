#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Crossterm-backed rendering adapter for the maze explorer.
//!
//! The backend owns the terminal for the duration of [`RenderingBackend::run`]:
//! raw mode, the alternate screen and a hidden cursor are entered on start and
//! restored when the session guard drops, including on error paths.

mod draw;
mod input;
mod layout;

pub use self::draw::{draw_cell, style_for, CellStyle};
pub use self::input::{map_key, KeyAction};
pub use self::layout::{minimum_size, Layout, CELL_WIDTH, STATUS_RESERVE};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event},
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
    QueueableCommand,
};
use maze_explorer_rendering::{FrameInput, Glyph, Presentation, RenderingBackend, Scene};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

/// Input poll timeout used when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Rendering backend that draws scenes into the controlling terminal.
#[derive(Clone, Copy, Debug)]
pub struct TerminalBackend {
    poll_interval: Duration,
}

impl Default for TerminalBackend {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl TerminalBackend {
    /// Returns a backend polling input every [`DEFAULT_POLL_INTERVAL`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures how long each frame waits for a key press before redrawing.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Configured input poll timeout.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

impl RenderingBackend for TerminalBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Presentation {
            window_title,
            mut scene,
        } = presentation;

        let _session = TerminalSession::enter(&window_title)?;
        let mut stdout = io::stdout();
        let mut renderer = Renderer::new(scene.columns, scene.rows);
        let mut last_frame = Instant::now();

        loop {
            let (columns, rows) = terminal::size().context("failed to query terminal size")?;
            render(&mut stdout, &scene, &mut renderer, columns, rows)
                .context("failed to draw frame")?;

            let mut input = FrameInput::default();
            if event::poll(self.poll_interval).context("failed to poll terminal input")? {
                match event::read().context("failed to read terminal input")? {
                    Event::Key(key) => match map_key(key) {
                        Some(KeyAction::Move(direction)) => input.direction = Some(direction),
                        Some(KeyAction::Quit) => input.quit = true,
                        None => {}
                    },
                    Event::Resize(columns, rows) => {
                        tracing::trace!(columns, rows, "terminal resized");
                        renderer.invalidate();
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            let quit = input.quit;
            update_scene(now.duration_since(last_frame), input, &mut scene);
            last_frame = now;

            if quit {
                tracing::debug!("quit requested");
                return Ok(());
            }
        }
    }
}

/// Restores the terminal when dropped.
struct TerminalSession;

impl TerminalSession {
    fn enter(title: &str) -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        let session = Self;
        execute!(io::stdout(), EnterAlternateScreen, Hide, SetTitle(title))
            .context("failed to enter the alternate screen")?;
        tracing::debug!("terminal session started");
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), ResetColor, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        tracing::debug!("terminal session restored");
    }
}

/// Remembers what is on screen so only changed cells are redrawn.
#[derive(Debug)]
struct Renderer {
    last: Vec<Glyph>,
    last_status: Vec<String>,
    layout: Option<Layout>,
    needs_full: bool,
    too_small: bool,
}

impl Renderer {
    fn new(columns: u32, rows: u32) -> Self {
        Self {
            last: vec![Glyph::Void; columns as usize * rows as usize],
            last_status: Vec::new(),
            layout: None,
            needs_full: true,
            too_small: false,
        }
    }

    fn invalidate(&mut self) {
        self.needs_full = true;
    }
}

/// Draws one frame, repainting only what changed since the previous call.
fn render<W: Write>(
    out: &mut W,
    scene: &Scene,
    renderer: &mut Renderer,
    terminal_columns: u16,
    terminal_rows: u16,
) -> io::Result<()> {
    let layout = Layout::compute(scene.columns, scene.rows, terminal_columns, terminal_rows);
    let Some(layout) = layout else {
        renderer.layout = None;
        if !renderer.too_small {
            renderer.too_small = true;
            tracing::warn!(
                terminal_columns,
                terminal_rows,
                "terminal too small for the map window"
            );
        }
        return render_too_small(out, scene, renderer, terminal_columns, terminal_rows);
    };

    renderer.too_small = false;
    if renderer.layout != Some(layout) {
        renderer.layout = Some(layout);
        renderer.needs_full = true;
    }
    if renderer.needs_full {
        let _ = out.queue(Clear(ClearType::All))?;
        draw_border(out, layout)?;
        renderer.last_status.clear();
    }

    for (row, glyphs) in scene.glyph_rows().enumerate() {
        for (column, &glyph) in glyphs.iter().enumerate() {
            let index = row * scene.columns as usize + column;
            if renderer.needs_full || renderer.last.get(index) != Some(&glyph) {
                if let Some(slot) = renderer.last.get_mut(index) {
                    *slot = glyph;
                }
                // Window dimensions were validated to fit u16 by `Layout::compute`.
                let (x, y) = layout.cell_origin(column as u16, row as u16);
                draw_cell(out, x, y, glyph, style_for(glyph))?;
            }
        }
    }

    let status = status_lines(scene, layout);
    if status != renderer.last_status {
        for (line, text) in status.iter().enumerate() {
            let _ = out.queue(MoveTo(layout.x, layout.status_row(line as u16)))?;
            let _ = out.queue(Clear(ClearType::UntilNewLine))?;
            match line {
                1 => {
                    let _ = out.queue(SetForegroundColor(Color::Yellow))?;
                }
                4 => {
                    let _ = out.queue(SetForegroundColor(Color::Green))?;
                    let _ = out.queue(SetAttribute(Attribute::Bold))?;
                }
                _ => {}
            }
            let _ = out.queue(Print(text))?;
            let _ = out.queue(SetAttribute(Attribute::Reset))?;
            let _ = out.queue(ResetColor)?;
        }
        renderer.last_status = status;
    }

    renderer.needs_full = false;
    out.flush()
}

fn render_too_small<W: Write>(
    out: &mut W,
    scene: &Scene,
    renderer: &mut Renderer,
    terminal_columns: u16,
    terminal_rows: u16,
) -> io::Result<()> {
    let message = match minimum_size(scene.columns, scene.rows) {
        Some((columns, rows)) => format!(
            "Terminal too small. Need at least {columns}x{rows} (cols x rows). Current: {terminal_columns}x{terminal_rows}."
        ),
        None => String::from("Terminal too small for the configured viewport."),
    };
    let _ = out.queue(Clear(ClearType::All))?;
    let _ = out.queue(MoveTo(0, 0))?;
    let _ = out.queue(Print(message))?;
    renderer.needs_full = true;
    out.flush()
}

fn draw_border<W: Write>(out: &mut W, layout: Layout) -> io::Result<()> {
    let inner = usize::from(layout.width.saturating_sub(2));
    let horizontal = "─".repeat(inner);
    let bottom = layout.y + layout.height - 1;

    let _ = out.queue(SetForegroundColor(Color::White))?;
    let _ = out.queue(MoveTo(layout.x, layout.y))?;
    let _ = out.queue(Print(format!("┌{horizontal}┐")))?;
    for y in layout.y + 1..bottom {
        let _ = out.queue(MoveTo(layout.x, y))?;
        let _ = out.queue(Print('│'))?;
        let _ = out.queue(MoveTo(layout.x + layout.width - 1, y))?;
        let _ = out.queue(Print('│'))?;
    }
    let _ = out.queue(MoveTo(layout.x, bottom))?;
    let _ = out.queue(Print(format!("└{horizontal}┘")))?;
    let _ = out.queue(ResetColor)?;
    Ok(())
}

/// Rule, score, controls, a spacer and the optional banner, in screen order.
fn status_lines(scene: &Scene, layout: Layout) -> Vec<String> {
    let mut lines = vec![
        "=".repeat(usize::from(layout.width)),
        scene.score_line(),
        scene.controls_line().to_owned(),
    ];
    if let Some(banner) = scene.banner() {
        lines.push(String::new());
        lines.push(banner.to_owned());
    }
    lines
}
