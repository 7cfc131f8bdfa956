//! Terminal front end: a one-shot coloured preview of a rendered maze, plus a headless
//! profiling mode that streams carve events to a listener thread.

pub mod canvas;
pub mod cell;

use std::{
    io::{self, Write},
    sync::mpsc::{self, Receiver},
    thread,
};

use crossterm::{
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal,
};

pub use canvas::TextCanvas;
pub use cell::{Glyph, TextCell};

use crate::{
    draw::{self, RenderConfig, RenderOptions},
    error::Result,
    grid::{Direction, Topology},
    maze::{CarveEvent, Maze, MazeConfig},
};

/// Resolve `options` for the terminal lattice: fixed cell size and straight walls.
pub fn preview_config(options: &RenderOptions) -> Result<RenderConfig> {
    RenderOptions {
        cell_size: Some(TextCanvas::CELL_SIZE),
        wonkiness: Some(0.0),
        ..options.clone()
    }
    .resolve()
}

/// Check whether the terminal is large enough to display the canvas.
/// If not, print a message and return Ok(false).
/// A terminal whose size cannot be queried (output is piped) counts as large enough.
pub fn check_size(out: &mut impl Write, canvas: &TextCanvas) -> io::Result<bool> {
    let Ok((term_width, term_height)) = terminal::size() else {
        return Ok(true);
    };
    let needed_width = canvas.width().saturating_mul(TextCell::CELL_WIDTH);
    if term_width >= needed_width && term_height >= canvas.height() {
        return Ok(true);
    }
    let msg = format!(
        "Terminal size ({}x{}) is too small for the maze preview ({}x{}). Please resize the terminal or use a smaller maze.\r\n",
        term_width,
        term_height,
        needed_width,
        canvas.height()
    );
    queue!(
        out,
        style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold))
    )?;
    out.flush()?;
    Ok(false)
}

/// Render the maze as it stands and print it.
/// Returns Ok(false) if the terminal was too small to show it.
pub fn preview<D: Direction>(
    maze: &Maze<D>,
    config: &RenderConfig,
    out: &mut impl Write,
) -> io::Result<bool> {
    let canvas = TextCanvas::from_primitives(&draw::render(maze, config));
    if !check_size(out, &canvas)? {
        return Ok(false);
    }
    canvas.display(out)?;
    Ok(true)
}

/// Tally of a profiling run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileSummary {
    /// Mazes generated to completion
    pub mazes: usize,
    /// Step and bridge events received
    pub carves: usize,
    /// Bridge events received
    pub bridges: usize,
    /// Backtrack events received
    pub backtracks: usize,
    /// Primitives produced by rendering every maze
    pub primitives: usize,
}

/// Profiling mode: generate and render `iterations` mazes without touching the terminal,
/// while a listener thread drains their carve events.
pub fn profile(
    topology: Topology,
    width: u32,
    height: u32,
    config: &MazeConfig,
    iterations: usize,
) -> Result<ProfileSummary> {
    match topology {
        Topology::Square => profile_with(|| Maze::square(width, height, config), iterations),
        Topology::Hex => profile_with(|| Maze::hex(width, height, config), iterations),
    }
}

fn profile_with<D: Direction + Send>(
    build: impl Fn() -> Result<Maze<D>>,
    iterations: usize,
) -> Result<ProfileSummary> {
    let (event_tx, event_rx) = mpsc::channel::<CarveEvent<D>>();
    let listener = thread::spawn(move || tally_events(event_rx));

    let render_config = RenderConfig::default();
    let mut primitives = 0;
    for iteration in 0..iterations {
        let mut maze = build()?.with_event_sender(event_tx.clone());
        let carves = maze.run();
        primitives += draw::render(&maze, &render_config).len();
        tracing::debug!("Profile iteration {} carved {} passages", iteration, carves);
    }
    // Listener exits once every sender is gone
    drop(event_tx);

    let mut summary = listener
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic));
    summary.primitives = primitives;
    tracing::info!("Profile finished: {:?}", summary);
    Ok(summary)
}

fn tally_events<D>(event_rx: Receiver<CarveEvent<D>>) -> ProfileSummary {
    let mut summary = ProfileSummary::default();
    for event in event_rx {
        match event {
            CarveEvent::Step { .. } => summary.carves += 1,
            CarveEvent::Bridge { .. } => {
                summary.carves += 1;
                summary.bridges += 1;
            }
            CarveEvent::Backtrack { .. } => summary.backtracks += 1,
            CarveEvent::Complete => summary.mazes += 1,
        }
    }
    summary
}
