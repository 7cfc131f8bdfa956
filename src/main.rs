use std::{
    io::{Stdout, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use crossterm::{
    queue,
    style::{self, Attribute, Color, Stylize},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use weavemaze::{
    app,
    draw::{RenderOptions, Rgb},
    grid::{Direction, Topology},
    maze::{BacktrackPolicy, Maze, MazeConfig, StepOutcome},
};

#[derive(Parser)]
#[command(name = "weavemaze")]
#[command(
    author,
    version,
    about = "Generate a seeded maze with bridges and preview it in the terminal"
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Maze width in cells
    #[arg(short = 'W', long, default_value_t = 20)]
    width: u32,

    /// Maze height in cells
    #[arg(short = 'H', long, default_value_t = 20)]
    height: u32,

    /// Seed for reproducible generation (random if omitted)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Lattice shape: square or hex
    #[arg(short, long, default_value_t = Topology::Square)]
    topology: Topology,

    /// Chance that a possible bridge is offered as a move
    #[arg(short, long, default_value_t = 0.3)]
    bridge_chance: f64,

    /// Chance of turning when going straight is possible
    #[arg(long, default_value_t = 0.3)]
    turning_probability: f64,

    /// Which open cell to resume from after a dead end: oldest, newest or random
    #[arg(short, long, default_value_t = BacktrackPolicy::Oldest)]
    policy: BacktrackPolicy,

    /// Stop after this many steps and show the partial maze
    #[arg(long)]
    steps: Option<usize>,

    /// Draw the route from start to finish
    #[arg(long)]
    solution: bool,

    /// Keep the entrance and exit walls
    #[arg(long)]
    enclosed: bool,

    /// Wall colour, #rgb or #rrggbb
    #[arg(long)]
    wall_color: Option<Rgb>,

    /// Bridge colour, #rgb or #rrggbb
    #[arg(long)]
    bridge_color: Option<Rgb>,

    /// Background colour, #rgb or #rrggbb
    #[arg(long)]
    background_color: Option<Rgb>,

    /// Write logs to weavemaze.log in this directory (filtered by RUST_LOG)
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn maze_config(&self) -> MazeConfig {
        MazeConfig {
            seed: self.seed,
            bridge_chance: self.bridge_chance,
            turning_probability: self.turning_probability,
            policy: self.policy,
        }
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            wall_color: self.wall_color,
            bridge_color: self.bridge_color,
            background_color: self.background_color,
            show_solution: Some(self.solution),
            enclosed: Some(self.enclosed),
            ..Default::default()
        }
    }
}

/// Log to a file so tracing output never interleaves with the preview.
/// The guard must live until exit to flush buffered lines.
fn init_logging(dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(dir, "weavemaze.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn generate_and_show<D: Direction>(
    mut maze: Maze<D>,
    cli: &Cli,
    stdout: &mut Stdout,
) -> Result<(), Box<dyn std::error::Error>> {
    match cli.steps {
        Some(steps) => {
            for _ in 0..steps {
                if let StepOutcome::Complete = maze.step() {
                    break;
                }
            }
        }
        None => {
            maze.run();
        }
    }

    let header = format!(
        "maze_{}x{}_{} ({}, {} backtracking, {} passages, {} bridges{})\r\n",
        cli.width,
        cli.height,
        maze.seed(),
        cli.topology,
        maze.policy(),
        maze.carve_count(),
        maze.bridge_count(),
        if maze.is_complete() { "" } else { ", partial" }
    );
    queue!(
        stdout,
        style::PrintStyledContent(header.with(Color::Green).attribute(Attribute::Bold))
    )?;
    stdout.flush()?;

    let config = app::preview_config(&cli.render_options())?;
    app::preview(&maze, &config, stdout)?;
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli.maze_config();
    let mut stdout = std::io::stdout();
    match cli.topology {
        Topology::Square => {
            generate_and_show(Maze::square(cli.width, cli.height, &config)?, cli, &mut stdout)
        }
        Topology::Hex => {
            generate_and_show(Maze::hex(cli.width, cli.height, &config)?, cli, &mut stdout)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = cli.log_dir.as_deref().map(init_logging);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            eprintln!("{}", format!("Error: {err}").with(Color::Red));
            ExitCode::FAILURE
        }
    }
}
