//! Turns a maze's carved connectivity into an ordered list of 2D draw primitives.
//!
//! Rendering is a pure function of the maze and a [`RenderConfig`]: it never mutates generation
//! state, and jitter comes from its own stream seeded with the maze seed, so the same inputs
//! always give the same output.

mod color;
mod options;

pub use color::Rgb;
pub use options::{DEFAULT_CELL_SIZE, RenderConfig, RenderOptions};

use crate::{
    grid::{Direction, Grid, Point},
    maze::Maze,
    rng::Mulberry32,
};

/// Bridge overpass stroke is pulled in from each cell centre by this fraction of its span.
const BRIDGE_WALL_FUDGE: f64 = 6.0;
/// Same for the inner, background-coloured stroke.
const BRIDGE_PATH_FUDGE: f64 = 7.0;
/// Overpass width in wall widths
const BRIDGE_WIDTH: f64 = 4.5;
/// Inner overpass stroke is this many wall widths narrower than the outer one
const BRIDGE_PATH_INSET: f64 = 1.5;
/// Hue change per solution hop, in degrees
const SOLUTION_HUE_STEP: f64 = 5.0;
/// Jitter amplitude per unit of wonkiness, in cells
const JITTER_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

/// One drawing instruction, in canvas units with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    FillRect {
        origin: Point,
        width: f64,
        height: f64,
        color: Rgb,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb,
        width: f64,
        cap: LineCap,
    },
    /// Solution hop, coloured by hue (see [`Rgb::from_hue`])
    PathSegment {
        from: Point,
        to: Point,
        hue: f64,
        width: f64,
    },
}

/// Cell size that makes the longer side of the grid span `longest_side` canvas units.
pub fn fit_cell_size<D: Direction>(grid: &Grid<D>, longest_side: f64) -> f64 {
    let extent = grid.extent();
    longest_side / extent.x.max(extent.y)
}

/// Moves points by a seeded random amount proportional to wonkiness.
struct Jitter {
    rng: Mulberry32,
    amplitude: f64,
}

impl Jitter {
    fn apply(&mut self, point: Point) -> Point {
        if self.amplitude == 0.0 {
            return point;
        }
        let dx = (self.rng.next_f64() - 0.5) * self.amplitude;
        let dy = (self.rng.next_f64() - 0.5) * self.amplitude;
        point.offset(dx, dy)
    }
}

/// Point `fraction` of the way from `from` towards `to`.
fn toward(from: Point, to: Point, fraction: f64) -> Point {
    from.offset((to.x - from.x) * fraction, (to.y - from.y) * fraction)
}

/// Render the maze as it stands (mid-generation or complete).
///
/// Output order: background, walls, solution hops that pass under bridges or along the
/// ground, bridge overpasses, then solution hops that cross a bridge.
pub fn render<D: Direction>(maze: &Maze<D>, config: &RenderConfig) -> Vec<Primitive> {
    let grid = maze.grid();
    let scale = config.cell_size();
    let line_width = config.line_width();
    let extent = grid.extent();
    let mut jitter = Jitter {
        rng: Mulberry32::new(maze.seed()),
        amplitude: config.wonkiness() * JITTER_SCALE * scale,
    };
    let wall_cap = if D::ALL.len() == 4 {
        LineCap::Square
    } else {
        LineCap::Round
    };

    let mut primitives = vec![Primitive::FillRect {
        origin: Point::default(),
        width: extent.x * scale,
        height: extent.y * scale,
        color: config.background_color(),
    }];

    let mut bridges = Vec::new();
    for (idx, cell) in grid.cells().iter().enumerate() {
        if !cell.is_visited() {
            continue;
        }
        for &mv in cell.connections_out().iter().filter(|m| m.is_bridge()) {
            if let Some((_, to)) = grid.two_hops(idx, mv.direction()) {
                bridges.push((idx, to));
            }
        }
        let origin = grid.origin(idx);
        for &direction in D::ALL {
            if cell.is_open(direction) {
                continue;
            }
            let boundary = cell.neighbour(direction).is_none();
            let opening = (idx == grid.start() && direction == D::ENTRANCE)
                || (idx == grid.finish() && direction == D::EXIT);
            if boundary && opening && !config.enclosed() {
                continue;
            }
            let [a, b] = grid.wall(direction);
            primitives.push(Primitive::Line {
                from: jitter.apply(origin.offset(a.x, a.y).scale(scale)),
                to: jitter.apply(origin.offset(b.x, b.y).scale(scale)),
                color: config.wall_color(),
                width: line_width,
                cap: wall_cap,
            });
        }
    }

    let mut raised_hops = Vec::new();
    if config.show_solution() {
        let path = maze.solution();
        for (hop, pair) in path.windows(2).enumerate() {
            let (child, parent) = (pair[0], pair[1]);
            let segment = Primitive::PathSegment {
                from: grid.center_of(child).scale(scale),
                to: grid.center_of(parent).scale(scale),
                hue: (hop as f64 * SOLUTION_HUE_STEP) % 360.0,
                width: line_width,
            };
            if grid.cell(child).is_bridge_to_parent() {
                raised_hops.push(segment);
            } else {
                primitives.push(segment);
            }
        }
    }

    for (from, to) in bridges {
        let (a, b) = (grid.center_of(from), grid.center_of(to));
        primitives.push(Primitive::Line {
            from: toward(a, b, 1.0 / BRIDGE_WALL_FUDGE).scale(scale),
            to: toward(b, a, 1.0 / BRIDGE_WALL_FUDGE).scale(scale),
            color: config.bridge_color(),
            width: line_width * BRIDGE_WIDTH,
            cap: LineCap::Butt,
        });
        primitives.push(Primitive::Line {
            from: toward(a, b, 1.0 / BRIDGE_PATH_FUDGE).scale(scale),
            to: toward(b, a, 1.0 / BRIDGE_PATH_FUDGE).scale(scale),
            color: config.background_color(),
            width: line_width * (BRIDGE_WIDTH - BRIDGE_PATH_INSET),
            cap: LineCap::Butt,
        });
    }

    primitives.extend(raised_hops);
    tracing::debug!("Rendered {} primitives", primitives.len());
    primitives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        grid::SquareDirection,
        maze::{MazeConfig, StepOutcome},
    };

    fn lines(primitives: &[Primitive], color: Rgb) -> Vec<(Point, Point)> {
        primitives
            .iter()
            .filter_map(|p| match *p {
                Primitive::Line {
                    from, to, color: c, ..
                } if c == color => Some((from, to)),
                _ => None,
            })
            .collect()
    }

    fn generated(width: u32, height: u32, config: &MazeConfig) -> Maze<SquareDirection> {
        let mut maze = Maze::square(width, height, config).unwrap();
        maze.run();
        maze
    }

    #[test]
    fn test_background_first() {
        let maze = generated(3, 2, &MazeConfig::default().with_seed(4));
        let primitives = render(&maze, &RenderConfig::default());
        assert_eq!(
            primitives[0],
            Primitive::FillRect {
                origin: Point::default(),
                width: 120.0,
                height: 80.0,
                color: Rgb::WHITE,
            }
        );
        assert_eq!(
            primitives
                .iter()
                .filter(|p| matches!(p, Primitive::FillRect { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn test_exact_walls_without_wonkiness() {
        let maze = generated(5, 4, &MazeConfig::default().with_seed(8).with_bridge_chance(0.0));
        let config = RenderOptions {
            cell_size: Some(10.0),
            enclosed: Some(true),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        let walls = lines(&render(&maze, &config), Rgb::BLACK);

        let grid = maze.grid();
        let mut expected = Vec::new();
        for (idx, cell) in grid.cells().iter().enumerate() {
            for &d in grid.directions() {
                if !cell.is_open(d) {
                    let [a, b] = grid.wall(d);
                    let (x, y) = (cell.x as f64, cell.y as f64);
                    expected.push((
                        Point::new((x + a.x) * 10.0, (y + a.y) * 10.0),
                        Point::new((x + b.x) * 10.0, (y + b.y) * 10.0),
                    ));
                }
            }
            assert!(cell.is_visited(), "cell {idx}");
        }
        assert_eq!(walls, expected);
    }

    #[test]
    fn test_wall_count_of_perfect_maze() {
        // Each of the n - 1 passages removes two wall sides out of 4n
        let maze = generated(6, 6, &MazeConfig::default().with_seed(21).with_bridge_chance(0.0));
        let enclosed = RenderOptions {
            enclosed: Some(true),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        assert_eq!(lines(&render(&maze, &enclosed), Rgb::BLACK).len(), 4 * 36 - 2 * 35);
        let open = lines(&render(&maze, &RenderConfig::default()), Rgb::BLACK);
        assert_eq!(open.len(), 4 * 36 - 2 * 35 - 2);
        // Entrance on the left of the start cell is gone
        assert!(!open.contains(&(Point::new(0.0, 0.0), Point::new(0.0, 40.0))));
    }

    #[test]
    fn test_wonkiness_moves_walls_deterministically() {
        let maze = generated(4, 4, &MazeConfig::default().with_seed(2));
        let config = RenderOptions {
            wonkiness: Some(1.0),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        let straight = lines(&render(&maze, &RenderConfig::default()), Rgb::BLACK);
        let wonky = lines(&render(&maze, &config), Rgb::BLACK);
        assert_eq!(wonky, lines(&render(&maze, &config), Rgb::BLACK));
        assert_eq!(straight.len(), wonky.len());
        assert_ne!(straight, wonky);
        // Jitter stays within half the amplitude on each axis
        let bound = 0.5 * JITTER_SCALE * 40.0 + 1e-9;
        for ((a, b), (c, d)) in straight.iter().zip(wonky.iter()) {
            for (p, q) in [(a, c), (b, d)] {
                assert!((p.x - q.x).abs() <= bound && (p.y - q.y).abs() <= bound);
            }
        }
    }

    #[test]
    fn test_bridges_render_overpasses() {
        let config = MazeConfig::default().with_seed(1).with_bridge_chance(1.0);
        let maze = generated(4, 4, &config);
        assert!(maze.bridge_count() > 0);
        let primitives = render(&maze, &RenderConfig::default());
        let outer = lines(&primitives, Rgb::MID_GRAY);
        assert_eq!(outer.len(), maze.bridge_count());
        // Each overpass is followed by its background-coloured inner stroke
        let inner = primitives
            .windows(2)
            .filter(|w| {
                matches!(w[0], Primitive::Line { color, .. } if color == Rgb::MID_GRAY)
                    && matches!(w[1], Primitive::Line { color, cap: LineCap::Butt, .. } if color == Rgb::WHITE)
            })
            .count();
        assert_eq!(inner, maze.bridge_count());
        assert!(
            !primitives
                .iter()
                .any(|p| matches!(p, Primitive::PathSegment { .. }))
        );
    }

    #[test]
    fn test_overpass_geometry() {
        let config = MazeConfig::default().with_seed(1).with_bridge_chance(1.0);
        let maze = generated(4, 4, &config);
        let grid = maze.grid();
        let (from, to) = grid
            .cells()
            .iter()
            .enumerate()
            .find(|(_, c)| c.is_bridge_to_parent())
            .map(|(idx, c)| (c.parent().unwrap(), idx))
            .unwrap();
        let (a, b) = (grid.center_of(from), grid.center_of(to));
        let expected = (
            Point::new(
                (a.x + (b.x - a.x) / 6.0) * 40.0,
                (a.y + (b.y - a.y) / 6.0) * 40.0,
            ),
            Point::new(
                (b.x + (a.x - b.x) / 6.0) * 40.0,
                (b.y + (a.y - b.y) / 6.0) * 40.0,
            ),
        );
        let outer = lines(&render(&maze, &RenderConfig::default()), Rgb::MID_GRAY);
        assert!(outer.iter().any(|&(p, q)| {
            (p.x - expected.0.x).abs() < 1e-9
                && (p.y - expected.0.y).abs() < 1e-9
                && (q.x - expected.1.x).abs() < 1e-9
                && (q.y - expected.1.y).abs() < 1e-9
        }));
    }

    #[test]
    fn test_solution_layers_around_overpasses() {
        let config = MazeConfig::default().with_seed(3).with_bridge_chance(1.0);
        let maze = generated(12, 12, &config);
        let options = RenderOptions {
            show_solution: Some(true),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        let primitives = render(&maze, &options);
        let hops = maze.solution().len() - 1;
        let segments = primitives
            .iter()
            .enumerate()
            .filter_map(|(i, p)| match p {
                Primitive::PathSegment { hue, .. } => Some((i, *hue)),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(segments.len(), hops);

        let first_overpass = primitives
            .iter()
            .position(|p| matches!(p, Primitive::Line { color, .. } if *color == Rgb::MID_GRAY))
            .unwrap();
        let last_overpass = primitives
            .iter()
            .rposition(|p| matches!(p, Primitive::Line { cap: LineCap::Butt, .. }))
            .unwrap();
        let grid = maze.grid();
        let path = maze.solution();
        let raised = path
            .windows(2)
            .filter(|pair| grid.cell(pair[0]).is_bridge_to_parent())
            .count();
        let above = segments.iter().filter(|(i, _)| *i > last_overpass).count();
        let below = segments.iter().filter(|(i, _)| *i < first_overpass).count();
        assert_eq!(above, raised);
        assert_eq!(below, hops - raised);
    }

    #[test]
    fn test_solution_hue_rotates() {
        let config = MazeConfig::default().with_seed(9).with_bridge_chance(0.0);
        let maze = generated(6, 6, &config);
        let options = RenderOptions {
            show_solution: Some(true),
            ..Default::default()
        }
        .resolve()
        .unwrap();
        let hues = render(&maze, &options)
            .into_iter()
            .filter_map(|p| match p {
                Primitive::PathSegment { hue, .. } => Some(hue),
                _ => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(hues[0], 0.0);
        assert!(hues.windows(2).all(|w| w[0] != w[1]));
    }

    #[test]
    fn test_unvisited_cells_are_skipped() {
        let mut maze = Maze::square(5, 5, &MazeConfig::default().with_seed(6)).unwrap();
        let empty = render(&maze, &RenderConfig::default());
        assert_eq!(empty.len(), 1);

        assert!(matches!(maze.step(), StepOutcome::Carved(_)));
        let primitives = render(&maze, &RenderConfig::default());
        // Two touched cells, one shared side open on each, entrance left open on start
        assert_eq!(lines(&primitives, Rgb::BLACK).len(), 3 + 3 - 1);
    }

    #[test]
    fn test_hex_render() {
        let mut maze = Maze::hex(5, 5, &MazeConfig::default().with_seed(10)).unwrap();
        maze.run();
        let primitives = render(&maze, &RenderConfig::default());
        assert!(primitives.iter().all(|p| match p {
            Primitive::Line { cap, .. } => *cap != LineCap::Square,
            _ => true,
        }));
        assert!(fit_cell_size(maze.grid(), 800.0) > 0.0);
    }

    #[test]
    fn test_fit_cell_size() {
        let grid = crate::grid::square::build(20, 10).unwrap();
        assert_eq!(fit_cell_size(&grid, 800.0), 40.0);
    }
}
