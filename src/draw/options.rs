use super::Rgb;
use crate::error::{Result, invalid_parameter};

/// Pixels per cell when the caller does not choose.
pub const DEFAULT_CELL_SIZE: f64 = 40.0;

/// Caller-side render settings. Anything left `None` takes its default in
/// [`RenderOptions::resolve`]; the options themselves are never modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    pub wall_color: Option<Rgb>,
    pub bridge_color: Option<Rgb>,
    pub background_color: Option<Rgb>,
    pub show_solution: Option<bool>,
    /// Endpoint jitter magnitude, `>= 0`
    pub wonkiness: Option<f64>,
    /// Keep the entrance and exit walls
    pub enclosed: Option<bool>,
    /// Canvas units per cell, `> 0`
    pub cell_size: Option<f64>,
}

/// Fully resolved, validated render settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    wall_color: Rgb,
    bridge_color: Rgb,
    background_color: Rgb,
    show_solution: bool,
    wonkiness: f64,
    enclosed: bool,
    cell_size: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            wall_color: Rgb::BLACK,
            bridge_color: Rgb::MID_GRAY,
            background_color: Rgb::WHITE,
            show_solution: false,
            wonkiness: 0.0,
            enclosed: false,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl RenderOptions {
    /// Fill in defaults and validate.
    ///
    /// Out-of-range values are rejected rather than clamped: wonkiness must be finite and
    /// non-negative, cell size finite and positive.
    pub fn resolve(&self) -> Result<RenderConfig> {
        let defaults = RenderConfig::default();
        let wonkiness = self.wonkiness.unwrap_or(defaults.wonkiness);
        if !wonkiness.is_finite() || wonkiness < 0.0 {
            return Err(invalid_parameter(
                "wonkiness",
                &wonkiness,
                "must be a finite number >= 0",
            ));
        }
        let cell_size = self.cell_size.unwrap_or(defaults.cell_size);
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(invalid_parameter(
                "cell_size",
                &cell_size,
                "must be a finite number > 0",
            ));
        }
        Ok(RenderConfig {
            wall_color: self.wall_color.unwrap_or(defaults.wall_color),
            bridge_color: self.bridge_color.unwrap_or(defaults.bridge_color),
            background_color: self.background_color.unwrap_or(defaults.background_color),
            show_solution: self.show_solution.unwrap_or(defaults.show_solution),
            wonkiness,
            enclosed: self.enclosed.unwrap_or(defaults.enclosed),
            cell_size,
        })
    }
}

impl RenderConfig {
    pub fn wall_color(&self) -> Rgb {
        self.wall_color
    }

    pub fn bridge_color(&self) -> Rgb {
        self.bridge_color
    }

    pub fn background_color(&self) -> Rgb {
        self.background_color
    }

    pub fn show_solution(&self) -> bool {
        self.show_solution
    }

    pub fn wonkiness(&self) -> f64 {
        self.wonkiness
    }

    pub fn enclosed(&self) -> bool {
        self.enclosed
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Stroke width of walls and the solution path.
    pub fn line_width(&self) -> f64 {
        self.cell_size / 10.0
    }
}
