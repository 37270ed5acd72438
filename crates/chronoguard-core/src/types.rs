//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::constants::{PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};

/// 2D position in play-area units. Origin is the top-left corner,
/// x grows to the right and y grows downward.
pub type Position = DVec2;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of gameplay ticks processed.
    pub tick: u64,
    /// Simulated gameplay seconds (excludes freezes and pauses).
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// The rectangular play area. The structure sits at its centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f64,
    pub height: f64,
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            width: PLAY_AREA_WIDTH,
            height: PLAY_AREA_HEIGHT,
        }
    }
}

impl PlayArea {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Centre of the play area (structure position).
    pub fn center(&self) -> Position {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Larger of the two dimensions.
    pub fn longest_side(&self) -> f64 {
        self.width.max(self.height)
    }
}

/// One of the four boundary edges of the play area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Point just outside this edge. `along` is the normalized (0..1)
    /// coordinate along the edge, `margin` the distance outside the area.
    pub fn point_outside(self, area: &PlayArea, along: f64, margin: f64) -> Position {
        match self {
            Edge::Top => DVec2::new(along * area.width, -margin),
            Edge::Right => DVec2::new(area.width + margin, along * area.height),
            Edge::Bottom => DVec2::new(along * area.width, area.height + margin),
            Edge::Left => DVec2::new(-margin, along * area.height),
        }
    }
}
