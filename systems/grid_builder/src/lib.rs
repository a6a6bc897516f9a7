#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure grid-building pipeline: sizing, generation, start/goal placement.
//!
//! [`GridBuilder::build`] turns a viewport and layout mode into a complete
//! [`SessionBlueprint`]: it derives odd maze dimensions from the responsive
//! tile size, invokes the external [`MazeGenerator`], designates the start
//! and goal tiles, and emits the placement list for the rendering
//! collaborator. The builder never waits on rendering.

use maze_wander_core::{
    GenerationError, GridCoord, LayoutMode, MazeBlueprint, MazeGenerator, MazeRequest, Placement,
    PlacementKind, SessionBlueprint, TileGrid, TileKind, Viewport,
};
use maze_wander_system_layout::{compute_tile_size, minimum_grid};
use thiserror::Error;

/// Failures that abort a build attempt.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BuildError {
    /// The generator failed on every permitted attempt.
    #[error("maze generation failed after {attempts} attempt(s)")]
    Generation {
        /// Number of attempts made before giving up.
        attempts: u32,
        /// Error reported by the final attempt.
        #[source]
        source: GenerationError,
    },
    /// The generator's output did not match the requested tile structure.
    #[error("generator returned a malformed grid for a {columns}x{rows} request")]
    MalformedGrid {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The generated maze contains no floor tile to start on.
    #[error("generated maze contains no floor tile")]
    NoFloorTile,
    /// The generated maze has no second floor tile to host the goal.
    #[error("generated maze has no floor tile left to host the goal")]
    NoGoalTile,
}

/// Builds playable sessions from viewport dimensions and a maze generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridBuilder {
    max_attempts: u32,
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl GridBuilder {
    /// Creates a builder with the default generation retry cap.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the generation retry cap; values below one are raised to one.
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Builds a session blueprint for the provided viewport and layout mode.
    ///
    /// Generator failures and malformed output are retried with identical
    /// parameters up to the configured cap; the last failure surfaces when
    /// the cap is exhausted. Insufficient open space ([`BuildError::NoFloorTile`],
    /// [`BuildError::NoGoalTile`]) indicates a generator-contract violation
    /// and fails immediately without retrying.
    pub fn build(
        &self,
        viewport: Viewport,
        mode: LayoutMode,
        generator: &mut dyn MazeGenerator,
    ) -> Result<SessionBlueprint, BuildError> {
        let tile_size = compute_tile_size(viewport, mode);
        let (columns, rows) = maze_dimensions(viewport, tile_size, mode);
        let request = MazeRequest::new(columns, rows);

        let attempts = self.max_attempts.max(1);
        let mut last_failure = None;
        for attempt in 1..=attempts {
            match generator.generate(request) {
                Err(source) => {
                    last_failure = Some(BuildError::Generation {
                        attempts: attempt,
                        source,
                    });
                }
                Ok(blueprint) => match validate_blueprint(blueprint, columns, rows) {
                    None => {
                        last_failure = Some(BuildError::MalformedGrid { columns, rows });
                    }
                    Some(grid) => return finalize(grid, tile_size),
                },
            }
        }

        Err(last_failure.unwrap_or(BuildError::Generation {
            attempts: 0,
            source: GenerationError::Backend {
                reason: String::from("no generation attempt was made"),
            },
        }))
    }
}

/// Derives odd maze dimensions that fit the viewport at the given tile size.
///
/// Oddness is a generator constraint: walls are carved on alternating cells
/// and an odd bounding box keeps the perimeter fully connected.
fn maze_dimensions(viewport: Viewport, tile_size: u32, mode: LayoutMode) -> (u32, u32) {
    let (min_columns, min_rows) = minimum_grid(mode);
    let columns = odd_fit(viewport.width(), tile_size).max(min_columns);
    let rows = odd_fit(viewport.height(), tile_size).max(min_rows);
    (columns, rows)
}

/// Largest odd tile count not exceeding `floor(extent / tile_size)`.
fn odd_fit(extent: f32, tile_size: u32) -> u32 {
    if tile_size == 0 || !extent.is_finite() || extent <= 0.0 {
        return 1;
    }
    let max_tiles = (extent / tile_size as f32).floor() as u32;
    2 * (max_tiles.saturating_sub(1) / 2) + 1
}

/// Checks the generator's claimed dimensions against its tile structure.
///
/// Returns `None` when the shape is inconsistent with the request or the
/// output contains tile kinds the generator is not allowed to emit.
fn validate_blueprint(blueprint: MazeBlueprint, columns: u32, rows: u32) -> Option<TileGrid> {
    if blueprint.columns() != columns || blueprint.rows() != rows {
        return None;
    }

    let tiles = blueprint.into_tiles();
    if tiles.len() != columns as usize {
        return None;
    }
    for column in &tiles {
        if column.len() != rows as usize {
            return None;
        }
        if column.iter().any(|kind| *kind == TileKind::Finish) {
            return None;
        }
    }

    TileGrid::from_columns(tiles)
}

fn finalize(mut grid: TileGrid, tile_size: u32) -> Result<SessionBlueprint, BuildError> {
    let start = grid
        .iter()
        .find(|&(_, kind)| kind == TileKind::Floor)
        .map(|(cell, _)| cell)
        .ok_or(BuildError::NoFloorTile)?;

    // Reverse scan biases the goal toward the corner opposite the start; the
    // only guarantee is that the two cells differ.
    let goal = grid
        .iter()
        .rev()
        .find(|&(cell, kind)| kind == TileKind::Floor && cell != start)
        .map(|(cell, _)| cell)
        .ok_or(BuildError::NoGoalTile)?;

    let retyped = grid.set_kind(goal, TileKind::Finish);
    debug_assert!(retyped, "goal cell came from the grid scan");

    let mut placements = Vec::new();
    for (cell, kind) in grid.iter() {
        let placement_kind = match kind {
            TileKind::Wall => PlacementKind::Wall,
            TileKind::Door => PlacementKind::Door,
            TileKind::Finish => PlacementKind::Finish,
            TileKind::Floor => continue,
        };
        placements.push(Placement::new(placement_kind, cell));
    }
    placements.push(Placement::new(PlacementKind::Avatar, start));

    Ok(SessionBlueprint::new(grid, tile_size, start, goal, placements))
}
