#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Wander toy.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for collaborators
//! to react to. The crate also carries the [`MazeGenerator`] seam through
//! which the grid builder obtains freshly carved mazes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of content occupying a single maze tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    /// Solid tile that blocks traversal.
    Wall,
    /// Open tile that permits traversal.
    Floor,
    /// Doorway tile connecting two open regions; traversable.
    Door,
    /// The goal tile; traversable, ends the current session when entered.
    Finish,
}

impl TileKind {
    /// Reports whether the avatar may occupy a tile of this kind.
    #[must_use]
    pub const fn is_walkable(self) -> bool {
        matches!(self, Self::Floor | Self::Door | Self::Finish)
    }
}

/// Single-step movement directions available to the avatar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing column indices.
    Right,
    /// Movement toward increasing row indices.
    Down,
}

/// Viewport-shape classification supplied by the hosting adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutMode {
    /// Narrow or tall viewport; coarse grid with touch-sized tiles.
    Compact,
    /// Wide viewport; denser grid with smaller tiles.
    Standard,
}

/// Location of a single grid tile expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    column: u32,
    row: u32,
}

impl GridCoord {
    /// Creates a new grid coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the tile.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the tile.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Converts the coordinate into the pixel anchor of its tile.
    #[must_use]
    pub const fn to_pixels(self, tile_size: u32) -> PixelPosition {
        PixelPosition::new(self.column * tile_size, self.row * tile_size)
    }
}

/// Top-left pixel anchor of the avatar, always a multiple of the tile size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPosition {
    x: u32,
    y: u32,
}

impl PixelPosition {
    /// Creates a new pixel position.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel offset from the grid origin.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Vertical pixel offset from the grid origin.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Converts the position back into the grid cell containing it.
    ///
    /// Returns `None` when `tile_size` is zero.
    #[must_use]
    pub fn to_cell(self, tile_size: u32) -> Option<GridCoord> {
        if tile_size == 0 {
            return None;
        }
        Some(GridCoord::new(self.x / tile_size, self.y / tile_size))
    }

    /// Computes the candidate position one tile away in the given direction.
    ///
    /// Returns `None` when the displacement would leave pixel space, which
    /// callers treat as an out-of-bounds rejection.
    #[must_use]
    pub fn stepped(self, direction: Direction, tile_size: u32) -> Option<PixelPosition> {
        let (x, y) = match direction {
            Direction::Left => (self.x.checked_sub(tile_size)?, self.y),
            Direction::Right => (self.x.checked_add(tile_size)?, self.y),
            Direction::Up => (self.x, self.y.checked_sub(tile_size)?),
            Direction::Down => (self.x, self.y.checked_add(tile_size)?),
        };
        Some(PixelPosition::new(x, y))
    }
}

/// Pixel dimensions of the area available for the tile grid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a new viewport descriptor.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width of the viewport in device pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the viewport in device pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }
}

/// Owned rectangular grid of typed tiles indexed by `(column, row)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    columns: u32,
    rows: u32,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    /// Builds a grid from column-major tile data.
    ///
    /// Returns `None` when the outer vector is empty or the columns are not
    /// all of equal, non-zero length.
    #[must_use]
    pub fn from_columns(columns: Vec<Vec<TileKind>>) -> Option<Self> {
        let column_count = u32::try_from(columns.len()).ok()?;
        if column_count == 0 {
            return None;
        }
        let row_count = u32::try_from(columns[0].len()).ok()?;
        if row_count == 0 || columns.iter().any(|column| column.len() != columns[0].len()) {
            return None;
        }

        let mut tiles = Vec::with_capacity(columns.len() * columns[0].len());
        for column in columns {
            tiles.extend(column);
        }

        Some(Self {
            columns: column_count,
            rows: row_count,
            tiles,
        })
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Retrieves the kind of the tile at the provided coordinate.
    ///
    /// Returns `None` for coordinates outside the grid bounds.
    #[must_use]
    pub fn kind_at(&self, cell: GridCoord) -> Option<TileKind> {
        self.index(cell).map(|index| self.tiles[index])
    }

    /// Replaces the kind of the tile at the provided coordinate.
    ///
    /// Returns `false` when the coordinate lies outside the grid.
    pub fn set_kind(&mut self, cell: GridCoord, kind: TileKind) -> bool {
        match self.index(cell) {
            Some(index) => {
                self.tiles[index] = kind;
                true
            }
            None => false,
        }
    }

    /// Iterates over every tile in column-major order.
    ///
    /// The iterator is double-ended so callers can scan from either corner.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (GridCoord, TileKind)> + '_ {
        let rows = self.rows;
        self.tiles.iter().enumerate().map(move |(index, kind)| {
            let index = index as u32;
            (GridCoord::new(index / rows, index % rows), *kind)
        })
    }

    fn index(&self, cell: GridCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let column = usize::try_from(cell.column()).ok()?;
            let row = usize::try_from(cell.row()).ok()?;
            let rows = usize::try_from(self.rows).ok()?;
            Some(column * rows + row)
        } else {
            None
        }
    }
}

/// Dimensions requested from the maze generator; both axes must be odd.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MazeRequest {
    columns: u32,
    rows: u32,
}

impl MazeRequest {
    /// Creates a new generation request.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of tile columns requested.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of tile rows requested.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }
}

/// Raw generator output: column-major tiles restricted to wall, floor and door.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeBlueprint {
    columns: u32,
    rows: u32,
    tiles: Vec<Vec<TileKind>>,
}

impl MazeBlueprint {
    /// Creates a blueprint from claimed dimensions and column-major tiles.
    ///
    /// The shape is deliberately unchecked here; the grid builder validates
    /// the claimed dimensions against the tile structure and treats a
    /// mismatch as a failed generation attempt.
    #[must_use]
    pub fn new(columns: u32, rows: u32, tiles: Vec<Vec<TileKind>>) -> Self {
        Self {
            columns,
            rows,
            tiles,
        }
    }

    /// Number of columns the generator claims to have produced.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows the generator claims to have produced.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Column-major tile data.
    #[must_use]
    pub fn tiles(&self) -> &[Vec<TileKind>] {
        &self.tiles
    }

    /// Consumes the blueprint, yielding the column-major tile data.
    #[must_use]
    pub fn into_tiles(self) -> Vec<Vec<TileKind>> {
        self.tiles
    }
}

/// External collaborator that carves a traversable maze on demand.
///
/// Implementations must produce a grid whose perimeter is walled, whose
/// interior contains at least two distinct floor tiles, and whose open
/// tiles form a single connected region.
pub trait MazeGenerator {
    /// Generates a maze matching the requested dimensions.
    fn generate(&mut self, request: MazeRequest) -> Result<MazeBlueprint, GenerationError>;
}

/// Failures reported by a maze generator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested dimensions were not odd on both axes.
    #[error("maze dimensions must be odd on both axes, got {columns}x{rows}")]
    EvenDimensions {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The requested dimensions fall below the generator's minimum.
    #[error("maze dimensions below the supported minimum, got {columns}x{rows}")]
    BelowMinimum {
        /// Requested column count.
        columns: u32,
        /// Requested row count.
        rows: u32,
    },
    /// The generator backend failed for an implementation-specific reason.
    #[error("maze generation backend failed: {reason}")]
    Backend {
        /// Human-readable description of the failure.
        reason: String,
    },
}

/// Kind of sprite a placement entry asks the renderer to materialize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementKind {
    /// Solid wall tile.
    Wall,
    /// Doorway tile.
    Door,
    /// Goal tile.
    Finish,
    /// The player avatar, placed on its starting tile.
    Avatar,
}

/// Single renderer placement: a sprite kind anchored at a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// Kind of sprite to place.
    pub kind: PlacementKind,
    /// Cell the sprite occupies.
    pub cell: GridCoord,
}

impl Placement {
    /// Creates a new placement entry.
    #[must_use]
    pub const fn new(kind: PlacementKind, cell: GridCoord) -> Self {
        Self { kind, cell }
    }
}

/// Fully prepared session contents produced by the grid builder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionBlueprint {
    /// Tile grid with the goal tile already retyped to [`TileKind::Finish`].
    pub grid: TileGrid,
    /// Tile side length in device pixels.
    pub tile_size: u32,
    /// Cell the avatar starts on.
    pub start: GridCoord,
    /// Cell holding the single finish tile.
    pub goal: GridCoord,
    /// Placement list for the rendering collaborator.
    pub placements: Vec<Placement>,
}

impl SessionBlueprint {
    /// Creates a new session blueprint.
    #[must_use]
    pub fn new(
        grid: TileGrid,
        tile_size: u32,
        start: GridCoord,
        goal: GridCoord,
        placements: Vec<Placement>,
    ) -> Self {
        Self {
            grid,
            tile_size,
            start,
            goal,
            placements,
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the live session wholesale with a freshly built one.
    InstallSession {
        /// Session contents prepared by the grid builder.
        blueprint: SessionBlueprint,
    },
    /// Requests that the avatar advance a single tile in a direction.
    StepAvatar {
        /// Direction of the attempted step.
        direction: Direction,
    },
    /// Discards the live session, leaving the world explicitly empty.
    ClearSession,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Announces that a new session replaced the previous one.
    SessionInstalled {
        /// Number of tile columns in the new grid.
        columns: u32,
        /// Number of tile rows in the new grid.
        rows: u32,
        /// Tile side length in device pixels.
        tile_size: u32,
        /// Avatar pixel anchor derived from its starting cell.
        avatar: PixelPosition,
        /// Placement list for the rendering collaborator.
        placements: Vec<Placement>,
    },
    /// Confirms that the avatar moved between two pixel anchors.
    AvatarMoved {
        /// Anchor occupied before the step.
        from: PixelPosition,
        /// Anchor occupied after the step.
        to: PixelPosition,
    },
    /// Reports that the avatar entered the finish tile.
    GoalReached {
        /// Cell holding the finish tile.
        cell: GridCoord,
    },
    /// Confirms that the live session was discarded.
    SessionCleared,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::DeserializeOwned;

    #[test]
    fn walkability_excludes_only_walls() {
        assert!(!TileKind::Wall.is_walkable());
        assert!(TileKind::Floor.is_walkable());
        assert!(TileKind::Door.is_walkable());
        assert!(TileKind::Finish.is_walkable());
    }

    #[test]
    fn pixel_anchor_round_trips_through_cell() {
        let cell = GridCoord::new(7, 3);
        let anchor = cell.to_pixels(32);
        assert_eq!(anchor, PixelPosition::new(224, 96));
        assert_eq!(anchor.to_cell(32), Some(cell));
    }

    #[test]
    fn to_cell_rejects_zero_tile_size() {
        assert_eq!(PixelPosition::new(64, 64).to_cell(0), None);
    }

    #[test]
    fn stepping_left_from_origin_leaves_pixel_space() {
        let origin = PixelPosition::new(0, 32);
        assert_eq!(origin.stepped(Direction::Left, 32), None);
        assert_eq!(origin.stepped(Direction::Up, 32), Some(PixelPosition::new(0, 0)));
        assert_eq!(
            origin.stepped(Direction::Right, 32),
            Some(PixelPosition::new(32, 32))
        );
        assert_eq!(
            origin.stepped(Direction::Down, 32),
            Some(PixelPosition::new(0, 64))
        );
    }

    #[test]
    fn tile_grid_indexes_column_major() {
        let grid = TileGrid::from_columns(vec![
            vec![TileKind::Wall, TileKind::Floor],
            vec![TileKind::Door, TileKind::Wall],
        ])
        .expect("rectangular grid");

        assert_eq!(grid.columns(), 2);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.kind_at(GridCoord::new(0, 1)), Some(TileKind::Floor));
        assert_eq!(grid.kind_at(GridCoord::new(1, 0)), Some(TileKind::Door));
        assert_eq!(grid.kind_at(GridCoord::new(2, 0)), None);
    }

    #[test]
    fn tile_grid_rejects_ragged_columns() {
        let ragged = TileGrid::from_columns(vec![
            vec![TileKind::Wall, TileKind::Floor],
            vec![TileKind::Wall],
        ]);
        assert!(ragged.is_none());
        assert!(TileGrid::from_columns(Vec::new()).is_none());
    }

    #[test]
    fn tile_grid_set_kind_respects_bounds() {
        let mut grid = TileGrid::from_columns(vec![vec![TileKind::Floor]]).expect("grid");
        assert!(grid.set_kind(GridCoord::new(0, 0), TileKind::Finish));
        assert_eq!(grid.kind_at(GridCoord::new(0, 0)), Some(TileKind::Finish));
        assert!(!grid.set_kind(GridCoord::new(1, 0), TileKind::Wall));
    }

    #[test]
    fn tile_grid_iteration_visits_every_cell_once() {
        let grid = TileGrid::from_columns(vec![
            vec![TileKind::Wall, TileKind::Floor, TileKind::Door],
            vec![TileKind::Floor, TileKind::Wall, TileKind::Floor],
        ])
        .expect("grid");

        let visited: Vec<_> = grid.iter().collect();
        assert_eq!(visited.len(), 6);
        assert_eq!(visited[0], (GridCoord::new(0, 0), TileKind::Wall));
        assert_eq!(visited[3], (GridCoord::new(1, 0), TileKind::Floor));
        assert_eq!(visited[5], (GridCoord::new(1, 2), TileKind::Floor));
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: serde::Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn tile_kind_round_trips_through_bincode() {
        assert_round_trip(&TileKind::Door);
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::Up);
    }

    #[test]
    fn placement_round_trips_through_bincode() {
        let placement = Placement::new(PlacementKind::Avatar, GridCoord::new(4, 9));
        assert_round_trip(&placement);
    }

    #[test]
    fn layout_mode_round_trips_through_bincode() {
        assert_round_trip(&LayoutMode::Compact);
    }
}
