#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Maze Wander adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use maze_wander_core::{Direction, GridCoord, PixelPosition, PlacementKind, Viewport};
use std::time::Duration;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Sprite families a backend is expected to load textures for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    /// Solid wall tile.
    Wall,
    /// Walkable doorway tile.
    Door,
    /// Finish tile ending the current maze.
    Finish,
    /// The player avatar.
    Knight,
}

impl SpriteKind {
    /// All sprite kinds a backend should attempt to load up front.
    pub const ALL: [Self; 4] = [Self::Wall, Self::Door, Self::Finish, Self::Knight];

    /// File name of the texture backing this sprite.
    #[must_use]
    pub const fn asset_file(self) -> &'static str {
        match self {
            Self::Wall => "wall.png",
            Self::Door => "door.png",
            Self::Finish => "finish.png",
            Self::Knight => "knight.png",
        }
    }
}

impl From<PlacementKind> for SpriteKind {
    fn from(kind: PlacementKind) -> Self {
        match kind {
            PlacementKind::Wall => Self::Wall,
            PlacementKind::Door => Self::Door,
            PlacementKind::Finish => Self::Finish,
            PlacementKind::Avatar => Self::Knight,
        }
    }
}

/// Static sprite pinned to a grid cell for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TilePlacement {
    /// Sprite drawn at the cell.
    pub sprite: SpriteKind,
    /// Cell the sprite occupies.
    pub cell: GridCoord,
}

impl TilePlacement {
    /// Creates a new tile placement descriptor.
    #[must_use]
    pub const fn new(sprite: SpriteKind, cell: GridCoord) -> Self {
        Self { sprite, cell }
    }
}

/// Avatar rendered at a pixel anchor rather than a grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AvatarPresentation {
    /// Top-left pixel anchor of the avatar sprite.
    pub position: PixelPosition,
}

impl AvatarPresentation {
    /// Creates a new avatar descriptor.
    #[must_use]
    pub const fn new(position: PixelPosition) -> Self {
        Self { position }
    }
}

/// Describes the square tile grid that composes the maze surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileGridPresentation {
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Side length of a single tile expressed in device pixels.
    pub tile_size: u32,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    #[must_use]
    pub const fn new(columns: u32, rows: u32, tile_size: u32) -> Self {
        Self {
            columns,
            rows,
            tile_size,
        }
    }

    /// Total width of the maze surface in device pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.columns * self.tile_size
    }

    /// Total height of the maze surface in device pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.rows * self.tile_size
    }
}

/// Scene description combining the tile grid, its placements and the avatar.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Tile grid that composes the maze surface.
    pub tile_grid: TileGridPresentation,
    /// Static sprites pinned to grid cells for the session lifetime.
    pub placements: Vec<TilePlacement>,
    /// Avatar sprite, absent while no session is live.
    pub avatar: Option<AvatarPresentation>,
    /// Uniform scale applied to the whole surface between rebuilds.
    pub surface_scale: f32,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        tile_grid: TileGridPresentation,
        placements: Vec<TilePlacement>,
        avatar: Option<AvatarPresentation>,
    ) -> Self {
        Self {
            tile_grid,
            placements,
            avatar,
            surface_scale: 1.0,
        }
    }

    /// Creates an empty scene shown before the first session installs.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(TileGridPresentation::new(0, 0, 0), Vec::new(), None)
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Step requested by keyboard, swipe or on-screen button this frame.
    pub step: Option<Direction>,
    /// Whether a maze regeneration was requested this frame.
    pub regenerate: bool,
    /// Current drawable viewport reported by the backend.
    pub viewport: Viewport,
}

/// Resolves a completed swipe gesture into a step direction.
///
/// Returns `None` when the gesture is shorter than `min_distance` on both
/// axes. Ties go to the horizontal axis.
#[must_use]
pub fn swipe_direction(delta: Vec2, min_distance: f32) -> Option<Direction> {
    if delta.x.abs() < min_distance && delta.y.abs() < min_distance {
        return None;
    }

    if delta.x.abs() >= delta.y.abs() {
        if delta.x > 0.0 {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    } else if delta.y > 0.0 {
        Some(Direction::Down)
    } else {
        Some(Direction::Up)
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Maze Wander scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
