#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Responsive tile-sizing heuristic and the rebuild-vs-rescale policy.
//!
//! The heuristic picks the largest tile size that lets a layout-mode-specific
//! target grid fit both viewport axes, clamped to device-appropriate bounds.
//! The resize policy decides whether a viewport change warrants discarding
//! the current maze or merely rescaling the render surface.

use maze_wander_core::{LayoutMode, Viewport};

/// Tile-size difference, in pixels, above which a resize rebuilds the session.
///
/// Smaller differences rescale the render surface in place so a minor window
/// resize never discards the maze the player is in the middle of.
pub const REBUILD_THRESHOLD_PX: u32 = 4;

/// Per-mode sizing targets and clamp bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SizingProfile {
    target_columns: u32,
    target_rows: u32,
    min_tile: u32,
    max_tile: u32,
}

const COMPACT_PROFILE: SizingProfile = SizingProfile {
    target_columns: 15,
    target_rows: 13,
    min_tile: 20,
    max_tile: 40,
};

const STANDARD_PROFILE: SizingProfile = SizingProfile {
    target_columns: 33,
    target_rows: 23,
    min_tile: 16,
    max_tile: 48,
};

const fn profile_for(mode: LayoutMode) -> SizingProfile {
    match mode {
        LayoutMode::Compact => COMPACT_PROFILE,
        LayoutMode::Standard => STANDARD_PROFILE,
    }
}

/// Computes the tile side length for the provided viewport and layout mode.
///
/// Degenerate viewports (zero or negative on either axis) clamp to the
/// profile's lower bound rather than producing a zero or negative tile size.
#[must_use]
pub fn compute_tile_size(viewport: Viewport, mode: LayoutMode) -> u32 {
    let profile = profile_for(mode);

    let per_width = axis_fit(viewport.width(), profile.target_columns);
    let per_height = axis_fit(viewport.height(), profile.target_rows);

    per_width
        .min(per_height)
        .clamp(profile.min_tile, profile.max_tile)
}

/// Minimum grid dimensions for the provided layout mode, `(columns, rows)`.
#[must_use]
pub const fn minimum_grid(mode: LayoutMode) -> (u32, u32) {
    match mode {
        LayoutMode::Compact => (15, 11),
        LayoutMode::Standard => (21, 15),
    }
}

fn axis_fit(extent: f32, target_tiles: u32) -> u32 {
    if !extent.is_finite() || extent <= 0.0 || target_tiles == 0 {
        return 0;
    }
    (extent / target_tiles as f32).floor() as u32
}

/// Outcome of comparing a freshly computed tile size against the current one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeAction {
    /// Discard the session and rebuild with the new tile size.
    Rebuild,
    /// Keep the maze; rescale the render surface to the new viewport.
    Rescale,
}

/// Decides whether a viewport change warrants a full session rebuild.
#[must_use]
pub fn resize_action(current_tile_size: u32, next_tile_size: u32) -> ResizeAction {
    if current_tile_size.abs_diff(next_tile_size) > REBUILD_THRESHOLD_PX {
        ResizeAction::Rebuild
    } else {
        ResizeAction::Rescale
    }
}
