#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement validation for the avatar.
//!
//! [`step`] computes the candidate cell one tile away, checks grid bounds and
//! the destination tile's kind, and reports the outcome. Rejections are
//! ordinary results rather than errors, and the function never mutates or
//! schedules anything; sequencing the post-goal rebuild belongs to the caller.

use maze_wander_core::{Direction, PixelPosition, TileGrid, TileKind};

/// Result of a single attempted avatar step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Whether the step was accepted.
    pub accepted: bool,
    /// Avatar pixel anchor after the attempt; unchanged on rejection.
    pub position: PixelPosition,
    /// Whether the accepted step landed on the finish tile.
    pub reached_goal: bool,
}

impl StepOutcome {
    const fn rejected(position: PixelPosition) -> Self {
        Self {
            accepted: false,
            position,
            reached_goal: false,
        }
    }

    const fn accepted(position: PixelPosition, reached_goal: bool) -> Self {
        Self {
            accepted: true,
            position,
            reached_goal,
        }
    }
}

/// Validates a single-tile step from `position` in `direction`.
///
/// A pure function of its inputs: repeating a rejected step against an
/// unchanged grid yields the identical rejection.
#[must_use]
pub fn step(
    grid: &TileGrid,
    tile_size: u32,
    position: PixelPosition,
    direction: Direction,
) -> StepOutcome {
    let Some(candidate) = position.stepped(direction, tile_size) else {
        return StepOutcome::rejected(position);
    };

    let Some(cell) = candidate.to_cell(tile_size) else {
        return StepOutcome::rejected(position);
    };

    match grid.kind_at(cell) {
        Some(kind) if kind.is_walkable() => {
            StepOutcome::accepted(candidate, kind == TileKind::Finish)
        }
        // Wall or out of bounds.
        _ => StepOutcome::rejected(position),
    }
}
