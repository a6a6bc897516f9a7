use maze_wander_core::{Direction, GridCoord, PixelPosition, TileGrid, TileKind};
use maze_wander_system_movement::step;

const TILE: u32 = 32;

/// 3x3 grid with a floor cross and walled corners:
///
/// ```text
/// W F W
/// F F D
/// W X W   (X = finish)
/// ```
fn cross_grid() -> TileGrid {
    TileGrid::from_columns(vec![
        vec![TileKind::Wall, TileKind::Floor, TileKind::Wall],
        vec![TileKind::Floor, TileKind::Floor, TileKind::Finish],
        vec![TileKind::Wall, TileKind::Door, TileKind::Wall],
    ])
    .expect("rectangular grid")
}

fn at(column: u32, row: u32) -> PixelPosition {
    GridCoord::new(column, row).to_pixels(TILE)
}

#[test]
fn accepted_step_moves_exactly_one_tile_on_one_axis() {
    let grid = cross_grid();
    let origin = at(1, 1);

    for (direction, expected) in [
        (Direction::Left, at(0, 1)),
        (Direction::Up, at(1, 0)),
        (Direction::Right, at(2, 1)),
        (Direction::Down, at(1, 2)),
    ] {
        let outcome = step(&grid, TILE, origin, direction);
        assert!(outcome.accepted, "{direction:?} into open tile must succeed");
        assert_eq!(outcome.position, expected);

        let dx = outcome.position.x().abs_diff(origin.x());
        let dy = outcome.position.y().abs_diff(origin.y());
        assert_eq!(dx + dy, TILE, "displacement must be one tile on one axis");
    }
}

#[test]
fn wall_rejection_leaves_position_unchanged() {
    let grid = cross_grid();
    let origin = at(0, 1);

    let outcome = step(&grid, TILE, origin, Direction::Up);
    assert!(!outcome.accepted);
    assert_eq!(outcome.position, origin);
    assert!(!outcome.reached_goal);
}

#[test]
fn rejected_steps_are_idempotent() {
    let grid = cross_grid();
    let origin = at(0, 1);

    let first = step(&grid, TILE, origin, Direction::Up);
    let second = step(&grid, TILE, first.position, Direction::Up);
    assert_eq!(first, second, "repeating a rejected step must not diverge");
}

#[test]
fn out_of_bounds_steps_are_rejected() {
    let grid = cross_grid();

    let west_edge = at(0, 1);
    assert!(!step(&grid, TILE, west_edge, Direction::Left).accepted);

    let east_edge = at(2, 1);
    assert!(!step(&grid, TILE, east_edge, Direction::Right).accepted);

    let north_edge = at(1, 0);
    assert!(!step(&grid, TILE, north_edge, Direction::Up).accepted);

    let south_edge = at(1, 2);
    assert!(!step(&grid, TILE, south_edge, Direction::Down).accepted);
}

#[test]
fn doors_are_enterable() {
    let grid = cross_grid();
    let outcome = step(&grid, TILE, at(1, 1), Direction::Right);
    assert!(outcome.accepted);
    assert!(!outcome.reached_goal);
}

#[test]
fn entering_the_finish_tile_reports_the_goal() {
    let grid = cross_grid();
    let outcome = step(&grid, TILE, at(1, 1), Direction::Down);

    assert!(outcome.accepted);
    assert_eq!(outcome.position, at(1, 2));
    assert!(outcome.reached_goal);
}

#[test]
fn zero_tile_size_rejects_without_panicking() {
    let grid = cross_grid();
    let origin = PixelPosition::new(0, 0);
    let outcome = step(&grid, 0, origin, Direction::Right);
    assert!(!outcome.accepted);
    assert_eq!(outcome.position, origin);
}
