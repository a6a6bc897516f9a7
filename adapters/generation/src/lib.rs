#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Concrete maze generator backing the [`MazeGenerator`] seam.
//!
//! Carves a perfect maze with an iterative backtracker over the odd cell
//! lattice, opens a few rooms on top of it, and converts a handful of
//! wall connectors into door tiles. The output honours the generator
//! contract: walled perimeter, at least two floor tiles, and a single
//! connected open region.

use maze_wander_core::{GenerationError, MazeBlueprint, MazeGenerator, MazeRequest, TileKind};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const MIN_COLUMNS: u32 = 15;
const MIN_ROWS: u32 = 11;
const ROOM_ATTEMPTS: u32 = 4;
const EXTRA_DOORS: usize = 2;

/// Seeded dungeon generator producing wall, floor and door tiles.
#[derive(Clone, Debug)]
pub struct DungeonGenerator {
    rng: ChaCha8Rng,
}

impl DungeonGenerator {
    /// Creates a generator with a fixed seed for reproducible mazes.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from the thread-local entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::seeded(rand::random())
    }
}

impl MazeGenerator for DungeonGenerator {
    fn generate(&mut self, request: MazeRequest) -> Result<MazeBlueprint, GenerationError> {
        let columns = request.columns();
        let rows = request.rows();

        if columns % 2 == 0 || rows % 2 == 0 {
            return Err(GenerationError::EvenDimensions { columns, rows });
        }
        if columns < MIN_COLUMNS || rows < MIN_ROWS {
            return Err(GenerationError::BelowMinimum { columns, rows });
        }

        let width = columns as usize;
        let height = rows as usize;
        let mut tiles = vec![vec![TileKind::Wall; height]; width];

        carve_corridors(&mut tiles, &mut self.rng);
        let rooms = carve_rooms(&mut tiles, &mut self.rng);
        place_doors(&mut tiles, rooms, &mut self.rng);

        Ok(MazeBlueprint::new(columns, rows, tiles))
    }
}

/// Iterative backtracker over the odd lattice; every odd cell becomes floor.
fn carve_corridors(tiles: &mut [Vec<TileKind>], rng: &mut ChaCha8Rng) {
    let node_columns = (tiles.len() - 1) / 2;
    let node_rows = (tiles[0].len() - 1) / 2;
    let node_index = |column: usize, row: usize| column * node_rows + row;

    let mut visited = vec![false; node_columns * node_rows];
    let mut stack = vec![(0usize, 0usize)];
    visited[0] = true;
    tiles[1][1] = TileKind::Floor;

    while let Some(&(column, row)) = stack.last() {
        let mut candidates: Vec<(usize, usize)> = Vec::with_capacity(4);
        if column > 0 && !visited[node_index(column - 1, row)] {
            candidates.push((column - 1, row));
        }
        if row > 0 && !visited[node_index(column, row - 1)] {
            candidates.push((column, row - 1));
        }
        if column + 1 < node_columns && !visited[node_index(column + 1, row)] {
            candidates.push((column + 1, row));
        }
        if row + 1 < node_rows && !visited[node_index(column, row + 1)] {
            candidates.push((column, row + 1));
        }

        if candidates.is_empty() {
            let _ = stack.pop();
            continue;
        }

        let (next_column, next_row) = candidates[rng.gen_range(0..candidates.len())];
        // Open the wall between the two lattice nodes, then the node itself.
        let wall_x = 1 + column + next_column;
        let wall_y = 1 + row + next_row;
        tiles[wall_x][wall_y] = TileKind::Floor;
        tiles[2 * next_column + 1][2 * next_row + 1] = TileKind::Floor;

        visited[node_index(next_column, next_row)] = true;
        stack.push((next_column, next_row));
    }
}

/// Opens a few odd-aligned rectangular rooms; returns how many were placed.
fn carve_rooms(tiles: &mut [Vec<TileKind>], rng: &mut ChaCha8Rng) -> usize {
    let width = tiles.len();
    let height = tiles[0].len();
    let mut placed = 0;

    for _ in 0..ROOM_ATTEMPTS {
        let room_width = 2 * rng.gen_range(1..=2) + 1;
        let room_height = 2 * rng.gen_range(1..=2) + 1;
        if width < room_width + 2 || height < room_height + 2 {
            continue;
        }

        let max_x_slot = (width - room_width - 2) / 2;
        let max_y_slot = (height - room_height - 2) / 2;
        let x0 = 2 * rng.gen_range(0..=max_x_slot) + 1;
        let y0 = 2 * rng.gen_range(0..=max_y_slot) + 1;

        for column in tiles.iter_mut().skip(x0).take(room_width) {
            for tile in column.iter_mut().skip(y0).take(room_height) {
                *tile = TileKind::Floor;
            }
        }
        placed += 1;
    }

    placed
}

/// Converts a handful of floor-to-floor wall connectors into door tiles.
///
/// Connectors are interior walls with open tiles on exactly one opposing
/// axis, so every door joins two already-open regions and connectivity is
/// only ever improved.
fn place_doors(tiles: &mut [Vec<TileKind>], rooms: usize, rng: &mut ChaCha8Rng) {
    let width = tiles.len();
    let height = tiles[0].len();

    let mut connectors: Vec<(usize, usize)> = Vec::new();
    for x in 1..width - 1 {
        for y in 1..height - 1 {
            if tiles[x][y] != TileKind::Wall {
                continue;
            }
            let vertical = tiles[x][y - 1] == TileKind::Floor && tiles[x][y + 1] == TileKind::Floor;
            let horizontal =
                tiles[x - 1][y] == TileKind::Floor && tiles[x + 1][y] == TileKind::Floor;
            if vertical != horizontal {
                connectors.push((x, y));
            }
        }
    }

    connectors.shuffle(rng);
    for &(x, y) in connectors.iter().take(rooms + EXTRA_DOORS) {
        tiles[x][y] = TileKind::Door;
    }
}
