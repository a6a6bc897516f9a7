#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Maze Wander.
//!
//! The world owns at most one live [`Session`] at a time. Adapters submit
//! [`Command`] values through [`apply`], which mutates the session
//! deterministically and broadcasts [`Event`] values for the rendering
//! collaborator and frame driver to react to. A failed build never touches
//! the world: the previous session either survives intact or is explicitly
//! cleared to the "no session" state.

use maze_wander_core::{
    Command, Event, GridCoord, PixelPosition, SessionBlueprint, TileGrid, TileKind,
};
use maze_wander_system_movement::step;

/// Aggregate state of one playable maze run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    grid: TileGrid,
    tile_size: u32,
    avatar: PixelPosition,
    goal: GridCoord,
}

impl Session {
    fn from_blueprint(blueprint: SessionBlueprint) -> Self {
        let avatar = blueprint.start.to_pixels(blueprint.tile_size);
        Self {
            grid: blueprint.grid,
            tile_size: blueprint.tile_size,
            avatar,
            goal: blueprint.goal,
        }
    }

    /// Tile grid owned by this session.
    #[must_use]
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Tile side length in device pixels.
    #[must_use]
    pub const fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Current avatar pixel anchor, always a multiple of the tile size.
    #[must_use]
    pub const fn avatar(&self) -> PixelPosition {
        self.avatar
    }

    /// Cell holding the single finish tile.
    #[must_use]
    pub const fn goal(&self) -> GridCoord {
        self.goal
    }

    /// Grid cell currently occupied by the avatar.
    #[must_use]
    pub fn avatar_cell(&self) -> Option<GridCoord> {
        self.avatar.to_cell(self.tile_size)
    }
}

/// Represents the authoritative Maze Wander world state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct World {
    session: Option<Session>,
}

impl World {
    /// Creates a world with no live session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::InstallSession { blueprint } => {
            let columns = blueprint.grid.columns();
            let rows = blueprint.grid.rows();
            let tile_size = blueprint.tile_size;
            let placements = blueprint.placements.clone();
            let session = Session::from_blueprint(blueprint);
            let avatar = session.avatar();
            world.session = Some(session);
            out_events.push(Event::SessionInstalled {
                columns,
                rows,
                tile_size,
                avatar,
                placements,
            });
        }
        Command::StepAvatar { direction } => {
            let Some(session) = world.session.as_mut() else {
                return;
            };

            let outcome = step(&session.grid, session.tile_size, session.avatar, direction);
            if !outcome.accepted {
                // Rejected moves are silent no-ops, not errors.
                return;
            }

            let from = session.avatar;
            session.avatar = outcome.position;
            out_events.push(Event::AvatarMoved {
                from,
                to: outcome.position,
            });

            if outcome.reached_goal {
                let cell = session.goal;
                out_events.push(Event::GoalReached { cell });
            }
        }
        Command::ClearSession => {
            if world.session.take().is_some() {
                out_events.push(Event::SessionCleared);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Session, World};

    /// Provides read-only access to the live session, if any.
    #[must_use]
    pub fn session(world: &World) -> Option<&Session> {
        world.session.as_ref()
    }

    /// Reports whether a session is currently live.
    #[must_use]
    pub fn has_session(world: &World) -> bool {
        world.session.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_wander_core::{Direction, Placement, PlacementKind};

    /// 3x3 session: floors along the top row, finish in the far corner.
    ///
    /// ```text
    /// F F F
    /// W W F
    /// W W X
    /// ```
    fn blueprint() -> SessionBlueprint {
        let mut grid = TileGrid::from_columns(vec![
            vec![TileKind::Floor, TileKind::Wall, TileKind::Wall],
            vec![TileKind::Floor, TileKind::Wall, TileKind::Wall],
            vec![TileKind::Floor, TileKind::Floor, TileKind::Floor],
        ])
        .expect("rectangular grid");
        let goal = GridCoord::new(2, 2);
        assert!(grid.set_kind(goal, TileKind::Finish));

        let start = GridCoord::new(0, 0);
        let placements = vec![
            Placement::new(PlacementKind::Finish, goal),
            Placement::new(PlacementKind::Avatar, start),
        ];
        SessionBlueprint::new(grid, 32, start, goal, placements)
    }

    fn installed_world() -> (World, Vec<Event>) {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::InstallSession {
                blueprint: blueprint(),
            },
            &mut events,
        );
        (world, events)
    }

    #[test]
    fn install_replaces_the_session_and_announces_placements() {
        let (world, events) = installed_world();

        let session = query::session(&world).expect("session installed");
        assert_eq!(session.avatar(), PixelPosition::new(0, 0));
        assert_eq!(session.goal(), GridCoord::new(2, 2));
        assert_eq!(session.tile_size(), 32);

        assert_eq!(events.len(), 1);
        let Event::SessionInstalled {
            columns,
            rows,
            tile_size,
            avatar,
            placements,
        } = &events[0]
        else {
            panic!("expected SessionInstalled, got {:?}", events[0]);
        };
        assert_eq!((*columns, *rows, *tile_size), (3, 3, 32));
        assert_eq!(*avatar, PixelPosition::new(0, 0));
        assert_eq!(placements.len(), 2);
    }

    #[test]
    fn accepted_steps_move_the_avatar_and_emit_an_event() {
        let (mut world, _) = installed_world();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::StepAvatar {
                direction: Direction::Right,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::AvatarMoved {
                from: PixelPosition::new(0, 0),
                to: PixelPosition::new(32, 0),
            }]
        );
        let session = query::session(&world).expect("session live");
        assert_eq!(session.avatar(), PixelPosition::new(32, 0));
        assert_eq!(session.avatar_cell(), Some(GridCoord::new(1, 0)));
    }

    #[test]
    fn rejected_steps_leave_the_world_untouched_and_silent() {
        let (mut world, _) = installed_world();
        let before = world.clone();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::StepAvatar {
                direction: Direction::Down,
            },
            &mut events,
        );

        assert!(events.is_empty(), "rejections emit no events");
        assert_eq!(world, before, "rejections change no state");
    }

    #[test]
    fn reaching_the_finish_tile_reports_the_goal() {
        let (mut world, _) = installed_world();
        let mut events = Vec::new();

        for direction in [
            Direction::Right,
            Direction::Right,
            Direction::Down,
            Direction::Down,
        ] {
            apply(&mut world, Command::StepAvatar { direction }, &mut events);
        }

        assert_eq!(
            events.last(),
            Some(&Event::GoalReached {
                cell: GridCoord::new(2, 2),
            })
        );
        let moves = events
            .iter()
            .filter(|event| matches!(event, Event::AvatarMoved { .. }))
            .count();
        assert_eq!(moves, 4);
    }

    #[test]
    fn steps_without_a_session_are_ignored() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::StepAvatar {
                direction: Direction::Up,
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert!(!query::has_session(&world));
    }

    #[test]
    fn clear_session_reports_once() {
        let (mut world, _) = installed_world();
        let mut events = Vec::new();

        apply(&mut world, Command::ClearSession, &mut events);
        apply(&mut world, Command::ClearSession, &mut events);

        assert_eq!(events, vec![Event::SessionCleared]);
        assert!(!query::has_session(&world));
    }

    #[test]
    fn reinstalling_replaces_the_session_wholesale() {
        let (mut world, _) = installed_world();
        let mut events = Vec::new();

        // Move off the start, then install a fresh session.
        apply(
            &mut world,
            Command::StepAvatar {
                direction: Direction::Right,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::InstallSession {
                blueprint: blueprint(),
            },
            &mut events,
        );

        let session = query::session(&world).expect("session live");
        assert_eq!(
            session.avatar(),
            PixelPosition::new(0, 0),
            "a fresh install resets the avatar to the new start cell",
        );
    }
}
