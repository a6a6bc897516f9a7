use std::{mem, time::Duration};

use maze_wander_core::{Command, Event, LayoutMode, MazeGenerator, Viewport};
use maze_wander_rendering::{
    AvatarPresentation, FrameInput, Scene, SpriteKind, TileGridPresentation, TilePlacement,
};
use maze_wander_system_grid_builder::GridBuilder;
use maze_wander_system_layout::{compute_tile_size, resize_action, ResizeAction};
use maze_wander_world::{apply, query, World};

use crate::config::Config;

/// Deferred rebuild scheduled by a goal arrival or a viewport change.
///
/// At most one rebuild is ever pending; a newer trigger replaces the older
/// one rather than queueing behind it.
#[derive(Clone, Copy, Debug, PartialEq)]
enum PendingRebuild {
    None,
    GoalPause {
        remaining: Duration,
    },
    ResizeSettle {
        remaining: Duration,
        viewport: Viewport,
    },
}

/// Per-frame glue between the rendering backend and the world.
///
/// Owns the world, the grid builder and the generator, translates frame
/// input into commands, and folds the resulting events back into the scene.
pub(crate) struct FrameDriver {
    world: World,
    builder: GridBuilder,
    generator: Box<dyn MazeGenerator>,
    mode: LayoutMode,
    viewport: Viewport,
    tile_size: u32,
    goal_pause: Duration,
    resize_debounce: Duration,
    pending: PendingRebuild,
    halted: bool,
    events: Vec<Event>,
}

impl FrameDriver {
    pub(crate) fn new(
        config: &Config,
        mode: LayoutMode,
        generator: Box<dyn MazeGenerator>,
    ) -> Self {
        Self {
            world: World::new(),
            builder: GridBuilder::default().with_max_attempts(config.generation_attempts),
            generator,
            mode,
            viewport: Viewport::default(),
            tile_size: 0,
            goal_pause: config.goal_pause(),
            resize_debounce: config.resize_debounce(),
            pending: PendingRebuild::None,
            halted: false,
            events: Vec::new(),
        }
    }

    /// Advances the driver by one frame.
    pub(crate) fn frame(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        if input.regenerate {
            self.halted = false;
            self.pending = PendingRebuild::None;
            self.viewport = input.viewport;
            self.rebuild(scene);
            return;
        }

        if !query::has_session(&self.world) {
            if !self.halted {
                self.viewport = input.viewport;
                self.rebuild(scene);
            }
            return;
        }

        if input.viewport != self.viewport {
            self.viewport = input.viewport;
            // A goal pause already rebuilds against the latest viewport.
            if !matches!(self.pending, PendingRebuild::GoalPause { .. }) {
                self.pending = PendingRebuild::ResizeSettle {
                    remaining: self.resize_debounce,
                    viewport: input.viewport,
                };
            }
        }

        self.tick(dt, scene);

        if let Some(direction) = input.step {
            if !matches!(self.pending, PendingRebuild::GoalPause { .. }) {
                apply(
                    &mut self.world,
                    Command::StepAvatar { direction },
                    &mut self.events,
                );
                self.absorb_events(scene);
            }
        }
    }

    fn tick(&mut self, dt: Duration, scene: &mut Scene) {
        match mem::replace(&mut self.pending, PendingRebuild::None) {
            PendingRebuild::None => {}
            PendingRebuild::GoalPause { remaining } => match remaining.checked_sub(dt) {
                Some(left) if !left.is_zero() => {
                    self.pending = PendingRebuild::GoalPause { remaining: left };
                }
                _ => self.rebuild(scene),
            },
            PendingRebuild::ResizeSettle {
                remaining,
                viewport,
            } => match remaining.checked_sub(dt) {
                Some(left) if !left.is_zero() => {
                    self.pending = PendingRebuild::ResizeSettle {
                        remaining: left,
                        viewport,
                    };
                }
                _ => self.settle_resize(viewport, scene),
            },
        }
    }

    fn settle_resize(&mut self, viewport: Viewport, scene: &mut Scene) {
        let desired = compute_tile_size(viewport, self.mode);
        match resize_action(self.tile_size, desired) {
            ResizeAction::Rescale => {
                if self.tile_size > 0 {
                    scene.surface_scale = desired as f32 / self.tile_size as f32;
                }
            }
            ResizeAction::Rebuild => self.rebuild(scene),
        }
    }

    fn rebuild(&mut self, scene: &mut Scene) {
        match self
            .builder
            .build(self.viewport, self.mode, self.generator.as_mut())
        {
            Ok(blueprint) => {
                apply(
                    &mut self.world,
                    Command::InstallSession { blueprint },
                    &mut self.events,
                );
            }
            Err(error) => {
                log::error!("maze build failed: {error}");
                self.halted = true;
                apply(&mut self.world, Command::ClearSession, &mut self.events);
            }
        }
        self.absorb_events(scene);
    }

    fn absorb_events(&mut self, scene: &mut Scene) {
        for event in self.events.drain(..) {
            match event {
                Event::SessionInstalled {
                    columns,
                    rows,
                    tile_size,
                    avatar,
                    placements,
                } => {
                    self.tile_size = tile_size;
                    scene.tile_grid = TileGridPresentation::new(columns, rows, tile_size);
                    scene.placements = placements
                        .into_iter()
                        .map(|placement| {
                            TilePlacement::new(SpriteKind::from(placement.kind), placement.cell)
                        })
                        .collect();
                    scene.avatar = Some(AvatarPresentation::new(avatar));
                    scene.surface_scale = 1.0;
                }
                Event::AvatarMoved { to, .. } => {
                    scene.avatar = Some(AvatarPresentation::new(to));
                }
                Event::GoalReached { cell } => {
                    log::info!(
                        "goal reached at column {}, row {}",
                        cell.column(),
                        cell.row()
                    );
                    self.pending = PendingRebuild::GoalPause {
                        remaining: self.goal_pause,
                    };
                }
                Event::SessionCleared => {
                    *scene = Scene::empty();
                    self.tile_size = 0;
                }
            }
        }
    }
}
