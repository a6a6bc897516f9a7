#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Maze Wander.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.

mod controls;
mod sprites;

use self::controls::{hit_test, panel_buttons, Button, ControlAction, SwipeTracker, PANEL_HEIGHT};
use self::sprites::SpriteAtlas;
use anyhow::Result;
use glam::Vec2;
use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position, touches,
    KeyCode, MouseButton, TouchPhase,
};
use maze_wander_core::{Direction, Viewport};
use maze_wander_rendering::{
    Color, FrameInput, Presentation, RenderingBackend, Scene, SpriteKind,
};
use std::{path::PathBuf, time::Duration};

const DEFAULT_SWIPE_MIN_DISTANCE: f32 = 30.0;

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    swipe_min_distance: f32,
    asset_dir: PathBuf,
    load_sprites: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            swipe_min_distance: DEFAULT_SWIPE_MIN_DISTANCE,
            asset_dir: SpriteAtlas::default_asset_dir(),
            load_sprites: true,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Configures the minimum swipe travel required to register a step.
    #[must_use]
    pub fn with_swipe_min_distance(mut self, distance: f32) -> Self {
        self.swipe_min_distance = distance.max(0.0);
        self
    }

    /// Configures the directory sprite textures are loaded from.
    #[must_use]
    pub fn with_asset_dir(mut self, dir: PathBuf) -> Self {
        self.asset_dir = dir;
        self
    }

    /// Configures whether the backend should attempt to load sprite assets.
    #[must_use]
    pub fn with_sprite_loading(mut self, enabled: bool) -> Self {
        self.load_sprites = enabled;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            swipe_min_distance,
            asset_dir,
            load_sprites,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 1024,
            window_height: 768,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let sprite_atlas = if load_sprites {
                SpriteAtlas::load_from_dir(&asset_dir)
            } else {
                SpriteAtlas::empty()
            };

            let background = to_macroquad_color(clear_color);
            let mut swipe = SwipeTracker::default();
            let mut fps_counter = FpsCounter::default();

            loop {
                if is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q) {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();
                let buttons = panel_buttons(screen_width, screen_height);

                let frame_input = gather_frame_input(
                    &buttons,
                    &mut swipe,
                    swipe_min_distance,
                    screen_width,
                    screen_height,
                );

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                update_scene(frame_dt, frame_input, &mut scene);

                draw_scene(
                    &scene,
                    &sprite_atlas,
                    screen_width,
                    (screen_height - PANEL_HEIGHT).max(0.0),
                );
                draw_control_panel(&buttons, screen_width, screen_height);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Clone, Copy, Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once a second elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

fn gather_frame_input(
    buttons: &[Button],
    swipe: &mut SwipeTracker,
    swipe_min_distance: f32,
    screen_width: f32,
    screen_height: f32,
) -> FrameInput {
    let mut step = None;
    let mut regenerate = false;

    let (mouse_x, mouse_y) = mouse_position();
    let mouse = Vec2::new(mouse_x, mouse_y);

    // A press on a panel button fires its action; anywhere else it begins a
    // potential swipe gesture.
    if is_mouse_button_pressed(MouseButton::Left) {
        match hit_test(buttons, mouse) {
            Some(ControlAction::Step(direction)) => step = Some(direction),
            Some(ControlAction::Regenerate) => regenerate = true,
            None => swipe.press(mouse),
        }
    }
    if is_mouse_button_released(MouseButton::Left) {
        if let Some(direction) = swipe.release(mouse, swipe_min_distance) {
            step = step.or(Some(direction));
        }
    }

    for touch in touches() {
        let position = Vec2::new(touch.position.x, touch.position.y);
        match touch.phase {
            TouchPhase::Started => match hit_test(buttons, position) {
                Some(ControlAction::Step(direction)) => step = Some(direction),
                Some(ControlAction::Regenerate) => regenerate = true,
                None => swipe.press(position),
            },
            TouchPhase::Ended => {
                if let Some(direction) = swipe.release(position, swipe_min_distance) {
                    step = step.or(Some(direction));
                }
            }
            TouchPhase::Cancelled => swipe.cancel(),
            TouchPhase::Moved | TouchPhase::Stationary => {}
        }
    }

    if step.is_none() {
        step = keyboard_step();
    }
    regenerate = regenerate || is_key_pressed(KeyCode::R);

    FrameInput {
        step,
        regenerate,
        viewport: Viewport::new(screen_width, (screen_height - PANEL_HEIGHT).max(0.0)),
    }
}

/// Edge-triggered arrow and WASD polling; one step per physical key press.
fn keyboard_step() -> Option<Direction> {
    if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
        Some(Direction::Left)
    } else if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
        Some(Direction::Up)
    } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
        Some(Direction::Right)
    } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
        Some(Direction::Down)
    } else {
        None
    }
}

fn draw_scene(scene: &Scene, atlas: &SpriteAtlas, available_width: f32, available_height: f32) {
    let tile_grid = scene.tile_grid;
    if tile_grid.tile_size == 0 || tile_grid.columns == 0 || tile_grid.rows == 0 {
        return;
    }

    let scale = scene.surface_scale.max(0.0);
    let tile_step = tile_grid.tile_size as f32 * scale;
    if tile_step <= f32::EPSILON {
        return;
    }

    let surface_width = tile_grid.columns as f32 * tile_step;
    let surface_height = tile_grid.rows as f32 * tile_step;
    let offset_x = ((available_width - surface_width) * 0.5).max(0.0);
    let offset_y = ((available_height - surface_height) * 0.5).max(0.0);

    for placement in &scene.placements {
        let x = offset_x + placement.cell.column() as f32 * tile_step;
        let y = offset_y + placement.cell.row() as f32 * tile_step;
        draw_sprite(atlas, placement.sprite, x, y, tile_step);
    }

    if let Some(avatar) = scene.avatar {
        let x = offset_x + avatar.position.x() as f32 * scale;
        let y = offset_y + avatar.position.y() as f32 * scale;
        draw_sprite(atlas, SpriteKind::Knight, x, y, tile_step);
    }
}

/// Sprites without a loaded texture are skipped; the load failure was
/// already reported when the atlas was built.
fn draw_sprite(atlas: &SpriteAtlas, kind: SpriteKind, x: f32, y: f32, size: f32) {
    let Some(texture) = atlas.texture(kind) else {
        return;
    };

    macroquad::texture::draw_texture_ex(
        texture,
        x,
        y,
        macroquad::color::WHITE,
        macroquad::texture::DrawTextureParams {
            dest_size: Some(macroquad::math::Vec2::new(size, size)),
            ..macroquad::texture::DrawTextureParams::default()
        },
    );
}

fn draw_control_panel(buttons: &[Button], screen_width: f32, screen_height: f32) {
    let panel_top = (screen_height - PANEL_HEIGHT).max(0.0);
    let panel_color = to_macroquad_color(Color::from_rgb_u8(30, 30, 36));
    macroquad::shapes::draw_rectangle(0.0, panel_top, screen_width, PANEL_HEIGHT, panel_color);

    let (mouse_x, mouse_y) = mouse_position();
    let mouse = Vec2::new(mouse_x, mouse_y);
    let base = Color::from_rgb_u8(58, 58, 70);
    let text_color = to_macroquad_color(Color::from_rgb_u8(220, 220, 220));

    for button in buttons {
        let fill = if button.contains(mouse) {
            base.lighten(0.25)
        } else {
            base
        };
        macroquad::shapes::draw_rectangle(
            button.x,
            button.y,
            button.width,
            button.height,
            to_macroquad_color(fill),
        );
        macroquad::shapes::draw_rectangle_lines(
            button.x,
            button.y,
            button.width,
            button.height,
            1.0,
            to_macroquad_color(base.lighten(0.5)),
        );

        let label = button.action.label();
        let _ = macroquad::text::draw_text(
            label,
            button.x + 12.0,
            button.y + button.height * 0.5 + 6.0,
            20.0,
            text_color,
        );
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
