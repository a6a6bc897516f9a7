use glam::Vec2;
use maze_wander_core::Direction;
use maze_wander_rendering::swipe_direction;

/// Height reserved for the on-screen control panel at the bottom of the window.
pub(crate) const PANEL_HEIGHT: f32 = 96.0;

const BUTTON_SIZE: f32 = 40.0;
const BUTTON_GAP: f32 = 4.0;
const PANEL_MARGIN: f32 = 8.0;

/// Action requested through the on-screen control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ControlAction {
    /// Step the avatar one tile in the given direction.
    Step(Direction),
    /// Discard the current maze and build a fresh one.
    Regenerate,
}

impl ControlAction {
    /// Short label drawn on the button face.
    #[must_use]
    pub(crate) const fn label(self) -> &'static str {
        match self {
            Self::Step(Direction::Left) => "<",
            Self::Step(Direction::Up) => "^",
            Self::Step(Direction::Right) => ">",
            Self::Step(Direction::Down) => "v",
            Self::Regenerate => "new maze",
        }
    }
}

/// Axis-aligned button rectangle in screen pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Button {
    /// Action triggered when the button is pressed.
    pub(crate) action: ControlAction,
    /// Left edge in screen pixels.
    pub(crate) x: f32,
    /// Top edge in screen pixels.
    pub(crate) y: f32,
    /// Width in screen pixels.
    pub(crate) width: f32,
    /// Height in screen pixels.
    pub(crate) height: f32,
}

impl Button {
    /// Returns whether the point lies inside the button rectangle.
    #[must_use]
    pub(crate) fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }
}

/// Lays out the directional pad and the regenerate button inside the panel.
///
/// The pad hugs the left edge in a plus arrangement; the regenerate button
/// fills the remaining right side of the panel.
#[must_use]
pub(crate) fn panel_buttons(screen_width: f32, screen_height: f32) -> Vec<Button> {
    let panel_top = (screen_height - PANEL_HEIGHT).max(0.0);
    let cell = |column: f32, row: f32| {
        (
            PANEL_MARGIN + column * (BUTTON_SIZE + BUTTON_GAP),
            panel_top + PANEL_MARGIN + row * (BUTTON_SIZE + BUTTON_GAP),
        )
    };

    let mut buttons = Vec::with_capacity(5);
    for (action, column, row) in [
        (ControlAction::Step(Direction::Up), 1.0, 0.0),
        (ControlAction::Step(Direction::Left), 0.0, 1.0),
        (ControlAction::Step(Direction::Down), 1.0, 1.0),
        (ControlAction::Step(Direction::Right), 2.0, 1.0),
    ] {
        let (x, y) = cell(column, row);
        buttons.push(Button {
            action,
            x,
            y,
            width: BUTTON_SIZE,
            height: BUTTON_SIZE,
        });
    }

    let pad_right = PANEL_MARGIN + 3.0 * (BUTTON_SIZE + BUTTON_GAP);
    let regenerate_width = (screen_width - pad_right - PANEL_MARGIN).max(BUTTON_SIZE);
    buttons.push(Button {
        action: ControlAction::Regenerate,
        x: pad_right,
        y: panel_top + PANEL_MARGIN,
        width: regenerate_width,
        height: PANEL_HEIGHT - 2.0 * PANEL_MARGIN,
    });

    buttons
}

/// Resolves a click position to the button it landed on, if any.
#[must_use]
pub(crate) fn hit_test(buttons: &[Button], point: Vec2) -> Option<ControlAction> {
    buttons
        .iter()
        .find(|button| button.contains(point))
        .map(|button| button.action)
}

/// Tracks an in-flight touch or mouse drag and resolves it into a swipe.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct SwipeTracker {
    origin: Option<Vec2>,
}

impl SwipeTracker {
    /// Records where the gesture began.
    pub(crate) fn press(&mut self, position: Vec2) {
        self.origin = Some(position);
    }

    /// Ends the gesture and resolves it into a step direction, if long enough.
    pub(crate) fn release(&mut self, position: Vec2, min_distance: f32) -> Option<Direction> {
        let origin = self.origin.take()?;
        swipe_direction(position - origin, min_distance)
    }

    /// Abandons the gesture without resolving it.
    pub(crate) fn cancel(&mut self) {
        self.origin = None;
    }

    /// Returns whether a gesture is currently in flight.
    #[must_use]
    #[allow(dead_code)]
    pub(crate) fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_stay_inside_the_panel() {
        let buttons = panel_buttons(800.0, 600.0);
        let panel_top = 600.0 - PANEL_HEIGHT;

        assert_eq!(buttons.len(), 5);
        for button in &buttons {
            assert!(button.y >= panel_top, "{:?} above the panel", button.action);
            assert!(
                button.y + button.height <= 600.0,
                "{:?} spills below the window",
                button.action,
            );
            assert!(button.x >= 0.0 && button.x + button.width <= 800.0);
        }
    }

    #[test]
    fn buttons_do_not_overlap() {
        let buttons = panel_buttons(800.0, 600.0);
        for (index, button) in buttons.iter().enumerate() {
            for other in &buttons[index + 1..] {
                let separated = button.x + button.width <= other.x
                    || other.x + other.width <= button.x
                    || button.y + button.height <= other.y
                    || other.y + other.height <= button.y;
                assert!(
                    separated,
                    "{:?} overlaps {:?}",
                    button.action, other.action,
                );
            }
        }
    }

    #[test]
    fn hits_resolve_to_the_pressed_button() {
        let buttons = panel_buttons(800.0, 600.0);
        let up = buttons
            .iter()
            .find(|button| button.action == ControlAction::Step(Direction::Up))
            .expect("pad has an up button");
        let center = Vec2::new(up.x + up.width * 0.5, up.y + up.height * 0.5);

        assert_eq!(
            hit_test(&buttons, center),
            Some(ControlAction::Step(Direction::Up))
        );
    }

    #[test]
    fn misses_resolve_to_no_action() {
        let buttons = panel_buttons(800.0, 600.0);

        assert_eq!(hit_test(&buttons, Vec2::new(400.0, 10.0)), None);
    }

    #[test]
    fn swipes_resolve_on_release_only() {
        let mut tracker = SwipeTracker::default();
        tracker.press(Vec2::new(100.0, 100.0));
        assert!(tracker.is_tracking());

        let direction = tracker.release(Vec2::new(160.0, 108.0), 30.0);
        assert_eq!(direction, Some(Direction::Right));
        assert!(!tracker.is_tracking(), "release consumes the gesture");
    }

    #[test]
    fn cancelled_gestures_never_step() {
        let mut tracker = SwipeTracker::default();
        tracker.press(Vec2::new(100.0, 100.0));
        tracker.cancel();

        assert_eq!(tracker.release(Vec2::new(400.0, 100.0), 30.0), None);
    }
}
