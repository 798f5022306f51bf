//! Input simulation using `enigo`.

use crate::{PlatformError, PlatformResult};
use enigo::{Axis, Button, Coordinate, Direction, Enigo, Key, Keyboard, Mouse, Settings};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;
use winks_core::{InputResult, InputSimulator, Modifier, MouseButton, Rect, ScreenPoint};

/// One wheel notch in OS wheel units.
const WHEEL_DELTA: i32 = 120;

/// Real input simulator using `enigo` crate.
pub struct EnigoSimulator {
    enigo: Mutex<Enigo>,
}

impl EnigoSimulator {
    pub fn new() -> PlatformResult<Self> {
        let settings = Settings::default();
        let enigo = Enigo::new(&settings).map_err(|e| {
            PlatformError::InjectionFailed(format!("failed to create Enigo: {e}"))
        })?;
        Ok(Self {
            enigo: Mutex::new(enigo),
        })
    }

    fn lock(&self) -> PlatformResult<MutexGuard<'_, Enigo>> {
        self.enigo
            .lock()
            .map_err(|_| PlatformError::InjectionFailed("enigo lock poisoned".into()))
    }
}

fn injection_failed(e: impl std::fmt::Display) -> PlatformError {
    PlatformError::InjectionFailed(e.to_string())
}

/// Convert a raw wheel delta into enigo scroll notches.
///
/// Enigo scrolls down for positive lengths, the opposite of the wheel delta
/// sign. Any non-zero delta yields at least one notch.
fn wheel_notches(delta: i32) -> i32 {
    let notches = -(delta / WHEEL_DELTA);
    if notches == 0 && delta != 0 {
        -delta.signum()
    } else {
        notches
    }
}

fn button_to_enigo(button: MouseButton) -> Button {
    match button {
        MouseButton::Left => Button::Left,
        MouseButton::Right => Button::Right,
        MouseButton::Middle => Button::Middle,
    }
}

fn modifier_to_enigo(key: Modifier) -> Key {
    match key {
        Modifier::Shift => Key::Shift,
    }
}

fn press(down: bool) -> Direction {
    if down {
        Direction::Press
    } else {
        Direction::Release
    }
}

impl InputSimulator for EnigoSimulator {
    fn cursor_position(&self) -> InputResult<ScreenPoint> {
        let (x, y) = self.lock()?.location().map_err(injection_failed)?;
        Ok(ScreenPoint::new(x, y))
    }

    fn primary_work_area(&self) -> InputResult<Rect> {
        if let Some(area) = crate::primary_work_area() {
            return Ok(area);
        }
        let (width, height) = self.lock()?.main_display().map_err(injection_failed)?;
        Ok(Rect::new(0, 0, width, height))
    }

    fn move_cursor(&self, point: ScreenPoint) -> InputResult<()> {
        self.lock()?
            .move_mouse(point.x, point.y, Coordinate::Abs)
            .map_err(injection_failed)?;
        Ok(())
    }

    fn scroll_wheel(&self, delta: i32) -> InputResult<()> {
        let notches = wheel_notches(delta);
        debug!(delta, notches, "injecting wheel");
        if notches != 0 {
            self.lock()?
                .scroll(notches, Axis::Vertical)
                .map_err(injection_failed)?;
        }
        Ok(())
    }

    fn set_modifier(&self, key: Modifier, down: bool) -> InputResult<()> {
        debug!(?key, down, "injecting modifier");
        self.lock()?
            .key(modifier_to_enigo(key), press(down))
            .map_err(injection_failed)?;
        Ok(())
    }

    fn toggle_mouse_button(&self, button: MouseButton, down: bool) -> InputResult<()> {
        debug!(?button, down, "injecting button");
        self.lock()?
            .button(button_to_enigo(button), press(down))
            .map_err(injection_failed)?;
        Ok(())
    }
}
