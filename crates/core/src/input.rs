//! Pointer interaction state, independent of any event source.
//!
//! The host (browser glue, native window loop) forwards press, move and
//! release events here; the tracker turns them into the deltas and clip-space
//! drag descriptions consumed by the camera and the 2D scenes.

use glam::Vec2;

use crate::transform::viewport_to_clip;

/// Which manipulation a drag performs, selected by modifier keys held when
/// the button goes down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interactions {
    pub rotate: bool,
    pub scale: bool,
    pub translate: bool,
}

impl Interactions {
    /// Shift rotates, ctrl scales, alt translates.
    pub fn from_modifiers(shift: bool, ctrl: bool, alt: bool) -> Self {
        Self {
            rotate: shift,
            scale: ctrl,
            translate: alt,
        }
    }

    /// Packs the flags as bits: rotate 1, scale 2, translate 4.
    pub fn bits(self) -> u8 {
        u8::from(self.rotate) | (u8::from(self.scale) << 1) | (u8::from(self.translate) << 2)
    }
}

/// A drag expressed in clip space, from the press position to the current one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragInput {
    pub initial_clip: Vec2,
    pub current_clip: Vec2,
    pub interactions: Interactions,
}

impl DragInput {
    /// Builds a drag from two viewport-space positions on a canvas of `size`.
    pub fn from_viewport(initial: Vec2, current: Vec2, size: Vec2, interactions: Interactions) -> Self {
        Self {
            initial_clip: viewport_to_clip(initial, size.x, size.y),
            current_clip: viewport_to_clip(current, size.x, size.y),
            interactions,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Press {
    origin: Vec2,
    last: Option<Vec2>,
    interactions: Interactions,
}

/// Press / move / release state machine.
///
/// Movement is only reported while a button is held. The first move after a
/// press establishes the reference point, so a delta is produced from the
/// second move on (pairs of consecutive moves).
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    press: Option<Press>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a button is currently held.
    pub fn is_dragging(&self) -> bool {
        self.press.is_some()
    }

    /// Starts a drag at `position` (viewport pixels).
    pub fn press(&mut self, position: Vec2, interactions: Interactions) {
        self.press = Some(Press {
            origin: position,
            last: None,
            interactions,
        });
    }

    /// Records a pointer move and returns the pixel delta since the previous
    /// move of the same drag.
    pub fn moved(&mut self, position: Vec2) -> Option<Vec2> {
        let press = self.press.as_mut()?;
        let delta = press.last.map(|last| position - last);
        press.last = Some(position);
        delta
    }

    /// Clip-space description of the current drag on a canvas of `size`.
    pub fn drag_input(&self, size: Vec2) -> Option<DragInput> {
        let press = self.press.as_ref()?;
        let current = press.last.unwrap_or(press.origin);
        Some(DragInput::from_viewport(
            press.origin,
            current,
            size,
            press.interactions,
        ))
    }

    /// Ends the drag.
    pub fn release(&mut self) {
        self.press = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_map_to_interactions() {
        let i = Interactions::from_modifiers(true, false, true);
        assert!(i.rotate && !i.scale && i.translate);
    }

    #[test]
    fn interaction_bits() {
        assert_eq!(Interactions::default().bits(), 0);
        assert_eq!(Interactions::from_modifiers(true, false, true).bits(), 0b101);
        assert_eq!(Interactions::from_modifiers(false, true, false).bits(), 0b010);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut tracker = DragTracker::new();
        assert_eq!(tracker.moved(Vec2::new(10.0, 10.0)), None);
        assert!(tracker.drag_input(Vec2::splat(100.0)).is_none());
    }

    #[test]
    fn first_move_sets_reference_second_reports_delta() {
        let mut tracker = DragTracker::new();
        tracker.press(Vec2::ZERO, Interactions::default());
        assert_eq!(tracker.moved(Vec2::new(5.0, 5.0)), None);
        assert_eq!(tracker.moved(Vec2::new(8.0, 4.0)), Some(Vec2::new(3.0, -1.0)));
        assert_eq!(tracker.moved(Vec2::new(8.0, 10.0)), Some(Vec2::new(0.0, 6.0)));
    }

    #[test]
    fn release_stops_reporting() {
        let mut tracker = DragTracker::new();
        tracker.press(Vec2::ZERO, Interactions::default());
        tracker.moved(Vec2::ONE);
        tracker.release();
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.moved(Vec2::new(2.0, 2.0)), None);
    }

    #[test]
    fn new_press_resets_reference() {
        let mut tracker = DragTracker::new();
        tracker.press(Vec2::ZERO, Interactions::default());
        tracker.moved(Vec2::ONE);
        tracker.release();
        tracker.press(Vec2::splat(50.0), Interactions::default());
        assert_eq!(tracker.moved(Vec2::splat(60.0)), None);
    }

    #[test]
    fn drag_input_is_in_clip_space() {
        let mut tracker = DragTracker::new();
        tracker.press(Vec2::new(0.0, 99.0), Interactions::from_modifiers(false, true, false));
        tracker.moved(Vec2::new(50.0, 49.0));
        let drag = tracker.drag_input(Vec2::splat(100.0)).unwrap();
        // bottom-left pixel -> (-1, -1); centre -> (0, 0)
        assert!((drag.initial_clip - Vec2::splat(-1.0)).length() < 1e-5, "{drag:?}");
        assert!(drag.current_clip.length() < 1e-5, "{drag:?}");
        assert!(drag.interactions.scale);
    }
}
