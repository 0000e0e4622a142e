//! Drag selection state machine
//!
//! Turns a press-drag-release gesture on the overlay into a [`ScreenRegion`].
//! Points fed in are overlay-local; the outcome is in virtual desktop
//! coordinates.

use crate::{CancelReason, SelectionOutcome};
use screen::{ScreenRegion, VirtualDesktop};

/// One capture session's selection state
#[derive(Debug, Clone)]
pub struct DragSelection {
    desktop: VirtualDesktop,
    anchor: Option<(i32, i32)>,
    current: Option<(i32, i32)>,
    outcome: Option<SelectionOutcome>,
}

impl DragSelection {
    pub fn new(desktop: VirtualDesktop) -> Self {
        Self {
            desktop,
            anchor: None,
            current: None,
            outcome: None,
        }
    }

    /// Whether the session has ended
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<&SelectionOutcome> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<SelectionOutcome> {
        self.outcome
    }

    /// Mouse button pressed: start a new rectangle anchored here
    pub fn press(&mut self, x: i32, y: i32) {
        if self.is_finished() {
            return;
        }

        self.anchor = Some((x, y));
        self.current = Some((x, y));
    }

    /// Pointer moved with the button held
    pub fn drag(&mut self, x: i32, y: i32) {
        if self.is_finished() || self.anchor.is_none() {
            return;
        }

        self.current = Some((x, y));
    }

    /// Mouse button released: resolve the rectangle and end the session
    pub fn release(&mut self, x: i32, y: i32) -> &SelectionOutcome {
        if self.outcome.is_none() {
            let outcome = self.resolve(x, y);
            match &outcome {
                SelectionOutcome::Region(region) => log::debug!("Selected region {}", region),
                SelectionOutcome::Cancelled(reason) => {
                    log::info!("Invalid rectangle, capture is not saved ({:?})", reason)
                }
            }
            self.outcome = Some(outcome);
        }

        self.outcome
            .get_or_insert(SelectionOutcome::Cancelled(CancelReason::Degenerate))
    }

    /// Abort the session (Escape, window closed)
    pub fn cancel(&mut self, reason: CancelReason) {
        if self.outcome.is_none() {
            log::info!("Selection cancelled ({:?})", reason);
            self.outcome = Some(SelectionOutcome::Cancelled(reason));
        }
    }

    /// Live rectangle in overlay-local coordinates as (left, top, right, bottom)
    pub fn outline(&self) -> Option<(i32, i32, i32, i32)> {
        if self.is_finished() {
            return None;
        }

        let (x1, y1) = self.anchor?;
        let (x2, y2) = self.current?;
        Some((x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)))
    }

    fn resolve(&self, x: i32, y: i32) -> SelectionOutcome {
        let Some((start_x, start_y)) = self.anchor else {
            return SelectionOutcome::Cancelled(CancelReason::Degenerate);
        };

        // Released past the edge: pin to the last pixel on the desktop
        let (end_x, end_y) = if self.desktop.contains_local(x, y) {
            (x, y)
        } else {
            self.clamp_local(x, y)
        };

        let (abs_start_x, abs_start_y) = self.desktop.to_absolute(start_x, start_y);
        let (abs_end_x, abs_end_y) = self.desktop.to_absolute(end_x, end_y);

        match ScreenRegion::from_corners(abs_start_x, abs_start_y, abs_end_x, abs_end_y) {
            Some(region) => SelectionOutcome::Region(region),
            None => SelectionOutcome::Cancelled(CancelReason::Degenerate),
        }
    }

    fn clamp_local(&self, x: i32, y: i32) -> (i32, i32) {
        let max_x = (self.desktop.width as i64 - 1).clamp(0, i32::MAX as i64) as i32;
        let max_y = (self.desktop.height as i64 - 1).clamp(0, i32::MAX as i64) as i32;
        (x.clamp(0, max_x), y.clamp(0, max_y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary() -> VirtualDesktop {
        VirtualDesktop::new(0, 0, 1920, 1080)
    }

    fn region(outcome: &SelectionOutcome) -> ScreenRegion {
        match outcome {
            SelectionOutcome::Region(region) => *region,
            other => panic!("expected a region, got {:?}", other),
        }
    }

    #[test]
    fn test_region_is_min_max_plus_offset() {
        let desktop = VirtualDesktop::new(-1280, -200, 3200, 1280);
        let drags = [
            (10, 20, 300, 400),
            (300, 400, 10, 20),
            (300, 20, 10, 400),
            (10, 400, 300, 20),
        ];

        for (x1, y1, x2, y2) in drags {
            let mut selection = DragSelection::new(desktop);
            selection.press(x1, y1);
            selection.drag(x2, y2);
            let r = region(selection.release(x2, y2));

            assert_eq!(r.left(), x1.min(x2) - 1280);
            assert_eq!(r.right(), x1.max(x2) - 1280);
            assert_eq!(r.top(), y1.min(y2) - 200);
            assert_eq!(r.bottom(), y1.max(y2) - 200);
            assert!(r.right() > r.left());
            assert!(r.bottom() > r.top());
        }
    }

    #[test]
    fn test_zero_width_or_height_is_cancelled() {
        for (x1, y1, x2, y2) in [(50, 50, 50, 90), (50, 50, 90, 50), (50, 50, 50, 50)] {
            let mut selection = DragSelection::new(primary());
            selection.press(x1, y1);
            selection.drag(x2, y2);
            assert_eq!(
                selection.release(x2, y2),
                &SelectionOutcome::Cancelled(CancelReason::Degenerate)
            );
        }
    }

    #[test]
    fn test_release_without_press_is_cancelled() {
        let mut selection = DragSelection::new(primary());
        assert_eq!(
            selection.release(100, 100),
            &SelectionOutcome::Cancelled(CancelReason::Degenerate)
        );
    }

    #[test]
    fn test_escape_before_release() {
        let mut selection = DragSelection::new(primary());
        selection.press(10, 10);
        selection.drag(200, 200);
        selection.cancel(CancelReason::Escape);

        // Later release does not override the first outcome
        assert_eq!(
            selection.release(200, 200),
            &SelectionOutcome::Cancelled(CancelReason::Escape)
        );
        assert!(selection.outline().is_none());
    }

    #[test]
    fn test_first_outcome_wins() {
        let mut selection = DragSelection::new(primary());
        selection.press(10, 10);
        let first = selection.release(100, 100).clone();
        selection.cancel(CancelReason::Escape);
        selection.press(500, 500);
        assert_eq!(selection.into_outcome(), Some(first));
    }

    #[test]
    fn test_negative_origin_monitor() {
        let desktop = VirtualDesktop::new(-1920, 0, 3840, 1080);
        let mut selection = DragSelection::new(desktop);
        selection.press(10, 10);
        selection.drag(110, 60);
        let r = region(selection.release(110, 60));
        assert_eq!(r.left(), -1910);
        assert_eq!(r.top(), 10);
        assert_eq!(r.right(), -1810);
        assert_eq!(r.bottom(), 60);
    }

    #[test]
    fn test_release_outside_is_clamped_to_desktop() {
        let mut selection = DragSelection::new(primary());
        selection.press(100, 100);
        selection.drag(1900, 500);
        selection.drag(2100, 520);
        let r = region(selection.release(2300, -40));
        assert_eq!((r.left(), r.top(), r.right(), r.bottom()), (100, 0, 1919, 100));
    }

    #[test]
    fn test_fast_exit_keeps_full_gesture() {
        // Only one in-bounds move before the pointer leaves on the left
        let desktop = VirtualDesktop::new(-1920, 0, 3840, 1080);
        let mut selection = DragSelection::new(desktop);
        selection.press(600, 300);
        selection.drag(590, 310);
        let r = region(selection.release(-250, 900));
        assert_eq!(r.left(), -1920);
        assert_eq!(r.right(), -1320);
        assert_eq!(r.top(), 300);
        assert_eq!(r.bottom(), 900);
    }

    #[test]
    fn test_outcome_is_kept_after_release() {
        let mut selection = DragSelection::new(primary());
        assert!(selection.outcome().is_none());
        selection.press(10, 10);
        selection.release(40, 50);
        let expected = ScreenRegion::from_corners(10, 10, 40, 50).unwrap();
        assert_eq!(selection.outcome(), Some(&SelectionOutcome::Region(expected)));
    }

    #[test]
    fn test_outline_follows_pointer() {
        let mut selection = DragSelection::new(primary());
        assert!(selection.outline().is_none());
        selection.press(300, 300);
        assert_eq!(selection.outline(), Some((300, 300, 300, 300)));
        selection.drag(100, 400);
        assert_eq!(selection.outline(), Some((100, 300, 300, 400)));
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let mut selection = DragSelection::new(primary());
        selection.drag(40, 40);
        assert!(selection.outline().is_none());
        assert!(!selection.is_finished());
    }
}
