//! The container capability.

use crate::events::Handlers;
use crate::position::Bounds;
use crate::rect::Rect;
use crate::scroll::ScrollingContainer;
use core::fmt;

/// A view that takes part in layout.
///
/// Views that don’t implement this are leaves: they have no bounds of their own and are sized to
/// fill their container. Containers are also the stops for event bubbling.
pub trait Container: fmt::Debug {
    /// Declared bounds relative to the superview.
    fn bounds(&self) -> &Bounds;

    fn bounds_mut(&mut self) -> &mut Bounds;

    /// Event handler slots.
    fn handlers(&self) -> &Handlers;

    fn handlers_mut(&mut self) -> &mut Handlers;

    /// The frame from the last layout pass, if there was one.
    fn resolved_rect(&self) -> Option<Rect>;

    /// Stores a newly resolved frame and returns true if it differs from the previous one.
    fn set_resolved_rect(&mut self, rect: Rect) -> bool;

    /// If true, leaf subviews are resized to fill this container on every layout pass.
    fn fills_subviews(&self) -> bool {
        true
    }

    /// For scrolling containers.
    fn as_scrolling(&self) -> Option<&ScrollingContainer> {
        None
    }

    fn as_scrolling_mut(&mut self) -> Option<&mut ScrollingContainer> {
        None
    }
}

/// Replaces the stored frame, returning true if it changed.
pub(crate) fn replace_rect(slot: &mut Option<Rect>, rect: Rect) -> bool {
    let changed = *slot != Some(rect);
    *slot = Some(rect);
    changed
}

/// A plain container view.
#[derive(Debug, Default)]
pub struct ViewContainer {
    bounds: Bounds,
    handlers: Handlers,
    resolved: Option<Rect>,
}

impl ViewContainer {
    pub fn new() -> ViewContainer {
        ViewContainer::default()
    }

    pub fn with_bounds(bounds: Bounds) -> ViewContainer {
        ViewContainer {
            bounds,
            ..ViewContainer::default()
        }
    }
}

impl Container for ViewContainer {
    fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    fn bounds_mut(&mut self) -> &mut Bounds {
        &mut self.bounds
    }

    fn handlers(&self) -> &Handlers {
        &self.handlers
    }

    fn handlers_mut(&mut self) -> &mut Handlers {
        &mut self.handlers
    }

    fn resolved_rect(&self) -> Option<Rect> {
        self.resolved
    }

    fn set_resolved_rect(&mut self, rect: Rect) -> bool {
        replace_rect(&mut self.resolved, rect)
    }
}

#[test]
fn test_resolved_rect_change_detection() {
    let mut container = ViewContainer::new();
    assert_eq!(container.resolved_rect(), None);
    assert!(container.set_resolved_rect((0., 0., 10., 10.).into()));
    assert!(!container.set_resolved_rect((0., 0., 10., 10.).into()));
    assert!(container.set_resolved_rect((0., 0., 10., 12.).into()));
    assert!(container.as_scrolling().is_none());
}
