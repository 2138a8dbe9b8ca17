//! Scrolling containers.

use crate::container::{replace_rect, Container};
use crate::events::Handlers;
use crate::position::Bounds;
use crate::rect::Rect;
use cgmath::Vector2;
use serde::{Deserialize, Serialize};

/// When a scroll bar is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollBarVisibility {
    Always,
    Never,
    OnlyIfNeeded,
}

/// What the host is asked to do with its scrollers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollBarPolicy {
    pub show_horizontal: bool,
    pub show_vertical: bool,
    /// Hosts can only auto-hide both scrollers together.
    pub autohide: bool,
}

impl ScrollBarPolicy {
    pub fn new(horizontal: ScrollBarVisibility, vertical: ScrollBarVisibility) -> ScrollBarPolicy {
        use ScrollBarVisibility::*;

        let shown = |visibility| match visibility {
            Always | OnlyIfNeeded => true,
            Never => false,
        };

        ScrollBarPolicy {
            show_horizontal: shown(horizontal),
            show_vertical: shown(vertical),
            autohide: horizontal == OnlyIfNeeded || vertical == OnlyIfNeeded,
        }
    }
}

/// Where a scrolling container is in its update cycle.
///
/// Only `Idle` is ever seen from outside a tree operation. Layout handlers see `Resizing` through
/// [`LayoutContext::scroll_phase`](crate::events::LayoutContext::scroll_phase); `ScrollNotified`
/// lasts for the `on_scroll` call and otherwise only shows up in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// Nothing pending.
    Idle,
    /// A frame size change is being applied to the document.
    Resizing,
    /// The visible region is being recomputed and sent to `on_scroll`.
    ScrollNotified,
}

/// The document size for a given minimum and frame size: the larger of the two on each axis.
pub fn document_size(minimum: Vector2<f64>, frame: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(minimum.x.max(frame.x), minimum.y.max(frame.y))
}

/// A container whose subviews live in an oversized, scrollable document view.
#[derive(Debug)]
pub struct ScrollingContainer {
    bounds: Bounds,
    handlers: Handlers,
    resolved: Option<Rect>,
    minimum_size: Vector2<f64>,
    visibility: (ScrollBarVisibility, ScrollBarVisibility),
    visible_rect: Option<Rect>,
    phase: ScrollPhase,
}

impl ScrollingContainer {
    pub fn new(visibility: (ScrollBarVisibility, ScrollBarVisibility)) -> ScrollingContainer {
        ScrollingContainer {
            bounds: Bounds::fill(),
            handlers: Handlers::default(),
            resolved: None,
            minimum_size: Vector2::new(0., 0.),
            visibility,
            visible_rect: None,
            phase: ScrollPhase::Idle,
        }
    }

    /// The minimum size of the scrollable area.
    pub fn minimum_size(&self) -> Vector2<f64> {
        self.minimum_size
    }

    pub(crate) fn set_minimum_size(&mut self, size: Vector2<f64>) {
        self.minimum_size = size;
    }

    /// Horizontal and vertical scroll bar visibility.
    pub fn visibility(&self) -> (ScrollBarVisibility, ScrollBarVisibility) {
        self.visibility
    }

    /// Stores new visibility settings and returns the policy to hand to the host.
    pub(crate) fn set_visibility(
        &mut self,
        visibility: (ScrollBarVisibility, ScrollBarVisibility),
    ) -> ScrollBarPolicy {
        self.visibility = visibility;
        self.policy()
    }

    pub fn policy(&self) -> ScrollBarPolicy {
        ScrollBarPolicy::new(self.visibility.0, self.visibility.1)
    }

    /// The part of the document that was visible at the last scroll notification.
    pub fn visible_rect(&self) -> Option<Rect> {
        self.visible_rect
    }

    pub(crate) fn set_visible_rect(&mut self, rect: Rect) {
        self.visible_rect = Some(rect);
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: ScrollPhase) {
        tracing::trace!(from = ?self.phase, to = ?phase, "scroll phase");
        self.phase = phase;
    }
}

impl Container for ScrollingContainer {
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

    fn as_scrolling(&self) -> Option<&ScrollingContainer> {
        Some(self)
    }

    fn as_scrolling_mut(&mut self) -> Option<&mut ScrollingContainer> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ScrollBarVisibility::*;

    #[test]
    fn policy_autohides_if_either_axis_asks() {
        assert_eq!(
            ScrollBarPolicy::new(Always, OnlyIfNeeded),
            ScrollBarPolicy {
                show_horizontal: true,
                show_vertical: true,
                autohide: true,
            }
        );
        assert_eq!(
            ScrollBarPolicy::new(Never, Never),
            ScrollBarPolicy {
                show_horizontal: false,
                show_vertical: false,
                autohide: false,
            }
        );
        assert_eq!(
            ScrollBarPolicy::new(OnlyIfNeeded, Never),
            ScrollBarPolicy {
                show_horizontal: true,
                show_vertical: false,
                autohide: true,
            }
        );
        assert!(!ScrollBarPolicy::new(Always, Always).autohide);
    }

    #[test]
    fn document_is_at_least_the_frame() {
        let minimum = Vector2::new(1000., 50.);
        assert_eq!(document_size(minimum, Vector2::new(300., 200.)), Vector2::new(1000., 200.));
        assert_eq!(document_size(minimum, Vector2::new(1200., 20.)), Vector2::new(1200., 50.));

        let once = document_size(minimum, Vector2::new(300., 200.));
        assert_eq!(document_size(minimum, Vector2::new(300., 200.)), once);
    }

    #[test]
    fn set_visibility_returns_policy() {
        let mut container = ScrollingContainer::new((OnlyIfNeeded, OnlyIfNeeded));
        let policy = container.set_visibility((Never, Always));
        assert_eq!(container.visibility(), (Never, Always));
        assert_eq!(policy, container.policy());
        assert!(!policy.show_horizontal && policy.show_vertical && !policy.autohide);
    }
}
