//! Events and handler slots.

use crate::position::{Bounds, ContainerBounds, Position, Side};
use crate::rect::Rect;
use crate::scroll::ScrollPhase;
use crate::view::ViewId;
use cgmath::Vector2;
use core::fmt;
use parking_lot::Mutex;
use std::sync::Arc;

macro_rules! handler_type {
    (
        $(#[$attr:meta])*
        $name:ident($($arg:ident: $arg_ty:ty),*) -> $ret:ty
    ) => {
        $(#[$attr])*
        #[derive(Clone)]
        pub struct $name(Arc<Mutex<dyn FnMut($($arg_ty),*) -> $ret + Send>>);

        impl $name {
            pub fn new<F: 'static + FnMut($($arg_ty),*) -> $ret + Send>(handler: F) -> Self {
                $name(Arc::new(Mutex::new(handler)))
            }

            /// Calls the handler.
            ///
            /// Returns None without calling it if the handler is already running further up the
            /// stack.
            pub fn call(&self, $($arg: $arg_ty),*) -> Option<$ret> {
                match self.0.try_lock() {
                    Some(mut handler) => Some((&mut *handler)($($arg),*)),
                    None => {
                        tracing::warn!(handler = stringify!($name), "handler is busy; skipping reentrant call");
                        None
                    }
                }
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }
    };
}

handler_type! {
    /// Handles a click; returns true if the click was handled and should stop bubbling.
    ClickHandler() -> bool
}

handler_type! {
    /// Receives the visible rectangle of a scrolling container’s document.
    ScrollHandler(visible: Rect) -> ()
}

handler_type! {
    /// Runs application-level layout before a container’s subviews are resolved.
    LayoutHandler(context: &mut LayoutContext) -> ()
}

handler_type! {
    /// Receives the resolved bounds of a container after layout.
    BoundsChangedHandler(bounds: ContainerBounds) -> ()
}

/// The handler slots of a container.
///
/// Every slot holds at most one handler and setting a new one discards the old one. Fan-out to
/// several listeners has to happen inside the handler.
#[derive(Debug, Default, Clone)]
pub struct Handlers {
    pub on_click: Option<ClickHandler>,
    pub on_scroll: Option<ScrollHandler>,
    pub perform_layout: Option<LayoutHandler>,
    pub bounds_changed: Option<BoundsChangedHandler>,
}

/// A change requested by a layout handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LayoutRequest {
    SetSide(ViewId, Side, Position),
    SetBounds(ViewId, Bounds),
    SetFrameSize(ViewId, Vector2<f64>),
}

/// Passed to layout handlers.
///
/// Layout handlers don’t get access to the tree itself. Bound changes are applied as soon as the
/// handler returns, before subviews are resolved; frame size changes run after the current layout
/// pass and are dropped if they target a view that is being laid out.
#[derive(Debug)]
pub struct LayoutContext {
    view: ViewId,
    rect: Rect,
    scroll_phase: Option<ScrollPhase>,
    requests: Vec<LayoutRequest>,
}

impl LayoutContext {
    pub(crate) fn new(
        view: ViewId,
        rect: Rect,
        scroll_phase: Option<ScrollPhase>,
    ) -> LayoutContext {
        LayoutContext {
            view,
            rect,
            scroll_phase,
            requests: Vec::new(),
        }
    }

    /// The container being laid out.
    pub fn view(&self) -> ViewId {
        self.view
    }

    /// The area subviews are laid out in, in the container’s own coordinate space.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The phase of the container if it’s a scrolling container.
    pub fn scroll_phase(&self) -> Option<ScrollPhase> {
        self.scroll_phase
    }

    /// Sets one side of a container’s bounds.
    pub fn set_side(&mut self, view: ViewId, side: Side, position: Position) {
        self.requests.push(LayoutRequest::SetSide(view, side, position));
    }

    /// Replaces a container’s bounds.
    pub fn set_bounds(&mut self, view: ViewId, bounds: Bounds) {
        self.requests.push(LayoutRequest::SetBounds(view, bounds));
    }

    /// Requests a frame size change once layout is done.
    pub fn set_frame_size(&mut self, view: ViewId, size: Vector2<f64>) {
        self.requests.push(LayoutRequest::SetFrameSize(view, size));
    }

    pub(crate) fn into_requests(self) -> Vec<LayoutRequest> {
        self.requests
    }
}

/// Notifications from the host window system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The view’s frame was resized by the window system.
    FrameResized { view: ViewId, size: Vector2<f64> },

    /// The visible region of a scrolling container changed.
    BoundsChanged(ViewId),

    /// The user clicked the view.
    Click(ViewId),
}
