//! View containers and layout.
//!
//! # Conceptual overview
//! This crate sits between an application’s view model and a host window system. It keeps a tree
//! of views, decides where each of them goes, and forwards user interaction back up the tree.
//!
//! ## Views and containers
//! Every view in the tree is backed by a native view created through a [`Backend`]. Most views are
//! leaves: they draw something but take no part in layout. Views that do take part are
//! *containers* (anything implementing [`Container`]). A container declares its [`Bounds`] relative
//! to its superview, holds a set of event handlers, and remembers the frame it was last given.
//!
//! ## Layout
//! Layout is performed top-down and is triggered by a frame size change, either from the host or
//! through [`ViewTree::set_frame_size`]. A container that is resized first runs its layout handler,
//! which may adjust the bounds of its subviews. Then every leaf subview is sized to fill the
//! container and every container subview gets the rectangle its bounds resolve to. Resolution runs
//! per axis over the siblings in order; see [`resolve`] for the rules.
//!
//! Layout handlers can’t touch the tree directly. They get a [`LayoutContext`] to record changes
//! in, and frame size changes are applied once the pass is over. A container can’t be resized
//! while its own layout is running.
//!
//! ## Scrolling
//! A scrolling container puts its subviews into a document view that is at least as large as the
//! container and at least as large as its minimum size. Whenever the container is resized or the
//! host reports that the user scrolled, the part of the document that is visible is sent to the
//! container’s scroll handler.
//!
//! ## Events
//! Events first target a specific view and then bubble up through its ancestors. Only containers
//! receive events; a container without a handler for the event passes it on to its superview.
//! Bubbling stops at the first handler that reports the event as handled.
//!
//! ## Coordinate System
//! Frames are in the superview’s coordinate space. The origin is at the top left corner and
//! positive y points down.

pub mod backend;
pub mod config;
pub mod container;
pub mod error;
pub mod events;
mod host;
pub mod position;
mod rect;
pub mod resolve;
pub mod scroll;
mod tree;
mod view;

pub use backend::{Backend, HeadlessBackend, NativeId};
pub use config::TreeConfig;
pub use container::{Container, ViewContainer};
pub use error::{Error, Result};
pub use events::{
    BoundsChangedHandler, ClickHandler, Handlers, HostEvent, LayoutContext, LayoutHandler,
    ScrollHandler,
};
pub use host::Host;
pub use position::{Bounds, ContainerBounds, Position, Side};
pub use rect::Rect;
pub use scroll::{ScrollBarPolicy, ScrollBarVisibility, ScrollPhase, ScrollingContainer};
pub use tree::ViewTree;
pub use view::{NativeType, ViewId};
