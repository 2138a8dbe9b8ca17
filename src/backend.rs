//! Traits for backends.
//!
//! A backend wraps the host’s native view classes. It is deliberately small: the tree decides
//! all frames itself and only asks the backend to apply them.

use crate::events::HostEvent;
use crate::rect::Rect;
use crate::scroll::ScrollBarPolicy;
use crate::view::{NativeType, ViewId};
use cgmath::{EuclideanSpace, Point2, Vector2, Zero};
use crossbeam::channel::Sender;
use std::collections::HashMap;

/// A backend implementation.
pub trait Backend {
    /// A reference to a view in the backend.
    type ViewRef;

    /// Hands the backend the channel for host notifications.
    fn connect(&mut self, events: Sender<HostEvent>) {
        drop(events);
    }

    /// Creates a new native view for the given tree view.
    fn create_view(&mut self, owner: ViewId, ty: NativeType) -> Self::ViewRef;

    /// Destroys a view. It has already been removed from its superview.
    fn destroy_view(&mut self, view: Self::ViewRef);

    /// Sets the frame of a view, in its superview’s coordinate space.
    fn set_frame(&mut self, view: &Self::ViewRef, frame: Rect);

    fn add_subview(&mut self, superview: &Self::ViewRef, subview: &Self::ViewRef);

    fn remove_from_superview(&mut self, view: &Self::ViewRef);

    /// Installs the document view of a scroll view.
    fn set_document_view(&mut self, scroll_view: &Self::ViewRef, document: &Self::ViewRef);

    /// Starts posting [`HostEvent::BoundsChanged`] for `owner` when the visible region of the
    /// scroll view changes.
    fn subscribe_bounds_changed(&mut self, scroll_view: &Self::ViewRef, owner: ViewId);

    fn unsubscribe_bounds_changed(&mut self, scroll_view: &Self::ViewRef);

    /// Shows, hides or auto-hides the scrollers of a scroll view.
    fn set_scrollers(&mut self, scroll_view: &Self::ViewRef, policy: ScrollBarPolicy);

    /// Maps a rectangle in `from`’s coordinate space into `to`’s.
    fn convert_rect(&self, rect: Rect, from: &Self::ViewRef, to: &Self::ViewRef) -> Rect;
}

/// A native view in the headless backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NativeId(u64);

#[derive(Debug)]
struct HeadlessView {
    owner: ViewId,
    ty: NativeType,
    frame: Rect,
    /// Scroll offset applied to subviews (the clip view bounds origin).
    scroll_offset: Vector2<f64>,
    superview: Option<NativeId>,
    subviews: Vec<NativeId>,
    scrollers: Option<ScrollBarPolicy>,
    subscribed: bool,
}

/// An in-memory backend.
///
/// Keeps track of frames, hierarchy and scroll offsets like a window system would, and can
/// simulate user interaction through [`HeadlessBackend::scroll_to`], [`HeadlessBackend::resize`]
/// and [`HeadlessBackend::click`].
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    views: HashMap<NativeId, HeadlessView>,
    next_id: u64,
    events: Option<Sender<HostEvent>>,
}

impl HeadlessBackend {
    pub fn new() -> HeadlessBackend {
        HeadlessBackend::default()
    }

    /// Number of live native views.
    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn contains(&self, view: NativeId) -> bool {
        self.views.contains_key(&view)
    }

    pub fn native_type(&self, view: NativeId) -> Option<NativeType> {
        self.views.get(&view).map(|view| view.ty)
    }

    pub fn frame(&self, view: NativeId) -> Option<Rect> {
        self.views.get(&view).map(|view| view.frame)
    }

    pub fn superview(&self, view: NativeId) -> Option<NativeId> {
        self.views.get(&view).and_then(|view| view.superview)
    }

    pub fn subviews(&self, view: NativeId) -> &[NativeId] {
        self.views
            .get(&view)
            .map(|view| view.subviews.as_slice())
            .unwrap_or(&[])
    }

    pub fn scrollers(&self, view: NativeId) -> Option<ScrollBarPolicy> {
        self.views.get(&view).and_then(|view| view.scrollers)
    }

    pub fn is_subscribed(&self, view: NativeId) -> bool {
        self.views.get(&view).map_or(false, |view| view.subscribed)
    }

    /// Scrolls a scroll view so that `offset` is at the top left of the viewport.
    pub fn scroll_to(&mut self, view: NativeId, offset: Vector2<f64>) {
        let notify = match self.views.get_mut(&view) {
            Some(native) => {
                native.scroll_offset = offset;
                native.subscribed.then(|| native.owner)
            }
            None => None,
        };

        if let Some(owner) = notify {
            self.post(HostEvent::BoundsChanged(owner));
        }
    }

    /// Resizes a view as the window system would, and posts the notification.
    pub fn resize(&mut self, view: NativeId, size: Vector2<f64>) {
        let owner = match self.views.get_mut(&view) {
            Some(native) => {
                native.frame.size = size;
                native.owner
            }
            None => return,
        };
        self.post(HostEvent::FrameResized { view: owner, size });
    }

    /// Posts a click on a view.
    pub fn click(&mut self, view: NativeId) {
        if let Some(owner) = self.views.get(&view).map(|view| view.owner) {
            self.post(HostEvent::Click(owner));
        }
    }

    fn post(&self, event: HostEvent) {
        match &self.events {
            Some(events) => {
                if let Err(err) = events.send(event) {
                    tracing::warn!(%err, "host event receiver is gone");
                }
            }
            None => tracing::debug!(?event, "no host connected; dropping event"),
        }
    }

    /// Window position of a view’s own origin.
    fn origin_in_window(&self, view: NativeId) -> Point2<f64> {
        match self.views.get(&view) {
            Some(native) => {
                let base = match native.superview.and_then(|id| self.views.get(&id).map(|s| (id, s))) {
                    Some((id, superview)) => self.origin_in_window(id) - superview.scroll_offset,
                    None => Point2::origin(),
                };
                base + native.frame.origin.to_vec()
            }
            None => Point2::origin(),
        }
    }

    fn detach(&mut self, view: NativeId) {
        let superview = match self.views.get_mut(&view) {
            Some(native) => native.superview.take(),
            None => None,
        };
        if let Some(superview) = superview.and_then(|id| self.views.get_mut(&id)) {
            superview.subviews.retain(|id| *id != view);
        }
    }
}

impl Backend for HeadlessBackend {
    type ViewRef = NativeId;

    fn connect(&mut self, events: Sender<HostEvent>) {
        self.events = Some(events);
    }

    fn create_view(&mut self, owner: ViewId, ty: NativeType) -> NativeId {
        let id = NativeId(self.next_id);
        self.next_id += 1;
        self.views.insert(
            id,
            HeadlessView {
                owner,
                ty,
                frame: Rect::zero(),
                scroll_offset: Vector2::zero(),
                superview: None,
                subviews: Vec::new(),
                scrollers: None,
                subscribed: false,
            },
        );
        id
    }

    fn destroy_view(&mut self, view: NativeId) {
        self.detach(view);
        self.views.remove(&view);
    }

    fn set_frame(&mut self, view: &NativeId, frame: Rect) {
        if let Some(native) = self.views.get_mut(view) {
            native.frame = frame;
        }
    }

    fn add_subview(&mut self, superview: &NativeId, subview: &NativeId) {
        if !self.views.contains_key(superview) || !self.views.contains_key(subview) {
            return;
        }
        self.detach(*subview);
        if let Some(native) = self.views.get_mut(subview) {
            native.superview = Some(*superview);
        }
        if let Some(native) = self.views.get_mut(superview) {
            native.subviews.push(*subview);
        }
    }

    fn remove_from_superview(&mut self, view: &NativeId) {
        self.detach(*view);
    }

    fn set_document_view(&mut self, scroll_view: &NativeId, document: &NativeId) {
        self.add_subview(scroll_view, document);
    }

    fn subscribe_bounds_changed(&mut self, scroll_view: &NativeId, owner: ViewId) {
        if let Some(native) = self.views.get_mut(scroll_view) {
            native.owner = owner;
            native.subscribed = true;
        }
    }

    fn unsubscribe_bounds_changed(&mut self, scroll_view: &NativeId) {
        if let Some(native) = self.views.get_mut(scroll_view) {
            native.subscribed = false;
        }
    }

    fn set_scrollers(&mut self, scroll_view: &NativeId, policy: ScrollBarPolicy) {
        if let Some(native) = self.views.get_mut(scroll_view) {
            native.scrollers = Some(policy);
        }
    }

    fn convert_rect(&self, rect: Rect, from: &NativeId, to: &NativeId) -> Rect {
        let offset = self.origin_in_window(*from) - self.origin_in_window(*to);
        rect + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel;

    #[test]
    fn convert_rect_follows_scroll_offset() {
        let mut backend = HeadlessBackend::new();
        let owner = ViewId::new();
        let scroll = backend.create_view(owner, NativeType::Scrolling);
        let document = backend.create_view(owner, NativeType::Document);
        backend.set_document_view(&scroll, &document);
        backend.set_frame(&scroll, (20., 30., 100., 50.).into());
        backend.set_frame(&document, (0., 0., 400., 400.).into());

        let bounds: Rect = (0., 0., 100., 50.).into();
        assert_eq!(backend.convert_rect(bounds, &scroll, &document), bounds);

        backend.scroll_to(scroll, Vector2::new(10., 120.));
        assert_eq!(
            backend.convert_rect(bounds, &scroll, &document),
            (10., 120., 100., 50.).into()
        );
    }

    #[test]
    fn scrolling_posts_only_when_subscribed() {
        let (sender, receiver) = channel::unbounded();
        let mut backend = HeadlessBackend::new();
        backend.connect(sender);

        let owner = ViewId::new();
        let scroll = backend.create_view(owner, NativeType::Scrolling);
        backend.scroll_to(scroll, Vector2::new(0., 5.));
        assert!(receiver.try_recv().is_err());

        backend.subscribe_bounds_changed(&scroll, owner);
        backend.scroll_to(scroll, Vector2::new(0., 10.));
        assert_eq!(receiver.try_recv(), Ok(HostEvent::BoundsChanged(owner)));

        backend.unsubscribe_bounds_changed(&scroll);
        backend.scroll_to(scroll, Vector2::new(0., 15.));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn destroy_detaches_from_superview() {
        let mut backend = HeadlessBackend::new();
        let owner = ViewId::new();
        let parent = backend.create_view(owner, NativeType::Container);
        let child = backend.create_view(owner, NativeType::View);
        backend.add_subview(&parent, &child);
        assert_eq!(backend.subviews(parent), &[child]);
        assert_eq!(backend.superview(child), Some(parent));

        backend.destroy_view(child);
        assert!(backend.subviews(parent).is_empty());
        assert_eq!(backend.view_count(), 1);
    }
}
