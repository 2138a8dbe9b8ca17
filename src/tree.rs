use crate::backend::Backend;
use crate::config::TreeConfig;
use crate::container::{Container, ViewContainer};
use crate::error::{Error, Result};
use crate::events::{
    BoundsChangedHandler, ClickHandler, LayoutContext, LayoutHandler, LayoutRequest, ScrollHandler,
};
use crate::position::{Bounds, ContainerBounds, Position, Side};
use crate::rect::Rect;
use crate::resolve::{resolve_bounds, resolve_siblings};
use crate::scroll::{document_size, ScrollBarVisibility, ScrollPhase, ScrollingContainer};
use crate::view::{NativeType, ViewId};
use cgmath::Vector2;
use core::fmt;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::{debug, trace, warn};

/// A node in the view tree.
struct TreeNode<R> {
    /// The native view.
    native: R,
    /// The document view, for scrolling containers.
    document: Option<R>,
    /// The current frame in the superview’s coordinate space.
    frame: Rect,
    superview: Option<ViewId>,
    subviews: Vec<ViewId>,
    /// None for leaf views.
    container: Option<Box<dyn Container>>,
}

/// A tree of views backed by native views.
///
/// The tree owns every view in it. Subviews are owned by their superview and removing a view
/// removes its whole subtree.
pub struct ViewTree<B: Backend> {
    backend: B,
    config: TreeConfig,
    nodes: HashMap<ViewId, TreeNode<B::ViewRef>>,
    root: Option<ViewId>,
    /// Containers whose layout is currently running.
    laying_out: HashSet<ViewId>,
    /// Frame size changes requested by layout handlers.
    deferred_resizes: VecDeque<(ViewId, Vector2<f64>)>,
}

impl<B: Backend> fmt::Debug for ViewTree<B> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ViewTree")
            .field("config", &self.config)
            .field("root", &self.root)
            .field("views", &self.nodes.len())
            .finish()
    }
}

impl<B: Backend> ViewTree<B> {
    pub fn new(backend: B) -> ViewTree<B> {
        ViewTree::with_config(backend, TreeConfig::default())
    }

    pub fn with_config(backend: B, config: TreeConfig) -> ViewTree<B> {
        ViewTree {
            backend,
            config,
            nodes: HashMap::new(),
            root: None,
            laying_out: HashSet::new(),
            deferred_resizes: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Creates a leaf view.
    pub fn create_view(&mut self) -> ViewId {
        self.insert(NativeType::View, None)
    }

    /// Creates a plain container that fills its superview.
    pub fn create_container(&mut self) -> ViewId {
        self.insert_container(Box::new(ViewContainer::new()))
    }

    /// Creates a scrolling container with the configured document size and scroll bars.
    pub fn create_scrolling_container(&mut self) -> ViewId {
        let container = ScrollingContainer::new(self.config.scroll_bar_visibility);
        self.insert_container(Box::new(container))
    }

    /// Adds a container of any type to the tree.
    pub fn insert_container(&mut self, container: Box<dyn Container>) -> ViewId {
        let scrolling = container.as_scrolling().map(ScrollingContainer::policy);
        let ty = if scrolling.is_some() {
            NativeType::Scrolling
        } else {
            NativeType::Container
        };
        let id = self.insert(ty, Some(container));

        if let Some(policy) = scrolling {
            let (width, height) = self.config.initial_document_size;
            let document = self.backend.create_view(id, NativeType::Document);
            if let Some(node) = self.nodes.get_mut(&id) {
                self.backend.set_document_view(&node.native, &document);
                self.backend
                    .set_frame(&document, Rect::with_size(Vector2::new(width, height)));
                self.backend.set_scrollers(&node.native, policy);
                self.backend.subscribe_bounds_changed(&node.native, id);
                node.document = Some(document);
            }
        }

        id
    }

    fn insert(&mut self, ty: NativeType, container: Option<Box<dyn Container>>) -> ViewId {
        let id = ViewId::new();
        let native = self.backend.create_view(id, ty);
        self.nodes.insert(
            id,
            TreeNode {
                native,
                document: None,
                frame: Rect::zero(),
                superview: None,
                subviews: Vec::new(),
                container,
            },
        );
        debug!(%id, ?ty, "created view");
        id
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn root(&self) -> Option<ViewId> {
        self.root
    }

    pub fn set_root(&mut self, id: ViewId) -> Result<()> {
        self.node(id)?;
        self.root = Some(id);
        Ok(())
    }

    /// The native view of a view.
    pub fn native(&self, id: ViewId) -> Option<&B::ViewRef> {
        self.nodes.get(&id).map(|node| &node.native)
    }

    /// The native document view of a scrolling container.
    pub fn document(&self, id: ViewId) -> Option<&B::ViewRef> {
        self.nodes.get(&id).and_then(|node| node.document.as_ref())
    }

    pub fn superview(&self, id: ViewId) -> Option<ViewId> {
        self.nodes.get(&id).and_then(|node| node.superview)
    }

    pub fn subviews(&self, id: ViewId) -> &[ViewId] {
        self.nodes
            .get(&id)
            .map(|node| node.subviews.as_slice())
            .unwrap_or(&[])
    }

    /// All views below a view, depth-first.
    pub fn descendants(&self, id: ViewId) -> Vec<ViewId> {
        let mut descendants = Vec::new();
        let mut stack: Vec<ViewId> = self.subviews(id).iter().rev().copied().collect();
        while let Some(view) = stack.pop() {
            descendants.push(view);
            stack.extend(self.subviews(view).iter().rev());
        }
        descendants
    }

    /// The current frame in the superview’s coordinate space.
    pub fn frame(&self, id: ViewId) -> Result<Rect> {
        Ok(self.node(id)?.frame)
    }

    pub fn container(&self, id: ViewId) -> Result<&(dyn Container + 'static)> {
        self.node(id)?
            .container
            .as_deref()
            .ok_or(Error::NotAContainer(id))
    }

    pub fn bounds(&self, id: ViewId) -> Result<Bounds> {
        Ok(*self.container(id)?.bounds())
    }

    /// The visible part of a scrolling container’s document, as of the last scroll notification.
    pub fn visible_rect(&self, id: ViewId) -> Result<Option<Rect>> {
        Ok(self.scrolling(id)?.visible_rect())
    }

    pub fn scroll_phase(&self, id: ViewId) -> Result<ScrollPhase> {
        Ok(self.scrolling(id)?.phase())
    }

    fn node(&self, id: ViewId) -> Result<&TreeNode<B::ViewRef>> {
        self.nodes.get(&id).ok_or(Error::NoSuchView(id))
    }

    fn container_mut(&mut self, id: ViewId) -> Result<&mut (dyn Container + 'static)> {
        self.nodes
            .get_mut(&id)
            .ok_or(Error::NoSuchView(id))?
            .container
            .as_deref_mut()
            .ok_or(Error::NotAContainer(id))
    }

    fn scrolling(&self, id: ViewId) -> Result<&ScrollingContainer> {
        self.container(id)?
            .as_scrolling()
            .ok_or(Error::NotScrolling(id))
    }

    fn scrolling_mut(&mut self, id: ViewId) -> Result<&mut ScrollingContainer> {
        self.container_mut(id)?
            .as_scrolling_mut()
            .ok_or(Error::NotScrolling(id))
    }

    /// Returns true if `ancestor` is `view` or one of its superviews.
    fn is_ancestor(&self, ancestor: ViewId, view: ViewId) -> bool {
        let mut current = Some(view);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.superview(id);
        }
        false
    }

    /// Adds a view to a container.
    ///
    /// Scrolling containers put their subviews into the document view.
    pub fn add_container_subview(&mut self, superview: ViewId, subview: ViewId) -> Result<()> {
        if self.node(subview)?.superview.is_some() {
            return Err(Error::AlreadyAttached(subview));
        }
        if self.node(superview)?.container.is_none() {
            return Err(Error::NotAContainer(superview));
        }
        if self.is_ancestor(subview, superview) {
            return Err(Error::WouldCycle {
                superview,
                subview,
            });
        }

        if let (Some(parent), Some(child)) = (self.nodes.get(&superview), self.nodes.get(&subview)) {
            let target = parent.document.as_ref().unwrap_or(&parent.native);
            self.backend.add_subview(target, &child.native);
        }

        if let Some(child) = self.nodes.get_mut(&subview) {
            child.superview = Some(superview);
        }
        if let Some(parent) = self.nodes.get_mut(&superview) {
            parent.subviews.push(subview);
        }
        if self.root == Some(subview) {
            self.root = None;
        }

        debug!(%superview, %subview, "added subview");
        Ok(())
    }

    /// Removes a view and all of its descendants from the tree and destroys their native views.
    pub fn remove_view(&mut self, id: ViewId) -> Result<()> {
        let superview = self.node(id)?.superview;
        if let Some(superview) = superview.and_then(|superview| self.nodes.get_mut(&superview)) {
            superview.subviews.retain(|subview| *subview != id);
        }
        if let Some(node) = self.nodes.get(&id) {
            self.backend.remove_from_superview(&node.native);
        }

        self.release(id);

        if self.root == Some(id) {
            self.root = None;
        }
        debug!(%id, "removed view");
        Ok(())
    }

    fn release(&mut self, id: ViewId) {
        let node = match self.nodes.remove(&id) {
            Some(node) => node,
            None => return,
        };

        for subview in &node.subviews {
            self.release(*subview);
        }

        if let Some(document) = node.document {
            self.backend.unsubscribe_bounds_changed(&node.native);
            self.backend.destroy_view(document);
        }
        self.backend.destroy_view(node.native);
    }

    /// Sets one side of a container’s bounds.
    ///
    /// Takes effect the next time the superview is laid out.
    pub fn set_bounds(&mut self, id: ViewId, side: Side, position: Position) -> Result<()> {
        self.container_mut(id)?.bounds_mut().set_side(side, position);
        Ok(())
    }

    /// Sets a side by its host index (0 = left, 1 = top, 2 = right, 3 = bottom).
    pub fn set_side_index(&mut self, id: ViewId, index: i32, position: Position) -> Result<()> {
        self.container_mut(id)?
            .bounds_mut()
            .set_side_index(index, position);
        Ok(())
    }

    pub fn replace_bounds(&mut self, id: ViewId, bounds: Bounds) -> Result<()> {
        *self.container_mut(id)?.bounds_mut() = bounds;
        Ok(())
    }

    pub fn set_on_click(
        &mut self,
        id: ViewId,
        handler: impl Into<Option<ClickHandler>>,
    ) -> Result<()> {
        self.container_mut(id)?.handlers_mut().on_click = handler.into();
        Ok(())
    }

    pub fn set_perform_layout(
        &mut self,
        id: ViewId,
        handler: impl Into<Option<LayoutHandler>>,
    ) -> Result<()> {
        self.container_mut(id)?.handlers_mut().perform_layout = handler.into();
        Ok(())
    }

    pub fn set_bounds_changed(
        &mut self,
        id: ViewId,
        handler: impl Into<Option<BoundsChangedHandler>>,
    ) -> Result<()> {
        self.container_mut(id)?.handlers_mut().bounds_changed = handler.into();
        Ok(())
    }

    /// Sets the scroll handler.
    ///
    /// For scrolling containers the new handler is called right away with the current visible
    /// rectangle.
    pub fn set_on_scroll(
        &mut self,
        id: ViewId,
        handler: impl Into<Option<ScrollHandler>>,
    ) -> Result<()> {
        self.container_mut(id)?.handlers_mut().on_scroll = handler.into();
        self.notify_scroll(id);
        Ok(())
    }

    /// Sets the minimum size of a scrolling container’s document and resizes the document.
    pub fn set_scroll_minimum_size(&mut self, id: ViewId, width: f64, height: f64) -> Result<()> {
        self.scrolling_mut(id)?
            .set_minimum_size(Vector2::new(width, height));
        let frame = self.node(id)?.frame;
        self.place_container(id, frame);
        self.flush_deferred_resizes();
        Ok(())
    }

    pub fn set_scroll_bar_visibility(
        &mut self,
        id: ViewId,
        horizontal: ScrollBarVisibility,
        vertical: ScrollBarVisibility,
    ) -> Result<()> {
        let policy = self
            .scrolling_mut(id)?
            .set_visibility((horizontal, vertical));
        if let Some(node) = self.nodes.get(&id) {
            self.backend.set_scrollers(&node.native, policy);
        }
        Ok(())
    }

    /// Lays out a container inside its superview’s rectangle and returns its new frame.
    pub fn layout(&mut self, id: ViewId, parent: Rect) -> Result<Rect> {
        let bounds = self.bounds(id)?;
        let frame = resolve_bounds(&bounds, parent);
        self.place_container(id, frame);
        self.flush_deferred_resizes();
        Ok(frame)
    }

    /// Lays out the root container in a window of the given size.
    pub fn layout_root(&mut self, size: Vector2<f64>) -> Result<Option<Rect>> {
        match self.root {
            Some(root) => self.layout(root, Rect::with_size(size)).map(Some),
            None => Ok(None),
        }
    }

    /// Changes the size of a view’s frame, keeping its origin.
    ///
    /// This is what triggers layout: containers lay out their subviews again and scrolling
    /// containers also resize their document and report the visible region.
    pub fn set_frame_size(&mut self, id: ViewId, size: Vector2<f64>) -> Result<()> {
        self.resize(id, size)?;
        self.flush_deferred_resizes();
        Ok(())
    }

    fn resize(&mut self, id: ViewId, size: Vector2<f64>) -> Result<()> {
        if self.laying_out.contains(&id) {
            warn!(%id, "ignoring resize of a view that is being laid out");
            return Ok(());
        }

        let node = self.node(id)?;
        let frame = Rect::new(node.frame.origin, size);
        if node.container.is_some() {
            self.place_container(id, frame);
        } else {
            self.apply_frame(id, frame);
        }
        Ok(())
    }

    /// Runs layout for a container at a given frame.
    fn place_container(&mut self, id: ViewId, frame: Rect) {
        let scrolling = match self.container(id) {
            Ok(container) => container.as_scrolling().is_some(),
            Err(_) => return,
        };

        if scrolling {
            self.set_phase(id, ScrollPhase::Resizing);
            self.layout_container(id, frame);
            self.set_phase(id, ScrollPhase::Idle);
            self.notify_scroll(id);
        } else {
            self.layout_container(id, frame);
        }
    }

    fn layout_container(&mut self, id: ViewId, frame: Rect) {
        if !self.laying_out.insert(id) {
            warn!(%id, "layout is already running for this container");
            return;
        }
        debug!(%id, ?frame, "layout");

        self.apply_frame(id, frame);
        if let Some(area) = self.content_area(id) {
            self.run_layout_handler(id, area);
            self.layout_subviews(id, area);
        }

        self.laying_out.remove(&id);
    }

    /// Sets a view’s frame and reports the change for containers.
    fn apply_frame(&mut self, id: ViewId, frame: Rect) {
        let dedup = self.config.deduplicate_bounds_changed;
        let handler = match self.nodes.get_mut(&id) {
            Some(node) => {
                node.frame = frame;
                self.backend.set_frame(&node.native, frame);
                match node.container.as_deref_mut() {
                    Some(container) => {
                        let changed = container.set_resolved_rect(frame);
                        if changed || !dedup {
                            container.handlers().bounds_changed.clone()
                        } else {
                            None
                        }
                    }
                    None => None,
                }
            }
            None => return,
        };

        if let Some(handler) = handler {
            handler.call(ContainerBounds::from(frame));
        }
    }

    /// The area subviews are laid out in.
    ///
    /// For scrolling containers this sizes the document first. Returns None if there’s nothing to
    /// lay out into (a scrolling container without a document).
    fn content_area(&mut self, id: ViewId) -> Option<Rect> {
        let node = self.nodes.get(&id)?;
        let container = node.container.as_deref()?;
        match container.as_scrolling() {
            None => Some(node.frame.local()),
            Some(scrolling) => {
                let document = node.document.as_ref()?;
                let size = document_size(scrolling.minimum_size(), node.frame.size);
                let area = Rect::with_size(size);
                self.backend.set_frame(document, area);
                Some(area)
            }
        }
    }

    fn run_layout_handler(&mut self, id: ViewId, area: Rect) {
        let handler = self
            .nodes
            .get(&id)
            .and_then(|node| node.container.as_ref())
            .and_then(|container| container.handlers().perform_layout.clone());
        let handler = match handler {
            Some(handler) => handler,
            None => return,
        };

        let phase = self.scrolling(id).ok().map(ScrollingContainer::phase);
        let mut context = LayoutContext::new(id, area, phase);
        handler.call(&mut context);

        for request in context.into_requests() {
            self.apply_layout_request(request);
        }
    }

    fn apply_layout_request(&mut self, request: LayoutRequest) {
        let result = match request {
            LayoutRequest::SetSide(view, side, position) => self.set_bounds(view, side, position),
            LayoutRequest::SetBounds(view, bounds) => self.replace_bounds(view, bounds),
            LayoutRequest::SetFrameSize(view, size) => {
                if self.laying_out.contains(&view) {
                    warn!(%view, "ignoring resize of a view that is being laid out");
                } else {
                    self.deferred_resizes.push_back((view, size));
                }
                Ok(())
            }
        };

        if let Err(err) = result {
            warn!(%err, "ignoring layout request");
        }
    }

    fn layout_subviews(&mut self, id: ViewId, area: Rect) {
        let (subviews, fills) = match self.nodes.get(&id) {
            Some(node) => (
                node.subviews.clone(),
                node.container
                    .as_ref()
                    .map_or(true, |container| container.fills_subviews()),
            ),
            None => return,
        };

        let mut containers = Vec::new();
        let mut bounds = Vec::new();
        for subview in subviews {
            let subview_bounds = self
                .nodes
                .get(&subview)
                .and_then(|node| node.container.as_ref())
                .map(|container| *container.bounds());

            match subview_bounds {
                Some(subview_bounds) => {
                    containers.push(subview);
                    bounds.push(subview_bounds);
                }
                None if fills => self.apply_frame(subview, area),
                None => {}
            }
        }

        let frames = resolve_siblings(&bounds, area);
        for (subview, frame) in containers.into_iter().zip(frames) {
            self.place_container(subview, frame);
        }
    }

    /// Applies frame size changes requested by layout handlers.
    fn flush_deferred_resizes(&mut self) {
        if !self.laying_out.is_empty() {
            return;
        }

        let mut applied = 0;
        while let Some((view, size)) = self.deferred_resizes.pop_front() {
            if applied == self.config.max_deferred_resizes {
                warn!(
                    dropped = self.deferred_resizes.len() + 1,
                    "too many resizes requested during layout; dropping the rest"
                );
                self.deferred_resizes.clear();
                break;
            }
            applied += 1;

            if let Err(err) = self.resize(view, size) {
                warn!(%err, "deferred resize failed");
            }
        }
    }

    fn set_phase(&mut self, id: ViewId, phase: ScrollPhase) {
        if let Ok(scrolling) = self.scrolling_mut(id) {
            scrolling.set_phase(phase);
        }
    }

    /// Handles a bounds-changed notification from the host for a scrolling container.
    pub fn scroll_bounds_changed(&mut self, id: ViewId) -> Result<()> {
        self.scrolling(id)?;
        self.notify_scroll(id);
        Ok(())
    }

    /// Computes the visible part of the document and sends it to the scroll handler.
    ///
    /// Does nothing for views that aren’t scrolling containers or have no document.
    fn notify_scroll(&mut self, id: ViewId) {
        let (visible, handler) = {
            let node = match self.nodes.get_mut(&id) {
                Some(node) => node,
                None => return,
            };
            let document = match node.document.as_ref() {
                Some(document) => document,
                None => return,
            };
            let scrolling = match node
                .container
                .as_deref_mut()
                .and_then(|container| container.as_scrolling_mut())
            {
                Some(scrolling) => scrolling,
                None => return,
            };

            scrolling.set_phase(ScrollPhase::ScrollNotified);
            let visible = self
                .backend
                .convert_rect(node.frame.local(), &node.native, document);
            scrolling.set_visible_rect(visible);
            (visible, scrolling.handlers().on_scroll.clone())
        };

        trace!(%id, ?visible, "scrolled");
        if let Some(handler) = handler {
            handler.call(visible);
        }
        self.set_phase(id, ScrollPhase::Idle);
    }

    /// Calls `handler` for the source view and each of its ancestors that is a container, until
    /// one returns true.
    ///
    /// Returns whether any handler returned true.
    pub fn bubble<F>(&mut self, source: ViewId, mut handler: F) -> Result<bool>
    where
        F: FnMut(ViewId, &mut dyn Container) -> bool,
    {
        self.node(source)?;

        let mut current = Some(source);
        while let Some(id) = current {
            let node = match self.nodes.get_mut(&id) {
                Some(node) => node,
                None => break,
            };
            if let Some(container) = node.container.as_deref_mut() {
                trace!(%id, "bubbling");
                if handler(id, container) {
                    return Ok(true);
                }
            }
            current = node.superview;
        }

        Ok(false)
    }

    /// Sends a click to a view and its ancestors until one of them handles it.
    pub fn trigger_click(&mut self, id: ViewId) -> Result<bool> {
        self.bubble(id, |_, container| {
            container
                .handlers()
                .on_click
                .as_ref()
                .and_then(|handler| handler.call())
                .unwrap_or(false)
        })
    }
}

impl<B: Backend> Drop for ViewTree<B> {
    fn drop(&mut self) {
        for node in self.nodes.values() {
            if node.document.is_some() {
                self.backend.unsubscribe_bounds_changed(&node.native);
            }
        }
    }
}
