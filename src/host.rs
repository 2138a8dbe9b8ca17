use crate::backend::Backend;
use crate::config::TreeConfig;
use crate::events::HostEvent;
use crate::tree::ViewTree;
use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use tracing::{debug, trace, warn};

/// Connects a view tree to a backend’s event stream.
pub struct Host<B: Backend> {
    pub tree: ViewTree<B>,
    event_send: Sender<HostEvent>,
    event_recv: Receiver<HostEvent>,
}

impl<B: Backend> Host<B> {
    /// Creates a new Host.
    ///
    /// The backend is handed the sending half of the event queue. Nothing is dispatched until you
    /// call `poll`.
    pub fn new(mut backend: B, config: TreeConfig) -> Host<B> {
        let (event_send, event_recv) = channel::unbounded();
        backend.connect(event_send.clone());

        Host {
            tree: ViewTree::with_config(backend, config),
            event_send,
            event_recv,
        }
    }

    /// A sender for posting host events from elsewhere (e.g. another thread).
    pub fn sender(&self) -> Sender<HostEvent> {
        self.event_send.clone()
    }

    /// Receives the events that are in the event queue and updates the tree accordingly.
    ///
    /// Events posted while these are being handled (e.g. by a handler that resizes its own
    /// container) are left for the next call. Returns the number of events handled.
    pub fn poll(&mut self) -> usize {
        let pending = self.event_recv.len();
        let mut count = 0;
        while count < pending {
            match self.event_recv.try_recv() {
                Ok(event) => {
                    self.dispatch(event);
                    count += 1;
                }
                Err(TryRecvError::Empty) => break,
                // the host holds a sender itself
                Err(TryRecvError::Disconnected) => break,
            }
        }

        let deferred = self.event_recv.len();
        if deferred > 0 {
            debug!(deferred, "events posted during poll are left for the next one");
        }
        count
    }

    fn dispatch(&mut self, event: HostEvent) {
        trace!(?event, "host event");
        let result = match event {
            HostEvent::FrameResized { view, size } => self.tree.set_frame_size(view, size),
            HostEvent::BoundsChanged(view) => self.tree.scroll_bounds_changed(view),
            HostEvent::Click(view) => self.tree.trigger_click(view).map(|_| ()),
        };

        if let Err(err) = result {
            warn!(%err, ?event, "failed to handle host event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;
    use crate::events::{ClickHandler, ScrollHandler};
    use crate::rect::Rect;
    use cgmath::Vector2;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn poll_dispatches_backend_events() {
        let mut host = Host::new(HeadlessBackend::new(), TreeConfig::default());
        let scroll = host.tree.create_scrolling_container();
        host.tree.set_scroll_minimum_size(scroll, 0., 1000.).unwrap();

        let seen = Arc::new(Mutex::new(Vec::new()));
        host.tree
            .set_on_scroll(scroll, {
                let seen = Arc::clone(&seen);
                ScrollHandler::new(move |rect| seen.lock().push(rect))
            })
            .unwrap();
        let clicks = Arc::new(AtomicUsize::new(0));
        host.tree
            .set_on_click(scroll, {
                let clicks = Arc::clone(&clicks);
                ClickHandler::new(move || {
                    clicks.fetch_add(1, Ordering::SeqCst);
                    true
                })
            })
            .unwrap();
        seen.lock().clear();

        let native = *host.tree.native(scroll).unwrap();
        host.tree.backend_mut().resize(native, Vector2::new(200., 100.));
        assert_eq!(host.poll(), 1);
        host.tree.backend_mut().scroll_to(native, Vector2::new(0., 40.));
        host.tree.backend_mut().click(native);
        assert_eq!(host.poll(), 2);

        assert_eq!(host.tree.frame(scroll).unwrap(), (0., 0., 200., 100.).into());
        let expected: Vec<Rect> = vec![(0., 0., 200., 100.).into(), (0., 40., 200., 100.).into()];
        assert_eq!(*seen.lock(), expected);
        assert_eq!(clicks.load(Ordering::SeqCst), 1);
        assert_eq!(host.poll(), 0);
    }

    #[test]
    fn events_for_removed_views_are_dropped() {
        let mut host = Host::new(HeadlessBackend::new(), TreeConfig::default());
        let container = host.tree.create_container();
        let sender = host.sender();
        host.tree.remove_view(container).unwrap();

        sender
            .send(HostEvent::FrameResized {
                view: container,
                size: Vector2::new(10., 10.),
            })
            .unwrap();
        sender.send(HostEvent::Click(container)).unwrap();
        assert_eq!(host.poll(), 2);
        assert!(!host.tree.contains(container));
    }

    #[test]
    fn events_posted_while_polling_wait_for_the_next_poll() {
        let mut host = Host::new(HeadlessBackend::new(), TreeConfig::default());
        let scroll = host.tree.create_scrolling_container();
        let calls = Arc::new(AtomicUsize::new(0));
        let sender = host.sender();

        // resizes its own container every time it is told about a scroll
        host.tree
            .set_on_scroll(scroll, {
                let calls = Arc::clone(&calls);
                ScrollHandler::new(move |_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    sender
                        .send(HostEvent::FrameResized {
                            view: scroll,
                            size: Vector2::new(100., 100.),
                        })
                        .unwrap();
                })
            })
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert_eq!(host.poll(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(host.poll(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(host.tree.frame(scroll).unwrap(), (0., 0., 100., 100.).into());
    }
}
