//! Scroll tracking: "has the page scrolled past the threshold".

use tracing::debug;

use crate::dom::{EventHost, EventKind, ListenerId};

/// Offset in pixels after which the header collapses.
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;

/// Tracks `scroll_y > threshold` through one passive scroll listener.
///
/// Page-hide with `persisted` (entering the back/forward cache) drops the
/// scroll listener; the matching page-show re-attaches it.
#[derive(Debug)]
pub struct ScrollTracker {
    threshold: f64,
    is_scrolled: bool,
    scroll_listener: Option<ListenerId>,
    lifecycle_listeners: Vec<ListenerId>,
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new(SCROLL_THRESHOLD_PX)
    }
}

impl ScrollTracker {
    pub fn new(threshold: f64) -> Self {
        ScrollTracker {
            threshold,
            is_scrolled: false,
            scroll_listener: None,
            lifecycle_listeners: Vec::new(),
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.is_scrolled
    }

    pub fn is_listening(&self) -> bool {
        self.scroll_listener.is_some()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn mount<H: EventHost + ?Sized>(&mut self, host: &mut H) {
        self.attach(host);
        if self.lifecycle_listeners.is_empty() {
            self.lifecycle_listeners = vec![
                host.add_listener(EventKind::PageHide, false),
                host.add_listener(EventKind::PageShow, false),
            ];
        }
    }

    /// Scroll event handler. Ignored while detached.
    pub fn on_scroll(&mut self, scroll_y: f64) {
        if self.is_listening() {
            self.is_scrolled = scroll_y > self.threshold;
        }
    }

    pub fn on_page_hide<H: EventHost + ?Sized>(&mut self, host: &mut H, persisted: bool) {
        if persisted {
            debug!("Page entering bfcache, detaching scroll listener");
            self.detach(host);
        }
    }

    pub fn on_page_show<H: EventHost + ?Sized>(&mut self, host: &mut H, persisted: bool) {
        if persisted {
            debug!("Page restored from bfcache, re-attaching scroll listener");
            self.attach(host);
        }
    }

    pub fn unmount<H: EventHost + ?Sized>(&mut self, host: &mut H) {
        for id in self.lifecycle_listeners.drain(..) {
            host.remove_listener(id);
        }
        self.detach(host);
    }

    fn attach<H: EventHost + ?Sized>(&mut self, host: &mut H) {
        if self.scroll_listener.is_none() {
            self.scroll_listener = Some(host.add_listener(EventKind::Scroll, true));
            // evaluate the position the page was opened (or restored) at
            self.on_scroll(host.scroll_y());
        }
    }

    fn detach<H: EventHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(id) = self.scroll_listener.take() {
            host.remove_listener(id);
        }
    }
}
