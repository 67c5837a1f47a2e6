//! Intersection-driven reveal.
//!
//! Each observer keeps an explicit `{Watching, Fired}` state per target
//! instead of relying on implicit observer teardown. A fire-once observer
//! moves a target to `Fired` on its first qualifying intersection and never
//! reports it again.

use std::collections::BTreeMap;

use tracing::debug;

use crate::behavior::timers::TimerQueue;
use crate::dom::{Dom, Rect, Viewport};

/// Class marking elements that animate in when scrolled into view.
pub const REVEAL_CLASS: &str = "scroll-reveal";
pub const REVEALED_CLASS: &str = "revealed";
pub const REVEAL_THRESHOLD: f64 = 0.05;
/// Reveals whatever is still hidden, for hosts where observation never fires.
pub const REVEAL_FALLBACK_MS: u64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Minimum visible fraction of the target, `0.0..=1.0`.
    pub threshold: f64,
    /// Grows (positive) or shrinks (negative) the viewport on every side.
    pub root_margin_px: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        ObserverOptions {
            threshold: 0.2,
            root_margin_px: 0.0,
        }
    }
}

impl ObserverOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        ObserverOptions {
            threshold,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    pub target: String,
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    Watching,
    Fired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(u64);

/// Timer task that force-reveals every remaining element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealFallback;

#[derive(Debug)]
struct Observer<A> {
    options: ObserverOptions,
    once: bool,
    action: A,
    targets: Vec<(String, WatchState)>,
}

impl<A> Observer<A> {
    fn qualifies(&self, entry: &IntersectionEntry) -> bool {
        entry.is_intersecting && entry.intersection_ratio >= self.options.threshold
    }
}

/// Registry of observers, each carrying the action to run when it fires.
#[derive(Debug)]
pub struct RevealEngine<A> {
    observers: BTreeMap<ObserverId, Observer<A>>,
    next_id: u64,
}

impl<A> Default for RevealEngine<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> RevealEngine<A> {
    pub fn new() -> Self {
        RevealEngine {
            observers: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Observes element `id`. Returns `None`, registering nothing, when the
    /// element is not in the document.
    pub fn observe_element<D: Dom + ?Sized>(
        &mut self,
        dom: &D,
        id: &str,
        options: ObserverOptions,
        once: bool,
        action: A,
    ) -> Option<ObserverId> {
        if !dom.contains(id) {
            debug!("observe_element: no element '{id}', skipping");
            return None;
        }
        Some(self.observe_targets(vec![id.to_string()], options, once, action))
    }

    fn observe_targets(
        &mut self,
        targets: Vec<String>,
        options: ObserverOptions,
        once: bool,
        action: A,
    ) -> ObserverId {
        self.next_id += 1;
        let id = ObserverId(self.next_id);
        self.observers.insert(
            id,
            Observer {
                options,
                once,
                action,
                targets: targets
                    .into_iter()
                    .map(|t| (t, WatchState::Watching))
                    .collect(),
            },
        );
        id
    }

    /// Delivers intersection entries to every observer watching their
    /// targets, invoking `callback` for each qualifying, still-watching one.
    pub fn dispatch<F>(&mut self, entries: &[IntersectionEntry], mut callback: F)
    where
        F: FnMut(&A, &IntersectionEntry),
    {
        for observer in self.observers.values_mut() {
            for entry in entries {
                if !observer.qualifies(entry) {
                    continue;
                }
                let once = observer.once;
                let Some(state) = observer
                    .targets
                    .iter_mut()
                    .find(|(t, _)| *t == entry.target)
                    .map(|(_, s)| s)
                else {
                    continue;
                };
                if *state == WatchState::Fired {
                    continue;
                }
                if once {
                    *state = WatchState::Fired;
                }
                callback(&observer.action, entry);
            }
        }
    }

    pub fn state(&self, observer: ObserverId, target: &str) -> Option<WatchState> {
        self.observers
            .get(&observer)?
            .targets
            .iter()
            .find(|(t, _)| t == target)
            .map(|(_, s)| *s)
    }

    /// Targets still in `Watching` state across all observers, deduplicated.
    pub fn watched_targets(&self) -> Vec<String> {
        let mut targets: Vec<String> = self
            .observers
            .values()
            .flat_map(|o| o.targets.iter())
            .filter(|(_, s)| *s == WatchState::Watching)
            .map(|(t, _)| t.clone())
            .collect();
        targets.sort();
        targets.dedup();
        targets
    }

    /// Root margin of the widest observer watching `target`.
    fn margin_for(&self, target: &str) -> f64 {
        self.observers
            .values()
            .filter(|o| o.targets.iter().any(|(t, _)| t == target))
            .map(|o| o.options.root_margin_px)
            .fold(0.0, f64::max)
    }

    /// Measures every watched target against the current layout.
    pub fn measure<D: Dom + ?Sized>(&self, dom: &D) -> Vec<IntersectionEntry> {
        self.watched_targets()
            .into_iter()
            .filter_map(|target| {
                let rect = dom.bounding_rect(&target)?;
                let margin = self.margin_for(&target);
                Some(measure_entry(target, rect, dom.viewport(), margin))
            })
            .collect()
    }

    pub fn unobserve(&mut self, observer: ObserverId, target: &str) {
        if let Some(o) = self.observers.get_mut(&observer) {
            o.targets.retain(|(t, _)| t != target);
        }
    }

    pub fn disconnect(&mut self, observer: ObserverId) -> bool {
        self.observers.remove(&observer).is_some()
    }

    pub fn disconnect_all(&mut self) {
        self.observers.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Batch reveal for every `.scroll-reveal` element.
    ///
    /// Elements already in the viewport are revealed immediately; the rest
    /// are observed (fire-once, threshold 0.05) with `action`. A fallback
    /// timer is scheduled to reveal anything observation never reaches.
    pub fn setup_scroll_reveal<D, T>(
        &mut self,
        dom: &mut D,
        timers: &mut TimerQueue<T>,
        action: A,
    ) -> Option<ObserverId>
    where
        D: Dom + ?Sized,
        T: From<RevealFallback>,
    {
        let elements = dom.elements_with_class(REVEAL_CLASS);
        if elements.is_empty() {
            return None;
        }

        let viewport = dom.viewport();
        let mut pending = Vec::new();
        for id in elements {
            if dom.has_class(&id, REVEALED_CLASS) {
                continue;
            }
            let in_view = dom
                .bounding_rect(&id)
                .is_some_and(|rect| rect.overlaps(viewport));
            if in_view {
                mark_revealed(dom, &id);
            } else {
                pending.push(id);
            }
        }

        timers.schedule(REVEAL_FALLBACK_MS, T::from(RevealFallback));

        if pending.is_empty() {
            return None;
        }
        debug!("Observing {} elements for scroll reveal", pending.len());
        Some(self.observe_targets(
            pending,
            ObserverOptions {
                threshold: REVEAL_THRESHOLD,
                root_margin_px: 0.0,
            },
            true,
            action,
        ))
    }
}

/// Adds the revealed class. Returns false when it was already revealed or
/// the element is gone.
pub fn mark_revealed<D: Dom + ?Sized>(dom: &mut D, id: &str) -> bool {
    if dom.has_class(id, REVEALED_CLASS) {
        return false;
    }
    dom.add_class(id, REVEALED_CLASS)
}

/// Fallback handler: reveals every element still hidden. Returns how many.
pub fn reveal_remaining<D: Dom + ?Sized>(dom: &mut D) -> usize {
    dom.elements_with_class(REVEAL_CLASS)
        .into_iter()
        .filter(|id| mark_revealed(dom, id))
        .count()
}

/// Visible fraction of `rect` inside the viewport grown by `margin`.
pub fn measure_entry(
    target: String,
    rect: Rect,
    viewport: Viewport,
    margin: f64,
) -> IntersectionEntry {
    let top = (-margin).max(rect.top);
    let bottom = (viewport.height + margin).min(rect.bottom());
    let left = (-margin).max(rect.left);
    let right = (viewport.width + margin).min(rect.right());
    let visible = (bottom - top).max(0.0) * (right - left).max(0.0);
    let area = rect.width * rect.height;

    let intersection_ratio = if area > 0.0 { visible / area } else { 0.0 };
    IntersectionEntry {
        target,
        is_intersecting: visible > 0.0,
        intersection_ratio,
    }
}
