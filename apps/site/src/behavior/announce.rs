//! Live-region announcements for assistive technology.

use crate::behavior::timers::{TimerId, TimerQueue};
use crate::dom::Dom;

/// Spacing between consecutive announcements of one batch.
pub const STAGGER_DELAY_MS: u64 = 200;

/// How long announced text stays in the live region.
pub const LIVE_REGION_CLEAR_MS: u64 = 1200;

/// Deferred reset of a live region's text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearLiveRegion {
    pub region: String,
}

/// Schedules `tasks` at `0, spacing, 2·spacing, …` from now, in order.
pub fn stagger<T>(
    timers: &mut TimerQueue<T>,
    tasks: impl IntoIterator<Item = T>,
    spacing_ms: u64,
) -> Vec<TimerId> {
    tasks
        .into_iter()
        .enumerate()
        .map(|(i, task)| timers.schedule(i as u64 * spacing_ms, task))
        .collect()
}

/// Writes `text` into the live region and schedules its clearing.
///
/// A missing region is a silent no-op and returns false.
pub fn announce<D, T>(dom: &mut D, timers: &mut TimerQueue<T>, region: &str, text: &str) -> bool
where
    D: Dom + ?Sized,
    T: From<ClearLiveRegion>,
{
    if !dom.set_text(region, text) {
        return false;
    }
    timers.schedule(
        LIVE_REGION_CLEAR_MS,
        T::from(ClearLiveRegion {
            region: region.to_string(),
        }),
    );
    true
}

pub fn clear<D: Dom + ?Sized>(dom: &mut D, task: &ClearLiveRegion) {
    dom.set_text(&task.region, "");
}
