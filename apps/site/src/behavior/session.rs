//! One mounted page: wires scroll tracking, reveal observers, show-more
//! lists and timed announcements together over a host document.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::behavior::announce::{self, ClearLiveRegion, STAGGER_DELAY_MS};
use crate::behavior::reveal::{
    self, IntersectionEntry, ObserverOptions, RevealEngine, RevealFallback,
};
use crate::behavior::scroll::ScrollTracker;
use crate::behavior::show_more::{
    ListSection, ShowMore, EMPLOYMENT_INITIAL_COUNT, RECOMMENDATIONS_INITIAL_COUNT,
    TOP_SKILLS_COUNT,
};
use crate::behavior::timers::{TimerId, TimerQueue};
use crate::dom::{DocumentRoot, Dom, EventKind, ListenerId};
use crate::i18n::Locale;
use crate::models::cv::{CvProfile, Skill};
use crate::preferences::{PreferenceStore, SiteContext};

pub const HERO_ID: &str = "hero-section";
pub const SKILLS_SECTION_ID: &str = "skills-section";
/// Visible fraction of the skills section that starts the bar animation.
pub const SKILLS_THRESHOLD: f64 = 0.2;

/// Marker element positioned along skill `index`'s bar.
pub fn skill_arrow_id(index: usize) -> String {
    format!("skill-arrow-{index}")
}

pub fn skill_announcement(skill: &Skill) -> String {
    format!("{}: {}%", skill.name, skill.level)
}

/// What an observer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    RevealElement,
    AnimateSkills,
}

/// Deferred work released by the session's timer queue.
#[derive(Debug, Clone, PartialEq)]
pub enum PageTask {
    AnimateSkill { index: usize, name: String, level: u8 },
    AnnounceItem { region: String, text: String },
    ClearLiveRegion(ClearLiveRegion),
    RevealFallback,
}

impl From<ClearLiveRegion> for PageTask {
    fn from(task: ClearLiveRegion) -> Self {
        PageTask::ClearLiveRegion(task)
    }
}

impl From<RevealFallback> for PageTask {
    fn from(_: RevealFallback) -> Self {
        PageTask::RevealFallback
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavState {
    /// Set by the first scroll away from the top, never reset.
    pub has_scrolled: bool,
    pub hero_visible: bool,
    pub show_name_in_nav: bool,
}

impl Default for NavState {
    fn default() -> Self {
        NavState {
            has_scrolled: false,
            hero_visible: true,
            show_name_in_nav: false,
        }
    }
}

impl NavState {
    pub fn show_nav(&self) -> bool {
        self.has_scrolled && !self.hero_visible
    }
}

pub struct PageSession<D, S>
where
    D: Dom + DocumentRoot,
    S: PreferenceStore,
{
    dom: D,
    context: SiteContext<S>,
    scroll: ScrollTracker,
    reveal: RevealEngine<PageAction>,
    timers: TimerQueue<PageTask>,
    skills: ShowMore<Skill>,
    employment: ShowMore<String>,
    recommendations: ShowMore<String>,
    /// Staggered tasks queued by the last expansion of each list.
    expansion_batches: HashMap<ListSection, Vec<TimerId>>,
    nav: NavState,
    first_scroll_listener: Option<ListenerId>,
    /// Last hero intersection delivered; `None` while the hero is unobserved.
    hero_intersecting: Option<bool>,
    mounted: bool,
}

impl<D, S> PageSession<D, S>
where
    D: Dom + DocumentRoot,
    S: PreferenceStore,
{
    /// `context` must already have been applied to `dom`'s root.
    pub fn new(dom: D, context: SiteContext<S>, profile: &CvProfile) -> Self {
        let skills = ShowMore::sorted_by(profile.skills.clone(), TOP_SKILLS_COUNT, |a, b| {
            b.level.cmp(&a.level)
        });
        let employment = ShowMore::new(
            profile.companies.iter().map(|c| c.company.clone()).collect(),
            EMPLOYMENT_INITIAL_COUNT,
        );
        let recommendations = ShowMore::new(
            profile
                .recommendations
                .iter()
                .map(|r| format!("{} {}", r.name, r.surname))
                .collect(),
            RECOMMENDATIONS_INITIAL_COUNT,
        );

        PageSession {
            dom,
            context,
            scroll: ScrollTracker::default(),
            reveal: RevealEngine::new(),
            timers: TimerQueue::new(),
            skills,
            employment,
            recommendations,
            expansion_batches: HashMap::new(),
            nav: NavState::default(),
            first_scroll_listener: None,
            hero_intersecting: None,
            mounted: false,
        }
    }

    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        self.scroll.mount(&mut self.dom);
        self.first_scroll_listener = Some(self.dom.add_listener(EventKind::Scroll, true));
        self.check_first_scroll();

        self.reveal.setup_scroll_reveal(
            &mut self.dom,
            &mut self.timers,
            PageAction::RevealElement,
        );
        self.reveal.observe_element(
            &self.dom,
            SKILLS_SECTION_ID,
            ObserverOptions::with_threshold(SKILLS_THRESHOLD),
            true,
            PageAction::AnimateSkills,
        );

        // observers report the initial state of their targets
        if let Some(hero) = self.measure_hero() {
            self.apply_hero(hero.is_intersecting);
        }
        let entries = self.reveal.measure(&self.dom);
        self.intersect(&entries);
    }

    /// Scroll event: the host has already moved to its new position.
    pub fn on_scroll(&mut self) {
        let y = self.dom.scroll_y();
        self.scroll.on_scroll(y);
        self.check_first_scroll();

        if let Some(hero) = self.measure_hero() {
            if self.hero_intersecting != Some(hero.is_intersecting) {
                self.apply_hero(hero.is_intersecting);
            }
        }
        let entries = self.reveal.measure(&self.dom);
        self.intersect(&entries);
    }

    /// Delivers intersection entries from the host.
    pub fn intersect(&mut self, entries: &[IntersectionEntry]) {
        if self.hero_intersecting.is_some() {
            if let Some(hero) = entries.iter().rev().find(|e| e.target == HERO_ID) {
                self.apply_hero(hero.is_intersecting);
            }
        }

        let mut fired = Vec::new();
        self.reveal.dispatch(entries, |action, entry| {
            fired.push((*action, entry.target.clone()));
        });
        for (action, target) in fired {
            match action {
                PageAction::RevealElement => {
                    reveal::mark_revealed(&mut self.dom, &target);
                }
                PageAction::AnimateSkills => {
                    let top = self.skills.top_items().to_vec();
                    // the top skills stay visible, so this batch is never cancelled
                    self.schedule_skill_animation(&top, 0);
                }
            }
        }
    }

    /// Flips a list's expansion. Items that become visible are animated or
    /// announced one after another; collapsing drops whatever of that batch
    /// has not run yet. Returns the new expansion state.
    pub fn toggle_section(&mut self, section: ListSection) -> bool {
        self.cancel_expansion_batch(section);
        let (expanded, batch) = match section {
            ListSection::Skills => {
                let shown = self.skills.toggle_expand().to_vec();
                let start = self.skills.visible_count();
                let batch = self.schedule_skill_animation(&shown, start);
                (self.skills.is_expanded(), batch)
            }
            ListSection::Employment | ListSection::Recommendations => {
                let list = match section {
                    ListSection::Employment => &mut self.employment,
                    _ => &mut self.recommendations,
                };
                let shown = list.toggle_expand().to_vec();
                let expanded = list.is_expanded();
                let region = section.live_region();
                let batch = announce::stagger(
                    &mut self.timers,
                    shown.into_iter().map(|text| PageTask::AnnounceItem {
                        region: region.to_string(),
                        text,
                    }),
                    STAGGER_DELAY_MS,
                );
                (expanded, batch)
            }
        };
        if !batch.is_empty() {
            self.expansion_batches.insert(section, batch);
        }
        expanded
    }

    /// Moves the virtual clock forward, running due tasks in order.
    pub fn advance(&mut self, ms: u64) {
        let until = self.timers.now_ms().saturating_add(ms);
        while let Some((_, task)) = self.timers.pop_due(until) {
            self.run_task(task);
        }
        self.timers.advance_clock(until);
    }

    pub fn page_hide(&mut self, persisted: bool) {
        self.scroll.on_page_hide(&mut self.dom, persisted);
    }

    pub fn page_show(&mut self, persisted: bool) {
        self.scroll.on_page_show(&mut self.dom, persisted);
    }

    /// Removes every listener, observer and pending timer the session owns.
    pub fn unmount(&mut self) {
        self.scroll.unmount(&mut self.dom);
        if let Some(id) = self.first_scroll_listener.take() {
            self.dom.remove_listener(id);
        }
        self.reveal.disconnect_all();
        self.timers.clear();
        self.expansion_batches.clear();
        self.hero_intersecting = None;
        self.mounted = false;
    }

    pub fn toggle_theme(&mut self) {
        self.context.toggle_theme(&mut self.dom);
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.context.set_locale(locale, &mut self.dom);
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn context(&self) -> &SiteContext<S> {
        &self.context
    }

    pub fn nav(&self) -> NavState {
        self.nav
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll.is_scrolled()
    }

    pub fn scroll_tracker(&self) -> &ScrollTracker {
        &self.scroll
    }

    pub fn reveal_engine(&self) -> &RevealEngine<PageAction> {
        &self.reveal
    }

    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    pub fn skills(&self) -> &ShowMore<Skill> {
        &self.skills
    }

    pub fn is_expanded(&self, section: ListSection) -> bool {
        match section {
            ListSection::Skills => self.skills.is_expanded(),
            ListSection::Employment => self.employment.is_expanded(),
            ListSection::Recommendations => self.recommendations.is_expanded(),
        }
    }

    fn check_first_scroll(&mut self) {
        let listening = self.first_scroll_listener.is_some();
        if listening && !self.nav.has_scrolled && self.dom.scroll_y() > 0.0 {
            self.nav.has_scrolled = true;
        }
    }

    fn cancel_expansion_batch(&mut self, section: ListSection) {
        let Some(batch) = self.expansion_batches.remove(&section) else {
            return;
        };
        let cancelled = batch.into_iter().filter(|id| self.timers.cancel(*id)).count();
        if cancelled > 0 {
            debug!("Dropped {cancelled} queued {} items", section.name());
        }
    }

    fn measure_hero(&self) -> Option<IntersectionEntry> {
        if !self.mounted {
            return None;
        }
        let rect = self.dom.bounding_rect(HERO_ID)?;
        Some(reveal::measure_entry(
            HERO_ID.to_string(),
            rect,
            self.dom.viewport(),
            0.0,
        ))
    }

    fn apply_hero(&mut self, intersecting: bool) {
        self.hero_intersecting = Some(intersecting);
        self.nav.hero_visible = intersecting;
        // past the threshold the header shows the name on its own
        if !self.scroll.is_scrolled() {
            self.nav.show_name_in_nav = !intersecting;
        }
    }

    fn schedule_skill_animation(&mut self, skills: &[Skill], start_index: usize) -> Vec<TimerId> {
        if skills.is_empty() {
            return Vec::new();
        }
        debug!("Animating {} skills from index {start_index}", skills.len());
        announce::stagger(
            &mut self.timers,
            skills.iter().enumerate().map(|(i, skill)| PageTask::AnimateSkill {
                index: start_index + i,
                name: skill.name.clone(),
                level: skill.level,
            }),
            STAGGER_DELAY_MS,
        )
    }

    fn run_task(&mut self, task: PageTask) {
        match task {
            PageTask::AnimateSkill { index, name, level } => {
                self.dom
                    .set_style(&skill_arrow_id(index), "left", &format!("{level}%"));
                let text = skill_announcement(&Skill { name, level });
                announce::announce(&mut self.dom, &mut self.timers, "skills-live", &text);
            }
            PageTask::AnnounceItem { region, text } => {
                announce::announce(&mut self.dom, &mut self.timers, &region, &text);
            }
            PageTask::ClearLiveRegion(task) => announce::clear(&mut self.dom, &task),
            PageTask::RevealFallback => {
                let revealed = reveal::reveal_remaining(&mut self.dom);
                if revealed > 0 {
                    debug!("Reveal fallback showed {revealed} elements");
                }
            }
        }
    }
}

impl<S: PreferenceStore> PageSession<crate::dom::VirtualDom, S> {
    /// Scrolls the virtual document and delivers the scroll event.
    pub fn scroll_to(&mut self, y: f64) {
        self.dom.set_scroll_y(y);
        self.on_scroll();
    }
}
