//! Host abstractions the interactive behaviors run against.
//!
//! A browser bridge implements these over the real document; the server
//! renderer and the tests use [`VirtualDom`] and [`RootElement`].

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Rect {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// True when any part of the rect lies inside the viewport.
    pub fn overlaps(&self, viewport: Viewport) -> bool {
        self.top < viewport.height
            && self.bottom() > 0.0
            && self.left < viewport.width
            && self.right() > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Scroll,
    PageHide,
    PageShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Global event subscriptions (`window.addEventListener`).
pub trait EventHost {
    fn add_listener(&mut self, kind: EventKind, passive: bool) -> ListenerId;
    /// Returns false when the listener was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
    fn scroll_y(&self) -> f64;
}

/// Element queries and mutations used by reveal, announcements and animation.
pub trait Dom: EventHost {
    fn contains(&self, id: &str) -> bool;
    /// Ids of elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<String>;
    fn bounding_rect(&self, id: &str) -> Option<Rect>;
    fn viewport(&self) -> Viewport;
    fn has_class(&self, id: &str, class: &str) -> bool;
    /// Returns false when the element does not exist.
    fn add_class(&mut self, id: &str, class: &str) -> bool;
    fn set_text(&mut self, id: &str, text: &str) -> bool;
    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool;
}

/// The `<html>` element: theme class and `lang` attribute.
pub trait DocumentRoot {
    fn set_root_class(&mut self, class: &str, enabled: bool);
    fn set_lang(&mut self, lang: &str);
}

/// Attributes of the document root, rendered into the page's `<html>` tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RootElement {
    pub classes: BTreeSet<String>,
    pub lang: Option<String>,
}

impl RootElement {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Space-separated class list for the `class` attribute.
    pub fn class_attr(&self) -> String {
        self.classes
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl DocumentRoot for RootElement {
    fn set_root_class(&mut self, class: &str, enabled: bool) {
        if enabled {
            self.classes.insert(class.to_string());
        } else {
            self.classes.remove(class);
        }
    }

    fn set_lang(&mut self, lang: &str) {
        self.lang = Some(lang.to_string());
    }
}

#[derive(Debug, Clone, Default)]
pub struct VirtualElement {
    pub id: String,
    pub classes: BTreeSet<String>,
    pub rect: Rect,
    pub text: String,
    pub style: BTreeMap<String, String>,
}

/// In-memory document: elements in insertion order plus a listener table.
#[derive(Debug, Clone)]
pub struct VirtualDom {
    elements: Vec<VirtualElement>,
    viewport: Viewport,
    scroll_y: f64,
    listeners: HashMap<ListenerId, (EventKind, bool)>,
    next_listener: u64,
    pub root: RootElement,
}

impl VirtualDom {
    pub fn new(viewport: Viewport) -> Self {
        VirtualDom {
            elements: Vec::new(),
            viewport,
            scroll_y: 0.0,
            listeners: HashMap::new(),
            next_listener: 0,
            root: RootElement::default(),
        }
    }

    /// Appends an element; classes are whitespace separated.
    pub fn insert(&mut self, id: &str, classes: &str, rect: Rect) {
        self.elements.push(VirtualElement {
            id: id.to_string(),
            classes: classes.split_whitespace().map(str::to_string).collect(),
            rect,
            ..VirtualElement::default()
        });
    }

    pub fn remove(&mut self, id: &str) {
        self.elements.retain(|e| e.id != id);
    }

    pub fn element(&self, id: &str) -> Option<&VirtualElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: &str) -> Option<&mut VirtualElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.element(id).map(|e| e.text.as_str())
    }

    /// Moves the page: every element shifts up by the scroll delta.
    pub fn set_scroll_y(&mut self, y: f64) {
        let delta = y - self.scroll_y;
        for element in &mut self.elements {
            element.rect.top -= delta;
        }
        self.scroll_y = y;
    }

    pub fn active_listeners(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|(k, _)| *k == kind).count()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_passive(&self, id: ListenerId) -> Option<bool> {
        self.listeners.get(&id).map(|(_, passive)| *passive)
    }
}

impl EventHost for VirtualDom {
    fn add_listener(&mut self, kind: EventKind, passive: bool) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.insert(id, (kind, passive));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }
}

impl Dom for VirtualDom {
    fn contains(&self, id: &str) -> bool {
        self.element(id).is_some()
    }

    fn elements_with_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.classes.contains(class))
            .map(|e| e.id.clone())
            .collect()
    }

    fn bounding_rect(&self, id: &str) -> Option<Rect> {
        self.element(id).map(|e| e.rect)
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.classes.contains(class))
    }

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.classes.insert(class.to_string());
                true
            }
            None => false,
        }
    }

    fn set_text(&mut self, id: &str, text: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.text = text.to_string();
                true
            }
            None => false,
        }
    }

    fn set_style(&mut self, id: &str, property: &str, value: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.style.insert(property.to_string(), value.to_string());
                true
            }
            None => false,
        }
    }
}

impl DocumentRoot for VirtualDom {
    fn set_root_class(&mut self, class: &str, enabled: bool) {
        self.root.set_root_class(class, enabled);
    }

    fn set_lang(&mut self, lang: &str) {
        self.root.set_lang(lang);
    }
}
