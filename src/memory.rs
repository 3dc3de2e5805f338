//! In-memory page implementation.
//!
//! Backs the demo frontend and every engine test. Elements are cheap handles
//! over one shared document; state-change notifications go out on the
//! engine's event channel the same way a real page would fire them, in
//! particular: writing an unchanged open state to a disclosure is a no-op
//! and emits nothing.
//!
//! Dropping the `MemoryPage` closes the notification stream, which is how
//! the engine's event loop learns the page is gone. Element handles already
//! captured stay valid but can no longer notify.

use crate::config::PageConfig;
use crate::page::{
    Disclosure, ExpansionToggle, ListItem, Page, PageEvent, Panel, RotatingList, TextSlot,
};
use anyhow::{bail, Result};
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;

struct MenuDom {
    expanded_attr: String,
    links: Vec<String>,
    panel_hidden: bool,
    panel_classes: BTreeSet<String>,
}

struct ItemDom {
    id: u64,
    label: String,
}

struct WidgetDom {
    items: Vec<ItemDom>,
    transition: String,
    transform: String,
}

struct FaqDom {
    summary: String,
    body: String,
    open: bool,
}

struct PageDom {
    events: Option<UnboundedSender<PageEvent>>,
    menu: Option<MenuDom>,
    year_text: Option<String>,
    widget: Option<WidgetDom>,
    faq: Vec<FaqDom>,
    /// Every write any element performs. Tests use this to prove that a
    /// behavior caused no observable mutation.
    mutations: u64,
}

impl PageDom {
    fn emit(&self, event: PageEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

pub struct MemoryPage {
    inner: Arc<Mutex<PageDom>>,
}

impl MemoryPage {
    pub fn builder(events: UnboundedSender<PageEvent>) -> MemoryPageBuilder {
        MemoryPageBuilder {
            dom: PageDom {
                events: Some(events),
                menu: None,
                year_text: None,
                widget: None,
                faq: Vec::new(),
                mutations: 0,
            },
        }
    }

    /// A page with no matching elements at all.
    #[allow(dead_code)]
    pub fn empty(events: UnboundedSender<PageEvent>) -> Self {
        Self::builder(events).build()
    }

    /// Build the demo page described by the `[page]` config section.
    pub fn from_config(config: &PageConfig, events: UnboundedSender<PageEvent>) -> Self {
        let mut builder = Self::builder(events);
        if config.menu {
            let links: Vec<&str> = config.menu_links.iter().map(String::as_str).collect();
            builder = builder.with_menu(&links);
        }
        if config.year_slot {
            builder = builder.with_year_slot();
        }
        if !config.widget_items.is_empty() {
            let items: Vec<&str> = config.widget_items.iter().map(String::as_str).collect();
            builder = builder.with_widget_items(&items);
        }
        for entry in &config.faq {
            builder = builder.with_faq_entry(&entry.summary, &entry.body, entry.open);
        }
        builder.build()
    }

    /// Simulate a user click on the menu toggle control.
    pub fn click_menu_toggle(&self) {
        let dom = self.inner.lock().unwrap();
        if dom.menu.is_some() {
            dom.emit(PageEvent::MenuActivated);
        }
    }

    /// Simulate a user toggling a FAQ entry, flipping its open state.
    pub fn toggle_disclosure(&self, index: usize) {
        let mut dom = self.inner.lock().unwrap();
        if let Some(entry) = dom.faq.get(index) {
            let open = !entry.open;
            dom.faq[index].open = open;
            dom.mutations += 1;
            dom.emit(PageEvent::DisclosureToggled { index });
        }
    }

    pub fn mutation_count(&self) -> u64 {
        self.inner.lock().unwrap().mutations
    }

    /// Read-only copy of the whole document, for rendering and assertions.
    pub fn snapshot(&self) -> PageSnapshot {
        let dom = self.inner.lock().unwrap();
        PageSnapshot {
            menu_expanded_attr: dom.menu.as_ref().map(|m| m.expanded_attr.clone()),
            menu_links: dom
                .menu
                .as_ref()
                .map(|m| m.links.clone())
                .unwrap_or_default(),
            menu_panel_hidden: dom.menu.as_ref().map(|m| m.panel_hidden),
            menu_panel_classes: dom
                .menu
                .as_ref()
                .map(|m| m.panel_classes.clone())
                .unwrap_or_default(),
            year_text: dom.year_text.clone(),
            widget_labels: dom
                .widget
                .as_ref()
                .map(|w| w.items.iter().map(|i| i.label.clone()).collect())
                .unwrap_or_default(),
            widget_transition: dom
                .widget
                .as_ref()
                .map(|w| w.transition.clone())
                .unwrap_or_default(),
            widget_transform: dom
                .widget
                .as_ref()
                .map(|w| w.transform.clone())
                .unwrap_or_default(),
            faq: dom
                .faq
                .iter()
                .map(|f| FaqSnapshot {
                    summary: f.summary.clone(),
                    body: f.body.clone(),
                    open: f.open,
                })
                .collect(),
        }
    }
}

impl Drop for MemoryPage {
    fn drop(&mut self) {
        // Close the notification stream so event loops can drain and exit.
        self.inner.lock().unwrap().events = None;
    }
}

pub struct MemoryPageBuilder {
    dom: PageDom,
}

impl MemoryPageBuilder {
    /// Add the menu toggle control and its companion panel, initially
    /// collapsed and hidden.
    pub fn with_menu(mut self, links: &[&str]) -> Self {
        self.dom.menu = Some(MenuDom {
            expanded_attr: "false".to_string(),
            links: links.iter().map(|s| s.to_string()).collect(),
            panel_hidden: true,
            panel_classes: BTreeSet::new(),
        });
        self
    }

    pub fn with_year_slot(mut self) -> Self {
        self.dom.year_text = Some(String::new());
        self
    }

    pub fn with_widget_items(mut self, labels: &[&str]) -> Self {
        self.dom.widget = Some(WidgetDom {
            items: labels
                .iter()
                .enumerate()
                .map(|(i, label)| ItemDom {
                    id: i as u64,
                    label: label.to_string(),
                })
                .collect(),
            transition: String::new(),
            transform: String::new(),
        });
        self
    }

    /// Add closed FAQ entries with the given summaries.
    #[allow(dead_code)]
    pub fn with_faq(mut self, summaries: &[&str]) -> Self {
        for summary in summaries {
            self = self.with_faq_entry(summary, "", false);
        }
        self
    }

    pub fn with_faq_entry(mut self, summary: &str, body: &str, open: bool) -> Self {
        self.dom.faq.push(FaqDom {
            summary: summary.to_string(),
            body: body.to_string(),
            open,
        });
        self
    }

    pub fn build(self) -> MemoryPage {
        MemoryPage {
            inner: Arc::new(Mutex::new(self.dom)),
        }
    }
}

/// Point-in-time copy of the document.
#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub menu_expanded_attr: Option<String>,
    pub menu_links: Vec<String>,
    pub menu_panel_hidden: Option<bool>,
    pub menu_panel_classes: BTreeSet<String>,
    pub year_text: Option<String>,
    pub widget_labels: Vec<String>,
    pub widget_transition: String,
    pub widget_transform: String,
    pub faq: Vec<FaqSnapshot>,
}

#[derive(Debug, Clone)]
pub struct FaqSnapshot {
    pub summary: String,
    pub body: String,
    pub open: bool,
}

impl PageSnapshot {
    pub fn faq_open(&self) -> Vec<bool> {
        self.faq.iter().map(|f| f.open).collect()
    }
}

// Element handles. Each one is a thin view over the shared document; lookups
// hand these out as trait objects so the engine never depends on this module.

struct MemoryToggle {
    inner: Arc<Mutex<PageDom>>,
}

impl ExpansionToggle for MemoryToggle {
    fn expanded_attr(&self) -> String {
        self.inner
            .lock()
            .unwrap()
            .menu
            .as_ref()
            .map(|m| m.expanded_attr.clone())
            .unwrap_or_default()
    }

    fn set_expanded_attr(&self, value: &str) {
        let mut dom = self.inner.lock().unwrap();
        if let Some(menu) = dom.menu.as_mut() {
            menu.expanded_attr = value.to_string();
            dom.mutations += 1;
        }
    }
}

struct MemoryPanel {
    inner: Arc<Mutex<PageDom>>,
}

impl Panel for MemoryPanel {
    fn set_hidden(&self, hidden: bool) {
        let mut dom = self.inner.lock().unwrap();
        if let Some(menu) = dom.menu.as_mut() {
            menu.panel_hidden = hidden;
            dom.mutations += 1;
        }
    }

    fn set_class(&self, class: &str, present: bool) {
        let mut dom = self.inner.lock().unwrap();
        if let Some(menu) = dom.menu.as_mut() {
            if present {
                menu.panel_classes.insert(class.to_string());
            } else {
                menu.panel_classes.remove(class);
            }
            dom.mutations += 1;
        }
    }
}

struct MemoryYearSlot {
    inner: Arc<Mutex<PageDom>>,
}

impl TextSlot for MemoryYearSlot {
    fn set_text(&self, text: &str) {
        let mut dom = self.inner.lock().unwrap();
        if dom.year_text.is_some() {
            dom.year_text = Some(text.to_string());
            dom.mutations += 1;
        }
    }
}

struct MemoryItem {
    id: u64,
    label: String,
}

impl ListItem for MemoryItem {
    fn node_id(&self) -> u64 {
        self.id
    }

    fn label(&self) -> String {
        self.label.clone()
    }
}

struct MemoryList {
    inner: Arc<Mutex<PageDom>>,
}

impl RotatingList for MemoryList {
    fn snapshot_items(&self) -> Vec<Arc<dyn ListItem>> {
        self.inner
            .lock()
            .unwrap()
            .widget
            .as_ref()
            .map(|w| {
                w.items
                    .iter()
                    .map(|item| {
                        Arc::new(MemoryItem {
                            id: item.id,
                            label: item.label.clone(),
                        }) as Arc<dyn ListItem>
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn set_transition(&self, value: &str) {
        let mut dom = self.inner.lock().unwrap();
        if let Some(widget) = dom.widget.as_mut() {
            widget.transition = value.to_string();
            dom.mutations += 1;
        }
    }

    fn set_transform(&self, value: &str) {
        let mut dom = self.inner.lock().unwrap();
        if let Some(widget) = dom.widget.as_mut() {
            widget.transform = value.to_string();
            dom.mutations += 1;
        }
    }

    fn move_to_end(&self, item: &dyn ListItem) -> Result<()> {
        let mut dom = self.inner.lock().unwrap();
        let Some(widget) = dom.widget.as_mut() else {
            bail!("widget container is gone");
        };
        let Some(pos) = widget.items.iter().position(|i| i.id == item.node_id()) else {
            bail!(
                "item '{}' is no longer a child of the widget container",
                item.label()
            );
        };
        let moved = widget.items.remove(pos);
        widget.items.push(moved);
        dom.mutations += 1;
        Ok(())
    }
}

struct MemoryDisclosure {
    inner: Arc<Mutex<PageDom>>,
    index: usize,
}

impl Disclosure for MemoryDisclosure {
    fn is_open(&self) -> bool {
        self.inner
            .lock()
            .unwrap()
            .faq
            .get(self.index)
            .map(|f| f.open)
            .unwrap_or(false)
    }

    fn set_open(&self, open: bool) {
        let mut dom = self.inner.lock().unwrap();
        let Some(entry) = dom.faq.get(self.index) else {
            return;
        };
        // Unchanged writes are silent no-ops, like `details.open = false` on
        // an already-closed element.
        if entry.open == open {
            return;
        }
        dom.faq[self.index].open = open;
        dom.mutations += 1;
        let index = self.index;
        dom.emit(PageEvent::DisclosureToggled { index });
    }
}

impl Page for MemoryPage {
    fn menu_toggle(&self) -> Option<Arc<dyn ExpansionToggle>> {
        self.inner.lock().unwrap().menu.as_ref()?;
        Some(Arc::new(MemoryToggle {
            inner: self.inner.clone(),
        }))
    }

    fn menu_panel(&self) -> Option<Arc<dyn Panel>> {
        self.inner.lock().unwrap().menu.as_ref()?;
        Some(Arc::new(MemoryPanel {
            inner: self.inner.clone(),
        }))
    }

    fn year_slot(&self) -> Option<Arc<dyn TextSlot>> {
        self.inner.lock().unwrap().year_text.as_ref()?;
        Some(Arc::new(MemoryYearSlot {
            inner: self.inner.clone(),
        }))
    }

    fn rotating_list(&self) -> Option<Arc<dyn RotatingList>> {
        self.inner.lock().unwrap().widget.as_ref()?;
        Some(Arc::new(MemoryList {
            inner: self.inner.clone(),
        }))
    }

    fn disclosures(&self) -> Vec<Arc<dyn Disclosure>> {
        let count = self.inner.lock().unwrap().faq.len();
        (0..count)
            .map(|index| {
                Arc::new(MemoryDisclosure {
                    inner: self.inner.clone(),
                    index,
                }) as Arc<dyn Disclosure>
            })
            .collect()
    }
}
