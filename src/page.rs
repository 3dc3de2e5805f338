//! Capability traits for the elements the interaction engine touches.
//!
//! The engine never sees a concrete page. Each element class it needs is a
//! small trait, and the page itself is a lookup boundary (`Page`) queried
//! exactly once at capture time. Element notifications arrive as `PageEvent`
//! values on an mpsc channel rather than per-element callbacks, which keeps
//! every behavior testable against the in-memory page in `memory.rs`.

use anyhow::Result;
use std::sync::Arc;

/// A control that mirrors a boolean expansion state onto a string attribute
/// (`"true"` / `"false"`), in the manner of `aria-expanded`.
pub trait ExpansionToggle: Send + Sync {
    /// Current attribute value. Anything other than `"true"` reads as closed.
    fn expanded_attr(&self) -> String;
    fn set_expanded_attr(&self, value: &str);
}

/// A panel with a hidden flag and a class list.
pub trait Panel: Send + Sync {
    fn set_hidden(&self, hidden: bool);
    /// Add (`present = true`) or remove (`present = false`) a class.
    fn set_class(&self, class: &str, present: bool);
}

/// An element whose text content can be replaced wholesale.
pub trait TextSlot: Send + Sync {
    fn set_text(&self, text: &str);
}

/// One rotatable item inside a `RotatingList`.
pub trait ListItem: Send + Sync {
    /// Stable identity within the owning list, used to find the item again
    /// at re-parent time.
    fn node_id(&self) -> u64;
    fn label(&self) -> String;
}

/// A container whose direct children cycle. The transition/transform strings
/// are opaque style values; the engine only writes them.
pub trait RotatingList: Send + Sync {
    /// Children at the time of the call. The engine snapshots this once;
    /// items added to the container later are never rotated.
    fn snapshot_items(&self) -> Vec<Arc<dyn ListItem>>;
    fn set_transition(&self, value: &str);
    fn set_transform(&self, value: &str);
    /// Re-parent `item` to the end of the container. Fails when the item no
    /// longer belongs to the container.
    fn move_to_end(&self, item: &dyn ListItem) -> Result<()>;
}

/// An expandable entry with an independent open/closed flag.
///
/// Implementations must treat `set_open` with an unchanged value as a no-op
/// that emits no state-change notification, mirroring how a `<details>`
/// element only fires `toggle` on an actual transition.
pub trait Disclosure: Send + Sync {
    fn is_open(&self) -> bool;
    fn set_open(&self, open: bool);
}

/// The page boundary: one-shot element lookups.
///
/// Every lookup may come back empty; the corresponding behavior simply never
/// activates. A menu needs BOTH the toggle and the panel.
pub trait Page {
    fn menu_toggle(&self) -> Option<Arc<dyn ExpansionToggle>>;
    fn menu_panel(&self) -> Option<Arc<dyn Panel>>;
    fn year_slot(&self) -> Option<Arc<dyn TextSlot>>;
    fn rotating_list(&self) -> Option<Arc<dyn RotatingList>>;
    fn disclosures(&self) -> Vec<Arc<dyn Disclosure>>;
}

/// Notifications elements push at the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// The menu toggle control was activated (a click).
    MenuActivated,
    /// Disclosure `index` (position in the captured list) changed open state.
    /// Fired for both directions; the engine checks the current state.
    DisclosureToggled { index: usize },
}
