//! One-shot capture of every element the behaviors need.
//!
//! All lookups happen here, once, at initialization. The behaviors receive
//! the captured handles and never consult the page again, so elements added
//! to the page afterwards are not observed.

use crate::page::{Disclosure, ExpansionToggle, Page, Panel, RotatingList, TextSlot};
use std::sync::Arc;

/// Menu toggle control plus its companion panel. Only bound when both exist.
pub struct MenuBinding {
    pub toggle: Arc<dyn ExpansionToggle>,
    pub panel: Arc<dyn Panel>,
}

/// Element handles captured from the page at initialization.
pub struct PageContext {
    pub menu: Option<MenuBinding>,
    pub year_slot: Option<Arc<dyn TextSlot>>,
    pub rotating_list: Option<Arc<dyn RotatingList>>,
    pub disclosures: Vec<Arc<dyn Disclosure>>,
}

impl PageContext {
    /// Look up every element once. Missing elements leave the matching
    /// behavior unwired; a toggle without a panel (or vice versa) leaves the
    /// menu unwired.
    pub fn capture(page: &dyn Page) -> Self {
        let menu = match (page.menu_toggle(), page.menu_panel()) {
            (Some(toggle), Some(panel)) => Some(MenuBinding { toggle, panel }),
            _ => None,
        };

        let ctx = Self {
            menu,
            year_slot: page.year_slot(),
            rotating_list: page.rotating_list(),
            disclosures: page.disclosures(),
        };

        tracing::debug!(
            menu = ctx.menu.is_some(),
            year_slot = ctx.year_slot.is_some(),
            rotating_list = ctx.rotating_list.is_some(),
            disclosures = ctx.disclosures.len(),
            "Captured page context"
        );

        ctx
    }
}
