//! Mobile menu toggle: one boolean mirrored onto the toggle's expansion
//! attribute and the panel's hidden flag / `open` class.

use crate::context::MenuBinding;

/// Class applied to the panel while the menu is expanded.
pub const OPEN_CLASS: &str = "open";

/// Handle one activation of the toggle control.
///
/// The hidden flag is written from the PRE-negation state on purpose: the
/// panel is hidden exactly when the menu WAS open before this activation,
/// so it shows exactly when the new state is expanded.
pub fn activate(menu: &MenuBinding) {
    let was_open = menu.toggle.expanded_attr() == "true";
    let now_open = !was_open;

    menu.toggle
        .set_expanded_attr(if now_open { "true" } else { "false" });
    menu.panel.set_hidden(was_open);
    menu.panel.set_class(OPEN_CLASS, now_open);

    tracing::debug!("Menu toggled: expanded={}", now_open);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{ExpansionToggle, Panel};
    use std::collections::BTreeSet;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct FakeToggle {
        attr: Mutex<String>,
    }

    impl ExpansionToggle for FakeToggle {
        fn expanded_attr(&self) -> String {
            self.attr.lock().unwrap().clone()
        }

        fn set_expanded_attr(&self, value: &str) {
            *self.attr.lock().unwrap() = value.to_string();
        }
    }

    #[derive(Default)]
    struct FakePanel {
        hidden: Mutex<bool>,
        classes: Mutex<BTreeSet<String>>,
    }

    impl Panel for FakePanel {
        fn set_hidden(&self, hidden: bool) {
            *self.hidden.lock().unwrap() = hidden;
        }

        fn set_class(&self, class: &str, present: bool) {
            let mut classes = self.classes.lock().unwrap();
            if present {
                classes.insert(class.to_string());
            } else {
                classes.remove(class);
            }
        }
    }

    fn binding(initial_attr: &str) -> (Arc<FakeToggle>, Arc<FakePanel>, MenuBinding) {
        let toggle = Arc::new(FakeToggle {
            attr: Mutex::new(initial_attr.to_string()),
        });
        let panel = Arc::new(FakePanel {
            hidden: Mutex::new(true),
            classes: Mutex::new(BTreeSet::new()),
        });
        let menu = MenuBinding {
            toggle: toggle.clone(),
            panel: panel.clone(),
        };
        (toggle, panel, menu)
    }

    #[test]
    fn first_activation_opens() {
        let (toggle, panel, menu) = binding("false");

        activate(&menu);

        assert_eq!(toggle.expanded_attr(), "true");
        assert!(!*panel.hidden.lock().unwrap());
        assert!(panel.classes.lock().unwrap().contains(OPEN_CLASS));
    }

    #[test]
    fn second_activation_restores_original_state() {
        let (toggle, panel, menu) = binding("false");

        activate(&menu);
        activate(&menu);

        assert_eq!(toggle.expanded_attr(), "false");
        assert!(*panel.hidden.lock().unwrap());
        assert!(!panel.classes.lock().unwrap().contains(OPEN_CLASS));
    }

    #[test]
    fn missing_attribute_reads_as_closed() {
        // An empty attribute value is not "true", so the first activation
        // opens the menu.
        let (toggle, panel, menu) = binding("");

        activate(&menu);

        assert_eq!(toggle.expanded_attr(), "true");
        assert!(!*panel.hidden.lock().unwrap());
    }
}
