//! Exclusive FAQ accordion: at most one disclosure open at a time.
//!
//! The engine reacts to state-change notifications. When an entry reports a
//! change and is currently open, every OTHER entry in the captured list is
//! forced closed. Closing direction changes are ignored, so one entry
//! closing never re-opens or affects the rest.
//!
//! Forced closes go through `Disclosure::set_open`, which is a no-op on
//! entries that are already closed and emits no notification for no-op
//! writes. The broadcast therefore cannot cascade: the only notifications it
//! produces are open-to-closed transitions, and those are ignored here.

use crate::page::Disclosure;
use std::sync::Arc;

/// Handle a state-change notification from disclosure `changed`.
pub fn enforce_exclusive(disclosures: &[Arc<dyn Disclosure>], changed: usize) {
    let Some(entry) = disclosures.get(changed) else {
        tracing::warn!("Toggle notification for unknown disclosure {}", changed);
        return;
    };

    // Only an entry that is now open broadcasts; closing affects nobody.
    if !entry.is_open() {
        return;
    }

    for (i, other) in disclosures.iter().enumerate() {
        if i != changed {
            other.set_open(false);
        }
    }

    tracing::debug!("Disclosure {} open, all others forced closed", changed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    /// Fake disclosure that counts real state transitions, so tests can
    /// assert that redundant broadcasts cause no extra mutations.
    #[derive(Default)]
    struct FakeDisclosure {
        open: AtomicBool,
        transitions: AtomicU64,
    }

    impl FakeDisclosure {
        fn open() -> Self {
            Self {
                open: AtomicBool::new(true),
                transitions: AtomicU64::new(0),
            }
        }
    }

    impl Disclosure for FakeDisclosure {
        fn is_open(&self) -> bool {
            self.open.load(Ordering::SeqCst)
        }

        fn set_open(&self, open: bool) {
            if self.open.swap(open, Ordering::SeqCst) != open {
                self.transitions.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn entries(seed: Vec<FakeDisclosure>) -> Vec<Arc<dyn Disclosure>> {
        seed.into_iter()
            .map(|d| Arc::new(d) as Arc<dyn Disclosure>)
            .collect()
    }

    #[test]
    fn opening_one_closes_the_previously_open_entry() {
        let list = entries(vec![
            FakeDisclosure::open(),
            FakeDisclosure::default(),
            FakeDisclosure::default(),
        ]);

        // Entry 1 opens while entry 0 is open.
        list[1].set_open(true);
        enforce_exclusive(&list, 1);

        assert!(!list[0].is_open());
        assert!(list[1].is_open());
        assert!(!list[2].is_open());

        // Entry 0 opens again afterward, closing entry 1.
        list[0].set_open(true);
        enforce_exclusive(&list, 0);

        assert!(list[0].is_open());
        assert!(!list[1].is_open());
    }

    #[test]
    fn closing_an_entry_leaves_others_alone() {
        let list = entries(vec![FakeDisclosure::open(), FakeDisclosure::open()]);

        list[0].set_open(false);
        enforce_exclusive(&list, 0);

        // No broadcast in the closing direction.
        assert!(list[1].is_open());
    }

    #[test]
    fn redundant_open_notification_causes_no_extra_mutations() {
        let a = Arc::new(FakeDisclosure::open());
        let b = Arc::new(FakeDisclosure::default());
        let list: Vec<Arc<dyn Disclosure>> = vec![a.clone(), b.clone()];

        enforce_exclusive(&list, 0);
        let after_first = b.transitions.load(Ordering::SeqCst);

        // The same entry reporting open again must not mutate anything.
        enforce_exclusive(&list, 0);

        assert_eq!(b.transitions.load(Ordering::SeqCst), after_first);
        assert!(a.is_open());
    }

    #[test]
    fn out_of_range_notification_is_ignored() {
        let list = entries(vec![FakeDisclosure::open()]);
        enforce_exclusive(&list, 7);
        assert!(list[0].is_open());
    }
}
