//! Rotating carousel for the floating widget list.
//!
//! Each cycle has two phases, strictly ordered by a nested one-shot delay
//! rather than an animation-completion event:
//!
//! 1. slide out: eased transform moving the container up by a fixed offset
//! 2. settle: clear the transition, snap the transform back, re-parent the
//!    item at `index % len` to the end of the container, advance `index`
//!
//! The item sequence is snapshotted once when the cycle starts; children
//! added to the container later are never rotated.

use crate::config::TimingConfig;
use crate::page::{ListItem, RotatingList};
use crate::task::RecurringTask;
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

struct CarouselCycle {
    list: Arc<dyn RotatingList>,
    items: Vec<Arc<dyn ListItem>>,
    /// Unbounded rotation counter; only `index % items.len()` is ever used.
    index: u64,
    slide_transition: String,
    slide_transform: String,
}

impl CarouselCycle {
    /// Snapshot the container's children. A container with no children never
    /// starts a cycle.
    fn capture(list: Arc<dyn RotatingList>, timing: &TimingConfig) -> Option<Self> {
        let items = list.snapshot_items();
        if items.is_empty() {
            debug!("Rotating list is empty, carousel not started");
            return None;
        }

        Some(Self {
            list,
            items,
            index: 0,
            slide_transition: format!("transform {}ms ease", timing.slide_duration_ms),
            slide_transform: format!("translateY({})", timing.slide_offset),
        })
    }

    fn begin_slide(&self) {
        self.list.set_transition(&self.slide_transition);
        self.list.set_transform(&self.slide_transform);
    }

    /// Snap back with no transition, then rotate the captured sequence by
    /// re-parenting one item.
    fn settle_and_rotate(&mut self) -> Result<()> {
        self.list.set_transition("none");
        self.list.set_transform("translateY(0)");

        let slot = (self.index % self.items.len() as u64) as usize;
        self.list.move_to_end(self.items[slot].as_ref())?;
        self.index += 1;

        debug!(
            "Carousel rotated item '{}' to the end (rotation {})",
            self.items[slot].label(),
            self.index
        );
        Ok(())
    }
}

/// Start the perpetual rotation cycle for `list`, if it has any items.
///
/// The first rotation lands one full interval after attach, matching a
/// repeating timer that fires at `t = interval, 2*interval, ...`. The task
/// runs until cancelled through the returned handle; a re-parent fault
/// (item no longer in the container) stops the cycle with a warning.
pub fn spawn_cycle(list: Arc<dyn RotatingList>, timing: &TimingConfig) -> Option<RecurringTask> {
    let mut cycle = CarouselCycle::capture(list, timing)?;
    let rotate_interval = timing.rotate_interval();
    let slide_duration = timing.slide_duration();

    let handle = tokio::spawn(async move {
        let start = tokio::time::Instant::now() + rotate_interval;
        let mut ticks = tokio::time::interval_at(start, rotate_interval);

        loop {
            ticks.tick().await;
            cycle.begin_slide();
            tokio::time::sleep(slide_duration).await;
            if let Err(e) = cycle.settle_and_rotate() {
                warn!("Carousel cycle stopped: {:#}", e);
                break;
            }
        }
    });

    Some(RecurringTask::new("carousel", handle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FakeItem {
        id: u64,
        label: String,
    }

    impl ListItem for FakeItem {
        fn node_id(&self) -> u64 {
            self.id
        }

        fn label(&self) -> String {
            self.label.clone()
        }
    }

    struct FakeList {
        order: Mutex<Vec<Arc<FakeItem>>>,
        transition: Mutex<String>,
        transform: Mutex<String>,
    }

    impl FakeList {
        fn new(labels: &[&str]) -> Self {
            let order = labels
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    Arc::new(FakeItem {
                        id: i as u64,
                        label: label.to_string(),
                    })
                })
                .collect();
            Self {
                order: Mutex::new(order),
                transition: Mutex::new(String::new()),
                transform: Mutex::new(String::new()),
            }
        }

        fn labels(&self) -> Vec<String> {
            self.order
                .lock()
                .unwrap()
                .iter()
                .map(|item| item.label.clone())
                .collect()
        }
    }

    impl RotatingList for FakeList {
        fn snapshot_items(&self) -> Vec<Arc<dyn ListItem>> {
            self.order
                .lock()
                .unwrap()
                .iter()
                .map(|item| item.clone() as Arc<dyn ListItem>)
                .collect()
        }

        fn set_transition(&self, value: &str) {
            *self.transition.lock().unwrap() = value.to_string();
        }

        fn set_transform(&self, value: &str) {
            *self.transform.lock().unwrap() = value.to_string();
        }

        fn move_to_end(&self, item: &dyn ListItem) -> Result<()> {
            let mut order = self.order.lock().unwrap();
            let Some(pos) = order.iter().position(|i| i.id == item.node_id()) else {
                bail!("item {} is no longer in the container", item.node_id());
            };
            let moved = order.remove(pos);
            order.push(moved);
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn one_cycle_moves_first_item_to_end() {
        let list = Arc::new(FakeList::new(&["A", "B", "C"]));
        let task = spawn_cycle(list.clone(), &TimingConfig::default()).unwrap();

        // 4000 ms tick plus 600 ms nested settle delay.
        tokio::time::sleep(Duration::from_millis(4601)).await;

        assert_eq!(list.labels(), vec!["B", "C", "A"]);
        assert_eq!(*list.transition.lock().unwrap(), "none");
        assert_eq!(*list.transform.lock().unwrap(), "translateY(0)");
        task.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn two_cycles_rotate_twice() {
        let list = Arc::new(FakeList::new(&["A", "B", "C"]));
        let task = spawn_cycle(list.clone(), &TimingConfig::default()).unwrap();

        tokio::time::sleep(Duration::from_millis(8601)).await;

        assert_eq!(list.labels(), vec!["C", "A", "B"]);
        task.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn slide_phase_precedes_settle() {
        let list = Arc::new(FakeList::new(&["A", "B"]));
        let task = spawn_cycle(list.clone(), &TimingConfig::default()).unwrap();

        // Inside the slide window: eased transform applied, nothing rotated.
        tokio::time::sleep(Duration::from_millis(4100)).await;
        assert_eq!(*list.transition.lock().unwrap(), "transform 600ms ease");
        assert_eq!(*list.transform.lock().unwrap(), "translateY(-1.8rem)");
        assert_eq!(list.labels(), vec!["A", "B"]);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(list.labels(), vec!["B", "A"]);
        task.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_happens_before_first_interval() {
        let list = Arc::new(FakeList::new(&["A", "B"]));
        let task = spawn_cycle(list.clone(), &TimingConfig::default()).unwrap();

        tokio::time::sleep(Duration::from_millis(3999)).await;

        assert_eq!(list.labels(), vec!["A", "B"]);
        assert_eq!(*list.transform.lock().unwrap(), "");
        task.cancel();
    }

    #[tokio::test(start_paused = true)]
    async fn empty_list_spawns_no_task() {
        let list = Arc::new(FakeList::new(&[]));
        assert!(spawn_cycle(list, &TimingConfig::default()).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn reparent_fault_stops_the_cycle() {
        let list = Arc::new(FakeList::new(&["A", "B"]));
        let task = spawn_cycle(list.clone(), &TimingConfig::default()).unwrap();

        // Pull every item out from under the cycle before the first settle.
        list.order.lock().unwrap().clear();
        tokio::time::sleep(Duration::from_millis(4601)).await;
        // Give the task a chance to observe the error and exit.
        tokio::task::yield_now().await;

        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_future_rotations() {
        let list = Arc::new(FakeList::new(&["A", "B"]));
        let task = spawn_cycle(list.clone(), &TimingConfig::default()).unwrap();

        tokio::time::sleep(Duration::from_millis(4601)).await;
        assert_eq!(list.labels(), vec!["B", "A"]);

        task.cancel();
        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(list.labels(), vec!["B", "A"]);
    }
}
