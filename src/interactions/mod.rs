//! The interaction engine: wires the four page behaviors to a captured
//! `PageContext` and runs the element-notification loop.

mod accordion;
mod carousel;
mod menu_toggle;
mod year_stamp;

use crate::config::TimingConfig;
use crate::context::PageContext;
use crate::page::PageEvent;
use crate::task::RecurringTask;
use tokio::sync::mpsc;
use tracing::info;

/// All four behaviors, attached once to a fixed page snapshot.
///
/// Attaching stamps the year immediately and starts the carousel cycle;
/// the menu toggle and the accordion react to events fed through `run` (or
/// `handle_event`). Behaviors whose elements are absent simply never
/// activate.
pub struct PageInteractions {
    ctx: PageContext,
    carousel: Option<RecurringTask>,
}

impl PageInteractions {
    pub fn attach(ctx: PageContext, timing: &TimingConfig) -> Self {
        if let Some(slot) = &ctx.year_slot {
            year_stamp::apply(slot);
        }

        let carousel = ctx
            .rotating_list
            .as_ref()
            .and_then(|list| carousel::spawn_cycle(list.clone(), timing));

        info!(
            "Page interactions attached (menu: {}, carousel: {}, disclosures: {})",
            ctx.menu.is_some(),
            carousel.is_some(),
            ctx.disclosures.len()
        );

        Self { ctx, carousel }
    }

    /// Process element notifications until every sender is dropped, then
    /// tear down the carousel.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<PageEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event);
        }
        self.shutdown();
    }

    pub fn handle_event(&self, event: PageEvent) {
        match event {
            PageEvent::MenuActivated => {
                if let Some(menu) = &self.ctx.menu {
                    menu_toggle::activate(menu);
                }
            }
            PageEvent::DisclosureToggled { index } => {
                accordion::enforce_exclusive(&self.ctx.disclosures, index);
            }
        }
    }

    /// Cancel the carousel cycle, if one is running.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.carousel.take() {
            task.cancel();
        }
        info!("Page interactions shut down");
    }

    /// True when a carousel cycle was started and has not ended.
    pub fn carousel_running(&self) -> bool {
        self.carousel
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }
}
