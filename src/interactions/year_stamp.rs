//! Stamp the current calendar year into the designated text slot.

use crate::page::TextSlot;
use chrono::{Datelike, Local};
use std::sync::Arc;

/// Runs exactly once at attach time. The slot's previous content is
/// discarded.
pub fn apply(slot: &Arc<dyn TextSlot>) {
    stamp(slot, Local::now().year());
}

fn stamp(slot: &Arc<dyn TextSlot>, year: i32) {
    slot.set_text(&year.to_string());
    tracing::debug!("Stamped year {}", year);
}
