//! Navigation history seam.
//!
//! The controller records every step change through [`History`]. In the
//! browser this is `history.pushState` with a `#<step>` fragment; the
//! `popstate` listener in `main.rs` feeds recorded states back into the
//! controller.

use wasm_bindgen::JsValue;

use super::state::HistoryEntry;

pub trait History {
    fn push(&mut self, entry: &HistoryEntry);
}

/// `window.history` backed implementation.
pub struct BrowserHistory;

impl History for BrowserHistory {
    fn push(&mut self, entry: &HistoryEntry) {
        let json = match serde_json::to_string(entry) {
            Ok(j) => j,
            Err(e) => {
                log::warn!("history entry serialization failed: {e}");
                return;
            }
        };
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let url = format!("#{}", entry.step.as_str());
        if let Err(e) = history.push_state_with_url(&JsValue::from_str(&json), "", Some(&url)) {
            log::warn!("pushState failed: {e:?}");
        }
    }
}

/// Decode the raw state carried by a `popstate` event.
pub fn decode_entry(raw: Option<&str>) -> Option<HistoryEntry> {
    let raw = raw?;
    match serde_json::from_str(raw) {
        Ok(entry) => Some(entry),
        Err(e) => {
            log::warn!("ignoring undecodable history state: {e}");
            None
        }
    }
}

/// In-memory browser history: a stack of states with a cursor. The first
/// entry carries no state, like a freshly loaded page.
#[cfg(test)]
pub struct MemoryHistory {
    entries: Vec<Option<String>>,
    cursor: usize,
}

#[cfg(test)]
impl MemoryHistory {
    pub fn new() -> Self {
        Self {
            entries: vec![None],
            cursor: 0,
        }
    }

    /// Move back one entry, returning the state the browser would deliver
    /// with `popstate`. `None` when already at the first entry.
    pub fn back(&mut self) -> Option<Option<String>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn forward(&mut self) -> Option<Option<String>> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
impl History for MemoryHistory {
    fn push(&mut self, entry: &HistoryEntry) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(serde_json::to_string(entry).ok());
        self.cursor += 1;
    }
}
