//! Mutually exclusive side panels

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Panel {
    Inventory,
    Stats,
    Quests,
}

/// At most one panel is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelSet {
    open: Option<Panel>,
}

impl PanelSet {
    /// Open `panel`, closing the others; close it if it was open
    pub fn toggle(&mut self, panel: Panel) {
        self.open = if self.open == Some(panel) { None } else { Some(panel) };
    }

    pub fn hide_all(&mut self) {
        self.open = None;
    }

    pub fn open(&self) -> Option<Panel> {
        self.open
    }

    pub fn is_open(&self, panel: Panel) -> bool {
        self.open == Some(panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_is_exclusive() {
        let mut panels = PanelSet::default();
        panels.toggle(Panel::Stats);
        assert!(panels.is_open(Panel::Stats));
        panels.toggle(Panel::Quests);
        assert!(panels.is_open(Panel::Quests));
        assert!(!panels.is_open(Panel::Stats));
        panels.toggle(Panel::Quests);
        assert_eq!(panels.open(), None);
    }
}
