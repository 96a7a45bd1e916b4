//! UI state: panels, selection, filter.

use crate::filter::Filter;

/// Which side panel is open, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    None,
    Missions,
    Transactions,
}

/// Transient interface state, separate from marketplace data.
#[derive(Debug, Default)]
pub struct UiState {
    /// Current marketplace filter.
    pub filter: Filter,
    pub panel: ActivePanel,
    /// Parcel arena index shown in the purchase panel.
    pub selected_parcel: Option<usize>,
    /// Cursor row in the missions panel.
    pub mission_cursor: usize,
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_panel(&mut self, panel: ActivePanel) {
        self.panel = if self.panel == panel { ActivePanel::None } else { panel };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_then_closes() {
        let mut ui = UiState::new();
        ui.toggle_panel(ActivePanel::Missions);
        assert_eq!(ui.panel, ActivePanel::Missions);
        ui.toggle_panel(ActivePanel::Transactions);
        assert_eq!(ui.panel, ActivePanel::Transactions);
        ui.toggle_panel(ActivePanel::Transactions);
        assert_eq!(ui.panel, ActivePanel::None);
    }
}
