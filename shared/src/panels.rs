use crate::ports::PanelPort;

pub const EXPAND_ALL_LABEL: &str = "Expand All";
pub const COLLAPSE_ALL_LABEL: &str = "Collapse All";

/// Opens per-stop disclosure regions. Never closes a single panel on its own;
/// closing only happens through the bulk toggle.
#[derive(Debug)]
pub struct DetailPanelController<P> {
    panels: P,
    all_expanded: bool,
}

impl<P: PanelPort> DetailPanelController<P> {
    pub fn new(panels: P) -> Self {
        Self {
            panels,
            all_expanded: false,
        }
    }

    /// Open the region for `id`. Returns `false` when it was already open.
    pub fn expand(&mut self, id: &str) -> bool {
        if self.panels.is_open(id) {
            return false;
        }
        self.panels.set_open(id, true);
        true
    }

    /// Flip the bulk flag, apply it to every panel and return the new control label.
    pub fn toggle_all(&mut self) -> &'static str {
        self.all_expanded = !self.all_expanded;
        self.panels.set_all_open(self.all_expanded);
        self.label()
    }

    pub fn all_expanded(&self) -> bool {
        self.all_expanded
    }

    pub fn label(&self) -> &'static str {
        if self.all_expanded {
            COLLAPSE_ALL_LABEL
        } else {
            EXPAND_ALL_LABEL
        }
    }

    pub fn panels(&self) -> &P {
        &self.panels
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakePanels;
    use super::*;

    #[test]
    fn expand_opens_only_the_target() {
        let mut controller = DetailPanelController::new(FakePanels::closed(&["a", "b", "c"]));
        assert!(controller.expand("b"));
        assert!(controller.expand("c"));
        assert_eq!(controller.panels().open_ids(), vec!["b", "c"]);
    }

    #[test]
    fn expand_is_idempotent() {
        let mut controller = DetailPanelController::new(FakePanels::closed(&["a"]));
        assert!(controller.expand("a"));
        assert!(!controller.expand("a"));
        assert_eq!(controller.panels().writes, 1);
    }

    #[test]
    fn toggle_all_alternates_and_relabels() {
        let mut controller = DetailPanelController::new(FakePanels::closed(&["a", "b"]));
        assert_eq!(controller.label(), EXPAND_ALL_LABEL);

        assert_eq!(controller.toggle_all(), COLLAPSE_ALL_LABEL);
        assert_eq!(controller.panels().open_ids(), vec!["a", "b"]);

        assert_eq!(controller.toggle_all(), EXPAND_ALL_LABEL);
        assert!(controller.panels().open_ids().is_empty());
    }

    #[test]
    fn toggle_all_overrides_individually_opened_panels() {
        let mut controller = DetailPanelController::new(FakePanels::closed(&["a", "b"]));
        controller.expand("a");
        controller.toggle_all();
        controller.toggle_all();
        assert!(controller.panels().open_ids().is_empty());
        assert!(!controller.all_expanded());
    }
}
