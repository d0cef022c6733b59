//! The single-active-waypoint state machine.
//!
//! Every transition re-derives link highlighting and marker emphasis for the
//! whole registry from the new state, so the views can never disagree about
//! which stop is active.

use crate::panels::DetailPanelController;
use crate::ports::{MarkerPort, NavPort, PanelPort, ScrollPort};
use crate::visibility::VisibilityReport;
use crate::waypoint::Registry;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveState {
    #[default]
    NoActive,
    Active(String),
}

impl ActiveState {
    pub fn id(&self) -> Option<&str> {
        match self {
            ActiveState::NoActive => None,
            ActiveState::Active(id) => Some(id),
        }
    }
}

pub struct SyncCoordinator<M, N, P, S> {
    registry: Registry,
    state: ActiveState,
    markers: M,
    nav: N,
    panels: DetailPanelController<P>,
    scroller: S,
}

impl<M, N, P, S> SyncCoordinator<M, N, P, S>
where
    M: MarkerPort,
    N: NavPort,
    P: PanelPort,
    S: ScrollPort,
{
    pub fn new(registry: Registry, markers: M, nav: N, panels: P, scroller: S) -> Self {
        Self {
            registry,
            state: ActiveState::NoActive,
            markers,
            nav,
            panels: DetailPanelController::new(panels),
            scroller,
        }
    }

    pub fn state(&self) -> &ActiveState {
        &self.state
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// A section entered the activation band. Unknown ids are ignored.
    pub fn on_visibility_report(&mut self, id: &str) -> bool {
        if !self.registry.contains(id) {
            tracing::debug!(id, "visibility report for unregistered section ignored");
            return false;
        }
        self.activate(id);
        true
    }

    /// Applies a batch in report order; the last focused section wins.
    pub fn on_visibility_batch(&mut self, reports: &[VisibilityReport]) {
        for report in reports.iter().filter(|r| r.focused) {
            self.on_visibility_report(&report.id);
        }
    }

    /// Marker or navigation-link click: activate, open the panel and scroll to it.
    pub fn on_user_navigate(&mut self, id: &str) -> bool {
        if !self.registry.contains(id) {
            tracing::warn!(id, "navigation to unknown waypoint ignored");
            return false;
        }
        self.activate(id);
        self.panels.expand(id);
        self.scroller.scroll_to_section(id);
        true
    }

    pub fn toggle_all_panels(&mut self) -> &'static str {
        self.panels.toggle_all()
    }

    pub fn panels(&self) -> &DetailPanelController<P> {
        &self.panels
    }

    pub fn markers(&self) -> &M {
        &self.markers
    }

    pub fn nav(&self) -> &N {
        &self.nav
    }

    pub fn scroller(&self) -> &S {
        &self.scroller
    }

    fn activate(&mut self, id: &str) {
        if self.state.id() != Some(id) {
            tracing::debug!(from = ?self.state.id(), to = id, "active waypoint changed");
        }
        self.state = ActiveState::Active(id.to_string());
        self.render_state();
    }

    fn render_state(&mut self) {
        let active = self.state.id();
        self.nav.highlight(active);
        for waypoint in self.registry.iter() {
            self.markers
                .set_active(&waypoint.id, Some(waypoint.id.as_str()) == active);
        }
    }
}
