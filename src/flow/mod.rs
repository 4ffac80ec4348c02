//! Wizard flow controller.
//!
//! Owns the [`WizardState`] and is the only place it changes. Each
//! transition that moves to a new step records it through [`History`].

pub mod history;
pub mod state;

use crate::data::{find_goal, find_investor, template_for};

use history::{decode_entry, History};
use state::{Step, WizardState};

pub struct FlowController<H: History> {
    state: WizardState,
    history: H,
}

impl<H: History> FlowController<H> {
    pub fn new(history: H) -> Self {
        Self {
            state: WizardState::new(),
            history,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    #[cfg(test)]
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    fn go(&mut self, step: Step) {
        log::debug!("step {} -> {}", self.state.step.kind().as_str(), step.kind().as_str());
        self.state.step = step;
        self.history.push(&step.to_entry());
    }

    // ── Transitions ────────────────────────────────────────────────

    /// "Begin" on the start screen.
    pub fn begin(&mut self) -> bool {
        if self.state.step != Step::Start {
            return false;
        }
        self.go(Step::Investor);
        true
    }

    pub fn select_investor(&mut self, id: &str) -> bool {
        if self.state.step != Step::Investor {
            return false;
        }
        let Some(investor) = find_investor(id) else {
            log::warn!("unknown investor type: {id}");
            return false;
        };
        self.go(Step::PortfolioSetup { investor });
        true
    }

    /// "Continue" from portfolio setup. Unauthenticated users get the auth
    /// overlay instead and stay on portfolio setup.
    pub fn request_goal_step(&mut self) -> bool {
        let Step::PortfolioSetup { investor } = self.state.step else {
            return false;
        };
        if self.state.authenticated {
            self.go(Step::Goal { investor });
        } else {
            self.state.auth_open = true;
        }
        true
    }

    pub fn login_success(&mut self) {
        self.state.authenticated = true;
        self.state.auth_open = false;
        if let Step::PortfolioSetup { investor } = self.state.step {
            self.go(Step::Goal { investor });
        }
    }

    pub fn close_auth(&mut self) {
        self.state.auth_open = false;
    }

    /// Goals without a strategy template are ignored.
    pub fn select_goal(&mut self, id: &str) -> bool {
        let Step::Goal { investor } = self.state.step else {
            return false;
        };
        let (Some(goal), Some(template)) = (find_goal(id), template_for(id)) else {
            log::info!("no strategy template for goal {id:?}");
            return false;
        };
        self.go(Step::Strategy {
            investor,
            goal,
            template,
            period: 0,
        });
        true
    }

    // ── Period cursor (not recorded in history) ────────────────────

    pub fn set_period(&mut self, period: usize) -> bool {
        let Step::Strategy {
            template,
            period: ref mut current,
            ..
        } = self.state.step
        else {
            return false;
        };
        if period > template.periods.len() || period == *current {
            return false;
        }
        *current = period;
        true
    }

    pub fn prev_period(&mut self) -> bool {
        match self.state.step {
            Step::Strategy { period, .. } if period > 0 => self.set_period(period - 1),
            _ => false,
        }
    }

    pub fn next_period(&mut self) -> bool {
        match self.state.step {
            Step::Strategy { period, .. } => self.set_period(period + 1),
            _ => false,
        }
    }

    // ── Reset / history ────────────────────────────────────────────

    /// Back to the initial state; clears authentication.
    pub fn reset(&mut self) {
        self.state = WizardState::new();
        self.history.push(&Step::Start.to_entry());
    }

    /// Apply a `popstate` navigation. Missing or undecodable state falls back
    /// to the start step; gated steps land on portfolio setup while the user
    /// is signed out.
    pub fn on_history_pop(&mut self, raw: Option<&str>) {
        let step = decode_entry(raw)
            .as_ref()
            .and_then(Step::from_entry)
            .unwrap_or(Step::Start);
        let step = match step.investor() {
            Some(investor) if step.requires_auth() && !self.state.authenticated => {
                Step::PortfolioSetup { investor }
            }
            _ => step,
        };
        self.state.step = step;
        self.state.auth_open = false;
    }
}
