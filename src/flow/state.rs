//! Wizard step state.
//!
//! The step and its selections form a single tagged value so that, for
//! example, a strategy step always knows its goal and template.

use serde::{Deserialize, Serialize};

use crate::data::{find_goal, find_investor, template_for, Goal, InvestorType, StrategyTemplate};

/// Step name as recorded in navigation history and the URL fragment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Start,
    Investor,
    PortfolioSetup,
    Goal,
    Strategy,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Start => "start",
            StepKind::Investor => "investor",
            StepKind::PortfolioSetup => "portfolio_setup",
            StepKind::Goal => "goal",
            StepKind::Strategy => "strategy",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Start,
    Investor,
    PortfolioSetup {
        investor: &'static InvestorType,
    },
    Goal {
        investor: &'static InvestorType,
    },
    Strategy {
        investor: &'static InvestorType,
        goal: &'static Goal,
        template: &'static StrategyTemplate,
        /// 0 = overview, 1..=periods.len() = a single period.
        period: usize,
    },
}

impl Step {
    pub fn kind(&self) -> StepKind {
        match self {
            Step::Start => StepKind::Start,
            Step::Investor => StepKind::Investor,
            Step::PortfolioSetup { .. } => StepKind::PortfolioSetup,
            Step::Goal { .. } => StepKind::Goal,
            Step::Strategy { .. } => StepKind::Strategy,
        }
    }

    pub fn investor(&self) -> Option<&'static InvestorType> {
        match *self {
            Step::Start | Step::Investor => None,
            Step::PortfolioSetup { investor }
            | Step::Goal { investor }
            | Step::Strategy { investor, .. } => Some(investor),
        }
    }

    pub fn goal(&self) -> Option<&'static Goal> {
        match *self {
            Step::Strategy { goal, .. } => Some(goal),
            _ => None,
        }
    }

    /// Steps that may only be shown to an authenticated user.
    pub fn requires_auth(&self) -> bool {
        matches!(self, Step::Goal { .. } | Step::Strategy { .. })
    }

    pub fn to_entry(&self) -> HistoryEntry {
        HistoryEntry {
            step: self.kind(),
            investor: self.investor().map(|t| t.id.to_string()),
            goal: self.goal().map(|g| g.id.to_string()),
        }
    }

    /// Rebuild a step from a history entry. Unknown ids yield `None`.
    pub fn from_entry(entry: &HistoryEntry) -> Option<Step> {
        let investor = || entry.investor.as_deref().and_then(find_investor);
        match entry.step {
            StepKind::Start => Some(Step::Start),
            StepKind::Investor => Some(Step::Investor),
            StepKind::PortfolioSetup => Some(Step::PortfolioSetup { investor: investor()? }),
            StepKind::Goal => Some(Step::Goal { investor: investor()? }),
            StepKind::Strategy => {
                let goal_id = entry.goal.as_deref()?;
                Some(Step::Strategy {
                    investor: investor()?,
                    goal: find_goal(goal_id)?,
                    template: template_for(goal_id)?,
                    period: 0,
                })
            }
        }
    }
}

/// Serialized form of a step pushed into navigation history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub step: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WizardState {
    pub step: Step,
    pub authenticated: bool,
    /// Auth overlay visibility.
    pub auth_open: bool,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            step: Step::Start,
            authenticated: false,
            auth_open: false,
        }
    }
}
