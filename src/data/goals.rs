/// Investment horizons offered on the goal-select step.

#[derive(Debug, PartialEq, Eq)]
pub struct Goal {
    pub id: &'static str,
    pub duration: &'static str,
    pub subtitle: &'static str,
}

pub const GOALS: &[Goal] = &[
    Goal { id: "weekly", duration: "Weekly Plan", subtitle: "Short-Term Focus" },
    Goal { id: "monthly", duration: "Monthly Plan", subtitle: "Steady Growth" },
    Goal { id: "3month", duration: "3-Month Plan", subtitle: "Quarterly Builder" },
    Goal { id: "6month", duration: "6-Month Plan", subtitle: "Mid-Year Target" },
    Goal { id: "1yr", duration: "1-Year Goal", subtitle: "Annual Milestone" },
    Goal { id: "3yr", duration: "3-Year Goal", subtitle: "Medium Term" },
    Goal { id: "5yr", duration: "5-Year Goal", subtitle: "Wealth Accumulation" },
    Goal { id: "10yr", duration: "10-Year Goal", subtitle: "Financial Growth" },
    Goal { id: "20yr", duration: "20-Year Goal", subtitle: "Long-Term Wealth Creation" },
];

pub fn find_goal(id: &str) -> Option<&'static Goal> {
    GOALS.iter().find(|g| g.id == id)
}
