//! Strategy templates keyed by goal id.
//!
//! A template carries optional UI labels, the default SIP and target values
//! seeded into the dashboard, and an ordered list of period plans. Short
//! horizons (weekly, monthly, 3-month) count periods in days/weeks/18-day
//! blocks; every longer horizon shares the five-year base plan.

#[derive(Debug, PartialEq)]
pub struct StrategyLabels {
    pub title: Option<&'static str>,
    pub sip: Option<&'static str>,
    pub target: Option<&'static str>,
    pub timeline_prefix: Option<&'static str>,
}

const NO_LABELS: StrategyLabels = StrategyLabels {
    title: None,
    sip: None,
    target: None,
    timeline_prefix: None,
};

#[derive(Debug, PartialEq)]
pub struct SectorAllocation {
    pub sector: &'static str,
    pub percent: u32,
}

#[derive(Debug, PartialEq)]
pub struct PeriodPlan {
    pub number: u32,
    pub title: &'static str,
    pub allocation: &'static [SectorAllocation],
    pub focus: &'static [&'static str],
    pub strategy: Option<&'static str>,
    pub increase: &'static [&'static str],
    pub action: &'static str,
}

impl PeriodPlan {
    /// Template allocation for `sector`, if the plan lists one.
    pub fn allocation_for(&self, sector: &str) -> Option<u32> {
        self.allocation
            .iter()
            .find(|a| a.sector == sector)
            .map(|a| a.percent)
    }
}

#[derive(Debug, PartialEq)]
pub struct StrategyTemplate {
    pub labels: StrategyLabels,
    pub sip_amount: f64,
    pub target_amount: f64,
    pub periods: &'static [PeriodPlan],
}

impl StrategyTemplate {
    pub fn title(&self, goal_id: &str) -> String {
        match self.labels.title {
            Some(t) => t.to_string(),
            None => format!("{} Wealth Accumulation Strategy", goal_id.to_uppercase()),
        }
    }

    pub fn sip_label(&self) -> &'static str {
        self.labels.sip.unwrap_or("Monthly SIP")
    }

    pub fn target_label(&self) -> &'static str {
        self.labels.target.unwrap_or("Target Amount")
    }

    pub fn timeline_prefix(&self) -> &'static str {
        self.labels.timeline_prefix.unwrap_or("Year")
    }
}

const fn plan(number: u32, title: &'static str, action: &'static str) -> PeriodPlan {
    PeriodPlan {
        number,
        title,
        allocation: &[],
        focus: &[],
        strategy: None,
        increase: &[],
        action,
    }
}

const fn alloc(sector: &'static str, percent: u32) -> SectorAllocation {
    SectorAllocation { sector, percent }
}

static BASE: StrategyTemplate = StrategyTemplate {
    labels: NO_LABELS,
    sip_amount: 3000.0,
    target_amount: 400_000.0,
    periods: &[
        PeriodPlan {
            allocation: &[
                alloc("Commercial Banks", 30),
                alloc("Hydropower", 15),
                alloc("Life Insurance", 15),
                alloc("Mutual Funds", 15),
                alloc("Microfinance", 10),
                alloc("Others", 15),
            ],
            ..plan(
                1,
                "Accumulation Phase",
                "Any sector > 35%? Book partial profit → Shift to Commercial Banks/Mutual Funds",
            )
        },
        PeriodPlan {
            focus: &["Hydropower", "Microfinance", "Insurance"],
            ..plan(
                2,
                "Growth Positioning",
                "Hydropower gain > 40%? Rebalance → Shift gains to Insurance",
            )
        },
        PeriodPlan {
            strategy: Some("High Equity Allocation"),
            ..plan(3, "Aggressive Expansion", "Book 15–20% profit from fast movers")
        },
        PeriodPlan {
            increase: &["Commercial Banks", "Mutual Funds", "Preference Shares"],
            ..plan(4, "Profit Protection", "Market overheated? Reduce high beta stocks")
        },
        PeriodPlan {
            allocation: &[
                alloc("Commercial Banks", 35),
                alloc("Mutual Funds", 20),
                alloc("Life Insurance", 20),
                alloc("Preference Shares", 25),
            ],
            ..plan(5, "Capital Consolidation", "Create cash buffer & lock gains")
        },
    ],
};

static WEEKLY: StrategyTemplate = StrategyTemplate {
    labels: StrategyLabels {
        title: Some("Trading Strategy"),
        sip: Some("Total Equity"),
        target: Some("Risk Tolerance"),
        timeline_prefix: Some("Day"),
    },
    sip_amount: 50_000.0,
    target_amount: 20.0,
    periods: &[
        plan(1, "Day 1: Market Analysis", "Analyze trend & volume"),
        plan(2, "Day 2: Entry Positions", "Enter high momentum stocks"),
        plan(3, "Day 3: Monitor & Adjust", "Check stop-losses"),
        plan(4, "Day 4: Profit Booking", "Book 50% profits on spikes"),
        plan(5, "Day 5: Week Closing", "Square off intraday positions"),
        plan(6, "Day 6: Review", "Review weekly performance"),
    ],
};

static MONTHLY: StrategyTemplate = StrategyTemplate {
    labels: StrategyLabels {
        title: Some("Monthly Strategy"),
        sip: Some("Monthly Budget"),
        target: Some("Risk Tolerance (%)"),
        timeline_prefix: Some("Week"),
    },
    sip_amount: 100_000.0,
    target_amount: 20.0,
    periods: &[
        plan(1, "Week 1: Initial Allocation", "Deploy capital in core sectors"),
        plan(2, "Week 2: Momentum Building", "Add to winning positions"),
        plan(3, "Week 3: Mid-Month Review", "Rebalance underperforming stocks"),
        plan(4, "Week 4: Profit Taking", "Trim high RSI stocks"),
        plan(5, "Last Week: Closing/Rollover", "Finalize monthly P&L"),
    ],
};

static TRIMESTER: StrategyTemplate = StrategyTemplate {
    labels: StrategyLabels {
        title: Some("Trimester Trading Strategy"),
        sip: Some("Monthly SIP"),
        target: Some("Risk Tolerance (%)"),
        timeline_prefix: Some("Period"),
    },
    sip_amount: 3000.0,
    target_amount: 20.0,
    periods: &[
        plan(1, "18 Days Period 1", "Initial Entry & Setup"),
        plan(2, "18 Days Period 2", "Momentum Capture"),
        plan(3, "18 Days Period 3", "Mid-term Review & Rebalance"),
        plan(4, "18 Days Period 4", "Profit Booking Zone"),
        plan(5, "18 Days Period 5", "Final Exit & Assessment"),
    ],
};

/// Template for a goal id. Unknown ids have no template.
pub fn template_for(goal_id: &str) -> Option<&'static StrategyTemplate> {
    match goal_id {
        "weekly" => Some(&WEEKLY),
        "monthly" => Some(&MONTHLY),
        "3month" => Some(&TRIMESTER),
        "6month" | "1yr" | "3yr" | "5yr" | "10yr" | "20yr" => Some(&BASE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GOALS;

    #[test]
    fn every_listed_goal_has_a_template() {
        for goal in GOALS {
            assert!(template_for(goal.id).is_some(), "missing template for {}", goal.id);
        }
    }

    #[test]
    fn unknown_goal_has_no_template() {
        assert!(template_for("lifetime").is_none());
        assert!(template_for("").is_none());
    }

    #[test]
    fn labels_fall_back_to_defaults() {
        let t = template_for("5yr").unwrap();
        assert_eq!(t.title("5yr"), "5YR Wealth Accumulation Strategy");
        assert_eq!(t.sip_label(), "Monthly SIP");
        assert_eq!(t.target_label(), "Target Amount");
        assert_eq!(t.timeline_prefix(), "Year");
    }

    #[test]
    fn custom_labels_win() {
        let t = template_for("weekly").unwrap();
        assert_eq!(t.title("weekly"), "Trading Strategy");
        assert_eq!(t.sip_label(), "Total Equity");
        assert_eq!(t.timeline_prefix(), "Day");
        assert_eq!(t.periods.len(), 6);
    }

    #[test]
    fn periods_are_numbered_from_one() {
        for id in ["weekly", "monthly", "3month", "1yr"] {
            let t = template_for(id).unwrap();
            for (i, p) in t.periods.iter().enumerate() {
                assert_eq!(p.number as usize, i + 1);
            }
        }
    }

    #[test]
    fn allocation_lookup() {
        let first = &template_for("10yr").unwrap().periods[0];
        assert_eq!(first.allocation_for("Commercial Banks"), Some(30));
        assert_eq!(first.allocation_for("Finance"), None);
    }
}
