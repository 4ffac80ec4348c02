/// Investor profiles offered on the investor-select step.

#[derive(Debug, PartialEq, Eq)]
pub struct InvestorType {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

pub const INVESTOR_TYPES: &[InvestorType] = &[
    InvestorType { id: "job", label: "Job Holder", icon: "💼" },
    InvestorType { id: "business", label: "Businessman", icon: "🏢" },
    InvestorType { id: "household", label: "Household Woman", icon: "🏠" },
    InvestorType { id: "retired", label: "Retired Personnel", icon: "🎯" },
    InvestorType { id: "hnwi", label: "High Net Worth Individual", icon: "💎" },
];

pub fn find_investor(id: &str) -> Option<&'static InvestorType> {
    INVESTOR_TYPES.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        for (i, a) in INVESTOR_TYPES.iter().enumerate() {
            for b in &INVESTOR_TYPES[i + 1..] {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find_investor("hnwi").map(|t| t.label), Some("High Net Worth Individual"));
        assert!(find_investor("pirate").is_none());
    }
}
