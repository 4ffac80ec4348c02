//! Portfolio setup state: the user's budget, risk appetite, categories and
//! holdings, plus the editor currently open on them.

use serde::Serialize;

use crate::screens::form::{number_text, TextField};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStock {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub purchase_price: f64,
    pub target_sell_price: f64,
    pub current_price: f64,
}

/// Sent as-is in the trading-config payload.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioData {
    pub total_budget: f64,
    /// Percent, 0-100.
    pub risk_tolerance: f64,
    pub selected_categories: Vec<String>,
    pub stocks: Vec<PortfolioStock>,
}

fn stock(id: u64, name: &str, category: &str, buy: f64, target: f64, now: f64) -> PortfolioStock {
    PortfolioStock {
        id,
        name: name.to_string(),
        category: category.to_string(),
        purchase_price: buy,
        target_sell_price: target,
        current_price: now,
    }
}

impl Default for PortfolioData {
    fn default() -> Self {
        Self {
            total_budget: 1_000_000.0,
            risk_tolerance: 25.0,
            selected_categories: vec![
                "Banking".to_string(),
                "Hydropower".to_string(),
                "Insurance".to_string(),
            ],
            stocks: vec![
                stock(1, "NABIL", "Banking", 100.0, 110.0, 105.0),
                stock(2, "CHCL", "Hydropower", 450.0, 500.0, 465.0),
                stock(3, "NICL", "Insurance", 850.0, 900.0, 870.0),
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockField {
    Name,
    Category,
    Purchase,
    Target,
    Current,
}

impl StockField {
    pub const ALL: [StockField; 5] = [
        StockField::Name,
        StockField::Category,
        StockField::Purchase,
        StockField::Target,
        StockField::Current,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            StockField::Name => "Symbol",
            StockField::Category => "Category",
            StockField::Purchase => "Purchase",
            StockField::Target => "Target",
            StockField::Current => "Current",
        }
    }
}

/// Working copy of a stock row while it is being edited.
#[derive(Clone, Debug, PartialEq)]
pub struct StockDraft {
    pub id: u64,
    pub name: TextField,
    pub category: TextField,
    pub purchase: TextField,
    pub target: TextField,
    pub current: TextField,
    pub focus: StockField,
}

impl StockDraft {
    pub fn from_stock(s: &PortfolioStock) -> Self {
        Self {
            id: s.id,
            name: TextField::new(s.name.clone()).max_len(16),
            category: TextField::new(s.category.clone()).max_len(32),
            purchase: TextField::numeric(number_text(s.purchase_price)),
            target: TextField::numeric(number_text(s.target_sell_price)),
            current: TextField::numeric(number_text(s.current_price)),
            focus: StockField::Name,
        }
    }

    pub fn field(&self, f: StockField) -> &TextField {
        match f {
            StockField::Name => &self.name,
            StockField::Category => &self.category,
            StockField::Purchase => &self.purchase,
            StockField::Target => &self.target,
            StockField::Current => &self.current,
        }
    }

    pub fn field_mut(&mut self, f: StockField) -> &mut TextField {
        match f {
            StockField::Name => &mut self.name,
            StockField::Category => &mut self.category,
            StockField::Purchase => &mut self.purchase,
            StockField::Target => &mut self.target,
            StockField::Current => &mut self.current,
        }
    }

    pub fn to_stock(&self) -> PortfolioStock {
        PortfolioStock {
            id: self.id,
            name: self.name.trimmed().to_uppercase(),
            category: self.category.trimmed().to_string(),
            purchase_price: self.purchase.number(),
            target_sell_price: self.target.number(),
            current_price: self.current.number(),
        }
    }
}

/// At most one editor is open at a time.
#[derive(Clone, Debug, PartialEq)]
pub enum Editor {
    Idle,
    Budget(TextField),
    Risk(TextField),
    Categories(TextField),
    Stock(StockDraft),
}

pub struct PortfolioState {
    pub data: PortfolioData,
    pub editor: Editor,
    /// Highlighted row in the stock list.
    pub selected: usize,
    pub next_id: u64,
    /// Timestamp of the last applied market snapshot.
    pub market_stamp: Option<String>,
    /// Stocks whose price changed in the last snapshot.
    pub live_updates: usize,
}

impl PortfolioState {
    pub fn new() -> Self {
        let data = PortfolioData::default();
        let next_id = data.stocks.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            data,
            editor: Editor::Idle,
            selected: 0,
            next_id,
            market_stamp: None,
            live_updates: 0,
        }
    }

    pub fn editing_stock(&self) -> Option<u64> {
        match &self.editor {
            Editor::Stock(d) => Some(d.id),
            _ => None,
        }
    }
}
