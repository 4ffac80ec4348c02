//! Strategy dashboard state: editable headline figures, the stock picks for
//! the period detail view, and the calendar card.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::calendar::{BsDate, MonthView};
use crate::clock::Delay;
use crate::data::StrategyTemplate;
use crate::screens::form::{number_text, TextField};

/// Editable figures of a picked stock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailField {
    Price,
    Qty,
    Target,
    SellQty,
    Weight,
}

impl DetailField {
    pub const ALL: [DetailField; 5] = [
        DetailField::Price,
        DetailField::Qty,
        DetailField::Target,
        DetailField::SellQty,
        DetailField::Weight,
    ];

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn label(self) -> &'static str {
        match self {
            DetailField::Price => "Purchase price",
            DetailField::Qty => "Purchase qty",
            DetailField::Target => "Target price",
            DetailField::SellQty => "Selling qty",
            DetailField::Weight => "Weight %",
        }
    }
}

/// A stock picked in the sector list.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub symbol: &'static str,
    pub price: TextField,
    pub qty: TextField,
    /// Blank means "entry price + 10%".
    pub target: TextField,
    pub sell_qty: TextField,
    pub weight: TextField,
}

pub const DEFAULT_PRICE: f64 = 500.0;
pub const DEFAULT_WEIGHT: f64 = 5.0;

impl Selection {
    pub fn new(symbol: &'static str, price: f64) -> Self {
        Self {
            symbol,
            price: TextField::numeric(number_text(price)).max_len(12),
            qty: TextField::numeric("").max_len(9),
            target: TextField::numeric("").max_len(12),
            sell_qty: TextField::numeric("").max_len(9),
            weight: TextField::numeric(number_text(DEFAULT_WEIGHT)).max_len(6),
        }
    }

    pub fn field(&self, f: DetailField) -> &TextField {
        match f {
            DetailField::Price => &self.price,
            DetailField::Qty => &self.qty,
            DetailField::Target => &self.target,
            DetailField::SellQty => &self.sell_qty,
            DetailField::Weight => &self.weight,
        }
    }

    pub fn field_mut(&mut self, f: DetailField) -> &mut TextField {
        match f {
            DetailField::Price => &mut self.price,
            DetailField::Qty => &mut self.qty,
            DetailField::Target => &mut self.target,
            DetailField::SellQty => &mut self.sell_qty,
            DetailField::Weight => &mut self.weight,
        }
    }

    /// Amount this pick spends: price × quantity.
    pub fn cost(&self) -> f64 {
        self.price.number() * self.qty.number()
    }
}

/// Which text field receives keystrokes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    None,
    Sip,
    Target,
    Detail { selection: usize, field: DetailField },
}

/// Short-lived notice such as "Configuration saved".
#[derive(Clone, Debug, PartialEq)]
pub struct Flash {
    pub text: &'static str,
    pub timer: Delay,
}

pub struct StrategyState {
    pub goal: &'static str,
    pub template: &'static StrategyTemplate,
    /// Total equity / SIP amount, depending on the template's labels.
    pub sip: TextField,
    /// Risk percentage / target amount.
    pub target: TextField,
    pub focus: Focus,
    /// Index into `SECTORS` of the open sector.
    pub expanded: Option<usize>,
    /// Keyboard cursor over the sector list.
    pub sector_cursor: usize,
    /// In pick order; symbols are unique.
    pub selections: Vec<Selection>,
    /// Weight sums stored with "save sector".
    pub saved_sectors: HashMap<&'static str, f64>,
    pub flash: Option<Flash>,
    pub flash_ticks: u32,
    pub now: NaiveDateTime,
    /// `None` when today falls outside the calendar table.
    pub calendar: Option<MonthView>,
}

impl StrategyState {
    pub fn new(
        goal: &'static str,
        template: &'static StrategyTemplate,
        now: NaiveDateTime,
        flash_ticks: u32,
    ) -> Self {
        let calendar = BsDate::from_ad(now.date()).map(MonthView::containing);
        Self {
            goal,
            template,
            sip: TextField::numeric(number_text(template.sip_amount)).max_len(15),
            target: TextField::numeric(number_text(template.target_amount)).max_len(15),
            focus: Focus::None,
            expanded: None,
            sector_cursor: 0,
            selections: Vec::new(),
            saved_sectors: HashMap::new(),
            flash: None,
            flash_ticks,
            now,
            calendar,
        }
    }

    pub fn today(&self) -> Option<BsDate> {
        BsDate::from_ad(self.now.date())
    }

    pub fn selection(&self, symbol: &str) -> Option<&Selection> {
        self.selections.iter().find(|s| s.symbol == symbol)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::None => None,
            Focus::Sip => Some(&mut self.sip),
            Focus::Target => Some(&mut self.target),
            Focus::Detail { selection, field } => self
                .selections
                .get_mut(selection)
                .map(|s| s.field_mut(field)),
        }
    }
}
