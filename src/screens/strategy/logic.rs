//! Dashboard arithmetic and edits.
//!
//! Sector and allocation figures are computed on demand from the current
//! picks; nothing here is cached.

use crate::data::{PeriodPlan, Sector, SECTORS};
use crate::service::MarketSnapshot;

use super::state::{DetailField, Flash, Focus, Selection, StrategyState, DEFAULT_PRICE};

// ── Headline figures ───────────────────────────────────────────

/// Threshold below which the maximum allowed loss is flagged.
pub const LOSS_WARNING: f64 = 1000.0;

/// `(sip - spent) * target / 100`, before the floor at zero.
pub fn raw_allowed_loss(sip: f64, target: f64, spent: f64) -> f64 {
    (sip - spent) * (target / 100.0)
}

pub fn max_allowed_loss(sip: f64, target: f64, spent: f64) -> f64 {
    raw_allowed_loss(sip, target, spent).max(0.0)
}

pub fn loss_flagged(sip: f64, target: f64, spent: f64) -> bool {
    raw_allowed_loss(sip, target, spent) < LOSS_WARNING
}

pub fn total_spent(selections: &[Selection]) -> f64 {
    selections.iter().map(Selection::cost).sum()
}

/// Remaining balance is low below 10% of equity.
pub fn is_low_balance(equity: f64, remaining: f64) -> bool {
    remaining < equity * 0.1
}

/// Remaining balance minus the share exposed at `risk` percent.
pub fn protected_equity(remaining: f64, risk: f64) -> f64 {
    remaining - remaining * risk / 100.0
}

/// Summary of the period detail view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Totals {
    pub equity: f64,
    pub spent: f64,
    pub remaining: f64,
    pub low_balance: bool,
    pub protected: f64,
}

pub fn totals(state: &StrategyState) -> Totals {
    let equity = state.sip.number();
    let spent = total_spent(&state.selections);
    let remaining = equity - spent;
    Totals {
        equity,
        spent,
        remaining,
        low_balance: is_low_balance(equity, remaining),
        protected: protected_equity(remaining, state.target.number()),
    }
}

// ── Picks ──────────────────────────────────────────────────────

/// Entry price for a new pick: the live LTP, or the default.
pub fn default_price(symbol: &str, market: Option<&MarketSnapshot>) -> f64 {
    market.and_then(|m| m.ltp(symbol)).unwrap_or(DEFAULT_PRICE)
}

/// Pick `symbol`, or drop it if already picked. Returns true when picked.
pub fn toggle_stock(
    state: &mut StrategyState,
    symbol: &'static str,
    market: Option<&MarketSnapshot>,
) -> bool {
    if let Some(i) = state.selections.iter().position(|s| s.symbol == symbol) {
        state.selections.remove(i);
        fix_focus_after_removal(state, i);
        return false;
    }
    state
        .selections
        .push(Selection::new(symbol, default_price(symbol, market)));
    true
}

fn fix_focus_after_removal(state: &mut StrategyState, removed: usize) {
    if let Focus::Detail { selection, field } = state.focus {
        state.focus = match selection.cmp(&removed) {
            std::cmp::Ordering::Less => state.focus,
            std::cmp::Ordering::Equal => Focus::None,
            std::cmp::Ordering::Greater => Focus::Detail {
                selection: selection - 1,
                field,
            },
        };
    }
}

/// Target sell price: the entered value, or entry price + 10% rounded.
/// An unset entry price falls back to `live`.
pub fn target_price(sel: &Selection, live: f64) -> f64 {
    let target = sel.target.number();
    if target > 0.0 {
        return target;
    }
    let entry = match sel.price.number() {
        p if p > 0.0 => p,
        _ => live,
    };
    (entry * 1.1).round()
}

// ── Sectors ────────────────────────────────────────────────────

fn in_sector(sector: &Sector, symbol: &str) -> bool {
    sector.stocks.iter().any(|s| s.symbol == symbol)
}

/// Sum of the weights of picks listed in `sector`.
pub fn sector_weight(selections: &[Selection], sector: &Sector) -> f64 {
    selections
        .iter()
        .filter(|s| in_sector(sector, s.symbol))
        .map(|s| s.weight.number())
        .sum()
}

/// Live pick weights, else the saved value, else the plan's allocation,
/// else zero.
pub fn effective_percent(state: &StrategyState, plan: Option<&PeriodPlan>, sector: &Sector) -> f64 {
    if state.selections.iter().any(|s| in_sector(sector, s.symbol)) {
        return sector_weight(&state.selections, sector);
    }
    if let Some(saved) = state.saved_sectors.get(sector.name) {
        return *saved;
    }
    plan.and_then(|p| p.allocation_for(sector.name))
        .map(f64::from)
        .unwrap_or(0.0)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorStats {
    pub percent: f64,
    pub allocated: f64,
    pub spent: f64,
    pub remaining: f64,
}

impl SectorStats {
    /// Share of the allocation already spent, capped at 100.
    pub fn progress(&self) -> f64 {
        if self.allocated > 0.0 {
            (self.spent / self.allocated * 100.0).min(100.0)
        } else {
            0.0
        }
    }

    /// Hidden in the running calculation when nothing is allocated or spent.
    pub fn is_empty(&self) -> bool {
        self.percent == 0.0 && self.spent == 0.0
    }
}

pub fn sector_stats(state: &StrategyState, plan: Option<&PeriodPlan>, sector: &Sector) -> SectorStats {
    let percent = effective_percent(state, plan, sector);
    let allocated = state.sip.number() * percent / 100.0;
    let spent = state
        .selections
        .iter()
        .filter(|s| in_sector(sector, s.symbol))
        .map(Selection::cost)
        .sum();
    SectorStats {
        percent,
        allocated,
        spent,
        remaining: allocated - spent,
    }
}

/// Store the live weight sum of `SECTORS[index]`.
pub fn save_sector(state: &mut StrategyState, index: usize) -> Option<f64> {
    let sector = SECTORS.get(index)?;
    let total = sector_weight(&state.selections, sector);
    state.saved_sectors.insert(sector.name, total);
    Some(total)
}

/// Sum of effective percents over every sector.
pub fn total_allocated(state: &StrategyState, plan: Option<&PeriodPlan>) -> f64 {
    SECTORS
        .iter()
        .map(|sector| effective_percent(state, plan, sector))
        .sum()
}

pub fn toggle_sector(state: &mut StrategyState, index: usize) {
    if index >= SECTORS.len() {
        return;
    }
    state.sector_cursor = index;
    state.expanded = if state.expanded == Some(index) {
        None
    } else {
        Some(index)
    };
}

pub fn cursor_down(state: &mut StrategyState) {
    if state.sector_cursor + 1 < SECTORS.len() {
        state.sector_cursor += 1;
    }
}

pub fn cursor_up(state: &mut StrategyState) {
    state.sector_cursor = state.sector_cursor.saturating_sub(1);
}

// ── Focus ──────────────────────────────────────────────────────

/// Tab order: SIP, target, then each pick's fields when the detail view
/// shows them.
pub fn next_focus(state: &StrategyState, detail_visible: bool) -> Focus {
    let picks = if detail_visible { state.selections.len() } else { 0 };
    let first_detail = |selection| Focus::Detail {
        selection,
        field: DetailField::Price,
    };
    match state.focus {
        Focus::None => Focus::Sip,
        Focus::Sip => Focus::Target,
        Focus::Target if picks > 0 => first_detail(0),
        Focus::Target => Focus::None,
        Focus::Detail { selection, field } => {
            let i = field.index() + 1;
            if let Some(next) = DetailField::ALL.get(i) {
                Focus::Detail {
                    selection,
                    field: *next,
                }
            } else if selection + 1 < picks {
                first_detail(selection + 1)
            } else {
                Focus::None
            }
        }
    }
}

// ── Notices ────────────────────────────────────────────────────

pub fn show_flash(state: &mut StrategyState, text: &'static str) {
    let mut timer = crate::clock::Delay::default();
    timer.start(state.flash_ticks);
    state.flash = Some(Flash { text, timer });
}

/// Age the flash; clears it once its timer runs out.
pub fn tick(state: &mut StrategyState, ticks: u32) {
    if let Some(flash) = &mut state.flash {
        if flash.timer.advance(ticks) {
            state.flash = None;
        }
    }
}

pub fn save_config(state: &mut StrategyState) {
    log::info!(
        "strategy config for {}: {} {}, {} {}",
        state.goal,
        state.template.sip_label(),
        state.sip.number(),
        state.template.target_label(),
        state.target.number()
    );
    show_flash(state, "Configuration saved");
}

pub fn save_allocation(state: &mut StrategyState) {
    log::info!(
        "allocation saved: {} picks, {:.0} spent",
        state.selections.len(),
        total_spent(&state.selections)
    );
    show_flash(state, "Allocation saved");
}

pub fn calendar_prev(state: &mut StrategyState) {
    state.calendar = state.calendar.map(|v| v.prev());
}

pub fn calendar_next(state: &mut StrategyState) {
    state.calendar = state.calendar.map(|v| v.next());
}
