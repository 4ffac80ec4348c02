//! Pure portfolio operations and derived figures.

use crate::screens::form::{number_text, TextField};
use crate::service::MarketSnapshot;

use super::state::{Editor, PortfolioData, PortfolioState, PortfolioStock, StockDraft};

// ── Derived figures ────────────────────────────────────────────

/// Expected gain of the target over the purchase price, in percent.
/// Zero when the purchase price is zero.
pub fn target_change_pct(purchase: f64, target: f64) -> f64 {
    if purchase == 0.0 {
        0.0
    } else {
        (target - purchase) / purchase * 100.0
    }
}

pub fn price_change(stock: &PortfolioStock) -> f64 {
    stock.current_price - stock.purchase_price
}

/// Amount of the budget the user accepts losing.
pub fn risk_amount(data: &PortfolioData) -> f64 {
    data.total_budget * data.risk_tolerance / 100.0
}

/// How far the current price has moved from purchase towards target,
/// clamped to 0-100. A target equal to the purchase price counts as reached
/// once the current price is at or above it.
pub fn progress_pct(current: f64, purchase: f64, target: f64) -> f64 {
    if target == purchase {
        return if current >= target { 100.0 } else { 0.0 };
    }
    ((current - purchase) / (target - purchase) * 100.0).clamp(0.0, 100.0)
}

// ── Budget / risk ──────────────────────────────────────────────

pub fn edit_budget(state: &mut PortfolioState) {
    state.editor = Editor::Budget(TextField::numeric(number_text(state.data.total_budget)).max_len(15));
}

pub fn edit_risk(state: &mut PortfolioState) {
    state.editor = Editor::Risk(TextField::numeric(number_text(state.data.risk_tolerance)).max_len(5));
}

/// Nudge the risk buffer by `delta` points, staying within 0-100.
pub fn adjust_risk(state: &mut PortfolioState, delta: f64) {
    if let Editor::Risk(field) = &mut state.editor {
        let next = (field.number() + delta).clamp(0.0, 100.0);
        field.value = number_text(next);
    }
}

/// Commit the open budget, risk or stock editor. Category editing stays
/// open after adding one.
pub fn save(state: &mut PortfolioState) {
    match std::mem::replace(&mut state.editor, Editor::Idle) {
        Editor::Budget(field) => state.data.total_budget = field.number(),
        Editor::Risk(field) => state.data.risk_tolerance = field.number().clamp(0.0, 100.0),
        Editor::Categories(mut field) => {
            add_category(&mut state.data, field.trimmed());
            field.clear();
            state.editor = Editor::Categories(field);
        }
        Editor::Stock(draft) => save_stock(state, &draft),
        Editor::Idle => {}
    }
}

/// Save whatever editor is open and close it, categories included.
pub fn commit(state: &mut PortfolioState) {
    save(state);
    state.editor = Editor::Idle;
}

pub fn cancel(state: &mut PortfolioState) {
    state.editor = Editor::Idle;
}

// ── Categories ─────────────────────────────────────────────────

pub fn edit_categories(state: &mut PortfolioState) {
    state.editor = Editor::Categories(TextField::new("").max_len(32));
}

/// Append a trimmed, non-empty category that is not already selected.
pub fn add_category(data: &mut PortfolioData, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || data.selected_categories.iter().any(|c| c == name) {
        return false;
    }
    data.selected_categories.push(name.to_string());
    true
}

pub fn remove_category(data: &mut PortfolioData, index: usize) -> Option<String> {
    (index < data.selected_categories.len()).then(|| data.selected_categories.remove(index))
}

// ── Stocks ─────────────────────────────────────────────────────

pub fn edit_stock(state: &mut PortfolioState, index: usize) {
    if let Some(stock) = state.data.stocks.get(index) {
        state.selected = index;
        state.editor = Editor::Stock(StockDraft::from_stock(stock));
    }
}

fn save_stock(state: &mut PortfolioState, draft: &StockDraft) {
    let updated = draft.to_stock();
    if let Some(slot) = state.data.stocks.iter_mut().find(|s| s.id == draft.id) {
        *slot = updated;
    }
}

pub fn delete_stock(state: &mut PortfolioState, index: usize) -> Option<PortfolioStock> {
    if index >= state.data.stocks.len() {
        return None;
    }
    let removed = state.data.stocks.remove(index);
    if state.editing_stock() == Some(removed.id) {
        state.editor = Editor::Idle;
    }
    state.selected = state.selected.min(state.data.stocks.len().saturating_sub(1));
    Some(removed)
}

/// Append a placeholder stock and open it for editing.
pub fn add_stock(state: &mut PortfolioState) {
    let category = state
        .data
        .selected_categories
        .first()
        .cloned()
        .unwrap_or_else(|| "Uncategorized".to_string());
    let stock = PortfolioStock {
        id: state.next_id,
        name: "NEW STOCK".to_string(),
        category,
        purchase_price: 100.0,
        target_sell_price: 110.0,
        current_price: 100.0,
    };
    state.next_id += 1;
    state.data.stocks.push(stock);
    let last = state.data.stocks.len() - 1;
    edit_stock(state, last);
}

pub fn select_next(state: &mut PortfolioState) {
    if state.selected + 1 < state.data.stocks.len() {
        state.selected += 1;
    }
}

pub fn select_prev(state: &mut PortfolioState) {
    state.selected = state.selected.saturating_sub(1);
}

// ── Live prices ────────────────────────────────────────────────

/// Replace `current_price` of every stock whose symbol has a live price.
/// Returns how many prices changed.
pub fn apply_market(state: &mut PortfolioState, snapshot: &MarketSnapshot) -> usize {
    let mut changed = 0;
    for stock in &mut state.data.stocks {
        if let Some(ltp) = snapshot.ltp(&stock.name) {
            if ltp != stock.current_price {
                stock.current_price = ltp;
                changed += 1;
            }
        }
    }
    state.market_stamp = Some(snapshot.timestamp.clone());
    state.live_updates = changed;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::service::Quotes;
    use std::collections::HashMap;

    fn state() -> PortfolioState {
        PortfolioState::new()
    }

    #[test]
    fn target_change() {
        assert!((target_change_pct(100.0, 110.0) - 10.0).abs() < 1e-9);
        assert!((target_change_pct(450.0, 500.0) - 11.111).abs() < 1e-3);
        assert_eq!(target_change_pct(0.0, 110.0), 0.0);
    }

    #[test]
    fn risk_amount_is_share_of_budget() {
        assert_eq!(risk_amount(&PortfolioData::default()), 250_000.0);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress_pct(105.0, 100.0, 110.0), 50.0);
        assert_eq!(progress_pct(95.0, 100.0, 110.0), 0.0);
        assert_eq!(progress_pct(130.0, 100.0, 110.0), 100.0);
        assert_eq!(progress_pct(100.0, 100.0, 100.0), 100.0);
        assert_eq!(progress_pct(99.0, 100.0, 100.0), 0.0);
    }

    #[test]
    fn price_change_sign() {
        let s = state();
        assert_eq!(price_change(&s.data.stocks[0]), 5.0);
    }

    #[test]
    fn budget_edit_save_and_cancel() {
        let mut s = state();
        edit_budget(&mut s);
        if let Editor::Budget(f) = &mut s.editor {
            f.value = "250000".into();
        }
        save(&mut s);
        assert_eq!(s.data.total_budget, 250_000.0);
        assert_eq!(s.editor, Editor::Idle);

        edit_budget(&mut s);
        if let Editor::Budget(f) = &mut s.editor {
            f.value = "1".into();
        }
        cancel(&mut s);
        assert_eq!(s.data.total_budget, 250_000.0);
    }

    #[test]
    fn non_numeric_budget_saves_zero() {
        let mut s = state();
        edit_budget(&mut s);
        if let Editor::Budget(f) = &mut s.editor {
            f.value.clear();
        }
        save(&mut s);
        assert_eq!(s.data.total_budget, 0.0);
    }

    #[test]
    fn risk_is_clamped() {
        let mut s = state();
        edit_risk(&mut s);
        if let Editor::Risk(f) = &mut s.editor {
            f.value = "140".into();
        }
        save(&mut s);
        assert_eq!(s.data.risk_tolerance, 100.0);
    }

    #[test]
    fn risk_nudges_stay_in_range() {
        let mut s = state();
        edit_risk(&mut s);
        for _ in 0..10 {
            adjust_risk(&mut s, -5.0);
        }
        assert_eq!(s.editor, Editor::Risk(TextField::numeric("0").max_len(5)));
        adjust_risk(&mut s, 5.0);
        save(&mut s);
        assert_eq!(s.data.risk_tolerance, 5.0);
    }

    #[test]
    fn categories_are_trimmed_and_unique() {
        let mut d = PortfolioData::default();
        assert!(add_category(&mut d, "  Microfinance "));
        assert!(!add_category(&mut d, "   "));
        assert!(!add_category(&mut d, "Banking"));
        assert_eq!(d.selected_categories.last().map(String::as_str), Some("Microfinance"));
        assert_eq!(remove_category(&mut d, 0).as_deref(), Some("Banking"));
        assert_eq!(remove_category(&mut d, 10), None);
        assert_eq!(d.selected_categories.len(), 3);
    }

    #[test]
    fn category_editor_stays_open_after_add() {
        let mut s = state();
        edit_categories(&mut s);
        if let Editor::Categories(f) = &mut s.editor {
            for c in "Finance".chars() {
                f.handle(&InputEvent::Key(c));
            }
        }
        save(&mut s);
        assert!(s.data.selected_categories.iter().any(|c| c == "Finance"));
        assert!(matches!(&s.editor, Editor::Categories(f) if f.value.is_empty()));
    }

    #[test]
    fn add_stock_uses_first_category_and_opens_editor() {
        let mut s = state();
        add_stock(&mut s);
        let added = s.data.stocks.last().unwrap();
        assert_eq!(added.name, "NEW STOCK");
        assert_eq!(added.category, "Banking");
        assert_eq!((added.purchase_price, added.target_sell_price, added.current_price), (100.0, 110.0, 100.0));
        assert_eq!(s.editing_stock(), Some(4));
        assert_eq!(s.selected, 3);
        assert_eq!(s.next_id, 5);
    }

    #[test]
    fn add_stock_without_categories() {
        let mut s = state();
        s.data.selected_categories.clear();
        add_stock(&mut s);
        assert_eq!(s.data.stocks.last().unwrap().category, "Uncategorized");
    }

    #[test]
    fn edit_stock_replaces_row_on_save() {
        let mut s = state();
        edit_stock(&mut s, 1);
        if let Editor::Stock(d) = &mut s.editor {
            d.target.value = "520".into();
        }
        save(&mut s);
        assert_eq!(s.data.stocks[1].target_sell_price, 520.0);
        assert_eq!(s.data.stocks[1].name, "CHCL");
    }

    #[test]
    fn cancel_discards_stock_changes() {
        let mut s = state();
        edit_stock(&mut s, 0);
        if let Editor::Stock(d) = &mut s.editor {
            d.name.value = "XYZ".into();
        }
        cancel(&mut s);
        assert_eq!(s.data.stocks[0].name, "NABIL");
    }

    #[test]
    fn delete_stock_closes_its_editor() {
        let mut s = state();
        edit_stock(&mut s, 2);
        let removed = delete_stock(&mut s, 2).unwrap();
        assert_eq!(removed.name, "NICL");
        assert_eq!(s.editor, Editor::Idle);
        assert_eq!(s.selected, 1);
        assert!(delete_stock(&mut s, 5).is_none());
    }

    #[test]
    fn selection_is_bounded() {
        let mut s = state();
        select_prev(&mut s);
        assert_eq!(s.selected, 0);
        for _ in 0..10 {
            select_next(&mut s);
        }
        assert_eq!(s.selected, 2);
    }

    #[test]
    fn market_snapshot_updates_matching_symbols() {
        let mut s = state();
        let mut quotes = HashMap::new();
        quotes.insert(
            "NABIL".to_string(),
            crate::service::Quote {
                ltp: Some(512.0),
                ..Default::default()
            },
        );
        quotes.insert(
            "CHCL".to_string(),
            crate::service::Quote {
                ltp: Some(0.0),
                ..Default::default()
            },
        );
        let snap = MarketSnapshot {
            timestamp: "12:00".into(),
            stocks: Quotes::BySymbol(quotes),
        };
        assert_eq!(apply_market(&mut s, &snap), 1);
        assert_eq!(s.data.stocks[0].current_price, 512.0);
        assert_eq!(s.data.stocks[1].current_price, 465.0);
        assert_eq!(s.market_stamp.as_deref(), Some("12:00"));
    }
}
