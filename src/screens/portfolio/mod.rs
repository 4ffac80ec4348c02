//! Step 2: portfolio setup. Budget, risk tolerance, categories and the
//! holdings list, with live prices from the market feed.

pub mod actions;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::screens::form::FieldEvent;
use crate::screens::Msg;
use crate::service::{Command, TradingConfig};

use actions::*;
use state::{Editor, PortfolioState, StockField};

pub struct PortfolioScreen {
    pub state: PortfolioState,
}

impl PortfolioScreen {
    pub fn new() -> Self {
        Self {
            state: PortfolioState::new(),
        }
    }

    /// True while a text editor owns the keyboard.
    pub fn is_editing(&self) -> bool {
        self.state.editor != Editor::Idle
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> Vec<Msg> {
        if let InputEvent::Click(id) = event {
            return self.handle_click(*id);
        }
        if self.is_editing() {
            self.handle_editor_key(event);
            return Vec::new();
        }
        match event {
            InputEvent::Key('b') => logic::edit_budget(&mut self.state),
            InputEvent::Key('r') => logic::edit_risk(&mut self.state),
            InputEvent::Key('c') => logic::edit_categories(&mut self.state),
            InputEvent::Key('a') => logic::add_stock(&mut self.state),
            InputEvent::Key('j') => logic::select_next(&mut self.state),
            InputEvent::Key('k') => logic::select_prev(&mut self.state),
            InputEvent::Key('e') | InputEvent::Enter => {
                let i = self.state.selected;
                logic::edit_stock(&mut self.state, i);
            }
            InputEvent::Key('x') => {
                let i = self.state.selected;
                logic::delete_stock(&mut self.state, i);
            }
            InputEvent::Key('p') => return self.proceed(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_editor_key(&mut self, event: &InputEvent) {
        let s = &mut self.state;
        if matches!(s.editor, Editor::Risk(_)) {
            match event {
                InputEvent::Key('+') => return logic::adjust_risk(s, 5.0),
                InputEvent::Key('-') => return logic::adjust_risk(s, -5.0),
                _ => {}
            }
        }
        let outcome = match &mut s.editor {
            Editor::Budget(f) | Editor::Risk(f) | Editor::Categories(f) => f.handle(event),
            Editor::Stock(draft) => {
                let focus = draft.focus;
                match draft.field_mut(focus).handle(event) {
                    FieldEvent::Next => {
                        draft.focus = focus.next();
                        FieldEvent::Edited
                    }
                    other => other,
                }
            }
            Editor::Idle => FieldEvent::Ignored,
        };
        match outcome {
            FieldEvent::Submit => logic::save(s),
            FieldEvent::Cancel => logic::cancel(s),
            FieldEvent::BackspaceEmpty if matches!(s.editor, Editor::Categories(_)) => {
                let last = s.data.selected_categories.len().saturating_sub(1);
                logic::remove_category(&mut s.data, last);
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, id: u16) -> Vec<Msg> {
        if id == PROCEED {
            return self.proceed();
        }
        let s = &mut self.state;
        match id {
            EDIT_BUDGET => logic::edit_budget(s),
            EDIT_RISK => logic::edit_risk(s),
            EDIT_CATEGORIES => logic::edit_categories(s),
            ADD_STOCK => logic::add_stock(s),
            SAVE => logic::save(s),
            CANCEL => logic::cancel(s),
            RISK_DOWN => logic::adjust_risk(s, -5.0),
            RISK_UP => logic::adjust_risk(s, 5.0),
            _ if in_range(id, REMOVE_CATEGORY_BASE) => {
                logic::remove_category(&mut s.data, (id - REMOVE_CATEGORY_BASE) as usize);
            }
            _ if in_range(id, EDIT_STOCK_BASE) => {
                logic::edit_stock(s, (id - EDIT_STOCK_BASE) as usize);
            }
            _ if in_range(id, DELETE_STOCK_BASE) => {
                logic::delete_stock(s, (id - DELETE_STOCK_BASE) as usize);
            }
            _ if in_range(id, FOCUS_FIELD_BASE) => {
                if let (Editor::Stock(draft), Some(field)) = (
                    &mut s.editor,
                    StockField::ALL.get((id - FOCUS_FIELD_BASE) as usize),
                ) {
                    draft.focus = *field;
                }
            }
            _ => {}
        }
        Vec::new()
    }

    /// Commit any open editor, save the trading configuration in the
    /// background and ask to move on.
    fn proceed(&mut self) -> Vec<Msg> {
        logic::commit(&mut self.state);
        vec![
            Msg::Run(Command::SaveTradingConfig(TradingConfig::guest(
                self.state.data.clone(),
            ))),
            Msg::RequestGoalStep,
        ]
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}

fn in_range(id: u16, base: u16) -> bool {
    (base..base + MAX_ROWS).contains(&id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(screen: &mut PortfolioScreen, keys: &str) {
        for c in keys.chars() {
            screen.handle_input(&InputEvent::Key(c));
        }
    }

    #[test]
    fn budget_edit_by_keyboard() {
        let mut p = PortfolioScreen::new();
        press(&mut p, "b");
        assert!(p.is_editing());
        // Clear the seeded value.
        for _ in 0..7 {
            p.handle_input(&InputEvent::Backspace);
        }
        press(&mut p, "500000");
        p.handle_input(&InputEvent::Enter);
        assert_eq!(p.state.data.total_budget, 500_000.0);
        assert!(!p.is_editing());
    }

    #[test]
    fn letter_shortcuts_are_typed_while_editing() {
        let mut p = PortfolioScreen::new();
        press(&mut p, "c");
        press(&mut p, "Bank");
        // 'a' and 'x' went into the field, not to add/delete stock.
        press(&mut p, "ax");
        assert_eq!(p.state.data.stocks.len(), 3);
        p.handle_input(&InputEvent::Enter);
        assert!(p.state.data.selected_categories.iter().any(|c| c == "Bankax"));
        p.handle_input(&InputEvent::Escape);
        assert!(!p.is_editing());
    }

    #[test]
    fn backspace_on_empty_category_removes_last() {
        let mut p = PortfolioScreen::new();
        press(&mut p, "c");
        p.handle_input(&InputEvent::Backspace);
        assert_eq!(p.state.data.selected_categories, ["Banking", "Hydropower"]);
    }

    #[test]
    fn risk_plus_minus_keys() {
        let mut p = PortfolioScreen::new();
        press(&mut p, "r++-+");
        p.handle_input(&InputEvent::Enter);
        assert_eq!(p.state.data.risk_tolerance, 35.0);
    }

    #[test]
    fn stock_editor_tab_cycles_fields() {
        let mut p = PortfolioScreen::new();
        press(&mut p, "je");
        p.handle_input(&InputEvent::Tab);
        p.handle_input(&InputEvent::Tab);
        // Purchase field now focused: replace "450" with "440".
        p.handle_input(&InputEvent::Backspace);
        p.handle_input(&InputEvent::Backspace);
        press(&mut p, "40");
        p.handle_input(&InputEvent::Enter);
        assert_eq!(p.state.data.stocks[1].purchase_price, 440.0);
    }

    #[test]
    fn clicks_focus_fields_and_delete_rows() {
        let mut p = PortfolioScreen::new();
        p.handle_input(&InputEvent::Click(EDIT_STOCK_BASE));
        p.handle_input(&InputEvent::Click(FOCUS_FIELD_BASE + 3));
        assert!(matches!(&p.state.editor, Editor::Stock(d) if d.focus == StockField::Target));
        p.handle_input(&InputEvent::Click(CANCEL));
        p.handle_input(&InputEvent::Click(DELETE_STOCK_BASE + 1));
        let names: Vec<_> = p.state.data.stocks.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["NABIL", "NICL"]);
    }

    #[test]
    fn remove_category_by_click() {
        let mut p = PortfolioScreen::new();
        p.handle_input(&InputEvent::Click(REMOVE_CATEGORY_BASE + 1));
        assert_eq!(p.state.data.selected_categories, ["Banking", "Insurance"]);
    }

    #[test]
    fn proceed_saves_config_then_requests_goal_step() {
        let mut p = PortfolioScreen::new();
        let msgs = p.handle_input(&InputEvent::Key('p'));
        assert_eq!(msgs.len(), 2);
        match &msgs[0] {
            Msg::Run(Command::SaveTradingConfig(cfg)) => {
                assert_eq!(cfg.user_id, "guest_user");
                assert_eq!(cfg.period, "WEEKLY");
                assert_eq!(cfg.portfolio, p.state.data);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(msgs[1], Msg::RequestGoalStep);
    }

    #[test]
    fn proceed_commits_open_editor_first() {
        let mut p = PortfolioScreen::new();
        press(&mut p, "b");
        p.handle_input(&InputEvent::Backspace);
        press(&mut p, "25");
        let msgs = p.handle_input(&InputEvent::Click(PROCEED));
        assert!(!p.is_editing());
        assert_eq!(p.state.data.total_budget, 10_000_025.0);
        assert_eq!(msgs.len(), 2);
        match &msgs[0] {
            Msg::Run(Command::SaveTradingConfig(cfg)) => {
                assert_eq!(cfg.portfolio, p.state.data);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(msgs[1], Msg::RequestGoalStep);
    }

    #[test]
    fn proceed_closes_category_editor_after_adding() {
        let mut p = PortfolioScreen::new();
        press(&mut p, "c");
        press(&mut p, "Finance");
        p.handle_input(&InputEvent::Click(PROCEED));
        assert!(!p.is_editing());
        assert_eq!(
            p.state.data.selected_categories.last().map(String::as_str),
            Some("Finance")
        );
    }
}
