//! Step 4: strategy dashboard.
//!
//! Period 0 is the overview of the template's plans; periods 1..=n show the
//! plan detail with sector picks, the running calculation and the calendar.
//! The period cursor itself belongs to the flow controller, so period
//! changes are returned as [`Msg`]s.

pub mod actions;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDateTime;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::data::{StrategyTemplate, SECTORS};
use crate::input::{ClickState, InputEvent};
use crate::screens::form::FieldEvent;
use crate::screens::Msg;
use crate::service::MarketSnapshot;

use actions::*;
use state::{DetailField, Focus, StrategyState};

pub struct StrategyScreen {
    pub state: StrategyState,
}

impl StrategyScreen {
    pub fn new(
        goal: &'static str,
        template: &'static StrategyTemplate,
        now: NaiveDateTime,
        flash_ticks: u32,
    ) -> Self {
        Self {
            state: StrategyState::new(goal, template, now, flash_ticks),
        }
    }

    pub fn goal(&self) -> &'static str {
        self.state.goal
    }

    pub fn tick(&mut self, ticks: u32) {
        logic::tick(&mut self.state, ticks);
    }

    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.state.now = now;
    }

    pub fn handle_input(
        &mut self,
        event: &InputEvent,
        period: usize,
        market: Option<&MarketSnapshot>,
    ) -> Vec<Msg> {
        if let InputEvent::Click(id) = event {
            return self.handle_click(*id, period, market);
        }
        if self.state.focus != Focus::None {
            self.handle_field_key(event, period);
            return Vec::new();
        }

        let s = &mut self.state;
        let periods = s.template.periods.len();
        match event {
            InputEvent::Key('h') | InputEvent::Key('<') => return vec![Msg::PrevPeriod],
            InputEvent::Key('l') | InputEvent::Key('>') => return vec![Msg::NextPeriod],
            InputEvent::Key(c) if c.is_ascii_digit() => {
                let n = c.to_digit(10).unwrap_or(0) as usize;
                if n <= periods {
                    return vec![Msg::SetPeriod(n)];
                }
            }
            InputEvent::Key('n') => return vec![Msg::Reset],
            InputEvent::Key('s') => s.focus = Focus::Sip,
            InputEvent::Key('t') => s.focus = Focus::Target,
            InputEvent::Key('c') => logic::save_config(s),
            InputEvent::Tab => s.focus = logic::next_focus(s, period > 0),
            _ if period == 0 => {}
            InputEvent::Key('j') => logic::cursor_down(s),
            InputEvent::Key('k') => logic::cursor_up(s),
            InputEvent::Enter | InputEvent::Key(' ') => {
                let i = s.sector_cursor;
                logic::toggle_sector(s, i);
            }
            InputEvent::Key('v') => {
                let i = s.sector_cursor;
                if logic::save_sector(s, i).is_some() {
                    logic::show_flash(s, "Sector allocation saved");
                }
            }
            InputEvent::Key('a') if !s.selections.is_empty() => logic::save_allocation(s),
            InputEvent::Key('[') => logic::calendar_prev(s),
            InputEvent::Key(']') => logic::calendar_next(s),
            _ => {}
        }
        Vec::new()
    }

    fn handle_field_key(&mut self, event: &InputEvent, period: usize) {
        let outcome = match self.state.focused_field_mut() {
            Some(field) => field.handle(event),
            None => FieldEvent::Cancel,
        };
        match outcome {
            FieldEvent::Submit | FieldEvent::Cancel => self.state.focus = Focus::None,
            FieldEvent::Next => self.state.focus = logic::next_focus(&self.state, period > 0),
            _ => {}
        }
    }

    fn handle_click(&mut self, id: u16, period: usize, market: Option<&MarketSnapshot>) -> Vec<Msg> {
        let s = &mut self.state;
        match id {
            EDIT_SIP => s.focus = Focus::Sip,
            EDIT_TARGET => s.focus = Focus::Target,
            SAVE_CONFIG => logic::save_config(s),
            NEW_JOURNEY => return vec![Msg::Reset],
            PREV_PERIOD => return vec![Msg::PrevPeriod],
            NEXT_PERIOD => return vec![Msg::NextPeriod],
            SAVE_ALLOCATION if !s.selections.is_empty() => logic::save_allocation(s),
            CAL_PREV => logic::calendar_prev(s),
            CAL_NEXT => logic::calendar_next(s),
            _ if in_range(id, PERIOD_BASE, MAX_PERIODS) => {
                return vec![Msg::SetPeriod((id - PERIOD_BASE) as usize)];
            }
            _ if period == 0 => {}
            _ if in_range(id, SECTOR_BASE, MAX_SECTORS) => {
                logic::toggle_sector(s, (id - SECTOR_BASE) as usize);
            }
            _ if in_range(id, SAVE_SECTOR_BASE, MAX_SECTORS) => {
                if logic::save_sector(s, (id - SAVE_SECTOR_BASE) as usize).is_some() {
                    logic::show_flash(s, "Sector allocation saved");
                }
            }
            _ if in_range(id, STOCK_BASE, MAX_SECTOR_STOCKS) => {
                let stock = s
                    .expanded
                    .and_then(|i| SECTORS.get(i))
                    .and_then(|sector| sector.stocks.get((id - STOCK_BASE) as usize));
                if let Some(stock) = stock {
                    logic::toggle_stock(s, stock.symbol, market);
                }
            }
            _ if in_range(id, DETAIL_BASE, MAX_SELECTIONS * DETAIL_FIELDS) => {
                let offset = id - DETAIL_BASE;
                let selection = (offset / DETAIL_FIELDS) as usize;
                let field = DetailField::ALL[(offset % DETAIL_FIELDS) as usize];
                if selection < s.selections.len() {
                    s.focus = Focus::Detail { selection, field };
                }
            }
            _ => {}
        }
        Vec::new()
    }

    pub fn render(
        &self,
        period: usize,
        market: Option<&MarketSnapshot>,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render(&self.state, period, market, f, area, click_state);
    }
}

fn in_range(id: u16, base: u16, len: u16) -> bool {
    (base..base + len).contains(&id)
}
