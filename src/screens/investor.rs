//! Step 1: investor profile selection.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::data::INVESTOR_TYPES;
use crate::input::{ClickState, InputEvent};
use crate::widgets::ClickableList;

use super::{key_style, render_heading, Msg};

/// `SELECT_BASE + index` into [`INVESTOR_TYPES`].
pub const SELECT_BASE: u16 = 100;

pub fn handle_input(event: &InputEvent) -> Option<Msg> {
    let index = match event {
        InputEvent::Key(c @ '1'..='9') => (*c as u8 - b'1') as usize,
        InputEvent::Click(id) if *id >= SELECT_BASE => (*id - SELECT_BASE) as usize,
        _ => return None,
    };
    INVESTOR_TYPES
        .get(index)
        .map(|t| Msg::SelectInvestor(t.id))
}

pub fn render(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_heading(
        f,
        chunks[0],
        "Select Your Profile",
        "Choose the profile that best describes you",
    );

    let mut cl = ClickableList::new();
    for (i, t) in INVESTOR_TYPES.iter().enumerate() {
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), key_style(true)),
                Span::raw(format!("{} ", t.icon)),
                Span::styled(
                    t.label,
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
            ]),
            SELECT_BASE + i as u16,
        );
        cl.push(Line::from(""));
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(chunks[1], &mut cs, 1, 1, 0, 0);
    }
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Investor Profile "),
    );
    f.render_widget(widget, chunks[1]);
}
