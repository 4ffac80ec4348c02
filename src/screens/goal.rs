//! Step 3: investment horizon selection.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::data::{template_for, GOALS};
use crate::input::{ClickState, InputEvent};
use crate::widgets::ClickableList;

use super::{key_style, render_heading, Msg};

/// `SELECT_BASE + index` into [`GOALS`].
pub const SELECT_BASE: u16 = 200;

pub fn handle_input(event: &InputEvent) -> Option<Msg> {
    let index = match event {
        InputEvent::Key(c @ '1'..='9') => (*c as u8 - b'1') as usize,
        InputEvent::Click(id) if *id >= SELECT_BASE => (*id - SELECT_BASE) as usize,
        _ => return None,
    };
    GOALS.get(index).map(|g| Msg::SelectGoal(g.id))
}

pub fn render(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_heading(
        f,
        chunks[0],
        "Choose Your Investment Goal",
        "Select your investment timeline",
    );

    let mut cl = ClickableList::new();
    for (i, g) in GOALS.iter().enumerate() {
        let available = template_for(g.id).is_some();
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), key_style(available)),
                Span::styled(
                    format!("{:<14}", g.duration),
                    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                ),
                Span::styled(g.subtitle, Style::default().fg(Color::Gray)),
            ]),
            SELECT_BASE + i as u16,
        );
    }

    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(chunks[1], &mut cs, 1, 1, 0, 0);
    }
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" 🎯 Goals "),
    );
    f.render_widget(widget, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_map_to_goal_ids() {
        assert_eq!(handle_input(&InputEvent::Key('1')), Some(Msg::SelectGoal("weekly")));
        assert_eq!(handle_input(&InputEvent::Key('9')), Some(Msg::SelectGoal("20yr")));
        assert_eq!(handle_input(&InputEvent::Key('0')), None);
    }

    #[test]
    fn clicks_map_to_goal_ids() {
        assert_eq!(
            handle_input(&InputEvent::Click(SELECT_BASE + 6)),
            Some(Msg::SelectGoal("5yr"))
        );
        assert_eq!(handle_input(&InputEvent::Click(SELECT_BASE + 9)), None);
    }
}
