//! Step 0: landing screen.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use crate::widgets::ClickableList;

use super::Msg;

pub const BEGIN: u16 = 1;

pub fn handle_input(event: &InputEvent) -> Option<Msg> {
    match event {
        InputEvent::Enter | InputEvent::Key(' ') | InputEvent::Key('s') | InputEvent::Click(BEGIN) => {
            Some(Msg::Begin)
        }
        _ => None,
    }
}

pub fn render(f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(9),
            Constraint::Min(1),
        ])
        .split(area);

    let mut cl = ClickableList::new();
    cl.push(Line::from(Span::styled(
        "Begin Your Wealth Journey",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )));
    cl.push(Line::from(""));
    cl.push(Line::from(Span::styled(
        "A personalized investment strategy tailored to your profile and goals",
        Style::default().fg(Color::Gray),
    )));
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(
            " [S] Start Investment Journey → ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        BEGIN,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));
    let inner_width = block.inner(chunks[1]).width;
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(chunks[1], &mut cs, 1, 1, 0, inner_width);
    }
    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_keys() {
        assert_eq!(handle_input(&InputEvent::Enter), Some(Msg::Begin));
        assert_eq!(handle_input(&InputEvent::Key('s')), Some(Msg::Begin));
        assert_eq!(handle_input(&InputEvent::Click(BEGIN)), Some(Msg::Begin));
    }

    #[test]
    fn other_keys_ignored() {
        assert_eq!(handle_input(&InputEvent::Key('x')), None);
        assert_eq!(handle_input(&InputEvent::Click(999)), None);
    }
}
