//! Auth overlay rendering: a centered popup drawn over the current step.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;
use crate::screens::key_style;
use crate::widgets::{button, ClickableList, TabBar};

use super::actions::*;
use super::state::{AuthState, AuthStep, AuthTab, RegisterField};

const POPUP_WIDTH: u16 = 60;
const POPUP_HEIGHT: u16 = 26;

/// `width` x `height` centered in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

pub fn render(
    state: &AuthState,
    badge: Option<&str>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let popup = centered_rect(area, POPUP_WIDTH, POPUP_HEIGHT);
    f.render_widget(Clear, popup);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" NEPSE Investment Journey ");
    let inner = outer.inner(popup);
    f.render_widget(outer, popup);

    let show_tabs = state.step == AuthStep::Form;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                           // Title + close
            Constraint::Length(if show_tabs { 3 } else { 0 }), // Tabs
            Constraint::Min(3),                              // Body
        ])
        .split(inner);

    render_title(state, badge, f, chunks[0], click_state);
    if show_tabs {
        render_tabs(state, f, chunks[1], click_state);
    }
    match state.step {
        AuthStep::Success => render_success(f, chunks[2]),
        _ => render_form(state, f, chunks[2], click_state),
    }
}

fn render_title(
    state: &AuthState,
    badge: Option<&str>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let (title, subtitle) = match state.step {
        AuthStep::Verification => ("Verify Identity", "Enter code sent to your email"),
        _ => ("Secure Access", "One account for everything"),
    };
    let mut cl = ClickableList::new();
    cl.push_buttons(
        Line::from(Span::styled(
            format!(" {title}"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        vec![button(" [X]", key_style(true), CLOSE)],
    );
    cl.push(Line::from(Span::styled(format!(" {subtitle}"), Style::default().fg(Color::Gray))));
    if let Some(badge) = badge {
        cl.push(Line::from(Span::styled(format!(" {badge}"), Style::default().fg(Color::Cyan))));
    }
    {
        let mut cs = click_state.borrow_mut();
        cl.register_inline_targets(area, &mut cs, 0, 0, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()), area);
}

fn render_tabs(
    state: &AuthState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let tab_style = |tab: AuthTab| {
        if state.tab == tab {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let mut cs = click_state.borrow_mut();
    TabBar::new(" │ ")
        .tab(" Login ", tab_style(AuthTab::Login), TAB_LOGIN)
        .tab(" Register ", tab_style(AuthTab::Register), TAB_REGISTER)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)))
        .render(f, area, &mut cs);
}

fn field_line(label: &str, value: Span<'static>, focused: bool, required: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    let marker = if required { "*" } else { " " };
    Line::from(vec![
        Span::styled(format!(" {label:<15}"), label_style),
        Span::styled(marker, Style::default().fg(Color::Red)),
        Span::raw(" "),
        value,
    ])
}

fn notice_line(text: &str, color: Color) -> Line<'static> {
    Line::from(Span::styled(format!(" {text}"), Style::default().fg(color)))
}

fn render_form(
    state: &AuthState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    let mut focus_line = 0usize;

    match (state.step, state.tab) {
        (AuthStep::Verification, _) => {
            focus_line = cl.len();
            cl.push_clickable(
                field_line("Code", state.code.display(true), true, true),
                FIELD_BASE,
            );
        }
        (_, AuthTab::Login) => {
            let fields = [("Username", &state.login_email), ("Password", &state.login_password)];
            for (i, (label, field)) in fields.into_iter().enumerate() {
                let focused = state.focus == i;
                if focused {
                    focus_line = cl.len();
                }
                cl.push_clickable(
                    field_line(label, field.display(focused), focused, true),
                    FIELD_BASE + i as u16,
                );
            }
        }
        (_, AuthTab::Register) => {
            for (i, rf) in RegisterField::ALL.iter().enumerate().take(MAX_FIELDS as usize) {
                let focused = state.focus == i;
                if focused {
                    focus_line = cl.len();
                }
                cl.push_clickable(
                    field_line(rf.label(), state.field(*rf).display(focused), focused, rf.required()),
                    FIELD_BASE + i as u16,
                );
            }
        }
    }

    cl.push(Line::from(""));
    let label = match (state.step, state.tab, state.loading) {
        (AuthStep::Verification, _, true) => " Verifying... ",
        (AuthStep::Verification, _, false) => " Verify & Continue ",
        (_, AuthTab::Login, true) => " Authenticating... ",
        (_, AuthTab::Login, false) => " Secure Login ",
        (_, AuthTab::Register, true) => " Processing... ",
        (_, AuthTab::Register, false) => " Proceed to Verification ",
    };
    let submit_style = if state.loading {
        Style::default().fg(Color::DarkGray).bg(Color::Gray)
    } else {
        Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
    };
    cl.push_buttons(Line::from(" "), vec![button(label, submit_style, SUBMIT)]);

    if let Some(msg) = &state.message {
        cl.push(notice_line(msg, Color::Yellow));
    }
    if state.tab == AuthTab::Login && state.step == AuthStep::Form {
        if let Some(err) = &state.login_error {
            cl.push(notice_line(err, Color::Red));
        }
        cl.push(Line::from(""));
        cl.push_clickable(
            Line::from(vec![
                Span::styled(" Don't have an account? ", Style::default().fg(Color::Gray)),
                Span::styled("Create New Registration", key_style(true)),
            ]),
            TAB_REGISTER,
        );
    }
    cl.push(Line::from(Span::styled(
        " [Tab] next field  [Enter] submit  [Esc] close",
        Style::default().fg(Color::DarkGray),
    )));

    let visible = area.height as usize;
    let scroll = (focus_line + 3).saturating_sub(visible).min(focus_line) as u16;
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 0, 0, scroll, 0);
        cl.register_inline_targets(area, &mut cs, 0, 0, scroll);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).scroll((scroll, 0)), area);
}

fn render_success(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "✔ Login Successful!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Welcome back to your dashboard.",
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn popup_is_centered_and_clamped() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(area, 60, 26), Rect::new(20, 7, 60, 26));
        let small = Rect::new(0, 0, 40, 20);
        assert_eq!(centered_rect(small, 60, 26), Rect::new(0, 0, 40, 20));
    }
}
