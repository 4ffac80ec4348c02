//! Step views and the auth overlay.
//!
//! Screens render from state, register click targets, and translate input
//! into [`Msg`]s. They never touch the flow controller or the network; the
//! app applies the messages they return.

pub mod auth;
pub mod form;
pub mod goal;
pub mod investor;
pub mod portfolio;
pub mod start;
pub mod strategy;

use ratzilla::ratatui::layout::{Alignment, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::service::Command;

/// Request from a screen to the app.
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    Begin,
    SelectInvestor(&'static str),
    /// "Continue" out of portfolio setup; gated on authentication.
    RequestGoalStep,
    SelectGoal(&'static str),
    SetPeriod(usize),
    PrevPeriod,
    NextPeriod,
    Reset,
    /// Auth overlay finished its success delay.
    LoginSuccess,
    CloseAuth,
    Run(Command),
}

/// Format a rupee amount with thousands separators, e.g. `NPR 1,000,000`.
pub fn npr(amount: f64) -> String {
    format!("NPR {}", group_thousands(amount))
}

/// `1234567.891` → `"1,234,567.89"`. Whole numbers drop the fraction.
pub fn group_thousands(amount: f64) -> String {
    let negative = amount < 0.0;
    let rounded = (amount.abs() * 100.0).round() / 100.0;
    let whole = rounded.trunc() as u64;
    let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if cents > 0 {
        out.push_str(&format!(".{cents:02}"));
    }
    if negative && (whole > 0 || cents > 0) {
        out.insert(0, '-');
    }
    out
}

/// Centered heading block used at the top of every step.
pub fn render_heading(f: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let lines = vec![
        Line::from(Span::styled(
            title.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            subtitle.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)));
    f.render_widget(widget, area);
}

/// Key style used for `[X]` hints.
pub fn key_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1_000_000.0), "1,000,000");
        assert_eq!(group_thousands(1234.5), "1,234.50");
        assert_eq!(group_thousands(-25_000.0), "-25,000");
        assert_eq!(group_thousands(0.004), "0");
    }

    #[test]
    fn npr_prefix() {
        assert_eq!(npr(250_000.0), "NPR 250,000");
    }
}
