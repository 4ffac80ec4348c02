//! Single-line text entry shared by the editors and the auth overlay.

use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::Span;

use crate::input::InputEvent;

/// What a key did to a focused field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldEvent {
    Edited,
    Submit,
    Cancel,
    /// Move focus to the next field.
    Next,
    /// Backspace on an already empty field.
    BackspaceEmpty,
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextField {
    pub value: String,
    max_len: Option<usize>,
    /// Accept only characters that can appear in a number.
    numeric: bool,
    masked: bool,
}

impl TextField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::default()
        }
    }

    pub fn numeric(value: impl Into<String>) -> Self {
        Self {
            numeric: true,
            ..Self::new(value)
        }
    }

    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn max_len(mut self, n: usize) -> Self {
        self.max_len = Some(n);
        self
    }

    pub fn handle(&mut self, event: &InputEvent) -> FieldEvent {
        match event {
            InputEvent::Key(c) => {
                if c.is_control() || (self.numeric && !(c.is_ascii_digit() || *c == '.' || *c == '-')) {
                    return FieldEvent::Ignored;
                }
                if self.max_len.is_some_and(|n| self.value.chars().count() >= n) {
                    return FieldEvent::Ignored;
                }
                self.value.push(*c);
                FieldEvent::Edited
            }
            InputEvent::Backspace => {
                if self.value.pop().is_some() {
                    FieldEvent::Edited
                } else {
                    FieldEvent::BackspaceEmpty
                }
            }
            InputEvent::Enter => FieldEvent::Submit,
            InputEvent::Escape => FieldEvent::Cancel,
            InputEvent::Tab => FieldEvent::Next,
            InputEvent::Click(_) => FieldEvent::Ignored,
        }
    }

    pub fn number(&self) -> f64 {
        parse_number(&self.value)
    }

    pub fn trimmed(&self) -> &str {
        self.value.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    /// Text to draw, with a cursor block when focused.
    pub fn display(&self, focused: bool) -> Span<'static> {
        let mut text = if self.masked {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        };
        let style = if focused {
            text.push('▏');
            Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        Span::styled(text, style)
    }
}

/// Lenient number parsing: the longest leading numeric prefix, or 0.
/// `"12.5abc"` → 12.5, `"abc"` → 0.
pub fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '-' | '+' if i == 0 => {}
            '.' if !seen_dot => seen_dot = true,
            d if d.is_ascii_digit() => {}
            _ => break,
        }
        end = i + c.len_utf8();
    }
    s[..end].parse::<f64>().unwrap_or(0.0)
}

/// Render a number for an edit buffer: whole numbers without a fraction.
pub fn number_text(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(field: &mut TextField, s: &str) {
        for c in s.chars() {
            field.handle(&InputEvent::Key(c));
        }
    }

    #[test]
    fn typing_and_backspace() {
        let mut f = TextField::new("");
        type_str(&mut f, "NABIL");
        assert_eq!(f.value, "NABIL");
        assert_eq!(f.handle(&InputEvent::Backspace), FieldEvent::Edited);
        assert_eq!(f.value, "NABI");
    }

    #[test]
    fn backspace_on_empty_is_reported() {
        let mut f = TextField::new("");
        assert_eq!(f.handle(&InputEvent::Backspace), FieldEvent::BackspaceEmpty);
    }

    #[test]
    fn control_keys() {
        let mut f = TextField::new("x");
        assert_eq!(f.handle(&InputEvent::Enter), FieldEvent::Submit);
        assert_eq!(f.handle(&InputEvent::Escape), FieldEvent::Cancel);
        assert_eq!(f.handle(&InputEvent::Tab), FieldEvent::Next);
        assert_eq!(f.value, "x");
    }

    #[test]
    fn numeric_field_filters_letters() {
        let mut f = TextField::numeric("");
        type_str(&mut f, "1a2.5x");
        assert_eq!(f.value, "12.5");
        assert_eq!(f.number(), 12.5);
    }

    #[test]
    fn max_len_is_enforced() {
        let mut f = TextField::new("").max_len(4);
        type_str(&mut f, "123456");
        assert_eq!(f.value, "1234");
    }

    #[test]
    fn masked_display_hides_text() {
        let mut f = TextField::masked();
        type_str(&mut f, "pw");
        assert_eq!(f.display(false).content, "••");
        assert_eq!(f.value, "pw");
    }

    #[test]
    fn lenient_parse() {
        assert_eq!(parse_number("1000000"), 1_000_000.0);
        assert_eq!(parse_number(" 12.5abc"), 12.5);
        assert_eq!(parse_number("-3"), -3.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("."), 0.0);
        assert_eq!(parse_number("1.2.3"), 1.2);
    }

    #[test]
    fn number_text_drops_whole_fraction() {
        assert_eq!(number_text(100.0), "100");
        assert_eq!(number_text(12.5), "12.5");
    }
}
