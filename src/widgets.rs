//! Widgets that draw and register their own click targets.
//!
//! - [`TabBar`]: one row of tabs (period tabs, login/register).
//! - [`ClickableList`]: lines of a `Paragraph`, some bound to an action as
//!   a whole row, some carrying inline [`Button`]s.
//! - [`progress_bar`]: text gauge for risk, price progress and sector use.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// Tabs separated by `separator`, each padded with one space per side.
/// Targets follow the measured label widths, so glyphs like `◀` and
/// changing labels ("Year 3" vs "3") stay aligned.
///
/// ```ignore
/// TabBar::new(" │ ")
///     .tab("Overview", style(0), PERIOD_BASE)
///     .tab("Year 1", style(1), PERIOD_BASE + 1)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Targets are placed inside the block's borders.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let mut spans: Vec<Span> = Vec::with_capacity(self.tabs.len() * 2);
        let mut widths: Vec<(u16, u16)> = Vec::with_capacity(self.tabs.len());

        for (i, (label, style, action_id)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            let padded = format!(" {label} ");
            widths.push((Line::from(padded.as_str()).width() as u16, action_id));
            spans.push(Span::styled(padded, style));
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let paragraph = Paragraph::new(Line::from(spans));
        match self.block {
            Some(block) => f.render_widget(paragraph.block(block), area),
            None => f.render_widget(paragraph, area),
        }

        // Full outer height: a tap on the border still picks the tab.
        cs.register_tab_targets(&widths, sep_width, inner.x, area.y, inner.width, area.height.max(1));
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Builds the lines of a `Paragraph` and remembers which lines and which
/// inline buttons are clickable, so targets follow the lines when rows are
/// added above them.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from(" Categories"));
/// cl.push_clickable(Line::from(" [B] edit budget"), EDIT_BUDGET);
/// cl.push_buttons(Line::from(" NABIL"), vec![button("[E]", s, EDIT), button("[X]", s, DELETE)]);
/// cl.register_targets(area, &mut cs, 1, 1, 0, 0);
/// cl.register_inline_targets(area, &mut cs, 1, 1, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    rows: Vec<(u16, u16)>,
    /// `(line_index, column, width, action_id)`
    buttons: Vec<(u16, u16, u16, u16)>,
}

pub struct Button<'a> {
    pub span: Span<'a>,
    pub action_id: u16,
}

pub fn button<'a>(label: impl Into<String>, style: Style, action_id: u16) -> Button<'a> {
    Button {
        span: Span::styled(label.into(), style),
        action_id,
    }
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            rows: Vec::new(),
            buttons: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// The whole row triggers `action_id`.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.rows.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    /// Append space-separated buttons to `line`. Columns are measured from
    /// the start of the line, so the paragraph must be left-aligned and
    /// unwrapped.
    pub fn push_buttons(&mut self, mut line: Line<'a>, buttons: Vec<Button<'a>>) {
        let idx = self.lines.len() as u16;
        let mut col = line.width() as u16;
        for b in buttons {
            line.spans.push(Span::raw(" "));
            let w = b.span.width() as u16;
            self.buttons.push((idx, col + 1, w, b.action_id));
            line.spans.push(b.span);
            col += 1 + w;
        }
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// `(first_visual_row, height)` of every line. With `inner_width == 0`
    /// each line is one row; otherwise lines wider than it wrap.
    fn visual_rows(&self, inner_width: u16) -> Vec<(u16, u16)> {
        let mut top = 0u16;
        self.lines
            .iter()
            .map(|line| {
                let w = line.width();
                let h = match inner_width as usize {
                    0 => 1,
                    iw if w <= iw => 1,
                    iw => w.div_ceil(iw) as u16,
                };
                let rows = (top, h);
                top += h;
                rows
            })
            .collect()
    }

    /// Register row targets for every [`push_clickable`](Self::push_clickable)
    /// line still visible inside `area`.
    ///
    /// `top_offset`/`bottom_offset` are the border rows, `scroll` the
    /// paragraph's vertical scroll in visual rows, and `inner_width` the
    /// wrap width (`0` for unwrapped paragraphs). A wrapped line is
    /// clickable on each of its rows.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_top = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);
        let layout = self.visual_rows(inner_width);

        for &(idx, action_id) in &self.rows {
            let Some(&(start, height)) = layout.get(idx as usize) else {
                continue;
            };
            for vr in (start..start + height).filter(|vr| *vr >= scroll) {
                let row = content_top + (vr - scroll);
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }

    /// Register the exact cells of inline buttons. Call after
    /// [`register_targets`](Self::register_targets) so a button wins over
    /// the row target under it. Borders are assumed symmetric.
    pub fn register_inline_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        left_offset: u16,
        top_offset: u16,
        scroll: u16,
    ) {
        let content_end = area.y + area.height.saturating_sub(top_offset);
        let right_edge = area.x + area.width;
        for &(idx, col, width, action_id) in &self.buttons {
            if idx < scroll {
                continue;
            }
            let row = area.y + top_offset + (idx - scroll);
            let x = area.x + left_offset + col;
            if row >= content_end || x >= right_edge {
                continue;
            }
            cs.add_click_target(Rect::new(x, row, width.min(right_edge - x), 1), action_id);
        }
    }
}

// ── Gauges ─────────────────────────────────────────────────────

/// `width`-cell bar filled to `percent` (clamped to 0-100).
pub fn progress_bar(percent: f64, width: usize) -> String {
    let pct = if percent.is_finite() { percent.clamp(0.0, 100.0) } else { 0.0 };
    let filled = (((pct / 100.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
