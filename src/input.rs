//! Input events and click targets.
//!
//! Screens never see pixels. `main.rs` turns a DOM click into a terminal
//! cell, [`ClickState::hit_test`] turns the cell into the action id the
//! screen registered while rendering, and the screen receives
//! [`InputEvent::Click`].

use ratzilla::ratatui::layout::Rect;

/// Keyboard and pointer input, normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable key press.
    Key(char),
    Backspace,
    Enter,
    Tab,
    Escape,
    /// A click/tap on a registered target. Ids are defined per screen.
    Click(u16),
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Terminal cell coordinates.
    pub rect: Rect,
    pub action_id: u16,
}

/// Targets registered by the last frame, plus the terminal size needed to
/// map pixels to cells. Rebuilt on every draw.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Full-width target on `row`, ignored when the row lies outside `area`.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Targets for a row of tabs laid out left to right.
    ///
    /// `tab_widths` holds `(display_width, action_id)` per padded label.
    /// Each target covers its label and half of each neighbouring
    /// separator; the first and last tabs reach the edges of the bar so
    /// that every column of the bar belongs to some tab.
    pub fn register_tab_targets(
        &mut self,
        tab_widths: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = tab_widths.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut spans: Vec<(u16, u16)> = Vec::with_capacity(n);
        let mut cursor: u16 = 0;
        for (i, &(w, _)) in tab_widths.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            spans.push((cursor, cursor + w));
            cursor += w;
        }

        for (i, &(_, action_id)) in tab_widths.iter().enumerate() {
            let left = match i {
                0 => 0,
                _ => {
                    let prev_end = spans[i - 1].1;
                    prev_end + (spans[i].0 - prev_end) / 2
                }
            };
            let right = if i == n - 1 {
                total_width
            } else {
                let end = spans[i].1;
                end + (spans[i + 1].0 - end) / 2
            };
            let w = right.saturating_sub(left);
            if w > 0 {
                self.add_click_target(Rect::new(x + left, y, w, height), action_id);
            }
        }
    }

    /// Action under a cell. Later registrations sit on top, so an inline
    /// button wins over the row target beneath it and an overlay wins over
    /// the screen it covers.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Phones in portrait get stacked panels.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map a pixel offset from the grid's top edge to a row, or `None` when it
/// falls outside the grid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Map a pixel offset from the grid's left edge to a column.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_rows_and_misses() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 80, 2), 2);

        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 12), Some(2));
        assert_eq!(cs.hit_test(5, 9), None);
        assert_eq!(cs.hit_test(5, 13), None);
        assert_eq!(ClickState::new().hit_test(0, 0), None);
    }

    #[test]
    fn inline_button_beats_row_target() {
        // A holdings row with [E]/[X] buttons at its right end.
        let mut cs = ClickState::new();
        cs.add_row_target(Rect::new(0, 4, 50, 10), 6, 301);
        cs.add_click_target(Rect::new(30, 6, 3, 1), 330);
        cs.add_click_target(Rect::new(33, 6, 3, 1), 360);

        assert_eq!(cs.hit_test(2, 6), Some(301));
        assert_eq!(cs.hit_test(31, 6), Some(330));
        assert_eq!(cs.hit_test(35, 6), Some(360));
        assert_eq!(cs.hit_test(40, 6), Some(301));
    }

    #[test]
    fn row_target_outside_area_is_dropped() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 15, 2);
        assert!(cs.targets.is_empty());

        cs.add_row_target(area, 14, 3);
        assert_eq!(cs.hit_test(5, 14), Some(3));
        assert_eq!(cs.hit_test(4, 14), None);
    }

    #[test]
    fn clearing_forgets_previous_frame() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 1, 80, 1), 1);
        cs.clear_targets();
        assert_eq!(cs.hit_test(0, 1), None);
    }

    #[test]
    fn period_tabs_cover_the_whole_bar() {
        // " ◀ " │ " Overview " │ " Year 1 " │ " ▶ "
        let mut cs = ClickState::new();
        let tabs = [(3, 504), (10, 510), (8, 511), (3, 505)];
        cs.register_tab_targets(&tabs, 3, 1, 2, 60, 1);

        assert_eq!(cs.targets.len(), 4);
        assert_eq!(cs.hit_test(1, 2), Some(504));
        // The separator after ◀ (cols 3..6) splits at col 4.
        assert_eq!(cs.hit_test(1 + 3, 2), Some(504));
        assert_eq!(cs.hit_test(1 + 4, 2), Some(510));
        assert_eq!(cs.hit_test(1 + 20, 2), Some(511));
        assert_eq!(cs.hit_test(60, 2), Some(505));
        assert_eq!(cs.hit_test(0, 2), None);
    }

    #[test]
    fn tab_targets_single_and_empty() {
        let mut cs = ClickState::new();
        cs.register_tab_targets(&[], 3, 0, 0, 80, 1);
        assert!(cs.targets.is_empty());

        cs.register_tab_targets(&[(8, 42)], 3, 5, 10, 40, 2);
        assert_eq!(cs.hit_test(44, 11), Some(42));
        assert_eq!(cs.hit_test(45, 10), None);
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(37));
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_conversion() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(14.9, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 450.0, 0), None);

        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
    }

    #[test]
    fn tap_in_the_middle_of_every_row_hits_it() {
        let rows: u16 = 50;
        let cell = 15.0;
        for row in 0..rows {
            let y = row as f64 * cell + cell / 2.0;
            assert_eq!(pixel_y_to_row(y, rows as f64 * cell, rows), Some(row));
        }
    }

    #[test]
    fn click_pipeline_on_a_phone_grid() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 37;
        cs.terminal_rows = 50;
        // Auth overlay field rows.
        for (i, row) in (12..15).enumerate() {
            cs.add_click_target(Rect::new(3, row, 31, 1), 910 + i as u16);
        }

        let (w, h) = (37.0 * 9.0, 50.0 * 15.0);
        let col = pixel_x_to_col(10.0 * 9.0 + 4.0, w, cs.terminal_cols).unwrap();
        let row = pixel_y_to_row(13.0 * 15.0 + 7.0, h, cs.terminal_rows).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(911));
    }
}
