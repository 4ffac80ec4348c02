//! Portfolio setup rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::screens::{group_thousands, key_style, npr, render_heading};
use crate::widgets::{button, progress_bar, ClickableList};

use super::actions::*;
use super::logic::{price_change, progress_pct, risk_amount, target_change_pct};
use super::state::{Editor, PortfolioState, StockDraft, StockField};

pub fn render(
    state: &PortfolioState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Min(8),    // Settings + holdings
            Constraint::Length(3), // Summary / proceed
        ])
        .split(area);

    render_heading(
        f,
        chunks[0],
        "Portfolio Setup",
        "Budget, risk appetite and the stocks you already hold",
    );

    let body = if is_narrow_layout(area.width) {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(settings_height(state)), Constraint::Min(6)])
            .split(chunks[1])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
            .split(chunks[1])
    };

    render_settings(state, f, body[0], click_state);
    render_stocks(state, f, body[1], click_state);
    render_footer(state, f, chunks[2], click_state);
}

fn settings_height(state: &PortfolioState) -> u16 {
    let editor_row = matches!(state.editor, Editor::Categories(_)) as u16;
    let category_rows = state.data.selected_categories.len().clamp(1, MAX_ROWS as usize) as u16;
    // Six fixed rows plus the border.
    6 + category_rows + editor_row + 2
}

fn label_style() -> Style {
    Style::default().fg(Color::Gray)
}

fn value_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn save_cancel(cl: &mut ClickableList, line: Line<'static>, save_label: &str, cancel_label: &str) {
    cl.push_buttons(
        line,
        vec![
            button(save_label, key_style(true), SAVE),
            button(cancel_label, key_style(false), CANCEL),
        ],
    );
}

// ── Budget, risk, categories ───────────────────────────────────

fn render_settings(
    state: &PortfolioState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let data = &state.data;
    let mut cl = ClickableList::new();

    match &state.editor {
        Editor::Budget(field) => save_cancel(
            &mut cl,
            Line::from(vec![
                Span::styled(" Budget: NPR ", label_style()),
                field.display(true),
            ]),
            "[Save]",
            "[Cancel]",
        ),
        _ => cl.push_clickable(
            Line::from(vec![
                Span::styled(" Budget: ", label_style()),
                Span::styled(npr(data.total_budget), value_style()),
                Span::styled("  [B] edit", key_style(state.editor == Editor::Idle)),
            ]),
            EDIT_BUDGET,
        ),
    }

    match &state.editor {
        Editor::Risk(field) => cl.push_buttons(
            Line::from(vec![
                Span::styled(" Risk: ", label_style()),
                field.display(true),
                Span::styled("%", label_style()),
            ]),
            vec![
                button("[-]", key_style(true), RISK_DOWN),
                button("[+]", key_style(true), RISK_UP),
                button("[Save]", key_style(true), SAVE),
                button("[Cancel]", key_style(false), CANCEL),
            ],
        ),
        _ => cl.push_clickable(
            Line::from(vec![
                Span::styled(" Risk: ", label_style()),
                Span::styled(format!("{}%", group_thousands(data.risk_tolerance)), value_style()),
                Span::styled("  [R] edit", key_style(state.editor == Editor::Idle)),
            ]),
            EDIT_RISK,
        ),
    }

    let risk_color = match data.risk_tolerance {
        r if r >= 60.0 => Color::Red,
        r if r >= 30.0 => Color::Yellow,
        _ => Color::Green,
    };
    cl.push(Line::from(vec![
        Span::raw(" "),
        Span::styled(progress_bar(data.risk_tolerance, 20), Style::default().fg(risk_color)),
    ]));
    cl.push(Line::from(vec![
        Span::styled(" Amount at risk: ", label_style()),
        Span::styled(npr(risk_amount(data)), Style::default().fg(risk_color)),
    ]));
    cl.push(Line::from(""));

    let editing_categories = matches!(state.editor, Editor::Categories(_));
    cl.push_clickable(
        Line::from(vec![
            Span::styled(" Categories", value_style()),
            Span::styled("  [C] add", key_style(state.editor == Editor::Idle)),
        ]),
        EDIT_CATEGORIES,
    );
    for (i, name) in data.selected_categories.iter().take(MAX_ROWS as usize).enumerate() {
        cl.push_buttons(
            Line::from(Span::styled(format!("  • {name}"), Style::default().fg(Color::Cyan))),
            vec![button("[x]", key_style(false), REMOVE_CATEGORY_BASE + i as u16)],
        );
    }
    if let Editor::Categories(field) = &state.editor {
        save_cancel(
            &mut cl,
            Line::from(vec![Span::styled("  New: ", label_style()), field.display(true)]),
            "[Add]",
            "[Done]",
        );
    }
    if data.selected_categories.is_empty() && !editing_categories {
        cl.push(Line::from(Span::styled("  (none)", Style::default().fg(Color::DarkGray))));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Profile ");
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);
        cl.register_inline_targets(area, &mut cs, 1, 1, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Holdings ───────────────────────────────────────────────────

fn render_stocks(
    state: &PortfolioState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    let editing = state.editing_stock();
    let idle = state.editor == Editor::Idle;
    let mut focus_line = 0usize;

    for (i, stock) in state.data.stocks.iter().take(MAX_ROWS as usize).enumerate() {
        let row = i as u16;
        let selected = i == state.selected;
        if selected {
            focus_line = cl.len();
        }
        let marker = if selected { "▶ " } else { "  " };
        let name_style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            value_style()
        };
        cl.push_buttons(
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(format!("{:<8}", stock.name), name_style),
                Span::styled(format!("{:<12}", stock.category), label_style()),
            ]),
            vec![
                button("[E]", key_style(idle), EDIT_STOCK_BASE + row),
                button("[X]", key_style(false), DELETE_STOCK_BASE + row),
            ],
        );

        let change = price_change(stock);
        let (sign, change_color) = if change >= 0.0 { ("+", Color::Green) } else { ("", Color::Red) };
        cl.push(Line::from(vec![
            Span::styled(
                format!(
                    "    {} → {} ({:+.1}%)",
                    group_thousands(stock.purchase_price),
                    group_thousands(stock.target_sell_price),
                    target_change_pct(stock.purchase_price, stock.target_sell_price),
                ),
                label_style(),
            ),
            Span::styled(
                format!("  now {} ({sign}{})", group_thousands(stock.current_price), group_thousands(change)),
                Style::default().fg(change_color),
            ),
        ]));

        let pct = progress_pct(stock.current_price, stock.purchase_price, stock.target_sell_price);
        cl.push(Line::from(vec![
            Span::raw("    "),
            Span::styled(progress_bar(pct, 16), Style::default().fg(Color::Cyan)),
            Span::styled(format!(" {pct:.0}% to target"), label_style()),
        ]));

        if editing == Some(stock.id) {
            if let Editor::Stock(draft) = &state.editor {
                focus_line = cl.len();
                push_stock_editor(&mut cl, draft);
            }
        }
    }

    if state.data.stocks.is_empty() {
        cl.push(Line::from(Span::styled("  No holdings yet", Style::default().fg(Color::DarkGray))));
    }
    cl.push(Line::from(""));
    cl.push_clickable(
        Line::from(Span::styled(" [A] Add stock", key_style(idle))),
        ADD_STOCK,
    );

    let visible = area.height.saturating_sub(2) as usize;
    let scroll = (focus_line + 6).saturating_sub(visible).min(focus_line) as u16;

    let live = match &state.market_stamp {
        Some(stamp) => format!(" Holdings · live {} ({} updated) ", stamp, state.live_updates),
        None => " Holdings ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(live);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, scroll, 0);
        cl.register_inline_targets(area, &mut cs, 1, 1, scroll);
    }
    f.render_widget(
        Paragraph::new(cl.into_lines()).block(block).scroll((scroll, 0)),
        area,
    );
}

fn push_stock_editor(cl: &mut ClickableList, draft: &StockDraft) {
    for field in StockField::ALL {
        let focused = field == draft.focus;
        let label_color = if focused { Color::Yellow } else { Color::Gray };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!("    {:<9}", field.label()), Style::default().fg(label_color)),
                draft.field(field).display(focused),
            ]),
            FOCUS_FIELD_BASE + field.index() as u16,
        );
    }
    save_cancel(
        cl,
        Line::from(Span::styled("   ", label_style())),
        "[Save]",
        "[Cancel]",
    );
}

// ── Summary ────────────────────────────────────────────────────

fn render_footer(
    state: &PortfolioState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let data = &state.data;
    let mut cl = ClickableList::new();
    cl.push_buttons(
        Line::from(vec![
            Span::styled(
                format!(" {} stocks · {} categories · ", data.stocks.len(), data.selected_categories.len()),
                label_style(),
            ),
            Span::styled(format!("at risk {}", npr(risk_amount(data))), value_style()),
        ]),
        vec![button(
            " [P] Proceed to goals → ",
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
            PROCEED,
        )],
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    {
        let mut cs = click_state.borrow_mut();
        cl.register_inline_targets(area, &mut cs, 1, 1, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}
