//! Strategy dashboard rendering.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::calendar::{
    grid_weekday, BsDate, to_nepali_digits, MarketStatus, MonthView, MONTH_NAMES, MONTH_NAMES_DEV,
    WEEKDAY_NAMES,
};
use crate::data::{sector_of, PeriodPlan, SECTORS};
use crate::input::{is_narrow_layout, ClickState};
use crate::screens::{group_thousands, key_style, npr};
use crate::service::MarketSnapshot;
use crate::widgets::{button, progress_bar, ClickableList, TabBar};

use super::actions::*;
use super::logic;
use super::state::{DetailField, Focus, StrategyState, DEFAULT_PRICE};

pub fn render(
    state: &StrategyState,
    period: usize,
    market: Option<&MarketSnapshot>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Title, SIP, target, loss
            Constraint::Length(3), // Period tabs
            Constraint::Min(6),    // Overview or period detail
            Constraint::Length(3), // Flash + actions
        ])
        .split(area);

    render_header(state, f, chunks[0], click_state);
    render_tabs(state, period, f, chunks[1], is_narrow_layout(area.width), click_state);

    let plan = period
        .checked_sub(1)
        .and_then(|i| state.template.periods.get(i));
    match plan {
        None => render_overview(state, f, chunks[2], click_state),
        Some(plan) => render_detail(state, plan, market, f, chunks[2], click_state),
    }

    render_footer(state, plan.is_some(), f, chunks[3], click_state);
}

fn dim() -> Style {
    Style::default().fg(Color::Gray)
}

fn bold(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn panel(title: String, color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title)
}

/// First row to draw so that `focus_line` stays visible.
fn scroll_for(focus_line: usize, area: Rect) -> u16 {
    let visible = area.height.saturating_sub(2) as usize;
    (focus_line + 3).saturating_sub(visible) as u16
}

// ── Header ─────────────────────────────────────────────────────

fn render_header(
    state: &StrategyState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let t = state.template;
    let sip = state.sip.number();
    let target = state.target.number();
    let spent = logic::total_spent(&state.selections);
    let loss_style = if logic::loss_flagged(sip, target, spent) {
        bold(Color::Red).add_modifier(Modifier::SLOW_BLINK)
    } else {
        bold(Color::LightBlue)
    };

    let mut cl = ClickableList::new();
    cl.push_clickable(
        Line::from(vec![
            Span::styled(format!(" {}: NPR ", t.sip_label()), dim()),
            state.sip.display(state.focus == Focus::Sip),
            Span::styled("  [S]", key_style(state.focus == Focus::None)),
        ]),
        EDIT_SIP,
    );
    cl.push_clickable(
        Line::from(vec![
            Span::styled(format!(" {}: ", t.target_label()), dim()),
            state.target.display(state.focus == Focus::Target),
            Span::styled("%  [T]", key_style(state.focus == Focus::None)),
        ]),
        EDIT_TARGET,
    );
    cl.push_buttons(
        Line::from(vec![
            Span::styled(" Maximum allowed loss: ", dim()),
            Span::styled(npr(logic::max_allowed_loss(sip, target, spent)), loss_style),
        ]),
        vec![button(" [C] Save Config ", key_style(true), SAVE_CONFIG)],
    );

    let block = panel(format!(" {} ", t.title(state.goal)), Color::Green);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);
        cl.register_inline_targets(area, &mut cs, 1, 1, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Period tabs ────────────────────────────────────────────────

fn render_tabs(
    state: &StrategyState,
    period: usize,
    f: &mut Frame,
    area: Rect,
    is_narrow: bool,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let periods = state.template.periods.len().min(MAX_PERIODS as usize - 1);
    let tab_style = |n: usize| {
        if n == period {
            Style::default().fg(Color::Black).bg(Color::Blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    };
    let arrow = |enabled: bool| {
        if enabled {
            bold(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut bar = TabBar::new(" ")
        .tab("◀", arrow(period > 0), PREV_PERIOD)
        .tab(if is_narrow { "All" } else { "Overview" }, tab_style(0), PERIOD_BASE);
    for n in 1..=periods {
        let label = if is_narrow {
            n.to_string()
        } else {
            format!("{} {}", state.template.timeline_prefix(), n)
        };
        bar = bar.tab(label, tab_style(n), PERIOD_BASE + n as u16);
    }
    bar = bar
        .tab("▶", arrow(period < periods), NEXT_PERIOD)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));

    let mut cs = click_state.borrow_mut();
    bar.render(f, area, &mut cs);
}

// ── Overview ───────────────────────────────────────────────────

fn render_overview(
    state: &StrategyState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let prefix = state.template.timeline_prefix();
    let mut cl = ClickableList::new();
    for plan in state.template.periods.iter().take(MAX_PERIODS as usize - 1) {
        let id = PERIOD_BASE + plan.number as u16;
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" {:>2} ", plan.number), bold(Color::Blue)),
                Span::styled(format!("{prefix} {} · ", plan.number), dim()),
                Span::styled(plan.title, bold(Color::White)),
            ]),
            id,
        );
        cl.push_clickable(
            Line::from(Span::styled(format!("     {}", plan.action), Style::default().fg(Color::Gray))),
            id,
        );
        cl.push(Line::from(""));
    }

    let block = panel(" Overview ".to_string(), Color::Blue);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

// ── Period detail ──────────────────────────────────────────────

fn render_detail(
    state: &StrategyState,
    plan: &PeriodPlan,
    market: Option<&MarketSnapshot>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    if is_narrow_layout(area.width) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(8), Constraint::Length(10), Constraint::Length(12)])
            .split(area);
        render_picker(state, plan, market, f, rows[0], click_state);
        render_running_calc(state, plan, f, rows[1]);
        render_calendar(state, f, rows[2], click_state);
        return;
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(12)])
        .split(cols[1]);

    render_picker(state, plan, market, f, cols[0], click_state);
    render_running_calc(state, plan, f, right[0]);
    render_calendar(state, f, right[1], click_state);
}

/// Sector list, execution targets for the picks, and the plan reference.
fn render_picker(
    state: &StrategyState,
    plan: &PeriodPlan,
    market: Option<&MarketSnapshot>,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let prefix = state.template.timeline_prefix();
    let mut cl = ClickableList::new();
    let mut focus_line = 0;

    cl.push(Line::from(vec![
        Span::styled(format!(" {prefix} {}: ", plan.number), bold(Color::Blue)),
        Span::styled(plan.title, bold(Color::White)),
    ]));
    cl.push(Line::from(Span::styled(
        format!(" Pick stocks for {prefix} {} to set your weights", plan.number),
        dim(),
    )));

    for (i, sector) in SECTORS.iter().take(MAX_SECTORS as usize).enumerate() {
        let expanded = state.expanded == Some(i);
        let cursor = state.sector_cursor == i;
        if cursor && state.focus == Focus::None {
            focus_line = cl.len();
        }
        let stats = logic::sector_stats(state, Some(plan), sector);
        cl.push_clickable(
            Line::from(vec![
                Span::styled(if cursor { "▶" } else { " " }, bold(Color::Yellow)),
                Span::styled(if expanded { "▾ " } else { "▸ " }, dim()),
                Span::styled(format!("{:>5}% ", group_thousands(stats.percent)), bold(Color::Green)),
                Span::styled(sector.name, if cursor { bold(Color::Yellow) } else { Style::default().fg(Color::White) }),
            ]),
            SECTOR_BASE + i as u16,
        );
        if !expanded {
            continue;
        }

        let rem_color = if stats.remaining < 0.0 { Color::Red } else { Color::Green };
        cl.push(Line::from(vec![
            Span::styled(
                format!(
                    "     Alloc {} | Spent {} | ",
                    npr(stats.allocated),
                    npr(stats.spent)
                ),
                dim(),
            ),
            Span::styled(format!("Rem {}", group_thousands(stats.remaining)), Style::default().fg(rem_color)),
        ]));
        for (j, stock) in sector.stocks.iter().take(MAX_SECTOR_STOCKS as usize).enumerate() {
            let picked = state.selection(stock.symbol);
            let tail = match picked {
                Some(sel) => Span::styled(format!("{}%", group_thousands(sel.weight.number())), bold(Color::Cyan)),
                None => Span::styled(
                    format!("NPR {}", group_thousands(logic::default_price(stock.symbol, market))),
                    Style::default().fg(Color::DarkGray),
                ),
            };
            cl.push_clickable(
                Line::from(vec![
                    Span::styled(if picked.is_some() { "     ☑ " } else { "     ☐ " }, bold(Color::Blue)),
                    Span::styled(format!("{:<8}", stock.symbol), bold(Color::White)),
                    Span::styled(format!("{:<30} ", stock.name), Style::default().fg(Color::DarkGray)),
                    tail,
                ]),
                STOCK_BASE + j as u16,
            );
        }
        cl.push_buttons(
            Line::from(Span::styled(
                format!("     Total {}%", group_thousands(logic::sector_weight(&state.selections, sector))),
                bold(Color::White),
            )),
            vec![button("[V] Save", key_style(true), SAVE_SECTOR_BASE + i as u16)],
        );
    }

    if !state.selections.is_empty() {
        let totals = logic::totals(state);
        cl.push(Line::from(""));
        let mut heading = vec![Span::styled(
            " Execution targets",
            bold(if totals.low_balance { Color::Red } else { Color::Green }),
        )];
        if totals.low_balance {
            heading.push(Span::styled(" LOW BALANCE ", Style::default().fg(Color::White).bg(Color::Red)));
        }
        cl.push(Line::from(heading));

        for (k, sel) in state.selections.iter().take(MAX_SELECTIONS as usize).enumerate() {
            let live = market.and_then(|m| m.ltp(sel.symbol)).unwrap_or(DEFAULT_PRICE);
            let sector = sector_of(sel.symbol).map(|s| s.name).unwrap_or("");
            cl.push(Line::from(vec![
                Span::styled(format!("  {} ", sel.symbol), bold(Color::White)),
                Span::styled(format!("({sector}) "), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("now NPR {}", group_thousands(live)), bold(Color::Yellow)),
            ]));
            for field in DetailField::ALL {
                let focused = state.focus
                    == Focus::Detail {
                        selection: k,
                        field,
                    };
                if focused {
                    focus_line = cl.len();
                }
                let value = if field == DetailField::Target && sel.target.is_blank() && !focused {
                    Span::styled(
                        group_thousands(logic::target_price(sel, live)),
                        Style::default().fg(Color::DarkGray),
                    )
                } else {
                    sel.field(field).display(focused)
                };
                cl.push_clickable(
                    Line::from(vec![
                        Span::styled(format!("     {:<15}", field.label()), dim()),
                        value,
                    ]),
                    DETAIL_BASE + k as u16 * DETAIL_FIELDS + field.index() as u16,
                );
            }
        }
    }

    push_plan_reference(&mut cl, state, plan);

    let scroll = scroll_for(focus_line, area);
    let block = panel(" Optimize your portfolio ".to_string(), Color::Blue);
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

fn push_plan_reference(cl: &mut ClickableList, state: &StrategyState, plan: &PeriodPlan) {
    cl.push(Line::from(""));
    if !plan.allocation.is_empty() {
        cl.push(Line::from(Span::styled(" Reference allocation", bold(Color::Blue))));
        for a in plan.allocation {
            cl.push(Line::from(vec![
                Span::styled(format!("   {:>3}% ", a.percent), bold(Color::Green)),
                Span::styled(a.sector, dim()),
            ]));
        }
    }
    for (title, items) in [(" Focus", plan.focus), (" Increase", plan.increase)] {
        if !items.is_empty() {
            cl.push(Line::from(vec![
                Span::styled(title, bold(Color::Blue)),
                Span::styled(format!(": {}", items.join(", ")), Style::default().fg(Color::Cyan)),
            ]));
        }
    }
    if let Some(text) = plan.strategy {
        cl.push(Line::from(vec![
            Span::styled(" Strategy", bold(Color::Blue)),
            Span::styled(format!(": {text}"), dim()),
        ]));
    }
    cl.push(Line::from(vec![
        Span::styled(" Key action", bold(Color::Yellow)),
        Span::styled(format!(": {}", plan.action), Style::default().fg(Color::White)),
    ]));
    if plan.number as usize == state.template.periods.len() {
        cl.push(Line::from(""));
        cl.push(Line::from(Span::styled(" ✔ Target achieved!", bold(Color::Green))));
        cl.push(Line::from(Span::styled(
            "   Exit or continue your SIP cycle for further growth",
            dim(),
        )));
    }
}

fn render_running_calc(state: &StrategyState, plan: &PeriodPlan, f: &mut Frame, area: Rect) {
    let totals = logic::totals(state);
    let mut lines: Vec<Line> = vec![Line::from(vec![
        Span::styled(" Total equity ", dim()),
        Span::styled(npr(totals.equity), bold(Color::White)),
    ])];

    if state.expanded.is_none() && state.selections.is_empty() {
        lines.push(Line::from(Span::styled(
            " Open a sector to start picking",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        for sector in SECTORS {
            let stats = logic::sector_stats(state, Some(plan), sector);
            if stats.is_empty() {
                continue;
            }
            let color = if stats.remaining < 0.0 { Color::Red } else { Color::Green };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", sector.name), Style::default().fg(Color::White)),
                Span::styled(format!("{}%", group_thousands(stats.percent)), bold(Color::Green)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(progress_bar(stats.progress(), 10), Style::default().fg(color)),
                Span::styled(format!(" Rem {}", group_thousands(stats.remaining)), Style::default().fg(color)),
            ]));
            for sel in &state.selections {
                let qty = sel.qty.number();
                if qty == 0.0 || !sector.stocks.iter().any(|s| s.symbol == sel.symbol) {
                    continue;
                }
                lines.push(Line::from(Span::styled(
                    format!(
                        "    {} {}×{} = {}",
                        sel.symbol,
                        group_thousands(qty),
                        group_thousands(sel.price.number()),
                        group_thousands(sel.cost())
                    ),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }
    }

    let balance_color = if totals.low_balance { Color::Red } else { Color::White };
    lines.push(Line::from(vec![
        Span::styled(" Total allocated ", dim()),
        Span::styled(
            format!("{}%", group_thousands(logic::total_allocated(state, Some(plan)))),
            bold(Color::White),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Rem balance ", Style::default().fg(if totals.low_balance { Color::Red } else { Color::LightBlue })),
        Span::styled(npr(totals.remaining), bold(balance_color)),
    ]));
    lines.push(Line::from(vec![
        Span::styled(" Protected equity ", dim()),
        Span::styled(npr(totals.protected), bold(Color::Green)),
    ]));

    f.render_widget(
        Paragraph::new(lines).block(panel(" Running calc ".to_string(), Color::DarkGray)),
        area,
    );
}

// ── Calendar card ──────────────────────────────────────────────

fn render_calendar(
    state: &StrategyState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let Some(view) = state.calendar else {
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Calendar unavailable for this date",
                Style::default().fg(Color::DarkGray),
            )))
            .block(panel(" NEPSE calendar ".to_string(), Color::Magenta)),
            area,
        );
        return;
    };

    let mut cl = ClickableList::new();
    cl.push_buttons(
        Line::from(Span::styled(
            format!(" {}", view.ad_span().unwrap_or_default()),
            dim(),
        )),
        vec![
            button("[<]", key_style(true), CAL_PREV),
            button("[>]", key_style(true), CAL_NEXT),
        ],
    );
    cl.push(Line::from(
        WEEKDAY_NAMES
            .iter()
            .enumerate()
            .map(|(i, d)| {
                let style = if i == 6 { bold(Color::Red) } else { dim() };
                Span::styled(format!(" {:<3}", &d[..2]), style)
            })
            .collect::<Vec<_>>(),
    ));
    for week in month_rows(&view, state.today()) {
        cl.push(week);
    }

    let status = MarketStatus::at(state.now);
    cl.push(Line::from(vec![
        Span::styled(" NEPSE ", dim()),
        Span::styled(
            status.label(),
            bold(if status.is_open() { Color::Green } else { Color::Red }),
        ),
    ]));

    let title = format!(
        " {} {} · {} {} ",
        MONTH_NAMES[view.month as usize % 12],
        view.year,
        MONTH_NAMES_DEV[view.month as usize % 12],
        to_nepali_digits(view.year),
    );
    let block = panel(title, Color::Magenta);
    {
        let mut cs = click_state.borrow_mut();
        cl.register_inline_targets(area, &mut cs, 1, 1, 0);
    }
    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

/// Week rows of the month grid: Saturday in red, Friday dimmed, today
/// reversed.
fn month_rows(view: &MonthView, today: Option<BsDate>) -> Vec<Line<'static>> {
    let cells = view.grid();
    cells
        .chunks(7)
        .enumerate()
        .map(|(w, week)| {
            let spans: Vec<Span<'static>> = week
                .iter()
                .enumerate()
                .map(|(d, cell)| {
                    let Some(day) = cell else {
                        return Span::raw("    ");
                    };
                    let mut style = match grid_weekday(w * 7 + d) {
                        6 => Style::default().fg(Color::Red),
                        5 => Style::default().fg(Color::DarkGray),
                        _ => Style::default().fg(Color::White),
                    };
                    if today.is_some_and(|t| t.year == view.year && t.month == view.month && t.day == *day) {
                        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                    }
                    Span::styled(format!(" {:>3}", to_nepali_digits(day)), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

// ── Footer ─────────────────────────────────────────────────────

fn render_footer(
    state: &StrategyState,
    in_detail: bool,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let flash = state.flash.as_ref().map(|fl| fl.text);
    let mut buttons = vec![button(" [N] Start New Journey ", key_style(true), NEW_JOURNEY)];
    if in_detail && !state.selections.is_empty() {
        let label = if flash == Some("Allocation saved") {
            " ✔ Allocation saved "
        } else {
            " [A] Save allocation "
        };
        buttons.push(button(label, bold(Color::Black).bg(Color::Blue), SAVE_ALLOCATION));
    }

    let mut cl = ClickableList::new();
    cl.push_buttons(
        Line::from(Span::styled(
            format!(" {}", flash.unwrap_or("")),
            bold(Color::Green),
        )),
        buttons,
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
