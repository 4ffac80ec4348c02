//! Application shell: owns the flow controller and every screen, routes
//! input to whichever one is active, and turns screen messages into flow
//! transitions and service [`Command`]s.
//!
//! Nothing here touches the network or the DOM. `main.rs` runs the returned
//! commands and feeds their [`Reply`]s back through [`App::apply_reply`].

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDateTime;
use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::Paragraph;
use ratzilla::ratatui::Frame;

use crate::clock::Interval;
use crate::config::AppConfig;
use crate::flow::history::History;
use crate::flow::state::{Step, StepKind};
use crate::flow::FlowController;
use crate::input::{ClickState, InputEvent};
use crate::screens::auth::AuthScreen;
use crate::screens::portfolio::{self, PortfolioScreen};
use crate::screens::strategy::StrategyScreen;
use crate::screens::{goal, investor, start, Msg};
use crate::service::{Command, MarketSnapshot, Reply};

const VERIFY_SUCCESS_MS: u32 = 1500;
const LOGIN_SUCCESS_MS: u32 = 1000;
const FLASH_MS: u32 = 2000;

/// Steps that keep the market snapshot fresh.
fn polls_market(kind: StepKind) -> bool {
    matches!(kind, StepKind::PortfolioSetup | StepKind::Strategy)
}

pub struct App<H: History> {
    flow: FlowController<H>,
    portfolio: PortfolioScreen,
    /// Present only while the strategy step is shown.
    strategy: Option<StrategyScreen>,
    auth: AuthScreen,
    config: AppConfig,
    market_poll: Interval,
    /// Fetch on the next tick without waiting for the interval.
    poll_due: bool,
    market: Option<MarketSnapshot>,
    /// Date badge from the calendar endpoint.
    badge: Option<String>,
    now: NaiveDateTime,
    last_kind: StepKind,
}

impl<H: History> App<H> {
    pub fn new(history: H, config: AppConfig, now: NaiveDateTime) -> Self {
        Self {
            flow: FlowController::new(history),
            portfolio: PortfolioScreen::new(),
            strategy: None,
            auth: new_auth(&config),
            market_poll: Interval::new(config.market_poll_ticks()),
            poll_due: false,
            market: None,
            badge: None,
            now,
            last_kind: StepKind::Start,
            config,
        }
    }

    pub fn flow(&self) -> &FlowController<H> {
        &self.flow
    }

    pub fn step_kind(&self) -> StepKind {
        self.flow.step().kind()
    }

    pub fn set_now(&mut self, now: NaiveDateTime) {
        self.now = now;
        if let Some(strategy) = self.strategy.as_mut() {
            strategy.set_now(now);
        }
    }

    // ── Input ──────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &InputEvent) -> Vec<Command> {
        let msgs = if self.flow.state().auth_open {
            self.auth.handle_input(event)
        } else {
            match self.flow.step() {
                Step::Start => start::handle_input(event).into_iter().collect(),
                Step::Investor => investor::handle_input(event).into_iter().collect(),
                Step::PortfolioSetup { .. } => self.portfolio.handle_input(event),
                Step::Goal { .. } => goal::handle_input(event).into_iter().collect(),
                Step::Strategy { period, .. } => match self.strategy.as_mut() {
                    Some(s) => s.handle_input(event, period, self.market.as_ref()),
                    None => Vec::new(),
                },
            }
        };
        self.apply(msgs)
    }

    fn apply(&mut self, msgs: Vec<Msg>) -> Vec<Command> {
        let mut commands = Vec::new();
        for msg in msgs {
            match msg {
                Msg::Begin => {
                    self.flow.begin();
                }
                Msg::SelectInvestor(id) => {
                    self.flow.select_investor(id);
                }
                Msg::RequestGoalStep => {
                    self.flow.request_goal_step();
                }
                Msg::SelectGoal(id) => {
                    self.flow.select_goal(id);
                }
                Msg::SetPeriod(n) => {
                    self.flow.set_period(n);
                }
                Msg::PrevPeriod => {
                    self.flow.prev_period();
                }
                Msg::NextPeriod => {
                    self.flow.next_period();
                }
                Msg::Reset => {
                    self.flow.reset();
                    self.portfolio = PortfolioScreen::new();
                    self.auth = new_auth(&self.config);
                }
                Msg::LoginSuccess => self.flow.login_success(),
                Msg::CloseAuth => self.flow.close_auth(),
                Msg::Run(cmd) => commands.push(cmd),
            }
        }
        self.sync_step();
        commands
    }

    /// Bring screens in line with the current step after a transition.
    fn sync_step(&mut self) {
        match self.flow.step() {
            Step::Strategy { goal, template, .. } => {
                if self.strategy.as_ref().map(|s| s.goal()) != Some(goal.id) {
                    self.strategy = Some(StrategyScreen::new(
                        goal.id,
                        template,
                        self.now,
                        self.config.ms_to_ticks(FLASH_MS),
                    ));
                }
            }
            _ => self.strategy = None,
        }

        let kind = self.flow.step().kind();
        if kind != self.last_kind {
            self.last_kind = kind;
            self.market_poll.reset();
            self.poll_due = polls_market(kind);
        }
    }

    /// `popstate` from the browser; `raw` is the JSON state, if any.
    pub fn on_history_pop(&mut self, raw: Option<&str>) {
        self.flow.on_history_pop(raw);
        self.sync_step();
    }

    // ── Clock ──────────────────────────────────────────────────────

    pub fn tick(&mut self, ticks: u32) -> Vec<Command> {
        let mut commands = Vec::new();

        if polls_market(self.step_kind()) {
            let due = std::mem::take(&mut self.poll_due);
            if self.market_poll.advance(ticks) || due {
                commands.push(Command::FetchMarket);
            }
        }

        if let Some(strategy) = self.strategy.as_mut() {
            strategy.tick(ticks);
        }

        if let Some(msg) = self.auth.tick(ticks) {
            commands.extend(self.apply(vec![msg]));
        }
        commands
    }

    // ── Service replies ────────────────────────────────────────────

    pub fn apply_reply(&mut self, reply: Reply) {
        match reply {
            Reply::Registered(r) => self.auth.registered(r),
            Reply::Verified(r) => self.auth.verified(r),
            Reply::LoggedIn(r) => self.auth.logged_in(r),
            Reply::Calendar(Ok(info)) => self.badge = info.badge(),
            Reply::Market(Ok(snapshot)) => {
                let changed = portfolio::logic::apply_market(&mut self.portfolio.state, &snapshot);
                log::debug!("market snapshot {}: {changed} holdings repriced", snapshot.timestamp);
                self.market = Some(snapshot);
            }
            Reply::TradingConfigSaved(Ok(())) => log::info!("trading config saved"),
            // Failures were logged by `run_command`; polls and saves are not retried.
            Reply::Calendar(Err(_)) | Reply::Market(Err(_)) | Reply::TradingConfigSaved(Err(_)) => {}
        }
    }

    // ── Rendering ──────────────────────────────────────────────────

    pub fn render(&self, f: &mut Frame, click_state: &Rc<RefCell<ClickState>>) {
        let size = f.area();
        {
            let mut cs = click_state.borrow_mut();
            cs.terminal_cols = size.width;
            cs.terminal_rows = size.height;
            cs.clear_targets();
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(8)])
            .split(size);

        self.render_status(f, chunks[0]);
        let area = chunks[1];
        match self.flow.step() {
            Step::Start => start::render(f, area, click_state),
            Step::Investor => investor::render(f, area, click_state),
            Step::PortfolioSetup { .. } => self.portfolio.render(f, area, click_state),
            Step::Goal { .. } => goal::render(f, area, click_state),
            Step::Strategy { period, .. } => {
                if let Some(s) = &self.strategy {
                    s.render(period, self.market.as_ref(), f, area, click_state);
                }
            }
        }

        if self.flow.state().auth_open {
            // The step underneath stays visible but must not take clicks.
            click_state.borrow_mut().clear_targets();
            self.auth.render(self.badge.as_deref(), f, size, click_state);
        }
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let state = self.flow.state();
        let mut spans = vec![Span::styled(
            " NEPSE Investment Journey ",
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
        )];
        for (i, kind) in STEP_ORDER.iter().enumerate() {
            let style = if *kind == state.step.kind() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!(" {}.{}", i + 1, step_label(*kind)), style));
        }
        if let Some(investor) = state.step.investor() {
            spans.push(Span::styled(
                format!("  {} {}", investor.icon, investor.label),
                Style::default().fg(Color::Gray),
            ));
        }
        if state.authenticated {
            spans.push(Span::styled("  ● signed in", Style::default().fg(Color::Green)));
        }
        if let Some(badge) = &self.badge {
            spans.push(Span::styled(format!("  {badge}"), Style::default().fg(Color::Cyan)));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

const STEP_ORDER: [StepKind; 5] = [
    StepKind::Start,
    StepKind::Investor,
    StepKind::PortfolioSetup,
    StepKind::Goal,
    StepKind::Strategy,
];

fn step_label(kind: StepKind) -> &'static str {
    match kind {
        StepKind::Start => "Start",
        StepKind::Investor => "Profile",
        StepKind::PortfolioSetup => "Portfolio",
        StepKind::Goal => "Goal",
        StepKind::Strategy => "Strategy",
    }
}

fn new_auth(config: &AppConfig) -> AuthScreen {
    AuthScreen::new(
        config.ms_to_ticks(VERIFY_SUCCESS_MS),
        config.ms_to_ticks(LOGIN_SUCCESS_MS),
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::flow::history::MemoryHistory;
    use crate::screens::auth::actions as auth_actions;
    use crate::service::fake::FakeService;
    use crate::service::{run_command, Quote, Quotes};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, 25)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap()
    }

    fn app() -> App<MemoryHistory> {
        App::new(MemoryHistory::new(), AppConfig::default(), now())
    }

    fn key(app: &mut App<MemoryHistory>, c: char) -> Vec<Command> {
        app.handle_input(&InputEvent::Key(c))
    }

    fn typed(app: &mut App<MemoryHistory>, text: &str) {
        for c in text.chars() {
            key(app, c);
        }
    }

    async fn run_all(app: &mut App<MemoryHistory>, service: &FakeService, commands: Vec<Command>) {
        for cmd in commands {
            let reply = run_command(service, cmd).await;
            app.apply_reply(reply);
        }
    }

    /// Start → investor "job" → portfolio setup.
    fn to_portfolio(app: &mut App<MemoryHistory>) {
        app.handle_input(&InputEvent::Enter);
        key(app, '1');
        assert_eq!(app.step_kind(), StepKind::PortfolioSetup);
    }

    fn snapshot(symbol: &str, ltp: f64) -> MarketSnapshot {
        MarketSnapshot {
            timestamp: "2024-07-25 12:00:00".into(),
            stocks: Quotes::BySymbol(HashMap::from([(
                symbol.to_string(),
                Quote {
                    ltp: Some(ltp),
                    ..Quote::default()
                },
            )])),
        }
    }

    #[test]
    fn proceed_opens_auth_and_saves_config() {
        let mut a = app();
        to_portfolio(&mut a);
        let commands = key(&mut a, 'p');
        assert!(matches!(commands.as_slice(), [Command::SaveTradingConfig(_)]));
        assert!(a.flow().state().auth_open);
        assert_eq!(a.step_kind(), StepKind::PortfolioSetup);

        // Keys now go to the overlay, not the portfolio shortcuts.
        key(&mut a, 'b');
        assert!(!a.portfolio.is_editing());
        a.handle_input(&InputEvent::Escape);
        assert!(!a.flow().state().auth_open);
        assert_eq!(a.step_kind(), StepKind::PortfolioSetup);
    }

    #[tokio::test]
    async fn login_through_overlay_reaches_goal_after_delay() {
        let service = FakeService {
            accounts: vec![("ram@example.com".into(), "pw".into())],
            ..FakeService::default()
        };
        let mut a = app();
        to_portfolio(&mut a);
        let commands = key(&mut a, 'p');
        run_all(&mut a, &service, commands).await;
        assert_eq!(service.saved.lock().map(|s| s.len()).unwrap_or(0), 1);

        a.handle_input(&InputEvent::Click(auth_actions::TAB_LOGIN));
        typed(&mut a, "ram@example.com");
        a.handle_input(&InputEvent::Tab);
        typed(&mut a, "pw");
        let commands = a.handle_input(&InputEvent::Enter);
        run_all(&mut a, &service, commands).await;
        assert_eq!(a.step_kind(), StepKind::PortfolioSetup);

        // 1 s at 10 ticks/s.
        a.tick(9);
        assert_eq!(a.step_kind(), StepKind::PortfolioSetup);
        a.tick(1);
        assert_eq!(a.step_kind(), StepKind::Goal);
        assert!(a.flow().state().authenticated);
        assert!(!a.flow().state().auth_open);
    }

    #[test]
    fn selecting_goal_builds_strategy_and_leaving_drops_it() {
        let mut a = app();
        to_portfolio(&mut a);
        a.flow.login_success();
        a.sync_step();
        assert_eq!(a.step_kind(), StepKind::Goal);

        key(&mut a, '4');
        assert_eq!(a.step_kind(), StepKind::Strategy);
        assert_eq!(a.strategy.as_ref().map(|s| s.goal()), Some("6month"));

        key(&mut a, 'l');
        assert!(matches!(a.flow().step(), Step::Strategy { period: 1, .. }));

        key(&mut a, 'n');
        assert_eq!(a.step_kind(), StepKind::Start);
        assert!(a.strategy.is_none());
        assert!(!a.flow().state().authenticated);
    }

    #[test]
    fn market_polls_on_entry_then_every_interval() {
        let mut a = app();
        assert!(a.tick(100).is_empty());

        to_portfolio(&mut a);
        assert_eq!(a.tick(1), vec![Command::FetchMarket]);
        assert!(a.tick(48).is_empty());
        assert_eq!(a.tick(2), vec![Command::FetchMarket]);

        a.handle_input(&InputEvent::Key('p'));
        a.handle_input(&InputEvent::Escape);
        a.flow.reset();
        a.sync_step();
        assert!(a.tick(100).is_empty());
    }

    #[test]
    fn market_reply_reprices_holdings() {
        let mut a = app();
        to_portfolio(&mut a);
        a.apply_reply(Reply::Market(Ok(snapshot("NABIL", 121.5))));
        let nabil = &a.portfolio.state.data.stocks[0];
        assert_eq!(nabil.name, "NABIL");
        assert_eq!(nabil.current_price, 121.5);
        assert!(a.market.is_some());
    }

    #[tokio::test]
    async fn calendar_badge() {
        let service = FakeService::default();
        let mut a = app();
        run_all(&mut a, &service, vec![Command::FetchCalendar]).await;
        assert_eq!(a.badge.as_deref(), Some("2024-07-26, Friday | 2081 Shrawan 10"));

        let offline = FakeService {
            offline: true,
            ..FakeService::default()
        };
        run_all(&mut a, &offline, vec![Command::FetchCalendar]).await;
        assert!(a.badge.is_some());
    }

    #[test]
    fn history_back_restores_previous_step() {
        let mut a = app();
        to_portfolio(&mut a);
        let raw = a.flow.history_mut().back().unwrap();
        a.on_history_pop(raw.as_deref());
        assert_eq!(a.step_kind(), StepKind::Investor);

        let raw = a.flow.history_mut().back().unwrap();
        a.on_history_pop(raw.as_deref());
        assert_eq!(a.step_kind(), StepKind::Start);
    }

    #[test]
    fn reset_discards_portfolio_and_auth_state() {
        let mut a = app();
        to_portfolio(&mut a);
        key(&mut a, 'x');
        assert_eq!(a.portfolio.state.data.stocks.len(), 2);
        key(&mut a, 'p');
        typed(&mut a, "Ram");
        a.handle_input(&InputEvent::Escape);

        a.apply(vec![Msg::Reset]);
        assert_eq!(a.portfolio.state.data.stocks.len(), 3);
        assert!(a.auth.state.register[0].value.is_empty());
    }
}
