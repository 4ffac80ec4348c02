//! Authentication overlay. Opens when an unauthenticated user tries to
//! leave portfolio setup; registration goes through email verification.

pub mod actions;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::error::ServiceError;
use crate::input::{ClickState, InputEvent};
use crate::screens::Msg;
use crate::service::{AuthEnvelope, Session};

use actions::*;
use state::{AuthState, AuthTab};

pub struct AuthScreen {
    pub state: AuthState,
}

impl AuthScreen {
    /// Delays are in ticks.
    pub fn new(verify_delay: u32, login_delay: u32) -> Self {
        Self {
            state: AuthState::new(verify_delay, login_delay),
        }
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> Vec<Msg> {
        let s = &mut self.state;
        match event {
            InputEvent::Escape | InputEvent::Click(CLOSE) => return vec![Msg::CloseAuth],
            InputEvent::Click(TAB_LOGIN) => logic::switch_tab(s, AuthTab::Login),
            InputEvent::Click(TAB_REGISTER) => logic::switch_tab(s, AuthTab::Register),
            InputEvent::Click(id) if (FIELD_BASE..FIELD_BASE + MAX_FIELDS).contains(id) => {
                logic::focus(s, (id - FIELD_BASE) as usize)
            }
            InputEvent::Enter | InputEvent::Click(SUBMIT) => {
                return logic::submit(s).map(Msg::Run).into_iter().collect();
            }
            InputEvent::Tab => logic::focus_next(s),
            InputEvent::Click(_) => {}
            key => {
                if !s.loading {
                    if let Some(field) = s.focused_field_mut() {
                        field.handle(key);
                    }
                }
            }
        }
        Vec::new()
    }

    pub fn registered(&mut self, result: Result<AuthEnvelope, ServiceError>) {
        logic::registered(&mut self.state, result);
    }

    pub fn verified(&mut self, result: Result<AuthEnvelope, ServiceError>) {
        logic::verified(&mut self.state, result);
    }

    pub fn logged_in(&mut self, result: Result<Session, ServiceError>) {
        logic::logged_in(&mut self.state, result);
    }

    /// Emits [`Msg::LoginSuccess`] once the success screen has been shown
    /// for its delay.
    pub fn tick(&mut self, ticks: u32) -> Option<Msg> {
        logic::tick(&mut self.state, ticks).then_some(Msg::LoginSuccess)
    }

    pub fn render(
        &self,
        badge: Option<&str>,
        f: &mut Frame,
        area: Rect,
        click_state: &Rc<RefCell<ClickState>>,
    ) {
        render::render(&self.state, badge, f, area, click_state);
    }
}

#[cfg(test)]
mod tests {
    use super::state::{AuthStep, RegisterField};
    use super::*;
    use crate::service::fake::FakeService;
    use crate::service::{run_command, Command, Reply};

    fn typed(screen: &mut AuthScreen, text: &str) {
        for c in text.chars() {
            screen.handle_input(&InputEvent::Key(c));
        }
    }

    fn command(msgs: Vec<Msg>) -> Command {
        match msgs.as_slice() {
            [Msg::Run(cmd)] => cmd.clone(),
            other => panic!("expected one command, got {other:?}"),
        }
    }

    #[test]
    fn escape_and_close_button() {
        let mut a = AuthScreen::new(15, 10);
        assert_eq!(a.handle_input(&InputEvent::Escape), vec![Msg::CloseAuth]);
        assert_eq!(a.handle_input(&InputEvent::Click(CLOSE)), vec![Msg::CloseAuth]);
    }

    #[test]
    fn typing_goes_to_the_focused_field() {
        let mut a = AuthScreen::new(15, 10);
        a.handle_input(&InputEvent::Click(TAB_LOGIN));
        typed(&mut a, "ram");
        a.handle_input(&InputEvent::Tab);
        typed(&mut a, "pw");
        assert_eq!(a.state.login_email.value, "ram");
        assert_eq!(a.state.login_password.value, "pw");

        a.handle_input(&InputEvent::Click(FIELD_BASE));
        a.handle_input(&InputEvent::Backspace);
        assert_eq!(a.state.login_email.value, "ra");
    }

    #[test]
    fn enter_with_missing_fields_sends_nothing() {
        let mut a = AuthScreen::new(15, 10);
        assert!(a.handle_input(&InputEvent::Enter).is_empty());
        assert_eq!(a.state.message.as_deref(), Some("Please fill in first name."));
    }

    #[tokio::test]
    async fn login_against_service() {
        let service = FakeService {
            accounts: vec![("ram@example.com".into(), "pw".into())],
            ..FakeService::default()
        };
        let mut a = AuthScreen::new(15, 10);
        a.handle_input(&InputEvent::Click(TAB_LOGIN));
        typed(&mut a, "ram@example.com");
        a.handle_input(&InputEvent::Tab);
        typed(&mut a, "wrong");

        let cmd = command(a.handle_input(&InputEvent::Click(SUBMIT)));
        // Keys are ignored while the request is in flight.
        typed(&mut a, "x");
        assert_eq!(a.state.login_password.value, "wrong");
        match run_command(&service, cmd).await {
            Reply::LoggedIn(r) => a.logged_in(r),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(a.state.login_error.as_deref(), Some("Invalid credentials"));

        for _ in 0..5 {
            a.handle_input(&InputEvent::Backspace);
        }
        typed(&mut a, "pw");
        let cmd = command(a.handle_input(&InputEvent::Enter));
        match run_command(&service, cmd).await {
            Reply::LoggedIn(r) => a.logged_in(r),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(a.state.step, AuthStep::Success);
        assert_eq!(a.tick(9), None);
        assert_eq!(a.tick(1), Some(Msg::LoginSuccess));
    }

    #[tokio::test]
    async fn registration_then_verification() {
        let service = FakeService {
            verification_code: "482913".into(),
            ..FakeService::default()
        };
        let mut a = AuthScreen::new(15, 10);
        for f in RegisterField::ALL {
            if f.required() {
                a.state.field_mut(f).value = "x".into();
            }
        }
        a.state.field_mut(RegisterField::Email).value = "sita@example.com".into();

        let cmd = command(a.handle_input(&InputEvent::Enter));
        match run_command(&service, cmd).await {
            Reply::Registered(r) => a.registered(r),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(a.state.step, AuthStep::Verification);

        typed(&mut a, "4829");
        let cmd = command(a.handle_input(&InputEvent::Enter));
        match run_command(&service, cmd).await {
            Reply::Verified(r) => a.verified(r),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(a.state.message.as_deref(), Some("Invalid code"));

        typed(&mut a, "13");
        let cmd = command(a.handle_input(&InputEvent::Enter));
        match run_command(&service, cmd).await {
            Reply::Verified(r) => a.verified(r),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(a.state.step, AuthStep::Success);
        assert_eq!(a.tick(14), None);
        assert_eq!(a.tick(1), Some(Msg::LoginSuccess));
    }

    #[tokio::test]
    async fn offline_registration_shows_network_message() {
        let service = FakeService {
            offline: true,
            ..FakeService::default()
        };
        let mut a = AuthScreen::new(15, 10);
        for f in RegisterField::ALL {
            a.state.field_mut(f).value = "x".into();
        }
        let cmd = command(a.handle_input(&InputEvent::Enter));
        match run_command(&service, cmd).await {
            Reply::Registered(r) => a.registered(r),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(a.state.message.as_deref(), Some("Network error. Is the backend running?"));
        assert_eq!(a.state.step, AuthStep::Form);
    }
}
