//! Auth overlay transitions. Submissions return the [`Command`] to run;
//! replies come back through [`registered`], [`verified`] and
//! [`logged_in`].

use crate::error::ServiceError;
use crate::service::{AuthEnvelope, Command, LoginRequest, RegisterRequest, Session, VerifyRequest};

use super::state::{AuthState, AuthStep, AuthTab, RegisterField};

pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";
pub const CODE_MISSING: &str = "Please enter the verification code.";
pub const CODE_INVALID: &str = "Invalid verification code.";
pub const LOGIN_FAILED: &str = "Invalid credentials.";

/// Shortest code accepted before a verify request is sent.
const MIN_CODE_LEN: usize = 4;

/// Non-empty name parts joined by single spaces.
pub fn full_name(state: &AuthState) -> String {
    [RegisterField::First, RegisterField::Middle, RegisterField::Last]
        .iter()
        .map(|f| state.field(*f).trimmed())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn switch_tab(state: &mut AuthState, tab: AuthTab) {
    if state.step != AuthStep::Form || state.tab == tab {
        return;
    }
    state.tab = tab;
    state.focus = 0;
    state.message = None;
    state.login_error = None;
}

pub fn focus_next(state: &mut AuthState) {
    let n = state.field_count();
    if n > 0 {
        state.focus = (state.focus + 1) % n;
    }
}

pub fn focus(state: &mut AuthState, index: usize) {
    if index < state.field_count() {
        state.focus = index;
    }
}

/// Submit whatever the overlay currently shows.
pub fn submit(state: &mut AuthState) -> Option<Command> {
    if state.loading {
        return None;
    }
    match (state.step, state.tab) {
        (AuthStep::Form, AuthTab::Register) => submit_registration(state),
        (AuthStep::Form, AuthTab::Login) => submit_login(state),
        (AuthStep::Verification, _) => submit_code(state),
        (AuthStep::Success, _) => None,
    }
}

fn submit_registration(state: &mut AuthState) -> Option<Command> {
    if let Some(missing) = RegisterField::ALL
        .iter()
        .position(|f| f.required() && state.field(*f).is_blank())
    {
        state.message = Some(format!(
            "Please fill in {}.",
            RegisterField::ALL[missing].label().to_lowercase()
        ));
        state.focus = missing;
        return None;
    }
    state.message = None;
    state.loading = true;
    Some(Command::Register(RegisterRequest {
        email: state.field(RegisterField::Email).trimmed().to_string(),
        password: state.field(RegisterField::Password).value.clone(),
        phone: state.field(RegisterField::Phone).trimmed().to_string(),
        full_name: full_name(state),
    }))
}

fn submit_login(state: &mut AuthState) -> Option<Command> {
    state.login_error = None;
    state.loading = true;
    Some(Command::Login(LoginRequest {
        email: state.login_email.trimmed().to_string(),
        password: state.login_password.value.clone(),
    }))
}

fn submit_code(state: &mut AuthState) -> Option<Command> {
    let code = state.code.trimmed().to_string();
    if code.chars().count() < MIN_CODE_LEN {
        state.message = Some(CODE_MISSING.to_string());
        return None;
    }
    state.message = None;
    state.loading = true;
    Some(Command::Verify(VerifyRequest {
        email: state.field(RegisterField::Email).trimmed().to_string(),
        code,
    }))
}

/// Replies that arrive with no request in flight are stale and dropped.
fn settle(state: &mut AuthState) -> bool {
    let was_loading = state.loading;
    state.loading = false;
    was_loading
}

pub fn registered(state: &mut AuthState, result: Result<AuthEnvelope, ServiceError>) {
    if !settle(state) {
        return;
    }
    match result {
        Ok(env) => {
            state.step = AuthStep::Verification;
            state.focus = 0;
            state.message = env.message;
        }
        Err(e) => state.message = Some(e.user_message(REGISTER_FAILED)),
    }
}

pub fn verified(state: &mut AuthState, result: Result<AuthEnvelope, ServiceError>) {
    if !settle(state) {
        return;
    }
    match result {
        Ok(_) => {
            state.step = AuthStep::Success;
            state.message = None;
            state.success.start(state.verify_delay);
        }
        Err(e) => state.message = Some(e.user_message(CODE_INVALID)),
    }
}

pub fn logged_in(state: &mut AuthState, result: Result<Session, ServiceError>) {
    if !settle(state) {
        return;
    }
    match result {
        Ok(session) => {
            if let Some(user) = session.user.as_ref() {
                log::info!("signed in as {}", user.email);
            }
            state.step = AuthStep::Success;
            state.success.start(state.login_delay);
        }
        Err(e) => state.login_error = Some(e.user_message(LOGIN_FAILED)),
    }
}

/// Advance the success delay. True on the tick it finishes.
pub fn tick(state: &mut AuthState, ticks: u32) -> bool {
    state.success.advance(ticks)
}
