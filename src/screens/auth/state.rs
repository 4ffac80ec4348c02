//! Auth overlay state: login and registration forms, the verification code,
//! and the request/success lifecycle.

use crate::clock::Delay;
use crate::screens::form::TextField;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthTab {
    Login,
    Register,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStep {
    Form,
    Verification,
    Success,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterField {
    First,
    Middle,
    Last,
    Email,
    Phone,
    Password,
    CitizenshipNo,
    PlaceOfIssue,
    DateOfIssue,
    FatherName,
    MotherName,
}

impl RegisterField {
    pub const ALL: [RegisterField; 11] = [
        RegisterField::First,
        RegisterField::Middle,
        RegisterField::Last,
        RegisterField::Email,
        RegisterField::Phone,
        RegisterField::Password,
        RegisterField::CitizenshipNo,
        RegisterField::PlaceOfIssue,
        RegisterField::DateOfIssue,
        RegisterField::FatherName,
        RegisterField::MotherName,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RegisterField::First => "First name",
            RegisterField::Middle => "Middle name",
            RegisterField::Last => "Last name",
            RegisterField::Email => "Email",
            RegisterField::Phone => "Phone",
            RegisterField::Password => "Password",
            RegisterField::CitizenshipNo => "Citizenship no",
            RegisterField::PlaceOfIssue => "Place of issue",
            RegisterField::DateOfIssue => "Date of issue",
            RegisterField::FatherName => "Father's name",
            RegisterField::MotherName => "Mother's name",
        }
    }

    pub fn required(self) -> bool {
        self != RegisterField::Middle
    }
}

pub struct AuthState {
    pub tab: AuthTab,
    pub step: AuthStep,
    /// A request is in flight; submissions are ignored.
    pub loading: bool,
    /// Indexed like [`RegisterField::ALL`].
    pub register: Vec<TextField>,
    pub login_email: TextField,
    pub login_password: TextField,
    pub code: TextField,
    /// Index of the focused field within the visible form.
    pub focus: usize,
    /// Registration and verification notices.
    pub message: Option<String>,
    pub login_error: Option<String>,
    /// Runs from a successful verify/login until the flow is told.
    pub success: Delay,
    pub verify_delay: u32,
    pub login_delay: u32,
}

impl AuthState {
    pub fn new(verify_delay: u32, login_delay: u32) -> Self {
        let register = RegisterField::ALL
            .iter()
            .map(|f| match f {
                RegisterField::Password => TextField::masked().max_len(64),
                RegisterField::Phone => TextField::numeric("").max_len(15),
                _ => TextField::default().max_len(64),
            })
            .collect();
        Self {
            tab: AuthTab::Register,
            step: AuthStep::Form,
            loading: false,
            register,
            login_email: TextField::default().max_len(64),
            login_password: TextField::masked().max_len(64),
            code: TextField::default().max_len(8),
            focus: 0,
            message: None,
            login_error: None,
            success: Delay::default(),
            verify_delay,
            login_delay,
        }
    }

    pub fn field(&self, f: RegisterField) -> &TextField {
        &self.register[f as usize]
    }

    pub fn field_mut(&mut self, f: RegisterField) -> &mut TextField {
        &mut self.register[f as usize]
    }

    /// Number of fields in the visible form.
    pub fn field_count(&self) -> usize {
        match (self.step, self.tab) {
            (AuthStep::Form, AuthTab::Register) => self.register.len(),
            (AuthStep::Form, AuthTab::Login) => 2,
            (AuthStep::Verification, _) => 1,
            (AuthStep::Success, _) => 0,
        }
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        let i = self.focus;
        match (self.step, self.tab) {
            (AuthStep::Form, AuthTab::Register) => self.register.get_mut(i),
            (AuthStep::Form, AuthTab::Login) => match i {
                0 => Some(&mut self.login_email),
                1 => Some(&mut self.login_password),
                _ => None,
            },
            (AuthStep::Verification, _) => Some(&mut self.code),
            (AuthStep::Success, _) => None,
        }
    }
}
