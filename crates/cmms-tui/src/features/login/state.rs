use cmms_core::Field;
use cmms_core::login::{FormAction, LoginFormController, SocialProvider};
use cmms_core::surface::{FieldErrors, Redirects, Toasts};

/// The controller wired to the in-memory surfaces this screen renders.
pub type LoginForm = LoginFormController<Toasts, FieldErrors, Redirects>;

/// A focusable element of the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Input(Field),
    Action(FormAction),
}

/// Focus order (Tab walks forward, Shift-Tab backward).
pub const CONTROLS: [Control; 7] = [
    Control::Input(Field::Username),
    Control::Input(Field::Password),
    Control::Action(FormAction::TogglePassword),
    Control::Action(FormAction::Submit),
    Control::Action(FormAction::SocialLogin(SocialProvider::Google)),
    Control::Action(FormAction::SocialLogin(SocialProvider::GitHub)),
    Control::Action(FormAction::SocialLogin(SocialProvider::Microsoft)),
];

pub struct LoginState {
    pub form: LoginForm,
    focus: usize,
}

impl LoginState {
    pub fn new(form: LoginForm) -> Self {
        Self { form, focus: 0 }
    }

    pub fn focused(&self) -> Control {
        CONTROLS[self.focus]
    }

    pub fn is_focused(&self, control: Control) -> bool {
        self.focused() == control
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % CONTROLS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + CONTROLS.len() - 1) % CONTROLS.len();
    }

    pub fn focus_first(&mut self) {
        self.focus = 0;
    }

    /// Appends text to a field; each edit is an input event and re-validates.
    pub fn insert_text(&mut self, field: Field, text: &str) {
        let mut value = self.form.value(field).to_string();
        value.push_str(text);
        self.form.set_field(field, value);
    }

    pub fn delete_char(&mut self, field: Field) {
        let mut value = self.form.value(field).to_string();
        if value.pop().is_some() {
            self.form.set_field(field, value);
        }
    }
}
