/// Third-party sign-in buttons shown under the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocialProvider {
    Google,
    GitHub,
    Microsoft,
}

impl SocialProvider {
    pub const ALL: [SocialProvider; 3] = [
        SocialProvider::Google,
        SocialProvider::GitHub,
        SocialProvider::Microsoft,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SocialProvider::Google => "Google",
            SocialProvider::GitHub => "GitHub",
            SocialProvider::Microsoft => "Microsoft",
        }
    }
}

/// Action tag attached to each form control.
///
/// Front ends dispatch on this tag, never on a control's label or styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormAction {
    Submit,
    TogglePassword,
    ClearForm,
    SocialLogin(SocialProvider),
}
