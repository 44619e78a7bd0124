use std::fmt;
use std::sync::Mutex;

use tracing::info;

use crate::error::GatehouseError;
use crate::types::Feature;

/// User-visible messages emitted by lifecycle operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    RegistrationPending,
    RegisterFirst,
    AwaitingApproval,
    LoggedIn,
    LoggedOut,
    LoginRequired,
    FeatureDisabled(Feature),
    TooManyUploads,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::RegistrationPending => {
                f.write_str("Registration successful. Please wait for admin approval.")
            }
            Notice::RegisterFirst => f.write_str("No account found. Please register first."),
            Notice::AwaitingApproval => f.write_str("Your account has not been approved yet."),
            Notice::LoggedIn => f.write_str("Login successful."),
            Notice::LoggedOut => f.write_str("You have been logged out."),
            Notice::LoginRequired => f.write_str("Please log in to continue."),
            Notice::FeatureDisabled(feature) => write!(
                f,
                "The {feature} feature has been disabled by the administrator."
            ),
            Notice::TooManyUploads => f.write_str("Too many files in one upload."),
        }
    }
}

/// Delivers notices to whoever is watching: a terminal, a log, a test.
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Pass the error's notice, if it has one, to `notifier`.
pub fn announce<N: Notifier + ?Sized>(notifier: &N, err: &GatehouseError) {
    if let Some(notice) = err.notice() {
        notifier.notify(notice);
    }
}

/// Sends notices to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        info!(notice = ?notice, "{notice}");
    }
}

/// Keeps every notice in order of emission.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .copied()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}
