pub mod approval;
pub mod insights;
pub mod lifecycle;
pub mod notice;
pub mod settings;

pub use lifecycle::AccountLifecycle;
pub use notice::{Notice, Notifier, RecordingNotifier, TracingNotifier, announce};
