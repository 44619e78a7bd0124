pub mod account;
pub mod settings;

pub use account::{Account, AccountStatus};
pub use settings::{AdminSettings, Feature};
