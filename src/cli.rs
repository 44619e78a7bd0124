//! Command-line front end.
//!
//! [`run`] executes one [`Command`] against any store. It writes plain output
//! to `out` and user notices through the notifier. A rejection the user can
//! act on becomes [`Outcome::Rejected`] once its notice has been shown. Any
//! other failure is returned as an error.

use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::error::GatehouseError;
use crate::service::notice::{Notifier, announce};
use crate::service::{AccountLifecycle, approval, insights, settings};
use crate::store::KeyValueStore;
use crate::types::AdminSettings;

#[derive(Debug, Parser)]
#[command(name = "gatehouse", about = "Account registration, approval and session gate")]
pub struct Cli {
    /// Overrides GATEHOUSE_DATABASE_URL.
    #[arg(long)]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a fresh account awaiting approval.
    Register,
    /// Approve the stored account (administrator action).
    Approve,
    Login,
    Logout,
    /// Show account status and session state.
    Status,
    /// Exit non-zero unless a session is active.
    Guard,
    /// Analyze uploaded sales sheets (CSV) and print the report as JSON.
    Analyze {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    Show,
    /// Change only the flags given.
    Set {
        #[arg(long)]
        dashboard: Option<bool>,
        #[arg(long)]
        upload: Option<bool>,
        #[arg(long)]
        insights: Option<bool>,
        #[arg(long)]
        max_uploads: Option<u32>,
    },
    /// Restore the defaults.
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Rejected,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success => ExitCode::SUCCESS,
            Outcome::Rejected => ExitCode::FAILURE,
        }
    }
}

pub async fn run<S, N, W>(
    command: Command,
    store: &S,
    notifier: &N,
    out: &mut W,
) -> Result<Outcome, GatehouseError>
where
    S: KeyValueStore,
    N: Notifier,
    W: Write,
{
    match execute(command, store, notifier, out).await {
        Ok(()) => Ok(Outcome::Success),
        Err(e) if e.notice().is_some() => Ok(Outcome::Rejected),
        Err(e) => Err(e),
    }
}

async fn execute<S, N, W>(
    command: Command,
    store: &S,
    notifier: &N,
    out: &mut W,
) -> Result<(), GatehouseError>
where
    S: KeyValueStore,
    N: Notifier,
    W: Write,
{
    // The lifecycle announces its own rejections; approval and analysis are announced here.
    let lifecycle = AccountLifecycle::with_notifier(store, notifier);

    match command {
        Command::Register => {
            lifecycle.register().await?;
        }
        Command::Approve => {
            let account = approval::approve(store)
                .await
                .inspect_err(|e| announce(notifier, e))?;
            writeln!(out, "Account status: {}", account.status)?;
        }
        Command::Login => lifecycle.login().await?,
        Command::Logout => lifecycle.logout().await?,
        Command::Status => {
            match lifecycle.account().await? {
                Some(account) => writeln!(out, "Account status: {}", account.status)?,
                None => writeln!(out, "No account registered.")?,
            }
            let logged_in = lifecycle.is_authenticated().await?;
            writeln!(out, "Logged in: {}", if logged_in { "yes" } else { "no" })?;
        }
        Command::Guard => lifecycle.guard().await?,
        Command::Analyze { files } => {
            lifecycle.guard().await?;
            let reports = insights::analyze_uploads(store, &files)
                .await
                .inspect_err(|e| announce(notifier, e))?;
            serde_json::to_writer_pretty(&mut *out, &reports)?;
            writeln!(out)?;
        }
        Command::Settings { action } => match action {
            SettingsAction::Show => write_settings(out, &settings::load(store).await?)?,
            SettingsAction::Set {
                dashboard,
                upload,
                insights,
                max_uploads,
            } => {
                let updated = settings::update(store, |current| {
                    if let Some(v) = dashboard {
                        current.dashboard_enabled = v;
                    }
                    if let Some(v) = upload {
                        current.upload_enabled = v;
                    }
                    if let Some(v) = insights {
                        current.insights_enabled = v;
                    }
                    if let Some(v) = max_uploads {
                        current.max_uploads = v;
                    }
                })
                .await?;
                write_settings(out, &updated)?;
            }
            SettingsAction::Reset => write_settings(out, &settings::reset(store).await?)?,
        },
    }
    Ok(())
}

fn write_settings<W: Write>(out: &mut W, s: &AdminSettings) -> Result<(), GatehouseError> {
    writeln!(out, "dashboardEnabled: {}", s.dashboard_enabled)?;
    writeln!(out, "uploadEnabled:    {}", s.upload_enabled)?;
    writeln!(out, "insightsEnabled:  {}", s.insights_enabled)?;
    writeln!(out, "maxUploads:       {}", s.max_uploads)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::notice::{Notice, RecordingNotifier};
    use crate::store::{ADMIN_SETTINGS_KEY, MemoryStore, SESSION_KEY, USER_KEY};
    use crate::types::Feature;
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct Harness {
        store: MemoryStore,
        notices: RecordingNotifier,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                store: MemoryStore::new(),
                notices: RecordingNotifier::new(),
            }
        }

        async fn run(&self, args: &[&str]) -> (Outcome, String) {
            let cli = Cli::try_parse_from(std::iter::once("gatehouse").chain(args.iter().copied()))
                .expect("arguments parse");
            let mut out = Vec::new();
            let outcome = run(cli.command, &self.store, &self.notices, &mut out)
                .await
                .expect("command runs");
            (outcome, String::from_utf8(out).expect("utf-8 output"))
        }
    }

    #[tokio::test]
    async fn register_approve_login_flow() {
        let h = Harness::new();

        assert_eq!(h.run(&["register"]).await.0, Outcome::Success);
        assert_eq!(h.run(&["login"]).await.0, Outcome::Rejected);
        assert_eq!(h.notices.last(), Some(Notice::AwaitingApproval));

        let (outcome, out) = h.run(&["approve"]).await;
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(out, "Account status: APPROVED\n");

        assert_eq!(h.run(&["login"]).await.0, Outcome::Success);
        assert_eq!(h.run(&["guard"]).await.0, Outcome::Success);

        let (_, out) = h.run(&["status"]).await;
        assert_eq!(out, "Account status: APPROVED\nLogged in: yes\n");
    }

    #[tokio::test]
    async fn approve_without_account_shows_notice() {
        let h = Harness::new();

        let (outcome, out) = h.run(&["approve"]).await;
        assert_eq!(outcome, Outcome::Rejected);
        assert!(out.is_empty());
        assert_eq!(h.notices.notices(), vec![Notice::RegisterFirst]);
        assert_eq!(h.store.get(USER_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn every_rejection_is_announced_once() {
        let h = Harness::new();

        assert_eq!(h.run(&["login"]).await.0, Outcome::Rejected);
        assert_eq!(h.run(&["guard"]).await.0, Outcome::Rejected);
        assert_eq!(
            h.notices.notices(),
            vec![Notice::RegisterFirst, Notice::LoginRequired]
        );
    }

    #[tokio::test]
    async fn logout_then_guard_rejects() {
        let h = Harness::new();
        h.run(&["register"]).await;
        h.run(&["approve"]).await;
        h.run(&["login"]).await;

        assert_eq!(h.run(&["logout"]).await.0, Outcome::Success);
        assert_eq!(h.store.get(SESSION_KEY).await.unwrap(), None);
        assert_eq!(h.run(&["guard"]).await.0, Outcome::Rejected);
        assert_eq!(h.notices.last(), Some(Notice::LoginRequired));
    }

    #[tokio::test]
    async fn status_without_account() {
        let h = Harness::new();
        let (outcome, out) = h.run(&["status"]).await;
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(out, "No account registered.\nLogged in: no\n");
    }

    #[tokio::test]
    async fn settings_set_merges_given_flags() {
        let h = Harness::new();
        h.run(&["settings", "set", "--max-uploads", "3"]).await;

        let (outcome, out) = h.run(&["settings", "set", "--upload", "false"]).await;
        assert_eq!(outcome, Outcome::Success);
        assert_eq!(
            out,
            "dashboardEnabled: true\nuploadEnabled:    false\ninsightsEnabled:  true\nmaxUploads:       3\n"
        );

        let (_, shown) = h.run(&["settings", "show"]).await;
        assert_eq!(shown, out);
    }

    #[tokio::test]
    async fn settings_set_and_reset_recover_corrupt_record() {
        let h = Harness::new();
        h.store.set(ADMIN_SETTINGS_KEY, "{oops").await.unwrap();

        let (outcome, out) = h.run(&["settings", "set", "--insights", "false"]).await;
        assert_eq!(outcome, Outcome::Success);
        assert!(out.contains("insightsEnabled:  false"));

        h.store.set(ADMIN_SETTINGS_KEY, "{oops").await.unwrap();
        let (outcome, out) = h.run(&["settings", "reset"]).await;
        assert_eq!(outcome, Outcome::Success);
        assert!(out.contains("maxUploads:       5"));
    }

    #[tokio::test]
    async fn settings_show_on_corrupt_record_is_an_error() {
        let h = Harness::new();
        h.store.set(ADMIN_SETTINGS_KEY, "{oops").await.unwrap();

        let cli = Cli::try_parse_from(["gatehouse", "settings", "show"]).unwrap();
        let err = run(cli.command, &h.store, &h.notices, &mut Vec::<u8>::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GatehouseError::CorruptRecord { .. }));
        assert!(h.notices.notices().is_empty());
    }

    #[tokio::test]
    async fn analyze_requires_session_and_enabled_upload() {
        let h = Harness::new();

        assert_eq!(h.run(&["analyze", "sales.csv"]).await.0, Outcome::Rejected);
        assert_eq!(h.notices.last(), Some(Notice::LoginRequired));

        h.run(&["register"]).await;
        h.run(&["approve"]).await;
        h.run(&["login"]).await;
        h.run(&["settings", "set", "--upload", "false"]).await;

        assert_eq!(h.run(&["analyze", "sales.csv"]).await.0, Outcome::Rejected);
        assert_eq!(
            h.notices.last(),
            Some(Notice::FeatureDisabled(Feature::Upload))
        );

        h.run(&["settings", "set", "--upload", "true", "--max-uploads", "1"])
            .await;
        assert_eq!(
            h.run(&["analyze", "a.csv", "b.csv"]).await.0,
            Outcome::Rejected
        );
        assert_eq!(h.notices.last(), Some(Notice::TooManyUploads));
    }

    #[tokio::test]
    async fn analyze_prints_json_report() {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("gatehouse-cli-{}-{}.csv", std::process::id(), nanos));
        fs::write(
            &path,
            "date,revenue,cost,product,category\n2024-01-01,100,25,A,B\n",
        )
        .unwrap();

        let h = Harness::new();
        h.run(&["register"]).await;
        h.run(&["approve"]).await;
        h.run(&["login"]).await;

        let path_arg = path.display().to_string();
        let (outcome, out) = h.run(&["analyze", path_arg.as_str()]).await;
        assert_eq!(outcome, Outcome::Success);

        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json[0]["kpis"]["profit"], 75.0);
        assert_eq!(json[0]["kpis"]["margin"], 75.0);
        assert_eq!(json[0]["charts"]["cost_breakdown"]["labels"][0], "B");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn analyze_needs_at_least_one_file() {
        assert!(Cli::try_parse_from(["gatehouse", "analyze"]).is_err());
    }
}
