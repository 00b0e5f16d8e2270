use std::sync::Arc;

use anyhow::Context;
use courier_application::Session;
use courier_infrastructure::{FileStorage, ReqwestHttpClient, Settings, SystemClock};

pub type AppSession = Session<FileStorage, ReqwestHttpClient, SystemClock>;

/// Everything a command needs for one run.
pub struct CliContext {
    session: AppSession,
}

impl CliContext {
    /// Opens the collections under the configured data directory.
    ///
    /// An environment given on the command line must exist; one that only
    /// comes from configuration is selected as is, and a stale id simply
    /// disables substitution.
    pub fn open(settings: &Settings, environment_from_cli: bool) -> anyhow::Result<Self> {
        tracing::debug!(data_dir = %settings.data_dir.display(), "opening data directory");

        let storage = Arc::new(FileStorage::new(&settings.data_dir));
        let client = ReqwestHttpClient::with_options(&settings.user_agent, settings.max_redirects)
            .context("failed to create HTTP client")?;
        let mut session = Session::new(storage, Arc::new(client), SystemClock::new());

        if environment_from_cli {
            session.select_environment(&settings.default_environment_id)?;
        } else {
            session
                .composer_mut()
                .select_environment(Some(settings.default_environment_id.clone()));
        }

        Ok(Self { session })
    }

    pub const fn session(&self) -> &AppSession {
        &self.session
    }

    pub const fn session_mut(&mut self) -> &mut AppSession {
        &mut self.session
    }
}
