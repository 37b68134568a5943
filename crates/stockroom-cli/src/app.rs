//! Application context shared by every command.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use stockroom_core::types::DEFAULT_SERVER;
use stockroom_core::{KeyValueStore, NavigationOutcome, Navigator, RouteTable, ServerUrl, SessionContext};
use stockroom_file::FileStore;
use stockroom_http::{ApiClient, ClientConfig};

use crate::storage::{self, SERVER_KEY};

/// Session, navigator and client wired together over the saved session.
#[derive(Debug)]
pub struct App {
    pub store: FileStore,
    pub session: SessionContext,
    pub navigator: Navigator,
    pub client: ApiClient,
}

impl App {
    /// Open the saved session and build a client for `server`.
    ///
    /// Without an explicit server the one remembered at login is used.
    pub fn open(server: Option<&str>, data_dir: Option<&Path>) -> Result<Self> {
        let dir = storage::data_dir(data_dir)?;
        let store = storage::open_store(&dir);

        let remembered = store.get(SERVER_KEY).context("Failed to read session file")?;
        let server = server
            .map(str::to_string)
            .or(remembered)
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());
        let server = ServerUrl::new(&server).context("Invalid server URL")?;
        debug!(%server, path = %store.path().display(), "Opening session");

        let session = SessionContext::open(store.clone()).context("Failed to load session")?;
        let navigator = Navigator::new(RouteTable::standard(), session.clone());
        let client = ApiClient::new(ClientConfig::new(server), navigator.clone())
            .context("Failed to create HTTP client")?;

        Ok(Self {
            store,
            session,
            navigator,
            client,
        })
    }

    /// Navigate to `path` and fail unless the guard lets the session in.
    pub async fn enter(&self, path: &str) -> Result<()> {
        let outcome = self
            .navigator
            .navigate(path, &self.client)
            .await
            .with_context(|| format!("Failed to open {}", path))?;

        if let NavigationOutcome::Arrived { .. } = outcome {
            return Ok(());
        }

        // A forced redirect during the guard leaves the outcome superseded.
        let landed = outcome
            .location()
            .map(str::to_string)
            .or_else(|| self.navigator.current())
            .unwrap_or_default();

        if landed == self.navigator.guard().login_path() {
            bail!("Not logged in. Run 'stockroom login' first.");
        }
        bail!("Access to {} denied (redirected to {})", path, landed)
    }

    /// Remember the server the session was issued by.
    pub fn remember_server(&self) -> Result<()> {
        self.store
            .set(SERVER_KEY, self.client.server().as_str())
            .context("Failed to save session file")
    }
}
