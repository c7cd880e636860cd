//! The List Manager, loads pages of a list view from the backend.
use async_std::sync::RwLock;
use log::{debug, error};
use primitives::{util::ApiUrl, Row};
use reqwest::StatusCode;
use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};
use thiserror::Error;

use crate::{
    extract::{extract_page, parse_body, Page},
    page::{PageInfo, PageQuery},
    preferences::Preferences,
    state::ListState,
    view::{ViewKind, ViewSpec},
    Url,
};

/// Default count of rows on a single page.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum Error {
    #[error("Request to the backend failed: status {status} at url {url}")]
    Backend { status: StatusCode, url: Url },
    #[error(transparent)]
    Request(#[from] reqwest::Error),
    #[error("Invalid list url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid list query: {0}")]
    Query(#[from] serde_qs::Error),
    #[error("The {0} view is scoped to a request, but no request id was given")]
    MissingRequestId(ViewKind),
}

/// The [`Manager`]'s options for loading a list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub backend_url: ApiUrl,
    pub view: ViewKind,
    /// The request whose campaigns are listed, required by [`ViewKind::RequestCampaigns`].
    pub request_id: Option<String>,
    /// Rows per page.
    ///
    /// default: [`DEFAULT_PAGE_LIMIT`]
    pub limit: u32,
    /// Sent as a bearer token when set.
    pub auth_token: Option<String>,
    /// default: [`DEFAULT_FETCH_TIMEOUT`]
    pub fetch_timeout: Duration,
}

impl Options {
    pub fn new(backend_url: ApiUrl, view: ViewKind) -> Self {
        Self {
            backend_url,
            view,
            request_id: None,
            limit: DEFAULT_PAGE_LIMIT,
            auth_token: None,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// What happened to a [`Manager::load_page`] call.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The page was applied to the [`ListState`].
    Loaded(PageInfo),
    /// Another load was started meanwhile, the response was discarded.
    Stale,
    /// The rows were cleared.
    Failed(Error),
}

/// The List Manager
#[derive(Debug, Clone)]
pub struct Manager {
    options: Options,
    client: reqwest::Client,
    /// Incremented by every load, only the latest one is applied.
    generation: Arc<AtomicU64>,
    state: Arc<RwLock<ListState>>,
}

impl Manager {
    pub fn new(options: Options, preferences: Preferences) -> Result<Self, Error> {
        if options.view == ViewKind::RequestCampaigns && options.request_id.is_none() {
            return Err(Error::MissingRequestId(options.view));
        }

        let client = reqwest::Client::builder()
            .timeout(options.fetch_timeout)
            .build()?;
        let state = ListState::new(options.view.spec(), preferences, options.limit);

        Ok(Self {
            options,
            client,
            generation: Arc::new(AtomicU64::new(0)),
            state: Arc::new(RwLock::new(state)),
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn view(&self) -> &'static ViewSpec {
        self.options.view.spec()
    }

    pub fn state(&self) -> &Arc<RwLock<ListState>> {
        &self.state
    }

    /// `<backend_url>/<endpoint>?page=<page>&limit=<limit>`
    pub fn list_url(&self, page: u64) -> Result<Url, Error> {
        let endpoint = self
            .view()
            .endpoint_for(self.options.request_id.as_deref());
        let query = serde_qs::to_string(&PageQuery {
            page,
            limit: self.options.limit,
        })?;

        // ApiUrl handles endpoint path (with or without `/`)
        Ok(self.options.backend_url.join(&format!("{endpoint}?{query}"))?)
    }

    /// Fetches a page without touching the [`ListState`].
    pub async fn fetch_page(&self, page: u64) -> Result<Page, Error> {
        let url = self.list_url(page)?;
        debug!("Fetching page {page} of the {} view from {url}", self.options.view);

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.options.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Backend { status, url });
        }

        let body = response.text().await?;

        Ok(extract_page(&parse_body(&body), self.view().is_nested()))
    }

    /// Loads a page into the [`ListState`].
    ///
    /// The response is applied only if no other load was started meanwhile.
    /// A failed load clears the rows, the loading flag is cleared by the latest load either way.
    pub async fn load_page(&self, page: u64) -> LoadOutcome {
        let page = page.max(1);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.set_loading(true);

        let result = self.fetch_page(page).await;

        let mut state = self.state.write().await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding the stale response for page {page} of the {} view", self.options.view);

            return LoadOutcome::Stale;
        }
        state.set_loading(false);

        match result {
            Ok(fetched) => {
                debug!(
                    "Loaded {} rows ({} in total) of the {} view",
                    fetched.rows.len(),
                    fetched.total,
                    self.options.view
                );
                state.set_page(page, fetched);

                LoadOutcome::Loaded(state.page_info())
            }
            Err(err) => {
                error!("Failed to load page {page} of the {} view: {err}", self.options.view);
                state.clear();

                LoadOutcome::Failed(err)
            }
        }
    }

    /// Sets the row the listed rows belong to, e.g. the request of the listed campaigns.
    ///
    /// It is kept across page loads.
    pub async fn set_parent(&self, parent: Option<Row>) {
        self.state.write().await.set_parent(parent);
    }

    /// Loads the current page again.
    pub async fn reload(&self) -> LoadOutcome {
        let page = self.state.read().await.page_info().page;

        self.load_page(page).await
    }

    pub async fn next_page(&self) -> LoadOutcome {
        let page = self.state.read().await.page_info().next_page();

        self.load_page(page).await
    }

    pub async fn previous_page(&self) -> LoadOutcome {
        let page = self.state.read().await.page_info().previous_page();

        self.load_page(page).await
    }
}
