//! Search methods on [`QRadarClient`].
//!
//! `search` runs the whole lifecycle in one call. The phase methods (`submit`,
//! `status`, `await_completion`, `fetch_results`, `delete`) expose each step
//! on its own for callers that manage search ids themselves.

use crate::cancellation::CancellationToken;
use crate::client::QRadarClient;
use crate::endpoints;
use crate::error::Result;
use crate::lifecycle::JobController;
use crate::models::{Row, SearchInfo, SearchJob};
use crate::query::AqlQuery;
use crate::results::{ResultSet, materialize};
use crate::table::ResultTable;

impl QRadarClient {
    /// Lifecycle controller bound to this client's settings and observers.
    pub fn controller(&self) -> JobController<'_, Self> {
        JobController::new(self, &self.settings, &self.observers)
    }

    /// Run a search to completion and return its rows.
    ///
    /// The query's modifiers are composed into the final AQL text first. The
    /// search is deleted afterwards when `cleanup_on_completion` is set.
    ///
    /// # Errors
    ///
    /// Returns the lifecycle error for whichever phase failed; see
    /// [`JobController::run`].
    pub async fn search(&self, query: &AqlQuery) -> Result<ResultSet> {
        self.controller().run(&query.compose()).await
    }

    /// Like [`search`](Self::search), abandoning the search when `token` fires.
    pub async fn search_with_cancel(
        &self,
        query: &AqlQuery,
        token: &CancellationToken,
    ) -> Result<ResultSet> {
        self.controller()
            .with_cancellation(token)
            .run(&query.compose())
            .await
    }

    /// Run a search and return its rows as a column-aligned table.
    pub async fn search_table(&self, query: &AqlQuery) -> Result<ResultTable> {
        Ok(self.search(query).await?.to_table())
    }

    /// Run a search and return only its rows.
    pub async fn search_rows(&self, query: &AqlQuery) -> Result<Vec<Row>> {
        Ok(self.search(query).await?.into_rows())
    }

    /// Submit a query without waiting for it.
    pub async fn submit(&self, query: &AqlQuery) -> Result<SearchJob> {
        self.controller().submit(&query.compose()).await
    }

    /// Read a search's status once.
    pub async fn status(&self, search_id: &str) -> Result<SearchInfo> {
        self.controller().poll(search_id).await
    }

    /// Poll an existing search until it completes.
    pub async fn await_completion(&self, search_id: &str) -> Result<SearchInfo> {
        self.controller().await_completion(search_id).await
    }

    /// Load and unwrap the results of a completed search, retrying per the
    /// fetch policy.
    pub async fn fetch_results(&self, search_id: &str) -> Result<ResultSet> {
        let envelope = self.controller().fetch(search_id).await?;
        materialize(envelope)
    }

    /// Delete a search, returning any error.
    ///
    /// The lifecycle itself only ever deletes best effort; this method is for
    /// callers that want to know whether the delete succeeded.
    pub async fn delete(&self, search_id: &str) -> Result<()> {
        endpoints::delete_search(&self.http, &self.base_url, &self.auth, search_id).await
    }
}
