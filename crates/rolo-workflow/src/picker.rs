//! Link-picker session: search for records to link to a source record.
//!
//! A session is scoped to one source record and discarded on navigation
//! away. The set of already-linked ids is snapshotted once when the session
//! opens, not re-fetched per keystroke; query edits are debounced so the
//! store sees one search per pause in typing rather than one per character.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::debug;
use uuid::Uuid;

use rolo_core::{defaults, LinkStore, RecordType, Result, SearchIndex, SearchResult};

/// Session state machine for the "link existing record" screen.
pub struct LinkPicker {
    search: Arc<dyn SearchIndex>,
    links: Arc<dyn LinkStore>,
    source_id: Uuid,
    source_type: RecordType,
    /// Ids already linked to the source, snapshotted at session start.
    linked: HashSet<Uuid>,
    debounce: Duration,
    query: String,
    deadline: Option<Instant>,
    results: Vec<SearchResult>,
}

impl LinkPicker {
    /// Open a session for `source_id`, snapshotting its linked ids.
    pub async fn open(
        search: Arc<dyn SearchIndex>,
        links: Arc<dyn LinkStore>,
        source_id: Uuid,
        source_type: RecordType,
    ) -> Result<Self> {
        let linked: HashSet<Uuid> = links.linked_ids(source_id).await?.into_iter().collect();

        debug!(
            subsystem = "workflow",
            component = "picker",
            op = "open",
            record_id = %source_id,
            record_type = source_type.id(),
            linked_count = linked.len(),
            "picker session opened"
        );

        Ok(Self {
            search,
            links,
            source_id,
            source_type,
            linked,
            debounce: defaults::SEARCH_DEBOUNCE,
            query: String::new(),
            deadline: None,
            results: Vec::new(),
        })
    }

    /// Override the debounce window (tests).
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Record a query edit.
    ///
    /// Clears every selection (selection does not persist across searches)
    /// and re-arms the debounce deadline; each further edit pushes the
    /// deadline out again. The search itself runs when [`Self::results`]
    /// is awaited.
    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
        for hit in &mut self.results {
            hit.is_selected = false;
        }
        self.deadline = Some(Instant::now() + self.debounce);
    }

    /// Await the debounce deadline, run the search, and return the hits.
    ///
    /// Hits never include the source record itself nor any record of the
    /// source's own type; hits already linked to the source are marked
    /// `is_linked` and stay visible but unselectable. With no pending query
    /// edit this returns the cached hits unchanged.
    pub async fn results(&mut self) -> Result<&[SearchResult]> {
        if let Some(deadline) = self.deadline.take() {
            sleep_until(deadline).await;

            let pattern = format!("%{}%", self.query);
            let mut hits = self.search.search(&pattern).await?;
            hits.retain(|hit| {
                hit.record_id != self.source_id && hit.record_type != self.source_type
            });
            for hit in &mut hits {
                hit.is_linked = self.linked.contains(&hit.record_id);
            }

            debug!(
                subsystem = "workflow",
                component = "picker",
                op = "search",
                query = %self.query,
                result_count = hits.len(),
                "picker search complete"
            );
            self.results = hits;
        }
        Ok(&self.results)
    }

    /// Toggle selection of an unlinked hit; returns the new selection
    /// state. Linked hits and unknown ids are no-ops returning false.
    pub fn toggle(&mut self, record_id: Uuid) -> bool {
        match self
            .results
            .iter_mut()
            .find(|hit| hit.record_id == record_id)
        {
            Some(hit) if !hit.is_linked => {
                hit.is_selected = !hit.is_selected;
                hit.is_selected
            }
            _ => false,
        }
    }

    /// Number of currently selected hits.
    pub fn selected_count(&self) -> usize {
        self.results.iter().filter(|hit| hit.is_selected).count()
    }

    /// Commit one link per selected hit, sequentially.
    ///
    /// No batching and no transaction: a failure mid-loop leaves the links
    /// committed so far, and the error carries out of the loop. Committed
    /// hits become linked (and unselectable) in the session view. Returns
    /// the number of links created.
    pub async fn commit(&mut self) -> Result<usize> {
        let mut committed = 0;
        for idx in 0..self.results.len() {
            if !self.results[idx].is_selected {
                continue;
            }
            let (target_id, target_type) =
                (self.results[idx].record_id, self.results[idx].record_type);

            self.links
                .add_link(self.source_id, self.source_type, target_id, target_type)
                .await?;

            committed += 1;
            self.linked.insert(target_id);
            self.results[idx].is_selected = false;
            self.results[idx].is_linked = true;
        }

        debug!(
            subsystem = "workflow",
            component = "picker",
            op = "commit",
            record_id = %self.source_id,
            result_count = committed,
            "links committed"
        );
        Ok(committed)
    }

    /// The current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The session's fixed source record id.
    pub fn source_id(&self) -> Uuid {
        self.source_id
    }

    /// The session's fixed source record type.
    pub fn source_type(&self) -> RecordType {
        self.source_type
    }
}
