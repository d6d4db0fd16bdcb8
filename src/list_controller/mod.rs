//! # List Controller
//!
//! Owns the paginated, searchable product list: current page, page size,
//! total count, loading flag, and the fetched items.
//!
//! ## Structure
//!
//! - [`state`] - [`ListState`] and its pure reducers
//! - [`ListController`] - the actor task that owns the state
//! - [`ListHandle`] - cloneable front door for user intents
//! - [`new()`] - factory that creates the pair
//!
//! ## Fetch Protocol
//!
//! Every load gets a monotonically increasing sequence number and runs in
//! its own task; completions come back over an internal settlement channel.
//! A settlement is applied only if its sequence number is the most recently
//! issued one - older results are dropped silently, so result application
//! is ordered by *issue*, not by *completion*. That check is what stands in
//! for a lock: multiple loads may be in flight (a pagination click chased
//! by a debounced search), but the state only ever reflects the newest.
//!
//! In-flight requests are never forcibly aborted; going stale just means
//! their result is ignored on arrival.

pub mod state;

pub use state::{ListState, DEFAULT_PAGE_SIZE};

use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::debounce::{Debouncer, SEARCH_DEBOUNCE};
use crate::error::ControllerError;
use crate::gateway::{GatewayError, ListQuery, SharedGateway};
use crate::model::ProductPage;
use crate::notify::{Notification, NotificationSink};

/// User intents accepted by the list controller.
#[derive(Debug)]
pub enum ListCommand {
    /// Fetch `page` at `page_size` filtered by `search`.
    Load {
        page: u64,
        page_size: u64,
        search: String,
    },
    /// Pagination click; keeps the currently applied search term.
    PageChange { page: u64, page_size: u64 },
    /// A settled (post-debounce) search emission. Always loads page 1:
    /// a new filter invalidates the old page cursor.
    SearchSettled { term: String },
    /// Reload the current page/size/term, e.g. after a successful submit.
    Refresh,
    /// Read the current state.
    Snapshot {
        respond_to: oneshot::Sender<ListState>,
    },
}

/// Completion of one issued fetch, reported by its task.
#[derive(Debug)]
struct Settlement {
    seq: u64,
    search: String,
    outcome: Result<ProductPage, GatewayError>,
}

/// Dependencies injected into [`ListController::run`].
pub struct ListContext {
    pub gateway: SharedGateway,
    pub notifications: NotificationSink,
}

/// The actor task owning [`ListState`].
pub struct ListController {
    commands: mpsc::Receiver<ListCommand>,
    settlements: mpsc::Receiver<Settlement>,
    settle_tx: mpsc::Sender<Settlement>,
    state: ListState,
    // Sequence number of the most recently issued fetch.
    issued_seq: u64,
}

/// Creates a new list controller and its handle.
pub fn new(buffer_size: usize) -> (ListController, ListHandle) {
    let (cmd_tx, cmd_rx) = mpsc::channel(buffer_size);
    let (settle_tx, settle_rx) = mpsc::channel(buffer_size);
    let controller = ListController {
        commands: cmd_rx,
        settlements: settle_rx,
        settle_tx,
        state: ListState::default(),
        issued_seq: 0,
    };
    let handle = ListHandle {
        debounce: Arc::new(Debouncer::new(SEARCH_DEBOUNCE, cmd_tx.clone())),
        sender: cmd_tx,
    };
    (controller, handle)
}

impl ListController {
    /// Runs the controller loop until every handle is dropped.
    ///
    /// Commands and settlements are interleaved on one task, so all state
    /// transitions are synchronous and atomic with respect to this loop.
    pub async fn run(mut self, ctx: ListContext) {
        info!("List controller started");
        loop {
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd, &ctx),
                    None => break,
                },
                Some(settlement) = self.settlements.recv() => {
                    self.handle_settlement(settlement, &ctx);
                }
            }
        }
        info!(page = self.state.page, "List controller shut down");
    }

    fn handle_command(&mut self, cmd: ListCommand, ctx: &ListContext) {
        match cmd {
            ListCommand::Load {
                page,
                page_size,
                search,
            } => self.dispatch(page, page_size, search, ctx),
            ListCommand::PageChange { page, page_size } => {
                let term = self.state.search_term.clone();
                self.dispatch(page, page_size, term, ctx);
            }
            ListCommand::SearchSettled { term } => {
                self.dispatch(1, self.state.page_size, term, ctx);
            }
            ListCommand::Refresh => {
                let term = self.state.search_term.clone();
                self.dispatch(self.state.page, self.state.page_size, term, ctx);
            }
            ListCommand::Snapshot { respond_to } => {
                let _ = respond_to.send(self.state.clone());
            }
        }
    }

    /// Issues a sequence-stamped fetch and flips `loading` on.
    fn dispatch(&mut self, page: u64, page_size: u64, search: String, ctx: &ListContext) {
        self.issued_seq += 1;
        let seq = self.issued_seq;
        self.state.loading = true;
        debug!(seq, page, page_size, search = %search, "Dispatching fetch");

        let gateway = ctx.gateway.clone();
        let settle_tx = self.settle_tx.clone();
        tokio::spawn(async move {
            let outcome = gateway
                .list(ListQuery::new(page, page_size, search.clone()))
                .await;
            // Controller gone means nobody cares about this result.
            let _ = settle_tx
                .send(Settlement {
                    seq,
                    search,
                    outcome,
                })
                .await;
        });
    }

    fn handle_settlement(&mut self, settlement: Settlement, ctx: &ListContext) {
        if settlement.seq != self.issued_seq {
            // Expected concurrency outcome, not an error: a newer fetch
            // superseded this one while it was in flight.
            debug!(
                seq = settlement.seq,
                latest = self.issued_seq,
                "Dropping stale settlement"
            );
            return;
        }
        match settlement.outcome {
            Ok(page) => {
                info!(
                    seq = settlement.seq,
                    page = page.pagination.page,
                    total = page.pagination.total,
                    items = page.data.len(),
                    "List reconciled"
                );
                self.state.apply_success(&settlement.search, page);
            }
            Err(error) => {
                warn!(seq = settlement.seq, %error, "List fetch failed");
                self.state.apply_failure();
                ctx.notifications.push(Notification::error(
                    "Failed to load products",
                    "Could not fetch the product list from the server.",
                ));
            }
        }
    }
}

/// Cloneable front door to the list controller.
///
/// Raw search keystrokes go through [`ListHandle::search`], which debounces
/// them; every other intent is forwarded to the controller directly.
#[derive(Clone)]
pub struct ListHandle {
    sender: mpsc::Sender<ListCommand>,
    debounce: Arc<Debouncer<ListCommand>>,
}

impl ListHandle {
    /// Fetches `page` at `page_size` filtered by `search`.
    #[instrument(skip(self))]
    pub async fn load(
        &self,
        page: u64,
        page_size: u64,
        search: &str,
    ) -> Result<(), ControllerError> {
        debug!("Sending request");
        self.sender
            .send(ListCommand::Load {
                page,
                page_size,
                search: search.to_string(),
            })
            .await
            .map_err(|_| ControllerError::Closed)
    }

    /// Pagination click; the currently applied search term is kept.
    #[instrument(skip(self))]
    pub async fn page_change(&self, page: u64, page_size: u64) -> Result<(), ControllerError> {
        debug!("Sending request");
        self.sender
            .send(ListCommand::PageChange { page, page_size })
            .await
            .map_err(|_| ControllerError::Closed)
    }

    /// Feeds one raw search keystroke into the debounce window.
    ///
    /// Synchronous: the committed load is issued by the controller once the
    /// idle window elapses with no further input.
    pub fn search(&self, text: impl Into<String>) {
        self.debounce.schedule(ListCommand::SearchSettled { term: text.into() });
    }

    /// Aborts a pending (not yet settled) search emission. Used at
    /// teardown; in-flight fetches are not aborted, only ignored.
    pub fn cancel_pending_search(&self) {
        self.debounce.cancel();
    }

    /// Reloads the current page with the currently applied filter.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), ControllerError> {
        debug!("Sending request");
        self.sender
            .send(ListCommand::Refresh)
            .await
            .map_err(|_| ControllerError::Closed)
    }

    /// Reads the current list state.
    pub async fn snapshot(&self) -> Result<ListState, ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ListCommand::Snapshot { respond_to })
            .await
            .map_err(|_| ControllerError::Closed)?;
        response.await.map_err(|_| ControllerError::Dropped)
    }
}
