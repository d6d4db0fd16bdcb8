//! # Form Controller
//!
//! Owns the create/edit modal lifecycle: mode, draft, field errors, and the
//! duplicate-submit guard.
//!
//! ## Structure
//!
//! - [`state`] - [`FormState`], [`FormMode`], and local validation
//! - [`FormController`] - the actor task that owns the state
//! - [`FormHandle`] - cloneable front door for user intents
//! - [`new()`] - factory that creates the pair
//!
//! ## Submit Flow
//!
//! Validation runs locally first; a draft that fails never reaches the
//! gateway and only populates field-level errors. A valid draft flips
//! `submitting` on and dispatches the mutation (update carrying the edit
//! target's id, create otherwise) in its own task. On gateway success the
//! form closes, a success notification is emitted, and the list controller
//! is asked to refresh its current page exactly once. On gateway failure
//! the form stays open with the draft intact so the user can simply
//! resubmit.

pub mod state;

pub use state::{validate, FieldError, FormMode, FormState};

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

use crate::error::ControllerError;
use crate::gateway::{GatewayError, SharedGateway};
use crate::list_controller::ListHandle;
use crate::model::{Product, ProductDraft};
use crate::notify::{Notification, NotificationSink};

/// User intents accepted by the form controller.
#[derive(Debug)]
pub enum FormCommand {
    /// Open the modal in create mode with an empty draft.
    OpenCreate,
    /// Open the modal in edit mode, seeding the draft from the target.
    OpenEdit(Product),
    /// Close the modal, discarding unsaved draft edits unconditionally.
    Close,
    /// Validate and submit the given field values.
    Submit(ProductDraft),
    /// Read the current state.
    Snapshot {
        respond_to: oneshot::Sender<FormState>,
    },
}

#[derive(Debug, Clone, Copy)]
enum MutationKind {
    Created,
    Updated,
}

/// Completion of one dispatched mutation, reported by its task.
#[derive(Debug)]
struct Settlement {
    kind: MutationKind,
    outcome: Result<Product, GatewayError>,
}

/// Dependencies injected into [`FormController::run`].
pub struct FormContext {
    pub gateway: SharedGateway,
    pub list: ListHandle,
    pub notifications: NotificationSink,
}

/// The actor task owning [`FormState`].
pub struct FormController {
    commands: mpsc::Receiver<FormCommand>,
    settlements: mpsc::Receiver<Settlement>,
    settle_tx: mpsc::Sender<Settlement>,
    state: FormState,
}

/// Creates a new form controller and its handle.
pub fn new(buffer_size: usize) -> (FormController, FormHandle) {
    let (cmd_tx, cmd_rx) = mpsc::channel(buffer_size);
    let (settle_tx, settle_rx) = mpsc::channel(buffer_size);
    let controller = FormController {
        commands: cmd_rx,
        settlements: settle_rx,
        settle_tx,
        state: FormState::default(),
    };
    (controller, FormHandle { sender: cmd_tx })
}

impl FormController {
    /// Runs the controller loop until every handle is dropped.
    pub async fn run(mut self, ctx: FormContext) {
        info!("Form controller started");
        loop {
            tokio::select! {
                cmd = self.commands.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd, &ctx),
                    None => break,
                },
                Some(settlement) = self.settlements.recv() => {
                    self.handle_settlement(settlement, &ctx).await;
                }
            }
        }
        info!("Form controller shut down");
    }

    fn handle_command(&mut self, cmd: FormCommand, ctx: &FormContext) {
        match cmd {
            FormCommand::OpenCreate => {
                debug!("Opening create form");
                self.state = FormState::open_create();
            }
            FormCommand::OpenEdit(product) => {
                debug!(id = %product.id, "Opening edit form");
                self.state = FormState::open_edit(product);
            }
            FormCommand::Close => {
                debug!("Closing form");
                self.state = FormState::default();
            }
            FormCommand::Submit(draft) => self.handle_submit(draft, ctx),
            FormCommand::Snapshot { respond_to } => {
                let _ = respond_to.send(self.state.clone());
            }
        }
    }

    fn handle_submit(&mut self, draft: ProductDraft, ctx: &FormContext) {
        if self.state.mode == FormMode::Closed {
            warn!("Submit with no open form; ignoring");
            return;
        }
        if self.state.submitting {
            warn!("Submit while a submit is in flight; ignoring");
            return;
        }

        self.state.draft = draft;
        let fields = match validate(&self.state.draft) {
            Ok(fields) => fields,
            Err(errors) => {
                debug!(count = errors.len(), "Validation failed; gateway not contacted");
                self.state.field_errors = errors;
                return;
            }
        };

        self.state.field_errors.clear();
        self.state.submitting = true;

        let gateway = ctx.gateway.clone();
        let settle_tx = self.settle_tx.clone();
        match &self.state.mode {
            FormMode::Edit(target) => {
                let id = target.id.clone();
                debug!(%id, "Dispatching update");
                tokio::spawn(async move {
                    let outcome = gateway.update(&id, fields).await;
                    let _ = settle_tx
                        .send(Settlement {
                            kind: MutationKind::Updated,
                            outcome,
                        })
                        .await;
                });
            }
            FormMode::Create => {
                debug!("Dispatching create");
                tokio::spawn(async move {
                    let outcome = gateway.create(fields).await;
                    let _ = settle_tx
                        .send(Settlement {
                            kind: MutationKind::Created,
                            outcome,
                        })
                        .await;
                });
            }
            FormMode::Closed => unreachable!("guarded above"),
        }
    }

    async fn handle_settlement(&mut self, settlement: Settlement, ctx: &FormContext) {
        match settlement.outcome {
            Ok(product) => {
                let verb = match settlement.kind {
                    MutationKind::Created => "created",
                    MutationKind::Updated => "updated",
                };
                info!(id = %product.id, verb, "Product saved");
                self.state = FormState::default();
                ctx.notifications.push(Notification::success(
                    "Success",
                    format!("Product {} successfully.", verb),
                ));
                // Refresh the visible page; the list reuses its own applied
                // page/size/term, so a term still sitting in the debounce
                // window does not leak in.
                if ctx.list.refresh().await.is_err() {
                    warn!("List controller gone; skipping refresh");
                }
            }
            Err(error) => {
                warn!(%error, "Mutation failed; form stays open for retry");
                self.state.submitting = false;
                ctx.notifications.push(Notification::error(
                    "Failed to save product",
                    "An error occurred while saving the product.",
                ));
            }
        }
    }
}

/// Cloneable front door to the form controller.
#[derive(Clone)]
pub struct FormHandle {
    sender: mpsc::Sender<FormCommand>,
}

impl FormHandle {
    /// Opens the modal in create mode with an empty draft.
    #[instrument(skip(self))]
    pub async fn open_create(&self) -> Result<(), ControllerError> {
        debug!("Sending request");
        self.sender
            .send(FormCommand::OpenCreate)
            .await
            .map_err(|_| ControllerError::Closed)
    }

    /// Opens the modal in edit mode for `product`.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn open_edit(&self, product: Product) -> Result<(), ControllerError> {
        debug!("Sending request");
        self.sender
            .send(FormCommand::OpenEdit(product))
            .await
            .map_err(|_| ControllerError::Closed)
    }

    /// Closes the modal, discarding unsaved edits.
    #[instrument(skip(self))]
    pub async fn close(&self) -> Result<(), ControllerError> {
        debug!("Sending request");
        self.sender
            .send(FormCommand::Close)
            .await
            .map_err(|_| ControllerError::Closed)
    }

    /// Validates and submits `draft`.
    #[instrument(skip(self, draft))]
    pub async fn submit(&self, draft: ProductDraft) -> Result<(), ControllerError> {
        debug!("Sending request");
        self.sender
            .send(FormCommand::Submit(draft))
            .await
            .map_err(|_| ControllerError::Closed)
    }

    /// Reads the current form state.
    pub async fn snapshot(&self) -> Result<FormState, ControllerError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(FormCommand::Snapshot { respond_to })
            .await
            .map_err(|_| ControllerError::Closed)?;
        response.await.map_err(|_| ControllerError::Dropped)
    }
}
