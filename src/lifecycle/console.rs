//! Wiring and lifecycle of the whole console.

use tokio::sync::mpsc;
use tracing::{error, info};

use crate::error::ControllerError;
use crate::form_controller::{self, FormContext, FormHandle};
use crate::gateway::SharedGateway;
use crate::list_controller::{self, ListContext, ListHandle, DEFAULT_PAGE_SIZE};
use crate::notify::{self, Notification};

const COMMAND_BUFFER: usize = 32;

/// The assembled product-catalog console.
///
/// `CatalogConsole` is responsible for:
/// - spawning the list and form controller tasks
/// - injecting their dependencies (gateway, notification sink, and the
///   list handle the form controller refreshes through)
/// - issuing the initial list load
/// - shutting everything down gracefully
///
/// The view binder drives `list` and `form` and drains `notifications`.
pub struct CatalogConsole {
    pub list: ListHandle,
    pub form: FormHandle,
    pub notifications: mpsc::UnboundedReceiver<Notification>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogConsole {
    /// Builds the console and issues the initial load of page 1 at the
    /// default page size.
    pub async fn new(gateway: SharedGateway) -> Result<Self, ControllerError> {
        Self::with_page_size(gateway, DEFAULT_PAGE_SIZE).await
    }

    pub async fn with_page_size(
        gateway: SharedGateway,
        page_size: u64,
    ) -> Result<Self, ControllerError> {
        let (sink, notifications) = notify::channel();

        let (list_controller, list) = list_controller::new(COMMAND_BUFFER);
        let (form_controller, form) = form_controller::new(COMMAND_BUFFER);

        // Contexts are injected at run time, not construction time: the
        // form controller needs a list handle that only exists now.
        let list_task = tokio::spawn(list_controller.run(ListContext {
            gateway: gateway.clone(),
            notifications: sink.clone(),
        }));
        let form_task = tokio::spawn(form_controller.run(FormContext {
            gateway,
            list: list.clone(),
            notifications: sink,
        }));

        list.load(1, page_size, "").await?;

        Ok(Self {
            list,
            form,
            notifications,
            handles: vec![list_task, form_task],
        })
    }

    /// Gracefully shuts the console down.
    ///
    /// Cancels any pending debounced search, then drops the handles so the
    /// controller loops see their command channels close and exit. Results
    /// of fetches still in flight are discarded, matching teardown
    /// semantics: requests are never forcibly aborted, only ignored.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down console...");

        self.list.cancel_pending_search();
        drop(self.list);
        drop(self.form);
        drop(self.notifications);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Controller task failed: {:?}", e);
                return Err(format!("Controller task failed: {:?}", e));
            }
        }

        info!("Console shutdown complete.");
        Ok(())
    }
}
