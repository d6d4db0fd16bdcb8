//! Expectation-driven gateway double for controller tests.
//!
//! # Testing Strategy
//!
//! Controller tests should not spin up a backend just to exercise list and
//! form logic. `MockGateway` queues canned replies through a fluent builder
//! API and records every call it receives, so a test can assert both what
//! was asked and how the controller reconciled the answer.
//!
//! Replies come in two flavors:
//! - **ready**: returned as soon as the call arrives
//!   (`expect_list().return_ok(page)`).
//! - **deferred**: the call suspends until the test resolves a handle
//!   (`expect_list().defer()`), which is how completion *order* is
//!   controlled when exercising the stale-response rule.
//!
//! Call [`MockGateway::verify`] at the end of a test to assert every queued
//! expectation was consumed.
//!
//! # Example
//! ```ignore
//! let mock = Arc::new(MockGateway::new());
//! mock.expect_list().return_ok(page_one);
//! let slow = mock.expect_list().defer();
//! // ... drive the controller ...
//! slow.resolve_ok(late_page);
//! mock.verify();
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

use super::{GatewayError, ListQuery, ProductGateway};
use crate::model::{Product, ProductFields, ProductPage};

enum Reply<T> {
    Ready(Result<T, GatewayError>),
    Deferred(oneshot::Receiver<Result<T, GatewayError>>),
}

impl<T> Reply<T> {
    async fn settle(self) -> Result<T, GatewayError> {
        match self {
            Reply::Ready(result) => result,
            // A dropped resolver means the test ended; report a transport
            // failure rather than hanging.
            Reply::Deferred(rx) => rx.await.unwrap_or_else(|_| Err(GatewayError::transport())),
        }
    }
}

/// Resolver handle for a deferred reply. The gateway call stays suspended
/// until one of the `resolve_*` methods is invoked.
pub struct DeferredReply<T> {
    tx: oneshot::Sender<Result<T, GatewayError>>,
}

impl<T> DeferredReply<T> {
    pub fn resolve_ok(self, value: T) {
        let _ = self.tx.send(Ok(value));
    }

    pub fn resolve_err(self, error: GatewayError) {
        let _ = self.tx.send(Err(error));
    }
}

/// Builder for one queued expectation.
pub struct ExpectationBuilder<'a, T> {
    queue: &'a Mutex<VecDeque<Reply<T>>>,
}

impl<'a, T> ExpectationBuilder<'a, T> {
    pub fn return_ok(self, value: T) {
        self.queue.lock().unwrap().push_back(Reply::Ready(Ok(value)));
    }

    pub fn return_err(self, error: GatewayError) {
        self.queue.lock().unwrap().push_back(Reply::Ready(Err(error)));
    }

    /// Queues a reply the test resolves later, controlling completion order.
    pub fn defer(self) -> DeferredReply<T> {
        let (tx, rx) = oneshot::channel();
        self.queue.lock().unwrap().push_back(Reply::Deferred(rx));
        DeferredReply { tx }
    }
}

#[derive(Default)]
pub struct MockGateway {
    list_replies: Mutex<VecDeque<Reply<ProductPage>>>,
    get_replies: Mutex<VecDeque<Reply<Product>>>,
    create_replies: Mutex<VecDeque<Reply<Product>>>,
    update_replies: Mutex<VecDeque<Reply<Product>>>,

    list_calls: Mutex<Vec<ListQuery>>,
    create_calls: Mutex<Vec<ProductFields>>,
    update_calls: Mutex<Vec<(String, ProductFields)>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_list(&self) -> ExpectationBuilder<'_, ProductPage> {
        ExpectationBuilder { queue: &self.list_replies }
    }

    pub fn expect_get(&self) -> ExpectationBuilder<'_, Product> {
        ExpectationBuilder { queue: &self.get_replies }
    }

    pub fn expect_create(&self) -> ExpectationBuilder<'_, Product> {
        ExpectationBuilder { queue: &self.create_replies }
    }

    pub fn expect_update(&self) -> ExpectationBuilder<'_, Product> {
        ExpectationBuilder { queue: &self.update_replies }
    }

    /// Every `list` call received so far, in arrival order.
    pub fn list_calls(&self) -> Vec<ListQuery> {
        self.list_calls.lock().unwrap().clone()
    }

    /// Every `create` payload received so far.
    pub fn create_calls(&self) -> Vec<ProductFields> {
        self.create_calls.lock().unwrap().clone()
    }

    /// Every `update` call received so far as `(id, fields)`.
    pub fn update_calls(&self) -> Vec<(String, ProductFields)> {
        self.update_calls.lock().unwrap().clone()
    }

    /// Panics if any queued expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self.list_replies.lock().unwrap().len()
            + self.get_replies.lock().unwrap().len()
            + self.create_replies.lock().unwrap().len()
            + self.update_replies.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn take<T>(queue: &Mutex<VecDeque<Reply<T>>>, operation: &str) -> Reply<T> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("Unexpected {} call: no expectation queued", operation))
    }
}

#[async_trait]
impl ProductGateway for MockGateway {
    async fn list(&self, query: ListQuery) -> Result<ProductPage, GatewayError> {
        self.list_calls.lock().unwrap().push(query);
        Self::take(&self.list_replies, "list").settle().await
    }

    async fn get(&self, _id: &str) -> Result<Product, GatewayError> {
        Self::take(&self.get_replies, "get").settle().await
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, GatewayError> {
        self.create_calls.lock().unwrap().push(fields);
        Self::take(&self.create_replies, "create").settle().await
    }

    async fn update(&self, id: &str, fields: ProductFields) -> Result<Product, GatewayError> {
        self.update_calls
            .lock()
            .unwrap()
            .push((id.to_string(), fields));
        Self::take(&self.update_replies, "update").settle().await
    }
}
