// prose-core-client/prose-contacts
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll, Waker};

use parking_lot::Mutex;
use tracing::error;

use super::OperationError;

type Continuation<T> = Box<dyn FnOnce(&Result<T, OperationError>) + Send>;

/// A one-shot result container for an operation that is still in progress.
///
/// A `PendingOperation` starts out pending and transitions exactly once into either a succeeded
/// or a failed state. Clones share the same state, so the side completing the operation and any
/// number of observers can each hold their own handle. Observers can either register a
/// continuation via `on_finished` or simply `.await` the operation.
///
/// Continuations are invoked synchronously on the context that finishes the operation and never
/// while the internal lock is held, so they may freely register further continuations or finish
/// other operations.
pub struct PendingOperation<T> {
    state: Arc<Mutex<OperationState<T>>>,
}

struct OperationState<T> {
    result: Option<Result<T, OperationError>>,
    continuations: Vec<Continuation<T>>,
    wakers: Vec<Waker>,
}

impl<T> Clone for PendingOperation<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> PendingOperation<T>
where
    T: Clone + Send + 'static,
{
    pub fn new() -> Self {
        PendingOperation {
            state: Arc::new(Mutex::new(OperationState {
                result: None,
                continuations: vec![],
                wakers: vec![],
            })),
        }
    }

    /// Returns an operation that has already succeeded with `value`.
    pub fn ready(value: T) -> Self {
        let op = Self::new();
        op.set_finished(value);
        op
    }

    /// Returns an operation that has already failed with `err`.
    pub fn failed(err: OperationError) -> Self {
        let op = Self::new();
        op.set_finished_with_error(err);
        op
    }

    pub fn is_finished(&self) -> bool {
        self.state.lock().result.is_some()
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.state.lock().result, Some(Ok(_)))
    }

    pub fn is_error(&self) -> bool {
        matches!(self.state.lock().result, Some(Err(_)))
    }

    pub fn error(&self) -> Option<OperationError> {
        match &self.state.lock().result {
            Some(Err(err)) => Some(err.clone()),
            _ => None,
        }
    }

    /// Returns the outcome of the operation or `None` while it is still pending.
    pub fn result(&self) -> Option<Result<T, OperationError>> {
        self.state.lock().result.clone()
    }

    pub fn set_finished(&self, value: T) {
        self.finish(Ok(value))
    }

    pub fn set_finished_with_error(&self, err: OperationError) {
        self.finish(Err(err))
    }

    /// Registers `continuation` to be called once the operation finished. If the operation has
    /// finished already, `continuation` is called right away.
    pub fn on_finished<F>(&self, continuation: F)
    where
        F: FnOnce(&Result<T, OperationError>) + Send + 'static,
    {
        let result = {
            let mut state = self.state.lock();
            let Some(result) = state.result.clone() else {
                state.continuations.push(Box::new(continuation));
                return;
            };
            result
        };
        continuation(&result)
    }

    /// Returns a new operation that finishes with the transformed outcome of this one.
    pub fn map_result<U, F>(&self, transform: F) -> PendingOperation<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(Result<T, OperationError>) -> Result<U, OperationError> + Send + 'static,
    {
        let mapped = PendingOperation::new();
        let target = mapped.clone();
        self.on_finished(move |result| target.finish(transform(result.clone())));
        mapped
    }

    pub fn map<U, F>(&self, transform: F) -> PendingOperation<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.map_result(move |result| result.map(transform))
    }

    /// Chains a second stage onto this operation. The returned operation succeeds or fails with
    /// the operation returned by `next`, or fails right away with this operation's error.
    pub fn and_then<U, F>(&self, next: F) -> PendingOperation<U>
    where
        U: Clone + Send + 'static,
        F: FnOnce(T) -> PendingOperation<U> + Send + 'static,
    {
        let combined = PendingOperation::new();
        let target = combined.clone();
        self.on_finished(move |result| match result {
            Ok(value) => next(value.clone()).on_finished(move |result| target.finish(result.clone())),
            Err(err) => target.finish(Err(err.clone())),
        });
        combined
    }

    fn finish(&self, result: Result<T, OperationError>) {
        let (continuations, wakers) = {
            let mut state = self.state.lock();
            let already_finished = state.result.is_some();

            if already_finished {
                drop(state);
                error!("Tried to finish a PendingOperation which had finished already.");
                debug_assert!(!already_finished, "PendingOperation finished twice");
                return;
            }

            state.result = Some(result.clone());
            (
                std::mem::take(&mut state.continuations),
                std::mem::take(&mut state.wakers),
            )
        };

        for continuation in continuations {
            continuation(&result)
        }
        for waker in wakers {
            waker.wake()
        }
    }
}

impl<T> Default for PendingOperation<T>
where
    T: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Future for PendingOperation<T>
where
    T: Clone + Send + 'static,
{
    type Output = Result<T, OperationError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.state.lock();

        if let Some(result) = &state.result {
            return Poll::Ready(result.clone());
        }

        if !state.wakers.iter().any(|waker| waker.will_wake(cx.waker())) {
            state.wakers.push(cx.waker().clone());
        }
        Poll::Pending
    }
}

impl<T> Debug for PendingOperation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        match &state.result {
            None => write!(f, "PendingOperation(pending)"),
            Some(Ok(_)) => write!(f, "PendingOperation(succeeded)"),
            Some(Err(err)) => write!(f, "PendingOperation(failed: {})", err),
        }
    }
}
