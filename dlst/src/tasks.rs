//! Tasks tied to the lifetime of the component that spawned them.
//!
//! A [`TaskScope`] owns the abort handles of everything it spawns and aborts
//! them when dropped. Completions are delivered as [`Envelope`]s stamped with
//! the scope's id, so a receiver can discard anything from a scope it no
//! longer owns. Together these make a completion after teardown a no-op.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one [`TaskScope`] for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u64);

impl ScopeId {
    fn next() -> Self {
        Self(NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A task's output, addressed to the scope that spawned it.
#[derive(Debug)]
pub struct Envelope<E> {
    pub scope: ScopeId,
    pub event: E,
}

pub type EventSender<E> = mpsc::UnboundedSender<Envelope<E>>;
pub type EventReceiver<E> = mpsc::UnboundedReceiver<Envelope<E>>;

pub struct TaskScope<E> {
    id: ScopeId,
    tx: EventSender<E>,
    handles: Vec<AbortHandle>,
}

impl<E: Send + 'static> TaskScope<E> {
    pub fn new(tx: EventSender<E>) -> Self {
        Self {
            id: ScopeId::next(),
            tx,
            handles: Vec::new(),
        }
    }

    pub fn id(&self) -> ScopeId {
        self.id
    }

    pub fn owns<T>(&self, envelope: &Envelope<T>) -> bool {
        envelope.scope == self.id
    }

    /// Run `future` on the runtime and deliver its output to this scope's
    /// receiver. Must be called from within a tokio runtime.
    pub fn spawn<F>(&mut self, future: F)
    where
        F: Future<Output = E> + Send + 'static,
    {
        let tx = self.tx.clone();
        let scope = self.id;
        let handle = tokio::spawn(async move {
            let event = future.await;
            if tx.send(Envelope { scope, event }).is_err() {
                log::debug!("receiver gone, dropping completion for {scope:?}");
            }
        });
        self.handles.retain(|h| !h.is_finished());
        self.handles.push(handle.abort_handle());
    }

    /// A fresh scope on the same channel, with its own id.
    pub fn child(&self) -> TaskScope<E> {
        TaskScope::new(self.tx.clone())
    }
}

impl<E> Drop for TaskScope<E> {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

impl<E> std::fmt::Debug for TaskScope<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskScope")
            .field("id", &self.id)
            .field("tasks", &self.handles.len())
            .finish()
    }
}
