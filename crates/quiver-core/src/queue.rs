//! The global FIFO work queue.
//!
//! Deferred operations are boxed tasks executed in submission order by a
//! single background worker thread. Submission is non-blocking; `sync()` is
//! the materialization barrier, blocking the calling thread until every
//! previously enqueued task has run and reporting the first task failure
//! recorded since the last barrier. There is no cancellation and no timeout:
//! once queued, a task always runs to completion. Panics inside a task are
//! caught and recorded as failures, so the worker outlives a buggy kernel.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, LazyLock, Mutex};
use std::thread;

use tracing::debug;

use crate::{Error, Result};

type Task = Box<dyn FnOnce() -> Result<()> + Send + 'static>;

/// Run one task, converting a panic into a recorded failure. A panicking
/// task must not take the worker thread down with it: the queue is a
/// process-wide singleton and has to keep serving later submissions.
fn run_task(task: Task) -> Option<Error> {
    match panic::catch_unwind(AssertUnwindSafe(task)) {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e),
        Err(_) => Some(Error::Queue("task panicked")),
    }
}

enum Message {
    Run(Task),
    Barrier(Sender<()>),
}

/// Single-consumer ordered task queue.
///
/// Tasks run strictly in submission order, which is what gives enqueued
/// operations their happens-before relationship: a task reading an array
/// written by an earlier task never observes unpopulated storage.
pub struct AsyncQueue {
    tx: Mutex<Sender<Message>>,
    failure: Arc<Mutex<Option<Error>>>,
    synchronous: bool,
}

impl AsyncQueue {
    fn new() -> Self {
        let (tx, rx) = mpsc::channel::<Message>();
        let failure: Arc<Mutex<Option<Error>>> = Arc::new(Mutex::new(None));
        let worker_failure = Arc::clone(&failure);

        thread::Builder::new()
            .name("quiver-queue".into())
            .spawn(move || {
                for msg in rx {
                    match msg {
                        Message::Run(task) => {
                            if let Some(e) = run_task(task) {
                                debug!(error = %e, "queued task failed");
                                let mut slot = worker_failure.lock().unwrap();
                                if slot.is_none() {
                                    *slot = Some(e);
                                }
                            }
                        }
                        Message::Barrier(ack) => {
                            let _ = ack.send(());
                        }
                    }
                }
            })
            .expect("failed to spawn queue worker");

        Self {
            tx: Mutex::new(tx),
            failure,
            synchronous: synchronous_from_env(),
        }
    }

    /// Submit a task. Returns immediately; the task runs in submission order
    /// on the worker thread.
    ///
    /// With `QUIVER_SYNCHRONOUS=1` the task instead runs inline on the
    /// calling thread. Failures are still deferred to `sync()` so the error
    /// surface is identical in both modes.
    pub fn enqueue(&self, task: Task) -> Result<()> {
        if self.synchronous {
            if let Some(e) = run_task(task) {
                let mut slot = self.failure.lock().unwrap();
                if slot.is_none() {
                    *slot = Some(e);
                }
            }
            return Ok(());
        }
        debug!("task enqueued");
        self.tx
            .lock()
            .unwrap()
            .send(Message::Run(task))
            .map_err(|_| Error::Queue("worker thread exited"))
    }

    /// Block until every task enqueued before this call has completed.
    ///
    /// The first task failure recorded since the last barrier is taken and
    /// returned here, exactly once; a later `sync()` sees success again.
    pub fn sync(&self) -> Result<()> {
        if !self.synchronous {
            let (ack_tx, ack_rx) = mpsc::channel();
            self.tx
                .lock()
                .unwrap()
                .send(Message::Barrier(ack_tx))
                .map_err(|_| Error::Queue("worker thread exited"))?;
            ack_rx
                .recv()
                .map_err(|_| Error::Queue("worker thread exited"))?;
        }
        match self.failure.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn synchronous_from_env() -> bool {
    std::env::var("QUIVER_SYNCHRONOUS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

static QUEUE: LazyLock<AsyncQueue> = LazyLock::new(AsyncQueue::new);

/// The process-wide work queue all deferred operations run on.
pub fn queue() -> &'static AsyncQueue {
    &QUEUE
}
