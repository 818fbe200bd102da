use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::render::{RenderError, RenderTicket, Renderer};

/// A render request handed to the worker thread.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub ticket: RenderTicket,
    pub source: String,
}

/// A finished render coming back from the worker thread.
#[derive(Debug)]
pub struct RenderResult {
    pub ticket: RenderTicket,
    pub result: Result<String, RenderError>,
}

/// Runs a [`Renderer`] on a background thread.
///
/// Jobs that queue up while a render is in flight are coalesced: the worker
/// only renders the newest one, since older results would be discarded as
/// stale anyway. Results come back in completion order; feed them into
/// [`RenderQueue::complete`](crate::render::RenderQueue::complete).
///
/// Dropping the worker while a render is in flight detaches the thread
/// rather than waiting for the renderer to return.
pub struct RenderWorker {
    jobs: Option<Sender<RenderJob>>,
    results: Receiver<RenderResult>,
    handle: Option<JoinHandle<()>>,
    state: Arc<WorkerState>,
}

#[derive(Debug, Default)]
struct WorkerState {
    busy: AtomicBool,
    shutdown: AtomicBool,
}

impl RenderWorker {
    pub fn spawn<R>(renderer: R) -> Self
    where
        R: Renderer + Send + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel::<RenderJob>();
        let (result_tx, result_rx) = mpsc::channel();
        let state = Arc::new(WorkerState::default());
        let worker_state = Arc::clone(&state);

        let handle = thread::spawn(move || {
            while let Ok(mut job) = job_rx.recv() {
                while let Ok(newer) = job_rx.try_recv() {
                    log::debug!(
                        "render #{} superseded by #{}",
                        job.ticket.seq(),
                        newer.ticket.seq()
                    );
                    job = newer;
                }

                worker_state.busy.store(true, Ordering::SeqCst);
                if worker_state.shutdown.load(Ordering::SeqCst) {
                    break;
                }
                let result = renderer.render(&job.source);
                worker_state.busy.store(false, Ordering::SeqCst);

                if result_tx
                    .send(RenderResult {
                        ticket: job.ticket,
                        result,
                    })
                    .is_err()
                {
                    break;
                }
            }
            log::debug!("render worker stopped");
        });

        Self {
            jobs: Some(job_tx),
            results: result_rx,
            handle: Some(handle),
            state,
        }
    }

    /// Queue a render of `source`.
    pub fn submit(&self, ticket: RenderTicket, source: String) -> Result<(), RenderError> {
        let jobs = self.jobs.as_ref().ok_or(RenderError::WorkerGone)?;
        jobs.send(RenderJob { ticket, source })
            .map_err(|_| RenderError::WorkerGone)
    }

    /// True while the worker thread is alive.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Take a finished render without blocking.
    pub fn try_recv(&self) -> Option<RenderResult> {
        self.results.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished render.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<RenderResult> {
        match self.results.recv_timeout(timeout) {
            Ok(result) => Some(result),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

impl Drop for RenderWorker {
    fn drop(&mut self) {
        self.state.shutdown.store(true, Ordering::SeqCst);
        // Closing the job channel ends the worker loop
        self.jobs.take();
        let Some(handle) = self.handle.take() else {
            return;
        };

        if self.state.busy.load(Ordering::SeqCst) {
            // The thread exits once the renderer returns and the result
            // channel is found closed
            log::debug!("detaching render worker with a render in flight");
            return;
        }
        if handle.join().is_err() {
            log::error!("render worker panicked");
        }
    }
}
