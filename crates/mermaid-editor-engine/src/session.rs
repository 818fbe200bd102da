use std::ops::Range;
use std::time::{Duration, Instant};

use crate::editing::{Document, Patch};
use crate::formatting::FormatOptions;
use crate::render::{Debouncer, RenderOutcome, RenderQueue, RenderWorker, Renderer};

/// One editing session: the document plus its live diagram preview.
///
/// Edits go straight into the [`Document`] and restart the debounce timer.
/// The host calls [`Session::tick`] from its event loop; once edits have
/// gone quiet a render is submitted to the background worker, and
/// [`Session::poll`] folds finished renders into the preview.
pub struct Session {
    document: Document,
    format_options: FormatOptions,
    queue: RenderQueue,
    debouncer: Debouncer,
    worker: RenderWorker,
}

impl Session {
    pub fn new<R>(
        text: &str,
        renderer: R,
        debounce: Duration,
        format_options: FormatOptions,
    ) -> Self
    where
        R: Renderer + Send + 'static,
    {
        let mut session = Self {
            document: Document::new(text),
            format_options,
            queue: RenderQueue::new(),
            debouncer: Debouncer::new(debounce),
            worker: RenderWorker::spawn(renderer),
        };
        // Initial content renders right away
        session.submit_render();
        session
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Apply a text change from the editor.
    pub fn edit(&mut self, range: Range<usize>, text: &str, now: Instant) -> Patch {
        let patch = self.document.edit(range, text);
        if !patch.is_noop() {
            self.debouncer.touch(now);
        }
        patch
    }

    /// The "Format Code" action.
    pub fn format(&mut self, now: Instant) -> Patch {
        let patch = self.document.format(&self.format_options);
        if !patch.is_noop() {
            self.debouncer.touch(now);
        }
        patch
    }

    /// Submit a render if the debounce period has elapsed. Returns true if a
    /// render was submitted.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.debouncer.ready(now) {
            self.submit_render();
            true
        } else {
            false
        }
    }

    /// Fold every finished render into the preview.
    pub fn poll(&mut self) -> Vec<RenderOutcome> {
        let mut outcomes = Vec::new();
        while let Some(done) = self.worker.try_recv() {
            outcomes.push(self.queue.complete(done.ticket, done.result));
        }
        outcomes
    }

    /// Block for up to `timeout` waiting for one render to finish.
    pub fn wait(&mut self, timeout: Duration) -> Option<RenderOutcome> {
        let done = self.worker.recv_timeout(timeout)?;
        Some(self.queue.complete(done.ticket, done.result))
    }

    /// The diagram currently on display.
    pub fn svg(&self) -> Option<&str> {
        self.queue.current_svg()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.queue.last_error()
    }

    fn submit_render(&mut self) {
        let ticket = self.queue.request();
        if let Err(e) = self.worker.submit(ticket, self.document.text()) {
            log::error!("Failed to submit render: {e}");
        }
    }
}
