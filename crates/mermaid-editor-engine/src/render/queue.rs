use crate::render::RenderError;

/// Identifies one render request. Sequence numbers only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RenderTicket {
    seq: u64,
}

impl RenderTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// What happened to a completed render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The SVG is now on display
    Applied,
    /// A newer request was issued meanwhile; the result was dropped
    Stale,
    /// The renderer failed; the previous SVG stays on display
    Failed,
}

/// Last-write-wins bookkeeping for overlapping renders.
///
/// Only the result of the most recently issued request is ever shown.
/// Results for older tickets are discarded even if they arrive after the
/// newest one, and failures never clear what is already on display.
#[derive(Debug, Default)]
pub struct RenderQueue {
    latest_issued: u64,
    displayed: Option<RenderTicket>,
    current_svg: Option<String>,
    last_error: Option<String>,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new render request.
    pub fn request(&mut self) -> RenderTicket {
        self.latest_issued += 1;
        log::debug!("render request #{} issued", self.latest_issued);
        RenderTicket {
            seq: self.latest_issued,
        }
    }

    /// True if `ticket` is the most recently issued request.
    pub fn is_latest(&self, ticket: RenderTicket) -> bool {
        ticket.seq == self.latest_issued
    }

    /// Feed back the result of a render.
    pub fn complete(
        &mut self,
        ticket: RenderTicket,
        result: Result<String, RenderError>,
    ) -> RenderOutcome {
        if !self.is_latest(ticket) {
            log::debug!(
                "discarding render #{} (latest is #{})",
                ticket.seq,
                self.latest_issued
            );
            return RenderOutcome::Stale;
        }

        match result {
            Ok(svg) => {
                self.current_svg = Some(svg);
                self.displayed = Some(ticket);
                self.last_error = None;
                RenderOutcome::Applied
            }
            Err(e) => {
                log::error!("Failed to render diagram: {e}");
                self.last_error = Some(e.to_string());
                RenderOutcome::Failed
            }
        }
    }

    /// The last successfully rendered SVG markup.
    pub fn current_svg(&self) -> Option<&str> {
        self.current_svg.as_deref()
    }

    /// The ticket whose SVG is on display.
    pub fn displayed(&self) -> Option<RenderTicket> {
        self.displayed
    }

    /// Message of the latest failure, cleared by the next success.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
