/// Single-flight render gate with a latest-wins pending slot.
///
/// At most one page is in flight. Requests made while busy overwrite the
/// pending slot, so intermediate pages are dropped rather than queued.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderCoalescer {
    in_flight: Option<u32>,
    pending: Option<u32>,
}

/// Result of an in-flight render settling (successfully or not)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    /// Nothing was waiting; `page` is the page that just settled
    Idle { page: Option<u32> },
    /// The pending page was promoted and must be rendered now
    Replay { page: u32 },
}

impl RenderCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<u32> {
        self.in_flight
    }

    pub fn pending(&self) -> Option<u32> {
        self.pending
    }

    /// Returns `Some(page)` when the render should start now, `None` when it was parked
    pub fn request_page(&mut self, page: u32) -> Option<u32> {
        if self.in_flight.is_some() {
            if let Some(dropped) = self.pending.replace(page) {
                log::debug!("Dropping pending page {} for newer request {}", dropped, page);
            }
            None
        } else {
            self.in_flight = Some(page);
            Some(page)
        }
    }

    /// The in-flight render finished
    pub fn complete(&mut self) -> Settled {
        let finished = self.in_flight.take();
        match self.pending.take() {
            Some(next) => {
                self.in_flight = Some(next);
                Settled::Replay { page: next }
            }
            None => Settled::Idle { page: finished },
        }
    }

    /// The in-flight render failed. Clears the flag exactly like [`complete`](Self::complete).
    pub fn fail(&mut self) -> Settled {
        self.complete()
    }

    pub fn reset(&mut self) {
        self.in_flight = None;
        self.pending = None;
    }
}
