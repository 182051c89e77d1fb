//! Refresh requests from mutation dialogs back to the list controller.

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Cloneable "notify completion" capability handed to mutation dialogs.
///
/// Holders call [`RefreshHandle::request`] once after their own create or
/// delete call succeeds, and never on failure.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    tx: UnboundedSender<()>,
}

impl RefreshHandle {
    /// Returns false when the owning controller is gone.
    pub fn request(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

#[derive(Debug)]
pub struct RefreshRequests {
    tx: UnboundedSender<()>,
    rx: UnboundedReceiver<()>,
}

impl RefreshRequests {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> RefreshHandle {
        RefreshHandle {
            tx: self.tx.clone(),
        }
    }

    /// Drains every queued request and returns how many were pending.
    pub fn drain(&mut self) -> usize {
        let mut pending = 0;
        loop {
            match self.rx.try_recv() {
                Ok(()) => pending += 1,
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return pending,
            }
        }
    }
}

impl Default for RefreshRequests {
    fn default() -> Self {
        Self::new()
    }
}
