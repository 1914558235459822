//! Dispatcher for middleware action dispatch
//!
//! Actions sent through the Dispatcher re-enter the middleware chain from the
//! beginning (via the background worker's action channel). This is how a
//! finished remote call reports back, e.g. `Dashboard::Loaded` after a fetch.

use crate::actions::Action;
use std::sync::mpsc::Sender;

#[derive(Clone)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    pub fn new(action_tx: Sender<Action>) -> Self {
        Self { action_tx }
    }

    /// Send `action` back through the middleware chain
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.action_tx.send(action) {
            log::error!("Dispatcher: failed to send action: {}", e);
        }
    }
}
