#![cfg(feature = "std")]

use std::sync::{Arc, Mutex, PoisonError};

use crate::link::Link;

/// One end of a cross-wired pair of in-memory IR links.
///
/// Each end has a single-slot receive register, like the UART on the
/// device: a byte sent before the previous one was read overwrites it.
pub struct InMemoryLink {
    inbox: Arc<Mutex<Option<u8>>>,
    outbox: Arc<Mutex<Option<u8>>>,
    overwritten: u64,
}

impl InMemoryLink {
    pub fn pair() -> (Self, Self) {
        let r1 = Arc::new(Mutex::new(None));
        let r2 = Arc::new(Mutex::new(None));
        (
            Self {
                inbox: r1.clone(),
                outbox: r2.clone(),
                overwritten: 0,
            },
            Self {
                inbox: r2,
                outbox: r1,
                overwritten: 0,
            },
        )
    }

    /// Bytes this end sent that replaced one the peer had not read yet.
    pub fn overwritten(&self) -> u64 {
        self.overwritten
    }

    /// Look at the pending byte without taking it.
    pub fn peek(&self) -> Option<u8> {
        *self.inbox.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Link for InMemoryLink {
    fn send(&mut self, byte: u8) {
        let mut slot = self.outbox.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.replace(byte).is_some() {
            self.overwritten += 1;
            log::trace!("unread byte overwritten by {:#04x}", byte);
        }
    }

    fn receive(&mut self) -> Option<u8> {
        self.inbox
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
