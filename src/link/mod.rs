//! The infrared serial link: one byte at a time, best effort.

/// A non-blocking, byte-oriented, half-duplex channel.
///
/// There is no receive queue: an implementation holds at most one unread
/// byte, and a byte arriving before the previous one was read replaces it.
pub trait Link {
    /// Transmit one byte. Fire and forget; delivery is not reported.
    fn send(&mut self, byte: u8);

    /// Take the pending byte, if any.
    fn receive(&mut self) -> Option<u8>;
}

impl<L: Link + ?Sized> Link for &mut L {
    fn send(&mut self, byte: u8) {
        (**self).send(byte)
    }

    fn receive(&mut self) -> Option<u8> {
        (**self).receive()
    }
}

#[cfg(feature = "std")]
pub mod in_memory;
#[cfg(feature = "std")]
pub mod lossy;
