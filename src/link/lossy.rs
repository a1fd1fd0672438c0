#![cfg(feature = "std")]

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::link::Link;

/// Link wrapper that loses transmitted bytes at random, like an IR beam
/// that is blocked or pointed the wrong way.
///
/// With a loss probability of zero it adds nothing but a counter.
pub struct LossyLink<L: Link> {
    inner: L,
    loss: f64,
    rng: SmallRng,
    dropped: u64,
}

impl<L: Link> LossyLink<L> {
    /// `loss` is clamped to `0.0..=1.0`.
    pub fn new(inner: L, loss: f64, seed: u64) -> Self {
        Self {
            inner,
            loss: if loss.is_nan() { 0.0 } else { loss.clamp(0.0, 1.0) },
            rng: SmallRng::seed_from_u64(seed),
            dropped: 0,
        }
    }

    /// A wrapper that never drops anything.
    pub fn lossless(inner: L) -> Self {
        Self::new(inner, 0.0, 0)
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Link> Link for LossyLink<L> {
    fn send(&mut self, byte: u8) {
        if self.loss > 0.0 && self.rng.random_bool(self.loss) {
            self.dropped += 1;
            log::debug!("byte {:#04x} lost in transit", byte);
            return;
        }
        self.inner.send(byte);
    }

    fn receive(&mut self) -> Option<u8> {
        self.inner.receive()
    }
}
