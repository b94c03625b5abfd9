//! Ideal random subfield VOLE functionality.

use std::marker::PhantomData;

use pcg_core::{prg::Prg, Block};
use pcg_fields::{ExtensionField, Field};
use rand::SeedableRng;

use crate::{TransferId, VoleReceiverOutput, VoleSenderOutput};

/// The ideal random subfield VOLE functionality over the subfield `S` of `F`.
///
/// Deals `(u, w)` to the sender and `v` to the receiver, with `w = v + u·Δ`.
#[derive(Debug)]
pub struct IdealVole<S, F> {
    delta: F,
    transfer_id: TransferId,
    counter: usize,
    prg: Prg,
    _pd: PhantomData<S>,
}

impl<S: Field, F: ExtensionField<S>> IdealVole<S, F> {
    /// Creates a new ideal VOLE functionality.
    ///
    /// # Arguments
    ///
    /// * `seed` - The seed for the PRG.
    /// * `delta` - The correlation.
    pub fn new(seed: Block, delta: F) -> Self {
        Self {
            delta,
            transfer_id: TransferId::default(),
            counter: 0,
            prg: Prg::from_seed(seed),
            _pd: PhantomData,
        }
    }

    /// Returns the correlation, delta.
    pub fn delta(&self) -> F {
        self.delta
    }

    /// Sets the correlation, delta.
    pub fn set_delta(&mut self, delta: F) {
        self.delta = delta;
    }

    /// Returns the number of correlations dealt.
    pub fn count(&self) -> usize {
        self.counter
    }

    /// Deals `count` random VOLE correlations.
    pub fn random(&mut self, count: usize) -> (VoleSenderOutput<S, F>, VoleReceiverOutput<F>) {
        let u: Vec<S> = (0..count).map(|_| S::rand(&mut self.prg)).collect();
        let v: Vec<F> = (0..count).map(|_| F::rand(&mut self.prg)).collect();

        let w = u
            .iter()
            .zip(&v)
            .map(|(&u, &v)| v + F::mix_mul(u, self.delta))
            .collect();

        self.counter += count;
        let id = self.transfer_id.next_id();

        (VoleSenderOutput { id, u, w }, VoleReceiverOutput { id, v })
    }
}

impl<S: Field, F: ExtensionField<S>> Default for IdealVole<S, F> {
    fn default() -> Self {
        let mut prg = Prg::with_nonce(Block::ONE, 0);
        let delta = F::rand(&mut prg);
        Self::new(prg.random_block(), delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcg_fields::{Gf2, Gf2_128, Gf2_64, Zp64};

    fn check<S: Field, F: ExtensionField<S>>() {
        let mut ideal = IdealVole::<S, F>::default();
        let (sender, receiver) = ideal.random(32);

        for ((&u, &w), &v) in sender.u.iter().zip(&sender.w).zip(&receiver.v) {
            assert_eq!(w, v + F::mix_mul(u, ideal.delta()));
        }
        assert_eq!(sender.id, receiver.id);
        assert_eq!(ideal.count(), 32);
    }

    #[test]
    fn test_ideal_vole() {
        check::<Gf2, Gf2_128>();
        check::<Gf2_64, Gf2_64>();
        check::<Zp64, Zp64>();
    }
}
