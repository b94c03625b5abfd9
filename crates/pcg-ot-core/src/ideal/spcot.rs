//! Ideal functionality for single-point correlated OT.

use pcg_core::{prg::Prg, Block};

use crate::{SPCOTReceiverOutput, SPCOTSenderOutput, TransferId};

/// The ideal SPCOT functionality.
#[derive(Debug)]
pub struct IdealSpcot {
    delta: Block,
    transfer_id: TransferId,
    counter: usize,
    prg: Prg,
}

impl IdealSpcot {
    /// Creates a new functionality with a random delta.
    pub fn new() -> Self {
        let mut prg = Prg::new();
        let delta = prg.random_block();
        Self::new_with_prg(delta, prg)
    }

    /// Creates a new functionality with the provided delta.
    pub fn new_with_delta(delta: Block) -> Self {
        Self::new_with_prg(delta, Prg::new())
    }

    fn new_with_prg(delta: Block, prg: Prg) -> Self {
        IdealSpcot {
            delta,
            transfer_id: TransferId::default(),
            counter: 0,
            prg,
        }
    }

    /// Returns the correlation, delta.
    pub fn delta(&self) -> Block {
        self.delta
    }

    /// Returns the number of values dealt.
    pub fn count(&self) -> usize {
        self.counter
    }

    /// Deals a batch of single-point COTs.
    ///
    /// # Arguments
    ///
    /// * `each_num` - The number of values of each instance.
    /// * `alphas` - The punctured index of each instance.
    ///
    /// # Panics
    ///
    /// Panics if an index is not less than `each_num`.
    pub fn extend(
        &mut self,
        each_num: usize,
        alphas: &[usize],
    ) -> (SPCOTSenderOutput<Block>, SPCOTReceiverOutput<Block>) {
        let mut v = Vec::with_capacity(alphas.len());
        let mut w = Vec::with_capacity(alphas.len());

        for &alpha in alphas {
            assert!(alpha < each_num, "alpha must be less than each_num");

            let mut vs = vec![Block::ZERO; each_num];
            self.prg.random_blocks(&mut vs);
            let mut ws = vs.clone();
            ws[alpha] ^= self.delta;

            v.push(vs);
            w.push(ws);
            self.counter += each_num;
        }

        let id = self.transfer_id.next_id();

        (
            SPCOTSenderOutput { id, v },
            SPCOTReceiverOutput {
                id,
                w,
                alphas: alphas.to_vec(),
            },
        )
    }
}

impl Default for IdealSpcot {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::assert_spcot;

    #[test]
    fn test_ideal_spcot() {
        let mut ideal = IdealSpcot::default();

        let (sender, receiver) = ideal.extend(9, &[0, 4, 8]);

        assert_spcot(ideal.delta(), &sender, &receiver);
        assert_eq!(ideal.count(), 27);
    }
}
