//! Ideal correlated oblivious transfer functionality.

use pcg_core::{prg::Prg, Block};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    COTReceiverOutput, COTSenderOutput, RCOTReceiverOutput, RCOTSenderOutput, TransferId,
};

/// The ideal COT functionality.
///
/// Deals keys `q` to the sender and `q ⊕ r·Δ` to the receiver. Seeded, so that two instances with
/// the same seed and `Δ` deal identical correlations.
#[derive(Debug)]
pub struct IdealCOT {
    delta: Block,
    transfer_id: TransferId,
    counter: usize,
    prg: Prg,
}

impl IdealCOT {
    /// Creates a new ideal COT functionality.
    ///
    /// # Arguments
    ///
    /// * `seed` - The seed for the PRG.
    /// * `delta` - The correlation.
    pub fn new(seed: Block, delta: Block) -> Self {
        IdealCOT {
            delta,
            transfer_id: TransferId::default(),
            counter: 0,
            prg: Prg::from_seed(seed),
        }
    }

    /// Returns the correlation, delta.
    pub fn delta(&self) -> Block {
        self.delta
    }

    /// Sets the correlation, delta.
    pub fn set_delta(&mut self, delta: Block) {
        self.delta = delta;
    }

    /// Returns the number of COTs dealt.
    pub fn count(&self) -> usize {
        self.counter
    }

    /// Deals random COTs: random choices and the corresponding keys.
    ///
    /// # Arguments
    ///
    /// * `count` - The number of COTs.
    pub fn random_correlated(
        &mut self,
        count: usize,
    ) -> (RCOTSenderOutput<Block>, RCOTReceiverOutput<bool, Block>) {
        let mut msgs = vec![Block::ZERO; count];
        let mut choices = vec![false; count];

        self.prg.random_blocks(&mut msgs);
        self.prg.random_bools(&mut choices);

        let chosen = msgs
            .iter()
            .zip(&choices)
            .map(|(&q, &r)| q ^ self.delta.select(r))
            .collect();

        self.counter += count;
        let id = self.transfer_id.next_id();

        (
            RCOTSenderOutput { id, msgs },
            RCOTReceiverOutput {
                id,
                choices,
                msgs: chosen,
            },
        )
    }

    /// Deals COTs with choices provided by the receiver.
    ///
    /// # Arguments
    ///
    /// * `choices` - The choices of the receiver.
    pub fn correlated(
        &mut self,
        choices: &[bool],
    ) -> (COTSenderOutput<Block>, COTReceiverOutput<Block>) {
        let (sender, receiver) = self.random_correlated(choices.len());

        let msgs = receiver
            .msgs
            .into_iter()
            .zip(choices.iter().zip(receiver.choices))
            .map(|(msg, (&choice, random))| msg ^ self.delta.select(choice ^ random))
            .collect();

        (
            COTSenderOutput {
                id: sender.id,
                msgs: sender.msgs,
            },
            COTReceiverOutput {
                id: receiver.id,
                msgs,
            },
        )
    }
}

impl Default for IdealCOT {
    fn default() -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        Self::new(rng.gen(), rng.gen())
    }
}
