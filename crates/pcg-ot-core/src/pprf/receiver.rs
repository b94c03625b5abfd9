//! Punctured PRF receiver.

use pcg_core::{ggm::HalfTree, Block};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    bootstrap::{MaskBits, ReceiverKeys},
    pprf::{
        bootstrap_count, check_alphas, check_framing, choice_bits, msgs::LevelCorrection,
        tree_depth, PprfConfig, PprfReceiverOutput, PuncturedLeaves,
    },
    ProtocolError, TransferId,
};

/// Punctured PRF receiver.
#[derive(Debug)]
pub struct Receiver<T: state::State = state::Initialized> {
    config: PprfConfig,
    state: T,
}

impl Receiver {
    /// Creates a new receiver.
    pub fn new(config: PprfConfig) -> Self {
        Receiver {
            config,
            state: state::Initialized::default(),
        }
    }

    /// Completes the setup phase of the protocol.
    pub fn setup(self) -> Receiver<state::Extension> {
        Receiver {
            config: self.config,
            state: state::Extension {
                transfer_id: TransferId::default(),
            },
        }
    }
}

impl<T: state::State> Receiver<T> {
    /// Returns the configuration.
    pub fn config(&self) -> &PprfConfig {
        &self.config
    }
}

impl Receiver<state::Extension> {
    /// Returns the id of the next transfer.
    pub fn transfer_id(&self) -> TransferId {
        self.state.transfer_id
    }

    /// Begins a batch on random bootstrap COTs.
    ///
    /// Returns the batch and the mask bits which derandomize the sender's COTs.
    ///
    /// # Arguments
    ///
    /// * `alphas` - The punctured index of each instance.
    /// * `each_num` - The number of leaves of each instance.
    /// * `random_choices` - The receiver's random COT choices.
    /// * `random_keys` - The receiver's random COT keys.
    pub fn begin(
        &mut self,
        alphas: &[usize],
        each_num: usize,
        random_choices: &[bool],
        random_keys: Vec<Block>,
    ) -> Result<(ReceiverBatch, MaskBits), ProtocolError> {
        self.config.check(alphas.len(), each_num)?;

        let choices = choice_bits(alphas, each_num)?;
        let (keys, mask) = ReceiverKeys::derandomize(
            self.state.transfer_id,
            choices,
            random_choices,
            random_keys,
        )?;

        let batch = self.begin_with_keys(alphas, each_num, keys)?;

        Ok((batch, mask))
    }

    /// Begins a batch on derandomized bootstrap COTs.
    ///
    /// # Arguments
    ///
    /// * `alphas` - The punctured index of each instance.
    /// * `each_num` - The number of leaves of each instance.
    /// * `keys` - The derandomized keys, with the choices returned by
    ///   [`choice_bits`](crate::pprf::choice_bits).
    pub fn begin_with_keys(
        &mut self,
        alphas: &[usize],
        each_num: usize,
        keys: ReceiverKeys,
    ) -> Result<ReceiverBatch, ProtocolError> {
        self.config.check(alphas.len(), each_num)?;
        check_alphas(alphas, each_num)?;

        let expected = bootstrap_count(alphas.len(), each_num);
        if keys.len() != expected {
            return Err(ProtocolError::MismatchedBatchSize {
                expected,
                actual: keys.len(),
            });
        }

        if keys.choices() != choice_bits(alphas, each_num)? {
            return Err(ProtocolError::InvalidParameter(
                "bootstrap choices do not match the punctured indices".to_string(),
            ));
        }

        let depth = tree_depth(each_num);
        let keys = keys.into_keys();

        let trees = if depth == 0 {
            Vec::new()
        } else {
            let tree = HalfTree::new(depth);
            keys.chunks_exact(depth)
                .zip(alphas)
                .map(|(keys, &alpha)| {
                    let mut arena = vec![Block::ZERO; tree.leaf_count()];
                    tree.init_punctured(&mut arena, keys[0], path_bit(alpha, depth, 1));
                    arena
                })
                .collect()
        };

        Ok(ReceiverBatch {
            id: self.state.transfer_id.next_id(),
            each_num,
            depth,
            level: 2,
            alphas: alphas.to_vec(),
            keys,
            trees,
        })
    }
}

/// Returns the bit of `alpha` which selects the node of `level` on the path to `alpha`.
#[inline]
fn path_bit(alpha: usize, depth: usize, level: usize) -> bool {
    (alpha >> (depth - level)) & 1 == 1
}

/// A batch in progress on the receiver side.
pub struct ReceiverBatch {
    id: TransferId,
    each_num: usize,
    depth: usize,
    /// The next level to reconstruct.
    level: usize,
    alphas: Vec<usize>,
    keys: Vec<Block>,
    trees: Vec<Vec<Block>>,
}

opaque_debug::implement!(ReceiverBatch);

impl ReceiverBatch {
    /// Returns the transfer id.
    pub fn id(&self) -> TransferId {
        self.id
    }

    /// Returns the number of instances.
    pub fn batch_num(&self) -> usize {
        self.alphas.len()
    }

    /// Returns the level the next correction must be for.
    pub fn level(&self) -> usize {
        self.level
    }

    /// Returns whether every level has been reconstructed.
    pub fn is_done(&self) -> bool {
        self.level > self.depth
    }

    /// Reconstructs the next level of every instance from the sender's corrections.
    pub fn reconstruct_level(&mut self, msg: LevelCorrection) -> Result<(), ProtocolError> {
        if self.is_done() {
            return Err(ProtocolError::InvalidState(
                "every level is already reconstructed".to_string(),
            ));
        }

        check_framing(self.id, self.level, msg.id, msg.level)?;

        if msg.corrections.len() != self.batch_num() {
            return Err(ProtocolError::Abort(format!(
                "received {} corrections for {} instances",
                msg.corrections.len(),
                self.batch_num()
            )));
        }

        let tree = HalfTree::new(self.depth);
        let depth = self.depth;
        let level = self.level;

        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                let iter = self
                    .trees
                    .par_iter_mut()
                    .zip(self.keys.par_chunks_exact(depth))
                    .zip(self.alphas.par_iter())
                    .zip(msg.corrections.par_iter());
            } else {
                let iter = self
                    .trees
                    .iter_mut()
                    .zip(self.keys.chunks_exact(depth))
                    .zip(self.alphas.iter())
                    .zip(msg.corrections.iter());
            }
        }

        iter.for_each(|(((arena, keys), &alpha), &correction)| {
            // The key of the side opposite to α at this level.
            let k = correction ^ keys[level - 1];
            let path = alpha >> (depth - level + 1);
            tree.reconstruct_level(arena, level, path, path_bit(alpha, depth, level), k);
        });

        self.level += 1;

        Ok(())
    }

    /// Finishes the batch, returning the punctured leaves.
    pub fn finish(self) -> Result<PprfReceiverOutput, ProtocolError> {
        if !self.is_done() {
            return Err(ProtocolError::InvalidState(format!(
                "level {} of {} is not reconstructed",
                self.level, self.depth
            )));
        }

        let punctured = if self.depth == 0 {
            self.keys
                .into_iter()
                .zip(self.alphas)
                .map(|(key, alpha)| PuncturedLeaves {
                    alpha,
                    leaves: vec![Block::ZERO],
                    sum: key,
                })
                .collect()
        } else {
            let each_num = self.each_num;
            self.trees
                .into_iter()
                .zip(self.alphas)
                .map(|(mut arena, alpha)| {
                    let sum = Block::xor_all(&arena);
                    arena.truncate(each_num);
                    PuncturedLeaves {
                        alpha,
                        leaves: arena,
                        sum,
                    }
                })
                .collect()
        };

        Ok(PprfReceiverOutput {
            id: self.id,
            punctured,
        })
    }
}

/// The receiver's state.
pub mod state {
    use super::*;

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Extension {}
    }

    /// The receiver's state.
    pub trait State: sealed::Sealed {}

    /// The receiver's initial state.
    #[derive(Default)]
    pub struct Initialized {}

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    /// The receiver's state after setup.
    pub struct Extension {
        /// The id of the next transfer.
        pub(super) transfer_id: TransferId,
    }

    impl State for Extension {}

    opaque_debug::implement!(Extension);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ideal::cot::IdealCOT,
        pprf::sender::{Sender, SenderBatch},
    };

    fn batches(alphas: &[usize], each_num: usize) -> (SenderBatch, ReceiverBatch) {
        let mut ideal = IdealCOT::default();
        let (sender_rcot, receiver_rcot) =
            ideal.random_correlated(bootstrap_count(alphas.len(), each_num));

        let mut receiver = Receiver::new(PprfConfig::default()).setup();
        let (receiver_batch, mask) = receiver
            .begin(alphas, each_num, &receiver_rcot.choices, receiver_rcot.msgs)
            .unwrap();

        let mut sender = Sender::new(PprfConfig::default()).setup(ideal.delta());
        let sender_batch = sender
            .begin(alphas.len(), each_num, sender_rcot.msgs, &mask)
            .unwrap();

        (sender_batch, receiver_batch)
    }

    #[test]
    fn test_receiver_rejects_invalid_alpha() {
        let mut receiver = Receiver::new(PprfConfig::default()).setup();

        let err = receiver
            .begin(&[1, 9], 9, &[false; 8], vec![Block::ZERO; 8])
            .unwrap_err();

        assert!(matches!(
            err,
            ProtocolError::InvalidAlpha {
                alpha: 9,
                each_num: 9
            }
        ));
        assert_eq!(receiver.transfer_id(), TransferId::default());
    }

    #[test]
    fn test_receiver_rejects_short_bootstrap() {
        let mut receiver = Receiver::new(PprfConfig::default()).setup();

        let err = receiver
            .begin(&[1, 2], 9, &[false; 7], vec![Block::ZERO; 7])
            .unwrap_err();

        assert!(matches!(
            err,
            ProtocolError::MismatchedBatchSize {
                expected: 8,
                actual: 7
            }
        ));
    }

    #[test]
    fn test_receiver_rejects_wrong_level() {
        let (mut sender, mut receiver) = batches(&[1, 5], 16);

        let _ = sender.expand_level().unwrap();
        let level_3 = sender.expand_level().unwrap();

        assert!(receiver.reconstruct_level(level_3).unwrap_err().is_abort());
    }

    #[test]
    fn test_receiver_rejects_wrong_id() {
        let (mut sender, mut receiver) = batches(&[1, 5], 16);

        let mut msg = sender.expand_level().unwrap();
        let mut id = msg.id;
        id.next_id();
        msg.id = id.next_id();

        assert!(receiver.reconstruct_level(msg).unwrap_err().is_abort());
    }

    #[test]
    fn test_receiver_rejects_wrong_length() {
        let (mut sender, mut receiver) = batches(&[1, 5], 16);

        let mut msg = sender.expand_level().unwrap();
        msg.corrections.pop();

        assert!(receiver.reconstruct_level(msg).unwrap_err().is_abort());
    }

    #[test]
    fn test_receiver_state_order() {
        let (_, receiver) = batches(&[3], 16);

        assert_eq!(receiver.level(), 2);
        assert!(matches!(
            receiver.finish(),
            Err(ProtocolError::InvalidState(_))
        ));
    }
}
