//! Punctured PRF sender.

use pcg_core::{ggm::HalfTree, Block};
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::{
    bootstrap::{MaskBits, SenderKeys},
    pprf::{
        bootstrap_count, keys_per_instance, msgs::LevelCorrection, tree_depth, PprfConfig,
        PprfSenderOutput,
    },
    ProtocolError, TransferId,
};

/// Punctured PRF sender.
#[derive(Debug)]
pub struct Sender<T: state::State = state::Initialized> {
    config: PprfConfig,
    state: T,
}

impl Sender {
    /// Creates a new sender.
    pub fn new(config: PprfConfig) -> Self {
        Sender {
            config,
            state: state::Initialized::default(),
        }
    }

    /// Completes the setup phase of the protocol.
    ///
    /// # Arguments
    ///
    /// * `delta` - The COT correlation, shared with the bootstrap COT functionality.
    pub fn setup(self, delta: Block) -> Sender<state::Extension> {
        Sender {
            config: self.config,
            state: state::Extension {
                delta,
                transfer_id: TransferId::default(),
            },
        }
    }
}

impl<T: state::State> Sender<T> {
    /// Returns the configuration.
    pub fn config(&self) -> &PprfConfig {
        &self.config
    }
}

impl Sender<state::Extension> {
    /// Returns the COT correlation.
    pub fn delta(&self) -> Block {
        self.state.delta
    }

    /// Returns the id of the next transfer.
    pub fn transfer_id(&self) -> TransferId {
        self.state.transfer_id
    }

    /// Replaces the COT correlation.
    ///
    /// Later batches must be bootstrapped with COTs for the new correlation.
    pub fn set_delta(&mut self, delta: Block) {
        self.state.delta = delta;
    }

    /// Begins a batch on random bootstrap COTs.
    ///
    /// # Arguments
    ///
    /// * `batch_num` - The number of instances.
    /// * `each_num` - The number of leaves of each instance.
    /// * `random` - The sender's random COT keys.
    /// * `mask` - The mask bits sent by the receiver.
    pub fn begin(
        &mut self,
        batch_num: usize,
        each_num: usize,
        random: Vec<Block>,
        mask: &MaskBits,
    ) -> Result<SenderBatch, ProtocolError> {
        self.config.check(batch_num, each_num)?;

        self.state.transfer_id.check_peer(mask.id)?;

        let expected = bootstrap_count(batch_num, each_num);
        if random.len() != expected {
            return Err(ProtocolError::MismatchedBatchSize {
                expected,
                actual: random.len(),
            });
        }

        let keys = SenderKeys::derandomize(self.state.delta, random, mask)?;
        self.state.transfer_id = mask.id;

        self.begin_with_keys(batch_num, each_num, keys)
    }

    /// Begins a batch on derandomized bootstrap COTs.
    ///
    /// # Arguments
    ///
    /// * `batch_num` - The number of instances.
    /// * `each_num` - The number of leaves of each instance.
    /// * `keys` - The derandomized keys, `h` per instance.
    pub fn begin_with_keys(
        &mut self,
        batch_num: usize,
        each_num: usize,
        keys: SenderKeys,
    ) -> Result<SenderBatch, ProtocolError> {
        self.config.check(batch_num, each_num)?;

        if keys.delta() != self.state.delta {
            return Err(ProtocolError::InvalidParameter(
                "bootstrap keys are for a different delta".to_string(),
            ));
        }

        let expected = bootstrap_count(batch_num, each_num);
        if keys.len() != expected {
            return Err(ProtocolError::MismatchedBatchSize {
                expected,
                actual: keys.len(),
            });
        }

        let depth = tree_depth(each_num);
        let keys = keys.into_keys();

        let trees = if depth == 0 {
            Vec::new()
        } else {
            let tree = HalfTree::new(depth);
            keys.chunks_exact(depth)
                .map(|keys| {
                    let mut arena = vec![Block::ZERO; tree.leaf_count()];
                    tree.init(&mut arena, keys[0], self.state.delta);
                    arena
                })
                .collect()
        };

        Ok(SenderBatch {
            id: self.state.transfer_id.next_id(),
            delta: self.state.delta,
            each_num,
            depth,
            level: 2,
            keys,
            trees,
        })
    }
}

/// A batch in progress on the sender side.
pub struct SenderBatch {
    id: TransferId,
    delta: Block,
    each_num: usize,
    depth: usize,
    /// The next level to expand.
    level: usize,
    keys: Vec<Block>,
    trees: Vec<Vec<Block>>,
}

opaque_debug::implement!(SenderBatch);

impl SenderBatch {
    /// Returns the transfer id.
    pub fn id(&self) -> TransferId {
        self.id
    }

    /// Returns the number of instances.
    pub fn batch_num(&self) -> usize {
        self.keys.len() / keys_per_instance(self.each_num)
    }

    /// Returns whether every level has been expanded.
    pub fn is_done(&self) -> bool {
        self.level > self.depth
    }

    /// Expands the next level of every instance, returning the corrections for the receiver.
    pub fn expand_level(&mut self) -> Result<LevelCorrection, ProtocolError> {
        if self.is_done() {
            return Err(ProtocolError::InvalidState(
                "every level is already expanded".to_string(),
            ));
        }

        let tree = HalfTree::new(self.depth);
        let level = self.level;
        let mut corrections = vec![Block::ZERO; self.trees.len()];

        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                let iter = self
                    .trees
                    .par_iter_mut()
                    .zip(self.keys.par_chunks_exact(self.depth))
                    .zip(corrections.par_iter_mut());
            } else {
                let iter = self
                    .trees
                    .iter_mut()
                    .zip(self.keys.chunks_exact(self.depth))
                    .zip(corrections.iter_mut());
            }
        }

        iter.for_each(|((arena, keys), correction)| {
            *correction = tree.expand_level(arena, level) ^ keys[level - 1];
        });

        self.level += 1;

        Ok(LevelCorrection {
            id: self.id,
            level: level as u32,
            corrections,
        })
    }

    /// Expands every remaining level, returning the corrections in order.
    pub fn expand_all(&mut self) -> Result<Vec<LevelCorrection>, ProtocolError> {
        let mut msgs = Vec::with_capacity(self.depth.saturating_sub(1));
        while !self.is_done() {
            msgs.push(self.expand_level()?);
        }

        Ok(msgs)
    }

    /// Finishes the batch, returning the leaves.
    pub fn finish(self) -> Result<PprfSenderOutput, ProtocolError> {
        if !self.is_done() {
            return Err(ProtocolError::InvalidState(format!(
                "level {} of {} is not expanded",
                self.level, self.depth
            )));
        }

        let leaves = if self.depth == 0 {
            self.keys.into_iter().map(|key| vec![key]).collect()
        } else {
            self.trees
                .into_iter()
                .map(|mut arena| {
                    arena.truncate(self.each_num);
                    arena
                })
                .collect()
        };

        Ok(PprfSenderOutput {
            id: self.id,
            delta: self.delta,
            leaves,
        })
    }
}

/// The sender's state.
pub mod state {
    use super::*;

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Extension {}
    }

    /// The sender's state.
    pub trait State: sealed::Sealed {}

    /// The sender's initial state.
    #[derive(Default)]
    pub struct Initialized {}

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    /// The sender's state after setup.
    ///
    /// In this state the sender runs any number of batches, each on fresh bootstrap COTs.
    pub struct Extension {
        /// The COT correlation.
        pub(super) delta: Block,
        /// The id of the next transfer.
        pub(super) transfer_id: TransferId,
    }

    impl State for Extension {}

    opaque_debug::implement!(Extension);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ideal::cot::IdealCOT;

    #[test]
    fn test_sender_rejects_stale_mask() {
        let mut ideal = IdealCOT::default();
        let mut sender = Sender::new(PprfConfig::default()).setup(ideal.delta());

        let (rcot, _) = ideal.random_correlated(4);
        let mask = MaskBits {
            id: TransferId::default(),
            bits: vec![false; 4],
        };
        sender.begin(1, 16, rcot.msgs, &mask).unwrap();
        let id = sender.transfer_id();

        let (rcot, _) = ideal.random_correlated(4);
        assert!(sender.begin(1, 16, rcot.msgs, &mask).unwrap_err().is_abort());
        assert_eq!(sender.transfer_id(), id);
    }

    #[test]
    fn test_sender_catches_up_after_abort() {
        let mut ideal = IdealCOT::default();
        let mut sender = Sender::new(PprfConfig::default()).setup(ideal.delta());

        // The receiver opened a batch that was rejected for carrying too few bits.
        let mut receiver_id = TransferId::default();
        let (rcot, _) = ideal.random_correlated(4);
        let malformed = MaskBits {
            id: receiver_id.next_id(),
            bits: vec![false; 3],
        };
        assert!(sender
            .begin(1, 16, rcot.msgs, &malformed)
            .unwrap_err()
            .is_abort());
        assert_eq!(sender.transfer_id(), TransferId::default());

        let (rcot, _) = ideal.random_correlated(4);
        let mask = MaskBits {
            id: receiver_id.next_id(),
            bits: vec![false; 4],
        };
        let batch = sender.begin(1, 16, rcot.msgs, &mask).unwrap();

        assert_eq!(batch.id(), mask.id);
        assert_eq!(sender.transfer_id(), receiver_id);
    }

    #[test]
    fn test_sender_state_order() {
        let mut ideal = IdealCOT::default();
        let mut sender = Sender::new(PprfConfig::default()).setup(ideal.delta());

        let mut begin = |sender: &mut Sender<state::Extension>| {
            let (rcot, _) = ideal.random_correlated(3);
            let mask = MaskBits {
                id: sender.transfer_id(),
                bits: vec![false; 3],
            };
            sender.begin(1, 8, rcot.msgs, &mask).unwrap()
        };

        let unfinished = begin(&mut sender);
        assert!(!unfinished.is_done());
        assert!(matches!(
            unfinished.finish(),
            Err(ProtocolError::InvalidState(_))
        ));

        let mut batch = begin(&mut sender);
        assert_eq!(batch.expand_all().unwrap().len(), 2);
        assert!(batch.is_done());
        assert!(matches!(
            batch.expand_level(),
            Err(ProtocolError::InvalidState(_))
        ));
        assert_eq!(batch.finish().unwrap().leaves[0].len(), 8);
    }

    #[test]
    fn test_sender_leaves_sum_to_delta() {
        let mut ideal = IdealCOT::default();
        let (rcot, _) = ideal.random_correlated(4 * 3);
        let mask = MaskBits {
            id: TransferId::default(),
            bits: vec![true; 12],
        };

        let mut sender = Sender::new(PprfConfig::default()).setup(ideal.delta());
        let mut batch = sender.begin(3, 16, rcot.msgs, &mask).unwrap();
        batch.expand_all().unwrap();

        let output = batch.finish().unwrap();
        for leaves in output.leaves {
            assert_eq!(Block::xor_all(&leaves), ideal.delta());
        }
    }
}
