//! Bootstrap correlations.
//!
//! The punctured PRF consumes one COT per tree level and instance. It obtains them as random COTs,
//! either fresh from a [`RandomCOT`](https://eprint.iacr.org/2019/1159) functionality or from a
//! precomputed pool, and derandomizes them: the receiver sends the XOR of its random choices with
//! the choices it actually needs, and the sender flips every key whose mask bit is set by `Δ`.
//! After derandomization the sender holds `q_k` and the receiver holds `t_k = q_k ⊕ c_k·Δ`.

use itybity::{FromBitIterator, ToBits};
use pcg_core::Block;

use crate::{ProtocolError, RCOTReceiverOutput, RCOTSenderOutput, TransferId};

/// Mask bits sent by the receiver, `b_k = r_k ⊕ c_k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskBits {
    /// The transfer the bits belong to.
    pub id: TransferId,
    /// The mask bits.
    pub bits: Vec<bool>,
}

impl MaskBits {
    /// Returns the byte length of the encoding of `count` mask bits.
    pub fn byte_len(count: usize) -> usize {
        TransferId::LEN + (count + 7) / 8
    }

    /// Encodes the mask bits, packed least significant bit first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::byte_len(self.bits.len()));
        bytes.extend_from_slice(&self.id.to_bytes());
        bytes.extend(
            self.bits
                .chunks(8)
                .map(|chunk| u8::from_lsb0_iter(chunk.iter().copied())),
        );
        bytes
    }

    /// Decodes `count` mask bits.
    ///
    /// Rejects encodings of the wrong length and encodings with nonzero padding bits.
    pub fn from_bytes(bytes: &[u8], count: usize) -> Result<Self, ProtocolError> {
        if bytes.len() != Self::byte_len(count) {
            return Err(ProtocolError::Abort(format!(
                "mask bits have length {}, expected {}",
                bytes.len(),
                Self::byte_len(count)
            )));
        }

        let (id, packed) = bytes.split_at(TransferId::LEN);
        let mut id_bytes = [0u8; 8];
        id_bytes.copy_from_slice(id);

        let mut bits: Vec<bool> = packed.iter().flat_map(|byte| byte.iter_lsb0()).collect();
        if bits[count..].iter().any(|&bit| bit) {
            return Err(ProtocolError::Abort(
                "mask bits have nonzero padding".to_string(),
            ));
        }
        bits.truncate(count);

        Ok(Self {
            id: TransferId::from_bytes(id_bytes),
            bits,
        })
    }
}

/// Derandomized sender keys.
#[derive(Clone)]
pub struct SenderKeys {
    delta: Block,
    keys: Vec<Block>,
}

opaque_debug::implement!(SenderKeys);

impl SenderKeys {
    /// Derandomizes random COT keys with the receiver's mask bits.
    ///
    /// # Arguments
    ///
    /// * `delta` - The COT correlation.
    /// * `random` - The random COT keys of the sender.
    /// * `mask` - The mask bits sent by the receiver.
    pub fn derandomize(
        delta: Block,
        mut random: Vec<Block>,
        mask: &MaskBits,
    ) -> Result<Self, ProtocolError> {
        if mask.bits.len() != random.len() {
            return Err(ProtocolError::Abort(format!(
                "received {} mask bits for {} keys",
                mask.bits.len(),
                random.len()
            )));
        }

        random
            .iter_mut()
            .zip(&mask.bits)
            .for_each(|(key, &bit)| *key ^= delta.select(bit));

        Ok(Self {
            delta,
            keys: random,
        })
    }

    /// Returns the COT correlation.
    pub fn delta(&self) -> Block {
        self.delta
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the keys.
    pub fn keys(&self) -> &[Block] {
        &self.keys
    }

    pub(crate) fn into_keys(self) -> Vec<Block> {
        self.keys
    }
}

/// Derandomized receiver keys.
#[derive(Clone)]
pub struct ReceiverKeys {
    choices: Vec<bool>,
    keys: Vec<Block>,
}

opaque_debug::implement!(ReceiverKeys);

impl ReceiverKeys {
    /// Derandomizes random COT keys to the provided choices.
    ///
    /// Returns the keys and the mask bits to send to the sender.
    ///
    /// # Arguments
    ///
    /// * `id` - The transfer the correlations are used in.
    /// * `choices` - The choices the keys are derandomized to.
    /// * `random_choices` - The random COT choices of the receiver.
    /// * `random_keys` - The random COT keys of the receiver.
    pub fn derandomize(
        id: TransferId,
        choices: Vec<bool>,
        random_choices: &[bool],
        random_keys: Vec<Block>,
    ) -> Result<(Self, MaskBits), ProtocolError> {
        if random_choices.len() != random_keys.len() {
            return Err(ProtocolError::InvalidParameter(format!(
                "random COT has {} choices for {} keys",
                random_choices.len(),
                random_keys.len()
            )));
        }

        if random_choices.len() != choices.len() {
            return Err(ProtocolError::MismatchedBatchSize {
                expected: choices.len(),
                actual: random_choices.len(),
            });
        }

        let bits = choices
            .iter()
            .zip(random_choices)
            .map(|(&c, &r)| c ^ r)
            .collect();

        Ok((
            Self {
                choices,
                keys: random_keys,
            },
            MaskBits { id, bits },
        ))
    }

    /// Returns the choice bits.
    pub fn choices(&self) -> &[bool] {
        &self.choices
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether there are no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the keys.
    pub fn keys(&self) -> &[Block] {
        &self.keys
    }

    pub(crate) fn into_keys(self) -> Vec<Block> {
        self.keys
    }
}

/// A precomputed pool of random COTs, sender side.
///
/// Each item is a 16 byte key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SenderPool {
    keys: Vec<Block>,
}

impl SenderPool {
    /// The byte length of one item.
    pub const ITEM_LEN: usize = Block::LEN;

    /// Creates a pool from random COT keys.
    pub fn new(keys: Vec<Block>) -> Self {
        Self { keys }
    }

    /// Returns the number of items in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Takes the first `count` items from the pool.
    pub fn take(&mut self, count: usize) -> Result<RCOTSenderOutput<Block>, ProtocolError> {
        if count > self.keys.len() {
            return Err(ProtocolError::InsufficientPrecomputation {
                expected: count,
                actual: self.keys.len(),
            });
        }

        Ok(RCOTSenderOutput {
            id: TransferId::default(),
            msgs: self.keys.drain(..count).collect(),
        })
    }

    /// Encodes the pool.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.keys.iter().flat_map(|key| key.to_bytes()).collect()
    }

    /// Decodes a pool.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() % Self::ITEM_LEN != 0 {
            return Err(ProtocolError::InvalidParameter(format!(
                "sender pool length {} is not a multiple of {}",
                bytes.len(),
                Self::ITEM_LEN
            )));
        }

        let keys = bytes
            .chunks_exact(Self::ITEM_LEN)
            .map(|chunk| Block::try_from(chunk).expect("chunk is a block"))
            .collect();

        Ok(Self { keys })
    }
}

impl From<RCOTSenderOutput<Block>> for SenderPool {
    fn from(output: RCOTSenderOutput<Block>) -> Self {
        Self::new(output.msgs)
    }
}

/// A precomputed pool of random COTs, receiver side.
///
/// Each item is a choice byte (`0` or `1`) followed by a 16 byte key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiverPool {
    choices: Vec<bool>,
    keys: Vec<Block>,
}

impl ReceiverPool {
    /// The byte length of one item.
    pub const ITEM_LEN: usize = 1 + Block::LEN;

    /// Creates a pool from random COT choices and keys.
    pub fn new(choices: Vec<bool>, keys: Vec<Block>) -> Result<Self, ProtocolError> {
        if choices.len() != keys.len() {
            return Err(ProtocolError::InvalidParameter(format!(
                "receiver pool has {} choices for {} keys",
                choices.len(),
                keys.len()
            )));
        }

        Ok(Self { choices, keys })
    }

    /// Returns the number of items in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Takes the first `count` items from the pool.
    pub fn take(
        &mut self,
        count: usize,
    ) -> Result<RCOTReceiverOutput<bool, Block>, ProtocolError> {
        if count > self.keys.len() {
            return Err(ProtocolError::InsufficientPrecomputation {
                expected: count,
                actual: self.keys.len(),
            });
        }

        Ok(RCOTReceiverOutput {
            id: TransferId::default(),
            choices: self.choices.drain(..count).collect(),
            msgs: self.keys.drain(..count).collect(),
        })
    }

    /// Encodes the pool.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len() * Self::ITEM_LEN);
        for (&choice, key) in self.choices.iter().zip(&self.keys) {
            bytes.push(choice as u8);
            bytes.extend_from_slice(key.as_ref());
        }
        bytes
    }

    /// Decodes a pool.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ProtocolError> {
        if bytes.len() % Self::ITEM_LEN != 0 {
            return Err(ProtocolError::InvalidParameter(format!(
                "receiver pool length {} is not a multiple of {}",
                bytes.len(),
                Self::ITEM_LEN
            )));
        }

        let count = bytes.len() / Self::ITEM_LEN;
        let mut choices = Vec::with_capacity(count);
        let mut keys = Vec::with_capacity(count);
        for item in bytes.chunks_exact(Self::ITEM_LEN) {
            let choice = match item[0] {
                0 => false,
                1 => true,
                byte => {
                    return Err(ProtocolError::InvalidParameter(format!(
                        "invalid choice byte in receiver pool: {byte}"
                    )))
                }
            };
            choices.push(choice);
            keys.push(Block::try_from(&item[1..]).expect("item holds a block"));
        }

        Ok(Self { choices, keys })
    }
}

impl From<RCOTReceiverOutput<bool, Block>> for ReceiverPool {
    fn from(output: RCOTReceiverOutput<bool, Block>) -> Self {
        Self {
            choices: output.choices,
            keys: output.msgs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ideal::cot::IdealCOT, test::assert_cot};

    #[test]
    fn test_derandomize() {
        let mut ideal = IdealCOT::default();
        let (sender_rcot, receiver_rcot) = ideal.random_correlated(50);

        let choices: Vec<bool> = (0..50).map(|i| i % 3 == 0).collect();
        let (receiver_keys, mask) = ReceiverKeys::derandomize(
            TransferId::default(),
            choices.clone(),
            &receiver_rcot.choices,
            receiver_rcot.msgs,
        )
        .unwrap();

        let sender_keys = SenderKeys::derandomize(ideal.delta(), sender_rcot.msgs, &mask).unwrap();

        assert_eq!(receiver_keys.choices(), &choices[..]);
        assert_cot(
            ideal.delta(),
            &choices,
            sender_keys.keys(),
            receiver_keys.keys(),
        );
    }

    #[test]
    fn test_derandomize_rejects_short_mask() {
        let mask = MaskBits {
            id: TransferId::default(),
            bits: vec![true; 3],
        };

        let err = SenderKeys::derandomize(Block::ONES, vec![Block::ZERO; 4], &mask).unwrap_err();
        assert!(err.is_abort());
    }

    #[test]
    fn test_derandomize_rejects_mismatched_count() {
        let err = ReceiverKeys::derandomize(
            TransferId::default(),
            vec![true; 4],
            &[false; 3],
            vec![Block::ZERO; 3],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ProtocolError::MismatchedBatchSize {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_mask_bits_encoding() {
        let mask = MaskBits {
            id: TransferId::default(),
            bits: vec![true, false, true, true, false, false, false, false, true, true],
        };

        let bytes = mask.to_bytes();
        assert_eq!(bytes.len(), MaskBits::byte_len(10));
        assert_eq!(&bytes[8..], &[0b0000_1101, 0b0000_0011]);
        assert_eq!(MaskBits::from_bytes(&bytes, 10).unwrap(), mask);

        assert!(MaskBits::from_bytes(&bytes, 9).unwrap_err().is_abort());
        assert!(MaskBits::from_bytes(&bytes[..9], 10).unwrap_err().is_abort());
        assert!(MaskBits::from_bytes(&bytes, 17).unwrap_err().is_abort());
    }

    #[test]
    fn test_pool_take() {
        let mut ideal = IdealCOT::default();
        let (sender_rcot, receiver_rcot) = ideal.random_correlated(10);

        let mut sender_pool = SenderPool::from(sender_rcot);
        let mut receiver_pool = ReceiverPool::from(receiver_rcot);

        let sender = sender_pool.take(6).unwrap();
        let receiver = receiver_pool.take(6).unwrap();
        assert_cot(ideal.delta(), &receiver.choices, &sender.msgs, &receiver.msgs);
        assert_eq!(sender_pool.len(), 4);
        assert_eq!(receiver_pool.len(), 4);

        assert!(matches!(
            sender_pool.take(5).unwrap_err(),
            ProtocolError::InsufficientPrecomputation {
                expected: 5,
                actual: 4
            }
        ));
        assert!(matches!(
            receiver_pool.take(5).unwrap_err(),
            ProtocolError::InsufficientPrecomputation {
                expected: 5,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_pool_encoding() {
        let mut ideal = IdealCOT::default();
        let (sender_rcot, receiver_rcot) = ideal.random_correlated(7);

        let sender_pool = SenderPool::from(sender_rcot);
        let receiver_pool = ReceiverPool::from(receiver_rcot);

        let sender_bytes = sender_pool.to_bytes();
        let receiver_bytes = receiver_pool.to_bytes();
        assert_eq!(sender_bytes.len(), 7 * SenderPool::ITEM_LEN);
        assert_eq!(receiver_bytes.len(), 7 * ReceiverPool::ITEM_LEN);

        assert_eq!(SenderPool::from_bytes(&sender_bytes).unwrap(), sender_pool);
        assert_eq!(
            ReceiverPool::from_bytes(&receiver_bytes).unwrap(),
            receiver_pool
        );

        assert!(SenderPool::from_bytes(&sender_bytes[1..]).is_err());
        assert!(ReceiverPool::from_bytes(&receiver_bytes[1..]).is_err());

        let mut bad_choice = receiver_bytes;
        bad_choice[0] = 2;
        assert!(ReceiverPool::from_bytes(&bad_choice).is_err());
    }
}
