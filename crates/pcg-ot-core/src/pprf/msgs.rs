//! Messages for the punctured PRF protocol.

use pcg_core::Block;

use crate::{ProtocolError, TransferId};

/// The corrections of one tree level, one block per instance.
///
/// For instance `i` the correction is `K0 ⊕ q`, where `K0` is the XOR of the left nodes of the
/// level and `q` is the bootstrap key assigned to the level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCorrection {
    /// The transfer the corrections belong to.
    pub id: TransferId,
    /// The tree level, starting at 2.
    pub level: u32,
    /// The corrections.
    pub corrections: Vec<Block>,
}

impl LevelCorrection {
    /// Returns the byte length of the encoding for a batch of `batch_num` instances.
    pub fn byte_len(batch_num: usize) -> usize {
        TransferId::LEN + 4 + batch_num * Block::LEN
    }

    /// Encodes the message.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(Self::byte_len(self.corrections.len()));
        bytes.extend_from_slice(&self.id.to_bytes());
        bytes.extend_from_slice(&self.level.to_le_bytes());
        for correction in &self.corrections {
            bytes.extend_from_slice(correction.as_ref());
        }
        bytes
    }

    /// Decodes the message of a batch of `batch_num` instances.
    pub fn from_bytes(bytes: &[u8], batch_num: usize) -> Result<Self, ProtocolError> {
        if bytes.len() != Self::byte_len(batch_num) {
            return Err(ProtocolError::Abort(format!(
                "level correction has length {}, expected {}",
                bytes.len(),
                Self::byte_len(batch_num)
            )));
        }

        let (id, rest) = bytes.split_at(TransferId::LEN);
        let (level, blocks) = rest.split_at(4);

        let mut id_bytes = [0u8; 8];
        id_bytes.copy_from_slice(id);
        let mut level_bytes = [0u8; 4];
        level_bytes.copy_from_slice(level);

        let corrections = blocks
            .chunks_exact(Block::LEN)
            .map(|chunk| Block::try_from(chunk).expect("chunk is a block"))
            .collect();

        Ok(Self {
            id: TransferId::from_bytes(id_bytes),
            level: u32::from_le_bytes(level_bytes),
            corrections,
        })
    }
}
