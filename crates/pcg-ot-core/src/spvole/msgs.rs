//! Messages for the single-point VOLE protocol.

use pcg_fields::Field;

use crate::{ProtocolError, TransferId};

/// The sender's masked points `a' = β - u`, one per instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedPoints<S> {
    /// The transfer the message belongs to.
    pub id: TransferId,
    /// The masked points.
    pub masks: Vec<S>,
}

/// The receiver's final corrections `d = v - a'·Δ - Σ q[j]`, one per instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalCorrection<F> {
    /// The transfer the message belongs to.
    pub id: TransferId,
    /// The corrections.
    pub corrections: Vec<F>,
}

fn byte_len<T: Field>(batch_num: usize) -> usize {
    TransferId::LEN + batch_num * T::BYTE_LEN
}

fn encode<T: Field>(id: TransferId, elements: &[T]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(byte_len::<T>(elements.len()));
    bytes.extend_from_slice(&id.to_bytes());
    for element in elements {
        bytes.extend(element.to_le_bytes());
    }
    bytes
}

fn decode<T: Field>(
    bytes: &[u8],
    batch_num: usize,
) -> Result<(TransferId, Vec<T>), ProtocolError> {
    if bytes.len() != byte_len::<T>(batch_num) {
        return Err(ProtocolError::Abort(format!(
            "message has length {}, expected {}",
            bytes.len(),
            byte_len::<T>(batch_num)
        )));
    }

    let (id, elements) = bytes.split_at(TransferId::LEN);
    let mut id_bytes = [0u8; 8];
    id_bytes.copy_from_slice(id);

    let elements = elements
        .chunks_exact(T::BYTE_LEN)
        .map(T::from_le_bytes)
        .collect::<Result<Vec<_>, _>>()?;

    Ok((TransferId::from_bytes(id_bytes), elements))
}

impl<S: Field> MaskedPoints<S> {
    /// Returns the byte length of the encoding for a batch of `batch_num` instances.
    pub fn byte_len(batch_num: usize) -> usize {
        byte_len::<S>(batch_num)
    }

    /// Encodes the message.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self.id, &self.masks)
    }

    /// Decodes the message of a batch of `batch_num` instances, checking field membership.
    pub fn from_bytes(bytes: &[u8], batch_num: usize) -> Result<Self, ProtocolError> {
        let (id, masks) = decode(bytes, batch_num)?;
        Ok(Self { id, masks })
    }
}

impl<F: Field> FinalCorrection<F> {
    /// Returns the byte length of the encoding for a batch of `batch_num` instances.
    pub fn byte_len(batch_num: usize) -> usize {
        byte_len::<F>(batch_num)
    }

    /// Encodes the message.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self.id, &self.corrections)
    }

    /// Decodes the message of a batch of `batch_num` instances, checking field membership.
    pub fn from_bytes(bytes: &[u8], batch_num: usize) -> Result<Self, ProtocolError> {
        let (id, corrections) = decode(bytes, batch_num)?;
        Ok(Self { id, corrections })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcg_fields::{Gf2, Gf2_64, Zp64};

    #[test]
    fn test_masked_points_encoding() {
        let msg = MaskedPoints {
            id: TransferId::default(),
            masks: vec![Gf2(true), Gf2(false), Gf2(true)],
        };

        let bytes = msg.to_bytes();
        assert_eq!(bytes.len(), MaskedPoints::<Gf2>::byte_len(3));
        assert_eq!(MaskedPoints::from_bytes(&bytes, 3).unwrap(), msg);

        let mut not_member = bytes.clone();
        not_member[8] = 2;
        assert!(MaskedPoints::<Gf2>::from_bytes(&not_member, 3)
            .unwrap_err()
            .is_abort());
        assert!(MaskedPoints::<Gf2>::from_bytes(&bytes, 4)
            .unwrap_err()
            .is_abort());
    }

    #[test]
    fn test_final_correction_encoding() {
        let msg = FinalCorrection {
            id: TransferId::default(),
            corrections: vec![Gf2_64(7), Gf2_64(u64::MAX)],
        };

        let bytes = msg.to_bytes();
        assert_eq!(bytes.len(), 8 + 16);
        assert_eq!(FinalCorrection::from_bytes(&bytes, 2).unwrap(), msg);
    }

    #[test]
    fn test_final_correction_rejects_non_member() {
        let mut bytes = TransferId::default().to_bytes().to_vec();
        bytes.extend(Zp64::MODULUS.to_le_bytes());

        assert!(FinalCorrection::<Zp64>::from_bytes(&bytes, 1)
            .unwrap_err()
            .is_abort());
    }
}
