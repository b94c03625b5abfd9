use std::marker::PhantomData;

use pcg_fields::{ExtensionField, Field};

use crate::{
    pprf::PprfSenderOutput,
    spvole::msgs::{FinalCorrection, MaskedPoints},
    ProtocolError, SpVoleReceiverOutput, TransferId, VoleReceiverOutput,
};

/// Single-point VOLE receiver.
///
/// Holds the correlation `Δ`.
#[derive(Debug)]
pub struct Receiver<S, F> {
    delta: F,
    transfer_id: TransferId,
    _pd: PhantomData<S>,
}

impl<S: Field, F: ExtensionField<S>> Receiver<S, F> {
    /// Creates a new receiver.
    ///
    /// # Arguments
    ///
    /// * `delta` - The correlation, shared with the base VOLE functionality.
    pub fn new(delta: F) -> Self {
        Self {
            delta,
            transfer_id: TransferId::default(),
            _pd: PhantomData,
        }
    }

    /// Returns the correlation.
    pub fn delta(&self) -> F {
        self.delta
    }

    /// Returns the id of the next transfer.
    pub fn transfer_id(&self) -> TransferId {
        self.transfer_id
    }

    /// Computes the output and the final corrections for the sender.
    ///
    /// # Arguments
    ///
    /// * `base` - One base VOLE correlation per instance.
    /// * `masks` - The masked points sent by the sender.
    /// * `pprf` - The punctured PRF leaves, one tree per instance.
    pub fn correct(
        &mut self,
        base: VoleReceiverOutput<F>,
        masks: MaskedPoints<S>,
        pprf: PprfSenderOutput,
    ) -> Result<(SpVoleReceiverOutput<F>, FinalCorrection<F>), ProtocolError> {
        let batch_num = pprf.leaves.len();

        if base.v.len() != batch_num {
            return Err(ProtocolError::MismatchedBatchSize {
                expected: batch_num,
                actual: base.v.len(),
            });
        }

        self.transfer_id.check_peer(masks.id)?;

        if masks.masks.len() != batch_num {
            return Err(ProtocolError::Abort(format!(
                "received {} masked points for {} instances",
                masks.masks.len(),
                batch_num
            )));
        }

        let mut q = Vec::with_capacity(batch_num);
        let mut corrections = Vec::with_capacity(batch_num);

        for ((leaves, &v), &mask) in pprf.leaves.into_iter().zip(&base.v).zip(&masks.masks) {
            let values: Vec<F> = leaves.into_iter().map(F::from_block).collect();
            let sum = values.iter().fold(F::zero(), |acc, &x| acc + x);
            let gamma = v - F::mix_mul(mask, self.delta);

            corrections.push(gamma - sum);
            q.push(values);
        }

        self.transfer_id = masks.id;
        let id = self.transfer_id.next_id();

        Ok((
            SpVoleReceiverOutput { id, q },
            FinalCorrection { id, corrections },
        ))
    }
}
