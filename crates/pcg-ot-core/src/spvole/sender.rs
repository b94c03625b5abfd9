use std::marker::PhantomData;

use pcg_fields::{ExtensionField, Field};
use rand::Rng;

use crate::{
    pprf::PprfReceiverOutput,
    spvole::msgs::{FinalCorrection, MaskedPoints},
    ProtocolError, SpVoleSenderOutput, TransferId, VoleSenderOutput,
};

/// Single-point VOLE sender.
///
/// Holds the punctured indices and the nonzero points `β`.
#[derive(Debug)]
pub struct Sender<S, F> {
    transfer_id: TransferId,
    _pd: PhantomData<(S, F)>,
}

impl<S: Field, F: ExtensionField<S>> Sender<S, F> {
    /// Creates a new sender.
    pub fn new() -> Self {
        Self {
            transfer_id: TransferId::default(),
            _pd: PhantomData,
        }
    }

    /// Returns the id of the next transfer.
    pub fn transfer_id(&self) -> TransferId {
        self.transfer_id
    }

    /// Samples a nonzero point `β` per instance and masks it with the base VOLE.
    ///
    /// Returns the batch and the masked points to send to the receiver.
    ///
    /// # Arguments
    ///
    /// * `rng` - The randomness for the points.
    /// * `base` - One base VOLE correlation per instance.
    pub fn mask<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        base: VoleSenderOutput<S, F>,
    ) -> Result<(SenderBatch<S, F>, MaskedPoints<S>), ProtocolError> {
        if base.u.len() != base.w.len() {
            return Err(ProtocolError::InvalidParameter(format!(
                "base VOLE has {} subfield elements for {} field elements",
                base.u.len(),
                base.w.len()
            )));
        }

        if base.u.is_empty() {
            return Err(ProtocolError::InvalidParameter(
                "batch must not be empty".to_string(),
            ));
        }

        let betas: Vec<S> = (0..base.u.len()).map(|_| S::rand_nonzero(rng)).collect();
        let masks = betas.iter().zip(&base.u).map(|(&b, &u)| b - u).collect();

        let id = self.transfer_id.next_id();

        Ok((
            SenderBatch {
                id,
                betas,
                w: base.w,
            },
            MaskedPoints { id, masks },
        ))
    }
}

impl<S: Field, F: ExtensionField<S>> Default for Sender<S, F> {
    fn default() -> Self {
        Self::new()
    }
}

/// A batch in progress on the sender side.
#[derive(Debug)]
pub struct SenderBatch<S, F> {
    id: TransferId,
    betas: Vec<S>,
    w: Vec<F>,
}

impl<S: Field, F: ExtensionField<S>> SenderBatch<S, F> {
    /// Returns the transfer id.
    pub fn id(&self) -> TransferId {
        self.id
    }

    /// Returns the number of instances.
    pub fn batch_num(&self) -> usize {
        self.betas.len()
    }

    /// Finishes the batch with the punctured leaves and the receiver's final corrections.
    ///
    /// Every value except the punctured one is the leaf read as a field element. The punctured
    /// value is `w - d - Σ_{j≠α} t[j]`.
    pub fn finish(
        self,
        pprf: PprfReceiverOutput,
        correction: FinalCorrection<F>,
    ) -> Result<SpVoleSenderOutput<S, F>, ProtocolError> {
        if correction.id != self.id {
            return Err(ProtocolError::Abort(format!(
                "expected final correction for {}, got {}",
                self.id, correction.id
            )));
        }

        if correction.corrections.len() != self.batch_num() {
            return Err(ProtocolError::Abort(format!(
                "received {} final corrections for {} instances",
                correction.corrections.len(),
                self.batch_num()
            )));
        }

        if pprf.punctured.len() != self.batch_num() {
            return Err(ProtocolError::MismatchedBatchSize {
                expected: self.batch_num(),
                actual: pprf.punctured.len(),
            });
        }

        let mut alphas = Vec::with_capacity(self.batch_num());
        let mut t = Vec::with_capacity(self.batch_num());

        for ((punctured, &w), &d) in pprf
            .punctured
            .into_iter()
            .zip(&self.w)
            .zip(&correction.corrections)
        {
            let alpha = punctured.alpha;
            let mut values: Vec<F> = punctured
                .leaves
                .into_iter()
                .map(F::from_block)
                .collect();

            values[alpha] = F::zero();
            let sum = values.iter().fold(F::zero(), |acc, &x| acc + x);
            values[alpha] = w - d - sum;

            alphas.push(alpha);
            t.push(values);
        }

        Ok(SpVoleSenderOutput {
            id: self.id,
            alphas,
            betas: self.betas,
            t,
        })
    }
}
