//! Ideal functionality for random subfield VOLE.

use async_trait::async_trait;

use pcg_common::{
    ideal::{ideal_f2p, Alice, Bob},
    Context,
};
use pcg_fields::{ExtensionField, Field};
use pcg_ot_core::{ideal::vole::IdealVole, VoleReceiverOutput, VoleSenderOutput};

use crate::{OTError, RandomVoleReceiver, RandomVoleSender};

fn vole<S: Field, F: ExtensionField<S>>(
    f: &mut IdealVole<S, F>,
    sender_count: usize,
    receiver_count: usize,
) -> (VoleSenderOutput<S, F>, VoleReceiverOutput<F>) {
    assert_eq!(sender_count, receiver_count);

    f.random(sender_count)
}

/// Returns an ideal random VOLE sender and receiver.
pub fn ideal_vole<S, F>() -> (IdealVoleSender<S, F>, IdealVoleReceiver<S, F>)
where
    S: Field,
    F: ExtensionField<S>,
{
    let (alice, bob) = ideal_f2p(IdealVole::default());
    (IdealVoleSender(alice), IdealVoleReceiver(bob))
}

/// Ideal random VOLE sender.
#[derive(Debug, Clone)]
pub struct IdealVoleSender<S, F>(Alice<IdealVole<S, F>>);

/// Ideal random VOLE receiver.
#[derive(Debug, Clone)]
pub struct IdealVoleReceiver<S, F>(Bob<IdealVole<S, F>>);

impl<S: Field, F: ExtensionField<S>> IdealVoleReceiver<S, F> {
    /// Returns the correlation of the functionality.
    pub fn delta(&self) -> F {
        self.0.lock().delta()
    }

    /// Sets the correlation of the functionality.
    pub fn set_delta(&self, delta: F) {
        self.0.lock().set_delta(delta)
    }
}

#[async_trait]
impl<Ctx, S, F> RandomVoleSender<Ctx, S, F> for IdealVoleSender<S, F>
where
    Ctx: Context,
    S: Field,
    F: ExtensionField<S>,
{
    async fn send_random_vole(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<VoleSenderOutput<S, F>, OTError> {
        Ok(self.0.call(ctx, count, vole::<S, F>).await)
    }
}

#[async_trait]
impl<Ctx, S, F> RandomVoleReceiver<Ctx, F> for IdealVoleReceiver<S, F>
where
    Ctx: Context,
    S: Field,
    F: ExtensionField<S>,
{
    async fn receive_random_vole(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<VoleReceiverOutput<F>, OTError> {
        Ok(self.0.call(ctx, count, vole::<S, F>).await)
    }
}
