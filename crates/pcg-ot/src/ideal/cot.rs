//! Ideal functionality for random correlated oblivious transfer.

use async_trait::async_trait;

use pcg_common::{
    ideal::{ideal_f2p, Alice, Bob},
    Context,
};
use pcg_core::Block;
use pcg_ot_core::{ideal::cot::IdealCOT, RCOTReceiverOutput, RCOTSenderOutput};

use crate::{OTError, RandomCOTReceiver, RandomCOTSender};

fn rcot(
    f: &mut IdealCOT,
    sender_count: usize,
    receiver_count: usize,
) -> (RCOTSenderOutput<Block>, RCOTReceiverOutput<bool, Block>) {
    assert_eq!(sender_count, receiver_count);

    f.random_correlated(sender_count)
}

/// Returns an ideal random COT sender and receiver.
pub fn ideal_rcot() -> (IdealCOTSender, IdealCOTReceiver) {
    let (alice, bob) = ideal_f2p(IdealCOT::default());
    (IdealCOTSender(alice), IdealCOTReceiver(bob))
}

/// Ideal random COT sender.
#[derive(Debug, Clone)]
pub struct IdealCOTSender(Alice<IdealCOT>);

impl IdealCOTSender {
    /// Returns the correlation of the functionality.
    pub fn delta(&self) -> Block {
        self.0.lock().delta()
    }

    /// Sets the correlation of the functionality.
    pub fn set_delta(&self, delta: Block) {
        self.0.lock().set_delta(delta)
    }
}

#[async_trait]
impl<Ctx: Context> RandomCOTSender<Ctx, Block> for IdealCOTSender {
    async fn send_random_correlated(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<RCOTSenderOutput<Block>, OTError> {
        Ok(self.0.call(ctx, count, rcot).await)
    }
}

/// Ideal random COT receiver.
#[derive(Debug, Clone)]
pub struct IdealCOTReceiver(Bob<IdealCOT>);

#[async_trait]
impl<Ctx: Context> RandomCOTReceiver<Ctx, bool, Block> for IdealCOTReceiver {
    async fn receive_random_correlated(
        &mut self,
        ctx: &mut Ctx,
        count: usize,
    ) -> Result<RCOTReceiverOutput<bool, Block>, OTError> {
        Ok(self.0.call(ctx, count, rcot).await)
    }
}
