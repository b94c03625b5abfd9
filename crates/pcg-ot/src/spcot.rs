//! Async single-point COT, the binary materialization of the punctured PRF.

use pcg_common::Context;
use pcg_core::Block;
use pcg_ot_core::{spcot, SPCOTReceiverOutput, SPCOTSenderOutput};

use crate::{
    pprf, PprfConfig, RandomCOTReceiver, RandomCOTSender, ReceiverError, ReceiverPool,
    SenderError, SenderPool,
};

/// SPCOT sender.
///
/// Outputs `v` with `w = v ⊕ e_α·Δ` on the receiver side.
#[derive(Debug)]
pub struct Sender<RandomCOT>(pprf::Sender<RandomCOT>);

impl<RandomCOT: Send> Sender<RandomCOT> {
    /// Creates a new sender.
    pub fn new(config: PprfConfig, rcot: RandomCOT) -> Self {
        Self(pprf::Sender::new(config, rcot))
    }

    /// Sets up the sender with the COT correlation of the bootstrap COTs.
    pub fn setup(&mut self, delta: Block) -> Result<(), SenderError> {
        self.0.setup(delta)
    }

    /// Extends `batch_num` single-point COTs of length `each_num`.
    pub async fn extend<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        batch_num: usize,
        each_num: usize,
    ) -> Result<SPCOTSenderOutput<Block>, SenderError>
    where
        RandomCOT: RandomCOTSender<Ctx, Block>,
    {
        let output = self.0.puncture(ctx, batch_num, each_num).await?;

        Ok(spcot::sender_output(output))
    }

    /// Extends `batch_num` single-point COTs of length `each_num` from a precomputed pool.
    pub async fn extend_precomputed<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        batch_num: usize,
        each_num: usize,
        pool: &mut SenderPool,
    ) -> Result<SPCOTSenderOutput<Block>, SenderError> {
        let output = self
            .0
            .puncture_precomputed(ctx, batch_num, each_num, pool)
            .await?;

        Ok(spcot::sender_output(output))
    }
}

/// SPCOT receiver.
#[derive(Debug)]
pub struct Receiver<RandomCOT>(pprf::Receiver<RandomCOT>);

impl<RandomCOT: Send> Receiver<RandomCOT> {
    /// Creates a new receiver.
    pub fn new(config: PprfConfig, rcot: RandomCOT) -> Self {
        Self(pprf::Receiver::new(config, rcot))
    }

    /// Sets up the receiver.
    pub fn setup(&mut self) -> Result<(), ReceiverError> {
        self.0.setup()
    }

    /// Extends one single-point COT of length `each_num` per index in `alphas`.
    pub async fn extend<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        alphas: &[usize],
        each_num: usize,
    ) -> Result<SPCOTReceiverOutput<Block>, ReceiverError>
    where
        RandomCOT: RandomCOTReceiver<Ctx, bool, Block>,
    {
        let output = self.0.puncture(ctx, alphas, each_num).await?;

        Ok(spcot::receiver_output(output))
    }

    /// Extends one single-point COT of length `each_num` per index in `alphas` from a precomputed
    /// pool.
    pub async fn extend_precomputed<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        alphas: &[usize],
        each_num: usize,
        pool: &mut ReceiverPool,
    ) -> Result<SPCOTReceiverOutput<Block>, ReceiverError> {
        let output = self
            .0
            .puncture_precomputed(ctx, alphas, each_num, pool)
            .await?;

        Ok(spcot::receiver_output(output))
    }
}
