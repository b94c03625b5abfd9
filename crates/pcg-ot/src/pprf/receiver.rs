use enum_try_as_inner::EnumTryAsInner;
use pcg_common::{cpu::CpuBackend, Context};
use pcg_core::Block;
use pcg_ot_core::{
    bootstrap::ReceiverPool,
    pprf::{
        bootstrap_count, choice_bits,
        msgs::LevelCorrection,
        receiver::{state, Receiver as ReceiverCore},
        PprfConfig, PprfReceiverOutput,
    },
    RCOTReceiverOutput, TransferId,
};
use serio::{stream::IoStreamExt, SinkExt};
use tracing::{debug, instrument, trace};

use crate::{RandomCOTReceiver, ReceiverError};

#[derive(Debug, EnumTryAsInner)]
#[derive_err(Debug)]
pub(crate) enum State {
    Initialized(ReceiverCore<state::Initialized>),
    Extension(ReceiverCore<state::Extension>),
    Error,
}

/// Punctured PRF receiver.
///
/// Holds one punctured index per instance and outputs every other leaf.
#[derive(Debug)]
pub struct Receiver<RandomCOT> {
    state: State,
    rcot: RandomCOT,
}

impl<RandomCOT: Send> Receiver<RandomCOT> {
    /// Creates a new receiver.
    ///
    /// # Arguments
    ///
    /// * `config` - The punctured PRF configuration.
    /// * `rcot` - The random COT receiver which provides the bootstrap COTs.
    pub fn new(config: PprfConfig, rcot: RandomCOT) -> Self {
        Self {
            state: State::Initialized(ReceiverCore::new(config)),
            rcot,
        }
    }

    /// Sets up the receiver.
    pub fn setup(&mut self) -> Result<(), ReceiverError> {
        let receiver = std::mem::replace(&mut self.state, State::Error).try_into_initialized()?;

        self.state = State::Extension(receiver.setup());

        Ok(())
    }

    /// Returns the id of the next transfer.
    pub fn transfer_id(&self) -> Result<TransferId, ReceiverError> {
        Ok(self.state.try_as_extension()?.transfer_id())
    }

    /// Checks a batch before any bootstrap COT is consumed.
    pub(crate) fn check(&self, alphas: &[usize], each_num: usize) -> Result<(), ReceiverError> {
        self.state
            .try_as_extension()?
            .config()
            .check(alphas.len(), each_num)?;
        choice_bits(alphas, each_num)?;

        Ok(())
    }

    /// Runs a batch on fresh bootstrap COTs.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `alphas` - The punctured index of each instance.
    /// * `each_num` - The number of leaves of each instance.
    #[instrument(level = "debug", fields(thread = %ctx.id()), skip_all, err)]
    pub async fn puncture<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        alphas: &[usize],
        each_num: usize,
    ) -> Result<PprfReceiverOutput, ReceiverError>
    where
        RandomCOT: RandomCOTReceiver<Ctx, bool, Block>,
    {
        self.check(alphas, each_num)?;

        let count = bootstrap_count(alphas.len(), each_num);
        debug!(batch_num = alphas.len(), each_num, count, "requesting bootstrap COTs");

        let random = self.rcot.receive_random_correlated(ctx, count).await?;

        self.reconstruct(ctx, alphas, each_num, random).await
    }

    /// Runs a batch on bootstrap COTs taken from a precomputed pool.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `alphas` - The punctured index of each instance.
    /// * `each_num` - The number of leaves of each instance.
    /// * `pool` - The precomputed COTs.
    #[instrument(level = "debug", fields(thread = %ctx.id()), skip_all, err)]
    pub async fn puncture_precomputed<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        alphas: &[usize],
        each_num: usize,
        pool: &mut ReceiverPool,
    ) -> Result<PprfReceiverOutput, ReceiverError> {
        self.check(alphas, each_num)?;

        let count = bootstrap_count(alphas.len(), each_num);
        let random = pool.take(count)?;
        debug!(count, remaining = pool.len(), "took bootstrap COTs from pool");

        self.reconstruct(ctx, alphas, each_num, random).await
    }

    async fn reconstruct<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        alphas: &[usize],
        each_num: usize,
        random: RCOTReceiverOutput<bool, Block>,
    ) -> Result<PprfReceiverOutput, ReceiverError> {
        let receiver = self.state.try_as_extension_mut()?;

        let RCOTReceiverOutput { choices, msgs, .. } = random;
        let (mut batch, mask) = receiver.begin(alphas, each_num, &choices, msgs)?;

        ctx.io_mut().send(mask.to_bytes()).await?;

        let batch_num = batch.batch_num();
        while !batch.is_done() {
            let bytes: Vec<u8> = ctx.io_mut().expect_next().await?;
            let msg = LevelCorrection::from_bytes(&bytes, batch_num)?;
            trace!(level = msg.level, "received level correction");

            batch = CpuBackend::blocking(move || batch.reconstruct_level(msg).map(|_| batch))
                .await?;
        }

        Ok(batch.finish()?)
    }
}
