use enum_try_as_inner::EnumTryAsInner;
use pcg_common::{cpu::CpuBackend, Context};
use pcg_core::Block;
use pcg_ot_core::{
    bootstrap::{MaskBits, SenderPool},
    pprf::{
        bootstrap_count,
        sender::{state, Sender as SenderCore},
        PprfConfig, PprfSenderOutput,
    },
    RCOTSenderOutput, TransferId,
};
use serio::{stream::IoStreamExt, SinkExt};
use tracing::{debug, instrument, trace};

use crate::{RandomCOTSender, SenderError};

#[derive(Debug, EnumTryAsInner)]
#[derive_err(Debug)]
pub(crate) enum State {
    Initialized(SenderCore<state::Initialized>),
    Extension(SenderCore<state::Extension>),
    Error,
}

/// Punctured PRF sender.
///
/// Holds the COT correlation `Δ` and outputs every leaf of every tree.
#[derive(Debug)]
pub struct Sender<RandomCOT> {
    state: State,
    rcot: RandomCOT,
}

impl<RandomCOT: Send> Sender<RandomCOT> {
    /// Creates a new sender.
    ///
    /// # Arguments
    ///
    /// * `config` - The punctured PRF configuration.
    /// * `rcot` - The random COT sender which provides the bootstrap COTs.
    pub fn new(config: PprfConfig, rcot: RandomCOT) -> Self {
        Self {
            state: State::Initialized(SenderCore::new(config)),
            rcot,
        }
    }

    /// Sets up the sender with the COT correlation of `rcot`.
    pub fn setup(&mut self, delta: Block) -> Result<(), SenderError> {
        let sender = std::mem::replace(&mut self.state, State::Error).try_into_initialized()?;

        self.state = State::Extension(sender.setup(delta));

        Ok(())
    }

    /// Replaces the COT correlation.
    ///
    /// `rcot` must deal COTs for the new correlation from now on.
    pub fn reset(&mut self, delta: Block) -> Result<(), SenderError> {
        self.state.try_as_extension_mut()?.set_delta(delta);

        Ok(())
    }

    /// Returns the COT correlation.
    pub fn delta(&self) -> Result<Block, SenderError> {
        Ok(self.state.try_as_extension()?.delta())
    }

    /// Returns the id of the next transfer.
    pub fn transfer_id(&self) -> Result<TransferId, SenderError> {
        Ok(self.state.try_as_extension()?.transfer_id())
    }

    /// Checks a batch before any bootstrap COT is consumed.
    pub(crate) fn check(&self, batch_num: usize, each_num: usize) -> Result<(), SenderError> {
        self.state
            .try_as_extension()?
            .config()
            .check(batch_num, each_num)?;

        Ok(())
    }

    /// Runs a batch on fresh bootstrap COTs.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `batch_num` - The number of instances.
    /// * `each_num` - The number of leaves of each instance.
    #[instrument(level = "debug", fields(thread = %ctx.id()), skip_all, err)]
    pub async fn puncture<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        batch_num: usize,
        each_num: usize,
    ) -> Result<PprfSenderOutput, SenderError>
    where
        RandomCOT: RandomCOTSender<Ctx, Block>,
    {
        self.check(batch_num, each_num)?;

        let count = bootstrap_count(batch_num, each_num);
        debug!(batch_num, each_num, count, "requesting bootstrap COTs");

        let RCOTSenderOutput { msgs: random, .. } =
            self.rcot.send_random_correlated(ctx, count).await?;

        self.expand(ctx, batch_num, each_num, random).await
    }

    /// Runs a batch on bootstrap COTs taken from a precomputed pool.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `batch_num` - The number of instances.
    /// * `each_num` - The number of leaves of each instance.
    /// * `pool` - The precomputed COTs.
    #[instrument(level = "debug", fields(thread = %ctx.id()), skip_all, err)]
    pub async fn puncture_precomputed<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        batch_num: usize,
        each_num: usize,
        pool: &mut SenderPool,
    ) -> Result<PprfSenderOutput, SenderError> {
        self.check(batch_num, each_num)?;

        let count = bootstrap_count(batch_num, each_num);
        let RCOTSenderOutput { msgs: random, .. } = pool.take(count)?;
        debug!(count, remaining = pool.len(), "took bootstrap COTs from pool");

        self.expand(ctx, batch_num, each_num, random).await
    }

    async fn expand<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        batch_num: usize,
        each_num: usize,
        random: Vec<Block>,
    ) -> Result<PprfSenderOutput, SenderError> {
        let sender = self.state.try_as_extension_mut()?;

        let bytes: Vec<u8> = ctx.io_mut().expect_next().await?;
        let mask = MaskBits::from_bytes(&bytes, random.len())?;

        let mut batch = sender.begin(batch_num, each_num, random, &mask)?;

        while !batch.is_done() {
            let (expanded, msg) = CpuBackend::blocking(move || {
                let msg = batch.expand_level();
                (batch, msg)
            })
            .await;
            batch = expanded;

            let msg = msg?;
            trace!(level = msg.level, "sending level correction");
            ctx.io_mut().send(msg.to_bytes()).await?;
        }

        Ok(batch.finish()?)
    }
}
