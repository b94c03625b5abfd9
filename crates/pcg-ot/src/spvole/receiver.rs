use pcg_common::Context;
use pcg_core::Block;
use pcg_fields::{ExtensionField, Field};
use pcg_ot_core::{
    spvole::{msgs::MaskedPoints, Receiver as ReceiverCore},
    ProtocolError, SpVoleReceiverOutput, VoleReceiverOutput,
};
use serio::{stream::IoStreamExt, SinkExt};
use tracing::{debug, instrument};

use crate::{pprf, spvole::ReceiverError, PprfConfig, RandomCOTSender, RandomVoleReceiver};

/// Single-point VOLE receiver.
///
/// Holds the VOLE correlation `Δ ∈ F`.
#[derive(Debug)]
pub struct Receiver<RandomCOT, BaseVole, S, F> {
    pprf: pprf::Sender<RandomCOT>,
    base: BaseVole,
    core: ReceiverCore<S, F>,
}

impl<RandomCOT, BaseVole, S, F> Receiver<RandomCOT, BaseVole, S, F>
where
    RandomCOT: Send,
    BaseVole: Send,
    S: Field,
    F: ExtensionField<S>,
{
    /// Creates a new receiver.
    ///
    /// # Arguments
    ///
    /// * `config` - The punctured PRF configuration.
    /// * `rcot` - The random COT sender which provides the bootstrap COTs.
    /// * `base` - The random VOLE receiver which provides the base VOLE.
    /// * `delta` - The VOLE correlation, which must match the base VOLE.
    pub fn new(config: PprfConfig, rcot: RandomCOT, base: BaseVole, delta: F) -> Self {
        Self {
            pprf: pprf::Sender::new(config, rcot),
            base,
            core: ReceiverCore::new(delta),
        }
    }

    /// Sets up the receiver with the COT correlation of the bootstrap COTs.
    pub fn setup(&mut self, cot_delta: Block) -> Result<(), ReceiverError> {
        Ok(self.pprf.setup(cot_delta)?)
    }

    /// Returns the VOLE correlation.
    pub fn delta(&self) -> F {
        self.core.delta()
    }

    /// Extends `batch_num` single-point VOLEs of length `each_num`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `batch_num` - The number of instances.
    /// * `each_num` - The length of each vector.
    #[instrument(level = "debug", fields(thread = %ctx.id()), skip_all, err)]
    pub async fn extend<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        batch_num: usize,
        each_num: usize,
    ) -> Result<SpVoleReceiverOutput<F>, ReceiverError>
    where
        RandomCOT: RandomCOTSender<Ctx, Block>,
        BaseVole: RandomVoleReceiver<Ctx, F>,
    {
        self.pprf.check(batch_num, each_num)?;

        debug!(count = batch_num, "requesting base VOLE");
        let base = self.base.receive_random_vole(ctx, batch_num).await?;

        self.extend_with_base(ctx, batch_num, each_num, base).await
    }

    /// Extends `batch_num` single-point VOLEs of length `each_num`, using precomputed base VOLE
    /// correlations.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `batch_num` - The number of instances.
    /// * `each_num` - The length of each vector.
    /// * `base` - One base VOLE correlation per instance.
    #[instrument(level = "debug", fields(thread = %ctx.id()), skip_all, err)]
    pub async fn extend_with_base<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        batch_num: usize,
        each_num: usize,
        base: VoleReceiverOutput<F>,
    ) -> Result<SpVoleReceiverOutput<F>, ReceiverError>
    where
        RandomCOT: RandomCOTSender<Ctx, Block>,
    {
        self.pprf.check(batch_num, each_num)?;

        if base.v.len() != batch_num {
            return Err(ProtocolError::MismatchedBatchSize {
                expected: batch_num,
                actual: base.v.len(),
            }
            .into());
        }

        let bytes: Vec<u8> = ctx.io_mut().expect_next().await?;
        let masks = MaskedPoints::<S>::from_bytes(&bytes, batch_num)?;

        let pprf = self.pprf.puncture(ctx, batch_num, each_num).await?;

        let (output, correction) = self.core.correct(base, masks, pprf)?;
        debug!(id = %correction.id, "sending final corrections");
        ctx.io_mut().send(correction.to_bytes()).await?;

        Ok(output)
    }
}
