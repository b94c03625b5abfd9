use pcg_common::Context;
use pcg_core::{prg::Prg, Block};
use pcg_fields::{ExtensionField, Field};
use pcg_ot_core::{
    spvole::{msgs::FinalCorrection, Sender as SenderCore},
    ProtocolError, SpVoleSenderOutput, VoleSenderOutput,
};
use serio::{stream::IoStreamExt, SinkExt};
use tracing::{debug, instrument};

use crate::{pprf, spvole::SenderError, PprfConfig, RandomCOTReceiver, RandomVoleSender};

/// Single-point VOLE sender.
///
/// Holds one point `α` and a random nonzero value `β ∈ S` per instance.
#[derive(Debug)]
pub struct Sender<RandomCOT, BaseVole, S, F> {
    pprf: pprf::Receiver<RandomCOT>,
    base: BaseVole,
    core: SenderCore<S, F>,
    prg: Prg,
}

impl<RandomCOT, BaseVole, S, F> Sender<RandomCOT, BaseVole, S, F>
where
    RandomCOT: Send,
    BaseVole: Send,
    S: Field,
    F: ExtensionField<S>,
{
    /// Creates a new sender.
    ///
    /// # Arguments
    ///
    /// * `config` - The punctured PRF configuration.
    /// * `rcot` - The random COT receiver which provides the bootstrap COTs.
    /// * `base` - The random VOLE sender which provides the base VOLE.
    pub fn new(config: PprfConfig, rcot: RandomCOT, base: BaseVole) -> Self {
        Self {
            pprf: pprf::Receiver::new(config, rcot),
            base,
            core: SenderCore::new(),
            prg: Prg::new(),
        }
    }

    /// Sets up the sender.
    pub fn setup(&mut self) -> Result<(), SenderError> {
        Ok(self.pprf.setup()?)
    }

    /// Extends one single-point VOLE of length `each_num` per point in `alphas`.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `alphas` - The point of each instance.
    /// * `each_num` - The length of each vector.
    #[instrument(level = "debug", fields(thread = %ctx.id()), skip_all, err)]
    pub async fn extend<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        alphas: &[usize],
        each_num: usize,
    ) -> Result<SpVoleSenderOutput<S, F>, SenderError>
    where
        RandomCOT: RandomCOTReceiver<Ctx, bool, Block>,
        BaseVole: RandomVoleSender<Ctx, S, F>,
    {
        self.pprf.check(alphas, each_num)?;

        debug!(count = alphas.len(), "requesting base VOLE");
        let base = self.base.send_random_vole(ctx, alphas.len()).await?;

        self.extend_with_base(ctx, alphas, each_num, base).await
    }

    /// Extends one single-point VOLE of length `each_num` per point in `alphas`, using
    /// precomputed base VOLE correlations.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The thread context.
    /// * `alphas` - The point of each instance.
    /// * `each_num` - The length of each vector.
    /// * `base` - One base VOLE correlation per instance.
    #[instrument(level = "debug", fields(thread = %ctx.id()), skip_all, err)]
    pub async fn extend_with_base<Ctx: Context>(
        &mut self,
        ctx: &mut Ctx,
        alphas: &[usize],
        each_num: usize,
        base: VoleSenderOutput<S, F>,
    ) -> Result<SpVoleSenderOutput<S, F>, SenderError>
    where
        RandomCOT: RandomCOTReceiver<Ctx, bool, Block>,
    {
        self.pprf.check(alphas, each_num)?;

        if base.u.len() != alphas.len() {
            return Err(ProtocolError::MismatchedBatchSize {
                expected: alphas.len(),
                actual: base.u.len(),
            }
            .into());
        }

        let (batch, masks) = self.core.mask(&mut self.prg, base)?;
        ctx.io_mut().send(masks.to_bytes()).await?;

        let pprf = self.pprf.puncture(ctx, alphas, each_num).await?;

        let bytes: Vec<u8> = ctx.io_mut().expect_next().await?;
        let correction = FinalCorrection::<F>::from_bytes(&bytes, alphas.len())?;
        debug!(id = %correction.id, "received final corrections");

        Ok(batch.finish(pprf, correction)?)
    }
}
