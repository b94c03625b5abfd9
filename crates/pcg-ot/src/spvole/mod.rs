//! Async single-point subfield VOLE.
//!
//! The VOLE sender plays the punctured PRF receiver and the VOLE receiver plays the punctured PRF
//! sender. On top of the punctured PRF a batch costs one base VOLE request, the masked points
//! from the sender and the final corrections from the receiver.

mod error;
mod receiver;
mod sender;

pub use error::{ReceiverError, SenderError};
pub use receiver::Receiver;
pub use sender::Sender;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ideal::{cot::ideal_rcot, vole::ideal_vole},
        PprfConfig, RandomVoleSender,
    };
    use pcg_common::{executor::test_st_executor, Context};
    use pcg_fields::{ExtensionField, Field, Gf2, Gf2_128, Gf2_64, Zp64};
    use pcg_ot_core::{test::assert_spvole, TransferId};
    use rstest::rstest;
    use serio::SinkExt;

    async fn spvole<S: Field, F: ExtensionField<S>>(alphas: &[usize], each_num: usize) {
        let (mut ctx_sender, mut ctx_receiver) = test_st_executor(8);
        let (rcot_sender, rcot_receiver) = ideal_rcot();
        let (vole_sender, vole_receiver) = ideal_vole::<S, F>();

        let cot_delta = rcot_sender.delta();
        let delta = vole_receiver.delta();

        let mut sender =
            Sender::<_, _, S, F>::new(PprfConfig::default(), rcot_receiver, vole_sender);
        let mut receiver =
            Receiver::<_, _, S, F>::new(PprfConfig::default(), rcot_sender, vole_receiver, delta);
        sender.setup().unwrap();
        receiver.setup(cot_delta).unwrap();

        for _ in 0..2 {
            let (sender_output, receiver_output) = futures::join!(
                sender.extend(&mut ctx_sender, alphas, each_num),
                receiver.extend(&mut ctx_receiver, alphas.len(), each_num)
            );
            let (sender_output, receiver_output) =
                (sender_output.unwrap(), receiver_output.unwrap());

            assert_eq!(sender_output.alphas, alphas);
            assert_spvole(delta, &sender_output, &receiver_output);
        }
    }

    #[rstest]
    #[case::one(1)]
    #[case::two(2)]
    #[case::nine(9)]
    #[case::power_of_two(256)]
    #[tokio::test]
    async fn test_spvole(#[case] each_num: usize) {
        let alphas = [each_num - 1, 0, each_num / 3];

        spvole::<Gf2, Gf2_128>(&alphas, each_num).await;
        spvole::<Gf2_64, Gf2_64>(&alphas, each_num).await;
        spvole::<Zp64, Zp64>(&alphas, each_num).await;
    }

    #[tokio::test]
    async fn test_spvole_rejects_non_member() {
        let (mut ctx_sender, mut ctx_receiver) = test_st_executor(8);
        let (rcot_sender, _) = ideal_rcot();
        let (mut vole_sender, vole_receiver) = ideal_vole::<Zp64, Zp64>();

        let cot_delta = rcot_sender.delta();
        let delta = vole_receiver.delta();
        let mut receiver = Receiver::<_, _, Zp64, Zp64>::new(
            PprfConfig::default(),
            rcot_sender,
            vole_receiver,
            delta,
        );
        receiver.setup(cot_delta).unwrap();

        // Plays a sender whose masked point is not reduced modulo p.
        let peer = async {
            vole_sender
                .send_random_vole(&mut ctx_sender, 1)
                .await
                .unwrap();

            let mut bytes = TransferId::default().to_bytes().to_vec();
            bytes.extend_from_slice(&u64::MAX.to_le_bytes());
            ctx_sender.io_mut().send(bytes).await.unwrap();
        };

        let (output, _) = futures::join!(receiver.extend(&mut ctx_receiver, 1, 16), peer);

        assert!(output.unwrap_err().is_abort());
    }

    #[tokio::test]
    async fn test_spvole_rejects_mismatched_base() {
        let (mut ctx_sender, _) = test_st_executor(8);
        let (_, rcot_receiver) = ideal_rcot();
        let (vole_sender, _) = ideal_vole::<Gf2, Gf2_128>();

        let mut sender =
            Sender::<_, _, Gf2, Gf2_128>::new(PprfConfig::default(), rcot_receiver, vole_sender);
        sender.setup().unwrap();

        let mut ideal = pcg_ot_core::ideal::vole::IdealVole::<Gf2, Gf2_128>::default();
        let (base, _) = ideal.random(3);

        let err = sender
            .extend_with_base(&mut ctx_sender, &[1, 2], 4, base)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SenderError::CoreError(crate::ProtocolError::MismatchedBatchSize {
                expected: 2,
                actual: 3
            })
        ));
    }
}
