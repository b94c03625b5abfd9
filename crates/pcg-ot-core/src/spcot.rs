//! Single-point COT from the punctured PRF.
//!
//! The leaves are used as they are. The sender's values are its leaves, the receiver's values are
//! its punctured leaves with the punctured position filled in by the XOR of all the others, so
//! that `w[α] = v[α] ⊕ Δ`. No message beyond the punctured PRF's own is needed.

use crate::{
    pprf::{PprfReceiverOutput, PprfSenderOutput},
    SPCOTReceiverOutput, SPCOTSenderOutput,
};
use pcg_core::Block;

/// Materializes the sender's single-point COT values.
pub fn sender_output(output: PprfSenderOutput) -> SPCOTSenderOutput<Block> {
    SPCOTSenderOutput {
        id: output.id,
        v: output.leaves,
    }
}

/// Materializes the receiver's single-point COT values.
pub fn receiver_output(output: PprfReceiverOutput) -> SPCOTReceiverOutput<Block> {
    let mut w = Vec::with_capacity(output.punctured.len());
    let mut alphas = Vec::with_capacity(output.punctured.len());

    for mut punctured in output.punctured {
        punctured.leaves[punctured.alpha] = punctured.sum;
        w.push(punctured.leaves);
        alphas.push(punctured.alpha);
    }

    SPCOTReceiverOutput {
        id: output.id,
        w,
        alphas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ideal::cot::IdealCOT, pprf::tests::run, test::assert_spcot};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    #[case(9)]
    #[case(256)]
    #[case(1024)]
    fn test_spcot(#[case] each_num: usize) {
        let mut ideal = IdealCOT::default();
        let mut rng = ChaCha12Rng::seed_from_u64(each_num as u64);

        let mut alphas: Vec<usize> = (0..8).map(|_| rng.gen_range(0..each_num)).collect();
        alphas.extend([0, each_num - 1]);

        let (sender, receiver, _) = run(&mut ideal, &alphas, each_num);

        assert_spcot(
            ideal.delta(),
            &sender_output(sender),
            &receiver_output(receiver),
        );
    }

    #[test]
    fn test_spcot_nine_by_nine() {
        let mut ideal = IdealCOT::default();
        let mut rng = ChaCha12Rng::seed_from_u64(9);
        let alphas: Vec<usize> = (0..9).map(|_| rng.gen_range(0..9)).collect();

        let (sender, receiver, msgs) = run(&mut ideal, &alphas, 9);
        let delta = sender.delta;
        let sums: Vec<Block> = receiver.punctured.iter().map(|p| p.sum).collect();

        let sender = sender_output(sender);
        let receiver = receiver_output(receiver);

        assert_eq!(msgs.len(), 3);
        for (i, &alpha) in alphas.iter().enumerate() {
            for j in (0..9).filter(|&j| j != alpha) {
                assert_eq!(sender.v[i][j], receiver.w[i][j]);
            }
            assert_eq!(sender.v[i][alpha], delta ^ sums[i]);
        }
        assert_spcot(delta, &sender, &receiver);
    }
}
