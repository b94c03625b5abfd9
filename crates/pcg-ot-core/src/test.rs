//! Test utilities.

use pcg_core::Block;
use pcg_fields::{ExtensionField, Field};

use crate::{SPCOTReceiverOutput, SPCOTSenderOutput, SpVoleReceiverOutput, SpVoleSenderOutput};

/// Asserts the correctness of correlated oblivious transfer.
pub fn assert_cot(delta: Block, choices: &[bool], msgs: &[Block], received: &[Block]) {
    assert_eq!(choices.len(), msgs.len());
    assert_eq!(msgs.len(), received.len());
    assert!(choices
        .iter()
        .zip(msgs.iter().zip(received))
        .all(|(&choice, (&msg, &received))| received == msg ^ delta.select(choice)));
}

/// Asserts the correctness of single-point COT: `w[α] = v[α] ⊕ Δ` and `w[j] = v[j]` elsewhere.
pub fn assert_spcot(
    delta: Block,
    sender: &SPCOTSenderOutput<Block>,
    receiver: &SPCOTReceiverOutput<Block>,
) {
    assert_eq!(sender.id, receiver.id);
    assert_eq!(sender.v.len(), receiver.w.len());
    assert_eq!(receiver.w.len(), receiver.alphas.len());

    for ((v, w), &alpha) in sender.v.iter().zip(&receiver.w).zip(&receiver.alphas) {
        assert_eq!(v.len(), w.len());
        for (j, (&v, &w)) in v.iter().zip(w).enumerate() {
            if j == alpha {
                assert_eq!(w, v ^ delta, "punctured value of instance is not correlated");
            } else {
                assert_eq!(w, v, "value {j} differs");
            }
        }
    }
}

/// Asserts the correctness of single-point subfield VOLE: `t = q + Δ·x` with `x` zero everywhere
/// except `x[α] = β ≠ 0`.
pub fn assert_spvole<S: Field, F: ExtensionField<S>>(
    delta: F,
    sender: &SpVoleSenderOutput<S, F>,
    receiver: &SpVoleReceiverOutput<F>,
) {
    assert_eq!(sender.id, receiver.id);
    assert_eq!(sender.t.len(), receiver.q.len());
    assert_eq!(sender.t.len(), sender.alphas.len());
    assert_eq!(sender.t.len(), sender.betas.len());

    for (((t, q), &alpha), &beta) in sender
        .t
        .iter()
        .zip(&receiver.q)
        .zip(&sender.alphas)
        .zip(&sender.betas)
    {
        assert!(!beta.is_zero());
        assert_eq!(t.len(), q.len());
        for (j, (&t, &q)) in t.iter().zip(q).enumerate() {
            if j == alpha {
                assert_eq!(t, q + F::mix_mul(beta, delta), "punctured value is not correlated");
            } else {
                assert_eq!(t, q, "value {j} differs");
            }
        }
    }
}
