//! Ideal two-party functionalities.
//!
//! An ideal functionality is a trusted state machine `F` which both parties call with their own
//! input. The first party to arrive parks its input and waits, the second party evaluates `F` on
//! both inputs and hands the first party its output. Calls are paired by [`ThreadId`].

use futures::channel::oneshot;
use std::{
    any::Any,
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{Context, ThreadId};

type BoxAny = Box<dyn Any + Send + 'static>;

/// A parked call: the party's input and the slot its output is delivered to.
type Parked = (BoxAny, oneshot::Sender<BoxAny>);

#[derive(Debug, Default)]
struct Waiting {
    alice: HashMap<ThreadId, Parked>,
    bob: HashMap<ThreadId, Parked>,
}

#[derive(Debug)]
struct Shared<F> {
    f: Mutex<F>,
    waiting: Mutex<Waiting>,
}

impl<F> Shared<F> {
    async fn call<Ctx, C, IA, IB, OA, OB>(
        &self,
        ctx: &mut Ctx,
        is_alice: bool,
        input: BoxAny,
        call: C,
    ) -> BoxAny
    where
        Ctx: Context,
        C: FnOnce(&mut F, IA, IB) -> (OA, OB),
        IA: Send + 'static,
        IB: Send + 'static,
        OA: Send + 'static,
        OB: Send + 'static,
    {
        let receiver = {
            let mut waiting = self.waiting.lock().unwrap();
            let peer = if is_alice {
                waiting.bob.remove(ctx.id())
            } else {
                waiting.alice.remove(ctx.id())
            };

            if let Some((peer_input, peer_slot)) = peer {
                let (input_alice, input_bob) = if is_alice {
                    (input, peer_input)
                } else {
                    (peer_input, input)
                };

                let input_alice: IA = *input_alice
                    .downcast()
                    .expect("alice provided input of the expected type");
                let input_bob: IB = *input_bob
                    .downcast()
                    .expect("bob provided input of the expected type");

                let (output_alice, output_bob) =
                    call(&mut self.f.lock().unwrap(), input_alice, input_bob);

                let (mine, theirs): (BoxAny, BoxAny) = if is_alice {
                    (Box::new(output_alice), Box::new(output_bob))
                } else {
                    (Box::new(output_bob), Box::new(output_alice))
                };

                _ = peer_slot.send(theirs);

                return mine;
            }

            let (sender, receiver) = oneshot::channel();
            let parked = if is_alice {
                &mut waiting.alice
            } else {
                &mut waiting.bob
            };
            parked.insert(ctx.id().clone(), (input, sender));

            receiver
        };

        receiver.await.expect("peer does not drop a parked call")
    }
}

/// The ideal functionality from the perspective of Alice.
#[derive(Debug)]
pub struct Alice<F>(Arc<Shared<F>>);

impl<F> Clone for Alice<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<F> Alice<F> {
    /// Returns a lock to the ideal functionality.
    pub fn lock(&self) -> MutexGuard<'_, F> {
        self.0.f.lock().unwrap()
    }

    /// Calls the ideal functionality.
    pub async fn call<Ctx, C, IA, IB, OA, OB>(&mut self, ctx: &mut Ctx, input: IA, call: C) -> OA
    where
        Ctx: Context,
        C: FnOnce(&mut F, IA, IB) -> (OA, OB),
        IA: Send + 'static,
        IB: Send + 'static,
        OA: Send + 'static,
        OB: Send + 'static,
    {
        let output = self
            .0
            .call::<_, _, IA, IB, OA, OB>(ctx, true, Box::new(input), call)
            .await;

        *output
            .downcast()
            .expect("alice receives output of the expected type")
    }
}

/// The ideal functionality from the perspective of Bob.
#[derive(Debug)]
pub struct Bob<F>(Arc<Shared<F>>);

impl<F> Clone for Bob<F> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<F> Bob<F> {
    /// Returns a lock to the ideal functionality.
    pub fn lock(&self) -> MutexGuard<'_, F> {
        self.0.f.lock().unwrap()
    }

    /// Calls the ideal functionality.
    pub async fn call<Ctx, C, IA, IB, OA, OB>(&mut self, ctx: &mut Ctx, input: IB, call: C) -> OB
    where
        Ctx: Context,
        C: FnOnce(&mut F, IA, IB) -> (OA, OB),
        IA: Send + 'static,
        IB: Send + 'static,
        OA: Send + 'static,
        OB: Send + 'static,
    {
        let output = self
            .0
            .call::<_, _, IA, IB, OA, OB>(ctx, false, Box::new(input), call)
            .await;

        *output
            .downcast()
            .expect("bob receives output of the expected type")
    }
}

/// Creates an ideal functionality, returning the perspectives of Alice and Bob.
pub fn ideal_f2p<F>(f: F) -> (Alice<F>, Bob<F>) {
    let shared = Arc::new(Shared {
        f: Mutex::new(f),
        waiting: Mutex::new(Waiting::default()),
    });

    (Alice(shared.clone()), Bob(shared))
}

#[cfg(test)]
mod tests {
    use crate::executor::test_st_executor;

    use super::*;

    #[test]
    fn test_ideal_pairs_calls() {
        let (mut alice, mut bob) = ideal_f2p(0usize);
        let (mut ctx_a, mut ctx_b) = test_st_executor(8);

        let call = |calls: &mut usize, a: u8, b: u16| {
            *calls += 1;
            (a as u16 + b, a as u16 * b)
        };

        let (output_a, output_b) = futures::executor::block_on(async {
            futures::join!(
                alice.call(&mut ctx_a, 3u8, call),
                bob.call(&mut ctx_b, 5u16, call),
            )
        });

        assert_eq!(output_a, 8);
        assert_eq!(output_b, 15);
        assert_eq!(*alice.lock(), 1);
    }

    #[test]
    #[should_panic]
    fn test_ideal_wrong_input_type() {
        let (mut alice, mut bob) = ideal_f2p(());
        let (mut ctx_a, mut ctx_b) = test_st_executor(8);

        futures::executor::block_on(async {
            futures::join!(
                alice.call(&mut ctx_a, 1u16, |&mut (), a: u16, b: u16| (a + b, a + b)),
                bob.call(&mut ctx_b, 2u8, |&mut (), a: u8, b: u8| (a + b, a + b)),
            )
        });
    }
}
