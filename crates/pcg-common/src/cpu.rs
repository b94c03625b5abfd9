//! CPU backend shim.
//!
//! Protocol drivers hand their CPU-bound steps to [`CpuBackend::blocking`] so that tree expansion
//! does not stall the async executor. With the `rayon` feature the work runs on the global rayon
//! pool, otherwise it runs inline.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "force-st")] {
        pub use st::SingleThreadedBackend as CpuBackend;
    } else if #[cfg(feature = "rayon")] {
        pub use rayon_backend::RayonBackend as CpuBackend;
    } else {
        pub use st::SingleThreadedBackend as CpuBackend;
    }
}

#[cfg(any(feature = "force-st", not(feature = "rayon")))]
mod st {
    /// A single-threaded CPU backend.
    #[derive(Debug)]
    pub struct SingleThreadedBackend;

    impl SingleThreadedBackend {
        /// Executes a closure on the CPU backend.
        #[inline]
        pub async fn blocking<F, R>(f: F) -> R
        where
            F: FnOnce() -> R + Send + 'static,
            R: Send + 'static,
        {
            f()
        }
    }
}

#[cfg(all(feature = "rayon", not(feature = "force-st")))]
mod rayon_backend {
    use futures::channel::oneshot;

    /// A Rayon CPU backend.
    #[derive(Debug)]
    pub struct RayonBackend;

    impl RayonBackend {
        /// Executes a closure on the CPU backend.
        ///
        /// # Panics
        ///
        /// Panics if the closure panics.
        pub async fn blocking<F, R>(f: F) -> R
        where
            F: FnOnce() -> R + Send + 'static,
            R: Send + 'static,
        {
            let (sender, receiver) = oneshot::channel();
            rayon::spawn(move || {
                _ = sender.send(f());
            });
            receiver.await.expect("worker thread does not drop channel")
        }
    }
}
