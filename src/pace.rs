use std::{future::Future, pin::Pin, time::Duration};

pub type PauseFuture<'a> = Pin<Box<dyn Future<Output = ()> + Send + 'a>>;

/// Suspension point standing in for a network round-trip. Every identity
/// and lookup operation awaits this boundary before resolving so loading
/// states stay observable; a real backend client would replace it with the
/// actual call.
pub trait NetworkPace: Send + Sync {
    fn pause(&self) -> PauseFuture<'_>;
}

/// Fixed-delay pace for the sample/demo configuration.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPace {
    delay: Duration,
}

impl SimulatedPace {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedPace {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

impl NetworkPace for SimulatedPace {
    fn pause(&self) -> PauseFuture<'_> {
        let delay = self.delay;
        Box::pin(async move {
            tokio::time::sleep(delay).await;
        })
    }
}

/// Zero-latency pace so tests run synchronously.
#[derive(Debug, Default, Clone, Copy)]
pub struct InstantPace;

impl NetworkPace for InstantPace {
    fn pause(&self) -> PauseFuture<'_> {
        Box::pin(async {})
    }
}
