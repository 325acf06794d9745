//! Bundling engine boundary.
//!
//! An [`Engine`] accepts a composed configuration and hands back a
//! [`Compiler`] for exactly one run. The run reports through a one-shot
//! [`CompletionCallback`]; [`run_compiler`] turns that callback into a future
//! so the orchestrator can await it without polling.

use std::sync::Arc;

use tokio::sync::oneshot;
use wpackio_config::EngineConfiguration;

use crate::error::EngineError;
use crate::stats::CompilationStats;

/// Invoked once when a run finishes. `Err` means the engine failed before it
/// could produce statistics.
pub type CompletionCallback = Box<dyn FnOnce(Result<CompilationStats, EngineError>) + Send>;

/// Receives progress updates while a run is in flight.
pub type ProgressHandler = Arc<dyn Fn(ProgressEvent) + Send + Sync>;

pub trait Engine: Send + Sync {
    /// Prepare a run of `config`. Fails only if the configuration cannot be
    /// handed to the engine at all.
    fn submit(&self, config: EngineConfiguration) -> Result<Box<dyn Compiler>, EngineError>;
}

/// A single submitted run.
pub trait Compiler: Send {
    /// Start the run. Consuming `self` keeps the callback to at most one call.
    fn run(self: Box<Self>, done: CompletionCallback);
}

/// One progress report from the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Percent complete, 0 to 100.
    pub percent: f64,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(percent: f64, message: impl Into<String>) -> Self {
        Self {
            percent,
            message: message.into(),
        }
    }
}

/// Run a compiler to completion.
///
/// A callback dropped without being called surfaces as
/// [`EngineError::CallbackDropped`].
pub async fn run_compiler(compiler: Box<dyn Compiler>) -> Result<CompilationStats, EngineError> {
    let (tx, rx) = oneshot::channel();
    compiler.run(Box::new(move |result| {
        // The receiver only goes away if the caller stopped waiting.
        let _ = tx.send(result);
    }));
    rx.await.map_err(|_| EngineError::CallbackDropped)?
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Immediate(Option<Result<CompilationStats, EngineError>>);

    impl Compiler for Immediate {
        fn run(mut self: Box<Self>, done: CompletionCallback) {
            if let Some(result) = self.0.take() {
                done(result);
            }
        }
    }

    struct Threaded;

    impl Compiler for Threaded {
        fn run(self: Box<Self>, done: CompletionCallback) {
            std::thread::spawn(move || {
                std::thread::sleep(std::time::Duration::from_millis(20));
                done(Ok(CompilationStats::default().with_warning("late")));
            });
        }
    }

    #[tokio::test]
    async fn resolves_with_callback_value() {
        let stats = CompilationStats::default().with_error("boom");
        let result = run_compiler(Box::new(Immediate(Some(Ok(stats.clone()))))).await;
        assert_eq!(result.unwrap(), stats);
    }

    #[tokio::test]
    async fn resolves_from_another_thread() {
        let result = run_compiler(Box::new(Threaded)).await.unwrap();
        assert!(result.has_warnings());
    }

    #[tokio::test]
    async fn engine_failure_is_passed_through() {
        let result = run_compiler(Box::new(Immediate(Some(Err(EngineError::fatal("no config")))))).await;
        assert!(matches!(result, Err(EngineError::Fatal { .. })));
    }

    #[tokio::test]
    async fn dropped_callback_is_reported() {
        let result = run_compiler(Box::new(Immediate(None))).await;
        assert!(matches!(result, Err(EngineError::CallbackDropped)));
    }
}
