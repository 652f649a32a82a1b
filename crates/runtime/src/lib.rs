//! Async session driver.
//!
//! Runs one [`GameController`] on a tokio task and schedules the timers the
//! core leaves to its host: the one-second session clock and the visible
//! delay before a revealed pair is compared.
//!
//! Async callers use [`spawn_session`] directly. Synchronous embedders that
//! want the session driven by these timers use [`SessionRuntime`], which owns
//! its own tokio runtime. The terminal binary uses neither: it calls
//! `GameController::tick` with measured frame time.

pub mod session;

use std::io;

use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::warn;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use session::{spawn_session, SessionClosed, SessionHandle};

use crate::core::{GameController, GameSnapshot, SessionStore};
use crate::types::GameAction;

/// Running session plus the runtime that drives it.
pub struct SessionRuntime {
    rt: Runtime,
    handle: SessionHandle,
    task: JoinHandle<()>,
}

impl SessionRuntime {
    /// Start a multi-threaded runtime and spawn the session on it.
    pub fn start<S>(controller: GameController<S>) -> io::Result<Self>
    where
        S: SessionStore + Send + 'static,
    {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("memory-match-session")
            .enable_all()
            .build()?;
        let (handle, task) = {
            let _guard = rt.enter();
            spawn_session(controller)
        };
        Ok(Self { rt, handle, task })
    }

    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Queue an action without blocking the caller
    pub fn dispatch(&self, action: GameAction) -> Result<(), SessionClosed> {
        self.handle.try_send(action)
    }

    pub fn latest(&self) -> GameSnapshot {
        self.handle.latest()
    }

    /// Stop the session task and wait for it to finish.
    pub fn shutdown(self) {
        let Self { rt, handle, task } = self;
        rt.block_on(async move {
            handle.shutdown().await;
            if let Err(err) = task.await {
                warn!(error = %err, "session task ended abnormally");
            }
        });
    }
}
