//! Session task: one tokio task owning one [`GameController`].
//!
//! All mutation happens on this task, so transitions are serialized without
//! locks. The task multiplexes three event sources:
//!
//! - inbound player actions (bounded mpsc)
//! - the one-second session clock (`tokio::time::interval`)
//! - the single pending resolution delay (`tokio::time::sleep`)
//!
//! The pending delay remembers the [`ResolveTicket`] it was armed for. A new
//! game disarms it, and even a ticket that slipped through would be rejected
//! by the controller because its generation is stale.

use std::time::Duration;

use derive_more::{Display, Error};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::{mpsc, watch};
use tokio::task::{self, JoinHandle};
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::core::{
    GameController, GameSnapshot, ResolveTicket, Selection, SessionStore, TurnOutcome,
};
use crate::types::{GameAction, CLOCK_TICK_MS, RESOLVE_DELAY_MS};

/// Inbound queue depth. Players click slowly; this only absorbs bursts.
const MAX_PENDING_ACTIONS: usize = 32;

/// The session task has stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("session closed")]
pub struct SessionClosed;

#[derive(Debug)]
enum SessionCommand {
    Action(GameAction),
    Shutdown,
}

/// Cloneable handle to a running session
#[derive(Debug, Clone)]
pub struct SessionHandle {
    cmd_tx: mpsc::Sender<SessionCommand>,
    snapshot_rx: watch::Receiver<GameSnapshot>,
}

impl SessionHandle {
    /// Queue an action, waiting for room if the queue is full
    pub async fn send(&self, action: GameAction) -> Result<(), SessionClosed> {
        self.cmd_tx
            .send(SessionCommand::Action(action))
            .await
            .map_err(|_| SessionClosed)
    }

    /// Queue an action from synchronous code. Drops the action if the queue is full.
    pub fn try_send(&self, action: GameAction) -> Result<(), SessionClosed> {
        match self.cmd_tx.try_send(SessionCommand::Action(action)) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!(action = action.as_str(), "session queue full; dropping action");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SessionClosed),
        }
    }

    /// Receiver that observes every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Ask the session task to stop
    pub async fn shutdown(&self) {
        let _ = self.cmd_tx.send(SessionCommand::Shutdown).await;
    }

    pub fn is_closed(&self) -> bool {
        self.cmd_tx.is_closed()
    }
}

/// Spawn the session task on the current tokio runtime.
pub fn spawn_session<S>(controller: GameController<S>) -> (SessionHandle, JoinHandle<()>)
where
    S: SessionStore + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel(MAX_PENDING_ACTIONS);
    let (snapshot_tx, snapshot_rx) = watch::channel(controller.snapshot());
    let task = tokio::spawn(run_session(controller, cmd_rx, snapshot_tx));
    (
        SessionHandle {
            cmd_tx,
            snapshot_rx,
        },
        task,
    )
}

async fn run_session<S: SessionStore>(
    mut controller: GameController<S>,
    mut cmd_rx: mpsc::Receiver<SessionCommand>,
    snapshot_tx: watch::Sender<GameSnapshot>,
) {
    let clock_period = Duration::from_millis(CLOCK_TICK_MS as u64);
    let mut ticker = time::interval_at(Instant::now() + clock_period, clock_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let resolve_delay = time::sleep(Duration::from_millis(RESOLVE_DELAY_MS as u64));
    tokio::pin!(resolve_delay);
    let mut armed: Option<ResolveTicket> = None;

    loop {
        tokio::select! {
            // A clock tick due at the same instant as a resolution counts first.
            biased;

            cmd = cmd_rx.recv() => {
                let action = match cmd {
                    Some(SessionCommand::Action(action)) => action,
                    Some(SessionCommand::Shutdown) | None => break,
                };

                match action {
                    GameAction::SelectTile(id) => {
                        let clock_was_started = controller.state().clock().has_started();
                        match controller.select_tile(id) {
                            Selection::Ignored => continue,
                            Selection::FirstRevealed(_) => {}
                            Selection::SecondRevealed(ticket) => {
                                resolve_delay
                                    .as_mut()
                                    .reset(Instant::now() + Duration::from_millis(RESOLVE_DELAY_MS as u64));
                                armed = Some(ticket);
                            }
                        }
                        // Align clock units with the first pick of the session.
                        if !clock_was_started {
                            ticker.reset();
                        }
                    }
                    GameAction::NewGame => {
                        if let Err(err) = controller.reset() {
                            warn!(error = %err, "new game rejected");
                            continue;
                        }
                        if let Some(ticket) = armed.take() {
                            debug!(generation = ticket.generation, "disarmed pending resolution");
                        }
                    }
                }
                snapshot_tx.send_replace(controller.snapshot());
            }

            _ = ticker.tick() => {
                if controller.state().clock().is_running() {
                    controller.advance_clock(CLOCK_TICK_MS);
                    snapshot_tx.send_replace(controller.snapshot());
                }
            }

            () = &mut resolve_delay, if armed.is_some() => {
                if let Some(ticket) = armed.take() {
                    if resolve_blocking(&mut controller, ticket).is_some() {
                        snapshot_tx.send_replace(controller.snapshot());
                    }
                }
            }
        }
    }

    debug!(generation = controller.generation(), "session task stopped");
}

/// Resolve a pair, persisting stats through the store.
///
/// Store writes are blocking file I/O. On a multi-thread runtime they run via
/// `block_in_place`; a current-thread runtime cannot hand its worker off, so
/// there the write runs inline.
fn resolve_blocking<S: SessionStore>(
    controller: &mut GameController<S>,
    ticket: ResolveTicket,
) -> Option<TurnOutcome> {
    match Handle::current().runtime_flavor() {
        RuntimeFlavor::MultiThread => task::block_in_place(|| controller.resolve(ticket)),
        _ => controller.resolve(ticket),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameConfig, MemoryStore, Tile, TurnPhase};
    use crate::types::TileId;
    use tokio_test::{assert_err, assert_ok};

    fn abab_controller() -> GameController<MemoryStore> {
        let mut c =
            GameController::with_seed(GameConfig::new(2, vec!['A', 'B']), MemoryStore::new(), 1)
                .unwrap();
        let tiles = ['A', 'B', 'A', 'B']
            .iter()
            .enumerate()
            .map(|(i, &s)| Tile::new(i as TileId, s))
            .collect();
        c.new_game_with_board(Board::from_tiles(tiles).unwrap());
        c
    }

    #[tokio::test(start_paused = true)]
    async fn pair_resolves_only_after_delay() {
        let (handle, _task) = spawn_session(abab_controller());
        let mut rx = handle.subscribe();

        assert_ok!(handle.send(GameAction::SelectTile(0)).await);
        assert_ok!(handle.send(GameAction::SelectTile(2)).await);
        assert_ok!(rx.wait_for(|s| s.phase == TurnPhase::Resolving).await);

        time::sleep(Duration::from_millis(RESOLVE_DELAY_MS as u64 - 10)).await;
        assert_eq!(handle.latest().phase, TurnPhase::Resolving);

        let snap = rx
            .wait_for(|s| s.phase == TurnPhase::Idle)
            .await
            .unwrap()
            .clone();
        assert_eq!(snap.score, 10);
        assert_eq!(snap.move_count, 1);
        assert!(snap.tile(0).unwrap().matched);
        assert!(snap.tile(2).unwrap().matched);
    }

    #[tokio::test(start_paused = true)]
    async fn picks_during_resolution_are_ignored() {
        let (handle, _task) = spawn_session(abab_controller());
        let mut rx = handle.subscribe();

        handle.send(GameAction::SelectTile(0)).await.unwrap();
        handle.send(GameAction::SelectTile(1)).await.unwrap();
        handle.send(GameAction::SelectTile(3)).await.unwrap();
        rx.wait_for(|s| s.phase == TurnPhase::Resolving).await.unwrap();

        time::sleep(Duration::from_millis(10)).await;
        let snap = handle.latest();
        assert!(!snap.tile(3).unwrap().revealed);
        assert_eq!(snap.move_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn new_game_drops_pending_resolution() {
        let (handle, _task) = spawn_session(abab_controller());
        let mut rx = handle.subscribe();

        handle.send(GameAction::SelectTile(0)).await.unwrap();
        handle.send(GameAction::SelectTile(2)).await.unwrap();
        rx.wait_for(|s| s.phase == TurnPhase::Resolving).await.unwrap();

        handle.send(GameAction::NewGame).await.unwrap();
        rx.wait_for(|s| s.generation == 3).await.unwrap();

        time::sleep(Duration::from_millis(RESOLVE_DELAY_MS as u64 * 3)).await;
        let snap = handle.latest();
        assert_eq!(snap.generation, 3);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.move_count, 0);
        assert_eq!(snap.best_score, 0);
        assert_eq!(snap.total_move_count, 1);
        assert!(snap.tiles.iter().all(|t| !t.revealed));
    }

    #[tokio::test(start_paused = true)]
    async fn clock_starts_with_first_pick() {
        let (handle, _task) = spawn_session(abab_controller());

        time::sleep(Duration::from_millis(5_000)).await;
        assert_eq!(handle.latest().elapsed_secs, 0);

        handle.send(GameAction::SelectTile(1)).await.unwrap();
        time::sleep(Duration::from_millis(3_500)).await;
        let snap = handle.latest();
        assert_eq!(snap.elapsed_secs, 3);
        assert!(snap.clock_running);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_closes_session() {
        let (handle, task) = spawn_session(abab_controller());
        handle.shutdown().await;
        task.await.unwrap();

        assert!(handle.is_closed());
        assert_err!(handle.send(GameAction::NewGame).await);
        assert_eq!(handle.try_send(GameAction::NewGame), Err(SessionClosed));
    }
}
