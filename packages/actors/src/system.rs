//! Actor system: owns spawned actors and routes messages between them.

use std::collections::HashMap;
use std::time::Duration;

use ractor::rpc::CallResult;
use ractor::{Actor, ActorCell, ActorRef, ActorStatus, RpcReplyPort, SpawnErr};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

/// Default timeout for request/response calls into an actor.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors from spawning and messaging actors.
#[derive(Debug, thiserror::Error)]
pub enum ActorError {
    /// The requested name belongs to a live actor.
    #[error("actor name '{0}' is already in use")]
    DuplicateName(String),

    /// No live actor is registered under this name.
    #[error("no live actor named '{0}'")]
    NotFound(String),

    /// The target actor has stopped; the message was not delivered.
    #[error("dead letter: actor '{0}' is no longer accepting messages")]
    DeadLetter(String),

    /// The actor did not reply within the deadline. The request stays
    /// in flight; a late reply is discarded.
    #[error("request to '{0}' timed out after {1:?}")]
    Timeout(String, Duration),

    /// The underlying runtime failed to start the actor.
    #[error("failed to spawn '{name}': {source}")]
    Spawn {
        name: String,
        #[source]
        source: SpawnErr,
    },
}

/// A live actor owned by the system.
struct RunningActor {
    cell: ActorCell,
    handle: JoinHandle<()>,
}

/// Explicitly constructed actor system.
///
/// Created at startup and passed by reference; shut down at exit. Assigns
/// each actor a stable name at spawn time and never reuses a name while its
/// actor is alive.
#[derive(Default)]
pub struct ActorSystem {
    actors: Mutex<HashMap<String, RunningActor>>,
}

impl ActorSystem {
    /// Create a new empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn an actor under a stable name.
    ///
    /// Fails with [`ActorError::DuplicateName`] if the name belongs to a
    /// live actor; the existing actor is left untouched.
    pub async fn spawn<A: Actor>(
        &self,
        name: &str,
        behavior: A,
        args: A::Arguments,
    ) -> Result<ActorRef<A::Msg>, ActorError> {
        let mut actors = self.actors.lock().await;
        if let Some(existing) = actors.get(name) {
            if existing.cell.get_status() != ActorStatus::Stopped {
                return Err(ActorError::DuplicateName(name.to_string()));
            }
            // Stale entry from an actor that stopped on its own.
            actors.remove(name);
        }

        let (actor_ref, handle) = Actor::spawn(Some(name.to_string()), behavior, args)
            .await
            .map_err(|source| ActorError::Spawn {
                name: name.to_string(),
                source,
            })?;

        actors.insert(
            name.to_string(),
            RunningActor {
                cell: actor_ref.get_cell(),
                handle,
            },
        );

        tracing::debug!("spawned actor '{}'", name);
        Ok(actor_ref)
    }

    /// Enqueue a fire-and-forget message. Never blocks the sender.
    ///
    /// Delivery order is preserved per mailbox; a send to a stopped actor
    /// fails fast as a dead letter instead of dropping silently.
    pub fn send<TMessage: ractor::Message>(
        &self,
        target: &ActorRef<TMessage>,
        message: TMessage,
    ) -> Result<(), ActorError> {
        target
            .send_message(message)
            .map_err(|_| ActorError::DeadLetter(actor_name(target)))
    }

    /// Send a request and wait for the single correlated reply.
    ///
    /// Resolves with the actor's reply or [`ActorError::Timeout`] if none
    /// arrives within `timeout`. A timeout cancels only this caller's wait,
    /// not the actor's in-flight work.
    pub async fn request<TMessage, TReply, TMsgBuilder>(
        &self,
        target: &ActorRef<TMessage>,
        build: TMsgBuilder,
        timeout: Duration,
    ) -> Result<TReply, ActorError>
    where
        TMessage: ractor::Message,
        TReply: Send + 'static,
        TMsgBuilder: FnOnce(RpcReplyPort<TReply>) -> TMessage,
    {
        match ractor::rpc::call(target, build, Some(timeout)).await {
            Ok(CallResult::Success(reply)) => Ok(reply),
            Ok(CallResult::Timeout) => Err(ActorError::Timeout(actor_name(target), timeout)),
            Ok(CallResult::SenderError) | Err(_) => Err(ActorError::DeadLetter(actor_name(target))),
        }
    }

    /// Lifecycle status of a named actor, if the system knows it.
    pub async fn status(&self, name: &str) -> Option<ActorStatus> {
        self.actors
            .lock()
            .await
            .get(name)
            .map(|running| running.cell.get_status())
    }

    /// Request graceful shutdown of one actor and wait for it to finish.
    ///
    /// The actor completes its in-flight message before stopping; once
    /// stopped, further sends to it fail as dead letters.
    pub async fn stop(&self, name: &str) -> Result<(), ActorError> {
        let running = self
            .actors
            .lock()
            .await
            .remove(name)
            .ok_or_else(|| ActorError::NotFound(name.to_string()))?;

        running.cell.stop(None);
        if let Err(e) = running.handle.await {
            tracing::warn!("actor '{}' task failed to join: {}", name, e);
        }
        tracing::debug!("stopped actor '{}'", name);
        Ok(())
    }

    /// Stop every actor the system owns and wait for each to finish.
    pub async fn shutdown(&self) {
        let actors: Vec<(String, RunningActor)> = {
            let mut map = self.actors.lock().await;
            map.drain().collect()
        };
        for (name, running) in actors {
            running.cell.stop(None);
            if let Err(e) = running.handle.await {
                tracing::warn!("actor '{}' task failed to join: {}", name, e);
            }
        }
        tracing::info!("actor system shut down");
    }
}

/// Best-effort name for error messages.
fn actor_name<TMessage: ractor::Message>(target: &ActorRef<TMessage>) -> String {
    target
        .get_name()
        .unwrap_or_else(|| target.get_id().to_string())
}
