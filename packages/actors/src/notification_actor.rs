//! Fire-and-forget notification sink actor.

use ractor::{Actor, ActorProcessingErr, ActorRef};

use crate::messages::NotificationMessage;

/// State for the notification actor.
pub struct NotificationState {
    delivered: u64,
}

/// Notification sink: logs deliveries, never replies.
pub struct NotificationActor;

impl Actor for NotificationActor {
    type Msg = NotificationMessage;
    type State = NotificationState;
    type Arguments = ();

    async fn pre_start(
        &self,
        myself: ActorRef<Self::Msg>,
        _args: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        tracing::info!(
            "notification actor '{}' started",
            myself.get_name().unwrap_or_default()
        );
        Ok(NotificationState { delivered: 0 })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            NotificationMessage::Notify { notification } => {
                tracing::info!(
                    "sending {} notification to {}: {}",
                    notification.kind,
                    notification.recipient,
                    notification.body
                );
                state.delivered += 1;
            }
        }

        Ok(())
    }

    async fn post_stop(
        &self,
        _myself: ActorRef<Self::Msg>,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        tracing::info!(
            "notification actor stopped after {} deliveries",
            state.delivered
        );
        Ok(())
    }
}
