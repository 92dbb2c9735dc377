use crate::actor::WeakActorClient;
use crate::node::membership::NodeId;
use crate::node::node_api::ActorExited;
use crate::peer::StoreUpdate;
use tokio::time::Duration;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ForwardError {
    #[error("Leader update failed after {attempts} attempts")]
    UpdateFailed { attempts: u32 },
    #[error("Node actor is dead RIP")]
    ActorExited,
}

/// LeaderPath is the leader based shortcut: mutations skip voting and go straight to whichever
/// node is currently believed to be leader.
pub(crate) struct LeaderPath {
    logger: slog::Logger,
    my_node_id: NodeId,
    actor_client: WeakActorClient,
    request_attempts: u32,
    retry_delay: Duration,
    rpc_timeout: Duration,
}

impl LeaderPath {
    pub(crate) fn new(
        logger: slog::Logger,
        my_node_id: NodeId,
        actor_client: WeakActorClient,
        request_attempts: u32,
        retry_delay: Duration,
        rpc_timeout: Duration,
    ) -> Self {
        LeaderPath {
            logger,
            my_node_id,
            actor_client,
            request_attempts,
            retry_delay,
            rpc_timeout,
        }
    }

    /// Client side. Retries with a fixed delay. Having no leader installed, or a leader whose
    /// slot was tombstoned, counts as a failed attempt.
    pub(crate) async fn forward(&self, update: StoreUpdate) -> Result<(), ForwardError> {
        for attempt in 1..=self.request_attempts {
            let leader = self.actor_client.upgrade()?.leader_snapshot().await?;

            match leader.as_ref().and_then(|l| l.learner.clone().map(|learner| (l.leader_id, learner))) {
                Some((leader_id, learner)) => {
                    match tokio::time::timeout(self.rpc_timeout, learner.leader_update(update.clone())).await {
                        Ok(Ok(())) => return Ok(()),
                        Ok(Err(e)) => slog::warn!(
                            self.logger,
                            "Leader {:?} update attempt {}/{} failed: {}",
                            leader_id,
                            attempt,
                            self.request_attempts,
                            e
                        ),
                        Err(_) => slog::warn!(
                            self.logger,
                            "Leader {:?} update attempt {}/{} timed out",
                            leader_id,
                            attempt,
                            self.request_attempts
                        ),
                    }
                }
                None => slog::warn!(
                    self.logger,
                    "No reachable leader for attempt {}/{}",
                    attempt,
                    self.request_attempts
                ),
            }

            if attempt < self.request_attempts {
                tokio::time::sleep(self.retry_delay).await;
            }
        }

        Err(ForwardError::UpdateFailed {
            attempts: self.request_attempts,
        })
    }

    /// Leader side. Applies locally, then pushes the update to every other live learner
    /// concurrently. Learner failures are logged and otherwise ignored.
    pub(crate) async fn apply_and_broadcast(&self, update: StoreUpdate) -> Result<(), ActorExited> {
        let actor_client = self.actor_client.upgrade()?;
        actor_client.update_store(update.clone()).await?;
        let membership = actor_client.membership_snapshot().await?;
        drop(actor_client);

        let mut calls = Vec::with_capacity(membership.learners.len());
        for (learner_id, learner) in membership.learners.into_iter() {
            if learner_id == self.my_node_id {
                continue;
            }
            let update = update.clone();
            let timeout = self.rpc_timeout;
            let call =
                tokio::task::spawn(async move { tokio::time::timeout(timeout, learner.update_store(update)).await });
            calls.push((learner_id, call));
        }

        for (learner_id, call) in calls {
            match call.await {
                Ok(Ok(Ok(()))) => {}
                Ok(Ok(Err(e))) => slog::info!(self.logger, "Learner {:?} missed broadcast: {}", learner_id, e),
                Ok(Err(_)) => slog::info!(self.logger, "Learner {:?} timed out on broadcast", learner_id),
                Err(e) => slog::warn!(self.logger, "Broadcast task for {:?} failed: {}", learner_id, e),
            }
        }
        Ok(())
    }
}

// ------- Conversions --------

impl From<ActorExited> for ForwardError {
    fn from(_: ActorExited) -> Self {
        ForwardError::ActorExited
    }
}
