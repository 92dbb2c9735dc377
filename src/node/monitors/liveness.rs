use crate::actor::WeakActorClient;
use crate::node::membership::NodeId;
use crate::node::monitors::stop_signal::{self, StopCheck, Stopper};
use crate::node::monitors::time::{Clock, RealClock};
use crate::peer::AcceptorApi;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

/// RejoinTrigger reports nodes that a liveness monitor just declared dead.
#[derive(Clone)]
pub struct RejoinTrigger {
    sender: mpsc::UnboundedSender<NodeId>,
}

pub struct RejoinRequests {
    receiver: mpsc::UnboundedReceiver<NodeId>,
}

pub fn rejoin_channel() -> (RejoinTrigger, RejoinRequests) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RejoinTrigger { sender: tx }, RejoinRequests { receiver: rx })
}

impl RejoinTrigger {
    pub(crate) fn request_rejoin(&self, node_id: NodeId) {
        let _ = self.sender.send(node_id);
    }
}

impl RejoinRequests {
    /// None once every trigger is dropped.
    pub async fn next(&mut self) -> Option<NodeId> {
        self.receiver.recv().await
    }
}

pub(crate) struct LivenessMonitorHandle {
    _to_drop: Stopper,
}

struct LivenessMonitorTask<C: Clock> {
    logger: slog::Logger,
    my_node_id: NodeId,
    actor_client: WeakActorClient,
    clock: C,
    stop_check: StopCheck,
    delay: Duration,
    rpc_timeout: Duration,
    rejoin_trigger: Option<RejoinTrigger>,
    // Peers that answered at least one probe. Only these can be tombstoned.
    answered: HashSet<NodeId>,
}

impl LivenessMonitorHandle {
    pub(crate) fn spawn_monitor_task(
        logger: slog::Logger,
        my_node_id: NodeId,
        actor_client: WeakActorClient,
        delay: Duration,
        rpc_timeout: Duration,
        rejoin_trigger: Option<RejoinTrigger>,
    ) -> (Self, JoinHandle<()>) {
        let (task, handle) = LivenessMonitorTask::new(
            logger,
            my_node_id,
            actor_client,
            RealClock,
            delay,
            rpc_timeout,
            rejoin_trigger,
        );

        (handle, tokio::task::spawn(task.run()))
    }
}

impl<C: Clock> LivenessMonitorTask<C> {
    fn new(
        logger: slog::Logger,
        my_node_id: NodeId,
        actor_client: WeakActorClient,
        clock: C,
        delay: Duration,
        rpc_timeout: Duration,
        rejoin_trigger: Option<RejoinTrigger>,
    ) -> (Self, LivenessMonitorHandle) {
        let (stopper, stop_check) = stop_signal::new();
        let task = LivenessMonitorTask {
            logger,
            my_node_id,
            actor_client,
            clock,
            stop_check,
            delay,
            rpc_timeout,
            rejoin_trigger,
            answered: HashSet::new(),
        };

        (task, LivenessMonitorHandle { _to_drop: stopper })
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                _ = self.clock.sleep(self.delay) => {}
                _ = self.stop_check.stopped() => return,
            }

            if self.sweep().await.is_err() {
                slog::info!(self.logger, "Liveness monitor exiting, node actor is gone");
                return;
            }
        }
    }

    /// One pass over every live peer. A peer that fails its identity probe is tombstoned, unless it
    /// never answered: a member that has not started yet still counts towards the quorum.
    async fn sweep(&mut self) -> Result<(), crate::node::ActorExited> {
        let membership = self.actor_client.upgrade()?.membership_snapshot().await?;

        for (peer_id, acceptor) in membership.acceptors {
            if peer_id == self.my_node_id {
                continue;
            }
            if self.stop_check.should_stop() {
                return Ok(());
            }
            if probe(&acceptor, peer_id, self.rpc_timeout).await {
                self.answered.insert(peer_id);
                continue;
            }
            if !self.answered.contains(&peer_id) {
                slog::debug!(self.logger, "Peer {:?} has not answered yet", peer_id);
                continue;
            }

            let was_live = self.actor_client.upgrade()?.tombstone(peer_id).await?;
            if was_live {
                slog::warn!(self.logger, "Peer {:?} failed liveness probe", peer_id);
                if let Some(trigger) = self.rejoin_trigger.as_ref() {
                    trigger.request_rejoin(peer_id);
                }
            }
        }
        Ok(())
    }
}

/// True iff the acceptor answers in time with the identity we expect of it.
pub(crate) async fn probe(acceptor: &Arc<dyn AcceptorApi>, expected: NodeId, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, acceptor.acceptor_id()).await {
        Ok(Ok(node_id)) => node_id == expected,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::monitors::time::mocked_clock;
    use crate::node::test_utils::{spawn_actor_with_fakes, test_logger};

    #[tokio::test]
    async fn tombstones_unreachable_peer_and_requests_rejoin() {
        let (actor_client, fakes) = spawn_actor_with_fakes(3);
        let (clock, controller) = mocked_clock();
        let (trigger, mut requests) = rejoin_channel();
        let delay = Duration::from_millis(100);

        let (task, handle) = LivenessMonitorTask::new(
            test_logger(),
            NodeId::new(0),
            actor_client.weak(),
            clock,
            delay,
            Duration::from_millis(50),
            Some(trigger),
        );
        let join_handle = tokio::spawn(task.run());
        tokio::time::sleep(Duration::from_millis(20)).await;

        // Everyone healthy, nothing happens.
        controller.advance(delay);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(actor_client.membership_snapshot().await.unwrap().num_servers, 3);

        fakes[1].set_up(false);
        controller.advance(delay);
        let requested = tokio::time::timeout(Duration::from_secs(5), requests.next())
            .await
            .expect("Expected a rejoin request");
        assert_eq!(requested, Some(NodeId::new(1)));

        let membership = actor_client.membership_snapshot().await.unwrap();
        assert_eq!(membership.num_servers, 2);
        let live: Vec<_> = membership.acceptors.iter().map(|(id, _)| *id).collect();
        assert_eq!(live, vec![NodeId::new(0), NodeId::new(2)]);

        drop(handle);
        tokio::time::timeout(Duration::from_secs(5), join_handle)
            .await
            .expect("Monitor should exit on drop")
            .unwrap();
    }

    #[tokio::test]
    async fn peer_that_never_answered_keeps_its_slot() {
        let (actor_client, fakes) = spawn_actor_with_fakes(3);
        fakes[2].set_up(false);
        let (clock, controller) = mocked_clock();
        let (trigger, mut requests) = rejoin_channel();
        let delay = Duration::from_millis(100);

        let (task, handle) = LivenessMonitorTask::new(
            test_logger(),
            NodeId::new(0),
            actor_client.weak(),
            clock,
            delay,
            Duration::from_millis(50),
            Some(trigger),
        );
        let join_handle = tokio::spawn(task.run());
        tokio::time::sleep(Duration::from_millis(20)).await;

        for _ in 0..3 {
            controller.advance(delay);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(actor_client.membership_snapshot().await.unwrap().num_servers, 3);

        // Once it has answered, a later failure counts.
        fakes[2].set_up(true);
        controller.advance(delay);
        tokio::time::sleep(Duration::from_millis(100)).await;
        fakes[2].set_up(false);
        controller.advance(delay);
        let requested = tokio::time::timeout(Duration::from_secs(5), requests.next())
            .await
            .expect("Expected a rejoin request");
        assert_eq!(requested, Some(NodeId::new(2)));
        assert_eq!(actor_client.membership_snapshot().await.unwrap().num_servers, 2);

        drop(handle);
        join_handle.await.unwrap();
    }

    #[tokio::test]
    async fn answers_with_wrong_identity_fail_the_probe() {
        let impostor: Arc<dyn AcceptorApi> = crate::peer::test_utils::FakePeer::healthy(NodeId::new(4));
        assert!(!probe(&impostor, NodeId::new(3), Duration::from_millis(50)).await);
        assert!(probe(&impostor, NodeId::new(4), Duration::from_millis(50)).await);
    }
}
