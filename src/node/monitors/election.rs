use crate::actor::WeakActorClient;
use crate::node::membership::NodeId;
use crate::node::monitors::liveness::probe;
use crate::node::monitors::stop_signal::{self, StopCheck, Stopper};
use crate::node::monitors::time::{Clock, RealClock};
use crate::node::node_api::ActorExited;
use crate::node::operation::Operation;
use crate::node::proposer::{ProposeError, Proposer};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio::time::Duration;

pub(crate) struct ElectionMonitorHandle {
    _to_drop: Stopper,
}

struct ElectionMonitorTask<C: Clock> {
    logger: slog::Logger,
    my_node_id: NodeId,
    actor_client: WeakActorClient,
    proposer: Arc<Proposer>,
    clock: C,
    stop_check: StopCheck,
    delay: Duration,
    rpc_timeout: Duration,
}

impl ElectionMonitorHandle {
    pub(crate) fn spawn_monitor_task(
        logger: slog::Logger,
        my_node_id: NodeId,
        actor_client: WeakActorClient,
        proposer: Arc<Proposer>,
        delay: Duration,
        rpc_timeout: Duration,
    ) -> (Self, JoinHandle<()>) {
        let (task, handle) =
            ElectionMonitorTask::new(logger, my_node_id, actor_client, proposer, RealClock, delay, rpc_timeout);

        (handle, tokio::task::spawn(task.run()))
    }
}

impl<C: Clock> ElectionMonitorTask<C> {
    fn new(
        logger: slog::Logger,
        my_node_id: NodeId,
        actor_client: WeakActorClient,
        proposer: Arc<Proposer>,
        clock: C,
        delay: Duration,
        rpc_timeout: Duration,
    ) -> (Self, ElectionMonitorHandle) {
        let (stopper, stop_check) = stop_signal::new();
        let task = ElectionMonitorTask {
            logger,
            my_node_id,
            actor_client,
            proposer,
            clock,
            stop_check,
            delay,
            rpc_timeout,
        };

        (task, ElectionMonitorHandle { _to_drop: stopper })
    }

    async fn run(mut self) {
        loop {
            if !self.sleep_unless_stopped(self.delay).await {
                return;
            }

            match self.tick().await {
                Ok(()) => {}
                Err(ActorExited) => {
                    slog::info!(self.logger, "Election monitor exiting, node actor is gone");
                    return;
                }
            }
        }
    }

    async fn tick(&mut self) -> Result<(), ActorExited> {
        let failed_leader = match self.leader_if_unreachable().await? {
            Some(failed_leader) => failed_leader,
            None => return Ok(()),
        };

        // Candidates with a lower id go first. Everyone else waits, then checks whether an
        // election already happened.
        let live_ids: Vec<NodeId> = {
            let membership = self.actor_client.upgrade()?.membership_snapshot().await?;
            membership.acceptors.iter().map(|(id, _)| *id).collect()
        };
        let rank = election_rank(self.my_node_id, failed_leader, &live_ids);
        if rank > 0 {
            if !self.sleep_unless_stopped(self.delay * rank as u32).await {
                return Ok(());
            }
            if self.leader_if_unreachable().await?.is_none() {
                return Ok(());
            }
        }

        slog::info!(
            self.logger,
            "Leader {:?} is unreachable, proposing myself as leader",
            failed_leader
        );
        match self.proposer.propose(Operation::elect(self.my_node_id)).await {
            Ok(committed) => slog::info!(self.logger, "Election round committed {:?}", committed),
            Err(ProposeError::QuorumNotReached { phase, granted, required }) => slog::info!(
                self.logger,
                "Lost election attempt in {} phase ({}/{}), retrying next tick",
                phase,
                granted,
                required
            ),
            Err(ProposeError::ActorExited) => return Err(ActorExited),
        }
        Ok(())
    }

    /// The leader id if it fails its probe. With no leader installed yet, our own id is returned
    /// so the rank is computed against every live node.
    async fn leader_if_unreachable(&self) -> Result<Option<NodeId>, ActorExited> {
        let leader = self.actor_client.upgrade()?.leader_snapshot().await?;
        let leader = match leader {
            Some(leader) => leader,
            None => return Ok(Some(self.my_node_id)),
        };
        if leader.leader_id == self.my_node_id {
            return Ok(None);
        }

        let alive = match leader.acceptor.as_ref() {
            Some(acceptor) => probe(acceptor, leader.leader_id, self.rpc_timeout).await,
            None => false,
        };
        if alive {
            Ok(None)
        } else {
            Ok(Some(leader.leader_id))
        }
    }

    async fn sleep_unless_stopped(&mut self, duration: Duration) -> bool {
        tokio::select! {
            _ = self.clock.sleep(duration) => !self.stop_check.should_stop(),
            _ = self.stop_check.stopped() => false,
        }
    }
}

/// Number of live nodes, other than the failed leader, whose id is lower than ours.
fn election_rank(my_node_id: NodeId, failed_leader: NodeId, live_ids: &[NodeId]) -> usize {
    live_ids
        .iter()
        .filter(|id| **id != failed_leader && **id < my_node_id)
        .count()
}
