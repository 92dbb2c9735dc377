use crate::node::membership::NodeId;
use crate::node::operation::Operation;
use crate::node::proposal_id::ProposalId;
use crate::peer::LearnerApi;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::Duration;

/// Accept handlers run inside the node actor and must never call a learner directly: the local
/// learner is served by the same actor. They push a notice here instead, and a single worker task
/// fans it out.
pub(crate) fn create(logger: slog::Logger, rpc_timeout: Duration) -> (LearnQueue, LearnDispatcher) {
    let (tx, rx) = mpsc::unbounded_channel();

    (LearnQueue { sender: tx }, LearnDispatcher { logger, rpc_timeout, receiver: rx })
}

pub(crate) struct LearnNotice {
    pub(crate) proposal_id: ProposalId,
    pub(crate) operation: Operation,
    pub(crate) learners: Vec<(NodeId, Arc<dyn LearnerApi>)>,
}

pub(crate) struct LearnQueue {
    sender: mpsc::UnboundedSender<LearnNotice>,
}

impl LearnQueue {
    pub(crate) fn enqueue(&self, notice: LearnNotice) -> bool {
        self.sender.send(notice).is_ok()
    }
}

pub(crate) struct LearnDispatcher {
    logger: slog::Logger,
    rpc_timeout: Duration,
    receiver: mpsc::UnboundedReceiver<LearnNotice>,
}

impl LearnDispatcher {
    /// Runs until every `LearnQueue` is dropped and the backlog is drained.
    pub(crate) async fn run(mut self) {
        while let Some(notice) = self.receiver.recv().await {
            self.dispatch(notice).await;
        }
        slog::info!(self.logger, "Learner notification queue drained and closed");
    }

    async fn dispatch(&self, notice: LearnNotice) {
        for (learner_id, learner) in notice.learners.iter() {
            let call = learner.learn(notice.proposal_id, notice.operation.clone());
            match tokio::time::timeout(self.rpc_timeout, call).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => slog::debug!(
                    self.logger,
                    "Learner {:?} failed to learn {:?}: {}",
                    learner_id,
                    notice.operation,
                    e
                ),
                Err(_) => slog::debug!(
                    self.logger,
                    "Learner {:?} timed out learning {:?}",
                    learner_id,
                    notice.operation
                ),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::test_utils::FakePeer;

    #[tokio::test]
    async fn notifies_every_learner_and_skips_failures() {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let (queue, dispatcher) = create(logger, Duration::from_millis(100));
        let worker = tokio::spawn(dispatcher.run());

        let up_a = FakePeer::healthy(NodeId::new(0));
        let down = FakePeer::down(NodeId::new(1));
        let up_b = FakePeer::healthy(NodeId::new(2));
        let learners: Vec<(NodeId, Arc<dyn LearnerApi>)> = vec![
            (NodeId::new(0), up_a.clone()),
            (NodeId::new(1), down.clone()),
            (NodeId::new(2), up_b.clone()),
        ];

        for id in 1..=2 {
            assert!(queue.enqueue(LearnNotice {
                proposal_id: ProposalId::new(id),
                operation: Operation::put("k", format!("v{}", id), "me"),
                learners: learners.clone(),
            }));
        }

        // Dropping the queue lets the worker drain and exit.
        drop(queue);
        worker.await.unwrap();

        for peer in [&up_a, &up_b].iter() {
            let learned = peer.learned();
            assert_eq!(learned.len(), 2);
            assert_eq!(learned[0].0, ProposalId::new(1));
            assert_eq!(learned[1].1.value.as_deref(), Some("v2"));
        }
        assert!(down.learned().is_empty());
    }
}
