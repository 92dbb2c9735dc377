use crate::api::error::PaxosError;
use crate::api::types::{MembershipView, PaxosMemberInfo};
use crate::node::{NodeId, NodeService, Operation, OperationKind};
use crate::peer::{AcceptorApi, LearnerApi, PeerHandle, PeerRegistry, StoreUpdate};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Duration;

/// PaxosNode is the client facing handle of one running node.
#[derive(Clone)]
pub struct PaxosNode {
    member: PaxosMemberInfo,
    service: Arc<NodeService>,
    stopped: watch::Receiver<bool>,
}

impl PaxosNode {
    pub(crate) fn new(member: PaxosMemberInfo, service: Arc<NodeService>, stopped: watch::Receiver<bool>) -> Self {
        PaxosNode {
            member,
            service,
            stopped,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.service.my_node_id
    }

    pub fn member_info(&self) -> &PaxosMemberInfo {
        &self.member
    }

    pub async fn put(&self, key: &str, value: &str, requester_id: &str) -> Result<(), PaxosError> {
        authorize(requester_id)?;
        require_key(key)?;

        if self.service.leader_based {
            let update = StoreUpdate {
                kind: OperationKind::Put,
                key: self.store_key(requester_id, key),
                value: Some(value.to_string()),
            };
            self.service.leader_path.forward(update).await?;
        } else {
            self.service.proposer.propose(Operation::put(key, value, requester_id)).await?;
        }
        Ok(())
    }

    /// Reads the local store only.
    pub async fn get(&self, key: &str, requester_id: &str) -> Result<Option<String>, PaxosError> {
        authorize(requester_id)?;
        require_key(key)?;

        let store_key = self.store_key(requester_id, key);
        let value = self.service.actor_client.upgrade()?.read_store(store_key).await?;
        Ok(value)
    }

    pub async fn delete(&self, key: &str, requester_id: &str) -> Result<(), PaxosError> {
        authorize(requester_id)?;
        require_key(key)?;

        if self.service.leader_based {
            let update = StoreUpdate {
                kind: OperationKind::Delete,
                key: self.store_key(requester_id, key),
                value: None,
            };
            self.service.leader_path.forward(update).await?;
        } else {
            self.service.proposer.propose(Operation::delete(key, requester_id)).await?;
        }
        Ok(())
    }

    /// Stops this node. Graceful unless `force`.
    pub fn request_stop(&self, requester_id: &str, force: bool) -> Result<(), PaxosError> {
        authorize(requester_id)?;
        slog::info!(self.service.logger, "Stop requested by '{}'", requester_id);
        self.stop(force);
        Ok(())
    }

    /// Has every node dump its state to its log under `name`.
    pub async fn log_global_state(&self, name: &str) -> Result<(), PaxosError> {
        if self.service.leader_based {
            self.service.leader_path.forward(StoreUpdate::from(Operation::log(name))).await?;
        } else {
            self.service.proposer.propose(Operation::log(name)).await?;
        }
        Ok(())
    }

    /// Asks the acceptor in slot `index` to stop gracefully. Our own index stops this node.
    pub async fn request_stop_node(&self, index: usize) -> Result<(), PaxosError> {
        let node_id = NodeId::new(index);
        if node_id == self.node_id() {
            self.stop(false);
            return Ok(());
        }

        let membership = self.service.actor_client.upgrade()?.membership_snapshot().await?;
        let acceptor = membership
            .acceptors
            .into_iter()
            .find(|(id, _)| *id == node_id)
            .map(|(_, acceptor)| acceptor)
            .ok_or_else(|| PaxosError::PeerUnreachable(format!("No live node in slot {}", index)))?;

        acceptor.request_stop(false, Duration::from_millis(0)).await?;
        Ok(())
    }

    pub async fn membership_view(&self) -> Result<MembershipView, PaxosError> {
        let actor_client = self.service.actor_client.upgrade()?;
        let membership = actor_client.membership_snapshot().await?;
        let leader = actor_client.leader_snapshot().await?;

        Ok(MembershipView {
            num_servers: membership.num_servers,
            live_nodes: membership.acceptors.iter().map(|(id, _)| *id).collect(),
            leader: leader.map(|l| l.leader_id),
        })
    }

    /// Returns immediately. Use `stopped()` to wait for the node to finish stopping.
    pub fn stop(&self, force: bool) {
        if !self.service.stop_node(force, Duration::from_millis(0)) {
            slog::debug!(self.service.logger, "Node is already stopped");
        }
    }

    pub async fn stopped(&self) {
        let mut stopped = self.stopped.clone();
        while !*stopped.borrow() {
            if stopped.changed().await.is_err() {
                return;
            }
        }
    }

    pub fn is_stopped(&self) -> bool {
        *self.stopped.borrow()
    }

    /// In-process handles to this node's acceptor and learner.
    pub fn peer_handle(&self) -> PeerHandle {
        let acceptor: Arc<dyn AcceptorApi> = self.service.clone();
        let learner: Arc<dyn LearnerApi> = self.service.clone();
        PeerHandle { acceptor, learner }
    }

    /// Resolves every other member through `registry` and registers it in this node's membership.
    /// Members that cannot be resolved stay tombstoned until they rejoin.
    pub async fn connect_peers(
        &self,
        members: &[PaxosMemberInfo],
        registry: &dyn PeerRegistry,
    ) -> Result<(), PaxosError> {
        for member in members.iter().filter(|m| m.node_id != self.member.node_id) {
            match registry.lookup(member).await {
                Ok(handle) => self.register_peer(member.id(), handle).await?,
                Err(e) => slog::warn!(self.service.logger, "Could not resolve peer {:?}: {}", member, e),
            }
        }
        Ok(())
    }

    /// Asks every other member to register this node. Members that are not up yet are skipped,
    /// they pick this node up through their own `connect_peers`.
    pub async fn announce_to_peers(&self, members: &[PaxosMemberInfo], registry: &dyn PeerRegistry) {
        for member in members.iter().filter(|m| m.node_id != self.member.node_id) {
            let announced = match registry.lookup(member).await {
                Ok(handle) => handle.acceptor.register_peer_pair(self.member.clone()).await,
                Err(e) => Err(e),
            };
            match announced {
                Ok(()) => slog::info!(self.service.logger, "Announced to peer {:?}", member.id()),
                Err(e) => slog::info!(self.service.logger, "Peer {:?} did not take our announce: {}", member.id(), e),
            }
        }
    }

    pub(crate) async fn register_peer(&self, node_id: NodeId, handle: PeerHandle) -> Result<(), PaxosError> {
        let actor_client = self.service.actor_client.upgrade()?;
        actor_client
            .register_acceptor(node_id, handle.acceptor)
            .await
            .map_err(|e| PaxosError::PeerUnreachable(e.to_string()))?;
        actor_client
            .register_learner(node_id, handle.learner)
            .await
            .map_err(|e| PaxosError::PeerUnreachable(e.to_string()))?;
        Ok(())
    }

    pub(crate) async fn install_leader(&self, leader_id: NodeId) -> Result<(), PaxosError> {
        self.service.actor_client.upgrade()?.install_leader(leader_id).await?;
        Ok(())
    }

    fn store_key(&self, requester_id: &str, key: &str) -> String {
        self.service.store_key_mode.store_key(requester_id, key)
    }
}

fn authorize(requester_id: &str) -> Result<(), PaxosError> {
    if requester_id.trim().is_empty() {
        Err(PaxosError::Unauthorized)
    } else {
        Ok(())
    }
}

fn require_key(key: &str) -> Result<(), PaxosError> {
    if key.is_empty() {
        Err(PaxosError::MissingKey)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_requester_is_unauthorized() {
        assert_eq!(authorize(""), Err(PaxosError::Unauthorized));
        assert_eq!(authorize("  \t"), Err(PaxosError::Unauthorized));
        assert_eq!(authorize("alice"), Ok(()));
    }

    #[test]
    fn empty_key_is_missing() {
        assert_eq!(require_key(""), Err(PaxosError::MissingKey));
        assert_eq!(require_key("k"), Ok(()));
    }
}
