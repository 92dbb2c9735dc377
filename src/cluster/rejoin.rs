use crate::api::{PaxosMemberInfo, PaxosNode};
use crate::cluster::launcher::{LaunchSpec, NodeLauncher};
use crate::cluster::PaxosClusterError;
use crate::node::{probe, NodeId, RejoinRequests, RejoinTrigger};
use crate::peer::PeerHandle;
use std::sync::{Arc, Mutex};
use tokio::time::Duration;

/// Rejoiner replaces dead members. It keeps the current node of every slot.
pub(crate) struct Rejoiner {
    pub(crate) logger: slog::Logger,
    pub(crate) members: Vec<PaxosMemberInfo>,
    pub(crate) launcher: Arc<dyn NodeLauncher>,
    pub(crate) nodes: Arc<Mutex<Vec<PaxosNode>>>,
    pub(crate) leader_based: bool,
    pub(crate) monitor_delay: Duration,
    pub(crate) rpc_timeout: Duration,
    pub(crate) rejoin_trigger: Option<RejoinTrigger>,
}

impl Rejoiner {
    /// Runs until aborted, since replacements get a trigger of their own. Triggers get a prompt
    /// answer, and every `monitor_delay` all members are swept regardless, so a slot that was
    /// tombstoned without a trigger (by an ELECT) or whose rejoin failed is retried.
    pub(crate) async fn supervise(&self, mut requests: RejoinRequests) {
        loop {
            tokio::select! {
                request = requests.next() => match request {
                    Some(node_id) => match self.member(node_id).cloned() {
                        Some(member) => self.reconcile(&member).await,
                        None => slog::warn!(self.logger, "Ignoring rejoin of unknown node {:?}", node_id),
                    },
                    None => break,
                },
                _ = tokio::time::sleep(self.monitor_delay) => self.sweep().await,
            }
        }
        slog::info!(self.logger, "Rejoin supervisor exiting");
    }

    async fn sweep(&self) {
        for member in self.members.iter() {
            self.reconcile(member).await;
        }
    }

    /// A member that answers is re-registered wherever a live node has it tombstoned. One that
    /// does not is replaced.
    async fn reconcile(&self, member: &PaxosMemberInfo) {
        if self.is_alive(member).await {
            self.register_where_missing(member).await;
            return;
        }

        match self.rejoin(member.id()).await {
            Ok(_) => slog::info!(self.logger, "Node {:?} rejoined", member.id()),
            Err(e) => slog::warn!(self.logger, "Rejoin of node {:?} failed, retrying next sweep: {}", member.id(), e),
        }
    }

    pub(crate) async fn rejoin(&self, node_id: NodeId) -> Result<PaxosNode, PaxosClusterError> {
        let member = self
            .member(node_id)
            .cloned()
            .ok_or(PaxosClusterError::UnknownNode(node_id.as_usize()))?;

        let survivors = self.find_survivors(node_id).await;
        if survivors.is_empty() {
            return Err(PaxosClusterError::NoSurvivors(node_id.as_usize()));
        }
        let leader = if self.leader_based {
            self.discover_leader(node_id, &survivors).await
        } else {
            None
        };
        slog::info!(
            self.logger,
            "Rejoining node {:?} with {} survivors, leader {:?}",
            node_id,
            survivors.len(),
            leader
        );

        let replacement = self
            .launcher
            .launch(LaunchSpec {
                member: member.clone(),
                cluster_members: self.members.clone(),
                rejoin_trigger: self.rejoin_trigger.clone(),
                rejoining: true,
            })
            .await?;

        for (survivor, handle) in survivors.iter() {
            replacement.register_peer(survivor.id(), handle.clone()).await?;
        }
        if let Some(leader) = leader {
            replacement.install_leader(leader).await?;
        }

        self.register_in(&survivors, &member).await;

        if let Ok(mut nodes) = self.nodes.lock() {
            if let Some(slot) = nodes.get_mut(node_id.as_usize()) {
                *slot = replacement.clone();
            }
        }
        Ok(replacement)
    }

    async fn register_where_missing(&self, member: &PaxosMemberInfo) {
        let others: Vec<PaxosNode> = self
            .nodes
            .lock()
            .map(|nodes| nodes.iter().filter(|n| n.node_id() != member.id()).cloned().collect())
            .unwrap_or_default();

        for other in others {
            let view = match other.membership_view().await {
                Ok(view) => view,
                Err(_) => continue,
            };
            if view.live_nodes.contains(&member.id()) {
                continue;
            }

            slog::info!(self.logger, "Node {:?} lost live node {:?}, re-registering it", other.node_id(), member.id());
            if let Err(e) = other.peer_handle().acceptor.register_peer_pair(member.clone()).await {
                slog::warn!(self.logger, "Node {:?} did not take node {:?}: {}", other.node_id(), member.id(), e);
            }
        }
    }

    async fn register_in(&self, survivors: &[(PaxosMemberInfo, PeerHandle)], member: &PaxosMemberInfo) {
        for (survivor, handle) in survivors.iter() {
            if let Err(e) = handle.acceptor.register_peer_pair(member.clone()).await {
                slog::warn!(
                    self.logger,
                    "Survivor {:?} did not take node {:?}: {}",
                    survivor.id(),
                    member.id(),
                    e
                );
            }
        }
    }

    async fn find_survivors(&self, dead: NodeId) -> Vec<(PaxosMemberInfo, PeerHandle)> {
        let registry = self.launcher.registry();
        let mut survivors = Vec::new();
        for member in self.members.iter().filter(|m| m.id() != dead) {
            let handle = match registry.lookup(member).await {
                Ok(handle) => handle,
                Err(_) => continue,
            };
            if probe(&handle.acceptor, member.id(), self.rpc_timeout).await {
                survivors.push((member.clone(), handle));
            }
        }
        survivors
    }

    /// Survivors keep naming the dead node until their ELECT round commits, so answers naming
    /// the rejoining id are skipped and asked again after `monitor_delay`. Every live node gets
    /// a staggered election turn within that many attempts.
    async fn discover_leader(&self, rejoining: NodeId, survivors: &[(PaxosMemberInfo, PeerHandle)]) -> Option<NodeId> {
        let attempts = 2 * (self.members.len() + 2);
        for attempt in 1..=attempts {
            for (_, handle) in survivors {
                if let Ok(Ok(Some(leader))) = tokio::time::timeout(self.rpc_timeout, handle.acceptor.leader_id()).await {
                    if leader != rejoining {
                        return Some(leader);
                    }
                }
            }
            if attempt < attempts {
                tokio::time::sleep(self.monitor_delay).await;
            }
        }

        slog::warn!(self.logger, "Survivors agree on no leader other than {:?}", rejoining);
        None
    }

    async fn is_alive(&self, member: &PaxosMemberInfo) -> bool {
        match self.launcher.registry().lookup(member).await {
            Ok(handle) => probe(&handle.acceptor, member.id(), self.rpc_timeout).await,
            Err(_) => false,
        }
    }

    fn member(&self, node_id: NodeId) -> Option<&PaxosMemberInfo> {
        self.members.iter().find(|m| m.id() == node_id)
    }
}
