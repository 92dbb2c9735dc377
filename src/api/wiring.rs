use crate::actor::{ActorClient, NodeActor};
use crate::api::client::PaxosNode;
use crate::api::options::{PaxosOptions, PaxosOptionsValidated};
use crate::api::types::PaxosMemberInfo;
use crate::node::{
    self, AcceptFaultHook, ElectionMonitorHandle, LeaderPath, LivenessMonitorHandle, Membership, NodeId, NodeService,
    NodeState, Proposer, RejoinTrigger,
};
use crate::peer::PeerRegistry;
use crate::server::RpcServer;
use std::collections::HashSet;
use std::convert::TryFrom;
use std::sync::Arc;

pub struct PaxosNodeConfig {
    pub my_node_id: usize,
    pub cluster_members: Vec<PaxosMemberInfo>,
    pub info_logger: slog::Logger,
    pub options: PaxosOptions,
    /// Resolves peers when they register with this node.
    pub registry: Arc<dyn PeerRegistry>,
    /// Serve the gRPC surface on this member's address.
    pub serve_rpc: bool,
    /// Receives ids the liveness monitor declares dead. Only used when node restart is allowed.
    pub rejoin_trigger: Option<RejoinTrigger>,
    pub accept_fault_hook: Option<Arc<dyn AcceptFaultHook>>,
    /// Replacement for a dead member. The lowest id is not installed as leader, the rejoin
    /// installs whichever leader the survivors agree on.
    pub rejoining: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum PaxosNodeCreationError {
    #[error("Invalid cluster info: {0}")]
    InvalidClusterInfo(String),
    #[error("Illegal options for configuring node: {0}")]
    IllegalOptions(String),
    #[error("my node ID not in cluster config")]
    MeNotInCluster,
    #[error("Node stopped while starting")]
    NodeStopped,
}

pub async fn try_create_paxos_node(config: PaxosNodeConfig) -> Result<PaxosNode, PaxosNodeCreationError> {
    let requested_node_id = config.my_node_id;
    let options = PaxosOptionsValidated::try_from(config.options)
        .map_err(|e| PaxosNodeCreationError::IllegalOptions(e.to_string()))?;
    validate_members(&config.cluster_members)?;

    let my_member_info = config
        .cluster_members
        .iter()
        .find(|m| m.node_id == requested_node_id)
        .cloned()
        .ok_or(PaxosNodeCreationError::MeNotInCluster)?;
    let my_node_id = my_member_info.id();
    let cluster_size = config.cluster_members.len();

    let logger = config.info_logger.new(slog::o!("NodeId" => my_node_id.as_usize()));

    let (actor_client, actor_queue_rx) = ActorClient::new(64);
    let weak_client = actor_client.weak();
    let (mut lifecycle, stop_requester, stopped) =
        node::create_lifecycle(logger.clone(), actor_client, options.shutdown_grace);

    let proposer = Arc::new(Proposer::new(
        logger.clone(),
        my_node_id,
        weak_client.clone(),
        options.rpc_timeout,
    ));
    let leader_path = LeaderPath::new(
        logger.clone(),
        my_node_id,
        weak_client.clone(),
        options.request_attempts,
        options.monitor_delay,
        options.rpc_timeout,
    );
    let service = Arc::new(NodeService::new(
        logger.clone(),
        my_node_id,
        options.leader_based,
        options.store_key_mode,
        weak_client.clone(),
        proposer.clone(),
        leader_path,
        config.registry,
        config.accept_fault_hook,
        stop_requester,
    ));

    let membership = Membership::new(cluster_size, my_node_id, service.clone(), service.clone())
        .map_err(|e| PaxosNodeCreationError::InvalidClusterInfo(e.to_string()))?;
    let (learn_queue, learn_dispatcher) = node::create_learn_dispatch(logger.clone(), options.rpc_timeout);
    let state = NodeState::new(
        logger.clone(),
        my_node_id,
        options.store_key_mode,
        membership,
        learn_queue,
    );

    let node_actor = NodeActor::new(logger.clone(), actor_queue_rx, state);
    lifecycle.track("node-actor", tokio::spawn(node_actor.run_event_loop()));
    lifecycle.track("learn-dispatcher", tokio::spawn(learn_dispatcher.run()));

    if options.leader_based && !config.rejoining {
        let initial_leader = lowest_member_id(&config.cluster_members);
        weak_client
            .upgrade()
            .map_err(|_| PaxosNodeCreationError::NodeStopped)?
            .install_leader(initial_leader)
            .await
            .map_err(|_| PaxosNodeCreationError::NodeStopped)?;
    }

    let rejoin_trigger = if options.allow_node_restart {
        config.rejoin_trigger
    } else {
        None
    };
    let (liveness_handle, liveness_task) = LivenessMonitorHandle::spawn_monitor_task(
        logger.clone(),
        my_node_id,
        weak_client.clone(),
        options.monitor_delay,
        options.rpc_timeout,
        rejoin_trigger,
    );
    lifecycle.set_liveness_monitor(liveness_handle, liveness_task);

    if options.leader_based {
        let (election_handle, election_task) = ElectionMonitorHandle::spawn_monitor_task(
            logger.clone(),
            my_node_id,
            weak_client.clone(),
            proposer,
            options.monitor_delay,
            options.rpc_timeout,
        );
        lifecycle.set_election_monitor(election_handle, election_task);
    }

    let paxos_node = PaxosNode::new(my_member_info.clone(), service, stopped);

    if config.serve_rpc {
        let (server_stopper, server_stop_check) = node::stop_signal();
        let rpc_server = RpcServer::new(logger.clone(), paxos_node.clone());
        let server_task = tokio::spawn(rpc_server.run(my_member_info.socket_addr(), server_stop_check));
        lifecycle.set_server(server_stopper, server_task);
    }

    tokio::spawn(lifecycle.run());
    slog::info!(logger, "Node started with {} configured members", cluster_size);

    Ok(paxos_node)
}

/// Node ids are membership slots, so they must be exactly `0..n`.
fn validate_members(members: &[PaxosMemberInfo]) -> Result<(), PaxosNodeCreationError> {
    if members.is_empty() {
        return Err(PaxosNodeCreationError::InvalidClusterInfo("No members".to_string()));
    }

    let mut seen = HashSet::with_capacity(members.len());
    for member in members {
        if member.node_id >= members.len() {
            return Err(PaxosNodeCreationError::InvalidClusterInfo(format!(
                "Node id {} out of range for {} members",
                member.node_id,
                members.len()
            )));
        }
        if !seen.insert(member.node_id) {
            return Err(PaxosNodeCreationError::InvalidClusterInfo(format!(
                "Duplicate node id {}",
                member.node_id
            )));
        }
    }

    Ok(())
}

pub(crate) fn lowest_member_id(members: &[PaxosMemberInfo]) -> NodeId {
    NodeId::new(members.iter().map(|m| m.node_id).min().unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn member(node_id: usize) -> PaxosMemberInfo {
        PaxosMemberInfo {
            node_id,
            ip_addr: Ipv4Addr::LOCALHOST,
            port: 7000 + node_id as u16,
        }
    }

    #[test]
    fn members_must_cover_slots() {
        assert!(validate_members(&[member(0), member(1), member(2)]).is_ok());
        assert!(validate_members(&[]).is_err());
        assert!(validate_members(&[member(0), member(2)]).is_err());
        assert!(validate_members(&[member(1), member(1)]).is_err());
    }
}
