use crate::api::{try_create_paxos_node, PaxosMemberInfo, PaxosNode, PaxosNodeConfig, PaxosNodeCreationError, PaxosOptions};
use crate::node::{AcceptFaultHook, NodeId, RejoinTrigger};
use crate::peer::{GrpcRegistry, LocalRegistry, PeerRegistry};
use std::sync::Arc;
use tokio::time::Duration;

/// LaunchSpec is everything needed to start, or restart, one member.
pub(crate) struct LaunchSpec {
    pub(crate) member: PaxosMemberInfo,
    pub(crate) cluster_members: Vec<PaxosMemberInfo>,
    pub(crate) rejoin_trigger: Option<RejoinTrigger>,
    pub(crate) rejoining: bool,
}

/// NodeLauncher builds fresh nodes, and knows how every node it built can be reached.
#[async_trait::async_trait]
pub(crate) trait NodeLauncher: Send + Sync {
    async fn launch(&self, spec: LaunchSpec) -> Result<PaxosNode, PaxosNodeCreationError>;

    fn registry(&self) -> Arc<dyn PeerRegistry>;
}

/// LocalLauncher runs every node in this process. Nodes reach each other through a shared
/// `LocalRegistry` that each launch updates.
pub(crate) struct LocalLauncher {
    logger: slog::Logger,
    options: PaxosOptions,
    registry: Arc<LocalRegistry>,
    accept_fault_hook: Option<Arc<dyn AcceptFaultHook>>,
}

impl LocalLauncher {
    pub(crate) fn new(
        logger: slog::Logger,
        options: PaxosOptions,
        accept_fault_hook: Option<Arc<dyn AcceptFaultHook>>,
    ) -> Self {
        LocalLauncher {
            logger,
            options,
            registry: Arc::new(LocalRegistry::new()),
            accept_fault_hook,
        }
    }
}

#[async_trait::async_trait]
impl NodeLauncher for LocalLauncher {
    async fn launch(&self, spec: LaunchSpec) -> Result<PaxosNode, PaxosNodeCreationError> {
        let node_id = NodeId::new(spec.member.node_id);
        let node = try_create_paxos_node(PaxosNodeConfig {
            my_node_id: spec.member.node_id,
            cluster_members: spec.cluster_members,
            info_logger: self.logger.clone(),
            options: self.options.clone(),
            registry: self.registry.clone(),
            serve_rpc: false,
            rejoin_trigger: spec.rejoin_trigger,
            accept_fault_hook: self.accept_fault_hook.clone(),
            rejoining: spec.rejoining,
        })
        .await?;

        self.registry.register(node_id, node.peer_handle());
        Ok(node)
    }

    fn registry(&self) -> Arc<dyn PeerRegistry> {
        self.registry.clone()
    }
}

/// GrpcLauncher starts nodes that serve gRPC on their member address. Peers are reached through
/// gRPC even when they live in the same process.
pub(crate) struct GrpcLauncher {
    logger: slog::Logger,
    options: PaxosOptions,
    registry: Arc<GrpcRegistry>,
    accept_fault_hook: Option<Arc<dyn AcceptFaultHook>>,
}

impl GrpcLauncher {
    pub(crate) fn new(
        logger: slog::Logger,
        options: PaxosOptions,
        rpc_timeout: Duration,
        accept_fault_hook: Option<Arc<dyn AcceptFaultHook>>,
    ) -> Self {
        let registry = Arc::new(GrpcRegistry::new(logger.clone(), rpc_timeout));
        GrpcLauncher {
            logger,
            options,
            registry,
            accept_fault_hook,
        }
    }
}

#[async_trait::async_trait]
impl NodeLauncher for GrpcLauncher {
    async fn launch(&self, spec: LaunchSpec) -> Result<PaxosNode, PaxosNodeCreationError> {
        try_create_paxos_node(PaxosNodeConfig {
            my_node_id: spec.member.node_id,
            cluster_members: spec.cluster_members,
            info_logger: self.logger.clone(),
            options: self.options.clone(),
            registry: self.registry.clone(),
            serve_rpc: true,
            rejoin_trigger: spec.rejoin_trigger,
            accept_fault_hook: self.accept_fault_hook.clone(),
            rejoining: spec.rejoining,
        })
        .await
    }

    fn registry(&self) -> Arc<dyn PeerRegistry> {
        self.registry.clone()
    }
}
