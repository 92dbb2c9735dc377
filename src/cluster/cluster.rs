use crate::api::{
    lowest_member_id, PaxosError, PaxosMemberInfo, PaxosNode, PaxosNodeCreationError, PaxosOptions,
    PaxosOptionsValidated,
};
use crate::cluster::launcher::{GrpcLauncher, LaunchSpec, LocalLauncher, NodeLauncher};
use crate::cluster::rejoin::Rejoiner;
use crate::node::{rejoin_channel, AcceptFaultHook, NodeId};
use std::convert::TryFrom;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClusterTransport {
    /// Nodes call each other directly.
    InProcess,
    /// Every node serves gRPC on its member address.
    Grpc,
}

pub struct PaxosClusterConfig {
    pub members: Vec<PaxosMemberInfo>,
    pub info_logger: slog::Logger,
    pub options: PaxosOptions,
    pub transport: ClusterTransport,
    pub accept_fault_hook: Option<Arc<dyn AcceptFaultHook>>,
}

#[derive(Debug, thiserror::Error)]
pub enum PaxosClusterError {
    #[error("Failed to create node")]
    NodeCreation(#[from] PaxosNodeCreationError),
    #[error("Node call failed: {0}")]
    Node(#[from] PaxosError),
    #[error("Unknown node {0}")]
    UnknownNode(usize),
    #[error("No surviving peer to rejoin node {0} with")]
    NoSurvivors(usize),
}

/// PaxosCluster runs every member of a cluster in this process and, when node restart is
/// allowed, replaces members that the others declare dead.
pub struct PaxosCluster {
    logger: slog::Logger,
    nodes: Arc<Mutex<Vec<PaxosNode>>>,
    rejoiner: Arc<Rejoiner>,
    supervisor: Option<JoinHandle<()>>,
}

impl PaxosCluster {
    pub async fn start(config: PaxosClusterConfig) -> Result<Self, PaxosClusterError> {
        let options = PaxosOptionsValidated::try_from(config.options.clone())
            .map_err(|e| PaxosNodeCreationError::IllegalOptions(e.to_string()))?;

        let launcher: Arc<dyn NodeLauncher> = match config.transport {
            ClusterTransport::InProcess => Arc::new(LocalLauncher::new(
                config.info_logger.clone(),
                config.options.clone(),
                config.accept_fault_hook.clone(),
            )),
            ClusterTransport::Grpc => Arc::new(GrpcLauncher::new(
                config.info_logger.clone(),
                config.options.clone(),
                options.rpc_timeout,
                config.accept_fault_hook.clone(),
            )),
        };

        Self::start_with_launcher(config.info_logger, config.members, options, launcher).await
    }

    pub(crate) async fn start_with_launcher(
        logger: slog::Logger,
        mut members: Vec<PaxosMemberInfo>,
        options: PaxosOptionsValidated,
        launcher: Arc<dyn NodeLauncher>,
    ) -> Result<Self, PaxosClusterError> {
        let (rejoin_trigger, rejoin_requests) = if options.allow_node_restart {
            let (trigger, requests) = rejoin_channel();
            (Some(trigger), Some(requests))
        } else {
            (None, None)
        };

        members.sort_by_key(|m| m.node_id);
        let mut nodes = Vec::with_capacity(members.len());
        for member in members.iter() {
            let node = launcher
                .launch(LaunchSpec {
                    member: member.clone(),
                    cluster_members: members.clone(),
                    rejoin_trigger: rejoin_trigger.clone(),
                    rejoining: false,
                })
                .await?;
            nodes.push(node);
        }

        let registry = launcher.registry();
        for node in nodes.iter() {
            node.connect_peers(&members, registry.as_ref()).await?;
        }
        if options.leader_based {
            slog::info!(logger, "Initial leader is {:?}", lowest_member_id(&members));
        }

        let rejoiner = Arc::new(Rejoiner {
            logger: logger.clone(),
            members,
            launcher,
            nodes: Arc::new(Mutex::new(nodes)),
            leader_based: options.leader_based,
            monitor_delay: options.monitor_delay,
            rpc_timeout: options.rpc_timeout,
            rejoin_trigger,
        });

        let supervisor = rejoin_requests.map(|requests| {
            let rejoiner = rejoiner.clone();
            tokio::spawn(async move { rejoiner.supervise(requests).await })
        });

        Ok(PaxosCluster {
            logger,
            nodes: rejoiner.nodes.clone(),
            rejoiner,
            supervisor,
        })
    }

    /// The current node in slot `node_id`. After a rejoin this is the replacement.
    pub fn node(&self, node_id: usize) -> Option<PaxosNode> {
        self.nodes.lock().ok().and_then(|nodes| nodes.get(node_id).cloned())
    }

    pub fn nodes(&self) -> Vec<PaxosNode> {
        self.nodes.lock().map(|nodes| nodes.clone()).unwrap_or_default()
    }

    /// Stops the node in slot `node_id` and waits for it to finish stopping.
    pub async fn stop_node(&self, node_id: usize, force: bool) -> Result<(), PaxosClusterError> {
        let node = self.node(node_id).ok_or(PaxosClusterError::UnknownNode(node_id))?;
        node.stop(force);
        node.stopped().await;
        slog::info!(self.logger, "Node {} stopped", node_id);
        Ok(())
    }

    /// Replaces the node in slot `node_id` right away, whether or not anyone declared it dead.
    pub async fn rejoin(&self, node_id: usize) -> Result<PaxosNode, PaxosClusterError> {
        self.rejoiner.rejoin(NodeId::new(node_id)).await
    }

    pub async fn shutdown(mut self) {
        if let Some(supervisor) = self.supervisor.take() {
            supervisor.abort();
        }
        let nodes = self.nodes();
        for node in nodes.iter() {
            node.stop(false);
        }
        for node in nodes.iter() {
            node.stopped().await;
        }
        slog::info!(self.logger, "Cluster shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::{Duration, Instant};

    /// Fails the first replacement launch, then delegates.
    struct FlakyLauncher {
        inner: LocalLauncher,
        failed_rejoins: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl NodeLauncher for FlakyLauncher {
        async fn launch(&self, spec: LaunchSpec) -> Result<PaxosNode, PaxosNodeCreationError> {
            if spec.rejoining && self.failed_rejoins.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(PaxosNodeCreationError::InvalidClusterInfo("launch refused".to_string()));
            }
            self.inner.launch(spec).await
        }

        fn registry(&self) -> Arc<dyn crate::peer::PeerRegistry> {
            self.inner.registry()
        }
    }

    #[tokio::test]
    async fn failed_rejoin_is_retried() {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let options = PaxosOptions {
            allow_node_restart: Some(true),
            monitor_delay: Some(Duration::from_millis(100)),
            rpc_timeout: Some(Duration::from_millis(200)),
            ..PaxosOptions::default()
        };
        let launcher = Arc::new(FlakyLauncher {
            inner: LocalLauncher::new(logger.clone(), options.clone(), None),
            failed_rejoins: AtomicUsize::new(0),
        });
        let members = (0..3)
            .map(|node_id| PaxosMemberInfo {
                node_id,
                ip_addr: Ipv4Addr::LOCALHOST,
                port: 0,
            })
            .collect();
        let validated = PaxosOptionsValidated::try_from(options).unwrap();
        let cluster = PaxosCluster::start_with_launcher(logger, members, validated, launcher.clone())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(300)).await;

        cluster.stop_node(2, true).await.unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            let replaced = !cluster.node(2).unwrap().is_stopped();
            let view = cluster.node(0).unwrap().membership_view().await.unwrap();
            if replaced && view.live_nodes == vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)] {
                break;
            }
            assert!(Instant::now() < deadline, "Node 2 was never replaced");
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(launcher.failed_rejoins.load(Ordering::SeqCst) >= 2);

        cluster.shutdown().await;
    }
}
