use crate::api::PaxosMemberInfo;
use crate::node::NodeId;
use crate::peer::grpc_client::GrpcPeerClient;
use crate::peer::{PeerError, PeerHandle, PeerRegistry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::time::Duration;

/// GrpcRegistry opens a fresh lazy channel to the member's address on every lookup, so a
/// replacement node listening on the same address is picked up on rejoin.
pub struct GrpcRegistry {
    logger: slog::Logger,
    rpc_timeout: Duration,
}

impl GrpcRegistry {
    pub fn new(logger: slog::Logger, rpc_timeout: Duration) -> Self {
        GrpcRegistry { logger, rpc_timeout }
    }
}

#[async_trait::async_trait]
impl PeerRegistry for GrpcRegistry {
    async fn lookup(&self, member: &PaxosMemberInfo) -> Result<PeerHandle, PeerError> {
        let client = GrpcPeerClient::new(self.logger.clone(), member, self.rpc_timeout)
            .map_err(|e| PeerError::Unreachable(format!("{:?}: {}", member, e)))?;

        Ok(PeerHandle {
            acceptor: Arc::new(client.clone()),
            learner: Arc::new(client),
        })
    }
}

/// LocalRegistry resolves members to nodes running in the same process.
#[derive(Default)]
pub struct LocalRegistry {
    nodes: Mutex<HashMap<NodeId, PeerHandle>>,
}

impl LocalRegistry {
    pub fn new() -> Self {
        LocalRegistry::default()
    }

    /// Replaces whatever was registered for `node_id`.
    pub fn register(&self, node_id: NodeId, handle: PeerHandle) {
        if let Ok(mut nodes) = self.nodes.lock() {
            nodes.insert(node_id, handle);
        }
    }
}

#[async_trait::async_trait]
impl PeerRegistry for LocalRegistry {
    async fn lookup(&self, member: &PaxosMemberInfo) -> Result<PeerHandle, PeerError> {
        let nodes = self
            .nodes
            .lock()
            .map_err(|_| PeerError::Unreachable("Local registry is poisoned".to_string()))?;

        nodes
            .get(&NodeId::new(member.node_id))
            .cloned()
            .ok_or_else(|| PeerError::Unreachable(format!("No local node registered for {:?}", member)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::peer::test_utils::FakePeer;
    use std::net::Ipv4Addr;

    fn member(node_id: usize) -> PaxosMemberInfo {
        PaxosMemberInfo {
            node_id,
            ip_addr: Ipv4Addr::LOCALHOST,
            port: 7000,
        }
    }

    #[tokio::test]
    async fn local_lookup_returns_latest_registration() {
        let registry = LocalRegistry::new();
        assert!(registry.lookup(&member(1)).await.is_err());

        let first = FakePeer::healthy(NodeId::new(1));
        registry.register(
            NodeId::new(1),
            PeerHandle {
                acceptor: first.clone(),
                learner: first.clone(),
            },
        );
        first.set_up(false);
        let replacement = FakePeer::healthy(NodeId::new(1));
        registry.register(
            NodeId::new(1),
            PeerHandle {
                acceptor: replacement.clone(),
                learner: replacement,
            },
        );

        let handle = registry.lookup(&member(1)).await.unwrap();
        assert_eq!(handle.acceptor.acceptor_id().await.unwrap(), NodeId::new(1));
    }

    #[tokio::test]
    async fn grpc_lookup_does_not_need_a_live_peer() {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let registry = GrpcRegistry::new(logger, Duration::from_millis(100));
        let mut unreachable = member(3);
        unreachable.port = 1;

        let handle = registry.lookup(&unreachable).await.unwrap();
        assert!(handle.acceptor.acceptor_id().await.is_err());
    }
}
