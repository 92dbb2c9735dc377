use paxos_kv::{
    AcceptReply, AcceptorApi, ClusterTransport, NodeId, Operation, OperationKind, PaxosCluster, PaxosClusterConfig,
    PaxosError, PaxosMemberInfo, PaxosNode, PaxosOptions, PeerError, PeerHandle, PeerRegistry, Phase, PrepareReply,
    ProposalId, StoreUpdate,
};
use slog::Drain;
use std::error::Error;
use std::future::Future;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::time::{Duration, Instant};

const MONITOR_DELAY: Duration = Duration::from_millis(100);

#[tokio::test]
async fn commit_reaches_every_learner() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(false, false)).await?;

    cluster.node(0).unwrap().put("k", "v", "alice").await?;

    for node in cluster.nodes() {
        wait_for_value(&node, "k", Some("v"), Duration::from_secs(5)).await;
    }

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn delete_is_replicated() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(false, false)).await?;
    let node = cluster.node(1).unwrap();

    node.put("k", "v", "alice").await?;
    for node in cluster.nodes() {
        wait_for_value(&node, "k", Some("v"), Duration::from_secs(5)).await;
    }

    node.delete("k", "alice").await?;
    for node in cluster.nodes() {
        wait_for_value(&node, "k", None, Duration::from_secs(5)).await;
    }

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn blank_requester_is_rejected() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(false, false)).await?;
    let node = cluster.node(0).unwrap();

    assert_eq!(node.put("k", "v", " ").await, Err(PaxosError::Unauthorized));
    assert_eq!(node.get("k", "").await, Err(PaxosError::Unauthorized));
    assert_eq!(node.delete("", "alice").await, Err(PaxosError::MissingKey));

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn leader_fast_path_updates_every_store() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(true, false)).await?;
    for node in cluster.nodes() {
        assert_eq!(node.membership_view().await?.leader, Some(NodeId::new(0)));
    }

    cluster.node(1).unwrap().put("k", "v", "alice").await?;

    // The leader waits for its broadcast before answering.
    for node in cluster.nodes() {
        assert_eq!(node.get("k", "alice").await?, Some("v".to_string()));
    }

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn dead_peer_is_tombstoned_and_quorum_shrinks() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(false, false)).await?;
    cluster.stop_node(1, true).await?;

    let node = cluster.node(0).unwrap();
    let watched = &node;
    wait_until(Duration::from_secs(5), move || async move {
        watched.membership_view().await.map(|v| v.num_servers == 2).unwrap_or(false)
    })
    .await;
    let view = node.membership_view().await?;
    assert_eq!(view.live_nodes, vec![NodeId::new(0), NodeId::new(2)]);

    node.put("k", "v", "alice").await?;
    wait_for_value(&cluster.node(2).unwrap(), "k", Some("v"), Duration::from_secs(5)).await;

    // Two servers left, so both must accept.
    let survivor = cluster.node(2).unwrap();
    let registry = RejectAccepts {
        inner: survivor.peer_handle(),
    };
    node.connect_peers(&[member(2)], &registry).await?;
    assert_eq!(node.membership_view().await?.num_servers, 2);

    let result = node.put("k", "v2", "alice").await;
    assert_eq!(
        result,
        Err(PaxosError::QuorumNotReached {
            phase: Phase::Accept,
            granted: 1,
            required: 2,
        })
    );

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn followers_elect_a_new_leader() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(true, false)).await?;
    cluster.stop_node(0, true).await?;

    let survivors = vec![cluster.node(1).unwrap(), cluster.node(2).unwrap()];
    let watched = &survivors;
    wait_until(Duration::from_secs(10), move || async move {
        let mut leaders = Vec::new();
        for node in watched.iter() {
            match node.membership_view().await {
                Ok(view) => leaders.push(view.leader),
                Err(_) => return false,
            }
        }
        leaders.iter().all(|l| *l == leaders[0]) && leaders[0].is_some() && leaders[0] != Some(NodeId::new(0))
    })
    .await;

    // The new leader serves the fast path.
    survivors[1].put("after", "election", "alice").await?;
    for node in survivors.iter() {
        assert_eq!(node.get("after", "alice").await?, Some("election".to_string()));
    }

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn duplicate_learn_applies_once() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(false, false)).await?;
    let node = cluster.node(2).unwrap();
    let learner = node.peer_handle().learner;

    let mut operation = Operation::put("dup", "v", "alice");
    operation.proposal_id = ProposalId::new(42);

    // Two votes make a majority of three.
    learner.learn(ProposalId::new(42), operation.clone()).await?;
    learner.learn(ProposalId::new(42), operation.clone()).await?;
    assert_eq!(node.get("dup", "alice").await?, Some("v".to_string()));

    learner
        .update_store(StoreUpdate {
            kind: OperationKind::Delete,
            key: "dup".to_string(),
            value: None,
        })
        .await?;

    // Late votes for the applied round must neither re-apply nor count towards a new one.
    learner.learn(ProposalId::new(42), operation.clone()).await?;
    learner.learn(ProposalId::new(42), operation).await?;
    assert_eq!(node.get("dup", "alice").await?, None);

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn dead_node_rejoins_symmetrically() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(false, true)).await?;
    let original = cluster.node(2).unwrap();
    cluster.stop_node(2, true).await?;
    assert!(original.is_stopped());

    let watched = &cluster;
    wait_until(Duration::from_secs(10), move || async move {
        let nodes = watched.nodes();
        if nodes[2].is_stopped() {
            return false;
        }
        for node in nodes.iter() {
            match node.membership_view().await {
                Ok(view) if view.live_nodes == vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)] => {}
                _ => return false,
            }
        }
        true
    })
    .await;

    // The replacement starts empty and catches up through new rounds.
    let replacement = cluster.node(2).unwrap();
    cluster.node(0).unwrap().put("k", "after-rejoin", "alice").await?;
    wait_for_value(&replacement, "k", Some("after-rejoin"), Duration::from_secs(5)).await;

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn replacement_follows_the_survivors_leader() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(true, true)).await?;
    cluster.stop_node(0, true).await?;

    let watched = &cluster;
    wait_until(Duration::from_secs(15), move || async move {
        let nodes = watched.nodes();
        if nodes.iter().any(|node| node.is_stopped()) {
            return false;
        }
        let mut leaders = Vec::new();
        for node in nodes.iter() {
            match node.membership_view().await {
                Ok(view) if view.live_nodes == vec![NodeId::new(0), NodeId::new(1), NodeId::new(2)] => {
                    leaders.push(view.leader)
                }
                _ => return false,
            }
        }
        leaders.iter().all(|l| *l == leaders[0]) && leaders[0].is_some() && leaders[0] != Some(NodeId::new(0))
    })
    .await;

    // Writes through the replacement reach the elected leader.
    let replacement = cluster.node(0).unwrap();
    replacement.put("k", "via-replacement", "alice").await?;
    for node in cluster.nodes() {
        assert_eq!(node.get("k", "alice").await?, Some("via-replacement".to_string()));
    }

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn stop_node_request_reaches_peer() -> Result<(), Box<dyn Error>> {
    let cluster = start_cluster(3, options(false, false)).await?;
    let target = cluster.node(1).unwrap();

    cluster.node(0).unwrap().request_stop_node(1).await?;
    tokio::time::timeout(Duration::from_secs(5), target.stopped()).await?;
    assert!(matches!(target.get("k", "alice").await, Err(PaxosError::NodeStopped)));

    cluster.shutdown().await;
    Ok(())
}

// ------- Helpers --------

fn options(leader_based: bool, allow_node_restart: bool) -> PaxosOptions {
    PaxosOptions {
        leader_based: Some(leader_based),
        allow_node_restart: Some(allow_node_restart),
        monitor_delay: Some(MONITOR_DELAY),
        rpc_timeout: Some(Duration::from_millis(300)),
        shutdown_grace: Some(Duration::from_secs(1)),
        ..PaxosOptions::default()
    }
}

async fn start_cluster(num_members: usize, options: PaxosOptions) -> Result<PaxosCluster, Box<dyn Error>> {
    let members = (0..num_members)
        .map(|node_id| PaxosMemberInfo {
            node_id,
            ip_addr: Ipv4Addr::LOCALHOST,
            port: 0,
        })
        .collect();

    let cluster = PaxosCluster::start(PaxosClusterConfig {
        members,
        info_logger: create_root_logger_for_stdout(),
        options,
        transport: ClusterTransport::InProcess,
        accept_fault_hook: None,
    })
    .await?;

    // Liveness monitors only tombstone peers they have heard from.
    tokio::time::sleep(MONITOR_DELAY * 3).await;
    Ok(cluster)
}

fn member(node_id: usize) -> PaxosMemberInfo {
    PaxosMemberInfo {
        node_id,
        ip_addr: Ipv4Addr::LOCALHOST,
        port: 0,
    }
}

/// Hands out a peer whose acceptor refuses every accept.
struct RejectAccepts {
    inner: PeerHandle,
}

#[async_trait::async_trait]
impl PeerRegistry for RejectAccepts {
    async fn lookup(&self, _: &PaxosMemberInfo) -> Result<PeerHandle, PeerError> {
        let acceptor: Arc<dyn AcceptorApi> = Arc::new(RejectingAcceptor {
            inner: self.inner.acceptor.clone(),
        });
        Ok(PeerHandle {
            acceptor,
            learner: self.inner.learner.clone(),
        })
    }
}

struct RejectingAcceptor {
    inner: Arc<dyn AcceptorApi>,
}

#[async_trait::async_trait]
impl AcceptorApi for RejectingAcceptor {
    async fn acceptor_id(&self) -> Result<NodeId, PeerError> {
        self.inner.acceptor_id().await
    }

    async fn leader_id(&self) -> Result<Option<NodeId>, PeerError> {
        self.inner.leader_id().await
    }

    async fn prepare(&self, proposal_id: ProposalId, operation: Operation) -> Result<PrepareReply, PeerError> {
        self.inner.prepare(proposal_id, operation).await
    }

    async fn accept(&self, _: ProposalId, _: Operation) -> Result<AcceptReply, PeerError> {
        Err(PeerError::Rejected("accepts are refused".to_string()))
    }

    async fn request_stop(&self, force: bool, delay: Duration) -> Result<(), PeerError> {
        self.inner.request_stop(force, delay).await
    }

    async fn register_peer(&self, member: PaxosMemberInfo) -> Result<(), PeerError> {
        self.inner.register_peer(member).await
    }

    async fn register_peer_pair(&self, member: PaxosMemberInfo) -> Result<(), PeerError> {
        self.inner.register_peer_pair(member).await
    }
}

async fn wait_for_value(node: &PaxosNode, key: &str, expected: Option<&str>, timeout: Duration) {
    let expected = expected.map(|v| v.to_string());
    let deadline = Instant::now() + timeout;
    loop {
        let value = node.get(key, "alice").await.expect("node should be running");
        if value == expected {
            return;
        }
        assert!(
            Instant::now() < deadline,
            "Node {:?} has {:?} for '{}', expected {:?}",
            node.node_id(),
            value,
            key,
            expected
        );
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

async fn wait_until<F, Fut>(timeout: Duration, mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = Instant::now() + timeout;
    while !condition().await {
        assert!(Instant::now() < deadline, "Timed out waiting for condition");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

fn create_root_logger_for_stdout() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
