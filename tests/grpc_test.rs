use paxos_kv::{
    try_create_paxos_node, ClusterTransport, GrpcRegistry, PaxosCluster, PaxosClusterConfig, PaxosError,
    PaxosMemberInfo, PaxosNode, PaxosNodeConfig, PaxosOptions, Phase,
};
use slog::Drain;
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::time::{Duration, Instant};

#[tokio::test]
async fn commit_over_grpc() -> Result<(), Box<dyn Error>> {
    let cluster = start_grpc_cluster(17310, false).await?;

    cluster.node(0).unwrap().put("k", "v", "alice").await?;
    for node in cluster.nodes() {
        wait_for_value(&node, "k", "v").await;
    }

    cluster.node(2).unwrap().delete("k", "alice").await?;
    for node in cluster.nodes() {
        wait_for_absent(&node, "k").await;
    }

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn leader_fast_path_over_grpc() -> Result<(), Box<dyn Error>> {
    let cluster = start_grpc_cluster(17320, true).await?;

    cluster.node(2).unwrap().put("k", "v", "alice").await?;
    for node in cluster.nodes() {
        assert_eq!(node.get("k", "alice").await?, Some("v".to_string()));
    }

    cluster.shutdown().await;
    Ok(())
}

#[tokio::test]
async fn first_node_waits_for_late_peers() -> Result<(), Box<dyn Error>> {
    let members = grpc_members(17330);
    let first = start_grpc_node(&members, 0).await?;

    // Peers that never answered keep their slots, so there is no quorum of one.
    tokio::time::sleep(MONITOR_DELAY * 3).await;
    assert_eq!(first.membership_view().await?.num_servers, 3);
    assert_eq!(
        first.put("k", "alone", "alice").await,
        Err(PaxosError::QuorumNotReached {
            phase: Phase::Prepare,
            granted: 1,
            required: 2,
        })
    );

    let second = start_grpc_node(&members, 1).await?;
    let third = start_grpc_node(&members, 2).await?;
    tokio::time::sleep(Duration::from_millis(200)).await;

    let deadline = Instant::now() + Duration::from_secs(10);
    while let Err(e) = first.put("k", "together", "alice").await {
        assert!(Instant::now() < deadline, "Put never reached a quorum: {}", e);
        tokio::time::sleep(MONITOR_DELAY).await;
    }
    for node in [&first, &second, &third].iter() {
        wait_for_value(node, "k", "together").await;
        assert_eq!(node.membership_view().await?.num_servers, 3);
    }

    for node in [first, second, third].iter() {
        node.stop(false);
        node.stopped().await;
    }
    Ok(())
}

// ------- Helpers --------

const MONITOR_DELAY: Duration = Duration::from_millis(200);

fn grpc_members(base_port: u16) -> Vec<PaxosMemberInfo> {
    (0..3)
        .map(|node_id| PaxosMemberInfo {
            node_id,
            ip_addr: Ipv4Addr::LOCALHOST,
            port: base_port + node_id as u16,
        })
        .collect()
}

fn grpc_options(leader_based: bool) -> PaxosOptions {
    PaxosOptions {
        leader_based: Some(leader_based),
        monitor_delay: Some(MONITOR_DELAY),
        rpc_timeout: Some(Duration::from_millis(500)),
        shutdown_grace: Some(Duration::from_secs(1)),
        ..PaxosOptions::default()
    }
}

/// Starts one member the way `--node-id` does.
async fn start_grpc_node(members: &[PaxosMemberInfo], node_id: usize) -> Result<PaxosNode, Box<dyn Error>> {
    let logger = create_root_logger_for_stdout();
    let registry = Arc::new(GrpcRegistry::new(logger.clone(), Duration::from_millis(500)));
    let node = try_create_paxos_node(PaxosNodeConfig {
        my_node_id: node_id,
        cluster_members: members.to_vec(),
        info_logger: logger,
        options: grpc_options(false),
        registry: registry.clone(),
        serve_rpc: true,
        rejoin_trigger: None,
        accept_fault_hook: None,
        rejoining: false,
    })
    .await?;
    node.connect_peers(members, registry.as_ref()).await?;
    node.announce_to_peers(members, registry.as_ref()).await;
    Ok(node)
}

async fn start_grpc_cluster(base_port: u16, leader_based: bool) -> Result<PaxosCluster, Box<dyn Error>> {
    let members = grpc_members(base_port);

    let cluster = PaxosCluster::start(PaxosClusterConfig {
        members,
        info_logger: create_root_logger_for_stdout(),
        options: grpc_options(leader_based),
        transport: ClusterTransport::Grpc,
        accept_fault_hook: None,
    })
    .await?;

    // Servers bind in the background.
    tokio::time::sleep(Duration::from_millis(200)).await;
    Ok(cluster)
}

async fn wait_for_value(node: &PaxosNode, key: &str, expected: &str) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while node.get(key, "alice").await.expect("node should be running").as_deref() != Some(expected) {
        assert!(Instant::now() < deadline, "Node {:?} never learned '{}'", node.node_id(), key);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

async fn wait_for_absent(node: &PaxosNode, key: &str) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while node.get(key, "alice").await.expect("node should be running").is_some() {
        assert!(Instant::now() < deadline, "Node {:?} still has '{}'", node.node_id(), key);
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}

fn create_root_logger_for_stdout() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
