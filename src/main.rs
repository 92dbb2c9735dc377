use clap::Parser;
use paxos_kv::{
    try_create_paxos_node, AcceptFaultHook, ClusterFile, ClusterTransport, GrpcRegistry, PaxosCluster,
    PaxosClusterConfig, PaxosNodeConfig,
};
use slog::Drain;
use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON cluster description.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Run only this member, serving gRPC on its address. Without it, every member runs in this
    /// process.
    #[arg(long)]
    node_id: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let logger = create_root_logger_for_stdout();
    let cluster_file = ClusterFile::load(&cli.config)?;
    let members = cluster_file.members();
    let options = cluster_file.options();

    match cli.node_id {
        Some(node_id) => {
            let registry = Arc::new(GrpcRegistry::new(logger.clone(), Duration::from_secs(1)));
            let node = try_create_paxos_node(PaxosNodeConfig {
                my_node_id: node_id,
                cluster_members: members.clone(),
                info_logger: logger.clone(),
                options,
                registry: registry.clone(),
                serve_rpc: true,
                rejoin_trigger: None,
                accept_fault_hook: accept_fault_hook(&cluster_file),
                rejoining: false,
            })
            .await?;
            node.connect_peers(&members, registry.as_ref()).await?;
            node.announce_to_peers(&members, registry.as_ref()).await;

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    slog::info!(logger, "Interrupted, stopping node {}", node_id);
                    node.stop(false);
                    node.stopped().await;
                }
                _ = node.stopped() => {}
            }
        }
        None => {
            let cluster = PaxosCluster::start(PaxosClusterConfig {
                members,
                info_logger: logger.clone(),
                options,
                transport: ClusterTransport::Grpc,
                accept_fault_hook: accept_fault_hook(&cluster_file),
            })
            .await?;

            tokio::signal::ctrl_c().await?;
            slog::info!(logger, "Interrupted, stopping cluster");
            cluster.shutdown().await;
        }
    }

    Ok(())
}

#[cfg(feature = "fault-injection")]
fn accept_fault_hook(cluster_file: &ClusterFile) -> Option<Arc<dyn AcceptFaultHook>> {
    cluster_file
        .accept_random_error_probability
        .filter(|p| *p > 0.0)
        .map(|p| Arc::new(paxos_kv::RandomAcceptFaults::new(p)) as Arc<dyn AcceptFaultHook>)
}

#[cfg(not(feature = "fault-injection"))]
fn accept_fault_hook(_: &ClusterFile) -> Option<Arc<dyn AcceptFaultHook>> {
    None
}

fn create_root_logger_for_stdout() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
