use crate::actor::ActorClient;
use crate::node::monitors::{ElectionMonitorHandle, LivenessMonitorHandle, Stopper};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub(crate) struct StopRequest {
    pub(crate) force: bool,
    pub(crate) delay: Duration,
}

/// StopRequester is how anything inside a node asks it to stop. Requests after the first are
/// ignored.
#[derive(Clone)]
pub(crate) struct StopRequester {
    sender: mpsc::UnboundedSender<StopRequest>,
}

impl StopRequester {
    /// Returns false if the node already finished stopping.
    pub(crate) fn request_stop(&self, request: StopRequest) -> bool {
        self.sender.send(request).is_ok()
    }
}

/// NodeLifecycle owns the only strong `ActorClient` of a node, and every task the node spawned.
/// Stopping the node is dropping those in the right order.
pub(crate) struct NodeLifecycle {
    logger: slog::Logger,
    requests: mpsc::UnboundedReceiver<StopRequest>,
    actor_client: Option<ActorClient>,
    liveness_monitor: Option<LivenessMonitorHandle>,
    election_monitor: Option<ElectionMonitorHandle>,
    server_shutdown: Option<Stopper>,
    tasks: Vec<(&'static str, JoinHandle<()>)>,
    shutdown_grace: Duration,
    stopped: watch::Sender<bool>,
}

pub(crate) fn create(
    logger: slog::Logger,
    actor_client: ActorClient,
    shutdown_grace: Duration,
) -> (NodeLifecycle, StopRequester, watch::Receiver<bool>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (stopped_tx, stopped_rx) = watch::channel(false);

    let lifecycle = NodeLifecycle {
        logger,
        requests: rx,
        actor_client: Some(actor_client),
        liveness_monitor: None,
        election_monitor: None,
        server_shutdown: None,
        tasks: Vec::new(),
        shutdown_grace,
        stopped: stopped_tx,
    };

    (lifecycle, StopRequester { sender: tx }, stopped_rx)
}

impl NodeLifecycle {
    pub(crate) fn track(&mut self, name: &'static str, task: JoinHandle<()>) {
        self.tasks.push((name, task));
    }

    pub(crate) fn set_liveness_monitor(&mut self, handle: LivenessMonitorHandle, task: JoinHandle<()>) {
        self.liveness_monitor = Some(handle);
        self.track("liveness-monitor", task);
    }

    pub(crate) fn set_election_monitor(&mut self, handle: ElectionMonitorHandle, task: JoinHandle<()>) {
        self.election_monitor = Some(handle);
        self.track("election-monitor", task);
    }

    pub(crate) fn set_server(&mut self, shutdown: Stopper, task: JoinHandle<()>) {
        self.server_shutdown = Some(shutdown);
        self.track("rpc-server", task);
    }

    pub(crate) async fn run(mut self) {
        // All requesters gone means nobody can stop us any more, so keep running until the
        // runtime goes away.
        let request = match self.requests.recv().await {
            Some(request) => request,
            None => return,
        };
        self.requests.close();

        if request.delay > Duration::from_millis(0) {
            slog::info!(self.logger, "Stopping in {:?}", request.delay);
            tokio::time::sleep(request.delay).await;
        }
        slog::info!(self.logger, "Stopping node (force={})", request.force);

        self.liveness_monitor.take();
        self.election_monitor.take();
        self.server_shutdown.take();
        self.actor_client.take();

        if request.force {
            for (name, task) in self.tasks.drain(..) {
                slog::debug!(self.logger, "Aborting {}", name);
                task.abort();
            }
        } else {
            self.drain_tasks().await;
        }

        slog::info!(self.logger, "Node stopped");
        let _ = self.stopped.send(true);
    }

    async fn drain_tasks(&mut self) {
        let deadline = Instant::now() + self.shutdown_grace;
        for (name, mut task) in self.tasks.drain(..) {
            match tokio::time::timeout_at(deadline, &mut task).await {
                Ok(Ok(())) => slog::debug!(self.logger, "{} finished", name),
                Ok(Err(e)) => slog::warn!(self.logger, "{} failed during shutdown: {}", name, e),
                Err(_) => {
                    slog::warn!(self.logger, "{} did not finish within {:?}, aborting", name, self.shutdown_grace);
                    task.abort();
                }
            }
        }
    }
}
