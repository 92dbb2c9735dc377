use crate::node;
use crate::node::{
    AcceptError, AcceptInput, AcceptOutput, ActorExited, LeaderSnapshot, LearnInput, MembershipSnapshot, NodeId,
    PrepareError, PrepareInput, PrepareOutput, RegisterError,
};
use crate::peer::{AcceptorApi, LearnerApi, StoreUpdate};
use std::error::Error;
use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

// Every protocol state change of a node goes through this queue, so a node handles its own
// prepare/accept/learn/membership changes strictly one at a time.
pub(crate) enum Event {
    // Acceptor: promise iff proposal is newer than the watermark.
    Prepare(PrepareInput, Callback<PrepareOutput, PrepareError>),
    // Acceptor: record accepted value, enqueue learner fan-out.
    Accept(AcceptInput, Callback<AcceptOutput, AcceptError>),
    // Learner: count a vote, apply on majority.
    Learn(LearnInput, Reply<()>),
    // Learner: leader fast path, apply without voting.
    UpdateStore(StoreUpdate, Reply<()>),
    ReadStore(String, Reply<Option<String>>),
    RegisterAcceptor(NodeId, Arc<dyn AcceptorApi>, Callback<(), RegisterError>),
    RegisterLearner(NodeId, Arc<dyn LearnerApi>, Callback<(), RegisterError>),
    Tombstone(NodeId, Reply<bool>),
    InstallLeader(NodeId, Reply<()>),
    MembershipSnapshot(Reply<MembershipSnapshot>),
    LeaderSnapshot(Reply<Option<LeaderSnapshot>>),
    LogState(String, Reply<()>),
}

impl Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::Prepare(input, _) => write!(f, "Prepare({:?})", input),
            Event::Accept(input, _) => write!(f, "Accept({:?})", input),
            Event::Learn(input, _) => write!(f, "Learn({:?})", input),
            Event::UpdateStore(update, _) => write!(f, "UpdateStore({:?})", update),
            Event::ReadStore(key, _) => write!(f, "ReadStore({})", key),
            Event::RegisterAcceptor(id, _, _) => write!(f, "RegisterAcceptor({:?})", id),
            Event::RegisterLearner(id, _, _) => write!(f, "RegisterLearner({:?})", id),
            Event::Tombstone(id, _) => write!(f, "Tombstone({:?})", id),
            Event::InstallLeader(id, _) => write!(f, "InstallLeader({:?})", id),
            Event::MembershipSnapshot(_) => write!(f, "MembershipSnapshot"),
            Event::LeaderSnapshot(_) => write!(f, "LeaderSnapshot"),
            Event::LogState(label, _) => write!(f, "LogState({})", label),
        }
    }
}

pub(crate) struct Callback<O: Debug, E: Error>(oneshot::Sender<Result<O, E>>);

impl<O: Debug, E: Error> Callback<O, E> {
    pub(crate) fn send(self, message: Result<O, E>) {
        let _ = self.0.send(message);
    }
}

pub(crate) struct Reply<T>(oneshot::Sender<T>);

impl<T> Reply<T> {
    pub(crate) fn send(self, message: T) {
        let _ = self.0.send(message);
    }
}

#[derive(Clone)]
pub(crate) struct ActorClient {
    sender: mpsc::Sender<Event>,
}

/// WeakActorClient does not keep the actor alive. Background tasks hold this so that dropping the
/// last `ActorClient` shuts the node's actor down.
#[derive(Clone)]
pub(crate) struct WeakActorClient {
    sender: mpsc::WeakSender<Event>,
}

impl WeakActorClient {
    pub(crate) fn upgrade(&self) -> Result<ActorClient, ActorExited> {
        self.sender
            .upgrade()
            .map(|sender| ActorClient { sender })
            .ok_or(ActorExited)
    }
}

impl ActorClient {
    pub(crate) fn new(buffer_size: usize) -> (Self, mpsc::Receiver<Event>) {
        let (tx, rx) = mpsc::channel(buffer_size);
        (ActorClient { sender: tx }, rx)
    }

    pub(crate) fn weak(&self) -> WeakActorClient {
        WeakActorClient {
            sender: self.sender.downgrade(),
        }
    }

    pub(crate) async fn prepare(&self, input: PrepareInput) -> Result<PrepareOutput, PrepareError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Prepare(input, Callback(tx))).await?;
        rx.await.map_err(|_| ActorExited)?
    }

    pub(crate) async fn accept(&self, input: AcceptInput) -> Result<AcceptOutput, AcceptError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Accept(input, Callback(tx))).await?;
        rx.await.map_err(|_| ActorExited)?
    }

    pub(crate) async fn learn(&self, input: LearnInput) -> Result<(), ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Learn(input, Reply(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn update_store(&self, update: StoreUpdate) -> Result<(), ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::UpdateStore(update, Reply(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn read_store(&self, store_key: String) -> Result<Option<String>, ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::ReadStore(store_key, Reply(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn register_acceptor(
        &self,
        node_id: NodeId,
        acceptor: Arc<dyn AcceptorApi>,
    ) -> Result<(), RegisterError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::RegisterAcceptor(node_id, acceptor, Callback(tx))).await?;
        rx.await.map_err(|_| ActorExited)?
    }

    pub(crate) async fn register_learner(
        &self,
        node_id: NodeId,
        learner: Arc<dyn LearnerApi>,
    ) -> Result<(), RegisterError> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::RegisterLearner(node_id, learner, Callback(tx))).await?;
        rx.await.map_err(|_| ActorExited)?
    }

    pub(crate) async fn tombstone(&self, node_id: NodeId) -> Result<bool, ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Tombstone(node_id, Reply(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn install_leader(&self, leader_id: NodeId) -> Result<(), ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::InstallLeader(leader_id, Reply(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn membership_snapshot(&self) -> Result<MembershipSnapshot, ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::MembershipSnapshot(Reply(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn leader_snapshot(&self) -> Result<Option<LeaderSnapshot>, ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::LeaderSnapshot(Reply(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    pub(crate) async fn log_state(&self, label: String) -> Result<(), ActorExited> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::LogState(label, Reply(tx))).await?;
        rx.await.map_err(|_| ActorExited)
    }

    async fn send(&self, event: Event) -> Result<(), ActorExited> {
        self.sender.send(event).await.map_err(|_| ActorExited)
    }
}

/// NodeActor is the node's protocol state in actor model.
pub(crate) struct NodeActor {
    logger: slog::Logger,
    receiver: mpsc::Receiver<Event>,
    state: node::NodeState,
}

impl NodeActor {
    pub(crate) fn new(logger: slog::Logger, receiver: mpsc::Receiver<Event>, state: node::NodeState) -> Self {
        NodeActor {
            logger,
            receiver,
            state,
        }
    }

    pub(crate) async fn run_event_loop(mut self) {
        while let Some(event) = self.receiver.recv().await {
            slog::trace!(self.logger, "Event {:?}", event);
            self.handle_event(event);
        }
        slog::info!(self.logger, "Node actor event loop exited");
    }

    // This must NOT be async. Any long running work must be spawned on another task and/or come
    // back as another event.
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Prepare(input, callback) => {
                callback.send(self.state.handle_prepare(input));
            }
            Event::Accept(input, callback) => {
                callback.send(self.state.handle_accept(input));
            }
            Event::Learn(input, reply) => {
                self.state.handle_learn(input);
                reply.send(());
            }
            Event::UpdateStore(update, reply) => {
                self.state.handle_update_store(update);
                reply.send(());
            }
            Event::ReadStore(store_key, reply) => {
                reply.send(self.state.read_store(&store_key));
            }
            Event::RegisterAcceptor(node_id, acceptor, callback) => {
                callback.send(self.state.register_acceptor(node_id, acceptor));
            }
            Event::RegisterLearner(node_id, learner, callback) => {
                callback.send(self.state.register_learner(node_id, learner));
            }
            Event::Tombstone(node_id, reply) => {
                reply.send(self.state.tombstone(node_id));
            }
            Event::InstallLeader(leader_id, reply) => {
                self.state.install_leader(leader_id);
                reply.send(());
            }
            Event::MembershipSnapshot(reply) => {
                reply.send(self.state.membership_snapshot());
            }
            Event::LeaderSnapshot(reply) => {
                reply.send(self.state.leader());
            }
            Event::LogState(label, reply) => {
                self.state.log_state(&label);
                reply.send(());
            }
        }
    }
}
