use crate::actor::{ActorClient, NodeActor};
use crate::node::learn_dispatch;
use crate::node::membership::{Membership, NodeId};
use crate::node::node_state::NodeState;
use crate::node::store::StoreKeyMode;
use crate::peer::test_utils::FakePeer;
use std::sync::Arc;
use tokio::time::Duration;

pub(crate) fn test_logger() -> slog::Logger {
    slog::Logger::root(slog::Discard, slog::o!())
}

/// Spawns a real node actor whose membership is made of fakes: slot 0 is "us", the rest are
/// peers. Returns the strong client (keep it alive) and the fakes by slot.
pub(crate) fn spawn_actor_with_fakes(size: usize) -> (ActorClient, Vec<Arc<FakePeer>>) {
    let logger = test_logger();
    let fakes: Vec<_> = (0..size).map(|id| FakePeer::healthy(NodeId::new(id))).collect();

    let mut membership = Membership::new(size, NodeId::new(0), fakes[0].clone(), fakes[0].clone())
        .expect("slot 0 is always in range");
    for (id, fake) in fakes.iter().enumerate().skip(1) {
        membership.set_acceptor(NodeId::new(id), fake.clone()).unwrap();
        membership.set_learner(NodeId::new(id), fake.clone()).unwrap();
    }

    let (queue, dispatcher) = learn_dispatch::create(logger.clone(), Duration::from_millis(100));
    tokio::spawn(dispatcher.run());

    let state = NodeState::new(logger.clone(), NodeId::new(0), StoreKeyMode::Shared, membership, queue);
    let (client, rx) = ActorClient::new(16);
    tokio::spawn(NodeActor::new(logger, rx, state).run_event_loop());

    (client, fakes)
}
