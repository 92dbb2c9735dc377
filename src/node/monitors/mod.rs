mod election;
mod liveness;
mod stop_signal;
mod time;

pub(crate) use self::stop_signal::new as stop_signal;
pub(crate) use self::stop_signal::{StopCheck, Stopper};
pub(crate) use election::ElectionMonitorHandle;
pub(crate) use liveness::probe;
pub(crate) use liveness::LivenessMonitorHandle;
pub use liveness::rejoin_channel;
pub use liveness::RejoinRequests;
pub use liveness::RejoinTrigger;
