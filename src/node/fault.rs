use rand::Rng;
use std::sync::Mutex;

/// AcceptFaultHook is consulted before a node hands an accept to its acceptor. Returning true
/// makes the accept fail as if the acceptor had rejected it.
pub trait AcceptFaultHook: Send + Sync {
    fn fail_accept(&self) -> bool;
}

/// RandomAcceptFaults fails each accept with a fixed probability.
pub struct RandomAcceptFaults {
    probability: f64,
    rng: Mutex<rand::rngs::StdRng>,
}

impl RandomAcceptFaults {
    /// `probability` is clamped into `[0, 1]`.
    pub fn new(probability: f64) -> Self {
        Self::with_rng(probability, rand::SeedableRng::from_entropy())
    }

    pub fn seeded(probability: f64, seed: u64) -> Self {
        Self::with_rng(probability, rand::SeedableRng::seed_from_u64(seed))
    }

    fn with_rng(probability: f64, rng: rand::rngs::StdRng) -> Self {
        let probability = if probability.is_nan() { 0.0 } else { probability.max(0.0).min(1.0) };
        RandomAcceptFaults {
            probability,
            rng: Mutex::new(rng),
        }
    }
}

impl AcceptFaultHook for RandomAcceptFaults {
    fn fail_accept(&self) -> bool {
        if self.probability <= 0.0 {
            return false;
        }
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_bool(self.probability),
            Err(_) => false,
        }
    }
}
