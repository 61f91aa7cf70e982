use rand::Rng;

use crate::decay::Decay;

use super::Choice;

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// Epsilon threshold for the given episode
    pub fn epsilon(&self, episode: u32) -> f64 {
        self.epsilon.evaluate(episode as f64)
    }

    /// Invoke epsilon greedy policy for the given episode
    ///
    /// Draws `r ∈ [0,1)` and exploits iff `r > epsilon(episode)`.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R, episode: u32) -> Choice {
        if rng.gen::<f64>() > self.epsilon(episode) {
            Choice::Exploit
        } else {
            Choice::Explore
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::decay;

    use super::*;

    #[test]
    fn saturated_epsilon_always_explores() {
        // r is drawn from [0,1) so it can never exceed 1.0
        let policy = EpsilonGreedy::new(decay::Constant::new(1.0));
        let mut rng = StdRng::seed_from_u64(7);
        for episode in 0..100 {
            assert_eq!(policy.choose(&mut rng, episode), Choice::Explore);
        }
    }

    #[test]
    fn negative_epsilon_always_exploits() {
        let policy = EpsilonGreedy::new(decay::Constant::new(-1.0));
        let mut rng = StdRng::seed_from_u64(7);
        for episode in 0..100 {
            assert_eq!(policy.choose(&mut rng, episode), Choice::Exploit);
        }
    }

    #[test]
    fn schedule_is_consulted_per_episode() {
        let policy = EpsilonGreedy::new(decay::Exponential::new(0.0005, 1.0, 0.05).unwrap());
        assert_eq!(policy.epsilon(0), 1.0);
        assert!(policy.epsilon(10_000) < 0.06);
    }
}
