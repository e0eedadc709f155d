//! How to register a strategy
//!
//! 1) Implement `Strategy` for your type in its module.
//! 2) Add a `StrategyFactory` entry to the static list with a stable name.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed => same behavior (where applicable).

use once_cell::sync::Lazy;

use crate::ai::{GreedyStrategy, RandomStrategy, Strategy};

/// Factory definition for constructing strategies.
pub struct StrategyFactory {
    pub name: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn Strategy>,
}

static STRATEGY_FACTORIES: Lazy<Vec<StrategyFactory>> = Lazy::new(|| {
    vec![
        StrategyFactory {
            name: RandomStrategy::NAME,
            make: make_random,
        },
        StrategyFactory {
            name: GreedyStrategy::NAME,
            make: make_greedy,
        },
    ]
});

/// Returns the registered strategy factories.
pub fn registered_strategies() -> &'static [StrategyFactory] {
    &STRATEGY_FACTORIES
}

/// Finds a registered strategy factory by name.
pub fn by_name(name: &str) -> Option<&'static StrategyFactory> {
    registered_strategies()
        .iter()
        .find(|factory| factory.name == name)
}

fn make_random(seed: Option<u64>) -> Box<dyn Strategy> {
    Box::new(RandomStrategy::new(seed))
}

fn make_greedy(_seed: Option<u64>) -> Box<dyn Strategy> {
    Box::new(GreedyStrategy::new())
}

#[cfg(test)]
mod registry_smoke {
    use super::*;

    #[test]
    fn enumerates_registered_strategies() {
        let strategies = registered_strategies();
        assert!(strategies
            .iter()
            .any(|factory| factory.name == RandomStrategy::NAME));
        assert!(strategies
            .iter()
            .any(|factory| factory.name == GreedyStrategy::NAME));
    }

    #[test]
    fn lookup_helper_behaves() {
        assert!(by_name(RandomStrategy::NAME).is_some());
        assert!(by_name(GreedyStrategy::NAME).is_some());
        assert!(by_name("not-a-strategy").is_none());
    }
}
