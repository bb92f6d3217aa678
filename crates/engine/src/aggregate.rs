use crate::synth::Seed;
use resonance_cipher::CipherValue;
use resonance_unfold::{self as unfold, ResonanceNumber, UnfoldTrace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Result of one chain → encode → decode attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UnfoldOutcome {
    Unfolded(UnfoldTrace),
    /// Above the unfold threshold.
    TooLarge,
    /// Zero, negative, or not representable as a decimal integer.
    NothingToUnfold,
}

/// One labelled unfolding attempt, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unfolding {
    pub label: String,
    /// Value as it entered the aggregator.
    pub input: String,
    /// Digits after base conversion, when it was applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted: Option<String>,
    pub outcome: UnfoldOutcome,
}

impl Unfolding {
    #[must_use]
    pub fn trace(&self) -> Option<&UnfoldTrace> {
        match &self.outcome {
            UnfoldOutcome::Unfolded(trace) => Some(trace),
            _ => None,
        }
    }
}

/// Threshold and optional base rewrite applied before each chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnfoldPolicy {
    pub threshold: u64,
    pub base: Option<u32>,
}

impl UnfoldPolicy {
    fn convert(&self, seed: Seed) -> (Seed, Option<String>) {
        let (Some(base), Seed::Number(n)) = (self.base, seed) else {
            return (seed, None);
        };
        if n <= 0 {
            return (seed, None);
        }
        match unfold::to_base(n, base) {
            Ok(digits) => (Seed::of_digits(&digits), Some(digits)),
            Err(err) => {
                log::debug!("Base conversion of {n} failed: {err}");
                (Seed::Invalid, None)
            }
        }
    }

    fn gate(&self, seed: Seed) -> UnfoldOutcome {
        match seed {
            Seed::Number(n) if n <= 0 => UnfoldOutcome::NothingToUnfold,
            Seed::Number(n) if n as u64 > self.threshold => UnfoldOutcome::TooLarge,
            Seed::Number(n) => UnfoldOutcome::Unfolded(unfold::unfold(n)),
            Seed::Oversized => UnfoldOutcome::TooLarge,
            Seed::Invalid => UnfoldOutcome::NothingToUnfold,
        }
    }
}

/// Seed of a chain group: the members' truncated digits, concatenated.
pub(crate) fn group_seed(values: &[CipherValue]) -> (String, Seed) {
    let seeds: Vec<Seed> = values.iter().map(|v| Seed::of_value(*v)).collect();
    let input: String = values
        .iter()
        .zip(&seeds)
        .map(|(value, seed)| match seed {
            Seed::Number(n) => n.to_string(),
            _ => value.to_string(),
        })
        .collect();

    let invalid = seeds.iter().any(|seed| match seed {
        Seed::Number(n) => *n < 0,
        Seed::Invalid => true,
        Seed::Oversized => false,
    });
    if invalid {
        return (input, Seed::Invalid);
    }
    if seeds.contains(&Seed::Oversized) {
        return (input, Seed::Oversized);
    }
    let seed = Seed::of_digits(&input);
    (input, seed)
}

/// Collects unfoldings and the union of everything they decode.
///
/// Deterministic: the same sequence of attempts always yields the same set.
#[derive(Debug)]
pub(crate) struct Aggregator {
    policy: UnfoldPolicy,
    unfoldings: Vec<Unfolding>,
    numbers: BTreeSet<ResonanceNumber>,
}

impl Aggregator {
    pub fn new(policy: UnfoldPolicy) -> Self {
        Self {
            policy,
            unfoldings: Vec::new(),
            numbers: BTreeSet::new(),
        }
    }

    /// Unfolds the initial number as is; it never goes through base conversion.
    pub fn unfold_initial(&mut self, label: &str, input: &str, seed: Seed) -> Unfolding {
        let outcome = self.policy.gate(seed);
        self.absorb(label, &outcome);
        Unfolding {
            label: label.to_string(),
            input: input.to_string(),
            converted: None,
            outcome,
        }
    }

    pub fn unfold(&mut self, label: &str, input: String, seed: Seed) {
        let (seed, converted) = self.policy.convert(seed);
        let outcome = self.policy.gate(seed);
        self.absorb(label, &outcome);
        self.unfoldings.push(Unfolding {
            label: label.to_string(),
            input,
            converted,
            outcome,
        });
    }

    fn absorb(&mut self, label: &str, outcome: &UnfoldOutcome) {
        match outcome {
            UnfoldOutcome::Unfolded(trace) => {
                self.numbers.extend(trace.decoded.iter().copied());
            }
            UnfoldOutcome::TooLarge => {
                let threshold = self.policy.threshold;
                log::debug!("Skipping unfolding for {label}: above threshold {threshold}");
            }
            UnfoldOutcome::NothingToUnfold => {
                log::debug!("Skipping unfolding for {label}: nothing to unfold");
            }
        }
    }

    pub fn finish(self) -> (Vec<Unfolding>, BTreeSet<ResonanceNumber>) {
        (self.unfoldings, self.numbers)
    }
}
