use crate::aggregate::{group_seed, Aggregator, UnfoldOutcome, UnfoldPolicy, Unfolding};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::synth::{synthesize, InitialNumber, Seed};
use rand::Rng;
use resonance_cipher::{standard_registry, Cipher, CipherError, CipherRegistry, CipherValue};
use resonance_lexicon::{LexiconMatcher, LexiconProvider, NumberMatch, PhraseQuotas};
use resonance_unfold::{is_prime, NumberTags, ResonanceNumber};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub(crate) const INITIAL_LABEL: &str = "Initial Number";

/// One cipher evaluated over the input text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CipherReading {
    pub id: String,
    pub label: String,
    pub value: CipherValue,
    pub tags: NumberTags,
}

impl CipherReading {
    fn new(cipher: &dyn Cipher, value: CipherValue) -> Self {
        let tags = match value.as_integer() {
            Some(v) if v > 0 => NumberTags::of(v as u64),
            _ => NumberTags::default(),
        };
        Self {
            id: cipher.id().to_string(),
            label: cipher.label().to_string(),
            value,
            tags,
        }
    }
}

/// A final resonance number with its tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaggedNumber {
    pub value: ResonanceNumber,
    #[serde(flatten)]
    pub tags: NumberTags,
}

impl TaggedNumber {
    #[must_use]
    pub fn new(value: ResonanceNumber) -> Self {
        Self {
            value,
            tags: NumberTags::of(value),
        }
    }
}

/// Everything one invocation produced for one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResonanceResult {
    pub text: String,
    /// Selected ciphers, in selection order.
    pub readings: Vec<CipherReading>,
    pub initial: InitialNumber,
    pub initial_unfolding: Unfolding,
    /// Per-cipher unfoldings followed by the chain-group passes.
    pub unfoldings: Vec<Unfolding>,
    pub prime_only: bool,
    /// Final resonance set, ascending.
    pub numbers: Vec<TaggedNumber>,
    /// One entry per final number, same order.
    pub matches: Vec<NumberMatch>,
}

impl ResonanceResult {
    /// Result for a text without letters: no readings, a zero initial number,
    /// nothing unfolded.
    #[must_use]
    pub fn empty(text: impl Into<String>) -> Self {
        let initial = InitialNumber {
            digits: String::new(),
            value: Some(0),
        };
        Self {
            text: text.into(),
            readings: Vec::new(),
            initial_unfolding: Unfolding {
                label: INITIAL_LABEL.to_string(),
                input: String::new(),
                converted: None,
                outcome: UnfoldOutcome::NothingToUnfold,
            },
            initial,
            unfoldings: Vec::new(),
            prime_only: false,
            numbers: Vec::new(),
            matches: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty() && self.numbers.is_empty()
    }

    /// Factorization chain of the initial number; empty when it was not unfolded.
    #[must_use]
    pub fn chain(&self) -> &[i64] {
        self.initial_unfolding
            .trace()
            .map_or(&[], |trace| trace.chain.as_slice())
    }

    /// Base-36 codes of the initial number's chain.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        self.initial_unfolding
            .trace()
            .map_or(&[], |trace| trace.codes.as_slice())
    }

    /// Final numbers without their tags.
    #[must_use]
    pub fn number_set(&self) -> BTreeSet<ResonanceNumber> {
        self.numbers.iter().map(|n| n.value).collect()
    }
}

/// Input of [`ResonanceEngine::compute`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeRequest {
    pub text: String,
    /// Cipher ids to report and unfold individually; empty selects all.
    pub ciphers: Vec<String>,
    /// Overrides the configured quotas.
    pub quotas: Option<PhraseQuotas>,
}

impl ComputeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ciphers<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.ciphers = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_quotas(mut self, quotas: PhraseQuotas) -> Self {
        self.quotas = Some(quotas);
        self
    }
}

/// Text → cipher values → unfolded resonance numbers → phrases.
///
/// Holds only immutable state; the lexicon and random source are passed per
/// call.
#[derive(Debug, Clone)]
pub struct ResonanceEngine<'r> {
    registry: &'r CipherRegistry,
    config: EngineConfig,
}

impl ResonanceEngine<'static> {
    /// Engine over the standard cipher registry.
    pub fn new(config: EngineConfig) -> Result<Self> {
        Self::with_registry(standard_registry(), config)
    }
}

impl<'r> ResonanceEngine<'r> {
    /// Validates `config` and checks that every cipher it names is registered.
    pub fn with_registry(registry: &'r CipherRegistry, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let named = config
            .primary_ciphers
            .iter()
            .chain(config.chain_groups.iter().flat_map(|g| &g.ciphers))
            .chain(std::iter::once(&config.connection_cipher));
        for id in named {
            if !registry.contains(id) {
                return Err(CipherError::unknown(id).into());
            }
        }
        Ok(Self { registry, config })
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub const fn registry(&self) -> &'r CipherRegistry {
        self.registry
    }

    /// Deterministic part of the pipeline: everything except lexicon matching.
    ///
    /// An empty `ciphers` selection reports every registered cipher. Text
    /// without ASCII letters short-circuits to [`ResonanceResult::empty`].
    pub fn resonate<S: AsRef<str>>(&self, text: &str, ciphers: &[S]) -> Result<ResonanceResult> {
        let selected = self.registry.select(ciphers)?;
        if !text.chars().any(|c| c.is_ascii_alphabetic()) {
            log::debug!("No letters in {text:?}; returning an empty result");
            return Ok(ResonanceResult {
                prime_only: self.config.prime_only,
                ..ResonanceResult::empty(text)
            });
        }

        let mut values: BTreeMap<&str, CipherValue> = BTreeMap::new();
        let readings: Vec<CipherReading> = selected
            .iter()
            .map(|cipher| {
                let value = cipher.evaluate(text);
                values.insert(cipher.id(), value);
                CipherReading::new(cipher.as_ref(), value)
            })
            .collect();
        let value_of = |id: &str| -> Result<CipherValue> {
            match values.get(id) {
                Some(value) => Ok(*value),
                None => Ok(self.registry.evaluate(id, text)?),
            }
        };

        let primaries = self
            .config
            .primary_ciphers
            .iter()
            .map(|id| value_of(id.as_str()))
            .collect::<Result<Vec<_>>>()?;
        let initial = synthesize(&primaries);

        let mut aggregator = Aggregator::new(UnfoldPolicy {
            threshold: self.config.unfold_threshold,
            base: self.config.base_conversion,
        });
        let initial_unfolding =
            aggregator.unfold_initial(INITIAL_LABEL, &initial.digits, initial.seed());

        for (cipher, reading) in selected.iter().zip(&readings) {
            let value = reading.value;
            if value.is_positive() {
                aggregator.unfold(cipher.label(), value.to_string(), Seed::of_value(value));
            }
        }
        for group in &self.config.chain_groups {
            let members = group
                .ciphers
                .iter()
                .map(|id| value_of(id.as_str()))
                .collect::<Result<Vec<_>>>()?;
            let (input, seed) = group_seed(&members);
            aggregator.unfold(&group.label, input, seed);
        }

        let (unfoldings, mut numbers) = aggregator.finish();
        if self.config.prime_only {
            numbers.retain(|n| is_prime(*n));
        }
        log::debug!(
            "Resonated {text:?}: initial {}, {} unfoldings, {} final numbers",
            initial.digits,
            unfoldings.len(),
            numbers.len()
        );

        Ok(ResonanceResult {
            text: text.to_string(),
            readings,
            initial,
            initial_unfolding,
            unfoldings,
            prime_only: self.config.prime_only,
            numbers: numbers.into_iter().map(TaggedNumber::new).collect(),
            matches: Vec::new(),
        })
    }

    /// Full pipeline: [`resonate`](Self::resonate) followed by quota-limited
    /// phrase matching for every final number.
    pub fn compute<P, R>(
        &self,
        request: &ComputeRequest,
        lexicon: &P,
        rng: &mut R,
    ) -> Result<ResonanceResult>
    where
        P: LexiconProvider + ?Sized,
        R: Rng + ?Sized,
    {
        let mut result = self.resonate(&request.text, &request.ciphers)?;
        let matcher = LexiconMatcher::new(request.quotas.unwrap_or(self.config.quotas));
        let numbers: Vec<ResonanceNumber> = result.numbers.iter().map(|n| n.value).collect();
        result.matches = matcher.match_numbers(&numbers, lexicon, rng);
        Ok(result)
    }

    /// Associates the result's text with its final numbers in the lexicon.
    pub fn record<P>(&self, result: &ResonanceResult, lexicon: &mut P) -> Result<usize>
    where
        P: LexiconProvider + ?Sized,
    {
        Ok(lexicon.record(&result.text, &result.number_set())?)
    }
}
