use crate::index::LexiconProvider;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-number phrase limits by word count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseQuotas {
    pub single_words: usize,
    pub two_word_phrases: usize,
    pub three_word_phrases: usize,
    pub four_five_word_phrases: usize,
}

impl Default for PhraseQuotas {
    fn default() -> Self {
        Self {
            single_words: 3,
            two_word_phrases: 2,
            three_word_phrases: 2,
            four_five_word_phrases: 5,
        }
    }
}

impl PhraseQuotas {
    /// Quotas that select nothing
    #[must_use]
    pub const fn none() -> Self {
        Self {
            single_words: 0,
            two_word_phrases: 0,
            three_word_phrases: 0,
            four_five_word_phrases: 0,
        }
    }

    const fn limit(&self, bucket: WordBucket) -> usize {
        match bucket {
            WordBucket::Single => self.single_words,
            WordBucket::Two => self.two_word_phrases,
            WordBucket::Three => self.three_word_phrases,
            WordBucket::FourFive => self.four_five_word_phrases,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordBucket {
    Single,
    Two,
    Three,
    FourFive,
}

impl WordBucket {
    /// Bucket for a phrase of `words` whitespace-separated words; phrases
    /// outside 1..=5 words have none.
    #[must_use]
    pub const fn for_word_count(words: usize) -> Option<Self> {
        match words {
            1 => Some(Self::Single),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 | 5 => Some(Self::FourFive),
            _ => None,
        }
    }
}

/// Phrases chosen for one number, grouped by word count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseSelection {
    pub single_words: Vec<String>,
    pub two_word_phrases: Vec<String>,
    pub three_word_phrases: Vec<String>,
    pub four_five_word_phrases: Vec<String>,
}

impl PhraseSelection {
    fn bucket_mut(&mut self, bucket: WordBucket) -> &mut Vec<String> {
        match bucket {
            WordBucket::Single => &mut self.single_words,
            WordBucket::Two => &mut self.two_word_phrases,
            WordBucket::Three => &mut self.three_word_phrases,
            WordBucket::FourFive => &mut self.four_five_word_phrases,
        }
    }

    /// All selected phrases in bucket order: 1, 2, 3, then 4–5 words.
    pub fn phrases(&self) -> impl Iterator<Item = &str> {
        self.single_words
            .iter()
            .chain(&self.two_word_phrases)
            .chain(&self.three_word_phrases)
            .chain(&self.four_five_word_phrases)
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.single_words.len()
            + self.two_word_phrases.len()
            + self.three_word_phrases.len()
            + self.four_five_word_phrases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outcome of matching one resonance number against the lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LexiconMatch {
    Found { selection: PhraseSelection },
    /// The lexicon has no entry for this number.
    NoPhrases,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberMatch {
    pub number: u64,
    #[serde(flatten)]
    pub outcome: LexiconMatch,
}

/// Quota-limited, shuffled phrase retrieval.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconMatcher {
    quotas: PhraseQuotas,
}

impl LexiconMatcher {
    #[must_use]
    pub const fn new(quotas: PhraseQuotas) -> Self {
        Self { quotas }
    }

    #[must_use]
    pub const fn quotas(&self) -> &PhraseQuotas {
        &self.quotas
    }

    /// Deduplicates and shuffles `phrases`, then fills each word-count
    /// bucket greedily up to its quota.
    pub fn select<I, R>(&self, phrases: I, rng: &mut R) -> PhraseSelection
    where
        I: IntoIterator<Item = String>,
        R: Rng + ?Sized,
    {
        let mut candidates: Vec<String> = phrases
            .into_iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        candidates.shuffle(rng);

        let mut selection = PhraseSelection::default();
        for phrase in candidates {
            let Some(bucket) = WordBucket::for_word_count(phrase.split_whitespace().count())
            else {
                continue;
            };
            let limit = self.quotas.limit(bucket);
            let slot = selection.bucket_mut(bucket);
            if slot.len() < limit {
                slot.push(phrase);
            }
        }
        selection
    }

    /// Matches every number in order; numbers without a lexicon entry get
    /// [`LexiconMatch::NoPhrases`].
    pub fn match_numbers<P, R>(
        &self,
        numbers: &[u64],
        provider: &P,
        rng: &mut R,
    ) -> Vec<NumberMatch>
    where
        P: LexiconProvider + ?Sized,
        R: Rng + ?Sized,
    {
        numbers
            .iter()
            .map(|&number| {
                let phrases = provider.lookup(number);
                let outcome = if phrases.is_empty() {
                    LexiconMatch::NoPhrases
                } else {
                    LexiconMatch::Found {
                        selection: self.select(phrases, rng),
                    }
                };
                NumberMatch { number, outcome }
            })
            .collect()
    }
}
