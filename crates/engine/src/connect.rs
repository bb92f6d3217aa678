use crate::engine::ResonanceEngine;
use crate::error::Result;
use rand::seq::SliceRandom;
use rand::Rng;
use resonance_cipher::{Cipher, CipherError, CipherValue};
use resonance_lexicon::LexiconProvider;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How many phrases a connection pass draws and lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectLimits {
    /// Phrases drawn for the starting number
    pub initial: usize,

    /// Phrases listed for each drawn phrase's score
    pub connected: usize,
}

impl Default for ConnectLimits {
    fn default() -> Self {
        Self {
            initial: 10,
            connected: 5,
        }
    }
}

/// One drawn phrase, its score and the phrases filed under that score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub phrase: String,
    pub value: CipherValue,
    pub connected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConnectOutcome {
    Found { connections: Vec<Connection> },
    /// The lexicon has no entry for the starting number.
    NoPhrases,
}

/// Everything a connection pass produced for one number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberConnections {
    pub number: u64,
    /// Id of the cipher that scored the drawn phrases.
    pub cipher: String,
    #[serde(flatten)]
    pub outcome: ConnectOutcome,
}

impl NumberConnections {
    #[must_use]
    pub fn connections(&self) -> &[Connection] {
        match &self.outcome {
            ConnectOutcome::Found { connections } => connections,
            ConnectOutcome::NoPhrases => &[],
        }
    }
}

fn distinct(phrases: Vec<String>) -> Vec<String> {
    phrases
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Lexicon key for a score; negative and non-finite scores have none.
fn lexicon_key(value: CipherValue) -> Option<u64> {
    value.as_integer().and_then(|v| u64::try_from(v).ok())
}

fn connect_with<P, R>(
    cipher: &dyn Cipher,
    number: u64,
    limits: ConnectLimits,
    lexicon: &P,
    rng: &mut R,
) -> NumberConnections
where
    P: LexiconProvider + ?Sized,
    R: Rng + ?Sized,
{
    let mut phrases = distinct(lexicon.lookup(number));
    let outcome = if phrases.is_empty() {
        ConnectOutcome::NoPhrases
    } else {
        phrases.shuffle(rng);
        phrases.truncate(limits.initial);
        let connections = phrases
            .into_iter()
            .map(|phrase| {
                let value = cipher.evaluate(&phrase);
                let mut connected = match lexicon_key(value) {
                    Some(key) => distinct(lexicon.lookup(key)),
                    None => Vec::new(),
                };
                connected.truncate(limits.connected);
                Connection {
                    phrase,
                    value,
                    connected,
                }
            })
            .collect();
        ConnectOutcome::Found { connections }
    };
    NumberConnections {
        number,
        cipher: cipher.id().to_string(),
        outcome,
    }
}

impl ResonanceEngine<'_> {
    /// Starts from a number instead of a text.
    ///
    /// Draws up to `limits.initial` shuffled phrases filed under `number`,
    /// scores each with the configured connection cipher and lists up to
    /// `limits.connected` phrases filed under that score.
    pub fn connect<P, R>(
        &self,
        number: u64,
        limits: ConnectLimits,
        lexicon: &P,
        rng: &mut R,
    ) -> Result<NumberConnections>
    where
        P: LexiconProvider + ?Sized,
        R: Rng + ?Sized,
    {
        let id = self.config().connection_cipher.as_str();
        let cipher = self
            .registry()
            .get(id)
            .ok_or_else(|| CipherError::unknown(id))?;
        let result = connect_with(cipher, number, limits, lexicon, rng);
        log::debug!(
            "Connected {number}: {} phrase(s) scored with {id}",
            result.connections().len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::mock::StepRng;
    use resonance_cipher::FnCipher;
    use resonance_lexicon::Lexicon;

    fn length_cipher() -> FnCipher {
        FnCipher::new("length", "Length", |text| {
            CipherValue::Integer(text.chars().count() as i64)
        })
    }

    #[test]
    fn limits_apply_to_drawn_and_connected_phrases() {
        let mut lexicon = Lexicon::in_memory();
        for phrase in ["ab", "cd", "efg"] {
            lexicon.insert(1, phrase);
        }
        for phrase in ["xy", "zz", "qq"] {
            lexicon.insert(2, phrase);
        }
        let limits = ConnectLimits {
            initial: 2,
            connected: 2,
        };

        // Zero draws shuffle ["ab", "cd", "efg"] into ["cd", "efg", "ab"].
        let mut rng = StepRng::new(0, 0);
        let result = connect_with(&length_cipher(), 1, limits, &lexicon, &mut rng);
        assert_eq!(result.cipher, "length");
        assert_eq!(
            result.connections(),
            [
                Connection {
                    phrase: "cd".to_string(),
                    value: CipherValue::Integer(2),
                    connected: vec!["qq".to_string(), "xy".to_string()],
                },
                Connection {
                    phrase: "efg".to_string(),
                    value: CipherValue::Integer(3),
                    connected: Vec::new(),
                },
            ]
        );
    }

    #[test]
    fn unknown_number_has_no_phrases() {
        let lexicon = Lexicon::in_memory();
        let mut rng = StepRng::new(0, 0);
        let limits = ConnectLimits::default();
        let result = connect_with(&length_cipher(), 9, limits, &lexicon, &mut rng);
        assert_eq!(result.outcome, ConnectOutcome::NoPhrases);
        assert!(result.connections().is_empty());
    }

    #[test]
    fn negative_scores_have_no_key() {
        assert_eq!(lexicon_key(CipherValue::Integer(-3)), None);
        assert_eq!(lexicon_key(CipherValue::Real(f64::NAN)), None);
        assert_eq!(lexicon_key(CipherValue::Real(12.7)), Some(12));
    }
}
