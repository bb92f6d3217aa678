use crate::error::Result;
use crate::store::{self, LineFormat, ParsedLine};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Read access to number → phrase associations plus the one write the
/// engine performs.
pub trait LexiconProvider {
    /// Phrases indexed under `number`; empty when there is no entry.
    fn lookup(&self, number: u64) -> Vec<String>;

    /// Associates `phrase` with every number in `numbers`, persisting when
    /// the provider has backing storage. Later lookups in the same session
    /// see the new associations. Returns the number of associations written.
    fn record(&mut self, phrase: &str, numbers: &BTreeSet<u64>) -> Result<usize>;
}

/// Counters gathered while building a lexicon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub files_read: usize,
    pub missing_files: usize,
    pub entries: usize,
    pub malformed_lines: usize,
}

/// In-memory number → phrase index with an optional append-only
/// additions file.
///
/// Phrases under one number form a set, so repeated associations collapse.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: BTreeMap<u64, BTreeSet<String>>,
    additions_path: Option<PathBuf>,
    stats: LoadStats,
}

impl Lexicon {
    /// Empty lexicon without backing storage; `record` only updates memory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn builder() -> LexiconBuilder {
        LexiconBuilder::default()
    }

    /// Returns `true` when the association is new.
    pub fn insert(&mut self, number: u64, phrase: impl Into<String>) -> bool {
        self.entries
            .entry(number)
            .or_default()
            .insert(phrase.into())
    }

    #[must_use]
    pub fn phrases(&self, number: u64) -> Option<&BTreeSet<String>> {
        self.entries.get(&number)
    }

    #[must_use]
    pub fn contains(&self, number: u64) -> bool {
        self.entries.contains_key(&number)
    }

    #[must_use]
    pub fn number_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn unique_phrase_count(&self) -> usize {
        self.entries
            .values()
            .flatten()
            .collect::<BTreeSet<_>>()
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn stats(&self) -> &LoadStats {
        &self.stats
    }

    #[must_use]
    pub fn additions_path(&self) -> Option<&Path> {
        self.additions_path.as_deref()
    }

    fn load_file(&mut self, path: &Path, format: LineFormat) -> Result<()> {
        let Some(content) = store::read_lexicon_file(path)? else {
            self.stats.missing_files += 1;
            if format == LineFormat::Additions {
                log::info!(
                    "No additions file at {}; it will be created on first record",
                    path.display()
                );
            } else {
                log::warn!("Lexicon file {} does not exist, skipping", path.display());
            }
            return Ok(());
        };

        let mut entries = 0;
        let mut malformed = 0;
        for line in content.lines() {
            match store::parse_line(format, line) {
                ParsedLine::Blank => {}
                ParsedLine::Malformed => malformed += 1,
                ParsedLine::Entries(parsed) => {
                    for (phrase, number) in parsed {
                        self.insert(number, phrase);
                        entries += 1;
                    }
                }
            }
        }
        if malformed > 0 {
            log::warn!(
                "Skipped {malformed} malformed line(s) in {}",
                path.display()
            );
        }
        log::debug!("Loaded {entries} entries from {}", path.display());

        self.stats.files_read += 1;
        self.stats.entries += entries;
        self.stats.malformed_lines += malformed;
        Ok(())
    }
}

impl LexiconProvider for Lexicon {
    fn lookup(&self, number: u64) -> Vec<String> {
        self.entries
            .get(&number)
            .map(|phrases| phrases.iter().cloned().collect())
            .unwrap_or_default()
    }

    fn record(&mut self, phrase: &str, numbers: &BTreeSet<u64>) -> Result<usize> {
        let phrase = phrase.trim();
        if phrase.is_empty() || numbers.is_empty() {
            log::warn!("Nothing to record: empty phrase or no numbers");
            return Ok(0);
        }
        store::check_storable(phrase)?;

        if let Some(path) = &self.additions_path {
            store::append_associations(path, phrase, numbers)?;
            log::info!(
                "Recorded {} association(s) for {phrase:?} in {}",
                numbers.len(),
                path.display()
            );
        }
        for number in numbers {
            self.insert(*number, phrase);
        }
        Ok(numbers.len())
    }
}

/// Collects lexicon sources; `build` loads them in order
/// corpus → words → additions.
#[derive(Debug, Clone, Default)]
pub struct LexiconBuilder {
    corpus_files: Vec<PathBuf>,
    words_files: Vec<PathBuf>,
    additions_file: Option<PathBuf>,
}

impl LexiconBuilder {
    /// `tag|phrase|number` file
    #[must_use]
    pub fn corpus_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.corpus_files.push(path.into());
        self
    }

    /// `phrase:number[:number...]` file
    #[must_use]
    pub fn words_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.words_files.push(path.into());
        self
    }

    /// `phrase|number` file, also the target of [`LexiconProvider::record`]
    #[must_use]
    pub fn additions_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.additions_file = Some(path.into());
        self
    }

    /// Missing files are skipped; unreadable ones are an error.
    pub fn build(self) -> Result<Lexicon> {
        let mut lexicon = Lexicon::in_memory();
        for path in &self.corpus_files {
            lexicon.load_file(path, LineFormat::Corpus)?;
        }
        for path in &self.words_files {
            lexicon.load_file(path, LineFormat::Words)?;
        }
        if let Some(path) = &self.additions_file {
            lexicon.load_file(path, LineFormat::Additions)?;
        }
        lexicon.additions_path = self.additions_file;

        log::info!(
            "Lexicon ready: {} unique phrases across {} numbers ({} files, {} malformed lines)",
            lexicon.unique_phrase_count(),
            lexicon.number_count(),
            lexicon.stats.files_read,
            lexicon.stats.malformed_lines
        );
        Ok(lexicon)
    }
}
