//! # Resonance Lexicon
//!
//! Number → phrase index used to put words on resonance numbers.
//!
//! ## Lifecycle
//!
//! ```text
//! build   ──> corpus / words / additions files parsed, malformed lines skipped
//! lookup  ──> phrases under a number (read-only)
//! record  ──> append `phrase|number` lines + merge into memory (single writer)
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use resonance_lexicon::{Lexicon, LexiconMatcher, LexiconProvider, PhraseQuotas};
//!
//! let mut lexicon = Lexicon::builder()
//!     .corpus_file("db/corpus.txt")
//!     .additions_file("db/additions.txt")
//!     .build()?;
//!
//! lexicon.record("cat", &[24, 144].into_iter().collect())?;
//!
//! let matcher = LexiconMatcher::new(PhraseQuotas::default());
//! let matches = matcher.match_numbers(&[24], &lexicon, &mut rand::thread_rng());
//! println!("{matches:?}");
//! # Ok::<(), resonance_lexicon::LexiconError>(())
//! ```

mod error;
mod index;
mod matcher;
mod store;

pub use error::{LexiconError, Result};
pub use index::{Lexicon, LexiconBuilder, LexiconProvider, LoadStats};
pub use matcher::{
    LexiconMatch, LexiconMatcher, NumberMatch, PhraseQuotas, PhraseSelection, WordBucket,
};
