//! # Resonance Engine
//!
//! Turns a text fragment into resonance numbers and the lexicon phrases
//! that share them.
//!
//! ## Pipeline
//!
//! ```text
//! text ──> cipher values ──> initial number (primary values concatenated)
//!              │                    │
//!              │                    └──> chain → base-36 → pair decode ─┐
//!              ├──> per-cipher chain → base-36 → pair decode ───────────┤
//!              └──> chain groups (concatenated) → ... ──────────────────┤
//!                                                                       ▼
//!                                                    union → tags → lexicon matching
//! ```
//!
//! Everything up to the union is deterministic. Lexicon matching shuffles,
//! so the random source is a parameter.
//!
//! [`ResonanceEngine::connect`] runs the other direction: it starts from a
//! number, draws phrases filed under it, scores each with the connection
//! cipher and lists the phrases filed under that score.
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use resonance_engine::{ComputeRequest, EngineConfig, ResonanceEngine};
//! use resonance_lexicon::Lexicon;
//!
//! let engine = ResonanceEngine::new(EngineConfig::default())?;
//! let mut lexicon = Lexicon::in_memory();
//! lexicon.insert(36, "the square of six");
//!
//! let request = ComputeRequest::new("cat").with_ciphers(["simple", "english"]);
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let result = engine.compute(&request, &lexicon, &mut rng)?;
//!
//! assert_eq!(result.initial.digits, "22614424");
//! println!("{}", resonance_engine::render_report(&result));
//! # Ok::<(), resonance_engine::EngineError>(())
//! ```

mod aggregate;
mod config;
mod connect;
mod engine;
mod error;
mod report;
mod synth;

pub use aggregate::{UnfoldOutcome, Unfolding};
pub use config::{
    ChainGroup, EngineConfig, DEFAULT_CONNECTION_CIPHER, DEFAULT_PRIMARY_CIPHERS,
    DEFAULT_UNFOLD_THRESHOLD,
};
pub use connect::{ConnectLimits, ConnectOutcome, Connection, NumberConnections};
pub use engine::{CipherReading, ComputeRequest, ResonanceEngine, ResonanceResult, TaggedNumber};
pub use error::{EngineError, Result};
pub use report::{render_connections, render_report};
pub use synth::{synthesize, InitialNumber};
