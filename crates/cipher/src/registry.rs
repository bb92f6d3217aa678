use crate::ciphers;
use crate::error::{CipherError, Result};
use crate::tables::{self, LetterTable};
use crate::value::CipherValue;
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::Arc;

/// A named, stateless letter-to-number mapping.
///
/// Implementations must be total and deterministic: the same text always
/// yields the same value, and no input is rejected.
pub trait Cipher: Send + Sync {
    /// Registry key, kebab-case
    fn id(&self) -> &'static str;

    /// Human-readable name used in reports
    fn label(&self) -> &'static str;

    fn evaluate(&self, text: &str) -> CipherValue;
}

/// Sums a fixed per-letter table over the ASCII letters of the text.
#[derive(Debug, Clone, Copy)]
pub struct TableCipher {
    id: &'static str,
    label: &'static str,
    table: &'static LetterTable,
}

impl TableCipher {
    pub const fn new(id: &'static str, label: &'static str, table: &'static LetterTable) -> Self {
        Self { id, label, table }
    }
}

impl Cipher for TableCipher {
    fn id(&self) -> &'static str {
        self.id
    }

    fn label(&self) -> &'static str {
        self.label
    }

    fn evaluate(&self, text: &str) -> CipherValue {
        CipherValue::Integer(ciphers::table_sum(text, self.table))
    }
}

/// Wraps a plain function.
#[derive(Clone, Copy)]
pub struct FnCipher {
    id: &'static str,
    label: &'static str,
    eval: fn(&str) -> CipherValue,
}

impl FnCipher {
    pub const fn new(
        id: &'static str,
        label: &'static str,
        eval: fn(&str) -> CipherValue,
    ) -> Self {
        Self { id, label, eval }
    }
}

impl Cipher for FnCipher {
    fn id(&self) -> &'static str {
        self.id
    }

    fn label(&self) -> &'static str {
        self.label
    }

    fn evaluate(&self, text: &str) -> CipherValue {
        (self.eval)(text)
    }
}

impl fmt::Debug for FnCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCipher").field("id", &self.id).finish()
    }
}

/// Ciphers keyed by id, in registration order.
#[derive(Clone, Default)]
pub struct CipherRegistry {
    ciphers: Vec<Arc<dyn Cipher>>,
}

static STANDARD: Lazy<CipherRegistry> = Lazy::new(CipherRegistry::standard);

/// Process-wide read-only registry holding every built-in cipher.
#[must_use]
pub fn standard_registry() -> &'static CipherRegistry {
    &STANDARD
}

macro_rules! base_cipher {
    ($id:literal, $label:literal, $base:literal) => {
        FnCipher::new($id, $label, |text| ciphers::base_digit_sum(text, $base))
    };
}

impl CipherRegistry {
    /// Registry with no ciphers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the full built-in catalogue.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        let fns = [
            FnCipher::new("simple", "Simple Gematria", ciphers::simple),
            FnCipher::new("english", "English Gematria", ciphers::english),
            FnCipher::new(
                "gemini-resonance",
                "Gemini's Resonance",
                ciphers::gemini_resonance,
            ),
            FnCipher::new(
                "boundary-resonance",
                "Boundary Resonance",
                ciphers::boundary_resonance,
            ),
            FnCipher::new(
                "law-of-6-doubling",
                "Law of 6 Doubling Gematria",
                ciphers::law_of_6_doubling,
            ),
            FnCipher::new(
                "tiferet-balance",
                "Tiferet Balance Gematria",
                ciphers::tiferet_balance,
            ),
            FnCipher::new("thelemic-6", "Thelemic 6 Cipher", ciphers::thelemic_6),
            FnCipher::new(
                "vav-connection",
                "Vav Connection Gematria",
                ciphers::vav_connection,
            ),
            FnCipher::new("hexagram", "Hexagram Gematria", ciphers::hexagram),
            FnCipher::new(
                "doubling-vortex",
                "Doubling Vortex Gematria",
                ciphers::doubling_vortex,
            ),
            FnCipher::new(
                "six-numbers-emergence",
                "Six Numbers Emergence Cipher",
                ciphers::six_numbers_emergence,
            ),
            FnCipher::new(
                "cabala-6-law-reduction",
                "Cabala 6 Law Reduction",
                ciphers::cabala_6_law_reduction,
            ),
            FnCipher::new(
                "qabalah-doubling-bridge",
                "Qabalah Doubling Bridge",
                ciphers::qabalah_doubling_bridge,
            ),
            FnCipher::new(
                "law-of-6-variant",
                "Law of 6 Cipher Variant",
                ciphers::law_of_6_variant,
            ),
            FnCipher::new(
                "ordinal-multiplied",
                "Ordinal Multiplied Gematria",
                ciphers::ordinal_multiplied,
            ),
            FnCipher::new(
                "golden-ratio-phi",
                "Golden Ratio Phi Gematria",
                ciphers::golden_ratio_phi,
            ),
            FnCipher::new("ascii-sum", "ASCII Sum Gematria", ciphers::ascii_sum),
            FnCipher::new("caesar", "Caesar Cipher Gematria", ciphers::caesar),
            base_cipher!("base-2", "Base-2 Gematria", 2),
            base_cipher!("base-3", "Base-3 Gematria", 3),
            base_cipher!("base-4", "Base-4 Gematria", 4),
            base_cipher!("base-5", "Base-5 Gematria", 5),
            base_cipher!("base-7", "Base-7 Gematria", 7),
            base_cipher!("base-8", "Base-8 Gematria", 8),
            base_cipher!("base-9", "Base-9 Gematria", 9),
            base_cipher!("base-11", "Base-11 Gematria", 11),
            FnCipher::new("composite-ctgb", "Composite CTGB", ciphers::composite_ctgb),
            FnCipher::new(
                "binary-trinary",
                "Binary Trinary Gematria",
                ciphers::binary_trinary,
            ),
            FnCipher::new(
                "golden-spiral-binary",
                "Golden Spiral Binary Gematria",
                ciphers::golden_spiral_binary,
            ),
            FnCipher::new(
                "trinary-loop-position",
                "Trinary Loop Position Gematria",
                ciphers::trinary_loop_position,
            ),
        ];
        let tables = [
            TableCipher::new("jewish", "Jewish Gematria", &tables::JEWISH),
            TableCipher::new("alw", "ALW Cipher Gematria", &tables::ALW),
            TableCipher::new(
                "trigrammaton",
                "Trigrammaton Qabalah Gematria",
                &tables::TRIGRAMMATON,
            ),
            TableCipher::new("baconian", "Baconian Gematria", &tables::BACONIAN),
            TableCipher::new("chaldean", "Chaldean Gematria", &tables::CHALDEAN),
            TableCipher::new(
                "hexadecimal-position",
                "Hexadecimal Position Gematria",
                &tables::HEXADECIMAL_POSITION,
            ),
            TableCipher::new("sumerian", "Sumerian Gematria", &tables::SUMERIAN),
            TableCipher::new(
                "phone-keypad",
                "Phone Keypad Gematria",
                &tables::PHONE_KEYPAD,
            ),
            TableCipher::new(
                "polybius-square",
                "Polybius Square Gematria",
                &tables::POLYBIUS_SQUARE,
            ),
            TableCipher::new("solfege", "Solfège Gematria", &tables::SOLFEGE),
            TableCipher::new("zodiac", "Zodiac Gematria", &tables::ZODIAC),
        ];

        for cipher in fns {
            registry.ciphers.push(Arc::new(cipher));
        }
        for cipher in tables {
            registry.ciphers.push(Arc::new(cipher));
        }
        registry
    }

    /// Adds a cipher; ids must be unique.
    pub fn register(&mut self, cipher: impl Cipher + 'static) -> Result<()> {
        if self.contains(cipher.id()) {
            return Err(CipherError::duplicate(cipher.id()));
        }
        self.ciphers.push(Arc::new(cipher));
        Ok(())
    }

    pub fn deregister(&mut self, id: &str) -> Option<Arc<dyn Cipher>> {
        let idx = self.ciphers.iter().position(|c| c.id() == id)?;
        Some(self.ciphers.remove(idx))
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&dyn Cipher> {
        self.ciphers
            .iter()
            .find(|c| c.id() == id)
            .map(|c| c.as_ref())
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn evaluate(&self, id: &str, text: &str) -> Result<CipherValue> {
        self.get(id)
            .map(|cipher| cipher.evaluate(text))
            .ok_or_else(|| CipherError::unknown(id))
    }

    /// Resolves a selection of ids, keeping the caller's order and dropping
    /// repeats. An empty selection means every registered cipher.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Arc<dyn Cipher>>> {
        if ids.is_empty() {
            return Ok(self.ciphers.clone());
        }
        let mut selected: Vec<Arc<dyn Cipher>> = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            let cipher = self
                .ciphers
                .iter()
                .find(|c| c.id() == id)
                .ok_or_else(|| CipherError::unknown(id))?;
            if !selected.iter().any(|c| c.id() == id) {
                selected.push(Arc::clone(cipher));
            }
        }
        Ok(selected)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Cipher> {
        self.ciphers.iter().map(|c| c.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.ciphers.iter().map(|c| c.id())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ciphers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ciphers.is_empty()
    }
}

impl fmt::Debug for CipherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn standard_catalogue_has_unique_ids() {
        let registry = CipherRegistry::standard();
        let mut ids: Vec<_> = registry.ids().collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 41);
    }

    #[test]
    fn evaluates_by_id() {
        let registry = standard_registry();
        let simple = registry.evaluate("simple", "cat");
        assert_eq!(simple, Ok(CipherValue::Integer(24)));
        let zodiac = registry.evaluate("zodiac", "cat");
        assert_eq!(zodiac, Ok(CipherValue::Integer(12)));
        assert_eq!(
            registry.evaluate("nope", "cat"),
            Err(CipherError::unknown("nope"))
        );
    }

    #[test]
    fn select_keeps_order_and_drops_repeats() {
        let registry = standard_registry();
        let selected = registry
            .select(&["english", "simple", "english"])
            .expect("known ids");
        let ids: Vec<_> = selected.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["english", "simple"]);

        let all = registry.select::<&str>(&[]).expect("all");
        assert_eq!(all.len(), registry.len());
    }

    #[test]
    fn register_and_deregister() {
        let mut registry = CipherRegistry::new();
        registry
            .register(FnCipher::new("length", "Length", |text| {
                CipherValue::Integer(text.chars().count() as i64)
            }))
            .expect("register");
        assert!(registry.contains("length"));
        assert_eq!(
            registry.register(FnCipher::new("length", "Length", |_| CipherValue::ZERO)),
            Err(CipherError::duplicate("length"))
        );
        assert!(registry.deregister("length").is_some());
        assert!(registry.is_empty());
        assert!(registry.deregister("length").is_none());
    }

    #[test]
    fn every_cipher_is_total_on_awkward_input() {
        for text in ["", "   ", "1234", "!?", "ÀÉÎõü", "MiXeD cAsE"] {
            for cipher in standard_registry().iter() {
                let _ = cipher.evaluate(text);
            }
        }
    }

    proptest! {
        #[test]
        fn proptest_ciphers_are_deterministic(text in "[A-Za-z ]{1,40}") {
            for cipher in standard_registry().iter() {
                let first = cipher.evaluate(&text);
                let second = cipher.evaluate(&text);
                prop_assert_eq!(first, second, "cipher {}", cipher.id());
            }
        }

        #[test]
        fn proptest_non_letters_do_not_change_table_sums(
            text in "[a-z]{1,20}",
            noise in "[0-9!?.,]{1,5}",
        ) {
            let noisy = format!("{noise}{text}{noise}");
            for id in ["simple", "jewish", "alw", "chaldean", "zodiac", "polybius-square"] {
                let registry = standard_registry();
                prop_assert_eq!(
                    registry.evaluate(id, &text).unwrap(),
                    registry.evaluate(id, &noisy).unwrap()
                );
            }
        }
    }
}
