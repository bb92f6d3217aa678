use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use resonance_lexicon::{
    Lexicon, LexiconMatch, LexiconMatcher, LexiconProvider, LoadStats, PhraseQuotas,
};
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn numbers(items: &[u64]) -> BTreeSet<u64> {
    items.iter().copied().collect()
}

#[test]
fn build_skips_malformed_lines_and_missing_files() {
    let tmp = TempDir::new().expect("tempdir");
    let corpus = tmp.path().join("corpus.txt");
    let words = tmp.path().join("words.txt");
    let additions = tmp.path().join("additions.txt");

    fs::write(
        &corpus,
        "book|in the beginning|74\nbook|broken line\nbook|bad number|x\n\nbook|light|56\n",
    )
    .expect("write corpus");
    fs::write(&words, "light:56:336\nnonsense\n").expect("write words");
    fs::write(&additions, "cat|24\ncat|24\ntoo|many|fields|here\n").expect("write additions");

    let lexicon = Lexicon::builder()
        .corpus_file(&corpus)
        .corpus_file(tmp.path().join("missing.txt"))
        .words_file(&words)
        .additions_file(&additions)
        .build()
        .expect("build");

    assert_eq!(
        lexicon.stats(),
        &LoadStats {
            files_read: 3,
            missing_files: 1,
            entries: 6,
            malformed_lines: 4,
        }
    );
    assert_eq!(lexicon.lookup(56), vec!["light".to_string()]);
    assert_eq!(lexicon.lookup(336), vec!["light".to_string()]);
    assert_eq!(lexicon.lookup(24), vec!["cat".to_string()]);
    assert_eq!(lexicon.lookup(74), vec!["in the beginning".to_string()]);
    assert_eq!(lexicon.unique_phrase_count(), 3);
}

#[test]
fn record_persists_and_is_visible_before_reload() {
    let tmp = TempDir::new().expect("tempdir");
    let additions = tmp.path().join("db").join("additions.txt");

    let mut lexicon = Lexicon::builder()
        .additions_file(&additions)
        .build()
        .expect("build");
    assert!(lexicon.is_empty());
    assert_eq!(lexicon.stats().missing_files, 1);

    let written = lexicon
        .record("good cat", &numbers(&[12, 3]))
        .expect("record");
    assert_eq!(written, 2);
    assert_eq!(lexicon.lookup(3), vec!["good cat".to_string()]);

    let content = fs::read_to_string(&additions).expect("read additions");
    assert_eq!(content, "good cat|3\ngood cat|12\n");

    let reloaded = Lexicon::builder()
        .additions_file(&additions)
        .build()
        .expect("reload");
    assert_eq!(reloaded.lookup(12), vec!["good cat".to_string()]);
    assert_eq!(reloaded.stats().entries, 2);
}

#[test]
fn matcher_respects_quotas_against_a_loaded_lexicon() {
    let tmp = TempDir::new().expect("tempdir");
    let additions = tmp.path().join("additions.txt");
    fs::write(
        &additions,
        "cat|24\ngood cat|24\ngreat cat|24\ntabby cat feline|24\n",
    )
    .expect("write additions");

    let lexicon = Lexicon::builder()
        .additions_file(&additions)
        .build()
        .expect("build");
    let matcher = LexiconMatcher::new(PhraseQuotas {
        single_words: 1,
        two_word_phrases: 1,
        three_word_phrases: 0,
        four_five_word_phrases: 0,
    });

    for seed in 0..16 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let matches = matcher.match_numbers(&[24, 25], &lexicon, &mut rng);
        let LexiconMatch::Found { selection } = &matches[0].outcome else {
            panic!("expected phrases for 24");
        };
        assert_eq!(selection.single_words.len(), 1);
        assert_eq!(selection.two_word_phrases.len(), 1);
        assert!(selection.three_word_phrases.is_empty());
        assert!(selection.four_five_word_phrases.is_empty());
        assert_eq!(matches[1].outcome, LexiconMatch::NoPhrases);
    }
}
