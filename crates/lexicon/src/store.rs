//! Line-oriented lexicon files.
//!
//! | format    | line shape                 |
//! |-----------|----------------------------|
//! | additions | `phrase|number`            |
//! | corpus    | `tag|phrase|number`        |
//! | words     | `phrase:number[:number..]` |

use crate::error::{LexiconError, Result};
use fs2::FileExt;
use std::collections::BTreeSet;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineFormat {
    Additions,
    Corpus,
    Words,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ParsedLine {
    Blank,
    Entries(Vec<(String, u64)>),
    Malformed,
}

fn parse_number(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

fn single_entry(phrase: &str, number: &str) -> ParsedLine {
    let phrase = phrase.trim();
    match parse_number(number) {
        Some(number) if !phrase.is_empty() => {
            ParsedLine::Entries(vec![(phrase.to_string(), number)])
        }
        _ => ParsedLine::Malformed,
    }
}

pub(crate) fn parse_line(format: LineFormat, line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Blank;
    }
    match format {
        LineFormat::Additions => {
            let parts: Vec<&str> = line.split('|').collect();
            match parts.as_slice() {
                [phrase, number] => single_entry(phrase, number),
                _ => ParsedLine::Malformed,
            }
        }
        LineFormat::Corpus => {
            let parts: Vec<&str> = line.split('|').collect();
            match parts.as_slice() {
                [_tag, phrase, number] => single_entry(phrase, number),
                _ => ParsedLine::Malformed,
            }
        }
        LineFormat::Words => {
            let mut parts = line.split(':');
            let phrase = parts.next().unwrap_or_default().trim();
            if phrase.is_empty() {
                return ParsedLine::Malformed;
            }
            let entries: Vec<(String, u64)> = parts
                .filter_map(parse_number)
                .map(|number| (phrase.to_string(), number))
                .collect();
            if entries.is_empty() {
                ParsedLine::Malformed
            } else {
                ParsedLine::Entries(entries)
            }
        }
    }
}

/// Reads a lexicon file; `Ok(None)` when it does not exist.
///
/// Invalid UTF-8 is replaced rather than failing the whole file.
pub(crate) fn read_lexicon_file(path: &Path) -> Result<Option<String>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(LexiconError::io(path, err)),
    }
}

/// Rejects phrases that would break the `phrase|number` line shape.
pub(crate) fn check_storable(phrase: &str) -> Result<()> {
    if phrase.contains(['|', '\n', '\r']) {
        return Err(LexiconError::UnstorablePhrase(phrase.to_string()));
    }
    Ok(())
}

struct AppendLock {
    file: File,
}

impl Drop for AppendLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

fn open_locked_for_append(path: &Path) -> Result<AppendLock> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|err| LexiconError::io(parent, err))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .append(true)
        .open(path)
        .map_err(|err| LexiconError::io(path, err))?;
    file.lock_exclusive().map_err(|err| LexiconError::lock(path, err))?;
    Ok(AppendLock { file })
}

fn ends_without_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0_u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Appends one `phrase|number` line per number, ascending, under an
/// exclusive file lock.
pub(crate) fn append_associations(
    path: &Path,
    phrase: &str,
    numbers: &BTreeSet<u64>,
) -> Result<usize> {
    check_storable(phrase)?;
    let mut lock = open_locked_for_append(path)?;

    let mut buf = String::new();
    if ends_without_newline(&mut lock.file).map_err(|err| LexiconError::io(path, err))? {
        buf.push('\n');
    }
    for number in numbers {
        buf.push_str(phrase);
        buf.push('|');
        buf.push_str(&number.to_string());
        buf.push('\n');
    }
    lock.file
        .write_all(buf.as_bytes())
        .and_then(|_| lock.file.flush())
        .map_err(|err| LexiconError::io(path, err))?;
    Ok(numbers.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn entries(items: &[(&str, u64)]) -> ParsedLine {
        ParsedLine::Entries(items.iter().map(|(p, n)| (p.to_string(), *n)).collect())
    }

    fn malformed(format: LineFormat, line: &str) -> bool {
        parse_line(format, line) == ParsedLine::Malformed
    }

    #[test]
    fn additions_lines() {
        assert_eq!(
            parse_line(LineFormat::Additions, "  good cat | 42 \n"),
            entries(&[("good cat", 42)])
        );
        assert_eq!(parse_line(LineFormat::Additions, ""), ParsedLine::Blank);
        for line in ["cat|x", "cat|1|2", "cat|-4", " |4"] {
            assert!(malformed(LineFormat::Additions, line), "{line}");
        }
    }

    #[test]
    fn corpus_lines_ignore_the_tag() {
        assert_eq!(
            parse_line(LineFormat::Corpus, "book.txt|the word|77"),
            entries(&[("the word", 77)])
        );
        assert!(malformed(LineFormat::Corpus, "the word|77"));
    }

    #[test]
    fn words_lines_index_every_number() {
        assert_eq!(
            parse_line(LineFormat::Words, "light: 56 :x: 336"),
            entries(&[("light", 56), ("light", 336)])
        );
        assert!(malformed(LineFormat::Words, "light"));
        assert!(malformed(LineFormat::Words, "light:nope"));
    }

    #[test]
    fn append_writes_sorted_lines_and_repairs_missing_newline() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("additions.txt");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "old|1").unwrap();

        let numbers: BTreeSet<u64> = [30, 4].into_iter().collect();
        let written = append_associations(&path, "cat", &numbers).unwrap();
        assert_eq!(written, 2);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "old|1\ncat|4\ncat|30\n");
    }

    #[test]
    fn append_creates_missing_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("a").join("b").join("additions.txt");
        let numbers: BTreeSet<u64> = [9].into_iter().collect();
        append_associations(&path, "dog", &numbers).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "dog|9\n");
    }

    #[test]
    fn unstorable_phrases_are_rejected() {
        assert!(check_storable("a|b").is_err());
        assert!(check_storable("a\nb").is_err());
        assert!(check_storable("a b").is_ok());
    }

    #[test]
    fn missing_file_reads_as_none() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.txt");
        assert!(read_lexicon_file(&missing).unwrap().is_none());
    }
}
