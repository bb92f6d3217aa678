use crate::aggregate::{UnfoldOutcome, Unfolding};
use crate::connect::{ConnectOutcome, NumberConnections};
use crate::engine::{ResonanceResult, TaggedNumber};
use resonance_lexicon::LexiconMatch;

const SEQUENCE_WIDTH: usize = 58;

/// Markdown summary of one result: cipher values, initial number,
/// unfolding steps, final sequence and lexicon resonances.
pub fn render_report(result: &ResonanceResult) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Resonance report: `{}`\n\n", result.text));

    if result.is_empty() {
        md.push_str("No letters to resonate; nothing was unfolded.\n");
        return md;
    }

    md.push_str("## Ciphers\n\n");
    md.push_str("| cipher | value | tags |\n");
    md.push_str("|---|---:|---|\n");
    for reading in &result.readings {
        let (label, value, marker) = (&reading.label, reading.value, reading.tags.marker());
        md.push_str(&format!("| {label} | `{value}` | {marker} |\n"));
    }
    md.push('\n');

    md.push_str("## Initial number\n\n");
    md.push_str(&format!("- Concatenated: `{}`\n\n", result.initial.digits));

    md.push_str("## Unfoldings\n\n");
    render_unfolding(&mut md, &result.initial_unfolding);
    for unfolding in &result.unfoldings {
        render_unfolding(&mut md, unfolding);
    }

    md.push_str("## Final resonance sequence\n\n");
    if result.prime_only {
        let count = result.numbers.len();
        md.push_str(&format!("- Prime resonances only: {count} number(s)\n\n"));
    }
    if result.numbers.is_empty() {
        md.push_str("No final resonance numbers were generated.\n\n");
    } else {
        md.push_str("```text\n");
        for line in wrap_sequence(&result.numbers, SEQUENCE_WIDTH) {
            md.push_str(&line);
            md.push('\n');
        }
        md.push_str("```\n\n");
        md.push_str("[P]rime, [S]quare, P[A]lindrome\n\n");
    }

    if !result.matches.is_empty() {
        md.push_str("## Lexicon resonances\n\n");
        for entry in &result.matches {
            let number = entry.number;
            let tags = TaggedNumber::new(number).tags.marker();
            match &entry.outcome {
                LexiconMatch::Found { selection } if !selection.is_empty() => {
                    let phrases = selection.phrases().collect::<Vec<_>>().join(", ");
                    md.push_str(&format!("- `{number}`{tags}: {phrases}\n"));
                }
                LexiconMatch::Found { .. } => {
                    md.push_str(&format!("- `{number}`{tags}: No phrases within quotas.\n"));
                }
                LexiconMatch::NoPhrases => {
                    md.push_str(&format!("- `{number}`{tags}: No phrases found.\n"));
                }
            }
        }
        md.push('\n');
    }

    md
}

/// Markdown listing of a connection pass: each drawn phrase with its score
/// and the phrases filed under that score.
pub fn render_connections(result: &NumberConnections) -> String {
    let mut md = String::new();
    md.push_str(&format!("# Connections for `{}`\n\n", result.number));
    let connections = match &result.outcome {
        ConnectOutcome::Found { connections } => connections,
        ConnectOutcome::NoPhrases => {
            md.push_str("No phrases found.\n");
            return md;
        }
    };
    md.push_str(&format!("Scored with `{}`.\n\n", result.cipher));
    for connection in connections {
        let (phrase, value) = (&connection.phrase, connection.value);
        let connected = if connection.connected.is_empty() {
            "None".to_string()
        } else {
            connection.connected.join(", ")
        };
        md.push_str(&format!("- {phrase}: `{value}` -> {connected}\n"));
    }
    md
}

fn render_unfolding(md: &mut String, unfolding: &Unfolding) {
    let Unfolding { label, input, .. } = unfolding;
    md.push_str(&format!("### {label} (`{input}`)\n\n"));
    if let Some(converted) = &unfolding.converted {
        md.push_str(&format!("- Base converted: `{converted}`\n"));
    }
    match &unfolding.outcome {
        UnfoldOutcome::Unfolded(trace) if trace.is_empty() => {
            md.push_str("- No factorization chain generated.\n");
        }
        UnfoldOutcome::Unfolded(trace) => {
            md.push_str("| step | value | base36 |\n");
            md.push_str("|---:|---:|---|\n");
            for (idx, (value, code)) in trace.chain.iter().zip(&trace.codes).enumerate() {
                md.push_str(&format!("| {} | {value} | `{code}` |\n", idx + 1));
            }
        }
        UnfoldOutcome::TooLarge => md.push_str("- Too large to unfold.\n"),
        UnfoldOutcome::NothingToUnfold => md.push_str("- No valid number to unfold.\n"),
    }
    md.push('\n');
}

fn wrap_sequence(numbers: &[TaggedNumber], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for number in numbers {
        let item = format!("{}{}", number.value, number.tags.marker());
        if !line.is_empty() && line.len() + 1 + item.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&item);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connect::Connection;
    use pretty_assertions::assert_eq;
    use resonance_cipher::CipherValue;

    #[test]
    fn sequence_wraps_at_width() {
        let numbers: Vec<TaggedNumber> =
            [2, 4, 10, 11].into_iter().map(TaggedNumber::new).collect();
        assert_eq!(wrap_sequence(&numbers, 58), ["2[PA] 4[SA] 10 11[PA]"]);
        assert_eq!(wrap_sequence(&numbers, 12), ["2[PA] 4[SA]", "10 11[PA]"]);
        assert!(wrap_sequence(&[], 58).is_empty());
    }

    #[test]
    fn empty_result_renders_a_notice() {
        let report = render_report(&ResonanceResult::empty("123"));
        assert!(report.starts_with("# Resonance report: `123`"));
        assert!(report.contains("No letters to resonate"));
        assert!(!report.contains("## Unfoldings"));
    }

    #[test]
    fn connections_list_scores_and_phrases() {
        let found = NumberConnections {
            number: 7,
            cipher: "gemini-resonance".to_string(),
            outcome: ConnectOutcome::Found {
                connections: vec![
                    Connection {
                        phrase: "cat".to_string(),
                        value: CipherValue::Integer(226),
                        connected: vec!["feline".to_string(), "kitten".to_string()],
                    },
                    Connection {
                        phrase: "dog".to_string(),
                        value: CipherValue::Integer(156),
                        connected: Vec::new(),
                    },
                ],
            },
        };
        let report = render_connections(&found);
        assert!(report.starts_with("# Connections for `7`"));
        assert!(report.contains("- cat: `226` -> feline, kitten\n"));
        assert!(report.contains("- dog: `156` -> None\n"));

        let missing = NumberConnections {
            number: 8,
            cipher: "gemini-resonance".to_string(),
            outcome: ConnectOutcome::NoPhrases,
        };
        assert_eq!(
            render_connections(&missing),
            "# Connections for `8`\n\nNo phrases found.\n"
        );
    }
}
