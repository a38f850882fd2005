use std::sync::Arc;

use super::builder::StateId;
use super::*;
use crate::calibration::NUMERIC_KEYWORDS;
use crate::KeyscanError;

fn automaton(keywords: &[&str]) -> Automaton {
    Automaton::from_keywords(keywords).unwrap()
}

fn pairs<'a>(matches: &[Match<'a>]) -> Vec<(usize, &'a str)> {
    matches.iter().map(|m| (m.end, m.keyword)).collect()
}

#[test]
fn test_empty_dictionary() {
    let a = AutomatonBuilder::new().build();
    assert_eq!(a.state_count(), 1);
    assert_eq!(a.keyword_count(), 0);
    assert!(a.scan("abc123").unwrap().is_empty());
    assert!(a.scan("").unwrap().is_empty());
}

#[test]
fn test_single_keyword() {
    let a = automaton(&["abc"]);
    assert_eq!(pairs(&a.scan("xabcx").unwrap()), vec![(3, "abc")]);
    assert!(a.scan("ab").unwrap().is_empty());
    assert!(a.scan("axbxc").unwrap().is_empty());
}

#[test]
fn test_repeated_occurrences() {
    let a = automaton(&["aba"]);
    // Overlapping occurrences are both reported.
    assert_eq!(pairs(&a.scan("ababa").unwrap()), vec![(2, "aba"), (4, "aba")]);
}

#[test]
fn test_prefix_keyword_keeps_own_output() {
    let a = automaton(&["he", "hers"]);
    assert_eq!(
        pairs(&a.scan("hers").unwrap()),
        vec![(1, "he"), (3, "hers")]
    );
}

#[test]
fn test_overlap_same_end_position() {
    let a = automaton(&["one", "ne"]);
    let matches = pairs(&a.scan("xonex").unwrap());
    assert_eq!(matches.len(), 2);
    assert!(matches.contains(&(3, "one")));
    assert!(matches.contains(&(3, "ne")));
}

#[test]
fn test_duplicate_keyword_reported_per_insertion() {
    let mut builder = AutomatonBuilder::new();
    builder.add_keyword("one").unwrap();
    builder.add_keyword("one").unwrap();
    assert_eq!(builder.keyword_count(), 1);
    let a = builder.build();
    assert_eq!(
        pairs(&a.scan("one").unwrap()),
        vec![(2, "one"), (2, "one")]
    );
}

#[test]
fn test_empty_pattern_rejected() {
    let mut builder = AutomatonBuilder::new();
    assert_eq!(builder.add_keyword(""), Err(KeyscanError::EmptyPattern));
}

#[test]
fn test_invalid_alphabet_in_keyword() {
    let mut builder = AutomatonBuilder::new();
    assert_eq!(
        builder.add_keyword("no!"),
        Err(KeyscanError::InvalidAlphabet('!'))
    );
    assert_eq!(
        builder.add_keyword("UPPER"),
        Err(KeyscanError::InvalidAlphabet('U'))
    );
    // The rejected keywords left the trie untouched.
    builder.add_keyword("no").unwrap();
    let a = builder.build();
    assert_eq!(pairs(&a.scan("no").unwrap()), vec![(1, "no")]);
}

#[test]
fn test_invalid_alphabet_in_text() {
    let a = automaton(&["one"]);
    assert_eq!(
        a.scan("a!b").unwrap_err(),
        KeyscanError::InvalidAlphabet('!')
    );
    assert_eq!(
        a.scan_with_failures("a b").unwrap_err(),
        KeyscanError::InvalidAlphabet(' ')
    );
}

#[test]
fn test_next_move_is_total() {
    let a = Automaton::from_keywords(NUMERIC_KEYWORDS).unwrap();
    assert_eq!(a.next.len(), a.state_count() * SIGMA);
    for (i, &step) in a.next.iter().enumerate() {
        assert!(
            !step.is_none(),
            "next-move undefined for state {} symbol {}",
            i / SIGMA,
            i % SIGMA
        );
    }
}

#[test]
fn test_outputs_monotonic_along_failure_links() {
    let a = Automaton::from_keywords(NUMERIC_KEYWORDS).unwrap();
    for s in 1..a.state_count() {
        let f = a.fail[s];
        assert!(!f.is_none(), "state {s} has no failure link");
        for id in &a.outputs[f.index()] {
            assert!(
                a.outputs[s].contains(id),
                "state {s} is missing an output inherited from its failure target"
            );
        }
    }
}

#[test]
fn test_root_failure_is_unused_sentinel() {
    let a = Automaton::from_keywords(NUMERIC_KEYWORDS).unwrap();
    assert_eq!(a.fail[0], StateId::NONE);
}

#[test]
fn test_dense_and_lazy_scans_agree() {
    let a = Automaton::from_keywords(NUMERIC_KEYWORDS).unwrap();
    for text in [
        "",
        "two1nine",
        "eightwothree",
        "abcone2threexyz",
        "xtwone3four",
        "4nineeightseven2",
        "zoneight234",
        "7pqrstsixteen",
        "nothinghere",
    ] {
        assert_eq!(
            pairs(&a.scan(text).unwrap()),
            pairs(&a.scan_with_failures(text).unwrap()),
            "strategies disagree on {text:?}"
        );
    }
}

#[test]
fn test_no_false_positives() {
    let a = Automaton::from_keywords(NUMERIC_KEYWORDS).unwrap();
    for text in ["xtwone3four", "zoneight234", "4nineeightseven2"] {
        for m in a.scan(text).unwrap() {
            let start = m.end + 1 - m.keyword.len();
            assert_eq!(&text[start..=m.end], m.keyword, "bogus match in {text:?}");
        }
    }
}

#[test]
fn test_no_false_negatives() {
    let a = Automaton::from_keywords(NUMERIC_KEYWORDS).unwrap();
    for keyword in NUMERIC_KEYWORDS {
        let text = format!("qq{keyword}zz");
        let expected_end = 2 + keyword.len() - 1;
        let matches = a.scan(&text).unwrap();
        assert!(
            matches
                .iter()
                .any(|m| m.end == expected_end && m.keyword == keyword),
            "missed {keyword:?} in {text:?}"
        );
    }
}

#[test]
fn test_end_to_end_example() {
    let a = Automaton::from_keywords(NUMERIC_KEYWORDS).unwrap();
    assert_eq!(
        pairs(&a.scan("two1nine").unwrap()),
        vec![(2, "two"), (3, "1"), (7, "nine")]
    );
}

#[test]
fn test_build_is_idempotent() {
    // Same dictionary in two insertion orders; state numbering may differ
    // but scan results must not.
    let forward = Automaton::from_keywords(NUMERIC_KEYWORDS).unwrap();
    let mut reversed_keywords = NUMERIC_KEYWORDS;
    reversed_keywords.reverse();
    let reversed = Automaton::from_keywords(reversed_keywords).unwrap();

    for text in ["two1nine", "eightwothree", "xtwone3four", "zoneight234"] {
        let mut a = pairs(&forward.scan(text).unwrap());
        let mut b = pairs(&reversed.scan(text).unwrap());
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b, "builds disagree on {text:?}");
    }
}

#[test]
fn test_scan_into_reuses_buffer() {
    let a = automaton(&["ab"]);
    let mut matches = Vec::new();
    a.scan_into("abab", &mut matches).unwrap();
    assert_eq!(matches.len(), 2);
    // Caller owns clearing; a second line appends.
    a.scan_into("ab", &mut matches).unwrap();
    assert_eq!(matches.len(), 3);
}

#[test]
fn test_concurrent_scans_share_one_automaton() {
    let a = Arc::new(Automaton::from_keywords(NUMERIC_KEYWORDS).unwrap());
    let mut handles = Vec::new();
    for _ in 0..4 {
        let a = Arc::clone(&a);
        handles.push(std::thread::spawn(move || {
            let mut total = 0;
            for _ in 0..100 {
                total += a.scan("two1nine").unwrap().len();
            }
            total
        }));
    }
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 300);
    }
}
