//! Smoke test for keyscan: builds the calibration automaton and checks a
//! handful of lines end to end. Run with `cargo run --example smoke`.

use keyscan::calibration::{self, NUMERIC_KEYWORDS};
use keyscan::Automaton;

fn main() {
    let automaton = calibration::numeric_automaton().expect("dictionary is alphabet-clean");
    println!(
        "automaton: {} keywords, {} states",
        automaton.keyword_count(),
        automaton.state_count()
    );

    let samples = [
        ("two1nine", 29),
        ("eightwothree", 83),
        ("abcone2threexyz", 13),
        ("xtwone3four", 24),
        ("4nineeightseven2", 42),
        ("zoneight234", 14),
        ("7pqrstsixteen", 76),
    ];

    let mut total = 0;
    for (line, expected) in samples {
        let value = calibration::spelled_value(line, &automaton)
            .expect("sample lines are alphabet-clean")
            .expect("sample lines contain keywords");
        assert_eq!(value, expected, "wrong value for {line:?}");
        println!("{line:<20} -> {value}");
        total += value;
    }
    assert_eq!(total, 281);
    println!("total: {total}");

    // Every keyword is found where it is planted.
    let a = Automaton::from_keywords(NUMERIC_KEYWORDS).expect("dictionary is alphabet-clean");
    for keyword in NUMERIC_KEYWORDS {
        let text = format!("xx{keyword}yy");
        assert!(a.scan(&text).unwrap().iter().any(|m| m.keyword == keyword));
    }
    println!("all keywords located");
}
