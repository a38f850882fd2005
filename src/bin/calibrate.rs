//! Calibration driver: reads lines from stdin until end-of-stream and
//! prints both calibration totals.

use std::io::{self, BufRead};

use anyhow::Context;
use tracing::debug;

use keyscan::calibration;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let automaton = calibration::numeric_automaton()?;
    debug!(
        states = automaton.state_count(),
        keywords = automaton.keyword_count(),
        "automaton built"
    );

    let mut digits_total: u64 = 0;
    let mut spelled_total: u64 = 0;
    let mut lines = 0u64;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        lines += 1;
        if let Some(value) = calibration::digits_value(&line) {
            digits_total += u64::from(value);
        }
        let spelled = calibration::spelled_value(&line, &automaton)
            .with_context(|| format!("scanning line {lines}"))?;
        if let Some(value) = spelled {
            spelled_total += u64::from(value);
        }
    }

    debug!(lines, "input exhausted");
    println!("The result of part one is: {digits_total}");
    println!("The result of part two is: {spelled_total}");
    Ok(())
}
