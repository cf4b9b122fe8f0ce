//! Property-based tests for the QIF reader.
//!
//! Run with: cargo test -p qifxlat-parser --test `property_tests`

use proptest::prelude::*;
use qifxlat_core::date;
use qifxlat_parser::{read, Buffer};

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_noise() -> impl Strategy<Value = String> {
    "[!^A-Z0-9 \r\n\t$'/.,:-]{0,200}"
}

fn arb_transaction() -> impl Strategy<Value = (u32, u32, i64, String)> {
    (1u32..13, 1u32..29, -100_000i64..100_000, "[A-Za-z][A-Za-z ]{0,20}")
}

fn render(month: u32, day: u32, cents: i64, payee: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!(
        "D{month}/{day:>2}'16\r\nP{payee}\r\nT{sign}{}.{:02}\r\n^\r\n",
        cents / 100,
        cents % 100
    )
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_normalization_is_idempotent(text in arb_noise()) {
        let once = Buffer::from_text(&text);
        let twice = Buffer::from_text(once.as_str());
        prop_assert_eq!(once.as_str(), twice.as_str());
    }

    #[test]
    fn prop_normalized_lines_are_clean(text in arb_noise()) {
        let buffer = Buffer::from_text(&text);
        prop_assert!(!buffer.as_str().contains('\r'));
        for line in buffer.as_str().lines() {
            prop_assert_eq!(line, line.trim_end());
        }
        prop_assert!(buffer.is_empty() || buffer.as_str().ends_with('\n'));
    }

    #[test]
    fn prop_read_never_panics(text in arb_noise()) {
        let _ = read(&Buffer::from_text(&text));
    }

    #[test]
    fn prop_bank_transactions_round_trip(txns in prop::collection::vec(arb_transaction(), 0..30)) {
        let mut source = String::from("!Type:Bank\r\n");
        for (month, day, cents, payee) in &txns {
            source.push_str(&render(*month, *day, *cents, payee));
        }

        let result = read(&Buffer::from_text(&source)).unwrap();
        prop_assert_eq!(result.transactions.len(), txns.len());
        for (record, (month, day, _, payee)) in result.transactions.iter().zip(&txns) {
            prop_assert_eq!(&record.date, &format!("2016/{month:02}/{day:02}"));
            prop_assert_ne!(record.date.as_str(), date::INVALID_DATE);
            prop_assert_eq!(&record.payee, payee.trim_end());
        }
    }
}
