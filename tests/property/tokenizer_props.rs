//! Property-based tests for the record tokenizer
//!
//! Checks how lines built from generated fields split back into records.

use proptest::prelude::*;

use export_unpack::export::{tokenize, Diagnostic, FieldName};

/// Strategy for numeric-looking fields that never contain a comma
fn numeric_field_strategy() -> impl Strategy<Value = String> {
    "[0-9]{1,12}".prop_map(|s| s)
}

/// Strategy for unquoted keys: no comma, and not starting with a quote
fn plain_key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9_ .:-][a-zA-Z0-9_ .:'-]{0,20}".prop_map(|s| s),
    ]
}

/// Strategy for unquoted values: anything but a leading quote or line breaks
fn plain_value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9 ,{}\":\\[\\]][a-zA-Z0-9 ,{}\":'\\[\\]]{0,40}".prop_map(|s| s),
        Just(r#"{"temperature": 23.5, "humidity": 65}"#.to_string()),
    ]
}

/// Strategy for quoted key content: may hold commas and quotes, never `',`
fn quoted_key_content_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,]{0,20}".prop_map(|s| s)
}

/// Strategy for quoted value content without any quote character
fn quoted_value_content_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ,{}\":]{0,40}".prop_map(|s| s)
}

fn terminator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("\n"), Just("\r\n"), Just("")]
}

proptest! {
    /// Unquoted lines split back into exactly the fields they were built from.
    #[test]
    fn prop_plain_fields_reconstruct_line(
        partition in numeric_field_strategy(),
        offset in numeric_field_strategy(),
        timestamp in numeric_field_strategy(),
        key in plain_key_strategy(),
        value in plain_value_strategy(),
        terminator in terminator_strategy(),
    ) {
        let logical = format!("{partition},{offset},{timestamp},{key},{value}");
        let line = format!("{logical}{terminator}");

        let tokenized = tokenize(line.as_bytes());
        let record = tokenized.record;

        let rebuilt = [
            record.partition.as_slice(),
            record.offset.as_slice(),
            record.timestamp.as_slice(),
            record.key.as_slice(),
            record.value.as_slice(),
        ]
        .join(&b","[..]);
        prop_assert_eq!(rebuilt, logical.into_bytes());
        prop_assert!(tokenized.diagnostics.is_empty());
    }

    /// Quote-wrapped keys and values lose exactly their wrapping quotes.
    #[test]
    fn prop_quoted_fields_are_unwrapped(
        key in quoted_key_content_strategy(),
        value in quoted_value_content_strategy(),
        terminator in terminator_strategy(),
    ) {
        let line = format!("0,1,2,'{key}','{value}'{terminator}");

        let tokenized = tokenize(line.as_bytes());

        prop_assert_eq!(tokenized.record.key, key.into_bytes());
        prop_assert_eq!(tokenized.record.value, value.into_bytes());
        prop_assert!(tokenized.diagnostics.is_empty());
    }

    /// A quoted value is cut at its last quote; a long tail is always reported.
    #[test]
    fn prop_value_cut_at_last_quote(
        head in "[a-z ]{0,10}",
        tail in "[a-z ]{0,10}",
    ) {
        let line = format!("0,1,2,k,'{head}'{tail}\n");

        let tokenized = tokenize(line.as_bytes());

        prop_assert_eq!(tokenized.record.value, head.into_bytes());
        let reported = tokenized
            .diagnostics
            .contains(&Diagnostic::UnexpectedClosingQuote { trailing: tail.len() + 1 });
        prop_assert_eq!(reported, tail.len() + 1 > 2);
    }

    /// Arbitrary bytes never panic and never produce fields longer than the line.
    #[test]
    fn prop_arbitrary_bytes_are_tokenized(line in prop::collection::vec(any::<u8>(), 8..200)) {
        let tokenized = tokenize(&line);
        let record = &tokenized.record;
        let total = record.partition.len()
            + record.offset.len()
            + record.timestamp.len()
            + record.key.len()
            + record.value.len();
        prop_assert!(total <= line.len());
    }

    /// An empty leading field is always reported.
    #[test]
    fn prop_empty_partition_is_reported(rest in "[0-9]{1,5},[0-9]{1,5},k,v") {
        let line = format!(",{rest}\n");
        let tokenized = tokenize(line.as_bytes());
        prop_assert!(tokenized.record.partition.is_empty());
        prop_assert!(tokenized
            .diagnostics
            .contains(&Diagnostic::EmptyField(FieldName::Partition)));
    }
}
