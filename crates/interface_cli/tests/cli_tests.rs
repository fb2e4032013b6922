//! Tests for the totals command
//!
//! Run the command against in-memory readers and writers.

use interface_cli::{execute, read_payload, CliConfig, CliError, Input, OutputMode};
use serde_json::{json, Value};
use std::io::Cursor;
use std::path::PathBuf;
use test_utils::PayloadFixtures;

fn run(payload: &Value, mode: OutputMode, config: &CliConfig) -> String {
    let mut out = Vec::new();
    execute(payload, mode, config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

mod json_output {
    use super::*;

    #[test]
    fn test_reference_payload() {
        let text = run(
            &PayloadFixtures::two_rates_with_discount(),
            OutputMode::Json,
            &CliConfig::default(),
        );
        let output: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(output["currency"], "EUR");
        assert_eq!(output["netTotal"], "250.00");
        assert_eq!(output["discountAmount"], "25.00");
        assert_eq!(output["netAfterDiscount"], "225.00");
        assert_eq!(output["vatAmounts"], json!({"19": "34.20", "7": "3.15"}));
        assert_eq!(output["totalVat"], "37.35");
        assert_eq!(output["grossTotal"], "262.35");
    }

    #[test]
    fn test_empty_object_prints_zero_totals() {
        let text = run(&json!({}), OutputMode::Json, &CliConfig::default());
        let output: Value = serde_json::from_str(&text).unwrap();

        assert_eq!(output["grossTotal"], "0.00");
        assert_eq!(output["vatAmounts"], json!({}));
    }

    #[test]
    fn test_config_changes_default_rate() {
        let config = CliConfig::from_vars([("PAYBILL_DEFAULT_TAX_RATE", "7")]).unwrap();
        let payload = json!({"lines": [{"quantity": 1, "unitPrice": 100}]});
        let output: Value =
            serde_json::from_str(&run(&payload, OutputMode::Json, &config)).unwrap();

        assert_eq!(output["vatAmounts"], json!({"7": "7.00"}));
    }
}

mod document_output {
    use super::*;

    #[test]
    fn test_german_document() {
        let text = run(
            &PayloadFixtures::two_rates_with_discount(),
            OutputMode::Document,
            &CliConfig::default(),
        );

        assert!(text.starts_with("INV-2026-0001\n"));
        assert!(text.contains("Consulting"));
        assert!(text.contains("Rabatt (10 %)"));
        assert!(text.contains("MwSt. 7 %"));
        assert!(text.trim_end().ends_with("262,35 €"));
    }

    #[test]
    fn test_english_document() {
        let config = CliConfig::from_vars([("PAYBILL_LOCALE", "en")]).unwrap();
        let text = run(
            &PayloadFixtures::two_rates_with_discount(),
            OutputMode::Document,
            &config,
        );

        assert!(text.contains("VAT 19%"));
        assert!(text.trim_end().ends_with("€262.35"));
    }
}

mod input {
    use super::*;

    #[test]
    fn test_reads_json() {
        let payload = read_payload(Cursor::new(r#"{"lines": []}"#), &Input::Stdin).unwrap();
        assert_eq!(payload, json!({"lines": []}));
    }

    #[test]
    fn test_rejects_non_json() {
        let err = read_payload(Cursor::new("lines: []"), &Input::Stdin).unwrap_err();
        assert!(matches!(err, CliError::Json(_)));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_read_failure_names_the_file() {
        let bytes: &[u8] = &[0xff, 0xfe, 0x00];
        let input = Input::File(PathBuf::from("broken.json"));
        let err = read_payload(Cursor::new(bytes), &input).unwrap_err();

        assert!(matches!(err, CliError::Input { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
