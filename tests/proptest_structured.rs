use std::fs;
use std::path::Path;

use layerscene::export::export_document;
use layerscene::oracle::truncate;
use layerscene::svg::{parse_dimension, parse_svg_str};
use layerscene::{OutputFormat, RunConfig};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

mod common;

use common::{svg_with_layers, ScriptedOracle};

fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config
}

fn arb_item() -> impl Strategy<Value = (Option<String>, Option<bool>, (f64, f64, f64, f64))> {
    (
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of(any::<bool>()),
        (
            -1000.0f64..1000.0,
            -1000.0f64..1000.0,
            0.0f64..500.0,
            0.0f64..500.0,
        ),
    )
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn structured_list_has_one_entry_per_child_and_no_trailing_separator(
        items in proptest::collection::vec(arb_item(), 0..12)
    ) {
        let mut oracle = ScriptedOracle::new();
        let mut rects = Vec::new();
        for (index, (name, active, (x, y, w, h))) in items.iter().enumerate() {
            let id = format!("item{index}");
            let mut attrs = format!("id=\"{id}\"");
            if let Some(name) = name {
                attrs.push_str(&format!(" name=\"{name}\""));
            }
            if let Some(active) = active {
                attrs.push_str(&format!(" active=\"{}\"", u8::from(*active)));
            }
            rects.push(attrs);
            oracle = oracle.item(&id, *x, *y, *w, *h);
        }

        let svg = svg_with_layers("320px", "240px", &[("Level", rects)]);
        let doc = parse_svg_str(&svg, Path::new("level.svg")).expect("parse svg");

        let temp = tempfile::tempdir().expect("create temp dir");
        let mut config = RunConfig::new("level.svg");
        config.output_dir = temp.path().to_path_buf();
        config.format = OutputFormat::Structured;

        let report = export_document(&doc, &config, &oracle).expect("export");
        let out = fs::read_to_string(temp.path().join("Level.json")).expect("read output");

        let n = items.len();
        prop_assert_eq!(report.layers[0].items, n);
        prop_assert_eq!(out.matches("{ \"name\": ").count(), n);
        prop_assert_eq!(out.matches(" },\n").count(), n.saturating_sub(1));
        prop_assert!(!out.contains(",\n]"));
        prop_assert!(out.ends_with("] }"), "output does not end with closing brace: {:?}", out);
        prop_assert!(out.starts_with("window.Level = { \"width\": \"320\", \"height\": \"240\""), "unexpected output header: {:?}", out);

        for (index, (name, active, (x, ..))) in items.iter().enumerate() {
            let line = out.lines().nth(index + 1).expect("item line");
            let expected_name = format!("\"name\": \"{}\"", name.as_deref().unwrap_or(""));
            prop_assert!(line.contains(&expected_name));
            let expected_x = format!("\"x\": \"{}\"", truncate(*x));
            prop_assert!(line.contains(&expected_x));
            let expected_active = format!(
                "\"active\": \"{}\"",
                active.map(u8::from).unwrap_or(1)
            );
            prop_assert!(line.contains(&expected_active));
        }
    }

    #[test]
    fn dimension_with_unit_suffix_parses_to_integer(
        value in 0i64..1_000_000,
        unit in prop::sample::select(vec!["px", "mm", "pt", "cm", "in", "pc"])
    ) {
        prop_assert_eq!(parse_dimension(&format!("{value}{unit}")), Some(value));
    }

    #[test]
    fn truncation_never_rounds_away_from_zero(value in -1.0e9f64..1.0e9) {
        let truncated = truncate(value);
        prop_assert!((truncated as f64).abs() <= value.abs());
        prop_assert!((value - truncated as f64).abs() < 1.0);
    }
}
