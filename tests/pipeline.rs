use std::path::PathBuf;
use std::process::Command;

use niche_parser::dataset::{self, RawDataset};
use niche_parser::record::RankingEntry;
use niche_parser::{parse_dataset, ExtractError, OutputDocument};
use serde_json::{json, Value};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/niche_small.json")
}

fn fixture() -> RawDataset {
    dataset::load(&fixture_path()).unwrap()
}

fn fixture_json() -> Value {
    serde_json::from_str(&std::fs::read_to_string(fixture_path()).unwrap()).unwrap()
}

#[test]
fn fixture_records() {
    let doc = parse_dataset(&fixture(), |_| {}).unwrap();
    let OutputDocument::Full { schools, majors, rankings, major_rankings } = doc else {
        panic!("fixture has a search index");
    };
    assert_eq!(schools.len(), 3);

    let harbor = &schools[0];
    assert_eq!(harbor.slug, "harbor-institute-of-technology");
    assert_eq!(harbor.latitude, Some(42.36));
    assert_eq!(harbor.longitude, Some(-71.09));
    assert_eq!(harbor.description, Some(json!("A research university.")));
    assert_eq!(harbor.website, Some(json!("https://harbor-institute-of-technology.edu")));
    assert_eq!(harbor.acceptance_rate, Some(json!(0.05)));
    assert_eq!(harbor.sat_range, Some(vec![1500, 1570]));
    assert_eq!(harbor.act_range, Some(vec![34.0, 36.0]));
    assert_eq!(harbor.test_requirement, Some(2));
    assert_eq!(harbor.net_price, Some(json!(17000)));
    assert_eq!(harbor.student_faculty_ratio, Some(json!(5)));
    assert_eq!(harbor.employed_after_graduation, Some(json!(0.94)));
    assert_eq!(harbor.early_decision, Some(json!("No")));
    assert_eq!(harbor.early_action, Some(json!("Yes")));
    assert_eq!(harbor.research_funding_per_student, Some(json!(98000)));
    assert_eq!(harbor.professor_salary, Some(json!(180000)));
    assert!((harbor.avg_class_size.unwrap() - 29.5).abs() < 1e-9);
    assert_eq!(harbor.rankings["best-colleges"], RankingEntry { ordinal: 1, total: 3 });
    assert_eq!(
        harbor.rankings["colleges-with-the-best-professors"],
        RankingEntry { ordinal: 3, total: 1400 }
    );
    assert!(!harbor.rankings.contains_key("best-colleges-in-new-england"));

    let ridgefield = &schools[1];
    assert_eq!(ridgefield.test_requirement, Some(1));
    assert_eq!(ridgefield.avg_class_size, None);
    assert_eq!(ridgefield.rankings["best-colleges"], RankingEntry { ordinal: 2, total: 3 });

    let lakeshore = &schools[2];
    assert_eq!(lakeshore.description, None);
    assert_eq!(lakeshore.sat_range, None);
    assert_eq!(lakeshore.act_range, None);
    assert_eq!(lakeshore.test_requirement, Some(0));
    assert!((lakeshore.avg_class_size.unwrap() - 37.0).abs() < 1e-9);
    assert_eq!(lakeshore.rankings.len(), 1);

    assert_eq!(majors, vec!["Biology", "Computer Science"]);
    assert_eq!(rankings.len(), 2);
    assert_eq!(rankings["best-colleges"].total, 3);
    assert_eq!(rankings["colleges-with-the-best-professors"].name, "Colleges with the Best Professors");
    assert_eq!(major_rankings["best-colleges-for-computer-science"].name, "Computer Science");
    assert_eq!(major_rankings["best-colleges-for-biology"].total, 700);
}

#[test]
fn output_is_byte_identical_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    let raw = fixture();
    dataset::write(&a, &parse_dataset(&raw, |_| {}).unwrap()).unwrap();
    dataset::write(&b, &parse_dataset(&fixture(), |_| {}).unwrap()).unwrap();
    assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());

    let written: Value = serde_json::from_slice(&std::fs::read(&a).unwrap()).unwrap();
    let keys: Vec<&str> = written.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["major_rankings", "majors", "rankings", "schools"]);
    assert_eq!(written["schools"][0]["rankings"]["best-colleges"], json!({"ordinal": 1, "total": 3}));
}

#[test]
fn input_without_search_index_gives_bare_list() {
    let mut raw = fixture_json();
    raw.as_object_mut().unwrap().remove("pages");
    let ds: RawDataset = serde_json::from_value(raw).unwrap();
    let doc = parse_dataset(&ds, |_| {}).unwrap();

    let v = serde_json::to_value(&doc).unwrap();
    let list = v.as_array().unwrap();
    assert_eq!(list.len(), 3);
    for rec in list {
        assert!(rec.get("latitude").is_none());
        assert!(rec.get("major_rankings").is_none());
        assert!(rec["rankings"].get("best-colleges").is_some());
    }
}

#[test]
fn school_missing_from_search_index_aborts_run() {
    let mut raw = fixture_json();
    raw["pages"][1]["entities"] = json!([]);
    let ds: RawDataset = serde_json::from_value(raw).unwrap();
    let err = parse_dataset(&ds, |_| {}).unwrap_err();
    assert!(matches!(
        err.root(),
        ExtractError::LookupNotFound { slug } if slug == "ridgefield-college"
    ));
}

#[test]
fn unreferenced_malformed_search_entities_are_ignored() {
    let mut raw = fixture_json();
    raw["pages"][1]["entities"]
        .as_array_mut()
        .unwrap()
        .push(json!({"content": {"entity": {"url": null}, "centroid": null}}));
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("niche.json");
    std::fs::write(&input, raw.to_string()).unwrap();

    let ds = dataset::load(&input).unwrap();
    let doc = parse_dataset(&ds, |_| {}).unwrap();
    assert_eq!(doc.schools().len(), 3);
    assert_eq!(doc.schools()[0].latitude, Some(42.36));
}

#[test]
fn missing_page_section_fails_to_load() {
    let mut raw = fixture_json();
    raw["schools"][2].as_object_mut().unwrap().remove("academics");
    assert!(serde_json::from_value::<RawDataset>(raw).is_err());
}

#[test]
fn cli_wrong_arity_prints_usage() {
    let out = Command::new(env!("CARGO_BIN_EXE_niche_parser"))
        .arg("only-one.json")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "usage: niche_parser <niche.json> <output.json>"
    );
}

#[test]
fn cli_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_path = dir.path().join("schools.json");
    let status = Command::new(env!("CARGO_BIN_EXE_niche_parser"))
        .arg(fixture_path())
        .arg(&out_path)
        .env("RUST_LOG", "warn")
        .status()
        .unwrap();
    assert!(status.success());

    let written: Value = serde_json::from_slice(&std::fs::read(&out_path).unwrap()).unwrap();
    assert_eq!(written["schools"].as_array().unwrap().len(), 3);
    assert_eq!(written["majors"], json!(["Biology", "Computer Science"]));
}
