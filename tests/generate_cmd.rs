use std::path::Path;

use assert_cmd::Command;
use serde_json::Value;

const HEADER: &str = "Sample,PaCMAP 1 of 2,PaCMAP 2 of 2,P(Death) at 5y,Vital Status at 5y,\
AL Epigenomic Subtype,WHO 2022 Diagnosis,Hematopoietic Entity,Vital Status,AML Epigenomic Risk,\
Risk Group AAML1831,Clinical Trial,Race or ethnic group,Age (group years)";

fn write_table(dir: &Path) -> std::path::PathBuf {
    let rows = [
        "S1,1.0,2.0,0.20,Alive,MLL,AML,AML,Alive,Low,Low Risk,AAML1031,White,<5",
        "S2,-1.0,3.5,0.50,Dead,MLL,AML,AML,Dead,High,High Risk,AAML1031,White,5-10",
        "S3,10.0,-4.0,0.50,,CBF,AML,AML,NA,High,Low Risk,AAML0531,Black,10-15",
        "S4,-20.0,8.0,0.80,Dead,T-ALL,ALL,ALL,Dead,NA,NA,NA,Asian,>15",
    ];
    let path = dir.join("alma.csv");
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).unwrap();
    path
}

fn embedded_payload(html: &str) -> Value {
    let open = "<script type=\"application/json\" id=\"alma-data\">";
    let start = html.find(open).unwrap() + open.len();
    let len = html[start..].find("</script>").unwrap();
    serde_json::from_str(&html[start..start + len]).unwrap()
}

#[test]
fn generate_writes_document_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_table(dir.path());
    let out = dir.path().join("out");

    Command::cargo_bin("alma-plot")
        .unwrap()
        .args(["generate", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--json")
        .assert()
        .success();

    let html = std::fs::read_to_string(out.join("index.html")).unwrap();
    assert!(html.contains("data-alma-root=\"true\""));
    assert!(html.contains("AlmaViewer.mount({\"root_id\":\"alma-root-"));

    let doc = embedded_payload(&html);
    assert_eq!(doc["tool"], "alma-plot");
    assert_eq!(doc["scatter"].as_array().unwrap().len(), 9);
    assert_eq!(doc["scatter"][0]["column"], "AL Epigenomic Subtype");
    assert_eq!(doc["histogram"]["edges"].as_array().unwrap().len(), 51);
    let binned: u64 = doc["histogram"]["initial"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_u64().unwrap())
        .sum();
    assert_eq!(binned, 4);
    assert_eq!(doc["risk"]["points"].as_array().unwrap().len(), 3);
    assert!(doc["rows"]["percentile"][2].is_null());

    let summary: Value =
        serde_json::from_str(&std::fs::read_to_string(out.join("alma_summary.json")).unwrap())
            .unwrap();
    assert_eq!(summary["input"]["n_rows"], 4);
    assert_eq!(summary["input"]["n_with_outcome"], 3);
    assert_eq!(summary["categories"]["Hematopoietic Entity"]["AML"], 3);
    let breakdown = summary["breakdown"].as_array().unwrap();
    assert_eq!(breakdown[0]["partition"], "White");
    assert_eq!(breakdown[0]["counts"], serde_json::json!([1, 1]));
    assert_eq!(breakdown[2]["other"], 1);
}

#[test]
fn same_input_renders_same_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_table(dir.path());
    let mut pages = Vec::new();
    for name in ["a", "b"] {
        let out = dir.path().join(name);
        Command::cargo_bin("alma-plot")
            .unwrap()
            .args(["generate", "--input"])
            .arg(&input)
            .arg("--out")
            .arg(&out)
            .assert()
            .success();
        pages.push(std::fs::read_to_string(out.join("index.html")).unwrap());
    }
    assert_eq!(pages[0], pages[1]);
}

#[test]
fn generate_then_post_process() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_table(dir.path());
    let out = dir.path().join("out");
    let page = dir.path().join("page.html");

    Command::cargo_bin("alma-plot")
        .unwrap()
        .args(["generate", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .args(["--column", "WHO 2022 Diagnosis", "--title", "ALMA test"])
        .assert()
        .success();

    Command::cargo_bin("alma-plot")
        .unwrap()
        .args(["post-process", "--input"])
        .arg(out.join("index.html"))
        .arg("--output")
        .arg(&page)
        .args(["--container-id", "alma-page"])
        .assert()
        .success();

    let html = std::fs::read_to_string(&page).unwrap();
    assert!(html.contains("<div id=\"alma-page\" class=\"alma-container\">"));
    assert!(html.contains("AlmaViewer.mount({\"root_id\":\"alma-page\""));
    assert!(!html.contains("data-alma-root"));
    let doc = embedded_payload(&html);
    assert_eq!(doc["title"], "ALMA test");
    assert_eq!(doc["scatter"].as_array().unwrap().len(), 1);
}

#[test]
fn test_sample_is_highlighted() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_table(dir.path());
    let out = dir.path().join("out");
    let config = dir.path().join("plot.json");
    std::fs::write(&config, r#"{"sample_id_column": "Sample"}"#).unwrap();

    Command::cargo_bin("alma-plot")
        .unwrap()
        .args(["generate", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--config")
        .arg(&config)
        .args(["--test-sample", "S3"])
        .assert()
        .success();

    let doc = embedded_payload(&std::fs::read_to_string(out.join("index.html")).unwrap());
    assert_eq!(doc["highlight"]["row"], 2);
    assert_eq!(doc["highlight"]["label"], "S3");
}

#[test]
fn missing_column_fails_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    std::fs::write(&input, "PaCMAP 1 of 2,PaCMAP 2 of 2\n0,0\n").unwrap();
    let out = dir.path().join("out");

    Command::cargo_bin("alma-plot")
        .unwrap()
        .args(["generate", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .assert()
        .failure();
    assert!(!out.join("index.html").exists());
}

#[test]
fn post_process_without_marker_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.html");
    let output = dir.path().join("page.html");
    std::fs::write(&input, "<html><head></head><body></body></html>").unwrap();

    Command::cargo_bin("alma-plot")
        .unwrap()
        .args(["post-process", "--input"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure();
    assert!(!output.exists());
}
