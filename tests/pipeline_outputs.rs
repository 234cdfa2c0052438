use std::path::PathBuf;

use alma_plot::config::VizConfig;
use alma_plot::ctx::Ctx;
use alma_plot::io::html_writer::{render_html, root_id_for};
use alma_plot::io::summary::format_summary;
use alma_plot::pipeline::Pipeline;

const TSV: &str = "\
PaCMAP 1 of 2\tPaCMAP 2 of 2\tP(Death) at 5y\tVital Status at 5y\tHematopoietic Entity
0.5\t0.5\t0.10\tAlive\tAML
1.5\t-2.0\t0.30\tDead\tAML
-3.0\t4.0\t0.60\tAlive\tALL
";

fn run(dir: &std::path::Path) -> Ctx {
    let input = dir.join("alma.tsv");
    std::fs::write(&input, TSV).unwrap();
    let config = VizConfig {
        facet_columns: vec!["Hematopoietic Entity".to_string()],
        breakdown: None,
        ..VizConfig::default()
    };
    let mut ctx = Ctx::new(
        input,
        dir.join("out"),
        config,
        None,
        false,
        "0.0.0-test",
    );
    Pipeline::generate().run(&mut ctx).unwrap();
    ctx
}

#[test]
fn pipeline_fills_context() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = run(dir.path());

    let ds = ctx.dataset().unwrap();
    assert_eq!(ds.percentile, vec![Some(0.0), Some(1.0 / 3.0), Some(2.0 / 3.0)]);
    assert_eq!(ctx.scatter_views.len(), 1);
    assert_eq!(ctx.histogram.as_ref().unwrap().total(), 2);
    assert!(ctx.breakdown.is_none());
    assert!(ctx.warnings.iter().any(|w| w.contains("outside the histogram range")));
    assert!(ctx.output.html_path.exists());
    assert!(!ctx.output.json_path.exists());

    let doc = ctx.document.as_ref().unwrap();
    assert_eq!(doc.risk.bands[0].label, "Low Risk");
    assert_eq!(doc.risk.bands[1].lo, 0.5);
    assert!(doc.breakdown.is_none());
}

#[test]
fn root_id_is_derived_from_payload() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = run(dir.path());
    let doc = ctx.document.as_ref().unwrap();

    let payload = serde_json::to_string(doc).unwrap();
    let id = root_id_for(&payload);
    assert!(id.starts_with("alma-root-"));
    assert_eq!(id.len(), "alma-root-".len() + 16);

    let html = render_html(doc).unwrap();
    assert!(html.contains(&format!("<div id=\"{}\"", id)));

    let mut retitled = doc.clone();
    retitled.title = "Other".to_string();
    assert_ne!(root_id_for(&serde_json::to_string(&retitled).unwrap()), id);
}

#[test]
fn summary_text_lists_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = run(dir.path());
    let text = format_summary(&ctx).unwrap();
    assert!(text.starts_with("alma-plot v0.0.0-test\n"));
    assert!(text.contains("Input: 3 rows, 3 with known outcome"));
    assert!(text.contains("Maps: Hematopoietic Entity (2)"));
    assert!(text.contains("Histogram: 50 bins, 2 rows binned"));
    assert!(!text.contains("Breakdown:"));
    assert!(text.contains(&PathBuf::from("out").join("index.html").display().to_string()));
}

#[test]
fn failed_summary_leaves_no_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("alma.tsv");
    std::fs::write(&input, TSV).unwrap();
    let out = dir.path().join("out");
    // A directory where the summary file should go makes its write fail.
    std::fs::create_dir_all(out.join("alma_summary.json")).unwrap();

    let config = VizConfig {
        facet_columns: vec!["Hematopoietic Entity".to_string()],
        breakdown: None,
        ..VizConfig::default()
    };
    let mut ctx = Ctx::new(input, out.clone(), config, None, true, "0.0.0-test");
    assert!(Pipeline::generate().run(&mut ctx).is_err());
    assert!(!out.join("index.html").exists());
    assert!(ctx.document.is_none());
}

#[test]
fn missing_risk_rows_stay_on_maps_only() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("alma.tsv");
    let tsv = format!("{}9.0\t9.0\tNA\tDead\tALL\n", TSV);
    std::fs::write(&input, tsv).unwrap();
    let config = VizConfig {
        facet_columns: vec!["Hematopoietic Entity".to_string()],
        breakdown: None,
        ..VizConfig::default()
    };
    let mut ctx = Ctx::new(input, dir.path().join("out"), config, None, false, "0.0.0-test");
    Pipeline::generate().run(&mut ctx).unwrap();

    let ds = ctx.dataset().unwrap();
    assert_eq!(ds.len(), 4);
    assert_eq!(ds.percentile[3], None);
    assert_eq!(ctx.histogram.as_ref().unwrap().total(), 2);
    let entity = &ctx.scatter_views[0];
    assert_eq!(entity.layers[1].rows, vec![2, 3]);

    let doc = ctx.document.as_ref().unwrap();
    assert_eq!(doc.rows.risk[3], None);
    assert!(doc.risk.points.iter().all(|p| p.0 != 3));
    assert!(ctx.warnings.iter().any(|w| w.contains("1 rows have no")));
    // Only the 0.10 row is outside the range; the missing one is not counted there.
    assert!(ctx.warnings.iter().any(|w| w.starts_with("1 rows fall outside")));
}

#[test]
fn unknown_test_sample_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("alma.tsv");
    std::fs::write(&input, TSV).unwrap();
    let config = VizConfig {
        facet_columns: vec!["Hematopoietic Entity".to_string()],
        breakdown: None,
        sample_id_column: Some("Hematopoietic Entity".to_string()),
        ..VizConfig::default()
    };
    let mut ctx = Ctx::new(
        input,
        dir.path().join("out"),
        config,
        Some("nope".to_string()),
        false,
        "0.0.0-test",
    );
    let err = Pipeline::generate().run(&mut ctx).unwrap_err();
    assert!(err.to_string().contains("nope"));
}
