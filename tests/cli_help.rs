use assert_cmd::Command;
use clap::Parser;

use alma_plot::cli::{Cli, Commands};
use alma_plot::postprocess::NavLink;

#[test]
fn cli_help_smoke() {
    let mut cmd = Command::cargo_bin("alma-plot").unwrap();
    cmd.arg("--help");
    cmd.assert().success();
}

#[test]
fn generate_collects_repeated_columns() {
    let cli = Cli::parse_from([
        "alma-plot",
        "generate",
        "--input",
        "alma.csv",
        "--out",
        "out",
        "--column",
        "WHO 2022 Diagnosis",
        "--column",
        "Clinical Trial",
        "--json",
    ]);
    match cli.command {
        Commands::Generate(args) => {
            assert_eq!(args.columns, vec!["WHO 2022 Diagnosis", "Clinical Trial"]);
            assert!(args.json);
            assert!(args.config.is_none());
        }
        _ => panic!("expected generate command"),
    }
}

#[test]
fn post_process_parses_links() {
    let cli = Cli::parse_from([
        "alma-plot",
        "post-process",
        "--input",
        "index.html",
        "--output",
        "page.html",
        "--link",
        "Home=https://example.org",
    ]);
    match cli.command {
        Commands::PostProcess(args) => {
            assert_eq!(args.links, vec![NavLink::new("Home", "https://example.org")]);
        }
        _ => panic!("expected post-process command"),
    }
}

#[test]
fn malformed_link_is_rejected() {
    let res = Cli::try_parse_from([
        "alma-plot",
        "post-process",
        "--input",
        "index.html",
        "--output",
        "page.html",
        "--link",
        "no-separator",
    ]);
    assert!(res.is_err());
}
