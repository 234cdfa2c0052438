use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use alma_plot::cli::{Cli, Commands, GenerateArgs, PostProcessArgs};
use alma_plot::config::VizConfig;
use alma_plot::ctx::Ctx;
use alma_plot::io;
use alma_plot::pipeline::Pipeline;
use alma_plot::postprocess::{PostProcessOptions, post_process_file};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(args)?,
        Commands::PostProcess(args) => run_post_process(args)?,
    }

    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => VizConfig::load(path)?,
        None => VizConfig::default(),
    };
    if !args.columns.is_empty() {
        config.facet_columns = args.columns.clone();
    }
    if let Some(title) = args.title {
        config.title = title;
    }

    let mut ctx = Ctx::new(
        args.input,
        args.out,
        config,
        args.test_sample,
        args.json,
        env!("CARGO_PKG_VERSION"),
    );
    Pipeline::generate().run(&mut ctx)?;

    print_summary(&ctx)
}

fn run_post_process(args: PostProcessArgs) -> Result<()> {
    let mut opts = PostProcessOptions::default();
    if let Some(title) = args.title {
        opts.title = title;
    }
    if let Some(heading) = args.heading {
        opts.heading = heading;
    }
    if let Some(path) = &args.stylesheet {
        opts.stylesheet = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read stylesheet {}", path.display()))?;
    }
    if let Some(id) = args.container_id {
        opts.container_id = id;
    }
    if !args.links.is_empty() {
        opts.links = args.links;
    }
    if let Some(footer) = args.footer {
        opts.footer = footer;
    }

    post_process_file(&args.input, &args.output, &opts)?;
    println!("post-processed {} -> {}", args.input.display(), args.output.display());
    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
    Ok(())
}
