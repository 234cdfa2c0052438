use anyhow::Result;
use std::fs;
use tracing::{info, warn};

use crate::ctx::Ctx;
use crate::io::{html_writer, json_writer, write_text};
use crate::pipeline::Stage;

pub struct Stage5Output;

impl Stage5Output {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Stage5Output {
    fn name(&self) -> &'static str {
        "stage5_output"
    }

    fn run(&self, ctx: &mut Ctx) -> Result<()> {
        // Everything is rendered before the first file is created.
        let doc = html_writer::build_document(ctx)?;
        let html = html_writer::render_html(&doc)?;
        let summary = if ctx.write_json {
            Some(json_writer::render_summary_json(ctx)?)
        } else {
            None
        };

        write_text(&ctx.output.html_path, &html)?;
        info!(path = %ctx.output.html_path.display(), "document_written");

        if let Some(summary) = summary {
            if let Err(err) = write_text(&ctx.output.json_path, &summary) {
                if let Err(rm) = fs::remove_file(&ctx.output.html_path) {
                    warn!(
                        path = %ctx.output.html_path.display(),
                        error = %rm,
                        "partial document not removed"
                    );
                }
                return Err(err);
            }
            info!(path = %ctx.output.json_path.display(), "summary_written");
        }

        ctx.document = Some(doc);
        Ok(())
    }
}
