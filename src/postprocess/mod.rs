//! Offline restyling of a generated document.
//!
//! Rewrites the title and presentation stylesheet, wraps the viewer root in a
//! titled container with navigation links and a footer, and points the
//! initialisation script at the new container. Running it twice over its own
//! output is not supported: the root marker is gone after the first pass.

mod markup;

use std::ops::Range;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use thiserror::Error;
use tracing::info;

use crate::io::html_writer::{INIT_SCRIPT_ID, ROOT_MARKER_ATTR, THEME_STYLE_ID, escape_html};
use markup::{RootLookup, element_content, find_root};

const PAGE_CSS: &str = include_str!("../../assets/page.css");

#[derive(Debug, Error, PartialEq)]
pub enum PostProcessError {
    #[error("document has no </head>")]
    MissingHead,

    #[error("root marker (data-alma-root) not found in document")]
    MissingRootMarker,

    #[error("root element is malformed: {0}")]
    MalformedRoot(String),

    #[error("initialization script (id=\"alma-init\") not found in document")]
    MissingInitScript,

    #[error("initialization script does not reference root '{0}'")]
    RootNotReferenced(String),

    #[error("invalid container id '{0}'")]
    InvalidContainerId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

impl FromStr for NavLink {
    type Err = String;

    /// Parses `LABEL=HREF`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (label, href) = s
            .split_once('=')
            .ok_or_else(|| format!("expected LABEL=HREF, got '{}'", s))?;
        let (label, href) = (label.trim(), href.trim());
        if label.is_empty() || href.is_empty() {
            return Err(format!("empty label or href in '{}'", s));
        }
        Ok(Self::new(label, href))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostProcessOptions {
    pub title: String,
    pub heading: String,
    pub container_id: String,
    pub stylesheet: String,
    pub links: Vec<NavLink>,
    pub footer: String,
}

impl Default for PostProcessOptions {
    fn default() -> Self {
        Self {
            title: "ALMA".to_string(),
            heading: "ALMA - Acute Leukemia Methylome Atlas".to_string(),
            container_id: "alma-app".to_string(),
            stylesheet: PAGE_CSS.to_string(),
            links: vec![
                NavLink::new("Map", "#alma-map"),
                NavLink::new("Prognosis", "#alma-prognosis"),
                NavLink::new("Risk", "#alma-risk"),
            ],
            footer: "Generated with alma-plot".to_string(),
        }
    }
}

struct Edit {
    span: Range<usize>,
    text: String,
}

pub fn post_process(
    html: &str,
    opts: &PostProcessOptions,
) -> std::result::Result<String, PostProcessError> {
    if !is_valid_id(&opts.container_id) {
        return Err(PostProcessError::InvalidContainerId(
            opts.container_id.clone(),
        ));
    }
    let head_end = html.find("</head>").ok_or(PostProcessError::MissingHead)?;

    let root = match find_root(html, ROOT_MARKER_ATTR) {
        RootLookup::Found(root) => root,
        RootLookup::NoMarker => return Err(PostProcessError::MissingRootMarker),
        RootLookup::Malformed(reason) => return Err(PostProcessError::MalformedRoot(reason)),
    };

    let init_open = format!("<script id=\"{}\"", INIT_SCRIPT_ID);
    let init = element_content(html, &init_open, "</script>")
        .ok_or(PostProcessError::MissingInitScript)?;
    let old_ref = format!("\"root_id\":\"{}\"", root.id);
    let new_ref = format!("\"root_id\":\"{}\"", opts.container_id);
    let init_text = &html[init.clone()];
    if !init_text.contains(&old_ref) {
        return Err(PostProcessError::RootNotReferenced(root.id));
    }

    let mut edits = Vec::with_capacity(4);

    match element_content(&html[..head_end], "<title", "</title>") {
        Some(span) => edits.push(Edit {
            span,
            text: escape_html(&opts.title),
        }),
        None => edits.push(Edit {
            span: head_end..head_end,
            text: format!("<title>{}</title>\n", escape_html(&opts.title)),
        }),
    }

    let theme_open = format!("<style id=\"{}\"", THEME_STYLE_ID);
    match element_content(&html[..head_end], &theme_open, "</style>") {
        Some(span) => edits.push(Edit {
            span,
            text: format!("\n{}", opts.stylesheet),
        }),
        None => edits.push(Edit {
            span: head_end..head_end,
            text: format!(
                "<style id=\"{}\">\n{}</style>\n",
                THEME_STYLE_ID, opts.stylesheet
            ),
        }),
    }

    edits.push(Edit {
        span: root.span.clone(),
        text: container_markup(opts),
    });
    edits.push(Edit {
        span: init.clone(),
        text: init_text.replace(&old_ref, &new_ref),
    });

    Ok(apply_edits(html, edits))
}

/// Reads `input`, transforms it and writes `output`. Nothing is written when
/// any transform fails.
pub fn post_process_file(input: &Path, output: &Path, opts: &PostProcessOptions) -> Result<()> {
    let html = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let out = post_process(&html, opts)
        .with_context(|| format!("failed to post-process {}", input.display()))?;
    std::fs::write(output, out)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!(
        input = %input.display(),
        output = %output.display(),
        container = %opts.container_id,
        "document_post_processed"
    );
    Ok(())
}

fn container_markup(opts: &PostProcessOptions) -> String {
    let links: Vec<String> = opts
        .links
        .iter()
        .map(|l| {
            format!(
                "<a href=\"{}\">{}</a>",
                escape_html(&l.href),
                escape_html(&l.label)
            )
        })
        .collect();
    format!(
        "<div id=\"{id}\" class=\"alma-container\">\n\
         <header class=\"alma-header\">\n\
         <h1>{heading}</h1>\n\
         <nav class=\"alma-nav\">{links}</nav>\n\
         </header>\n\
         </div>\n\
         <footer class=\"alma-footer\">{footer}</footer>",
        id = opts.container_id,
        heading = escape_html(&opts.heading),
        links = links.join(""),
        footer = escape_html(&opts.footer),
    )
}

fn apply_edits(html: &str, mut edits: Vec<Edit>) -> String {
    // Stable: insertions at the same offset keep push order.
    edits.sort_by_key(|e| e.span.start);
    let mut out = String::with_capacity(html.len() + 4096);
    let mut cursor = 0;
    for edit in edits {
        out.push_str(&html[cursor..edit.span.start]);
        out.push_str(&edit.text);
        cursor = edit.span.end;
    }
    out.push_str(&html[cursor..]);
    out
}

fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
