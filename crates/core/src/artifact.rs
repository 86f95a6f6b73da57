// crates/core/src/artifact.rs
//! Artifact synthesis: the structured tree, markdown rendering, and summary
//! produced when a job completes.
//!
//! The pipeline is simulated, so the content is fixed sample data; only the
//! language and the table section vary with the submitted options.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::job::ProcessingOptions;

const SAMPLE_TITLE: &str = "Sample Document Title";
const SAMPLE_PAGES: u32 = 3;
const SAMPLE_WORD_COUNT: u32 = 1250;
const SAMPLE_PARAGRAPH: &str = "This is a sample paragraph extracted from the document. \
     It contains important information about the document processing capabilities.";

/// One block of extracted content, in document reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Section {
    Heading { content: String, level: u8 },
    Paragraph { content: String },
    Table {
        rows: u32,
        columns: u32,
        data: Vec<Vec<String>>,
    },
}

/// Structured document tree of a finished extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct DocumentTree {
    pub title: String,
    pub pages: u32,
    pub word_count: u32,
    pub language: String,
    pub sections: Vec<Section>,
}

/// Final output of a successfully completed job: the tree plus a flattened
/// markdown rendering and a human-readable summary. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../frontend/src/types/generated/")]
#[serde(rename_all = "camelCase")]
pub struct ExtractedContent {
    pub document: DocumentTree,
    pub markdown: String,
    pub summary: String,
}

/// Build the simulated extraction result for a finished job.
pub fn synthesize(params: &ProcessingOptions) -> ExtractedContent {
    let mut sections = vec![
        Section::Heading {
            content: "Introduction".to_string(),
            level: 1,
        },
        Section::Paragraph {
            content: SAMPLE_PARAGRAPH.to_string(),
        },
    ];
    if params.extract_tables {
        sections.push(sample_table());
    }

    let document = DocumentTree {
        title: SAMPLE_TITLE.to_string(),
        pages: SAMPLE_PAGES,
        word_count: SAMPLE_WORD_COUNT,
        language: params.language.clone(),
        sections,
    };

    ExtractedContent {
        markdown: render_markdown(params),
        summary: render_summary(params),
        document,
    }
}

fn sample_table() -> Section {
    let row = |cells: [&str; 3]| cells.iter().map(|c| c.to_string()).collect();
    Section::Table {
        rows: 5,
        columns: 3,
        data: vec![
            row(["Header 1", "Header 2", "Header 3"]),
            row(["Row 1 Col 1", "Row 1 Col 2", "Row 1 Col 3"]),
            row(["Row 2 Col 1", "Row 2 Col 2", "Row 2 Col 3"]),
        ],
    }
}

fn render_markdown(params: &ProcessingOptions) -> String {
    let mut markdown = String::new();
    markdown.push_str("# Sample Document Title\n\n");
    markdown.push_str("## Introduction\n\n");
    markdown.push_str(SAMPLE_PARAGRAPH);
    markdown.push_str("\n\n");

    if params.extract_tables {
        markdown.push_str("## Data Table\n\n");
        markdown.push_str("| Header 1 | Header 2 | Header 3 |\n");
        markdown.push_str("|----------|----------|----------|\n");
        markdown.push_str("| Row 1 Col 1 | Row 1 Col 2 | Row 1 Col 3 |\n");
        markdown.push_str("| Row 2 Col 1 | Row 2 Col 2 | Row 2 Col 3 |\n\n");
    }

    markdown
}

fn render_summary(params: &ProcessingOptions) -> String {
    format!(
        "This document appears to be a sample document containing {} words across {} pages. \
         The main content includes an introduction section{}. \
         The document is primarily in {} language.",
        SAMPLE_WORD_COUNT,
        SAMPLE_PAGES,
        if params.extract_tables {
            " and structured data tables"
        } else {
            ""
        },
        params.language,
    )
}
