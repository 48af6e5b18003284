//! Search command
//!
//! Aggregated read-only query: each backend is searched in sequence and the
//! hits are printed grouped per backend.

use crate::backends;
use crate::config::Context;
use crate::error::Result;
use crate::ui;
use colored::Colorize;

pub fn run(ctx: &Context, term: &str) -> Result<()> {
    let chain = backends::default_chain(ctx);
    let mut total = 0usize;

    for backend in &chain {
        let tool = backend.kind().tool_name();
        if !backend.is_available() {
            continue;
        }

        let hits = match backend.search(term) {
            Ok(hits) => hits,
            Err(e) => {
                ui::warning(&format!("{} search failed: {}", tool, e));
                continue;
            }
        };
        if hits.is_empty() {
            continue;
        }

        ui::header(&format!("{} ({})", tool, hits.len()));
        for hit in &hits {
            let version = hit.version.as_deref().unwrap_or("");
            println!("{} {}", hit.name.bold(), version.dimmed());
            if let Some(desc) = &hit.description {
                ui::indent(desc, 1);
            }
        }
        total += hits.len();
    }

    if total == 0 {
        ui::warning(&format!("No results for '{}'", term));
    }
    Ok(())
}
