use crate::rewrite::RewriteReport;
use serde_json::json;
use std::fmt::Write;

/// Output format for the final report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String;
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for RewriteReport {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }

    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "rewrite",
            "root": self.root,
            "dry_run": self.dry_run,
            "summary": {
                "files_scanned": self.files_scanned,
                "files_rewritten": self.files_rewritten.len(),
                "errors": self.errors,
            },
            "files_rewritten": self.files_rewritten,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        let verb = if self.dry_run { "Would rewrite" } else { "Rewrote" };
        writeln!(
            output,
            "{} {} of {} eligible files under {}",
            verb,
            self.files_rewritten.len(),
            self.files_scanned,
            self.root.display()
        )
        .unwrap();

        if self.errors > 0 {
            writeln!(output, "Skipped {} files due to errors", self.errors).unwrap();
        }

        output
    }
}
