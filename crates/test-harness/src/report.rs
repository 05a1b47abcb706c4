//! Structured text session reports.
//!
//! Reports are plain text so a failing test can print the whole session state
//! in one readable block.

use std::fmt;

use measure_types::Entry;

use crate::helpers::HarnessError;
use crate::oracle::{self, OracleVerdict};
use crate::workflow::SessionBuilder;

/// A complete session report with all sections.
pub struct SessionReport {
    pub entries: Vec<EntryLine>,
    pub rows: Vec<String>,
    pub helper_count: usize,
    pub label_count: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub oracle_results: Vec<OracleVerdict>,
}

/// One ledger entry in the report.
pub struct EntryLine {
    pub number: u32,
    pub kind: &'static str,
    pub detail: String,
}

impl SessionReport {
    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Measurement Session Report ===\n\n");

        out.push_str(&format!("Entries ({}):\n", self.entries.len()));
        for e in &self.entries {
            out.push_str(&format!("  [{}] {} {}\n", e.number, e.kind, e.detail));
        }

        out.push_str(&format!("\nRows ({}):\n", self.rows.len()));
        for row in &self.rows {
            out.push_str(&format!("  {}\n", row));
        }

        out.push_str(&format!(
            "\nScene: {} helpers, {} labels\n",
            self.helper_count, self.label_count
        ));
        out.push_str(&format!(
            "History: undo={} redo={}\n",
            self.can_undo, self.can_redo
        ));

        let failed = self.oracle_results.iter().filter(|v| !v.passed).count();
        out.push_str(&format!(
            "\nOracles ({} run, {} failed):\n",
            self.oracle_results.len(),
            failed
        ));
        for v in &self.oracle_results {
            let mark = if v.passed { "PASS" } else { "FAIL" };
            out.push_str(&format!("  {} {}: {}\n", mark, v.oracle_name, v.detail));
        }

        out
    }

    pub fn all_passed(&self) -> bool {
        self.oracle_results.iter().all(|v| v.passed)
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl SessionBuilder {
    /// Build a report of the current session state.
    pub fn report(&self) -> Result<SessionReport, HarnessError> {
        let engine = self.engine();
        let entries = engine
            .store()
            .entries()
            .iter()
            .map(|e| match e {
                Entry::Point(p) => EntryLine {
                    number: p.number,
                    kind: if p.pick.radius.is_some() {
                        "circle"
                    } else {
                        "point"
                    },
                    detail: format!("({:.2}, {:.2}, {:.2})", p.center.x, p.center.y, p.center.z),
                },
                Entry::Edge(edge) => EntryLine {
                    number: edge.number,
                    kind: "edge",
                    detail: format!(
                        "({:.2}, {:.2}, {:.2}) -> ({:.2}, {:.2}, {:.2}) len {:.2}",
                        edge.start.x,
                        edge.start.y,
                        edge.start.z,
                        edge.end.x,
                        edge.end.y,
                        edge.end.z,
                        edge.pick.length
                    ),
                },
            })
            .collect();

        Ok(SessionReport {
            entries,
            rows: self.row_texts(),
            helper_count: self.scene().len(),
            label_count: self.scene().count(measure_types::HelperKind::Label),
            can_undo: engine.can_undo(),
            can_redo: engine.can_redo(),
            oracle_results: oracle::run_all_checks(engine),
        })
    }

    /// The current rows as pretty JSON, as the panel would receive them.
    pub fn rows_json(&self) -> Result<String, HarnessError> {
        serde_json::to_string_pretty(self.rows()).map_err(|e| HarnessError::AssertionFailed {
            detail: format!("rows do not serialize: {}", e),
        })
    }
}
