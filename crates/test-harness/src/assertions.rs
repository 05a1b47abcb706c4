//! Rich assertion helpers with diagnostic output.
//!
//! Every failure includes expected vs actual plus the current row list for
//! debuggability.

use measure_types::{Category, EntryKind, LabelKind};

use crate::helpers::HarnessError;
use crate::workflow::SessionBuilder;

fn rows_summary(s: &SessionBuilder) -> String {
    s.row_texts().join(" | ")
}

/// Assert the exact row texts, in list order.
pub fn assert_row_texts(s: &SessionBuilder, expected: &[&str], ctx: &str) -> Result<(), HarnessError> {
    let actual = s.row_texts();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected rows {:?}, got {:?}", ctx, expected, actual),
        })
    }
}

/// Assert how many rows of a category are listed.
pub fn assert_row_count(
    s: &SessionBuilder,
    category: Category,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = s.rows_of(category).len();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected {} {:?} rows, got {} (rows: {})",
                ctx,
                expected,
                category,
                actual,
                rows_summary(s)
            ),
        })
    }
}

/// Assert the ledger's entry kinds in number order.
pub fn assert_entry_kinds(
    s: &SessionBuilder,
    expected: &[EntryKind],
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual: Vec<_> = s
        .engine()
        .store()
        .entries()
        .iter()
        .map(|e| e.kind())
        .collect();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{}] expected entries {:?}, got {:?}", ctx, expected, actual),
        })
    }
}

/// Assert a label with this exact text is in the scene and visible.
pub fn assert_label_visible(s: &SessionBuilder, text: &str, ctx: &str) -> Result<(), HarnessError> {
    match s.scene().find_label(text) {
        Some((_, node)) if node.visible => Ok(()),
        Some((id, _)) => Err(HarnessError::AssertionFailed {
            detail: format!("[{}] label {:?} ({}) is hidden", ctx, text, id),
        }),
        None => Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] no label {:?}; length labels: {:?}, angle labels: {:?}",
                ctx,
                text,
                s.scene().label_texts(LabelKind::Length),
                s.scene().label_texts(LabelKind::Angle),
            ),
        }),
    }
}

/// Assert the scene holds no helpers.
pub fn assert_scene_empty(s: &SessionBuilder, ctx: &str) -> Result<(), HarnessError> {
    if s.scene().is_empty() {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{}] expected empty scene, found {} helpers (rows: {})",
                ctx,
                s.scene().len(),
                rows_summary(s)
            ),
        })
    }
}
