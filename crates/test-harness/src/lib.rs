//! Test harness for scripting measurement sessions.
//!
//! Drives the real panel dispatch path against a `MockScene`, checks the
//! engine's invariants after each step, and renders diagnostic output.
//!
//! # Key Components
//!
//! - [`SessionBuilder`]: Fluent API for scripting pick/undo/delete workflows
//! - [`oracle`]: Invariant checks returning pass/fail verdicts
//! - [`report`]: Structured text session descriptions
//! - [`helpers`]: Error type, pick constructors, shape outlines
//! - [`assertions`]: Rich assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod report;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use report::SessionReport;
pub use workflow::SessionBuilder;
