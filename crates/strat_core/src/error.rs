use thiserror::Error;

use crate::rules::RuleKind;

/// Errors raised while persisting or restoring campaign state.
///
/// No error is recovered locally: any failure aborts the surrounding
/// save/load operation and surfaces to the caller, which must treat the
/// entity set as unusable rather than resume from partial state.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("malformed save document: expected {expected} at {path}")]
    Node { path: String, expected: &'static str },

    #[error("scalar at {path} is not a valid {expected}: '{raw}'")]
    Scalar {
        path: String,
        expected: &'static str,
        raw: String,
    },

    #[error("{entity} references unknown {kind} '{id}'")]
    UnknownRule {
        entity: &'static str,
        kind: RuleKind,
        id: String,
    },

    #[error("document encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

pub type SaveResult<T> = Result<T, SaveError>;
