//! # Error Taxonomy
//!
//! Every fallible operation returns `eyre::Result`. The conditions callers are
//! expected to tell apart are raised as a typed [`ContiguousError`] inside the
//! report, so they can be recovered with `downcast_ref`:
//!
//! ```ignore
//! match list.get(7) {
//!     Err(report) => match report.downcast_ref::<ContiguousError>() {
//!         Some(ContiguousError::IndexOutOfRange { index, len }) => { /* caller bug */ }
//!         _ => return Err(report),
//!     },
//!     Ok(record) => { /* ... */ }
//! }
//! ```
//!
//! | Variant | Raised by | Retry? |
//! |---------|-----------|--------|
//! | `Schema` | first use of a record type | never, the type itself is unusable |
//! | `IndexOutOfRange` | `get`, `render` | caller bug |
//! | `ConcurrentModification` | value cursors | restart the scan |
//! | `UnsupportedOperation` | positional/search mutations | never |
//!
//! Decode failures on malformed bytes are plain `eyre` errors. The buffer is
//! never exposed for external mutation, so they indicate a bug in this crate.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContiguousError {
    Schema {
        type_name: &'static str,
        reason: String,
    },
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
    ConcurrentModification {
        expected: usize,
        actual: usize,
    },
    UnsupportedOperation {
        operation: &'static str,
    },
}

impl ContiguousError {
    pub(crate) fn schema(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::Schema {
            type_name,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for ContiguousError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema { type_name, reason } => {
                write!(f, "cannot derive schema for {}: {}", type_name, reason)
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for list of length {}", index, len)
            }
            Self::ConcurrentModification { expected, actual } => write!(
                f,
                "list modified while iterating: size was {} and is now {}",
                expected, actual
            ),
            Self::UnsupportedOperation { operation } => {
                write!(f, "{} is not supported by an append-only list", operation)
            }
        }
    }
}

impl std::error::Error for ContiguousError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_names_type_and_reason() {
        let err = ContiguousError::schema("Customer", "declares no fields");
        assert_eq!(
            err.to_string(),
            "cannot derive schema for Customer: declares no fields"
        );
    }

    #[test]
    fn typed_error_survives_eyre_report() {
        let report = eyre::Report::new(ContiguousError::IndexOutOfRange { index: 3, len: 2 });
        assert_eq!(
            report.downcast_ref::<ContiguousError>(),
            Some(&ContiguousError::IndexOutOfRange { index: 3, len: 2 })
        );
    }
}
