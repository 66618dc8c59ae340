//! Path-addressed edits of JSON text that keep the surrounding formatting.
//!
//! Instead of parsing a document into a value and serializing it back, an
//! edit is computed as a small set of textual splices ([`EditDescriptor`])
//! against the original text. Whitespace, key order and comments outside the
//! edited span come through byte for byte.
//!
//! # Example
//!
//! ```
//! use json_splice::{apply_edit, path};
//!
//! let doc = "{\n  \"name\": \"old\", // keep me\n  \"tags\": []\n}";
//! let doc = apply_edit(doc, &path!["name"], "new");
//! let doc = apply_edit(&doc, &path!["tags", 0], "42");
//! assert_eq!(
//!     doc,
//!     "{\n  \"name\": \"new\", // keep me\n  \"tags\": [\n    42\n  ]\n}"
//! );
//! ```
//!
//! [`apply_edit`] never fails: when the path cannot be resolved the original
//! text is returned. Use [`apply_edit_with`] and [`EditOptions::strict`] to
//! get the error instead.

pub mod cli;
pub mod coerce;
pub mod edit;
pub mod error;
pub mod format;
pub mod options;
pub mod patch;
pub mod resolve;
pub mod syntax;

pub use edit::{apply_edit, apply_edit_with, remove_at, set_value};
pub use error::{AddressError, EditError, PatchBoundsError, SyntaxError};
pub use options::{EditOptions, FailureMode, IndentUnit};
pub use patch::{apply_edits, EditDescriptor};

pub use json_splice_path::{path, Path, PathSegment};
