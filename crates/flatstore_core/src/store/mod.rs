//! Document store contracts and flat-file implementation.
//!
//! # Responsibility
//! - Define the store-facing error taxonomy and configuration surface.
//! - Define the `DocumentStore` contract implemented by the JSON file store.
//!
//! # Invariants
//! - Every mutating operation is all-or-nothing at the level of one file
//!   write; there is no retry or partial-failure recovery.
//! - Identifier-keyed operations are soft no-ops, never errors, when
//!   uniqueness enforcement is disabled.

use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

pub mod file;
pub mod json_store;

pub use json_store::JsonDocumentStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store construction and operation errors.
#[derive(Debug)]
pub enum StoreError {
    /// The model type was never registered with `bind_identifier`.
    IdentifierNotBound { model: &'static str },
    /// `save` found an existing row with the same identifier value.
    DuplicateIdentifier(Value),
    Io(io::Error),
    Json(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentifierNotBound { model } => {
                write!(f, "model {model} has no bound identifier field")
            }
            Self::DuplicateIdentifier(id) => {
                write!(f, "a model with identifier {id} already exists")
            }
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IdentifierNotBound { .. } => None,
            Self::DuplicateIdentifier(_) => None,
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Store configuration flags, all independently toggleable.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Emit informational records for store lifecycle and mutations.
    pub logging: bool,
    /// Emit cautionary records for skipped or unsafe operations.
    pub warn_on_unsafe_ops: bool,
    /// Reject duplicate identifiers on save and enable id-keyed operations.
    pub enforce_unique: bool,
    /// Create the document file as an empty array when it is absent.
    pub auto_create_file: bool,
    /// Partial path prefix for dated backup mirrors; `None` disables backups.
    /// The prefix must include any desired separator, it is not a directory.
    pub backup_path_prefix: Option<String>,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            logging: false,
            warn_on_unsafe_ops: true,
            enforce_unique: true,
            auto_create_file: true,
            backup_path_prefix: None,
        }
    }
}

/// Contract for a store persisting one model type as a whole-file sequence.
///
/// Identifier values are JSON values compared with JSON-native equality.
pub trait DocumentStore<T> {
    /// Appends a new instance, rejecting duplicate identifiers when
    /// uniqueness is enforced.
    fn save(&self, model: &T) -> StoreResult<()>;

    /// Updates the instance when its identifier already exists, saves it
    /// otherwise.
    fn save_or_update(&self, model: &T) -> StoreResult<()>;

    /// Returns the first stored instance with the given identifier value.
    ///
    /// Always `None` when uniqueness enforcement is disabled.
    fn find_by_id(&self, id: &Value) -> StoreResult<Option<T>>;

    /// Returns every stored instance in file storage order.
    fn find_all(&self) -> StoreResult<Vec<T>>;

    /// Shallow-merges the given instance over the stored row with the same
    /// identifier; fields only present in the stored row are preserved.
    fn update(&self, model: &T) -> StoreResult<()>;

    /// Removes every stored row with the given identifier value.
    fn delete(&self, id: &Value) -> StoreResult<()>;

    /// Deletes the document file. Backups and the identifier binding remain.
    fn unregister_model(&self) -> StoreResult<()>;
}
