//! Error handling for MockupKit
//!
//! Provides the error types shared by every layer of the editor core:
//! - Snapshot errors (malformed or unsupported serialized scenes)
//! - Asset errors (image/font fetch, decode, timeouts, stale loads)
//! - Catalog errors (unknown products, sides, previews)
//! - History errors (failed restores)
//!
//! All error types use `thiserror` for ergonomic error handling. None of them
//! is fatal: the editor contains them at the component boundary and logs them.

use thiserror::Error;

/// Snapshot error type
///
/// Raised when a serialized scene cannot be decoded at all. Individual
/// malformed objects never produce this error; they degrade to defaults.
#[derive(Error, Debug, Clone)]
pub enum SnapshotError {
    /// The payload is not valid JSON or not shaped like a snapshot
    #[error("Malformed snapshot: {reason}")]
    Malformed {
        /// The decoder's description of the problem.
        reason: String,
    },

    /// The document was written by a newer, incompatible format version
    #[error("Unsupported snapshot version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// The version string found in the document.
        found: String,
        /// The newest version this build understands.
        supported: String,
    },

    /// An object kind that strict decoding refuses
    #[error("Unknown object kind: {kind}")]
    UnknownKind {
        /// The kind tag that was encountered.
        kind: String,
    },
}

/// Asset error type
///
/// Represents failures while fetching or decoding mockup images, user
/// uploads, vector graphics and fonts.
#[derive(Error, Debug, Clone)]
pub enum AssetError {
    /// The asset could not be fetched
    #[error("Failed to fetch asset {source_ref}: {reason}")]
    FetchFailed {
        /// The reference (path or URL) that was requested.
        source_ref: String,
        /// The reason the fetch failed.
        reason: String,
    },

    /// The asset bytes could not be decoded
    #[error("Failed to decode asset {source_ref}: {reason}")]
    DecodeFailed {
        /// The reference (path or URL) that was decoded.
        source_ref: String,
        /// The decoder's description of the problem.
        reason: String,
    },

    /// A font did not become ready in time
    #[error("Font {family} not ready after {timeout_ms}ms")]
    FontTimeout {
        /// The requested font family.
        family: String,
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// A font family is not available at all
    #[error("Font {family} is not available")]
    FontUnavailable {
        /// The requested font family.
        family: String,
    },

    /// The load finished after its scene context went away
    #[error("Load for side {side_key} is stale (generation {generation})")]
    Stale {
        /// The side the load was started for.
        side_key: String,
        /// The generation the load was started in.
        generation: u64,
    },
}

/// Catalog error type
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// No product with this id
    #[error("Unknown product: {id}")]
    UnknownProduct {
        /// The requested product id.
        id: String,
    },

    /// The product has no side with this key
    #[error("Product {product} has no side {side}")]
    UnknownSide {
        /// The product id.
        product: String,
        /// The requested side key.
        side: String,
    },

    /// The product has no preview with this key
    #[error("Product {product} has no preview {preview}")]
    UnknownPreview {
        /// The product id.
        product: String,
        /// The requested preview key.
        preview: String,
    },

    /// A product without any side cannot be edited
    #[error("Product {product} defines no sides")]
    NoSides {
        /// The product id.
        product: String,
    },
}

/// History error type
#[derive(Error, Debug, Clone)]
pub enum HistoryError {
    /// Restoring a snapshot into the live scene failed
    #[error("Failed to restore history entry {index}: {reason}")]
    RestoreFailed {
        /// The history index that was being restored.
        index: usize,
        /// The reason the restore failed.
        reason: String,
    },
}

/// Main error type for MockupKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Snapshot error
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Asset error
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Catalog error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// History error
    #[error(transparent)]
    History(#[from] HistoryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the failure only affects a single object or asset
    ///
    /// Recoverable errors leave the scene in its last good state.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Asset(_) | Error::Snapshot(SnapshotError::UnknownKind { .. }) | Error::History(_)
        )
    }

    /// Check if this error reports a continuation that outlived its context
    pub fn is_stale(&self) -> bool {
        matches!(self, Error::Asset(AssetError::Stale { .. }))
    }

    /// Check if this is an asset error
    pub fn is_asset_error(&self) -> bool {
        matches!(self, Error::Asset(_))
    }

    /// Check if this is a snapshot error
    pub fn is_snapshot_error(&self) -> bool {
        matches!(self, Error::Snapshot(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Snapshot(SnapshotError::Malformed {
            reason: err.to_string(),
        })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
