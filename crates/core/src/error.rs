use std::error::Error as StdError;

use crate::target::SupportAdapter;

/// Crate-wide result type for transcoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Typed transcoding errors shared across builder/exporter contracts.
///
/// All variants propagate to the immediate caller; nothing is swallowed or
/// logged internally. Rendering a user-facing message is the caller's job.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A canonical segment variant/flag has no mapping on this platform.
    #[error("adapter {adapter} cannot export {segment} as {feature}")]
    UnsupportedSegment {
        adapter: SupportAdapter,
        segment: String,
        feature: &'static str,
    },

    /// A segment is present but missing the data needed to export it.
    #[error("invalid {kind} segment: {segment}")]
    InvalidSegment { kind: &'static str, segment: String },

    /// Address/id resolution attempted on an event kind the resolver does
    /// not recognize. A logic error: callers must only resolve events the
    /// binding declares message-bearing or notice-bearing.
    #[error("cannot resolve {operation} from event kind {kind}")]
    UnsupportedEvent {
        operation: &'static str,
        kind: String,
    },

    /// Recall/edit given an illegal (identifier, context) pairing.
    #[error("message identifier does not match context: {message}")]
    TypeMismatch { message: String },

    /// The underlying platform call failed. Propagated unchanged; the
    /// transcoder adds no retry.
    #[error("platform call failed: {context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    /// JSON (de)serialization failed.
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),

    /// Reading path-addressed media failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn unsupported_segment(
        adapter: SupportAdapter,
        segment: impl std::fmt::Debug,
        feature: &'static str,
    ) -> Self {
        Self::UnsupportedSegment {
            adapter,
            segment: format!("{segment:?}"),
            feature,
        }
    }

    #[must_use]
    pub fn invalid_segment(kind: &'static str, segment: impl std::fmt::Debug) -> Self {
        Self::InvalidSegment {
            kind,
            segment: format!("{segment:?}"),
        }
    }

    #[must_use]
    pub fn unsupported_event(operation: &'static str, kind: impl std::fmt::Display) -> Self {
        Self::UnsupportedEvent {
            operation,
            kind: kind.to_string(),
        }
    }

    #[must_use]
    pub fn type_mismatch(message: impl Into<String>) -> Self {
        Self::TypeMismatch {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn transport(
        context: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            context: context.into(),
            source: Box::new(source),
        }
    }
}
