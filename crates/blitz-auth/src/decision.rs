//! Authorization decision type.

/// Outcome of one authorization call.
///
/// Exactly one of the two variants is produced per request. A rejection
/// carries nothing: the cause never leaves the engine, so a caller cannot
/// tell "unknown account" from "wrong secret" from "quota exceeded".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Admit the connection; `identity` names the matched account.
    Accept {
        /// Resolved account identity.
        identity: String,
    },
    /// Deny the connection.
    Reject,
}

impl Decision {
    /// Create an accepting decision for the given identity.
    #[inline]
    pub fn accept(identity: impl Into<String>) -> Self {
        Self::Accept {
            identity: identity.into(),
        }
    }

    /// Create a rejecting decision.
    #[inline]
    pub fn reject() -> Self {
        Self::Reject
    }

    /// Whether the request was admitted.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept { .. })
    }

    /// The resolved identity, present only on acceptance.
    #[inline]
    pub fn identity(&self) -> Option<&str> {
        match self {
            Self::Accept { identity } => Some(identity),
            Self::Reject => None,
        }
    }
}
