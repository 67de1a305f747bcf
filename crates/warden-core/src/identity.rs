//! # Service Identity
//!
//! Newtype wrappers for service identity. A [`ServicePath`] is the opaque
//! dotted key under which a tree registers with the active monitor; a
//! [`ServiceOperation`] is the structured five-segment naming convention
//! that produces one.
//!
//! Validated constructors keep malformed keys out of the registry — a path
//! cannot be empty and cannot contain whitespace, so every registered key
//! is printable and unambiguous in diagnostics.

use serde::{Deserialize, Serialize};

use crate::error::WardenError;

/// Opaque identifier for a monitored tree instance.
///
/// Used verbatim as the registry key in the active monitor and as the
/// `path` field on every diagnostic the tree emits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServicePath(String);

impl ServicePath {
    /// Create a service path, rejecting empty strings and whitespace.
    pub fn new(path: impl Into<String>) -> Result<Self, WardenError> {
        let path = path.into();
        if path.is_empty() || path.chars().any(char::is_whitespace) {
            return Err(WardenError::InvalidServicePath(path));
        }
        Ok(Self(path))
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ServicePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Structured service naming: `service.operation.department.division.region`.
///
/// The five segments identify what a tree is for and who operates it.
/// [`ServiceOperation::path`] renders the dotted [`ServicePath`] used as the
/// registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceOperation {
    /// The service this tree belongs to (e.g., "housing").
    pub service: String,
    /// The operation the tree backs (e.g., "allocation").
    pub operation: String,
    /// Owning department.
    pub department: String,
    /// Owning division within the department.
    pub division: String,
    /// Deployment region or locality.
    pub region: String,
}

impl ServiceOperation {
    /// Create a service operation, validating every segment.
    ///
    /// # Errors
    ///
    /// Returns [`WardenError::InvalidServicePath`] if any segment is empty,
    /// contains whitespace, or contains a `.` (which would corrupt the
    /// dotted rendering).
    pub fn new(
        service: impl Into<String>,
        operation: impl Into<String>,
        department: impl Into<String>,
        division: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, WardenError> {
        let op = Self {
            service: service.into(),
            operation: operation.into(),
            department: department.into(),
            division: division.into(),
            region: region.into(),
        };
        for segment in op.segments() {
            if segment.is_empty()
                || segment.contains('.')
                || segment.chars().any(char::is_whitespace)
            {
                return Err(WardenError::InvalidServicePath(segment.to_string()));
            }
        }
        Ok(op)
    }

    /// Render the dotted service path.
    pub fn path(&self) -> ServicePath {
        ServicePath(self.segments().join("."))
    }

    fn segments(&self) -> [&str; 5] {
        [
            &self.service,
            &self.operation,
            &self.department,
            &self.division,
            &self.region,
        ]
    }
}

impl std::fmt::Display for ServiceOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- ServicePath ----

    #[test]
    fn path_accepts_dotted_names() {
        let path = ServicePath::new("housing.allocation.social.care.cambridge").unwrap();
        assert_eq!(path.as_str(), "housing.allocation.social.care.cambridge");
        assert_eq!(format!("{path}"), path.as_str());
    }

    #[test]
    fn path_rejects_empty() {
        assert!(ServicePath::new("").is_err());
    }

    #[test]
    fn path_rejects_whitespace() {
        assert!(ServicePath::new("a path").is_err());
        assert!(ServicePath::new("tab\tpath").is_err());
    }

    // ---- ServiceOperation ----

    #[test]
    fn operation_renders_five_segments() {
        let op = ServiceOperation::new("housing", "allocation", "social", "care", "cambridge")
            .unwrap();
        assert_eq!(
            op.path().as_str(),
            "housing.allocation.social.care.cambridge"
        );
    }

    #[test]
    fn operation_rejects_empty_segment() {
        assert!(ServiceOperation::new("housing", "", "social", "care", "cambridge").is_err());
    }

    #[test]
    fn operation_rejects_dot_in_segment() {
        assert!(ServiceOperation::new("hou.sing", "allocation", "a", "b", "c").is_err());
    }

    #[test]
    fn operation_rejects_whitespace_in_segment() {
        assert!(ServiceOperation::new("housing", "alloc ation", "a", "b", "c").is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let path = ServicePath::new("ledger.audit.finance.core.east").unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let parsed: ServicePath = serde_json::from_str(&json).unwrap();
        assert_eq!(path, parsed);
    }
}
