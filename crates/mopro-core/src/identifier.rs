//! Element identity.

use std::fmt;

/// Numeric identity of an element inside a model repository.
///
/// Identities are assigned by the repository and are only meaningful within
/// the repository that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(u32);

impl ElementId {
    /// Create an identifier from its raw repository value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw repository value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ElementId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_id_display() {
        assert_eq!(ElementId::new(42).to_string(), "#42");
    }

    #[test]
    fn test_element_id_from_raw() {
        let id: ElementId = 7.into();
        assert_eq!(id.raw(), 7);
        assert_eq!(id, ElementId::new(7));
    }
}
