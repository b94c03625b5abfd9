use core::fmt;
use std::sync::Arc;

/// A logical thread identifier.
///
/// Both parties of a protocol run it on threads with equal identifiers, which is what pairs up
/// the two halves of a call to an ideal functionality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ThreadId(Arc<[u8]>);

impl Default for ThreadId {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ThreadId {
    /// Creates a new thread ID.
    #[inline]
    pub fn new(id: u8) -> Self {
        Self(vec![id].into())
    }

    /// Returns the thread ID as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the ID of the first child of this thread.
    #[inline]
    pub fn fork(&self) -> Self {
        let mut id = self.0.to_vec();
        id.push(0);

        Self(id.into())
    }
}

impl AsRef<[u8]> for ThreadId {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.0.iter();
        if let Some(first) = parts.next() {
            write!(f, "{first}")?;
        }
        for part in parts {
            write!(f, "/{part}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_id_display() {
        let id = ThreadId::new(3).fork();

        assert_eq!(id.as_bytes(), &[3, 0]);
        assert_eq!(id.to_string(), "3/0");
    }
}
