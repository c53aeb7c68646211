//! Shared global selector codebook.

use alloc::{sync::Arc, vec::Vec};
use basis_transcoder_etc1s::{Etc1sError, GlobalSelectorCodebook};

/// Handle to an immutable global selector codebook.
///
/// Cloning the handle shares the table. Every [`Transcoder`](crate::Transcoder)
/// keeps its own clone, so the table lives until the last handle is dropped.
#[derive(Debug, Clone)]
pub struct Codebook {
    inner: Arc<GlobalSelectorCodebook>,
}

impl Default for Codebook {
    fn default() -> Self {
        Self::new()
    }
}

impl Codebook {
    /// Builds the standard codebook.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(GlobalSelectorCodebook::new()),
        }
    }

    /// Builds a codebook from packed selector entries, 2 bits per texel in row-major order.
    ///
    /// # Errors
    ///
    /// Returns [`Etc1sError::InvalidPalette`] if `entries` is empty.
    pub fn from_entries(entries: Vec<u32>) -> Result<Self, Etc1sError> {
        Ok(Self {
            inner: Arc::new(GlobalSelectorCodebook::from_entries(entries)?),
        })
    }

    /// The underlying table.
    #[inline]
    pub fn table(&self) -> &GlobalSelectorCodebook {
        &self.inner
    }

    /// Whether both handles share one table.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live handles to this table.
    #[inline]
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use basis_transcoder_etc1s::GLOBAL_SELECTOR_CODEBOOK_SIZE;

    #[test]
    fn standard_codebook_has_full_table() {
        assert_eq!(Codebook::new().table().len(), GLOBAL_SELECTOR_CODEBOOK_SIZE);
    }

    #[test]
    fn clones_share_the_table() {
        let codebook = Codebook::new();
        let other = codebook.clone();
        assert!(codebook.ptr_eq(&other));
        assert_eq!(codebook.handle_count(), 2);
        drop(other);
        assert_eq!(codebook.handle_count(), 1);
    }

    #[test]
    fn rejects_empty_entries() {
        assert!(Codebook::from_entries(vec![]).is_err());
        assert_eq!(Codebook::from_entries(vec![0, 1]).unwrap().table().len(), 2);
    }
}
