/// Unique identifier for a document in a workspace.
/// Uses u32 for compact storage inside reference nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl FileId {
    /// Create a new FileId from an index
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    /// Get the index into the workspace document list
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
