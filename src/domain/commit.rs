/// One commit as replayed from VCS history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit reference (full hash)
    pub reference: String,
    /// Commit message text
    pub message: String,
    /// Position in the oldest-first sequence, starting at 0
    pub position: usize,
}

impl CommitRecord {
    pub fn new(reference: impl Into<String>, message: impl Into<String>, position: usize) -> Self {
        CommitRecord {
            reference: reference.into(),
            message: message.into(),
            position,
        }
    }

    /// Build oldest-first records from a newest-first `(reference, message)`
    /// log, as produced by the backend. The accumulator depends on this
    /// ordering.
    pub fn from_log(entries: Vec<(String, String)>) -> Vec<CommitRecord> {
        entries
            .into_iter()
            .rev()
            .enumerate()
            .map(|(position, (reference, message))| CommitRecord {
                reference,
                message,
                position,
            })
            .collect()
    }
}
