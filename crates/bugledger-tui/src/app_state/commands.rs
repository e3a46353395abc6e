use bugledger_store::BugDraft;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateCommand {
    /// Re-read the whole store into the bug list.
    FetchAll,
    /// Append a record, then re-read the store.
    AddBug { draft: BugDraft },
    /// Delete the record at a list position, then re-read the store.
    DeleteBug { index: usize },
}

impl StateCommand {
    pub fn discriminant(&self) -> &'static str {
        match self {
            StateCommand::FetchAll => "FetchAll",
            StateCommand::AddBug { .. } => "AddBug",
            StateCommand::DeleteBug { .. } => "DeleteBug",
        }
    }
}
