use bugledger_store::{BugDraft, Criticality};

use super::types::FormField;

/// Values of the new-bug form. No validation: empty text is submitted as-is
/// and left for the store to accept or reject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub bug_id: String,
    pub description: String,
    pub criticality: Criticality,
    pub is_done: bool,
    pub focus: FormField,
}

impl FormState {
    /// Appends to the focused text field. Ignored on non-text fields.
    pub fn insert_char(&mut self, c: char) {
        match self.focus {
            FormField::BugId => self.bug_id.push(c),
            FormField::Description => self.description.push(c),
            FormField::Criticality | FormField::Done => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            FormField::BugId => {
                self.bug_id.pop();
            }
            FormField::Description => {
                self.description.pop();
            }
            FormField::Criticality | FormField::Done => {}
        }
    }

    pub fn cycle_criticality(&mut self, forward: bool) {
        self.criticality = if forward {
            self.criticality.next()
        } else {
            self.criticality.prev()
        };
    }

    pub fn toggle_done(&mut self) {
        self.is_done = !self.is_done;
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Snapshot of the four submitted fields.
    pub fn to_draft(&self) -> BugDraft {
        BugDraft::new(
            self.bug_id.clone(),
            self.description.clone(),
            self.criticality,
            self.is_done,
        )
    }

    /// Back to defaults, keeping the cursor on the first field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
