/*!
Small cross-submodule types for the app module.

Intended usage:
- input::keymap uses Pane and FormField to decide the active bindings.
- view renders focus highlights from the same values.
*/

/// Which half of the screen receives key input.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub enum Pane {
    #[default]
    Form,
    List,
}

impl Pane {
    pub fn toggle(self) -> Self {
        match self {
            Pane::Form => Pane::List,
            Pane::List => Pane::Form,
        }
    }
}

impl std::fmt::Display for Pane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pane::Form => write!(f, "Form"),
            Pane::List => write!(f, "List"),
        }
    }
}

/// Fields of the new-bug form, in visual order.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
pub enum FormField {
    #[default]
    BugId,
    Description,
    Criticality,
    Done,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::BugId => FormField::Description,
            FormField::Description => FormField::Criticality,
            FormField::Criticality => FormField::Done,
            FormField::Done => FormField::BugId,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::BugId => FormField::Done,
            FormField::Description => FormField::BugId,
            FormField::Criticality => FormField::Description,
            FormField::Done => FormField::Criticality,
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, FormField::BugId | FormField::Description)
    }
}
