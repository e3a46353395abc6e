pub mod bug_list;
pub mod form_view;
pub mod status_line;
