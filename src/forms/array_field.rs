//! Index-addressed editing of list fields
//!
//! A list field always shows at least one input row, so an empty stored list
//! is edited as `[""]` and the last remaining row cannot be removed. Blank
//! rows are dropped when the form is submitted.

/// One edit to a list field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrayEdit {
    /// Append an empty row
    Add,
    /// Remove the row at an index
    Remove(usize),
    /// Replace the row at an index
    Update(usize, String),
}

/// Apply one edit, returning the new list.
///
/// Out-of-range indexes and removing the only row leave the list unchanged.
pub fn apply_edit(entries: &[String], edit: &ArrayEdit) -> Vec<String> {
    let mut next = entries.to_vec();
    match edit {
        ArrayEdit::Add => next.push(String::new()),
        ArrayEdit::Remove(index) => {
            if can_remove(entries) && *index < next.len() {
                next.remove(*index);
            }
        }
        ArrayEdit::Update(index, value) => {
            if let Some(slot) = next.get_mut(*index) {
                *slot = value.clone();
            }
        }
    }
    next
}

/// Whether the remove button is enabled
pub fn can_remove(entries: &[String]) -> bool {
    entries.len() > 1
}

/// Rows shown for a stored list
pub fn editable_list(stored: &[String]) -> Vec<String> {
    if stored.is_empty() {
        vec![String::new()]
    } else {
        stored.to_vec()
    }
}

/// Drop blank rows before submission. Non-blank rows are kept verbatim.
pub fn compact(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| !e.trim().is_empty())
        .cloned()
        .collect()
}
