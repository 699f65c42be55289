//! Editing a task's checklist. Every helper returns the whole new list, which
//! is what `PATCH /api/tasks` expects in its `checklist` field.

use crate::schemas::ChecklistItem;

/// Next free identifier: one past the largest numeric id in use.
fn next_id(items: &[ChecklistItem]) -> String {
    let max = items
        .iter()
        .filter_map(|item| item.id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

/// Append an unchecked item. `None` for blank text.
pub fn add_item(items: &[ChecklistItem], text: &str) -> Option<Vec<ChecklistItem>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let mut next = items.to_vec();
    next.push(ChecklistItem {
        id: next_id(items),
        text: text.to_string(),
        checked: false,
    });
    Some(next)
}

pub fn toggle_item(items: &[ChecklistItem], id: &str) -> Vec<ChecklistItem> {
    items
        .iter()
        .cloned()
        .map(|mut item| {
            if item.id == id {
                item.checked = !item.checked;
            }
            item
        })
        .collect()
}

/// Rename an item. `None` for blank text or an unknown id.
pub fn rename_item(items: &[ChecklistItem], id: &str, text: &str) -> Option<Vec<ChecklistItem>> {
    let text = text.trim();
    if text.is_empty() || !items.iter().any(|item| item.id == id) {
        return None;
    }
    Some(
        items
            .iter()
            .cloned()
            .map(|mut item| {
                if item.id == id {
                    item.text = text.to_string();
                }
                item
            })
            .collect(),
    )
}

pub fn remove_item(items: &[ChecklistItem], id: &str) -> Vec<ChecklistItem> {
    items.iter().filter(|item| item.id != id).cloned().collect()
}
