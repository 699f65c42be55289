//! Task status/category transitions and the drag-and-drop commit protocol.
//!
//! A drag is a two-phase affair: while the pointer moves, [`DragSession::hover`]
//! rewrites the dragged task in the caller's local list so the board can
//! preview the move. Only [`DragSession::drop_on`] produces a persisted change,
//! and only when the final column differs from the snapshot taken when the drag
//! started. Dropping on the status board's `done` column is special: it always
//! archives, so a dragged task never rests in `done`.

use serde::{Deserialize, Serialize};

use crate::schemas::{Task, TaskCategory, TaskPatch, TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoardView {
    #[default]
    Category,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Category(TaskCategory),
    Status(TaskStatus),
}

impl Column {
    /// Column a task sits in for the given view.
    pub fn of(task: &Task, view: BoardView) -> Column {
        match view {
            BoardView::Category => Column::Category(task.category),
            BoardView::Status => Column::Status(task.status),
        }
    }

    /// Columns rendered by a view, left to right.
    pub fn for_view(view: BoardView) -> Vec<Column> {
        match view {
            BoardView::Category => TaskCategory::ALL.into_iter().map(Column::Category).collect(),
            BoardView::Status => TaskStatus::BOARD.into_iter().map(Column::Status).collect(),
        }
    }

    /// Whether the task belongs in this column, ignoring archived tasks.
    pub fn contains(self, task: &Task) -> bool {
        if task.status.is_archived() {
            return false;
        }
        match self {
            Column::Category(category) => task.category == category,
            Column::Status(status) => task.status == status,
        }
    }
}

/// What the pointer is over: a column body or another task card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Column(Column),
    Task(i64),
}

/// User-initiated transitions. Each maps to exactly one PATCH.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    /// Detail view "Terminer": leaves the task in `done`.
    Complete,
    /// Detail view "Archiver", or a drop on the `done` column.
    Archive,
    /// Archived list "Restaurer": always back to `todo`.
    Restore,
    /// Detail view "Réouvrir" on a done task.
    Reopen,
    SetStatus(TaskStatus),
    SetCategory(TaskCategory),
}

impl TaskAction {
    pub fn patch(self, id: i64) -> TaskPatch {
        let patch = TaskPatch::new(id);
        match self {
            TaskAction::Complete => patch.with_status(TaskStatus::Done),
            TaskAction::Archive => patch.with_status(TaskStatus::Archived),
            TaskAction::Restore | TaskAction::Reopen => patch.with_status(TaskStatus::Todo),
            TaskAction::SetStatus(status) => patch.with_status(status),
            TaskAction::SetCategory(category) => patch.with_category(category),
        }
    }
}

/// Footer actions the task detail view offers for a given status.
pub fn detail_actions(status: TaskStatus) -> Vec<TaskAction> {
    match status {
        TaskStatus::Todo | TaskStatus::Doing => vec![TaskAction::Complete],
        TaskStatus::Done => vec![TaskAction::Archive, TaskAction::Reopen],
        TaskStatus::Archived => vec![TaskAction::Restore],
    }
}

/// Resolve a pointer target to a column. Hovering a card means hovering the
/// column that card currently sits in.
pub fn resolve_target(tasks: &[Task], target: DropTarget, view: BoardView) -> Option<Column> {
    match target {
        DropTarget::Column(column) => match (view, column) {
            (BoardView::Category, Column::Category(_)) => Some(column),
            (BoardView::Status, Column::Status(status)) if status != TaskStatus::Archived => {
                Some(column)
            }
            _ => None,
        },
        DropTarget::Task(id) => tasks
            .iter()
            .find(|t| t.id == id)
            .map(|t| Column::of(t, view)),
    }
}

#[derive(Debug, Clone)]
pub struct DragSession {
    view: BoardView,
    snapshot: Task,
}

impl DragSession {
    /// Start dragging `task_id`, snapshotting it. `None` if the id is unknown.
    pub fn begin(tasks: &[Task], task_id: i64, view: BoardView) -> Option<Self> {
        tasks.iter().find(|t| t.id == task_id).map(|t| Self {
            view,
            snapshot: t.clone(),
        })
    }

    pub fn task_id(&self) -> i64 {
        self.snapshot.id
    }

    /// Speculatively move the dragged task into the hovered column.
    /// Returns true when the local list changed.
    pub fn hover(&self, tasks: &mut [Task], target: DropTarget) -> bool {
        let Some(column) = resolve_target(tasks, target, self.view) else {
            return false;
        };
        let Some(task) = tasks.iter_mut().find(|t| t.id == self.snapshot.id) else {
            return false;
        };
        match column {
            Column::Category(category) if task.category != category => {
                task.category = category;
                true
            }
            Column::Status(status) if task.status != status => {
                task.status = status;
                true
            }
            _ => false,
        }
    }

    /// Finish the drag. Returns the patch to persist, if any.
    ///
    /// `target` is `None` when the card was released outside every column;
    /// the speculative change is rolled back in that case.
    pub fn drop_on(self, tasks: &mut [Task], target: Option<DropTarget>) -> Option<TaskPatch> {
        let column = target.and_then(|t| resolve_target(tasks, t, self.view));
        let Some(column) = column else {
            self.cancel(tasks);
            return None;
        };

        let id = self.snapshot.id;
        let patch = match column {
            Column::Category(category) if category != self.snapshot.category => {
                Some(TaskAction::SetCategory(category).patch(id))
            }
            Column::Status(TaskStatus::Done) => Some(TaskAction::Archive.patch(id)),
            Column::Status(status) if status != self.snapshot.status => {
                Some(TaskAction::SetStatus(status).patch(id))
            }
            _ => None,
        };
        // Back in the starting column: the last preview may still point elsewhere.
        if patch.is_none() {
            self.cancel(tasks);
        }
        patch
    }

    /// Put the dragged task back the way it was when the drag began.
    pub fn cancel(self, tasks: &mut [Task]) {
        if let Some(task) = tasks.iter_mut().find(|t| t.id == self.snapshot.id) {
            task.category = self.snapshot.category;
            task.status = self.snapshot.status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, category: TaskCategory, status: TaskStatus) -> Task {
        Task {
            id,
            text: format!("task {id}"),
            description: None,
            checklist: vec![],
            category,
            status,
            added: "01/01/2026".into(),
            created_at: "2026-01-01T00:00:00.000Z".into(),
        }
    }

    fn board() -> Vec<Task> {
        vec![
            task(1, TaskCategory::Urgent, TaskStatus::Todo),
            task(2, TaskCategory::Admin, TaskStatus::Doing),
            task(3, TaskCategory::Creative, TaskStatus::Done),
        ]
    }

    #[test]
    fn drag_to_done_column_archives() {
        let mut tasks = board();
        let drag = DragSession::begin(&tasks, 1, BoardView::Status).unwrap();
        let done = DropTarget::Column(Column::Status(TaskStatus::Done));
        assert!(drag.hover(&mut tasks, done));
        assert_eq!(tasks[0].status, TaskStatus::Done);

        let patch = drag.drop_on(&mut tasks, Some(done)).unwrap();
        assert_eq!(patch.status, Some(TaskStatus::Archived));
        assert_eq!(patch.category, None);
    }

    #[test]
    fn drag_done_task_back_onto_done_still_archives() {
        let mut tasks = board();
        let drag = DragSession::begin(&tasks, 3, BoardView::Status).unwrap();
        let patch = drag
            .drop_on(&mut tasks, Some(DropTarget::Column(Column::Status(TaskStatus::Done))))
            .unwrap();
        assert_eq!(patch.status, Some(TaskStatus::Archived));
    }

    #[test]
    fn drop_in_original_column_is_noop() {
        let mut tasks = board();
        let drag = DragSession::begin(&tasks, 2, BoardView::Status).unwrap();
        drag.hover(&mut tasks, DropTarget::Column(Column::Status(TaskStatus::Todo)));
        drag.hover(&mut tasks, DropTarget::Column(Column::Status(TaskStatus::Doing)));
        let patch = drag.drop_on(
            &mut tasks,
            Some(DropTarget::Column(Column::Status(TaskStatus::Doing))),
        );
        assert!(patch.is_none());
        assert_eq!(tasks[1].status, TaskStatus::Doing);
    }

    #[test]
    fn drop_back_on_origin_undoes_stale_preview() {
        let mut tasks = board();
        let drag = DragSession::begin(&tasks, 1, BoardView::Category).unwrap();
        drag.hover(
            &mut tasks,
            DropTarget::Column(Column::Category(TaskCategory::Deadline)),
        );
        assert_eq!(tasks[0].category, TaskCategory::Deadline);

        let urgent = DropTarget::Column(Column::Category(TaskCategory::Urgent));
        assert!(drag.drop_on(&mut tasks, Some(urgent)).is_none());
        assert_eq!(tasks[0].category, TaskCategory::Urgent);
    }

    #[test]
    fn drop_onto_card_uses_card_column() {
        let mut tasks = board();
        let drag = DragSession::begin(&tasks, 1, BoardView::Category).unwrap();
        let patch = drag.drop_on(&mut tasks, Some(DropTarget::Task(2))).unwrap();
        assert_eq!(patch.category, Some(TaskCategory::Admin));
        assert_eq!(patch.status, None);
    }

    #[test]
    fn category_drop_compares_against_snapshot_not_preview() {
        let mut tasks = board();
        let drag = DragSession::begin(&tasks, 1, BoardView::Category).unwrap();
        let deadline = DropTarget::Column(Column::Category(TaskCategory::Deadline));
        drag.hover(&mut tasks, deadline);
        assert_eq!(tasks[0].category, TaskCategory::Deadline);

        // The preview already shows the new column, the patch must still fire.
        let patch = drag.drop_on(&mut tasks, Some(deadline)).unwrap();
        assert_eq!(patch.category, Some(TaskCategory::Deadline));
    }

    #[test]
    fn release_outside_rolls_back_preview() {
        let mut tasks = board();
        let drag = DragSession::begin(&tasks, 1, BoardView::Category).unwrap();
        drag.hover(
            &mut tasks,
            DropTarget::Column(Column::Category(TaskCategory::Creative)),
        );
        assert!(drag.drop_on(&mut tasks, None).is_none());
        assert_eq!(tasks[0].category, TaskCategory::Urgent);
    }

    #[test]
    fn status_columns_ignored_in_category_view() {
        let tasks = board();
        let target = DropTarget::Column(Column::Status(TaskStatus::Doing));
        assert_eq!(resolve_target(&tasks, target, BoardView::Category), None);
        let archived = DropTarget::Column(Column::Status(TaskStatus::Archived));
        assert_eq!(resolve_target(&tasks, archived, BoardView::Status), None);
    }

    #[test]
    fn restore_always_targets_todo() {
        let patch = TaskAction::Restore.patch(9);
        assert_eq!(patch.status, Some(TaskStatus::Todo));
        assert_eq!(TaskAction::Complete.patch(9).status, Some(TaskStatus::Done));
    }

    #[test]
    fn detail_actions_follow_status() {
        assert_eq!(detail_actions(TaskStatus::Todo), vec![TaskAction::Complete]);
        assert_eq!(
            detail_actions(TaskStatus::Done),
            vec![TaskAction::Archive, TaskAction::Reopen]
        );
        assert_eq!(detail_actions(TaskStatus::Archived), vec![TaskAction::Restore]);
    }

    #[test]
    fn archived_tasks_sit_in_no_column() {
        let archived = task(5, TaskCategory::Urgent, TaskStatus::Archived);
        for column in Column::for_view(BoardView::Category) {
            assert!(!column.contains(&archived));
        }
        assert_eq!(Column::for_view(BoardView::Status).len(), 3);
    }
}
