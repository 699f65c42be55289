use anyhow::{Result, bail};
use tracing::{debug, warn};

use braindump_shared::checklist;
use braindump_shared::kanban::{BoardView, Column, DragSession, DropTarget, TaskAction};
use braindump_shared::schemas::{NewTask, Task, TaskPatch};

use crate::api::ApiClient;

/// Client-side task board: a cache of the hub's task rows plus the drag in
/// progress, if any. Every mutation goes through the hub and the cached row
/// is replaced by the one the hub returns.
pub struct KanbanBoard {
    api: ApiClient,
    tasks: Vec<Task>,
    view: BoardView,
    drag: Option<DragSession>,
}

impl KanbanBoard {
    pub async fn load(api: ApiClient) -> Result<Self> {
        let tasks = api.list_tasks().await?;
        Ok(Self {
            api,
            tasks,
            view: BoardView::default(),
            drag: None,
        })
    }

    pub async fn refresh(&mut self) -> Result<()> {
        self.tasks = self.api.list_tasks().await?;
        Ok(())
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn view(&self) -> BoardView {
        self.view
    }

    /// Switching views abandons any drag in progress.
    pub fn set_view(&mut self, view: BoardView) {
        if let Some(drag) = self.drag.take() {
            drag.cancel(&mut self.tasks);
        }
        self.view = view;
    }

    pub fn column(&self, column: Column) -> Vec<&Task> {
        self.tasks.iter().filter(|t| column.contains(t)).collect()
    }

    pub fn archived(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.status.is_archived()).collect()
    }

    fn replace(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.insert(0, task),
        }
    }

    async fn persist(&mut self, patch: &TaskPatch) -> Result<()> {
        let updated = self.api.update_task(patch).await?;
        self.replace(updated);
        Ok(())
    }

    pub async fn add_task(&mut self, new: NewTask) -> Result<&Task> {
        if new.text.trim().is_empty() {
            bail!("task text cannot be empty");
        }
        let created = self.api.create_task(&new).await?;
        self.tasks.insert(0, created);
        Ok(&self.tasks[0])
    }

    /// Run a detail-view or archive-list action.
    pub async fn apply(&mut self, id: i64, action: TaskAction) -> Result<()> {
        self.persist(&action.patch(id)).await
    }

    /// Persist text, description or checklist edits.
    pub async fn edit(&mut self, patch: TaskPatch) -> Result<()> {
        if patch.is_empty() {
            return Ok(());
        }
        self.persist(&patch).await
    }

    pub async fn delete(&mut self, id: i64) -> Result<()> {
        self.api.delete_task(id).await?;
        self.tasks.retain(|t| t.id != id);
        Ok(())
    }

    fn checklist_of(&self, id: i64) -> Result<&[braindump_shared::schemas::ChecklistItem]> {
        match self.task(id) {
            Some(task) => Ok(&task.checklist),
            None => bail!("unknown task {id}"),
        }
    }

    /// Returns false when the text is blank and nothing was sent.
    pub async fn add_checklist_item(&mut self, id: i64, text: &str) -> Result<bool> {
        let Some(next) = checklist::add_item(self.checklist_of(id)?, text) else {
            return Ok(false);
        };
        self.persist(&TaskPatch::new(id).with_checklist(next)).await?;
        Ok(true)
    }

    pub async fn toggle_checklist_item(&mut self, id: i64, item_id: &str) -> Result<()> {
        let next = checklist::toggle_item(self.checklist_of(id)?, item_id);
        self.persist(&TaskPatch::new(id).with_checklist(next)).await
    }

    /// Returns false when the text is blank or the item is unknown.
    pub async fn rename_checklist_item(
        &mut self,
        id: i64,
        item_id: &str,
        text: &str,
    ) -> Result<bool> {
        let Some(next) = checklist::rename_item(self.checklist_of(id)?, item_id, text) else {
            return Ok(false);
        };
        self.persist(&TaskPatch::new(id).with_checklist(next)).await?;
        Ok(true)
    }

    pub async fn remove_checklist_item(&mut self, id: i64, item_id: &str) -> Result<()> {
        let next = checklist::remove_item(self.checklist_of(id)?, item_id);
        self.persist(&TaskPatch::new(id).with_checklist(next)).await
    }

    /// Pick up a card. A drag already in progress is abandoned first.
    pub fn drag_start(&mut self, id: i64) -> bool {
        if let Some(previous) = self.drag.take() {
            previous.cancel(&mut self.tasks);
        }
        self.drag = DragSession::begin(&self.tasks, id, self.view);
        self.drag.is_some()
    }

    /// Preview the card in the hovered column.
    pub fn drag_over(&mut self, target: DropTarget) -> bool {
        match self.drag {
            Some(ref drag) => drag.hover(&mut self.tasks, target),
            None => false,
        }
    }

    /// Release the card. `None` means released outside the board. At most
    /// one PATCH is sent; if it fails the card goes back where it started.
    pub async fn drag_end(&mut self, target: Option<DropTarget>) -> Result<Option<Task>> {
        let Some(drag) = self.drag.take() else {
            return Ok(None);
        };
        let rollback = drag.clone();

        let Some(patch) = drag.drop_on(&mut self.tasks, target) else {
            debug!(id = rollback.task_id(), "drop without change, preview reverted");
            return Ok(None);
        };

        match self.api.update_task(&patch).await {
            Ok(updated) => {
                self.replace(updated.clone());
                Ok(Some(updated))
            }
            Err(e) => {
                warn!(id = rollback.task_id(), error = %e, "drop not persisted, rolling back");
                rollback.cancel(&mut self.tasks);
                Err(e)
            }
        }
    }
}
