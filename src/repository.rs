//! Task repository: create, update, toggle, delete, and list over the store.

use crate::config::TaskListConfig;
use crate::error::{Result, ValidationError};
use crate::medium::{DirectoryMedium, Medium};
use crate::store::TaskStore;
use crate::types::{validate_text, Task, TaskId, TaskPatch, ValidatedPatch};
use parking_lot::Mutex;
use tracing::debug;

/// Result of a mutating call, paired with the collection after the call.
///
/// `tasks` is the collection the call tried to write (or, when nothing
/// changed, the one it read), so callers can refresh their view without
/// another load. `saved` is false when the write was attempted and failed;
/// storage then still holds the previous collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot<T> {
    pub value: T,
    pub tasks: Vec<Task>,
    pub saved: bool,
}

impl<T> Snapshot<T> {
    /// Nothing was written; `tasks` is what storage holds.
    fn unchanged(value: T, tasks: Vec<Task>) -> Self {
        Self {
            value,
            tasks,
            saved: true,
        }
    }
}

/// A directory-backed task list.
pub type TaskList = TaskRepository<DirectoryMedium>;

/// Task operations over a [`TaskStore`].
///
/// Every mutation loads the whole collection, changes it, and writes the
/// whole collection back. Unknown ids are reported through the return value,
/// never as errors, and nothing is written for them.
pub struct TaskRepository<M> {
    store: TaskStore<M>,

    /// Serializes load-modify-save cycles within this process.
    write_lock: Mutex<()>,
}

impl TaskRepository<DirectoryMedium> {
    /// Open (or create) a directory-backed task list.
    pub fn open(config: &TaskListConfig) -> Result<Self> {
        let medium = DirectoryMedium::open_or_create(config)?;
        Ok(Self::new(TaskStore::new(medium, config.key.clone())))
    }
}

impl<M: Medium> TaskRepository<M> {
    pub fn new(store: TaskStore<M>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &TaskStore<M> {
        &self.store
    }

    /// All tasks, newest first.
    pub fn list(&self) -> Vec<Task> {
        self.store.load()
    }

    /// Look up one task.
    pub fn get(&self, id: TaskId) -> Option<Task> {
        self.store.load().into_iter().find(|task| task.id == id)
    }

    /// Create a task from `text` and put it first.
    ///
    /// The text is trimmed and must be 1 to 200 UTF-16 units; invalid text
    /// is rejected before storage is touched.
    pub fn add(&self, text: &str) -> std::result::Result<Snapshot<Task>, ValidationError> {
        let text = validate_text(text)?;

        let _lock = self.write_lock.lock();
        let mut tasks = self.store.load();

        let mut id = TaskId::generate();
        while tasks.iter().any(|task| task.id == id) {
            id = TaskId::generate();
        }

        let task = Task::new(id, text);
        tasks.insert(0, task.clone());
        let saved = self.store.save(&tasks);
        debug!(id = %task.id, count = tasks.len(), saved, "added task");

        Ok(Snapshot {
            value: task,
            tasks,
            saved,
        })
    }

    /// Apply `patch` to the task with `id`.
    ///
    /// Only supplied fields change; `updated_at` is bumped even for an empty
    /// patch. Returns `None` in `value` when no task has that id.
    pub fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
    ) -> std::result::Result<Snapshot<Option<Task>>, ValidationError> {
        let patch = patch.validate()?;

        let _lock = self.write_lock.lock();
        let tasks = self.store.load();
        Ok(self.patch_by_id(tasks, id, patch))
    }

    /// Save an inline edit of a task's text.
    ///
    /// Text that trims to empty, or to the current text, cancels the edit:
    /// nothing is written and the task comes back unchanged. Over-long text
    /// is still rejected.
    pub fn edit_text(
        &self,
        id: TaskId,
        text: &str,
    ) -> std::result::Result<Snapshot<Option<Task>>, ValidationError> {
        let text = match validate_text(text) {
            Ok(text) => Some(text),
            Err(ValidationError::Empty) => None,
            Err(e) => return Err(e),
        };

        let _lock = self.write_lock.lock();
        let tasks = self.store.load();

        let Some(current) = tasks.iter().find(|task| task.id == id) else {
            debug!(%id, "edit: task not found");
            return Ok(Snapshot::unchanged(None, tasks));
        };

        match text {
            Some(text) if text != current.text => {
                Ok(self.patch_by_id(tasks, id, ValidatedPatch::text(text)))
            }
            _ => {
                let current = current.clone();
                Ok(Snapshot::unchanged(Some(current), tasks))
            }
        }
    }

    /// Flip the completion flag of the task with `id`.
    pub fn toggle(&self, id: TaskId) -> Snapshot<Option<Task>> {
        let _lock = self.write_lock.lock();
        let tasks = self.store.load();

        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            debug!(%id, "toggle: task not found");
            return Snapshot::unchanged(None, tasks);
        };

        let patch = ValidatedPatch::completed(!tasks[index].completed);
        self.patch_by_id(tasks, id, patch)
    }

    /// Remove the task with `id`. `value` is whether anything was removed.
    pub fn delete(&self, id: TaskId) -> Snapshot<bool> {
        let _lock = self.write_lock.lock();
        let mut tasks = self.store.load();

        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            debug!(%id, "delete: task not found");
            return Snapshot::unchanged(false, tasks);
        }

        let saved = self.store.save(&tasks);
        debug!(%id, count = tasks.len(), saved, "deleted task");

        Snapshot {
            value: true,
            tasks,
            saved,
        }
    }

    /// Patch the task with `id` in `tasks` and save.
    fn patch_by_id(
        &self,
        mut tasks: Vec<Task>,
        id: TaskId,
        patch: ValidatedPatch,
    ) -> Snapshot<Option<Task>> {
        let Some(index) = tasks.iter().position(|task| task.id == id) else {
            debug!(%id, "update: task not found");
            return Snapshot::unchanged(None, tasks);
        };

        tasks[index].apply(patch);
        let task = tasks[index].clone();

        let saved = self.store.save(&tasks);
        debug!(id = %task.id, completed = task.completed, saved, "updated task");

        Snapshot {
            value: Some(task),
            tasks,
            saved,
        }
    }
}
