//! Task List Orchestrator
//!
//! Owns the local task collection for the active view. Every mutation goes
//! to the remote service first; the local list changes only after the
//! service confirms, so a failed operation leaves it exactly as it was.
//!
//! Overlapping requests on one task id are refused with `TaskBusy` rather
//! than raced. After `detach` (the view went away) late responses are
//! dropped instead of applied.

mod pulse;

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

use log::debug;

use crate::api::TaskApi;
use crate::domain::{AppError, AppResult, NewTask, Task, TaskId, TaskPatch};

pub use pulse::{Scheduler, TimerHandle, PULSE_DURATION};

struct ActivePulse {
    task_id: TaskId,
    generation: u64,
    timer: Box<dyn TimerHandle>,
}

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    in_flight: HashSet<TaskId>,
    pulse: Option<ActivePulse>,
    pulse_generation: u64,
    detached: bool,
    on_change: Option<Rc<dyn Fn()>>,
}

impl Inner {
    fn replace(&mut self, task: Task) {
        if let Some(slot) = self.tasks.iter_mut().find(|t| t.id == task.id) {
            *slot = task;
        }
    }

    fn upsert(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }
}

/// Marks a task id busy until dropped
struct Flight {
    inner: Rc<RefCell<Inner>>,
    task_id: TaskId,
}

impl Drop for Flight {
    fn drop(&mut self) {
        self.inner.borrow_mut().in_flight.remove(&self.task_id);
    }
}

/// Cheap to clone; clones share one list
#[derive(Clone)]
pub struct TaskList {
    api: TaskApi,
    scheduler: Rc<dyn Scheduler>,
    inner: Rc<RefCell<Inner>>,
}

impl TaskList {
    pub fn new(api: TaskApi, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            api,
            scheduler,
            inner: Rc::new(RefCell::new(Inner::default())),
        }
    }

    /// Called after every applied change (including a pulse ending)
    pub fn set_on_change(&self, listener: impl Fn() + 'static) {
        self.inner.borrow_mut().on_change = Some(Rc::new(listener));
    }

    /// Snapshot of the local list in display order
    pub fn tasks(&self) -> Vec<Task> {
        self.inner.borrow().tasks.clone()
    }

    pub fn find(&self, task_id: TaskId) -> Option<Task> {
        self.inner.borrow().tasks.iter().find(|t| t.id == task_id).cloned()
    }

    /// Task currently showing the toggle pulse
    pub fn pulsing(&self) -> Option<TaskId> {
        self.inner.borrow().pulse.as_ref().map(|p| p.task_id)
    }

    pub fn is_busy(&self, task_id: TaskId) -> bool {
        self.inner.borrow().in_flight.contains(&task_id)
    }

    /// Replace the whole list with the service's; keeps the old list on error
    pub async fn load_all(&self) -> AppResult<()> {
        let tasks = self.api.list().await?;
        debug!("loaded {} tasks", tasks.len());
        self.commit(move |inner| inner.tasks = tasks);
        Ok(())
    }

    /// Create a task; it is appended once the service assigns its id
    pub async fn create(&self, title: &str, description: Option<&str>) -> AppResult<Task> {
        let new_task = NewTask::new(title, description)?;
        let created = self.api.create(&new_task).await?;
        let task = created.clone();
        self.commit(move |inner| inner.upsert(task));
        Ok(created)
    }

    /// Flip the cached completion flag and pulse the task
    pub async fn toggle_completion(&self, task_id: TaskId) -> AppResult<Task> {
        let current = self
            .find(task_id)
            .ok_or(AppError::UnknownTask(task_id))?;
        self.set_completion(task_id, !current.is_finished).await
    }

    /// Send an explicit completion flag and pulse the task
    ///
    /// For callers holding a fresher copy than the list, e.g. one from
    /// [`TaskList::fetch_one`]. A task missing from the list is only updated
    /// on the service.
    pub async fn set_completion(&self, task_id: TaskId, is_finished: bool) -> AppResult<Task> {
        let _flight = self.begin_flight(task_id)?;

        let updated = self.api.update_status(task_id, is_finished).await?;
        let task = updated.clone();
        if self.commit(move |inner| inner.replace(task)) {
            self.start_pulse(task_id);
        }
        Ok(updated)
    }

    /// Edit title and/or description
    pub async fn update_fields(
        &self,
        task_id: TaskId,
        title: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Task> {
        let patch = TaskPatch::new(title, description)?;
        let _flight = self.begin_flight(task_id)?;

        let updated = self.api.update(task_id, &patch).await?;
        let task = updated.clone();
        self.commit(move |inner| inner.replace(task));
        Ok(updated)
    }

    /// Delete a task; a pending pulse for it is cancelled
    pub async fn delete(&self, task_id: TaskId) -> AppResult<()> {
        let _flight = self.begin_flight(task_id)?;
        self.api.delete(task_id).await?;

        let mut cancelled = None;
        self.commit(|inner| {
            inner.tasks.retain(|t| t.id != task_id);
            if inner.pulse.as_ref().is_some_and(|p| p.task_id == task_id) {
                cancelled = inner.pulse.take();
            }
        });
        if let Some(pulse) = cancelled {
            pulse.timer.cancel();
        }
        Ok(())
    }

    /// Current server-side state of one task; the local list is untouched
    pub async fn fetch_one(&self, task_id: TaskId) -> AppResult<Task> {
        self.api.get(task_id).await
    }

    /// The owning view is gone: drop late responses, stop notifying,
    /// cancel the pending pulse timer
    pub fn detach(&self) {
        let pulse = {
            let mut inner = self.inner.borrow_mut();
            inner.detached = true;
            inner.on_change = None;
            inner.pulse.take()
        };
        if let Some(pulse) = pulse {
            pulse.timer.cancel();
        }
    }

    fn begin_flight(&self, task_id: TaskId) -> AppResult<Flight> {
        if !self.inner.borrow_mut().in_flight.insert(task_id) {
            debug!("task {task_id} busy, refusing overlapping request");
            return Err(AppError::TaskBusy(task_id));
        }
        Ok(Flight {
            inner: Rc::clone(&self.inner),
            task_id,
        })
    }

    /// Apply a confirmed change and notify; false when detached
    fn commit(&self, mutate: impl FnOnce(&mut Inner)) -> bool {
        let on_change = {
            let mut inner = self.inner.borrow_mut();
            if inner.detached {
                debug!("view detached, dropping response");
                return false;
            }
            mutate(&mut inner);
            inner.on_change.clone()
        };
        if let Some(listener) = on_change {
            listener();
        }
        true
    }

    fn start_pulse(&self, task_id: TaskId) {
        let generation = {
            let mut inner = self.inner.borrow_mut();
            inner.pulse_generation += 1;
            inner.pulse_generation
        };

        let weak = Rc::downgrade(&self.inner);
        let timer = self.scheduler.schedule(
            PULSE_DURATION,
            Box::new(move || expire_pulse(&weak, generation)),
        );

        let (previous, on_change) = {
            let mut inner = self.inner.borrow_mut();
            let previous = inner.pulse.replace(ActivePulse {
                task_id,
                generation,
                timer,
            });
            (previous, inner.on_change.clone())
        };
        if let Some(previous) = previous {
            previous.timer.cancel();
        }
        if let Some(listener) = on_change {
            listener();
        }
    }
}

fn expire_pulse(inner: &Weak<RefCell<Inner>>, generation: u64) {
    let Some(inner) = inner.upgrade() else {
        return;
    };
    let on_change = {
        let mut state = inner.borrow_mut();
        if !state
            .pulse
            .as_ref()
            .is_some_and(|p| p.generation == generation)
        {
            return;
        }
        state.pulse = None;
        state.on_change.clone()
    };
    if let Some(listener) = on_change {
        listener();
    }
}
