use smallvec::SmallVec;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub type TaskId = u64;

struct Task {
    id: TaskId,
    due_millis: u64,
    callback: Box<dyn FnOnce()>,
}

struct SchedulerInner {
    now_millis: u64,
    next_id: TaskId,
    tasks: SmallVec<[Task; 4]>,
}

/// Deferred-task queue for a single UI thread.
///
/// Time does not flow on its own: the host calls [`Scheduler::advance_to`]
/// (or [`Scheduler::advance`]) as its clock ticks, and every task whose
/// deadline has passed runs, in deadline order, on the caller's thread.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now_millis: 0,
                next_id: 0,
                tasks: SmallVec::new(),
            })),
        }
    }

    /// Current scheduler time in milliseconds.
    pub fn now_millis(&self) -> u64 {
        self.inner.borrow().now_millis
    }

    pub fn pending_tasks(&self) -> usize {
        self.inner.borrow().tasks.len()
    }

    /// Schedule `callback` to run once `delay_millis` from now has elapsed.
    ///
    /// The returned registration cancels the task when dropped; call
    /// [`TaskRegistration::detach`] to let the task outlive the handle.
    pub fn run_after(
        &self,
        delay_millis: u64,
        callback: impl FnOnce() + 'static,
    ) -> TaskRegistration {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due_millis = inner.now_millis.saturating_add(delay_millis);
        log::trace!("scheduling task {} for t={}ms", id, due_millis);
        inner.tasks.push(Task {
            id,
            due_millis,
            callback: Box::new(callback),
        });
        TaskRegistration {
            scheduler: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Advance the clock to `target_millis`, running every task due on the way,
    /// in deadline order. Tasks scheduled by running tasks are honored within
    /// the same call when their deadline also falls before `target_millis`.
    pub fn advance_to(&self, target_millis: u64) {
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                if target_millis < inner.now_millis {
                    return;
                }
                let due_index = inner
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due_millis <= target_millis)
                    .min_by_key(|(_, task)| (task.due_millis, task.id))
                    .map(|(index, _)| index);
                match due_index {
                    Some(index) => {
                        let task = inner.tasks.swap_remove(index);
                        // The task observes its own deadline as "now".
                        inner.now_millis = inner.now_millis.max(task.due_millis);
                        Some(task)
                    }
                    None => {
                        inner.now_millis = target_millis;
                        None
                    }
                }
            };
            match next {
                // Borrow released: the task may schedule or cancel freely.
                Some(task) => {
                    log::trace!("running task {} at t={}ms", task.id, task.due_millis);
                    (task.callback)();
                }
                None => return,
            }
        }
    }

    /// Advance the clock by `delta_millis`.
    pub fn advance(&self, delta_millis: u64) {
        let target = self.now_millis().saturating_add(delta_millis);
        self.advance_to(target);
    }

    fn cancel(inner: &Weak<RefCell<SchedulerInner>>, id: TaskId) {
        if let Some(inner) = inner.upgrade() {
            let mut inner = inner.borrow_mut();
            if let Some(index) = inner.tasks.iter().position(|task| task.id == id) {
                log::trace!("cancelling task {}", id);
                inner.tasks.swap_remove(index);
            }
        }
    }
}

/// Handle to a scheduled task. Dropping it cancels the task unless it has been
/// detached.
pub struct TaskRegistration {
    scheduler: Weak<RefCell<SchedulerInner>>,
    id: Option<TaskId>,
}

impl TaskRegistration {
    pub fn cancel(mut self) {
        if let Some(id) = self.id.take() {
            Scheduler::cancel(&self.scheduler, id);
        }
    }

    /// Forget the handle without cancelling: the task will run at its deadline.
    pub fn detach(mut self) {
        self.id.take();
    }
}

impl Drop for TaskRegistration {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            Scheduler::cancel(&self.scheduler, id);
        }
    }
}

#[cfg(test)]
#[path = "tests/scheduler_tests.rs"]
mod tests;
