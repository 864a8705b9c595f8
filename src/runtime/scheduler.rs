use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::error::Result;

type Task = Box<dyn FnOnce() -> Result<()>>;

/// Identifier of a scheduled task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

struct SchedulerInner {
    now: Duration,
    next_id: u64,
    // keyed by (due time, id) so equal deadlines run in scheduling order
    queue: BTreeMap<(Duration, u64), Task>,
}

/// Single-threaded deferred task queue driven by a virtual clock.
///
/// Tasks never run on their own: the owner moves the clock forward with
/// [`advance`](Scheduler::advance) and every task whose deadline has passed
/// runs on the caller's thread, earliest first. There is no cancellation.
///
/// # Examples
///
/// ```
/// use ecoshop::runtime::Scheduler;
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
///
/// let scheduler = Scheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = fired.clone();
/// scheduler.schedule(Duration::from_millis(1000), move || {
///     flag.set(true);
///     Ok(())
/// });
///
/// scheduler.advance(Duration::from_millis(999)).unwrap();
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(1)).unwrap();
/// assert!(fired.get());
/// ```
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                now: Duration::ZERO,
                next_id: 0,
                queue: BTreeMap::new(),
            })),
        }
    }

    /// Current virtual time, measured from construction.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.inner.borrow().queue.len()
    }

    /// Run `task` once the clock has moved `delay` past the current time.
    pub fn schedule<F>(&self, delay: Duration, task: F) -> TaskId
    where
        F: FnOnce() -> Result<()> + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        let due = inner.now + delay;
        inner.queue.insert((due, id), Box::new(task));
        tracing::trace!(task = id, due_ms = due.as_millis() as u64, "task scheduled");
        TaskId(id)
    }

    /// Move the clock forward by `by`, running every task that falls due.
    ///
    /// Tasks scheduled by a running task are picked up in the same call if
    /// they fall within the window. If a task fails, the clock stays at that
    /// task's deadline, later tasks stay queued and the error is returned.
    pub fn advance(&self, by: Duration) -> Result<usize> {
        let target = self.now() + by;
        let mut ran = 0;
        while let Some(task) = self.pop_due(target) {
            task()?;
            ran += 1;
        }
        self.inner.borrow_mut().now = target;
        Ok(ran)
    }

    /// Run every queued task, moving the clock to the last deadline.
    pub fn run_until_idle(&self) -> Result<usize> {
        let mut ran = 0;
        while let Some(task) = self.pop_due(Duration::MAX) {
            task()?;
            ran += 1;
        }
        Ok(ran)
    }

    fn pop_due(&self, target: Duration) -> Option<Task> {
        let mut inner = self.inner.borrow_mut();
        let (&(due, id), _) = inner.queue.first_key_value()?;
        if due > target {
            return None;
        }
        let task = inner.queue.remove(&(due, id))?;
        inner.now = inner.now.max(due);
        tracing::trace!(task = id, "task due");
        Some(task)
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Scheduler {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn tasks_run_in_deadline_order() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        for (delay, name) in [(300, "c"), (100, "a"), (200, "b"), (100, "a2")] {
            let log = Rc::clone(&log);
            scheduler.schedule(ms(delay), move || {
                log.borrow_mut().push(name);
                Ok(())
            });
        }

        assert_eq!(scheduler.advance(ms(250)).unwrap(), 3);
        assert_eq!(*log.borrow(), vec!["a", "a2", "b"]);
        assert_eq!(scheduler.now(), ms(250));
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.run_until_idle().unwrap(), 1);
        assert_eq!(scheduler.now(), ms(300));
    }

    #[test]
    fn tasks_may_schedule_more_tasks() {
        let scheduler = Scheduler::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let chained = scheduler.clone();
        let log_outer = Rc::clone(&log);
        scheduler.schedule(ms(10), move || {
            log_outer.borrow_mut().push("outer");
            let log_inner = Rc::clone(&log_outer);
            chained.schedule(ms(10), move || {
                log_inner.borrow_mut().push("inner");
                Ok(())
            });
            Ok(())
        });

        assert_eq!(scheduler.advance(ms(25)).unwrap(), 2);
        assert_eq!(*log.borrow(), vec!["outer", "inner"]);
    }

    #[test]
    fn failing_task_leaves_the_rest_queued() {
        let scheduler = Scheduler::new();
        scheduler.schedule(ms(5), || Err(Error::UnknownProduct("p9".to_string())));
        scheduler.schedule(ms(6), || Ok(()));

        assert!(scheduler.advance(ms(10)).is_err());
        assert_eq!(scheduler.now(), ms(5));
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.advance(ms(5)).unwrap(), 1);
    }
}
