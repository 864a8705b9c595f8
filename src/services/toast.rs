use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::runtime::Scheduler;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
}

/// Number of past messages kept by [`Toasts::history`].
pub const HISTORY_LIMIT: usize = 64;

#[derive(Default)]
struct ToastsInner {
    active: Vec<Toast>,
    history: VecDeque<String>,
    // trailing history entries not yet handed out by `take_unreported`
    unreported: usize,
    next_id: u64,
}

/// Transient notifications.
///
/// Toasts live outside the store: showing or expiring one never triggers a
/// re-render.
#[derive(Clone)]
pub struct Toasts {
    inner: Rc<RefCell<ToastsInner>>,
    scheduler: Scheduler,
    ttl: Duration,
}

impl Toasts {
    pub fn new(scheduler: Scheduler, ttl: Duration) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ToastsInner::default())),
            scheduler,
            ttl,
        }
    }

    /// Show `message` and schedule its removal.
    pub fn show(&self, message: impl Into<String>) {
        let message = message.into();
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.active.push(Toast {
                id,
                message: message.clone(),
            });
            inner.history.push_back(message.clone());
            if inner.history.len() > HISTORY_LIMIT {
                inner.history.pop_front();
            }
            inner.unreported = (inner.unreported + 1).min(inner.history.len());
            id
        };
        tracing::info!(toast = id, %message, "toast shown");

        let inner = Rc::clone(&self.inner);
        self.scheduler.schedule(self.ttl, move || {
            inner.borrow_mut().active.retain(|t| t.id != id);
            Ok(())
        });
    }

    /// Messages currently visible, oldest first.
    pub fn active(&self) -> Vec<String> {
        self.inner
            .borrow()
            .active
            .iter()
            .map(|t| t.message.clone())
            .collect()
    }

    /// The most recent [`HISTORY_LIMIT`] messages, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.inner.borrow().history.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<String> {
        self.inner.borrow().history.back().cloned()
    }

    /// Messages shown since the previous call, oldest first.
    ///
    /// Messages that fell out of the history before being taken are lost.
    pub fn take_unreported(&self) -> Vec<String> {
        let mut inner = self.inner.borrow_mut();
        let skip = inner.history.len() - inner.unreported;
        inner.unreported = 0;
        inner.history.iter().skip(skip).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let scheduler = Scheduler::new();
        let toasts = Toasts::new(scheduler.clone(), Duration::from_millis(3000));

        toasts.show("first");
        scheduler.advance(Duration::from_millis(1000)).unwrap();
        toasts.show("second");
        assert_eq!(toasts.active(), vec!["first", "second"]);

        scheduler.advance(Duration::from_millis(2000)).unwrap();
        assert_eq!(toasts.active(), vec!["second"]);

        scheduler.advance(Duration::from_millis(1000)).unwrap();
        assert!(toasts.active().is_empty());
        assert_eq!(toasts.history(), vec!["first", "second"]);
        assert_eq!(toasts.last().as_deref(), Some("second"));
    }

    #[test]
    fn unreported_messages_are_handed_out_once() {
        let toasts = Toasts::new(Scheduler::new(), Duration::from_millis(3000));
        assert!(toasts.take_unreported().is_empty());

        toasts.show("one");
        toasts.show("two");
        assert_eq!(toasts.take_unreported(), vec!["one", "two"]);
        assert!(toasts.take_unreported().is_empty());

        toasts.show("three");
        assert_eq!(toasts.take_unreported(), vec!["three"]);
    }

    #[test]
    fn history_is_bounded() {
        let toasts = Toasts::new(Scheduler::new(), Duration::from_millis(3000));
        for i in 0..HISTORY_LIMIT + 10 {
            toasts.show(format!("toast {i}"));
        }

        let history = toasts.history();
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0], "toast 10");
        assert_eq!(toasts.take_unreported().len(), HISTORY_LIMIT);
        assert_eq!(
            toasts.last(),
            Some(format!("toast {}", HISTORY_LIMIT + 9))
        );
    }
}
