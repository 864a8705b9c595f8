use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use super::state::{
    CartLine, ChatMessage, CommunityTab, Route, Snapshot, StateKey, StateValue,
};
use crate::error::Result;

type Subscriber = Rc<dyn Fn(&StateValue) -> Result<()>>;

struct Registration {
    id: u64,
    callback: Subscriber,
}

struct StoreInner {
    state: HashMap<StateKey, StateValue>,
    subscribers: HashMap<StateKey, Vec<Registration>>,
    next_id: u64,
}

/// A keyed state container with per-key subscriber lists.
///
/// Every [`write`](Store::write) replaces the value and synchronously calls
/// the key's subscribers in registration order. There is no diffing and no
/// batching: writing an identical value notifies again, and two writes
/// notify twice.
///
/// `Store` is a cheap handle; clones share the same state. It is
/// single-threaded by construction (`!Send`).
pub struct Store {
    inner: Rc<RefCell<StoreInner>>,
}

impl Store {
    /// Create an empty store. Keys come into existence on first write.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state: HashMap::new(),
                subscribers: HashMap::new(),
                next_id: 0,
            })),
        }
    }

    /// Get a clone of the value stored under `key`, `None` if it was never
    /// written.
    pub fn read(&self, key: StateKey) -> Option<StateValue> {
        self.inner.borrow().state.get(&key).cloned()
    }

    /// Read a value without cloning it. `f` must not touch the store.
    pub(crate) fn with<F, R>(&self, key: StateKey, f: F) -> R
    where
        F: FnOnce(Option<&StateValue>) -> R,
    {
        let inner = self.inner.borrow();
        f(inner.state.get(&key))
    }

    /// Replace the value under `key` and notify its subscribers.
    ///
    /// Subscribers registered when the write starts are called in order with
    /// the new value. The first subscriber error stops the pass and is
    /// returned; the new value stays in place.
    pub fn write(&self, key: StateKey, value: impl Into<StateValue>) -> Result<()> {
        let value = value.into();
        let subscribers: Vec<Subscriber> = {
            let mut inner = self.inner.borrow_mut();
            inner.state.insert(key, value.clone());
            inner
                .subscribers
                .get(&key)
                .map(|list| list.iter().map(|r| Rc::clone(&r.callback)).collect())
                .unwrap_or_default()
        };

        tracing::trace!(key = %key, subscribers = subscribers.len(), "state write");

        for subscriber in subscribers {
            if let Err(err) = subscriber(&value) {
                tracing::debug!(key = %key, error = %err, "subscriber failed after state write");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Write the current value of `key` back, notifying its subscribers.
    ///
    /// Does nothing when the key was never written.
    pub fn touch(&self, key: StateKey) -> Result<()> {
        match self.read(key) {
            Some(value) => self.write(key, value),
            None => Ok(()),
        }
    }

    /// Subscribe to writes on `key`.
    ///
    /// The same closure may be registered more than once; each registration
    /// is invoked separately and removed by its own handle.
    pub fn subscribe<F>(&self, key: StateKey, callback: F) -> Subscription
    where
        F: Fn(&StateValue) -> Result<()> + 'static,
    {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner
            .subscribers
            .entry(key)
            .or_default()
            .push(Registration {
                id,
                callback: Rc::new(callback),
            });
        tracing::debug!(key = %key, id, "subscribed");

        Subscription {
            key,
            id,
            store: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live registrations on `key`.
    pub fn subscriber_count(&self, key: StateKey) -> usize {
        self.inner
            .borrow()
            .subscribers
            .get(&key)
            .map_or(0, Vec::len)
    }

    pub fn route(&self) -> Route {
        self.with(StateKey::CurrentRoute, |v| v.and_then(StateValue::as_route))
            .unwrap_or_default()
    }

    pub fn cart(&self) -> Vec<CartLine> {
        self.with(StateKey::Cart, |v| {
            v.and_then(StateValue::as_cart).map(<[CartLine]>::to_vec)
        })
        .unwrap_or_default()
    }

    pub fn search_query(&self) -> String {
        self.with(StateKey::SearchQuery, |v| {
            v.and_then(StateValue::as_text).map(str::to_string)
        })
        .unwrap_or_default()
    }

    pub fn show_cart(&self) -> bool {
        self.with(StateKey::ShowCart, |v| v.and_then(StateValue::as_flag))
            .unwrap_or(false)
    }

    pub fn community_tab(&self) -> CommunityTab {
        self.with(StateKey::CommunityTab, |v| v.and_then(StateValue::as_tab))
            .unwrap_or_default()
    }

    /// The chat transcript, or the greeting-only transcript if nothing was
    /// written yet.
    pub fn chat_transcript(&self) -> Vec<ChatMessage> {
        self.with(StateKey::ChatTranscript, |v| {
            v.and_then(StateValue::as_transcript)
                .map(<[ChatMessage]>::to_vec)
        })
        .unwrap_or_else(ChatMessage::default_transcript)
    }

    /// Resolve every known key into a [`Snapshot`].
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            route: self.route(),
            cart: self.cart(),
            search_query: self.search_query(),
            show_cart: self.show_cart(),
            community_tab: self.community_tab(),
            transcript: self.chat_transcript(),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Handle returned by [`Store::subscribe`].
///
/// Dropping the handle keeps the registration alive; call
/// [`unsubscribe`](Subscription::unsubscribe) to remove it.
pub struct Subscription {
    key: StateKey,
    id: u64,
    store: Weak<RefCell<StoreInner>>,
}

impl Subscription {
    pub fn key(&self) -> StateKey {
        self.key
    }

    /// Remove this registration. Calling it again has no effect.
    ///
    /// A notification pass that is already running still reaches the
    /// callback; later writes do not.
    pub fn unsubscribe(&self) {
        let Some(store) = self.store.upgrade() else {
            return;
        };
        let mut inner = store.borrow_mut();
        if let Some(list) = inner.subscribers.get_mut(&self.key) {
            let before = list.len();
            list.retain(|r| r.id != self.id);
            if list.len() != before {
                tracing::debug!(key = %self.key, id = self.id, "unsubscribed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::{Cell, RefCell};

    fn recorder(log: &Rc<RefCell<Vec<String>>>, name: &'static str) -> impl Fn(&StateValue) -> Result<()> {
        let log = Rc::clone(log);
        move |value| {
            log.borrow_mut().push(format!("{name}:{value:?}"));
            Ok(())
        }
    }

    #[test]
    fn store_read_write() {
        let store = Store::new();
        assert_eq!(store.read(StateKey::SearchQuery), None);

        store.write(StateKey::SearchQuery, "bamboo").unwrap();
        assert_eq!(
            store.read(StateKey::SearchQuery),
            Some(StateValue::Text("bamboo".to_string()))
        );
        assert_eq!(store.search_query(), "bamboo");
    }

    #[test]
    fn store_subscribe_in_order() {
        let store = Store::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let _a = store.subscribe(StateKey::ShowCart, recorder(&log, "a"));
        let _b = store.subscribe(StateKey::ShowCart, recorder(&log, "b"));
        let _c = store.subscribe(StateKey::ShowCart, recorder(&log, "c"));

        store.write(StateKey::ShowCart, true).unwrap();
        assert_eq!(
            *log.borrow(),
            vec!["a:Flag(true)", "b:Flag(true)", "c:Flag(true)"]
        );
    }

    #[test]
    fn identical_write_still_notifies() {
        let store = Store::new();
        let count = Rc::new(Cell::new(0));
        let count_clone = Rc::clone(&count);
        let _sub = store.subscribe(StateKey::CurrentRoute, move |_| {
            count_clone.set(count_clone.get() + 1);
            Ok(())
        });

        store.write(StateKey::CurrentRoute, Route::Shop).unwrap();
        store.write(StateKey::CurrentRoute, Route::Shop).unwrap();
        store.touch(StateKey::CurrentRoute).unwrap();
        assert_eq!(count.get(), 3);
    }

    #[test]
    fn touch_on_absent_key_is_silent() {
        let store = Store::new();
        let count = Rc::new(Cell::new(0));
        let count_clone = Rc::clone(&count);
        let _sub = store.subscribe(StateKey::CommunityTab, move |_| {
            count_clone.set(count_clone.get() + 1);
            Ok(())
        });

        store.touch(StateKey::CommunityTab).unwrap();
        assert_eq!(count.get(), 0);
        assert_eq!(store.read(StateKey::CommunityTab), None);
    }

    #[test]
    fn failing_subscriber_stops_the_pass_but_keeps_the_value() {
        let store = Store::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let _a = store.subscribe(StateKey::Cart, recorder(&log, "a"));
        let _b = store.subscribe(StateKey::Cart, |_| {
            Err(Error::UnknownProduct("ghost".to_string()))
        });
        let _c = store.subscribe(StateKey::Cart, recorder(&log, "c"));

        let result = store.write(StateKey::Cart, vec![CartLine::new("ghost", 1)]);
        assert!(matches!(result, Err(Error::UnknownProduct(id)) if id == "ghost"));
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(store.cart(), vec![CartLine::new("ghost", 1)]);
    }

    #[test]
    fn reentrant_write_from_subscriber() {
        let store = Store::new();
        let inner_store = store.clone();
        let _sub = store.subscribe(StateKey::SearchQuery, move |value| {
            if value.as_text().is_some_and(|q| !q.is_empty()) {
                inner_store.write(StateKey::CurrentRoute, Route::Shop)?;
            }
            Ok(())
        });

        store.write(StateKey::SearchQuery, "mat").unwrap();
        assert_eq!(store.route(), Route::Shop);
    }

    #[test]
    fn unsubscribe_during_pass_only_affects_later_writes() {
        let store = Store::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let handle: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let handle_clone = Rc::clone(&handle);
        let _first = store.subscribe(StateKey::ShowCart, move |_| {
            if let Some(sub) = handle_clone.borrow().as_ref() {
                sub.unsubscribe();
            }
            Ok(())
        });
        *handle.borrow_mut() = Some(store.subscribe(StateKey::ShowCart, recorder(&log, "late")));

        store.write(StateKey::ShowCart, true).unwrap();
        assert_eq!(log.borrow().len(), 1);

        store.write(StateKey::ShowCart, false).unwrap();
        assert_eq!(log.borrow().len(), 1);
        assert_eq!(store.subscriber_count(StateKey::ShowCart), 1);
    }

    #[test]
    fn typed_accessors_fall_back_to_defaults() {
        let store = Store::new();
        assert_eq!(store.route(), Route::Home);
        assert!(store.cart().is_empty());
        assert!(!store.show_cart());
        assert_eq!(store.community_tab(), CommunityTab::Feed);
        assert_eq!(store.chat_transcript(), ChatMessage::default_transcript());

        // a value of the wrong shape reads like an absent key
        store.write(StateKey::CurrentRoute, true).unwrap();
        assert_eq!(store.route(), Route::Home);
    }
}
