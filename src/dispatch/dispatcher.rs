use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use chrono::Utc;

use super::Surface;
use crate::catalog::SharedCatalog;
use crate::error::Result;
use crate::store::{StateKey, Store, Subscription};
use crate::view::{render_app, ViewContext, ViewOptions};

/// Recomputes the whole interface whenever a watched key is written.
///
/// The dispatcher subscribes to the route, cart and cart-overlay keys only.
/// Search text, the community tab and the chat transcript are picked up the
/// next time one of those keys is written.
///
/// If rendering fails, nothing is committed and the error is returned to
/// whoever performed the write. The store keeps the written value.
///
/// # Examples
///
/// ```
/// use ecoshop::catalog::Catalog;
/// use ecoshop::dispatch::{MemorySurface, RenderDispatcher};
/// use ecoshop::store::{Route, StateKey, Store};
/// use ecoshop::view::ViewOptions;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let store = Store::new();
/// let surface = Rc::new(RefCell::new(MemorySurface::new()));
/// let dispatcher = RenderDispatcher::new(
///     store.clone(),
///     Catalog::builtin().shared(),
///     surface.clone(),
///     ViewOptions::default(),
/// );
/// dispatcher.install();
///
/// store.write(StateKey::CurrentRoute, Route::Dashboard).unwrap();
/// assert_eq!(dispatcher.renders(), 1);
/// assert!(surface.borrow().current().unwrap().contains("Monthly Progress"));
/// ```
pub struct RenderDispatcher {
    store: Store,
    catalog: SharedCatalog,
    surface: Rc<RefCell<dyn Surface>>,
    options: ViewOptions,
    renders: Cell<u64>,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl RenderDispatcher {
    /// Keys whose writes trigger a full recomputation.
    pub const TRIGGERS: [StateKey; 3] = [StateKey::CurrentRoute, StateKey::Cart, StateKey::ShowCart];

    pub fn new(
        store: Store,
        catalog: SharedCatalog,
        surface: Rc<RefCell<dyn Surface>>,
        options: ViewOptions,
    ) -> Rc<Self> {
        Rc::new(Self {
            store,
            catalog,
            surface,
            options,
            renders: Cell::new(0),
            subscriptions: RefCell::new(Vec::new()),
        })
    }

    /// Subscribe to the trigger keys. Calling it again replaces the previous
    /// registrations instead of adding more.
    pub fn install(self: &Rc<Self>) {
        self.detach();

        let subscriptions = Self::TRIGGERS
            .iter()
            .map(|&key| {
                let weak: Weak<Self> = Rc::downgrade(self);
                self.store.subscribe(key, move |_| match weak.upgrade() {
                    Some(dispatcher) => dispatcher.refresh(),
                    None => Ok(()),
                })
            })
            .collect();
        *self.subscriptions.borrow_mut() = subscriptions;
    }

    /// Remove the dispatcher's subscriptions.
    pub fn detach(&self) {
        for subscription in self.subscriptions.borrow_mut().drain(..) {
            subscription.unsubscribe();
        }
    }

    /// Recompute the interface from the current state and commit it.
    pub fn refresh(&self) -> Result<()> {
        let state = self.store.snapshot();
        let frame = {
            let catalog = self.catalog.borrow();
            let ctx = ViewContext {
                state: &state,
                catalog: &catalog,
                options: self.options,
                now: Utc::now(),
            };
            render_app(&ctx).inspect_err(|err| {
                tracing::warn!(route = %state.route, error = %err, "render failed, keeping previous frame");
            })?
        };

        self.surface.borrow_mut().commit(&frame)?;
        let renders = self.renders.get() + 1;
        self.renders.set(renders);
        tracing::debug!(route = %state.route, renders, bytes = frame.len(), "frame committed");
        Ok(())
    }

    /// Number of frames committed so far.
    pub fn renders(&self) -> u64 {
        self.renders.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::dispatch::MemorySurface;
    use crate::error::Error;
    use crate::store::{CartLine, ChatMessage, Route};

    fn setup() -> (Store, Rc<RenderDispatcher>, Rc<RefCell<MemorySurface>>) {
        let store = Store::new();
        store.write(StateKey::CurrentRoute, Route::Home).unwrap();
        let surface = Rc::new(RefCell::new(MemorySurface::new()));
        let dispatcher = RenderDispatcher::new(
            store.clone(),
            Catalog::builtin().shared(),
            surface.clone(),
            ViewOptions::default(),
        );
        dispatcher.install();
        (store, dispatcher, surface)
    }

    #[test]
    fn only_trigger_keys_render() {
        let (store, dispatcher, surface) = setup();

        store.write(StateKey::SearchQuery, "mat").unwrap();
        store.write(StateKey::ChatTranscript, Vec::<ChatMessage>::new()).unwrap();
        assert_eq!(dispatcher.renders(), 0);

        store.write(StateKey::ShowCart, true).unwrap();
        store.write(StateKey::Cart, Vec::<CartLine>::new()).unwrap();
        store.write(StateKey::CurrentRoute, Route::Shop).unwrap();
        assert_eq!(dispatcher.renders(), 3);
        assert_eq!(surface.borrow().commits(), 3);
    }

    #[test]
    fn install_twice_does_not_double_render() {
        let (store, dispatcher, _) = setup();
        dispatcher.install();
        assert_eq!(store.subscriber_count(StateKey::Cart), 1);

        store.write(StateKey::ShowCart, false).unwrap();
        assert_eq!(dispatcher.renders(), 1);
    }

    #[test]
    fn failed_render_keeps_previous_frame() {
        let (store, dispatcher, surface) = setup();
        store.write(StateKey::CurrentRoute, Route::Dashboard).unwrap();
        let before = surface.borrow().current().map(str::to_string);

        let err = store
            .write(StateKey::Cart, vec![CartLine::new("p404", 1)])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownProduct(_)));
        assert_eq!(surface.borrow().current().map(str::to_string), before);
        assert_eq!(dispatcher.renders(), 1);
        assert_eq!(store.cart(), vec![CartLine::new("p404", 1)]);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogBuffer {
        type Writer = LogBuffer;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn failed_render_warns_once() {
        let (store, _dispatcher, _) = setup();
        let logs = LogBuffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            store
                .write(StateKey::Cart, vec![CartLine::new("p404", 1)])
                .unwrap_err();
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        let warnings: Vec<&str> = output.lines().filter(|l| l.contains("WARN")).collect();
        assert_eq!(warnings.len(), 1, "{output}");
        assert!(warnings[0].contains("route=home"));
    }

    #[test]
    fn detach_stops_rendering() {
        let (store, dispatcher, _) = setup();
        dispatcher.detach();
        store.write(StateKey::CurrentRoute, Route::Shop).unwrap();
        assert_eq!(dispatcher.renders(), 0);
    }
}
