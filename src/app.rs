//! The assembled storefront.
//!
//! [`App`] owns the store, the catalog, the scheduler and the services, and
//! installs the [`RenderDispatcher`] so every write to a watched key yields a
//! fresh frame on the configured surface.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::catalog::SharedCatalog;
use crate::command::Command;
use crate::config::AppConfig;
use crate::dispatch::{RenderDispatcher, Surface};
use crate::error::Result;
use crate::runtime::Scheduler;
use crate::services::{CartService, CommunityService, EcoGuide, Toasts};
use crate::store::{CartLine, CommunityTab, Route, StateKey, Store};
use crate::view::ViewOptions;

pub struct App {
    store: Store,
    catalog: SharedCatalog,
    scheduler: Scheduler,
    toasts: Toasts,
    cart: CartService,
    community: CommunityService,
    guide: EcoGuide,
    dispatcher: Rc<RenderDispatcher>,
}

impl App {
    /// Build the application and seed the store.
    ///
    /// Nothing is rendered until [`App::start`].
    pub fn new(config: &AppConfig, surface: Rc<RefCell<dyn Surface>>) -> Result<Self> {
        let catalog = config.catalog()?.shared();
        let store = Store::new();
        let scheduler = Scheduler::new();
        let toasts = Toasts::new(scheduler.clone(), config.toast_ttl());

        store.write(StateKey::CurrentRoute, config.initial_route)?;
        store.write(StateKey::Cart, Vec::<CartLine>::new())?;
        store.write(StateKey::SearchQuery, "")?;
        store.write(StateKey::ShowCart, false)?;

        let dispatcher = RenderDispatcher::new(
            store.clone(),
            Rc::clone(&catalog),
            surface,
            ViewOptions::from(config),
        );
        dispatcher.install();

        let cart = CartService::new(store.clone(), Rc::clone(&catalog), toasts.clone());
        let community = CommunityService::new(store.clone(), Rc::clone(&catalog), toasts.clone());
        let guide = EcoGuide::new(
            store.clone(),
            scheduler.clone(),
            config.reply_delay(),
            config.rng_seed,
        );

        tracing::info!(route = %config.initial_route, "app initialised");
        Ok(Self {
            store,
            catalog,
            scheduler,
            toasts,
            cart,
            community,
            guide,
            dispatcher,
        })
    }

    /// Draw the first frame.
    pub fn start(&self) -> Result<()> {
        self.dispatcher.refresh()
    }

    pub fn navigate(&self, route: Route) -> Result<()> {
        tracing::debug!(%route, "navigate");
        self.store.write(StateKey::CurrentRoute, route)
    }

    /// Navigate by route name; unknown names land on the home page.
    pub fn navigate_to(&self, name: &str) -> Result<()> {
        self.navigate(Route::from_name(name))
    }

    pub fn toggle_cart(&self) -> Result<()> {
        self.store.write(StateKey::ShowCart, !self.store.show_cart())
    }

    /// Store the query and open the shop. Blank input is ignored.
    pub fn search(&self, query: &str) -> Result<bool> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(false);
        }
        self.store.write(StateKey::SearchQuery, query)?;
        self.navigate(Route::Shop)?;
        Ok(true)
    }

    pub fn set_community_tab(&self, tab: CommunityTab) -> Result<()> {
        self.community.set_tab(tab)
    }

    pub fn view_product(&self, product_id: &str) -> bool {
        let name = self
            .catalog
            .borrow()
            .product(product_id)
            .map(|p| p.name.clone());
        match name {
            Some(name) => {
                self.toasts
                    .show(format!("Viewing {name} - Feature coming soon!"));
                true
            }
            None => {
                tracing::debug!(product = product_id, "view ignored: unknown product");
                false
            }
        }
    }

    pub fn filter_by_category(&self, category: Option<&str>) {
        let label = match category {
            Some(id) => self.catalog.borrow().category_name(id).to_string(),
            None => "All".to_string(),
        };
        self.toasts.show(format!("Filtering by category: {label}"));
    }

    pub fn filter_by_sustainability(&self, min_score: Option<u8>) {
        let label = min_score.map_or_else(|| "All".to_string(), |score| format!("{score}+"));
        self.toasts
            .show(format!("Filtering by sustainability score: {label}"));
    }

    pub fn checkout(&self) -> Result<()> {
        self.toasts.show("Checkout feature coming soon! 🛒");
        self.toggle_cart()
    }

    /// Move the virtual clock forward, running every task that falls due.
    pub fn advance(&self, millis: u64) -> Result<usize> {
        self.scheduler.advance(Duration::from_millis(millis))
    }

    /// Apply a parsed command. `help` and `quit` are left to the caller.
    pub fn execute(&self, command: &Command) -> Result<()> {
        match command {
            Command::Navigate(route) => self.navigate(*route)?,
            Command::ToggleCart => self.toggle_cart()?,
            Command::Add(id) => {
                self.cart.add(id)?;
            }
            Command::Remove(id) => self.cart.remove(id)?,
            Command::Quantity {
                product_id,
                quantity,
            } => self.cart.update_quantity(product_id, *quantity)?,
            Command::Search(query) => {
                self.search(query)?;
            }
            Command::Tab(tab) => self.set_community_tab(*tab)?,
            Command::Like(post) => {
                self.community.toggle_like(post)?;
            }
            Command::Post => self.community.create_post(),
            Command::Join(challenge) => self.community.join_challenge(challenge),
            Command::View(id) => {
                self.view_product(id);
            }
            Command::Category(id) => self.filter_by_category(id.as_deref()),
            Command::EcoScore(min) => self.filter_by_sustainability(*min),
            Command::Say(text) => {
                self.guide.send(text)?;
            }
            Command::Checkout => self.checkout()?,
            Command::Wait(millis) => {
                self.advance(*millis)?;
            }
            Command::Help | Command::Quit => {}
        }
        Ok(())
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn cart(&self) -> &CartService {
        &self.cart
    }

    pub fn community(&self) -> &CommunityService {
        &self.community
    }

    pub fn guide(&self) -> &EcoGuide {
        &self.guide
    }

    pub fn dispatcher(&self) -> &RenderDispatcher {
        &self.dispatcher
    }
}
