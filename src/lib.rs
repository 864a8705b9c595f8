//! # EcoShop
//!
//! A keyed publish/subscribe store driving a full-frame text storefront.
//!
//! The crate is organised in two layers:
//!
//! ## Store (state core)
//!
//! - [`Store`] - a fixed set of typed keys, each with ordered subscribers
//! - [`Subscription`] - handle for removing a subscriber
//! - Every write notifies, even when the value did not change
//!
//! ## Storefront (application)
//!
//! - [`RenderDispatcher`] - re-renders the whole interface when the route,
//!   the cart or the cart overlay changes
//! - [`App`] - wires the store, the catalog, the services and a [`Scheduler`]
//!   for delayed work such as chat replies and toast expiry
//!
//! ```
//! use ecoshop::{App, AppConfig, MemorySurface, Route};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let surface = Rc::new(RefCell::new(MemorySurface::new()));
//! let app = App::new(&AppConfig::default(), surface.clone()).unwrap();
//! app.start().unwrap();
//! app.navigate(Route::Shop).unwrap();
//!
//! assert_eq!(surface.borrow().commits(), 2);
//! assert!(surface.borrow().current().unwrap().contains("Sustainable Products"));
//! ```

pub mod app;
pub mod catalog;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod runtime;
pub mod services;
pub mod store;
pub mod view;

// Re-export main types for convenience
pub use app::App;
pub use catalog::Catalog;
pub use command::Command;
pub use config::AppConfig;
pub use dispatch::{MemorySurface, RenderDispatcher, Surface, WriterSurface};
pub use error::{Error, Result};
pub use runtime::Scheduler;
pub use store::{CartLine, CommunityTab, Route, StateKey, StateValue, Store, Subscription};
