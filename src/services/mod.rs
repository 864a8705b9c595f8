//! Domain services: the code that user actions call into.
//!
//! Services read and write the [`Store`](crate::store::Store) and the
//! catalog. None of them renders; redraws happen through the store's
//! subscribers.

mod cart;
mod community;
mod guide;
mod toast;

pub use cart::{co2_impact_kg, CartService, MAX_LINE_QUANTITY};
pub use community::CommunityService;
pub use guide::{EcoGuide, RESPONSES};
pub use toast::{Toast, Toasts, HISTORY_LIMIT};
