//! Text rendering of the whole interface.
//!
//! Everything here is a pure function of a [`Snapshot`], the [`Catalog`]
//! and the wall clock. [`render_app`] produces the complete frame: header,
//! navigation, the active page and, when open, the cart overlay.

mod chrome;
pub mod components;
mod pages;

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::catalog::{Catalog, Product};
use crate::config::AppConfig;
use crate::error::{Error, Result};
use crate::store::{Route, Snapshot};

const RULE_WIDTH: usize = 64;

/// Layout knobs taken from the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewOptions {
    pub featured_products: usize,
    pub community_highlights: usize,
    pub comparison_products: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ViewOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            featured_products: config.featured_products,
            community_highlights: config.community_highlights,
            comparison_products: config.comparison_products,
        }
    }
}

/// Inputs of a single render pass.
pub struct ViewContext<'a> {
    pub state: &'a Snapshot,
    pub catalog: &'a Catalog,
    pub options: ViewOptions,
    pub now: DateTime<Utc>,
}

/// A cart line joined with its catalog entry.
pub struct ResolvedLine<'a> {
    pub product: &'a Product,
    pub quantity: u32,
}

impl ViewContext<'_> {
    /// Join every cart line with its product.
    ///
    /// A line whose product is missing from the catalog fails the render.
    pub fn resolved_cart(&self) -> Result<Vec<ResolvedLine<'_>>> {
        self.state
            .cart
            .iter()
            .map(|line| {
                self.catalog
                    .product(&line.product_id)
                    .map(|product| ResolvedLine {
                        product,
                        quantity: line.quantity,
                    })
                    .ok_or_else(|| Error::UnknownProduct(line.product_id.clone()))
            })
            .collect()
    }
}

/// Render the complete frame.
pub fn render_app(ctx: &ViewContext<'_>) -> Result<String> {
    let cart = ctx.resolved_cart()?;
    let mut out = String::new();

    chrome::header(&mut out, ctx, &cart)?;
    chrome::navigation(&mut out, ctx.state.route)?;
    rule(&mut out)?;

    match ctx.state.route {
        Route::Home => pages::home(&mut out, ctx)?,
        Route::Shop => pages::shop(&mut out, ctx)?,
        Route::Community => pages::community(&mut out, ctx)?,
        Route::EcoGuide => pages::eco_guide(&mut out, ctx)?,
        Route::Dashboard => pages::dashboard(&mut out, ctx)?,
    }

    if ctx.state.show_cart {
        rule(&mut out)?;
        chrome::cart_overlay(&mut out, &cart)?;
    }
    Ok(out)
}

fn rule(out: &mut String) -> Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    Ok(())
}

fn section(out: &mut String, title: &str) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "## {title}")?;
    Ok(())
}
