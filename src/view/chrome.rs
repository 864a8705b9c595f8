use std::fmt::Write;

use super::components::price;
use super::{section, ResolvedLine, ViewContext};
use crate::error::Result;
use crate::store::Route;

pub(super) fn header(out: &mut String, ctx: &ViewContext<'_>, cart: &[ResolvedLine<'_>]) -> Result<()> {
    write!(out, "🌱 EcoShop")?;

    let query = ctx.state.search_query.trim();
    if !query.is_empty() {
        write!(out, "  | search: \"{query}\"")?;
    }

    let count: u64 = cart.iter().map(|line| u64::from(line.quantity)).sum();
    if count > 0 {
        write!(out, "  | 🛒 {count}")?;
    }
    writeln!(out)?;
    Ok(())
}

pub(super) fn navigation(out: &mut String, active: Route) -> Result<()> {
    let tabs: Vec<String> = Route::ALL
        .iter()
        .map(|&route| {
            if route == active {
                format!("[{}]", route.label())
            } else {
                format!(" {} ", route.label())
            }
        })
        .collect();
    writeln!(out, "{}", tabs.join(" "))?;
    Ok(())
}

pub(super) fn cart_overlay(out: &mut String, cart: &[ResolvedLine<'_>]) -> Result<()> {
    section(out, "Your Cart")?;

    if cart.is_empty() {
        writeln!(out, "  Your cart is empty")?;
        writeln!(out, "  [Start Shopping]")?;
        return Ok(());
    }

    let mut total: u64 = 0;
    let mut co2 = 0.0;
    for line in cart {
        let product = line.product;
        writeln!(
            out,
            "  📦 {}  {}  x{}  [{}]",
            product.name,
            price(product.price),
            line.quantity,
            product.id
        )?;
        total = total.saturating_add(product.price.saturating_mul(u64::from(line.quantity)));
        co2 += f64::from(product.score.carbon_footprint) * f64::from(line.quantity) / 100.0;
    }

    writeln!(out)?;
    writeln!(out, "  🌱 Environmental Impact: -{co2:.1}kg CO2 saved!")?;
    writeln!(out, "  Total: {}", price(total))?;
    writeln!(out, "  [Proceed to Checkout]")?;
    Ok(())
}
