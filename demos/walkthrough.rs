//! Scripted tour of the storefront: every store write that the dispatcher
//! watches produces a frame, and the chat reply arrives on the virtual clock.

use std::cell::RefCell;
use std::rc::Rc;

use ecoshop::store::StateKey;
use ecoshop::{App, AppConfig, MemorySurface, Route};

fn main() -> ecoshop::Result<()> {
    println!("=== EcoShop Walkthrough ===\n");

    let surface = Rc::new(RefCell::new(MemorySurface::new()));
    let config = AppConfig {
        rng_seed: Some(44),
        ..AppConfig::default()
    };
    let app = App::new(&config, surface.clone())?;

    // Log every cart write next to the dispatcher
    let _cart_log = app.store().subscribe(StateKey::Cart, |value| {
        let lines = value.as_cart().map_or(0, <[_]>::len);
        println!("   [cart] {lines} line(s)");
        Ok(())
    });

    let show_frame = |label: &str| {
        let surface = surface.borrow();
        println!("\n--- {label} (frame #{}) ---", surface.commits());
        if let Some(frame) = surface.current() {
            println!("{frame}");
        }
    };

    println!("1. Initial render");
    app.start()?;
    show_frame("home");

    println!("\n2. Filling the cart");
    app.cart().add("p1")?;
    app.cart().add("p1")?;
    app.cart().add("p2")?;
    println!(
        "   total: ₹{} | items: {} | CO2: {:.1}kg",
        app.cart().total(),
        app.cart().item_count(),
        app.cart().co2_impact_kg()
    );

    println!("\n3. Opening the cart overlay");
    app.toggle_cart()?;
    show_frame("cart");
    app.toggle_cart()?;

    println!("\n4. Searching");
    app.search("yoga")?;
    show_frame("shop");

    println!("\n5. Asking the EcoGuide");
    app.navigate(Route::EcoGuide)?;
    app.guide().send("Is bamboo really greener?")?;
    println!("   pending tasks: {}", app.scheduler().pending());
    app.advance(1000)?;
    show_frame("ecoguide");

    println!("\n6. Toasts so far:");
    for message in app.toasts().history() {
        println!("   {message}");
    }

    println!("\n✓ Walkthrough complete! {} frames rendered", app.dispatcher().renders());
    Ok(())
}
