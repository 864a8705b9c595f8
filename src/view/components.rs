use std::borrow::Cow;
use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::catalog::{Catalog, Challenge, Post, Product};
use crate::error::Result;
use crate::store::{ChatMessage, Sender};

/// Rating as five glyphs: full stars, one half star for any fraction, then
/// empty stars.
pub fn stars(rating: f32) -> String {
    let rating = rating.clamp(0.0, 5.0);
    let full = rating.floor() as usize;
    let half = rating.fract() != 0.0;
    let empty = 5 - rating.ceil() as usize;

    let mut out = "★".repeat(full);
    if half {
        out.push('½');
    }
    out.push_str(&"☆".repeat(empty));
    out
}

/// Coarse age of `timestamp` relative to `now`.
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - timestamp).num_hours();
    if hours < 1 {
        "Just now".to_string()
    } else if hours < 24 {
        format!("{hours}h ago")
    } else {
        format!("{}d ago", hours / 24)
    }
}

pub fn score_class(overall: u8) -> &'static str {
    match overall {
        90..=u8::MAX => "high",
        75..=89 => "medium",
        _ => "low",
    }
}

pub fn price(amount: u64) -> String {
    format!("₹{amount}")
}

/// Friendly name for a badge id; unknown ids are shown as-is.
pub fn badge_label(badge: &str) -> Cow<'_, str> {
    match badge {
        "eco-warrior" => Cow::Borrowed("🌱 Eco Warrior"),
        "carbon-saver" => Cow::Borrowed("💚 Carbon Saver"),
        "water-guardian" => Cow::Borrowed("💧 Water Guardian"),
        other => Cow::Owned(other.to_string()),
    }
}

pub fn product_card(out: &mut String, catalog: &Catalog, product: &Product) -> Result<()> {
    let score = product.score.overall;
    writeln!(out, "  * {} [{}]", product.name, product.id)?;
    writeln!(
        out,
        "    {} | eco {}/100 ({})",
        catalog.category_name(&product.category),
        score,
        score_class(score)
    )?;
    writeln!(
        out,
        "    {} (was {}, {}% OFF)",
        price(product.price),
        price(product.original_price),
        product.discount_percent()
    )?;
    writeln!(
        out,
        "    {} {} ({})",
        stars(product.rating),
        product.rating,
        product.reviews
    )?;
    if !product.in_stock {
        writeln!(out, "    out of stock")?;
    }
    Ok(())
}

pub fn post_card(out: &mut String, catalog: &Catalog, post: &Post, now: DateTime<Utc>) -> Result<()> {
    writeln!(
        out,
        "  ({}) {} · {}",
        post.user_avatar,
        post.user_name,
        time_ago(post.timestamp, now)
    )?;
    writeln!(out, "    {}", post.content)?;
    if let Some(challenge) = &post.challenge_id {
        writeln!(out, "    #{}", catalog.challenge_name(challenge))?;
    }
    let heart = if post.liked { "♥" } else { "♡" };
    writeln!(
        out,
        "    {heart} {}  💬 {}  ↗ Share  [{}]",
        post.likes, post.comments, post.id
    )?;
    Ok(())
}

pub fn challenge_card(out: &mut String, challenge: &Challenge) -> Result<()> {
    writeln!(out, "  🏆 {} [{}]", challenge.name, challenge.id)?;
    writeln!(out, "    {}", challenge.description)?;
    writeln!(out, "    Reward: {}", challenge.reward)?;
    writeln!(
        out,
        "    {} participants | {} days | Save {}",
        challenge.participants, challenge.duration, challenge.carbon_saving
    )?;
    Ok(())
}

pub fn chat_message(out: &mut String, message: &ChatMessage) -> Result<()> {
    let avatar = match message.sender {
        Sender::Ai => "🤖",
        Sender::User => "👤",
    };
    writeln!(out, "  {avatar} {}", message.content)?;
    Ok(())
}
