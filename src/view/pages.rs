use std::fmt::Write;

use super::components::{
    badge_label, challenge_card, chat_message, post_card, product_card, score_class,
};
use super::{section, ViewContext};
use crate::error::Result;
use crate::store::CommunityTab;

const ECO_SCORE_FILTERS: [u8; 3] = [90, 80, 70];

pub(super) fn home(out: &mut String, ctx: &ViewContext<'_>) -> Result<()> {
    let catalog = ctx.catalog;

    writeln!(out, "Sustainable Shopping Made Easy for Gen Z 🌍")?;
    writeln!(
        out,
        "Discover eco-friendly products, connect with like-minded community, \
         and get AI-powered sustainability insights"
    )?;
    writeln!(out, "  [Start Shopping]  [Join Community]")?;

    section(out, "Featured Eco Products")?;
    for product in catalog.products.iter().take(ctx.options.featured_products) {
        product_card(out, catalog, product)?;
    }

    section(out, "Community Highlights")?;
    for post in catalog.posts.iter().take(ctx.options.community_highlights) {
        post_card(out, catalog, post, ctx.now)?;
    }
    Ok(())
}

pub(super) fn shop(out: &mut String, ctx: &ViewContext<'_>) -> Result<()> {
    let catalog = ctx.catalog;
    let query = ctx.state.search_query.trim();

    section(out, "Sustainable Products")?;
    if !query.is_empty() {
        writeln!(out, "Results for \"{query}\"")?;
    }

    let categories: Vec<&str> = catalog.categories.iter().map(|c| c.name.as_str()).collect();
    writeln!(out, "Categories: All Categories | {}", categories.join(" | "))?;
    let scores: Vec<String> = ECO_SCORE_FILTERS.iter().map(|s| format!("{s}+")).collect();
    writeln!(out, "Eco scores: All Eco Scores | {}", scores.join(" | "))?;
    writeln!(out)?;

    let products = catalog.search(query);
    if products.is_empty() {
        writeln!(out, "  No products found")?;
        writeln!(out, "  Try adjusting your filters")?;
        return Ok(());
    }
    for product in products {
        product_card(out, catalog, product)?;
    }
    Ok(())
}

pub(super) fn community(out: &mut String, ctx: &ViewContext<'_>) -> Result<()> {
    let catalog = ctx.catalog;
    let active = ctx.state.community_tab;

    section(out, "EcoConnect Community")?;
    writeln!(out, "  [+ Create Post]")?;

    let tabs: Vec<String> = CommunityTab::ALL
        .iter()
        .map(|&tab| {
            if tab == active {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect();
    writeln!(out, "{}", tabs.join(" "))?;
    writeln!(out)?;

    match active {
        CommunityTab::Feed => {
            for post in &catalog.posts {
                post_card(out, catalog, post, ctx.now)?;
            }
        }
        CommunityTab::Challenges => {
            for challenge in &catalog.challenges {
                challenge_card(out, challenge)?;
            }
        }
        CommunityTab::Leaderboard => {
            for entry in &catalog.leaderboard {
                let marker = if entry.is_user { "  <- you" } else { "" };
                writeln!(
                    out,
                    "  #{} ({}) {} {} pts{marker}",
                    entry.rank, entry.avatar, entry.name, entry.score
                )?;
            }
        }
    }
    Ok(())
}

pub(super) fn eco_guide(out: &mut String, ctx: &ViewContext<'_>) -> Result<()> {
    let catalog = ctx.catalog;
    let user = &catalog.user;

    section(out, "🤖 AI EcoGuide Assistant")?;
    writeln!(out, "Your personal sustainability companion")?;
    writeln!(out)?;
    writeln!(
        out,
        "  🌱 {} Eco Score | 💚 {}kg CO2 Saved | 🏆 {} Badges Earned",
        user.sustainability_score,
        user.total_co2_saved_kg,
        user.badges.len()
    )?;

    section(out, "Chat with EcoGuide")?;
    for message in &ctx.state.transcript {
        chat_message(out, message)?;
    }
    writeln!(out, "  > Ask about sustainability...")?;

    section(out, "Product Sustainability Comparison")?;
    for product in catalog.products.iter().take(ctx.options.comparison_products) {
        let score = &product.score;
        writeln!(
            out,
            "  📦 {} | {}/100 ({})",
            product.name,
            score.overall,
            score_class(score.overall)
        )?;
        writeln!(
            out,
            "    🌱 Carbon: {}/100  ♻️ Recyclable: {}/100  💧 Water: {}/100  🤝 Ethical: {}/100",
            score.carbon_footprint, score.recyclability, score.water_usage, score.ethical_sourcing
        )?;
    }
    Ok(())
}

pub(super) fn dashboard(out: &mut String, ctx: &ViewContext<'_>) -> Result<()> {
    let user = &ctx.catalog.user;

    section(out, &format!("Welcome back, {}! 👋", user.name))?;
    writeln!(out, "Track your sustainability journey and achievements   ({})", user.avatar)?;
    writeln!(out)?;
    writeln!(
        out,
        "  🌱 {} Sustainability Score | 💚 {}kg Total CO2 Saved | 👥 {} Followers | 🏆 {} Badges Earned",
        user.sustainability_score,
        user.total_co2_saved_kg,
        user.followers,
        user.badges.len()
    )?;

    let percent = user.monthly_progress_percent();
    section(out, "Monthly Progress")?;
    writeln!(
        out,
        "  Goal: {}kg CO2 | Progress: {}kg CO2",
        user.monthly_goal_kg, user.current_progress_kg
    )?;
    let filled = (percent / 5) as usize;
    writeln!(out, "  [{}{}]", "#".repeat(filled), ".".repeat(20 - filled))?;
    writeln!(out, "  {percent}% of monthly goal achieved")?;

    section(out, "Your Badges")?;
    let badges: Vec<String> = user
        .badges
        .iter()
        .map(|badge| badge_label(badge).into_owned())
        .collect();
    writeln!(out, "  {}", badges.join("  "))?;
    Ok(())
}
