use chrono::{DateTime, TimeZone, Utc};

use super::model::{
    Category, Challenge, LeaderboardEntry, Post, Product, SustainabilityScore, UserProfile,
};
use super::Catalog;

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .unwrap_or_default()
}

fn score(overall: u8, carbon: u8, water: u8, recycle: u8, ethical: u8) -> SustainabilityScore {
    SustainabilityScore {
        overall,
        carbon_footprint: carbon,
        water_usage: water,
        recyclability: recycle,
        ethical_sourcing: ethical,
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    price: u64,
    original_price: u64,
    category: &str,
    score: SustainabilityScore,
    description: &str,
    reviews: u32,
    rating: f32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        original_price,
        category: category.to_string(),
        score,
        description: description.to_string(),
        reviews,
        rating,
        in_stock: true,
    }
}

fn category(id: &str, name: &str, icon: &str, product_count: u32) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        product_count,
    }
}

fn rank(rank: u32, name: &str, avatar: &str, score: u32, is_user: bool) -> LeaderboardEntry {
    LeaderboardEntry {
        rank,
        name: name.to_string(),
        avatar: avatar.to_string(),
        score,
        is_user,
    }
}

pub(super) fn builtin() -> Catalog {
    let products = vec![
        product(
            "p1",
            "Organic Bamboo Toothbrush Set",
            299,
            399,
            "body-care",
            score(95, 98, 90, 95, 96),
            "100% biodegradable bamboo toothbrush with soft bristles",
            142,
            4.8,
        ),
        product(
            "p2",
            "Eco-Friendly Yoga Mat",
            1299,
            1599,
            "fitness",
            score(88, 85, 92, 90, 85),
            "Natural rubber yoga mat with organic cotton strap",
            89,
            4.6,
        ),
        product(
            "p3",
            "Organic Skincare Gift Set",
            2199,
            2899,
            "body-care",
            score(92, 94, 88, 93, 94),
            "Complete organic skincare routine with natural ingredients",
            267,
            4.9,
        ),
        product(
            "p4",
            "Sustainable Water Bottle",
            899,
            1199,
            "lifestyle",
            score(91, 89, 95, 92, 88),
            "Stainless steel insulated water bottle with bamboo cap",
            156,
            4.7,
        ),
    ];

    let posts = vec![
        Post {
            id: "post1".to_string(),
            user_id: "user1".to_string(),
            user_name: "EcoWarrior_Priya".to_string(),
            user_avatar: "P".to_string(),
            content: "Just completed my 30-day zero waste challenge! 🌱 These bamboo products \
                      from EcoShop made it so much easier. My carbon footprint reduced by 15%!"
                .to_string(),
            product_id: Some("p1".to_string()),
            likes: 89,
            comments: 23,
            challenge_id: Some("zero-waste-30".to_string()),
            timestamp: at(2025, 6, 2, 14, 30),
            liked: false,
        },
        Post {
            id: "post2".to_string(),
            user_id: "user2".to_string(),
            user_name: "SustainableArjun".to_string(),
            user_avatar: "A".to_string(),
            content: "My morning yoga routine just got more sustainable! This eco mat is amazing \
                      and the sustainability score convinced me. 🧘"
                .to_string(),
            product_id: Some("p2".to_string()),
            likes: 156,
            comments: 31,
            challenge_id: None,
            timestamp: at(2025, 6, 1, 8, 15),
            liked: true,
        },
        Post {
            id: "post3".to_string(),
            user_id: "user3".to_string(),
            user_name: "GreenBeauty_Ananya".to_string(),
            user_avatar: "G".to_string(),
            content: "Skincare routine upgrade! ✨ These organic products are not only good for \
                      my skin but also for the planet. Check out my sustainability score!"
                .to_string(),
            product_id: Some("p3".to_string()),
            likes: 234,
            comments: 45,
            challenge_id: Some("green-beauty".to_string()),
            timestamp: at(2025, 5, 31, 19, 20),
            liked: false,
        },
    ];

    let challenges = vec![
        Challenge {
            id: "zero-waste-30".to_string(),
            name: "30-Day Zero Waste Challenge".to_string(),
            description: "Reduce your waste to zero for 30 days".to_string(),
            participants: 1247,
            reward: "Eco Warrior Badge".to_string(),
            duration: 30,
            carbon_saving: "25kg CO2".to_string(),
        },
        Challenge {
            id: "green-beauty".to_string(),
            name: "Green Beauty Revolution".to_string(),
            description: "Switch to sustainable beauty products".to_string(),
            participants: 856,
            reward: "Beauty Eco Champion".to_string(),
            duration: 14,
            carbon_saving: "10kg CO2".to_string(),
        },
    ];

    let user = UserProfile {
        id: "current-user".to_string(),
        name: "Rahul Sharma".to_string(),
        avatar: "R".to_string(),
        sustainability_score: 1250,
        level: "Eco Champion".to_string(),
        badges: vec![
            "eco-warrior".to_string(),
            "carbon-saver".to_string(),
            "water-guardian".to_string(),
        ],
        followers: 189,
        following: 234,
        total_co2_saved_kg: 120.0,
        monthly_goal_kg: 15.0,
        current_progress_kg: 8.5,
    };

    let categories = vec![
        category("body-care", "Body Care", "🧴", 47),
        category("bamboo-products", "Bamboo Products", "🎋", 23),
        category("health-supplements", "Health Supplements", "💊", 31),
        category("organic-food", "Organic Food", "🥗", 89),
        category("fitness", "Fitness", "🏃", 15),
        category("lifestyle", "Lifestyle", "🌿", 34),
    ];

    let leaderboard = vec![
        rank(1, "EcoWarrior_Priya", "P", 2450, false),
        rank(2, "SustainableArjun", "A", 2180, false),
        rank(3, "GreenBeauty_Ananya", "G", 1950, false),
        rank(4, "EcoMinimalist_Rohan", "R", 1820, false),
        rank(5, "ZeroWaste_Kavya", "K", 1750, false),
        rank(6, "You (Rahul)", "R", 1250, true),
    ];

    Catalog {
        products,
        posts,
        challenges,
        categories,
        user,
        leaderboard,
    }
}
