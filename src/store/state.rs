use std::fmt;

use serde::Deserialize;

/// Identifier of a piece of UI state held by the [`Store`](super::Store).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKey {
    CurrentRoute,
    Cart,
    SearchQuery,
    ShowCart,
    CommunityTab,
    ChatTranscript,
}

impl StateKey {
    pub const ALL: [StateKey; 6] = [
        StateKey::CurrentRoute,
        StateKey::Cart,
        StateKey::SearchQuery,
        StateKey::ShowCart,
        StateKey::CommunityTab,
        StateKey::ChatTranscript,
    ];

    /// Stable name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            StateKey::CurrentRoute => "currentRoute",
            StateKey::Cart => "cart",
            StateKey::SearchQuery => "searchQuery",
            StateKey::ShowCart => "showCart",
            StateKey::CommunityTab => "communityTab",
            StateKey::ChatTranscript => "ecoGuideMessages",
        }
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value stored under a [`StateKey`].
///
/// The store itself does not check that a value's shape matches its key;
/// the typed accessors on [`Store`](super::Store) treat a mismatch the same
/// way as an absent key.
#[derive(Clone, Debug, PartialEq)]
pub enum StateValue {
    Route(Route),
    Cart(Vec<CartLine>),
    Flag(bool),
    Text(String),
    Tab(CommunityTab),
    Transcript(Vec<ChatMessage>),
}

impl StateValue {
    pub fn as_route(&self) -> Option<Route> {
        match self {
            StateValue::Route(route) => Some(*route),
            _ => None,
        }
    }

    pub fn as_cart(&self) -> Option<&[CartLine]> {
        match self {
            StateValue::Cart(lines) => Some(lines),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            StateValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            StateValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_tab(&self) -> Option<CommunityTab> {
        match self {
            StateValue::Tab(tab) => Some(*tab),
            _ => None,
        }
    }

    pub fn as_transcript(&self) -> Option<&[ChatMessage]> {
        match self {
            StateValue::Transcript(messages) => Some(messages),
            _ => None,
        }
    }
}

impl From<Route> for StateValue {
    fn from(route: Route) -> Self {
        StateValue::Route(route)
    }
}

impl From<Vec<CartLine>> for StateValue {
    fn from(lines: Vec<CartLine>) -> Self {
        StateValue::Cart(lines)
    }
}

impl From<bool> for StateValue {
    fn from(flag: bool) -> Self {
        StateValue::Flag(flag)
    }
}

impl From<String> for StateValue {
    fn from(text: String) -> Self {
        StateValue::Text(text)
    }
}

impl From<&str> for StateValue {
    fn from(text: &str) -> Self {
        StateValue::Text(text.to_string())
    }
}

impl From<CommunityTab> for StateValue {
    fn from(tab: CommunityTab) -> Self {
        StateValue::Tab(tab)
    }
}

impl From<Vec<ChatMessage>> for StateValue {
    fn from(messages: Vec<ChatMessage>) -> Self {
        StateValue::Transcript(messages)
    }
}

/// Page currently shown in the main area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    #[default]
    Home,
    Shop,
    Community,
    #[serde(alias = "eco-guide")]
    EcoGuide,
    Dashboard,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::Shop,
        Route::Community,
        Route::EcoGuide,
        Route::Dashboard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "home",
            Route::Shop => "shop",
            Route::Community => "community",
            Route::EcoGuide => "ecoguide",
            Route::Dashboard => "dashboard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Shop => "Shop",
            Route::Community => "Community",
            Route::EcoGuide => "EcoGuide",
            Route::Dashboard => "Dashboard",
        }
    }

    /// Resolve a route name. Anything unrecognized lands on [`Route::Home`].
    pub fn from_name(name: &str) -> Route {
        let name = name.trim();
        Route::ALL
            .into_iter()
            .find(|route| {
                route.name().eq_ignore_ascii_case(name)
                    || (*route == Route::EcoGuide && name.eq_ignore_ascii_case("eco-guide"))
            })
            .unwrap_or_else(|| {
                tracing::debug!(route = name, "unknown route, falling back to home");
                Route::Home
            })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Tab selected on the community page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CommunityTab {
    #[default]
    Feed,
    Challenges,
    Leaderboard,
}

impl CommunityTab {
    pub const ALL: [CommunityTab; 3] = [
        CommunityTab::Feed,
        CommunityTab::Challenges,
        CommunityTab::Leaderboard,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CommunityTab::Feed => "feed",
            CommunityTab::Challenges => "challenges",
            CommunityTab::Leaderboard => "leaderboard",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CommunityTab::Feed => "Feed",
            CommunityTab::Challenges => "Challenges",
            CommunityTab::Leaderboard => "Leaderboard",
        }
    }

    pub fn from_name(name: &str) -> Option<CommunityTab> {
        let name = name.trim();
        CommunityTab::ALL
            .into_iter()
            .find(|tab| tab.name().eq_ignore_ascii_case(name))
    }
}

/// One product in the cart. A cart holds at most one line per product id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: String,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

/// A single entry of the EcoGuide chat transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub content: String,
}

impl ChatMessage {
    pub const GREETING: &'static str = "Hi! I'm your AI EcoGuide. I can help you find sustainable \
        products, compare environmental impacts, and track your eco-journey. What would you like to know?";

    /// The transcript shown before the user has said anything.
    pub fn default_transcript() -> Vec<ChatMessage> {
        vec![ChatMessage {
            id: 0,
            sender: Sender::Ai,
            content: Self::GREETING.to_string(),
        }]
    }
}

/// Every known key resolved to a concrete value, defaults filled in.
///
/// This is what the view layer renders from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub route: Route,
    pub cart: Vec<CartLine>,
    pub search_query: String,
    pub show_cart: bool,
    pub community_tab: CommunityTab,
    pub transcript: Vec<ChatMessage>,
}
