//! Line-oriented commands understood by the interactive shell.

use crate::error::{Error, Result};
use crate::store::{CommunityTab, Route};

/// One parsed input line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Navigate(Route),
    ToggleCart,
    Add(String),
    Remove(String),
    Quantity { product_id: String, quantity: i64 },
    Search(String),
    Tab(CommunityTab),
    Like(String),
    Post,
    Join(String),
    View(String),
    Category(Option<String>),
    EcoScore(Option<u8>),
    Say(String),
    Checkout,
    Wait(u64),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  nav <home|shop|community|ecoguide|dashboard>
  cart                      toggle the cart overlay
  add <product>             add one unit to the cart
  remove <product>          drop a cart line
  qty <product> <n>         set a line's quantity (0 removes it)
  search <text>             search products and open the shop
  tab <feed|challenges|leaderboard>
  like <post>               toggle a like
  post                      create a post
  join <challenge>          join a challenge
  view <product>            open a product
  category [id]             filter by category
  eco [min]                 filter by eco score
  say <text>                message the EcoGuide
  checkout                  check out and close the cart
  wait <ms>                 let time pass
  help
  quit";

impl Command {
    /// Parse a single line. Leading and trailing whitespace is ignored; the
    /// first word selects the command.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "nav" | "go" => Command::Navigate(Route::from_name(required("nav", rest)?)),
            "cart" => Command::ToggleCart,
            "add" => Command::Add(required("add", rest)?.to_string()),
            "remove" | "rm" => Command::Remove(required("remove", rest)?.to_string()),
            "qty" => {
                let mut parts = rest.split_whitespace();
                let product_id = parts
                    .next()
                    .ok_or(Error::MissingArgument { command: "qty" })?;
                let quantity = parts
                    .next()
                    .ok_or(Error::MissingArgument { command: "qty" })?;
                Command::Quantity {
                    product_id: product_id.to_string(),
                    quantity: number(quantity)?,
                }
            }
            "search" => Command::Search(required("search", rest)?.to_string()),
            "tab" => {
                let name = required("tab", rest)?;
                let tab = CommunityTab::from_name(name).ok_or_else(|| Error::InvalidArgument {
                    command: "tab",
                    value: name.to_string(),
                })?;
                Command::Tab(tab)
            }
            "like" => Command::Like(required("like", rest)?.to_string()),
            "post" => Command::Post,
            "join" => Command::Join(required("join", rest)?.to_string()),
            "view" => Command::View(required("view", rest)?.to_string()),
            "category" => Command::Category(optional(rest).map(str::to_string)),
            "eco" => Command::EcoScore(optional(rest).map(number).transpose()?),
            "say" => Command::Say(required("say", rest)?.to_string()),
            "checkout" => Command::Checkout,
            "wait" => Command::Wait(number(required("wait", rest)?)?),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(Error::UnknownCommand(line.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(command: &'static str, rest: &'a str) -> Result<&'a str> {
    optional(rest).ok_or(Error::MissingArgument { command })
}

fn optional(rest: &str) -> Option<&str> {
    (!rest.is_empty()).then_some(rest)
}

fn number<T: std::str::FromStr>(text: &str) -> Result<T> {
    text.parse()
        .map_err(|_| Error::InvalidNumber(text.to_string()))
}
