use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::Result;
use crate::runtime::Scheduler;
use crate::store::{ChatMessage, Sender, StateKey, Store};

/// Canned answers the assistant picks from.
pub const RESPONSES: [&str; 5] = [
    "Based on your preferences, I'd recommend products with sustainability scores above 85. \
     They typically have lower carbon footprints and better ethical sourcing.",
    "The bamboo toothbrush has a 95/100 sustainability score! It's biodegradable and reduces \
     plastic waste by 100% compared to traditional toothbrushes.",
    "Your current eco-score is amazing! To improve further, try choosing products with better \
     recyclability ratings and lower water usage.",
    "Great question! Sustainable products often cost more upfront but save money long-term \
     through durability and reduced environmental costs.",
    "I can help you compare products! The organic skincare set reduces your carbon footprint by \
     2.3kg CO2 compared to conventional alternatives.",
];

/// The scripted EcoGuide chat.
///
/// A user message lands in the transcript immediately; the reply is written
/// by a scheduler task after `reply_delay`. The reply is not cancelled when
/// the user leaves the page.
#[derive(Clone)]
pub struct EcoGuide {
    store: Store,
    scheduler: Scheduler,
    reply_delay: Duration,
    rng: Rc<RefCell<StdRng>>,
    next_id: Rc<Cell<u64>>,
}

impl EcoGuide {
    pub fn new(store: Store, scheduler: Scheduler, reply_delay: Duration, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            store,
            scheduler,
            reply_delay,
            rng: Rc::new(RefCell::new(rng)),
            // id 0 belongs to the greeting
            next_id: Rc::new(Cell::new(1)),
        }
    }

    /// Post `text` as the user and schedule the reply.
    ///
    /// Blank input is ignored and returns `Ok(false)`.
    pub fn send(&self, text: &str) -> Result<bool> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(false);
        }

        let mut transcript = self.store.chat_transcript();
        transcript.push(ChatMessage {
            id: self.allocate_id(),
            sender: Sender::User,
            content: text.to_string(),
        });
        tracing::info!(chars = text.len(), "chat message sent");
        self.store.write(StateKey::ChatTranscript, transcript)?;

        let reply = self.clone();
        self.scheduler
            .schedule(self.reply_delay, move || reply.deliver_reply());

        self.store.touch(StateKey::CurrentRoute)?;
        Ok(true)
    }

    fn deliver_reply(&self) -> Result<()> {
        let content = {
            let mut rng = self.rng.borrow_mut();
            RESPONSES.choose(&mut *rng).copied().unwrap_or(RESPONSES[0])
        };

        let mut transcript = self.store.chat_transcript();
        transcript.push(ChatMessage {
            id: self.allocate_id(),
            sender: Sender::Ai,
            content: content.to_string(),
        });
        tracing::info!(route = %self.store.route(), "chat reply delivered");
        self.store.write(StateKey::ChatTranscript, transcript)?;
        self.store.touch(StateKey::CurrentRoute)
    }

    fn allocate_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Route;

    fn guide(seed: u64) -> (EcoGuide, Store, Scheduler) {
        let store = Store::new();
        store.write(StateKey::CurrentRoute, Route::EcoGuide).unwrap();
        let scheduler = Scheduler::new();
        let guide = EcoGuide::new(
            store.clone(),
            scheduler.clone(),
            Duration::from_millis(1000),
            Some(seed),
        );
        (guide, store, scheduler)
    }

    #[test]
    fn reply_arrives_after_the_delay() {
        let (guide, store, scheduler) = guide(7);
        assert!(guide.send("  which mat is greener?  ").unwrap());

        let transcript = store.chat_transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].content, ChatMessage::GREETING);
        assert_eq!(transcript[1].sender, Sender::User);
        assert_eq!(transcript[1].content, "which mat is greener?");

        scheduler.advance(Duration::from_millis(999)).unwrap();
        assert_eq!(store.chat_transcript().len(), 2);

        scheduler.advance(Duration::from_millis(1)).unwrap();
        let transcript = store.chat_transcript();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].sender, Sender::Ai);
        assert!(RESPONSES.contains(&transcript[2].content.as_str()));
    }

    #[test]
    fn blank_messages_are_ignored() {
        let (guide, store, scheduler) = guide(1);
        assert!(!guide.send("   ").unwrap());
        assert_eq!(store.read(StateKey::ChatTranscript), None);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn same_seed_same_replies() {
        let replies = |seed| {
            let (guide, store, scheduler) = guide(seed);
            for text in ["a", "b", "c"] {
                guide.send(text).unwrap();
            }
            scheduler.run_until_idle().unwrap();
            store
                .chat_transcript()
                .into_iter()
                .filter(|m| m.sender == Sender::Ai)
                .map(|m| m.content)
                .collect::<Vec<_>>()
        };
        assert_eq!(replies(42), replies(42));
    }

    #[test]
    fn reply_lands_after_navigating_away() {
        let (guide, store, scheduler) = guide(3);
        guide.send("hello").unwrap();
        store.write(StateKey::CurrentRoute, Route::Shop).unwrap();

        scheduler.run_until_idle().unwrap();
        assert_eq!(store.chat_transcript().len(), 3);
        assert_eq!(store.route(), Route::Shop);
    }

    #[test]
    fn message_ids_are_unique() {
        let (guide, store, scheduler) = guide(9);
        guide.send("one").unwrap();
        guide.send("two").unwrap();
        scheduler.run_until_idle().unwrap();

        let mut ids: Vec<u64> = store.chat_transcript().iter().map(|m| m.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }
}
