use uuid::Uuid;

use crate::cards::AnswerCard;
use crate::deck::CardDeck;
use crate::events::ConnectionId;

pub type PlayerId = Uuid;

/// Per-participant state. Created on join, destroyed on leave or game
/// reset, owned exclusively by the engine's roster. The turn flags are
/// engine-managed; `Player` never flips them on its own.
#[derive(Debug)]
pub struct Player {
    id: PlayerId,
    name: String,
    connection: ConnectionId,
    hand: Vec<AnswerCard>,
    points: u32,
    /// This player picks the winner of the current round
    pub is_picker: bool,
    /// All non-pickers have played; the picker may now pick
    pub pick_ready: bool,
    /// This player has played this round
    pub has_played: bool,
    /// Joined mid-round; observes until the next deal
    pub sitting_out: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, connection: ConnectionId) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            connection,
            hand: Vec::new(),
            points: 0,
            is_picker: false,
            pick_ready: false,
            has_played: false,
            sitting_out: false,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection(&self) -> ConnectionId {
        self.connection
    }

    pub fn hand(&self) -> &[AnswerCard] {
        &self.hand
    }

    pub fn points(&self) -> u32 {
        self.points
    }

    /// Tops the hand up to `hand_size`, returning the newly drawn cards.
    /// A no-op when the hand is already full.
    pub fn fill_hand(&mut self, deck: &mut CardDeck, hand_size: usize) -> Vec<AnswerCard> {
        let missing = hand_size.saturating_sub(self.hand.len());
        let mut drawn = Vec::with_capacity(missing);
        for _ in 0..missing {
            let card = deck.draw_answer();
            self.hand.push(card.clone());
            drawn.push(card);
        }
        drawn
    }

    /// Adds points and reports whether the new total reached the win
    /// threshold. The caller decides what to do about a win; this is
    /// bookkeeping only.
    pub fn add_points(&mut self, amount: u32, win_threshold: u32) -> bool {
        self.points += amount;
        self.points >= win_threshold
    }

    /// Removes the given zero-based hand positions. Indices are removed
    /// highest first: removing low positions first would shift the
    /// remaining indices and corrupt later removals.
    pub fn remove_cards(&mut self, indices: &[usize]) {
        let mut sorted = indices.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        for &i in sorted.iter().rev() {
            if i < self.hand.len() {
                self.hand.remove(i);
            }
        }
    }
}
