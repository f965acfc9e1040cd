use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use crate::*;

/// How long a mismatched pair stays face up.
pub const REVERT_DELAY: Duration = Duration::from_millis(800);

pub const DEFAULT_SYMBOLS: [&str; 6] = ["🐶", "🍎", "🚗", "⭐", "🎈", "🍩"];

/// Card ids are `u8`, so a board holds at most this many cards.
pub const MAX_CARDS: usize = 256;

/// Index of a card in the deck, stable for the whole session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u8);

impl CardId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CardFace {
    #[default]
    Hidden,
    Revealed,
    Matched,
}

impl CardFace {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    emoji: Option<String>,
    face: CardFace,
}

impl Card {
    pub fn new(emoji: Option<String>) -> Self {
        Self {
            emoji,
            face: CardFace::Hidden,
        }
    }

    pub fn emoji(&self) -> Option<&str> {
        self.emoji.as_deref()
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    /// Cards without a symbol never match, not even each other.
    pub fn matches(&self, other: &Card) -> bool {
        matches!((&self.emoji, &other.emoji), (Some(a), Some(b)) if a == b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MemoryConfig {
    pub symbols: Vec<String>,
    pub revert_delay: Duration,
}

impl MemoryConfig {
    pub const MAX_PAIRS: usize = MAX_CARDS / 2;

    /// Every symbol twice, in symbol order. Shuffling only affects display order.
    pub fn deck(&self) -> Vec<Card> {
        let symbols = if self.symbols.len() > Self::MAX_PAIRS {
            log::warn!(
                "Too many symbols, requested {} pairs but only {} fit",
                self.symbols.len(),
                Self::MAX_PAIRS
            );
            &self.symbols[..Self::MAX_PAIRS]
        } else {
            &self.symbols[..]
        };

        symbols
            .iter()
            .chain(symbols)
            .map(|symbol| Card::new(Some(symbol.clone())))
            .collect()
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|&symbol| String::from(symbol)).collect(),
            revert_delay: REVERT_DELAY,
        }
    }
}

/// Identifies one scheduled revert. A fresh ticket is issued on every mismatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevertTicket(u32);

/// Runs the delayed flip-back of a mismatched pair.
///
/// Implementations call [`MemoryGame::complete_revert`] with the ticket once `delay` has passed. The returned handle
/// is held by the game and given back to [`RevertScheduler::cancel`] if the board restarts before the delay is over.
pub trait RevertScheduler {
    type Handle;

    fn schedule(&mut self, ticket: RevertTicket, delay: Duration) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TurnState {
    #[default]
    Idle,
    OneFlipped(CardId),
    /// A mismatched pair is face up and input is locked until the revert fires.
    Resolving {
        first: CardId,
        second: CardId,
        ticket: RevertTicket,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    Ignored,
    FirstRevealed,
    Matched,
    Mismatched,
    /// The last pair was matched.
    Completed,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevertOutcome {
    Reverted,
    Stale,
}

impl RevertOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Reverted)
    }
}

pub struct MemoryGame<S: RevertScheduler> {
    cards: Vec<Card>,
    order: Vec<CardId>,
    turn: TurnState,
    revert_delay: Duration,
    next_ticket: u32,
    pending: Option<S::Handle>,
    scheduler: S,
}

impl<S: RevertScheduler> MemoryGame<S> {
    pub fn new(config: &MemoryConfig, scheduler: S, seed: u64) -> Self {
        Self::assemble(config.deck(), config.revert_delay, scheduler, seed)
    }

    pub fn from_cards(
        cards: Vec<Card>,
        revert_delay: Duration,
        scheduler: S,
        seed: u64,
    ) -> Result<Self> {
        if cards.len() > MAX_CARDS {
            return Err(GameError::TooManyCards);
        }
        Ok(Self::assemble(cards, revert_delay, scheduler, seed))
    }

    fn assemble(cards: Vec<Card>, revert_delay: Duration, scheduler: S, seed: u64) -> Self {
        let order = shuffled_order(cards.len(), seed);
        Self {
            cards,
            order,
            turn: TurnState::Idle,
            revert_delay,
            next_ticket: 0,
            pending: None,
            scheduler,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.cards.get(id.index()).ok_or(GameError::InvalidCard)
    }

    pub fn cards(&self) -> impl Iterator<Item = (CardId, &Card)> {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, card)| (CardId(index as u8), card))
    }

    /// Card ids in the order they are laid out on screen.
    pub fn display_order(&self) -> &[CardId] {
        &self.order
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.turn, TurnState::Resolving { .. })
    }

    pub fn pending_revert(&self) -> Option<RevertTicket> {
        match self.turn {
            TurnState::Resolving { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    /// Whether a click on `id` would currently do anything.
    pub fn is_clickable(&self, id: CardId) -> bool {
        !self.is_locked() && self.card(id).is_ok_and(|card| card.face.is_hidden())
    }

    pub fn clickable_count(&self) -> usize {
        self.cards().filter(|&(id, _)| self.is_clickable(id)).count()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.iter().all(|card| card.face == CardFace::Matched)
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn flip(&mut self, id: CardId) -> Result<FlipOutcome> {
        use FlipOutcome::*;

        self.card(id)?;
        let index = id.index();
        if self.is_locked() {
            log::trace!("card {:?} ignored, revert in flight", id);
            return Ok(Ignored);
        }
        if !self.cards[index].face.is_hidden() {
            return Ok(Ignored);
        }

        Ok(match self.turn {
            TurnState::Idle => {
                self.cards[index].face = CardFace::Revealed;
                self.turn = TurnState::OneFlipped(id);
                FirstRevealed
            }
            TurnState::OneFlipped(first) => {
                self.cards[index].face = CardFace::Revealed;

                if self.cards[first.index()].matches(&self.cards[index]) {
                    self.cards[first.index()].face = CardFace::Matched;
                    self.cards[index].face = CardFace::Matched;
                    self.turn = TurnState::Idle;
                    if self.is_complete() {
                        log::debug!("all {} cards matched", self.cards.len());
                        Completed
                    } else {
                        Matched
                    }
                } else {
                    let ticket = RevertTicket(self.next_ticket);
                    self.next_ticket = self.next_ticket.wrapping_add(1);
                    debug_assert!(self.pending.is_none(), "only one revert may be in flight");
                    self.pending = Some(self.scheduler.schedule(ticket, self.revert_delay));
                    self.turn = TurnState::Resolving {
                        first,
                        second: id,
                        ticket,
                    };
                    Mismatched
                }
            }
            TurnState::Resolving { .. } => Ignored,
        })
    }

    /// Flips a mismatched pair back down. Tickets other than the one in flight are ignored.
    pub fn complete_revert(&mut self, ticket: RevertTicket) -> RevertOutcome {
        match self.turn {
            TurnState::Resolving {
                first,
                second,
                ticket: current,
            } if current == ticket => {
                for id in [first, second] {
                    self.cards[id.index()].face = CardFace::Hidden;
                }
                // the timer already fired, nothing left to cancel
                self.pending = None;
                self.turn = TurnState::Idle;
                RevertOutcome::Reverted
            }
            _ => {
                log::debug!("ignoring stale revert {:?}", ticket);
                RevertOutcome::Stale
            }
        }
    }

    /// Turns every card face down and deals a new layout, cancelling any revert in flight.
    pub fn restart(&mut self, seed: u64) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel(handle);
        }
        for card in &mut self.cards {
            card.face = CardFace::Hidden;
        }
        self.turn = TurnState::Idle;
        self.order = shuffled_order(self.cards.len(), seed);
    }
}

/// Unbiased permutation of the display slots.
fn shuffled_order(len: usize, seed: u64) -> Vec<CardId> {
    use rand::prelude::*;

    let mut order: Vec<CardId> = (0..len).map(|index| CardId(index as u8)).collect();
    order.shuffle(&mut SmallRng::seed_from_u64(seed));
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct ManualScheduler {
        scheduled: Vec<(RevertTicket, Duration)>,
        cancelled: Vec<RevertTicket>,
    }

    impl RevertScheduler for ManualScheduler {
        type Handle = RevertTicket;

        fn schedule(&mut self, ticket: RevertTicket, delay: Duration) -> RevertTicket {
            self.scheduled.push((ticket, delay));
            ticket
        }

        fn cancel(&mut self, handle: RevertTicket) {
            self.cancelled.push(handle);
        }
    }

    const SEED: u64 = 7;

    fn game() -> MemoryGame<ManualScheduler> {
        MemoryGame::new(&MemoryConfig::default(), ManualScheduler::default(), SEED)
    }

    /// Default deck lays symbol `n` on ids `n` and `n + 6`.
    fn pair(n: u8) -> (CardId, CardId) {
        (CardId(n), CardId(n + 6))
    }

    #[test]
    fn default_deck_has_six_pairs() {
        let game = game();
        assert_eq!(game.len(), 12);
        for symbol in DEFAULT_SYMBOLS {
            let count = game.cards().filter(|(_, card)| card.emoji() == Some(symbol)).count();
            assert_eq!(count, 2, "{symbol}");
        }
    }

    #[test]
    fn display_order_is_a_permutation() {
        let game = game();
        let mut order = game.display_order().to_vec();
        order.sort();
        let ids: Vec<_> = (0..12).map(CardId).collect();
        assert_eq!(order, ids);
        // data order is untouched by the shuffle
        assert_eq!(game.card(CardId(0)).unwrap().emoji(), Some(DEFAULT_SYMBOLS[0]));
    }

    #[test]
    fn matching_pair_becomes_inert() {
        let mut game = game();
        let (a, b) = pair(0);

        assert_eq!(game.flip(a), Ok(FlipOutcome::FirstRevealed));
        assert_eq!(game.turn(), TurnState::OneFlipped(a));
        assert_eq!(game.flip(b), Ok(FlipOutcome::Matched));
        assert_eq!(game.turn(), TurnState::Idle);

        assert_eq!(game.flip(a), Ok(FlipOutcome::Ignored));
        assert_eq!(game.flip(b), Ok(FlipOutcome::Ignored));
        assert!(!game.is_clickable(a));
        assert_eq!(game.card(a).unwrap().face(), CardFace::Matched);
        assert!(game.scheduler().scheduled.is_empty());
    }

    #[test]
    fn clicking_first_card_again_does_not_compare() {
        let mut game = game();
        let (a, _) = pair(2);

        assert_eq!(game.flip(a), Ok(FlipOutcome::FirstRevealed));
        assert_eq!(game.flip(a), Ok(FlipOutcome::Ignored));
        assert_eq!(game.turn(), TurnState::OneFlipped(a));
        assert_eq!(game.card(a).unwrap().face(), CardFace::Revealed);
    }

    #[test]
    fn mismatch_locks_until_revert_fires() {
        let mut game = game();
        let (a, _) = pair(0);
        let (b, _) = pair(1);

        game.flip(a).unwrap();
        assert_eq!(game.flip(b), Ok(FlipOutcome::Mismatched));
        assert!(game.is_locked());
        assert_eq!(game.clickable_count(), 0);

        let (ticket, delay) = game.scheduler().scheduled[0];
        assert_eq!(delay, Duration::from_millis(800));
        assert_eq!(game.pending_revert(), Some(ticket));

        assert_eq!(game.flip(CardId(5)), Ok(FlipOutcome::Ignored));
        assert_eq!(game.card(CardId(5)).unwrap().face(), CardFace::Hidden);

        assert_eq!(game.complete_revert(ticket), RevertOutcome::Reverted);
        assert!(!game.is_locked());
        assert_eq!(game.card(a).unwrap().face(), CardFace::Hidden);
        assert_eq!(game.card(b).unwrap().face(), CardFace::Hidden);
        assert_eq!(game.clickable_count(), 12);
    }

    #[test]
    fn rapid_mismatches_keep_one_revert_in_flight() {
        let mut game = game();

        game.flip(CardId(0)).unwrap();
        assert_eq!(game.flip(CardId(1)), Ok(FlipOutcome::Mismatched));
        for id in [2, 3, 4, 5, 0, 1] {
            assert_eq!(game.flip(CardId(id)), Ok(FlipOutcome::Ignored));
        }
        assert_eq!(game.scheduler().scheduled.len(), 1);

        let first_ticket = game.scheduler().scheduled[0].0;
        assert_eq!(game.complete_revert(first_ticket), RevertOutcome::Reverted);

        game.flip(CardId(2)).unwrap();
        assert_eq!(game.flip(CardId(3)), Ok(FlipOutcome::Mismatched));
        let second_ticket = game.scheduler().scheduled[1].0;
        assert_ne!(first_ticket, second_ticket);

        // a late duplicate of the old timer must not unlock the new pair
        assert_eq!(game.complete_revert(first_ticket), RevertOutcome::Stale);
        assert!(game.is_locked());
        assert_eq!(game.complete_revert(second_ticket), RevertOutcome::Reverted);
        assert_eq!(game.complete_revert(second_ticket), RevertOutcome::Stale);
    }

    #[test]
    fn resolving_all_pairs_leaves_nothing_clickable() {
        let mut game = game();

        for n in 0..6 {
            let (a, b) = pair(n);
            assert_eq!(game.flip(a), Ok(FlipOutcome::FirstRevealed));
            let expected = if n == 5 {
                FlipOutcome::Completed
            } else {
                FlipOutcome::Matched
            };
            assert_eq!(game.flip(b), Ok(expected));
        }

        assert!(game.is_complete());
        assert_eq!(game.clickable_count(), 0);
        for index in 0..12 {
            assert_eq!(game.flip(CardId(index)), Ok(FlipOutcome::Ignored));
        }
    }

    #[test]
    fn cards_without_symbol_never_match() {
        let cards = Vec::from([Card::new(None), Card::new(None)]);
        let mut game =
            MemoryGame::from_cards(cards, REVERT_DELAY, ManualScheduler::default(), 1).unwrap();

        game.flip(CardId(0)).unwrap();
        assert_eq!(game.flip(CardId(1)), Ok(FlipOutcome::Mismatched));
    }

    #[test]
    fn restart_cancels_pending_revert() {
        let mut game = game();
        game.flip(CardId(0)).unwrap();
        game.flip(CardId(1)).unwrap();
        let ticket = game.pending_revert().unwrap();

        game.restart(99);

        assert_eq!(game.scheduler().cancelled, [ticket]);
        assert!(!game.is_locked());
        assert_eq!(game.clickable_count(), 12);
        // the cancelled timer firing anyway is harmless
        assert_eq!(game.complete_revert(ticket), RevertOutcome::Stale);
    }

    #[test]
    fn restart_without_pending_revert_cancels_nothing() {
        let mut game = game();
        let (a, b) = pair(3);
        game.flip(a).unwrap();
        game.flip(b).unwrap();

        game.restart(5);

        assert!(game.scheduler().cancelled.is_empty());
        assert_eq!(game.card(a).unwrap().face(), CardFace::Hidden);
    }

    #[test]
    fn restart_with_same_seed_replays_the_deal() {
        let mut game = game();
        let first_deal = game.display_order().to_vec();
        let (a, b) = pair(0);
        game.flip(a).unwrap();
        game.flip(b).unwrap();

        game.restart(SEED);

        assert_eq!(game.display_order(), first_deal.as_slice());
        assert_eq!(game.clickable_count(), 12);
    }

    #[test]
    fn bad_ids_and_oversized_decks_are_rejected() {
        let mut game = game();
        assert_eq!(game.flip(CardId(12)), Err(GameError::InvalidCard));

        let cards = (0..=MAX_CARDS).map(|_| Card::new(None)).collect();
        assert!(matches!(
            MemoryGame::from_cards(cards, REVERT_DELAY, ManualScheduler::default(), 1),
            Err(GameError::TooManyCards)
        ));
    }
}
