//! Session controller.
//!
//! Owns the live [`Session`] and drives it through
//! `Idle -> Running -> Ended`. Every state change goes through here:
//! dealing, card selection, pair resolution, the delayed flip-back of
//! mismatches, win detection and best-score persistence.
//!
//! The controller publishes [`SessionEvent`]s through an embedded
//! [`EventHub`]; it never renders anything.

use tracing::{debug, info, warn};

use super::scheduler::{FlipBack, ManualScheduler, Scheduler};
use super::state::{Session, SessionStatus};
use crate::cards::{Card, CardId, Deck};
use crate::core::{Difficulty, GameConfig, GameError, GameRng};
use crate::events::{EventHub, Listener, SessionEvent, SessionEventKind};
use crate::scores::{MemoryScoreStore, ScoreStore};

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// No game in progress.
    NotRunning,
    /// A mismatched pair is waiting to be flipped back.
    Busy,
    /// The id is not part of the current deck.
    UnknownCard,
    /// The card is already part of a found pair.
    AlreadyMatched,
    /// The card is already revealed this turn.
    AlreadyFaceUp,
}

/// Outcome of [`SessionController::select_card`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a turn revealed.
    Revealed,
    /// Second card matched the first.
    Matched { attempts: u32 },
    /// Second card did not match; a flip-back is scheduled.
    Mismatched { attempts: u32 },
    /// The last pair was found.
    Won { attempts: u32, new_best: bool },
}

impl Selection {
    /// True if the selection changed nothing.
    #[must_use]
    pub const fn is_ignored(self) -> bool {
        matches!(self, Self::Ignored(_))
    }
}

/// Game session controller.
pub struct SessionController<S: ScoreStore = MemoryScoreStore, T: Scheduler = ManualScheduler> {
    config: GameConfig,
    rng: GameRng,
    hub: EventHub<SessionEvent>,
    store: S,
    scheduler: T,
    session: Session,
}

impl SessionController {
    /// Controller with an in-memory score store and a virtual clock.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::with_parts(config, MemoryScoreStore::new(), ManualScheduler::new())
    }
}

impl<S: ScoreStore> SessionController<S, ManualScheduler> {
    /// Controller with the given score store and a virtual clock.
    #[must_use]
    pub fn with_store(config: GameConfig, store: S) -> Self {
        Self::with_parts(config, store, ManualScheduler::new())
    }
}

impl<S: ScoreStore, T: Scheduler> SessionController<S, T> {
    /// Controller with explicit collaborators.
    #[must_use]
    pub fn with_parts(config: GameConfig, store: S, scheduler: T) -> Self {
        let rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        debug!(seed = rng.seed(), "session controller created");

        Self {
            config,
            rng,
            hub: EventHub::new(),
            store,
            scheduler,
            session: Session::default(),
        }
    }

    // === Events ===

    /// Register a listener for one event kind.
    pub fn subscribe(&mut self, kind: SessionEventKind, listener: Listener<SessionEvent>) {
        self.hub.subscribe(kind, listener);
    }

    /// Remove every registration of `listener`; returns how many were removed.
    pub fn unsubscribe(&mut self, kind: SessionEventKind, listener: &Listener<SessionEvent>) -> usize {
        self.hub.unsubscribe(kind, listener)
    }

    /// The embedded event hub.
    #[must_use]
    pub const fn events(&self) -> &EventHub<SessionEvent> {
        &self.hub
    }

    // === Lifecycle ===

    /// Replace the current session with a freshly dealt one.
    ///
    /// Fails without touching any state if the palette cannot supply the
    /// pairs. Any flip-back still pending from the previous session becomes
    /// stale.
    pub fn start(&mut self, difficulty: Difficulty) -> Result<(), GameError> {
        self.config.validate(difficulty)?;

        let mut deck = Deck::deal(self.config.faces_for(difficulty));
        deck.shuffle(&mut self.rng);

        let best_score = self.load_best_score(difficulty);
        let generation = self.session.generation.next();
        self.session = Session::dealt(generation, difficulty, deck, best_score);

        info!(
            %difficulty,
            %generation,
            cards = self.session.deck.len(),
            best_score = ?best_score,
            "session started"
        );
        self.set_status(SessionStatus::Running);
        Ok(())
    }

    /// [`start`](Self::start) from a raw grid size.
    pub fn start_with_grid_size(&mut self, size: u8) -> Result<(), GameError> {
        self.start(Difficulty::from_grid_size(size)?)
    }

    // === Turns ===

    /// Reveal a card.
    ///
    /// Ignored selections change nothing and publish nothing. The second
    /// card of a turn resolves the pair immediately.
    pub fn select_card(&mut self, id: CardId) -> Selection {
        if let Some(reason) = self.ignore_reason(id) {
            debug!(card = %id, ?reason, "selection ignored");
            return Selection::Ignored(reason);
        }

        if let Some(card) = self.session.deck.get_mut(id) {
            card.flip(None);
        }
        self.session.selected.push(id);
        debug!(card = %id, selected = self.session.selected.len(), "card revealed");

        let full_turn = match self.session.selected.as_slice() {
            &[first, second] => Some((first, second)),
            _ => None,
        };
        match full_turn {
            Some((first, second)) => self.resolve(first, second),
            None => Selection::Revealed,
        }
    }

    /// Reveal the card at a board position.
    pub fn select_at(&mut self, position: usize) -> Selection {
        match self.session.deck.at(position).map(Card::id) {
            Some(id) => self.select_card(id),
            None => Selection::Ignored(IgnoreReason::UnknownCard),
        }
    }

    fn ignore_reason(&self, id: CardId) -> Option<IgnoreReason> {
        if self.session.status != SessionStatus::Running {
            return Some(IgnoreReason::NotRunning);
        }
        if self.session.busy {
            return Some(IgnoreReason::Busy);
        }

        let Some(card) = self.session.deck.get(id) else {
            return Some(IgnoreReason::UnknownCard);
        };
        if card.is_matched() {
            Some(IgnoreReason::AlreadyMatched)
        } else if card.is_face_up() {
            Some(IgnoreReason::AlreadyFaceUp)
        } else {
            None
        }
    }

    fn resolve(&mut self, first: CardId, second: CardId) -> Selection {
        self.session.busy = true;
        self.session.selected.clear();
        self.session.attempts = self.session.attempts.saturating_add(1);
        let attempts = self.session.attempts;
        self.hub.publish(&SessionEvent::AttemptsChanged { attempts });

        let matched = self
            .session
            .deck
            .pair_mut(first, second)
            .is_some_and(|(a, b)| a.match_against(b));

        let outcome = if matched {
            self.session.busy = false;
            debug!(%first, %second, attempts, "pair matched");
            Selection::Matched { attempts }
        } else {
            let task = FlipBack {
                generation: self.session.generation,
                cards: [first, second],
            };
            self.session.pending_flip_back = Some(task);
            self.scheduler.schedule(self.config.flip_back_delay(), task);
            debug!(%first, %second, attempts, "pair mismatched, flip-back scheduled");
            Selection::Mismatched { attempts }
        };

        match self.check_win() {
            Some(new_best) => Selection::Won { attempts, new_best },
            None => outcome,
        }
    }

    /// End the session if every card is matched.
    ///
    /// Returns `Some(new_best)` when the game was won by this call.
    fn check_win(&mut self) -> Option<bool> {
        if self.session.status != SessionStatus::Running || !self.session.deck.all_matched() {
            return None;
        }

        self.set_status(SessionStatus::Ended);

        let attempts = self.session.attempts;
        let difficulty = self.session.difficulty?;
        let new_best = self.session.is_improvement(attempts);
        if new_best {
            self.save_best_score(difficulty, attempts);
            self.session.best_score = Some(attempts);
        }

        info!(%difficulty, attempts, new_best, "session ended");
        Some(new_best)
    }

    fn set_status(&mut self, new: SessionStatus) {
        let old = self.session.status;
        if old == new {
            return;
        }
        self.session.status = new;
        self.hub.publish(&SessionEvent::StatusChanged { new, old });
    }

    // === Time ===

    /// Advance the scheduler clock and complete every flip-back now due.
    ///
    /// Returns how many flip-backs were applied to the live session.
    pub fn advance(&mut self, elapsed: std::time::Duration) -> usize {
        let due = self.scheduler.advance(elapsed);
        due.into_iter()
            .filter(|&task| self.complete_flip_back(task))
            .count()
    }

    /// Turn a mismatched pair face down and clear the busy flag.
    ///
    /// Only the flip-back scheduled by the latest mismatch is applied, and
    /// only once. Tasks from a replaced session, repeated completions and
    /// tasks for any other pair are ignored. Returns whether the task was
    /// applied.
    pub fn complete_flip_back(&mut self, task: FlipBack) -> bool {
        if task.generation != self.session.generation {
            debug!(
                task = %task.generation,
                live = %self.session.generation,
                "ignoring stale flip-back"
            );
            return false;
        }
        if self.session.pending_flip_back != Some(task) {
            debug!(
                first = %task.cards[0],
                second = %task.cards[1],
                "ignoring flip-back that is not pending"
            );
            return false;
        }
        self.session.pending_flip_back = None;

        for id in task.cards {
            if let Some(card) = self.session.deck.get_mut(id) {
                card.flip(Some(false));
            }
        }
        self.session.busy = false;
        true
    }

    // === Scores ===

    fn load_best_score(&self, difficulty: Difficulty) -> Option<u32> {
        let key = self.config.score_key(difficulty);
        match self.store.get(&key) {
            Ok(score) => score,
            Err(err) => {
                warn!(%key, error = %err, "could not read best score, treating as none");
                None
            }
        }
    }

    fn save_best_score(&mut self, difficulty: Difficulty, attempts: u32) {
        let key = self.config.score_key(difficulty);
        match self.store.set(&key, attempts) {
            Ok(()) => info!(%key, attempts, "new best score saved"),
            Err(err) => warn!(%key, attempts, error = %err, "could not save best score"),
        }
    }

    // === Accessors ===

    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.session.status
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.session.attempts
    }

    #[must_use]
    pub const fn best_score(&self) -> Option<u32> {
        self.session.best_score
    }

    #[must_use]
    pub const fn difficulty(&self) -> Option<Difficulty> {
        self.session.difficulty
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.session.busy
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.session.cards()
    }

    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.session.card(id)
    }

    #[must_use]
    pub fn selected(&self) -> &[CardId] {
        self.session.selected()
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the dealing RNG.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.seed()
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the score store, e.g. to reset scores between games.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    #[must_use]
    pub const fn scheduler(&self) -> &T {
        &self.scheduler
    }
}

impl<S: ScoreStore, T: Scheduler> std::fmt::Debug for SessionController<S, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionController")
            .field("seed", &self.rng.seed())
            .field("session", &self.session)
            .field("pending_flip_backs", &self.scheduler.pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::cards::PairKey;

    fn controller() -> SessionController {
        SessionController::new(GameConfig::default().with_seed(7))
    }

    /// Ids of the two cards carrying `key`.
    fn pair(controller: &SessionController, key: u32) -> (CardId, CardId) {
        let ids: Vec<CardId> = controller
            .cards()
            .iter()
            .filter(|card| card.pair_key() == PairKey::new(key))
            .map(Card::id)
            .collect();
        (ids[0], ids[1])
    }

    #[test]
    fn test_new_controller_is_idle() {
        let controller = controller();
        assert_eq!(controller.status(), SessionStatus::Idle);
        assert!(controller.cards().is_empty());
        assert_eq!(controller.seed(), 7);
    }

    #[test]
    fn test_select_while_idle_is_ignored() {
        let mut controller = controller();
        assert_eq!(
            controller.select_card(CardId(1)),
            Selection::Ignored(IgnoreReason::NotRunning)
        );
    }

    #[test]
    fn test_start_rejects_bad_grid_size() {
        let mut controller = controller();
        assert!(matches!(
            controller.start_with_grid_size(3),
            Err(GameError::InvalidDifficulty(3))
        ));
        assert_eq!(controller.status(), SessionStatus::Idle);
        assert_eq!(controller.session().generation().raw(), 0);
    }

    #[test]
    fn test_start_rejects_small_palette_without_mutation() {
        let mut controller =
            SessionController::new(GameConfig::default().with_seed(1).with_faces(["a", "b"]));
        controller.start(Difficulty::Easy).unwrap();
        let before: Vec<CardId> = controller.cards().iter().map(Card::id).collect();

        assert!(matches!(
            controller.start(Difficulty::Normal),
            Err(GameError::PaletteTooSmall { .. })
        ));
        let after: Vec<CardId> = controller.cards().iter().map(Card::id).collect();
        assert_eq!(before, after);
        assert_eq!(controller.difficulty(), Some(Difficulty::Easy));
    }

    #[test]
    fn test_same_card_twice_is_noop() {
        let mut controller = controller();
        controller.start(Difficulty::Normal).unwrap();
        let id = controller.cards()[0].id();

        assert_eq!(controller.select_card(id), Selection::Revealed);
        assert_eq!(
            controller.select_card(id),
            Selection::Ignored(IgnoreReason::AlreadyFaceUp)
        );
        assert_eq!(controller.selected(), &[id]);
        assert_eq!(controller.attempts(), 0);
    }

    #[test]
    fn test_unknown_card_is_ignored() {
        let mut controller = controller();
        controller.start(Difficulty::Easy).unwrap();
        assert_eq!(
            controller.select_card(CardId(u64::MAX)),
            Selection::Ignored(IgnoreReason::UnknownCard)
        );
        assert_eq!(controller.select_at(99), Selection::Ignored(IgnoreReason::UnknownCard));
    }

    #[test]
    fn test_match_clears_busy_synchronously() {
        let mut controller = controller();
        controller.start(Difficulty::Normal).unwrap();
        let (a, b) = pair(&controller, 0);

        controller.select_card(a);
        assert_eq!(controller.select_card(b), Selection::Matched { attempts: 1 });
        assert!(!controller.is_busy());
        assert!(controller.card(a).unwrap().is_matched());
        assert!(controller.card(b).unwrap().is_face_up());
        assert_eq!(controller.scheduler().pending(), 0);
    }

    #[test]
    fn test_mismatch_flips_back_after_delay() {
        let mut controller = controller();
        controller.start(Difficulty::Normal).unwrap();
        let (a, _) = pair(&controller, 0);
        let (c, _) = pair(&controller, 1);

        controller.select_card(a);
        assert_eq!(controller.select_card(c), Selection::Mismatched { attempts: 1 });
        assert!(controller.is_busy());

        assert_eq!(controller.advance(Duration::from_millis(999)), 0);
        assert!(controller.is_busy());
        assert!(controller.card(a).unwrap().is_face_up());

        assert_eq!(controller.advance(Duration::from_millis(1)), 1);
        assert!(!controller.is_busy());
        assert!(!controller.card(a).unwrap().is_face_up());
        assert!(!controller.card(c).unwrap().is_face_up());
        assert_eq!(controller.attempts(), 1);
    }

    #[test]
    fn test_busy_blocks_selection() {
        let mut controller = controller();
        controller.start(Difficulty::Normal).unwrap();
        let (a, _) = pair(&controller, 0);
        let (c, _) = pair(&controller, 1);
        let (e, _) = pair(&controller, 2);

        controller.select_card(a);
        controller.select_card(c);
        assert_eq!(controller.select_card(e), Selection::Ignored(IgnoreReason::Busy));
        assert!(!controller.card(e).unwrap().is_face_up());
    }

    #[test]
    fn test_stale_flip_back_is_ignored() {
        let mut controller = controller();
        controller.start(Difficulty::Easy).unwrap();
        let (a, _) = pair(&controller, 0);
        let (c, _) = pair(&controller, 1);
        controller.select_card(a);
        controller.select_card(c);

        let stale = FlipBack {
            generation: controller.session().generation(),
            cards: [a, c],
        };
        controller.start(Difficulty::Easy).unwrap();

        assert!(!controller.complete_flip_back(stale));
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_mismatch_records_pending_flip_back() {
        let mut controller = controller();
        controller.start(Difficulty::Normal).unwrap();
        let (a, _) = pair(&controller, 0);
        let (c, _) = pair(&controller, 1);

        controller.select_card(a);
        controller.select_card(c);
        let pending = controller.session().pending_flip_back().unwrap();
        assert_eq!(pending.cards, [a, c]);
        assert_eq!(pending.generation, controller.session().generation());

        controller.advance(controller.config().flip_back_delay());
        assert_eq!(controller.session().pending_flip_back(), None);
    }

    #[test]
    fn test_flip_back_applies_once() {
        let mut controller = controller();
        controller.start(Difficulty::Normal).unwrap();
        let (a, _) = pair(&controller, 0);
        let (c, _) = pair(&controller, 1);

        controller.select_card(a);
        controller.select_card(c);
        let task = controller.session().pending_flip_back().unwrap();
        assert!(controller.complete_flip_back(task));
        assert_eq!(controller.select_card(a), Selection::Revealed);

        assert!(!controller.complete_flip_back(task));
        assert!(controller.card(a).unwrap().is_face_up());
        assert_eq!(controller.selected(), &[a]);
        assert_eq!(
            controller.select_card(a),
            Selection::Ignored(IgnoreReason::AlreadyFaceUp)
        );
        assert_eq!(controller.attempts(), 1);

        // The scheduler still holds the original task; it must not apply either.
        assert_eq!(controller.advance(Duration::from_secs(5)), 0);
        assert_eq!(controller.selected(), &[a]);
    }

    #[test]
    fn test_flip_back_for_other_pair_is_ignored() {
        let mut controller = controller();
        controller.start(Difficulty::Normal).unwrap();
        let (a, _) = pair(&controller, 0);
        let (c, _) = pair(&controller, 1);
        let (e, g) = pair(&controller, 2);

        controller.select_card(a);
        controller.select_card(c);
        let other = FlipBack {
            generation: controller.session().generation(),
            cards: [e, g],
        };

        assert!(!controller.complete_flip_back(other));
        assert!(controller.is_busy());
        assert!(controller.card(a).unwrap().is_face_up());
        assert!(controller.card(c).unwrap().is_face_up());
        assert!(controller.select_card(e).is_ignored());

        assert_eq!(controller.advance(controller.config().flip_back_delay()), 1);
        assert!(!controller.is_busy());
        assert!(!controller.card(a).unwrap().is_face_up());
    }

    #[test]
    fn test_controller_debug() {
        let controller = controller();
        let text = format!("{controller:?}");
        assert!(text.contains("SessionController"));
        assert!(text.contains("seed: 7"));
    }
}
