//! Match context: owns every piece of match state and drives the phases

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::combat::{resolve_combat, CombatReport, RoundOutcome};
use super::command::MatchCommand;
use super::events::{dispatch, MatchEvent, MatchObserver};
use super::phase::{MatchState, Phase, Stage};
use super::spells::{apply_enemy_spell, apply_player_spell};
use crate::ai::DecisionPolicy;
use crate::board::{Board, Cell, CellRef, Side, COLUMNS};
use crate::cards::{CardCatalog, CardKind};
use crate::config::RulesConfig;
use crate::deck::{Deck, Hand};
use crate::error::{ActionKind, ActionRejected, Result, TargetFault};

type ActionResult = std::result::Result<(), ActionRejected>;

/// One match from `start_game` to `GameOver`.
///
/// All randomness (dealing, enemy decisions, critical rolls) comes from a
/// single seeded `ChaCha8Rng`, so a seed plus a command sequence replays the
/// exact same match.
#[derive(Debug, Clone)]
pub struct MatchContext {
    config: RulesConfig,
    deck: Deck,
    board: Board,
    player_hand: Hand,
    enemy_hand: Hand,
    state: MatchState,
    rng: ChaCha8Rng,
    events: Vec<MatchEvent>,
    last_combat: Option<CombatReport>,
    player_won: Option<bool>,
}

impl MatchContext {
    /// Validates the catalog and rules, then builds an idle context
    /// (phase `Dealing`) waiting for [`start_game`](Self::start_game).
    pub fn new(catalog: CardCatalog, config: RulesConfig, seed: u64) -> Result<Self> {
        catalog.validate()?;
        config.validate()?;
        Ok(Self::build(catalog, config, seed))
    }

    /// Standard catalog and rules
    pub fn with_defaults(seed: u64) -> Self {
        Self::build(CardCatalog::standard(), RulesConfig::standard(), seed)
    }

    fn build(catalog: CardCatalog, config: RulesConfig, seed: u64) -> Self {
        let state = MatchState::for_stage(Stage::Stage1, &config.match_rules);
        Self {
            config,
            deck: Deck::new(catalog),
            board: Board::new(),
            player_hand: Hand::default(),
            enemy_hand: Hand::default(),
            state,
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: Vec::new(),
            last_combat: None,
            player_won: None,
        }
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    pub fn enemy_hand(&self) -> &Hand {
        &self.enemy_hand
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    pub fn round(&self) -> u32 {
        self.state.round
    }

    pub fn last_combat(&self) -> Option<&CombatReport> {
        self.last_combat.as_ref()
    }

    /// `Some` once the match reached `GameOver`
    pub fn player_won(&self) -> Option<bool> {
        self.player_won
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_terminal()
    }

    // ========== Events ==========

    /// Events emitted since the last drain, oldest first
    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    /// Drains buffered events into `observer`
    pub fn dispatch_events<O: MatchObserver + ?Sized>(&mut self, observer: &mut O) {
        let events = self.drain_events();
        dispatch(&events, observer);
    }

    fn emit(&mut self, event: MatchEvent) {
        self.events.push(event);
    }

    fn set_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.emit(MatchEvent::PhaseChanged { phase });
    }

    // ========== Commands ==========

    pub fn execute(&mut self, command: MatchCommand) -> ActionResult {
        match command {
            MatchCommand::StartGame => {
                self.start_game();
                Ok(())
            }
            MatchCommand::PlaceBiome { cell, card_id } => self.place_biome(cell, &card_id),
            MatchCommand::PlaceCharacter { cell, card_id } => self.place_character(cell, &card_id),
            MatchCommand::CastSpell { card_id, target } => self.cast_spell(&card_id, target),
            MatchCommand::SkipSpell => self.skip_spell(),
            MatchCommand::PickUpBiome { cell } => self.pick_up_biome(cell),
            MatchCommand::PickUpCharacter { cell } => self.pick_up_character(cell),
            MatchCommand::AdvanceToNextRound => self.advance_to_next_round(),
            MatchCommand::ExpireTimer => self.expire_timer(),
        }
    }

    /// Starts (or restarts) a match at Stage 1, round 1
    pub fn start_game(&mut self) {
        self.deck.reset();
        self.state = MatchState::for_stage(Stage::Stage1, &self.config.match_rules);
        self.player_won = None;
        log::info!("Match started (Stage 1, best of {})", self.state.max_rounds);
        self.emit(MatchEvent::StageChanged { stage: Stage::Stage1 });
        self.start_round();
    }

    pub fn place_biome(&mut self, cell: CellRef, card_id: &str) -> ActionResult {
        let action = ActionKind::PlaceBiome;
        self.require_phase(action, Phase::PlacingBiomes)?;
        let target = self.player_cell(action, cell)?;
        if target.has_biome() {
            return Err(self.reject(ActionRejected::AlreadyOccupied { action, cell }));
        }
        let Some(card) = self.player_hand.take_biome(card_id) else {
            return Err(self.reject(Self::not_in_hand(action, cell)));
        };

        let card_id = card.id.clone();
        if let Some(target) = self.board.cell_mut(cell) {
            target.place_biome(card);
        }
        self.state.biomes_placed += 1;
        log::debug!("Player placed biome {} at {}", card_id, cell);
        self.emit(MatchEvent::BiomePlaced { cell, card_id });

        if self.state.biomes_placed >= COLUMNS {
            self.enemy_place_characters();
            self.set_phase(Phase::PlacingCharacters);
        }
        Ok(())
    }

    pub fn place_character(&mut self, cell: CellRef, card_id: &str) -> ActionResult {
        let action = ActionKind::PlaceCharacter;
        self.require_phase(action, Phase::PlacingCharacters)?;
        let target = self.player_cell(action, cell)?;
        if !target.has_biome() {
            return Err(self.reject(ActionRejected::IllegalTarget {
                action,
                cell: Some(cell),
                fault: TargetFault::NoBiome,
            }));
        }
        if target.has_character() {
            return Err(self.reject(ActionRejected::AlreadyOccupied { action, cell }));
        }
        let Some(card) = self.player_hand.take_character(card_id) else {
            return Err(self.reject(Self::not_in_hand(action, cell)));
        };

        let card_id = card.id.clone();
        let health = match self.board.cell_mut(cell) {
            Some(target) => target.place_character(card, &self.config.combat),
            None => 0,
        };
        self.state.characters_placed += 1;
        log::debug!("Player placed {} at {} ({} hp)", card_id, cell, health);
        self.emit(MatchEvent::CharacterPlaced { cell, card_id, health });

        if self.state.characters_placed >= COLUMNS {
            self.enemy_cast_spells();
            self.set_phase(Phase::CastingSpells);
        }
        Ok(())
    }

    pub fn pick_up_biome(&mut self, cell: CellRef) -> ActionResult {
        let action = ActionKind::PickUpBiome;
        self.require_phase(action, Phase::PlacingBiomes)?;
        let target = self.player_cell(action, cell)?;
        let fault = if !target.has_biome() {
            Some(TargetFault::NoBiome)
        } else if target.has_character() {
            Some(TargetFault::CharacterOnBiome)
        } else {
            None
        };
        if let Some(fault) = fault {
            return Err(self.reject(ActionRejected::IllegalTarget { action, cell: Some(cell), fault }));
        }

        let Some(card) = self.board.cell_mut(cell).and_then(Cell::remove_biome) else {
            return Ok(());
        };
        let card_id = card.id.clone();
        self.player_hand.return_card(card);
        self.state.biomes_placed = self.state.biomes_placed.saturating_sub(1);
        log::debug!("Player picked up biome {} from {}", card_id, cell);
        self.emit(MatchEvent::CardPickedUp { cell, card_id, kind: CardKind::Biome });
        Ok(())
    }

    pub fn pick_up_character(&mut self, cell: CellRef) -> ActionResult {
        let action = ActionKind::PickUpCharacter;
        self.require_phase(action, Phase::PlacingCharacters)?;
        let target = self.player_cell(action, cell)?;
        if !target.has_character() {
            return Err(self.reject(ActionRejected::IllegalTarget {
                action,
                cell: Some(cell),
                fault: TargetFault::NoCharacter,
            }));
        }

        let Some(card) = self.board.cell_mut(cell).and_then(Cell::remove_character) else {
            return Ok(());
        };
        let card_id = card.id.clone();
        self.player_hand.return_card(card);
        self.state.characters_placed = self.state.characters_placed.saturating_sub(1);
        log::debug!("Player picked up {} from {}", card_id, cell);
        self.emit(MatchEvent::CardPickedUp { cell, card_id, kind: CardKind::Character });
        Ok(())
    }

    /// Casts a spell from the player hand onto an own character, then fights
    pub fn cast_spell(&mut self, card_id: &str, target: CellRef) -> ActionResult {
        let action = ActionKind::CastSpell;
        self.require_phase(action, Phase::CastingSpells)?;
        let cell = self.player_cell(action, target)?;
        if !cell.has_character() {
            return Err(self.reject(ActionRejected::IllegalTarget {
                action,
                cell: Some(target),
                fault: TargetFault::NoCharacter,
            }));
        }
        let Some(spell) = self.player_hand.take_spell(card_id) else {
            return Err(self.reject(Self::not_in_hand(action, target)));
        };

        apply_player_spell(&mut self.board, &spell, target, &self.config);
        log::debug!("Player cast {} ({:?} {}) on {}", spell.id, spell.kind, spell.power, target);
        self.emit(MatchEvent::SpellCast {
            caster: Side::Player,
            card_id: spell.id,
            kind: spell.kind,
            target: Some(target),
        });
        self.run_combat();
        Ok(())
    }

    pub fn skip_spell(&mut self) -> ActionResult {
        self.require_phase(ActionKind::SkipSpell, Phase::CastingSpells)?;
        log::debug!("Player skipped the spell step");
        self.emit(MatchEvent::SpellSkipped);
        self.run_combat();
        Ok(())
    }

    /// Continues after a resolved round: the next round (or an overtime
    /// replay) from `RoundEnd`, Stage 2 from `StageComplete`.
    pub fn advance_to_next_round(&mut self) -> ActionResult {
        match self.state.phase {
            Phase::RoundEnd => {
                self.start_round();
                Ok(())
            }
            Phase::StageComplete => {
                self.start_stage2();
                Ok(())
            }
            phase => Err(self.reject(ActionRejected::IllegalPhase {
                action: ActionKind::AdvanceToNextRound,
                phase,
            })),
        }
    }

    /// The match clock ran out: the player loses
    pub fn expire_timer(&mut self) -> ActionResult {
        if self.state.is_terminal() {
            return Err(self.reject(ActionRejected::IllegalPhase {
                action: ActionKind::ExpireTimer,
                phase: self.state.phase,
            }));
        }
        log::info!("Match timer expired during {:?}", self.state.phase);
        self.end_game(false);
        Ok(())
    }

    // ========== Validation ==========

    fn require_phase(&self, action: ActionKind, expected: Phase) -> ActionResult {
        if self.state.phase == expected {
            Ok(())
        } else {
            Err(self.reject(ActionRejected::IllegalPhase { action, phase: self.state.phase }))
        }
    }

    /// The player-side cell at `at`, or the reason it cannot be touched
    fn player_cell(&self, action: ActionKind, at: CellRef) -> std::result::Result<&Cell, ActionRejected> {
        if at.side != Side::Player {
            return Err(self.reject(ActionRejected::IllegalTarget {
                action,
                cell: Some(at),
                fault: TargetFault::EnemySide,
            }));
        }
        self.board.cell(at).ok_or_else(|| {
            self.reject(ActionRejected::IllegalTarget {
                action,
                cell: Some(at),
                fault: TargetFault::ColumnOutOfRange,
            })
        })
    }

    fn not_in_hand(action: ActionKind, cell: CellRef) -> ActionRejected {
        ActionRejected::IllegalTarget { action, cell: Some(cell), fault: TargetFault::CardNotInHand }
    }

    fn reject(&self, rejection: ActionRejected) -> ActionRejected {
        log::debug!("Rejected: {}", rejection);
        rejection
    }

    // ========== Flow ==========

    fn start_round(&mut self) {
        self.state.reset_counters();
        self.state.overtime = false;
        self.board.clear();
        self.last_combat = None;
        log::info!("=== Stage {} - Round {} ===", self.state.stage.number(), self.state.round);
        self.emit(MatchEvent::RoundStarted { round: self.state.round });

        self.set_phase(Phase::Dealing);
        let deal = self.deck.deal(self.state.stage, &self.config.match_rules, &mut self.rng);
        self.player_hand = deal.player;
        self.enemy_hand = deal.enemy;
        self.emit(MatchEvent::CardsDealt {
            player_cards: self.player_hand.len(),
            enemy_cards: self.enemy_hand.len(),
        });

        self.enemy_place_biomes();
        self.set_phase(Phase::PlacingBiomes);
    }

    fn start_stage2(&mut self) {
        self.state = MatchState::for_stage(Stage::Stage2, &self.config.match_rules);
        self.deck.add_cavalry();
        log::info!("Stage 2 started (best of {})", self.state.max_rounds);
        self.emit(MatchEvent::StageChanged { stage: Stage::Stage2 });
        self.start_round();
    }

    fn enemy_policy(&self) -> DecisionPolicy {
        DecisionPolicy::for_stage(self.state.stage, &self.config.ai)
    }

    fn enemy_place_biomes(&mut self) {
        let plan = self.enemy_policy().plan_biomes(
            &self.enemy_hand.biomes,
            &self.enemy_hand.characters,
            &mut self.rng,
        );
        for (column, card) in plan.placements() {
            let cell = CellRef::enemy(column);
            let Some(card) = self.enemy_hand.take_biome(&card.id) else {
                continue;
            };
            let card_id = card.id.clone();
            if let Some(target) = self.board.cell_mut(cell) {
                target.place_biome(card);
            }
            self.emit(MatchEvent::BiomePlaced { cell, card_id });
        }
    }

    fn enemy_place_characters(&mut self) {
        let plan = self.enemy_policy().plan_characters(
            self.board.row(Side::Enemy),
            &self.enemy_hand.characters,
            &mut self.rng,
        );
        for (column, card) in plan.placements() {
            let cell = CellRef::enemy(column);
            let Some(card) = self.enemy_hand.take_character(&card.id) else {
                continue;
            };
            let card_id = card.id.clone();
            let health = match self.board.cell_mut(cell) {
                Some(target) => target.place_character(card, &self.config.combat),
                None => 0,
            };
            self.emit(MatchEvent::CharacterPlaced { cell, card_id, health });
        }
    }

    fn enemy_cast_spells(&mut self) {
        let spells = std::mem::take(&mut self.enemy_hand.spells);
        for spell in spells {
            let target = apply_enemy_spell(&mut self.board, &spell);
            log::debug!("Enemy cast {} ({:?} {}) on {:?}", spell.id, spell.kind, spell.power, target);
            self.emit(MatchEvent::SpellCast {
                caster: Side::Enemy,
                card_id: spell.id,
                kind: spell.kind,
                target,
            });
        }
    }

    fn run_combat(&mut self) {
        self.set_phase(Phase::Combat);
        let report = resolve_combat(&mut self.board, &self.config.combat, &mut self.rng);

        for column in &report.columns {
            self.events.push(MatchEvent::CombatColumnResolved {
                column: column.column,
                player_damage: column.player_attack,
                enemy_damage: column.enemy_attack,
                player_died: column.player_died,
                enemy_died: column.enemy_died,
            });
        }

        match report.outcome {
            RoundOutcome::PlayerWin => self.state.player_score += 1,
            RoundOutcome::EnemyWin => self.state.enemy_score += 1,
            RoundOutcome::Draw => {}
        }
        log::info!(
            "Round {} {:?}: score {}-{}",
            self.state.round,
            report.outcome,
            self.state.player_score,
            self.state.enemy_score
        );
        self.emit(MatchEvent::RoundResolved {
            round: self.state.round,
            outcome: report.outcome,
            player_score: self.state.player_score,
            enemy_score: self.state.enemy_score,
        });

        let outcome = report.outcome;
        self.last_combat = Some(report);
        self.finish_round(outcome);
    }

    fn finish_round(&mut self, outcome: RoundOutcome) {
        self.set_phase(Phase::RoundEnd);

        if outcome == RoundOutcome::Draw {
            self.state.overtime = true;
            log::info!("Round {} drawn, replaying", self.state.round);
            self.emit(MatchEvent::Overtime { round: self.state.round });
            return;
        }

        self.state.round += 1;
        if !self.state.stage_decided() {
            return;
        }

        let player_passed = self.state.player_score >= self.state.required_wins();
        if self.state.stage == Stage::Stage1 && player_passed {
            log::info!("Stage 1 cleared");
            self.set_phase(Phase::StageComplete);
        } else {
            let player_won = self.state.player_won();
            self.end_game(player_won);
        }
    }

    fn end_game(&mut self, player_won: bool) {
        self.board.clear();
        self.player_hand.clear();
        self.enemy_hand.clear();
        self.player_won = Some(player_won);
        log::info!(
            "Game over: {} ({}-{} in Stage {})",
            if player_won { "player wins" } else { "player loses" },
            self.state.player_score,
            self.state.enemy_score,
            self.state.stage.number()
        );
        self.set_phase(Phase::GameOver);
        self.emit(MatchEvent::GameOver { player_won });
    }
}
