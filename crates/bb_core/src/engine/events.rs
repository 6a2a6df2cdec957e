//! Outbound events for the presentation layer
//!
//! The context buffers events in emission order. A frontend either drains
//! them after each command or hands a [`MatchObserver`] to
//! [`MatchContext::dispatch_events`](super::MatchContext::dispatch_events).

use serde::{Deserialize, Serialize};

use super::combat::RoundOutcome;
use super::phase::{Phase, Stage};
use crate::board::{CellRef, Side};
use crate::cards::{CardKind, SpellKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    PhaseChanged {
        phase: Phase,
    },
    RoundStarted {
        round: u32,
    },
    StageChanged {
        stage: Stage,
    },
    CardsDealt {
        player_cards: usize,
        enemy_cards: usize,
    },
    BiomePlaced {
        cell: CellRef,
        card_id: String,
    },
    CharacterPlaced {
        cell: CellRef,
        card_id: String,
        health: i32,
    },
    CardPickedUp {
        cell: CellRef,
        card_id: String,
        kind: CardKind,
    },
    SpellCast {
        caster: Side,
        card_id: String,
        kind: SpellKind,
        /// `None` when no character was there to receive it
        target: Option<CellRef>,
    },
    SpellSkipped,
    CombatColumnResolved {
        column: usize,
        player_damage: i32,
        enemy_damage: i32,
        player_died: bool,
        enemy_died: bool,
    },
    RoundResolved {
        round: u32,
        outcome: RoundOutcome,
        player_score: u32,
        enemy_score: u32,
    },
    Overtime {
        round: u32,
    },
    GameOver {
        player_won: bool,
    },
}

/// Callback-style consumer of [`MatchEvent`]s.
///
/// Every method has an empty default; implement the ones you care about.
/// `on_event` sees every event and forwards to the specific hooks.
pub trait MatchObserver {
    fn on_event(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::PhaseChanged { phase } => self.on_phase_changed(*phase),
            MatchEvent::RoundStarted { round } => self.on_round_start(*round),
            MatchEvent::StageChanged { stage } => self.on_stage_changed(*stage),
            MatchEvent::CombatColumnResolved {
                column,
                player_damage,
                enemy_damage,
                player_died,
                enemy_died,
            } => self.on_combat_column_resolved(
                *column,
                *player_damage,
                *enemy_damage,
                *player_died,
                *enemy_died,
            ),
            MatchEvent::GameOver { player_won } => self.on_game_over(*player_won),
            _ => {}
        }
    }

    fn on_phase_changed(&mut self, _phase: Phase) {}

    fn on_round_start(&mut self, _round: u32) {}

    fn on_stage_changed(&mut self, _stage: Stage) {}

    fn on_combat_column_resolved(
        &mut self,
        _column: usize,
        _player_damage: i32,
        _enemy_damage: i32,
        _player_died: bool,
        _enemy_died: bool,
    ) {
    }

    fn on_game_over(&mut self, _player_won: bool) {}
}

/// Feeds `events` to `observer` in order
pub fn dispatch<'a, O, I>(events: I, observer: &mut O)
where
    O: MatchObserver + ?Sized,
    I: IntoIterator<Item = &'a MatchEvent>,
{
    for event in events {
        observer.on_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        phases: Vec<Phase>,
        rounds: Vec<u32>,
        columns: Vec<(usize, i32, i32)>,
        game_over: Option<bool>,
    }

    impl MatchObserver for Recorder {
        fn on_phase_changed(&mut self, phase: Phase) {
            self.phases.push(phase);
        }

        fn on_round_start(&mut self, round: u32) {
            self.rounds.push(round);
        }

        fn on_combat_column_resolved(&mut self, column: usize, p: i32, e: i32, _: bool, _: bool) {
            self.columns.push((column, p, e));
        }

        fn on_game_over(&mut self, player_won: bool) {
            self.game_over = Some(player_won);
        }
    }

    #[test]
    fn test_dispatch_routes_to_hooks() {
        let events = vec![
            MatchEvent::RoundStarted { round: 1 },
            MatchEvent::PhaseChanged { phase: Phase::PlacingBiomes },
            MatchEvent::SpellSkipped,
            MatchEvent::CombatColumnResolved {
                column: 2,
                player_damage: 6,
                enemy_damage: 0,
                player_died: false,
                enemy_died: false,
            },
            MatchEvent::GameOver { player_won: true },
        ];

        let mut recorder = Recorder::default();
        dispatch(&events, &mut recorder);
        assert_eq!(recorder.rounds, vec![1]);
        assert_eq!(recorder.phases, vec![Phase::PlacingBiomes]);
        assert_eq!(recorder.columns, vec![(2, 6, 0)]);
        assert_eq!(recorder.game_over, Some(true));
    }

    #[test]
    fn test_column_event_json_shape() {
        let event = MatchEvent::CombatColumnResolved {
            column: 0,
            player_damage: 6,
            enemy_damage: 0,
            player_died: false,
            enemy_died: true,
        };
        insta::assert_json_snapshot!(event, @r###"
        {
          "type": "combat_column_resolved",
          "column": 0,
          "player_damage": 6,
          "enemy_damage": 0,
          "player_died": false,
          "enemy_died": true
        }
        "###);
    }

    #[test]
    fn test_spell_event_json_shape() {
        let event = MatchEvent::SpellCast {
            caster: Side::Enemy,
            card_id: "fireball".to_string(),
            kind: SpellKind::Damage,
            target: Some(CellRef::player(1)),
        };
        insta::assert_json_snapshot!(event, @r###"
        {
          "type": "spell_cast",
          "caster": "Enemy",
          "card_id": "fireball",
          "kind": "Damage",
          "target": {
            "side": "Player",
            "column": 1
          }
        }
        "###);
    }
}
