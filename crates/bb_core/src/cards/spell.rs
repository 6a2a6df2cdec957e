use serde::{Deserialize, Serialize};

use crate::board::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellKind {
    Damage,
    Heal,
    Buff,
    SoulSiphon,
}

impl SpellKind {
    /// Side an enemy caster aims this spell at
    pub fn enemy_target_side(self) -> Side {
        match self {
            SpellKind::Damage | SpellKind::SoulSiphon => Side::Player,
            SpellKind::Heal | SpellKind::Buff => Side::Enemy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellCard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: SpellKind,
    pub power: i32,
}

impl SpellCard {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: SpellKind, power: i32) -> Self {
        Self { id: id.into(), name: name.into(), description: String::new(), kind, power }
    }
}
