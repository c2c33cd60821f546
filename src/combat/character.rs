//! Plain character record implementing [`Combatant`]
//!
//! Used by the duel runner and tests; a host game would implement the trait
//! on its own entity type instead.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::combatant::{Armor, Combatant, CombatantKind, Damage, Stance, Weapon};
use super::state::CombatState;

/// Playable and NPC races
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Race {
    #[default]
    Human,
    Elf,
    Dwarf,
    Halfling,
    Giantman,
}

impl Race {
    /// Racial adjustment to a stat bonus
    pub fn stat_adjustment(&self, stat: &str) -> i32 {
        match (self, stat) {
            (Race::Human, "strength") => 5,
            (Race::Elf, "strength") => 0,
            (Race::Elf, "quickness") => 15,
            (Race::Dwarf, "strength") => 10,
            (Race::Dwarf, "quickness") => -5,
            (Race::Halfling, "strength") => -15,
            (Race::Halfling, "quickness") => 10,
            (Race::Giantman, "strength") => 15,
            (Race::Giantman, "quickness") => -5,
            _ => 0,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A character as described in a roster file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: CombatantKind,
    #[serde(default)]
    pub race: Race,
    /// Explicit combat attributes (`AS`, `DS`, `AT`)
    #[serde(default)]
    pub attributes: HashMap<String, i32>,
    #[serde(default)]
    pub skills: HashMap<String, i32>,
    /// Raw stat bonuses before racial adjustment
    #[serde(default)]
    pub stats: HashMap<String, i32>,
    #[serde(default)]
    pub stance: Stance,
    #[serde(default)]
    pub weapon: Option<Weapon>,
    #[serde(default)]
    pub armor: Option<Armor>,
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default = "default_true")]
    pub fights: bool,
    #[serde(default)]
    pub pvp: bool,
    #[serde(default)]
    pub regenerating: bool,
    #[serde(skip)]
    pub combat: CombatState,
    /// Every blow taken, newest last
    #[serde(skip)]
    pub damage_taken: Vec<Damage>,
}

impl Character {
    pub fn new(id: &str, name: &str, kind: CombatantKind, health: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            race: Race::default(),
            attributes: HashMap::new(),
            skills: HashMap::new(),
            stats: HashMap::new(),
            stance: Stance::default(),
            weapon: None,
            armor: None,
            health: Some(health),
            fights: true,
            pvp: false,
            regenerating: false,
            combat: CombatState::new(),
            damage_taken: Vec::new(),
        }
    }

    pub fn player(id: &str, name: &str, health: i32) -> Self {
        Self::new(id, name, CombatantKind::Player, health)
    }

    pub fn npc(id: &str, name: &str, health: i32) -> Self {
        Self::new(id, name, CombatantKind::Npc, health)
    }

    pub fn with_attribute(mut self, name: &str, value: i32) -> Self {
        self.attributes.insert(name.to_string(), value);
        self
    }

    pub fn with_skill(mut self, skill: &str, bonus: i32) -> Self {
        self.skills.insert(skill.to_string(), bonus);
        self
    }

    pub fn with_stat(mut self, stat: &str, bonus: i32) -> Self {
        self.stats.insert(stat.to_string(), bonus);
        self
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn with_race(mut self, race: Race) -> Self {
        self.race = race;
        self
    }

    pub fn with_stance(mut self, stance: Stance) -> Self {
        self.stance = stance;
        self
    }
}

impl Combatant for Character {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> CombatantKind {
        self.kind
    }

    fn attribute(&self, name: &str) -> Option<i32> {
        self.attributes.get(name).copied()
    }

    fn skill_bonus(&self, skill: &str) -> i32 {
        self.skills.get(skill).copied().unwrap_or(0)
    }

    fn stat_bonus(&self, stat: &str) -> i32 {
        self.stats
            .get(stat)
            .copied()
            .unwrap_or(0)
            .saturating_add(self.race.stat_adjustment(stat))
    }

    fn stance(&self) -> Stance {
        self.stance
    }

    fn equipped_weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    fn equipped_armor(&self) -> Option<&Armor> {
        self.armor.as_ref()
    }

    fn health(&self) -> Option<i32> {
        self.health
    }

    fn apply_damage(&mut self, damage: &Damage) {
        if let Some(hp) = self.health.as_mut() {
            *hp = hp.saturating_sub(damage.amount);
        }
        self.damage_taken.push(damage.clone());
    }

    fn combat(&self) -> &CombatState {
        &self.combat
    }

    fn combat_mut(&mut self) -> &mut CombatState {
        &mut self.combat
    }

    fn can_fight(&self) -> bool {
        self.fights
    }

    fn pvp_enabled(&self) -> bool {
        self.pvp
    }

    fn has_recovery_effect(&self) -> bool {
        self.regenerating
    }

    fn start_recovery_effect(&mut self) -> bool {
        if self.regenerating {
            return false;
        }
        self.regenerating = true;
        true
    }
}
