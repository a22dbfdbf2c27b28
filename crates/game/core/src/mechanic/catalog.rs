use std::collections::HashMap;

use super::{MechanicKind, floor, raid};
use crate::combat::{CombatModifiers, Exchange};

/// Pure transform applied once per mechanic per combat round.
///
/// Reads the current `out.damage` (the value left by earlier mechanics) and
/// rewrites it, raises flags, or adds narrative lines.
pub type MechanicRule = fn(&Exchange<'_>, &mut CombatModifiers);

/// Registry from mechanic identifier to its rule.
///
/// Lookups never fail: identifiers without a registered rule resolve to
/// [`MechanicCatalog::noop`].
#[derive(Clone, Default)]
pub struct MechanicCatalog {
    rules: HashMap<MechanicKind, MechanicRule>,
}

impl MechanicCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Catalog with every floor, Warden and Raid Boss rule registered.
    pub fn standard() -> Self {
        use MechanicKind::*;

        let mut catalog = Self::empty();
        let entries: [(MechanicKind, MechanicRule); 23] = [
            (Armored, floor::armored),
            (Enraged, floor::enraged),
            (Regenerator, Self::noop),
            (Stalwart, floor::stalwart),
            (Warded, floor::warded),
            (Phasing, floor::phasing),
            (Draining, floor::draining),
            (Splitting, floor::splitting),
            (RotatingResistance, floor::rotating_resistance),
            (Retaliator, floor::retaliator),
            (Summoner, floor::summoner),
            (Cursed, Self::noop),
            (WindupStrike, raid::windup_strike),
            (FlatDamageBoost, raid::flat_damage_boost),
            (Retribution, raid::retribution),
            (AuraDamage, raid::aura_damage),
            (ExtraRegen, Self::noop),
            (ArmorPhase, raid::armor_phase),
            (BossFlees, raid::boss_flees),
            (RegenBurst, Self::noop),
            (NoEscape, raid::no_escape),
            (Lockout, Self::noop),
            (EnrageTimer, raid::enrage_timer),
        ];
        for (kind, rule) in entries {
            catalog.register(kind, rule);
        }
        catalog
    }

    /// Registers `rule` for `kind`, returning the rule it replaced.
    pub fn register(&mut self, kind: MechanicKind, rule: MechanicRule) -> Option<MechanicRule> {
        self.rules.insert(kind, rule)
    }

    pub fn contains(&self, kind: &MechanicKind) -> bool {
        self.rules.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule for `kind`; unregistered and unknown identifiers behave like `cursed`.
    pub fn rule(&self, kind: &MechanicKind) -> MechanicRule {
        self.rules.get(kind).copied().unwrap_or(Self::noop)
    }

    /// Pass-through: no damage change, no flags, no message.
    pub fn noop(_: &Exchange<'_>, _: &mut CombatModifiers) {}
}

impl std::fmt::Debug for MechanicCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<&str> = self.rules.keys().map(MechanicKind::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("MechanicCatalog").field("rules", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_covers_every_known_kind() {
        let catalog = MechanicCatalog::standard();
        assert_eq!(catalog.len(), 23);
        assert!(catalog.contains(&MechanicKind::EnrageTimer));
        assert!(!catalog.contains(&MechanicKind::Unknown("moonwalk".into())));
    }
}
