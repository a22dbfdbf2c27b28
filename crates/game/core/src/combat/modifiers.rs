use crate::events::cap_message;

/// Dispatcher output for one combat round.
///
/// `damage` starts at the base damage and is rewritten by each mechanic in
/// order; flags are unions across all applied mechanics.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatModifiers {
    /// Damage to apply to the boss.
    pub damage: u32,
    /// Additional damage dealt back to the attacking player.
    pub extra_damage_to_player: u32,
    pub boss_immune: bool,
    pub flee_blocked: bool,
    /// A relocation threshold was crossed; the caller should issue `Relocate`.
    pub boss_flees: bool,
    pub messages: Vec<String>,
}

impl CombatModifiers {
    /// Untouched exchange: the boss takes `damage`, nothing else happens.
    pub fn passthrough(damage: u32) -> Self {
        Self {
            damage,
            ..Self::default()
        }
    }

    pub fn hurt_player(&mut self, amount: u32) {
        self.extra_damage_to_player = self.extra_damage_to_player.saturating_add(amount);
    }

    /// Boss takes nothing this round.
    pub fn make_immune(&mut self) {
        self.boss_immune = true;
        self.damage = 0;
    }

    /// Replaces `damage` with a reduced value, keeping at least 1 for a positive hit.
    pub fn reduce_to(&mut self, reduced: u32) {
        self.damage = if self.damage == 0 { 0 } else { reduced.max(1) };
    }

    pub fn say(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub(crate) fn cap_messages(&mut self, limit: usize) {
        for message in &mut self.messages {
            if message.chars().count() > limit {
                *message = cap_message(std::mem::take(message), limit);
            }
        }
    }
}
