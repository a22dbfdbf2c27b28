//! Narrative events produced by commands.
//!
//! Events are returned to the caller alongside the command result; delivering
//! them to players is the broadcast subsystem's job.

use crate::state::{BossId, MinionId, PlayerId, RoomId, Timestamp};

/// Truncates `text` to at most `limit` characters.
pub fn cap_message(text: impl Into<String>, limit: usize) -> String {
    let text = text.into();
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text,
    }
}

/// What happened, with the data a consumer needs without parsing `message`.
#[derive(Clone, Debug, PartialEq, Eq, strum::AsRefStr, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum BossEventKind {
    Activated { hp: u32, active_players: u32 },
    PhaseChanged { from: u32, to: u32 },
    Defeated,
    Split { child: BossId },
    Summoned { minion: MinionId },
    Fled { from: RoomId, to: RoomId },
    LockedOut { player: PlayerId, until: Timestamp },
    RegenBurst { healed: u32 },
}

/// One broadcastable event. `message` is already capped.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BossEvent {
    pub boss: BossId,
    pub kind: BossEventKind,
    pub message: String,
}

impl BossEvent {
    pub fn new(boss: BossId, kind: BossEventKind, message: impl Into<String>, limit: usize) -> Self {
        Self {
            boss,
            kind,
            message: cap_message(message, limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cap_counts_characters_not_bytes() {
        let text = "é".repeat(200);
        let capped = cap_message(text, 150);
        assert_eq!(capped.chars().count(), 150);
    }

    #[test]
    fn short_messages_are_untouched() {
        assert_eq!(cap_message("The hunt begins.", 150), "The hunt begins.");
    }

    #[test]
    fn kind_names_are_snake_case() {
        assert_eq!(
            BossEventKind::PhaseChanged { from: 1, to: 2 }.as_ref(),
            "phase_changed"
        );
        assert_eq!(BossEventKind::Defeated.to_string(), "defeated");
    }
}
