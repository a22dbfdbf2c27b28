use std::fmt;
use std::str::FromStr;

/// Named combat rule attached to a boss.
///
/// Identifiers come from the generation subsystem as plain strings. Parsing
/// never fails: anything unrecognized lands in [`MechanicKind::Unknown`] and is
/// dispatched as a no-op.
#[derive(Clone, Debug, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "String", from = "String")
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MechanicKind {
    // Floor 1 table
    Armored,
    Enraged,
    Regenerator,
    Stalwart,
    // Floor 2 table
    Warded,
    Phasing,
    Draining,
    Splitting,
    // Floor 3 table
    RotatingResistance,
    Retaliator,
    Summoner,
    Cursed,
    // Raid: offensive
    WindupStrike,
    FlatDamageBoost,
    Retribution,
    AuraDamage,
    // Raid: defensive
    ExtraRegen,
    ArmorPhase,
    BossFlees,
    RegenBurst,
    // Raid: control
    NoEscape,
    Lockout,
    EnrageTimer,

    /// Identifier the catalog does not know. Kept verbatim for logging.
    #[strum(default)]
    Unknown(String),
}

impl MechanicKind {
    /// Parses an identifier, mapping anything unrecognized to `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match Self::from_str(raw.trim()) {
            Ok(kind) => kind,
            Err(_) => Self::Unknown(raw.to_string()),
        }
    }

    /// Canonical identifier (`"rotating_resistance"`), or the raw text for unknown ids.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Unknown(raw) => raw,
            known => known.as_ref(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for MechanicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for MechanicKind {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<MechanicKind> for String {
    fn from(kind: MechanicKind) -> Self {
        match kind {
            MechanicKind::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_snake_case_identifiers() {
        assert_eq!(MechanicKind::parse("armored"), MechanicKind::Armored);
        assert_eq!(
            MechanicKind::parse("rotating_resistance"),
            MechanicKind::RotatingResistance
        );
        assert_eq!(MechanicKind::parse("Boss_Flees"), MechanicKind::BossFlees);
    }

    #[test]
    fn unknown_identifiers_are_preserved() {
        let kind = MechanicKind::parse("moonwalk");
        assert!(!kind.is_known());
        assert_eq!(kind.as_str(), "moonwalk");
    }

    #[test]
    fn display_matches_wire_identifier() {
        assert_eq!(MechanicKind::WindupStrike.to_string(), "windup_strike");
        assert_eq!(String::from(MechanicKind::EnrageTimer), "enrage_timer");
    }

    #[test]
    fn owned_strings_convert_through_parse() {
        let kind: MechanicKind = String::from(" Lockout ").into();
        assert_eq!(kind, MechanicKind::Lockout);
        assert_eq!(MechanicKind::try_from("no_escape"), Ok(MechanicKind::NoEscape));
    }
}
