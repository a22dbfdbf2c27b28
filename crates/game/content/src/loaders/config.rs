//! Engine configuration loader.

use std::path::Path;

use anyhow::{Context, anyhow, ensure};
use boss_core::EngineConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`EngineConfig`] from TOML files.
///
/// Missing keys fall back to the engine defaults. Per-floor regen rates live
/// in a `[floor_regen_rate_pct]` table keyed by floor number:
///
/// ```toml
/// raid_hp_cap = 4500
///
/// [floor_regen_rate_pct]
/// 1 = 3
/// 2 = 4
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    const FLOOR_RATES_KEY: &'static str = "floor_regen_rate_pct";

    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parses TOML text into a validated config.
    pub fn parse(content: &str) -> LoadResult<EngineConfig> {
        let mut table: toml::Table =
            toml::from_str(content).context("Failed to parse config TOML")?;

        // TOML keys are always strings; floors are read separately.
        let floor_rates = table.remove(Self::FLOOR_RATES_KEY);
        let mut config: EngineConfig = toml::Value::Table(table)
            .try_into()
            .context("Config TOML does not match EngineConfig")?;

        if let Some(value) = floor_rates {
            let rates = value
                .as_table()
                .ok_or_else(|| anyhow!("`{}` must be a table", Self::FLOOR_RATES_KEY))?;
            for (floor, rate) in rates {
                let floor: u32 = floor
                    .parse()
                    .with_context(|| format!("Floor key `{floor}` is not a number"))?;
                let rate = rate
                    .as_integer()
                    .and_then(|rate| u32::try_from(rate).ok())
                    .ok_or_else(|| anyhow!("Regen rate for floor {floor} must be a whole percent"))?;
                config = config.with_floor_regen_rate(floor, rate);
            }
        }

        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &EngineConfig) -> LoadResult<()> {
        ensure!(
            config.regen_interval_secs > 0,
            "regen_interval_secs must be positive"
        );
        ensure!(
            config.message_char_limit > 0,
            "message_char_limit must be positive"
        );
        ensure!(
            config.raid_hp_per_player > 0 && config.raid_hp_cap >= config.raid_hp_per_player,
            "raid_hp_cap ({}) must be at least raid_hp_per_player ({})",
            config.raid_hp_cap,
            config.raid_hp_per_player
        );
        ensure!(
            config
                .phase_thresholds_pct
                .iter()
                .all(|pct| (1..100).contains(pct)),
            "phase thresholds must lie in 1..100"
        );
        ensure!(
            config.phase_thresholds_pct.windows(2).all(|w| w[0] > w[1]),
            "phase thresholds must be strictly decreasing: {:?}",
            config.phase_thresholds_pct
        );
        Ok(())
    }
}
