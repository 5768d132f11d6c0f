use serde::Deserialize;

use crate::error::ConfigError;

/// Bytes handed to the disassembler per guest instruction boundary.
pub const DISAS_MAX_BYTES: usize = 4096;

/// Dump settings that depend on the guest/host pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// `insn_start` carries the guest PC as two 32-bit words (lo, hi),
    /// as on 32-bit hosts. Otherwise only the first word is the PC and
    /// further words are target-specific extras.
    pub split_pc: bool,
    /// Upper bound on the bytes the disassembler may read.
    pub disas_max_bytes: usize,
    /// Guest instructions to disassemble at each boundary.
    pub disas_insn_count: usize,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            split_pc: false,
            disas_max_bytes: DISAS_MAX_BYTES,
            disas_insn_count: 1,
        }
    }
}

impl DumpConfig {
    /// Parse from TOML; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: DumpConfig = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.disas_insn_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "disas_insn_count",
                reason: "must be at least 1".into(),
            });
        }
        if self.disas_max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "disas_max_bytes",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
