//! Configuration validation: a two-pass parse-then-validate split, mirroring
//! `load_from_path` + `validate_config` elsewhere in this codebase — parse
//! first, validate as a separate pass, before any socket is touched.

use crate::config::types::Config;
use crate::error::ConfigError;

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.target.bits > 32 {
        return Err(ConfigError::InvalidCidrBits(cfg.target.bits));
    }

    if !cfg.pacing.flood && cfg.pacing.threshold <= 0 {
        return Err(ConfigError::InvalidThreshold(cfg.pacing.threshold));
    }

    if !cfg.gre.encapsulated {
        let opts = &cfg.gre.options;
        if opts.checksum {
            return Err(ConfigError::GreOptionWithoutGre("--gre-sum"));
        }
        if opts.key.is_some() {
            return Err(ConfigError::GreOptionWithoutGre("--gre-key"));
        }
        if opts.sequence.is_some() {
            return Err(ConfigError::GreOptionWithoutGre("--gre-seq"));
        }
    }

    if cfg.ip.options.len % 4 != 0 || cfg.ip.options.len > 40 {
        return Err(ConfigError::InvalidField {
            field: "ip.options",
            reason: format!(
                "length must be a multiple of 4 and at most 40, got {}",
                cfg.ip.options.len
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::default_config;

    #[test]
    fn rejects_cidr_bits_out_of_range() {
        let mut cfg = default_config();
        cfg.target.bits = 33;
        assert!(matches!(
            validate(&cfg),
            Err(ConfigError::InvalidCidrBits(33))
        ));
    }

    #[test]
    fn rejects_zero_threshold_without_flood() {
        let mut cfg = default_config();
        cfg.pacing.threshold = 0;
        cfg.pacing.flood = false;
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn flood_tolerates_zero_threshold() {
        let mut cfg = default_config();
        cfg.pacing.threshold = 0;
        cfg.pacing.flood = true;
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn gre_suboptions_require_gre() {
        let mut cfg = default_config();
        cfg.gre.encapsulated = false;
        cfg.gre.options.checksum = true;
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn well_formed_config_validates() {
        assert!(validate(&default_config()).is_ok());
    }
}
