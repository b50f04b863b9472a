//! Knobs for the channel recolorer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StatisticsRole;

/// How the per-channel scale factor is derived from the two deviations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleMode {
    /// `source.stdev / target.stdev`: the result adopts the source's spread.
    #[default]
    Reinhard,
    /// `target.stdev / source.stdev`. Matches the means but not the deviations.
    TargetOverSource,
}

impl ScaleMode {
    /// `(numerator, denominator)` for one channel.
    pub(crate) fn operands(self, source_stdev: f64, target_stdev: f64) -> (f64, f64) {
        match self {
            Self::Reinhard => (source_stdev, target_stdev),
            Self::TargetOverSource => (target_stdev, source_stdev),
        }
    }

    /// Which record supplies the divisor of the scale factor.
    pub fn divisor_role(self) -> StatisticsRole {
        match self {
            Self::Reinhard => StatisticsRole::Target,
            Self::TargetOverSource => StatisticsRole::Source,
        }
    }

    /// Which record supplies the numerator of the scale factor.
    pub fn numerator_role(self) -> StatisticsRole {
        match self {
            Self::Reinhard => StatisticsRole::Source,
            Self::TargetOverSource => StatisticsRole::Target,
        }
    }
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reinhard => write!(f, "reinhard"),
            Self::TargetOverSource => write!(f, "target-over-source"),
        }
    }
}

impl FromStr for ScaleMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reinhard" => Ok(Self::Reinhard),
            "target-over-source" | "legacy" => Ok(Self::TargetOverSource),
            other => Err(format!("unknown scale mode: {other}")),
        }
    }
}

/// What to do when the divisor of a scale factor is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroDeviation {
    /// Fail the transfer with `TransferError::DegenerateStatistics`.
    #[default]
    Reject,
    /// Use a scale of 1.0 for that channel (recenter only) and log a warning.
    Unscaled,
}

impl fmt::Display for ZeroDeviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Unscaled => write!(f, "unscaled"),
        }
    }
}

impl FromStr for ZeroDeviation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "unscaled" => Ok(Self::Unscaled),
            other => Err(format!("unknown zero-deviation policy: {other}")),
        }
    }
}

/// Options for a single transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOptions {
    pub scale_mode: ScaleMode,
    pub zero_deviation: ZeroDeviation,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_reinhard_and_reject() {
        let opts = TransferOptions::default();
        assert_eq!(opts.scale_mode, ScaleMode::Reinhard);
        assert_eq!(opts.zero_deviation, ZeroDeviation::Reject);
    }

    #[test]
    fn test_parse_round_trips_display() {
        for mode in [ScaleMode::Reinhard, ScaleMode::TargetOverSource] {
            assert_eq!(mode.to_string().parse::<ScaleMode>(), Ok(mode));
        }
        for policy in [ZeroDeviation::Reject, ZeroDeviation::Unscaled] {
            assert_eq!(policy.to_string().parse::<ZeroDeviation>(), Ok(policy));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" Unscaled ".parse::<ZeroDeviation>(), Ok(ZeroDeviation::Unscaled));
        assert_eq!("LEGACY".parse::<ScaleMode>(), Ok(ScaleMode::TargetOverSource));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("sideways".parse::<ScaleMode>().is_err());
        assert!("ignore".parse::<ZeroDeviation>().is_err());
    }

    #[test]
    fn test_operands_order() {
        assert_eq!(ScaleMode::Reinhard.operands(2.0, 4.0), (2.0, 4.0));
        assert_eq!(ScaleMode::TargetOverSource.operands(2.0, 4.0), (4.0, 2.0));
    }

    #[test]
    fn test_roles_follow_operands() {
        for mode in [ScaleMode::Reinhard, ScaleMode::TargetOverSource] {
            assert_ne!(mode.numerator_role(), mode.divisor_role());
        }
        assert_eq!(ScaleMode::Reinhard.numerator_role(), StatisticsRole::Source);
    }

    #[test]
    fn test_options_serialize_kebab_case() {
        let json = serde_json::to_string(&TransferOptions {
            scale_mode: ScaleMode::TargetOverSource,
            zero_deviation: ZeroDeviation::Unscaled,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"scale_mode":"target-over-source","zero_deviation":"unscaled"}"#
        );
    }
}
