//! Primer sequences used as 5' adapters.

use serde::Deserialize;

use std::fmt;
use std::str::FromStr;

use crate::config::Config;
use crate::errors::*;
use crate::pairing::Role;

/// Built-in primer pairs for common amplicon assays.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, clap::ValueEnum)]
pub enum Preset {
    /// Archaeal/bacterial ammonia monooxygenase
    #[serde(rename = "amoA")]
    #[value(name = "amoA")]
    AmoA,
    /// Nitrite oxidoreductase beta subunit
    #[serde(rename = "nxrB")]
    #[value(name = "nxrB")]
    NxrB,
    /// 16S rRNA V4-V5, 2016+ version
    #[serde(rename = "16S_515F_926R")]
    #[value(name = "16S_515F_926R")]
    Rrna16S,
}

impl Preset {
    pub fn all() -> [Preset; 3] {
        [Preset::AmoA, Preset::NxrB, Preset::Rrna16S]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::AmoA => "amoA",
            Preset::NxrB => "nxrB",
            Preset::Rrna16S => "16S_515F_926R",
        }
    }

    pub fn primers(&self) -> PrimerSet {
        let (forward, reverse) = match self {
            Preset::AmoA => ("GGGGTTTCTACTGGTGGT", "CCCCTCKGSAAAGCCTTCTTC"),
            Preset::NxrB => ("TACATGTGGTGGAACA", "CGGTTCTGGTCRATCA"),
            Preset::Rrna16S => ("GTGYCAGCMGCCGCGGTAA", "CCGYCAATTYMTTTRAGTTT"),
        };
        PrimerSet::new(forward, reverse)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Preset::all()
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| Error::UnknownPreset { name: s.to_owned() })
    }
}

/// Forward and reverse primer sequences (IUPAC codes, not validated).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimerSet {
    pub forward: String,
    pub reverse: String,
}

impl PrimerSet {
    pub fn new(forward: impl Into<String>, reverse: impl Into<String>) -> Self {
        Self {
            forward: forward.into(),
            reverse: reverse.into(),
        }
    }

    /// Pick the primer set for a run.
    ///
    /// A preset always wins, even if custom primers are also given. Otherwise both custom
    /// primers must be present and non-blank.
    pub fn resolve(config: &Config) -> Result<Self> {
        if let Some(preset) = config.primer_set {
            return Ok(preset.primers());
        }

        match (non_blank(&config.fwd), non_blank(&config.rev)) {
            (Some(fwd), Some(rev)) => Ok(PrimerSet::new(fwd, rev)),
            _ => Err(Error::NoPrimerSource),
        }
    }

    pub fn for_role(&self, role: Role) -> &str {
        match role {
            Role::Forward => &self.forward,
            Role::Reverse => &self.reverse,
        }
    }
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(primer_set: Option<Preset>, fwd: Option<&str>, rev: Option<&str>) -> Config {
        Config {
            primer_set,
            fwd: fwd.map(str::to_owned),
            rev: rev.map(str::to_owned),
            ..Config::default()
        }
    }

    #[test]
    fn preset_table() {
        assert_eq!(
            Preset::AmoA.primers(),
            PrimerSet::new("GGGGTTTCTACTGGTGGT", "CCCCTCKGSAAAGCCTTCTTC")
        );
        assert_eq!(
            Preset::NxrB.primers(),
            PrimerSet::new("TACATGTGGTGGAACA", "CGGTTCTGGTCRATCA")
        );
        assert_eq!(
            Preset::Rrna16S.primers(),
            PrimerSet::new("GTGYCAGCMGCCGCGGTAA", "CCGYCAATTYMTTTRAGTTT")
        );
    }

    #[test]
    fn preset_overrides_custom_primers() {
        for preset in Preset::all() {
            let c = config(Some(preset), Some("AAAA"), Some("TTTT"));
            assert_eq!(PrimerSet::resolve(&c).unwrap(), preset.primers());
        }
    }

    #[test]
    fn custom_primers_pass_through() {
        let c = config(None, Some("ACGTN"), Some("RYKMSW"));
        assert_eq!(
            PrimerSet::resolve(&c).unwrap(),
            PrimerSet::new("ACGTN", "RYKMSW")
        );
    }

    #[test]
    fn missing_primer_is_config_error() {
        for (fwd, rev) in [
            (None, None),
            (Some("ACGT"), None),
            (None, Some("ACGT")),
            (Some(""), Some("ACGT")),
            (Some("ACGT"), Some("  ")),
        ] {
            let err = PrimerSet::resolve(&config(None, fwd, rev)).unwrap_err();
            assert!(matches!(err, Error::NoPrimerSource));
        }
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in Preset::all() {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert!(matches!(
            "16S".parse::<Preset>(),
            Err(Error::UnknownPreset { .. })
        ));
    }

    #[test]
    fn primer_for_role() {
        let p = Preset::NxrB.primers();
        assert_eq!(p.for_role(Role::Forward), "TACATGTGGTGGAACA");
        assert_eq!(p.for_role(Role::Reverse), "CGGTTCTGGTCRATCA");
    }
}
