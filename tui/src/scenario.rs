//! Scenario files: a configuration plus the initial seeds, in TOML, YAML or JSON.

use clap::{error::ErrorKind, Error};
use log::debug;
use rlifegame_lib::{patterns::Pattern, Config, Coord, Error as LifeError, Life};
use serde::Deserialize;
use std::{fs, path::Path, str::FromStr};

/// A pattern and where to put it, written as `NAME@X,Y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub(crate) struct Seed {
    pub(crate) pattern: Pattern,
    pub(crate) anchor: Coord,
}

impl Seed {
    pub(crate) fn place<L: Life + ?Sized>(&self, life: &mut L) {
        self.pattern.place(life, self.anchor);
    }
}

impl FromStr for Seed {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, anchor) = s
            .split_once('@')
            .ok_or_else(|| format!("expected NAME@X,Y, found {:?}", s))?;
        let pattern = name.parse().map_err(|e: LifeError| e.to_string())?;
        let (x, y) = anchor
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y, found {:?}", anchor))?;
        let x = x.trim().parse::<i32>().map_err(|e| format!("invalid x: {}", e))?;
        let y = y.trim().parse::<i32>().map_err(|e| format!("invalid y: {}", e))?;
        Ok(Seed {
            pattern,
            anchor: (x, y),
        })
    }
}

impl TryFrom<String> for Seed {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Everything needed to start a run.
///
/// Fields missing from the file take their default values.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Scenario {
    pub(crate) config: Config,
    pub(crate) seeds: Vec<Seed>,
    /// Density of a random soup added after the seeds.
    pub(crate) random: Option<f64>,
    /// Seed of the random number generator.
    pub(crate) seed: Option<u64>,
    pub(crate) generations: Option<u64>,
    /// Milliseconds between generations.
    pub(crate) delay: Option<u64>,
}

impl Scenario {
    /// Reads a scenario file. The format is chosen by the extension.
    pub(crate) fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::raw(
                ErrorKind::Io,
                format!("cannot read {}: {}\n", path.display(), e),
            )
        })?;
        let invalid = |e: String| {
            Error::raw(
                ErrorKind::InvalidValue,
                format!("{}: {}\n", path.display(), e),
            )
        };
        let scenario = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&text).map_err(|e| invalid(e.to_string()))?,
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|e| invalid(e.to_string()))?
            }
            Some("json") => serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?,
            _ => {
                return Err(invalid(String::from(
                    "unknown format, expected .toml, .yaml, .yml or .json",
                )))
            }
        };
        debug!("loaded scenario from {}", path.display());
        Ok(scenario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlifegame_lib::{
        patterns::{ACORN, GLIDER},
        EngineKind,
    };

    #[test]
    fn seeds() {
        assert_eq!(
            "acorn@15,15".parse(),
            Ok(Seed {
                pattern: ACORN,
                anchor: (15, 15)
            })
        );
        assert_eq!(
            "Glider@-1, 4".parse::<Seed>().map(|seed| seed.anchor),
            Ok((-1, 4))
        );
        assert!("acorn".parse::<Seed>().is_err());
        assert!("acorn@1".parse::<Seed>().is_err());
        assert!("loafer@1,1".parse::<Seed>().is_err());
    }

    #[test]
    fn toml_scenario() -> Result<(), Box<dyn std::error::Error>> {
        let scenario: Scenario = toml::from_str(
            r#"
            seeds = ["glider@1,3"]
            generations = 100

            [config]
            width = 20
            engine = "abrash"
            "#,
        )?;
        assert_eq!(
            scenario.config,
            Config::new(20, 36).set_engine(EngineKind::Abrash)
        );
        assert_eq!(
            scenario.seeds,
            vec![Seed {
                pattern: GLIDER,
                anchor: (1, 3)
            }]
        );
        assert_eq!(scenario.generations, Some(100));
        assert_eq!(scenario.delay, None);
        Ok(())
    }

    #[test]
    fn yaml_and_json_scenarios() -> Result<(), Box<dyn std::error::Error>> {
        let yaml: Scenario = serde_yaml::from_str(
            "config:\n  rule_string: B36/S23\nseeds:\n  - r@5,5\nrandom: 0.25\nseed: 7\n",
        )?;
        let json: Scenario = serde_json::from_str(
            r#"{
                "config": { "rule_string": "B36/S23" },
                "seeds": ["r@5,5"],
                "random": 0.25,
                "seed": 7
            }"#,
        )?;
        assert_eq!(yaml, json);
        assert_eq!(yaml.config.rule()?.to_string(), "B36/S23");
        assert!(serde_json::from_str::<Scenario>(r#"{ "seeds": ["nothing@1,1"] }"#).is_err());
        Ok(())
    }
}
