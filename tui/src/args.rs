//! Parsing command-line arguments.

use crate::scenario::{Scenario, Seed};
use clap::{
    command, error::ErrorKind, parser::ValueSource, value_parser, Arg, ArgAction, ArgMatches,
    Command, Error,
};
use rand::{rngs::StdRng, SeedableRng};
use rlifegame_lib::{patterns::random_soup, EngineKind, Life, Rule};
use std::{ffi::OsString, path::PathBuf};
#[cfg(feature = "tui")]
use std::time::Duration;

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) life: Box<dyn Life + Send>,
    /// Number of generations to run. `0` means no limit in the TUI.
    pub(crate) generations: u64,
    #[cfg(feature = "tui")]
    pub(crate) delay: Duration,
    #[cfg(feature = "tui")]
    pub(crate) no_tui: bool,
}

fn command() -> Command {
    let command = command!()
        .long_about(
            "Conway's Game of Life in the terminal\n\
             \n\
             The grid is bounded: cells beyond the edges are always dead.\n\
             Several engines are available; they all compute the same generations.\n\
             * naive: rescans every cell;\n\
             * scholes: shifts and sums whole grids;\n\
             * abrash: packed cells, only revisits changed regions;\n\
             * stafford: packed triplets and a lookup table, only revisits changed regions.\n\
             \n\
             The final generation is printed in Plaintext format:\n\
             * Dead cells are represented by `.`;\n\
             * Living cells are represented by `o`.\n",
        )
        .arg(
            Arg::new("X")
                .help("Width of the grid")
                .index(1)
                .default_value("36")
                .value_parser(value_parser!(i32).range(1..)),
        )
        .arg(
            Arg::new("Y")
                .help("Height of the grid")
                .index(2)
                .default_value("36")
                .value_parser(value_parser!(i32).range(1..)),
        )
        .arg(
            Arg::new("ENGINE")
                .help("Simulation engine")
                .short('e')
                .long("engine")
                .default_value("stafford")
                .value_parser(["naive", "scholes", "abrash", "stafford"]),
        )
        .arg(
            Arg::new("RULE")
                .help("Rule of the cellular automaton")
                .long_help(
                    "Rule of the cellular automaton\n\
                     Supports Life-like rules without B0, e.g. B36/S23 or 23/36.\n",
                )
                .short('r')
                .long("rule")
                .default_value("B3/S23")
                .value_parser(|s: &str| {
                    s.parse::<Rule>()
                        .map(|_| s.to_string())
                        .map_err(|e| e.to_string())
                }),
        )
        .arg(
            Arg::new("PATTERN")
                .help("Pattern to place, as NAME@X,Y")
                .long_help(
                    "Pattern to place, as NAME@X,Y\n\
                     The anchor (X, Y) is the bottom-left corner of the pattern.\n\
                     Known patterns: blinker, acorn, r, block, glider.\n\
                     May be given more than once.\n",
                )
                .short('p')
                .long("pattern")
                .action(ArgAction::Append)
                .default_values(["blinker@2,2", "acorn@15,15"])
                .value_parser(|s: &str| s.parse::<Seed>()),
        )
        .arg(
            Arg::new("RANDOM")
                .help("Fills the grid with a random soup of the given density")
                .long("random")
                .value_parser(|s: &str| match s.parse::<f64>() {
                    Ok(d) if (0.0..=1.0).contains(&d) => Ok(d),
                    Ok(_) => Err(String::from("density must be between 0 and 1")),
                    Err(e) => Err(e.to_string()),
                }),
        )
        .arg(
            Arg::new("SEED")
                .help("Seed of the random soup")
                .long("seed")
                .requires("RANDOM")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Number of generations to run")
                .long_help(
                    "Number of generations to run\n\
                     If this value is set to 0, the TUI runs until it is closed.\n",
                )
                .short('g')
                .long("generations")
                .default_value("0")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("DELAY")
                .help("Milliseconds between generations in the TUI")
                .short('d')
                .long("delay")
                .default_value("1000")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Reads a scenario from a TOML, YAML or JSON file")
                .long_help(
                    "Reads a scenario from a TOML, YAML or JSON file\n\
                     Options given on the command line override the ones in the file.\n",
                )
                .short('c')
                .long("config")
                .value_parser(value_parser!(PathBuf)),
        );

    #[cfg(feature = "tui")]
    let command = command.arg(
        Arg::new("NOTUI")
            .help("Runs the generations and prints the result, without entering the TUI")
            .short('n')
            .long("no-tui")
            .action(ArgAction::SetTrue),
    );

    command
}

/// Whether an argument was given on the command line rather than defaulted.
fn explicit(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> Result<Self, Error> {
        Args::parse_from(std::env::args_os())
    }

    /// Parses the given arguments. The first one is the binary name.
    pub(crate) fn parse_from<I, T>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;

        let file = matches
            .get_one::<PathBuf>("CONFIG")
            .map(|path| Scenario::load(path))
            .transpose()?;
        let from_file = file.is_some();
        let scenario = file.unwrap_or_default();

        // Without a scenario file, defaults come from the command line.
        let take = |id: &str| !from_file || explicit(&matches, id);

        let mut config = scenario.config;
        if take("X") {
            config.width = *matches.get_one::<i32>("X").unwrap_or(&config.width);
        }
        if take("Y") {
            config.height = *matches.get_one::<i32>("Y").unwrap_or(&config.height);
        }
        if take("ENGINE") {
            if let Some(engine) = matches.get_one::<String>("ENGINE") {
                config.engine = engine
                    .parse::<EngineKind>()
                    .map_err(|e| Error::raw(ErrorKind::InvalidValue, format!("{}\n", e)))?;
            }
        }
        if take("RULE") {
            if let Some(rule_string) = matches.get_one::<String>("RULE") {
                config.rule_string = rule_string.clone();
            }
        }

        let seeds: Vec<Seed> = if take("PATTERN") {
            matches
                .get_many::<Seed>("PATTERN")
                .map(|seeds| seeds.copied().collect())
                .unwrap_or_default()
        } else {
            scenario.seeds
        };
        let random = matches
            .get_one::<f64>("RANDOM")
            .copied()
            .or(scenario.random);
        let seed = matches.get_one::<u64>("SEED").copied().or(scenario.seed);
        let generations = match scenario.generations {
            Some(generations) if !explicit(&matches, "GENERATIONS") => generations,
            _ => *matches.get_one::<u64>("GENERATIONS").unwrap_or(&0),
        };
        #[cfg(feature = "tui")]
        let delay = match scenario.delay {
            Some(delay) if !explicit(&matches, "DELAY") => delay,
            _ => *matches.get_one::<u64>("DELAY").unwrap_or(&1000),
        };

        let mut life = config
            .world()
            .map_err(|e| Error::raw(ErrorKind::InvalidValue, format!("{}\n", e)))?;
        for seed in &seeds {
            seed.place(life.as_mut());
        }
        if let Some(density) = random {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            random_soup(life.as_mut(), &mut rng, density);
        }

        Ok(Args {
            life,
            generations,
            #[cfg(feature = "tui")]
            delay: Duration::from_millis(delay),
            #[cfg(feature = "tui")]
            no_tui: matches.get_flag("NOTUI"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs};

    #[test]
    fn verify_command() {
        command().debug_assert();
    }

    #[test]
    fn defaults() -> Result<(), Error> {
        let args = Args::parse_from(["rlifegame"])?;
        assert_eq!(args.life.kind(), EngineKind::Stafford);
        assert_eq!((args.life.width(), args.life.height()), (36, 36));
        assert_eq!(args.life.population(), 3 + 7);
        assert_eq!(args.generations, 0);
        #[cfg(feature = "tui")]
        assert_eq!(args.delay, Duration::from_millis(1000));
        Ok(())
    }

    #[test]
    fn explicit_values() -> Result<(), Error> {
        let args = Args::parse_from([
            "rlifegame", "20", "10", "-e", "abrash", "-p", "block@0,9", "-p", "glider@5,5", "-g",
            "50",
        ])?;
        assert_eq!(args.life.kind(), EngineKind::Abrash);
        assert_eq!((args.life.width(), args.life.height()), (20, 10));
        assert_eq!(args.life.population(), 4 + 5);
        assert_eq!(args.generations, 50);
        Ok(())
    }

    #[test]
    fn invalid_values() {
        for args in [
            &["rlifegame", "0"][..],
            &["rlifegame", "-e", "hashlife"],
            &["rlifegame", "-r", "B0/S8"],
            &["rlifegame", "-p", "acorn"],
            &["rlifegame", "--random", "1.5"],
            &["rlifegame", "--seed", "3"],
        ] {
            assert!(Args::parse_from(args.iter().copied()).is_err(), "{:?}", args);
        }
    }

    #[test]
    fn seeded_soups_repeat() -> Result<(), Error> {
        let soup = || {
            Args::parse_from([
                "rlifegame", "-p", "block@0,1", "--random", "0.4", "--seed", "9",
            ])
        };
        assert_eq!(soup()?.life.snapshot(), soup()?.life.snapshot());
        Ok(())
    }

    #[test]
    fn command_line_overrides_file() -> Result<(), Box<dyn std::error::Error>> {
        let path = env::temp_dir().join(format!("rlifegame-args-{}.toml", std::process::id()));
        fs::write(
            &path,
            "seeds = [\"block@0,1\"]\n\
             generations = 7\n\
             \n\
             [config]\n\
             width = 12\n\
             height = 8\n\
             engine = \"naive\"\n",
        )?;
        let path_str = path.to_string_lossy().into_owned();

        let args = Args::parse_from(["rlifegame", "-c", path_str.as_str()])?;
        assert_eq!(args.life.kind(), EngineKind::Naive);
        assert_eq!((args.life.width(), args.life.height()), (12, 8));
        assert_eq!(args.life.live_cells(), vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
        assert_eq!(args.generations, 7);

        let args = Args::parse_from([
            "rlifegame",
            "-c",
            path_str.as_str(),
            "-e",
            "scholes",
            "-g",
            "3",
        ])?;
        assert_eq!(args.life.kind(), EngineKind::Scholes);
        assert_eq!((args.life.width(), args.life.height()), (12, 8));
        assert_eq!(args.generations, 3);

        fs::remove_file(&path)?;
        Ok(())
    }
}
