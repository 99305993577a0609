//! Parsing command-line arguments.

use crate::settings::Settings;
use clap::{
    crate_description, crate_name, crate_version, error::{ErrorKind, Result as ClapResult}, value_parser, Arg, ArgAction,
    ArgMatches, Command,
};
use log::info;
use std::{env, path::PathBuf};
use torus_life_lib::{Backend, World};

fn positive(s: &str) -> Result<isize, String> {
    match s.parse::<isize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(String::from("must be a positive integer")),
    }
}

/// A struct to store the parse results.
pub(crate) struct Args {
    pub(crate) world: World,
    pub(crate) settings: Settings,
    /// Runs this many generations without the menus.
    pub(crate) generations: Option<u64>,
}

fn command() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .long_about(
            "Conway's Game of Life on a toroidal grid\n\
             \n\
             Creates an empty world of the given size, or loads one from a \
             world file, then lets you add patterns and watch it evolve.\n\
             \n\
             The world is displayed in Plaintext format:\n\
             * Dead cells are represented by `.`;\n\
             * Living cells are represented by `o`.\n",
        )
        .arg(
            Arg::new("HEIGHT")
                .help("Height of the world")
                .index(1)
                .value_parser(positive)
                .required_unless_present("LOAD"),
        )
        .arg(
            Arg::new("WIDTH")
                .help("Width of the world")
                .index(2)
                .value_parser(positive)
                .required_unless_present("LOAD"),
        )
        .arg(
            Arg::new("LOAD")
                .help("Loads the world from a file or a named save")
                .long_help(
                    "Loads the world from a file or a named save\n\
                     If the file does not exist, it is looked up as `<NAME>.txt` \
                     in the save directory.\n",
                )
                .short('l')
                .long("load")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .conflicts_with_all(["HEIGHT", "WIDTH"]),
        )
        .arg(
            Arg::new("CONFIG")
                .help("Reads settings from a TOML, JSON or YAML file")
                .long_help(
                    "Reads settings from a TOML, JSON or YAML file\n\
                     The format is chosen by the extension. Other flags override \
                     the values in the file.\n",
                )
                .short('c')
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("BACKEND")
                .help("How to compute generations")
                .long_help(
                    "How to compute generations\n\
                     \"scalar\" updates one cell at a time.\n\
                     \"vectorized\" updates 64 cells per machine word.\n\
                     \"parallel\" spreads the rows over a thread pool.\n",
                )
                .short('b')
                .long("backend")
                .value_parser(["scalar", "vectorized", "parallel", "s", "v", "p"]),
        )
        .arg(
            Arg::new("THREADS")
                .help("Number of threads of the parallel backend")
                .short('j')
                .long("threads")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("FALLBACK")
                .help("Uses the scalar backend if the chosen one is unavailable")
                .long("fallback")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ATTEMPTS")
                .help("Maximal number of tries when inserting a random pattern")
                .long("attempts")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("DELAY")
                .help("Delay between two generations when playing, in milliseconds")
                .short('d')
                .long("delay")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("NOPRINT")
                .help("Does not print the world after every generation")
                .long("no-print")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("SAVEDIR")
                .help("Directory of named saves")
                .long("save-dir")
                .value_name("DIR")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("GENERATIONS")
                .help("Runs the given number of generations and exits")
                .long_help(
                    "Runs the given number of generations and exits\n\
                     The run stops early when the world becomes stable. \
                     The final world is printed, without entering the menus.\n",
                )
                .short('g')
                .long("generations")
                .value_parser(value_parser!(u64)),
        )
}

impl Args {
    /// Parses the command-line arguments.
    pub(crate) fn parse() -> ClapResult<Self> {
        let mut cmd = command();
        let matches = cmd.try_get_matches_from_mut(env::args_os())?;
        Args::from_matches(&matches).map_err(|e| cmd.error(ErrorKind::InvalidValue, e))
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, String> {
        let mut settings = match matches.get_one::<PathBuf>("CONFIG") {
            Some(path) => Settings::load(path).map_err(|e| e.to_string())?,
            None => Settings::default(),
        };

        if let Some(backend) = matches.get_one::<String>("BACKEND") {
            settings.backend = backend.parse::<Backend>()?;
        }
        if let Some(&threads) = matches.get_one::<usize>("THREADS") {
            settings.threads = Some(threads);
        }
        if matches.get_flag("FALLBACK") {
            settings.fallback_to_scalar = true;
        }
        if let Some(&attempts) = matches.get_one::<u32>("ATTEMPTS") {
            settings.max_randomize_attempts = attempts;
        }
        if let Some(&delay) = matches.get_one::<u64>("DELAY") {
            settings.delay_ms = delay;
        }
        if matches.get_flag("NOPRINT") {
            settings.print = false;
        }
        if let Some(dir) = matches.get_one::<PathBuf>("SAVEDIR") {
            settings.save_dir = dir.clone();
        }

        let world = match matches.get_one::<PathBuf>("LOAD") {
            Some(path) => {
                let path = settings.resolve(path);
                info!("Loading the world from {:?}.", path);
                settings.config(1, 1).load_world(path)
            }
            None => {
                let height = matches.get_one::<isize>("HEIGHT").copied().unwrap_or(1);
                let width = matches.get_one::<isize>("WIDTH").copied().unwrap_or(1);
                settings.config(height, width).world()
            }
        }
        .map_err(|e| e.to_string())?;

        Ok(Args {
            world,
            settings,
            generations: matches.get_one::<u64>("GENERATIONS").copied(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, fs};

    fn parse_from(args: &[&str]) -> Result<Args, Box<dyn Error>> {
        let matches = command().try_get_matches_from(args)?;
        Ok(Args::from_matches(&matches)?)
    }

    #[test]
    fn command_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn size_and_flags() -> Result<(), Box<dyn Error>> {
        let args = parse_from(&[
            "torus-life", "12", "30", "-b", "v", "--delay", "10", "--no-print", "-g", "5",
        ])?;
        assert_eq!((args.world.height(), args.world.width()), (12, 30));
        assert_eq!(args.world.backend_name(), "vectorized");
        assert_eq!(args.settings.delay_ms, 10);
        assert!(!args.settings.print);
        assert_eq!(args.generations, Some(5));
        Ok(())
    }

    #[test]
    fn invalid_arguments() {
        assert!(parse_from(&["torus-life", "0", "4"]).is_err());
        assert!(parse_from(&["torus-life", "4", "-4"]).is_err());
        assert!(parse_from(&["torus-life", "4"]).is_err());
        assert!(parse_from(&["torus-life", "4", "4", "--backend", "gpu"]).is_err());
        assert!(parse_from(&["torus-life", "4", "4", "-b", "p", "-j", "0"]).is_err());
    }

    #[test]
    fn fallback() -> Result<(), Box<dyn Error>> {
        let args = parse_from(&["torus-life", "4", "4", "-b", "p", "-j", "0", "--fallback"])?;
        assert_eq!(args.world.backend_name(), "scalar");
        Ok(())
    }

    #[test]
    fn load_a_named_save() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        fs::write(
            dir.path().join("toad.txt"),
            "height = 6\nwidth = 5\nstart = (1,1), (2,3),\n",
        )?;
        let save_dir = dir.path().to_str().ok_or("non UTF-8 path")?;
        let args = parse_from(&["torus-life", "--save-dir", save_dir, "-l", "toad"])?;
        assert_eq!((args.world.height(), args.world.width()), (6, 5));
        assert_eq!(args.world.population(), 2);
        Ok(())
    }

    #[test]
    fn settings_file() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("settings.toml");
        fs::write(&path, "delay_ms = 7\nbackend = \"parallel\"\nthreads = 2\n")?;
        let path = path.to_str().ok_or("non UTF-8 path")?;

        let args = parse_from(&["torus-life", "3", "3", "-c", path, "-d", "9"])?;
        assert_eq!(args.settings.delay_ms, 9);
        assert_eq!(args.world.backend_name(), "parallel");
        Ok(())
    }
}
