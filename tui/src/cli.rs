//! The menus.

use crate::{args::Args, settings::Settings};
use log::error;
use std::{
    fs,
    io::{self, Write},
};
use torus_life_lib::{Error, PatternKind, State, World, ALIVE, DEAD};

/// Which menu is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Menu {
    Main,
    Add,
    Display,
}

impl Menu {
    fn help(self) -> &'static str {
        match self {
            Menu::Main => {
                "Main menu\n\
                 (n)ext generation\n\
                 (p)lay until [q] is pressed\n\
                 (p)lay N generations, e.g. `p 10`\n\
                 (a)dd cells\n\
                 (d)isplay settings\n\
                 (q)uit"
            }
            Menu::Add => {
                "Add cells\n\
                 (g)lider ROW COL\n\
                 (t)oad ROW COL\n\
                 (b)eacon ROW COL\n\
                 (m)ethuselah ROW COL\n\
                 (c)ell ROW COL, or (c)ell INDEX\n\
                 (d)elete cell ROW COL, or (d)elete cell INDEX\n\
                 (r)andom pattern\n\
                 (q)uit to the main menu"
            }
            Menu::Display => {
                "Display settings\n\
                 (d)elay MILLISECONDS\n\
                 (p)rint the world after every generation: `p y`, `p n`, or `p` to toggle\n\
                 (q)uit to the main menu"
            }
        }
    }
}

/// A cell given either by its coordinates or by its flat index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target {
    Coord(isize, isize),
    Index(usize),
}

/// A parsed line of input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Next,
    AutoPlay,
    Play(u64),
    Enter(Menu),
    Insert(PatternKind, isize, isize),
    SetCell(State, Target),
    Random,
    Delay(u64),
    /// Turns printing on or off, or toggles it if `None`.
    Print(Option<bool>),
    /// Goes back to the main menu, or quits from the main menu.
    Quit,
}

/// Splits `3 4`, `3,4` and `(3, 4)` alike.
fn numbers(rest: &str) -> Vec<&str> {
    rest.split(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')'))
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_coord(rest: &str) -> Result<(isize, isize), String> {
    match numbers(rest)[..] {
        [row, col] => {
            let row = row.parse().map_err(|_| format!("invalid row `{}`", row))?;
            let col = col.parse().map_err(|_| format!("invalid column `{}`", col))?;
            Ok((row, col))
        }
        _ => Err(String::from("expected a row and a column")),
    }
}

fn parse_target(rest: &str) -> Result<Target, String> {
    match numbers(rest)[..] {
        [index] => index
            .parse()
            .map(Target::Index)
            .map_err(|_| format!("invalid index `{}`", index)),
        _ => parse_coord(rest).map(|(row, col)| Target::Coord(row, col)),
    }
}

impl Command {
    /// Parses a line of input in the given menu.
    pub(crate) fn parse(menu: Menu, line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (key, rest) = match line.find(|c: char| !c.is_ascii_alphabetic()) {
            Some(i) => line.split_at(i),
            None => (line, ""),
        };
        let key = key.to_ascii_lowercase();
        let first = key.chars().next();
        let command = match (menu, first) {
            (_, Some('q')) => Command::Quit,
            (Menu::Main, Some('n')) => Command::Next,
            (Menu::Main, Some('p')) if rest.trim().is_empty() => Command::AutoPlay,
            (Menu::Main, Some('p')) => rest
                .trim()
                .parse()
                .map(Command::Play)
                .map_err(|_| format!("invalid number of generations `{}`", rest.trim()))?,
            (Menu::Main, Some('a')) => Command::Enter(Menu::Add),
            (Menu::Main, Some('d')) => Command::Enter(Menu::Display),
            (Menu::Add, Some('c')) => Command::SetCell(ALIVE, parse_target(rest)?),
            (Menu::Add, Some('d')) => Command::SetCell(DEAD, parse_target(rest)?),
            (Menu::Add, Some('r')) => Command::Random,
            (Menu::Add, Some(c)) if "gtbm".contains(c) => {
                let kind = c.to_string().parse::<PatternKind>()?;
                let (row, col) = parse_coord(rest)?;
                Command::Insert(kind, row, col)
            }
            (Menu::Display, Some('d')) => rest
                .trim()
                .parse()
                .map(Command::Delay)
                .map_err(|_| format!("invalid delay `{}`", rest.trim()))?,
            (Menu::Display, Some('p')) => match rest.trim().to_ascii_lowercase().as_str() {
                "" => Command::Print(None),
                "y" | "yes" | "on" => Command::Print(Some(true)),
                "n" | "no" | "off" => Command::Print(Some(false)),
                other => return Err(format!("expected `y` or `n`, found `{}`", other)),
            },
            (_, None) => return Err(String::from("please enter a command")),
            _ => return Err(format!("unknown command `{}`", line)),
        };
        Ok(command)
    }
}

/// Reads a line from the standard input. Returns `None` at the end of input.
fn read_line(prompt: &str) -> io::Result<Option<String>> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn show(world: &World) -> io::Result<()> {
    #[cfg(feature = "tui")]
    {
        crate::tui::print_world(world, &mut io::stdout(), "")
    }
    #[cfg(not(feature = "tui"))]
    {
        println!(
            "Generation: {}  Population: {}",
            world.generation(),
            world.population()
        );
        println!("{}", world);
        Ok(())
    }
}

#[cfg(feature = "tui")]
fn auto_play(world: &mut World, settings: &Settings) -> io::Result<u64> {
    if !settings.print {
        println!("Playing. Press [q] to stop.");
    }
    crate::tui::auto_play(world, settings.delay(), settings.print)
}

/// Evolves the world on a background thread until a line is entered.
#[cfg(not(feature = "tui"))]
fn auto_play(world: &mut World, settings: &Settings) -> io::Result<u64> {
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        thread,
    };

    println!("Playing. Press [Enter] to stop.");
    let stop = AtomicBool::new(false);
    thread::scope(|s| {
        let player = s.spawn(|| {
            let mut played = 0;
            while !stop.load(Ordering::Relaxed) {
                world.evolve();
                played += 1;
                if settings.print {
                    println!("{}", world);
                }
                thread::sleep(settings.delay());
            }
            played
        });
        let waited = io::stdin().read_line(&mut String::new());
        stop.store(true, Ordering::Relaxed);
        let played = player
            .join()
            .unwrap_or_else(|e| std::panic::resume_unwind(e));
        waited.map(|_| played)
    })
}

/// Runs up to `generations` generations, printing every one if asked to.
fn play(world: &mut World, settings: &Settings, generations: u64) -> io::Result<()> {
    let mut result = Ok(());
    let report = world.run_with(generations, |world| {
        if settings.print && result.is_ok() {
            result = show(world);
            std::thread::sleep(settings.delay());
        }
    });
    result?;
    if !settings.print {
        show(world)?;
    }
    println!(
        "Played {} generations in {:.2?}.",
        report.generations, report.elapsed
    );
    if let Some(since) = report.stable_since {
        println!("The world is stable since generation {}.", since);
    }
    Ok(())
}

/// Asks for a name and saves the world as `<save_dir>/<name>.txt`.
///
/// An empty name quits without saving.
fn save_prompt(world: &World, settings: &Settings) -> io::Result<()> {
    loop {
        let name = match read_line("Save the world as (leave empty to quit without saving): ")? {
            Some(name) => name,
            None => return Ok(()),
        };
        let name = name.trim();
        if name.is_empty() {
            return Ok(());
        }
        fs::create_dir_all(&settings.save_dir)?;
        let path = settings.save_path(name);
        match world.save(&path) {
            Ok(()) => {
                println!("Saved to {}.", path.display());
                return Ok(());
            }
            Err(e @ Error::FileExists(_)) => println!("{} Please choose another name.", e),
            Err(e) => return Err(io::Error::new(io::ErrorKind::Other, e)),
        }
    }
}

/// The state of an interactive session.
struct Session {
    world: World,
    settings: Settings,
    menu: Menu,
}

impl Session {
    fn set_cell(&mut self, state: State, target: Target) -> Result<(), Error> {
        match target {
            Target::Coord(row, col) => self.world.set_cell(state, row, col),
            Target::Index(index) => self.world.set_cell_at(state, index),
        }
    }

    /// Executes a command. Returns `false` when the session is over.
    fn execute(&mut self, command: Command) -> io::Result<bool> {
        match command {
            Command::Quit if self.menu == Menu::Main => {
                save_prompt(&self.world, &self.settings)?;
                return Ok(false);
            }
            Command::Quit => self.menu = Menu::Main,
            Command::Enter(menu) => self.menu = menu,
            Command::Next => {
                self.world.evolve();
                show(&self.world)?;
            }
            Command::AutoPlay => {
                let played = auto_play(&mut self.world, &self.settings)?;
                show(&self.world)?;
                println!("Played {} generations.", played);
            }
            Command::Play(generations) => play(&mut self.world, &self.settings, generations)?,
            Command::Insert(kind, row, col) => {
                if self.world.insert(kind, row, col) {
                    show(&self.world)?;
                } else {
                    error!(
                        "A {} at {:?} does not fit in the world.",
                        kind,
                        (row, col)
                    );
                }
            }
            Command::SetCell(state, target) => match self.set_cell(state, target) {
                Ok(()) => show(&self.world)?,
                Err(e) => error!("{}", e),
            },
            Command::Random => match self.world.randomize() {
                Some(placement) => {
                    show(&self.world)?;
                    println!(
                        "Added a {} at {:?}.",
                        placement.kind,
                        (placement.row, placement.col)
                    );
                }
                None => error!("No random pattern changed the world."),
            },
            Command::Delay(delay_ms) => {
                self.settings.delay_ms = delay_ms;
                println!("Delay: {} ms", delay_ms);
            }
            Command::Print(print) => {
                self.settings.print = print.unwrap_or(!self.settings.print);
                println!("Print: {}", if self.settings.print { "on" } else { "off" });
            }
        }
        Ok(true)
    }
}

/// Runs the program with the parsed arguments.
pub(crate) fn run(args: Args) -> io::Result<()> {
    let Args {
        mut world,
        settings,
        generations,
    } = args;

    if let Some(generations) = generations {
        let report = world.run(generations);
        println!("{}", world);
        println!(
            "Generation: {}  Population: {}",
            world.generation(),
            world.population()
        );
        println!(
            "Played {} generations in {:.2?}.",
            report.generations, report.elapsed
        );
        if let Some(since) = report.stable_since {
            println!("The world is stable since generation {}.", since);
        }
        return Ok(());
    }

    let mut session = Session {
        world,
        settings,
        menu: Menu::Main,
    };
    show(&session.world)?;
    loop {
        println!("{}", session.menu.help());
        let line = match read_line(">> ")? {
            Some(line) => line,
            None => return Ok(()),
        };
        match Command::parse(session.menu, &line) {
            Ok(command) => {
                if !session.execute(command)? {
                    return Ok(());
                }
            }
            Err(e) => println!("Kindly enter a valid command: {}.", e),
        }
    }
}
