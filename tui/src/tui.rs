//! Colored printing and auto-play, built on `crossterm`.

use crossterm::{
    cursor::{MoveTo, MoveToNextLine},
    event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers},
    queue,
    style::{Print, Stylize},
    terminal::{self, Clear, ClearType},
};
use futures_executor::block_on;
use futures_util::StreamExt;
use std::{
    io::{self, Write},
    panic,
    sync::atomic::{AtomicBool, Ordering},
    thread,
    time::Duration,
};
use torus_life_lib::World;

/// Prints the world with a status line on top.
///
/// Living cells are green `o`s and dead cells grey `.`s.
/// Lines are ended with an explicit cursor move, so this also works in raw mode.
pub(crate) fn print_world<W: Write>(world: &World, out: &mut W, footer: &str) -> io::Result<()> {
    queue!(
        out,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Print(format!(
            "Generation: {}  Population: {}",
            world.generation(),
            world.population()
        )),
        MoveToNextLine(1),
    )?;
    for row in world.grid().cells().chunks(world.width()) {
        for &state in row {
            if state.is_alive() {
                queue!(out, Print("o ".green()))?;
            } else {
                queue!(out, Print(". ".dark_grey()))?;
            }
        }
        queue!(out, MoveToNextLine(1))?;
    }
    if !footer.is_empty() {
        queue!(out, Print(footer), MoveToNextLine(1))?;
    }
    out.flush()
}

/// Waits until `q`, `Esc` or `Ctrl-C` is pressed.
async fn wait_for_stop() -> io::Result<()> {
    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        if let Event::Key(key) = event? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                _ => (),
            }
        }
    }
    Ok(())
}

/// Evolves the world until a key stops it.
///
/// The world evolves on a background thread, while this thread listens
/// to the keyboard. The stop flag is checked between generations.
///
/// Returns the number of generations played.
pub(crate) fn auto_play(world: &mut World, delay: Duration, print: bool) -> io::Result<u64> {
    let stop = AtomicBool::new(false);
    terminal::enable_raw_mode()?;

    let result = thread::scope(|s| {
        let player = s.spawn(|| -> io::Result<u64> {
            let mut stdout = io::stdout();
            let mut played = 0;
            while !stop.load(Ordering::Relaxed) {
                world.evolve();
                played += 1;
                if print {
                    print_world(world, &mut stdout, "Press [q] to stop.")?;
                }
                thread::sleep(delay);
            }
            Ok(played)
        });

        let waited = block_on(wait_for_stop());
        stop.store(true, Ordering::Relaxed);
        let played = match player.join() {
            Ok(played) => played,
            Err(e) => panic::resume_unwind(e),
        };
        waited.and(played)
    });

    terminal::disable_raw_mode()?;
    result
}
