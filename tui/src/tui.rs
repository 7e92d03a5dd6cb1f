use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::debug;
use rlifegame_lib::{Life, Snapshot};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};

/// How long to wait for a key while paused.
const IDLE: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Status {
    Running,
    Paused,
    Finished,
}

struct App {
    life: Box<dyn Life + Send>,
    snapshot: Snapshot,
    gen: u64,
    /// `0` means no limit.
    generations: u64,
    delay: Duration,
    status: Status,
    last_step: Instant,
}

impl App {
    fn new(life: Box<dyn Life + Send>, generations: u64, delay: Duration) -> Self {
        let snapshot = life.snapshot();
        App {
            life,
            snapshot,
            gen: 0,
            generations,
            delay,
            status: Status::Running,
            last_step: Instant::now(),
        }
    }

    fn step(&mut self) {
        if self.status == Status::Finished {
            return;
        }
        self.life.step();
        self.life.render(&mut self.snapshot);
        self.gen += 1;
        self.last_step = Instant::now();
        if self.generations != 0 && self.gen >= self.generations {
            debug!("reached generation {}", self.gen);
            self.status = Status::Finished;
        }
    }

    fn toggle(&mut self) {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => {
                self.last_step = Instant::now();
                Status::Running
            }
            Status::Finished => Status::Finished,
        };
    }

    fn draw<W: Write>(&self, out: &mut W) -> io::Result<()> {
        queue!(
            out,
            MoveTo(0, 0),
            SetAttribute(Attribute::Reverse),
            Print(format!(
                "Gen: {}  Cells: {}  Engine: {}",
                self.gen,
                self.snapshot.population(),
                self.life.kind()
            )),
            Clear(ClearType::UntilNewLine),
            SetAttribute(Attribute::Reset)
        )?;

        let mut line = String::with_capacity(2 * self.snapshot.width() as usize);
        for y in 0..self.snapshot.height() {
            line.clear();
            for x in 0..self.snapshot.width() {
                line.push_str(if self.snapshot.get((x, y)) { "██" } else { "  " });
            }
            queue!(out, MoveTo(0, y as u16 + 1), Print(&line))?;
        }

        let status = match self.status {
            Status::Running => "Running... Press [space] to pause, [q] to quit.",
            Status::Paused => "Paused. Press [space] to resume, [n] to step, [q] to quit.",
            Status::Finished => "Finished. Press [q] to quit.",
        };
        queue!(
            out,
            MoveTo(0, self.snapshot.height() as u16 + 1),
            SetAttribute(Attribute::Reverse),
            Print(status),
            Clear(ClearType::UntilNewLine),
            SetAttribute(Attribute::Reset)
        )?;
        out.flush()
    }

    /// Runs until the user quits.
    fn run<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.draw(out)?;
        loop {
            let timeout = match self.status {
                Status::Running => self.delay.saturating_sub(self.last_step.elapsed()),
                _ => IDLE,
            };
            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(KeyEvent {
                        code,
                        modifiers,
                        kind: KeyEventKind::Press,
                        ..
                    }) => match code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => break,
                        KeyCode::Char(' ') | KeyCode::Enter => self.toggle(),
                        KeyCode::Char('n') | KeyCode::Right => {
                            if self.status == Status::Running {
                                self.toggle();
                            }
                            self.step();
                        }
                        _ => continue,
                    },
                    Event::Resize(..) => execute!(out, Clear(ClearType::All))?,
                    _ => continue,
                }
                self.draw(out)?;
            } else if self.status == Status::Running {
                self.step();
                self.draw(out)?;
            }
        }
        Ok(())
    }
}

/// Leaves the alternate screen and raw mode, even if running failed.
///
/// Returns the first error among `result` and the restoring steps.
fn restore<W: Write>(out: &mut W, result: io::Result<()>) -> io::Result<()> {
    let screen = execute!(out, Show, LeaveAlternateScreen);
    let raw = disable_raw_mode();
    result.and(screen).and(raw)
}

/// Runs the generations in the alternate screen, then prints the last one.
pub(crate) fn run_with_tui(
    life: Box<dyn Life + Send>,
    generations: u64,
    delay: Duration,
) -> io::Result<()> {
    let mut app = App::new(life, generations, delay);
    let mut stdout = io::stdout();

    enable_raw_mode()?;
    let result = execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))
        .and_then(|()| app.run(&mut stdout));
    restore(&mut stdout, result)?;

    print!("{}", app.life.plaintext());
    println!("Generation: {}", app.gen);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlifegame_lib::{patterns::BLINKER, Config};

    fn app(generations: u64) -> App {
        let mut life = Config::new(5, 5).world().unwrap();
        BLINKER.place(life.as_mut(), (2, 3));
        App::new(life, generations, Duration::ZERO)
    }

    #[test]
    fn stops_at_the_last_generation() {
        let mut app = app(3);
        for _ in 0..10 {
            app.step();
        }
        assert_eq!(app.gen, 3);
        assert_eq!(app.status, Status::Finished);
        app.toggle();
        assert_eq!(app.status, Status::Finished);
    }

    #[test]
    fn restoring_keeps_the_first_error() {
        let failed = || Err(io::Error::new(io::ErrorKind::Other, "run failed"));
        let mut out = Vec::new();
        let err = restore(&mut out, failed()).unwrap_err();
        assert_eq!(err.to_string(), "run failed");
        // The screen is restored anyway.
        let mut expected = Vec::new();
        execute!(expected, Show, LeaveAlternateScreen).unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn draws_cells_and_bars() {
        let mut app = app(0);
        app.toggle();
        app.step();
        let mut out = Vec::new();
        app.draw(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Gen: 1  Cells: 3  Engine: stafford"));
        assert!(out.contains("  ██████  "));
        assert!(out.contains("Paused."));
    }
}
