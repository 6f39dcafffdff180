//! Terminal runner (crossterm + ratatui) and a headless harness.
//!
//! `run_terminal_app` takes over the terminal (raw mode, alternate screen,
//! mouse capture), recomposes whenever a signal changed, and draws through a
//! ratatui `Terminal` before reading the next event. Left click activates on
//! release inside the pressed view; `Tab`/`Shift+Tab` (or the arrow keys)
//! move focus and `Enter`/`Space` activate it; `q`, `Esc` or `Ctrl+C` quit.
//!
//! Logs go to stderr, which shares the screen with the UI; redirect it
//! (`2>app.log`) when running with `RUST_LOG` set.

mod a11y;
mod app;
mod backend;
mod dispatch;
mod events;
mod headless;
mod raster;

use std::io;
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

use crossterm::cursor::Show;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use reprise_core::*;

pub use a11y::{A11yBridge, LogA11y};
pub use app::{App, Flow, RootFn};
pub use backend::RenderBackend;
pub use events::translate;
pub use headless::Headless;
pub use raster::{buffer_lines, paint_scene};

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Runs `cleanup` ahead of the previous panic hook while alive; dropping it
/// puts the previous hook back.
struct RestoreOnPanic {
    previous: Arc<PanicHook>,
}

impl RestoreOnPanic {
    fn install(cleanup: fn()) -> Self {
        let previous = Arc::new(panic::take_hook());
        let chained = previous.clone();
        panic::set_hook(Box::new(move |info| {
            cleanup();
            chained(info);
        }));
        Self { previous }
    }
}

impl Drop for RestoreOnPanic {
    fn drop(&mut self) {
        // The hook can't be swapped while unwinding
        if std::thread::panicking() {
            return;
        }
        drop(panic::take_hook());
        let previous = self.previous.clone();
        panic::set_hook(Box::new(move |info| previous(info)));
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), Show, DisableMouseCapture, LeaveAlternateScreen)
}

pub fn run_terminal_app(root: impl FnMut(&mut Scheduler) -> View + 'static) -> anyhow::Result<()> {
    let _hook = RestoreOnPanic::install(|| {
        let _ = restore_terminal();
    });

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = event_loop(&mut terminal, App::new(Box::new(root)));

    restore_terminal()?;
    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> anyhow::Result<()> {
    let size = terminal.size()?;
    app.sched.size = (size.width as u32, size.height as u32);
    log::info!("terminal runner started at {}x{}", size.width, size.height);

    loop {
        if app.needs_frame() {
            app.compose()?;
            if let Some(frame) = app.frame() {
                terminal.frame(&frame.scene)?;
            }
        }

        let Some(input) = translate(event::read()?) else {
            continue;
        };
        if let InputEvent::Resize { cols, rows } = input {
            terminal.configure_surface(cols, rows)?;
        }
        if app.handle(input) == Flow::Exit {
            break;
        }
    }

    app.unmount();
    log::info!("terminal runner stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    static CLEANUPS: AtomicUsize = AtomicUsize::new(0);
    static OUTER: AtomicUsize = AtomicUsize::new(0);

    fn boom() {
        panic!("boom");
    }

    #[test]
    fn panic_cleanup_is_uninstalled_when_the_runner_returns() {
        panic::set_hook(Box::new(|_| {
            OUTER.fetch_add(1, Ordering::SeqCst);
        }));

        {
            let _hook = RestoreOnPanic::install(|| {
                CLEANUPS.fetch_add(1, Ordering::SeqCst);
            });
            assert!(panic::catch_unwind(boom).is_err());
            assert_eq!(CLEANUPS.load(Ordering::SeqCst), 1);
            assert_eq!(OUTER.load(Ordering::SeqCst), 1);
        }

        assert!(panic::catch_unwind(boom).is_err());
        assert_eq!(CLEANUPS.load(Ordering::SeqCst), 1);
        assert_eq!(OUTER.load(Ordering::SeqCst), 2);

        drop(panic::take_hook());
    }
}
