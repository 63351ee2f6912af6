mod config;
mod error;
mod fetch;
mod logging;
mod models;
mod sprite;
mod ui;
mod utils;

use anyhow::Context;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyCode, KeyEventKind,
    KeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};

use crate::config::Config;
use crate::fetch::PokeClient;
use crate::sprite::Assets;
use crate::ui::{draw_ui, hits_search_button, App};

const WIN_TITLE: &str = "Pokedex";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init(&config.log_dir);
    tracing::info!(api = %config.api_url, "starting pokedex");

    let assets = Assets::load().context("failed to decode bundled images")?;
    let client = PokeClient::new(&config.api_url);
    let mut app = App::new(assets);

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, &client).await;
    restore_terminal()?;

    if let Err(e) = &result {
        tracing::error!(error = %e, "pokedex exited with an error");
    }
    result
}

/// Raw mode, alternate screen, mouse capture. If any step after raw mode
/// fails the terminal is put back before the error is returned.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    undo_on_error(
        || {
            let mut stdout = io::stdout();
            stdout.execute(EnterAlternateScreen)?;
            stdout.execute(EnableMouseCapture)?;
            stdout.execute(SetTitle(WIN_TITLE))?;
            Terminal::new(CrosstermBackend::new(stdout)).context("failed to start terminal")
        },
        || {
            if let Err(e) = restore_terminal() {
                tracing::error!(error = %e, "failed to restore terminal");
            }
        },
    )
}

fn restore_terminal() -> anyhow::Result<()> {
    // attempt every step even if an earlier one fails
    let raw = disable_raw_mode();
    let mut stdout = io::stdout();
    let mouse = stdout.execute(DisableMouseCapture).map(|_| ());
    let screen = stdout.execute(LeaveAlternateScreen).map(|_| ());
    raw.and(mouse).and(screen).context("failed to restore terminal")
}

/// Run `setup`; when it fails, run `undo` before handing the error back.
fn undo_on_error<T>(
    setup: impl FnOnce() -> anyhow::Result<T>,
    undo: impl FnOnce(),
) -> anyhow::Result<T> {
    setup().map_err(|e| {
        undo();
        e
    })
}

/// Event loop. Everything runs on this one task: a search draws the
/// "Searching" frame, waits for the catalog, then redraws with the result.
async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    client: &PokeClient,
) -> anyhow::Result<()> {
    loop {
        draw_ui(terminal, app)?;

        let submit = match event::read()? {
            CEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::Enter => true,
                KeyCode::Backspace => {
                    app.pop_char();
                    false
                }
                KeyCode::Char(c) => {
                    app.push_char(c);
                    false
                }
                _ => false,
            },
            CEvent::Mouse(m) => {
                matches!(m.kind, MouseEventKind::Down(MouseButton::Left))
                    && hits_search_button(m.column, m.row)
            }
            _ => false,
        };

        if !submit {
            continue;
        }
        match app.submit() {
            Some(term) => {
                tracing::info!(%term, "searching");
                draw_ui(terminal, app)?;
                let result = client.search(&term).await;
                app.finish(result);
            }
            None => tracing::debug!("empty search, showing default view"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn failed_setup_is_undone() {
        let undone = Cell::new(false);
        let result: anyhow::Result<()> = undo_on_error(
            || Err(anyhow::anyhow!("alternate screen refused")),
            || undone.set(true),
        );
        assert!(result.is_err());
        assert!(undone.get());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("alternate screen refused"));
    }

    #[test]
    fn successful_setup_is_kept() {
        let undone = Cell::new(false);
        let result = undo_on_error(|| Ok(7), || undone.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }
}
