use std::{error::Error, io, sync::Arc};

use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::Terminal;
use tokio::sync::Mutex;

pub type SharedTerminal = Arc<Mutex<Terminal<CrosstermBackend<io::Stdout>>>>;

pub fn setup_terminal() -> Result<SharedTerminal, Box<dyn Error>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).inspect_err(|_| {
        let _ = disable_raw_mode();
    })?;

    Ok(Arc::new(Mutex::new(terminal)))
}

pub async fn restore_terminal(terminal: &SharedTerminal) -> Result<(), Box<dyn Error>> {
    disable_raw_mode()?;
    let mut guard = terminal.lock().await;
    execute!(guard.backend_mut(), LeaveAlternateScreen)?;
    guard.show_cursor()?;
    Ok(())
}
