use std::io;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::{Block, Borders},
    Terminal,
};
use tracing::info;

use scrollfx_core::sections::SiteContent;
use scrollfx_core::AppConfig;
use scrollfx_tui::{
    app::{rows_to_px, App},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{PageWidget, PreviewWidget, StackWidget, StatusBarWidget},
    GruvboxMaterial,
};

pub async fn run(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("scrollfx"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Body rows: terminal minus the status bar and the frame border
    let rows = terminal.size()?.height.saturating_sub(3);
    let events = EventHandler::with_fps(config.animation.fps);
    let result = match App::new(config, SiteContent::demo(), rows) {
        Ok(mut app) => {
            let result = run_loop(&mut terminal, &mut app, &events);
            app.shutdown();
            result
        }
        Err(e) => Err(e),
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, events: &EventHandler) -> Result<()> {
    info!(tick = ?events.tick_rate(), "Preview started");

    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| {
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GruvboxMaterial::GREY0))
                .title(" scrollfx ");
            let body = block.inner(main_layout[0]);
            frame.render_widget(block, main_layout[0]);

            // Track the body height as the page viewport
            if rows_to_px(body.height) != app.page.viewport_height() {
                app.resize(body.height);
            }

            let layout = app.page.layout(&app.runtime);
            PageWidget::render(frame, body, app, &layout);
            StackWidget::render(frame, body, app, &layout);
            PreviewWidget::render(frame, body, app, &layout);
            StatusBarWidget::render(frame, main_layout[1], app);
        })?;

        if app.should_quit {
            break;
        }

        // Handle events
        if let Some(event) = events.next()? {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key, app);
                    app.apply(action);
                }
                AppEvent::Mouse(mouse) => app.apply(handle_mouse_event(mouse)),
                // Picked up by the next draw
                AppEvent::Resize(_, _) => {}
                AppEvent::Tick => {}
            }
        }
    }

    info!("Preview closed");
    Ok(())
}
