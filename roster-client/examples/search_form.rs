//! Search Form - type a name, see matching employees as you type
//!
//! Run the server first, then:
//!   ROSTER_URL=http://localhost:5000 cargo run -p roster-client --example search_form
//!
//! Logs go to `search_form.log` in the working directory.

use std::fs::File;
use std::io::{self, Stdout};
use std::sync::Mutex;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{prelude::*, widgets::*};
use roster_client::{ClientConfig, Role, SearchPipeline, SearchView, Status};
use tracing_subscriber::EnvFilter;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

struct App {
    input: Input,
    pipeline: SearchPipeline,
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_file = File::create("search_form.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roster_client=debug")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let base_url =
        std::env::var("ROSTER_URL").unwrap_or_else(|_| ClientConfig::default().base_url);
    let config = ClientConfig::new(&base_url);
    let client = config.build_http_client()?;
    tracing::info!(%base_url, "Search form started");

    let mut app = App {
        input: Input::default(),
        pipeline: SearchPipeline::with_debounce(client, config.debounce),
        base_url,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.pipeline.shutdown().await;
    res?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        let view = app.pipeline.view();
        terminal.draw(|f| ui(f, app, &view))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            match key.code {
                KeyCode::Esc => return Ok(()),
                _ => {
                    app.input.handle_event(&Event::Key(key));
                    // Repeats are dropped by the pipeline
                    app.pipeline.push(app.input.value());
                }
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App, view: &SearchView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Length(1), // Status line
            Constraint::Min(1),    // Results
        ])
        .split(f.area());

    // Search box
    let width = chunks[0].width.max(3) - 3;
    let scroll = app.input.visual_scroll(width as usize);
    let input = Paragraph::new(app.input.value())
        .style(Style::default().fg(Color::Yellow))
        .scroll((0, scroll as u16))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Buscar empleado ({}) ", app.base_url)),
        );
    f.render_widget(input, chunks[0]);
    f.set_cursor_position((
        chunks[0].x + ((app.input.visual_cursor().max(scroll) - scroll) as u16) + 1,
        chunks[0].y + 1,
    ));

    // Status line
    let status = if view.loading {
        Line::from(Span::styled("Buscando...", Style::default().fg(Color::Cyan)))
    } else if let Some(error) = &view.error {
        Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
    } else {
        Line::from(Span::styled(
            format!("{} resultado(s)   Esc para salir", view.results.len()),
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(status), chunks[1]);

    // Results
    let rows = view.results.iter().map(|e| {
        let rol = match e.rol {
            Role::Worker => "Empleado",
            Role::Supervisor => "Supervisor",
        };
        let status_style = match e.status {
            Status::Active => Style::default().fg(Color::Green),
            Status::Inactive => Style::default().fg(Color::DarkGray),
        };
        let status = match e.status {
            Status::Active => "Activo",
            Status::Inactive => "Inactivo",
        };
        Row::new(vec![
            Cell::from(e.id.to_string()),
            Cell::from(e.nombre.clone()),
            Cell::from(e.email.clone()),
            Cell::from(e.edad.to_string()),
            Cell::from(rol),
            Cell::from(status).style(status_style),
            Cell::from(e.salario.to_string()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Length(5),
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["ID", "Nombre", "Email", "Edad", "Rol", "Estado", "Salario"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(" Empleados "));
    f.render_widget(table, chunks[2]);
}
