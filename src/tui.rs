use std::io::{self, IsTerminal};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::WidgetId;
use crate::relay::{RenderedWidget, WidgetHost};
use crate::render::{WidgetView, dims_for};

const PREVIEW_ID: WidgetId = WidgetId(0);

/// Interactive preview: the terminal plays the home screen and its size
/// decides the layout.
pub fn run_preview(host: &mut WidgetHost) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("preview requires an interactive terminal (TTY)");
    }

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = preview_loop(&mut terminal, host);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

fn preview_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    host: &mut WidgetHost,
) -> Result<()> {
    let mut rendered: Option<(Rect, RenderedWidget)> = None;

    loop {
        terminal
            .draw(|frame| {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Min(1), Constraint::Length(1)])
                    .split(frame.area());
                let area = chunks[0];

                // Re-render only when the size changed or a reload was asked for.
                let stale = !matches!(&rendered, Some((prev, _)) if *prev == area);
                if stale {
                    let widget = host.render(PREVIEW_ID, dims_for(area.width, area.height));
                    rendered = Some((area, widget));
                }
                if let Some((_, widget)) = &rendered {
                    frame.render_widget(WidgetView::new(widget, host.config()), area);
                    frame.render_widget(status_line(widget), chunks[1]);
                }
            })
            .context("draw preview")?;

        if !event::poll(Duration::from_millis(250)).context("poll terminal events")? {
            continue;
        }
        match event::read().context("read terminal event")? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                KeyCode::Char('r') => rendered = None,
                KeyCode::Char('n') => {
                    host.request_refresh(Some(PREVIEW_ID));
                    rendered = None;
                }
                _ => {}
            },
            Event::Resize(_, _) => rendered = None,
            _ => {}
        }
    }
}

fn status_line(widget: &RenderedWidget) -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", widget.variant.as_str()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("{} items  ", widget.rows.len()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            "r reload  n request data  q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    Paragraph::new(line)
}
