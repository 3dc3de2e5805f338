//! Terminal demo frontend.
//!
//! Renders the in-memory page and forwards keystrokes as page events:
//! `m` activates the menu toggle, `1`-`9` toggle the matching FAQ entry,
//! `q` or Esc quits. The carousel rotates on its own; the widget panel shows
//! the container's current transform so the slide phase is visible.

use crate::interactions::PageInteractions;
use crate::memory::{MemoryPage, PageSnapshot};
use crate::page::PageEvent;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

pub struct DemoFrontend {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl DemoFrontend {
    /// Set up the terminal: raw mode plus alternate screen.
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor()?;

        Ok(Self { terminal })
    }

    /// Frame loop. Returns when the user quits; the caller owns engine
    /// shutdown.
    pub async fn run(
        &mut self,
        page: &MemoryPage,
        engine: &PageInteractions,
        events: &mut mpsc::UnboundedReceiver<PageEvent>,
    ) -> Result<()> {
        loop {
            if !self.forward_input(page)? {
                return Ok(());
            }

            // Deliver element notifications (user input above, forced closes
            // from the accordion, etc.) before drawing the frame.
            while let Ok(event) = events.try_recv() {
                engine.handle_event(event);
            }

            let snapshot = page.snapshot();
            self.terminal.draw(|f| draw(f, &snapshot))?;

            tokio::time::sleep(Duration::from_millis(33)).await;
        }
    }

    /// Drain pending keystrokes. Returns false when the user quit.
    fn forward_input(&mut self, page: &MemoryPage) -> Result<bool> {
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(false),
                KeyCode::Char('m') => page.click_menu_toggle(),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    page.toggle_disclosure(index);
                }
                _ => {}
            }
        }
        Ok(true)
    }

    /// Restore the terminal. Called on every exit path from main.
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

fn draw(f: &mut Frame, snapshot: &PageSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], snapshot);
    draw_body(f, chunks[1], snapshot);
    draw_footer(f, chunks[2], snapshot);
}

fn draw_header(f: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
    let mut spans = vec![Span::styled(
        " pagekit demo ",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    if let Some(attr) = &snapshot.menu_expanded_attr {
        spans.push(Span::raw("  [m] ☰ menu  "));
        spans.push(Span::styled(
            format!("aria-expanded=\"{}\"", attr),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("header"));
    f.render_widget(header, area);
}

fn draw_body(f: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    draw_left_column(f, columns[0], snapshot);
    draw_widget(f, columns[1], snapshot);
}

fn draw_left_column(f: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
    let panel_height = if snapshot.menu_panel_hidden == Some(false) {
        (snapshot.menu_links.len() as u16 + 2).min(area.height)
    } else {
        0
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(panel_height), Constraint::Min(3)])
        .split(area);

    if panel_height > 0 {
        draw_menu_panel(f, rows[0], snapshot);
    }
    draw_faq(f, rows[1], snapshot);
}

fn draw_menu_panel(f: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
    // The "open" class drives the accent color, same as the page style.
    let border_color = if snapshot.menu_panel_classes.contains("open") {
        Color::Green
    } else {
        Color::DarkGray
    };

    let lines: Vec<Line> = snapshot
        .menu_links
        .iter()
        .map(|link| Line::from(format!("  {}", link)))
        .collect();

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title("mobile menu"),
    );
    f.render_widget(panel, area);
}

fn draw_faq(f: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
    let mut lines = Vec::new();
    for (i, entry) in snapshot.faq.iter().enumerate() {
        let marker = if entry.open { "▾" } else { "▸" };
        lines.push(Line::from(vec![
            Span::styled(
                format!("[{}] ", i + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!("{} {}", marker, entry.summary),
                if entry.open {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                },
            ),
        ]));
        if entry.open && !entry.body.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("      {}", entry.body),
                Style::default().fg(Color::Gray),
            )));
        }
    }

    let faq = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("faq"));
    f.render_widget(faq, area);
}

fn draw_widget(f: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
    let mut lines: Vec<Line> = snapshot
        .widget_labels
        .iter()
        .map(|label| Line::from(format!("  • {}", label)))
        .collect();

    if !snapshot.widget_transform.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("transform: {}", snapshot.widget_transform),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(Span::styled(
            format!("transition: {}", snapshot.widget_transition),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("floating widget"),
    );
    f.render_widget(widget, area);
}

fn draw_footer(f: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
    let year = snapshot.year_text.as_deref().unwrap_or("");
    let footer = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" © {} pagekit", year),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            "   m: menu  1-9: faq  q: quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    f.render_widget(footer, area);
}
