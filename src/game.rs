use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::{
    io,
    time::{Duration, Instant},
};

use pingpong::{
    Direction as Move, InvalidConfiguration, MatchConfig, MatchDriver, MatchState,
    MatchSummary, Snapshot,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::{
    game_theme::GameTheme,
    helpers::{centered_rect, field_to_cells},
};

const EVENT_POLL: Duration = Duration::from_millis(5);

/// Terminal front for one match: feeds key presses and wall-clock time into the
/// simulation and draws its snapshots.
#[derive(Debug)]
pub struct Game {
    state: MatchState,
    driver: MatchDriver,
    /// Set while the end-of-match dialog is shown.
    summary: Option<MatchSummary>,
    game_area: Rect,
    theme: GameTheme,
    should_exit: bool,
}

impl Game {
    pub fn new(config: MatchConfig, theme: GameTheme) -> Result<Self, InvalidConfiguration> {
        let state = MatchState::new_match(config)?;
        let driver = MatchDriver::for_match(&state, Instant::now());
        Ok(Self {
            state,
            driver,
            summary: None,
            game_area: Rect::default(),
            theme,
            should_exit: false,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn summary(&self) -> Option<MatchSummary> {
        self.summary
    }

    /// Stop both drivers, e.g. while the terminal is too small to show the field.
    pub fn hold(&mut self) {
        if self.summary.is_none() {
            self.driver.suspend();
        }
    }

    pub fn release(&mut self) {
        if self.summary.is_none() && self.driver.is_suspended() {
            self.driver.resume(Instant::now());
        }
    }

    fn restart(&mut self) {
        self.state.restart();
        self.driver.resume(Instant::now());
        self.summary = None;
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_exit = true,
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => self.state.apply_move(Move::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                self.state.apply_move(Move::Down)
            }
            _ => {}
        }
    }

    // key events while the end-of-match dialog is open
    fn handle_summary_key_event(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => self.restart(),
            KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Esc | KeyCode::Char('q') => {
                self.should_exit = true
            }
            _ => {}
        }
    }

    fn handle_events(&mut self) -> io::Result<()> {
        // drain everything pending so held keys don't lag behind
        while event::poll(EVENT_POLL)? {
            if let Event::Key(key_event) = event::read()? {
                if key_event.kind != KeyEventKind::Press {
                    continue;
                }
                if self.summary.is_some() {
                    self.handle_summary_key_event(key_event);
                } else {
                    self.handle_key_event(key_event);
                }
            }
        }
        Ok(())
    }

    /// Returns false once the player leaves the match.
    pub fn game_loop(&mut self) -> io::Result<bool> {
        self.handle_events()?;
        if self.should_exit {
            return Ok(false);
        }

        if self.summary.is_none() {
            let advance = self.driver.advance(&mut self.state, Instant::now());
            if let Some(summary) = advance.summary {
                self.summary = Some(summary);
            }
        }
        Ok(true)
    }

    fn draw_core_elements(&self, frame: &mut Frame, snapshot: &Snapshot) {
        let colors = self.theme.colors();
        let inner_area = Rect::new(
            self.game_area.x + 1,
            self.game_area.y + 1,
            self.game_area.width.saturating_sub(2),
            self.game_area.height.saturating_sub(2),
        );
        let field = self.state.field();

        // ratatui keeps the previous buffer around, wipe it or old frames show through
        frame.render_widget(Clear, inner_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(colors.background)),
            inner_area,
        );

        let paddles = [
            (snapshot.player_paddle, colors.player_paddle),
            (snapshot.ai_paddle, colors.ai_paddle),
        ];
        for (paddle, color) in paddles {
            let area = field_to_cells(&paddle, &field, inner_area);
            let block = Block::default().style(Style::default().bg(color));
            frame.render_widget(block, area);
        }

        let ball_area = field_to_cells(&snapshot.ball, &field, inner_area);
        let ball = Block::default().style(Style::default().bg(colors.ball));
        frame.render_widget(ball, ball_area);
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let colors = self.theme.colors();
        let snapshot = self.state.snapshot();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![
                Constraint::Fill(1),   // field
                Constraint::Length(3), // controls
            ])
            .split(area);
        self.game_area = layout[0];

        let block = Block::default()
            .title(self.get_block_title(&snapshot))
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .style(Style::default().fg(colors.border).bg(colors.background))
            .title_alignment(Alignment::Center);
        frame.render_widget(block, self.game_area);

        self.draw_core_elements(frame, &snapshot);

        let controls = Paragraph::new(" W/↑ = up  S/↓ = down  |  Esc = Quit ")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .style(Style::default().fg(colors.border)),
            )
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center);
        frame.render_widget(controls, layout[1]);

        if let Some(summary) = self.summary {
            self.draw_summary(frame, &summary);
        }
    }

    fn draw_summary(&self, frame: &mut Frame, summary: &MatchSummary) {
        let colors = self.theme.colors();
        let area = frame.area();
        let popup_area = centered_rect(56, 18, area.width, area.height);
        frame.render_widget(Clear, popup_area);
        let popup_block = Block::default()
            .title("Game Over")
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .style(Style::default().fg(colors.accent).bg(colors.background))
            .title_alignment(Alignment::Center);
        frame.render_widget(popup_block, popup_area);

        let inner = Rect::new(
            popup_area.x + 2,
            popup_area.y + 1,
            popup_area.width.saturating_sub(4),
            popup_area.height.saturating_sub(2),
        );
        let [banner_area, text_area] =
            Layout::vertical([Constraint::Length(4), Constraint::Fill(1)]).areas(inner);

        let banner = BigText::builder()
            .pixel_size(PixelSize::Sextant)
            .style(Style::new().fg(colors.ball))
            .lines(vec!["TIME'S UP".bold().into()])
            .alignment(Alignment::Center)
            .build();
        frame.render_widget(banner, banner_area);

        let text = format!(
            "\nPlayer Score: {}\nComputer Score: {}\n\nWinner: {}\n\n[R/Enter] Retry   [C/Esc] Close",
            summary.player_score, summary.ai_score, summary.winner
        );
        let details = Paragraph::new(text)
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center);
        frame.render_widget(details, text_area);
    }

    fn get_block_title(&self, snapshot: &Snapshot) -> String {
        let p1_text = format!("Player ({})", snapshot.player_score);
        let p2_text = format!("({}) Computer", snapshot.ai_score);
        let clock_text = format!("Time: {} s", snapshot.seconds_remaining);

        let used = p1_text.len() + clock_text.len() + p2_text.len() + 6;
        let dashes = (self.game_area.width as usize).saturating_sub(used) / 2;

        format!(
            " {} {} {} {} {} ",
            p1_text,
            "─".repeat(dashes),
            clock_text,
            "─".repeat(dashes),
            p2_text,
        )
    }
}
