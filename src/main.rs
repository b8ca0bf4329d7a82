use std::{
    io::{self},
    path::{Path, PathBuf},
    thread::sleep,
    time::Duration,
};

use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use fern::FormatCallback;
use pingpong::{InvalidConfiguration, MatchConfig, MatchSummary};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use time::format_description::well_known::Iso8601;
use tui_big_text::{BigText, PixelSize};

mod game;
mod game_theme;
mod helpers;
use crate::{
    game::Game,
    game_theme::GameTheme,
    helpers::centered_rect_with_percentage,
};

const MIN_WIDTH: u16 = 80;
const MIN_HEIGHT: u16 = 24;

const MATCH_LENGTH_STEP: u32 = 15;
const MATCH_LENGTH_MAX: u32 = 300;

#[derive(Parser)]
#[command(about = "Ping pong against the computer, in your terminal.", long_about = None)]
struct Cli {
    /// Field width, in field units.
    #[arg(long, default_value_t = pingpong::config::Params::FIELD_WIDTH)]
    field_width: i32,

    /// Field height, in field units.
    #[arg(long, default_value_t = pingpong::config::Params::FIELD_HEIGHT)]
    field_height: i32,

    /// Horizontal ball speed, in field units per physics tick.
    #[arg(long, default_value_t = pingpong::config::Params::BALL_SPEED_X)]
    ball_speed_x: i32,

    /// Vertical ball speed, in field units per physics tick.
    #[arg(long, default_value_t = pingpong::config::Params::BALL_SPEED_Y)]
    ball_speed_y: i32,

    /// Distance the player paddle moves per key press.
    #[arg(long, default_value_t = pingpong::config::Params::PADDLE_SPEED)]
    paddle_speed: i32,

    /// Distance the computer paddle moves per physics tick.
    #[arg(long, default_value_t = pingpong::config::Params::AI_SPEED)]
    ai_speed: i32,

    /// Match length in seconds.
    #[arg(long, short, default_value_t = pingpong::config::Params::MATCH_DURATION_SECS)]
    duration: u32,

    /// Physics tick period in milliseconds.
    #[arg(long, default_value_t = pingpong::config::Params::TICK_PERIOD_MS)]
    tick_ms: u64,

    /// File the log is written to. The terminal itself is used by the game.
    #[arg(long, default_value = "terminal-pingpong.log", value_name = "PATH")]
    log_file: PathBuf,

    /// Most verbose level written to the log file.
    #[arg(value_enum, long, default_value_t)]
    log_level: LogLevel,
}

impl Cli {
    fn match_config(&self) -> MatchConfig {
        MatchConfig {
            field_width: self.field_width,
            field_height: self.field_height,
            ball_speed_x: self.ball_speed_x,
            ball_speed_y: self.ball_speed_y,
            paddle_speed: self.paddle_speed,
            ai_speed: self.ai_speed,
            duration_secs: self.duration,
            tick_period: Duration::from_millis(self.tick_ms),
            ..MatchConfig::default()
        }
    }
}

#[derive(Copy, Clone, ValueEnum, Default)]
enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum StartupError {
    #[error("invalid match configuration : {0}")]
    Config(#[from] InvalidConfiguration),

    #[error("terminal error : {0}")]
    Io(#[from] io::Error),

    #[error("could not install the logger : {0}")]
    Logger(#[from] log::SetLoggerError),
}

#[derive(Debug)]
struct MainMenu {
    options: Vec<&'static str>,
    selected: usize,
}

#[derive(Debug)]
enum AppScreen {
    MainMenu,
    Game,
    Settings,
}

const MAIN_MENU_OPTIONS: [&str; 3] = ["Play vs. Computer", "Settings", "Exit"];
const SETTINGS_ROWS: usize = 3; // match length, theme, back

struct App {
    exit: bool,
    main_menu: MainMenu,
    current_game: Option<Game>,
    last_summary: Option<MatchSummary>,
    screen: AppScreen,
    match_config: MatchConfig,
    selected_theme: GameTheme,
    settings_selected: usize,
}

impl App {
    fn new(match_config: MatchConfig) -> Self {
        Self {
            exit: false,
            main_menu: MainMenu {
                options: MAIN_MENU_OPTIONS.to_vec(),
                selected: 0,
            },
            current_game: None,
            last_summary: None,
            screen: AppScreen::MainMenu,
            match_config,
            selected_theme: GameTheme::default(),
            settings_selected: 0,
        }
    }

    pub fn run(&mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        let mut too_small = false;

        while !self.exit {
            let size = terminal.size()?;
            if size.width < MIN_WIDTH || size.height < MIN_HEIGHT {
                if !too_small {
                    log::warn!("Terminal too small ({}x{}).", size.width, size.height);
                    too_small = true;
                }
                if let Some(code) = read_key_press()? {
                    self.handle_key_while_too_small(code);
                }
                // also covers a match started from the menu while the field is hidden
                if let Some(game) = self.current_game.as_mut() {
                    game.hold();
                }
                terminal.draw(|frame| self.show_terminal_resize_warning(frame))?;
                continue;
            }
            if too_small {
                // let the terminal settle before redrawing at the new size
                sleep(Duration::from_millis(100));
                if let Some(game) = self.current_game.as_mut() {
                    game.release();
                }
                too_small = false;
            }

            match self.screen {
                AppScreen::MainMenu => {
                    self.handle_events()?;
                    terminal.draw(|frame| self.draw(frame))?;
                }
                AppScreen::Game => {
                    let keep_playing = match self.current_game.as_mut() {
                        Some(game) => {
                            let keep_playing = game.game_loop()?;
                            if keep_playing {
                                terminal.draw(|frame| game.draw(frame))?;
                            }
                            keep_playing
                        }
                        None => false,
                    };
                    if !keep_playing {
                        self.leave_game();
                    }
                }
                AppScreen::Settings => {
                    self.handle_settings_events()?;
                    terminal.draw(|frame| self.draw_settings(frame))?;
                }
            }
        }

        Ok(())
    }

    fn start_game(&mut self) {
        match Game::new(self.match_config.clone(), self.selected_theme) {
            Ok(game) => {
                self.current_game = Some(game);
                self.screen = AppScreen::Game;
            }
            Err(e) => log::error!("Could not start a match : {e}."),
        }
    }

    /// Drop the current match and go back to the menu.
    fn leave_game(&mut self) {
        if let Some(game) = self.current_game.take() {
            let snapshot = game.snapshot();
            if let Some(summary) = game.summary() {
                self.last_summary = Some(summary);
            }
            log::info!(
                "Left the match at {} - {} with {} s remaining.",
                snapshot.player_score,
                snapshot.ai_score,
                snapshot.seconds_remaining
            );
        }
        self.screen = AppScreen::MainMenu;
    }

    fn show_terminal_resize_warning(&mut self, frame: &mut Frame) {
        let colors = self.selected_theme.colors();
        let area = frame.area();
        let popup_area = centered_rect_with_percentage(60, 20, area.width, area.height);
        let popup = Paragraph::new(format!(
            "Terminal too small!\nPlease resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(
            Block::default()
                .title("Warning")
                .borders(Borders::ALL)
                .border_type(BorderType::Thick),
        )
        .style(Style::default().fg(colors.ball))
        .alignment(Alignment::Center);
        frame.render_widget(popup, popup_area);
    }

    fn draw(&mut self, frame: &mut Frame) {
        let [title_area, options_area] =
            Layout::vertical([Constraint::Length(12), Constraint::Length(9)])
                .flex(Flex::Center)
                .areas(frame.area());

        let big_text = BigText::builder()
            .pixel_size(PixelSize::Sextant)
            .style(Style::new().blue())
            .lines(vec![
                "".into(),
                "terminal".cyan().into(),
                "PING PONG".white().into(),
                "~~~~~".light_red().into(),
            ])
            .alignment(Alignment::Center)
            .build();
        frame.render_widget(big_text, title_area);

        let [menu_area] = Layout::horizontal([Constraint::Length(30)])
            .flex(Flex::Center)
            .areas(options_area);
        frame.render_widget(
            Block::default()
                .style(Style::default().fg(Color::Cyan))
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
            menu_area,
        );

        let rows = Layout::vertical(vec![Constraint::Length(2); self.main_menu.options.len()])
            .flex(Flex::Center)
            .split(menu_area);
        for (i, &option) in self.main_menu.options.iter().enumerate() {
            let style = if i == self.main_menu.selected {
                Style::default().fg(Color::White).bold().italic()
            } else {
                Style::default().fg(Color::Green).bold()
            };
            let option_widget = Paragraph::new(option)
                .style(style)
                .alignment(Alignment::Center);
            frame.render_widget(option_widget, rows[i]);
        }

        if let Some(summary) = self.last_summary {
            let [_, footer] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
                .areas(frame.area());
            let last = Paragraph::new(format!(
                "Last match: Player {} - {} Computer ({})",
                summary.player_score, summary.ai_score, summary.winner
            ))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
            frame.render_widget(last, footer);
        }
    }

    fn handle_events(&mut self) -> io::Result<()> {
        if let Some(code) = read_key_press()? {
            self.handle_menu_key(code);
        }
        Ok(())
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        let options = self.main_menu.options.len();
        match code {
            KeyCode::Char('q') => self.exit(),
            KeyCode::Up => self.main_menu.selected = (self.main_menu.selected + options - 1) % options,
            KeyCode::Down => self.main_menu.selected = (self.main_menu.selected + 1) % options,
            KeyCode::Enter => match self.main_menu.selected {
                0 => self.start_game(),
                1 => {
                    self.settings_selected = 0;
                    self.screen = AppScreen::Settings;
                }
                _ => self.exit(),
            },
            _ => {}
        }
    }

    /// The warning popup covers everything. Menus stay usable, a running match
    /// ignores keys until it is visible again.
    fn handle_key_while_too_small(&mut self, code: KeyCode) {
        match self.screen {
            AppScreen::MainMenu => self.handle_menu_key(code),
            AppScreen::Settings => self.handle_settings_key(code),
            AppScreen::Game => log::debug!("Ignoring {code:?} while the match is hidden."),
        }
    }

    // --- Settings Screen ---
    fn draw_settings(&mut self, frame: &mut Frame) {
        let colors = self.selected_theme.colors();
        let area = frame.area();
        let settings = [
            format!("Match Length: {} s", self.match_config.duration_secs),
            format!("Theme: {}", self.selected_theme.name()),
            "Back".to_string(),
        ];

        let [settings_area] = Layout::horizontal([Constraint::Percentage(50)])
            .flex(Flex::Center)
            .areas(area);
        let [settings_block_area, preview_area, hint_area] = Layout::vertical([
            Constraint::Length(10),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(settings_area);
        let settings_block = Block::default()
            .title("Settings")
            .borders(Borders::ALL)
            .border_type(BorderType::Thick)
            .style(Style::default().fg(colors.accent));
        frame.render_widget(settings_block, settings_block_area);

        let line_height = 2;
        let start_y = settings_block_area.y
            + settings_block_area
                .height
                .saturating_sub((settings.len() * line_height) as u16)
                / 2;
        for (i, setting) in settings.iter().enumerate() {
            let para = if i == self.settings_selected {
                Paragraph::new(format!("> {} <", setting))
                    .style(Style::default().fg(Color::White).bold())
            } else {
                Paragraph::new(format!("  {}  ", setting)).style(Style::default().fg(colors.text))
            };
            let line_area = Rect {
                x: settings_block_area.x + 2,
                y: start_y + (i * line_height) as u16,
                width: settings_block_area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(para.alignment(Alignment::Center), line_area);
        }

        // theme preview: one swatch per field element
        let swatches = [
            ("Player", colors.player_paddle),
            ("Computer", colors.ai_paddle),
            ("Ball", colors.ball),
            ("Border", colors.border),
        ];
        let swatch_row = Rect::new(
            preview_area.x + 2,
            preview_area.y + 1,
            preview_area.width.saturating_sub(4),
            1,
        );
        let cells = Layout::horizontal(vec![Constraint::Fill(1); swatches.len()]).split(swatch_row);
        for ((label, color), cell) in swatches.iter().zip(cells.iter()) {
            let swatch = Paragraph::new(*label)
                .style(Style::default().bg(*color).fg(Color::Black))
                .alignment(Alignment::Center);
            frame.render_widget(swatch, *cell);
        }

        let hint = Paragraph::new("↑/↓ select  ←/→ change  Esc back")
            .style(Style::default().fg(colors.text))
            .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);
    }

    fn change_setting(&mut self, forward: bool) {
        match self.settings_selected {
            0 => {
                let duration = &mut self.match_config.duration_secs;
                *duration = if forward {
                    (*duration + MATCH_LENGTH_STEP).min(MATCH_LENGTH_MAX)
                } else {
                    duration.saturating_sub(MATCH_LENGTH_STEP).max(MATCH_LENGTH_STEP)
                };
            }
            1 => {
                self.selected_theme = if forward {
                    self.selected_theme.next()
                } else {
                    self.selected_theme.previous()
                };
            }
            _ => {}
        }
    }

    fn handle_settings_events(&mut self) -> io::Result<()> {
        if let Some(code) = read_key_press()? {
            self.handle_settings_key(code);
        }
        Ok(())
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => {
                self.settings_selected = (self.settings_selected + SETTINGS_ROWS - 1) % SETTINGS_ROWS
            }
            KeyCode::Down => self.settings_selected = (self.settings_selected + 1) % SETTINGS_ROWS,
            KeyCode::Left => self.change_setting(false),
            KeyCode::Right => self.change_setting(true),
            KeyCode::Enter if self.settings_selected == SETTINGS_ROWS - 1 => {
                self.screen = AppScreen::MainMenu
            }
            KeyCode::Esc => self.screen = AppScreen::MainMenu,
            _ => {}
        }
    }

    fn exit(&mut self) {
        self.exit = true;
    }
}

// waits briefly for one key press, other events are dropped
fn read_key_press() -> io::Result<Option<KeyCode>> {
    if event::poll(Duration::from_millis(10))? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind == KeyEventKind::Press {
                return Ok(Some(key_event.code));
            }
        }
    }
    Ok(None)
}

/// Send every log record to `log_file`; stdout belongs to the terminal UI.
fn setup_logger(log_file: &Path, level: LogLevel) -> Result<(), StartupError> {
    fern::Dispatch::new()
        .level(level.into())
        .format(format_log)
        .chain(fern::log_file(log_file)?)
        .apply()?;
    Ok(())
}

/// The function given to [`fern`] to format messages.
fn format_log(out: FormatCallback, message: &std::fmt::Arguments, record: &log::Record) {
    out.finish(format_args!(
        "[{} {} {}] {}",
        utc_now_wrapper(),
        record.level(),
        record.target(),
        message
    ))
}

/// Current UTC time as ISO 8601, with a placeholder if formatting fails.
fn utc_now_wrapper() -> String {
    time::OffsetDateTime::now_utc()
        .format(&Iso8601::DATE_TIME)
        .unwrap_or(String::from("invalid date"))
}

fn main() -> Result<(), StartupError> {
    let cli = Cli::parse();
    setup_logger(&cli.log_file, cli.log_level)?;

    let match_config = cli.match_config();
    if let Err(e) = match_config.validate() {
        log::error!("Refusing to start with an invalid configuration : {e}.");
        return Err(e.into());
    }

    let terminal = ratatui::init();
    let mut app = App::new(match_config);
    let app_result = app.run(terminal);
    ratatui::restore();

    match &app_result {
        Ok(()) => {
            println!("Thanks for playing terminal ping pong!");
            if let Some(summary) = app.last_summary {
                println!(
                    "Final Score: {} - {} (winner: {})",
                    summary.player_score, summary.ai_score, summary.winner
                );
            }
        }
        Err(e) => {
            log::error!("Game ended with error : {e}.");
            eprintln!("Game ended with error: {}", e);
        }
    }

    app_result.map_err(StartupError::from)
}
