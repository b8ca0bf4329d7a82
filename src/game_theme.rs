use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameTheme {
    #[default]
    Arcade,
    Monokai,
    Dracula,
    Nord,
    HighContrast,
}

pub struct ThemeColors {
    pub background: Color,
    pub border: Color,
    pub text: Color,
    pub accent: Color,
    pub player_paddle: Color,
    pub ai_paddle: Color,
    pub ball: Color,
}

impl GameTheme {
    pub const ALL: [GameTheme; 5] = [
        GameTheme::Arcade,
        GameTheme::Monokai,
        GameTheme::Dracula,
        GameTheme::Nord,
        GameTheme::HighContrast,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            GameTheme::Arcade => "Arcade",
            GameTheme::Monokai => "Monokai",
            GameTheme::Dracula => "Dracula",
            GameTheme::Nord => "Nord",
            GameTheme::HighContrast => "High Contrast",
        }
    }

    pub fn next(&self) -> GameTheme {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> GameTheme {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(&self) -> usize {
        Self::ALL
            .iter()
            .position(|theme| theme == self)
            .unwrap_or_default()
    }

    pub fn colors(&self) -> ThemeColors {
        match self {
            // dark table, light grey paddles and a red ball
            GameTheme::Arcade => ThemeColors {
                background: Color::Rgb(30, 30, 30),
                border: Color::Rgb(200, 200, 200),
                text: Color::White,
                accent: Color::Rgb(255, 0, 0),
                player_paddle: Color::Rgb(200, 200, 200),
                ai_paddle: Color::Rgb(200, 200, 200),
                ball: Color::Rgb(255, 0, 0),
            },
            GameTheme::Monokai => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(249, 38, 114),
                text: Color::Rgb(248, 248, 242),
                accent: Color::Rgb(166, 226, 46),
                player_paddle: Color::Rgb(102, 217, 239),
                ai_paddle: Color::Rgb(230, 219, 116),
                ball: Color::Rgb(255, 95, 135),
            },
            GameTheme::Dracula => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(255, 121, 198),
                text: Color::Rgb(248, 248, 242),
                accent: Color::Rgb(189, 147, 249),
                player_paddle: Color::Rgb(80, 250, 123),
                ai_paddle: Color::Rgb(241, 250, 140),
                ball: Color::Rgb(255, 85, 85),
            },
            GameTheme::Nord => ThemeColors {
                background: Color::Reset,
                border: Color::Rgb(136, 192, 208),
                text: Color::Rgb(216, 222, 233),
                accent: Color::Rgb(143, 188, 187),
                player_paddle: Color::Rgb(94, 129, 172),
                ai_paddle: Color::Rgb(235, 203, 139),
                ball: Color::Rgb(191, 97, 106),
            },
            GameTheme::HighContrast => ThemeColors {
                background: Color::Black,
                border: Color::White,
                text: Color::White,
                accent: Color::Yellow,
                player_paddle: Color::Rgb(0, 255, 255),
                ai_paddle: Color::Rgb(0, 255, 0),
                ball: Color::Rgb(255, 0, 0),
            },
        }
    }
}
