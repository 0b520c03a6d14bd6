use ratatui::style::Color;

/// Colors used by the carousel widgets
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey1: Color,
    pub grey2: Color,
    pub accent: Color,
    pub warning: Color,

    /// Panel backgrounds, cycled by slide index
    pub slides: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
            slides: vec![
                Color::Rgb(0x45, 0x5a, 0x4f),
                Color::Rgb(0x4f, 0x42, 0x5a),
                Color::Rgb(0x5a, 0x4c, 0x3a),
                Color::Rgb(0x3a, 0x4c, 0x5a),
                Color::Rgb(0x5a, 0x3a, 0x3d),
            ],
        }
    }
}

impl Theme {
    /// Background of the panel showing slide `index`
    pub fn slide_color(&self, index: usize) -> Color {
        if self.slides.is_empty() {
            self.bg2
        } else {
            self.slides[index % self.slides.len()]
        }
    }
}
