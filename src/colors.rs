use crate::barnsley::FernCategory;
use crate::sierpinski::TriangleTint;
use crossterm::event::KeyCode;
use crossterm::style::Color;

/// Scheme 0 keeps each fractal's own palette
pub const CLASSIC: u8 = 0;
pub const MONO: u8 = 7;

/// What a painted primitive stands for, independent of the active scheme
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Swatch {
    Triangle(TriangleTint),
    Fern(FernCategory),
    Curve,
}

impl Swatch {
    /// Intensity (0-3) used by the themed schemes
    fn intensity(self) -> u8 {
        match self {
            Swatch::Triangle(TriangleTint::Red) => 3,
            Swatch::Triangle(TriangleTint::Yellow) => 2,
            Swatch::Triangle(TriangleTint::Blue) => 1,
            Swatch::Fern(FernCategory::Stem) => 2,
            Swatch::Fern(FernCategory::Base) => 0,
            Swatch::Fern(FernCategory::LeftLeaflet) => 3,
            Swatch::Fern(FernCategory::RightLeaflet) => 1,
            Swatch::Curve => 3,
        }
    }

    fn classic(self) -> Color {
        match self {
            Swatch::Triangle(TriangleTint::Red) | Swatch::Fern(FernCategory::Base) => Color::Red,
            Swatch::Triangle(TriangleTint::Yellow) | Swatch::Fern(FernCategory::LeftLeaflet) => {
                Color::Yellow
            }
            Swatch::Triangle(TriangleTint::Blue) | Swatch::Fern(FernCategory::RightLeaflet) => {
                Color::Blue
            }
            Swatch::Fern(FernCategory::Stem) => Color::Green,
            Swatch::Curve => Color::Cyan,
        }
    }
}

/// Shared color scheme state
#[derive(Clone, Copy)]
pub struct ColorState {
    pub scheme: u8,
}

impl ColorState {
    pub fn new(default_scheme: u8) -> Self {
        Self { scheme: default_scheme.min(9) }
    }

    /// Handle color scheme key input. Returns true if key was handled.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('!') => self.scheme = 1,  // Shift+1: fire
            KeyCode::Char('@') => self.scheme = 2,  // Shift+2: ice
            KeyCode::Char('#') => self.scheme = 3,  // Shift+3: pink
            KeyCode::Char('$') => self.scheme = 4,  // Shift+4: gold
            KeyCode::Char('%') => self.scheme = 5,  // Shift+5: electric
            KeyCode::Char('^') => self.scheme = 6,  // Shift+6: lava
            KeyCode::Char('&') => self.scheme = 7,  // Shift+7: mono
            KeyCode::Char('*') => self.scheme = 8,  // Shift+8: rainbow
            KeyCode::Char('(') => self.scheme = 9,  // Shift+9: neon
            KeyCode::Char(')') => self.scheme = 0,  // Shift+0: classic
            _ => return false,
        }
        true
    }

    pub fn color(&self, swatch: Swatch) -> Color {
        swatch_color(self.scheme, swatch)
    }
}

/// Resolve a swatch to a terminal color under `scheme`
pub fn swatch_color(scheme: u8, swatch: Swatch) -> Color {
    if scheme == CLASSIC {
        swatch.classic()
    } else {
        scheme_color(scheme, swatch.intensity())
    }
}

/// Get color from scheme based on intensity (0-3)
pub fn scheme_color(scheme: u8, intensity: u8) -> Color {
    match scheme {
        1 => match intensity {  // Red/Yellow (fire)
            0 => Color::DarkRed,
            1 => Color::Red,
            2 => Color::DarkYellow,
            _ => Color::Yellow,
        },
        2 => match intensity {  // Blue/Cyan (ice)
            0 => Color::DarkBlue,
            1 => Color::Blue,
            2 => Color::DarkCyan,
            _ => Color::Cyan,
        },
        3 => match intensity {  // Magenta/Pink (pink)
            0 => Color::DarkMagenta,
            1 => Color::Magenta,
            2 => Color::AnsiValue(13),
            _ => Color::White,
        },
        4 => match intensity {  // Yellow/Gold (gold)
            0 => Color::DarkYellow,
            1 => Color::Yellow,
            2 => Color::AnsiValue(11),
            _ => Color::White,
        },
        5 => match intensity {  // Cyan/Electric (electric)
            0 => Color::DarkCyan,
            1 => Color::Cyan,
            2 => Color::AnsiValue(14),
            _ => Color::White,
        },
        6 => match intensity {  // Red/Magenta (lava)
            0 => Color::DarkRed,
            1 => Color::Red,
            2 => Color::Magenta,
            _ => Color::AnsiValue(9),
        },
        MONO => match intensity {  // White/Grey (mono)
            0 => Color::DarkGrey,
            1 => Color::Grey,
            _ => Color::White,
        },
        8 => match intensity {  // Rainbow
            0 => Color::Red,
            1 => Color::Yellow,
            2 => Color::Green,
            _ => Color::Cyan,
        },
        9 => match intensity {  // Blue/Magenta (neon)
            0 => Color::DarkBlue,
            1 => Color::Blue,
            2 => Color::Magenta,
            _ => Color::AnsiValue(13),
        },
        _ => match intensity {  // Green (matrix)
            0 => Color::DarkGreen,
            1 => Color::Green,
            2 => Color::AnsiValue(10),
            _ => Color::White,
        },
    }
}
