use serde::Serialize;

/// Character that introduces a legacy formatting code.
pub const SECTION_SIGN: char = '§';

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ColorCode {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Obfuscated,
    Bold,
    Strikethrough,
    Underline,
    Italic,
    Reset,
}

impl ColorCode {
    pub fn parse(code: char) -> Option<ColorCode> {
        Some(match code.to_ascii_lowercase() {
            '0' => ColorCode::Black,
            '1' => ColorCode::DarkBlue,
            '2' => ColorCode::DarkGreen,
            '3' => ColorCode::DarkAqua,
            '4' => ColorCode::DarkRed,
            '5' => ColorCode::DarkPurple,
            '6' => ColorCode::Gold,
            '7' => ColorCode::Gray,
            '8' => ColorCode::DarkGray,
            '9' => ColorCode::Blue,
            'a' => ColorCode::Green,
            'b' => ColorCode::Aqua,
            'c' => ColorCode::Red,
            'd' => ColorCode::LightPurple,
            'e' => ColorCode::Yellow,
            'f' => ColorCode::White,
            'k' => ColorCode::Obfuscated,
            'l' => ColorCode::Bold,
            'm' => ColorCode::Strikethrough,
            'n' => ColorCode::Underline,
            'o' => ColorCode::Italic,
            'r' => ColorCode::Reset,
            _ => return None,
        })
    }

    pub fn code(self) -> char {
        match self {
            ColorCode::Black => '0',
            ColorCode::DarkBlue => '1',
            ColorCode::DarkGreen => '2',
            ColorCode::DarkAqua => '3',
            ColorCode::DarkRed => '4',
            ColorCode::DarkPurple => '5',
            ColorCode::Gold => '6',
            ColorCode::Gray => '7',
            ColorCode::DarkGray => '8',
            ColorCode::Blue => '9',
            ColorCode::Green => 'a',
            ColorCode::Aqua => 'b',
            ColorCode::Red => 'c',
            ColorCode::LightPurple => 'd',
            ColorCode::Yellow => 'e',
            ColorCode::White => 'f',
            ColorCode::Obfuscated => 'k',
            ColorCode::Bold => 'l',
            ColorCode::Strikethrough => 'm',
            ColorCode::Underline => 'n',
            ColorCode::Italic => 'o',
            ColorCode::Reset => 'r',
        }
    }

    pub fn is_formatting(self) -> bool {
        use ColorCode::*;
        matches!(
            self,
            Obfuscated | Bold | Strikethrough | Underline | Italic | Reset
        )
    }
}

/// A chat color as used by the message model.
///
/// The sixteen named colors map onto legacy color codes, anything else is
/// carried as an explicit RGB triple.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    #[default]
    White,
    Rgb(u8, u8, u8),
}

impl MessageColor {
    /// The named color of a legacy color code, `None` for formatting codes.
    pub fn from_code(code: ColorCode) -> Option<MessageColor> {
        Some(match code {
            ColorCode::Black => MessageColor::Black,
            ColorCode::DarkBlue => MessageColor::DarkBlue,
            ColorCode::DarkGreen => MessageColor::DarkGreen,
            ColorCode::DarkAqua => MessageColor::DarkAqua,
            ColorCode::DarkRed => MessageColor::DarkRed,
            ColorCode::DarkPurple => MessageColor::DarkPurple,
            ColorCode::Gold => MessageColor::Gold,
            ColorCode::Gray => MessageColor::Gray,
            ColorCode::DarkGray => MessageColor::DarkGray,
            ColorCode::Blue => MessageColor::Blue,
            ColorCode::Green => MessageColor::Green,
            ColorCode::Aqua => MessageColor::Aqua,
            ColorCode::Red => MessageColor::Red,
            ColorCode::LightPurple => MessageColor::LightPurple,
            ColorCode::Yellow => MessageColor::Yellow,
            ColorCode::White => MessageColor::White,
            _ => return None,
        })
    }

    /// The legacy color code, `None` for custom RGB colors.
    pub fn color_code(self) -> Option<ColorCode> {
        Some(match self {
            MessageColor::Black => ColorCode::Black,
            MessageColor::DarkBlue => ColorCode::DarkBlue,
            MessageColor::DarkGreen => ColorCode::DarkGreen,
            MessageColor::DarkAqua => ColorCode::DarkAqua,
            MessageColor::DarkRed => ColorCode::DarkRed,
            MessageColor::DarkPurple => ColorCode::DarkPurple,
            MessageColor::Gold => ColorCode::Gold,
            MessageColor::Gray => ColorCode::Gray,
            MessageColor::DarkGray => ColorCode::DarkGray,
            MessageColor::Blue => ColorCode::Blue,
            MessageColor::Green => ColorCode::Green,
            MessageColor::Aqua => ColorCode::Aqua,
            MessageColor::Red => ColorCode::Red,
            MessageColor::LightPurple => ColorCode::LightPurple,
            MessageColor::Yellow => ColorCode::Yellow,
            MessageColor::White => ColorCode::White,
            MessageColor::Rgb(..) => return None,
        })
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            MessageColor::Black => (0, 0, 0),
            MessageColor::DarkBlue => (0, 0, 170),
            MessageColor::DarkGreen => (0, 170, 0),
            MessageColor::DarkAqua => (0, 170, 170),
            MessageColor::DarkRed => (170, 0, 0),
            MessageColor::DarkPurple => (170, 0, 170),
            MessageColor::Gold => (255, 170, 0),
            MessageColor::Gray => (170, 170, 170),
            MessageColor::DarkGray => (85, 85, 85),
            MessageColor::Blue => (85, 85, 255),
            MessageColor::Green => (85, 255, 85),
            MessageColor::Aqua => (85, 255, 255),
            MessageColor::Red => (255, 85, 85),
            MessageColor::LightPurple => (255, 85, 255),
            MessageColor::Yellow => (255, 255, 85),
            MessageColor::White => (255, 255, 255),
            MessageColor::Rgb(r, g, b) => (r, g, b),
        }
    }

    /// Legacy formatting sequence selecting this color. RGB colors use the
    /// `§#rrggbb` form.
    pub fn legacy(self) -> String {
        match self.color_code() {
            Some(code) => format!("{}{}", SECTION_SIGN, code.code()),
            None => {
                let (r, g, b) = self.rgb();
                format!("{}#{:02x}{:02x}{:02x}", SECTION_SIGN, r, g, b)
            }
        }
    }
}
