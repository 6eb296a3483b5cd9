/// Font color palette
///
/// Nine fixed colors, persisted by tag. Black is the palette default.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontColor {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
    White,
    Pink,
    #[default]
    Black,
}

impl FontColor {
    pub const ALL: [FontColor; 9] = [
        FontColor::Red,
        FontColor::Green,
        FontColor::Blue,
        FontColor::Yellow,
        FontColor::Purple,
        FontColor::Orange,
        FontColor::White,
        FontColor::Pink,
        FontColor::Black,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            FontColor::Red => "red",
            FontColor::Green => "green",
            FontColor::Blue => "blue",
            FontColor::Yellow => "yellow",
            FontColor::Purple => "purple",
            FontColor::Orange => "orange",
            FontColor::White => "white",
            FontColor::Pink => "pink",
            FontColor::Black => "black",
        }
    }

    /// Tray menu label
    pub fn label(self) -> &'static str {
        match self {
            FontColor::Red => "红色",
            FontColor::Green => "绿色",
            FontColor::Blue => "蓝色",
            FontColor::Yellow => "黄色",
            FontColor::Purple => "紫色",
            FontColor::Orange => "橙色",
            FontColor::White => "白色",
            FontColor::Pink => "粉色",
            FontColor::Black => "黑色",
        }
    }

    /// Display color as 8-bit RGB
    pub fn rgb(self) -> [u8; 3] {
        match self {
            FontColor::Red => [0xFF, 0x00, 0x00],
            FontColor::Green => [0x00, 0x80, 0x00],
            FontColor::Blue => [0x00, 0x00, 0xFF],
            FontColor::Yellow => [0xFF, 0xFF, 0x00],
            FontColor::Purple => [0x80, 0x00, 0x80],
            FontColor::Orange => [0xFF, 0xA5, 0x00],
            FontColor::White => [0xFF, 0xFF, 0xFF],
            FontColor::Pink => [0xFF, 0xC0, 0xCB],
            FontColor::Black => [0x00, 0x00, 0x00],
        }
    }
}

impl fmt::Display for FontColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FontColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontColor::ALL
            .into_iter()
            .find(|c| c.tag() == s)
            .ok_or_else(|| format!("Unknown font color: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_black() {
        assert_eq!(FontColor::default(), FontColor::Black);
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!("purple".parse::<FontColor>(), Ok(FontColor::Purple));
        assert!("magenta".parse::<FontColor>().is_err());
        assert!("Red".parse::<FontColor>().is_err());
    }
}
