//! Window placement
//!
//! Maps one of five anchor locations to the window's top-left corner, given
//! the screen size and the window's own measured size.

use crate::geometry::{Dimensions, Position};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Anchor location of the overlay, persisted as its kebab-case tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Location {
    pub const ALL: [Location; 5] = [
        Location::TopLeft,
        Location::TopRight,
        Location::BottomLeft,
        Location::BottomRight,
        Location::Center,
    ];

    /// Tag used in config.toml
    pub fn tag(self) -> &'static str {
        match self {
            Location::TopLeft => "top-left",
            Location::TopRight => "top-right",
            Location::BottomLeft => "bottom-left",
            Location::BottomRight => "bottom-right",
            Location::Center => "center",
        }
    }

    /// Tray menu label
    pub fn label(self) -> &'static str {
        match self {
            Location::TopLeft => "左上",
            Location::TopRight => "右上",
            Location::BottomLeft => "左下",
            Location::BottomRight => "右下",
            Location::Center => "居中",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Location {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|loc| loc.tag() == s)
            .ok_or_else(|| format!("Unknown location: {}", s))
    }
}

/// Top-left corner for a window of `window` size anchored at `location`
pub fn origin_for(location: Location, screen: Dimensions, window: Dimensions) -> Position {
    let free_x = screen.width as i32 - window.width as i32;
    let free_y = screen.height as i32 - window.height as i32;

    match location {
        Location::TopLeft => Position::ORIGIN,
        Location::TopRight => Position::new(free_x, 0),
        Location::BottomLeft => Position::new(0, free_y),
        Location::BottomRight => Position::new(free_x, free_y),
        Location::Center => Position::new(free_x / 2, free_y / 2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Dimensions = Dimensions { width: 1920, height: 1080 };
    const WINDOW: Dimensions = Dimensions { width: 200, height: 60 };

    #[test]
    fn test_corner_origins() {
        assert_eq!(origin_for(Location::TopLeft, SCREEN, WINDOW), Position::new(0, 0));
        assert_eq!(origin_for(Location::TopRight, SCREEN, WINDOW), Position::new(1720, 0));
        assert_eq!(origin_for(Location::BottomLeft, SCREEN, WINDOW), Position::new(0, 1020));
        assert_eq!(
            origin_for(Location::BottomRight, SCREEN, WINDOW),
            Position::new(1720, 1020)
        );
    }

    #[test]
    fn test_center_origin() {
        assert_eq!(origin_for(Location::Center, SCREEN, WINDOW), Position::new(860, 510));
    }

    #[test]
    fn test_window_larger_than_screen() {
        let huge = Dimensions::new(2000, 1200);
        assert_eq!(origin_for(Location::BottomRight, SCREEN, huge), Position::new(-80, -120));
    }

    #[test]
    fn test_tag_round_trip() {
        for loc in Location::ALL {
            assert_eq!(loc.tag().parse::<Location>(), Ok(loc));
        }
        assert!("middle".parse::<Location>().is_err());
    }
}
