//! Color handling for HyperColl diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, providing convenience methods for working with colors
//! in HyperColl: CSS parsing for configuration files, RGB triples for palettes,
//! and hex/opacity pairs for SVG output.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{AlphaColor, DynamicColor, Srgb};
use serde::Deserialize;

/// Wrapper around the `DynamicColor` type from the color crate
/// This provides convenience methods for working with colors in HyperColl
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
#[serde(try_from = "ColorValue")]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use hypercoll_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates an opaque sRGB color from components in `0.0..=1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hypercoll_core::color::Color;
    ///
    /// let navy = Color::from_rgb(0.0392157, 0.101961, 0.27451);
    /// assert_eq!(navy.to_hex(), "#0a1a46");
    /// ```
    pub fn from_rgb(red: f32, green: f32, blue: f32) -> Self {
        let srgb = AlphaColor::<Srgb>::new([red, green, blue, 1.0]);
        Self {
            color: DynamicColor::from_alpha_color(srgb),
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Arguments
    ///
    /// * `alpha` - The alpha value to set, typically between 0.0 (fully transparent)
    ///   and 1.0 (fully opaque)
    ///
    /// # Examples
    ///
    /// ```
    /// use hypercoll_core::color::Color;
    ///
    /// let red = Color::new("red").unwrap();
    /// let semi_transparent_red = red.with_alpha(0.5);
    /// assert_eq!(semi_transparent_red.alpha(), 0.5);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    ///
    /// The value lies between 0.0 (fully transparent) and 1.0 (fully opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Returns the color as a `#rrggbb` string, ignoring alpha.
    ///
    /// SVG paint attributes take the opacity separately, so the alpha channel
    /// is reported through [`Color::alpha`] instead.
    pub fn to_hex(&self) -> String {
        let rgba = self.color.to_alpha_color::<Srgb>().to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::from_rgb(0.0, 0.0, 0.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

/// Serialized forms of a [`Color`]: a CSS string or an `[r, g, b]` triple in
/// `0..=1`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorValue {
    Css(String),
    Rgb([f32; 3]),
}

impl TryFrom<ColorValue> for Color {
    type Error = String;

    fn try_from(value: ColorValue) -> Result<Self, Self::Error> {
        match value {
            ColorValue::Css(css) => Self::new(&css),
            ColorValue::Rgb([red, green, blue]) => {
                if [red, green, blue].iter().all(|c| (0.0..=1.0).contains(c)) {
                    Ok(Self::from_rgb(red, green, blue))
                } else {
                    Err(format!(
                        "RGB components must be within 0..=1, got [{red}, {green}, {blue}]"
                    ))
                }
            }
        }
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        let red = Color::new("#ff0000");
        assert!(red.is_ok());

        let invalid = Color::new("not-a-color");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_color_default() {
        let color = Color::default();
        assert_eq!(color.to_hex(), "#000000");
    }

    #[test]
    fn test_color_with_alpha() {
        let color = Color::new("red").unwrap();
        let transparent = color.with_alpha(0.5);
        assert!((transparent.alpha() - 0.5).abs() < 0.001);
        assert_eq!(transparent.to_hex(), "#ff0000");
    }

    #[test]
    fn test_color_from_rgb_is_opaque() {
        let color = Color::from_rgb(1.0, 0.75, 0.0);
        assert!((color.alpha() - 1.0).abs() < f32::EPSILON);
        assert_eq!(color.to_hex(), "#ffbf00");
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let color1 = Color::new("red").unwrap();
        let color2 = Color::new("red").unwrap();
        let color3 = Color::new("blue").unwrap();

        assert_eq!(color1, color2);
        assert_ne!(color1, color3);

        let mut set = HashSet::new();
        set.insert(color1);
        assert!(set.contains(&color2));
        assert!(!set.contains(&color3));
    }

    #[test]
    fn test_color_from_rgb_triple() {
        let color = Color::try_from(ColorValue::Rgb([1.0, 0.75, 0.0])).unwrap();
        assert_eq!(color.to_hex(), "#ffbf00");

        assert!(Color::try_from(ColorValue::Rgb([1.5, 0.0, 0.0])).is_err());
        assert!(Color::try_from(ColorValue::Css("navy".to_string())).is_ok());
    }

    #[test]
    fn test_color_try_from_string() {
        assert!(Color::try_from("white".to_string()).is_ok());
        assert!(Color::try_from("nope".to_string()).is_err());
    }
}
