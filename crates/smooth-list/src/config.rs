//! List appearance and animation configuration.
//!
//! [`ListConfiguration`] groups separator, edit affordance and animation
//! settings. Every type here is `serde`-serializable with defaults for
//! missing fields, so a host can keep list appearance in a TOML theme:
//!
//! ```
//! use smooth_list::config::{ListConfiguration, RowAnimation};
//!
//! let config = ListConfiguration::from_toml_str(r##"
//!     [separator]
//!     is_visible = false
//!
//!     [edit]
//!     delete_button_background_color = "#ff3b30"
//!
//!     [animation]
//!     insert_rows = "fade"
//! "##).unwrap();
//!
//! assert!(!config.separator.is_visible);
//! assert_eq!(config.animation.insert_rows, RowAnimation::Fade);
//! assert_eq!(config.animation.delete_rows, RowAnimation::Automatic);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An 8-bit RGBA color, serialized as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::from_rgb8(255, 255, 255);
    pub const BLACK: Color = Color::from_rgb8(0, 0, 0);
    /// The platform's destructive red.
    pub const SYSTEM_RED: Color = Color::from_rgb8(255, 59, 48);

    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from 8-bit RGB components.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();

        if (len != 6 && len != 8) || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color `{value}`"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Insets along the four edges of a row, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub top: f32,
    pub leading: f32,
    pub bottom: f32,
    pub trailing: f32,
}

impl EdgeInsets {
    pub const ZERO: EdgeInsets = EdgeInsets::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(top: f32, leading: f32, bottom: f32, trailing: f32) -> Self {
        Self {
            top,
            leading,
            bottom,
            trailing,
        }
    }

    /// Insets applied only on the horizontal edges.
    pub const fn horizontal(leading: f32, trailing: f32) -> Self {
        Self::new(0.0, leading, 0.0, trailing)
    }
}

/// Row separator presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparatorConfiguration {
    /// Whether separators are drawn between rows.
    pub is_visible: bool,
    /// Separator insets; `None` keeps the platform default.
    pub insets: Option<EdgeInsets>,
    /// Separator color; `None` keeps the platform default.
    pub color: Option<Color>,
}

impl Default for SeparatorConfiguration {
    fn default() -> Self {
        Self {
            is_visible: true,
            insets: None,
            color: None,
        }
    }
}

/// Styling of the swipe-to-delete action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfiguration {
    /// Background of the delete button; `None` uses the destructive default.
    pub delete_button_background_color: Option<Color>,
    /// Name of an image shown on the delete button.
    pub delete_button_image: Option<String>,
    /// Title of the delete button.
    pub delete_button_title: String,
}

impl Default for EditConfiguration {
    fn default() -> Self {
        Self {
            delete_button_background_color: None,
            delete_button_image: None,
            delete_button_title: "Delete".to_string(),
        }
    }
}

/// Animation style of a structural row or section operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowAnimation {
    Fade,
    SlideLeft,
    SlideRight,
    SlideTop,
    SlideBottom,
    /// No animation; the change appears immediately.
    None,
    /// Let the platform pick an appropriate style.
    #[default]
    Automatic,
}

/// Animation per operation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfiguration {
    pub insert_section: RowAnimation,
    pub delete_section: RowAnimation,
    pub insert_rows: RowAnimation,
    pub delete_rows: RowAnimation,
    pub update_rows: RowAnimation,
    pub move_rows: RowAnimation,
}

impl AnimationConfiguration {
    /// The same animation for every category.
    pub const fn uniform(animation: RowAnimation) -> Self {
        Self {
            insert_section: animation,
            delete_section: animation,
            insert_rows: animation,
            delete_rows: animation,
            update_rows: animation,
            move_rows: animation,
        }
    }
}

/// Separator, edit affordance and animation settings of a list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfiguration {
    pub separator: SeparatorConfiguration,
    pub edit: EditConfiguration,
    pub animation: AnimationConfiguration,
}

impl ListConfiguration {
    /// Parse a configuration from a TOML document.
    ///
    /// Missing tables and fields take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Set the separator configuration.
    pub fn with_separator(mut self, separator: SeparatorConfiguration) -> Self {
        self.separator = separator;
        self
    }

    /// Set the edit configuration.
    pub fn with_edit(mut self, edit: EditConfiguration) -> Self {
        self.edit = edit;
        self
    }

    /// Set the animation configuration.
    pub fn with_animation(mut self, animation: AnimationConfiguration) -> Self {
        self.animation = animation;
        self
    }
}
