//! Presentation styles and the layout configuration derived from them.

use serde::{Deserialize, Serialize};

use crate::config::{Color, EdgeInsets, ListConfiguration};

/// Presentation style of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ListStyle {
    #[default]
    Plain,
    Grouped,
    Inset,
    InsetGrouped,
    Sidebar,
}

/// The platform list appearance a style maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Appearance {
    Plain,
    Grouped,
    InsetGrouped,
    Sidebar,
}

impl ListStyle {
    /// The platform appearance for this style.
    ///
    /// The platform has no plain inset appearance, so `Inset` renders as
    /// `InsetGrouped`.
    pub fn appearance(self) -> Appearance {
        match self {
            Self::Plain => Appearance::Plain,
            Self::Grouped => Appearance::Grouped,
            Self::Inset | Self::InsetGrouped => Appearance::InsetGrouped,
            Self::Sidebar => Appearance::Sidebar,
        }
    }
}

/// Whether a section header or footer is provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeaderMode {
    #[default]
    None,
    Supplementary,
}

impl HeaderMode {
    fn from_presence(present: bool) -> Self {
        if present { Self::Supplementary } else { Self::None }
    }
}

/// When the on-screen keyboard is dismissed while scrolling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyboardDismissMode {
    Never,
    OnDrag,
    Interactive,
    #[default]
    OnDragWithAccessory,
}

/// Layout settings handed to the list surface.
///
/// This is the part of the list's setup that is rebuilt wholesale whenever
/// the style or configuration changes. Behavioral wiring (swipe-action
/// providers) lives outside of it and survives the rebuild.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfiguration {
    pub appearance: Appearance,
    pub header_mode: HeaderMode,
    pub footer_mode: HeaderMode,
    pub shows_separators: bool,
    pub separator_color: Option<Color>,
    pub separator_insets: Option<EdgeInsets>,
    pub header_top_padding: f32,
    pub keyboard_dismiss_mode: KeyboardDismissMode,
}

impl LayoutConfiguration {
    /// Build the layout for `style`, `configuration` and the supplementary
    /// content the list was given.
    pub fn new(
        style: ListStyle,
        configuration: &ListConfiguration,
        has_header: bool,
        has_footer: bool,
    ) -> Self {
        Self {
            appearance: style.appearance(),
            header_mode: HeaderMode::from_presence(has_header),
            footer_mode: HeaderMode::from_presence(has_footer),
            shows_separators: configuration.separator.is_visible,
            separator_color: configuration.separator.color,
            separator_insets: configuration.separator.insets,
            header_top_padding: 0.0,
            keyboard_dismiss_mode: KeyboardDismissMode::default(),
        }
    }

    /// Set the keyboard dismiss mode.
    pub fn with_keyboard_dismiss_mode(mut self, mode: KeyboardDismissMode) -> Self {
        self.keyboard_dismiss_mode = mode;
        self
    }
}

impl Default for LayoutConfiguration {
    fn default() -> Self {
        Self::new(ListStyle::default(), &ListConfiguration::default(), false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeparatorConfiguration;

    #[test]
    fn test_inset_maps_to_inset_grouped() {
        assert_eq!(ListStyle::Inset.appearance(), Appearance::InsetGrouped);
        assert_eq!(ListStyle::InsetGrouped.appearance(), Appearance::InsetGrouped);
        assert_eq!(ListStyle::default().appearance(), Appearance::Plain);
    }

    #[test]
    fn test_layout_from_configuration() {
        let config = ListConfiguration::default().with_separator(SeparatorConfiguration {
            is_visible: false,
            insets: Some(EdgeInsets::horizontal(20.0, 0.0)),
            color: Some(Color::BLACK),
        });
        let layout = LayoutConfiguration::new(ListStyle::Sidebar, &config, true, false);

        assert_eq!(layout.appearance, Appearance::Sidebar);
        assert_eq!(layout.header_mode, HeaderMode::Supplementary);
        assert_eq!(layout.footer_mode, HeaderMode::None);
        assert!(!layout.shows_separators);
        assert_eq!(layout.separator_color, Some(Color::BLACK));
        assert_eq!(layout.header_top_padding, 0.0);
        assert_eq!(layout.keyboard_dismiss_mode, KeyboardDismissMode::OnDragWithAccessory);
    }
}
