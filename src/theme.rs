use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::Deserialize;

use crate::error::{Error, Result};

/// The colours the scanner overlay takes from the app theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeTokens {
    pub surface: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub text_link: Color,
    pub button_primary: Color,
}

impl ThemeTokens {
    pub fn light() -> Self {
        Self {
            surface: Color::from_rgb8(255, 255, 255),
            text: Color::from_rgb8(0, 0, 0),
            text_secondary: Color::from_rgb8(102, 102, 102),
            text_link: Color::from_rgb8(43, 172, 204),
            button_primary: Color::from_rgb8(0, 0, 0),
        }
    }

    pub fn dark() -> Self {
        Self {
            surface: Color::from_rgb8(33, 33, 35),
            text: Color::from_rgb8(255, 255, 255),
            text_secondary: Color::from_rgb8(142, 142, 147),
            text_link: Color::from_rgb8(43, 172, 204),
            button_primary: Color::from_rgb8(255, 255, 255),
        }
    }

    pub fn preset(preset: ThemePreset) -> Self {
        match preset {
            ThemePreset::Light => Self::light(),
            ThemePreset::Dark => Self::dark(),
        }
    }
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self::light()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Light,
    Dark,
}

/// Token overrides as CSS colour strings, e.g. `"#2baccc"` or `"rgb(0 0 0)"`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeOverrides {
    pub surface: Option<String>,
    pub text: Option<String>,
    pub text_secondary: Option<String>,
    pub text_link: Option<String>,
    pub button_primary: Option<String>,
}

impl ThemeOverrides {
    pub fn apply(&self, mut tokens: ThemeTokens) -> Result<ThemeTokens> {
        let slots = [
            (&self.surface, &mut tokens.surface),
            (&self.text, &mut tokens.text),
            (&self.text_secondary, &mut tokens.text_secondary),
            (&self.text_link, &mut tokens.text_link),
            (&self.button_primary, &mut tokens.button_primary),
        ];
        for (value, slot) in slots {
            if let Some(value) = value {
                *slot = parse_token(value)?;
            }
        }
        Ok(tokens)
    }
}

pub fn parse_token(value: &str) -> Result<Color> {
    parse_color(value)
        .map(|color| color.to_alpha_color::<Srgb>())
        .map_err(|err| Error::InvalidColor {
            value: value.to_string(),
            reason: err.to_string(),
        })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    SemiBold,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TextAlign {
    Start,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: f64,
    pub weight: FontWeight,
    pub color: Color,
    pub align: TextAlign,
    pub padding: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerStyle {
    pub width: f64,
    pub max_width_pct: f64,
    pub border_radius: f64,
    pub background: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStyle {
    pub size: f64,
    pub border: f64,
    pub border_radius: f64,
    pub border_color: Color,
}

/// Resolved style attributes of every part of the scanner overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlayStyle {
    pub container: ContainerStyle,
    pub header_padding: f64,
    pub title: TextStyle,
    pub close_button_padding: f64,
    pub close_text: TextStyle,
    /// Width over height of the camera area.
    pub camera_aspect_ratio: f64,
    pub scan_frame: FrameStyle,
    pub instructions: TextStyle,
}

pub fn overlay_style(tokens: &ThemeTokens) -> OverlayStyle {
    OverlayStyle {
        container: ContainerStyle {
            width: 400.0,
            max_width_pct: 90.0,
            border_radius: 16.0,
            background: tokens.surface,
        },
        header_padding: 16.0,
        title: TextStyle {
            font_size: 18.0,
            weight: FontWeight::SemiBold,
            color: tokens.text,
            align: TextAlign::Start,
            padding: 0.0,
        },
        close_button_padding: 8.0,
        close_text: TextStyle {
            font_size: 16.0,
            weight: FontWeight::SemiBold,
            color: tokens.text_link,
            align: TextAlign::Start,
            padding: 0.0,
        },
        camera_aspect_ratio: 1.0,
        scan_frame: FrameStyle {
            size: 200.0,
            border: 2.0,
            border_radius: 16.0,
            border_color: tokens.button_primary,
        },
        instructions: TextStyle {
            font_size: 14.0,
            weight: FontWeight::Regular,
            color: tokens.text_secondary,
            align: TextAlign::Center,
            padding: 16.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use peniko::Color;

    use super::*;

    #[test]
    fn style_follows_tokens() {
        let dark = ThemeTokens::dark();
        let style = overlay_style(&dark);
        assert_eq!(style.container.background, dark.surface);
        assert_eq!(style.title.color, dark.text);
        assert_eq!(style.close_text.color, dark.text_link);
        assert_eq!(style.scan_frame.border_color, dark.button_primary);
        assert_eq!(style.instructions.color, dark.text_secondary);
    }

    #[test]
    fn geometry() {
        let style = overlay_style(&ThemeTokens::default());
        assert_eq!(style.container.width, 400.0);
        assert_eq!(style.container.max_width_pct, 90.0);
        assert_eq!(style.scan_frame.size, 200.0);
        assert_eq!(style.title.weight, FontWeight::SemiBold);
        assert_eq!(style.instructions.align, TextAlign::Center);
    }

    #[test]
    fn overrides_replace_only_given_tokens() {
        let overrides = ThemeOverrides {
            text_link: Some("#ff0000".to_string()),
            ..Default::default()
        };
        let tokens = overrides.apply(ThemeTokens::light()).unwrap();
        let red = Color::from_rgb8(255, 0, 0);
        assert_eq!(tokens.text_link.to_rgba8(), red.to_rgba8());
        assert_eq!(tokens.surface, ThemeTokens::light().surface);
    }

    #[test]
    fn bad_color_is_reported() {
        let err = parse_token("not-a-colour").unwrap_err();
        assert!(matches!(err, Error::InvalidColor { ref value, .. } if value == "not-a-colour"));
    }
}
