//! Light/dark colour scheme: the persisted toggle state, the CSS hook on the
//! document element, and the strand palette the helix backdrop paints with.

use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Value mirrored into the `data-theme` attribute for the stylesheet.
    pub fn attr(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Toggle button glyph: shows the scheme you would switch to.
    pub fn glyph(self) -> &'static str {
        match self {
            Theme::Light => "\u{1F319}",
            Theme::Dark => "\u{2600}\u{FE0F}",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn css_rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

/// Strand colours for the helix backdrop; one per strand so the two
/// spirals read as distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
}

/// Pale tints on light, muted blues and purples on dark. The alpha applied
/// at draw time keeps both nearly transparent.
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            primary: Rgb { r: 230, g: 240, b: 250 },
            secondary: Rgb { r: 240, g: 235, b: 250 },
        },
        Theme::Dark => Palette {
            primary: Rgb { r: 60, g: 80, b: 120 },
            secondary: Rgb { r: 80, g: 60, b: 120 },
        },
    }
}

/// Read the persisted choice; missing or unreadable storage falls back to
/// light.
pub fn load() -> Theme {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(STORAGE_KEY) {
                if let Ok(theme) = serde_json::from_str(&raw) {
                    return theme;
                }
            }
        }
    }
    Theme::default()
}

pub fn persist(theme: Theme) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(raw) = serde_json::to_string(&theme) {
                let _ = store.set_item(STORAGE_KEY, &raw);
            }
        }
    }
}

/// Set `data-theme` on `<html>` so the stylesheet variables follow.
pub fn apply_to_document(theme: Theme) {
    if let Some(root) = web_sys::window()
        .and_then(|win| win.document())
        .and_then(|doc| doc.document_element())
    {
        let _ = root.set_attribute("data-theme", theme.attr());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_flips_between_the_two_schemes() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn themes_round_trip_through_their_storage_form() {
        for theme in [Theme::Light, Theme::Dark] {
            let raw = serde_json::to_string(&theme).unwrap();
            assert_eq!(serde_json::from_str::<Theme>(&raw).unwrap(), theme);
        }
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        assert!(serde_json::from_str::<Theme>("\"solarized\"").is_err());
    }

    #[test]
    fn palettes_match_the_scheme() {
        let light = palette(Theme::Light);
        assert_eq!(light.primary, Rgb { r: 230, g: 240, b: 250 });
        assert_eq!(light.secondary, Rgb { r: 240, g: 235, b: 250 });

        let dark = palette(Theme::Dark);
        assert_eq!(dark.primary, Rgb { r: 60, g: 80, b: 120 });
        assert_eq!(dark.secondary, Rgb { r: 80, g: 60, b: 120 });
    }

    #[test]
    fn rgba_strings_use_the_css_functional_form() {
        let c = Rgb { r: 60, g: 80, b: 120 };
        assert_eq!(c.css_rgba(0.23), "rgba(60, 80, 120, 0.23)");
        assert_eq!(c.css_rgba(0.0), "rgba(60, 80, 120, 0)");
    }
}
