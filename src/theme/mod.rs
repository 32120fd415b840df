use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use wasm_bindgen::JsCast;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ThemeMode {
    #[default]
    Light,
    Dark,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ThemeColor {
    #[default]
    Pink,
    Blue,
    Green,
    Purple,
    Orange,
    Brown,
    Gray,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Palette {
    pub gradient: &'static str,
    pub accent: &'static str,
    pub label: &'static str,
}

impl ThemeColor {
    pub fn palette(self) -> Palette {
        match self {
            ThemeColor::Pink => Palette {
                gradient: "linear-gradient(135deg, #e8a0a0 0%, #d4878a 100%)",
                accent: "#d4878a",
                label: "Pink",
            },
            ThemeColor::Blue => Palette {
                gradient: "linear-gradient(135deg, #7ba3c9 0%, #5b8bb8 100%)",
                accent: "#5b8bb8",
                label: "Blue",
            },
            ThemeColor::Green => Palette {
                gradient: "linear-gradient(135deg, #8fbf9f 0%, #6ba37d 100%)",
                accent: "#6ba37d",
                label: "Green",
            },
            ThemeColor::Purple => Palette {
                gradient: "linear-gradient(135deg, #a893bd 0%, #8b7aa8 100%)",
                accent: "#8b7aa8",
                label: "Purple",
            },
            ThemeColor::Orange => Palette {
                gradient: "linear-gradient(135deg, #e8b87a 0%, #d4a066 100%)",
                accent: "#d4a066",
                label: "Orange",
            },
            ThemeColor::Brown => Palette {
                gradient: "linear-gradient(135deg, #a89078 0%, #8b7355 100%)",
                accent: "#8b7355",
                label: "Brown",
            },
            ThemeColor::Gray => Palette {
                gradient: "linear-gradient(135deg, #9ca3af 0%, #6b7280 100%)",
                accent: "#6b7280",
                label: "Gray",
            },
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ThemePrefs {
    pub mode: ThemeMode,
    pub color: ThemeColor,
}

impl ThemePrefs {
    /// Missing or unrecognized stored values fall back to light / pink.
    pub fn from_stored(mode: Option<&str>, color: Option<&str>) -> Self {
        Self {
            mode: mode.and_then(|m| m.parse().ok()).unwrap_or_default(),
            color: color.and_then(|c| c.parse().ok()).unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ColorSwatch {
    pub color: ThemeColor,
    pub palette: Palette,
    pub active: bool,
}

/// One swatch per palette entry, in palette order.
pub(crate) fn color_swatches(active: ThemeColor) -> Vec<ColorSwatch> {
    ThemeColor::iter()
        .map(|color| ColorSwatch {
            color,
            palette: color.palette(),
            active: color == active,
        })
        .collect()
}

/// Push the preferences into the document root: `data-theme` plus the
/// `--theme-gradient` / `--theme-color` variables the stylesheet reads.
pub(crate) fn apply_theme(prefs: ThemePrefs) {
    let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };

    let _ = root.set_attribute("data-theme", prefs.mode.as_ref());

    if let Some(el) = root.dyn_ref::<web_sys::HtmlElement>() {
        let palette = prefs.color.palette();
        let style = el.style();
        let _ = style.set_property("--theme-gradient", palette.gradient);
        let _ = style.set_property("--theme-color", palette.accent);
    }
}
