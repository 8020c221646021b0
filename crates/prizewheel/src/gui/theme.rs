use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Colors of the parts of the wheel that do not come from prizes.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeColors {
    pub ring_dark: Srgba<f64>,
    pub ring_light: Srgba<f64>,
    pub ring_border: Srgba<f64>,
    pub hub_light: Srgba<f64>,
    pub hub_dark: Srgba<f64>,
    pub pointer: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            ring_dark: Srgba::new(0.118, 0.106, 0.294, 1.0),
            ring_light: Srgba::new(0.263, 0.220, 0.792, 1.0),
            ring_border: Srgba::new(0.388, 0.400, 0.945, 1.0),
            hub_light: Srgba::new(1.0, 1.0, 1.0, 1.0),
            hub_dark: Srgba::new(0.580, 0.639, 0.722, 1.0),
            pointer: Srgba::new(0.984, 0.749, 0.141, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            ring_light: Self::lookup_color(context, "accent_bg_color", fallback.ring_light, None),
            ring_border: Self::lookup_color(context, "accent_color", fallback.ring_border, None),
            pointer: Self::lookup_color(context, "warning_color", fallback.pointer, Some(1.0)),
            ..fallback
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.wheel-window {
    background-color: #0f172a;
    color: #e2e8f0;
}
.wheel-drawing-area {
    background: none;
}
.wheel-winner {
    font-size: 20pt;
    font-weight: 800;
}
.wheel-history {
    font-size: 9pt;
    opacity: 0.7;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
