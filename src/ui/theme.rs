use ratatui::style::Color;

use crate::gauge::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSupport {
    Auto,
    Truecolor,
    Color256,
    Mono,
}

impl ColorSupport {
    pub fn from_config_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "truecolor" | "24bit" => ColorSupport::Truecolor,
            "256" | "256color" => ColorSupport::Color256,
            "mono" | "monochrome" => ColorSupport::Mono,
            _ => ColorSupport::Auto,
        }
    }
}

pub fn detect_color_support() -> ColorSupport {
    let colorterm = std::env::var("COLORTERM")
        .unwrap_or_default()
        .to_lowercase();
    if colorterm.contains("truecolor") || colorterm.contains("24bit") {
        return ColorSupport::Truecolor;
    }
    ColorSupport::Color256
}

pub fn resolve_color_support(config: &str) -> ColorSupport {
    let parsed = ColorSupport::from_config_str(config);
    if parsed == ColorSupport::Auto {
        detect_color_support()
    } else {
        parsed
    }
}

/// Palette for every surface of the monitor window.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    pub window_bg: Color,
    pub panel_bg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub tab_active_fg: Color,
    pub disk_value: Color,
    pub table_header_bg: Color,
    pub table_header_fg: Color,
    pub row_highlight_bg: Color,
    pub slider_filled: Color,
    pub slider_unfilled: Color,
    pub menu_bg: Color,
    pub menu_disabled: Color,
    pub status_ok: Color,
    pub status_err: Color,
    pub statusbar_bg: Color,
    pub pill_key_bg: Color,
    pub pill_key_fg: Color,
    pub pill_desc_fg: Color,
    pub surface_bg: Color,
    support: ColorSupport,
}

impl Theme {
    pub fn from_config(theme_name: &str, support: ColorSupport) -> Self {
        let mut theme = if support == ColorSupport::Mono {
            Self::mono()
        } else {
            match theme_name.to_lowercase().as_str() {
                "nord" => Self::nord(),
                _ => Self::midnight(),
            }
        };
        theme.apply_color_support(support);
        theme
    }

    pub fn next(&self) -> Self {
        if self.support == ColorSupport::Mono {
            return Theme::from_config("mono", self.support);
        }
        let next_name = match self.name {
            "midnight" => "nord",
            _ => "midnight",
        };
        Theme::from_config(next_name, self.support)
    }

    /// Maps a gauge color onto what the terminal can show.
    pub fn gauge_color(&self, rgb: Rgb) -> Color {
        adapt_color(Color::Rgb(rgb.r, rgb.g, rgb.b), self.support)
    }

    fn apply_color_support(&mut self, support: ColorSupport) {
        let map = |c: Color| adapt_color(c, support);

        self.support = support;
        self.window_bg = map(self.window_bg);
        self.panel_bg = map(self.panel_bg);
        self.header_bg = map(self.header_bg);
        self.border = map(self.border);
        self.text_primary = map(self.text_primary);
        self.text_secondary = map(self.text_secondary);
        self.accent = map(self.accent);
        self.tab_active_fg = map(self.tab_active_fg);
        self.disk_value = map(self.disk_value);
        self.table_header_bg = map(self.table_header_bg);
        self.table_header_fg = map(self.table_header_fg);
        self.row_highlight_bg = map(self.row_highlight_bg);
        self.slider_filled = map(self.slider_filled);
        self.slider_unfilled = map(self.slider_unfilled);
        self.menu_bg = map(self.menu_bg);
        self.menu_disabled = map(self.menu_disabled);
        self.status_ok = map(self.status_ok);
        self.status_err = map(self.status_err);
        self.statusbar_bg = map(self.statusbar_bg);
        self.pill_key_bg = map(self.pill_key_bg);
        self.pill_key_fg = map(self.pill_key_fg);
        self.pill_desc_fg = map(self.pill_desc_fg);
        self.surface_bg = map(self.surface_bg);
    }

    pub fn midnight() -> Self {
        Theme {
            name: "midnight",
            window_bg: Color::Rgb(20, 24, 48),
            panel_bg: Color::Rgb(28, 34, 65),
            header_bg: Color::Rgb(28, 34, 65),
            border: Color::Rgb(60, 62, 90),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 174, 200),
            accent: Color::Rgb(126, 70, 138),
            tab_active_fg: Color::White,
            disk_value: Color::Rgb(126, 231, 245),
            table_header_bg: Color::Rgb(126, 70, 138),
            table_header_fg: Color::White,
            row_highlight_bg: Color::Rgb(52, 46, 92),
            slider_filled: Color::Rgb(204, 83, 255),
            slider_unfilled: Color::Rgb(60, 62, 90),
            menu_bg: Color::Rgb(36, 42, 78),
            menu_disabled: Color::Rgb(110, 112, 140),
            status_ok: Color::Rgb(126, 231, 245),
            status_err: Color::Rgb(255, 45, 113),
            statusbar_bg: Color::Rgb(20, 24, 48),
            pill_key_bg: Color::Rgb(204, 83, 255),
            pill_key_fg: Color::Rgb(20, 24, 48),
            pill_desc_fg: Color::White,
            surface_bg: Color::Rgb(36, 42, 78),
            support: ColorSupport::Truecolor,
        }
    }

    pub fn nord() -> Self {
        Theme {
            name: "nord",
            window_bg: Color::Rgb(46, 52, 64),
            panel_bg: Color::Rgb(59, 66, 82),
            header_bg: Color::Rgb(59, 66, 82),
            border: Color::Rgb(76, 86, 106),
            text_primary: Color::Rgb(236, 239, 244),
            text_secondary: Color::Rgb(216, 222, 233),
            accent: Color::Rgb(136, 192, 208),
            tab_active_fg: Color::Rgb(46, 52, 64),
            disk_value: Color::Rgb(143, 188, 187),
            table_header_bg: Color::Rgb(94, 129, 172),
            table_header_fg: Color::Rgb(236, 239, 244),
            row_highlight_bg: Color::Rgb(67, 76, 94),
            slider_filled: Color::Rgb(136, 192, 208),
            slider_unfilled: Color::Rgb(76, 86, 106),
            menu_bg: Color::Rgb(67, 76, 94),
            menu_disabled: Color::Rgb(129, 161, 193),
            status_ok: Color::Rgb(163, 190, 140),
            status_err: Color::Rgb(191, 97, 106),
            statusbar_bg: Color::Rgb(46, 52, 64),
            pill_key_bg: Color::Rgb(136, 192, 208),
            pill_key_fg: Color::Rgb(46, 52, 64),
            pill_desc_fg: Color::Rgb(236, 239, 244),
            surface_bg: Color::Rgb(59, 66, 82),
            support: ColorSupport::Truecolor,
        }
    }

    pub fn mono() -> Self {
        Theme {
            name: "mono",
            window_bg: Color::Black,
            panel_bg: Color::Black,
            header_bg: Color::Black,
            border: Color::White,
            text_primary: Color::White,
            text_secondary: Color::Gray,
            accent: Color::White,
            tab_active_fg: Color::Black,
            disk_value: Color::White,
            table_header_bg: Color::White,
            table_header_fg: Color::Black,
            row_highlight_bg: Color::DarkGray,
            slider_filled: Color::White,
            slider_unfilled: Color::DarkGray,
            menu_bg: Color::Black,
            menu_disabled: Color::DarkGray,
            status_ok: Color::White,
            status_err: Color::White,
            statusbar_bg: Color::Black,
            pill_key_bg: Color::White,
            pill_key_fg: Color::Black,
            pill_desc_fg: Color::White,
            surface_bg: Color::Black,
            support: ColorSupport::Mono,
        }
    }
}

pub fn adapt_color(color: Color, support: ColorSupport) -> Color {
    match support {
        ColorSupport::Truecolor | ColorSupport::Auto => color,
        ColorSupport::Color256 => match color {
            Color::Rgb(r, g, b) => Color::Indexed(rgb_to_ansi256(r, g, b)),
            _ => color,
        },
        ColorSupport::Mono => match color {
            Color::Rgb(r, g, b) => {
                let luminance = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luminance > 128.0 {
                    Color::White
                } else {
                    Color::Black
                }
            }
            Color::White | Color::Black | Color::Gray | Color::DarkGray => color,
            _ => Color::White,
        },
    }
}

fn rgb_to_ansi256(r: u8, g: u8, b: u8) -> u8 {
    let r = (r as f32 / 255.0 * 5.0).round() as u8;
    let g = (g as f32 / 255.0 * 5.0).round() as u8;
    let b = (b as f32 / 255.0 * 5.0).round() as u8;
    16 + 36 * r + 6 * g + b
}
