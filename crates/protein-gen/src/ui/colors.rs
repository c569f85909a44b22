use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::Color as ComfyColor;
use crossterm::style::Color;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
  Always,
  Auto,
  Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeMode {
  Dark,
  Light,
  Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Dark,
  Light,
}

struct Palette {
  timestamp: (u8, u8, u8),
  primary: (u8, u8, u8),
  accent: (u8, u8, u8),
  label: (u8, u8, u8),
  value: (u8, u8, u8),
  success: (u8, u8, u8),
  muted: (u8, u8, u8),
}

const DARK: Palette = Palette {
  timestamp: (118, 166, 166),
  primary: (164, 198, 57),
  accent: (214, 96, 77),
  label: (120, 194, 173),
  value: (236, 220, 150),
  success: (164, 198, 57),
  muted: (128, 128, 128),
};

const LIGHT: Palette = Palette {
  timestamp: (92, 62, 38),
  primary: (46, 110, 44),
  accent: (190, 60, 40),
  label: (30, 100, 120),
  value: (140, 96, 20),
  success: (34, 142, 90),
  muted: (110, 110, 110),
};

pub struct Colors {
  enabled: bool,
  theme: Theme,
}

impl Colors {
  pub const fn new(enabled: bool, theme: Theme) -> Self {
    Self { enabled, theme }
  }

  const fn palette(&self) -> &'static Palette {
    match self.theme {
      Theme::Dark => &DARK,
      Theme::Light => &LIGHT,
    }
  }

  const fn pick(&self, rgb: (u8, u8, u8)) -> Color {
    if !self.enabled {
      return Color::Reset;
    }
    Color::Rgb {
      r: rgb.0,
      g: rgb.1,
      b: rgb.2,
    }
  }

  pub const fn timestamp(&self) -> Color {
    self.pick(self.palette().timestamp)
  }

  pub const fn primary(&self) -> Color {
    self.pick(self.palette().primary)
  }

  pub const fn accent(&self) -> Color {
    self.pick(self.palette().accent)
  }

  pub const fn label(&self) -> Color {
    self.pick(self.palette().label)
  }

  pub const fn value(&self) -> Color {
    self.pick(self.palette().value)
  }

  pub const fn success(&self) -> Color {
    self.pick(self.palette().success)
  }

  pub const fn muted(&self) -> Color {
    self.pick(self.palette().muted)
  }

  pub const fn clap_styles() -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, RgbColor, Style, Styles};

    const fn rgb(rgb: (u8, u8, u8)) -> Option<ClapColor> {
      Some(ClapColor::Rgb(RgbColor(rgb.0, rgb.1, rgb.2)))
    }

    Styles::styled()
      .header(Style::new().bold().underline().fg_color(rgb(DARK.label)))
      .usage(Style::new().bold().fg_color(rgb(DARK.label)))
      .literal(Style::new().fg_color(rgb(DARK.success)))
      .placeholder(Style::new().fg_color(rgb(DARK.timestamp)))
      .error(Style::new().bold().fg_color(rgb(DARK.accent)))
      .valid(Style::new().fg_color(rgb(DARK.success)))
      .invalid(Style::new().bold().fg_color(rgb(DARK.accent)))
  }
}

pub trait IntoComfyColor {
  fn into_comfy(self) -> ComfyColor;
}

impl IntoComfyColor for Color {
  fn into_comfy(self) -> ComfyColor {
    match self {
      Color::Rgb { r, g, b } => ComfyColor::Rgb { r, g, b },
      Color::AnsiValue(value) => ComfyColor::AnsiValue(value),
      Color::Black => ComfyColor::Black,
      Color::DarkGrey => ComfyColor::DarkGrey,
      Color::Red => ComfyColor::Red,
      Color::DarkRed => ComfyColor::DarkRed,
      Color::Green => ComfyColor::Green,
      Color::DarkGreen => ComfyColor::DarkGreen,
      Color::Yellow => ComfyColor::Yellow,
      Color::DarkYellow => ComfyColor::DarkYellow,
      Color::Blue => ComfyColor::Blue,
      Color::DarkBlue => ComfyColor::DarkBlue,
      Color::Magenta => ComfyColor::Magenta,
      Color::DarkMagenta => ComfyColor::DarkMagenta,
      Color::Cyan => ComfyColor::Cyan,
      Color::DarkCyan => ComfyColor::DarkCyan,
      Color::White => ComfyColor::White,
      Color::Grey => ComfyColor::Grey,
      Color::Reset => ComfyColor::Reset,
    }
  }
}

pub fn colors_enabled(mode: ColorMode) -> bool {
  match mode {
    ColorMode::Always => true,
    ColorMode::Never => false,
    ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
  }
}

pub fn detect_theme(mode: ThemeMode) -> Theme {
  match mode {
    ThemeMode::Dark => Theme::Dark,
    ThemeMode::Light => Theme::Light,
    ThemeMode::Auto => theme_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref()).unwrap_or(Theme::Dark),
  }
}

/// `COLORFGBG` is `fg;bg` (sometimes `fg;default;bg`); backgrounds 7 and 9..=15 are light.
fn theme_from_colorfgbg(value: Option<&str>) -> Option<Theme> {
  let background = value?.rsplit(';').next()?.parse::<u8>().ok()?;
  Some(if background == 7 || background >= 9 {
    Theme::Light
  } else {
    Theme::Dark
  })
}
