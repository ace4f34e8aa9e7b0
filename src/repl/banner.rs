use console::{style, Term};
use tui_banner::{Align, Banner, ColorMode, Fill, Gradient, GradientDirection, Palette};

use crate::models::ReportKind;

const BRAND: u8 = 39; // bright blue
const BRAND_DIM: u8 = 24;
const DIM: u8 = 240;

/// The separator character (horizontal ellipsis).
const SEP_CHAR: char = '\u{2026}';

const TAGLINE: &str = "Security findings, pivoted";
const WELCOME: &str =
    "Welcome! Pick a report page and hand it an export to crunch the data you're working with.";

/// Build the home page for a terminal `width` columns wide.
pub fn render_home(width: usize) -> String {
    let version = env!("CARGO_PKG_VERSION");
    let git_hash = option_env!("GIT_HASH").unwrap_or("dev");

    let center = |text_w: usize| -> String {
        if width > text_w + 4 {
            " ".repeat((width - text_w) / 2)
        } else {
            "  ".to_string()
        }
    };

    let palette = Palette::from_hex(&[
        "#AFD7FF", // pale sky
        "#5FAFFF", // brand core
        "#0087D7", // deep blue
        "#5F5FAF", // slate
    ]);
    let gradient = Gradient::new(palette.colors().to_vec(), GradientDirection::Diagonal);

    let banner_text = match Banner::new("SCANLENS") {
        Ok(b) => b
            .gradient(gradient)
            .fill(Fill::Keep)
            .align(Align::Center)
            .trim_vertical(true)
            .edge_shade(0.35, '\u{2591}')
            .color_mode(ColorMode::TrueColor)
            .width(width)
            .render(),
        Err(_) => format!(
            "{}{}\n",
            center(8),
            style("SCANLENS").color256(BRAND).bold()
        ),
    };

    let mut out = String::new();
    out.push('\n');
    out.push_str(&banner_text);

    let version_str = format!("v{} ({})", version, git_hash);
    out.push_str(&format!("{}{}\n", center(version_str.len()), style(&version_str).color256(DIM)));

    let scene_w = width.clamp(40, 76);
    let pad = center(scene_w);
    let rule = style(SEP_CHAR.to_string().repeat(scene_w)).color256(BRAND_DIM).to_string();
    out.push_str(&format!("{}{}\n", pad, rule));
    out.push_str(&format!("{}{}\n", center(TAGLINE.len()), style(TAGLINE).white().bold()));
    out.push_str(&format!("{}{}\n\n", pad, rule));

    let welcome_w = WELCOME.chars().count();
    out.push_str(&format!("{}{}\n\n", center(welcome_w), WELCOME));

    let p = center(56);
    out.push_str(&format!("{}  {}\n\n", p, style("Report pages:").white().bold()));
    for kind in ReportKind::ALL {
        let format = match kind.input_format() {
            crate::models::InputFormat::Json => "json",
            crate::models::InputFormat::Csv => "csv",
        };
        out.push_str(&format!(
            "{}    {:<24} {}\n",
            p,
            style(format!("/{} <file.{}>", kind, format)).color256(BRAND),
            style(kind.title()).dim(),
        ));
    }
    out.push_str(&format!(
        "{}    {:<24} {}\n",
        p,
        style("/help").color256(BRAND),
        style("List all commands").dim(),
    ));
    out.push('\n');
    out
}

/// Clear the screen and print the home page.
pub fn show_home() {
    let term = Term::stdout();
    let _ = term.clear_screen();
    let (_, cols) = term.size();
    print!("{}", render_home(cols as usize));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_lists_every_page() {
        let home = render_home(100);
        assert!(home.contains("Welcome!"));
        for kind in ReportKind::ALL {
            assert!(home.contains(kind.title()), "missing {}", kind);
        }
    }

    #[test]
    fn test_home_renders_in_narrow_terminal() {
        let home = render_home(20);
        assert!(home.contains("/inventory"));
    }
}
