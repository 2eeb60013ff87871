use statcard::render::{Card, ContentBox, DrawCursor, FitResult, Surface, SvgSurface, raster};
use statcard::{Rgb, strip_markup};
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Color(statcard::Error),
    Render(statcard::render::HeadlessError),
    Raster(raster::RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Color(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<statcard::Error> for CliError {
    fn from(value: statcard::Error) -> Self {
        Self::Color(value)
    }
}

impl From<statcard::render::HeadlessError> for CliError {
    fn from(value: statcard::render::HeadlessError) -> Self {
        Self::Render(value)
    }
}

impl From<raster::RasterError> for CliError {
    fn from(value: raster::RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Strip,
    Fit,
    Render,
    Prestige,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    font_size: f64,
    max_width: f64,
    width: f64,
    height: f64,
    shadow: bool,
    gradient: Option<(Rgb, Rgb)>,
    title: Option<String>,
    background: Option<String>,
    render_format: RenderFormat,
    render_scale: f32,
    level: Option<u32>,
    xp: Option<u64>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "statcard-cli\n\
\n\
USAGE:\n\
  statcard-cli [strip] [<path>|-]\n\
  statcard-cli fit [--size <px>] [--max-width <px>] [--pretty] [<path>|-]\n\
  statcard-cli render [--format svg|png] [--width <px>] [--height <px>] [--size <px>] [--title <markup>] [--no-shadow] [--gradient <#from> <#to>] [--background <#hex>] [--scale <n>] [--out <path>] [<path>|-]\n\
  statcard-cli prestige --level <n> [--xp <n>]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', markup is read from stdin.\n\
  - strip prints the text with all chat-color tags removed.\n\
  - fit prints the chosen font size and measured width as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - prestige prints the bracketed star markup for a BedWars level; --xp adds progress lines.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Strip,
        font_size: 20.0,
        max_width: 460.0,
        width: 500.0,
        height: 500.0,
        shadow: true,
        render_format: RenderFormat::Svg,
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "strip" => args.command = Command::Strip,
            "fit" => args.command = Command::Fit,
            "render" => args.command = Command::Render,
            "prestige" => args.command = Command::Prestige,
            "--pretty" => args.pretty = true,
            "--no-shadow" => args.shadow = false,
            "--size" => {
                let Some(size) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.font_size = size.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.font_size.is_finite() && args.font_size > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--max-width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.max_width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--gradient" => {
                let (Some(from), Some(to)) = (it.next(), it.next()) else {
                    return Err(CliError::Usage(usage()));
                };
                args.gradient = Some((Rgb::parse_hex(from)?, Rgb::parse_hex(to)?));
            }
            "--title" => {
                let Some(title) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.title = Some(title.clone());
            }
            "--background" => {
                let Some(bg) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--format" => {
                let Some(fmt) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_format = fmt
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let Some(scale) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--level" => {
                let Some(level) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.level = Some(level.parse::<u32>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--xp" => {
                let Some(xp) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.xp = Some(xp.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension("png"),
        _ => std::path::PathBuf::from("out.png"),
    }
}

fn fit_markup(markup: &str, max_width: f64, start_size: f64) -> FitResult {
    let mut surface = SvgSurface::new(max_width, start_size * 2.0);
    statcard::render::fit_text(&mut surface, markup, max_width, start_size)
}

fn render_card(args: &Args, markup: &str) -> Result<String, CliError> {
    let mut card = Card::new(args.width, args.height);
    if let Some(bg) = args.background.as_deref() {
        card = card.with_background(Rgb::parse_hex(bg)?);
    }

    let mut body_top = 20.0;
    if let Some(title) = args.title.as_deref() {
        card.draw_title(title);
        body_top = 60.0;
    }

    let markup = markup.trim_end_matches('\n');
    if let Some((from, to)) = args.gradient {
        let surface = card.surface_mut();
        surface.set_font_size(args.font_size);
        let mut cursor = DrawCursor::new(20.0, body_top + args.font_size);
        statcard::render::draw_gradient(surface, &strip_markup(markup), &mut cursor, from, to);
    } else {
        let mut content = ContentBox::new(10.0, body_top, args.width - 20.0, args.height - body_top - 10.0)
            .with_padding(10.0);
        for (i, line) in markup.lines().enumerate() {
            let y = i as f64 * (args.font_size + 4.0);
            let entry = statcard::render::TextEntry::new(line, 0.0, y, args.font_size)
                .with_shadow(args.shadow);
            content = content.add_text(entry);
        }
        card.draw_box(&content)?;
    }

    Ok(card.into_svg())
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Strip => {
            let text = read_input(args.input.as_deref())?;
            println!("{}", strip_markup(text.trim_end_matches('\n')));
            Ok(())
        }
        Command::Fit => {
            let text = read_input(args.input.as_deref())?;
            let fit = fit_markup(text.trim_end_matches('\n'), args.max_width, args.font_size);
            write_json(&fit, args.pretty)?;
            Ok(())
        }
        Command::Render => {
            let text = read_input(args.input.as_deref())?;
            let svg = render_card(&args, &text)?;
            match args.render_format {
                RenderFormat::Svg => {
                    write_text(&svg, args.out.as_deref())?;
                }
                RenderFormat::Png => {
                    // The SVG already carries the background rect.
                    let options = raster::RasterOptions {
                        scale: args.render_scale,
                        background: None,
                    };
                    let bytes = raster::svg_to_png(&svg, &options)?;
                    let out = args.out.clone().unwrap_or_else(|| {
                        default_raster_out_path(args.input.as_deref())
                            .to_string_lossy()
                            .to_string()
                    });
                    if out == "-" {
                        use std::io::Write;
                        std::io::stdout().lock().write_all(&bytes)?;
                    } else {
                        std::fs::write(out, bytes)?;
                    }
                }
            }
            Ok(())
        }
        Command::Prestige => {
            let Some(level) = args.level else {
                return Err(CliError::Usage(usage()));
            };
            println!("{}", statcard::prestige_markup(level));
            if let Some(xp) = args.xp {
                println!("{}", statcard::level_progress_markup(xp));
                println!("{}", statcard::prestige_progress_markup(level, xp));
            }
            Ok(())
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        std::iter::once("statcard-cli")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn defaults_to_strip_from_stdin() {
        let args = parse_args(&argv(&[])).unwrap();
        assert!(matches!(args.command, Command::Strip));
        assert!(args.input.is_none());
    }

    #[test]
    fn fit_accepts_size_and_max_width() {
        let args = parse_args(&argv(&["fit", "--size", "30", "--max-width", "460", "-"])).unwrap();
        assert!(matches!(args.command, Command::Fit));
        assert_eq!(args.font_size, 30.0);
        assert_eq!(args.max_width, 460.0);
        assert_eq!(args.input.as_deref(), Some("-"));
    }

    #[test]
    fn gradient_takes_two_hex_colors() {
        let args =
            parse_args(&argv(&["render", "--gradient", "#FF5555", "#5555FF", "-"])).unwrap();
        let (from, to) = args.gradient.unwrap();
        assert_eq!(from, Rgb::new(255, 85, 85));
        assert_eq!(to, Rgb::new(85, 85, 255));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(matches!(
            parse_args(&argv(&["--bogus"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn two_positional_inputs_are_rejected() {
        assert!(matches!(
            parse_args(&argv(&["strip", "a.txt", "b.txt"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn render_produces_an_svg_document() {
        let args = parse_args(&argv(&[
            "render",
            "--title",
            "<gold>Stats</gold>",
            "--background",
            "#141414",
            "-",
        ]))
        .unwrap();
        let svg = render_card(&args, "<green>Wins</green> 4821\n<red>Losses</red> 502").unwrap();
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains("#55FF55"));
        assert!(!svg.contains("&lt;green&gt;"));
    }

    #[test]
    fn raster_out_path_tracks_the_input_file() {
        assert_eq!(
            default_raster_out_path(Some("cards/stats.txt")),
            std::path::PathBuf::from("cards/stats.png")
        );
        assert_eq!(default_raster_out_path(None), std::path::PathBuf::from("out.png"));
    }
}
