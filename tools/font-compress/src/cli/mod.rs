//! Command line parsing and [`Action`] construction.

use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, builder::EnumValueParser};
use glyph_codec::{
    charset::Charset,
    grid::{FallbackPolicy, GridLayout},
    pipeline::{Encoding, Options},
};
use log::LevelFilter;

use crate::format::OutputFormat;

/// The array name used when none is given.
pub const DEFAULT_NAME: &str = "COMPRESSED_FONT";

/// Parses `font-compress`'s arguments to construct an [`Action`].
pub fn get_action() -> Action {
    action_from_matches(&command_parser().get_matches())
}

/// Constructs an [`Action`] from already parsed `matches`.
#[expect(
    clippy::missing_panics_doc,
    reason = "parser guarantees that these are present"
)]
pub fn action_from_matches(matches: &ArgMatches) -> Action {
    let configuration = parse_configuration(matches);

    if let Some(images) = matches.get_many::<PathBuf>("batch") {
        return Action::Batch {
            images: images.cloned().collect(),
            configuration,
        };
    }

    let image = matches
        .get_one::<PathBuf>("image")
        .cloned()
        .expect("image is required without batch");

    Action::Compress {
        image,
        configuration,
    }
}

/// Parses the arguments shared by every [`Action`].
#[expect(
    clippy::missing_panics_doc,
    reason = "arguments with default values are always present"
)]
pub fn parse_configuration(matches: &ArgMatches) -> Configuration {
    let fallback = if matches.get_flag("no-fallback") {
        FallbackPolicy::Disabled
    } else {
        FallbackPolicy::default()
    };

    let layout = GridLayout {
        grid: matches.get_one::<(usize, usize)>("grid").copied(),
        cell_size: matches.get_one::<(usize, usize)>("char-size").copied(),
        fallback,
    };

    let encoding = if matches.get_flag("raw") {
        Encoding::Raw
    } else {
        Encoding::Compressed
    };

    let options = Options {
        threshold: matches
            .get_one::<u8>("threshold")
            .copied()
            .expect("threshold has a default value"),
        layout,
        charset: Charset::ASCII_PRINTABLE,
        encoding,
        solid_glyph: matches.get_flag("solid"),
        verify: matches.get_flag("verify"),
    };

    let log_level = match (matches.get_count("verbose"), matches.get_flag("quiet")) {
        (_, true) => LevelFilter::Warn,
        (0, false) => LevelFilter::Info,
        (1, false) => LevelFilter::Debug,
        (_, false) => LevelFilter::Trace,
    };

    Configuration {
        options,
        format: matches
            .get_one::<OutputFormat>("format")
            .copied()
            .expect("format has a default value"),
        output: matches.get_one::<PathBuf>("output").cloned(),
        preview: matches.get_one::<PathBuf>("preview").cloned(),
        name: matches
            .get_one::<String>("name")
            .cloned()
            .expect("name has a default value"),
        stats: matches.get_flag("stats"),
        list_fonts: matches.get_flag("list-fonts"),
        log_level,
    }
}

/// Returns the command parser for all [`Action`]s.
pub fn command_parser() -> Command {
    let image = Arg::new("image")
        .value_name("IMAGE")
        .help("Input font spritesheet image")
        .value_parser(clap::value_parser!(PathBuf))
        .required_unless_present("batch");

    let format = Arg::new("format")
        .short('f')
        .long("format")
        .help("Output format")
        .value_parser(EnumValueParser::<OutputFormat>::new())
        .default_value("rust");

    let output = Arg::new("output")
        .short('o')
        .long("output")
        .help("Output file, or output directory in batch mode (default: stdout)")
        .value_parser(clap::value_parser!(PathBuf));

    let grid = Arg::new("grid")
        .long("grid")
        .value_name("COLSxROWS")
        .help("Manual grid size (e.g. 18x7)")
        .value_parser(parse_dimensions);

    let char_size = Arg::new("char-size")
        .long("char-size")
        .value_name("WIDTHxHEIGHT")
        .help("Manual character size (e.g. 7x9)")
        .value_parser(parse_dimensions);

    let solid = Arg::new("solid")
        .long("solid")
        .help("Generate a solid character at position 127")
        .action(ArgAction::SetTrue);

    let raw = Arg::new("raw")
        .long("raw")
        .help("Skip compression")
        .action(ArgAction::SetTrue);

    let threshold = Arg::new("threshold")
        .long("threshold")
        .help("Binarization threshold 0-255; samples at or above it are lit")
        .value_parser(clap::value_parser!(u8))
        .default_value("128");

    let stats = Arg::new("stats")
        .long("stats")
        .help("Print compression statistics")
        .action(ArgAction::SetTrue);

    let preview = Arg::new("preview")
        .long("preview")
        .help("Save a preview image of the binarized spritesheet (e.g. preview.png)")
        .value_parser(clap::value_parser!(PathBuf));

    let verify = Arg::new("verify")
        .long("verify")
        .help("Verify compression by decompressing")
        .action(ArgAction::SetTrue);

    let batch = Arg::new("batch")
        .long("batch")
        .value_name("IMAGE")
        .help("Process multiple images")
        .value_parser(clap::value_parser!(PathBuf))
        .num_args(1..)
        .conflicts_with_all(["image", "preview"]);

    let list_fonts = Arg::new("list-fonts")
        .long("list-fonts")
        .help("List the characters held by the font")
        .action(ArgAction::SetTrue);

    let name = Arg::new("name")
        .long("name")
        .help("Name of the generated array")
        .default_value(DEFAULT_NAME);

    let no_fallback = Arg::new("no-fallback")
        .long("no-fallback")
        .help("Fail instead of assuming a 16 column grid when none is detected")
        .action(ArgAction::SetTrue)
        .conflicts_with_all(["grid", "char-size"]);

    let verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("Increase logging verbosity")
        .action(ArgAction::Count);

    let quiet = Arg::new("quiet")
        .short('q')
        .long("quiet")
        .help("Only log warnings and errors")
        .action(ArgAction::SetTrue)
        .conflicts_with("verbose");

    Command::new("font-compress")
        .about("Compress bitmap font spritesheets for embedded targets")
        .after_help("Example: font-compress font.png --stats -f rust -o font.rs")
        .arg(image)
        .arg(format)
        .arg(output)
        .arg(grid)
        .arg(char_size)
        .arg(solid)
        .arg(raw)
        .arg(threshold)
        .arg(stats)
        .arg(preview)
        .arg(verify)
        .arg(batch)
        .arg(list_fonts)
        .arg(name)
        .arg(no_fallback)
        .arg(verbose)
        .arg(quiet)
}

/// Parses a `AxB` pair of non-zero dimensions such as `18x7`.
///
/// # Errors
///
/// Returns a description of the problem if `value` is not two non-zero integers separated by
/// `x`.
pub fn parse_dimensions(value: &str) -> Result<(usize, usize), String> {
    let Some((first, second)) = value.split_once(['x', 'X']) else {
        return Err(format!("expected two values separated by 'x', got {value:?}"));
    };

    let parse = |part: &str| match part.trim().parse::<usize>() {
        Ok(0) => Err(format!("dimensions in {value:?} must be non-zero")),
        Ok(parsed) => Ok(parsed),
        Err(error) => Err(format!("invalid dimension {part:?} in {value:?}: {error}")),
    };

    Ok((parse(first)?, parse(second)?))
}

/// The action to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Convert a single spritesheet.
    Compress {
        /// The path of the spritesheet.
        image: PathBuf,
        /// How to convert it.
        configuration: Configuration,
    },
    /// Convert several spritesheets independently.
    Batch {
        /// The paths of the spritesheets.
        images: Vec<PathBuf>,
        /// How to convert each of them.
        configuration: Configuration,
    },
}

impl Action {
    /// Returns the [`Configuration`] of the [`Action`].
    pub fn configuration(&self) -> &Configuration {
        match self {
            Self::Compress { configuration, .. } | Self::Batch { configuration, .. } => {
                configuration
            }
        }
    }
}

/// Description of how to convert and emit a spritesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Configuration {
    /// The settings of the conversion pipeline.
    pub options: Options,
    /// The representation of the emitted data.
    pub format: OutputFormat,
    /// Where to write the emitted data. Standard output if absent.
    pub output: Option<PathBuf>,
    /// Where to save the binarized preview image, if anywhere.
    pub preview: Option<PathBuf>,
    /// The name of the generated array.
    pub name: String,
    /// Whether to print compression statistics.
    pub stats: bool,
    /// Whether to list the characters held by the font.
    pub list_fonts: bool,
    /// The maximum level of log messages to emit.
    pub log_level: LevelFilter,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Action {
        let matches = command_parser()
            .try_get_matches_from(std::iter::once("font-compress").chain(args.iter().copied()))
            .unwrap();
        action_from_matches(&matches)
    }

    #[test]
    fn command_is_well_formed() {
        command_parser().debug_assert();
    }

    #[test]
    fn dimensions() {
        assert_eq!(parse_dimensions("18x7"), Ok((18, 7)));
        assert_eq!(parse_dimensions("7X9"), Ok((7, 9)));
        assert!(parse_dimensions("18").is_err());
        assert!(parse_dimensions("0x7").is_err());
        assert!(parse_dimensions("axb").is_err());
    }

    #[test]
    fn defaults() {
        let action = parse(&["font.png"]);
        let Action::Compress {
            image,
            configuration,
        } = action
        else {
            panic!("expected a single image");
        };

        assert_eq!(image, PathBuf::from("font.png"));
        assert_eq!(configuration.options, Options::default());
        assert_eq!(configuration.options.threshold, glyph_codec::DEFAULT_THRESHOLD);
        assert_eq!(configuration.format, OutputFormat::Rust);
        assert_eq!(configuration.name, DEFAULT_NAME);
        assert_eq!(configuration.log_level, LevelFilter::Info);
    }

    #[test]
    fn explicit_settings() {
        let action = parse(&[
            "font.png",
            "--grid",
            "18x7",
            "--char-size",
            "7x9",
            "--threshold",
            "200",
            "--raw",
            "--solid",
            "-f",
            "c",
            "-vv",
        ]);
        let configuration = action.configuration();

        assert_eq!(configuration.options.layout.grid, Some((18, 7)));
        assert_eq!(configuration.options.layout.cell_size, Some((7, 9)));
        assert_eq!(configuration.options.threshold, 200);
        assert_eq!(configuration.options.encoding, Encoding::Raw);
        assert!(configuration.options.solid_glyph);
        assert_eq!(configuration.format, OutputFormat::C);
        assert_eq!(configuration.log_level, LevelFilter::Trace);
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let result = command_parser().try_get_matches_from([
            "font-compress",
            "font.png",
            "--threshold",
            "256",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn batch_collects_images() {
        let action = parse(&["--batch", "a.png", "b.png", "--verify"]);
        let Action::Batch {
            images,
            configuration,
        } = action
        else {
            panic!("expected a batch");
        };

        assert_eq!(images, [PathBuf::from("a.png"), PathBuf::from("b.png")]);
        assert!(configuration.options.verify);
    }
}
