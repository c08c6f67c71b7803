//! Rendering of the produced byte stream as source code or raw binary.

use std::{
    fmt::Write as _,
    fs::{self, File},
    io::{self, Write},
    path::Path,
};

use anyhow::{Context, Result};
use glyph_codec::pipeline::Output;

/// The comment heading generated source files.
const HEADER: &str = "// Generated by font-compress";

/// The number of bytes on each line of a generated array literal.
const BYTES_PER_LINE: usize = 16;

/// The representation of the emitted data.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum OutputFormat {
    /// A Rust `const` byte array.
    #[default]
    Rust,
    /// A C `const unsigned char` array.
    C,
    /// The raw bytes.
    Bin,
}

impl OutputFormat {
    /// Returns the textual representation of the [`OutputFormat`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::C => "c",
            Self::Bin => "bin",
        }
    }

    /// Returns the file extension associated with the [`OutputFormat`].
    pub fn file_extension(&self) -> &'static str {
        match self {
            Self::Rust => "rs",
            Self::C => "c",
            Self::Bin => "bin",
        }
    }
}

impl clap::ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        static FORMATS: &[OutputFormat] = &[OutputFormat::Rust, OutputFormat::C, OutputFormat::Bin];

        FORMATS
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        Some(clap::builder::PossibleValue::new(self.as_str()))
    }
}

/// Renders `data` as a Rust `const` array named `name`.
pub fn format_rust(data: &[u8], name: &str) -> String {
    let mut source = format!("{HEADER}\n\nconst {name}: [u8; {}] = [\n", data.len());
    push_lines(&mut source, data);
    source.push_str("];\n");
    source
}

/// Renders `data` as a C `const unsigned char` array named `name`.
pub fn format_c(data: &[u8], name: &str) -> String {
    let mut source = format!(
        "{HEADER}\n\nconst unsigned char {name}[{}] = {{\n",
        data.len()
    );
    push_lines(&mut source, data);
    source.push_str("};\n");
    source
}

/// Appends the indented, comma-terminated hexadecimal literals of `data` to `source`.
fn push_lines(source: &mut String, data: &[u8]) {
    for line in data.chunks(BYTES_PER_LINE) {
        source.push_str("    ");
        for (index, byte) in line.iter().enumerate() {
            if index != 0 {
                source.push(' ');
            }
            let _ = write!(source, "{byte:#04x},");
        }
        source.push('\n');
    }
}

/// Writes the data of `output` in `format` to `path`, or to standard output if `path` is
/// `None`.
///
/// # Errors
///
/// Returns errors if the parent directory of `path` cannot be created or if writing fails.
pub fn write_output(
    output: &Output,
    format: OutputFormat,
    name: &str,
    path: Option<&Path>,
) -> Result<()> {
    let Some(path) = path else {
        let stdout = io::stdout().lock();
        return emit(output, format, name, stdout).context("error writing to standard output");
    };

    if let Some(folder) = path.parent().filter(|folder| !folder.as_os_str().is_empty()) {
        fs::create_dir_all(folder)
            .with_context(|| format!("error creating {}", folder.display()))?;
    }

    let file = File::create(path).with_context(|| format!("error creating {}", path.display()))?;
    emit(output, format, name, file).with_context(|| format!("error writing {}", path.display()))?;

    log::info!("Output saved to: {}", path.display());
    Ok(())
}

/// Writes the data of `output` in `format` into `writer`.
fn emit<W: Write>(
    output: &Output,
    format: OutputFormat,
    name: &str,
    mut writer: W,
) -> io::Result<()> {
    match format {
        OutputFormat::Rust => writer.write_all(format_rust(&output.data, name).as_bytes())?,
        OutputFormat::C => writer.write_all(format_c(&output.data, name).as_bytes())?,
        OutputFormat::Bin => output.dump(&mut writer)?,
    }

    writer.flush()
}
