//! Human-readable reports written to standard error.

use glyph_codec::{charset::Charset, pipeline::Output};

/// The width of the report rulers.
const RULE_WIDTH: usize = 50;

/// Prints the compression statistics of `output` for a `width` by `height` image.
pub fn print_stats(output: &Output, width: usize, height: usize) {
    let grid = output.grid.spec;
    let original = output.original_size();
    let encoded = output.encoded_size();

    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    eprintln!("{heavy}");
    eprintln!("COMPRESSION STATS");
    eprintln!("{heavy}");
    eprintln!("Image:      {width}x{height} pixels");
    eprintln!(
        "Grid:       {} cols x {} rows ({})",
        grid.columns(),
        grid.rows(),
        output.grid.source.as_str()
    );
    eprintln!("Char size:  {}x{} pixels", grid.cell_width(), grid.cell_height());
    eprintln!("Characters: {}", grid.glyph_count());
    eprintln!("{light}");
    eprintln!("Original:   {} bytes", group_thousands(original));
    eprintln!("Compressed: {} bytes", group_thousands(encoded));
    eprintln!("Reduction:  {:.1}%", reduction(original, encoded));
    match ratio(original, encoded) {
        Some(ratio) => eprintln!("Ratio:      {ratio:.2}:1"),
        None => eprintln!("Ratio:      n/a"),
    }
    eprintln!("{heavy}");
    eprintln!();
}

/// Prints the number of characters held by the grid of `output` and their codepoint range.
pub fn print_font_listing(output: &Output, charset: &Charset) {
    let count = output.grid.spec.glyph_count();
    let listed = Charset::new(charset.first, count);
    let printable_last = listed.last().min(u32::from(b'~'));

    eprintln!("Font contains {count} characters:");
    eprintln!("ASCII range: {} to {}", listed.first, listed.last());
    eprintln!(
        "Printable: {:?} to {:?}",
        char::from_u32(listed.first).unwrap_or(char::REPLACEMENT_CHARACTER),
        char::from_u32(printable_last).unwrap_or(char::REPLACEMENT_CHARACTER)
    );
}

/// Returns the percentage by which `encoded` is smaller than `original`.
fn reduction(original: usize, encoded: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }

    (1.0 - encoded as f64 / original as f64) * 100.0
}

/// Returns the ratio of `original` to `encoded`, or `None` if nothing was encoded.
fn ratio(original: usize, encoded: usize) -> Option<f64> {
    (encoded != 0).then(|| original as f64 / encoded as f64)
}

/// Formats `value` with `,` between groups of three digits.
fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index != 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
