//! Plain-text PPM (P3) output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::{ImageBuffer, RenderResult};

/// Write `image` as P3: a three-line header, then one `r g b` line per
/// pixel, top row first.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer) -> RenderResult<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in image.to_rgb() {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write `image` to a file at `path`.
pub fn save_ppm(path: impl AsRef<Path>, image: &ImageBuffer) -> RenderResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_write_ppm_layout() {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(0.25, 0.0, 1.0));

        let mut out = Vec::new();
        write_ppm(&mut out, &image).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n128 0 255\n");
    }

    #[test]
    fn test_save_ppm_to_missing_dir_is_io_error() {
        let image = ImageBuffer::new(1, 1);
        let err = save_ppm("/nonexistent-dir/for/lumen/out.ppm", &image).unwrap_err();
        assert!(matches!(err, crate::RenderError::Io(_)));
    }
}
