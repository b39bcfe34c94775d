//! Image file output.
//!
//! PPM (binary P6) is written by hand; PNG goes through the `image`
//! crate. Pixel (0, 0) is the top-left corner in both.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use image::{Rgb, RgbImage};

use crate::renderer::ImageBuffer;

/// Write the image as binary PPM (P6) into a writer.
pub fn write_ppm<W: Write>(image: &ImageBuffer, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "P6")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;
    writer.write_all(&image.to_rgb8())?;
    Ok(())
}

/// Save the image as a PPM file.
pub fn save_ppm<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> io::Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_ppm(image, &mut writer)?;
    writer.flush()?;

    log::info!("Image saved as {}", path.as_ref().display());
    Ok(())
}

/// Save the image as a PNG file.
pub fn save_png<P: AsRef<Path>>(image: &ImageBuffer, path: P) -> image::ImageResult<()> {
    let bytes = image.to_rgb8();
    let png = RgbImage::from_fn(image.width, image.height, |x, y| {
        let idx = ((y * image.width + x) * 3) as usize;
        Rgb([bytes[idx], bytes[idx + 1], bytes[idx + 2]])
    });

    png.save(path.as_ref())?;
    log::info!("Image saved as {}", path.as_ref().display());
    Ok(())
}
