use crate::{constants::METERS_PER_INCH, utils::util::Result};
use flate2::Crc;
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder, RgbImage};
use std::{io::Write, path::Path};
use tempfile::NamedTempFile;

const PNG_SIGNATURE_LEN: usize = 8;
const IHDR_CHUNK_LEN: usize = 4 + 4 + 13 + 4;
const PHYS_UNIT_METER: u8 = 1;

fn dots_per_meter(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

fn phys_chunk(dpi: u32) -> Vec<u8> {
    let ppm = dots_per_meter(dpi).to_be_bytes();
    let mut data = Vec::with_capacity(9);
    data.extend_from_slice(&ppm);
    data.extend_from_slice(&ppm);
    data.push(PHYS_UNIT_METER);

    let mut crc = Crc::new();
    crc.update(b"pHYs");
    crc.update(&data);

    let mut chunk = Vec::with_capacity(4 + 4 + data.len() + 4);
    chunk.extend_from_slice(&(data.len() as u32).to_be_bytes());
    chunk.extend_from_slice(b"pHYs");
    chunk.extend_from_slice(&data);
    chunk.extend_from_slice(&crc.sum().to_be_bytes());
    chunk
}

/// Encodes `image` as PNG with a `pHYs` chunk recording `dpi`.
pub fn encode_png(image: &RgbImage, dpi: u32) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;

    // The encoder always writes IHDR first, pHYs has to precede IDAT.
    let split = PNG_SIGNATURE_LEN + IHDR_CHUNK_LEN;
    if png.len() < split || &png[PNG_SIGNATURE_LEN + 4..PNG_SIGNATURE_LEN + 8] != b"IHDR" {
        return Err(crate::svplot_error!("Unexpected PNG layout from encoder"));
    }
    let tail = png.split_off(split);
    png.extend_from_slice(&phys_chunk(dpi));
    png.extend_from_slice(&tail);
    Ok(png)
}

/// A rendered image waiting to be written to its destination.
pub struct PendingOutput<'a> {
    pub path: &'a Path,
    pub bytes: Vec<u8>,
}

/// Writes every output through a temporary file in the destination directory.
///
/// All temporary files are written before any is moved into place, so a
/// write failure leaves no destination half-written.
pub fn write_outputs(outputs: Vec<PendingOutput<'_>>) -> Result<()> {
    let mut staged = Vec::with_capacity(outputs.len());
    for output in outputs {
        let dir = match output.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp_file = NamedTempFile::new_in(dir).map_err(|error| {
            crate::svplot_error!(
                "Failed to create temporary file in {}: {}",
                dir.display(),
                error
            )
        })?;
        temp_file.write_all(&output.bytes)?;
        temp_file.flush()?;
        staged.push((temp_file, output.path));
    }

    for (temp_file, path) in staged {
        temp_file.persist(path).map_err(|error| {
            crate::svplot_error!("Failed to write {}: {}", path.display(), error.error)
        })?;
        log::debug!("Wrote {}", path.display());
    }
    Ok(())
}
