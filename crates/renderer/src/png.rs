//! PNG encoding for rendered cards.
//!
//! Two encodings are produced:
//! - **Indexed PNG (color type 3)** when the card has at most 256 distinct
//!   RGBA values. Flat cards without a photographic cover usually qualify.
//! - **RGBA PNG (color type 6)** otherwise.
//!
//! Output is deterministic: identical pixels always give identical bytes.

use card_common::{CardError, CardResult};
use image::RgbaImage;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

/// Minimum pixels to benefit from parallel palette extraction
const PARALLEL_THRESHOLD: usize = 65_536;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

type PaletteEntry = (u8, u8, u8, u8);

/// Encode an image, choosing indexed or RGBA output by color count.
pub fn encode_image(image: &RgbaImage) -> CardResult<Vec<u8>> {
    create_png_auto(image.as_raw(), image.width() as usize, image.height() as usize)
}

/// Encode raw RGBA bytes, choosing indexed or RGBA output by color count.
pub fn create_png_auto(pixels: &[u8], width: usize, height: usize) -> CardResult<Vec<u8>> {
    check_buffer(pixels.len(), width, height, 4)?;

    let palette_result = if width * height >= PARALLEL_THRESHOLD {
        extract_palette_parallel(pixels)
    } else {
        extract_palette_sequential(pixels)
    };

    match palette_result {
        Some((palette, indices)) => create_png_indexed(width, height, &palette, &indices),
        None => create_png(pixels, width, height),
    }
}

#[inline(always)]
fn pack_color(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_be_bytes([r, g, b, a])
}

#[inline(always)]
fn unpack_color(packed: u32) -> PaletteEntry {
    let [r, g, b, a] = packed.to_be_bytes();
    (r, g, b, a)
}

/// Palette in first-seen order.
fn extract_palette_sequential(pixels: &[u8]) -> Option<(Vec<PaletteEntry>, Vec<u8>)> {
    let mut color_to_index: HashMap<u32, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<PaletteEntry> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(pixels.len() / 4);

    for chunk in pixels.chunks_exact(4) {
        let packed = pack_color(chunk[0], chunk[1], chunk[2], chunk[3]);

        let index = match color_to_index.get(&packed) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push(unpack_color(packed));
                color_to_index.insert(packed, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Palette in ascending packed-color order.
///
/// Threads collect their own color sets, the merged set is sorted so the
/// palette does not depend on scheduling, then pixels are mapped in parallel.
fn extract_palette_parallel(pixels: &[u8]) -> Option<(Vec<PaletteEntry>, Vec<u8>)> {
    let chunk_pixels = (pixels.len() / 4 / rayon::current_num_threads()).max(256);

    let local_sets: Vec<HashSet<u32>> = pixels
        .par_chunks(chunk_pixels * 4)
        .map(|chunk| {
            let mut local = HashSet::with_capacity(MAX_PALETTE_SIZE);
            for pixel in chunk.chunks_exact(4) {
                local.insert(pack_color(pixel[0], pixel[1], pixel[2], pixel[3]));
                if local.len() > MAX_PALETTE_SIZE {
                    break;
                }
            }
            local
        })
        .collect();

    let mut unique: HashSet<u32> = HashSet::with_capacity(MAX_PALETTE_SIZE);
    for set in local_sets {
        unique.extend(set);
        if unique.len() > MAX_PALETTE_SIZE {
            return None;
        }
    }

    let mut sorted: Vec<u32> = unique.into_iter().collect();
    sorted.sort_unstable();

    let color_to_index: HashMap<u32, u8> = sorted
        .iter()
        .enumerate()
        .map(|(i, &packed)| (packed, i as u8))
        .collect();
    let palette = sorted.into_iter().map(unpack_color).collect();

    let indices = pixels
        .par_chunks_exact(4)
        .map(|p| {
            color_to_index
                .get(&pack_color(p[0], p[1], p[2], p[3]))
                .copied()
                .unwrap_or(0)
        })
        .collect();

    Some((palette, indices))
}

/// Create an indexed PNG (color type 3) from palette and indices.
pub fn create_png_indexed(
    width: usize,
    height: usize,
    palette: &[PaletteEntry],
    indices: &[u8],
) -> CardResult<Vec<u8>> {
    check_buffer(indices.len(), width, height, 1)?;
    if palette.is_empty() || palette.len() > MAX_PALETTE_SIZE {
        return Err(CardError::Encode(format!(
            "palette must have 1..={} entries, got {}",
            MAX_PALETTE_SIZE,
            palette.len()
        )));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 3));

    let plte_data: Vec<u8> = palette.iter().flat_map(|&(r, g, b, _)| [r, g, b]).collect();
    write_chunk(&mut png, b"PLTE", &plte_data);

    // tRNS only when some entry is not opaque (rounded card corners)
    if palette.iter().any(|&(_, _, _, a)| a < 255) {
        let trns_data: Vec<u8> = palette.iter().map(|&(_, _, _, a)| a).collect();
        write_chunk(&mut png, b"tRNS", &trns_data);
    }

    let idat_data = deflate_scanlines(indices, width, height)?;
    write_chunk(&mut png, b"IDAT", &idat_data);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Create a PNG image from RGBA pixel data (color type 6).
pub fn create_png(pixels: &[u8], width: usize, height: usize) -> CardResult<Vec<u8>> {
    check_buffer(pixels.len(), width, height, 4)?;

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut png, b"IHDR", &ihdr(width, height, 6));

    let idat_data = deflate_scanlines(pixels, width * 4, height)?;
    write_chunk(&mut png, b"IDAT", &idat_data);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

fn check_buffer(len: usize, width: usize, height: usize, bytes_per_pixel: usize) -> CardResult<()> {
    if width == 0 || height == 0 {
        return Err(CardError::Encode(format!(
            "cannot encode an empty {}x{} image",
            width, height
        )));
    }
    let expected = width * height * bytes_per_pixel;
    if len != expected {
        return Err(CardError::Encode(format!(
            "buffer holds {} bytes, expected {} for {}x{}",
            len, expected, width, height
        )));
    }
    Ok(())
}

fn ihdr(width: usize, height: usize, color_type: u8) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);
    data.extend_from_slice(&(width as u32).to_be_bytes());
    data.extend_from_slice(&(height as u32).to_be_bytes());
    data.push(8); // bit depth
    data.push(color_type);
    data.push(0); // compression method
    data.push(0); // filter method
    data.push(0); // interlace method
    data
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

/// Prefix every `row_bytes` scanline with filter type 0 and zlib-compress.
fn deflate_scanlines(data: &[u8], row_bytes: usize, height: usize) -> CardResult<Vec<u8>> {
    let mut uncompressed = Vec::with_capacity(height * (1 + row_bytes));
    for row in data.chunks_exact(row_bytes).take(height) {
        uncompressed.push(0);
        uncompressed.extend_from_slice(row);
    }

    let mut encoder =
        flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    let compress_err = |e: std::io::Error| CardError::Encode(format!("IDAT compression failed: {}", e));
    encoder.write_all(&uncompressed).map_err(compress_err)?;
    encoder.finish().map_err(compress_err)
}
