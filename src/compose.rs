// Host-side compositing for the demo window.
// Visual: the cover sits on top; wherever the coverage mask is non-zero the
// prize underneath shows through.
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};

use crate::app_error::AppError;
use crate::gamma::GammaLut;

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is on screen (pixels)
    pub height: usize,    // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    /// Pack an RGB image as 0x00RRGGBB pixels.
    pub fn from_rgb(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();
        Self { width: w as usize, height: h as usize, pixels }
    }
}

/// Load any format `image` understands and stretch it to `width x height`.
pub fn load_frame(path: &Path, width: u32, height: u32) -> Result<FrameBuffer, AppError> {
    let img = image::open(path)
        .map_err(|e| AppError::Image(format!("Open {}: {e}", path.display())))?
        .to_rgb8();
    let img = if img.dimensions() == (width, height) {
        img
    } else {
        imageops::resize(&img, width, height, FilterType::Triangle)
    };
    Ok(FrameBuffer::from_rgb(&img))
}

/// Load a grayscale seed mask, stretched to the surface size.
pub fn load_seed(path: &Path, width: u32, height: u32) -> Result<GrayImage, AppError> {
    let img = image::open(path)
        .map_err(|e| AppError::Image(format!("Open {}: {e}", path.display())))?
        .to_luma8();
    if img.dimensions() == (width, height) {
        return Ok(img);
    }
    Ok(imageops::resize(&img, width, height, FilterType::Nearest))
}

/// Default cover: silver foil with a faint diagonal hatch.
pub fn foil_cover(width: usize, height: usize) -> FrameBuffer {
    let mut fb = FrameBuffer::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let hatch = if (x + y) % 8 < 2 { 18 } else { 0 };
            let v = (168 + (y * 40 / height.max(1)) as u32 - hatch).min(255);
            fb.pixels[y * width + x] = (v << 16) | (v << 8) | v;
        }
    }
    fb
}

/// Default prize: warm vertical gradient.
pub fn gradient_prize(width: usize, height: usize) -> FrameBuffer {
    let mut fb = FrameBuffer::new(width, height);
    for y in 0..height {
        let t = y as f32 / height.max(1) as f32;
        let r = 255u32;
        let g = (200.0 - 120.0 * t) as u32;
        let b = (60.0 + 40.0 * t) as u32;
        let px = (r << 16) | (g << 8) | b;
        fb.pixels[y * width..(y + 1) * width].fill(px);
    }
    fb
}

/// out = mix(cover, prize, mask/255) per pixel, gamma correct.
pub fn reveal_through_mask(
    out: &mut FrameBuffer,
    cover: &FrameBuffer,
    prize: &FrameBuffer,
    mask: &GrayImage,
    lut: &GammaLut,
) -> Result<(), AppError> {
    let (mw, mh) = mask.dimensions();
    for fb in [&*out, cover, prize] {
        if fb.width != mw as usize || fb.height != mh as usize {
            return Err(AppError::Image(format!(
                "compose: {}x{} frame vs {mw}x{mh} mask",
                fb.width, fb.height
            )));
        }
    }

    for (i, m) in mask.as_raw().iter().enumerate() {
        out.pixels[i] = match *m {
            0 => cover.pixels[i],   // still covered
            255 => prize.pixels[i], // scratched clean
            a => {
                let t = a as f32 / 255.0;
                let (pc, pp) = (cover.pixels[i], prize.pixels[i]);
                let r = lut.mix(((pc >> 16) & 0xFF) as u8, ((pp >> 16) & 0xFF) as u8, t) as u32;
                let g = lut.mix(((pc >> 8) & 0xFF) as u8, ((pp >> 8) & 0xFF) as u8, t) as u32;
                let b = lut.mix((pc & 0xFF) as u8, (pp & 0xFF) as u8, t) as u32;
                (r << 16) | (g << 8) | b
            }
        };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn solid(w: usize, h: usize, px: u32) -> FrameBuffer {
        FrameBuffer { width: w, height: h, pixels: vec![px; w * h] }
    }

    #[test]
    fn mask_selects_cover_or_prize() {
        let cover = solid(2, 1, 0x00_80_80_80);
        let prize = solid(2, 1, 0x00_FF_00_00);
        let mask = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 0 } else { 255 }]));
        let mut out = FrameBuffer::new(2, 1);
        reveal_through_mask(&mut out, &cover, &prize, &mask, &GammaLut::new()).unwrap();
        assert_eq!(out.pixels, vec![0x00_80_80_80, 0x00_FF_00_00]);
    }

    #[test]
    fn partial_mask_blends() {
        let cover = solid(1, 1, 0x00_00_00_00);
        let prize = solid(1, 1, 0x00_FF_FF_FF);
        let mask = GrayImage::from_pixel(1, 1, Luma([128]));
        let mut out = FrameBuffer::new(1, 1);
        reveal_through_mask(&mut out, &cover, &prize, &mask, &GammaLut::new()).unwrap();
        let r = (out.pixels[0] >> 16) & 0xFF;
        assert!(r > 0 && r < 255);
    }

    #[test]
    fn size_mismatch_is_an_error() {
        let cover = solid(2, 2, 0);
        let prize = solid(2, 2, 0);
        let mask = GrayImage::new(3, 2);
        let mut out = FrameBuffer::new(2, 2);
        assert!(reveal_through_mask(&mut out, &cover, &prize, &mask, &GammaLut::new()).is_err());
    }

    #[test]
    fn from_rgb_packs_channels() {
        let img = RgbImage::from_pixel(1, 1, image::Rgb([0x12, 0x34, 0x56]));
        assert_eq!(FrameBuffer::from_rgb(&img).pixels, vec![0x00_12_34_56]);
    }
}
