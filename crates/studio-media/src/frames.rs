//! Procedural frame rasterization.
//!
//! Each scene category gets a palette gradient plus a simple animated
//! pattern. Rendering is deterministic: the same scene index and frame
//! time always produce the same pixels.

use image::{Rgb, RgbImage};
use studio_models::SceneCategory;

/// Deterministic pseudo-random stream seeded by scene/particle index.
///
/// A plain LCG; quality does not matter here, stability across runs does.
struct ParticleRng(u64);

impl ParticleRng {
    fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }

    fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 33) as u32) as f32 / u32::MAX as f32
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t.clamp(0.0, 1.0)) as u8
}

fn lerp_color(a: [u8; 3], b: [u8; 3], t: f32) -> Rgb<u8> {
    Rgb([lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)])
}

fn blend(base: Rgb<u8>, accent: [u8; 3], strength: f32) -> Rgb<u8> {
    Rgb([
        lerp(base[0], accent[0], strength),
        lerp(base[1], accent[1], strength),
        lerp(base[2], accent[2], strength),
    ])
}

/// Render one frame for a scene.
///
/// `scene_index` seeds the particle layout; `t` is the normalized position
/// (0.0..1.0) within the scene and drives the animation.
pub fn render_frame(
    category: SceneCategory,
    scene_index: usize,
    t: f32,
    width: u32,
    height: u32,
) -> RgbImage {
    let palette = category.palette();
    let mut frame = RgbImage::new(width, height);

    // Vertical gradient between the palette's outer colors
    for y in 0..height {
        let row_t = y as f32 / height.max(1) as f32;
        let color = lerp_color(palette[0], palette[2], row_t);
        for x in 0..width {
            frame.put_pixel(x, y, color);
        }
    }

    match category {
        SceneCategory::EpicBattle | SceneCategory::GrandVista | SceneCategory::HeroicScene => {
            draw_rays(&mut frame, palette[1], t)
        }
        SceneCategory::SacredTemple => draw_rays(&mut frame, palette[1], t * 0.5),
        SceneCategory::EmotionalCloseup => draw_glow(&mut frame, palette[1], t),
        SceneCategory::CinematicJourney => draw_bands(&mut frame, palette[1], t),
        SceneCategory::DarkRitual => draw_glow(&mut frame, palette[1], 0.3 + 0.1 * t),
        SceneCategory::FantasyRealm => draw_particles(&mut frame, palette[1], scene_index, t),
    }

    frame
}

/// Light rays fanning from the top center.
fn draw_rays(frame: &mut RgbImage, accent: [u8; 3], t: f32) {
    let (width, height) = frame.dimensions();
    let cx = width as f32 / 2.0;
    let sweep = t * std::f32::consts::PI / 8.0;

    for ray in 0..7 {
        let angle = (ray as f32 - 3.0) * 0.22 + sweep;
        for step in 0..height {
            let y = step as f32;
            let x = cx + angle.tan() * y;
            if x < 0.0 || x >= width as f32 {
                continue;
            }
            let fade = 1.0 - y / height as f32;
            let strength = 0.35 * fade;
            for dx in -2i32..=2 {
                let px = x as i32 + dx;
                if px >= 0 && (px as u32) < width {
                    let base = *frame.get_pixel(px as u32, step);
                    frame.put_pixel(px as u32, step, blend(base, accent, strength));
                }
            }
        }
    }
}

/// Soft radial glow centered on the frame.
fn draw_glow(frame: &mut RgbImage, accent: [u8; 3], t: f32) {
    let (width, height) = frame.dimensions();
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = width.min(height) as f32 * (0.3 + 0.1 * t);

    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < radius {
                let strength = 0.4 * (1.0 - dist / radius);
                let base = *frame.get_pixel(x, y);
                frame.put_pixel(x, y, blend(base, accent, strength));
            }
        }
    }
}

/// Horizontal motion bands sliding with time.
fn draw_bands(frame: &mut RgbImage, accent: [u8; 3], t: f32) {
    let (width, height) = frame.dimensions();
    let band_height = height / 12;
    let offset = (t * height as f32) as u32;

    for band in 0..3u32 {
        let top = (band * height / 3 + offset) % height;
        for y in top..(top + band_height).min(height) {
            for x in 0..width {
                let base = *frame.get_pixel(x, y);
                frame.put_pixel(x, y, blend(base, accent, 0.25));
            }
        }
    }
}

/// Floating particles drifting upward.
fn draw_particles(frame: &mut RgbImage, accent: [u8; 3], scene_index: usize, t: f32) {
    let (width, height) = frame.dimensions();
    let mut rng = ParticleRng::new(scene_index as u64 + 1);

    for _ in 0..60 {
        let x = (rng.next_f32() * width as f32) as u32;
        let base_y = rng.next_f32() * height as f32;
        let drift = t * height as f32 * 0.2;
        let y = ((base_y - drift).rem_euclid(height as f32)) as u32;
        let size = 1 + (rng.next_f32() * 3.0) as u32;

        for dy in 0..size {
            for dx in 0..size {
                let px = x.saturating_add(dx).min(width - 1);
                let py = y.saturating_add(dy).min(height - 1);
                let base = *frame.get_pixel(px, py);
                frame.put_pixel(px, py, blend(base, accent, 0.8));
            }
        }
    }
}
