//! Shared helpers for the example binaries: tracing setup, texture fixtures,
//! and a top-down PNG renderer for placement results.
use image::{Rgb, RgbImage};
use surface_scatter::prelude::{ImageTexture, PlacedInstance, Rgba};

/// Initializes a plain `tracing` subscriber for the examples.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

/// Checkerboard of two colors, `cells` squares per side.
pub fn checkerboard_texture(size: usize, cells: usize, a: Rgba, b: Rgba) -> ImageTexture {
    let cell = (size / cells).max(1);
    let pixels = (0..size * size)
        .map(|i| {
            let x = i % size;
            let y = i / size;
            if (x / cell + y / cell) % 2 == 0 {
                a
            } else {
                b
            }
        })
        .collect();
    ImageTexture::try_new(size, size, pixels).expect("pixel count matches dimensions")
}

/// Rendering parameters for [`render_placements_to_png`].
pub struct RenderConfig {
    /// Output image size in pixels (width, height).
    pub image_size: (u32, u32),
    /// World-space XZ bounds mapped to the image: (min_x, min_z, max_x, max_z).
    pub bounds: (f32, f32, f32, f32),
    /// Background color.
    pub background: [u8; 3],
    /// Marker color.
    pub marker: [u8; 3],
    /// Marker radius in pixels.
    pub marker_radius: i32,
}

impl RenderConfig {
    /// Config mapping the unit quad onto the given image size.
    pub fn unit(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            bounds: (0.0, 0.0, 1.0, 1.0),
            background: [240, 240, 244],
            marker: [30, 144, 255],
            marker_radius: 3,
        }
    }

    pub fn with_marker(mut self, marker: [u8; 3], radius: i32) -> Self {
        self.marker = marker;
        self.marker_radius = radius;
        self
    }
}

/// Renders placements top-down (world XZ) to a PNG file.
pub fn render_placements_to_png(
    placements: &[PlacedInstance],
    config: &RenderConfig,
    path: &str,
) -> anyhow::Result<()> {
    let (width, height) = config.image_size;
    let (min_x, min_z, max_x, max_z) = config.bounds;
    let mut img = RgbImage::from_pixel(width, height, Rgb(config.background));

    for placed in placements {
        let t = placed.transform.translation;
        let u = (t.x - min_x) / (max_x - min_x);
        let v = (t.z - min_z) / (max_z - min_z);
        let cx = (u * width as f32) as i32;
        let cy = (v * height as f32) as i32;
        let r = config.marker_radius;
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy > r * r {
                    continue;
                }
                let x = cx + dx;
                let y = cy + dy;
                if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                    img.put_pixel(x as u32, y as u32, Rgb(config.marker));
                }
            }
        }
    }

    img.save(path)?;
    Ok(())
}
