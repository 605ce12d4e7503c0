#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{checkerboard_texture, init_tracing, render_placements_to_png, RenderConfig};
