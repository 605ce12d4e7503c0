//! Textures, materials, and texture binding resolution.
//!
//! This module defines how texture data reaches the placement pipeline:
//! - Define custom sources by implementing [`Texture`].
//! - Group named texture slots on a [`Material`].
//! - Choose between auto-detection and a manual override with [`TextureBinding`].
use std::collections::HashMap;
use std::sync::Arc;

use mint::Vector2;
use tracing::warn;

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Ordered shader property names tried during auto-detection, after the
/// generic main slot. Covers the common naming conventions across shader
/// ecosystems; supply your own list on [`TextureBinding::Auto`] to override.
pub const DEFAULT_TEXTURE_PROPERTIES: &[&str] = &[
    "_MainTex",
    "_BaseMap",
    "_BaseColorMap",
    "_Albedo",
    "_Diffuse",
    "_ColorMap",
    "_Texture",
    "_MainTexture",
];

/// Trait for 2D textures sampled at a UV coordinate.
/// Implementors map UVs to their own texel space as needed.
pub trait Texture: Send + Sync {
    fn sample(&self, uv: Vector2<f32>) -> Rgba;
}

/// Owned RGBA raster sampled with nearest-neighbor lookup and repeat
/// wrapping. Row 0 is the v = 0 edge.
#[derive(Clone, Debug)]
pub struct ImageTexture {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl ImageTexture {
    /// Creates a texture from row-major pixel data.
    pub fn try_new(width: usize, height: usize, pixels: Vec<Rgba>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidConfig(
                "texture dimensions must be > 0".into(),
            ));
        }
        if pixels.len() != width * height {
            return Err(Error::InvalidConfig(format!(
                "texture data length {} does not match {}x{}",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 1x1 texture of a single color.
    pub fn solid(color: Rgba) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Texel at the given indices, `None` when out of bounds.
    pub fn texel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }
}

impl Texture for ImageTexture {
    fn sample(&self, uv: Vector2<f32>) -> Rgba {
        let u = uv.x - uv.x.floor();
        let v = uv.y - uv.y.floor();
        let x = ((u * self.width as f32) as usize).min(self.width - 1);
        let y = ((v * self.height as f32) as usize).min(self.height - 1);
        self.pixels[y * self.width + x]
    }
}

/// A material: named texture slots plus an optional generic main slot.
#[non_exhaustive]
#[derive(Default)]
pub struct Material {
    slots: HashMap<String, Arc<dyn Texture>>,
    main: Option<Arc<dyn Texture>>,
}

impl Material {
    /// Creates a new, empty [`Material`].
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            main: None,
        }
    }

    /// Sets the generic main texture and returns the material.
    pub fn with_main<T>(mut self, texture: T) -> Self
    where
        T: Texture + 'static,
    {
        self.main = Some(Arc::new(texture));
        self
    }

    /// Sets the generic main texture.
    pub fn set_main_arc(&mut self, texture: Arc<dyn Texture + 'static>) {
        self.main = Some(texture);
    }

    /// Registers a texture under a shader property name.
    pub fn register<T>(&mut self, property: impl Into<String>, texture: T)
    where
        T: Texture + 'static,
    {
        self.slots.insert(property.into(), Arc::new(texture));
    }

    /// Registers a texture under a shader property name using an [`Arc`].
    pub fn register_arc(
        &mut self,
        property: impl Into<String>,
        texture: Arc<dyn Texture + 'static>,
    ) {
        self.slots.insert(property.into(), texture);
    }

    /// Removes a slot by property name. Returns `true` if it existed.
    pub fn unregister(&mut self, property: &str) -> bool {
        self.slots.remove(property).is_some()
    }

    /// Checks whether a slot with the given property name exists.
    pub fn contains(&self, property: &str) -> bool {
        self.slots.contains_key(property)
    }

    /// Texture bound to the given property name, if any.
    pub fn get(&self, property: &str) -> Option<Arc<dyn Texture>> {
        self.slots.get(property).cloned()
    }

    /// The generic main texture, if set.
    pub fn main(&self) -> Option<Arc<dyn Texture>> {
        self.main.clone()
    }

    /// Returns the number of named slots, not counting the main slot.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.main.is_none()
    }
}

/// How the placement pipeline finds the texture to sample.
#[non_exhaustive]
pub enum TextureBinding {
    /// Try the material's main slot, then each property name in order,
    /// returning the first texture found.
    Auto { property_names: Vec<String> },
    /// Bypass detection and use the supplied handle. The property name
    /// records where the texture would live on the material.
    Manual {
        texture: Option<Arc<dyn Texture>>,
        property_name: String,
    },
}

impl TextureBinding {
    /// Auto-detection over [`DEFAULT_TEXTURE_PROPERTIES`].
    pub fn auto() -> Self {
        Self::Auto {
            property_names: DEFAULT_TEXTURE_PROPERTIES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }

    /// Manual override with the given texture handle.
    pub fn manual<T>(texture: T, property_name: impl Into<String>) -> Self
    where
        T: Texture + 'static,
    {
        Self::Manual {
            texture: Some(Arc::new(texture)),
            property_name: property_name.into(),
        }
    }

    /// Manual mode with no texture set yet. Resolution fails until one is
    /// supplied.
    pub fn manual_unset(property_name: impl Into<String>) -> Self {
        Self::Manual {
            texture: None,
            property_name: property_name.into(),
        }
    }

    /// Resolves the texture to sample for the given material.
    ///
    /// Auto mode signals [`Error::NoTextureBound`] when no slot holds a
    /// texture; manual mode signals [`Error::MissingManualTexture`] when the
    /// handle is unset.
    pub fn resolve(&self, material: &Material) -> Result<Arc<dyn Texture>> {
        match self {
            TextureBinding::Auto { property_names } => {
                if let Some(main) = material.main() {
                    return Ok(main);
                }
                for name in property_names {
                    if let Some(texture) = material.get(name) {
                        return Ok(texture);
                    }
                }
                warn!("No texture found in material during auto-detection.");
                Err(Error::NoTextureBound)
            }
            TextureBinding::Manual { texture, .. } => {
                texture.clone().ok_or(Error::MissingManualTexture)
            }
        }
    }
}

impl Default for TextureBinding {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_texture_rejects_mismatched_data() {
        assert!(ImageTexture::try_new(2, 2, vec![Rgba::RED; 3]).is_err());
        assert!(ImageTexture::try_new(0, 2, Vec::new()).is_err());
    }

    #[test]
    fn image_texture_samples_nearest_texel() {
        let pixels = vec![Rgba::RED, Rgba::GREEN, Rgba::BLUE, Rgba::WHITE];
        let texture = ImageTexture::try_new(2, 2, pixels).unwrap();

        assert_eq!(texture.sample([0.25, 0.25].into()), Rgba::RED);
        assert_eq!(texture.sample([0.75, 0.25].into()), Rgba::GREEN);
        assert_eq!(texture.sample([0.25, 0.75].into()), Rgba::BLUE);
        assert_eq!(texture.sample([0.75, 0.75].into()), Rgba::WHITE);
    }

    #[test]
    fn image_texture_wraps_uv_outside_unit_square() {
        let texture = ImageTexture::try_new(2, 1, vec![Rgba::RED, Rgba::BLUE]).unwrap();
        assert_eq!(texture.sample([1.25, 0.0].into()), Rgba::RED);
        assert_eq!(texture.sample([-0.25, 0.0].into()), Rgba::BLUE);
    }

    #[test]
    fn image_texture_texel_checks_bounds() {
        let texture = ImageTexture::try_new(2, 1, vec![Rgba::RED, Rgba::BLUE]).unwrap();
        assert_eq!(texture.texel(0, 0), Some(Rgba::RED));
        assert_eq!(texture.texel(1, 0), Some(Rgba::BLUE));
        assert_eq!(texture.texel(2, 0), None);
        assert_eq!(texture.texel(0, 1), None);
    }

    #[test]
    fn material_slot_management_roundtrip() {
        let mut material = Material::new();
        assert!(material.is_empty());

        material.register("_BaseMap", ImageTexture::solid(Rgba::GREEN));
        material.register_arc("_Albedo", Arc::new(ImageTexture::solid(Rgba::BLUE)));
        assert_eq!(material.len(), 2);
        assert!(material.contains("_Albedo"));

        assert!(material.unregister("_BaseMap"));
        assert!(!material.unregister("_BaseMap"));
        assert_eq!(material.len(), 1);
        assert!(!material.is_empty());
    }

    #[test]
    fn set_main_arc_takes_priority_over_slots() {
        let mut material = Material::new();
        material.register("_MainTex", ImageTexture::solid(Rgba::BLUE));
        material.set_main_arc(Arc::new(ImageTexture::solid(Rgba::RED)));

        let texture = TextureBinding::auto().resolve(&material).unwrap();
        assert_eq!(texture.sample([0.5, 0.5].into()), Rgba::RED);
        assert!(material.main().is_some());
    }

    #[test]
    fn auto_binding_prefers_main_slot() {
        let mut material = Material::new().with_main(ImageTexture::solid(Rgba::RED));
        material.register("_MainTex", ImageTexture::solid(Rgba::BLUE));

        let texture = TextureBinding::auto().resolve(&material).unwrap();
        assert_eq!(texture.sample([0.5, 0.5].into()), Rgba::RED);
    }

    #[test]
    fn auto_binding_walks_property_names_in_order() {
        let mut material = Material::new();
        material.register("_BaseMap", ImageTexture::solid(Rgba::GREEN));
        material.register("_MainTexture", ImageTexture::solid(Rgba::BLUE));

        // _BaseMap comes before _MainTexture in the default list.
        let texture = TextureBinding::auto().resolve(&material).unwrap();
        assert_eq!(texture.sample([0.5, 0.5].into()), Rgba::GREEN);
    }

    #[test]
    fn auto_binding_fails_on_empty_material() {
        let material = Material::new();
        assert!(matches!(
            TextureBinding::auto().resolve(&material),
            Err(Error::NoTextureBound)
        ));
    }

    #[test]
    fn manual_binding_ignores_material_slots() {
        let mut material = Material::new();
        material.register("_MainTex", ImageTexture::solid(Rgba::BLUE));

        let binding = TextureBinding::manual(ImageTexture::solid(Rgba::RED), "_MainTex");
        let texture = binding.resolve(&material).unwrap();
        assert_eq!(texture.sample([0.5, 0.5].into()), Rgba::RED);
    }

    #[test]
    fn manual_binding_without_texture_fails() {
        let material = Material::new().with_main(ImageTexture::solid(Rgba::RED));
        let binding = TextureBinding::manual_unset("_MainTex");
        assert!(matches!(
            binding.resolve(&material),
            Err(Error::MissingManualTexture)
        ));
    }
}
