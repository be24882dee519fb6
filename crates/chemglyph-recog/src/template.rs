//! Template library
//!
//! A [`TemplateSet`] holds one [`Template`] per labeled sample glyph. Each
//! template stores two distance maps over a padded canvas of side
//! `canonical_size + 2 * penalty_shift`:
//!
//! - the ink map holds, for every canvas cell, the ring radius to the
//!   nearest ink pixel of the normalized sample
//! - the white map holds the square root of the ring radius to the
//!   nearest background pixel
//!
//! A cell with no matching pixel within `canonical_size` rings gets
//! `canonical_size` (before the square root for the white map).
//!
//! The set is built once, then shared read-only through an `Arc`.

use crate::normalize::{NormalizedGlyph, normalize};
use crate::{RecogError, RecogResult, RecognitionSettings};
use chemglyph_core::{Pix, PixelDepth};
use once_cell::sync::OnceCell;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Offset of the first printable byte in packed maps.
const PACK_BASE: u8 = 32;

/// Ring offsets grouped by rounded distance from the origin
///
/// `rings[r]` holds every `(dx, dy)` whose Euclidean length rounds to `r`.
#[derive(Debug, Clone)]
pub struct RingOffsets {
    rings: Vec<Vec<(i32, i32)>>,
}

impl RingOffsets {
    /// Build rings up to and including `radius`
    pub fn new(radius: usize) -> Self {
        let r = radius as i32;
        let mut rings = vec![Vec::new(); radius + 1];
        for dx in -r..=r {
            for dy in -r..=r {
                let d = ((dx * dx + dy * dy) as f64).sqrt().round() as usize;
                if d <= radius {
                    rings[d].push((dx, dy));
                }
            }
        }
        Self { rings }
    }

    /// Largest radius
    pub fn radius(&self) -> usize {
        self.rings.len() - 1
    }

    /// Offsets of ring `r`
    pub fn ring(&self, r: usize) -> &[(i32, i32)] {
        &self.rings[r]
    }

    /// Smallest ring radius around (`x`, `y`) reaching a glyph pixel whose
    /// ink state equals `ink`.
    fn nearest(&self, glyph: &NormalizedGlyph, x: i32, y: i32, ink: bool) -> Option<usize> {
        self.rings.iter().position(|ring| {
            ring.iter()
                .any(|&(dx, dy)| glyph.is_ink_at(x + dx, y + dy) == Some(ink))
        })
    }
}

/// Square grid of distances
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMap {
    side: usize,
    values: Vec<f64>,
}

impl DistanceMap {
    /// Wrap row-major `values` as a `side`×`side` map
    pub fn new(side: usize, values: Vec<f64>) -> RecogResult<Self> {
        if values.len() != side * side {
            return Err(RecogError::InvalidParameter(format!(
                "distance map of side {side} needs {} values, got {}",
                side * side,
                values.len()
            )));
        }
        Ok(Self { side, values })
    }

    /// Side length
    pub fn side(&self) -> usize {
        self.side
    }

    /// Value at (`x`, `y`)
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.side + x]
    }

    fn pack(&self, factor: u32) -> Vec<u8> {
        let scale = if factor == 0 { 1.0 } else { factor as f64 };
        self.values
            .iter()
            .map(|v| (v * scale).round().clamp(0.0, (255 - PACK_BASE) as f64) as u8 + PACK_BASE)
            .collect()
    }

    fn unpack(side: usize, bytes: &[u8], factor: u32) -> Option<Self> {
        if bytes.len() != side * side || bytes.iter().any(|&b| b < PACK_BASE) {
            return None;
        }
        let values = bytes
            .iter()
            .map(|&b| {
                let v = (b - PACK_BASE) as f64;
                if factor > 1 { v / factor as f64 } else { v }
            })
            .collect();
        Some(Self { side, values })
    }
}

/// Source data of one template asset
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// A decoded raster: 1 bpp ink mask or 8 bpp gray
    Raster(Pix),
    /// An image file held in memory (PNG, PNM, BMP)
    Encoded(Vec<u8>),
    /// Precomputed maps, each cell packed as `value * factor + 32`
    Packed {
        /// Width to height ratio of the sample
        ratio: f64,
        /// Packed ink map, row-major
        ink: Vec<u8>,
        /// Packed white map, row-major
        white: Vec<u8>,
        /// Fixed-point factor (0 or 1 store whole numbers)
        factor: u32,
    },
}

/// A labeled sample glyph
#[derive(Debug, Clone)]
pub struct TemplateAsset {
    /// Text the glyph stands for
    pub label: String,
    /// Sample data
    pub source: TemplateSource,
}

impl TemplateAsset {
    /// Asset from a decoded raster
    pub fn raster(label: impl Into<String>, pix: Pix) -> Self {
        Self {
            label: label.into(),
            source: TemplateSource::Raster(pix),
        }
    }

    /// Asset from an in-memory image file
    pub fn encoded(label: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            source: TemplateSource::Encoded(bytes),
        }
    }
}

/// A prototype glyph with its distance maps
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    label: String,
    ratio: f64,
    ink: DistanceMap,
    white: DistanceMap,
}

impl Template {
    /// Compute the distance maps of a normalized glyph.
    pub fn from_glyph(
        label: impl Into<String>,
        glyph: &NormalizedGlyph,
        margin: usize,
        rings: &RingOffsets,
    ) -> Self {
        let size = glyph.size();
        let side = size + 2 * margin;
        let fallback = rings.radius() as f64;
        let mut ink = Vec::with_capacity(side * side);
        let mut white = Vec::with_capacity(side * side);

        for cy in 0..side {
            let y = cy as i32 - margin as i32;
            for cx in 0..side {
                let x = cx as i32 - margin as i32;
                let to_ink = rings.nearest(glyph, x, y, true).map_or(fallback, |r| r as f64);
                let to_white = rings.nearest(glyph, x, y, false).map_or(fallback, |r| r as f64);
                ink.push(to_ink);
                white.push(to_white.sqrt());
            }
        }

        Self {
            label: label.into(),
            ratio: glyph.ratio(),
            ink: DistanceMap { side, values: ink },
            white: DistanceMap {
                side,
                values: white,
            },
        }
    }

    /// Assemble a template from existing maps.
    pub fn from_maps(
        label: impl Into<String>,
        ratio: f64,
        ink: DistanceMap,
        white: DistanceMap,
    ) -> Self {
        Self {
            label: label.into(),
            ratio,
            ink,
            white,
        }
    }

    /// Text the template stands for
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The label as a single character, if it is one
    pub fn single_char(&self) -> Option<char> {
        let mut chars = self.label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// Width to height ratio of the sample
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Distance-to-ink map
    pub fn ink_map(&self) -> &DistanceMap {
        &self.ink
    }

    /// Distance-to-background map (square-rooted)
    pub fn white_map(&self) -> &DistanceMap {
        &self.white
    }

    /// Pack the maps into the compact printable form.
    pub fn pack(&self, factor: u32) -> TemplateAsset {
        TemplateAsset {
            label: self.label.clone(),
            source: TemplateSource::Packed {
                ratio: self.ratio,
                ink: self.ink.pack(factor),
                white: self.white.pack(factor),
                factor,
            },
        }
    }

    /// Shift-tolerant chamfer distance of `glyph` against this template.
    ///
    /// Every offset pair in `0..=2 * penalty_shift` (stepping by
    /// `penalty_step`) is tried; offset `penalty_shift` on both axes lines
    /// the glyph up with the sample. The smallest per-offset sum wins.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::MalformedTemplate`] if the maps do not match
    /// the glyph size and margin.
    pub fn compare(&self, glyph: &NormalizedGlyph, settings: &RecognitionSettings) -> RecogResult<f64> {
        let shift = settings.penalty_shift as usize;
        let side = glyph.size() + 2 * shift;
        if self.ink.side != side || self.white.side != side {
            return Err(RecogError::MalformedTemplate {
                label: self.label.clone(),
                message: format!(
                    "maps are {}/{} wide, matching needs {side}",
                    self.ink.side, self.white.side
                ),
            });
        }

        let step = settings.penalty_step.max(1) as usize;
        let size = glyph.size();
        let mut best = f64::INFINITY;
        for shift_x in (0..=2 * shift).step_by(step) {
            for shift_y in (0..=2 * shift).step_by(step) {
                let mut sum = 0.0;
                for y in 0..size {
                    for x in 0..size {
                        let map = if glyph.is_ink(x, y) {
                            &self.ink
                        } else {
                            &self.white
                        };
                        sum += map.get(x + shift_x, y + shift_y);
                    }
                }
                best = best.min(sum);
            }
        }
        Ok(best)
    }
}

/// Convert a decoded gray image into an 8 bpp raster.
fn gray_to_pix(img: &image::GrayImage) -> RecogResult<Pix> {
    let mut pm = Pix::new(img.width(), img.height(), PixelDepth::Bit8)?.to_mut();
    for (x, y, px) in img.enumerate_pixels() {
        pm.set_pixel_unchecked(x, y, px.0[0] as u32);
    }
    Ok(pm.into())
}

fn build_template(
    asset: &TemplateAsset,
    settings: &RecognitionSettings,
    rings: &RingOffsets,
) -> RecogResult<Template> {
    let decode_error = |message: String| RecogError::TemplateDecode {
        label: asset.label.clone(),
        message,
    };

    let raster = match &asset.source {
        TemplateSource::Raster(pix) => pix.clone(),
        TemplateSource::Encoded(bytes) => {
            let img = image::load_from_memory(bytes).map_err(|e| decode_error(e.to_string()))?;
            gray_to_pix(&img.to_luma8())?
        }
        TemplateSource::Packed {
            ratio,
            ink,
            white,
            factor,
        } => {
            let side = settings.map_side();
            let ink = DistanceMap::unpack(side, ink, *factor);
            let white = DistanceMap::unpack(side, white, *factor);
            return match (ink, white) {
                (Some(ink), Some(white)) => Ok(Template::from_maps(&asset.label, *ratio, ink, white)),
                _ => Err(decode_error(format!("packed maps must hold {} cells", side * side))),
            };
        }
    };

    let glyph = normalize(&raster, settings)?
        .ok_or_else(|| decode_error("sample has no ink".to_string()))?;
    Ok(Template::from_glyph(
        &asset.label,
        &glyph,
        settings.penalty_shift as usize,
        rings,
    ))
}

/// Immutable collection of templates
#[derive(Debug, Clone)]
pub struct TemplateSet {
    templates: Vec<Template>,
}

impl TemplateSet {
    /// Build templates from assets.
    ///
    /// Assets that fail to decode or hold no ink are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`RecogError::NoTemplates`] if no asset produced a template,
    /// or a settings validation error.
    pub fn build(assets: &[TemplateAsset], settings: &RecognitionSettings) -> RecogResult<Self> {
        settings.validate()?;
        let rings = RingOffsets::new(settings.canonical_size as usize);

        let built: Vec<RecogResult<Template>> = assets
            .par_iter()
            .map(|asset| build_template(asset, settings, &rings))
            .collect();

        let mut templates = Vec::with_capacity(built.len());
        let mut skipped = 0usize;
        for result in built {
            match result {
                Ok(t) => templates.push(t),
                Err(e) => {
                    warn!(error = %e, "skipping template asset");
                    skipped += 1;
                }
            }
        }

        if templates.is_empty() {
            return Err(RecogError::NoTemplates {
                attempted: assets.len(),
            });
        }
        info!(count = templates.len(), skipped, "template library built");
        Ok(Self { templates })
    }

    /// Wrap already built templates.
    pub fn from_templates(templates: Vec<Template>) -> RecogResult<Self> {
        if templates.is_empty() {
            return Err(RecogError::NoTemplates { attempted: 0 });
        }
        Ok(Self { templates })
    }

    /// Number of templates
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Iterate over templates in asset order
    pub fn iter(&self) -> std::slice::Iter<'_, Template> {
        self.templates.iter()
    }

    /// Distinct labels, sorted
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.templates.iter().map(Template::label).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Pack every template for embedding.
    pub fn pack(&self, factor: u32) -> Vec<TemplateAsset> {
        self.templates.iter().map(|t| t.pack(factor)).collect()
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a Template;
    type IntoIter = std::slice::Iter<'a, Template>;

    fn into_iter(self) -> Self::IntoIter {
        self.templates.iter()
    }
}

/// Lazily built, process-wide template library
///
/// The first successful [`SharedTemplates::get_or_build`] call builds the
/// set; later calls get the same `Arc`. A failed build leaves the cell
/// empty so a later call may retry.
///
/// ```no_run
/// use chemglyph_recog::{RecognitionSettings, SharedTemplates, TemplateSet};
///
/// static FONT: SharedTemplates = SharedTemplates::new();
///
/// let set = FONT
///     .get_or_build(|| TemplateSet::build(&[], &RecognitionSettings::default()))
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct SharedTemplates {
    cell: OnceCell<Arc<TemplateSet>>,
}

impl SharedTemplates {
    /// Create an empty handle
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// The library, if it was built
    pub fn get(&self) -> Option<Arc<TemplateSet>> {
        self.cell.get().cloned()
    }

    /// Get the library, building it with `build` on first use.
    pub fn get_or_build<F>(&self, build: F) -> RecogResult<Arc<TemplateSet>>
    where
        F: FnOnce() -> RecogResult<TemplateSet>,
    {
        self.cell
            .get_or_try_init(|| {
                debug!("building shared template library");
                build().map(Arc::new)
            })
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask(w: u32, h: u32, ink: impl Fn(u32, u32) -> bool) -> Pix {
        let mut pm = Pix::new(w, h, PixelDepth::Bit1).unwrap().to_mut();
        for y in 0..h {
            for x in 0..w {
                if ink(x, y) {
                    pm.set_pixel_unchecked(x, y, 1);
                }
            }
        }
        pm.into()
    }

    fn small() -> RecognitionSettings {
        RecognitionSettings::default().with_canonical_size(10)
    }

    #[test]
    fn test_ring_offsets() {
        let rings = RingOffsets::new(3);
        assert_eq!(rings.radius(), 3);
        assert_eq!(rings.ring(0), &[(0, 0)]);
        assert_eq!(rings.ring(1).len(), 8);
        assert!(rings.ring(2).contains(&(2, 0)));
    }

    #[test]
    fn test_distance_maps_of_ring_glyph() {
        let settings = small();
        let pix = mask(10, 10, |x, y| x == 0 || y == 0 || x == 9 || y == 9);
        let glyph = normalize(&pix, &settings).unwrap().unwrap();
        let rings = RingOffsets::new(10);
        let t = Template::from_glyph("O", &glyph, 2, &rings);

        assert_eq!(t.ink_map().side(), 14);
        // canvas (2, 2) is glyph (0, 0), an ink pixel
        assert_eq!(t.ink_map().get(2, 2), 0.0);
        assert_eq!(t.white_map().get(2, 2), 1.0);
        // glyph (5, 5) sits 4 rings from the frame
        assert_eq!(t.ink_map().get(7, 7), 4.0);
        assert_eq!(t.white_map().get(7, 7), 0.0);
        // only pixels inside the glyph count, so the padded corner is four
        // rings from the first background pixel at glyph (1, 1)
        assert_eq!(t.white_map().get(0, 0), 2.0);
    }

    #[test]
    fn test_self_distance_is_zero() {
        let settings = small();
        let pix = mask(8, 12, |x, y| x < 3 || y > 8);
        let glyph = normalize(&pix, &settings).unwrap().unwrap();
        let rings = RingOffsets::new(10);
        let t = Template::from_glyph("L", &glyph, 2, &rings);
        assert_eq!(t.compare(&glyph, &settings).unwrap(), 0.0);
    }

    /// Chamfer sum of `glyph` placed at one offset on the template canvas
    fn sum_at(t: &Template, glyph: &NormalizedGlyph, sx: usize, sy: usize) -> f64 {
        let mut sum = 0.0;
        for y in 0..glyph.size() {
            for x in 0..glyph.size() {
                let map = if glyph.is_ink(x, y) { t.ink_map() } else { t.white_map() };
                sum += map.get(x + sx, y + sy);
            }
        }
        sum
    }

    #[test]
    fn test_compare_tolerates_translation() {
        let settings = RecognitionSettings::default().with_canonical_size(12);
        let margin = settings.penalty_shift as i32;
        // thick "H" with a two pixel white border
        let h = |x: i32, y: i32| {
            let bar = (4..=7).contains(&x) && (5..=6).contains(&y);
            (2..=9).contains(&y) && ((2..=3).contains(&x) || (8..=9).contains(&x) || bar)
        };
        let glyph = NormalizedGlyph::from_fn(12, h);
        let t = Template::from_glyph("H", &glyph, margin as usize, &RingOffsets::new(10));
        assert_eq!(t.compare(&glyph, &settings).unwrap(), 0.0);

        for (dx, dy) in [(1, 0), (0, 1), (1, 1), (-1, 1), (2, 1), (-2, -2)] {
            let moved = NormalizedGlyph::from_fn(12, |x, y| h(x - dx, y - dy));
            let d = t.compare(&moved, &settings).unwrap();
            // the offset that undoes the translation; only the uncovered
            // strip lands on the padded border
            let aligned = sum_at(&t, &moved, (margin - dx) as usize, (margin - dy) as usize);
            let centered = sum_at(&t, &moved, margin as usize, margin as usize);
            assert!((d - aligned).abs() < 1e-9, "({dx}, {dy}): {d} vs {aligned}");
            assert!(aligned < centered, "({dx}, {dy}): {aligned} vs {centered}");
        }
    }

    #[test]
    fn test_compare_rejects_wrong_geometry() {
        let settings = small();
        let pix = mask(4, 4, |_, _| true);
        let glyph = normalize(&pix, &settings).unwrap().unwrap();
        let t = Template::from_glyph("#", &glyph, 1, &RingOffsets::new(10));
        assert!(matches!(
            t.compare(&glyph, &settings),
            Err(RecogError::MalformedTemplate { .. })
        ));
    }

    #[test]
    fn test_pack_unpack() {
        let settings = small();
        let pix = mask(6, 6, |x, y| x == y);
        let glyph = normalize(&pix, &settings).unwrap().unwrap();
        let t = Template::from_glyph("\\", &glyph, 2, &RingOffsets::new(10));

        let set = TemplateSet::build(&[t.pack(1)], &settings).unwrap();
        let restored = set.iter().next().unwrap();
        assert_eq!(restored.ink_map(), t.ink_map());
        assert_eq!(restored.label(), "\\");

        let set = TemplateSet::build(&[t.pack(16)], &settings).unwrap();
        let restored = set.iter().next().unwrap();
        let (a, b) = (restored.white_map().get(0, 0), t.white_map().get(0, 0));
        assert!((a - b).abs() <= 1.0 / 32.0);
    }

    #[test]
    fn test_build_skips_bad_assets() {
        let settings = small();
        let assets = vec![
            TemplateAsset::raster("I", mask(3, 9, |_, _| true)),
            TemplateAsset::encoded("X", b"not an image".to_vec()),
            TemplateAsset::raster("-", mask(5, 5, |_, _| false)),
            TemplateAsset {
                label: "Z".into(),
                source: TemplateSource::Packed {
                    ratio: 1.0,
                    ink: vec![32; 3],
                    white: vec![32; 3],
                    factor: 1,
                },
            },
        ];
        let set = TemplateSet::build(&assets, &settings).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.labels(), vec!["I"]);
    }

    #[test]
    fn test_build_needs_one_template() {
        let err = TemplateSet::build(&[], &small()).unwrap_err();
        assert!(matches!(err, RecogError::NoTemplates { attempted: 0 }));
    }

    #[test]
    fn test_encoded_asset() {
        let mut img = image::GrayImage::from_pixel(8, 8, image::Luma([255u8]));
        for y in 1..7 {
            img.put_pixel(3, y, image::Luma([0u8]));
            img.put_pixel(4, y, image::Luma([0u8]));
        }
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();

        let set = TemplateSet::build(&[TemplateAsset::encoded("l", bytes)], &small()).unwrap();
        let t = set.iter().next().unwrap();
        assert!((t.ratio() - 2.0 / 6.0).abs() < 1e-9);
        assert_eq!(t.single_char(), Some('l'));
    }

    #[test]
    fn test_shared_templates_build_once() {
        let shared = SharedTemplates::new();
        assert!(shared.get().is_none());
        assert!(shared.get_or_build(|| TemplateSet::build(&[], &small())).is_err());

        let build = || {
            let assets = [TemplateAsset::raster("I", mask(3, 9, |_, _| true))];
            TemplateSet::build(&assets, &small())
        };
        let a = shared.get_or_build(build).unwrap();
        let b = shared.get_or_build(|| panic!("built twice")).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
