//! Scale regression test
//!
//! Brings rendered glyphs of several sizes to a common square and checks
//! that the ink survives the round through gray.

use chemglyph_test::{RegParams, render_glyph};
use chemglyph_transform::{ScaleMethod, scale, scale_by_sampling, scale_to_size};

#[test]
fn scale_reg() {
    let mut rp = RegParams::new("scale");

    let mask = render_glyph('H', 4).expect("render H");
    let gray = mask.to_gray_ink().expect("to gray");
    let (w, h) = (gray.width(), gray.height());

    // --- Test 1: Scale up 2x ---
    let up2 = scale(&gray, 2.0, 2.0, ScaleMethod::Linear).expect("scale 2x");
    rp.compare_values((w * 2) as f64, up2.width() as f64, 0.0);
    rp.compare_values((h * 2) as f64, up2.height() as f64, 0.0);

    // --- Test 2: Shrink to the canonical square ---
    let square = scale_to_size(&gray, 30, 30).expect("scale_to_size");
    rp.compare_values(30.0, square.width() as f64, 0.0);
    rp.compare_values(30.0, square.height() as f64, 0.0);

    // Left stem stays dark, the gap between the stems stays light.
    let back = square.threshold_to_binary(190).expect("threshold");
    rp.compare_bools(true, back.is_ink(1, 5));
    rp.compare_bools(false, back.is_ink(15, 5));
    rp.compare_bools(true, back.is_ink(15, 15));

    // --- Test 3: Sampling keeps a mask a mask ---
    let sampled = scale_by_sampling(&mask, 0.5, 0.5).expect("sampling");
    rp.compare_values(1.0, sampled.depth().bits() as f64, 0.0);
    rp.compare_values((mask.width() / 2) as f64, sampled.width() as f64, 0.0);

    // --- Test 4: Identity ---
    let same = scale(&gray, 1.0, 1.0, ScaleMethod::AreaMap).expect("identity");
    rp.compare_pix(&gray, &same);

    assert!(rp.cleanup());
}
