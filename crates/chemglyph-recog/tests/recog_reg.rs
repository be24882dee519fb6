//! Character recognition regression test
//!
//! Builds a template library from the bitmap test font and recognizes
//! glyphs rendered at other sizes and page positions.

use chemglyph_recog::{
    CharacterRecognizer, MemoryCache, RecognitionSettings, Segment, SharedTemplates,
    TemplateAsset, TemplateSet, charset,
};
use chemglyph_test::{RegParams, blob, render_glyph};
use std::sync::Arc;

const LETTERS: &str = "CHNOSI";

fn font_assets(chars: &str, scale: u32) -> Vec<TemplateAsset> {
    chars
        .chars()
        .map(|c| TemplateAsset::raster(c.to_string(), render_glyph(c, scale).unwrap()))
        .collect()
}

fn recognizer(settings: RecognitionSettings) -> CharacterRecognizer {
    let mut assets = font_assets(LETTERS, 4);
    assets.push(TemplateAsset::raster("!", blob(30, 30).unwrap()));
    let set = TemplateSet::build(&assets, &settings).unwrap();
    CharacterRecognizer::new(Arc::new(set), settings).unwrap()
}

fn glyph_at(c: char, scale: u32, x: i32, y: i32) -> Segment {
    Segment::new(x, y, render_glyph(c, scale).unwrap()).unwrap()
}

#[test]
fn recog_reg_font() {
    let mut rp = RegParams::new("recog_font");
    let r = recognizer(RecognitionSettings::default());
    rp.compare_values(7.0, r.templates().len() as f64, 0.0);

    for c in LETTERS.chars() {
        // same size as the sample: exact match
        let rd = r.recognize(&glyph_at(c, 4, 120, 40), LETTERS).unwrap();
        let (best, d) = rd.best().unwrap();
        rp.compare_strings(&c.to_string(), &best.to_string());
        rp.compare_values(0.0, d, 1e-9);

        // larger rendering normalizes to nearly the same square
        let rd = r.recognize(&glyph_at(c, 6, 10, 300), LETTERS).unwrap();
        let best = rd.best().map(|(b, _)| b).unwrap_or(' ');
        rp.compare_strings(&c.to_string(), &best.to_string());
    }

    // restricting candidates restricts the result
    let rd = r.recognize(&glyph_at('N', 4, 0, 0), "HO").unwrap();
    rp.compare_values(2.0, rd.len() as f64, 0.0);
    rp.compare_bools(false, rd.get('N').is_some());

    assert!(rp.cleanup());
}

#[test]
fn recog_reg_possible_character() {
    let mut rp = RegParams::new("recog_possible");
    let r = recognizer(RecognitionSettings::default());

    let check = r.is_possible_character(&glyph_at('H', 4, 0, 0), false).unwrap();
    rp.compare_bools(true, check.accepted);
    rp.compare_strings("H", &check.best.map(String::from).unwrap_or_default());

    // a filled round blob reads as graphics
    let graphics = Segment::new(0, 0, blob(40, 40).unwrap()).unwrap();
    let check = r.is_possible_character(&graphics, true).unwrap();
    rp.compare_bools(false, check.accepted);
    rp.compare_strings("!", &check.best.map(String::from).unwrap_or_default());

    // a bond-like glyph needs enough stroke ends
    let strict = recognizer(RecognitionSettings::default().with_min_endpoints_possible(10));
    let check = strict.is_possible_character(&glyph_at('I', 4, 0, 0), true).unwrap();
    rp.compare_bools(false, check.accepted);
    rp.compare_strings("I", &check.best.map(String::from).unwrap_or_default());
    let check = r.is_possible_character(&glyph_at('I', 4, 0, 0), true).unwrap();
    rp.compare_bools(true, check.accepted);

    assert!(rp.cleanup());
}

#[test]
fn recog_reg_cache_and_batch() {
    let mut rp = RegParams::new("recog_cache");
    let cache = Arc::new(MemoryCache::new());
    let r = recognizer(RecognitionSettings::default()).with_cache(cache.clone());

    let segments: Vec<Segment> = "SONCH"
        .chars()
        .enumerate()
        .map(|(i, c)| glyph_at(c, 4, i as i32 * 24, 0))
        .collect();
    let results = r.recognize_batch(&segments, charset::UPPER).unwrap();
    let text: String = results.iter().filter_map(|rd| rd.best()).map(|(c, _)| c).collect();
    rp.compare_strings("SONCH", &text);
    rp.compare_values(5.0, cache.len() as f64, 0.0);

    // position does not enter the fingerprint
    let again = r.recognize(&glyph_at('S', 4, 500, 500), charset::UPPER).unwrap();
    rp.compare_bools(true, again == results[0]);
    rp.compare_values(5.0, cache.len() as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn recog_reg_settings() {
    let mut rp = RegParams::new("recog_settings");

    let text = "canonical_size = 20\npenalty_shift = 1\n";
    let settings = RecognitionSettings::from_key_values(text).unwrap();
    rp.compare_values(22.0, settings.map_side() as f64, 0.0);

    let r = recognizer(settings);
    let t = r.templates().iter().next().unwrap();
    rp.compare_values(22.0, t.ink_map().side() as f64, 0.0);

    // packed maps rebuild the same library
    let packed = r.templates().pack(8);
    let rebuilt = TemplateSet::build(&packed, r.settings()).unwrap();
    rp.compare_values(r.templates().len() as f64, rebuilt.len() as f64, 0.0);
    let r2 = CharacterRecognizer::new(Arc::new(rebuilt), r.settings().clone()).unwrap();
    let rd = r2.recognize(&glyph_at('O', 4, 0, 0), LETTERS).unwrap();
    rp.compare_strings("O", &rd.best().map(|(c, _)| c.to_string()).unwrap_or_default());

    assert!(rp.cleanup());
}

static SHARED: SharedTemplates = SharedTemplates::new();

#[test]
fn recog_reg_shared_library() {
    let mut rp = RegParams::new("recog_shared");
    let settings = RecognitionSettings::default();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let settings = settings.clone();
            std::thread::spawn(move || {
                SHARED
                    .get_or_build(|| TemplateSet::build(&font_assets("CH", 4), &settings))
                    .unwrap()
            })
        })
        .collect();
    let sets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    rp.compare_bools(true, sets.iter().all(|s| Arc::ptr_eq(s, &sets[0])));
    rp.compare_values(2.0, sets[0].len() as f64, 0.0);

    assert!(rp.cleanup());
}
