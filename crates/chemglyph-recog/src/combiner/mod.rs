//! Label combining
//!
//! Groups recognized glyph segments into text labels:
//!
//! 1. estimate the capital letter height of the drawing
//! 2. link glyph centers by a relative neighborhood graph
//! 3. drop links between glyphs that are not on a common text line or
//!    stacked over each other
//! 4. read every connected component as one label, in line order
//!
//! # Example
//!
//! ```no_run
//! use chemglyph_recog::{CapitalHeight, LabelCombiner, RecognitionSettings, Segment};
//!
//! let symbols: Vec<Segment> = Vec::new();
//! let combiner = LabelCombiner::with_capital_height(
//!     symbols,
//!     CapitalHeight::Measured(20),
//!     RecognitionSettings::default(),
//! );
//! for label in combiner.labels() {
//!     println!("{:?} with {} glyphs", label.rect, label.len());
//! }
//! ```

mod graph;
mod label;
mod stray;

pub use graph::ProximityGraph;
pub use label::Label;

use crate::recognizer::GlyphRecognizer;
use crate::{RecogError, RecogResult, RecognitionSettings, Segment, charset};
use tracing::{debug, trace, warn};

/// Capital letter height of a drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapitalHeight {
    /// Height in pixels
    Measured(i32),
    /// No glyph looked like a capital letter
    Undetermined,
}

impl CapitalHeight {
    /// The height, if measured
    pub fn value(self) -> Option<i32> {
        match self {
            Self::Measured(h) => Some(h),
            Self::Undetermined => None,
        }
    }
}

/// Estimate the capital letter height from the symbol layer.
///
/// Every symbol is recognized against the full alphabet and only counts
/// when its best character is uppercase. The best match among those at
/// least as tall as the mean height wins; a shorter but
/// still taller-than-current symbol may win with a distance below
/// `capital_fallback_distance` unless it reads as `O`.
///
/// # Errors
///
/// Returns [`RecogError::EmptyInput`] if `symbols` is empty.
pub fn estimate_capital_height(
    symbols: &[Segment],
    recognizer: &dyn GlyphRecognizer,
    settings: &RecognitionSettings,
) -> RecogResult<CapitalHeight> {
    if symbols.is_empty() {
        return Err(RecogError::EmptyInput("capital height needs at least one symbol"));
    }
    let mean = symbols.iter().map(|s| s.height() as i64).sum::<i64>() / symbols.len() as i64;
    let mean = mean as i32;

    let mut min_d = f64::MAX;
    let mut cap: Option<i32> = None;
    for seg in symbols {
        let rd = match recognizer.recognize(seg, charset::ALL) {
            Ok(rd) => rd,
            Err(e) => {
                warn!(error = %e, "recognition failed while estimating capital height");
                continue;
            }
        };
        let Some((c, d)) = rd.best().filter(|(c, _)| charset::UPPER.contains(*c)) else {
            continue;
        };
        let h = seg.height();
        if d < min_d && h >= mean {
            min_d = d;
            cap = Some(h);
        } else if d < min_d
            && cap.is_none_or(|cur| h > cur)
            && d < settings.capital_fallback_distance
            && c != 'O'
        {
            min_d = d;
            cap = Some(h);
        }
    }

    debug!(mean, capital_height = ?cap, "estimated capital height");
    Ok(cap.map_or(CapitalHeight::Undetermined, CapitalHeight::Measured))
}

/// Check whether a graph link between two glyphs is a text relation.
///
/// `b` and `e` are the link's endpoints in construction order.
fn keep_edge(b: &Segment, e: &Segment) -> bool {
    let (bx, by) = b.center();
    let (ex, ey) = e.center();
    let (dx, dy) = (ex - bx, ey - by);
    let sign_x = if dx > 0.0 { 1.0 } else { -1.0 };
    let sign_y = if dy > 0.0 { 1.0 } else { -1.0 };

    let (wb, we) = (b.width() as f64, e.width() as f64);
    let (hb, he) = (b.height() as f64, e.height() as f64);
    let width = (wb + 2.0 * we) / 3.0;
    let mut height = hb.min(he);

    let x_b = wb * sign_x / 2.0 + bx;
    let x_e = -we * sign_x / 2.0 + ex;
    let y_b = hb * sign_y / 2.0 + by;
    let y_e = -he * sign_y / 2.0 + ey;

    let within = |v: f64, center: f64, half: f64| v > center - half && v < center + half;
    let stacked = (by < ey && within(ey, y_b, height / 2.0))
        || (ey < by && within(by, y_e, height / 2.0));
    if stacked {
        height = hb.max(he);
    } else {
        height /= 2.0;
    }

    ((y_e - y_b).abs() < width && (bx - ex).abs() < width / 2.0)
        || ((x_e - x_b).abs() < width && (by - ey).abs() < height)
}

/// Group `symbols` into ordered labels.
fn locate_labels(symbols: &[Segment], cap_height: i32, settings: &RecognitionSettings) -> Vec<Label> {
    let centers: Vec<(f64, f64)> = symbols.iter().map(Segment::center).collect();
    let mut graph = ProximityGraph::relative_neighborhood(&centers);
    let total = graph.edges().len();
    graph.retain_edges(|i, j| {
        let keep = keep_edge(&symbols[i], &symbols[j]);
        trace!(i, j, keep, "label edge");
        keep
    });

    let components = graph.components();
    debug!(
        edges = total,
        kept = graph.edges().len(),
        components = components.len(),
        "located labels"
    );

    components
        .into_iter()
        .filter_map(|members| {
            let members = members.into_iter().map(|i| (i, symbols[i].clone())).collect();
            label::order_label(members, cap_height, settings)
        })
        .collect()
}

/// Groups a symbol layer into text labels
#[derive(Debug, Clone)]
pub struct LabelCombiner {
    symbols: Vec<Segment>,
    capital_height: CapitalHeight,
    settings: RecognitionSettings,
    labels: Vec<Label>,
}

impl LabelCombiner {
    /// Estimate the capital height with `recognizer` and locate labels.
    ///
    /// An empty symbol layer gives an undetermined capital height and no
    /// labels.
    pub fn new(
        symbols: Vec<Segment>,
        recognizer: &dyn GlyphRecognizer,
        settings: RecognitionSettings,
    ) -> RecogResult<Self> {
        settings.validate()?;
        let capital_height = match estimate_capital_height(&symbols, recognizer, &settings) {
            Ok(cap) => cap,
            Err(RecogError::EmptyInput(_)) => CapitalHeight::Undetermined,
            Err(e) => return Err(e),
        };
        Ok(Self::with_capital_height(symbols, capital_height, settings))
    }

    /// Like [`LabelCombiner::new`], pulling strays from `other_layer`
    /// first when `fetch_stray_symbols` is set.
    pub fn new_with_layers(
        symbols: Vec<Segment>,
        other_layer: &mut Vec<Segment>,
        recognizer: &dyn GlyphRecognizer,
        settings: RecognitionSettings,
    ) -> RecogResult<Self> {
        let mut combiner = Self::new(symbols, recognizer, settings)?;
        if combiner.settings.fetch_stray_symbols {
            combiner.fetch_symbols(other_layer)?;
        }
        Ok(combiner)
    }

    /// Locate labels with a known capital height.
    pub fn with_capital_height(
        symbols: Vec<Segment>,
        capital_height: CapitalHeight,
        settings: RecognitionSettings,
    ) -> Self {
        let mut combiner = Self {
            symbols,
            capital_height,
            settings,
            labels: Vec::new(),
        };
        combiner.relocate();
        combiner
    }

    fn relocate(&mut self) {
        self.labels = match self.capital_height {
            CapitalHeight::Measured(cap) => locate_labels(&self.symbols, cap, &self.settings),
            CapitalHeight::Undetermined => Vec::new(),
        };
    }

    /// Move glyph-like strays from `other_layer` into the symbol layer and
    /// locate labels again.
    ///
    /// Does nothing without a measured capital height. Returns the number
    /// of moved segments.
    pub fn fetch_symbols(&mut self, other_layer: &mut Vec<Segment>) -> RecogResult<usize> {
        let CapitalHeight::Measured(cap) = self.capital_height else {
            return Ok(0);
        };
        let moved = stray::fetch_strays(&mut self.symbols, other_layer, cap, &self.settings)?;
        if moved > 0 {
            debug!(moved, "fetched stray symbols");
            self.relocate();
        }
        Ok(moved)
    }

    /// Capital height used for line splitting
    pub fn capital_height(&self) -> CapitalHeight {
        self.capital_height
    }

    /// Current symbol layer
    pub fn symbols(&self) -> &[Segment] {
        &self.symbols
    }

    /// Located labels
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Take the located labels.
    pub fn extract_labels(self) -> Vec<Label> {
        self.labels
    }
}
