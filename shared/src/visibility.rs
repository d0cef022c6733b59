//! Viewport activation band and the visibility-report plumbing that feeds the
//! sync coordinator.
//!
//! A section counts as focused while its vertical extent intersects the band:
//! the viewport shrunk by `top` from above and by `bottom` from below, both as
//! fractions of the viewport height. With the defaults this is the strip from
//! 8% to 35% of the way down the screen, which keeps the section being read
//! (rather than anything merely visible) in focus.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivationBand {
    pub top: f64,
    pub bottom: f64,
}

impl Default for ActivationBand {
    fn default() -> Self {
        Self {
            top: 0.08,
            bottom: 0.65,
        }
    }
}

impl ActivationBand {
    /// `rootMargin` for an `IntersectionObserver`, e.g. `"-8% 0px -65% 0px"`.
    /// A negative fraction grows the band past that viewport edge.
    pub fn root_margin(&self) -> String {
        format!(
            "{}% 0px {}% 0px",
            percent(-self.top),
            percent(-self.bottom)
        )
    }

    /// Band edges in pixels from the top of a viewport of the given height.
    pub fn edges(&self, viewport_height: f64) -> (f64, f64) {
        (
            viewport_height * self.top,
            viewport_height * (1.0 - self.bottom),
        )
    }

    /// True when `[top, bottom]` (element rect relative to the viewport) touches the band.
    pub fn intersects(&self, top: f64, bottom: f64, viewport_height: f64) -> bool {
        let (band_top, band_bottom) = self.edges(viewport_height);
        if band_bottom < band_top {
            return false;
        }
        top <= band_bottom && bottom >= band_top
    }
}

fn percent(fraction: f64) -> String {
    let value = (fraction * 100.0 * 1000.0).round() / 1000.0;
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityReport {
    pub id: String,
    pub focused: bool,
}

impl VisibilityReport {
    pub fn focused(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            focused: true,
        }
    }

    pub fn unfocused(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            focused: false,
        }
    }
}

/// Receives one batch of reports per re-evaluation, in report order.
pub type ReportSink = Rc<dyn Fn(Vec<VisibilityReport>)>;

/// A platform capability that watches sections against an activation band.
pub trait VisibilitySource {
    type Error;

    /// Registers every section id and starts delivering batches to `on_report`.
    /// Returns how many sections were registered.
    fn observe(
        &mut self,
        section_ids: &[String],
        band: ActivationBand,
        on_report: ReportSink,
    ) -> Result<usize, Self::Error>;
}

/// Starts `source` unless there is nothing to watch. Returns whether it was started.
pub fn start<S: VisibilitySource>(
    source: &mut S,
    section_ids: &[String],
    band: ActivationBand,
    on_report: ReportSink,
) -> Result<bool, S::Error> {
    if section_ids.is_empty() {
        tracing::info!("no itinerary sections on page; visibility observer not started");
        return Ok(false);
    }
    let registered = source.observe(section_ids, band, on_report)?;
    tracing::debug!(registered, root_margin = %band.root_margin(), "visibility observer started");
    Ok(registered > 0)
}

/// Geometry-driven evaluator for sources that poll element rects (e.g. on scroll)
/// instead of relying on native intersection observation. Emits a report only
/// for sections whose focus changed since the previous evaluation.
#[derive(Debug, Clone)]
pub struct BandEvaluator {
    band: ActivationBand,
    sections: Vec<(String, bool)>,
}

impl BandEvaluator {
    pub fn new(section_ids: &[String], band: ActivationBand) -> Self {
        Self {
            band,
            sections: section_ids.iter().map(|id| (id.clone(), false)).collect(),
        }
    }

    /// `rect_of` returns an element's `(top, bottom)` relative to the viewport;
    /// sections with no geometry are treated as unfocused.
    pub fn evaluate(
        &mut self,
        viewport_height: f64,
        rect_of: impl Fn(&str) -> Option<(f64, f64)>,
    ) -> Vec<VisibilityReport> {
        let mut changes = Vec::new();
        for (id, was_focused) in &mut self.sections {
            let focused = rect_of(id)
                .is_some_and(|(top, bottom)| self.band.intersects(top, bottom, viewport_height));
            if focused != *was_focused {
                *was_focused = focused;
                changes.push(VisibilityReport {
                    id: id.clone(),
                    focused,
                });
            }
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_root_margin() {
        assert_eq!(ActivationBand::default().root_margin(), "-8% 0px -65% 0px");
        let band = ActivationBand {
            top: 0.125,
            bottom: 0.5,
        };
        assert_eq!(band.root_margin(), "-12.5% 0px -50% 0px");
    }

    #[test]
    fn band_reaching_past_the_viewport_gives_positive_margin() {
        let above = ActivationBand {
            top: -0.05,
            bottom: 0.65,
        };
        assert_eq!(above.root_margin(), "5% 0px -65% 0px");

        let both = ActivationBand {
            top: -0.1,
            bottom: -0.25,
        };
        assert_eq!(both.root_margin(), "10% 0px 25% 0px");

        let flush = ActivationBand {
            top: 0.0,
            bottom: 0.5,
        };
        assert_eq!(flush.root_margin(), "0% 0px -50% 0px");
    }

    #[test]
    fn band_edges_cover_upper_third() {
        let (top, bottom) = ActivationBand::default().edges(1000.0);
        assert!((top - 80.0).abs() < 1e-9);
        assert!((bottom - 350.0).abs() < 1e-9);
    }

    #[test]
    fn intersects_only_inside_band() {
        let band = ActivationBand::default();
        // section starting inside the band
        assert!(band.intersects(200.0, 900.0, 1000.0));
        // section entirely below the band
        assert!(!band.intersects(400.0, 900.0, 1000.0));
        // section scrolled above the band
        assert!(!band.intersects(-600.0, 50.0, 1000.0));
        // tall section spanning the band
        assert!(band.intersects(-600.0, 1400.0, 1000.0));
    }

    #[test]
    fn degenerate_band_never_intersects() {
        let band = ActivationBand {
            top: 0.6,
            bottom: 0.6,
        };
        assert!(!band.intersects(0.0, 1000.0, 1000.0));
    }

    fn ids(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn evaluator_reports_changes_in_registration_order() {
        let mut evaluator = BandEvaluator::new(&ids(&["a", "b", "c"]), ActivationBand::default());
        let mut rects: HashMap<&str, (f64, f64)> = HashMap::new();
        rects.insert("a", (100.0, 300.0));
        rects.insert("b", (310.0, 600.0));
        rects.insert("c", (700.0, 900.0));

        let first = evaluator.evaluate(1000.0, |id| rects.get(id).copied());
        assert_eq!(
            first,
            vec![VisibilityReport::focused("a"), VisibilityReport::focused("b")]
        );

        // unchanged geometry reports nothing
        assert!(evaluator.evaluate(1000.0, |id| rects.get(id).copied()).is_empty());

        rects.insert("a", (-200.0, 0.0));
        rects.insert("b", (10.0, 300.0));
        let second = evaluator.evaluate(1000.0, |id| rects.get(id).copied());
        assert_eq!(second, vec![VisibilityReport::unfocused("a")]);
    }

    #[test]
    fn evaluator_treats_missing_geometry_as_unfocused() {
        let mut evaluator = BandEvaluator::new(&ids(&["a"]), ActivationBand::default());
        assert!(evaluator.evaluate(800.0, |_| None).is_empty());
    }

    #[derive(Default)]
    struct Scripted {
        observed: Vec<String>,
    }

    impl VisibilitySource for Scripted {
        type Error = ();

        fn observe(
            &mut self,
            section_ids: &[String],
            _band: ActivationBand,
            on_report: ReportSink,
        ) -> Result<usize, ()> {
            self.observed = section_ids.to_vec();
            on_report(vec![VisibilityReport::focused(section_ids[0].clone())]);
            Ok(section_ids.len())
        }
    }

    #[test]
    fn start_skips_empty_section_list() {
        let mut source = Scripted::default();
        let sink: ReportSink = Rc::new(|_: Vec<VisibilityReport>| panic!("no reports expected"));
        assert_eq!(start(&mut source, &[], ActivationBand::default(), sink), Ok(false));
        assert!(source.observed.is_empty());
    }

    #[test]
    fn start_forwards_reports() {
        let mut source = Scripted::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_sink = seen.clone();
        let sink: ReportSink = Rc::new(move |batch: Vec<VisibilityReport>| {
            seen_sink.borrow_mut().extend(batch)
        });

        let started = start(&mut source, &ids(&["x", "y"]), ActivationBand::default(), sink);
        assert_eq!(started, Ok(true));
        assert_eq!(source.observed, ids(&["x", "y"]));
        assert_eq!(*seen.borrow(), vec![VisibilityReport::focused("x")]);
    }
}
