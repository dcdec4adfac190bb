//! Responsive background images.
//!
//! A [`ResponsiveBackground`] turns a width→URL table into a
//! [`BreakpointSet`] whose enter callbacks hand the matching URL to an
//! [`ImageSink`]. It has no logic of its own beyond that wiring.
//!
//! ## Size Tables
//!
//! Tables come from markup or config as string-keyed maps, the keys being
//! minimum viewport widths in pixels:
//!
//! ```json
//! {"0": "img/xs.jpg", "320": "img/sm.jpg", "768": "img/md.jpg", "1024": "img/lg.jpg"}
//! ```
//!
//! Keys need not be sorted. `"0"` is the usual below-everything default but is
//! not treated specially. Keys are trimmed and must parse as a `u32`;
//! anything else is rejected with [`BreakpointError::InvalidSizeKey`].
//!
//! ## No Revert on Exit
//!
//! Image breakpoints have no exit action. Dropping below the lowest key leaves
//! the last image in place; only entering a different breakpoint changes it.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use tracing::warn;

use crate::breakpoints::{Breakpoint, BreakpointError, BreakpointSet, Transition};

/// Receives the URL of each newly entered image breakpoint.
///
/// Any `FnMut(&str)` closure is a sink.
pub trait ImageSink {
    fn apply_image(&mut self, url: &str);
}

impl<F: FnMut(&str)> ImageSink for F {
    fn apply_image(&mut self, url: &str) {
        self(url)
    }
}

/// Validated width→URL table.
///
/// Deserialized maps (JSON attribute values, TOML tables) are registered in
/// JavaScript object-key order: canonical integer keys (`"320"`) ascending
/// first, then every other key (`"0320"`, `" 320"`) in document order. With
/// the later pair winning, `{"320": "a", "0320": "b"}` maps 320 to `"b"`
/// whichever way round the keys are written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(into = "BTreeMap<String, String>")]
pub struct ImageSizes(BTreeMap<u32, String>);

impl ImageSizes {
    /// Parse decimal-string width keys.
    ///
    /// When two keys parse to the same width (`"320"` and `"0320"`), the later
    /// pair wins.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, BreakpointError>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut sizes = BTreeMap::new();
        for (key, url) in pairs {
            let key = key.as_ref();
            let width = parse_width_key(key)?;
            if let Some(previous) = sizes.insert(width, url.into()) {
                warn!(key, width, %previous, "duplicate image width, keeping the later entry");
            }
        }
        Ok(Self(sizes))
    }

    /// Parse the JSON object form used in `data-bg-images` attributes.
    pub fn from_json(json: &str) -> Result<Self, BreakpointError> {
        Ok(serde_json::from_str(json)?)
    }

    /// URL for the greatest width not exceeding `width`.
    pub fn resolve(&self, width: f64) -> Option<&str> {
        if width.is_nan() || width < 0.0 {
            return None;
        }
        let bound = width.floor().min(f64::from(u32::MAX)) as u32;
        self.0.range(..=bound).next_back().map(|(_, url)| url.as_str())
    }

    pub fn get(&self, width: u32) -> Option<&str> {
        self.0.get(&width).map(String::as_str)
    }

    /// Entries ascending by width.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.0.iter().map(|(w, url)| (*w, url.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn parse_width_key(key: &str) -> Result<u32, BreakpointError> {
    key.trim()
        .parse::<u32>()
        .map_err(|_| BreakpointError::InvalidSizeKey(key.to_string()))
}

/// `key` as a JavaScript array index: canonical decimal below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    let n: u32 = key.parse().ok()?;
    (n != u32::MAX && n.to_string() == key).then_some(n)
}

/// Reorder pairs the way a JavaScript object enumerates its keys.
fn object_key_order(pairs: Vec<(String, String)>) -> Vec<(String, String)> {
    let (mut ordered, rest): (Vec<_>, Vec<_>) = pairs
        .into_iter()
        .partition(|(key, _)| array_index(key).is_some());
    ordered.sort_by_key(|(key, _)| array_index(key));
    ordered.extend(rest);
    ordered
}

impl<'de> Deserialize<'de> for ImageSizes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ImageSizesVisitor)
    }
}

struct ImageSizesVisitor;

impl<'de> Visitor<'de> for ImageSizesVisitor {
    type Value = ImageSizes;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of integer width keys to image URLs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut pairs: Vec<(String, String)> = Vec::new();
        while let Some((key, url)) = map.next_entry::<String, String>()? {
            // A repeated key keeps its first position and takes the last value.
            match pairs.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = url,
                None => pairs.push((key, url)),
            }
        }
        ImageSizes::from_pairs(object_key_order(pairs)).map_err(de::Error::custom)
    }
}

impl From<ImageSizes> for BTreeMap<String, String> {
    fn from(sizes: ImageSizes) -> Self {
        sizes
            .0
            .into_iter()
            .map(|(w, url)| (w.to_string(), url))
            .collect()
    }
}

/// CSS `background-image` value for `url`.
pub fn css_background_image(url: &str) -> String {
    let escaped = url.replace('\\', "\\\\").replace('"', "\\\"");
    format!("url(\"{escaped}\")")
}

/// One element's width-driven background image.
#[derive(Debug)]
pub struct ResponsiveBackground {
    sizes: ImageSizes,
    breakpoints: BreakpointSet,
}

impl ResponsiveBackground {
    /// Register one breakpoint per table entry, each applying its URL on enter.
    ///
    /// An empty table gives a binding that never applies anything.
    pub fn new(sizes: ImageSizes, sink: impl ImageSink + 'static) -> Self {
        let sink = Rc::new(RefCell::new(sink));
        let mut breakpoints = BreakpointSet::new();
        for (width, url) in sizes.iter() {
            let sink = sink.clone();
            let url = url.to_string();
            let bp = Breakpoint::new(f64::from(width))
                .on_enter(move || sink.borrow_mut().apply_image(&url));
            breakpoints.insert(bp);
        }
        Self { sizes, breakpoints }
    }

    /// Re-evaluate for a new viewport width.
    pub fn notify_width_changed(&mut self, width: f64) -> Result<Transition, BreakpointError> {
        self.breakpoints.evaluate(width)
    }

    pub fn sizes(&self) -> &ImageSizes {
        &self.sizes
    }

    /// Width of the active image breakpoint.
    pub fn current_width(&self) -> Option<u32> {
        self.breakpoints.current().map(|b| b.width as u32)
    }

    /// URL applied by the active breakpoint.
    pub fn current_image(&self) -> Option<&str> {
        self.current_width().and_then(|w| self.sizes.get(w))
    }
}
