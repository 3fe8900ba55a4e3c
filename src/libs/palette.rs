//! Color and label resolution.
//!
//! Calendars tag events with a small numeric color id. The user configures
//! an ordered list of color names (the i-th name is tag `i + 1`) and, for
//! each color name, the label under which its hours are reported. Tag `"0"`
//! is reserved for events without a color and is never labeled.
//!
//! Resolution is two explicit lookups, tag → color name → label, and either
//! step may come up empty. Gaps do not fail a run; they surface as
//! [`ReportError::MissingColorOrLabelMapping`] so the caller can log them.

use crate::libs::error::{MappingKind, ReportError};
use crate::libs::event::DEFAULT_COLOR_TAG;

/// Display name of the reserved tag `"0"`.
pub const DEFAULT_COLOR_NAME: &str = "Default";

/// Google Calendar event colors in color-id order (`1` = Lavender).
pub const GOOGLE_COLOR_NAMES: [&str; 11] = [
    "Lavender", "Sage", "Grape", "Flamingo", "Banana", "Tangerine", "Peacock", "Graphite", "Blueberry", "Basil", "Tomato",
];

/// Color tag → color name.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMap {
    entries: Vec<(String, String)>,
}

impl ColorMap {
    /// Builds the map from configured color names; always contains `"0"`.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Self {
        let mut entries = vec![(DEFAULT_COLOR_TAG.to_string(), DEFAULT_COLOR_NAME.to_string())];
        entries.extend(names.iter().enumerate().map(|(i, name)| ((i + 1).to_string(), name.as_ref().to_string())));
        Self { entries }
    }

    pub fn color_name(&self, tag: &str) -> Option<&str> {
        self.entries.iter().find(|(t, _)| t == tag).map(|(_, name)| name.as_str())
    }

    /// Reverse lookup: the first tag whose color is `name`.
    pub fn tag_for(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(_, n)| n == name).map(|(tag, _)| tag.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(t, n)| (t.as_str(), n.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Color name → label, in configured color order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelMap {
    entries: Vec<(String, String)>,
}

impl LabelMap {
    /// Pairs colors with labels by position. Colors past the end of `labels`
    /// stay unmapped, which is not the same as an empty label. Surplus labels
    /// are dropped. A repeated color keeps its first slot and takes the later
    /// label.
    pub fn from_pairs<S: AsRef<str>, L: AsRef<str>>(colors: &[S], labels: &[L]) -> Self {
        let mut map = Self::default();
        for (color, label) in colors.iter().zip(labels) {
            map.insert(color.as_ref(), label.as_ref().trim());
        }
        map
    }

    pub fn insert(&mut self, color: &str, label: &str) {
        match self.entries.iter_mut().find(|(c, _)| c == color) {
            Some(entry) => entry.1 = label.to_string(),
            None => self.entries.push((color.to_string(), label.to_string())),
        }
    }

    pub fn label(&self, color: &str) -> Option<&str> {
        self.entries.iter().find(|(c, _)| c == color).map(|(_, label)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(c, l)| (c.as_str(), l.as_str()))
    }

    /// Non-empty labels in map order.
    pub fn tracked(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(_, label)| !label.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of resolving one color tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelResolution {
    Labeled { color: String, label: String },
    Unlabeled { color: String },
    UnknownTag,
}

impl LabelResolution {
    pub fn color(&self) -> &str {
        match self {
            LabelResolution::Labeled { color, .. } | LabelResolution::Unlabeled { color } => color,
            LabelResolution::UnknownTag => "",
        }
    }

    pub fn label(&self) -> &str {
        match self {
            LabelResolution::Labeled { label, .. } => label,
            _ => "",
        }
    }
}

/// Both maps, built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub colors: ColorMap,
    pub labels: LabelMap,
}

impl Palette {
    pub fn new(colors: ColorMap, labels: LabelMap) -> Self {
        Self { colors, labels }
    }

    pub fn from_config<S: AsRef<str>, L: AsRef<str>>(color_names: &[S], labels: &[L]) -> Self {
        Self::new(ColorMap::from_names(color_names), LabelMap::from_pairs(color_names, labels))
    }

    pub fn resolve(&self, tag: &str) -> LabelResolution {
        let Some(color) = self.colors.color_name(tag) else {
            return LabelResolution::UnknownTag;
        };
        match self.labels.label(color) {
            Some(label) if !label.is_empty() => LabelResolution::Labeled {
                color: color.to_string(),
                label: label.to_string(),
            },
            _ => LabelResolution::Unlabeled { color: color.to_string() },
        }
    }

    /// The mapping gap behind a tag, if any.
    ///
    /// The default tag never reports a gap, and neither does a color whose
    /// configured label is deliberately left empty.
    pub fn gap(&self, tag: &str) -> Option<ReportError> {
        if tag == DEFAULT_COLOR_TAG {
            return None;
        }
        match self.colors.color_name(tag) {
            None => Some(ReportError::MissingColorOrLabelMapping {
                kind: MappingKind::Color,
                key: tag.to_string(),
            }),
            Some(color) if self.labels.label(color).is_none() => Some(ReportError::MissingColorOrLabelMapping {
                kind: MappingKind::Label,
                key: color.to_string(),
            }),
            Some(_) => None,
        }
    }

    /// Tag of a labeled color, used to line summary rows up with aggregates.
    pub fn tag_for_color(&self, color: &str) -> Option<&str> {
        self.colors.tag_for(color)
    }
}
