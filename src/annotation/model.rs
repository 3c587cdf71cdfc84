use std::fmt;

// @module: Data model shared by the pipeline stages

/// One row of the raw annotation export.
///
/// Every field is optional: an empty cell in the export is treated as a
/// missing value and the row is later dropped by the normalizer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnnotationRow {
    // @field: Annotation track name (e.g. "Scene", "Gaze@CHI")
    pub tier_name: Option<String>,

    // @field: Start time as exported, `HH:MM:SS.mmm`
    pub start_time: Option<String>,

    // @field: End time as exported, `HH:MM:SS.mmm`
    pub end_time: Option<String>,

    // @field: Duration as exported, carried but unused
    pub duration: Option<String>,

    // @field: Free-text annotation, possibly with a `<digits>_` prefix
    pub annotation_value: Option<String>,
}

impl AnnotationRow {
    /// Create a row with every field present
    pub fn new(tier_name: &str, start_time: &str, end_time: &str, duration: &str, annotation_value: &str) -> Self {
        Self {
            tier_name: Some(tier_name.to_string()),
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
            duration: Some(duration.to_string()),
            annotation_value: Some(annotation_value.to_string()),
        }
    }

    /// True when the row belongs to the given tier (exact, untrimmed match)
    pub fn is_tier(&self, tier: &str) -> bool {
        self.tier_name.as_deref() == Some(tier)
    }
}

/// A scene window in the export's own string-time domain.
///
/// Timestamps are fixed-width, so string ordering equals chronological ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneInterval {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl SceneInterval {
    /// Whether the row's interval lies fully inside this scene.
    /// A missing time on either side never matches.
    pub fn contains(&self, row: &AnnotationRow) -> bool {
        match (&self.start_time, &self.end_time, &row.start_time, &row.end_time) {
            (Some(scene_start), Some(scene_end), Some(start), Some(end)) => {
                start.as_str() >= scene_start.as_str() && end.as_str() <= scene_end.as_str()
            }
            _ => false,
        }
    }
}

/// An annotation whose times were parsed and whose text was cleaned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedAnnotation {
    pub tier_name: String,
    pub annotation_value: String,
    pub duration: String,
    pub start_ms: u64,
    pub end_ms: u64,
    /// `start_ms / tick_ms`, floored
    pub start_tick: u64,
    /// `end_ms / tick_ms`, floored
    pub end_tick: u64,
}

impl NormalizedAnnotation {
    /// Active at `tick` means `start_tick <= tick < end_tick`
    pub fn is_active_at(&self, tick: u64) -> bool {
        self.start_tick <= tick && tick < self.end_tick
    }
}

/// One output record: an annotation active at a tick
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimeSliceRecord {
    // @field: Tick index in tick units (100 ms by default)
    pub tick: u64,

    // @field: Tier the annotation belongs to
    pub tier: String,

    // @field: Cleaned annotation text
    pub annotation: String,
}

impl TimeSliceRecord {
    pub fn new(tick: u64, tier: impl Into<String>, annotation: impl Into<String>) -> Self {
        Self {
            tick,
            tier: tier.into(),
            annotation: annotation.into(),
        }
    }
}

impl fmt::Display for TimeSliceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} [{}] {}", self.tick, self.tier, self.annotation)
    }
}
