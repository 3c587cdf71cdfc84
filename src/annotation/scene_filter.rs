use log::{debug, info};

use crate::annotation::model::{AnnotationRow, SceneInterval};

// @module: Restriction of annotations to scene windows

// @const: Default name of the scene tier
pub const DEFAULT_SCENE_TIER: &str = "Scene";

/// Collect the scene windows declared by rows of `scene_tier`, in row order
pub fn scene_intervals(rows: &[AnnotationRow], scene_tier: &str) -> Vec<SceneInterval> {
    rows.iter()
        .filter(|row| row.is_tier(scene_tier))
        .map(|row| SceneInterval {
            start_time: row.start_time.clone(),
            end_time: row.end_time.clone(),
        })
        .collect()
}

/// Keep only rows lying fully inside at least one scene window.
///
/// Without any scene row the input is returned unchanged. Scenes are visited in
/// row order and, for each one, matching rows are appended in row order, so a
/// row covered by two overlapping scenes appears twice.
pub fn filter_by_scene(rows: Vec<AnnotationRow>, scene_tier: &str) -> Vec<AnnotationRow> {
    let scenes = scene_intervals(&rows, scene_tier);
    if scenes.is_empty() {
        info!("{} tier not found. Keeping all annotations.", scene_tier);
        return rows;
    }

    let mut filtered = Vec::with_capacity(rows.len());
    for scene in &scenes {
        filtered.extend(rows.iter().filter(|row| scene.contains(row)).cloned());
    }

    debug!(
        "Scene filter kept {} of {} rows across {} scene(s)",
        filtered.len(),
        rows.len(),
        scenes.len()
    );
    filtered
}
