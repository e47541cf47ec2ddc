//! Annotation records and the position-keyed annotation set.

use crate::geometry::GridCell;
use crate::palette::AnnotationKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Placeholder written into [`Annotation::distance`] until analytics fill it in.
pub const UNSET_DISTANCE: f64 = -1.0;

/// One painted pixel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: Uuid,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    /// Opaque to the engine; always [`UNSET_DISTANCE`] on creation.
    pub distance: f64,
}

impl Annotation {
    /// New annotation with a fresh id and an unset distance.
    pub fn new(cell: GridCell, kind: AnnotationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: cell.x,
            y: cell.y,
            kind,
            distance: UNSET_DISTANCE,
        }
    }

    pub fn cell(&self) -> GridCell {
        GridCell::new(self.x, self.y)
    }
}

/// Store interface through which the rest of the system sees annotations.
pub trait AnnotationStore {
    /// Insert, replacing whatever annotation sits at the same position.
    fn add_annotation(&mut self, annotation: Annotation);

    /// Remove the annotation at `cell`, if any.
    fn remove_annotation(&mut self, cell: GridCell) -> Option<Annotation>;
}

/// Unordered set of annotations, at most one per grid cell.
#[derive(Debug, Clone, Default)]
pub struct AnnotationSet {
    by_cell: HashMap<GridCell, Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_cell.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_cell.is_empty()
    }

    pub fn get(&self, cell: GridCell) -> Option<&Annotation> {
        self.by_cell.get(&cell)
    }

    pub fn contains(&self, cell: GridCell) -> bool {
        self.by_cell.contains_key(&cell)
    }

    /// Iterate in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.by_cell.values()
    }

    /// Annotations sorted by row then column.
    pub fn sorted(&self) -> Vec<&Annotation> {
        let mut annotations: Vec<_> = self.by_cell.values().collect();
        annotations.sort_by_key(|a| (a.y, a.x));
        annotations
    }

    pub fn clear(&mut self) {
        self.by_cell.clear();
    }
}

impl AnnotationStore for AnnotationSet {
    fn add_annotation(&mut self, annotation: Annotation) {
        self.by_cell.insert(annotation.cell(), annotation);
    }

    fn remove_annotation(&mut self, cell: GridCell) -> Option<Annotation> {
        self.by_cell.remove(&cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_annotation_defaults() {
        let a = Annotation::new(GridCell::new(-3, 7), AnnotationKind::Teal);
        assert_eq!(a.cell(), GridCell::new(-3, 7));
        assert!((a.distance - UNSET_DISTANCE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Annotation::new(GridCell::new(0, 0), AnnotationKind::Red);
        let b = Annotation::new(GridCell::new(0, 0), AnnotationKind::Red);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_add_overwrites_same_cell() {
        let mut set = AnnotationSet::new();
        set.add_annotation(Annotation::new(GridCell::new(1, 1), AnnotationKind::Red));
        let second = Annotation::new(GridCell::new(1, 1), AnnotationKind::Blue);
        let second_id = second.id;
        set.add_annotation(second);

        assert_eq!(set.len(), 1);
        let stored = set.get(GridCell::new(1, 1)).unwrap();
        assert_eq!(stored.id, second_id);
        assert_eq!(stored.kind, AnnotationKind::Blue);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut set = AnnotationSet::new();
        set.add_annotation(Annotation::new(GridCell::new(1, 1), AnnotationKind::Red));
        assert!(set.remove_annotation(GridCell::new(2, 2)).is_none());
        assert_eq!(set.len(), 1);
        assert!(set.remove_annotation(GridCell::new(1, 1)).is_some());
        assert!(set.is_empty());
    }

    #[test]
    fn test_sorted_order() {
        let mut set = AnnotationSet::new();
        for (x, y) in [(3, 1), (0, 2), (1, 1)] {
            set.add_annotation(Annotation::new(GridCell::new(x, y), AnnotationKind::Lime));
        }
        let cells: Vec<_> = set.sorted().iter().map(|a| (a.x, a.y)).collect();
        assert_eq!(cells, vec![(1, 1), (3, 1), (0, 2)]);
    }

    #[test]
    fn test_serialized_shape() {
        let a = Annotation::new(GridCell::new(4, 5), AnnotationKind::Amber);
        let value = serde_json::to_value(&a).unwrap();
        assert_eq!(value["x"], 4);
        assert_eq!(value["y"], 5);
        assert_eq!(value["type"], "amber");
        assert_eq!(value["distance"], -1.0);
        assert!(value["id"].is_string());
    }
}
