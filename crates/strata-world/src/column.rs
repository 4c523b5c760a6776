use strata_blocks::{LayerMaterials, Material};

use crate::heights::HeightTriple;

/// A run of `height` blocks of one material. Heights are always positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub material: Material,
    pub height: i32,
}

impl Segment {
    pub const fn new(material: Material, height: i32) -> Self {
        Self { material, height }
    }
}

/// Rock, liquid and frozen segments from y=0 upward, dropping empty layers.
pub fn build_column(heights: &HeightTriple, materials: &LayerMaterials) -> Vec<Segment> {
    [
        Segment::new(materials.rock, heights.rock_height()),
        Segment::new(materials.liquid, heights.liquid_height()),
        Segment::new(materials.frozen, heights.frozen_height()),
    ]
    .into_iter()
    .filter(|s| s.height > 0)
    .collect()
}

/// Total height of a segment stack.
#[inline]
pub fn column_top(segments: &[Segment]) -> i32 {
    segments.iter().map(|s| s.height).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_layers_are_omitted() {
        let mats = LayerMaterials::default();
        let h = HeightTriple {
            bedrock_y: 80,
            base_y: 80,
            surface_y: 81,
        };
        assert_eq!(
            build_column(&h, &mats),
            vec![
                Segment::new(Material::Stone, 80),
                Segment::new(Material::PackedIce, 1)
            ]
        );
    }

    #[test]
    fn full_stack_sums_to_surface() {
        let mats = LayerMaterials::default();
        let h = HeightTriple {
            bedrock_y: 10,
            base_y: 25,
            surface_y: 40,
        };
        let segs = build_column(&h, &mats);
        assert_eq!(segs.len(), 3);
        assert_eq!(segs[1], Segment::new(Material::Water, 15));
        assert_eq!(column_top(&segs), 40);
    }

    #[test]
    fn zero_height_column_is_empty() {
        let h = HeightTriple {
            bedrock_y: 0,
            base_y: 0,
            surface_y: 0,
        };
        assert!(build_column(&h, &LayerMaterials::default()).is_empty());
    }
}
