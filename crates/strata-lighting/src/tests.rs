use super::*;
use strata_world::{ChunkCoord, Segment};

fn make_chunk(sx: usize, sy: usize, sz: usize, fill: &dyn Fn(usize, usize, usize) -> Material) -> ChunkBuf {
    let mut blocks = Vec::with_capacity(sx * sy * sz);
    for y in 0..sy {
        for z in 0..sz {
            for x in 0..sx {
                blocks.push(fill(x, y, z));
            }
        }
    }
    ChunkBuf::from_blocks_local(ChunkCoord::new(0, 0), sx, sy, sz, blocks)
}

#[test]
fn open_sky_is_full_everywhere() {
    let buf = make_chunk(3, 4, 3, &|_, _, _| Material::Air);
    let lg = LightGrid::compute(&buf);
    assert!(lg.skylight().iter().all(|&l| l == MAX_LIGHT));
    assert!(lg.height_map().iter().all(|&h| h == 0));
}

#[test]
fn opaque_ground_is_dark() {
    let mut buf = ChunkBuf::new(ChunkCoord::new(0, 0), 2, 6);
    for z in 0..2 {
        for x in 0..2 {
            buf.fill_column(x, z, &[Segment::new(Material::Stone, 3)]);
        }
    }
    let lg = LightGrid::compute(&buf);
    for z in 0..2 {
        for x in 0..2 {
            for y in 0..3 {
                assert_eq!(lg.skylight_at(x, y, z), 0, "({x},{y},{z})");
            }
            for y in 3..6 {
                assert_eq!(lg.skylight_at(x, y, z), MAX_LIGHT);
            }
            assert_eq!(lg.height_at(x, z), 3);
        }
    }
}

#[test]
fn water_attenuates_downward() {
    let mut buf = ChunkBuf::new(ChunkCoord::new(0, 0), 1, 6);
    buf.fill_column(
        0,
        0,
        &[Segment::new(Material::Stone, 2), Segment::new(Material::Water, 3)],
    );
    let lg = LightGrid::compute(&buf);
    assert_eq!(lg.skylight_at(0, 5, 0), 15);
    assert_eq!(lg.skylight_at(0, 4, 0), 14);
    assert_eq!(lg.skylight_at(0, 3, 0), 13);
    assert_eq!(lg.skylight_at(0, 2, 0), 12);
    assert_eq!(lg.skylight_at(0, 1, 0), 0);
    assert_eq!(lg.height_at(0, 0), 5);
}

#[test]
fn light_spreads_under_overhang() {
    // x=0 has a stone roof at y=3; x=1 is open
    let buf = make_chunk(2, 4, 1, &|x, y, _| {
        if x == 0 && y == 3 {
            Material::Stone
        } else {
            Material::Air
        }
    });
    let lg = LightGrid::compute(&buf);
    assert_eq!(lg.skylight_at(0, 3, 0), 0);
    for y in 0..3 {
        assert_eq!(lg.skylight_at(0, y, 0), MAX_LIGHT - 1);
        assert_eq!(lg.skylight_at(1, y, 0), MAX_LIGHT);
    }
}

#[test]
fn from_parts_checks_lengths() {
    assert!(LightGrid::from_parts(2, 2, 2, vec![0; 8], vec![0; 4]).is_some());
    assert!(LightGrid::from_parts(2, 2, 2, vec![0; 7], vec![0; 4]).is_none());
    assert!(LightGrid::from_parts(2, 2, 2, vec![0; 8], vec![0; 3]).is_none());
}
