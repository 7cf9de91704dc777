use serde::Serialize;

pub const WIDTH: usize = 16;
pub const HEIGHT: usize = 16;
pub const Z_SIZE: usize = 16;

/// Block slots in one subchunk.
pub const SUBCHUNK_VOLUME: usize = WIDTH * HEIGHT * Z_SIZE;

#[derive(Clone, Debug, Copy, Hash, Eq, PartialEq, Serialize)]
pub struct ChunkVec2 {
    pub x: i32,
    pub z: i32,
}

impl ChunkVec2 {
    pub fn new_local(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn new_global(x: i32, z: i32) -> Self {
        Self {
            x: x >> 4,
            z: z >> 4,
        }
    }

    pub fn as_local(&self) -> (i32, i32) {
        (self.x, self.z)
    }

    pub fn as_global(&self) -> (i32, i32) {
        (self.x << 4, self.z << 4)
    }
}

/// Position of a slot inside a single subchunk, every axis in `0..16`.
#[derive(Clone, Debug, Copy, Hash, Eq, PartialEq, Serialize)]
pub struct LocalPos {
    pub x: u8,
    pub y: u8,
    pub z: u8,
}

pub fn index_to_local(index: u16) -> LocalPos {
    debug_assert!((index as usize) < SUBCHUNK_VOLUME, "index is out of bounds");

    LocalPos {
        x: (index % 16) as u8,
        y: (index / 256) as u8,
        z: ((index % 256) / 16) as u8,
    }
}

pub fn local_to_index(local_y: u8, x: u8, z: u8) -> u16 {
    debug_assert!(x < 16 && local_y < 16 && z < 16, "the coordinates are out of bounds.");

    (local_y as u16) * 256 + (z as u16) * 16 + x as u16
}

/// Splits an absolute altitude into `(subchunk slot, local y)`.
///
/// Floored, so `-1` lands in slot `-1` at local y `15`.
pub fn world_y_to_slot(absolute_y: i32) -> (i32, u8) {
    (absolute_y.div_euclid(16), absolute_y.rem_euclid(16) as u8)
}

#[test]
fn index_round_trips_for_every_slot() {
    for i in 0..SUBCHUNK_VOLUME as u16 {
        let local = index_to_local(i);
        assert!(local.x < 16 && local.y < 16 && local.z < 16);
        assert_eq!(local_to_index(local.y, local.x, local.z), i);
    }
}

#[test]
fn index_layout_is_y_then_z_then_x() {
    assert_eq!(index_to_local(5), LocalPos { x: 5, y: 0, z: 0 });
    assert_eq!(index_to_local(16), LocalPos { x: 0, y: 0, z: 1 });
    assert_eq!(index_to_local(256), LocalPos { x: 0, y: 1, z: 0 });
    assert_eq!(index_to_local(4095), LocalPos { x: 15, y: 15, z: 15 });
}

#[test]
fn world_y_splits_into_slot_and_local() {
    assert_eq!(world_y_to_slot(0), (0, 0));
    assert_eq!(world_y_to_slot(15), (0, 15));
    assert_eq!(world_y_to_slot(16), (1, 0));
    assert_eq!(world_y_to_slot(37), (2, 5));
    assert_eq!(world_y_to_slot(-1), (-1, 15));
    assert_eq!(world_y_to_slot(-16), (-1, 0));
}

#[test]
fn chunk_vec_global_conversion() {
    let pos = ChunkVec2::new_global(-1, 33);
    assert_eq!(pos.as_local(), (-1, 2));
    assert_eq!(pos.as_global(), (-16, 32));
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn world_y_recombines(y in -4096i32..4096) {
            let (slot, local_y) = world_y_to_slot(y);
            prop_assert!(local_y < 16);
            prop_assert_eq!(slot * 16 + local_y as i32, y);
        }

        #[test]
        fn local_recombines(x in 0u8..16, y in 0u8..16, z in 0u8..16) {
            let index = local_to_index(y, x, z);
            prop_assert!((index as usize) < SUBCHUNK_VOLUME);
            prop_assert_eq!(index_to_local(index), LocalPos { x, y, z });
        }
    }
}
