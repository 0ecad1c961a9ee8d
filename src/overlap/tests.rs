use super::*;
use crate::config::{Dimensionality, PairingMode, ResourceMode, StitchConfig};
use crate::raster::{MemoryRasterSource, RasterSource, TileStack};

fn config(pairing: PairingMode) -> StitchConfig {
    StitchConfig {
        dimensionality: Dimensionality::Two,
        pairing,
        resource_mode: ResourceMode::LowMemory,
        ..Default::default()
    }
}

fn grid_row(n: usize, size: f32, step: f32) -> Vec<Tile> {
    (0..n)
        .map(|i| {
            let source = MemoryRasterSource::new(TileStack::new(4, 4, 1, 1));
            Tile::new_2d(i, [i as f32 * step, 0.0], [size, size], Box::new(source))
        })
        .collect()
}

struct FailingSource;

impl RasterSource for FailingSource {
    fn open(&self, _virtual_loading: bool) -> Result<TileStack, String> {
        Err("disk unplugged".to_string())
    }
}

#[test]
fn exhaustive_excludes_disjoint_pairs() {
    // Tiles 0/1 overlap, tile 2 is far away.
    let mut tiles = grid_row(2, 100.0, 50.0);
    let source = MemoryRasterSource::new(TileStack::new(4, 4, 1, 1));
    tiles.push(Tile::new_2d(
        2,
        [1000.0, 0.0],
        [100.0, 100.0],
        Box::new(source),
    ));

    let pairs = find_overlapping_tiles(&mut tiles, &config(PairingMode::Exhaustive)).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!((pairs[0].tile_a, pairs[0].tile_b), (0, 1));
}

#[test]
fn exhaustive_includes_each_overlapping_pair_once() {
    // 2x2 grid with 50% overlap in both axes: every pair of the four tiles
    // intersects, giving C(4,2) = 6 edges.
    let mut tiles = Vec::new();
    for (i, (x, y)) in [(0.0, 0.0), (50.0, 0.0), (0.0, 50.0), (50.0, 50.0)]
        .into_iter()
        .enumerate()
    {
        let source = MemoryRasterSource::new(TileStack::new(4, 4, 1, 1));
        tiles.push(Tile::new_2d(i, [x, y], [100.0, 100.0], Box::new(source)));
    }

    let pairs = find_overlapping_tiles(&mut tiles, &config(PairingMode::Exhaustive)).unwrap();
    assert_eq!(pairs.len(), 6);
    for pair in &pairs {
        assert!(pair.tile_a < pair.tile_b, "pairs are stored as (i, j), i < j");
    }
}

#[test]
fn exhaustive_includes_edge_touching_pair() {
    let mut tiles = grid_row(2, 100.0, 100.0);
    let pairs = find_overlapping_tiles(&mut tiles, &config(PairingMode::Exhaustive)).unwrap();
    assert_eq!(pairs.len(), 1);
}

#[test]
fn sequential_pair_count_matches_range() {
    // N tiles, range R: sum over i of min(R, N-1-i) pairs.
    for (n, range, expected) in [(3usize, 1usize, 2usize), (3, 2, 3), (5, 2, 7), (4, 10, 6)] {
        let mut tiles = grid_row(n, 100.0, 1000.0); // geometry irrelevant here
        let pairs =
            find_overlapping_tiles(&mut tiles, &config(PairingMode::Sequential { range }))
                .unwrap();
        assert_eq!(
            pairs.len(),
            expected,
            "N={n} R={range}: expected {expected} pairs"
        );
        for pair in &pairs {
            assert!(pair.tile_b - pair.tile_a <= range);
            assert!(pair.tile_b > pair.tile_a);
        }
    }
}

#[test]
fn sequential_pairs_connect_neighbors() {
    let mut tiles = grid_row(3, 100.0, 1000.0);
    let pairs =
        find_overlapping_tiles(&mut tiles, &config(PairingMode::Sequential { range: 1 })).unwrap();
    let edges: Vec<_> = pairs.iter().map(|p| (p.tile_a, p.tile_b)).collect();
    assert_eq!(edges, vec![(0, 1), (1, 2)]);
}

#[test]
fn unopenable_tile_aborts_graph_construction() {
    let mut tiles = grid_row(2, 100.0, 50.0);
    tiles.push(Tile::new_2d(
        2,
        [50.0, 50.0],
        [100.0, 100.0],
        Box::new(FailingSource),
    ));

    let err = find_overlapping_tiles(&mut tiles, &config(PairingMode::Exhaustive)).unwrap_err();
    match err {
        StitchError::TileLoad { index, reason } => {
            assert_eq!(index, 2);
            assert!(reason.contains("disk unplugged"));
        }
        other => panic!("expected TileLoad, got {other:?}"),
    }
}
