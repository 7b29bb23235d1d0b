//! Cutting a whole axis into tiles, and the apron projection diagnostic.

use crate::config::TilingConfig;
use crate::dims::LatticeDims;
use crate::lattice::Lattice;
use crate::window::{extract_window, TileBuffer, WindowSpec};
use rdme_core::{Axis, WindowError};

/// Partition `axis` into consecutive windows of `tile_extent` rows.
///
/// The last window is shorter when the axis length is not a multiple
/// of `tile_extent`. Every window carries `apron` ghost rows.
pub fn tile_axis(
    dims: &LatticeDims,
    axis: Axis,
    tile_extent: usize,
    apron: usize,
) -> Result<Vec<WindowSpec>, WindowError> {
    WindowSpec::new(axis, 0, tile_extent, apron).validate(dims)?;
    let len = dims.len(axis);
    Ok((0..len)
        .step_by(tile_extent)
        .map(|start| WindowSpec::new(axis, start, tile_extent.min(len - start), apron))
        .collect())
}

/// Extract every tile of `config`, in axis order.
///
/// Tiles are extracted in parallel on scoped threads; the master lattice
/// is only read.
pub fn extract_tiles(
    lattice: &Lattice,
    config: &TilingConfig,
) -> Result<Vec<TileBuffer>, WindowError> {
    let dims = lattice.dims();
    config.validate(&dims)?;
    let specs = tile_axis(&dims, config.axis, config.tile_extent, config.apron)?;
    let workers = config.resolved_worker_count().min(specs.len());
    if workers <= 1 {
        return specs
            .into_iter()
            .map(|spec| extract_window(lattice, spec))
            .collect();
    }
    let chunk = specs.len().div_ceil(workers);
    std::thread::scope(|scope| {
        let handles: Vec<_> = specs
            .chunks(chunk)
            .map(|part| {
                scope.spawn(move || {
                    part.iter()
                        .map(|&spec| extract_window(lattice, spec))
                        .collect::<Result<Vec<_>, _>>()
                })
            })
            .collect();
        let mut tiles = Vec::with_capacity(specs.len());
        for handle in handles {
            let part = handle
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))?;
            tiles.extend(part);
        }
        Ok(tiles)
    })
}

/// Write every tile's aprons over the edges of its own window.
///
/// Tiles `axis` into windows of `window_extent` rows, then into a zeroed
/// lattice of the same shape writes each tile's lower apron over the
/// window's first `apron` rows and its upper apron over the window's
/// last `apron` rows. Rows in between stay zero. Row `r` near a window's
/// lower edge thus receives master row `r - apron` and row `r` near its
/// upper edge receives `r + apron`, both wrapped periodically.
///
/// Every window must hold at least `2 * apron` rows.
pub fn project_aprons(
    lattice: &Lattice,
    axis: Axis,
    window_extent: usize,
    apron: usize,
) -> Result<Lattice, WindowError> {
    let specs = tile_axis(&lattice.dims(), axis, window_extent, apron)?;
    if let Some(short) = specs.iter().find(|s| s.extent < 2 * apron) {
        return Err(WindowError::ApronExceedsWindow {
            apron,
            extent: short.extent,
        });
    }
    let mut out = Lattice::new(lattice.dims(), lattice.words_per_site())?;
    for spec in specs {
        let tile = extract_window(lattice, spec)?;
        let upper = spec.apron + spec.extent;
        tile.write_rows(&mut out, 0..spec.apron, spec.start)?;
        tile.write_rows(&mut out, upper..upper + spec.apron, upper - 2 * spec.apron + spec.start)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> LatticeDims {
        LatticeDims::new(3, 20, 2).unwrap()
    }

    #[test]
    fn last_tile_is_shorter() {
        let specs = tile_axis(&dims(), Axis::Y, 8, 2).unwrap();
        let bounds: Vec<_> = specs.iter().map(|s| (s.start, s.extent)).collect();
        assert_eq!(bounds, vec![(0, 8), (8, 8), (16, 4)]);
        assert!(specs.iter().all(|s| s.apron == 2));
    }

    #[test]
    fn tile_axis_rejects_bad_requests() {
        assert_eq!(tile_axis(&dims(), Axis::Y, 0, 1), Err(WindowError::EmptyWindow));
        assert!(matches!(
            tile_axis(&dims(), Axis::X, 4, 1),
            Err(WindowError::WindowTooLarge { .. })
        ));
        assert!(matches!(
            tile_axis(&dims(), Axis::Y, 4, 10),
            Err(WindowError::ApronTooWide { .. })
        ));
    }

    #[test]
    fn parallel_extraction_matches_serial() {
        let mut l = Lattice::new(dims(), 2).unwrap();
        l.fill_with(|[x, y, z], p| (x + 7 * y + 211 * z + 5000 * p) as u32);
        let mut cfg = TilingConfig::new(Axis::Y, 6, 2);
        cfg.workers = Some(1);
        let serial = extract_tiles(&l, &cfg).unwrap();
        cfg.workers = Some(3);
        let parallel = extract_tiles(&l, &cfg).unwrap();
        assert_eq!(serial.len(), 4);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn extraction_rejects_invalid_config() {
        let l = Lattice::new(dims(), 2).unwrap();
        let too_wide = TilingConfig::new(Axis::Y, 4, 10);
        assert_eq!(
            extract_tiles(&l, &too_wide),
            Err(WindowError::ApronTooWide {
                apron: 10,
                axis_len: 20
            })
        );
        assert!(too_wide.validate(&l.dims()).is_err());
        let empty = TilingConfig::new(Axis::Z, 0, 0);
        assert_eq!(extract_tiles(&l, &empty), Err(WindowError::EmptyWindow));
    }

    #[test]
    fn projection_needs_room_for_both_aprons() {
        let l = Lattice::new(dims(), 1).unwrap();
        // 20 = 8 + 8 + 4: the last window cannot hold two aprons of 3.
        assert_eq!(
            project_aprons(&l, Axis::Y, 8, 3),
            Err(WindowError::ApronExceedsWindow {
                apron: 3,
                extent: 4
            })
        );
    }

    #[test]
    fn projection_shifts_edges_by_apron() {
        let mut l = Lattice::new(dims(), 1).unwrap();
        l.fill_with(|[_, y, _], _| y as u32 + 100);
        let out = project_aprons(&l, Axis::Y, 5, 2).unwrap();
        let col: Vec<u32> = (0..20).map(|y| out.get([1, y, 1], 0).unwrap()).collect();
        let expected: Vec<u32> = (0..20)
            .map(|y| match y % 5 {
                0 | 1 => ((y + 20 - 2) % 20) as u32 + 100,
                3 | 4 => ((y + 2) % 20) as u32 + 100,
                _ => 0,
            })
            .collect();
        assert_eq!(col, expected);
    }
}
