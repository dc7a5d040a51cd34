//! Wallpaper on two-cell wall faces

use semiauto_map_core::{GenerationOptions, Grid};

use super::{block_count, DecorationMap, PlacementArea, Surface, PLACEMENT_ATTEMPTS};
use crate::catalog::CatalogCounts;
use crate::rng::SeededRandom;

/// Wallpaper layers; a 1x2 piece is recorded at its top cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperMaps {
    pub one: DecorationMap,
    pub two: DecorationMap,
}

/// Hang wallpaper on cells whose own and upper neighbor are both wall face
pub fn place_wallpaper(
    area: &PlacementArea,
    counts: &CatalogCounts,
    options: &GenerationOptions,
    rng: &mut SeededRandom,
) -> WallpaperMaps {
    let (w, h) = (area.width(), area.height());
    let mut maps = WallpaperMaps {
        one: Grid::new(w, h, 0),
        two: Grid::new(w, h, 0),
    };
    if !counts.has_wallpaper() {
        return maps;
    }

    let (bx, by) = (options.block_wallpaper_x.max(1), options.block_wallpaper_y.max(1));
    for j in 0..block_count(h, by) {
        for i in 0..block_count(w, bx) {
            for _ in 0..rng.next_int(1, 1) {
                let mut chosen = None;
                for _ in 0..PLACEMENT_ATTEMPTS {
                    let x = rng.next_int((i * bx) as i64, ((i + 1) * bx) as i64);
                    if x < 0 || x as usize + 1 >= w {
                        continue;
                    }
                    let y = rng.next_int((j * by) as i64, ((j + 1) * by) as i64);
                    if y <= 0 || y as usize + 1 >= h {
                        continue;
                    }
                    let (x, y) = (x as usize, y as usize);
                    if area.is_forbidden(x, y, options.limit_wallpaper) {
                        continue;
                    }
                    if area.surface_at(x, y - 1) == Surface::Wall && area.surface_at(x, y) == Surface::Wall {
                        chosen = Some((x, y));
                        break;
                    }
                }
                let Some((x, y)) = chosen else { continue };

                let single = match (counts.wallpaper_1x1 != 0, counts.wallpaper_1x2 != 0) {
                    (true, false) => true,
                    (false, true) => false,
                    _ => rng.next_int(0, 1) < 1,
                };
                if single {
                    let variant = rng.next_int(1, counts.wallpaper_1x1 as i64) as u32;
                    maps.one.set(x, y, variant);
                } else {
                    let variant = rng.next_int(1, counts.wallpaper_1x2 as i64) as u32;
                    maps.two.set(x, y - 1, variant);
                }
            }
        }
    }
    maps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall_band(w: usize, h: usize, rows: std::ops::Range<usize>) -> Grid<Surface> {
        let mut surface = Grid::new(w, h, Surface::Floor);
        for y in rows {
            for x in 0..w {
                surface.set(x, y, Surface::Wall);
            }
        }
        surface
    }

    #[test]
    fn test_wallpaper_needs_two_wall_cells() {
        let surface = wall_band(20, 20, 4..6);
        let regions = Grid::new(20, 20, 0);
        let area = PlacementArea::new(&surface, &regions);
        let counts = CatalogCounts {
            wallpaper_1x1: 2,
            wallpaper_1x2: 1,
            ..Default::default()
        };
        let mut rng = SeededRandom::new(6);
        let maps = place_wallpaper(&area, &counts, &GenerationOptions::default(), &mut rng);

        for y in 0..20 {
            for x in 0..20 {
                if maps.one.get(x, y) != 0 {
                    assert_eq!(y, 5, "1x1 wallpaper at ({x}, {y})");
                }
                if maps.two.get(x, y) != 0 {
                    assert_eq!(y, 4, "1x2 wallpaper at ({x}, {y})");
                }
            }
        }
        assert!(maps.one.values().chain(maps.two.values()).any(|v| v != 0));
    }

    #[test]
    fn test_single_wall_row_takes_no_wallpaper() {
        let surface = wall_band(20, 20, 4..5);
        let regions = Grid::new(20, 20, 0);
        let area = PlacementArea::new(&surface, &regions);
        let counts = CatalogCounts {
            wallpaper_1x1: 1,
            ..Default::default()
        };
        let mut rng = SeededRandom::new(6);
        let maps = place_wallpaper(&area, &counts, &GenerationOptions::default(), &mut rng);

        assert_eq!(maps.one.count(0), 400);
        assert_eq!(maps.two.count(0), 400);
    }

    #[test]
    fn test_empty_catalog_draws_nothing() {
        let surface = wall_band(10, 10, 0..10);
        let regions = Grid::new(10, 10, 0);
        let area = PlacementArea::new(&surface, &regions);
        let mut rng = SeededRandom::new(9);
        place_wallpaper(&area, &CatalogCounts::default(), &GenerationOptions::default(), &mut rng);

        assert_eq!(rng, SeededRandom::new(9));
    }
}
