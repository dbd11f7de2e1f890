//! Raster tile layout for a [`Viewport`].

use super::viewport::{to_world, Viewport, TILE_SIZE};

/// Highest zoom level tile servers are asked for.
pub const MAX_TILE_ZOOM: u8 = 19;

/// Slippy-map tile address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

/// A tile and where to draw it in container pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TilePlacement {
    pub coord: TileCoord,
    /// Unwrapped column; differs from `coord.x` when the world repeats horizontally.
    pub column: i64,
    pub left: f64,
    pub top: f64,
    pub size: f64,
}

impl TilePlacement {
    pub fn key(&self) -> String {
        format!("{}/{}/{}", self.coord.z, self.column, self.coord.y)
    }
}

/// Every tile that intersects the viewport.
///
/// Tiles come from the integer zoom below the viewport zoom and are scaled up by
/// the fractional remainder. Columns wrap around the antimeridian; rows outside
/// the world are skipped.
pub fn visible_tiles(viewport: &Viewport) -> Vec<TilePlacement> {
    let z = viewport.zoom.floor().clamp(0.0, MAX_TILE_ZOOM as f64) as u8;
    let scale = 2f64.powf(viewport.zoom - z as f64);
    let count = 1i64 << z;
    let world = TILE_SIZE * count as f64;

    let (cx, cy) = to_world(viewport.center(), world);
    let left = cx - viewport.width / 2.0 / scale;
    let top = cy - viewport.height / 2.0 / scale;
    let right = left + viewport.width / scale;
    let bottom = top + viewport.height / scale;

    let first_col = (left / TILE_SIZE).floor() as i64;
    let last_col = (right / TILE_SIZE).ceil() as i64 - 1;
    let first_row = ((top / TILE_SIZE).floor() as i64).max(0);
    let last_row = ((bottom / TILE_SIZE).ceil() as i64 - 1).min(count - 1);

    let mut tiles = Vec::new();
    for row in first_row..=last_row {
        for column in first_col..=last_col {
            tiles.push(TilePlacement {
                coord: TileCoord {
                    x: column.rem_euclid(count) as u32,
                    y: row as u32,
                    z,
                },
                column,
                left: (column as f64 * TILE_SIZE - left) * scale,
                top: (row as f64 * TILE_SIZE - top) * scale,
                size: TILE_SIZE * scale,
            });
        }
    }
    tiles
}

/// Fill a `{z}/{x}/{y}` URL template.
pub fn tile_url(template: &str, coord: TileCoord) -> String {
    template
        .replace("{z}", &coord.z.to_string())
        .replace("{x}", &coord.x.to_string())
        .replace("{y}", &coord.y.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::GeoPoint;

    #[test]
    fn test_whole_world_at_zoom_one() {
        let mut v = Viewport::new(GeoPoint::new(0.0, 0.0), 1.0);
        v.resize(512.0, 512.0);

        let tiles = visible_tiles(&v);
        assert_eq!(tiles.len(), 4);
        let origin = tiles
            .iter()
            .find(|t| t.coord == TileCoord { x: 0, y: 0, z: 1 })
            .unwrap();
        assert!(origin.left.abs() < 1e-9);
        assert!(origin.top.abs() < 1e-9);
        assert_eq!(origin.size, 256.0);
    }

    #[test]
    fn test_fractional_zoom_scales_tiles() {
        let v = Viewport::new(GeoPoint::new(22.0, 88.0), 4.5);
        let tiles = visible_tiles(&v);
        assert!(!tiles.is_empty());
        assert!(tiles.iter().all(|t| t.coord.z == 4));
        assert!((tiles[0].size - 256.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_tiles_cover_viewport() {
        let v = Viewport::new(GeoPoint::new(22.0, 88.0), 4.0);
        let tiles = visible_tiles(&v);
        let min_left = tiles.iter().map(|t| t.left).fold(f64::MAX, f64::min);
        let max_right = tiles.iter().map(|t| t.left + t.size).fold(f64::MIN, f64::max);
        assert!(min_left <= 0.0);
        assert!(max_right >= v.width);
    }

    #[test]
    fn test_columns_wrap_at_antimeridian() {
        let v = Viewport::new(GeoPoint::new(0.0, 180.0 - 1e-6), 2.0);
        let tiles = visible_tiles(&v);
        assert!(tiles.iter().any(|t| t.column >= 4 && t.coord.x < 4));
        assert!(tiles.iter().all(|t| t.coord.x < 4 && t.coord.y < 4));
    }

    #[test]
    fn test_tile_url_fills_template() {
        let url = tile_url(
            "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
            TileCoord { x: 23, y: 14, z: 5 },
        );
        assert_eq!(url, "https://tile.openstreetmap.org/5/23/14.png");
    }
}
