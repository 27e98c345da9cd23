// src/spatial/crs.rs
//! EPSG:4326 <-> EPSG:3310 (NAD83 / California Albers).
//!
//! Albers equal-area conic on the GRS80 ellipsoid (Snyder, "Map Projections:
//! A Working Manual", eqs. 14-1..14-21). The datum shift between NAD83 and
//! WGS84 is below a metre and ignored, same as most desktop GIS defaults.

use geo::MapCoords;
use geo_types::{Coord, MultiPolygon};

const A: f64 = 6_378_137.0;
const E2: f64 = 0.006_694_380_022_900_787; // GRS80 first eccentricity squared

const LAT_1: f64 = 34.0;
const LAT_2: f64 = 40.5;
const LAT_0: f64 = 0.0;
const LON_0: f64 = -120.0;
const FALSE_EASTING: f64 = 0.0;
const FALSE_NORTHING: f64 = -4_000_000.0;

struct Albers {
    n: f64,
    c: f64,
    rho0: f64,
    e: f64,
}

fn q(e: f64, sin_phi: f64) -> f64 {
    let es = e * sin_phi;
    (1.0 - E2) * (sin_phi / (1.0 - es * es) - (1.0 / (2.0 * e)) * ((1.0 - es) / (1.0 + es)).ln())
}

fn m(phi: f64) -> f64 {
    let s = phi.sin();
    phi.cos() / (1.0 - E2 * s * s).sqrt()
}

impl Albers {
    fn california() -> Self {
        let e = E2.sqrt();
        let (p1, p2, p0) = (LAT_1.to_radians(), LAT_2.to_radians(), LAT_0.to_radians());
        let (m1, m2) = (m(p1), m(p2));
        let (q1, q2, q0) = (q(e, p1.sin()), q(e, p2.sin()), q(e, p0.sin()));
        let n = (m1 * m1 - m2 * m2) / (q2 - q1);
        let c = m1 * m1 + n * q1;
        let rho0 = A * (c - n * q0).sqrt() / n;
        Self { n, c, rho0, e }
    }

    fn forward(&self, lon: f64, lat: f64) -> (f64, f64) {
        let qv = q(self.e, lat.to_radians().sin());
        let rho = A * (self.c - self.n * qv).sqrt() / self.n;
        let theta = self.n * (lon - LON_0).to_radians();
        (
            FALSE_EASTING + rho * theta.sin(),
            FALSE_NORTHING + self.rho0 - rho * theta.cos(),
        )
    }

    fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - FALSE_EASTING;
        let dy = self.rho0 - (y - FALSE_NORTHING);
        let rho = (dx * dx + dy * dy).sqrt();
        let theta = dx.atan2(dy);
        let qv = (self.c - (rho * self.n / A).powi(2)) / self.n;

        // iterate latitude (Snyder 3-16)
        let mut phi = (qv / 2.0).clamp(-1.0, 1.0).asin();
        for _ in 0..15 {
            let s = phi.sin();
            let es = self.e * s;
            let one = 1.0 - es * es;
            let next = phi
                + one * one / (2.0 * phi.cos())
                    * (qv / (1.0 - E2) - s / one + (1.0 / (2.0 * self.e)) * ((1.0 - es) / (1.0 + es)).ln());
            if (next - phi).abs() < 1e-12 {
                phi = next;
                break;
            }
            phi = next;
        }
        (LON_0 + (theta / self.n).to_degrees(), phi.to_degrees())
    }
}

/// lon/lat degrees -> California Albers metres.
pub fn albers_forward(lon: f64, lat: f64) -> (f64, f64) {
    Albers::california().forward(lon, lat)
}

/// California Albers metres -> lon/lat degrees.
pub fn albers_inverse(x: f64, y: f64) -> (f64, f64) {
    Albers::california().inverse(x, y)
}

pub fn to_albers(mp: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let p = Albers::california();
    mp.map_coords(|c| {
        let (x, y) = p.forward(c.x, c.y);
        Coord { x, y }
    })
}

pub fn to_wgs84(mp: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    let p = Albers::california();
    mp.map_coords(|c| {
        let (x, y) = p.inverse(c.x, c.y);
        Coord { x, y }
    })
}
