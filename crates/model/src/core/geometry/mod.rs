//! Geometry literals carried by filter expressions.
//!
//! Only the literal shape is modelled here: coordinates grouped the way the
//! WKT constructors group them. Spatial algorithms belong to the evaluation
//! engine that consumes the filter tree.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod wkt;

pub use wkt::{TextWktReader, WktError, WktReader};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coord {
    pub fn xy(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn xyz(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Point(Option<Coord>),
    LineString(Vec<Coord>),
    Polygon(Vec<Vec<Coord>>),
    MultiPoint(Vec<Coord>),
    MultiLineString(Vec<Vec<Coord>>),
    MultiPolygon(Vec<Vec<Vec<Coord>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Some(Coord::xy(x, y)))
    }

    /// Rectangle with the fixed axis order west, south, east, north.
    ///
    /// The shell starts at the south-west corner and runs
    /// `(w s, w n, e n, e s, w s)`.
    pub fn envelope(west: f64, south: f64, east: f64, north: f64) -> Self {
        Geometry::Polygon(vec![vec![
            Coord::xy(west, south),
            Coord::xy(west, north),
            Coord::xy(east, north),
            Coord::xy(east, south),
            Coord::xy(west, south),
        ]])
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "POINT",
            Geometry::LineString(_) => "LINESTRING",
            Geometry::Polygon(_) => "POLYGON",
            Geometry::MultiPoint(_) => "MULTIPOINT",
            Geometry::MultiLineString(_) => "MULTILINESTRING",
            Geometry::MultiPolygon(_) => "MULTIPOLYGON",
            Geometry::GeometryCollection(_) => "GEOMETRYCOLLECTION",
        }
    }

    /// True for the `EMPTY` form of each constructor.
    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(c) => c.is_none(),
            Geometry::LineString(cs) | Geometry::MultiPoint(cs) => cs.is_empty(),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => rings.is_empty(),
            Geometry::MultiPolygon(polys) => polys.is_empty(),
            Geometry::GeometryCollection(geoms) => geoms.is_empty(),
        }
    }

    /// All coordinates in WKT order.
    pub fn coords(&self) -> Box<dyn Iterator<Item = &Coord> + '_> {
        match self {
            Geometry::Point(c) => Box::new(c.iter()),
            Geometry::LineString(cs) | Geometry::MultiPoint(cs) => Box::new(cs.iter()),
            Geometry::Polygon(rings) | Geometry::MultiLineString(rings) => {
                Box::new(rings.iter().flatten())
            }
            Geometry::MultiPolygon(polys) => Box::new(polys.iter().flatten().flatten()),
            Geometry::GeometryCollection(geoms) => Box::new(geoms.iter().flat_map(|g| g.coords())),
        }
    }

    /// Bounding box as `(min_x, min_y, max_x, max_y)`, or `None` when empty.
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        self.coords().fold(None, |acc, c| match acc {
            None => Some((c.x, c.y, c.x, c.y)),
            Some((min_x, min_y, max_x, max_y)) => Some((
                min_x.min(c.x),
                min_y.min(c.y),
                max_x.max(c.x),
                max_y.max(c.y),
            )),
        })
    }
}

/// Writes canonical WKT, e.g. `POLYGON((10 20,10 40,30 40,30 20,10 20))`.
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())?;
        if self.is_empty() {
            return f.write_str(" EMPTY");
        }
        match self {
            Geometry::Point(Some(c)) => {
                f.write_str("(")?;
                write_coord(f, c)?;
                f.write_str(")")
            }
            Geometry::Point(None) => Ok(()),
            Geometry::LineString(cs) => write_coord_list(f, cs),
            Geometry::Polygon(rings) => write_rings(f, rings),
            Geometry::MultiPoint(cs) => {
                f.write_str("(")?;
                for (i, c) in cs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    f.write_str("(")?;
                    write_coord(f, c)?;
                    f.write_str(")")?;
                }
                f.write_str(")")
            }
            Geometry::MultiLineString(lines) => write_rings(f, lines),
            Geometry::MultiPolygon(polys) => {
                f.write_str("(")?;
                for (i, rings) in polys.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_rings(f, rings)?;
                }
                f.write_str(")")
            }
            Geometry::GeometryCollection(geoms) => {
                f.write_str("(")?;
                for (i, g) in geoms.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{g}")?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_coord(f: &mut fmt::Formatter<'_>, c: &Coord) -> fmt::Result {
    write!(f, "{} {}", c.x, c.y)?;
    if let Some(z) = c.z {
        write!(f, " {z}")?;
    }
    Ok(())
}

fn write_coord_list(f: &mut fmt::Formatter<'_>, coords: &[Coord]) -> fmt::Result {
    f.write_str("(")?;
    for (i, c) in coords.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write_coord(f, c)?;
    }
    f.write_str(")")
}

fn write_rings(f: &mut fmt::Formatter<'_>, rings: &[Vec<Coord>]) -> fmt::Result {
    f.write_str("(")?;
    for (i, ring) in rings.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write_coord_list(f, ring)?;
    }
    f.write_str(")")
}
