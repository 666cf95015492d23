use crate::core::geometry::{Coord, Geometry};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WktError {
    #[error("unknown geometry type '{0}'")]
    UnknownGeometryType(String),

    #[error("unsupported ordinates '{0}': only XY and XYZ coordinates are accepted")]
    UnsupportedOrdinates(String),

    #[error("expected {expected} at offset {position}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        position: usize,
    },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected input after geometry at offset {0}")]
    TrailingInput(usize),
}

/// Reads geometry literals written as WKT.
pub trait WktReader: Send + Sync {
    fn read(&self, text: &str) -> Result<Geometry, WktError>;
}

/// Reader for the OGC simple-features WKT constructors.
///
/// Accepts both `MULTIPOINT((1 2),(3 4))` and `MULTIPOINT(1 2,3 4)`, the
/// optional `Z` tag and the `EMPTY` form.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextWktReader;

impl WktReader for TextWktReader {
    fn read(&self, text: &str) -> Result<Geometry, WktError> {
        let mut cursor = Cursor::new(text);
        let geometry = cursor.geometry()?;
        cursor.skip_ws();
        if cursor.pos < text.len() {
            return Err(WktError::TrailingInput(cursor.pos));
        }
        Ok(geometry)
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn peek(&mut self) -> Option<char> {
        self.skip_ws();
        self.rest().chars().next()
    }

    fn found(&mut self) -> String {
        match self.peek() {
            Some(c) => format!("'{c}'"),
            None => "end of input".to_string(),
        }
    }

    fn eat(&mut self, ch: char) -> bool {
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, ch: char) -> Result<(), WktError> {
        if self.eat(ch) {
            return Ok(());
        }
        Err(WktError::UnexpectedToken {
            expected: format!("'{ch}'"),
            found: self.found(),
            position: self.pos,
        })
    }

    fn peek_word(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let rest = self.rest();
        let len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        (len > 0).then(|| &rest[..len])
    }

    fn word(&mut self) -> Option<&'a str> {
        let word = self.peek_word()?;
        self.pos += word.len();
        Some(word)
    }

    fn number(&mut self) -> Result<f64, WktError> {
        self.skip_ws();
        let rest = self.rest();
        let mut len = 0;
        let mut prev = None;
        for c in rest.chars() {
            let accepted = c.is_ascii_digit()
                || c == '.'
                || c == 'e'
                || c == 'E'
                || ((c == '-' || c == '+') && matches!(prev, None | Some('e') | Some('E')));
            if !accepted {
                break;
            }
            len += c.len_utf8();
            prev = Some(c);
        }
        if len == 0 {
            return Err(WktError::UnexpectedToken {
                expected: "number".to_string(),
                found: self.found(),
                position: self.pos,
            });
        }
        let lexeme = &rest[..len];
        let value = lexeme
            .parse::<f64>()
            .map_err(|_| WktError::InvalidNumber(lexeme.to_string()))?;
        self.pos += len;
        Ok(value)
    }

    fn starts_number(&mut self) -> bool {
        matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
    }

    /// Consumes the dimension tag and `EMPTY`. Returns true when empty.
    fn header(&mut self) -> Result<bool, WktError> {
        if let Some(tag) = self.peek_word() {
            match tag.to_ascii_uppercase().as_str() {
                "Z" => {
                    self.pos += tag.len();
                }
                "M" | "ZM" => return Err(WktError::UnsupportedOrdinates(tag.to_string())),
                _ => {}
            }
        }
        match self.peek_word() {
            Some(word) if word.eq_ignore_ascii_case("EMPTY") => {
                self.pos += word.len();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn geometry(&mut self) -> Result<Geometry, WktError> {
        let start = self.pos;
        let Some(tag) = self.word() else {
            return Err(WktError::UnexpectedToken {
                expected: "geometry type".to_string(),
                found: self.found(),
                position: start,
            });
        };
        let tag = tag.to_ascii_uppercase();
        let empty = self.header()?;

        let geometry = match tag.as_str() {
            "POINT" if empty => Geometry::Point(None),
            "POINT" => {
                self.expect('(')?;
                let c = self.coord()?;
                self.expect(')')?;
                Geometry::Point(Some(c))
            }
            "LINESTRING" if empty => Geometry::LineString(Vec::new()),
            "LINESTRING" => Geometry::LineString(self.coord_list()?),
            "POLYGON" if empty => Geometry::Polygon(Vec::new()),
            "POLYGON" => Geometry::Polygon(self.rings()?),
            "MULTIPOINT" if empty => Geometry::MultiPoint(Vec::new()),
            "MULTIPOINT" => Geometry::MultiPoint(self.multi_point()?),
            "MULTILINESTRING" if empty => Geometry::MultiLineString(Vec::new()),
            "MULTILINESTRING" => Geometry::MultiLineString(self.rings()?),
            "MULTIPOLYGON" if empty => Geometry::MultiPolygon(Vec::new()),
            "MULTIPOLYGON" => Geometry::MultiPolygon(self.list(|c| c.rings())?),
            "GEOMETRYCOLLECTION" if empty => Geometry::GeometryCollection(Vec::new()),
            "GEOMETRYCOLLECTION" => Geometry::GeometryCollection(self.list(|c| c.geometry())?),
            _ => return Err(WktError::UnknownGeometryType(tag)),
        };
        Ok(geometry)
    }

    fn coord(&mut self) -> Result<Coord, WktError> {
        let x = self.number()?;
        let y = self.number()?;
        if self.starts_number() {
            let z = self.number()?;
            return Ok(Coord::xyz(x, y, z));
        }
        Ok(Coord::xy(x, y))
    }

    /// `( item, item, ... )`
    fn list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, WktError>,
    ) -> Result<Vec<T>, WktError> {
        self.expect('(')?;
        let mut items = vec![item(self)?];
        while self.eat(',') {
            items.push(item(self)?);
        }
        self.expect(')')?;
        Ok(items)
    }

    fn coord_list(&mut self) -> Result<Vec<Coord>, WktError> {
        self.list(|c| c.coord())
    }

    fn rings(&mut self) -> Result<Vec<Vec<Coord>>, WktError> {
        self.list(|c| c.coord_list())
    }

    fn multi_point(&mut self) -> Result<Vec<Coord>, WktError> {
        self.list(|c| {
            if c.eat('(') {
                let coord = c.coord()?;
                c.expect(')')?;
                Ok(coord)
            } else {
                c.coord()
            }
        })
    }
}
