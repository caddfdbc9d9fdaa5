//! Line tokenizer for Wavefront OBJ text.
//!
//! Turns a single line into a [`Directive`]. Indices are returned exactly as
//! written (1-based or negative); resolving them against the geometry tables
//! is the parser's job.

use nalgebra::{Point3, Vector2, Vector3};

use course_mesh_types::VertexColor;

use crate::error::{IoError, IoResult};

/// One corner of a face as written in the file (`p`, `p/t`, `p//n`, `p/t/n`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCorner {
    /// Position reference.
    pub position: i64,
    /// Texture coordinate reference, if present.
    pub uv: Option<i64>,
    /// Normal reference, if present.
    pub normal: Option<i64>,
}

/// A parsed OBJ line.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    /// `v x y z [w]` or `v x y z r g b [a]`.
    Position {
        /// Coordinates as written.
        point: Point3<f64>,
        /// Per-vertex color, if the line carries one.
        color: Option<VertexColor>,
    },
    /// `vt u v [w]`.
    TexCoord(Vector2<f64>),
    /// `vn x y z`.
    Normal(Vector3<f64>),
    /// `f c1 c2 c3 ...`.
    Face(Vec<RawCorner>),
    /// `o name` or `g name`. The name may be empty.
    Segment(String),
    /// Comments, blank lines and directives the importer does not use.
    Ignored,
}

/// Tokenize one line. `line_no` is 1-based and only used for errors.
///
/// # Errors
///
/// Returns [`IoError::Malformed`] if a known directive has the wrong number
/// of fields or a field is not a finite number / integer.
pub fn parse_line(line: &str, line_no: usize) -> IoResult<Directive> {
    let trimmed = line.trim();
    let mut fields = trimmed.split_whitespace();
    let Some(keyword) = fields.next() else {
        return Ok(Directive::Ignored);
    };

    match keyword {
        "v" => {
            let values = parse_floats(fields, line_no, keyword)?;
            match values.as_slice() {
                [x, y, z] | [x, y, z, _] => Ok(Directive::Position {
                    point: Point3::new(*x, *y, *z),
                    color: None,
                }),
                [x, y, z, r, g, b] | [x, y, z, r, g, b, _] => Ok(Directive::Position {
                    point: Point3::new(*x, *y, *z),
                    color: Some(VertexColor::from_obj_channels(*r, *g, *b)),
                }),
                other => Err(IoError::malformed(
                    line_no,
                    keyword,
                    format!("expected 3, 4, 6 or 7 values, got {}", other.len()),
                )),
            }
        }
        "vt" => {
            let values = parse_floats(fields, line_no, keyword)?;
            match values.as_slice() {
                [u, v] | [u, v, _] => Ok(Directive::TexCoord(Vector2::new(*u, *v))),
                other => Err(IoError::malformed(
                    line_no,
                    keyword,
                    format!("expected 2 or 3 values, got {}", other.len()),
                )),
            }
        }
        "vn" => {
            let values = parse_floats(fields, line_no, keyword)?;
            match values.as_slice() {
                [x, y, z] => Ok(Directive::Normal(Vector3::new(*x, *y, *z))),
                other => Err(IoError::malformed(
                    line_no,
                    keyword,
                    format!("expected 3 values, got {}", other.len()),
                )),
            }
        }
        "f" => fields
            .map(|token| parse_corner(token, line_no))
            .collect::<IoResult<Vec<_>>>()
            .map(Directive::Face),
        "o" | "g" => {
            // Names may contain spaces; keep everything after the keyword.
            let name = trimmed[keyword.len()..].trim();
            Ok(Directive::Segment(name.to_string()))
        }
        _ => Ok(Directive::Ignored),
    }
}

/// Parse the remaining fields as finite floats.
///
/// Rust's float parser always uses `.` as the decimal separator, so host
/// locale never changes the result.
fn parse_floats<'a>(
    fields: impl Iterator<Item = &'a str>,
    line_no: usize,
    directive: &str,
) -> IoResult<Vec<f64>> {
    fields
        .map(|field| {
            field
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    IoError::malformed(line_no, directive, format!("invalid number '{field}'"))
                })
        })
        .collect()
}

fn parse_corner(token: &str, line_no: usize) -> IoResult<RawCorner> {
    let mut parts = token.split('/');
    let position = match parts.next() {
        Some(p) if !p.is_empty() => parse_index(p, token, line_no)?,
        _ => {
            return Err(IoError::malformed(
                line_no,
                "f",
                format!("face corner '{token}' has no position index"),
            ));
        }
    };
    let uv = parse_optional_index(parts.next(), token, line_no)?;
    let normal = parse_optional_index(parts.next(), token, line_no)?;
    if parts.next().is_some() {
        return Err(IoError::malformed(
            line_no,
            "f",
            format!("face corner '{token}' has more than three components"),
        ));
    }
    Ok(RawCorner {
        position,
        uv,
        normal,
    })
}

fn parse_optional_index(part: Option<&str>, token: &str, line_no: usize) -> IoResult<Option<i64>> {
    match part {
        None | Some("") => Ok(None),
        Some(p) => parse_index(p, token, line_no).map(Some),
    }
}

fn parse_index(part: &str, token: &str, line_no: usize) -> IoResult<i64> {
    part.parse::<i64>().map_err(|_| {
        IoError::malformed(
            line_no,
            "f",
            format!("invalid index '{part}' in face corner '{token}'"),
        )
    })
}
