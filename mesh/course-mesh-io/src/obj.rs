//! OBJ (Wavefront) import.
//!
//! Reads `v`, `vt`, `vn`, `f`, `o` and `g` lines. Every `o`/`g` line starts a
//! new segment; each segment with at least one triangle becomes one
//! [`SurfaceMesh`]. Materials, smoothing groups, lines and comments are
//! ignored.
//!
//! Import happens in two phases. [`ObjParser`] reads the text into raw
//! geometry tables and per-segment face records, then
//! [`ObjDocument::into_meshes`] deduplicates and triangulates each segment.
//! Face indices may therefore refer to vertices defined later in the file.
//!
//! # Example
//!
//! ```
//! use course_mesh_io::{parse_obj, ObjOptions};
//!
//! let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
//! let meshes = parse_obj(text.as_bytes(), &ObjOptions::default()).unwrap();
//!
//! assert_eq!(meshes.len(), 1);
//! assert_eq!(meshes[0].faces, vec![[0, 1, 2], [0, 2, 3]]);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::mem;
use std::path::Path;

use tracing::{debug, info};

use course_mesh_types::SurfaceMesh;

use crate::error::{IoError, IoResult};
use crate::options::{AxisConvention, ObjOptions};
use crate::segment::{FaceRecord, FaceSegment, VertexKey, build_segment};
use crate::tables::RawGeometryTables;
use crate::tokenize::{Directive, RawCorner, parse_line};

/// Name prefix for segments without a usable name.
pub const FALLBACK_NAME_PREFIX: &str = "OBJMesh_";

/// Everything read from an OBJ file, before triangulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjDocument {
    /// Positions, texture coordinates and normals, already in the output
    /// axis convention.
    pub tables: RawGeometryTables,
    /// Segments in file order, including empty ones.
    pub segments: Vec<FaceSegment>,
    /// Axis convention the tables were read with.
    pub axis: AxisConvention,
}

impl ObjDocument {
    /// Deduplicate and triangulate every segment.
    ///
    /// Segments that yield no triangles are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Malformed`] if any face references a missing
    /// position, texture coordinate or normal. No meshes are returned in
    /// that case.
    pub fn into_meshes(self) -> IoResult<Vec<SurfaceMesh>> {
        let mut meshes = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match build_segment(segment, &self.tables, self.axis) {
                Ok(mesh) => meshes.push(mesh),
                Err(IoError::EmptyMesh { name }) => {
                    debug!(name = %name, "Skipping segment without triangles");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(meshes)
    }
}

/// Line-by-line OBJ reader.
///
/// Holds the raw tables, the completed segments and the segment currently
/// being filled. [`ObjParser::commit_segment`] closes the current segment and
/// starts a fresh one.
#[derive(Debug)]
pub struct ObjParser {
    axis: AxisConvention,
    tables: RawGeometryTables,
    segments: Vec<FaceSegment>,
    current: FaceSegment,
    unnamed_count: usize,
    skipped_faces: usize,
}

impl ObjParser {
    /// Create a parser with the given options.
    #[must_use]
    pub fn new(options: &ObjOptions) -> Self {
        Self {
            axis: options.axis,
            tables: RawGeometryTables::new(),
            segments: Vec::new(),
            current: FaceSegment::new(format!("{FALLBACK_NAME_PREFIX}0")),
            unnamed_count: 0,
            skipped_faces: 0,
        }
    }

    /// Feed one line. `line_no` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Malformed`] if the line cannot be parsed.
    pub fn feed_line(&mut self, line: &str, line_no: usize) -> IoResult<()> {
        match parse_line(line, line_no)? {
            Directive::Position { point, color } => {
                self.tables.push_position(self.axis.apply_point(point), color);
            }
            Directive::TexCoord(uv) => self.tables.push_uv(uv),
            Directive::Normal(n) => self.tables.push_normal(self.axis.apply_normal(n)),
            Directive::Face(corners) => self.push_face(&corners, line_no)?,
            Directive::Segment(name) => {
                self.commit_segment();
                self.current.name = if name.is_empty() {
                    self.unnamed_count += 1;
                    format!("{FALLBACK_NAME_PREFIX}{}", self.unnamed_count)
                } else {
                    name
                };
            }
            Directive::Ignored => {}
        }
        Ok(())
    }

    /// Close the current segment and start an empty one with the same name.
    ///
    /// The caller renames the new segment when a marker line supplies a name.
    pub fn commit_segment(&mut self) {
        let next = FaceSegment::new(self.current.name.clone());
        let done = mem::replace(&mut self.current, next);
        debug!(
            name = %done.name,
            faces = done.faces.len(),
            "Committed segment"
        );
        self.segments.push(done);
    }

    /// Commit the last segment and return everything read.
    #[must_use]
    pub fn finish(mut self) -> ObjDocument {
        self.commit_segment();
        if self.skipped_faces > 0 {
            debug!(count = self.skipped_faces, "Skipped degenerate faces");
        }
        ObjDocument {
            tables: self.tables,
            segments: self.segments,
            axis: self.axis,
        }
    }

    fn push_face(&mut self, corners: &[RawCorner], line_no: usize) -> IoResult<()> {
        if corners.len() < 3 {
            self.skipped_faces += 1;
            return Ok(());
        }

        let tables = &self.tables;
        let corners = corners
            .iter()
            .map(|c| -> IoResult<VertexKey> {
                Ok(VertexKey {
                    position: resolve_index(c.position, tables.position_count(), line_no)?,
                    uv: c
                        .uv
                        .map(|i| resolve_index(i, tables.uv_count(), line_no))
                        .transpose()?,
                    normal: c
                        .normal
                        .map(|i| resolve_index(i, tables.normal_count(), line_no))
                        .transpose()?,
                })
            })
            .collect::<IoResult<Vec<_>>>()?;

        self.current.faces.push(FaceRecord {
            line: line_no,
            corners,
        });
        Ok(())
    }
}

/// Convert an OBJ index to 0-based.
///
/// Positive indices are 1-based; negative ones count back from the end of
/// the table as it stands on this line. Positive indices are bounds-checked
/// later, once the whole file has been read.
fn resolve_index(raw: i64, table_len: usize, line_no: usize) -> IoResult<u32> {
    let resolved = match raw {
        0 => None,
        r if r > 0 => Some(r - 1),
        r => i64::try_from(table_len).ok().map(|len| len + r).filter(|&i| i >= 0),
    };
    resolved
        .and_then(|i| u32::try_from(i).ok())
        .ok_or_else(|| IoError::malformed(line_no, "f", format!("invalid index {raw}")))
}

/// Read an OBJ document from a buffered reader without triangulating.
///
/// # Errors
///
/// Returns an error if reading fails or a line is malformed.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD. A line whose
/// directive is ignored stays ignored; a bad byte inside a number makes that
/// line `Malformed`.
pub fn read_obj_document<R: BufRead>(
    mut reader: R,
    options: &ObjOptions,
) -> IoResult<ObjDocument> {
    let mut parser = ObjParser::new(options);
    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        let line = String::from_utf8_lossy(&buf);
        parser.feed_line(line.trim_end_matches(['\n', '\r']), line_no)?;
    }
    Ok(parser.finish())
}

/// Parse OBJ text from a buffered reader into meshes.
///
/// # Errors
///
/// Returns an error if reading fails, a line is malformed, or a face
/// references an index outside its table.
pub fn parse_obj<R: BufRead>(reader: R, options: &ObjOptions) -> IoResult<Vec<SurfaceMesh>> {
    read_obj_document(reader, options)?.into_meshes()
}

/// Load meshes from an OBJ file.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if the path does not exist, otherwise
/// the same errors as [`parse_obj`].
///
/// # Example
///
/// ```no_run
/// use course_mesh_io::{load_obj, ObjOptions};
///
/// let meshes = load_obj("fairway_01.obj", &ObjOptions::default()).unwrap();
/// for mesh in &meshes {
///     println!("{}: {} triangles", mesh.name, mesh.face_count());
/// }
/// ```
pub fn load_obj<P: AsRef<Path>>(path: P, options: &ObjOptions) -> IoResult<Vec<SurfaceMesh>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let meshes = parse_obj(BufReader::new(file), options)?;
    info!(
        path = %path.display(),
        meshes = meshes.len(),
        triangles = meshes.iter().map(SurfaceMesh::face_count).sum::<usize>(),
        "Loaded OBJ"
    );
    Ok(meshes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use course_mesh_types::{Vertex, VertexColor};
    use nalgebra::{Point3, Vector2, Vector3};

    fn parse(text: &str) -> IoResult<Vec<SurfaceMesh>> {
        parse_obj(text.as_bytes(), &ObjOptions::default())
    }

    const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";

    #[test]
    fn quad_fans_from_first_corner() {
        let meshes = parse(QUAD).unwrap();
        assert_eq!(meshes.len(), 1);
        let mesh = &meshes[0];
        assert_eq!(mesh.name, "OBJMesh_0");
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn two_corner_face_is_skipped() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nf 1 2\nf 1 2 3\n";
        let meshes = parse(text).unwrap();
        assert_eq!(meshes[0].face_count(), 1);
        assert_eq!(meshes[0].vertex_count(), 3);
    }

    #[test]
    fn only_degenerate_faces_yield_no_mesh() {
        let meshes = parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap();
        assert!(meshes.is_empty());
    }

    #[test]
    fn full_corner_attributes() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 0 1
vt 0 0
vt 1 0
vt 0 1
vn 0 1 0
f 1/1/1 2/2/1 3/3/1
";
        let mesh = &parse(text).unwrap()[0];
        assert_eq!(mesh.vertices[1].uv, Vector2::new(1.0, 0.0));
        assert_eq!(mesh.vertices[2].normal, Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn vertices_are_shared_between_faces() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n";
        let mesh = &parse(text).unwrap()[0];
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn unreferenced_table_entries_are_not_copied() {
        let text = "v 9 9 9\nv 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 2 3 4\n";
        let mesh = &parse(text).unwrap()[0];
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[0].position, Point3::origin());
        assert_eq!(mesh.vertices[0].normal, Vertex::DEFAULT_NORMAL);
    }

    #[test]
    fn negative_indices_are_relative() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nf -3 -2 -1\n";
        let mesh = &parse(text).unwrap()[0];
        assert_eq!(mesh.faces, vec![[0, 1, 2]]);
        assert_eq!(mesh.vertices[2].position, Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn forward_references_resolve_after_reading() {
        let text = "f 1 2 3\nv 0 0 0\nv 1 0 0\nv 0 1 0\n";
        let mesh = &parse(text).unwrap()[0];
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn index_out_of_range_aborts_import() {
        let text = "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no b\nf 1 2 4\n";
        let err = parse(text).unwrap_err();
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn zero_index_is_malformed() {
        let err = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert!(matches!(err, IoError::Malformed { line: 4, .. }));
    }

    #[test]
    fn negative_index_past_start_is_malformed() {
        let err = parse("v 0 0 0\nf -1 -2 -3\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn bad_number_reports_line() {
        let err = parse("v 0 0 0\nv 1 x 0\n").unwrap_err();
        match err {
            IoError::Malformed {
                line, directive, ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(directive, "v");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn segments_split_meshes() {
        let text = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
o Green
f 1 2 3
g Fringe
f 1 3 4
";
        let meshes = parse(text).unwrap();
        let names: Vec<_> = meshes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Green", "Fringe"]);
        // Each segment has its own vertex slots
        assert_eq!(meshes[1].vertex_count(), 3);
        assert_eq!(meshes[1].faces, vec![[0, 1, 2]]);
    }

    #[test]
    fn unnamed_segments_get_fallback_names() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
o
f 1 2 3
g
f 1 2 3
";
        let meshes = parse(text).unwrap();
        let names: Vec<_> = meshes.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["OBJMesh_0", "OBJMesh_1", "OBJMesh_2"]);
    }

    #[test]
    fn empty_segments_are_not_emitted() {
        let text = "o first\no second\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no third\n";
        let meshes = parse(text).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].name, "second");
    }

    #[test]
    fn document_keeps_empty_segments() {
        let doc = read_obj_document("o a\no b\n".as_bytes(), &ObjOptions::default()).unwrap();
        let names: Vec<_> = doc.segments.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["OBJMesh_0", "a", "b"]);
    }

    #[test]
    fn vertex_colors_are_carried() {
        let text = "v 0 0 0 1 0 0\nv 1 0 0 0 255 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = &parse(text).unwrap()[0];
        assert_eq!(mesh.vertices[0].color, VertexColor::RED);
        assert_eq!(mesh.vertices[1].color, VertexColor::new(0, 255, 0));
        assert_eq!(mesh.vertices[2].color, VertexColor::WHITE);
    }

    #[test]
    fn flip_z_mirrors_and_reverses_winding() {
        let text = "v 0 0 1\nv 1 0 1\nv 1 1 1\nvn 0 0 1\nf 1//1 2//1 3//1\n";
        let opts = ObjOptions::default().with_axis(AxisConvention::FlipZ);
        let mesh = &parse_obj(text.as_bytes(), &opts).unwrap()[0];
        assert_eq!(mesh.vertices[0].position, Point3::new(0.0, 0.0, -1.0));
        assert_eq!(mesh.vertices[0].normal, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(mesh.faces, vec![[0, 2, 1]]);
    }

    #[test]
    fn ignores_unused_directives() {
        let text = format!("# exported\nmtllib course.mtl\nusemtl grass\ns 1\n{QUAD}");
        assert_eq!(parse(&text).unwrap()[0].face_count(), 2);
    }

    #[test]
    fn crlf_line_endings() {
        let text = QUAD.replace('\n', "\r\n");
        assert_eq!(parse(&text).unwrap()[0].face_count(), 2);
    }

    #[test]
    fn non_utf8_comment_is_ignored() {
        let bytes = b"# export\xe9 by tool\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let meshes = parse_obj(&bytes[..], &ObjOptions::default()).unwrap();
        assert_eq!(meshes.len(), 1);
    }

    #[test]
    fn last_line_without_newline() {
        let text = QUAD.trim_end();
        assert_eq!(parse(text).unwrap()[0].face_count(), 2);
    }

    #[test]
    fn missing_file() {
        let err = load_obj("/nonexistent/course/green.obj", &ObjOptions::default()).unwrap_err();
        assert!(matches!(err, IoError::FileNotFound { .. }));
    }

    #[test]
    fn resolve_index_rules() {
        assert_eq!(resolve_index(1, 0, 1).unwrap(), 0);
        assert_eq!(resolve_index(-1, 4, 1).unwrap(), 3);
        assert!(resolve_index(0, 4, 1).is_err());
        assert!(resolve_index(-5, 4, 1).is_err());
        assert!(resolve_index(i64::MAX, 4, 1).is_err());
    }
}
