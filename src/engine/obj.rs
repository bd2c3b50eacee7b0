//! Importer for a restricted OBJ subset: triangles only, every face vertex
//! fully attributed as `position/texcoord/normal`.
//!
//! The indexed, face-based source is flattened into a non-indexed triangle
//! soup (three parallel arrays, one entry per face corner). Shared vertices
//! are duplicated on purpose; deduplication is out of scope for this
//! importer. Lines with an unrecognized leading token are skipped so files
//! carrying comments, object names or material references still load.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("cannot open OBJ file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("OBJ line {line}: malformed '{record}' record")]
    MalformedRecord { line: usize, record: &'static str },
    #[error("OBJ line {line}: only faces with three position/texcoord/normal triples are supported")]
    UnsupportedFace { line: usize },
    #[error("OBJ line {line}: face index out of range")]
    IndexOutOfRange { line: usize },
}

/// Flat, non-indexed triangle-list mesh. The three arrays always have the
/// same length, which is a multiple of three.
#[derive(Debug, Default, Clone)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

pub fn load_obj_file(path: &Path) -> Result<MeshData, ObjError> {
    let source = std::fs::read_to_string(path).map_err(|source| ObjError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_obj(&source)
}

pub fn parse_obj(source: &str) -> Result<MeshData, ObjError> {
    let mut raw_positions: Vec<[f32; 3]> = Vec::new();
    let mut raw_normals: Vec<[f32; 3]> = Vec::new();
    let mut raw_tex_coords: Vec<[f32; 2]> = Vec::new();
    let mut mesh = MeshData::default();

    for (index, text) in source.lines().enumerate() {
        let line = index + 1;
        let mut tokens = text.split_whitespace();
        match tokens.next() {
            Some("v") => raw_positions.push(parse_floats3(&mut tokens, line, "v")?),
            Some("vn") => raw_normals.push(parse_floats3(&mut tokens, line, "vn")?),
            Some("vt") => raw_tex_coords.push(parse_floats2(&mut tokens, line, "vt")?),
            Some("f") => {
                let corners: Vec<&str> = tokens.collect();
                if corners.len() != 3 {
                    return Err(ObjError::UnsupportedFace { line });
                }
                for corner in corners {
                    let (vi, ti, ni) = parse_face_corner(corner, line)?;
                    let position = *raw_positions
                        .get(vi)
                        .ok_or(ObjError::IndexOutOfRange { line })?;
                    let tex_coord = *raw_tex_coords
                        .get(ti)
                        .ok_or(ObjError::IndexOutOfRange { line })?;
                    let normal = *raw_normals
                        .get(ni)
                        .ok_or(ObjError::IndexOutOfRange { line })?;
                    mesh.positions.push(position);
                    mesh.tex_coords.push(tex_coord);
                    mesh.normals.push(normal);
                }
            }
            // Unknown leading token (comments, groups, materials): skip.
            _ => {}
        }
    }

    Ok(mesh)
}

/// One `p/t/n` triple, 1-based in the file, decremented here.
fn parse_face_corner(corner: &str, line: usize) -> Result<(usize, usize, usize), ObjError> {
    let mut parts = corner.split('/');
    let vi = parse_face_index(parts.next(), line)?;
    let ti = parse_face_index(parts.next(), line)?;
    let ni = parse_face_index(parts.next(), line)?;
    if parts.next().is_some() {
        return Err(ObjError::UnsupportedFace { line });
    }
    Ok((vi, ti, ni))
}

fn parse_face_index(part: Option<&str>, line: usize) -> Result<usize, ObjError> {
    let raw: usize = part
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .ok_or(ObjError::UnsupportedFace { line })?;
    // OBJ indexes from 1; an explicit 0 is out of range by definition.
    raw.checked_sub(1).ok_or(ObjError::IndexOutOfRange { line })
}

fn parse_floats3<'a, I>(tokens: &mut I, line: usize, record: &'static str) -> Result<[f32; 3], ObjError>
where
    I: Iterator<Item = &'a str>,
{
    let mut out = [0.0; 3];
    for slot in &mut out {
        *slot = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or(ObjError::MalformedRecord { line, record })?;
    }
    Ok(out)
}

fn parse_floats2<'a, I>(tokens: &mut I, line: usize, record: &'static str) -> Result<[f32; 2], ObjError>
where
    I: Iterator<Item = &'a str>,
{
    let mut out = [0.0; 2];
    for slot in &mut out {
        *slot = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or(ObjError::MalformedRecord { line, record })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_TRIANGLE: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
vt 0 0
vt 1 0
vt 0 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn one_triangle_flattens_in_source_order() {
        let mesh = parse_obj(ONE_TRIANGLE).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.normals.len(), 3);
        assert_eq!(mesh.tex_coords.len(), 3);
        assert_eq!(mesh.positions, vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        // The single normal is reused for all three corners.
        assert!(mesh.normals.iter().all(|n| *n == [0.0, 0.0, 1.0]));
        assert_eq!(mesh.tex_coords, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
    }

    #[test]
    fn two_vertex_face_is_a_format_error() {
        let source = "v 0 0 0\nv 1 0 0\nvn 0 0 1\nvt 0 0\nf 1/1/1 2/1/1\n";
        assert!(matches!(
            parse_obj(source),
            Err(ObjError::UnsupportedFace { line: 5 })
        ));
    }

    #[test]
    fn four_vertex_face_is_a_format_error() {
        let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 1 1 0\nvn 0 0 1\nvt 0 0\nf 1/1/1 2/1/1 3/1/1 4/1/1\n";
        assert!(matches!(parse_obj(source), Err(ObjError::UnsupportedFace { .. })));
    }

    #[test]
    fn missing_attribute_index_is_a_format_error() {
        let source = "v 0 0 0\nvn 0 0 1\nvt 0 0\nf 1//1 1/1/1 1/1/1\n";
        assert!(matches!(parse_obj(source), Err(ObjError::UnsupportedFace { .. })));
        let source = "v 0 0 0\nvn 0 0 1\nvt 0 0\nf 1/1 1/1/1 1/1/1\n";
        assert!(matches!(parse_obj(source), Err(ObjError::UnsupportedFace { .. })));
    }

    #[test]
    fn index_past_parsed_attributes_is_rejected() {
        // Only one normal defined when the face references normal 5.
        let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nvt 0 0\nf 1/1/5 2/1/1 3/1/1\n";
        assert!(matches!(
            parse_obj(source),
            Err(ObjError::IndexOutOfRange { line: 6 })
        ));
    }

    #[test]
    fn zero_index_is_rejected() {
        let source = "v 0 0 0\nvn 0 0 1\nvt 0 0\nf 0/1/1 1/1/1 1/1/1\n";
        assert!(matches!(parse_obj(source), Err(ObjError::IndexOutOfRange { .. })));
    }

    #[test]
    fn unknown_records_are_skipped() {
        let source = format!("# comment\no statue\nusemtl marble\ns off\n{ONE_TRIANGLE}");
        let mesh = parse_obj(&source).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
    }

    #[test]
    fn negative_face_index_is_rejected() {
        // Relative (negative) OBJ indices are outside the supported subset.
        let source = "v 0 0 0\nvn 0 0 1\nvt 0 0\nf -1/1/1 1/1/1 1/1/1\n";
        assert!(matches!(parse_obj(source), Err(ObjError::UnsupportedFace { .. })));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = load_obj_file(Path::new("does/not/exist.obj")).unwrap_err();
        assert!(matches!(err, ObjError::Io { .. }));
    }

    #[test]
    fn truncated_vertex_record_is_malformed() {
        assert!(matches!(
            parse_obj("v 1.0 2.0\n"),
            Err(ObjError::MalformedRecord { record: "v", .. })
        ));
    }
}
