//! Wavefront OBJ subset parser.
//!
//! The viewer's model assets only need `v` and `f` statements; polygonal
//! faces are triangulated as fans and everything else (`vn`, `vt`, groups,
//! materials, comments) is skipped. Index references may be absolute or
//! negative (relative to the vertices seen so far).

use nom::{
    character::complete::{char, i64 as index, multispace0, multispace1},
    combinator::opt,
    multi::many1,
    number::complete::float,
    sequence::{preceded, tuple},
    IResult,
};
use thiserror::Error;

use crate::geometry::Mesh;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("line {line}: {detail}")]
pub struct ObjError {
    pub line: usize,
    pub detail: String,
}

impl ObjError {
    fn new(line: usize, detail: impl Into<String>) -> Self {
        Self {
            line,
            detail: detail.into(),
        }
    }
}

/// Parse OBJ text into an indexed mesh.
pub fn parse_obj(input: &str) -> Result<Mesh, ObjError> {
    let mut mesh = Mesh::new();

    for (i, raw) in input.lines().enumerate() {
        let lineno = i + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (keyword, rest) = match line.split_once(char::is_whitespace) {
            Some(split) => split,
            None => (line, ""),
        };
        match keyword {
            "v" => {
                let (_, (x, y, z)) = vertex_coords(rest)
                    .map_err(|_| ObjError::new(lineno, "malformed vertex"))?;
                mesh.add_position(x, y, z);
            }
            "f" => {
                let (_, refs) =
                    face_refs(rest).map_err(|_| ObjError::new(lineno, "malformed face"))?;
                if refs.len() < 3 {
                    return Err(ObjError::new(lineno, "face needs at least 3 vertices"));
                }
                let resolved = refs
                    .iter()
                    .map(|&r| resolve_index(r, mesh.positions.len()))
                    .collect::<Option<Vec<u32>>>()
                    .ok_or_else(|| ObjError::new(lineno, "vertex index out of range"))?;
                // Fan triangulation of the polygon.
                for w in 1..resolved.len() - 1 {
                    mesh.add_triangle(resolved[0], resolved[w], resolved[w + 1]);
                }
            }
            // Normals, texcoords, objects, groups, smoothing and material
            // statements carry nothing the wireframe viewer uses.
            _ => {}
        }
    }

    Ok(mesh)
}

fn resolve_index(reference: i64, vertex_count: usize) -> Option<u32> {
    let idx = if reference > 0 {
        reference - 1
    } else if reference < 0 {
        vertex_count as i64 + reference
    } else {
        return None;
    };
    if idx >= 0 && (idx as usize) < vertex_count {
        Some(idx as u32)
    } else {
        None
    }
}

fn vertex_coords(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}

fn face_refs(input: &str) -> IResult<&str, Vec<i64>> {
    many1(preceded(multispace0, face_ref))(input)
}

// `v`, `v/vt`, `v//vn` or `v/vt/vn`; only the position index is kept.
fn face_ref(input: &str) -> IResult<&str, i64> {
    let (input, v) = index(input)?;
    let (input, _) = opt(tuple((
        char('/'),
        opt(index),
        opt(preceded(char('/'), index)),
    )))(input)?;
    Ok((input, v))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "\
# flat quad
v -1.0 0.0 -1.0
v 1.0 0.0 -1.0
v 1.0 0.0 1.0
v -1.0 0.0 1.0
f 1 2 3 4
";

    #[test]
    fn quad_triangulates_as_a_fan() {
        let mesh = parse_obj(QUAD).unwrap();
        assert_eq!(mesh.positions.len(), 4);
        assert_eq!(mesh.triangles, vec![[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn slash_forms_keep_only_the_position_index() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1 2//3 3/2/3\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn negative_references_resolve_from_the_end() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn unknown_statements_are_skipped() {
        let src = "o thing\nvn 0 1 0\nvt 0 0\ns off\nv 0 0 0\nv 1 0 0\nv 0 0 1\nf 1 2 3\n";
        let mesh = parse_obj(src).unwrap();
        assert_eq!(mesh.positions.len(), 3);
        assert_eq!(mesh.triangles.len(), 1);
    }

    #[test]
    fn out_of_range_index_is_an_error() {
        let src = "v 0 0 0\nv 1 0 0\nf 1 2 3\n";
        let err = parse_obj(src).unwrap_err();
        assert_eq!(err.line, 3);
    }

    #[test]
    fn zero_index_is_an_error() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n";
        assert!(parse_obj(src).is_err());
    }

    #[test]
    fn malformed_vertex_reports_its_line() {
        let src = "v 0 0 0\nv one two three\n";
        let err = parse_obj(src).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.detail, "malformed vertex");
    }
}
