//! OBJ format support
//!
//! Exported surface meshes use the plain-text OBJ interchange format:
//! vertex positions, optional per-vertex normals, and triangular faces
//! with 1-based indices. No texture or material data is written.

use crate::{MeshReader, MeshWriter};
use terramesh_core::{Error, Point3d, Result, TriangleMesh, Vector3d};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

pub struct ObjReader;
pub struct ObjWriter;

impl MeshWriter for ObjWriter {
    /// Write a mesh as OBJ text, overwriting any existing file.
    ///
    /// Faces reference normals (`f v//n ...`) when the mesh carries them;
    /// vertex and normal arrays are parallel, so the indices coincide.
    fn write_mesh<P: AsRef<Path>>(mesh: &TriangleMesh, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        for v in &mesh.vertices {
            writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
        }

        if let Some(normals) = &mesh.normals {
            for n in normals {
                writeln!(writer, "vn {} {} {}", n.x, n.y, n.z)?;
            }
        }

        for face in &mesh.faces {
            if mesh.normals.is_some() {
                writeln!(
                    writer,
                    "f {}//{} {}//{} {}//{}",
                    face[0] + 1,
                    face[0] + 1,
                    face[1] + 1,
                    face[1] + 1,
                    face[2] + 1,
                    face[2] + 1
                )?;
            } else {
                writeln!(writer, "f {} {} {}", face[0] + 1, face[1] + 1, face[2] + 1)?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}

impl MeshReader for ObjReader {
    /// Read the subset of OBJ this crate writes: `v`, `vn` and triangular
    /// `f` records. Other record types are ignored.
    fn read_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut faces = Vec::new();

        for (number, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line_number = number + 1;
            let mut tokens = line.split_whitespace();

            match tokens.next() {
                Some("v") => {
                    let [x, y, z] = parse_triple(tokens, line_number, &line)?;
                    vertices.push(Point3d::new(x, y, z));
                }
                Some("vn") => {
                    let [x, y, z] = parse_triple(tokens, line_number, &line)?;
                    normals.push(Vector3d::new(x, y, z));
                }
                Some("f") => {
                    let indices: Vec<usize> = tokens
                        .map(|t| parse_face_vertex(t, line_number, &line))
                        .collect::<Result<_>>()?;
                    if indices.len() != 3 {
                        return Err(Error::parse(
                            line_number,
                            line.clone(),
                            format!("expected triangular face, found {} vertices", indices.len()),
                        ));
                    }
                    faces.push([indices[0], indices[1], indices[2]]);
                }
                _ => {}
            }
        }

        let mut mesh = TriangleMesh::from_vertices_and_faces(vertices, faces);
        mesh.set_normals(normals);
        Ok(mesh)
    }
}

fn parse_triple<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line_number: usize,
    line: &str,
) -> Result<[f64; 3]> {
    let values: Vec<f64> = tokens
        .map(|t| {
            t.parse().map_err(|_| {
                Error::parse(line_number, line, format!("invalid numeric field {:?}", t))
            })
        })
        .collect::<Result<_>>()?;

    if values.len() != 3 {
        return Err(Error::parse(
            line_number,
            line,
            format!("expected 3 components, found {}", values.len()),
        ));
    }

    Ok([values[0], values[1], values[2]])
}

/// Parse one face vertex reference (`7`, `7/2` or `7//7`) into a 0-based
/// vertex index.
fn parse_face_vertex(token: &str, line_number: usize, line: &str) -> Result<usize> {
    let vertex_part = token.split('/').next().unwrap_or("");
    let index: usize = vertex_part.parse().map_err(|_| {
        Error::parse(
            line_number,
            line,
            format!("invalid face vertex reference {:?}", token),
        )
    })?;

    if index == 0 {
        return Err(Error::parse(
            line_number,
            line,
            "OBJ face indices are 1-based",
        ));
    }

    Ok(index - 1)
}
