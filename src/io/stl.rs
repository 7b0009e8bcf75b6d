//! STL export and import.
//!
//! Binary layout: an 80 byte header, a little-endian `u32` triangle count,
//! then 50 bytes per triangle (normal, three vertices, all `f32`, and a
//! 2 byte attribute word).

use crate::float_types::Real;
use crate::io::IoError;
use crate::mesh::{Mesh, Triangle};
use nalgebra::{Point3, Vector3};
use std::borrow::Cow;
use std::io::{Cursor, Read};
use std::path::Path;

pub const HEADER_LEN: usize = 80;
pub const RECORD_LEN: usize = 50;

/// Convert `mesh` to an **ASCII STL** string with the given solid `name`.
///
/// ```rust
/// # use sdforge::{render::{render, RenderConfig, Resolution}, sdf::Solid};
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mesh = render(&Solid::sphere(1.0)?, &RenderConfig::new(Resolution::Cells(8)))?;
/// let text = mesh.to_stl_ascii("ball");
/// assert!(text.starts_with("solid ball"));
/// # Ok(())
/// # }
/// ```
pub fn to_stl_ascii(mesh: &Mesh, name: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("solid {name}\n"));

    for tri in &mesh.triangles {
        let n = tri.normal;
        out.push_str(&format!("  facet normal {:.6} {:.6} {:.6}\n", n.x, n.y, n.z));
        out.push_str("    outer loop\n");
        for p in &tri.vertices {
            out.push_str(&format!("      vertex {:.6} {:.6} {:.6}\n", p.x, p.y, p.z));
        }
        out.push_str("    endloop\n");
        out.push_str("  endfacet\n");
    }

    out.push_str(&format!("endsolid {name}\n"));
    out
}

/// Convert `mesh` to a **binary STL** byte vector.
///
/// `stl_io` writes its own header, so `_name` is not stored.
pub fn to_stl_binary(mesh: &Mesh, _name: &str) -> std::io::Result<Vec<u8>> {
    use stl_io::{Normal, Vertex, write_stl};

    #[allow(clippy::unnecessary_cast)]
    let triangles: Vec<stl_io::Triangle> = mesh
        .triangles
        .iter()
        .map(|tri| {
            let n = tri.normal;
            stl_io::Triangle {
                normal: Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: tri.vertices.map(|p| Vertex::new([p.x as f32, p.y as f32, p.z as f32])),
            }
        })
        .collect();

    let mut cursor = Cursor::new(Vec::new());
    write_stl(&mut cursor, triangles.iter())?;
    Ok(cursor.into_inner())
}

/// Text STL: starts with `solid` and holds nothing but printable ASCII and
/// whitespace. Binary records are `f32` data and practically always contain
/// a zero or high byte.
fn is_ascii_stl(stl_data: &[u8]) -> bool {
    stl_data.starts_with(b"solid")
        && stl_data.iter().all(|b| b.is_ascii_graphic() || b.is_ascii_whitespace())
}

/// Check a binary STL's length against its declared triangle count.
fn check_binary_len(stl_data: &[u8]) -> Result<(), IoError> {
    let actual = stl_data.len();
    if actual < HEADER_LEN + 4 {
        return Err(IoError::TruncatedStl { expected: HEADER_LEN + 4, actual });
    }

    let mut count = [0u8; 4];
    count.copy_from_slice(&stl_data[HEADER_LEN..HEADER_LEN + 4]);
    let count = u32::from_le_bytes(count) as usize;
    let expected = count
        .checked_mul(RECORD_LEN)
        .and_then(|body| body.checked_add(HEADER_LEN + 4))
        .ok_or_else(|| IoError::MalformedInput(format!("triangle count {count} overflows")))?;

    match actual.cmp(&expected) {
        std::cmp::Ordering::Equal => Ok(()),
        std::cmp::Ordering::Less => Err(IoError::TruncatedStl { expected, actual }),
        std::cmp::Ordering::Greater => Err(IoError::MalformedInput(format!(
            "{} trailing bytes after {count} triangles",
            actual - expected
        ))),
    }
}

/// Parse STL data, binary or ASCII.
///
/// Binary data must be exactly as long as its triangle count says, even
/// when its header happens to start with `solid`; no partial mesh is
/// returned. Zero normals are recomputed from the vertex winding.
pub fn from_stl(stl_data: &[u8]) -> Result<Mesh, IoError> {
    let data = if is_ascii_stl(stl_data) {
        Cow::Borrowed(stl_data)
    } else {
        check_binary_len(stl_data)?;
        if stl_data.starts_with(b"solid") {
            // stl_io picks its ascii reader from the header alone
            let mut scrubbed = stl_data.to_vec();
            scrubbed[..5].fill(0);
            Cow::Owned(scrubbed)
        } else {
            Cow::Borrowed(stl_data)
        }
    };

    let mut cursor = Cursor::new(&*data);
    let stl_reader = stl_io::create_stl_reader(&mut cursor)
        .map_err(|e| IoError::MalformedInput(format!("unreadable STL: {e}")))?;

    let mut triangles = Vec::with_capacity(stl_reader.size_hint().0);
    for tri_result in stl_reader {
        let tri = tri_result.map_err(|e| IoError::MalformedInput(format!("bad facet: {e}")))?;
        let vertices = [0, 1, 2].map(|k| {
            let v = tri.vertices[k];
            Point3::new(v[0] as Real, v[1] as Real, v[2] as Real)
        });
        if vertices.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(IoError::MalformedInput("non-finite vertex".into()));
        }
        let normal = Vector3::new(tri.normal[0] as Real, tri.normal[1] as Real, tri.normal[2] as Real);
        let triangle = match normal.try_normalize(0.0) {
            Some(n) if n.iter().all(|c| c.is_finite()) => Triangle::new(vertices, n),
            _ => Triangle::from_vertices(vertices),
        };
        triangles.push(triangle);
    }

    Ok(Mesh::from_triangles(triangles))
}

/// Read a whole stream and parse it with [`from_stl`].
pub fn import_mesh<R: Read>(mut reader: R) -> Result<Mesh, IoError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_stl(&bytes)
}

impl Mesh {
    pub fn to_stl_ascii(&self, name: &str) -> String {
        self::to_stl_ascii(self, name)
    }

    pub fn to_stl_binary(&self, name: &str) -> std::io::Result<Vec<u8>> {
        self::to_stl_binary(self, name)
    }

    pub fn from_stl(stl_data: &[u8]) -> Result<Mesh, IoError> {
        self::from_stl(stl_data)
    }

    /// Write the mesh as a binary STL file.
    pub fn save_stl<P: AsRef<Path>>(&self, path: P) -> Result<(), IoError> {
        let name = path
            .as_ref()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("sdforge");
        std::fs::write(path.as_ref(), self.to_stl_binary(name)?)?;
        Ok(())
    }
}
