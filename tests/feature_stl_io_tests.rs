#![cfg(feature = "stl-io")]

mod support;

use sdforge::{
    io::{IoError, stl},
    mesh::Mesh,
    render::{RenderConfig, Resolution, render, render_to_stl},
    sdf::Solid,
    traits::FieldOps,
};
use support::approx_eq;

fn sphere_box() -> Mesh {
    let part = Solid::sphere(5.0).unwrap().intersection(&Solid::box3(8.0, 8.0, 8.0).unwrap());
    render(&part, &RenderConfig::new(Resolution::CellSize(0.5))).unwrap()
}

#[test]
fn sphere_box_round_trip_keeps_every_triangle() {
    let mesh = sphere_box();
    assert!(!mesh.is_empty());

    let bytes = mesh.to_stl_binary("sphere_box").unwrap();
    assert_eq!(bytes.len(), 84 + 50 * mesh.len());

    let back = Mesh::from_stl(&bytes).unwrap();
    assert_eq!(back.len(), mesh.len());

    // f32 storage keeps vertices within single precision of the originals
    for (a, b) in mesh.triangles.iter().zip(back.triangles.iter()) {
        for (p, q) in a.vertices.iter().zip(b.vertices.iter()) {
            assert!((p - q).norm() < 1e-5);
        }
    }
}

#[test]
fn import_from_reader() {
    let mesh = sphere_box();
    let bytes = mesh.to_stl_binary("sphere_box").unwrap();
    let back = stl::import_mesh(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(back.len(), mesh.len());
}

#[test]
fn inconsistent_count_is_fatal() {
    let bytes = sphere_box().to_stl_binary("sphere_box").unwrap();

    let cut = &bytes[..bytes.len() - 30];
    match Mesh::from_stl(cut) {
        Err(IoError::TruncatedStl { expected, actual }) => {
            assert_eq!(expected, bytes.len());
            assert_eq!(actual, bytes.len() - 30);
        },
        other => panic!("expected a truncation error, got {other:?}"),
    }

    // a count that claims more records than present
    let mut lying = bytes.clone();
    let count = u32::from_le_bytes([lying[80], lying[81], lying[82], lying[83]]) + 1;
    lying[80..84].copy_from_slice(&count.to_le_bytes());
    assert!(matches!(Mesh::from_stl(&lying), Err(IoError::TruncatedStl { .. })));

    assert!(matches!(Mesh::from_stl(&[]), Err(IoError::TruncatedStl { expected: 84, actual: 0 })));
}

#[test]
fn render_to_stl_writes_a_file() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("sdforge_render_to_stl.stl");
    let cube = Solid::box3(2.0, 2.0, 2.0)?;
    let stats = render_to_stl(&cube, &RenderConfig::new(Resolution::Cells(8)), &path)?;

    let data = std::fs::read(&path)?;
    let mesh = Mesh::from_stl(&data)?;
    assert_eq!(mesh.len(), stats.triangles);
    let bb = mesh.bounding_box();
    assert!(approx_eq(bb.maxs.x, 1.0, 0.25) && approx_eq(bb.mins.z, -1.0, 0.25));

    let _ = std::fs::remove_file(&path);
    Ok(())
}

#[test]
fn render_errors_surface_through_io_error() {
    let cube = Solid::box3(2.0, 2.0, 2.0).unwrap();
    let path = std::env::temp_dir().join("sdforge_never_written.stl");
    let err = render_to_stl(&cube, &RenderConfig::new(Resolution::Cells(0)), &path).unwrap_err();
    assert!(matches!(err, IoError::Render(_)));
    assert!(err.to_string().starts_with("Render failed"));
}

#[test]
fn solid_header_does_not_relax_the_length_check() {
    let mut bytes = sphere_box().to_stl_binary("sphere_box").unwrap();
    bytes[..11].copy_from_slice(b"solid part ");
    let triangles = Mesh::from_stl(&bytes).unwrap().len();
    assert_eq!(triangles, sphere_box().len());

    bytes.extend_from_slice(&[0x20; 37]);
    match Mesh::from_stl(&bytes) {
        Err(IoError::MalformedInput(msg)) => assert!(msg.contains("37 trailing bytes"), "{msg}"),
        other => panic!("expected trailing bytes to be rejected, got {other:?}"),
    }
}

#[test]
fn ascii_files_still_parse() {
    let mesh = sphere_box();
    let text = mesh.to_stl_ascii("sphere_box");
    let back = stl::import_mesh(text.as_bytes()).unwrap();
    assert_eq!(back.len(), mesh.len());
}
