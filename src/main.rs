// main.rs
//
// Renders a handful of parts to the `stl/` folder: primitives, booleans with
// hard and smooth blends, a 2D profile extruded and revolved, a lattice
// infill, and an STL round trip through the mesh-backed field.

use nalgebra::{Point2, Vector3};
use sdforge::render::{RenderConfig, Resolution, SamplingMode, render_2d, render_with_stats};
use sdforge::{FieldOps, Mesh, Profile, Solid};
use std::error::Error;
use std::fs;

fn save(name: &str, part: &Solid, config: &RenderConfig) -> Result<Mesh, Box<dyn Error>> {
    let (mesh, stats) = render_with_stats(part, config)?;
    println!(
        "{name}: {} triangles, {} cells visited, {} leaves",
        stats.triangles, stats.cells_visited, stats.leaf_cells
    );
    #[cfg(feature = "stl-io")]
    mesh.save_stl(format!("stl/{name}.stl"))?;
    Ok(mesh)
}

fn main() -> Result<(), Box<dyn Error>> {
    // Ensure the /stl folder exists
    fs::create_dir_all("stl")?;

    let fine = RenderConfig::new(Resolution::CellSize(0.25));

    // 1) sphere intersected with a box
    let sphere = Solid::sphere(5.0)?;
    let cube = Solid::box3(8.0, 8.0, 8.0)?;
    save("sphere_box", &sphere.intersection(&cube), &fine)?;

    // 2) smooth union of a torus and a capsule
    let torus = Solid::torus(4.0, 1.0)?;
    let capsule = Solid::capsule(10.0, 1.2)?.rotate(90.0, 0.0, 0.0);
    save("torus_capsule", &torus.smooth_union(&capsule, 1.0)?, &fine)?;

    // 3) a rounded panel with four holes
    let panel = Solid::cuboid(Vector3::new(10.0, 6.0, 1.0), 0.5)?;
    let hole = Solid::cylinder(4.0, 1.0, 0.0)?;
    let holes = hole.distribute_grid(2, 2, 14.0, 8.0).translate(-7.0, -4.0, 0.0);
    save("panel", &panel.difference(&holes), &fine)?;

    // 4) 2D profile: extruded, revolved and written as SVG
    let profile = Profile::polygon(&[
        Point2::new(0.0, 0.0),
        Point2::new(3.0, 0.0),
        Point2::new(3.0, 1.0),
        Point2::new(1.0, 3.0),
        Point2::new(0.0, 3.0),
    ])?
    .union(&Profile::circle(1.0)?.translate(3.0, 3.0));
    save("extruded", &Solid::extrude(&profile, 2.0)?, &fine)?;
    save("revolved", &Solid::revolve(&profile.translate(2.0, 0.0)), &fine)?;

    let outline = render_2d(&profile, &RenderConfig::new(Resolution::CellSize(0.05)))?;
    println!("profile outline: {} segments, perimeter {:.3}", outline.len(), outline.perimeter());
    #[cfg(feature = "svg-io")]
    outline.save_svg("stl/profile.svg")?;

    // 5) gyroid infill clipped to a shelled sphere, uniform sampling
    let gyroid = Solid::gyroid(Vector3::new(4.0, 4.0, 4.0))?;
    let ball = Solid::sphere(6.0)?;
    let infill = gyroid.intersection(&ball).union(&ball.shell(0.5)?);
    let uniform = RenderConfig::new(Resolution::Cells(96)).with_mode(SamplingMode::Uniform);
    let mesh = save("gyroid_ball", &infill, &uniform)?;

    // 6) round trip through STL and back into a field
    #[cfg(feature = "stl-io")]
    {
        use sdforge::MeshSdf;

        let bytes = mesh.to_stl_binary("gyroid_ball")?;
        let imported = Mesh::from_stl(&bytes)?;
        println!("re-imported {} of {} triangles", imported.len(), mesh.len());

        let rough = save("rough_cube", &Solid::box3(4.0, 4.0, 4.0)?, &RenderConfig::new(Resolution::Cells(8)))?;
        let field = MeshSdf::new(rough)?;
        let remeshed = Solid::new(field).difference(&Solid::sphere(2.5)?);
        save("rough_cube_hollow", &remeshed, &RenderConfig::new(Resolution::Cells(32)))?;
    }
    #[cfg(not(feature = "stl-io"))]
    println!("gyroid_ball kept in memory: {} triangles", mesh.len());

    Ok(())
}
