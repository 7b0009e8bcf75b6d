#![cfg(feature = "surface-nets")]

mod support;

use sdforge::{
    float_types::{PI, Real},
    render::{RenderConfig, Resolution, SamplingMode, render_with_stats},
    sdf::Solid,
};
use support::max_surface_deviation;

#[test]
fn surface_nets_mode_meshes_a_sphere() {
    let r = 2.0;
    let s = 0.1;
    let sphere = Solid::sphere(r).unwrap();
    let config = RenderConfig::new(Resolution::CellSize(s)).with_mode(SamplingMode::SurfaceNets);
    let (mesh, stats) = render_with_stats(&sphere, &config).unwrap();

    assert!(!mesh.is_empty());
    assert_eq!(stats.triangles, mesh.len());
    assert!(max_surface_deviation(&sphere, &mesh) <= s * Real::sqrt(3.0));

    let exact = 4.0 / 3.0 * PI * r * r * r;
    assert!((mesh.volume() - exact).abs() < 0.05 * exact, "volume {}", mesh.volume());
    for t in &mesh.triangles {
        assert!(t.normal.dot(&t.centroid().coords) > 0.0);
    }
}
