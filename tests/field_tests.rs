mod support;

use nalgebra::{Matrix4, Point2, Point3, Vector3};
use sdforge::{
    errors::ValidationError,
    float_types::Real,
    sdf::{Blend, BooleanOp, Sdf3, Solid, blend::smooth_min, combinators::Combine},
    sketch::{Profile, Sdf2},
    traits::FieldOps,
};
use support::{approx_eq, sample_grid};

#[test]
fn box_distance_at_face_and_center() {
    let (w, h, d) = (3.0, 2.0, 1.5);
    let b = Solid::cuboid(Vector3::new(w, h, d), 0.0).unwrap();
    for eps in [1e-3, 0.25, 2.0] {
        assert!(approx_eq(b.evaluate(&Point3::new(w + eps, 0.0, 0.0)), eps, 1e-12));
        assert!(approx_eq(b.evaluate(&Point3::new(0.0, -(h + eps), 0.0)), eps, 1e-12));
    }
    assert!(approx_eq(b.evaluate(&Point3::origin()), -1.5, 1e-12));
}

#[test]
fn smooth_union_with_zero_radius_is_hard_union() {
    let sphere = Solid::sphere(2.0).unwrap();
    let cube = Solid::box3(3.0, 3.0, 3.0).unwrap().translate(1.5, 0.5, 0.0);
    let torus = Solid::torus(2.0, 0.5).unwrap().rotate(30.0, 0.0, 0.0);
    let shapes = [sphere, cube, torus];

    for a in &shapes {
        for b in &shapes {
            let hard = a.union(b);
            let soft = a.smooth_union(b, 0.0).unwrap();
            let soft_i = a.smooth_intersection(b, 0.0).unwrap();
            let hard_i = a.intersection(b);
            let soft_d = a.smooth_difference(b, 0.0).unwrap();
            let hard_d = a.difference(b);
            for p in sample_grid(4.0, 9) {
                assert_eq!(soft.evaluate(&p), hard.evaluate(&p), "union at {p}");
                assert_eq!(soft_i.evaluate(&p), hard_i.evaluate(&p), "intersection at {p}");
                assert_eq!(soft_d.evaluate(&p), hard_d.evaluate(&p), "difference at {p}");
            }
        }
    }
}

#[test]
fn smooth_min_formula() {
    // equal inputs meet the full fillet: min - k / 4
    assert!(approx_eq(smooth_min(1.0, 1.0, 2.0), 0.5, 1e-12));
    // far apart inputs fall back to the plain minimum
    assert_eq!(smooth_min(-5.0, 5.0, 1.0), -5.0);
    assert!(smooth_min(0.3, 0.4, 0.5) <= 0.3);
}

#[test]
fn difference_signs() {
    let a = Solid::sphere(3.0).unwrap();
    let b = Solid::sphere(1.0).unwrap().translate(2.0, 0.0, 0.0);
    let diff = a.difference(&b);
    // inside A, outside B
    assert!(diff.evaluate(&Point3::new(-1.0, 0.0, 0.0)) < 0.0);
    // inside both
    assert!(diff.evaluate(&Point3::new(2.0, 0.0, 0.0)) > 0.0);
    // outside A
    assert!(diff.evaluate(&Point3::new(-4.0, 0.0, 0.0)) > 0.0);
}

#[test]
fn combinator_bounding_boxes() {
    let a = Solid::box3(2.0, 2.0, 2.0).unwrap();
    let b = Solid::box3(2.0, 2.0, 2.0).unwrap().translate(1.0, 0.0, 0.0);

    let u = a.union(&b).bounding_box();
    assert!(approx_eq(u.mins.x, -1.0, 1e-12) && approx_eq(u.maxs.x, 2.0, 1e-12));

    let i = a.intersection(&b).bounding_box();
    assert!(approx_eq(i.mins.x, 0.0, 1e-12) && approx_eq(i.maxs.x, 1.0, 1e-12));

    let d = a.difference(&b).bounding_box();
    assert!(approx_eq(d.mins.x, -1.0, 1e-12) && approx_eq(d.maxs.x, 1.0, 1e-12));
}

#[test]
fn bounding_boxes_are_conservative() {
    let ball = Solid::sphere(1.0).unwrap();
    let parts = [
        Solid::sphere(1.5).unwrap(),
        Solid::cylinder(3.0, 1.0, 0.2).unwrap().rotate(20.0, 40.0, 0.0),
        Solid::cone(2.0, 1.0, 0.25).unwrap().scale(1.0, 2.0, 0.5).unwrap(),
        Solid::capsule(3.0, 0.5).unwrap().translate(0.5, -0.5, 0.0),
        Solid::torus(1.5, 0.4).unwrap().smooth_union(&Solid::sphere(1.0).unwrap(), 0.5).unwrap(),
        Solid::sphere(2.0).unwrap().shell(0.3).unwrap(),
        Solid::gyroid(Vector3::repeat(2.0)).unwrap().intersection(&Solid::sphere(2.5).unwrap()),
        Solid::box3(3.0, 2.0, 4.0)
            .unwrap()
            .intersection(&Solid::schwarz_p(Vector3::new(1.5, 2.0, 2.5)).unwrap()),
        Solid::schwarz_d(Vector3::repeat(3.0))
            .unwrap()
            .rotate(0.0, 30.0, 15.0)
            .intersection(&Solid::capsule(2.0, 1.0).unwrap()),
        Solid::union_all(&[ball.clone(), ball.clone(), ball.clone()], Blend::Smooth(2.0)).unwrap(),
        Solid::union_all(
            &[
                ball.translate(-1.0, 0.0, 0.0),
                ball.translate(1.0, 0.0, 0.0),
                ball.translate(0.0, 1.0, 0.0),
                ball.translate(0.0, 0.0, -1.0),
            ],
            Blend::Smooth(1.0),
        )
        .unwrap(),
        Solid::box3(4.0, 4.0, 4.0)
            .unwrap()
            .smooth_intersection(&Solid::sphere(2.5).unwrap(), 0.8)
            .unwrap(),
        Solid::box3(5.0, 3.0, 3.0)
            .unwrap()
            .smooth_difference(&ball.translate(2.5, 0.0, 0.0), 0.6)
            .unwrap(),
    ];
    for part in &parts {
        let bb = part.bounding_box();
        for p in sample_grid(4.0, 25) {
            let outside = (0..3).any(|a| p[a] < bb.mins[a] || p[a] > bb.maxs[a]);
            if outside {
                assert!(part.evaluate(&p) > 0.0, "{part:?} is solid at {p} outside its box");
            }
        }
    }
}

#[test]
fn non_uniform_scale_keeps_a_lower_bound() {
    let s = Solid::sphere(1.0).unwrap().scale(4.0, 1.0, 1.0).unwrap();
    // the true distance from (6, 0, 0) to the ellipsoid is 2
    let d = s.evaluate(&Point3::new(6.0, 0.0, 0.0));
    assert!(d > 0.0 && d <= 2.0 + 1e-12);
    let d = s.evaluate(&Point3::new(0.0, 3.0, 0.0));
    assert!(d > 0.0 && d <= 2.0 + 1e-12);
}

#[test]
fn construction_errors() {
    assert!(matches!(Solid::sphere(0.0), Err(ValidationError::NonPositive { .. })));
    assert!(matches!(Solid::sphere(Real::NAN), Err(ValidationError::NonFinite { .. })));
    assert!(matches!(Solid::box3(1.0, 0.0, 1.0), Err(ValidationError::DegenerateExtent(_))));
    assert!(matches!(Solid::torus(1.0, -1.0), Err(ValidationError::NonPositive { .. })));
    assert!(matches!(Blend::smooth(-0.1), Err(ValidationError::Negative { .. })));
    assert!(matches!(
        Combine::new(BooleanOp::Union, Vec::new(), Blend::Hard),
        Err(ValidationError::EmptyComposition)
    ));
    assert!(matches!(
        Solid::sphere(1.0).unwrap().transform(&Matrix4::zeros()),
        Err(ValidationError::SingularTransform)
    ));
    assert!(matches!(
        Profile::polygon(&[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)]),
        Err(ValidationError::TooFewPoints(2))
    ));
}

#[test]
fn external_fields_compose() {
    /// Half space below z = 0, clipped to a finite box.
    #[derive(Debug)]
    struct Slab;

    impl Sdf3 for Slab {
        fn evaluate(&self, p: &Point3<Real>) -> Real {
            p.z
        }

        fn bounding_box(&self) -> sdforge::float_types::Aabb {
            sdforge::float_types::Aabb::new(Point3::new(-10.0, -10.0, -10.0), Point3::new(10.0, 10.0, 0.0))
        }
    }

    let cut = Solid::sphere(2.0).unwrap().intersection(&Solid::new(Slab));
    assert!(cut.evaluate(&Point3::new(0.0, 0.0, -1.0)) < 0.0);
    assert!(cut.evaluate(&Point3::new(0.0, 0.0, 1.0)) > 0.0);
    assert!(approx_eq(cut.bounding_box().maxs.z, 0.0, 1e-12));
}

#[test]
fn extruded_profile_matches_box() {
    let profile = Profile::rectangle(4.0, 2.0, 0.0).unwrap();
    let slab = Solid::extrude(&profile, 6.0).unwrap();
    let reference = Solid::box3(4.0, 2.0, 6.0).unwrap();
    for p in sample_grid(5.0, 11) {
        assert!(approx_eq(slab.evaluate(&p), reference.evaluate(&p), 1e-9), "{p}");
    }
}

#[test]
fn profile_signs() {
    let ring = Profile::circle(2.0).unwrap().difference(&Profile::circle(1.0).unwrap());
    assert!(ring.evaluate(&Point2::new(1.5, 0.0)) < 0.0);
    assert!(ring.evaluate(&Point2::origin()) > 0.0);
    assert!(ring.evaluate(&Point2::new(0.0, 3.0)) > 0.0);
}
