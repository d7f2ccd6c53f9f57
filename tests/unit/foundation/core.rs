use super::*;

#[test]
fn surface_size_rejects_empty_and_oversized() {
    assert!(SurfaceSize::new(0, 10).is_err());
    assert!(SurfaceSize::new(10, 0).is_err());
    assert!(SurfaceSize::new(16_385, 10).is_err());
    assert!(SurfaceSize::new(2099, 2970).is_ok());
}

#[test]
fn surface_rect_is_origin_anchored() {
    let s = SurfaceSize::new(200, 100).unwrap();
    let r = s.rect();
    assert_eq!(r.x0, 0.0);
    assert_eq!(r.y0, 0.0);
    assert_eq!(r.width(), 200.0);
    assert_eq!(r.height(), 100.0);
}

#[test]
fn half_turn_maps_surface_corners() {
    let s = SurfaceSize::new(200, 100).unwrap();
    let half_turn =
        Affine::translate((s.width_f64(), s.height_f64())) * Affine::rotate(std::f64::consts::PI);
    let p = half_turn * Point::new(50.0, 25.0);
    assert!((p.x - 150.0).abs() < 1e-9);
    assert!((p.y - 75.0).abs() < 1e-9);
}
