use super::*;

fn surface() -> SurfaceSize {
    SurfaceSize::new(2000, 3000).unwrap()
}

fn metrics(width: f64) -> TextMetrics {
    TextMetrics {
        left: 4.0,
        top: -300.0,
        width,
        height: 380.0,
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn upright_copy_is_centered_in_upper_half() {
    let layout = PlacardLayout::compute(surface(), 360.0, metrics(800.0), OverflowPolicy::Clamp);
    let b = layout.upright_box();
    assert!(close(b.center().x, 1000.0));
    assert!(close(b.center().y, 750.0));
    assert!(!layout.overflowed);
    assert_eq!(layout.font_px, 360.0);
}

#[test]
fn mirrored_copy_lands_centered_in_lower_half() {
    let layout = PlacardLayout::compute(surface(), 360.0, metrics(800.0), OverflowPolicy::Clamp);
    let b = layout.mirrored_box();
    assert!(close(b.center().x, 1000.0));
    assert!(close(b.center().y, 2250.0));
    assert!(close(b.width(), 800.0));
    assert!(close(b.height(), 380.0));
}

#[test]
fn half_turn_is_an_involution() {
    let layout = PlacardLayout::compute(surface(), 360.0, metrics(800.0), OverflowPolicy::Clamp);
    let p = Point::new(123.0, 456.0);
    let back = layout.half_turn * (layout.half_turn * p);
    assert!(close(back.x, p.x));
    assert!(close(back.y, p.y));
}

#[test]
fn clamp_keeps_font_and_starts_at_left_edge() {
    let layout = PlacardLayout::compute(surface(), 360.0, metrics(2600.0), OverflowPolicy::Clamp);
    assert!(layout.overflowed);
    assert_eq!(layout.font_px, 360.0);
    let b = layout.upright_box();
    assert!(close(b.x0, 0.0));
    assert!(b.x1 > 2000.0);
}

#[test]
fn shrink_to_fit_scales_font_to_surface_width() {
    let layout = PlacardLayout::compute(
        surface(),
        360.0,
        metrics(4000.0),
        OverflowPolicy::ShrinkToFit,
    );
    assert!(layout.overflowed);
    assert!(close(layout.font_px, 180.0));
    let b = layout.upright_box();
    assert!(close(b.x0, 0.0));
    assert!(close(b.x1, 2000.0));
    assert!(close(b.center().y, 750.0));
}

#[test]
fn shrink_to_fit_leaves_fitting_text_alone() {
    let a = PlacardLayout::compute(surface(), 360.0, metrics(800.0), OverflowPolicy::Clamp);
    let b = PlacardLayout::compute(surface(), 360.0, metrics(800.0), OverflowPolicy::ShrinkToFit);
    assert_eq!(a, b);
}

#[test]
fn empty_run_is_placed_without_overflow() {
    let layout = PlacardLayout::compute(
        surface(),
        360.0,
        TextMetrics::empty(360.0),
        OverflowPolicy::ShrinkToFit,
    );
    assert!(!layout.overflowed);
    assert_eq!(layout.font_px, 360.0);
    let b = layout.upright_box();
    assert!(close(b.width(), 0.0));
    assert!(close(b.center().x, 1000.0));
    assert!(close(b.center().y, 750.0));
}
