#![allow(clippy::float_cmp)]

use super::*;

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

#[test]
fn relative_to_subtracts_origin() {
    let p = Point::new(130.0, 95.0).relative_to(Point::new(100.0, 80.0));
    assert_eq!(p, Point::new(30.0, 15.0));
}

#[test]
fn relative_to_can_go_negative() {
    let p = Point::new(10.0, 10.0).relative_to(Point::new(20.0, 5.0));
    assert_eq!(p, Point::new(-10.0, 5.0));
}

// --- Size ---

#[test]
fn size_with_both_axes_is_not_empty() {
    assert!(!Size::new(640.0, 480.0).is_empty());
}

#[test]
fn size_with_zero_width_is_empty() {
    assert!(Size::new(0.0, 480.0).is_empty());
}

#[test]
fn size_with_zero_height_is_empty() {
    assert!(Size::new(640.0, 0.0).is_empty());
}

#[test]
fn size_default_is_empty() {
    assert!(Size::default().is_empty());
}

#[test]
fn inset_removes_padding_from_each_axis() {
    assert_eq!(Size::new(208.0, 108.0).inset(8.0, 8.0), Size::new(200.0, 100.0));
}

#[test]
fn inset_never_goes_negative() {
    assert_eq!(Size::new(4.0, 4.0).inset(10.0, 2.0), Size::new(0.0, 2.0));
}

// --- CSS lengths ---

#[test]
fn css_px_reads_pixel_lengths() {
    assert_eq!(css_px("4px"), 4.0);
    assert_eq!(css_px(" 2.5px "), 2.5);
    assert_eq!(css_px("0"), 0.0);
}

#[test]
fn css_px_treats_unparsable_as_zero() {
    assert_eq!(css_px(""), 0.0);
    assert_eq!(css_px("auto"), 0.0);
    assert_eq!(css_px("NaNpx"), 0.0);
}
