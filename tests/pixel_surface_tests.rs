use pixelchart::render::{PixelSurface, Rgba};

const INK: Rgba = Rgba(0x1122_3344);

fn lit_pixels(surface: &PixelSurface) -> Vec<(i64, i64)> {
    let mut lit = Vec::new();
    for y in 0..i64::from(surface.height()) {
        for x in 0..i64::from(surface.width()) {
            if surface.rgba_at(x, y).expect("in bounds") != Rgba::TRANSPARENT {
                lit.push((x, y));
            }
        }
    }
    lit
}

#[test]
fn zero_dimension_surface_is_rejected() {
    assert!(PixelSurface::new(0, 10).is_err());
    assert!(PixelSurface::new(10, 0).is_err());
}

#[test]
fn horizontal_line_fills_exact_inclusive_span() {
    let mut surface = PixelSurface::new(16, 16).expect("surface");
    surface.draw_line(2.0, 5.0, 7.0, 5.0, INK);

    let lit = lit_pixels(&surface);
    assert_eq!(lit, vec![(2, 5), (3, 5), (4, 5), (5, 5), (6, 5), (7, 5)]);
}

#[test]
fn horizontal_line_span_ignores_argument_order() {
    let mut forward = PixelSurface::new(16, 16).expect("surface");
    let mut backward = PixelSurface::new(16, 16).expect("surface");
    forward.draw_line(2.0, 5.0, 7.0, 5.0, INK);
    backward.draw_line(7.0, 5.0, 2.0, 5.0, INK);

    assert_eq!(lit_pixels(&forward), lit_pixels(&backward));
}

#[test]
fn vertical_line_fills_exact_inclusive_span() {
    let mut surface = PixelSurface::new(16, 16).expect("surface");
    surface.draw_line(4.0, 9.0, 4.0, 3.0, INK);

    let lit = lit_pixels(&surface);
    assert_eq!(lit, vec![(4, 3), (4, 4), (4, 5), (4, 6), (4, 7), (4, 8), (4, 9)]);
}

#[test]
fn diagonal_line_walks_bresenham_path_with_both_endpoints() {
    let mut surface = PixelSurface::new(8, 8).expect("surface");
    surface.draw_line(0.0, 0.0, 3.0, 3.0, INK);

    let lit = lit_pixels(&surface);
    assert_eq!(lit, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
}

#[test]
fn diagonal_line_is_symmetric_in_traversal_direction() {
    let mut forward = PixelSurface::new(32, 32).expect("surface");
    let mut backward = PixelSurface::new(32, 32).expect("surface");
    forward.draw_line(1.0, 2.0, 20.0, 9.0, INK);
    backward.draw_line(20.0, 9.0, 1.0, 2.0, INK);

    assert_eq!(lit_pixels(&forward), lit_pixels(&backward));
}

#[test]
fn coordinates_truncate_toward_zero() {
    let mut fractional = PixelSurface::new(16, 16).expect("surface");
    let mut integral = PixelSurface::new(16, 16).expect("surface");
    fractional.draw_line(2.9, 5.7, 7.2, 5.1, INK);
    integral.draw_line(2.0, 5.0, 7.0, 5.0, INK);

    assert_eq!(lit_pixels(&fractional), lit_pixels(&integral));
}

#[test]
fn rect_fill_is_half_open() {
    let mut surface = PixelSurface::new(16, 16).expect("surface");
    surface.draw_rect(1.0, 2.0, 3.0, 2.0, INK);

    let lit = lit_pixels(&surface);
    assert_eq!(lit, vec![(1, 2), (2, 2), (3, 2), (1, 3), (2, 3), (3, 3)]);
}

#[test]
fn clear_sets_every_pixel() {
    let mut surface = PixelSurface::new(4, 4).expect("surface");
    surface.clear(INK);

    for y in 0..4 {
        for x in 0..4 {
            assert_eq!(surface.rgba_at(x, y), Some(INK));
        }
    }
}

#[test]
fn rect_alpha_skips_transparent_pixels() {
    let mut surface = PixelSurface::new(8, 8).expect("surface");
    surface.rect_alpha(0.0, 0.0, 8.0, 8.0, 0.5);

    assert!(lit_pixels(&surface).is_empty());
}

#[test]
fn rect_alpha_truncates_and_preserves_color_channels() {
    let mut surface = PixelSurface::new(8, 8).expect("surface");
    surface.draw_rect(0.0, 0.0, 8.0, 8.0, Rgba(0x1122_33aa));
    surface.rect_alpha(0.0, 0.0, 8.0, 8.0, 0.25);

    let faded = surface.rgba_at(3, 3).expect("in bounds");
    assert_eq!(faded.red(), 0x11);
    assert_eq!(faded.green(), 0x22);
    assert_eq!(faded.blue(), 0x33);
    assert_eq!(u32::from(faded.alpha()), (0xaa as f64 * 0.25) as u32);
}

#[test]
fn rect_alpha_saturates_at_opaque_for_amplifying_factors() {
    let mut surface = PixelSurface::new(8, 8).expect("surface");
    surface.draw_rect(0.0, 0.0, 8.0, 8.0, Rgba(0x1122_33aa));
    surface.rect_alpha(0.0, 0.0, 8.0, 8.0, 4.0);

    let boosted = surface.rgba_at(3, 3).expect("in bounds");
    assert_eq!(boosted.alpha(), 0xff);
    assert_eq!(boosted.red(), 0x11);
    assert_eq!(boosted.green(), 0x22);
    assert_eq!(boosted.blue(), 0x33);
}

#[test]
fn rect_alpha_only_touches_the_given_region() {
    let mut surface = PixelSurface::new(8, 8).expect("surface");
    surface.draw_rect(0.0, 0.0, 8.0, 8.0, Rgba(0x1122_33aa));
    surface.rect_alpha(0.0, 0.0, 2.0, 8.0, 0.5);

    assert_eq!(surface.rgba_at(1, 0).expect("in bounds").alpha(), 0x55);
    assert_eq!(surface.rgba_at(2, 0).expect("in bounds").alpha(), 0xaa);
}

#[test]
fn color_round_trips_through_native_packing() {
    let mut surface = PixelSurface::new(2, 2).expect("surface");
    let color = Rgba(0xdead_beef);
    surface.draw_rect(0.0, 0.0, 1.0, 1.0, color);

    assert_eq!(surface.rgba_at(0, 0), Some(color));
    assert_eq!(surface.rgba_at(0, 0).expect("in bounds").alpha(), 0xef);
}

#[test]
fn out_of_bounds_drawing_is_clipped_not_fatal() {
    let mut surface = PixelSurface::new(8, 8).expect("surface");
    surface.draw_line(-5.0, -5.0, 20.0, 20.0, INK);
    surface.draw_rect(6.0, 6.0, 10.0, 10.0, INK);
    surface.draw_line(100.0, 3.0, 200.0, 3.0, INK);

    // The in-bounds part of the diagonal and rect must still land.
    assert_eq!(surface.rgba_at(7, 7), Some(INK));
    assert_eq!(surface.rgba_at(6, 7), Some(INK));
    assert_eq!(surface.rgba_at(0, 3), Some(Rgba::TRANSPARENT));
}
