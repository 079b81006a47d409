use image::Rgba;

use super::*;

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([x as u8, y as u8, 7, 255]))
}

#[test]
fn over_opacity_0_is_noop() {
    let dst = [1, 2, 3, 4];
    let src = [200, 200, 200, 200];
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src() {
    let dst = [0, 0, 0, 0];
    let src = [100, 110, 120, 200];
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn crop_landscape_takes_centered_square() {
    let img = gradient(10, 4);
    let out = crop_to_square(img);
    assert_eq!(out.dimensions(), (4, 4));
    // offset = (10 - 4) / 2 = 3 on the x axis
    assert_eq!(out.get_pixel(0, 0).0[0], 3);
    assert_eq!(out.get_pixel(3, 3).0[0], 6);
    assert_eq!(out.get_pixel(0, 3).0[1], 3);
}

#[test]
fn crop_portrait_takes_centered_square() {
    let img = gradient(5, 12);
    let out = crop_to_square(img);
    assert_eq!(out.dimensions(), (5, 5));
    // offset = (12 - 5) / 2 = 3 on the y axis
    assert_eq!(out.get_pixel(0, 0).0[1], 3);
    assert_eq!(out.get_pixel(4, 4).0[1], 7);
}

#[test]
fn crop_square_is_unchanged() {
    let img = gradient(6, 6);
    let out = crop_to_square(img.clone());
    assert_eq!(out, img);
}

#[test]
fn resize_always_yields_requested_square() {
    for (w, h) in [(40, 40), (64, 13), (9, 31)] {
        let img = crop_to_square(gradient(w, h));
        let out = resize(&img, 17).unwrap();
        assert_eq!(out.dimensions(), (17, 17));
    }
}

#[test]
fn resize_rejects_degenerate_sizes() {
    assert!(resize(&gradient(4, 4), 0).is_err());
    assert!(resize(&RgbaImage::new(0, 0), 4).is_err());
}

#[test]
fn draw_centered_keeps_background_dimensions_and_centers() {
    let bg = RgbaImage::from_pixel(10, 8, Rgba([0, 0, 255, 255]));
    let fg = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
    let out = draw_centered(&bg, &fg).unwrap();

    assert_eq!(out.dimensions(), (10, 8));
    // left = (10 - 4) / 2 = 3, top = (8 - 2) / 2 = 3
    assert_eq!(out.get_pixel(3, 3), &Rgba([255, 0, 0, 255]));
    assert_eq!(out.get_pixel(6, 4), &Rgba([255, 0, 0, 255]));
    assert_eq!(out.get_pixel(2, 3), &Rgba([0, 0, 255, 255]));
    assert_eq!(out.get_pixel(7, 3), &Rgba([0, 0, 255, 255]));
    assert_eq!(out.get_pixel(3, 5), &Rgba([0, 0, 255, 255]));
}

#[test]
fn draw_centered_clips_oversized_foreground() {
    let bg = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255]));
    let fg = RgbaImage::from_pixel(8, 8, Rgba([9, 9, 9, 255]));
    let out = draw_centered(&bg, &fg).unwrap();
    assert_eq!(out.dimensions(), (4, 4));
    assert!(out.pixels().all(|p| p.0 == [9, 9, 9, 255]));
}

#[test]
fn overlay_alpha_contribution_is_scaled() {
    let base = RgbaImage::new(3, 3);
    let overlay = RgbaImage::from_fn(3, 3, |x, y| Rgba([255, 255, 255, (x * 80 + y * 10) as u8]));

    let out = overlay_centered(&base, &overlay, 0.6).unwrap();
    for (x, y, px) in overlay.enumerate_pixels() {
        let expected = (f32::from(px.0[3]) * 0.6).round() as u8;
        assert_eq!(out.get_pixel(x, y).0[3], expected, "pixel ({x},{y})");
    }
}

#[test]
fn overlay_blends_translucently_over_opaque_base() {
    let base = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
    let overlay = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
    let out = overlay_centered(&base, &overlay, 0.6).unwrap();
    let px = out.get_pixel(0, 0).0;
    assert_eq!(px[3], 255);
    assert_eq!(px[0], 153);
}

#[test]
fn anchored_draw_centers_on_point() {
    let mut base = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
    let fg = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
    draw_anchored(&mut base, &fg, 15.0, 5.0, 1.0).unwrap();
    assert_eq!(base.get_pixel(13, 3).0, [255, 255, 255, 255]);
    assert_eq!(base.get_pixel(16, 6).0, [255, 255, 255, 255]);
    assert_eq!(base.get_pixel(12, 3).0, [0, 0, 0, 255]);
    assert_eq!(base.get_pixel(17, 6).0, [0, 0, 0, 255]);
}

#[test]
fn premul_buffer_must_match_base() {
    let mut base = RgbaImage::new(2, 2);
    assert!(over_premul_buffer(&mut base, &[0u8; 4]).is_err());
    over_premul_buffer(&mut base, &[0u8; 16]).unwrap();
}
