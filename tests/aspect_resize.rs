// tests/aspect_resize.rs
//
// End-to-end geometry checks for aspect fill / aspect fit.

use aspectpipe::{
    Error, Image, PadColor, ResizeMode, TargetSpec, aspect_fill, aspect_fit, aspect_resize,
    aspect_resize_batch, calculate_scaled_dimensions,
};

fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Image {
    Image::filled(width, height, rgb).unwrap()
}

fn gradient(width: u32, height: u32) -> Image {
    Image::from_fn(width, height, |x, y| {
        [(x % 256) as u8, (y % 256) as u8, 128]
    })
    .unwrap()
}

fn close_to(px: [u8; 3], rgb: [u8; 3]) -> bool {
    px.iter().zip(rgb).all(|(&a, b)| a.abs_diff(b) <= 2)
}

/// Bounding box (x0, y0, x1, y1) of pixels that differ from `bg`.
fn content_box(img: &Image, bg: [u8; 3]) -> Option<(u32, u32, u32, u32)> {
    let mut bbox: Option<(u32, u32, u32, u32)> = None;
    for y in 0..img.height() {
        for x in 0..img.width() {
            if img.pixel(x, y) != bg {
                bbox = Some(match bbox {
                    None => (x, y, x + 1, y + 1),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
                });
            }
        }
    }
    bbox
}

mod scenarios {
    use super::*;

    #[test]
    fn landscape_fill_to_square() {
        assert_eq!(
            calculate_scaled_dimensions(1920, 1080, 640, 640, ResizeMode::AspectFill).unwrap(),
            (1138, 640)
        );
        let color = [200, 100, 50];
        let out = aspect_fill(&solid(1920, 1080, color), 640, 640).unwrap();
        assert_eq!(out.dimensions(), (640, 640));
        for y in (0..640).step_by(7) {
            for x in (0..640).step_by(7) {
                assert!(close_to(out.pixel(x, y), color), "({x},{y}) = {:?}", out.pixel(x, y));
            }
        }
    }

    #[test]
    fn landscape_fill_crops_symmetrically() {
        // Black left third, white right third, gray middle. The 1138-wide zoom puts
        // the bands at [0, 379), [379, 759), [759, 1138) and the crop window at
        // [249, 889), leaving about 130 columns of each outer band.
        let src = Image::from_fn(1920, 1080, |x, _| {
            if x < 640 {
                [0, 0, 0]
            } else if x >= 1280 {
                [255, 255, 255]
            } else {
                [128, 128, 128]
            }
        })
        .unwrap();
        let out = aspect_fill(&src, 640, 640).unwrap();
        assert_eq!(out.dimensions(), (640, 640));
        for y in [0, 320, 639] {
            assert!(close_to(out.pixel(0, y), [0, 0, 0]));
            assert!(close_to(out.pixel(100, y), [0, 0, 0]));
            assert!(close_to(out.pixel(320, y), [128, 128, 128]));
            assert!(close_to(out.pixel(540, y), [255, 255, 255]));
            assert!(close_to(out.pixel(639, y), [255, 255, 255]));
        }
    }

    #[test]
    fn landscape_fit_to_square_black() {
        assert_eq!(
            calculate_scaled_dimensions(1920, 1080, 640, 640, ResizeMode::AspectFit).unwrap(),
            (640, 360)
        );
        let color = [30, 200, 90];
        let out = aspect_fit(&solid(1920, 1080, color), 640, 640, PadColor::Black).unwrap();
        assert_eq!(out.dimensions(), (640, 640));
        for x in (0..640).step_by(5) {
            for y in (0..140).chain(500..640) {
                assert_eq!(out.pixel(x, y), [0, 0, 0], "({x},{y})");
            }
            for y in (140..500).step_by(11) {
                assert!(close_to(out.pixel(x, y), color), "({x},{y})");
            }
        }
        assert_eq!(content_box(&out, [0, 0, 0]), Some((0, 140, 640, 500)));
    }

    #[test]
    fn square_source_is_uniformly_scaled_in_both_modes() {
        let src = gradient(500, 500);
        let fill = aspect_fill(&src, 640, 640).unwrap();
        let fit_black = aspect_fit(&src, 640, 640, PadColor::Black).unwrap();
        let fit_white = aspect_fit(&src, 640, 640, PadColor::White).unwrap();
        assert_eq!(fill.dimensions(), (640, 640));
        assert_eq!(fill, fit_black);
        assert_eq!(fill, fit_white);
    }
}

mod invariants {
    use super::*;

    #[test]
    fn output_is_always_exactly_target_size() {
        let sources = [(1, 1), (13, 97), (1920, 1080), (1080, 1920), (64, 64), (641, 639)];
        let targets = [(64, 64), (640, 640), (1024, 256), (72, 800)];
        for (sw, sh) in sources {
            let src = solid(sw, sh, [10, 20, 30]);
            for (tw, th) in targets {
                for mode in ResizeMode::ALL {
                    let spec = TargetSpec::new(tw, th, mode, PadColor::White);
                    let out = aspect_resize(&src, &spec).unwrap();
                    assert_eq!(out.dimensions(), (tw, th), "{sw}x{sh} -> {tw}x{th} {mode}");
                }
            }
        }
    }

    #[test]
    fn fit_keeps_aspect_inside_padding() {
        let src = solid(300, 100, [90, 10, 10]);
        let out = aspect_fit(&src, 256, 256, PadColor::White).unwrap();
        // 256 x 85.33 -> 256 x 85, pasted at y = 85
        let (x0, y0, x1, y1) = content_box(&out, [255, 255, 255]).unwrap();
        assert_eq!((x1 - x0, y1 - y0), (256, 85));
        assert_eq!((x0, y0), (0, 85));
        let ratio = (x1 - x0) as f64 / (y1 - y0) as f64;
        assert!((ratio - 3.0).abs() < 0.05);
    }

    #[test]
    fn fill_never_introduces_padding() {
        let color = [180, 180, 20];
        for (sw, sh) in [(100, 37), (37, 100), (333, 334)] {
            let out = aspect_fill(&solid(sw, sh, color), 128, 96).unwrap();
            assert_eq!(content_box(&out, [0, 0, 0]), Some((0, 0, 128, 96)));
            assert!(close_to(out.pixel(0, 0), color));
            assert!(close_to(out.pixel(127, 95), color));
        }
    }

    #[test]
    fn resizing_to_own_size_is_identity() {
        let src = gradient(640, 480);
        let spec = TargetSpec::new(640, 480, ResizeMode::AspectFill, PadColor::Black);
        assert_eq!(aspect_resize(&src, &spec).unwrap(), src);
    }

    #[test]
    fn deterministic() {
        let src = gradient(123, 77);
        let spec = TargetSpec::new(64, 96, ResizeMode::AspectFit, PadColor::White);
        assert_eq!(aspect_resize(&src, &spec).unwrap(), aspect_resize(&src, &spec).unwrap());
    }
}

mod batches {
    use super::*;

    #[test]
    fn batch_preserves_order_and_count() {
        let images = vec![
            solid(200, 100, [255, 0, 0]),
            solid(100, 200, [0, 255, 0]),
            solid(150, 150, [0, 0, 255]),
        ];
        let spec = TargetSpec::new(64, 64, ResizeMode::AspectFit, PadColor::White);
        let out = aspect_resize_batch(&images, &spec).unwrap();
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|img| img.dimensions() == (64, 64)));

        assert!(close_to(out[0].pixel(32, 32), [255, 0, 0]));
        assert!(close_to(out[1].pixel(32, 32), [0, 255, 0]));
        assert!(close_to(out[2].pixel(32, 32), [0, 0, 255]));

        // Each image is padded according to its own shape.
        assert_eq!(out[0].pixel(32, 0), [255, 255, 255]);
        assert!(close_to(out[0].pixel(0, 32), [255, 0, 0]));
        assert_eq!(out[1].pixel(0, 32), [255, 255, 255]);
        assert!(close_to(out[1].pixel(32, 0), [0, 255, 0]));
        assert_eq!(content_box(&out[2], [255, 255, 255]), Some((0, 0, 64, 64)));
    }

    #[test]
    fn degenerate_target_is_rejected() {
        let spec = TargetSpec::new(0, 64, ResizeMode::AspectFill, PadColor::Black);
        let err = aspect_resize(&solid(4, 4, [0, 0, 0]), &spec).unwrap_err();
        assert!(matches!(err, Error::InvalidTargetDimensions { width: 0, height: 64 }));
    }
}
