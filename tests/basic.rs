use chromamap::{
    extract_palette, reduce_colors, transfer_palette, Color, ColorMode, DistanceMetric,
    PaletteConfig, PaletteError,
};

/// Two well-separated RGB blobs: `dark` colors near black, `light` near white.
fn two_blob_colors(dark: usize, light: usize) -> Vec<Color> {
    let mut colors = Vec::with_capacity(dark + light);
    for i in 0..dark {
        let v = (i % 20) as f64;
        colors.push([v, v + 2.0, v + 4.0]);
    }
    for i in 0..light {
        let v = 235.0 + (i % 20) as f64;
        colors.push([v, v - 2.0, v - 4.0]);
    }
    colors
}

#[test]
fn extract_palette_covers_every_input_color() {
    let colors = two_blob_colors(30, 10);
    let config = PaletteConfig::new().palette_size(2).seed(7);

    let palette = extract_palette(&colors, &config).unwrap();

    assert_eq!(palette.len(), 2);
    let total: usize = palette.clusters().iter().map(Vec::len).sum();
    assert_eq!(total, colors.len());
    assert!(palette.clusters().iter().all(|c| !c.is_empty()));
}

#[test]
fn extract_palette_sorts_by_descending_frequency() {
    let colors = two_blob_colors(30, 10);
    let config = PaletteConfig::new().palette_size(2).seed(7);

    let palette = extract_palette(&colors, &config).unwrap();

    let sizes: Vec<usize> = palette.clusters().iter().map(Vec::len).collect();
    assert!(
        sizes.windows(2).all(|w| w[0] >= w[1]),
        "cluster sizes not non-increasing: {sizes:?}"
    );
    // The dominant dark blob should rank first
    assert_eq!(sizes[0], 30);
}

#[test]
fn extract_palette_returns_colors_in_input_mode() {
    let colors = two_blob_colors(10, 10);
    let config = PaletteConfig::new().palette_size(2).seed(3);

    let palette = extract_palette(&colors, &config).unwrap();

    for color in palette.palette() {
        for channel in color {
            assert!(
                (-1.0..=256.0).contains(channel),
                "palette channel out of RGB range: {channel}"
            );
        }
    }
}

#[test]
fn seeded_extraction_is_deterministic() {
    let colors = two_blob_colors(25, 15);
    let config = PaletteConfig::new().palette_size(3).seed(42);

    let first = extract_palette(&colors, &config).unwrap();
    let second = extract_palette(&colors, &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn palette_size_larger_than_input_fails() {
    let colors = two_blob_colors(2, 1);
    let config = PaletteConfig::new().palette_size(5).seed(1);

    let result = extract_palette(&colors, &config);
    assert!(matches!(
        result,
        Err(PaletteError::InvalidPaletteSize { k: 5, len: 3 })
    ));
}

#[test]
fn zero_palette_size_fails() {
    let colors = two_blob_colors(2, 2);
    let config = PaletteConfig::new().palette_size(0).seed(1);

    assert!(matches!(
        extract_palette(&colors, &config),
        Err(PaletteError::InvalidPaletteSize { k: 0, .. })
    ));
}

#[test]
fn empty_color_list_fails() {
    let config = PaletteConfig::new().palette_size(4).seed(1);
    assert!(matches!(
        extract_palette(&[], &config),
        Err(PaletteError::InvalidPaletteSize { k: 4, len: 0 })
    ));
}

#[test]
fn indistinct_colors_report_non_convergence() {
    // Two distinct values cannot sustain three groups; the run must stop at
    // the iteration cap instead of cycling forever
    let mut colors = vec![[0.0, 0.0, 0.0]; 12];
    colors.extend(vec![[255.0, 255.0, 255.0]; 12]);
    let config = PaletteConfig::new().palette_size(3).seed(9);

    assert!(matches!(
        extract_palette(&colors, &config),
        Err(PaletteError::ClusteringNonConvergence { .. })
    ));
}

#[test]
fn hsb_mode_roundtrips_through_lab() {
    // Saturated mid-brightness hues survive the LAB detour
    let colors: Vec<Color> = (0..24)
        .map(|i| [(i * 15) as f64, 80.0, 70.0])
        .collect();
    let config = PaletteConfig::new()
        .palette_size(4)
        .color_mode(ColorMode::Hsb)
        .seed(5);

    let palette = extract_palette(&colors, &config).unwrap();

    assert_eq!(palette.len(), 4);
    for color in palette.palette() {
        assert!((0.0..360.0).contains(&color[0]), "hue {}", color[0]);
        assert!((0.0..=101.0).contains(&color[1]), "saturation {}", color[1]);
        assert!((0.0..=101.0).contains(&color[2]), "brightness {}", color[2]);
    }
}

#[test]
fn transfer_preserves_pattern_length() {
    let pattern_colors = two_blob_colors(20, 12);
    let image_colors: Vec<Color> = (0..32)
        .map(|i| {
            if i < 16 {
                [200.0, 30.0 + (i % 8) as f64, 30.0]
            } else {
                [30.0, 30.0, 200.0 + (i % 8) as f64]
            }
        })
        .collect();

    let config = PaletteConfig::new().palette_size(2).seed(11);
    let pattern_palette = extract_palette(&pattern_colors, &config).unwrap();
    let image_palette = extract_palette(&image_colors, &config).unwrap();

    for use_original in [true, false] {
        let mapped = transfer_palette(
            &pattern_colors,
            &pattern_palette,
            &image_palette,
            DistanceMetric::DeltaE2000,
            use_original,
        )
        .unwrap();

        assert_eq!(mapped.len(), pattern_colors.len());
    }
}

#[test]
fn transfer_with_palette_colors_emits_only_image_palette() {
    let pattern_colors = two_blob_colors(16, 16);
    let image_colors: Vec<Color> = (0..30)
        .map(|i| {
            if i < 15 {
                [180.0 + (i % 5) as f64, 40.0, 40.0]
            } else {
                [40.0, 170.0 + (i % 5) as f64, 60.0]
            }
        })
        .collect();

    let config = PaletteConfig::new().palette_size(2).seed(21);
    let pattern_palette = extract_palette(&pattern_colors, &config).unwrap();
    let image_palette = extract_palette(&image_colors, &config).unwrap();

    let mapped = transfer_palette(
        &pattern_colors,
        &pattern_palette,
        &image_palette,
        DistanceMetric::DeltaE2000,
        false,
    )
    .unwrap();

    for color in &mapped {
        assert!(
            image_palette.palette().contains(color),
            "{color:?} is not an image palette color"
        );
    }
}

#[test]
fn transfer_with_original_colors_draws_from_image_clusters() {
    let pattern_colors = two_blob_colors(16, 16);
    let image_colors: Vec<Color> = (0..30)
        .map(|i| {
            if i < 15 {
                [180.0 + (i % 5) as f64, 40.0, 40.0]
            } else {
                [40.0, 170.0 + (i % 5) as f64, 60.0]
            }
        })
        .collect();

    let config = PaletteConfig::new().palette_size(2).seed(21);
    let pattern_palette = extract_palette(&pattern_colors, &config).unwrap();
    let image_palette = extract_palette(&image_colors, &config).unwrap();

    let mapped = transfer_palette(
        &pattern_colors,
        &pattern_palette,
        &image_palette,
        DistanceMetric::DeltaE2000,
        true,
    )
    .unwrap();

    let all_image_colors: Vec<Color> = image_palette
        .clusters()
        .iter()
        .flat_map(|cluster| cluster.iter().copied())
        .collect();

    for color in &mapped {
        assert!(
            all_image_colors.contains(color),
            "{color:?} did not come from an image cluster"
        );
    }
}

#[test]
fn transfer_rejects_mismatched_palette_sizes() {
    let pattern_colors = two_blob_colors(10, 10);
    let image_colors = two_blob_colors(12, 12);

    let pattern_palette =
        extract_palette(&pattern_colors, &PaletteConfig::new().palette_size(2).seed(1)).unwrap();
    let image_palette =
        extract_palette(&image_colors, &PaletteConfig::new().palette_size(3).seed(1)).unwrap();

    let result = transfer_palette(
        &pattern_colors,
        &pattern_palette,
        &image_palette,
        DistanceMetric::DeltaE2000,
        true,
    );

    assert!(matches!(
        result,
        Err(PaletteError::MappingMismatch {
            expected: 2,
            found: 3
        })
    ));
}

#[test]
fn reduce_colors_flattens_to_palette() {
    let colors = two_blob_colors(12, 12);
    let config = PaletteConfig::new().palette_size(2).seed(13);
    let palette = extract_palette(&colors, &config).unwrap();

    let reduced = reduce_colors(&colors, palette.palette(), DistanceMetric::Euclidean).unwrap();

    assert_eq!(reduced.len(), colors.len());
    for color in &reduced {
        assert!(palette.palette().contains(color));
    }
}

#[test]
fn pixel_buffers_feed_straight_into_extraction() {
    let pixels: Vec<rgb::RGB<u8>> = (0..24u16)
        .map(|i| {
            if i < 12 {
                rgb::RGB {
                    r: (i * 2) as u8,
                    g: 10,
                    b: 10,
                }
            } else {
                rgb::RGB {
                    r: 240,
                    g: (200 + i * 2) as u8,
                    b: 230,
                }
            }
        })
        .collect();

    let colors = chromamap::colors_from_rgb8(&pixels);
    let config = PaletteConfig::new().palette_size(2).seed(17);
    let palette = extract_palette(&colors, &config).unwrap();

    assert_eq!(palette.len(), 2);
}
