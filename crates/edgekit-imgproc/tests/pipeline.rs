use edgekit_image::{Image, ImageError};
use edgekit_imgproc::{
    edges::{canny_peaks, sobel_edges, CannyParams, SobelParams},
    filter::{convolve, kernels},
    gradient::magnitude,
    normalize::normalize_min_max,
    peaks::extract_peaks,
    threshold::threshold,
};

fn impulse_kernel(dim: usize) -> Result<Image<i32>, ImageError> {
    let mut kernel = Image::from_size_val([dim, dim].into(), 0)?;
    kernel.set([dim / 2, dim / 2], 1)?;
    Ok(kernel)
}

#[test]
fn flat_field_has_no_gradient() -> Result<(), ImageError> {
    let src = Image::from_size_val([5, 5].into(), 100)?;

    let h = convolve(&src, &kernels::sobel_kernel3(true)?)?;
    let v = convolve(&src, &kernels::sobel_kernel3(false)?)?;
    let mag = magnitude(&h, &v)?;

    // away from the zero padded border the field is flat
    for r in 1..4 {
        assert_eq!(h.row(r)[1..4], [0, 0, 0]);
        assert_eq!(v.row(r)[1..4], [0, 0, 0]);
        assert_eq!(mag.row(r)[1..4], [0, 0, 0]);
    }
    Ok(())
}

#[test]
fn identity_kernel_preserves_image() -> Result<(), ImageError> {
    let data = (0..7 * 4).map(|i| (i * 37 % 256) as i32).collect();
    let src = Image::new([7, 4].into(), data)?;
    assert_eq!(convolve(&src, &impulse_kernel(3)?)?, src);
    assert_eq!(convolve(&src, &impulse_kernel(7)?)?, src);
    Ok(())
}

#[test]
fn gaussian_kernels_are_transposes() -> Result<(), ImageError> {
    for sigma in [0.4, 0.8, 1.0, 1.7, 2.5] {
        let h = kernels::gaussian_derivative_kernel(true, sigma)?;
        let v = kernels::gaussian_derivative_kernel(false, sigma)?;
        assert_eq!(h, v.transpose());
        assert_eq!(h.width() % 2, 1);
    }
    Ok(())
}

#[test]
fn thresholds_are_independent() -> Result<(), ImageError> {
    let mag = Image::from_rows(&[&[0, 50, 100, 150, 200, 250][..]])?;
    let low = threshold(&mag, 0.3)?;
    let high = threshold(&mag, 0.5)?;
    let low_again = threshold(&mag, 0.3)?;
    assert_eq!(low.as_slice(), &[0, 0, 255, 255, 255, 255]);
    assert_eq!(high.as_slice(), &[0, 0, 0, 255, 255, 255]);
    assert_eq!(low, low_again);
    Ok(())
}

#[test]
fn single_strict_maximum_is_the_only_peak() -> Result<(), ImageError> {
    let size = 9;
    let mut data = Vec::with_capacity(size * size);
    for r in 0..size {
        for c in 0..size {
            let d = (r as i32 - 4).abs() + (c as i32 - 4).abs();
            data.push(100 - 10 * d);
        }
    }
    let mag = Image::new([size, size].into(), data)?;
    let peaks = extract_peaks(&mag)?;

    let marked = peaks
        .as_slice()
        .iter()
        .enumerate()
        .filter(|(_, &v)| v == 1)
        .map(|(i, _)| (i / size, i % size))
        .collect::<Vec<_>>();
    assert_eq!(marked, vec![(4, 4)]);
    Ok(())
}

#[test]
fn pipelines_produce_displayable_maps() -> Result<(), ImageError> {
    let mut src = Image::from_size_val([20, 16].into(), 30)?;
    for r in 0..16 {
        for c in 10..20 {
            src.set([r, c], 220)?;
        }
    }

    let sobel = sobel_edges(&src, &SobelParams::default())?;
    for (_, map) in sobel.into_maps() {
        let normalized = normalize_min_max(&map)?;
        assert_eq!(normalized.size(), src.size());
    }

    let canny = canny_peaks(&src, &CannyParams::new(1.0)?)?;
    // the vertical step at column 10 peaks on the column pair straddling it
    let centre_row = canny.peaks.row(8);
    assert!(centre_row[9] == 1 || centre_row[10] == 1);

    let normalized = normalize_min_max(&canny.peaks)?;
    assert!(normalized.as_slice().iter().all(|&v| v == 0 || v == 255));
    Ok(())
}
