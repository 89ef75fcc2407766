use rayon::prelude::*;

use edgekit_image::Image;

/// Apply a function to each pixel in the image in parallel.
///
/// The work is split by rows; each destination pixel is written exactly once.
///
/// PRECONDITION: `src` and `dst` must have the same size.
pub fn par_iter_rows_val<T1, T2>(
    src: &Image<T1>,
    dst: &mut Image<T2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    let cols = src.cols();
    src.as_slice()
        .par_chunks_exact(cols)
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pixel pair of two images in parallel.
///
/// PRECONDITION: `src1`, `src2` and `dst` must have the same size.
pub fn par_iter_rows_val_two<T1, T2, T3>(
    src1: &Image<T1>,
    src2: &Image<T2>,
    dst: &mut Image<T3>,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
    T3: Send + Sync,
{
    let cols = src1.cols();
    src1.as_slice()
        .par_chunks_exact(cols)
        .zip(src2.as_slice().par_chunks_exact(cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(cols))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

/// Fill every row of `dst` in parallel, passing the row index to `f`.
pub fn par_rows_indexed<T>(dst: &mut Image<T>, f: impl Fn(usize, &mut [T]) + Send + Sync)
where
    T: Send + Sync,
{
    let cols = dst.cols();
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(r, dst_row)| f(r, dst_row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use edgekit_image::ImageError;

    #[test]
    fn test_par_iter_rows_val() -> Result<(), ImageError> {
        let src = Image::<i32>::new([2, 2].into(), vec![1, 2, 3, 4])?;
        let mut dst = Image::<i32>::from_size_val(src.size(), 0)?;
        par_iter_rows_val(&src, &mut dst, |s, d| *d = *s * 2);
        assert_eq!(dst.as_slice(), &[2, 4, 6, 8]);
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_val_two() -> Result<(), ImageError> {
        let a = Image::<i32>::new([3, 1].into(), vec![1, 2, 3])?;
        let b = Image::<i32>::new([3, 1].into(), vec![10, 20, 30])?;
        let mut dst = Image::<i64>::from_size_val(a.size(), 0)?;
        par_iter_rows_val_two(&a, &b, &mut dst, |x, y, d| *d = (*x + *y) as i64);
        assert_eq!(dst.as_slice(), &[11, 22, 33]);
        Ok(())
    }

    #[test]
    fn test_par_rows_indexed() -> Result<(), ImageError> {
        let mut dst = Image::<usize>::from_size_val([2, 3].into(), 0)?;
        par_rows_indexed(&mut dst, |r, row| row.iter_mut().for_each(|v| *v = r));
        assert_eq!(dst.as_slice(), &[0, 0, 1, 1, 2, 2]);
        Ok(())
    }
}
