use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use edgekit_image::{Image, ImageSize};
use edgekit_imgproc::{filter, gradient};

fn sample_image(size: ImageSize) -> Image<i32> {
    let data = (0..size.area()).map(|i| (i * 31 % 256) as i32).collect();
    Image::new(size, data).unwrap()
}

fn bench_convolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("Convolution");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        let size = ImageSize {
            width: *width,
            height: *height,
        };
        let image = sample_image(size);
        let parameter_string = format!("{width}x{height}");

        let sobel = filter::kernels::sobel_kernel3(true).unwrap();
        group.bench_with_input(
            BenchmarkId::new("sobel", &parameter_string),
            &image,
            |b, i| b.iter(|| black_box(filter::convolve(i, &sobel).unwrap())),
        );

        let gaussian = filter::kernels::gaussian_derivative_kernel(true, 1.0).unwrap();
        group.bench_with_input(
            BenchmarkId::new("gaussian_derivative_sigma1", &parameter_string),
            &image,
            |b, i| b.iter(|| black_box(filter::convolve(i, &gaussian).unwrap())),
        );

        group.bench_with_input(
            BenchmarkId::new("spatial_gradient_sobel", &parameter_string),
            &image,
            |b, i| {
                b.iter(|| {
                    black_box(
                        gradient::spatial_gradient(i, gradient::GradientOperator::Sobel).unwrap(),
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_convolution);
criterion_main!(benches);
