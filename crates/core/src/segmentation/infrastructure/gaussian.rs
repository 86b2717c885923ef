/// Standard deviation OpenCV picks when a Gaussian blur is requested with
/// `sigma = 0`.
pub fn default_sigma(kernel_size: usize) -> f64 {
    0.3 * ((kernel_size as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Precompute a normalized 1D Gaussian kernel of the given size.
///
/// `kernel_size` must be odd and >= 1.
pub fn gaussian_kernel_1d(kernel_size: usize) -> Vec<f32> {
    debug_assert!(kernel_size >= 1 && kernel_size % 2 == 1);
    let sigma = default_sigma(kernel_size);
    let half = (kernel_size / 2) as f64;
    let weights: Vec<f64> = (0..kernel_size)
        .map(|i| {
            let x = i as f64 - half;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let sum: f64 = weights.iter().sum();
    weights.iter().map(|&w| (w / sum) as f32).collect()
}

/// Separable Gaussian blur of a single-channel buffer, in place.
///
/// Edge pixels are replicated. `temp` is scratch space reused across calls.
pub fn blur_single_channel(
    data: &mut [u8],
    width: usize,
    height: usize,
    kernel: &[f32],
    temp: &mut Vec<f32>,
) {
    let kernel_size = kernel.len();
    if kernel_size <= 1 || width == 0 || height == 0 {
        return;
    }
    let half = kernel_size as isize / 2;
    temp.resize(width * height, 0.0);

    // Horizontal pass: data → temp
    for y in 0..height {
        let row = &data[y * width..(y + 1) * width];
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &w) in kernel.iter().enumerate() {
                let sx = (x as isize + k as isize - half).clamp(0, width as isize - 1) as usize;
                sum += row[sx] as f32 * w;
            }
            temp[y * width + x] = sum;
        }
    }

    // Vertical pass: temp → data
    for y in 0..height {
        for x in 0..width {
            let mut sum = 0.0f32;
            for (k, &w) in kernel.iter().enumerate() {
                let sy = (y as isize + k as isize - half).clamp(0, height as isize - 1) as usize;
                sum += temp[sy * width + x] * w;
            }
            data[y * width + x] = sum.round().clamp(0.0, 255.0) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn blur(data: &mut [u8], width: usize, height: usize, kernel_size: usize) {
        let kernel = gaussian_kernel_1d(kernel_size);
        let mut temp = Vec::new();
        blur_single_channel(data, width, height, &kernel, &mut temp);
    }

    #[test]
    fn test_default_sigma_for_5x5() {
        assert_relative_eq!(default_sigma(5), 1.1, epsilon = 1e-12);
    }

    #[test]
    fn test_kernel_sums_to_one() {
        let k = gaussian_kernel_1d(5);
        let sum: f32 = k.iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_kernel_is_symmetric_with_peak_in_center() {
        let k = gaussian_kernel_1d(5);
        for i in 0..k.len() / 2 {
            assert!((k[i] - k[k.len() - 1 - i]).abs() < 1e-6);
            assert!(k[2] > k[i]);
        }
    }

    #[test]
    fn test_blur_uniform_mask_unchanged() {
        let mut data = vec![255u8; 10 * 10];
        blur(&mut data, 10, 10, 5);
        assert!(data.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_blur_softens_edge() {
        // Left half on, right half off
        let mut data = vec![0u8; 10 * 4];
        for y in 0..4 {
            for x in 0..5 {
                data[y * 10 + x] = 255;
            }
        }
        blur(&mut data, 10, 4, 5);
        let edge_in = data[2 * 10 + 4];
        let edge_out = data[2 * 10 + 5];
        assert!(edge_in < 255 && edge_in > 128);
        assert!(edge_out > 0 && edge_out < 128);
        assert_eq!(data[2 * 10], 255);
        assert_eq!(data[2 * 10 + 9], 0);
    }

    #[test]
    fn test_kernel_size_1_is_identity() {
        let mut data: Vec<u8> = (0..25).collect();
        let original = data.clone();
        blur(&mut data, 5, 5, 1);
        assert_eq!(data, original);
    }
}
