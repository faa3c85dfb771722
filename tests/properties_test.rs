use convcore::{
    compute_padding, conv_output_size, convolve, convolve_with, transposed_full_size,
    transposed_output_size, zero_pad, ConvAlgorithm, EdgePadding, PaddingMode, Size,
};
use proptest::prelude::*;

fn geometry() -> impl Strategy<Value = (Size, Size, Size)> {
    (1usize..8, 1usize..8)
        .prop_flat_map(|(r, c)| (Just(Size::new(r, c)), 1..=r, 1..=c, 1usize..4, 1usize..4))
        .prop_map(|(input, fr, fc, sr, sc)| (input, Size::new(fr, fc), Size::new(sr, sc)))
}

fn mode() -> impl Strategy<Value = PaddingMode> {
    prop_oneof![Just(PaddingMode::Valid), Just(PaddingMode::Same)]
}

fn values() -> impl Strategy<Value = Vec<f32>> {
    prop::collection::vec(-10.0f32..10.0, 64)
}

/// Upper bound on the magnitude of any single output cell.
fn magnitude(signal: &[f32], filter: &[f32]) -> f32 {
    let peak = signal.iter().fold(0.0f32, |m, v| m.max(v.abs()));
    peak * filter.iter().map(|v| v.abs()).sum::<f32>()
}

proptest! {
    #[test]
    fn prop_valid_padding_is_zero((input, filter, stride) in geometry()) {
        let padding = compute_padding(stride, PaddingMode::Valid, filter, input).unwrap();
        prop_assert_eq!(padding, EdgePadding::ZERO);
    }

    #[test]
    fn prop_same_unit_stride_preserves_size((input, filter, _) in geometry()) {
        let stride = Size::square(1);
        let p = compute_padding(stride, PaddingMode::Same, filter, input).unwrap();
        prop_assert_eq!(p.vertical(), filter.rows - 1);
        prop_assert_eq!(p.horizontal(), filter.columns - 1);
        prop_assert!(p.bottom - p.top <= 1);
        prop_assert!(p.right - p.left <= 1);
        prop_assert_eq!(conv_output_size(stride, PaddingMode::Same, filter, input).unwrap(), input);
    }

    #[test]
    fn prop_same_output_is_ceil_of_input_over_stride((input, filter, stride) in geometry()) {
        let out = conv_output_size(stride, PaddingMode::Same, filter, input).unwrap();
        let expected = Size::new(
            input.rows.div_ceil(stride.rows),
            input.columns.div_ceil(stride.columns),
        );
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn prop_zero_pad_keeps_interior(
        (input, _, _) in geometry(),
        top in 0usize..3, bottom in 0usize..3, left in 0usize..3, right in 0usize..3,
        data in values(),
    ) {
        let signal = &data[..input.len()];
        let padding = EdgePadding::new(top, bottom, left, right);
        let (out, size) = zero_pad(signal, input, padding).unwrap();
        prop_assert_eq!(size, padding.grow(input).unwrap());
        let nonzero = |buf: &[f32]| buf.iter().filter(|v| **v != 0.0).count();
        prop_assert_eq!(nonzero(&out), nonzero(signal));
        for r in 0..input.rows {
            for c in 0..input.columns {
                prop_assert_eq!(out[size.index(r + top, c + left)], signal[input.index(r, c)]);
            }
        }
    }

    #[test]
    fn prop_convolve_is_linear(
        (input, filter_size, stride) in geometry(),
        mode in mode(),
        s1 in values(), s2 in values(), f in values(),
        a in -3.0f32..3.0, b in -3.0f32..3.0,
    ) {
        let (s1, s2, filter) = (&s1[..input.len()], &s2[..input.len()], &f[..filter_size.len()]);
        let mixed: Vec<f32> = s1.iter().zip(s2).map(|(x, y)| a * x + b * y).collect();

        let (lhs, size) = convolve(&mixed, filter, stride, mode, filter_size, input).unwrap();
        let (c1, _) = convolve(s1, filter, stride, mode, filter_size, input).unwrap();
        let (c2, _) = convolve(s2, filter, stride, mode, filter_size, input).unwrap();
        prop_assert_eq!(lhs.len(), size.len());
        let tol = 1e-4 * (1.0 + a.abs() * magnitude(s1, filter) + b.abs() * magnitude(s2, filter));
        for i in 0..lhs.len() {
            let rhs = a * c1[i] + b * c2[i];
            prop_assert!((lhs[i] - rhs).abs() <= tol, "{} vs {}", lhs[i], rhs);
        }
    }

    #[test]
    fn prop_algorithms_agree(
        (input, filter_size, stride) in geometry(),
        mode in mode(),
        s in values(), f in values(),
    ) {
        let (signal, filter) = (&s[..input.len()], &f[..filter_size.len()]);
        let run = |algo| {
            convolve_with(algo, signal, filter, stride, mode, filter_size, input).unwrap()
        };
        let (naive, size) = run(ConvAlgorithm::Naive);
        for algo in [ConvAlgorithm::Im2col, ConvAlgorithm::Parallel] {
            let (out, out_size) = run(algo);
            prop_assert_eq!(out_size, size);
            let tol = 1e-4 * (1.0 + magnitude(signal, filter));
            for (x, y) in naive.iter().zip(&out) {
                prop_assert!((x - y).abs() <= tol, "{:?}: {} vs {}", algo, x, y);
            }
        }
    }

    #[test]
    fn prop_transposed_full_size((input, filter, stride) in geometry(), mode in mode()) {
        let full = transposed_full_size(stride, filter, input).unwrap();
        prop_assert_eq!(full.rows, (input.rows - 1) * stride.rows + filter.rows);
        prop_assert_eq!(full.columns, (input.columns - 1) * stride.columns + filter.columns);

        let out = transposed_output_size(stride, mode, filter, input).unwrap();
        prop_assert!(out.rows >= 1 && out.rows <= full.rows);
        prop_assert!(out.columns >= 1 && out.columns <= full.columns);
    }
}
