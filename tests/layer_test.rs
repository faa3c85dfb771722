use convcore::{
    convolve_with, flatten, flip180, transposed_convolve, unflatten, Conv2d, ConvAlgorithm,
    ConvParams, Error, PaddingMode, Size,
};

/// Fill a flat vec with deterministic values based on index.
fn fill_deterministic(data: &mut [f32]) {
    for (i, v) in data.iter_mut().enumerate() {
        *v = ((i as f32) * 0.1 + 0.05).sin();
    }
}

#[test]
fn test_flatten_rows() {
    let grid = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
    let (flat, size) = flatten(&grid).unwrap();
    assert_eq!(size, Size::new(2, 3));
    assert_eq!(flat, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(unflatten(&flat, size).unwrap(), grid);
}

#[test]
fn test_flatten_rejects_ragged_and_empty() {
    let ragged = vec![vec![1.0, 2.0], vec![3.0]];
    assert!(matches!(flatten(&ragged), Err(Error::InvalidShape(_))));

    let empty: Vec<Vec<f32>> = Vec::new();
    assert!(matches!(flatten(&empty), Err(Error::InvalidShape(_))));

    let empty_rows: [[f32; 0]; 2] = [[], []];
    assert!(matches!(flatten(&empty_rows), Err(Error::InvalidShape(_))));
}

#[test]
fn test_flip180() {
    let flipped = flip180(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], Size::new(2, 3)).unwrap();
    assert_eq!(flipped, vec![6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);

    let err = flip180(&[1.0, 2.0], Size::new(2, 3)).unwrap_err();
    assert_eq!(err, Error::BufferSizeMismatch { what: "buffer", expected: 6, got: 2 });
}

#[test]
fn test_params_default_and_builder() {
    let params = ConvParams::default();
    assert_eq!(params.stride, Size::square(1));
    assert_eq!(params.padding, PaddingMode::Valid);
    assert_eq!(params.algorithm, ConvAlgorithm::Naive);

    let params = ConvParams::new()
        .with_stride((2, 3))
        .with_padding(PaddingMode::Same)
        .with_algorithm(ConvAlgorithm::Im2col);
    assert_eq!(params.stride, Size::new(2, 3));
    assert_eq!(params.padding, PaddingMode::Same);
    assert_eq!(params.algorithm, ConvAlgorithm::Im2col);
}

#[test]
fn test_conv2d_rejects_bad_construction() {
    let err = Conv2d::new(vec![1.0; 3], Size::square(2)).unwrap_err();
    assert_eq!(err, Error::BufferSizeMismatch { what: "filter", expected: 4, got: 3 });

    let params = ConvParams::new().with_stride((0, 1));
    let err = Conv2d::with_params(vec![1.0; 4], Size::square(2), params).unwrap_err();
    assert!(matches!(err, Error::InvalidShape(_)));

    let err = Conv2d::new(vec![1.0; 4], Size::new(2, usize::MAX)).unwrap_err();
    assert!(matches!(err, Error::InvalidShape(_)));
}

#[test]
fn test_conv2d_forward_matches_free_function() {
    let (filter_size, input_size) = (Size::new(3, 2), Size::new(8, 7));
    let mut filter = vec![0.0f32; filter_size.len()];
    let mut signal = vec![0.0f32; input_size.len()];
    fill_deterministic(&mut filter);
    fill_deterministic(&mut signal);

    let params = ConvParams::new()
        .with_stride((2, 2))
        .with_padding(PaddingMode::Same)
        .with_algorithm(ConvAlgorithm::Parallel);
    let layer = Conv2d::with_params(filter.clone(), filter_size, params).unwrap();

    let expected = convolve_with(
        ConvAlgorithm::Parallel,
        &signal,
        &filter,
        Size::square(2),
        PaddingMode::Same,
        filter_size,
        input_size,
    )
    .unwrap();
    assert_eq!(layer.output_size(input_size).unwrap(), expected.1);
    assert_eq!(layer.forward(&signal, input_size).unwrap(), expected);

    let mut output = vec![0.0f32; expected.1.len()];
    assert_eq!(layer.forward_into(&signal, input_size, &mut output).unwrap(), expected.1);
    assert_eq!(output, expected.0);
}

#[test]
fn test_conv2d_transposed_matches_free_function() {
    let filter_size = Size::square(3);
    let mut filter = vec![0.0f32; filter_size.len()];
    fill_deterministic(&mut filter);
    let layer = Conv2d::with_params(
        filter.clone(),
        filter_size,
        ConvParams::new().with_stride((2, 2)).with_padding(PaddingMode::Same),
    )
    .unwrap();

    let input_size = Size::new(2, 3);
    let signal = vec![1.0, -1.0, 0.5, 2.0, 0.0, -0.25];
    let expected = transposed_convolve(
        &signal,
        &filter,
        Size::square(2),
        PaddingMode::Same,
        filter_size,
        input_size,
    )
    .unwrap();
    assert_eq!(layer.transposed_output_size(input_size).unwrap(), Size::new(4, 6));
    assert_eq!(layer.transposed(&signal, input_size).unwrap(), expected);

    let mut output = vec![0.0f32; expected.1.len()];
    layer.transposed_into(&signal, input_size, &mut output).unwrap();
    assert_eq!(output, expected.0);
}

#[test]
fn test_conv2d_filter_mut_and_display() {
    let mut layer = Conv2d::new(vec![0.0; 4], Size::square(2)).unwrap();
    layer.filter_mut().fill(1.0);
    assert_eq!(layer.filter(), &[1.0; 4]);
    assert_eq!(layer.filter_size(), Size::square(2));
    assert_eq!(layer.forward(&[1.0; 9], Size::square(3)).unwrap().0, vec![4.0; 4]);
    assert_eq!(
        layer.to_string(),
        "Conv2d(filter=2x2, stride=1x1, padding=valid, algorithm=Naive)"
    );
}
