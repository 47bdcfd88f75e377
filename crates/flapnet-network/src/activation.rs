//! Elementwise activation functions used by network evaluation.

/// Logistic sigmoid, mapping any real input into `(0, 1)`.
///
/// # Examples
///
/// ```
/// use flapnet_network::activation::sigmoid;
///
/// assert_eq!(sigmoid(0.0), 0.5);
/// assert!(sigmoid(10.0) > 0.99);
/// assert!(sigmoid(-10.0) < 0.01);
/// ```
#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Softmax over a slice of logits.
///
/// The maximum logit is subtracted before exponentiation so large inputs do
/// not overflow. Returns an empty vector for empty input.
///
/// # Examples
///
/// ```
/// use flapnet_network::activation::softmax;
///
/// let probs = softmax(&[1.0, 1.0]);
/// assert_eq!(probs, vec![0.5, 0.5]);
/// ```
#[must_use]
pub fn softmax(logits: &[f64]) -> Vec<f64> {
    let Some(max) = logits.iter().copied().reduce(f64::max) else {
        return vec![];
    };
    let exps = logits.iter().map(|v| (v - max).exp()).collect::<Vec<_>>();
    let sum = exps.iter().sum::<f64>();
    exps.into_iter().map(|e| e / sum).collect()
}
