// stages.rs - the synchronous numeric stages of the boundary detector

use std::collections::VecDeque;

use super::similarity::cosine_similarity;

/// Adjacency threshold: flag position i when the similarity between
/// sentence i-1 and sentence i falls below `theta_low`. Position 0 never
/// starts a boundary.
pub(crate) fn adjacency_flags(embeddings: &[Vec<f32>], theta_low: f32) -> Vec<bool> {
    let n = embeddings.len();
    let mut flags = vec![false; n];
    for i in 1..n {
        let sim = cosine_similarity(&embeddings[i - 1], &embeddings[i]);
        flags[i] = sim < theta_low;
    }
    flags
}

/// Causal moving average over a window of up to `k` most recent values.
/// The window grows from 1 to k, then slides.
fn moving_average(data: &[f32], k: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(data.len());
    let mut window: VecDeque<f32> = VecDeque::with_capacity(k + 1);
    let mut sum = 0.0;

    for &d in data {
        window.push_back(d);
        sum += d;
        if window.len() > k {
            sum -= window.pop_front().unwrap_or(0.0);
        }
        out.push(sum / window.len() as f32);
    }
    out
}

/// Population standard deviation; fewer than 2 points has no spread.
fn population_std(data: &[f32]) -> f32 {
    if data.len() < 2 {
        return 0.0;
    }
    let mean = data.iter().sum::<f32>() / data.len() as f32;
    let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / data.len() as f32;
    var.sqrt()
}

/// Windowed anomaly: flag positions where the adjacent-similarity series
/// deviates from its trailing average by more than `tau` residual sigmas.
/// The series opens with a synthetic 1.0 (no prior sentence reads as
/// maximally similar), so a degenerate input never fires.
pub(crate) fn anomaly_flags(embeddings: &[Vec<f32>], k: usize, tau: f32) -> Vec<bool> {
    let n = embeddings.len();
    if n == 0 {
        return Vec::new();
    }

    let mut sims = Vec::with_capacity(n);
    sims.push(1.0);
    for i in 1..n {
        sims.push(cosine_similarity(&embeddings[i - 1], &embeddings[i]));
    }

    let avg = moving_average(&sims, k.max(1));
    let resid: Vec<f32> = sims.iter().zip(&avg).map(|(s, a)| (s - a).abs()).collect();
    let sigma = population_std(&resid);

    resid.iter().map(|&r| r > tau * sigma).collect()
}

pub(crate) fn combine(a: &[bool], b: &[bool]) -> Vec<bool> {
    a.iter().zip(b).map(|(&x, &y)| x || y).collect()
}

/// Post-filter: a flag on a near-empty sentence (≤ 1 character after
/// trimming) is a splitting artifact, not a topic boundary.
pub(crate) fn post_filter(sentences: &[String], boundaries: &[bool]) -> Vec<bool> {
    boundaries
        .iter()
        .enumerate()
        .map(|(i, &flag)| flag && sentences[i].trim().chars().count() > 1)
        .collect()
}
