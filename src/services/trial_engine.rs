use rand::Rng;
use rand::distributions::Uniform;

use crate::domain::opportunity::Opportunity;

/// Samples `trial_count` independent pipeline outcomes. Each trial draws one
/// uniform value in `[0,1)` per opportunity; the opportunity is won iff the
/// draw is strictly below its win probability, and the trial outcome is the
/// sum of won amounts.
///
/// Amounts and probabilities are hoisted into flat arrays and the uniform
/// distribution is constructed once, so the hot loop is a streamed zip over
/// batch-sampled draws rather than per-opportunity RNG setup.
pub fn run_trials<R: Rng + ?Sized>(
    opportunities: &[Opportunity],
    trial_count: usize,
    rng: &mut R,
) -> Vec<f64> {
    if opportunities.is_empty() {
        return vec![0.0; trial_count];
    }

    let amounts: Vec<f64> = opportunities.iter().map(|o| o.amount).collect();
    let probabilities: Vec<f64> = opportunities.iter().map(|o| o.win_probability).collect();
    let draw_dist = Uniform::new(0.0_f64, 1.0);

    let mut outcomes = Vec::with_capacity(trial_count);
    for _ in 0..trial_count {
        let won_total: f64 = (&mut *rng)
            .sample_iter(&draw_dist)
            .take(probabilities.len())
            .zip(probabilities.iter().zip(&amounts))
            .map(|(draw, (probability, amount))| {
                if draw < *probability { *amount } else { 0.0 }
            })
            .sum();
        outcomes.push(won_total);
    }
    outcomes
}
