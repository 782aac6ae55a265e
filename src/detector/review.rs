// review.rs - LLM escalation for provisionally flagged boundaries

use futures_util::stream::{self, StreamExt};
use tracing::debug;

use crate::provider::ProviderRouter;

/// The pair straddling a candidate boundary at `idx`: the sentence before and
/// the sentence at the flagged position. A missing side becomes the empty
/// string.
pub(crate) fn review_prompt(sentences: &[String], idx: usize) -> String {
    let before = idx
        .checked_sub(1)
        .and_then(|i| sentences.get(i))
        .map(String::as_str)
        .unwrap_or("");
    let after = sentences.get(idx).map(String::as_str).unwrap_or("");
    format!(
        "Do the following two sentences belong to different topics? Answer yes or no.\n-----\n{before}\n-----\n{after}"
    )
}

/// A response votes "yes" iff its text contains "yes" case-insensitively.
/// Empty, malformed, or fallback responses all read as "no".
pub(crate) fn is_yes(answer: &str) -> bool {
    answer.to_lowercase().contains("yes")
}

/// Strict majority: more than half of `n_vote` trials.
pub(crate) fn majority(yes_votes: usize, n_vote: usize) -> bool {
    yes_votes > n_vote / 2
}

/// Re-examine every provisionally flagged position with `n_vote` independent
/// LLM votes; keep the flag only on a strict yes-majority. Unflagged
/// positions pass through untouched. Failed calls have already degraded to
/// the "no" sentinel inside the client, so the review itself cannot abort.
///
/// Positions are reviewed with at most `concurrency` in flight; votes within
/// a position run sequentially. Vote completion order does not affect the
/// tally.
pub(crate) async fn review_flags(
    sentences: &[String],
    prelim: &[bool],
    router: &ProviderRouter,
    n_vote: usize,
    concurrency: usize,
) -> Vec<bool> {
    let flagged: Vec<usize> = prelim
        .iter()
        .enumerate()
        .filter(|(_, &f)| f)
        .map(|(i, _)| i)
        .collect();

    debug!(positions = flagged.len(), n_vote, "reviewing flagged boundaries");

    let verdicts: Vec<(usize, bool)> = stream::iter(flagged.into_iter().map(|idx| {
        let prompt = review_prompt(sentences, idx);
        async move {
            let mut yes_votes = 0;
            for _ in 0..n_vote {
                if is_yes(&router.call(&prompt).await) {
                    yes_votes += 1;
                }
            }
            (idx, majority(yes_votes, n_vote))
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;

    let mut refined = prelim.to_vec();
    for (idx, keep) in verdicts {
        refined[idx] = keep;
    }
    refined
}
