use rand::seq::SliceRandom;
use rand::Rng;

use super::repo_types::{ExercisePool, ExerciseRecord};

pub const MAX_POOL_SIZE: usize = 200;

/// Keep every exact body-part match, fill the rest with a uniform sample of the others.
pub fn build_pool<R: Rng + ?Sized>(
    records: Vec<ExerciseRecord>,
    sub_category: &str,
    rng: &mut R,
) -> ExercisePool {
    let (matches, mut others): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|ex| ex.body_part.eq_ignore_ascii_case(sub_category));

    others.shuffle(rng);
    others.truncate(MAX_POOL_SIZE.saturating_sub(matches.len()));

    ExercisePool { matches, others }
}
