use futures::future::try_join_all;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use super::repo::PreferenceRepo;
use super::repo_types::{PreferenceCategory, PreferenceItem, PreferenceSet};
use crate::config::UpstreamConfig;
use crate::upstream::read_with_retry;

pub const MAX_EQUIPMENT_ITEMS: usize = 6;

async fn fetch_categories(
    repo: &dyn PreferenceRepo,
    cfg: &UpstreamConfig,
    user_id: Uuid,
    categories: &[PreferenceCategory],
) -> anyhow::Result<Vec<(PreferenceCategory, Vec<PreferenceItem>)>> {
    // categories are independent reads, issue them together
    let reads = categories.iter().map(|&category| async move {
        let items = read_with_retry(cfg, category.view(), || repo.fetch_liked(user_id, category)).await?;
        Ok::<_, anyhow::Error>((category, items))
    });
    try_join_all(reads).await
}

pub async fn fetch_food_preferences(
    repo: &dyn PreferenceRepo,
    cfg: &UpstreamConfig,
    user_id: Uuid,
) -> anyhow::Result<PreferenceSet> {
    let rows = fetch_categories(repo, cfg, user_id, &PreferenceCategory::FOOD).await?;
    let set = PreferenceSet(rows.into_iter().collect());
    debug!(%user_id, liked = set.liked_count(), "food preferences loaded");
    Ok(set)
}

/// All liked equipment across categories, tagged with its category.
pub async fn fetch_liked_equipment(
    repo: &dyn PreferenceRepo,
    cfg: &UpstreamConfig,
    user_id: Uuid,
) -> anyhow::Result<Vec<(PreferenceCategory, PreferenceItem)>> {
    let rows = fetch_categories(repo, cfg, user_id, &PreferenceCategory::EQUIPMENT).await?;
    Ok(rows
        .into_iter()
        .flat_map(|(category, items)| items.into_iter().map(move |item| (category, item)))
        .filter(|(_, item)| item.preference)
        .collect())
}

/// Uniformly sample at most six liked items and regroup them by category.
pub fn select_equipment<R: Rng + ?Sized>(
    mut liked: Vec<(PreferenceCategory, PreferenceItem)>,
    rng: &mut R,
) -> PreferenceSet {
    liked.retain(|(_, item)| item.preference);
    liked.shuffle(rng);
    liked.truncate(MAX_EQUIPMENT_ITEMS);

    let mut set = PreferenceSet::default();
    for category in PreferenceCategory::EQUIPMENT {
        set.0.insert(category, Vec::new());
    }
    for (category, item) in liked {
        set.0.entry(category).or_default().push(item);
    }
    set
}
