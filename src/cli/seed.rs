use crate::app_data::AppData;
use crate::errors::InternalError;
use crate::seed::{sample_created_at, sample_items};

/// Insert the sample listings
///
/// A database that already holds items is left untouched.
///
/// # Returns
/// * `Ok(n)` - Number of items inserted (0 when skipped)
pub async fn seed_items(app_data: &AppData) -> Result<usize, InternalError> {
    let existing = app_data.item_store.count_all().await?;
    if existing > 0 {
        tracing::info!(existing, "Items already present, skipping seed");
        return Ok(0);
    }

    let samples = sample_items();
    let total = samples.len();
    for (index, item) in samples.into_iter().enumerate() {
        app_data
            .item_store
            .insert(item, None, sample_created_at(index))
            .await?;
    }

    tracing::info!(total, "Seeded sample items");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::setup_test_app;

    #[tokio::test]
    async fn test_seed_inserts_once() {
        let app_data = setup_test_app().await;

        assert_eq!(seed_items(&app_data).await.unwrap(), 8);
        assert_eq!(seed_items(&app_data).await.unwrap(), 0);
        assert_eq!(app_data.item_store.count_all().await.unwrap(), 8);
    }

    #[tokio::test]
    async fn test_seeded_items_list_newest_first() {
        let app_data = setup_test_app().await;
        seed_items(&app_data).await.unwrap();

        let items = app_data.item_store.list_recent(None, 2).await.unwrap();

        assert_eq!(items[0].name, "iPhone 13 Pro");
        assert_eq!(items[1].name, "Golden Retriever Dog");
    }
}
