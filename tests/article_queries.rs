use chrono::{Duration, Months};

mod support;

use kb_core::application::queries::articles::{
    GetArticleByIdQuery, ListArticlesQuery, Listing, SearchArticlesQuery,
};
use kb_core::application::services::ServiceSettings;
use kb_core::domain::article::ArticleScope;
use support::{ArticleBuilder, Harness, fixed_now, user};

/// Six articles covering every listing:
/// 1 fresh, 2 neither fresh nor stale, 3 stale, 4 archived, 5 rotten, 6 guide.
fn seed_catalog(h: &Harness) {
    let now = fixed_now();
    let stale_at = now.checked_sub_months(Months::new(7)).unwrap();
    h.seed(
        ArticleBuilder::new()
            .id(1)
            .title("Deploys")
            .updated_at(now - Duration::days(1))
            .popularity(0, 0, 100)
            .build(),
    );
    h.seed(
        ArticleBuilder::new()
            .id(2)
            .title("Benefits")
            .updated_at(now - Duration::days(10))
            .popularity(5, 0, 0)
            .build(),
    );
    h.seed(
        ArticleBuilder::new()
            .id(3)
            .title("Coffee")
            .updated_at(stale_at)
            .build(),
    );
    h.seed(
        ArticleBuilder::new()
            .id(4)
            .title("Archive me")
            .updated_at(now - Duration::days(1))
            .archived_at(now - Duration::hours(1))
            .build(),
    );
    h.seed(
        ArticleBuilder::new()
            .id(5)
            .title("Expenses")
            .updated_at(now - Duration::days(3))
            .rotted(now - Duration::days(2), 9)
            .build(),
    );
    h.seed(
        ArticleBuilder::new()
            .id(6)
            .title("Handbook")
            .guide()
            .updated_at(now - Duration::days(2))
            .popularity(5, 2, 0)
            .build(),
    );
}

async fn listing_ids(h: &Harness, listing: Listing) -> Vec<i64> {
    h.services
        .article_queries
        .list_articles(ListArticlesQuery { listing, limit: 0 })
        .await
        .unwrap()
        .into_iter()
        .map(|dto| dto.id)
        .collect()
}

#[tokio::test]
async fn listings_filter_and_order() {
    let h = Harness::new();
    seed_catalog(&h);

    assert_eq!(listing_ids(&h, Listing::Current).await, vec![1, 6, 2, 3, 5]);
    assert_eq!(listing_ids(&h, Listing::Fresh).await, vec![1, 6]);
    assert_eq!(listing_ids(&h, Listing::Stale).await, vec![3]);
    assert_eq!(listing_ids(&h, Listing::Archived).await, vec![4]);
    assert_eq!(listing_ids(&h, Listing::Rotten).await, vec![5]);
    assert_eq!(listing_ids(&h, Listing::Guide).await, vec![6]);
    assert_eq!(listing_ids(&h, Listing::Popular).await, vec![6, 2, 1, 5, 4, 3]);
    assert_eq!(
        listing_ids(&h, Listing::Alphabetical).await,
        vec![4, 2, 3, 1, 5, 6]
    );
}

#[tokio::test]
async fn listing_limit_is_honoured() {
    let h = Harness::new();
    seed_catalog(&h);

    let page = h
        .services
        .article_queries
        .list_articles(ListArticlesQuery {
            listing: Listing::Current,
            limit: 2,
        })
        .await
        .unwrap();
    assert_eq!(page.len(), 2);
}

#[tokio::test]
async fn derived_flags_follow_the_clock() {
    let h = Harness::new();
    seed_catalog(&h);

    let fresh = listing_ids(&h, Listing::Fresh).await;
    assert!(fresh.contains(&1));

    // No write happens; article 1 simply ages out of the window.
    h.clock.advance(Duration::days(7));
    assert!(!listing_ids(&h, Listing::Fresh).await.contains(&1));

    let detail = h
        .services
        .article_queries
        .get_article_by_id(GetArticleByIdQuery { id: 1 })
        .await
        .unwrap();
    assert!(!detail.article.fresh);
    assert!(!detail.article.stale);
}

#[tokio::test]
async fn blank_search_returns_base_scope_without_engine() {
    let h = Harness::new();
    seed_catalog(&h);

    let hits = h
        .services
        .article_queries
        .text_search(SearchArticlesQuery {
            query: "   ".into(),
            scope: None,
        })
        .await
        .unwrap();
    let ids: Vec<i64> = hits.iter().map(|hit| hit.article.id).collect();
    assert_eq!(ids, vec![1, 6, 2, 3, 5]);
    assert!(hits.iter().all(|hit| hit.highlight.is_none()));

    let popular = h
        .services
        .article_queries
        .text_search(SearchArticlesQuery {
            query: String::new(),
            scope: Some(ArticleScope::popular().limit(3)),
        })
        .await
        .unwrap();
    let ids: Vec<i64> = popular.iter().map(|hit| hit.article.id).collect();
    assert_eq!(ids, vec![6, 2, 1]);

    assert_eq!(h.search.calls(), 0);
}

#[tokio::test]
async fn text_search_delegates_with_configured_threshold() {
    let h = Harness::builder()
        .settings(ServiceSettings {
            trigram_threshold: 0.45,
            ..ServiceSettings::default()
        })
        .build();
    let article = ArticleBuilder::new().id(3).title("Beef stew").build();
    h.search.respond_with(vec![article]);

    let hits = h
        .services
        .article_queries
        .text_search(SearchArticlesQuery {
            query: "  stew ".into(),
            scope: None,
        })
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].article.title, "Beef stew");
    assert!(hits[0].highlight.is_some());

    assert_eq!(h.search.calls(), 1);
    let request = h.search.last_request().unwrap();
    assert_eq!(request.query.as_str(), "stew");
    assert!((request.trigram_threshold - 0.45).abs() < f32::EPSILON);
    assert_eq!(request.scope, ArticleScope::current());
}

#[tokio::test]
async fn detail_lists_tags_and_contributors() {
    let h = Harness::new();
    h.seed(ArticleBuilder::new().id(1).author(2).editor(3).build());

    let detail = h
        .services
        .article_queries
        .get_article_by_id(GetArticleByIdQuery { id: 1 })
        .await
        .unwrap();
    assert_eq!(detail.contributors, vec![2, 3]);
    assert!(detail.tags.is_empty());

    let err = h
        .services
        .article_queries
        .get_article_by_id(GetArticleByIdQuery { id: 2 })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn endorsers_and_subscribers_are_listed() {
    let h = Harness::new();
    h.seed(ArticleBuilder::new().id(1).build());
    let commands = &h.services.article_commands;
    commands.endorse(user(4), 1).await.unwrap();
    commands.endorse(user(5), 1).await.unwrap();
    commands.subscribe(user(6), 1).await.unwrap();

    let queries = &h.services.article_queries;
    let mut endorsers = queries.endorsers(1).await.unwrap();
    endorsers.sort_unstable();
    assert_eq!(endorsers, vec![4, 5]);
    assert_eq!(queries.subscribers(1).await.unwrap(), vec![6]);
}
