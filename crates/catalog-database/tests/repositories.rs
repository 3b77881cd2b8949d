//! Repository behaviour against a live database.

mod common;

use catalog_core::error::ErrorKind;
use catalog_core::types::{Filter, ListDefaults, ListQuery, RangeSpec, SortField};
use catalog_database::{CategoryRepository, IdAllocator, ItemRepository};
use catalog_entity::category::{CreateCategory, UpdateCategory};
use catalog_entity::item::ItemSummary;

fn category(name: &str) -> CreateCategory {
    CreateCategory {
        name: name.to_string(),
        description: format!("{name} description"),
    }
}

#[tokio::test]
async fn test_ids_start_at_one_and_increase() {
    let Some((db, _guard)) = common::fresh_database().await else {
        return;
    };
    let repo = CategoryRepository::new(db, IdAllocator::new(true));

    let first = repo.create(&category("Books")).await.expect("create");
    let second = repo.create(&category("Music")).await.expect("create");

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert_eq!(repo.find_by_id(2).await.expect("find"), vec![second]);
    assert!(repo.find_by_id(99).await.expect("find").is_empty());
}

#[tokio::test]
async fn test_filter_count_and_paging() {
    let Some((db, _guard)) = common::fresh_database().await else {
        return;
    };
    let repo = CategoryRepository::new(db, IdAllocator::default());
    for name in ["Books", "Audiobooks", "Music", "E-books"] {
        repo.create(&category(name)).await.expect("create");
    }

    let filter = Filter::parse(r#"{"name":"BOOK"}"#).expect("filter");
    let query = ListQuery::defaults(&ListDefaults::CATEGORIES).with_filter(filter.clone());
    let rows = repo.list(&query).await.expect("list");
    assert_eq!(rows.len(), 3);
    assert_eq!(repo.count(&filter).await.expect("count"), 3);

    let page = repo
        .list(&query.with_range(RangeSpec::new(1, 1).expect("range")))
        .await
        .expect("list");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, rows[1].id);

    let wildcard = Filter::parse(r#"{"name":"%"}"#).expect("filter");
    assert_eq!(repo.count(&wildcard).await.expect("count"), 0);
}

#[tokio::test]
async fn test_reversed_sort_reverses_rows() {
    let Some((db, _guard)) = common::fresh_database().await else {
        return;
    };
    let repo = CategoryRepository::new(db, IdAllocator::default());
    for name in ["B", "A", "B", "C"] {
        repo.create(&category(name)).await.expect("create");
    }

    let base = ListQuery::defaults(&ListDefaults::CATEGORIES);
    let asc = repo
        .list(&base.clone().with_sort(SortField::asc("name")))
        .await
        .expect("list");
    let mut desc = repo
        .list(&base.with_sort(SortField::desc("name")))
        .await
        .expect("list");
    desc.reverse();

    assert_eq!(asc, desc);
}

#[tokio::test]
async fn test_update_overwrites_and_missing_is_none() {
    let Some((db, _guard)) = common::fresh_database().await else {
        return;
    };
    let repo = CategoryRepository::new(db, IdAllocator::default());
    let created = repo.create(&category("Books")).await.expect("create");

    let updated = repo
        .update(
            created.id,
            &UpdateCategory {
                name: String::new(),
                description: String::new(),
            },
        )
        .await
        .expect("update")
        .expect("exists");
    assert_eq!(updated.name, "");
    assert!(updated.created_at >= created.created_at);

    let missing = repo
        .update(42, &UpdateCategory { name: "x".into(), description: "y".into() })
        .await
        .expect("update");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_link_constraints() {
    let Some((db, _guard)) = common::fresh_database().await else {
        return;
    };
    let categories = CategoryRepository::new(db.clone(), IdAllocator::default());
    let items = ItemRepository::new(db, IdAllocator::default());
    let books = categories.create(&category("Books")).await.expect("create");

    let mut tx = items.begin().await.expect("begin");
    let item = items.insert_item(&mut tx, "Dune", "Sci-fi").await.expect("item");
    items.insert_link(&mut tx, item.id, books.id).await.expect("link");
    tx.commit().await.expect("commit");

    let err = categories.delete(books.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let mut tx = items.begin().await.expect("begin");
    let err = items.insert_link(&mut tx, item.id, 999).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_item_listing_joins_category_and_image() {
    let Some((db, _guard)) = common::fresh_database().await else {
        return;
    };
    let categories = CategoryRepository::new(db.clone(), IdAllocator::default());
    let items = ItemRepository::new(db, IdAllocator::default());
    let books = categories.create(&category("Books")).await.expect("create");

    let mut tx = items.begin().await.expect("begin");
    let dune = items.insert_item(&mut tx, "Dune", "").await.expect("item");
    items.insert_link(&mut tx, dune.id, books.id).await.expect("link");
    items
        .insert_image(&mut tx, dune.id, "https://cdn.example/1.jpg", "cover")
        .await
        .expect("image");
    let bare = items.insert_item(&mut tx, "Untitled", "").await.expect("item");
    tx.commit().await.expect("commit");

    let rows = items
        .list(&ListQuery::defaults(&ListDefaults::ITEMS))
        .await
        .expect("list");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category.as_deref(), Some("Books"));
    assert_eq!(rows[0].url.as_deref(), Some("https://cdn.example/1.jpg"));
    assert_eq!(rows[1].id, bare.id);
    assert!(rows[1].category.is_none() && rows[1].url.is_none());

    let by_category = Filter::parse(&format!(r#"{{"category_id":{}}}"#, books.id)).expect("filter");
    assert_eq!(items.count(&by_category).await.expect("count"), 1);

    let detail = items.find_by_id(dune.id).await.expect("find");
    assert_eq!(detail.len(), 1);
    assert_eq!(detail[0].category_id, Some(books.id));
    assert_eq!(detail[0].name.as_deref(), Some("Books"));
}

#[tokio::test]
async fn test_filter_keys_are_and_ed() {
    let Some((db, _guard)) = common::fresh_database().await else {
        return;
    };
    let repo = CategoryRepository::new(db, IdAllocator::default());
    for name in ["Books", "All books", "Music"] {
        repo.create(&category(name)).await.expect("create");
    }

    let both = Filter::parse(r#"{"name":"books","id":[1,3]}"#).expect("filter");
    let rows = repo
        .list(&ListQuery::defaults(&ListDefaults::CATEGORIES).with_filter(both.clone()))
        .await
        .expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Books");
    assert_eq!(repo.count(&both).await.expect("count"), 1);

    let ignored = Filter::parse(r#"{"name":"books","nonexistent":"x"}"#).expect("filter");
    assert_eq!(repo.count(&ignored).await.expect("count"), 2);
}

#[tokio::test]
async fn test_item_rows_per_category_have_a_total_order() {
    let Some((db, _guard)) = common::fresh_database().await else {
        return;
    };
    let categories = CategoryRepository::new(db.clone(), IdAllocator::default());
    let items = ItemRepository::new(db, IdAllocator::default());
    let books = categories.create(&category("Books")).await.expect("create");
    let film = categories.create(&category("Film")).await.expect("create");

    let mut tx = items.begin().await.expect("begin");
    for title in ["Dune", "Emma", "Solaris"] {
        let item = items.insert_item(&mut tx, title, "").await.expect("item");
        items.insert_link(&mut tx, item.id, books.id).await.expect("link");
        items.insert_link(&mut tx, item.id, film.id).await.expect("link");
        items
            .insert_image(&mut tx, item.id, "https://cdn.example/shared.jpg", "")
            .await
            .expect("image");
    }
    tx.commit().await.expect("commit");

    let keys = |rows: Vec<ItemSummary>| {
        rows.into_iter()
            .map(|r| (r.id, r.category))
            .collect::<Vec<_>>()
    };
    let base = ListQuery::defaults(&ListDefaults::ITEMS)
        .with_range(RangeSpec::new(0, 9).expect("range"));

    let asc = keys(
        items
            .list(&base.clone().with_sort(SortField::asc("url")))
            .await
            .expect("list"),
    );
    let mut desc = keys(
        items
            .list(&base.clone().with_sort(SortField::desc("url")))
            .await
            .expect("list"),
    );
    assert_eq!(asc.len(), 6);
    desc.reverse();
    assert_eq!(asc, desc);

    let mut paged = Vec::new();
    for start in [0, 2, 4] {
        let page = items
            .list(
                &base
                    .clone()
                    .with_sort(SortField::asc("url"))
                    .with_range(RangeSpec::new(start, start + 1).expect("range")),
            )
            .await
            .expect("list");
        paged.extend(keys(page));
    }
    assert_eq!(paged, asc);
}
