//! Macro-generated conformance suite for `VoucherRepository` backends.
//!
//! `voucher_repository_tests!` expands into a test module that exercises
//! any `VoucherRepository` implementation against the full contract:
//! CRUD semantics, duplicate and missing-id errors, filtered pagination,
//! bulk insert atomicity, and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use vouchers::storage::InMemoryVoucherRepository;
//!
//! voucher_repository_tests!(InMemoryVoucherRepository::new());
//! ```
//!
//! `$factory` is re-evaluated for each test. Backends that share state
//! across factory calls (a pooled database) rely on the `delete_all` at
//! the top of every test for isolation, so suites against shared storage
//! must run with `--test-threads=1`.

/// Generate a full `VoucherRepository` conformance test suite.
///
/// `$factory` must be an expression evaluating to a `VoucherRepository`
/// that is also `Clone + 'static` (for the concurrency test).
#[macro_export]
macro_rules! voucher_repository_tests {
    ($factory:expr) => {
        mod voucher_repository_contract_tests {
            use super::*;
            use std::collections::HashSet;
            use uuid::Uuid;
            use vouchers::core::error::VoucherError;
            use vouchers::core::filter::FilterCondition;
            use vouchers::core::page::{PageRequest, SortDirection, SortKey};
            use vouchers::core::repository::VoucherRepository;
            use vouchers::core::voucher::{Voucher, VoucherKind};

            // ==========================================================
            // CRUD
            // ==========================================================

            #[tokio::test]
            async fn test_insert_then_find_round_trips() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let voucher = make_fixed(1000);
                let inserted = repo.insert(voucher.clone()).await.unwrap();
                assert_eq!(inserted, voucher);

                let found = repo
                    .find_by_id(&voucher.voucher_id())
                    .await
                    .unwrap()
                    .expect("voucher should exist after insert");
                assert_eq!(found, voucher);
            }

            #[tokio::test]
            async fn test_find_missing_returns_none() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let found = repo.find_by_id(&Uuid::new_v4()).await.unwrap();
                assert!(found.is_none());
            }

            #[tokio::test]
            async fn test_insert_duplicate_id_is_rejected() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let voucher = make_percent(30);
                repo.insert(voucher.clone()).await.unwrap();

                let err = repo.insert(voucher.clone()).await.unwrap_err();
                assert_eq!(
                    err,
                    VoucherError::DuplicateId {
                        voucher_id: voucher.voucher_id(),
                    }
                );
            }

            #[tokio::test]
            async fn test_update_persists_changes_and_stamps_updated_at() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let voucher = make_fixed(500);
                repo.insert(voucher.clone()).await.unwrap();

                // updated_at must move strictly forward
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;

                let mut changed = voucher.clone();
                changed.set_discount_value(750).unwrap();
                changed.set_quantity(7).unwrap();
                repo.update(changed).await.unwrap();

                let found = repo
                    .find_by_id(&voucher.voucher_id())
                    .await
                    .unwrap()
                    .expect("voucher should still exist after update");
                assert_eq!(found.discount_value(), 750);
                assert_eq!(found.quantity(), 7);
                assert_eq!(found.created_at(), voucher.created_at());
                assert!(found.updated_at() > voucher.updated_at());
            }

            #[tokio::test]
            async fn test_update_with_identical_fields_still_succeeds() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let voucher = make_fixed(500);
                repo.insert(voucher.clone()).await.unwrap();

                // nothing changed on the voucher itself
                repo.update(voucher.clone()).await.unwrap();

                let found = repo
                    .find_by_id(&voucher.voucher_id())
                    .await
                    .unwrap()
                    .expect("voucher should survive a no-op update");
                assert_eq!(found.discount_value(), 500);
                assert!(found.updated_at() >= voucher.updated_at());
            }

            #[tokio::test]
            async fn test_update_missing_is_not_found() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let voucher = make_fixed(500);
                let err = repo.update(voucher.clone()).await.unwrap_err();
                assert_eq!(
                    err,
                    VoucherError::NotFound {
                        voucher_id: voucher.voucher_id(),
                    }
                );
            }

            #[tokio::test]
            async fn test_delete_removes_and_is_idempotent() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let voucher = make_fixed(500);
                repo.insert(voucher.clone()).await.unwrap();

                repo.delete_by_voucher_id(&voucher.voucher_id()).await.unwrap();
                assert!(repo.find_by_id(&voucher.voucher_id()).await.unwrap().is_none());

                // deleting again succeeds without complaint
                repo.delete_by_voucher_id(&voucher.voucher_id()).await.unwrap();
            }

            #[tokio::test]
            async fn test_delete_all_empties_the_store() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                for value in [100, 200, 300] {
                    repo.insert(make_fixed(value)).await.unwrap();
                }
                repo.delete_all().await.unwrap();

                let page = repo
                    .find_all(&PageRequest::of(0, 10), &FilterCondition::any())
                    .await
                    .unwrap();
                assert_eq!(page.total_elements, 0);
                assert_eq!(page.total_pages, 0);
                assert!(page.items.is_empty());
            }

            // ==========================================================
            // Pagination & filtering
            // ==========================================================

            #[tokio::test]
            async fn test_pagination_visits_each_voucher_exactly_once() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let mut expected = HashSet::new();
                for value in 1..=23 {
                    let voucher = make_fixed(value);
                    expected.insert(voucher.voucher_id());
                    repo.insert(voucher).await.unwrap();
                }

                let mut seen = HashSet::new();
                for page_number in 0..5 {
                    let page = repo
                        .find_all(&PageRequest::of(page_number, 5), &FilterCondition::any())
                        .await
                        .unwrap();
                    assert_eq!(page.total_elements, 23);
                    assert_eq!(page.total_pages, 5);
                    for voucher in &page.items {
                        assert!(
                            seen.insert(voucher.voucher_id()),
                            "voucher appeared on more than one page"
                        );
                    }
                }
                assert_eq!(seen, expected);

                // past the end: empty items, totals intact
                let beyond = repo
                    .find_all(&PageRequest::of(5, 5), &FilterCondition::any())
                    .await
                    .unwrap();
                assert!(beyond.items.is_empty());
                assert_eq!(beyond.total_elements, 23);
            }

            #[tokio::test]
            async fn test_sort_by_discount_value_descending() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                for value in [200, 400, 100, 300] {
                    repo.insert(make_fixed(value)).await.unwrap();
                }

                let request = PageRequest::of(0, 10)
                    .sorted_by(SortKey::DiscountValue, SortDirection::Descending);
                let page = repo.find_all(&request, &FilterCondition::any()).await.unwrap();

                let values: Vec<i64> =
                    page.items.iter().map(Voucher::discount_value).collect();
                assert_eq!(values, vec![400, 300, 200, 100]);
            }

            #[tokio::test]
            async fn test_value_range_filter_bounds_are_inclusive() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                for value in [100, 200, 300, 400, 500] {
                    repo.insert(make_fixed(value)).await.unwrap();
                }

                let filter = FilterCondition::builder()
                    .min_value(200)
                    .max_value(400)
                    .build();
                let page = repo
                    .find_all(&PageRequest::of(0, 10), &filter)
                    .await
                    .unwrap();

                assert_eq!(page.total_elements, 3);
                let mut values: Vec<i64> =
                    page.items.iter().map(Voucher::discount_value).collect();
                values.sort_unstable();
                assert_eq!(values, vec![200, 300, 400]);
            }

            #[tokio::test]
            async fn test_sixty_fixed_and_sixty_percent_paginate_and_filter() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let inserted = repo.bulk_insert(mixed_batch(60, 60)).await.unwrap();
                assert_eq!(inserted, 120);

                let first = repo
                    .find_all(&PageRequest::of(0, 10), &FilterCondition::any())
                    .await
                    .unwrap();
                assert_eq!(first.items.len(), 10);
                assert_eq!(first.total_elements, 120);
                assert_eq!(first.total_pages, 12);

                let fixed_only =
                    FilterCondition::builder().kind(VoucherKind::Fixed).build();
                let fixed_page = repo
                    .find_all(&PageRequest::of(0, 10), &fixed_only)
                    .await
                    .unwrap();
                assert_eq!(fixed_page.items.len(), 10);
                assert_eq!(fixed_page.total_elements, 60);
                assert_eq!(fixed_page.total_pages, 6);
                assert!(
                    fixed_page
                        .items
                        .iter()
                        .all(|v| v.kind() == VoucherKind::Fixed)
                );
            }

            // ==========================================================
            // Bulk insert
            // ==========================================================

            #[tokio::test]
            async fn test_bulk_insert_reports_count_and_persists_all() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let batch = mixed_batch(3, 2);
                let ids: Vec<Uuid> = batch.iter().map(Voucher::voucher_id).collect();

                let inserted = repo.bulk_insert(batch).await.unwrap();
                assert_eq!(inserted, 5);

                for id in &ids {
                    assert!(repo.find_by_id(id).await.unwrap().is_some());
                }
            }

            #[tokio::test]
            async fn test_bulk_insert_of_empty_batch_is_a_no_op() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                assert_eq!(repo.bulk_insert(Vec::new()).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_bulk_insert_with_duplicate_leaves_store_unchanged() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let existing = make_fixed(100);
                repo.insert(existing.clone()).await.unwrap();

                let batch = vec![make_fixed(1), existing.clone(), make_fixed(2)];
                let err = repo.bulk_insert(batch).await.unwrap_err();
                assert_eq!(
                    err,
                    VoucherError::DuplicateId {
                        voucher_id: existing.voucher_id(),
                    }
                );

                let page = repo
                    .find_all(&PageRequest::of(0, 10), &FilterCondition::any())
                    .await
                    .unwrap();
                assert_eq!(page.total_elements, 1);
                assert_eq!(page.items[0].voucher_id(), existing.voucher_id());
            }

            #[tokio::test]
            async fn test_bulk_insert_rejects_intra_batch_duplicates() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let repeated = make_percent(15);
                let batch = vec![make_fixed(1), repeated.clone(), repeated.clone()];
                let err = repo.bulk_insert(batch).await.unwrap_err();
                assert_eq!(
                    err,
                    VoucherError::DuplicateId {
                        voucher_id: repeated.voucher_id(),
                    }
                );

                let page = repo
                    .find_all(&PageRequest::of(0, 10), &FilterCondition::any())
                    .await
                    .unwrap();
                assert_eq!(page.total_elements, 0);
            }

            // ==========================================================
            // Concurrency
            // ==========================================================

            #[tokio::test]
            async fn test_concurrent_inserts_all_land() {
                init_tracing();
                let repo = $factory;
                repo.delete_all().await.unwrap();

                let mut handles = Vec::new();
                for value in 1..=10 {
                    let repo = repo.clone();
                    handles.push(tokio::spawn(async move {
                        repo.insert(make_fixed(value)).await.unwrap();
                    }));
                }
                for handle in handles {
                    handle.await.unwrap();
                }

                let page = repo
                    .find_all(&PageRequest::of(0, 100), &FilterCondition::any())
                    .await
                    .unwrap();
                assert_eq!(page.total_elements, 10);
            }
        }
    };
}
