//! Property tests: page window and total against a naive model

use jobboard_server::filter::JobFilter;
use jobboard_server::models::{NewCompany, NewJob, PageWindow};
use jobboard_server::store::{MemoryStore, Store};
use proptest::prelude::*;

const TAGS: &[&str] = &["rust", "go", "python"];

#[derive(Debug, Clone)]
struct Posting {
    remote: bool,
    tags: Vec<String>,
}

fn arb_posting() -> impl Strategy<Value = Posting> {
    (
        any::<bool>(),
        prop::sample::subsequence(TAGS.to_vec(), 0..=TAGS.len()),
    )
        .prop_map(|(remote, tags)| Posting {
            remote,
            tags: tags.into_iter().map(String::from).collect(),
        })
}

fn arb_filter() -> impl Strategy<Value = JobFilter> {
    (
        prop::option::of(any::<bool>()),
        prop::sample::subsequence(TAGS.to_vec(), 0..=TAGS.len()),
    )
        .prop_map(|(remote, tags)| JobFilter {
            remote,
            tags: tags.into_iter().map(String::from).collect(),
            ..Default::default()
        })
}

fn model_matches(posting: &Posting, filter: &JobFilter) -> bool {
    filter.remote.map_or(true, |r| r == posting.remote)
        && (filter.tags.is_empty() || filter.tags.iter().any(|t| posting.tags.contains(t)))
}

/// Insert postings in order and return (store, titles in insertion order).
async fn seed(postings: &[Posting]) -> (MemoryStore, Vec<String>) {
    let store = MemoryStore::new();
    let company = store
        .create_company(NewCompany {
            name: "Acme".into(),
            website: None,
            logo: None,
            description: None,
        })
        .await
        .unwrap();

    let mut titles = Vec::new();
    for (i, posting) in postings.iter().enumerate() {
        let title = format!("job-{i}");
        store
            .create_job(NewJob {
                title: title.clone(),
                description: "d".into(),
                location: "Berlin".into(),
                remote: posting.remote,
                salary: None,
                company_id: company.id,
                category_id: None,
                tags: posting.tags.clone(),
            })
            .await
            .unwrap();
        titles.push(title);
    }
    (store, titles)
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Total counts every match; the page is the newest-first slice at offset.
    #[test]
    fn prop_page_is_window_of_newest_first(
        postings in prop::collection::vec(arb_posting(), 0..20),
        filter in arb_filter(),
        limit in 0i64..25,
        offset in 0i64..25,
    ) {
        let (page, titles) = runtime().block_on(async {
            let (store, titles) = seed(&postings).await;
            let page = store
                .search_jobs(&filter, PageWindow::new(Some(limit), Some(offset)))
                .await
                .unwrap();
            (page, titles)
        });

        let expected: Vec<&String> = titles
            .iter()
            .zip(&postings)
            .rev()
            .filter(|(_, p)| model_matches(p, &filter))
            .map(|(t, _)| t)
            .collect();

        prop_assert_eq!(page.total, expected.len() as i64);

        let window: Vec<&String> = expected
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .copied()
            .collect();
        let got: Vec<&String> = page.items.iter().map(|v| &v.job.title).collect();
        prop_assert_eq!(got, window);
    }

    /// The window never changes the total.
    #[test]
    fn prop_total_ignores_window(
        postings in prop::collection::vec(arb_posting(), 0..15),
        filter in arb_filter(),
        limit in 0i64..10,
        offset in 0i64..20,
    ) {
        let (windowed, full) = runtime().block_on(async {
            let (store, _) = seed(&postings).await;
            let windowed = store
                .search_jobs(&filter, PageWindow::new(Some(limit), Some(offset)))
                .await
                .unwrap();
            let full = store.search_jobs(&filter, PageWindow::default()).await.unwrap();
            (windowed, full)
        });

        prop_assert_eq!(windowed.total, full.total);
    }
}
