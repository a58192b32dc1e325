//! Job search behaviour through the public operations

mod common;

use common::{admin, anonymous, board, category_input, company, job, job_input};
use jobboard_server::filter::JobSearch;
use jobboard_server::models::JobInput;

fn titles(page: &jobboard_server::models::JobPage) -> Vec<&str> {
    page.items.iter().map(|v| v.job.title.as_str()).collect()
}

#[tokio::test]
async fn search_matches_title_case_insensitively() {
    let (board, _) = board();
    let acme = company(&board, "Acme").await;
    job(&board, job_input(&acme, "Site Reliability Engineer")).await;
    job(&board, job_input(&acme, "Backend Developer")).await;

    let page = board
        .jobs(
            &anonymous(),
            JobSearch {
                search: Some("engineer".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(titles(&page), vec!["Site Reliability Engineer"]);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn search_also_matches_description() {
    let (board, _) = board();
    let acme = company(&board, "Acme").await;
    job(
        &board,
        JobInput {
            description: Some("Kubernetes on bare metal".into()),
            ..job_input(&acme, "Operator")
        },
    )
    .await;

    let page = board
        .jobs(
            &anonymous(),
            JobSearch {
                search: Some("KUBERNETES".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn remote_and_tags_combine() {
    let (board, _) = board();
    let acme = company(&board, "Acme").await;
    let tagged = |title: &str, remote: bool, tag: &str| JobInput {
        remote: Some(remote),
        tags: Some(vec![tag.to_string()]),
        ..job_input(&acme, title)
    };
    job(&board, tagged("Remote Python", true, "Python")).await;
    job(&board, tagged("Remote Go", true, "Go")).await;
    job(&board, tagged("Onsite Python", false, "Python")).await;

    let page = board
        .jobs(
            &anonymous(),
            JobSearch {
                remote: Some(true),
                tags: Some(vec!["Python".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(titles(&page), vec!["Remote Python"]);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn tags_match_any_of() {
    let (board, _) = board();
    let acme = company(&board, "Acme").await;
    let tagged = |title: &str, tags: &[&str]| JobInput {
        tags: Some(tags.iter().map(|t| t.to_string()).collect()),
        ..job_input(&acme, title)
    };
    job(&board, tagged("Rust only", &["Rust"])).await;
    job(&board, tagged("Go only", &["Go"])).await;
    job(&board, tagged("Both", &["Rust", "Go"])).await;
    job(&board, tagged("Neither", &["Java"])).await;

    let page = board
        .jobs(
            &anonymous(),
            JobSearch {
                tags: Some(vec!["Rust".into(), "Go".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(titles(&page), vec!["Both", "Go only", "Rust only"]);
}

#[tokio::test]
async fn empty_tags_is_no_constraint() {
    let (board, _) = board();
    let acme = company(&board, "Acme").await;
    job(&board, job_input(&acme, "One")).await;
    job(&board, job_input(&acme, "Two")).await;

    let all = board.jobs(&anonymous(), JobSearch::default()).await.unwrap();
    let empty_tags = board
        .jobs(
            &anonymous(),
            JobSearch {
                tags: Some(vec![]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(all, empty_tags);
    assert_eq!(all.total, 2);
}

#[tokio::test]
async fn window_keeps_total() {
    let (board, _) = board();
    let acme = company(&board, "Acme").await;
    for title in ["Oldest", "Middle", "Newest"] {
        job(&board, job_input(&acme, title)).await;
    }

    let page = board
        .jobs(
            &anonymous(),
            JobSearch {
                limit: Some(1),
                offset: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(titles(&page), vec!["Middle"]);
    assert_eq!(page.total, 3);

    let past_end = board
        .jobs(
            &anonymous(),
            JobSearch {
                offset: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(past_end.items.is_empty());
    assert_eq!(past_end.total, 3);
}

#[tokio::test]
async fn category_and_location_filters() {
    let (board, _) = board();
    let acme = company(&board, "Acme").await;
    let engineering = board
        .create_category(&admin(), category_input("Engineering", "engineering"))
        .await
        .unwrap();

    job(
        &board,
        JobInput {
            category_id: Some(engineering.id.to_string()),
            location: Some("Remote - Europe".into()),
            ..job_input(&acme, "Platform Engineer")
        },
    )
    .await;
    job(&board, job_input(&acme, "Office Manager")).await;

    let by_category = board
        .jobs(
            &anonymous(),
            JobSearch {
                category_id: Some(engineering.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(titles(&by_category), vec!["Platform Engineer"]);
    let category = by_category.items[0].category.as_ref().expect("category joined");
    assert_eq!(category.slug, "engineering");

    let by_location = board
        .jobs(
            &anonymous(),
            JobSearch {
                location: Some("europe".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_location.total, 1);
}

#[tokio::test]
async fn percent_sign_is_literal() {
    let (board, _) = board();
    let acme = company(&board, "Acme").await;
    job(&board, job_input(&acme, "100% remote")).await;
    job(&board, job_input(&acme, "100 seats")).await;

    let page = board
        .jobs(
            &anonymous(),
            JobSearch {
                search: Some("100%".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(titles(&page), vec!["100% remote"]);
}
