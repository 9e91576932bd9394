use async_trait::async_trait;
use readiness_insights::catalog::{
    CatalogLoader, CatalogSource, FileSource, HttpSource, InlineSource, load_catalog,
    source_from_location,
};
use readiness_insights::{CellId, ConcernLevel, Flavor, InsightsError, RootCause};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEADER: &str = "Category,Reason,Level,Description,Shows up as,Action 1,Explanation 1,Action 2,Explanation 2,Action 3,Explanation 3";

/// Full 25-row table in level-major order.
fn full_table() -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for cell in CellId::all() {
        let id = cell.to_string();
        out.push_str(&format!(
            "{},{},{},\"Desc {id}, with comma\",Shows {id},Basic {id},Do the basic thing,Risky {id},Try the bold thing,Safe {id},\"Keep it \"\"safe\"\"\"\n",
            cell.persona(),
            cell.category.catalog_label(),
            cell.level.catalog_label(),
        ));
    }
    out
}

struct CountingSource {
    calls: Arc<AtomicUsize>,
    text: String,
}

#[async_trait]
impl CatalogSource for CountingSource {
    fn name(&self) -> String {
        "counting".into()
    }

    async fn fetch(&self) -> readiness_insights::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        Ok(self.text.clone())
    }
}

/// Fails the first `failures` fetches, then serves the table.
struct FlakySource {
    calls: AtomicUsize,
    failures: usize,
}

#[async_trait]
impl CatalogSource for FlakySource {
    fn name(&self) -> String {
        "flaky".into()
    }

    async fn fetch(&self) -> readiness_insights::Result<String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.failures {
            return Err(InsightsError::CatalogFetch {
                source_name: self.name(),
                message: "connection reset".into(),
            });
        }
        Ok(full_table())
    }
}

#[tokio::test]
async fn every_cell_has_three_flavored_actions() {
    let catalog = load_catalog(&InlineSource::new("inline", full_table()))
        .await
        .unwrap();
    assert_eq!(catalog.category_count(), 25);
    assert_eq!(catalog.len(), 75);

    for cell in CellId::all() {
        let actions = catalog.for_cell(cell.level.id(), cell.category.id());
        assert_eq!(actions.len(), 3, "cell {}", cell);
        let slots: Vec<u8> = actions.iter().map(|a| a.action_number).collect();
        assert_eq!(slots, vec![1, 2, 3]);
        let flavors: Vec<Flavor> = actions.iter().map(|a| a.flavor).collect();
        assert_eq!(flavors, vec![Flavor::Basic, Flavor::Risky, Flavor::Safe]);
        assert_eq!(actions[0].category, cell.persona());
        assert_eq!(actions[2].explanation, "Keep it \"safe\"");
    }

    let a = catalog.by_id("L5_C2_A2").unwrap();
    assert_eq!(a.title, "Risky L5_C2");
    assert_eq!(a.level_id, 5);
    assert_eq!(a.category_id, 2);
}

#[tokio::test]
async fn absent_cell_returns_empty() {
    let table = format!(
        "{HEADER}\nThe Hidden AI,AI is too Opaque,Professional Trust & Fairness Issues,d,s,a,e,b,f,c,g\n"
    );
    let catalog = load_catalog(&InlineSource::new("inline", table)).await.unwrap();
    assert_eq!(catalog.for_cell(3, 4).len(), 3);
    assert!(catalog.for_cell(1, 1).is_empty());
    assert!(catalog.for_cell(0, 9).is_empty());
}

#[tokio::test]
async fn out_of_range_cell_is_validation_error() {
    let catalog = load_catalog(&InlineSource::new("inline", full_table()))
        .await
        .unwrap();
    assert_eq!(catalog.actions_for(2, 4).unwrap().len(), 3);
    let err = catalog.actions_for(6, 1).unwrap_err();
    assert!(matches!(err, InsightsError::Validation { .. }));
    assert!(!err.is_retryable());
    assert!(err.to_string().contains("L6_C1"));
    assert!(catalog.actions_for(0, 3).is_err());
}

#[tokio::test]
async fn filters_and_groups() {
    let catalog = load_catalog(&InlineSource::new("inline", full_table()))
        .await
        .unwrap();
    assert_eq!(catalog.filter_by_reason(RootCause::TooOpaque).len(), 15);
    assert_eq!(
        catalog
            .filter_by_level(ConcernLevel::OrganizationalStability)
            .len(),
        15
    );
    assert_eq!(catalog.filter_by_flavor(Flavor::Risky).len(), 25);
    assert_eq!(catalog.group_by_reason().len(), 5);
    assert!(
        catalog
            .group_by_level()
            .values()
            .all(|actions| actions.len() == 15)
    );

    let hits = catalog.search("BOLD THING");
    assert_eq!(hits.len(), 25);
    assert!(catalog.search("no such text").is_empty());
}

#[tokio::test]
async fn concurrent_callers_share_one_fetch() {
    let calls = Arc::new(AtomicUsize::new(0));
    let loader = Arc::new(CatalogLoader::new(CountingSource {
        calls: Arc::clone(&calls),
        text: full_table(),
    }));
    assert!(!loader.is_loaded());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let loader = Arc::clone(&loader);
        handles.push(tokio::spawn(async move { loader.get_or_load().await }));
    }
    let mut catalogs = Vec::new();
    for h in handles {
        catalogs.push(h.await.unwrap().unwrap());
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(loader.is_loaded());
    for c in &catalogs[1..] {
        assert!(Arc::ptr_eq(&catalogs[0], c));
    }
}

#[tokio::test]
async fn failed_fetch_leaves_loader_retryable() {
    let loader = CatalogLoader::new(FlakySource {
        calls: AtomicUsize::new(0),
        failures: 1,
    });

    let err = loader.get_or_load().await.unwrap_err();
    assert!(err.is_retryable());
    assert!(!loader.is_loaded());
    assert!(loader.get().is_none());

    let catalog = loader.get_or_load().await.unwrap();
    assert_eq!(catalog.len(), 75);
    assert!(loader.is_loaded());
}

#[tokio::test]
async fn file_source_reads_table() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(full_table().as_bytes()).unwrap();

    let catalog = load_catalog(&FileSource::new(file.path())).await.unwrap();
    assert_eq!(catalog.len(), 75);

    let boxed = source_from_location(file.path().to_str().unwrap(), Duration::from_secs(1)).unwrap();
    let loader = CatalogLoader::from_boxed(boxed);
    assert_eq!(loader.get_or_load().await.unwrap().category_count(), 25);
}

#[tokio::test]
async fn missing_file_is_fetch_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_catalog(&FileSource::new(dir.path().join("absent.csv")))
        .await
        .unwrap_err();
    assert!(matches!(err, InsightsError::CatalogFetch { .. }));
}

#[tokio::test]
async fn http_source_fetches_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actions.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string(full_table()))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/actions.csv", server.uri());
    let loader = CatalogLoader::from_boxed(source_from_location(&url, Duration::from_secs(5)).unwrap());
    let first = loader.get_or_load().await.unwrap();
    let second = loader.get_or_load().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.for_cell(2, 4).len(), 3);
}

#[tokio::test]
async fn http_error_status_is_fetch_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actions.csv"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let source = HttpSource::new(format!("{}/actions.csv", server.uri()), Duration::from_secs(5)).unwrap();
    let loader = CatalogLoader::new(source);
    let err = loader.get_or_load().await.unwrap_err();
    assert!(err.is_retryable());
    assert!(!loader.is_loaded());
}
