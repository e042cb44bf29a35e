use super::mock::{orchestrator, orchestrator_with_config, MockBackend, MockFetcher, RecordingHost};
use fabstir_infographic::orchestrator::state::LABEL_ADDED_TO_CANVAS;
use fabstir_infographic::orchestrator::{DirectoryHost, InfographicOrchestrator, OrchestratorConfig};
use fabstir_infographic::prompt::PromptSynthesizer;
use fabstir_infographic::InfographicError;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

async fn generated(
    fetcher: Arc<MockFetcher>,
    host: Arc<RecordingHost>,
) -> InfographicOrchestrator {
    let orchestrator = orchestrator(fetcher, Arc::new(MockBackend::with_images(1)), host);
    orchestrator.set_custom_prompt("Coffee consumption by country");
    orchestrator.generate().await.unwrap();
    orchestrator
}

#[tokio::test]
async fn test_add_to_canvas_inserts_downloaded_bytes() {
    let fetcher = Arc::new(MockFetcher::with_html(""));
    let host = Arc::new(RecordingHost::default());
    let orchestrator = generated(fetcher.clone(), host.clone()).await;

    orchestrator.add_to_canvas().await.unwrap();

    assert_eq!(fetcher.byte_calls.load(Ordering::SeqCst), 1);
    assert_eq!(host.inserted.lock().unwrap().len(), 1);
    assert_eq!(
        orchestrator.status().progress.as_deref(),
        Some(LABEL_ADDED_TO_CANVAS)
    );
}

#[tokio::test]
async fn test_confirmation_clears_after_delay() {
    let orchestrator = generated(
        Arc::new(MockFetcher::with_html("")),
        Arc::new(RecordingHost::default()),
    )
    .await;

    orchestrator.add_to_canvas().await.unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let status = orchestrator.status();
    assert!(status.progress.is_none());
    assert!(status.error.is_none());
    assert!(status.artifact.is_some());
}

#[tokio::test]
async fn test_host_failure_keeps_artifact() {
    let host = Arc::new(RecordingHost {
        fail: true,
        ..Default::default()
    });
    let orchestrator = generated(Arc::new(MockFetcher::with_html("")), host).await;
    let artifact = orchestrator.status().artifact;

    let err = orchestrator.add_to_canvas().await.unwrap_err();
    assert!(matches!(err, InfographicError::InsertionFailed(_)));

    let status = orchestrator.status();
    assert_eq!(status.error.as_deref(), Some("Failed to add image to canvas"));
    assert!(status.progress.is_none());
    assert_eq!(status.artifact, artifact);
}

#[tokio::test]
async fn test_download_failure_reports_insertion_error() {
    let fetcher = Arc::new(
        MockFetcher::with_html("").with_image_error(InfographicError::FetchFailed("Gone".to_string())),
    );
    let host = Arc::new(RecordingHost::default());
    let orchestrator = generated(fetcher, host.clone()).await;

    let err = orchestrator.add_to_canvas().await.unwrap_err();
    assert!(matches!(err, InfographicError::InsertionFailed(_)));
    assert!(host.inserted.lock().unwrap().is_empty());
    assert_eq!(
        orchestrator.status().error.as_deref(),
        Some("Failed to add image to canvas")
    );
}

#[tokio::test]
async fn test_add_to_canvas_requires_artifact() {
    let orchestrator = orchestrator(
        Arc::new(MockFetcher::with_html("")),
        Arc::new(MockBackend::with_images(1)),
        Arc::default(),
    );
    assert_eq!(orchestrator.add_to_canvas().await, Err(InfographicError::NoArtifact));
    assert!(orchestrator.status().progress.is_none());
}

#[tokio::test]
async fn test_directory_host_saves_generated_image() {
    let dir = tempfile::tempdir().unwrap();
    let host = Arc::new(DirectoryHost::new(dir.path()));
    let orchestrator = InfographicOrchestrator::new(
        Arc::new(MockFetcher::with_html("")),
        Arc::new(MockBackend::with_images(1)),
        host.clone(),
        PromptSynthesizer::default(),
        OrchestratorConfig::default(),
    );
    orchestrator.set_custom_prompt("Rainfall by month");
    orchestrator.generate().await.unwrap();

    orchestrator.add_to_canvas().await.unwrap();

    let path = host.last_written().unwrap();
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("png"));
    assert!(path.exists());
}

#[tokio::test]
async fn test_repeated_add_keeps_latest_confirmation() {
    let orchestrator = orchestrator_with_config(
        Arc::new(MockFetcher::with_html("")),
        Arc::new(MockBackend::with_images(1)),
        Arc::default(),
        OrchestratorConfig {
            canvas_notice_ms: 200,
            ..Default::default()
        },
    );
    orchestrator.set_custom_prompt("Solar output by season");
    orchestrator.generate().await.unwrap();

    orchestrator.add_to_canvas().await.unwrap();
    tokio::time::sleep(Duration::from_millis(120)).await;
    orchestrator.add_to_canvas().await.unwrap();

    // first timer fires here, second confirmation is only 120ms old
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert_eq!(
        orchestrator.status().progress.as_deref(),
        Some(LABEL_ADDED_TO_CANVAS)
    );

    tokio::time::sleep(Duration::from_millis(200)).await;
    let status = orchestrator.status();
    assert!(status.progress.is_none());
    assert!(status.artifact.is_some());
}
