use super::mock::{article_html, orchestrator, MockBackend, MockFetcher, RecordingHost, IMAGE_URL};
use fabstir_infographic::generation::{ImageQuality, ImageSize};
use fabstir_infographic::orchestrator::state::LABEL_GENERATING;
use fabstir_infographic::orchestrator::{GenerationInputs, OrchestrationState};
use fabstir_infographic::InfographicError;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

const BLOG_URL: &str = "https://blog.example/posts/solar";

fn long_body() -> String {
    "Solar power keeps getting cheaper every single year. ".repeat(5)
}

#[tokio::test]
async fn test_scraped_generation_succeeds() {
    let fetcher = Arc::new(MockFetcher::with_html(article_html("Solar Basics", &long_body())));
    let backend = Arc::new(MockBackend::with_images(1));
    let orchestrator = orchestrator(fetcher.clone(), backend.clone(), Arc::default());

    orchestrator.set_url(BLOG_URL);
    orchestrator.set_size(ImageSize::Landscape);
    orchestrator.set_quality(ImageQuality::Low);

    let artifact = assert_ok!(orchestrator.generate().await);
    assert_eq!(artifact.url, IMAGE_URL);
    assert_eq!(artifact.title, "Solar Basics");
    assert_eq!(artifact.source_url, BLOG_URL);

    let request = backend.last_request().unwrap();
    assert!(request.prompt.contains("Title: Solar Basics"));
    assert!(request.prompt.contains("Solar power keeps getting cheaper"));
    assert_eq!(request.image_size, ImageSize::Landscape);
    assert_eq!(request.quality, ImageQuality::Low);
    assert_eq!(request.num_images, 1);

    let status = orchestrator.status();
    assert_eq!(status.artifact, Some(artifact));
    assert!(status.progress.is_none());
    assert!(status.error.is_none());
    assert_eq!(fetcher.html_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_custom_prompt_only_skips_scraping() {
    let fetcher = Arc::new(MockFetcher::with_html(""));
    let backend = Arc::new(MockBackend::with_images(1));
    let orchestrator = orchestrator(fetcher.clone(), backend.clone(), Arc::default());

    orchestrator.set_custom_prompt("Explain compound interest with bar charts");

    let artifact = orchestrator.generate().await.unwrap();
    assert_eq!(artifact.title, "Custom Infographic");
    assert_eq!(artifact.source_url, "Custom Prompt");
    assert_eq!(fetcher.html_calls.load(Ordering::SeqCst), 0);

    let prompt = backend.last_request().unwrap().prompt;
    assert!(prompt.contains("Based on user-provided instructions."));
    assert!(prompt.contains("Explain compound interest with bar charts"));
}

#[tokio::test]
async fn test_insufficient_content_stops_before_backend() {
    let fetcher = Arc::new(MockFetcher::with_html(article_html("Thin", &"x".repeat(50))));
    let backend = Arc::new(MockBackend::with_images(1));
    let orchestrator = orchestrator(fetcher, backend.clone(), Arc::default());

    orchestrator.set_url(BLOG_URL);

    let err = assert_err!(orchestrator.generate().await);
    assert_eq!(
        err,
        InfographicError::InsufficientContent {
            found: 50,
            required: 100
        }
    );
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);

    let status = orchestrator.status();
    assert_eq!(
        status.error.as_deref(),
        Some("Unable to extract sufficient content from the URL")
    );
    assert!(status.progress.is_none());
    assert!(status.artifact.is_none());
}

#[tokio::test]
async fn test_empty_input_is_rejected_without_side_effects() {
    let fetcher = Arc::new(MockFetcher::with_html(""));
    let backend = Arc::new(MockBackend::with_images(1));
    let orchestrator = orchestrator(fetcher.clone(), backend.clone(), Arc::default());

    orchestrator.set_url("   ");
    orchestrator.set_custom_prompt("\n\t");

    assert_eq!(orchestrator.generate().await, Err(InfographicError::EmptyInput));
    assert_eq!(fetcher.html_calls.load(Ordering::SeqCst), 0);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    assert_eq!(
        orchestrator.status().error.as_deref(),
        Some("Please enter a blog URL or custom prompt")
    );
}

#[tokio::test]
async fn test_zero_images_is_a_failure() {
    let backend = Arc::new(MockBackend::with_images(0));
    let orchestrator = orchestrator(Arc::new(MockFetcher::with_html("")), backend, Arc::default());
    orchestrator.set_custom_prompt("Anything");

    let err = orchestrator.generate().await.unwrap_err();
    assert_eq!(err, InfographicError::BackendError("No image generated".to_string()));
    assert_eq!(
        orchestrator.state(),
        OrchestrationState::Failed("No image generated".to_string())
    );
}

#[tokio::test]
async fn test_only_first_image_is_used() {
    let backend = Arc::new(MockBackend::with_images(3));
    let orchestrator = orchestrator(Arc::new(MockFetcher::with_html("")), backend, Arc::default());
    orchestrator.set_custom_prompt("Anything");

    assert_eq!(orchestrator.generate().await.unwrap().url, IMAGE_URL);
}

#[tokio::test]
async fn test_blank_backend_message_uses_generic_text() {
    let backend = Arc::new(MockBackend::failing(InfographicError::BackendError(String::new())));
    let orchestrator = orchestrator(Arc::new(MockFetcher::with_html("")), backend, Arc::default());
    orchestrator.set_custom_prompt("Anything");

    assert!(orchestrator.generate().await.is_err());
    assert_eq!(
        orchestrator.status().error.as_deref(),
        Some("Failed to generate infographic")
    );
}

#[tokio::test]
async fn test_fetch_failure_surfaces_status_text() {
    let fetcher = Arc::new(MockFetcher::failing(InfographicError::FetchFailed(
        "Not Found".to_string(),
    )));
    let backend = Arc::new(MockBackend::with_images(1));
    let orchestrator = orchestrator(fetcher, backend.clone(), Arc::default());
    orchestrator.set_url(BLOG_URL);

    assert!(orchestrator.generate().await.is_err());
    assert_eq!(
        orchestrator.status().error.as_deref(),
        Some("Failed to fetch content: Not Found")
    );
    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_retry_after_failure_clears_error() {
    let fetcher = Arc::new(MockFetcher::with_html(""));
    let backend = Arc::new(MockBackend::with_images(1));
    let orchestrator = orchestrator(fetcher, backend, Arc::default());

    assert!(orchestrator.generate().await.is_err());
    assert!(orchestrator.status().error.is_some());

    orchestrator.set_custom_prompt("Second attempt");
    assert!(orchestrator.generate().await.is_ok());
    let status = orchestrator.status();
    assert!(status.error.is_none());
    assert!(status.artifact.is_some());
}

#[tokio::test]
async fn test_reset_restores_defaults() {
    let backend = Arc::new(MockBackend::with_images(1));
    let orchestrator = orchestrator(Arc::new(MockFetcher::with_html("")), backend, Arc::default());

    orchestrator.set_custom_prompt("Anything");
    orchestrator.set_size(ImageSize::Square);
    orchestrator.set_quality(ImageQuality::Medium);
    orchestrator.generate().await.unwrap();

    assert_ok!(orchestrator.reset());

    assert_eq!(orchestrator.state(), OrchestrationState::Idle);
    assert_eq!(orchestrator.inputs(), GenerationInputs::default());
    assert_eq!(orchestrator.inputs().size.as_str(), "1024x1536");
    assert_eq!(orchestrator.inputs().quality.as_str(), "high");
    let status = orchestrator.status();
    assert!(status.progress.is_none() && status.error.is_none() && status.artifact.is_none());
}

#[tokio::test]
async fn test_concurrent_generate_is_rejected() {
    let (backend, gate) = MockBackend::with_images(1).gated();
    let backend = Arc::new(backend);
    let orchestrator = Arc::new(orchestrator(
        Arc::new(MockFetcher::with_html("")),
        backend.clone(),
        Arc::default(),
    ));
    orchestrator.set_custom_prompt("Slow one");

    let first = {
        let orchestrator = orchestrator.clone();
        tokio::spawn(async move { orchestrator.generate().await })
    };
    backend.started.notified().await;

    assert!(orchestrator.is_running());
    assert_eq!(orchestrator.status().progress.as_deref(), Some(LABEL_GENERATING));

    assert_eq!(
        orchestrator.generate().await,
        Err(InfographicError::GenerationInProgress)
    );
    assert_eq!(orchestrator.reset(), Err(InfographicError::GenerationInProgress));
    assert!(orchestrator.is_running());
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);

    gate.notify_one();
    let artifact = first.await.unwrap().unwrap();
    assert_eq!(artifact.url, IMAGE_URL);
    assert!(!orchestrator.is_running());
}

#[tokio::test]
async fn test_dropped_generation_does_not_stay_running() {
    let (backend, gate) = MockBackend::with_images(1).gated();
    let backend = Arc::new(backend);
    let orchestrator = orchestrator(Arc::new(MockFetcher::with_html("")), backend.clone(), Arc::default());
    orchestrator.set_custom_prompt("Never finishes");

    let timed_out = tokio::time::timeout(Duration::from_millis(50), orchestrator.generate()).await;
    assert!(timed_out.is_err());

    assert!(!orchestrator.is_running());
    assert_eq!(
        orchestrator.state(),
        OrchestrationState::Failed("Failed to generate infographic".to_string())
    );
    assert!(orchestrator.status().progress.is_none());

    assert_ok!(orchestrator.reset());
    orchestrator.set_custom_prompt("Second try");
    gate.notify_one();
    let artifact = assert_ok!(orchestrator.generate().await);
    assert_eq!(artifact.url, IMAGE_URL);
    assert_eq!(backend.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_empty_input_after_success_keeps_artifact() {
    let backend = Arc::new(MockBackend::with_images(1));
    let orchestrator = orchestrator(Arc::new(MockFetcher::with_html("")), backend.clone(), Arc::default());
    orchestrator.set_custom_prompt("Bike lanes per city");
    let artifact = orchestrator.generate().await.unwrap();

    orchestrator.set_custom_prompt("  ");
    assert_err!(orchestrator.generate().await);

    let status = orchestrator.status();
    assert_eq!(status.error.as_deref(), Some("Please enter a blog URL or custom prompt"));
    assert!(status.progress.is_none());
    assert_eq!(status.artifact, Some(artifact));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}
