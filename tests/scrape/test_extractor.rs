use fabstir_infographic::scrape::{extract_content, validate_url};
use fabstir_infographic::InfographicError;

fn blog_page() -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Ten Habits of Productive Gardeners</title>
    <meta name="description" content="Small routines that add up.">
    <meta property="og:description" content="Ignored because name=description exists">
    <meta property="article:published_time" content="2024-03-12">
    <script>window.analytics = {{ track: function() {{}} }};</script>
    <style>body {{ color: red; }}</style>
</head>
<body>
    <header><span class="author">Header Byline</span><nav>Home | About | Contact</nav></header>
    <aside class="sidebar">Popular posts you might like</aside>
    <div class="post-content">Short teaser.</div>
    <article>
        <h1>Ten Habits of Productive Gardeners</h1>
        <p>{}</p>
        <div class="ad">BUY SEEDS NOW</div>
        <p>Water early in the morning &amp; mulch often.</p>
        <form><input name="email"> Subscribe!</form>
    </article>
    <div class="comments">First!!! Great post</div>
    <footer>Copyright 2024</footer>
</body>
</html>"#,
        "Gardening rewards patience and steady attention. ".repeat(5)
    )
}

#[test]
fn test_realistic_blog_page() {
    let content = extract_content(&blog_page());

    assert_eq!(content.title, "Ten Habits of Productive Gardeners");
    assert_eq!(content.description.as_deref(), Some("Small routines that add up."));
    assert_eq!(content.date.as_deref(), Some("2024-03-12"));
    assert_eq!(content.author.as_deref(), Some("Header Byline"));

    assert!(content.content.starts_with("Ten Habits of Productive Gardeners"));
    assert!(content.content.contains("Gardening rewards patience"));
    assert!(content.content.contains("Water early in the morning"));
    assert!(content.is_sufficient(100));
}

#[test]
fn test_noise_never_reaches_content() {
    let content = extract_content(&blog_page());

    for noise in [
        "window.analytics",
        "color: red",
        "Home | About",
        "Popular posts",
        "BUY SEEDS",
        "Subscribe",
        "Great post",
        "Copyright",
        "&amp;",
    ] {
        assert!(
            !content.content.contains(noise),
            "content still contains {:?}: {}",
            noise,
            content.content
        );
    }
}

#[test]
fn test_content_is_single_spaced() {
    let content = extract_content(&blog_page());
    assert!(!content.content.contains("  "));
    assert!(!content.content.contains('\n'));
    assert_eq!(content.content.trim(), content.content);
}

#[test]
fn test_thin_page_is_insufficient() {
    let html = format!("<html><body><main>{}</main></body></html>", "a".repeat(50));
    let content = extract_content(&html);
    assert_eq!(content.content_chars(), 50);
    assert!(!content.is_sufficient(100));
}

#[test]
fn test_plain_body_fallback() {
    let html = "<html><body><p>Just a paragraph</p><p>and another one.</p></body></html>";
    let content = extract_content(html);
    assert_eq!(content.content, "Just a paragraph and another one.");
    assert_eq!(content.title, "");
}

#[test]
fn test_role_main_region() {
    let html = r#"<html><body><div role="main">Region marked as main by role.</div></body></html>"#;
    let content = extract_content(html);
    assert_eq!(content.content, "Region marked as main by role.");
}

#[test]
fn test_url_validation() {
    assert!(validate_url("https://blog.example/post").is_ok());
    assert!(validate_url("  http://blog.example  ").is_ok());
    assert!(matches!(validate_url("not a url"), Err(InfographicError::InvalidUrl(_))));
    assert!(matches!(validate_url("ftp://blog.example"), Err(InfographicError::InvalidUrl(_))));
}

#[test]
fn test_inline_formatting_keeps_words_whole() {
    let html = format!(
        "<html><body><article><h1>Con<em>current</em> Rust</h1>\
         <p>{}</p><p>Use <code>Arc</code><em>s</em> for sha<b>red</b> state.</p></article></body></html>",
        "Ownership makes sharing explicit. ".repeat(4)
    );
    let content = extract_content(&html);

    assert_eq!(content.title, "Concurrent Rust");
    assert!(content.content.starts_with("Concurrent Rust Ownership"));
    assert!(content.content.ends_with("Use Arcs for shared state."), "{}", content.content);
    assert!(!content.content.contains("sha red"));
}
