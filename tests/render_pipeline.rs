use steempro_renderer::{render, render_full, RenderOptions};

fn opts() -> RenderOptions {
    let _ = env_logger::builder().is_test(true).try_init();
    RenderOptions::default()
}

#[test]
fn test_plain_paragraph() {
    let out = render_full("Hello world", &opts());
    assert_eq!(out.html, "<p>Hello world</p>");
    assert!(out.errors.is_empty());
}

#[test]
fn test_markdown_formatting_end_to_end() {
    let out = render("# Title\n\nsome *emphasis* and `code`", &opts());
    assert!(out.contains("<h1>Title</h1>"));
    assert!(out.contains("<em>emphasis</em>"));
    assert!(out.contains("<code>code</code>"));
}

#[test]
fn test_script_variants_never_survive() {
    let bodies = [
        "<script>alert(1)</script>",
        "<SCRIPT>alert(1)</SCRIPT>",
        "< script >alert(1)</script>",
        "text <ScRiPt src=\"https://evil.example/x.js\"></ScRiPt> more",
        "<html><p>hi</p><script>alert(1)</script></html>",
    ];
    for body in bodies {
        let out = render(body, &opts());
        assert!(
            !out.to_ascii_lowercase().contains("<script"),
            "script survived for input: {body}"
        );
    }
}

#[test]
fn test_javascript_scheme_never_survives() {
    let out = render(
        r#"<html><p><a href="javascript:alert(1)">click</a></p></html>"#,
        &opts(),
    );
    assert!(!out.contains("javascript:"));
}

#[test]
fn test_external_link_is_marked() {
    let out = render("go to https://example.com/page now", &opts());
    assert!(out.contains(r#"target="_blank""#));
    assert!(out.contains("noopener"));
}

#[test]
fn test_protocol_relative_link_is_marked_external() {
    let out = render(
        r#"<html><p><a href="//evil.example/x">click</a></p></html>"#,
        &opts(),
    );
    assert!(out.contains(r#"href="https://evil.example/x""#));
    assert!(out.contains(r#"target="_blank""#));
    assert!(out.contains("noopener"));
}

#[test]
fn test_protocol_relative_link_is_checked_for_phishing() {
    let out = render(
        r#"<html><p><a href="//evil.example/x">steemit.com</a></p></html>"#,
        &opts(),
    );
    assert!(!out.contains("<a "));
    assert!(out.contains(r#"<div class="phishy""#));
}

#[test]
fn test_mention_round_trip() {
    let out = render("hello @validuser world", &opts());
    assert_eq!(out.matches("<a ").count(), 1);
    assert!(out.contains(r#"href="/@validuser""#));
    assert!(out.contains("@validuser</a>"));

    let out = render("hello @1invalid world", &opts());
    assert!(!out.contains("<a "));
    assert!(out.contains("@1invalid"));
}

#[test]
fn test_hashtag_rules() {
    let out = render("rated #123 stars", &opts());
    assert!(!out.contains("<a "));

    let out = render("posting on #steem", &opts());
    assert!(out.contains(r#"href="/trending/steem""#));
}

#[test]
fn test_youtube_embed_determinism() {
    let surroundings = [
        "watch {} now",
        "{}",
        "first line\n\n{} trailing",
    ];
    for pattern in surroundings {
        let body = pattern.replace("{}", "https://youtu.be/dQw4w9WgXcQ?t=30s");
        let out = render(&body, &opts());
        assert!(
            out.contains("youtube.com/embed/dQw4w9WgXcQ"),
            "embed missing for body: {body}"
        );
        assert!(out.contains("start=30"), "start lost for body: {body}");
    }
}

#[test]
fn test_no_image_mode() {
    let out = render(
        "look ![cat](https://example.com/cat.jpg)",
        &RenderOptions {
            no_image: true,
            ..RenderOptions::default()
        },
    );
    assert!(!out.contains("<img"));
    assert!(out.contains("(Image not shown due to low ratings)"));
}

#[test]
fn test_hide_images_mode() {
    let out = render(
        "![cat](https://example.com/cat.jpg)",
        &RenderOptions {
            hide_images: true,
            ..RenderOptions::default()
        },
    );
    assert!(!out.contains("<img"));
    assert!(out.contains(r#"<pre class="image-url-only">"#));
    assert!(out.contains("https://example.com/cat.jpg"));
}

#[test]
fn test_images_are_proxied() {
    let out = render("![cat](https://example.com/cat.jpg)", &opts());
    assert!(out.contains("https://steemitimages.com/640x0/https://example.com/cat.jpg"));
}

#[test]
fn test_phishing_link_is_downgraded() {
    let out = render(
        r#"<html><p><a href="http://evil.example/steemit.com">steemit.com</a></p></html>"#,
        &opts(),
    );
    assert!(!out.contains("<a "));
    assert!(out.contains(r#"<div class="phishy""#));
    assert!(out.contains("evil.example"));
}

#[test]
fn test_internal_post_link_is_relative() {
    let out = render("see https://steemit.com/life/@alice/my-post", &opts());
    assert!(out.contains(r#"href="/life/@alice/my-post""#));
    assert!(out.contains("@alice/my-post</a>"));
    assert!(!out.contains("_blank"));
}

#[test]
fn test_iframe_from_unknown_host_is_rejected() {
    let out = render_full(
        r#"<html><iframe src="https://evil.example/player"></iframe></html>"#,
        &opts(),
    );
    assert!(!out.html.contains("<iframe"));
    assert!(out.html.contains("(Unsupported"));
    assert_eq!(out.errors.len(), 1);
}

#[test]
fn test_allowed_iframe_is_wrapped_and_sized() {
    let out = render(
        r#"<html><iframe src="https://player.vimeo.com/video/1234"></iframe></html>"#,
        &opts(),
    );
    assert!(out.contains(r#"<div class="videoWrapper">"#));
    assert!(out.contains(r#"width="640""#));
}

#[test]
fn test_spoiler_renders_details() {
    let out = render(">! [Ending] the butler did it", &opts());
    assert!(out.contains("<details>"));
    assert!(out.contains("<summary>Ending</summary>"));
    assert!(out.contains("the butler did it"));
}

#[test]
fn test_traversal_state_collects_metadata() {
    let body = "by @validuser on #steem with https://example.com/x and \
                https://youtu.be/dQw4w9WgXcQ";
    let out = render_full(body, &opts());
    assert!(out.state.usertags.contains("validuser"));
    assert!(out.state.hashtags.contains("steem"));
    assert!(out.state.links.contains("https://example.com/x"));
    assert!(out
        .state
        .images
        .contains("https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg"));
}

#[test]
fn test_embed_token_in_code_span_is_not_expanded() {
    let out = render("write `~~~ embed:dQw4w9WgXcQ youtube ~~~` to embed", &opts());
    assert!(!out.contains("<iframe"));
    assert!(out.contains("<code>~~~ embed:dQw4w9WgXcQ youtube ~~~</code>"));
}

#[test]
fn test_html_comment_is_stripped() {
    let out = render("before <!-- hidden --> after", &opts());
    assert!(!out.contains("hidden"));
}

#[test]
fn test_table_markdown_with_cell_alignment() {
    let out = render("| a | b |\n|:--|--:|\n| 1 | 2 |", &opts());
    assert!(out.contains("<table>"));
    assert!(out.contains("text-align: left") || out.contains("<td>1</td>"));
}

#[test]
fn test_breaks_follow_option() {
    let body = "one\ntwo";
    assert!(render(body, &opts()).contains("<br"));
    let no_breaks = render(
        body,
        &RenderOptions {
            breaks: false,
            ..RenderOptions::default()
        },
    );
    assert!(!no_breaks.contains("<br"));
}
