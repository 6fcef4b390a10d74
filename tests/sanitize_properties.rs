use proptest::prelude::*;

use steempro_renderer::sanitize::sanitize_html;
use steempro_renderer::{render, RenderOptions};

/// Fragments built only from allow-listed tags and attributes.
fn allowed_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,20}",
        "[a-zA-Z0-9 ]{0,12}".prop_map(|s| format!("<p>{s}</p>")),
        "[a-z0-9]{1,10}".prop_map(|s| format!("<strong>{s}</strong>")),
        "[a-z0-9]{1,10}".prop_map(|s| format!("<blockquote>{s}</blockquote>")),
        "[a-z0-9]{1,10}"
            .prop_map(|s| format!(r#"<a href="https://example.com/{s}">{s}</a>"#)),
        "[a-z0-9]{1,8}".prop_map(|s| format!(r#"<div class="pull-left">{s}</div>"#)),
        Just(r#"<img src="https://example.com/a.png" alt="a">"#.to_string()),
        Just("<hr>".to_string()),
    ]
}

proptest! {
    #[test]
    fn test_sanitize_is_idempotent(frags in proptest::collection::vec(allowed_fragment(), 0..6)) {
        let html = format!("<html>{}</html>", frags.concat());
        let opts = RenderOptions::default();
        let once = sanitize_html(&html, &opts);
        let twice = sanitize_html(&once.html, &opts);
        prop_assert_eq!(once.html, twice.html);
    }

    #[test]
    fn test_no_script_survives_render(body in ".{0,120}", lead in "[a-z ]{0,10}") {
        let input = format!("{lead}<script>{body}</script>");
        let out = render(&input, &RenderOptions::default());
        prop_assert!(!out.to_ascii_lowercase().contains("<script"));
    }

    #[test]
    fn test_disallowed_schemes_never_survive(path in "[a-z0-9/]{0,12}") {
        let input = format!(
            r#"<html><p><a href="javascript:{path}">x</a><img src="data:{path}"></p></html>"#
        );
        let out = render(&input, &RenderOptions::default());
        prop_assert!(!out.contains("javascript:"));
        prop_assert!(!out.contains("data:"));
    }

    #[test]
    fn test_no_image_mode_never_emits_img(url in "https://[a-z]{3,8}\\.com/[a-z]{1,8}\\.png") {
        let input = format!("![x]({url})");
        let out = render(
            &input,
            &RenderOptions { no_image: true, ..RenderOptions::default() },
        );
        prop_assert!(!out.contains("<img"));
        prop_assert!(out.contains("(Image not shown due to low ratings)"));
    }
}
