mod common;

use common::fixtures::*;
use common::{TestResult, first_element, json_context, render_html, renderer_with, squash};
use faintly::{Context, Resolver, TemplateError, Value, template_id};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// Directive pipeline
// ============================================================================

#[tokio::test]
async fn test_repeat_with_unwrapped_content() -> TestResult {
    let (renderer, _) = renderer_with(&[(
        "/blocks/list/list.html",
        r#"<template><div data-fly-repeat.item="list" data-fly-unwrap><span data-fly-content="item"></span></div></template>"#,
    )]);
    let context = json_context(json!({"blockName": "list", "list": ["a", "b", "c"]}));

    let html = render_html(&renderer, context).await?;
    assert_eq!(html, "<span>a</span><span>b</span><span>c</span>");
    Ok(())
}

#[tokio::test]
async fn test_repeat_without_unwrap_keeps_clones() -> TestResult {
    let (renderer, _) = renderer_with(&[(
        "/blocks/list/list.html",
        r#"<template><div data-fly-repeat.item="list"><span data-fly-content="item"></span></div></template>"#,
    )]);
    let context = json_context(json!({"blockName": "list", "list": ["a", "b", "c"]}));

    let html = render_html(&renderer, context).await?;
    assert_eq!(
        html,
        "<div><span>a</span></div><div><span>b</span></div><div><span>c</span></div>"
    );
    Ok(())
}

#[tokio::test]
async fn test_cards_block_with_named_fragment() -> TestResult {
    let (renderer, source) = renderer_with(&[(CARDS_PATH, CARDS_TEMPLATE)]);
    let context = json_context(json!({
        "blockName": "cards",
        "cards": [
            {"title": "A", "text": "a", "image": "/a.png", "variant": "wide"},
            {"title": "B", "text": "b"}
        ]
    }));

    let html = render_html(&renderer, context).await?;
    assert_eq!(
        squash(&html),
        concat!(
            r#"<ul><li class="card wide"><div class="card-image"><img src="/a.png" alt="A"></div>"#,
            r#"<div class="card-body"><h3>A</h3><p>a</p></div></li>"#,
            r#"<li class="card "><div class="card-body"><h3>B</h3><p>b</p></div></li></ul>"#,
        )
    );
    assert_eq!(source.fetch_count(CARDS_PATH), 1);
    Ok(())
}

#[tokio::test]
async fn test_cards_block_without_cards() -> TestResult {
    let (renderer, _) = renderer_with(&[(CARDS_PATH, CARDS_TEMPLATE)]);
    let html = render_html(&renderer, json_context(json!({"blockName": "cards"}))).await?;
    assert_eq!(squash(&html), "<p>No cards yet</p>");
    Ok(())
}

#[tokio::test]
async fn test_real_world_markup_survives_rendering() -> TestResult {
    let (renderer, _) = renderer_with(&[(
        "/blocks/legal/legal.html",
        concat!(
            "<template><section class=legal data-fly-test=show>",
            "<h2>Terms & Conditions</h2><p>Caf&eacute; &euro;${price}</p>",
            "<script>if (a < b && ready) { go(); }</script>",
            "<style>section > h2 { margin: 0 }</style>",
            "</section></template>",
        ),
    )]);
    let context = json_context(json!({"blockName": "legal", "show": true, "price": "5"}));

    let html = render_html(&renderer, context).await?;
    assert_eq!(
        html,
        concat!(
            r#"<section class="legal"><h2>Terms &amp; Conditions</h2><p>Café €5</p>"#,
            "<script>if (a < b && ready) { go(); }</script>",
            "<style>section > h2 { margin: 0 }</style></section>",
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_shared_fragments_are_fetched_once() -> TestResult {
    let (renderer, source) = renderer_with(&[
        (
            "/blocks/tags/tags.html",
            r#"<template><b data-fly-repeat="tags" data-fly-include="/shared/parts.html#badge" data-fly-unwrap></b><i data-fly-include="/shared/parts.html#link"></i></template>"#,
        ),
        (SHARED_PATH, SHARED_TEMPLATE),
    ]);
    let context = json_context(json!({
        "blockName": "tags",
        "label": "tag",
        "tags": [1, 2, 3],
        "link": {"href": "/docs", "text": "Docs", "attrs": {"target": "_blank", "href": "/override"}}
    }));

    let html = render_html(&renderer, context).await?;
    assert_eq!(
        html,
        concat!(
            r#"<span class="badge">tag</span><span class="badge">tag</span><span class="badge">tag</span>"#,
            r#"<i><a href="/override" target="_blank">Docs</a></i>"#,
        )
    );
    assert_eq!(source.fetch_count(SHARED_PATH), 1);
    assert!(
        renderer
            .cache()
            .get(&template_id(SHARED_PATH, "link"))?
            .is_some()
    );
    Ok(())
}

#[tokio::test]
async fn test_include_inherits_scope_but_not_back() -> TestResult {
    let (renderer, _) = renderer_with(&[(
        "/blocks/nav/nav.html",
        r#"<template><nav data-fly-include="item"></nav><em>${inner}</em></template>
           <template data-fly-name="item"><span data-fly-test.inner="label">${label}</span></template>"#,
    )]);
    let context = json_context(json!({"blockName": "nav", "label": "Home"}));

    let html = render_html(&renderer, context).await?;
    assert_eq!(html, "<nav><span>Home</span></nav><em></em>");
    Ok(())
}

#[tokio::test]
async fn test_self_include_hits_depth_limit() {
    common::init_logger();
    let source = Arc::new(faintly::InMemoryTemplateSource::new().with_template(
        "/blocks/loop/loop.html",
        r#"<template><div data-fly-include="/blocks/loop/loop.html#"></div></template>"#,
    ));
    let renderer = faintly::Renderer::builder()
        .with_source(source)
        .with_max_include_depth(8)
        .build()
        .unwrap();

    let result = renderer
        .render(Context::new().with("blockName", "loop"))
        .await;
    assert!(matches!(result, Err(TemplateError::IncludeDepthExceeded(8))));
}

// ============================================================================
// Blocks
// ============================================================================

#[tokio::test]
async fn test_render_block_wraps_loose_cell_text() -> TestResult {
    let (renderer, _) = renderer_with(&[(HERO_PATH, HERO_TEMPLATE)]);
    let mut block = first_element(
        r#"<div class="hero" data-block-name="hero"><div><div><h1>Authored</h1></div></div></div>"#,
    );

    renderer
        .render_block(&mut block, json_context(json!({"heading": "Welcome"})))
        .await?;
    assert_eq!(
        block.to_html(),
        concat!(
            r#"<div class="hero" data-block-name="hero">"#,
            r#"<div><div><p>Welcome</p></div></div>"#,
            r#"<div><div><h1>Authored</h1></div></div></div>"#,
        )
    );
    Ok(())
}

#[tokio::test]
async fn test_render_block_uses_code_base_path() -> TestResult {
    let source = Arc::new(
        faintly::InMemoryTemplateSource::new()
            .with_template("/site/blocks/hero/hero.html", "<template>${blockName}</template>"),
    );
    let renderer = faintly::Renderer::builder()
        .with_source(source.clone())
        .with_code_base_path("/site")
        .build()?;

    let mut block = first_element(r#"<div data-block-name="hero"></div>"#);
    renderer.render_block(&mut block, Context::new()).await?;
    assert_eq!(block.to_html(), r#"<div data-block-name="hero">hero</div>"#);

    // An explicit codeBasePath in the context wins over the configured one.
    let mut block = first_element(r#"<div data-block-name="hero"></div>"#);
    let result = renderer
        .render_block(&mut block, Context::new().with("codeBasePath", "/other"))
        .await;
    assert!(matches!(result, Err(TemplateError::Fetch { ref path, .. }) if path == "/other/blocks/hero/hero.html"));
    Ok(())
}

// ============================================================================
// Resolvers and concurrency
// ============================================================================

#[tokio::test]
async fn test_lazy_resolvers_in_repeat() -> TestResult {
    let (renderer, _) = renderer_with(&[(
        "/blocks/feed/feed.html",
        r#"<template><p data-fly-repeat.post="posts" data-fly-unwrap>${post.title}:${post.author.name};</p></template>"#,
    )]);

    let lookups = Arc::new(AtomicUsize::new(0));
    let counter = lookups.clone();
    let author = Resolver::new(move |inv| {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            let id = inv.receiver.member("authorId").unwrap_or_default();
            let author: Value = [("name", Value::from(format!("user{}", id)))]
                .into_iter()
                .collect();
            author
        }
    });
    let posts: Vec<Value> = (1..=3)
        .map(|i| {
            [
                ("title", Value::from(format!("Post {}", i))),
                ("authorId", Value::from(i * 10)),
                ("author", Value::from(author.clone())),
            ]
            .into_iter()
            .collect()
        })
        .collect();
    let context = Context::new().with("blockName", "feed").with("posts", posts);

    let html = render_html(&renderer, context).await?;
    assert_eq!(html, "Post 1:user10;Post 2:user20;Post 3:user30;");
    assert_eq!(lookups.load(Ordering::SeqCst), 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_renders_share_one_fetch() -> TestResult {
    let (renderer, source) = renderer_with(&[(CARDS_PATH, CARDS_TEMPLATE)]);

    let renders: Vec<_> = (0..16).map(|i| {
        let renderer = renderer.clone();
        tokio::spawn(async move {
            let context = json_context(json!({
                "blockName": "cards",
                "cards": [{"title": format!("T{}", i), "text": "x"}]
            }));
            render_html(&renderer, context).await
        })
    })
    .collect();
    for (i, handle) in renders.into_iter().enumerate() {
        let html = handle.await??;
        assert!(html.contains(&format!("<h3>T{}</h3>", i)));
    }
    assert_eq!(source.fetch_count(CARDS_PATH), 1);
    Ok(())
}
