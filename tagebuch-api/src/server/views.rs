//! HTML rendering for the blog UI.
//!
//! Pages are assembled with `format!` over a shared layout; there is no
//! template engine. User text is entity-escaped wherever it is interpolated
//! into markup, with one exception: the post body is sanitized on the way in
//! and rendered as-is so formatting markup survives.

use crate::server::sanitize;
use tagebuch_common::model::post::Post;
use time::{OffsetDateTime, macros::format_description};

const STYLE: &str = "
body { max-width: 46rem; margin: 0 auto; padding: 0 1rem; color: #222;
       font-family: Georgia, 'Times New Roman', serif; line-height: 1.6; }
nav { display: flex; justify-content: space-between; padding: 1rem 0;
      border-bottom: 1px solid #ddd; font-family: sans-serif; }
nav a { color: #357edd; text-decoration: none; }
article { margin: 2rem 0; }
article img { max-width: 100%; }
.created { color: #777; font-size: 0.9rem; }
.actions { display: flex; gap: 1rem; align-items: center; margin-top: 1rem; }
label { display: block; margin: 1rem 0; font-family: sans-serif; }
input, textarea { display: block; width: 100%; padding: 0.4rem;
                  border: 1px solid #ccc; font: inherit; }
button { padding: 0.4rem 1rem; border: none; background: #357edd;
         color: white; cursor: pointer; }
.actions button { background: #e7040f; }
";

fn layout(title: &str, main: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{title} | Tagebuch</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href=\"/posts\">Tagebuch</a> <a href=\"/posts/new\">New Post</a></nav>
<main>
{main}</main>
</body>
</html>
",
        title = escape(title),
    )
}

pub(crate) fn index(posts: &[Post]) -> String {
    let entries: String = posts
        .iter()
        .map(|post| {
            format!(
                "<article>
<h2><a href=\"/posts/{id}\">{title}</a></h2>
<p class=\"created\">{created}</p>
{image}<div class=\"body\">{snippet}</div>
<a href=\"/posts/{id}\">Read more</a>
</article>
",
                id = post.id,
                title = escape(&post.content.title),
                created = format_created(post.created),
                image = image_tag(&post.content.image),
                snippet = snippet(&post.content.body),
            )
        })
        .collect();

    let main = if entries.is_empty() {
        "<p>No posts yet. <a href=\"/posts/new\">Write the first one.</a></p>\n".to_owned()
    } else {
        entries
    };
    layout("All posts", &main)
}

pub(crate) fn show(post: &Post) -> String {
    let main = format!(
        "<article>
<h1>{title}</h1>
<p class=\"created\">{created}</p>
{image}<div class=\"body\">{body}</div>
<div class=\"actions\">
<a href=\"/posts/{id}/edit\">Edit</a>
<form method=\"post\" action=\"/posts/{id}?_method=DELETE\">
<button type=\"submit\">Delete</button>
</form>
</div>
</article>
",
        title = escape(&post.content.title),
        created = format_created(post.created),
        image = image_tag(&post.content.image),
        body = post.content.body,
        id = post.id,
    );
    layout(&post.content.title, &main)
}

pub(crate) fn new_form() -> String {
    layout("New post", &post_form("/posts", "Create", "", "", ""))
}

pub(crate) fn edit_form(post: &Post) -> String {
    let action = format!("/posts/{}?_method=PUT", post.id);
    layout(
        "Edit post",
        &post_form(
            &action,
            "Update",
            &post.content.title,
            &post.content.image,
            &post.content.body,
        ),
    )
}

pub(crate) fn not_found() -> String {
    layout(
        "Not found",
        "<p>Nothing here. <a href=\"/posts\">Back to all posts.</a></p>\n",
    )
}

fn post_form(action: &str, submit: &str, title: &str, image: &str, body: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">
<label>Title
<input type=\"text\" name=\"post[title]\" value=\"{title}\">
</label>
<label>Image URL
<input type=\"text\" name=\"post[image]\" value=\"{image}\">
</label>
<label>Body
<textarea name=\"post[body]\" rows=\"10\">{body}</textarea>
</label>
<button type=\"submit\">{submit}</button>
</form>
",
        action = escape(action),
        title = escape(title),
        image = escape(image),
        body = escape(body),
    )
}

fn image_tag(image: &str) -> String {
    if image.is_empty() {
        String::new()
    } else {
        format!("<img src=\"{}\" alt=\"\">\n", escape(image))
    }
}

fn snippet(body: &str) -> String {
    const LIMIT: usize = 160;

    let mut chars = body.chars();
    let cut: String = chars.by_ref().take(LIMIT).collect();
    if chars.next().is_none() {
        return cut;
    }

    // The cut can land inside a tag or attribute; re-cleaning closes what
    // the cut left open and drops partial tags, keeping the listing balanced.
    format!("{}\u{2026}", sanitize::clean(&cut))
}

fn format_created(created: OffsetDateTime) -> String {
    created
        .format(format_description!(
            "[month repr:long] [day padding:none], [year]"
        ))
        .unwrap_or_default()
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
