#[cfg(test)]
pub const POST_DATA_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Kisah Cinta di Malam Hari</title>
</head>
<body>
<h1>Kisah Cinta di Malam Hari</h1>
<img src="/img/malam.jpg">
<p>Malam itu hujan turun.</p>
<div class="post-labels">
<a href="/search/label/Cinta">Cinta</a>
<a href="/search/label/Drama">Drama</a>
</div>
</body>
</html>
"#;

#[cfg(test)]
pub const POST_NO_TITLE_HTML: &str = r#"<html>
<body>
<p>Cerita tanpa judul.</p>
</body>
</html>
"#;

#[cfg(test)]
pub const POST_NO_BODY_HTML: &str = r#"<h1>Tanpa Body</h1>
<p>Isi cerita.</p>
"#;

#[cfg(test)]
pub const STORY_DATA_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta name="title" content="Malam Minggu">
<meta name="category" content="romance">
<meta name="thumbnail" content="/img/minggu.jpg">
<meta name="updated" content="2024-03-09">
</head>
<body>
<h1>Malam Minggu</h1>
<p>Sabtu malam yang panjang.</p>
</body>
</html>
"#;

#[cfg(test)]
pub fn story_html(title: &str, category: &str, updated: &str) -> String {
    format!(r#"<html>
<head>
<meta name="title" content="{title}">
<meta name="category" content="{category}">
<meta name="thumbnail" content="/img/{updated}.jpg">
<meta name="updated" content="{updated}">
</head>
<body>
<h1>{title}</h1>
<p>Isi {title}.</p>
</body>
</html>
"#)
}

#[cfg(test)]
pub fn post_html(title: &str, labels: &[&str]) -> String {
    let anchors: String = labels.iter()
        .map(|l| format!(r#"<a href="/search/label/{l}">{l}</a>"#))
        .collect();
    format!(r#"<html>
<head><title>{title}</title></head>
<body>
<p>Isi {title}.</p>
<div class="post-labels">{anchors}</div>
</body>
</html>
"#)
}
