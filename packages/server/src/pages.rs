//! HTML pages wrapping the rendered map documents.
//!
//! Each page is a full document built with `format!`. Anything that came
//! from a request or an upstream API goes through [`escape`].

use crime_overlay_map_models::ViewKind;
use crime_overlay_real_estate_models::NeighborhoodTable;

const STYLE: &str = r"
    body { margin: 0; font-family: sans-serif; background: #202020; color: #eeeeee; }
    nav { padding: 12px 24px; background: #111111; }
    nav a { color: #eeeeee; margin-right: 18px; text-decoration: none; }
    main { padding: 16px 24px; }
    form { margin-bottom: 12px; }
    input, select, button { font-size: 14px; padding: 4px 8px; }
    iframe { width: 100%; height: 80vh; border: none; }
    .error { padding: 12px; background: #5a1e1e; border: 1px solid #a33; }
";

/// The landing page.
pub fn index() -> String {
    layout(
        "Seattle Crime Overlay",
        r#"<h1>Seattle Crime Overlay</h1>
        <p>Recent Seattle police incident reports, plotted by category.</p>
        <ul>
            <li><a href="/neighborhoods">Browse by neighborhood</a></li>
            <li><a href="/byhouse">Look up an address</a></li>
        </ul>"#,
    )
}

/// The about page.
pub fn about() -> String {
    layout(
        "About",
        r#"<h1>About</h1>
        <p>Incidents are the most recently reported Seattle police reports,
        grouped by their summarized offense category. Each category is one
        toggleable map layer; hover a marker for its offense description.</p>
        <p>Addresses and neighborhood centers are resolved through the Zillow
        API. The house view marks the resolved address with a star.</p>"#,
    )
}

/// The neighborhood view page.
///
/// `neighborhoods` is `None` when the list itself could not be fetched.
/// The map frame is only embedded when a `timestamp` is given, i.e. the
/// document was just rendered.
pub fn neighborhoods(
    neighborhoods: Option<&NeighborhoodTable>,
    selected: &str,
    timestamp: Option<i64>,
    error: Option<&str>,
) -> String {
    let options = neighborhoods
        .map(|table| {
            table
                .names()
                .map(|name| {
                    let mark = if name == selected { " selected" } else { "" };
                    format!(
                        "<option value=\"{value}\"{mark}>{value}</option>",
                        value = escape(name),
                    )
                })
                .collect::<Vec<_>>()
                .join("\n                ")
        })
        .unwrap_or_default();

    layout(
        "Neighborhoods",
        &format!(
            r#"<h1>Crime by neighborhood</h1>
        <form method="post" action="/neighborhoods">
            <select name="neighborhoods">
                {options}
            </select>
            <button type="submit">Show</button>
        </form>
        {body}"#,
            body = map_or_error(ViewKind::Neighborhood, timestamp, error),
        ),
    )
}

/// The house view page, with the address form pre-filled.
pub fn by_house(
    street: &str,
    city_state_zip: &str,
    timestamp: Option<i64>,
    error: Option<&str>,
) -> String {
    layout(
        "By house",
        &format!(
            r#"<h1>Crime around an address</h1>
        <form method="post" action="/byhouse">
            <input type="text" name="street-address" value="{street}" placeholder="Street address">
            <input type="text" name="city-state-zip" value="{city_state_zip}" placeholder="City, state, zip">
            <button type="submit">Show</button>
        </form>
        {body}"#,
            street = escape(street),
            city_state_zip = escape(city_state_zip),
            body = map_or_error(ViewKind::House, timestamp, error),
        ),
    )
}

fn map_or_error(view: ViewKind, timestamp: Option<i64>, error: Option<&str>) -> String {
    match (error, timestamp) {
        (Some(error), _) => format!("<div class=\"error\">{}</div>", escape(error)),
        (None, Some(t)) => format!(
            "<iframe src=\"/static/{file}?t={t}\" title=\"map\"></iframe>",
            file = view.output_filename(),
        ),
        (None, None) => String::new(),
    }
}

fn layout(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/neighborhoods">Neighborhoods</a>
        <a href="/byhouse">By house</a>
        <a href="/about">About</a>
    </nav>
    <main>
        {content}
    </main>
</body>
</html>"#,
        title = escape(title),
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
