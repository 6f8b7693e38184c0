//! Renders a [`MapDocument`] as a standalone Plotly `scattermapbox` page.
//!
//! The figure JSON is embedded in the page and drawn by the Plotly bundle
//! loaded from its CDN, so the output is a single file that can be served
//! as-is or opened from disk.

use crime_overlay_map_models::{MapDocument, MapLayer, MarkerSymbol};
use serde::Serialize;

use crate::MapError;

/// Plotly bundle referenced by every rendered page.
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

#[derive(Serialize)]
struct Figure<'a> {
    data: Vec<Trace<'a>>,
    layout: Layout<'a>,
}

#[derive(Serialize)]
struct Trace<'a> {
    #[serde(rename = "type")]
    trace_type: &'static str,
    name: &'a str,
    lat: Vec<f64>,
    lon: Vec<f64>,
    mode: &'static str,
    marker: Marker,
    text: &'a [String],
    hoverinfo: &'static str,
}

#[derive(Serialize)]
struct Marker {
    size: u8,
    symbol: MarkerSymbol,
}

#[derive(Serialize)]
struct Layout<'a> {
    autosize: bool,
    hovermode: &'static str,
    margin: Margin,
    legend: Legend<'a>,
    paper_bgcolor: &'a str,
    mapbox: Mapbox<'a>,
}

#[derive(Serialize)]
struct Margin {
    l: u8,
    r: u8,
    b: u8,
    t: u8,
    pad: u8,
}

#[derive(Serialize)]
struct Legend<'a> {
    bgcolor: &'a str,
    font: Font<'a>,
}

#[derive(Serialize)]
struct Font<'a> {
    color: &'a str,
}

#[derive(Serialize)]
struct Mapbox<'a> {
    style: &'a str,
    accesstoken: &'a str,
    bearing: u8,
    center: Center,
    pitch: u8,
    zoom: u8,
}

#[derive(Serialize)]
struct Center {
    lat: f64,
    lon: f64,
}

impl<'a> From<&'a MapLayer> for Trace<'a> {
    fn from(layer: &'a MapLayer) -> Self {
        Self {
            trace_type: "scattermapbox",
            name: &layer.name,
            lat: layer.points.iter().map(|p| p.latitude).collect(),
            lon: layer.points.iter().map(|p| p.longitude).collect(),
            mode: "markers",
            marker: Marker {
                size: layer.marker.size,
                symbol: layer.marker.symbol,
            },
            text: &layer.labels,
            hoverinfo: "text",
        }
    }
}

fn figure(document: &MapDocument) -> Figure<'_> {
    let theme = &document.theme;
    Figure {
        data: document.layers.iter().map(Trace::from).collect(),
        layout: Layout {
            autosize: true,
            hovermode: "closest",
            margin: Margin {
                l: 0,
                r: 0,
                b: 0,
                t: 0,
                pad: 0,
            },
            legend: Legend {
                bgcolor: &theme.background,
                font: Font {
                    color: &theme.legend_font_color,
                },
            },
            paper_bgcolor: &theme.background,
            mapbox: Mapbox {
                style: &theme.map_style,
                accesstoken: &theme.access_token,
                bearing: 0,
                center: Center {
                    lat: document.center.latitude,
                    lon: document.center.longitude,
                },
                pitch: 0,
                zoom: document.zoom,
            },
        },
    }
}

/// Renders `document` as a complete HTML page.
///
/// # Errors
///
/// Returns [`MapError::Json`] if the figure cannot be serialized.
pub fn render_document(document: &MapDocument) -> Result<String, MapError> {
    // `<` only appears inside JSON strings, so escaping it keeps `</script>`
    // in a label from closing the script element.
    let figure = serde_json::to_string(&figure(document))?.replace('<', "\\u003c");

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Crime map</title>
    <script src="{cdn}" charset="utf-8"></script>
    <style>
        html, body {{ margin: 0; height: 100%; background: {background}; }}
        #map {{ width: 100%; height: 100%; }}
    </style>
</head>
<body>
    <div id="map"></div>
    <script>
        var figure = {figure};
        Plotly.newPlot("map", figure.data, figure.layout, {{
            responsive: true,
            displaylogo: false,
            showLink: false
        }});
    </script>
</body>
</html>
"#,
        cdn = PLOTLY_CDN_URL,
        background = document.theme.background,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crime_overlay_map_models::{Coordinate, LayerKind, MapTheme, MarkerStyle};

    fn document() -> MapDocument {
        MapDocument {
            layers: vec![
                MapLayer {
                    name: "315 Howe St".to_string(),
                    kind: LayerKind::Highlight,
                    points: vec![Coordinate::new(47.63, -122.36)],
                    labels: vec!["Address: 315 Howe St".to_string()],
                    marker: MarkerStyle::HIGHLIGHT,
                },
                MapLayer {
                    name: "CAR PROWL".to_string(),
                    kind: LayerKind::Category,
                    points: vec![
                        Coordinate::new(47.61, -122.33),
                        Coordinate::new(47.62, -122.34),
                    ],
                    labels: vec!["a".to_string(), "</script><b>".to_string()],
                    marker: MarkerStyle::CATEGORY,
                },
            ],
            center: Coordinate::new(47.63, -122.36),
            zoom: 15,
            theme: MapTheme {
                access_token: "pk.test".to_string(),
                ..MapTheme::default()
            },
        }
    }

    #[test]
    fn figure_has_one_trace_per_layer() {
        let json = serde_json::to_value(figure(&document())).unwrap();
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);

        assert_eq!(data[0]["type"], "scattermapbox");
        assert_eq!(data[0]["marker"]["symbol"], "star");
        assert_eq!(data[0]["marker"]["size"], 12);
        assert_eq!(data[0]["lat"][0], 47.63);

        assert_eq!(data[1]["name"], "CAR PROWL");
        assert_eq!(data[1]["marker"]["size"], 5);
        assert_eq!(data[1]["lon"].as_array().unwrap().len(), 2);
        assert_eq!(data[1]["hoverinfo"], "text");
    }

    #[test]
    fn layout_carries_viewport_and_theme() {
        let json = serde_json::to_value(figure(&document())).unwrap();
        let layout = &json["layout"];
        assert_eq!(layout["mapbox"]["zoom"], 15);
        assert_eq!(layout["mapbox"]["center"]["lat"], 47.63);
        assert_eq!(layout["mapbox"]["center"]["lon"], -122.36);
        assert_eq!(layout["mapbox"]["style"], "dark");
        assert_eq!(layout["mapbox"]["accesstoken"], "pk.test");
        assert_eq!(layout["paper_bgcolor"], "#202020");
        assert_eq!(layout["legend"]["font"]["color"], "#ffffff");
        assert_eq!(layout["hovermode"], "closest");
    }

    #[test]
    fn html_embeds_figure_without_breaking_script() {
        let html = render_document(&document()).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(PLOTLY_CDN_URL));
        assert!(html.contains("Plotly.newPlot"));
        assert!(html.contains("\\u003c/script>\\u003cb>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }
}
