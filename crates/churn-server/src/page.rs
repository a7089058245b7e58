//! HTML page shell
//!
//! The page is static markup plus one JSON island holding the layout and the
//! current figures. A small script draws every panel with Plotly.js and
//! forwards dropdown changes and `plotly_relayout` events to the API.

use serde::Serialize;

use churn_core::{Controller, EventKind, Figure, PageLayout, PanelId};

/// Per-panel data handed to the page script
#[derive(Debug, Serialize)]
struct PanelBoot<'a> {
    id: PanelId,
    scroll_zoom: bool,
    events: Vec<EventKind>,
    figure: &'a Figure,
}

#[derive(Debug, Serialize)]
struct Boot<'a> {
    dropdown: &'a str,
    panels: Vec<PanelBoot<'a>>,
}

/// Render the full page for the controller's current state
pub fn render(controller: &Controller, plotly_cdn: &str, debug: bool) -> String {
    let layout = controller.layout();

    let panels = layout
        .panels
        .iter()
        .filter_map(|spec| {
            controller.figure(spec.id).map(|figure| PanelBoot {
                id: spec.id,
                scroll_zoom: spec.scroll_zoom,
                events: controller.registry().kinds_for(spec.id),
                figure,
            })
        })
        .collect();
    let boot = Boot {
        dropdown: &layout.dropdown.id,
        panels,
    };
    // Serializing plain structs of strings and numbers cannot fail
    let boot_json = serde_json::to_string(&boot).unwrap_or_else(|_| "{}".to_string());

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!doctype html>\n<html>\n  <head>\n    <meta charset=\"utf-8\" />\n");
    html.push_str(&format!(
        "    <title>{}</title>\n",
        escape_html(&layout.title)
    ));
    html.push_str(&format!(
        "    <script src=\"{}\"></script>\n",
        escape_html(plotly_cdn)
    ));
    html.push_str(STYLE);
    html.push_str("  </head>\n  <body>\n");
    if debug {
        html.push_str("    <div class=\"debug-banner\">debug mode</div>\n");
    }
    html.push_str(&format!("    <h1>{}</h1>\n", escape_html(&layout.title)));
    html.push_str(&body(&layout));
    html.push_str(&format!(
        "    <script id=\"dashboard-state\" type=\"application/json\">{}</script>\n",
        escape_script(&boot_json)
    ));
    html.push_str(SCRIPT);
    html.push_str("  </body>\n</html>\n");
    html
}

fn body(layout: &PageLayout) -> String {
    let mut out = String::new();
    for (i, panel) in layout.panels.iter().enumerate() {
        if i > 0 {
            out.push_str("    <hr />\n");
        }
        out.push_str("    <section class=\"panel\">\n");
        if panel.has_dropdown {
            out.push_str(&dropdown(layout));
        }
        if let Some(heading) = &panel.heading {
            out.push_str(&format!("      <h3>{}</h3>\n", escape_html(heading)));
        }
        out.push_str(&format!(
            "      <div id=\"{}\" class=\"chart\"></div>\n",
            panel.id.dom_id()
        ));
        out.push_str("    </section>\n");
    }
    out
}

fn dropdown(layout: &PageLayout) -> String {
    let spec = &layout.dropdown;
    let mut out = format!(
        "      <label for=\"{id}\">{label}</label>\n      <select id=\"{id}\" title=\"{placeholder}\">\n",
        id = escape_html(&spec.id),
        label = escape_html(&spec.label),
        placeholder = escape_html(&spec.placeholder),
    );
    for option in &spec.options {
        let selected = if *option == spec.value { " selected" } else { "" };
        out.push_str(&format!(
            "        <option value=\"{v}\"{selected}>{v}</option>\n",
            v = escape_html(option),
        ));
    }
    out.push_str("      </select>\n");
    out
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Keep embedded JSON from closing its script element
///
/// `<` only appears inside JSON strings, where `\u003c` decodes to the same text.
fn escape_script(json: &str) -> String {
    json.replace('<', "\\u003c")
}

const STYLE: &str = r#"    <style>
      body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1100px; padding: 16px; color: #222; }
      h1 { text-align: center; }
      h3 { margin: 8px 0; }
      hr { border: none; border-top: 1px solid #ddd; margin: 24px 0; }
      label { display: block; margin-bottom: 6px; font-weight: 600; }
      select { min-width: 260px; padding: 4px; }
      .chart { width: 100%; min-height: 420px; }
      .debug-banner { background: #fbbf24; padding: 4px 8px; font-size: 12px; }
    </style>
"#;

const SCRIPT: &str = r#"    <script>
      const boot = JSON.parse(document.getElementById('dashboard-state').textContent);

      async function sendEvent(panelId, event) {
        const response = await fetch(`/api/panels/${panelId}/events`, {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(event),
        });
        if (!response.ok) {
          console.warn(`event on ${panelId} rejected:`, await response.text());
          return;
        }
        const figure = await response.json();
        Plotly.react(panelId, figure.data, figure.layout);
      }

      for (const panel of boot.panels) {
        const el = document.getElementById(panel.id);
        Plotly.newPlot(el, panel.figure.data, panel.figure.layout, {
          responsive: true,
          scrollZoom: panel.scroll_zoom,
        });
        if (panel.events.includes('relayout')) {
          el.on('plotly_relayout', (data) => sendEvent(panel.id, { kind: 'relayout', data }));
        }
        if (panel.events.includes('dropdown')) {
          document.getElementById(boot.dropdown).addEventListener('change', (e) =>
            sendEvent(panel.id, { kind: 'dropdown', value: e.target.value }));
        }
      }
    </script>
"#;
