//! Static structure of the dashboard page.
//!
//! The layout is declared once from the loaded dataset: the dropdowns offer
//! the distinct suppliers and materials, the table shows the source columns.
//! The page script reads the layout, builds the widgets, and asks
//! `/api/v1/dashboard` for new figures and rows whenever a control changes.

use common::{
    ChartPanel, ControlKind, DashboardLayout, FilterControl, SelectOption, TableColumn, TablePanel,
};
use compute::Dataset;

pub const DASHBOARD_TITLE: &str = "Procurement Forecast Dashboard";
pub const SUPPLIER_FILTER_ID: &str = "supplier-filter";
pub const MATERIAL_FILTER_ID: &str = "material-filter";
pub const DESCRIPTION_SEARCH_ID: &str = "material-desc-search";
pub const TABLE_PAGE_SIZE: usize = 10;

const LAYOUT_PLACEHOLDER: &str = "__DASHBOARD_LAYOUT__";
const TITLE_PLACEHOLDER: &str = "__DASHBOARD_TITLE__";

/// Declare the widget tree, with dropdown options bound to the dataset.
pub fn build_layout(dataset: &Dataset) -> DashboardLayout {
    let multi_select = |id: &str, label: &str, placeholder: &str, values: Vec<String>| {
        FilterControl {
            id: id.to_string(),
            label: label.to_string(),
            kind: ControlKind::MultiSelect,
            placeholder: placeholder.to_string(),
            options: values.iter().map(|v| SelectOption::plain(v)).collect(),
        }
    };

    let controls = vec![
        multi_select(
            SUPPLIER_FILTER_ID,
            "Filter by Supplier:",
            "Select Supplier",
            dataset.suppliers(),
        ),
        multi_select(
            MATERIAL_FILTER_ID,
            "Filter by Material:",
            "Select Material",
            dataset.materials(),
        ),
        FilterControl {
            id: DESCRIPTION_SEARCH_ID.to_string(),
            label: "Search by Material Description:".to_string(),
            kind: ControlKind::TextInput,
            placeholder: "Enter material description".to_string(),
            options: Vec::new(),
        },
    ];

    let charts = ["line-chart", "bar-chart", "pie-chart"]
        .into_iter()
        .map(|id| ChartPanel { id: id.to_string() })
        .collect();

    let table = TablePanel {
        id: "data-table".to_string(),
        title: "Filtered Data Table".to_string(),
        columns: dataset
            .columns()
            .iter()
            .map(|c| TableColumn {
                name: c.name.clone(),
                id: c.name.clone(),
            })
            .collect(),
        page_size: TABLE_PAGE_SIZE,
    };

    DashboardLayout {
        title: DASHBOARD_TITLE.to_string(),
        controls,
        charts,
        table,
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the page with the layout embedded as JSON.
pub fn render_page(layout: &DashboardLayout) -> serde_json::Result<String> {
    // "</" would close the script element early
    let layout_json = serde_json::to_string(layout)?.replace("</", "<\\/");
    Ok(PAGE_TEMPLATE
        .replace(TITLE_PLACEHOLDER, &escape_html(&layout.title))
        .replace(LAYOUT_PLACEHOLDER, &layout_json))
}

const PAGE_TEMPLATE: &str = r##"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>__DASHBOARD_TITLE__</title>
  <script src="https://cdn.plot.ly/plotly-2.35.2.min.js" charset="utf-8"></script>
  <style>
    body { background-color: #f4f6f8; padding: 20px; font-family: Arial, sans-serif; margin: 0; }
    h1 { text-align: center; color: #2c3e50; }
    .filters { background-color: #ffffff; padding: 20px; border-radius: 10px; margin-bottom: 20px; }
    .filters label { display: block; margin: 12px 0 4px; font-weight: bold; }
    .filters select, .filters input { width: 100%; padding: 8px; box-sizing: border-box; }
    .filters select { min-height: 90px; }
    .chart-grid { display: grid; grid-template-columns: 1fr 1fr 1fr; gap: 10px; }
    .chart { background-color: #ffffff; min-height: 420px; }
    .table-wrapper { overflow-x: auto; background-color: #ffffff; }
    table { border-collapse: collapse; width: 100%; }
    th { background-color: lightgrey; font-weight: bold; }
    th, td { border: 1px solid #ddd; padding: 6px 8px; text-align: left; white-space: nowrap; }
    .pager { margin-top: 8px; display: flex; gap: 8px; align-items: center; }
    .status { color: #c0392b; margin-top: 8px; }
  </style>
</head>
<body>
  <h1 id="dashboard-title"></h1>
  <div class="filters" id="filters"></div>
  <div class="chart-grid" id="charts"></div>
  <h3 id="table-title"></h3>
  <div class="table-wrapper"><table id="data-table"><thead></thead><tbody></tbody></table></div>
  <div class="pager">
    <button id="page-prev" type="button">&lt;</button>
    <span id="page-info"></span>
    <button id="page-next" type="button">&gt;</button>
  </div>
  <div class="status" id="status"></div>
  <script type="application/json" id="dashboard-layout">__DASHBOARD_LAYOUT__</script>
  <script>
  (function () {
    const layout = JSON.parse(document.getElementById("dashboard-layout").textContent);
    const figureKeys = { "line-chart": "line_chart", "bar-chart": "bar_chart", "pie-chart": "pie_chart" };
    const state = { rows: [], page: 0, requested: 0 };
    let pending = null;

    document.getElementById("dashboard-title").textContent = layout.title;
    document.getElementById("table-title").textContent = layout.table.title;

    const filters = document.getElementById("filters");
    for (const control of layout.controls) {
      const label = document.createElement("label");
      label.textContent = control.label;
      label.htmlFor = control.id;
      filters.appendChild(label);

      let input;
      if (control.kind === "multi_select") {
        input = document.createElement("select");
        input.multiple = true;
        input.title = control.placeholder;
        for (const option of control.options) {
          const element = document.createElement("option");
          element.value = option.value;
          element.text = option.label;
          input.appendChild(element);
        }
        input.addEventListener("change", refresh);
      } else {
        input = document.createElement("input");
        input.type = "text";
        input.placeholder = control.placeholder;
        input.addEventListener("input", function () {
          clearTimeout(pending);
          pending = setTimeout(refresh, 250);
        });
      }
      input.id = control.id;
      filters.appendChild(input);
    }

    const charts = document.getElementById("charts");
    for (const panel of layout.charts) {
      const element = document.createElement("div");
      element.id = panel.id;
      element.className = "chart";
      charts.appendChild(element);
    }

    const headerRow = document.createElement("tr");
    for (const column of layout.table.columns) {
      const th = document.createElement("th");
      th.textContent = column.name;
      headerRow.appendChild(th);
    }
    document.querySelector("#data-table thead").appendChild(headerRow);

    function selected(id) {
      const element = document.getElementById(id);
      return Array.from(element.selectedOptions).map(function (o) { return o.value; });
    }

    function currentFilter() {
      return {
        suppliers: selected("supplier-filter"),
        materials: selected("material-filter"),
        search_text: document.getElementById("material-desc-search").value || null
      };
    }

    function pageCount() {
      return Math.max(1, Math.ceil(state.rows.length / layout.table.page_size));
    }

    function drawTable() {
      const body = document.querySelector("#data-table tbody");
      body.replaceChildren();
      const start = state.page * layout.table.page_size;
      for (const row of state.rows.slice(start, start + layout.table.page_size)) {
        const tr = document.createElement("tr");
        for (const column of layout.table.columns) {
          const td = document.createElement("td");
          const value = row[column.id];
          td.textContent = value === null || value === undefined ? "" : String(value);
          tr.appendChild(td);
        }
        body.appendChild(tr);
      }
      document.getElementById("page-info").textContent = (state.page + 1) + " / " + pageCount();
    }

    document.getElementById("page-prev").addEventListener("click", function () {
      if (state.page > 0) { state.page -= 1; drawTable(); }
    });
    document.getElementById("page-next").addEventListener("click", function () {
      if (state.page + 1 < pageCount()) { state.page += 1; drawTable(); }
    });

    async function refresh() {
      const status = document.getElementById("status");
      // Responses may arrive out of order; only the latest request may redraw
      const request = ++state.requested;
      try {
        const response = await fetch("/api/v1/dashboard", {
          method: "POST",
          headers: { "Content-Type": "application/json" },
          body: JSON.stringify(currentFilter())
        });
        if (request !== state.requested) {
          return;
        }
        if (!response.ok) {
          status.textContent = "Update failed: HTTP " + response.status;
          return;
        }
        const update = (await response.json()).data;
        if (request !== state.requested) {
          return;
        }
        for (const panel of layout.charts) {
          const figure = update[figureKeys[panel.id]];
          Plotly.react(panel.id, figure.data, figure.layout, { responsive: true });
        }
        state.rows = update.table;
        state.page = 0;
        drawTable();
        status.textContent = "";
      } catch (error) {
        if (request === state.requested) {
          status.textContent = "Update failed: " + error;
        }
      }
    }

    refresh();
  })();
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use compute::Dataset;

    fn sample_dataset() -> Dataset {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/forecast_sample.csv");
        Dataset::load(path).expect("Failed to load sample dataset")
    }

    #[test]
    fn test_layout_controls_bound_to_dataset() {
        let layout = build_layout(&sample_dataset());

        let suppliers = layout.control(SUPPLIER_FILTER_ID).unwrap();
        assert_eq!(suppliers.kind, ControlKind::MultiSelect);
        let values: Vec<&str> = suppliers.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Alpha Metals", "Beta Plastics", "Gamma Components"]);

        let materials = layout.control(MATERIAL_FILTER_ID).unwrap();
        assert_eq!(materials.options.len(), 8);
        assert_eq!(materials.options[0].value, "MAT-100");
        assert_eq!(materials.options[1].value, "MAT-200");

        let search = layout.control(DESCRIPTION_SEARCH_ID).unwrap();
        assert_eq!(search.kind, ControlKind::TextInput);
        assert!(search.options.is_empty());
    }

    #[test]
    fn test_layout_panels_and_table() {
        let layout = build_layout(&sample_dataset());

        let chart_ids: Vec<&str> = layout.charts.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(chart_ids, vec!["line-chart", "bar-chart", "pie-chart"]);

        assert_eq!(layout.table.page_size, 10);
        let columns: Vec<&str> = layout.table.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            columns,
            vec![
                "SUPPLIER",
                "MATERIAL",
                "MATERIAL DESCRIPTION",
                "FORECASTED DATE",
                "FORECASTED QUANTITY",
                "PLANT"
            ]
        );
    }

    #[test]
    fn test_render_page_embeds_layout() {
        let mut layout = build_layout(&sample_dataset());
        layout.controls[0].options.push(SelectOption::plain("</script><b>x</b>"));

        let page = render_page(&layout).unwrap();
        assert!(page.contains("<title>Procurement Forecast Dashboard</title>"));
        assert!(page.contains("\"supplier-filter\""));
        assert!(page.contains("cdn.plot.ly"));
        assert!(!page.contains(LAYOUT_PLACEHOLDER));
        // Option text cannot terminate the embedding script element
        assert!(!page.contains("</script><b>"));
        assert!(page.contains("<\\/script><b>x<\\/b>"));
    }

    #[test]
    fn test_render_page_ignores_stale_responses() {
        let page = render_page(&build_layout(&sample_dataset())).unwrap();

        // Every redraw is gated on the response belonging to the newest request
        assert!(page.contains("const request = ++state.requested;"));
        assert_eq!(page.matches("request !== state.requested").count(), 2);
        let gate = page.find("request !== state.requested").unwrap();
        let redraw = page.find("Plotly.react(").unwrap();
        assert!(gate < redraw);
    }
}
