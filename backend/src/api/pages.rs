//! Server-side HTML pages.
//!
//! Every dynamic string goes through [`escape`]. Pages share one Bootstrap
//! layout; tables mimic a dataframe dump (`dataframe` class, no index
//! column, missing cells shown as `NaN`).

use std::fmt::Write;

use crate::models::Row;
use crate::transform::{Dashboard, StatsSummary, ViewerReport};

/// CSS classes on every data table.
pub const TABLE_CLASSES: &str = "table table-striped table-hover table-sm";

/// Where to get the survey dataset.
pub const DATASET_URL: &str = "https://www.kaggle.com/datasets/osmi/mental-health-in-tech-survey";

const BOOTSTRAP_CSS: &str = "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";

/// Escape text for HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="{css}">
</head>
<body class="bg-light">
<nav class="navbar navbar-dark bg-dark mb-4">
  <div class="container">
    <a class="navbar-brand" href="/">Saúde Mental em Tech</a>
    <a class="btn btn-outline-light btn-sm" href="/upload">Enviar CSV</a>
  </div>
</nav>
<main class="container">
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        css = BOOTSTRAP_CSS,
        body = body,
    )
}

/// Render rows as a styled HTML table.
pub fn render_table(columns: &[String], rows: &[Row]) -> String {
    let mut html = String::new();
    let _ = writeln!(html, r#"<table border="0" class="dataframe {}">"#, TABLE_CLASSES);
    html.push_str("  <thead>\n    <tr style=\"text-align: right;\">\n");
    for col in columns {
        let _ = writeln!(html, "      <th>{}</th>", escape(col));
    }
    html.push_str("    </tr>\n  </thead>\n  <tbody>\n");
    for row in rows {
        html.push_str("    <tr>\n");
        for cell in row {
            let _ = writeln!(html, "      <td>{}</td>", escape(cell.as_deref().unwrap_or("NaN")));
        }
        html.push_str("    </tr>\n");
    }
    html.push_str("  </tbody>\n</table>");
    html
}

fn stat_card(label: &str, value: &str, detail: Option<&str>) -> String {
    let detail = detail
        .map(|d| format!(r#"<div class="small text-muted">{}</div>"#, escape(d)))
        .unwrap_or_default();
    format!(
        r#"<div class="col-6 col-md-4 col-lg-3 mb-3"><div class="card h-100"><div class="card-body">
<div class="text-muted small">{}</div><div class="fs-3 fw-bold">{}</div>{}
</div></div></div>"#,
        escape(label),
        escape(value),
        detail
    )
}

fn stat_cards(stats: &StatsSummary) -> String {
    let pct = |v: f64| format!("{:.1}% do total", v);
    [
        stat_card("Total de respostas", &stats.total.to_string(), None),
        stat_card(
            "Buscaram tratamento",
            &stats.sought_treatment.to_string(),
            Some(&pct(stats.pct_treatment)),
        ),
        stat_card(
            "Histórico familiar",
            &stats.family_history.to_string(),
            Some(&pct(stats.pct_family_history)),
        ),
        stat_card(
            "Trabalho afetado",
            &stats.work_interfered.to_string(),
            Some(&pct(stats.pct_work_interfered)),
        ),
        stat_card("Empresas de tecnologia", &stats.tech_company.to_string(), None),
        stat_card(
            "Com benefícios",
            &stats.has_benefits.to_string(),
            Some(&pct(stats.pct_benefits)),
        ),
        stat_card("Trabalho remoto", &stats.remote_work.to_string(), None),
        stat_card("Idade média", &format!("{:.1}", stats.mean_age), None),
        stat_card("Países", &stats.unique_countries.to_string(), None),
    ]
    .concat()
}

/// Dashboard for the survey dataset.
pub fn dashboard_page(dashboard: &Dashboard) -> String {
    let preview = &dashboard.preview;
    let columns = preview
        .columns
        .iter()
        .map(|c| format!(r#"<span class="badge text-bg-secondary me-1">{}</span>"#, escape(c)))
        .collect::<String>();

    let table = if preview.is_empty() {
        r#"<div class="alert alert-warning">Nenhuma coluna relevante encontrada no arquivo.</div>"#
            .to_string()
    } else {
        render_table(&preview.columns, &preview.rows)
    };

    let body = format!(
        r#"<h1 class="mb-4">Pesquisa de Saúde Mental em Tecnologia</h1>
<div class="row">{cards}</div>
<h2 class="h4 mt-4">Colunas exibidas ({count})</h2>
<p>{columns}</p>
<h2 class="h4 mt-4">Primeiras {shown} linhas</h2>
<div class="table-responsive">{table}</div>
<p class="text-muted small">Codificação do arquivo: {encoding}</p>"#,
        cards = stat_cards(&dashboard.stats),
        count = preview.columns.len(),
        columns = columns,
        shown = preview.rows.len(),
        table = table,
        encoding = escape(dashboard.encoding),
    );

    layout("Dashboard - Saúde Mental em Tech", &body)
}

/// Shown when the dataset cannot be loaded, with steps to fix it.
pub fn dashboard_error_page(message: &str, file_name: &str, directory: &str) -> String {
    let body = format!(
        r#"<div style="padding: 50px; text-align: center;">
  <h1>⚠️ Erro ao carregar CSV</h1>
  <p style="color: red; font-size: 18px;">{message}</p>
  <hr>
  <h3>Instruções:</h3>
  <ol style="text-align: left; max-width: 600px; margin: 0 auto;">
    <li>Baixe o dataset do Kaggle: <a href="{url}" target="_blank">Mental Health in Tech Survey</a></li>
    <li>Renomeie o arquivo para: <code>{file_name}</code></li>
    <li>Coloque na pasta <code>{directory}/</code> do projeto</li>
  </ol>
</div>"#,
        message = escape(message),
        url = DATASET_URL,
        file_name = escape(file_name),
        directory = escape(directory),
    );
    layout("Erro ao carregar CSV", &body)
}

/// Upload form, with an optional inline error and links to stored files.
pub fn upload_page(error: Option<&str>, stored: &[String], max_body_bytes: usize) -> String {
    let alert = error
        .map(|e| format!(r#"<div class="alert alert-danger">{}</div>"#, escape(e)))
        .unwrap_or_default();

    let files = if stored.is_empty() {
        String::new()
    } else {
        let items: String = stored
            .iter()
            .map(|name| {
                format!(
                    r#"<li class="list-group-item"><a href="/view/{0}">{0}</a></li>"#,
                    escape(name)
                )
            })
            .collect();
        format!(
            r#"<h2 class="h5 mt-4">Arquivos enviados</h2><ul class="list-group">{}</ul>"#,
            items
        )
    };

    let body = format!(
        r#"<h1 class="mb-4">Enviar arquivo CSV</h1>
{alert}
<form method="post" action="/upload" enctype="multipart/form-data" class="card card-body">
  <div class="mb-3">
    <input class="form-control" type="file" name="file" accept=".csv">
    <div class="form-text">Apenas arquivos .csv, até {max_mb} MB.</div>
  </div>
  <button class="btn btn-primary" type="submit">Enviar</button>
</form>
{files}"#,
        alert = alert,
        max_mb = max_body_bytes / (1024 * 1024),
        files = files,
    );
    layout("Enviar CSV", &body)
}

/// Generic table viewer for an uploaded file.
pub fn viewer_page(report: &ViewerReport) -> String {
    let notice = if report.truncated {
        format!(
            r#"<div class="alert alert-info">Exibindo as primeiras {} de {} linhas.</div>"#,
            report.preview.len(),
            report.row_count
        )
    } else {
        String::new()
    };

    let columns = report
        .columns
        .iter()
        .map(|c| format!("<code>{}</code>", escape(c)))
        .collect::<Vec<_>>()
        .join(", ");

    let body = format!(
        r#"<h1 class="mb-3">{filename}</h1>
<ul class="list-inline">
  <li class="list-inline-item"><strong>Linhas:</strong> {rows}</li>
  <li class="list-inline-item"><strong>Colunas:</strong> {cols}</li>
  <li class="list-inline-item"><strong>Codificação:</strong> {encoding}</li>
  <li class="list-inline-item"><strong>Separador:</strong> {delimiter}</li>
</ul>
<p><strong>Nomes das colunas:</strong> {columns}</p>
{notice}
<div class="table-responsive">{table}</div>"#,
        filename = escape(&report.filename),
        rows = report.row_count,
        cols = report.column_count,
        encoding = escape(report.encoding),
        delimiter = delimiter_label(report.delimiter),
        columns = columns,
        notice = notice,
        table = render_table(&report.columns, &report.preview),
    );
    layout(&report.filename, &body)
}

fn delimiter_label(delimiter: char) -> String {
    match delimiter {
        '\t' => "tab".to_string(),
        c => format!("<code>{}</code>", escape(&c.to_string())),
    }
}

/// Plain error page with a way back.
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        r#"<div class="alert alert-danger"><h1 class="h4">{}</h1><p class="mb-0">{}</p></div>
<a class="btn btn-secondary" href="/upload">Voltar</a>"#,
        escape(title),
        escape(message)
    );
    layout(title, &body)
}
