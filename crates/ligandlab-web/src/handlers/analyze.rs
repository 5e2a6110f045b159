//! Ligand analysis page — ChEMBL ID form in, full report out.

use axum::{extract::State, response::Html, Form};
use ligandlab_common::{FetchError, PipelineError};
use ligandlab_molecules::LigandReport;
use serde::Deserialize;
use tracing::warn;

use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AnalyzeForm {
    pub chembl_id: String,
}

pub async fn index_page(State(_state): State<SharedState>) -> Html<String> {
    Html(render_page(None, None))
}

pub async fn analyze_submit(
    State(state): State<SharedState>,
    Form(form): Form<AnalyzeForm>,
) -> Html<String> {
    let chembl_id = form.chembl_id.trim();
    if chembl_id.is_empty() {
        return Html(render_page(None, Some("Please enter a ChEMBL ID.".to_string())));
    }

    match state.pipeline.run(chembl_id).await {
        Ok(report) => Html(render_page(Some(&report), None)),
        Err(e) => {
            warn!(chembl_id, error = %e, "analysis failed");
            Html(render_page(None, Some(user_message(&e))))
        }
    }
}

/// Map pipeline failures to text safe to show a user. The raw error goes
/// to the log, not the page.
fn user_message(err: &PipelineError) -> String {
    match err {
        PipelineError::Fetch(FetchError::NotFound(id)) => {
            format!("No compound found for {}.", escape(id))
        }
        PipelineError::Fetch(FetchError::MissingStructure(id)) => {
            format!("Compound {} has no recorded structure.", escape(id))
        }
        PipelineError::Fetch(_) => {
            "ChEMBL could not be reached. Try again in a moment.".to_string()
        }
        PipelineError::Geometry(_) => {
            "The compound structure could not be processed.".to_string()
        }
        PipelineError::Features(_) => {
            "Descriptor calculation failed for this compound.".to_string()
        }
    }
}

/// Minimal HTML escaping for values that echo user or API input.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn render_page(report: Option<&LigandReport>, error: Option<String>) -> String {
    let error_html = error
        .map(|msg| format!(r#"<div class="alert">{msg}</div>"#))
        .unwrap_or_default();

    let report_html = report.map(render_report).unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>LigandLab — Docking Suitability</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 900px; margin: 2rem auto; padding: 0 1rem; color: #1c2430; }}
        h1 {{ font-size: 1.6rem; }}
        form {{ display: flex; gap: .75rem; margin: 1.5rem 0; }}
        input[type=text] {{ flex: 1; padding: .5rem .75rem; font-size: 1rem; border: 1px solid #aab4c0; border-radius: 6px; }}
        button {{ padding: .5rem 1.25rem; font-size: 1rem; border: 0; border-radius: 6px; background: #2456a5; color: #fff; cursor: pointer; }}
        .alert {{ background: #fbeaea; border: 1px solid #d88; border-radius: 6px; padding: .75rem 1rem; margin: 1rem 0; }}
        .verdict {{ background: #eef3fb; border-radius: 6px; padding: .75rem 1rem; margin: 1rem 0; font-size: 1.1rem; }}
        table {{ border-collapse: collapse; margin: 1rem 0; }}
        th, td {{ border: 1px solid #cdd5de; padding: .4rem .9rem; text-align: left; }}
        th {{ background: #f2f5f9; }}
        pre {{ background: #f7f8fa; border: 1px solid #dde3ea; border-radius: 6px; padding: .75rem; overflow-x: auto; font-size: .8rem; max-height: 24rem; }}
        .smiles {{ font-family: monospace; word-break: break-all; }}
    </style>
</head>
<body>
    <h1>LigandLab</h1>
    <p>Fetch a compound from ChEMBL, build its 3D conformations, and judge its suitability for molecular docking.</p>
    <form method="POST" action="/">
        <input type="text" name="chembl_id" placeholder="e.g. CHEMBL25" required>
        <button type="submit">Analyze</button>
    </form>
    {error_html}
    {report_html}
</body>
</html>"#
    )
}

fn render_report(report: &LigandReport) -> String {
    let name = report
        .pref_name
        .as_deref()
        .map(|n| format!(" — {}", escape(n)))
        .unwrap_or_default();

    format!(
        r#"<section>
    <h2>{id}{name}</h2>
    <p class="smiles">{smiles}</p>
    <table>
        <tr><th>Molecular weight</th><td>{mw:.2}</td></tr>
        <tr><th>logP</th><td>{logp:.2}</td></tr>
        <tr><th>Rotatable bonds</th><td>{rotb}</td></tr>
        <tr><th>TPSA</th><td>{tpsa:.2}</td></tr>
        <tr><th>Class</th><td>{class}</td></tr>
        <tr><th>Quality score</th><td>{score} / 100</td></tr>
    </table>
    <div class="verdict">{decision}</div>
    <h3>Initial conformation (PDB)</h3>
    <pre>{pdb_initial}</pre>
    <h3>Prepared conformation (PDB)</h3>
    <pre>{pdb_prepared}</pre>
    <p><small>Report {report_id}, generated {generated_at}</small></p>
</section>"#,
        id = escape(&report.chembl_id),
        name = name,
        smiles = escape(&report.smiles),
        mw = report.features.mw,
        logp = report.features.logp,
        rotb = report.features.rotatable_bonds,
        tpsa = report.features.tpsa,
        class = report.class,
        score = report.score,
        decision = report.decision,
        pdb_initial = escape(&report.pdb_initial),
        pdb_prepared = escape(&report.pdb_prepared),
        report_id = report.id,
        generated_at = report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape(r#"a"&b"#), "a&quot;&amp;b");
    }

    #[test]
    fn empty_page_has_form_and_no_report() {
        let page = render_page(None, None);
        assert!(page.contains(r#"name="chembl_id""#));
        assert!(!page.contains("<section>"));
        assert!(!page.contains("alert"));
    }

    #[test]
    fn error_page_shows_alert() {
        let page = render_page(None, Some("No compound found for CHEMBL0.".into()));
        assert!(page.contains(r#"class="alert""#));
        assert!(page.contains("No compound found"));
    }

    #[test]
    fn fetch_errors_map_to_friendly_text() {
        let err = PipelineError::Fetch(FetchError::NotFound("CHEMBL<1>".into()));
        let msg = user_message(&err);
        assert!(msg.contains("CHEMBL&lt;1&gt;"));

        let err = PipelineError::Geometry(ligandlab_common::GeometryError::Parse("x".into()));
        assert!(user_message(&err).contains("could not be processed"));
    }
}
