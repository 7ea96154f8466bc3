use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;

use blockdag_diff::{compare, SignatureDiff};
use blockdag_sign::{sign_with_config, DagSigner, SignatureSet};

use crate::cli::*;
use crate::input::{load_signatures, GraphFile};
use crate::render::{render_sections, to_indented_json};

const INDENT: usize = 4;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let output = match cli.command {
        Command::Sign(args) => sign_output(&args, cli.format)?,
        Command::Compare(args) => compare_output(&args, cli.format)?,
        Command::Diff(args) => diff_output(&args, cli.format)?,
    };
    print!("{output}");
    Ok(())
}

/// JSON shape of `sign --append`: the merged graph next to its signatures.
#[derive(Serialize)]
struct SignedGraph<'a> {
    graph: &'a GraphFile,
    signatures: &'a SignatureSet<String>,
}

fn sign_output(args: &SignArgs, format: OutputFormat) -> anyhow::Result<String> {
    let mut graph = GraphFile::load(&args.graph)?;
    let config = args.resolve()?;
    let signatures = sign_with_config(&config, &mut graph.vertices, &graph.edges)
        .with_context(|| format!("signing {}", args.graph.display()))?;

    let output = match format {
        OutputFormat::Json if config.append => {
            let signed = SignedGraph {
                graph: &graph,
                signatures: &signatures,
            };
            format!("{}\n", to_indented_json(&signed, INDENT)?)
        }
        OutputFormat::Json => format!("{}\n", to_indented_json(&signatures, INDENT)?),
        OutputFormat::Text => format!(
            "{}{}\n",
            render_sections(
                Some(&graph.vertices),
                Some(graph.edges.as_slice()),
                Some(&signatures),
                INDENT,
            )?,
            signature_line(&signatures)
        ),
    };
    Ok(output)
}

fn compare_output(args: &CompareArgs, format: OutputFormat) -> anyhow::Result<String> {
    let left = load_signatures(&args.left)?;
    let right = load_signatures(&args.right)?;
    let diff = compare(&left, &right)?;
    render_diff(&diff, &args.left, &args.right, format)
}

fn diff_output(args: &DiffArgs, format: OutputFormat) -> anyhow::Result<String> {
    let config = args.signer.resolve()?;
    let signer = DagSigner::from_config(&config);

    let left_graph = GraphFile::load(&args.left)?;
    let right_graph = GraphFile::load(&args.right)?;
    let left = signer
        .sign(&left_graph.vertices, &left_graph.edges)
        .with_context(|| format!("signing {}", args.left.display()))?;
    let right = signer
        .sign(&right_graph.vertices, &right_graph.edges)
        .with_context(|| format!("signing {}", args.right.display()))?;

    let diff = compare(&left, &right)?;
    render_diff(&diff, &args.left, &args.right, format)
}

fn render_diff(
    diff: &SignatureDiff<String>,
    left: &Path,
    right: &Path,
    format: OutputFormat,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", to_indented_json(diff, INDENT)?),
        OutputFormat::Text => diff_summary(diff, left, right),
    })
}

fn signature_line(signatures: &SignatureSet<String>) -> String {
    let value = match signatures.signature() {
        Some(digest) => digest.to_hex().cyan().to_string(),
        None => "none (empty graph)".dimmed().to_string(),
    };
    format!("{} {}", "signature:".bold(), value)
}

fn diff_summary(diff: &SignatureDiff<String>, left: &Path, right: &Path) -> String {
    if diff.identical {
        return format!("{} Graphs are identical.\n", "✓".green().bold());
    }

    let mut out = format!("{} Graphs differ.\n", "✗".red().bold());
    for (path, labels) in [(left, &diff.only_in_left), (right, &diff.only_in_right)] {
        out.push_str(&format!("  only in {}:\n", path.display().to_string().bold()));
        if labels.is_empty() {
            out.push_str(&format!("    {}\n", "(none)".dimmed()));
        }
        for label in labels {
            out.push_str(&format!("    {}\n", label.yellow()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdag_sign::VertexSignature;
    use blockdag_types::Digest;
    use clap::Parser;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const GRAPH: &str = r#"{
        "vertices": {"a": {"data": 5, "note": "x"}, "b": {"data": 6}},
        "edges": [["a", "b"]]
    }"#;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn run(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let output = match cli.command {
            Command::Sign(args) => sign_output(&args, cli.format),
            Command::Compare(args) => compare_output(&args, cli.format),
            Command::Diff(args) => diff_output(&args, cli.format),
        };
        output.unwrap()
    }

    fn run_json(args: &[&str]) -> Value {
        serde_json::from_str(&run(args)).unwrap()
    }

    fn no_color() {
        colored::control::set_override(false);
    }

    #[test]
    fn summary_for_identical_graphs() {
        no_color();
        let diff: SignatureDiff<String> = SignatureDiff::identical();
        let out = diff_summary(&diff, Path::new("a.json"), Path::new("b.json"));
        assert_eq!(out, "✓ Graphs are identical.\n");
    }

    #[test]
    fn summary_lists_labels_per_side() {
        no_color();
        let diff = SignatureDiff {
            identical: false,
            only_in_left: vec!["c".to_string(), "d".to_string()],
            only_in_right: vec![],
        };
        let out = diff_summary(&diff, Path::new("a.json"), Path::new("b.json"));
        assert!(out.starts_with("✗ Graphs differ."));
        assert!(out.contains("  only in a.json:\n    c\n    d\n"));
        assert!(out.contains("  only in b.json:\n    (none)\n"));
    }

    #[test]
    fn signature_line_shows_hex_or_empty() {
        no_color();
        let empty: SignatureSet<String> = SignatureSet::empty();
        assert_eq!(signature_line(&empty), "signature: none (empty graph)");

        let signed = SignatureSet::new(
            Some(Digest::new(vec![0xab; 2])),
            BTreeMap::from([(
                "a".to_string(),
                VertexSignature {
                    data_hash: None,
                    parent_hashes: vec![],
                    hash: None,
                },
            )]),
        );
        assert_eq!(signature_line(&signed), "signature: abab");
    }

    #[test]
    fn sign_json_prints_signature_set() {
        let graph = temp_file(GRAPH);
        let out = run_json(&["blockdag", "--format", "json", "sign", graph.path().to_str().unwrap()]);
        assert!(out["signature"].is_string());
        assert!(out["vertices"]["a"]["hash"].is_string());
        assert!(out["vertices"]["a"].get("data").is_none());
    }

    #[test]
    fn append_from_config_file_is_honoured() {
        let graph = temp_file(GRAPH);
        let config = temp_file("append = true\n");
        let out = run_json(&[
            "blockdag",
            "--format",
            "json",
            "sign",
            graph.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
        ]);

        let a = &out["graph"]["vertices"]["a"];
        assert_eq!(a["data"], json!(5));
        assert_eq!(a["hash"], out["signatures"]["vertices"]["a"]["hash"]);
        assert!(out["signatures"]["signature"].is_string());
        assert_eq!(out["graph"]["edges"], json!([["a", "b"]]));
    }

    #[test]
    fn append_flag_keeps_graph_signature() {
        let graph = temp_file(GRAPH);
        let path = graph.path().to_str().unwrap();
        let plain = run_json(&["blockdag", "--format", "json", "sign", path]);
        let appended = run_json(&["blockdag", "--format", "json", "sign", path, "--append"]);

        assert_eq!(appended["signatures"]["signature"], plain["signature"]);
        assert_eq!(
            appended["graph"]["vertices"]["b"]["data_hash"],
            plain["vertices"]["b"]["data_hash"]
        );
    }

    #[test]
    fn sign_text_uses_config_fields() {
        no_color();
        let graph = temp_file(GRAPH);
        let config = temp_file("data_fields = [\"data\"]\nappend = true\n");
        let out = run(&[
            "blockdag",
            "sign",
            graph.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
        ]);

        let edges_at = out.find(crate::render::EDGES_HEADER).unwrap();
        let vertices = &out[..edges_at];
        assert!(vertices.starts_with(crate::render::VERTICES_HEADER));
        assert!(vertices.contains("\"data_hash\""));
        assert!(out.lines().last().unwrap().starts_with("signature: "));
    }

    #[test]
    fn diff_with_config_ignores_unselected_fields() {
        no_color();
        let left = temp_file(GRAPH);
        let right = temp_file(&GRAPH.replace("\"x\"", "\"y\""));
        let config = temp_file("data_fields = [\"data\"]\n");
        let (l, r, c) = (
            left.path().to_str().unwrap(),
            right.path().to_str().unwrap(),
            config.path().to_str().unwrap(),
        );

        assert_eq!(run(&["blockdag", "diff", l, r, "--config", c]), "✓ Graphs are identical.\n");

        let out = run_json(&["blockdag", "--format", "json", "diff", l, r]);
        assert_eq!(out["identical"], json!(false));
        assert_eq!(out["only_in_left"], json!(["a", "b"]));
        assert_eq!(out["only_in_right"], json!(["a", "b"]));
    }

    #[test]
    fn compare_saved_signature_sets() {
        let graph = temp_file(GRAPH);
        let saved = run(&["blockdag", "--format", "json", "sign", graph.path().to_str().unwrap()]);
        let left = temp_file(&saved);
        let right = temp_file(&saved);
        let out = run_json(&[
            "blockdag",
            "--format",
            "json",
            "compare",
            left.path().to_str().unwrap(),
            right.path().to_str().unwrap(),
        ]);
        assert_eq!(out["identical"], json!(true));
    }
}
