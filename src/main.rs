//! Diagram editor CLI
//!
//! Usage:
//!   diagram-editor [OPTIONS] [FILE]
//!
//! Reads a diagram model (JSON) from a file or stdin, optionally runs a
//! layout pass and a list of geometry operations against it, and prints
//! the resulting model as JSON.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;

use diagram_editor::{
    DiagramModel, Editor, EditorConfig, GeometryOperation, MarkerNavigator, SeverityFilter,
};

#[derive(Parser)]
#[command(name = "diagram-editor")]
#[command(about = "Box layout and geometry commands for diagram models")]
struct Cli {
    /// Input model file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Configuration profile with layout defaults (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a layout pass over all containers before other steps
    #[arg(short, long)]
    layout: bool,

    /// Apply geometry operations from a JSON file (array of operations)
    #[arg(short, long)]
    operations: Option<PathBuf>,

    /// Validate the model and list issue markers in reading order
    #[arg(short = 'v', long)]
    validate: bool,

    /// Debug mode: print the bounds tree to stderr
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if cli.input.is_none() && io::stdin().is_terminal() {
        eprintln!("No input. Pass a model file or pipe JSON to stdin; see --help.");
        std::process::exit(2);
    }

    // Load configuration
    let config = match &cli.config {
        Some(path) => match EditorConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => EditorConfig::default(),
    };

    // Read the model
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };
    let model: DiagramModel = match serde_json::from_str(&source) {
        Ok(model) => model,
        Err(e) => {
            eprintln!("Error parsing model JSON: {}", e);
            std::process::exit(1);
        }
    };

    let mut editor = Editor::new(model, config);

    if cli.layout {
        if let Err(e) = editor.layout_all() {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }

    // Apply operations
    if let Some(path) = &cli.operations {
        let operations: Vec<GeometryOperation> = match fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()))
        {
            Ok(ops) => ops,
            Err(e) => {
                eprintln!("Error reading operations '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        };
        for operation in operations {
            let changed = editor.execute(operation);
            if cli.debug {
                eprintln!("operation changed {} element(s)", changed);
            }
        }
    }

    if cli.validate {
        let markers = editor.validate();
        let navigator = MarkerNavigator::reading_order();
        let mut current = None;
        for _ in 0..markers.len() {
            let marker = match navigator.next(&markers, current, SeverityFilter::All) {
                Some(m) => m,
                None => break,
            };
            for issue in &marker.issues {
                eprintln!("{:?}: {}: {}", issue.severity, marker.element_id, issue.message);
            }
            current = Some(marker);
        }
    }

    if cli.debug {
        eprintln!("=== Bounds Tree ===");
        eprint!("{}", editor.debug_tree());
        eprintln!("===================");
    }

    match serde_json::to_string_pretty(&editor.model) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing model: {}", e);
            std::process::exit(1);
        }
    }
}
