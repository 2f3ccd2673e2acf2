//! precision-field CLI
//!
//! Inspect the built-in scenes: generated GLSL, canonical IR and digests.

#![allow(clippy::uninlined_format_args, clippy::needless_pass_by_value)]

#[cfg(feature = "cli")]
use precision_field::fixtures;
#[cfg(feature = "cli")]
use precision_field::prelude::*;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "precision-field")]
#[command(version = precision_field::VERSION)]
#[command(about = "precision-field: 2D SDF compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Print the GLSL for a scene
    Shader {
        /// Built-in scene name
        #[arg(short, long, default_value = "demo_scene")]
        fixture: String,
        /// Wrap `map` in the editor's full fragment shader
        #[arg(long)]
        fragment: bool,
        /// Decimal places for numeric literals
        #[arg(short, long, default_value = "4")]
        precision: usize,
    },

    /// Print the canonical IR text for a scene
    Ir {
        /// Built-in scene name
        #[arg(short, long, default_value = "demo_scene")]
        fixture: String,
    },

    /// Print the digest of every built-in scene
    Digest,

    /// List built-in scenes with node counts
    List,
}

#[cfg(feature = "cli")]
fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Shader {
            fixture,
            fragment,
            precision,
        } => cmd_shader(fixture, fragment, precision),
        Commands::Ir { fixture } => cmd_ir(fixture),
        Commands::Digest => cmd_digest(),
        Commands::List => cmd_list(),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI not enabled. Build with --features cli");
    std::process::exit(1);
}

#[cfg(feature = "cli")]
fn load_fixture(name: &str) -> FieldNode {
    let Some(tree) = fixtures::by_name(name) else {
        eprintln!("Unknown fixture: {}", name);
        eprintln!("Available: {}", fixtures::NAMES.join(", "));
        std::process::exit(1);
    };
    if let Err(e) = validate(&tree) {
        eprintln!("Invalid scene {}: {}", name, e);
        std::process::exit(1);
    }
    tree
}

#[cfg(feature = "cli")]
fn cmd_shader(fixture: String, fragment: bool, precision: usize) {
    let tree = load_fixture(&fixture);
    let config = CodegenConfig {
        precision,
        ..Default::default()
    };
    let program = ShaderProgram::transpile_with_config(Some(&tree), &config);
    if fragment {
        println!("{}", program.to_fragment_shader());
    } else {
        println!("{}", program.source());
    }
}

#[cfg(feature = "cli")]
fn cmd_ir(fixture: String) {
    let tree = load_fixture(&fixture);
    match precision_field::ir::try_serialize(&compile(Some(&tree))) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("Serialize error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn cmd_digest() {
    for name in fixtures::NAMES {
        let tree = load_fixture(name);
        println!("{:<18} {}", name, fingerprint(Some(&tree)));
    }
}

#[cfg(feature = "cli")]
fn cmd_list() {
    for name in fixtures::NAMES {
        let tree = load_fixture(name);
        let primitives = collect_primitives(Some(&tree)).len();
        println!(
            "{:<18} nodes: {:>3}  primitives: {:>3}  root: {}",
            name,
            tree.node_count(),
            primitives,
            tree.kind()
        );
    }
}
