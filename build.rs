// Generates the example manifest from `shaders/`.
use std::fmt::Write as _;
use std::{env, fs, path::Path};

const SHADER_DIR: &str = "shaders";
const FRAGMENT_FILE: &str = "frag.glsl";
const VERTEX_FILE: &str = "vert.glsl";

fn main() {
    println!("cargo:rerun-if-changed={SHADER_DIR}");
    println!("cargo:rerun-if-env-changed=SHADER_EXAMPLE");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let shader_root = Path::new(&manifest_dir).join(SHADER_DIR);
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");

    let generated = generate_manifest(&shader_root);
    fs::write(Path::new(&out_dir).join("examples.rs"), generated)
        .expect("failed to write example manifest");
}

/// Every `shaders/<name>/frag.glsl` becomes one entry; `vert.glsl` next to it is optional.
fn generate_manifest(shader_root: &Path) -> String {
    let shared_vertex = shader_root.join(VERTEX_FILE);
    if !shared_vertex.is_file() {
        panic!("missing shared vertex shader at {}", shared_vertex.display());
    }

    let mut dirs: Vec<_> = fs::read_dir(shader_root)
        .expect("failed to read shaders/")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir() && path.join(FRAGMENT_FILE).is_file())
        .collect();
    // stable output; display order is decided at runtime
    dirs.sort();

    let mut out = String::from("// @generated by build.rs from shaders/\n\n");
    writeln!(
        out,
        "pub(crate) const SHARED_VERTEX: &str = include_str!({:?});\n",
        shared_vertex.display().to_string()
    )
    .unwrap();
    out.push_str("pub(crate) const EXAMPLES: &[ManifestEntry] = &[\n");
    for dir in &dirs {
        let Some(name) = dir.file_name().and_then(|n| n.to_str()) else {
            println!("cargo:warning=skipping non UTF-8 example directory {}", dir.display());
            continue;
        };
        let fragment = dir.join(FRAGMENT_FILE).display().to_string();
        let vertex_path = dir.join(VERTEX_FILE);
        let vertex = if vertex_path.is_file() {
            format!("Some(include_str!({:?}))", vertex_path.display().to_string())
        } else {
            "None".to_string()
        };
        writeln!(
            out,
            "    ManifestEntry {{ name: {name:?}, fragment: include_str!({fragment:?}), vertex: {vertex} }},"
        )
        .unwrap();
    }
    out.push_str("];\n");
    out
}
