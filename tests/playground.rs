#![cfg(not(target_arch = "wasm32"))]

use glam::Vec2;
use shader_playground::navigate::{neighbour, Direction};
use shader_playground::{
    load_shaders, FrameClock, ManifestEntry, PlaygroundError, Registry, Selection, UniformSet, ViewportSize,
};

const SHARED_VERTEX: &str = "varying vec2 vUv;\nvoid main() { vUv = uv; gl_Position = vec4(position, 1.0); }\n";

fn manifest() -> Registry {
    Registry::from_manifest(
        &[
            ManifestEntry {
                name: "10-x",
                fragment: "void main() { gl_FragColor = vec4(0.0); }",
                vertex: None,
            },
            ManifestEntry {
                name: "2-x",
                fragment: "void main() { gl_FragColor = vec4(0.5); }",
                vertex: Some("void main() { gl_Position = vec4(position, 1.0); }"),
            },
            ManifestEntry {
                name: "1-x",
                fragment: "void main() { gl_FragColor = vec4(1.0); }",
                vertex: None,
            },
        ],
        SHARED_VERTEX,
    )
}

#[test]
fn registry_orders_numbers_by_value() {
    assert_eq!(manifest().names(), vec!["1-x", "2-x", "10-x"]);
}

#[test]
fn query_parameter_beats_override_and_default() {
    let registry = manifest();
    for name in registry.names() {
        let selection = Selection::resolve(&registry, Some(name), Some("10-x")).unwrap();
        assert_eq!(selection.current, name);
    }
}

#[test]
fn without_query_override_then_first_entry() {
    let registry = manifest();
    let with_override = Selection::resolve(&registry, None, Some("2-x")).unwrap();
    assert_eq!(with_override.current, "2-x");
    let without = Selection::resolve(&registry, None, None).unwrap();
    assert_eq!(without.current, "1-x");
}

#[test]
fn unknown_example_stops_startup() {
    let registry = manifest();
    let err = Selection::resolve(&registry, Some("does-not-exist"), None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown example \"does-not-exist\". Available: 1-x, 2-x, 10-x"
    );
    // loading never gets a chance to hand out sources either
    let load = pollster::block_on(load_shaders(&registry, "does-not-exist"));
    assert!(matches!(load, Err(PlaygroundError::UnknownExample { .. })));
}

#[test]
fn missing_vertex_gets_shared_text_verbatim() {
    let registry = manifest();
    let pair = pollster::block_on(load_shaders(&registry, "10-x")).unwrap();
    assert_eq!(pair.vertex.as_bytes(), SHARED_VERTEX.as_bytes());
    assert_eq!(pair.fragment, "void main() { gl_FragColor = vec4(0.0); }");
}

#[test]
fn own_vertex_is_kept() {
    let registry = manifest();
    let pair = pollster::block_on(load_shaders(&registry, "2-x")).unwrap();
    assert_eq!(pair.vertex, "void main() { gl_Position = vec4(position, 1.0); }");
}

#[test]
fn blank_fragment_is_rejected() {
    let registry = Registry::from_manifest(
        &[ManifestEntry {
            name: "01-empty",
            fragment: "  \n",
            vertex: None,
        }],
        SHARED_VERTEX,
    );
    let err = pollster::block_on(load_shaders(&registry, "01-empty")).unwrap_err();
    assert_eq!(err, PlaygroundError::MissingFragment("01-empty".into()));
}

#[test]
fn navigation_wraps_both_ways() {
    let names = manifest().names();
    assert_eq!(neighbour(&names, "10-x", Direction::Next), Some("1-x"));
    assert_eq!(neighbour(&names, "1-x", Direction::Previous), Some("10-x"));
}

#[test]
fn two_second_gap_is_clamped() {
    let mut clock = FrameClock::new(0.0);
    let mut uniforms = UniformSet::default();
    uniforms.advance(clock.tick(16.0));
    let before = uniforms.time;
    uniforms.advance(clock.tick(2_016.0));
    assert!(uniforms.time - before <= 0.05 + f32::EPSILON);
    assert!(uniforms.time >= before);
}

#[test]
fn pointer_y_is_flipped() {
    let height = 900.0;
    let mut uniforms = UniformSet::default();
    uniforms.set_pointer_from_client(10.0, 0.0, height);
    assert_eq!(uniforms.pointer, Vec2::new(10.0, 900.0));
}

#[test]
fn resize_sets_resolution_and_surface() {
    let viewport = ViewportSize::from_css(1024.0, 768.0);
    let mut uniforms = UniformSet::default();
    uniforms.set_resolution(viewport);
    assert_eq!(uniforms.resolution, Vec2::new(1024.0, 768.0));
    assert_eq!(viewport.drawing_buffer(1.0), (1024, 768));
    assert_eq!(viewport.drawing_buffer(4.0), (2048, 1536));
}

#[test]
fn bundled_examples_all_load() {
    let registry = Registry::embedded();
    assert!(!registry.is_empty());
    for name in registry.names() {
        let pair = pollster::block_on(load_shaders(&registry, name)).unwrap();
        assert!(pair.fragment.contains("main"));
        assert!(pair.vertex.contains("gl_Position"));
    }
}

#[test]
fn embedded_registry_lists_every_shader_directory() {
    let shader_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("shaders");
    let mut on_disk: Vec<String> = std::fs::read_dir(&shader_root)
        .unwrap()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.join("frag.glsl").is_file())
        .filter_map(|path| path.file_name()?.to_str().map(str::to_string))
        .collect();
    on_disk.sort_by(|a, b| shader_playground::registry::numeric_aware_cmp(a, b));

    let registry = Registry::embedded();
    assert_eq!(registry.names(), on_disk);
    assert_eq!(
        registry.shared_vertex(),
        std::fs::read_to_string(shader_root.join("vert.glsl")).unwrap()
    );
}
