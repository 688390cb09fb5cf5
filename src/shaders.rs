//! Shader source loading and the GLSL prelude.
//!
//! Example shaders are written in the classic WebGL1-flavoured dialect:
//! `attribute`, `varying`, `gl_FragColor`, with the `position`, `normal` and
//! `uv` attributes and the camera uniforms (`projectionMatrix`,
//! `modelViewMatrix`, `modelMatrix`, `viewMatrix`, `normalMatrix`,
//! `cameraPosition`, `isOrthographic`) available without declaration.
//! [`wrap_vertex`] and [`wrap_fragment`] prepend a GLSL ES 3.00 header that
//! makes that dialect compile on WebGL2. Sources that start with their own
//! `#version` line are passed through untouched.

use std::fmt;

use crate::error::PlaygroundError;
use crate::registry::Registry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Raw sources for one example, as authored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPair {
    pub vertex: &'static str,
    pub fragment: &'static str,
}

/// Resolves both sources of `name`; vertex falls back to the shared shader.
pub async fn load_shaders(registry: &Registry, name: &str) -> Result<ShaderPair, PlaygroundError> {
    let entry = registry.resolve(name)?;
    if entry.fragment.trim().is_empty() {
        return Err(PlaygroundError::MissingFragment(name.to_string()));
    }
    let vertex = match entry.vertex {
        Some(vertex) => vertex,
        None => {
            log::debug!("{name}: using shared vertex shader");
            registry.shared_vertex()
        }
    };
    Ok(ShaderPair {
        vertex,
        fragment: entry.fragment,
    })
}

/// Vertex attribute slots bound before linking.
pub const POSITION_ATTRIBUTE: (u32, &str) = (0, "position");
pub const UV_ATTRIBUTE: (u32, &str) = (1, "uv");
pub const NORMAL_ATTRIBUTE: (u32, &str) = (2, "normal");

const VERTEX_PRELUDE: &str = "#version 300 es
#define attribute in
#define varying out
#define texture2D texture
precision highp float;
precision highp int;
uniform mat4 modelMatrix;
uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;
uniform mat4 viewMatrix;
uniform mat3 normalMatrix;
uniform vec3 cameraPosition;
uniform bool isOrthographic;
attribute vec3 position;
attribute vec3 normal;
attribute vec2 uv;
";

const FRAGMENT_PRELUDE: &str = "#version 300 es
#define varying in
layout(location = 0) out highp vec4 pc_fragColor;
#define gl_FragColor pc_fragColor
#define texture2D texture
precision highp float;
precision highp int;
uniform mat4 viewMatrix;
uniform vec3 cameraPosition;
uniform bool isOrthographic;
";

pub fn wrap_vertex(source: &str) -> String {
    wrap(VERTEX_PRELUDE, source)
}

pub fn wrap_fragment(source: &str) -> String {
    wrap(FRAGMENT_PRELUDE, source)
}

fn wrap(prelude: &str, source: &str) -> String {
    if declares_version(source) {
        return source.to_string();
    }
    // #line keeps driver error positions pointing at the author's file
    format!("{prelude}#line 1\n{source}")
}

fn declares_version(source: &str) -> bool {
    source
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with("//"))
        .is_some_and(|line| line.starts_with("#version"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_goes_first() {
        let wrapped = wrap_fragment("void main() { gl_FragColor = vec4(1.0); }");
        assert!(wrapped.starts_with("#version 300 es\n"));
        assert!(wrapped.contains("#define gl_FragColor pc_fragColor"));
        assert!(wrapped.ends_with("void main() { gl_FragColor = vec4(1.0); }"));
    }

    #[test]
    fn vertex_prelude_declares_camera_and_attributes() {
        let wrapped = wrap_vertex("void main() {}");
        assert!(wrapped.contains("uniform mat4 projectionMatrix;"));
        assert!(wrapped.contains("uniform mat4 modelViewMatrix;"));
        assert!(wrapped.contains("attribute vec3 position;"));
        assert!(wrapped.contains("attribute vec2 uv;"));
        assert!(wrapped.contains("attribute vec3 normal;"));
        assert!(wrapped.contains("uniform mat3 normalMatrix;"));
        assert!(wrapped.contains("uniform vec3 cameraPosition;"));
        assert!(wrapped.contains("uniform bool isOrthographic;"));
    }

    #[test]
    fn fragment_prelude_declares_camera() {
        let wrapped = wrap_fragment("void main() {}");
        assert!(wrapped.contains("uniform mat4 viewMatrix;"));
        assert!(wrapped.contains("uniform vec3 cameraPosition;"));
        assert!(wrapped.contains("uniform bool isOrthographic;"));
        assert!(!wrapped.contains("attribute"));
    }

    #[test]
    fn versioned_sources_pass_through() {
        let source = "// raw es3\n#version 300 es\nprecision highp float;\nout vec4 o;\nvoid main() { o = vec4(1.0); }";
        assert_eq!(wrap_fragment(source), source);
        assert_eq!(wrap_vertex(source), source);
    }

    #[test]
    fn stage_names() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }
}
