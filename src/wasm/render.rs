use glam::{Mat3, Mat4};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::error::PlaygroundError;
use crate::shaders::{self, ShaderPair, ShaderStage, NORMAL_ATTRIBUTE, POSITION_ATTRIBUTE, UV_ATTRIBUTE};
use crate::uniforms::{self, UniformSet};
use crate::viewport::ViewportSize;

// 2x2 plane in the z = 0 plane, counter-clockwise
const QUAD_POSITIONS: [f32; 12] = [
    -1.0, -1.0, 0.0, //
    1.0, -1.0, 0.0, //
    -1.0, 1.0, 0.0, //
    1.0, 1.0, 0.0,
];
const QUAD_UVS: [f32; 8] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
const QUAD_NORMALS: [f32; 12] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 1, 3];

struct Locations {
    time: Option<WebGlUniformLocation>,
    resolution: Option<WebGlUniformLocation>,
    pointer: Option<WebGlUniformLocation>,
    projection: Option<WebGlUniformLocation>,
    model_view: Option<WebGlUniformLocation>,
    model: Option<WebGlUniformLocation>,
    view: Option<WebGlUniformLocation>,
    normal: Option<WebGlUniformLocation>,
    camera_position: Option<WebGlUniformLocation>,
    is_orthographic: Option<WebGlUniformLocation>,
}

/// Canvas, context, and the one quad the example shader runs on.
pub struct RenderSurface {
    canvas: HtmlCanvasElement,
    gl: GL,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    locations: Locations,
    projection: Mat4,
}

impl RenderSurface {
    pub fn new(canvas: HtmlCanvasElement, sources: &ShaderPair) -> Result<Self, JsValue> {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"antialias".into(), &JsValue::TRUE)?;
        let gl: GL = canvas
            .get_context_with_context_options("webgl2", &options)?
            .ok_or_else(|| PlaygroundError::WebGl("WebGL2 not supported".into()))?
            .dyn_into()?;

        let vertex = compile(&gl, ShaderStage::Vertex, &shaders::wrap_vertex(sources.vertex))?;
        let fragment = compile(&gl, ShaderStage::Fragment, &shaders::wrap_fragment(sources.fragment))?;
        let program = link(&gl, &vertex, &fragment)?;
        // the program keeps what it needs
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));

        let vao = upload_quad(&gl)?;
        let locations = Locations {
            time: gl.get_uniform_location(&program, uniforms::TIME),
            resolution: gl.get_uniform_location(&program, uniforms::RESOLUTION),
            pointer: gl.get_uniform_location(&program, uniforms::POINTER),
            projection: gl.get_uniform_location(&program, "projectionMatrix"),
            model_view: gl.get_uniform_location(&program, "modelViewMatrix"),
            model: gl.get_uniform_location(&program, "modelMatrix"),
            view: gl.get_uniform_location(&program, "viewMatrix"),
            normal: gl.get_uniform_location(&program, "normalMatrix"),
            camera_position: gl.get_uniform_location(&program, "cameraPosition"),
            is_orthographic: gl.get_uniform_location(&program, "isOrthographic"),
        };

        // the quad has to draw whichever way it faces
        gl.disable(GL::CULL_FACE);
        gl.disable(GL::DEPTH_TEST);

        Ok(Self {
            canvas,
            gl,
            program,
            vao,
            locations,
            projection: Mat4::orthographic_rh_gl(-1.0, 1.0, -1.0, 1.0, 0.0, 1.0),
        })
    }

    /// Sizes the backing store; CSS size is left to the page stylesheet.
    pub fn resize(&self, viewport: ViewportSize, device_pixel_ratio: f64) {
        let (width, height) = viewport.drawing_buffer(device_pixel_ratio);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn draw(&self, uniforms: &UniformSet) {
        let gl = &self.gl;
        gl.viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        let loc = &self.locations;
        gl.uniform1f(loc.time.as_ref(), uniforms.time);
        gl.uniform2f(loc.resolution.as_ref(), uniforms.resolution.x, uniforms.resolution.y);
        gl.uniform2f(loc.pointer.as_ref(), uniforms.pointer.x, uniforms.pointer.y);
        let identity = Mat4::IDENTITY.to_cols_array();
        gl.uniform_matrix4fv_with_f32_array(loc.projection.as_ref(), false, &self.projection.to_cols_array());
        gl.uniform_matrix4fv_with_f32_array(loc.model_view.as_ref(), false, &identity);
        gl.uniform_matrix4fv_with_f32_array(loc.model.as_ref(), false, &identity);
        gl.uniform_matrix4fv_with_f32_array(loc.view.as_ref(), false, &identity);
        gl.uniform_matrix3fv_with_f32_array(loc.normal.as_ref(), false, &Mat3::IDENTITY.to_cols_array());
        // camera sits at the origin looking down -z
        gl.uniform3f(loc.camera_position.as_ref(), 0.0, 0.0, 0.0);
        gl.uniform1i(loc.is_orthographic.as_ref(), 1);

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_elements_with_i32(GL::TRIANGLES, QUAD_INDICES.len() as i32, GL::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);
    }
}

fn compile(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader, PlaygroundError> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| PlaygroundError::WebGl(format!("unable to create {stage} shader")))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(PlaygroundError::Compile { stage, log })
    }
}

fn link(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram, PlaygroundError> {
    let program = gl
        .create_program()
        .ok_or_else(|| PlaygroundError::WebGl("unable to create program".into()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.bind_attrib_location(&program, POSITION_ATTRIBUTE.0, POSITION_ATTRIBUTE.1);
    gl.bind_attrib_location(&program, UV_ATTRIBUTE.0, UV_ATTRIBUTE.1);
    gl.bind_attrib_location(&program, NORMAL_ATTRIBUTE.0, NORMAL_ATTRIBUTE.1);
    gl.link_program(&program);

    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(PlaygroundError::Link(log))
    }
}

fn upload_quad(gl: &GL) -> Result<WebGlVertexArrayObject, PlaygroundError> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| PlaygroundError::WebGl("unable to create vertex array".into()))?;
    gl.bind_vertex_array(Some(&vao));

    for (slot, data, size) in [
        (POSITION_ATTRIBUTE.0, &QUAD_POSITIONS[..], 3),
        (UV_ATTRIBUTE.0, &QUAD_UVS[..], 2),
        (NORMAL_ATTRIBUTE.0, &QUAD_NORMALS[..], 3),
    ] {
        let buffer = gl
            .create_buffer()
            .ok_or_else(|| PlaygroundError::WebGl("unable to create vertex buffer".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &js_sys::Float32Array::from(data), GL::STATIC_DRAW);
        gl.enable_vertex_attrib_array(slot);
        gl.vertex_attrib_pointer_with_i32(slot, size, GL::FLOAT, false, 0, 0);
    }

    let indices = gl
        .create_buffer()
        .ok_or_else(|| PlaygroundError::WebGl("unable to create index buffer".into()))?;
    gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&indices));
    gl.buffer_data_with_array_buffer_view(
        GL::ELEMENT_ARRAY_BUFFER,
        &js_sys::Uint16Array::from(&QUAD_INDICES[..]),
        GL::STATIC_DRAW,
    );

    gl.bind_vertex_array(None);
    Ok(vao)
}
