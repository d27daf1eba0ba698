//! Headless walkthrough of the bindery resource model on the soft device:
//! an indexed, interleaved quad with a camera uniform block, followed by one
//! transform feedback pass that advances a handful of particles.

use anyhow::{Context, Result};
use bindery_engine::buffer::{
    AttributeDesc, FeedbackBuffer, IndexBuffer, UniformBuffer, VertexBuffer,
};
use bindery_engine::data::TypedData;
use bindery_engine::device::soft::SoftDevice;
use bindery_engine::device::{BufferUsage, DeviceContext, FeedbackPrimitive, ScalarType};
use bindery_engine::feedback::{FeedbackOutput, TransformFeedback};
use bindery_engine::logging::{init_logging, LoggingConfig};
use bindery_engine::program::{ProgramInterface, ProgramLayout};
use bindery_engine::vertex_array::VertexArray;
use bindery_engine::BufferObject;
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Vertex {
    pos: [f32; 2],
    color: [u8; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Camera {
    scale: [f32; 2],
    offset: [f32; 2],
    tint: [f32; 3],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct Particle {
    pos: [f32; 2],
    vel: [f32; 2],
}

const QUAD: [Vertex; 4] = [
    Vertex {
        pos: [-0.5, -0.5],
        color: [255, 0, 0, 255],
    },
    Vertex {
        pos: [0.5, -0.5],
        color: [0, 255, 0, 255],
    },
    Vertex {
        pos: [0.5, 0.5],
        color: [0, 0, 255, 255],
    },
    Vertex {
        pos: [-0.5, 0.5],
        color: [255, 255, 255, 255],
    },
];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

const STEP: f32 = 1.0 / 60.0;

fn main() -> Result<()> {
    init_logging(LoggingConfig::with_filter("bindery_engine=debug,info"));

    let device = SoftDevice::new();
    let ctx = DeviceContext::new(device.clone());
    ctx.set_viewport(0, 0, 820, 560);

    draw_quad(&device, &ctx).context("quad pass failed")?;
    advance_particles(&device, &ctx).context("particle pass failed")?;

    let errors = device.take_errors();
    for err in &errors {
        log::error!("{err}");
    }
    anyhow::ensure!(errors.is_empty(), "device reported {} error(s)", errors.len());

    log::info!("{} device calls issued", device.calls().len());
    Ok(())
}

fn draw_quad(device: &SoftDevice, ctx: &DeviceContext) -> Result<()> {
    let program = device
        .create_program(
            ProgramLayout::new()
                .attribute("a_position", 0)
                .attribute("a_color", 1)
                .uniform_block("Camera"),
        )
        .context("could not allocate the quad program")?;
    ctx.use_program(Some(program.handle()));

    let stride = std::mem::size_of::<Vertex>() as u32;
    let vbo = VertexBuffer::new(
        ctx,
        &program,
        TypedData::U8(bytemuck::cast_slice(&QUAD)),
        &[
            AttributeDesc::new("a_position", 2).stride(stride),
            AttributeDesc::new("a_color", 4)
                .ty(ScalarType::UnsignedByte)
                .normalized(true)
                .stride(stride)
                .offset(8),
        ],
        BufferUsage::StaticDraw,
    )?;
    let ibo = IndexBuffer::new(ctx, TypedData::from(&QUAD_INDICES), BufferUsage::StaticDraw)?;
    let vao = VertexArray::new(ctx, &[&vbo], Some(&ibo))?;

    let camera = Camera {
        scale: [1.0, 820.0 / 560.0],
        offset: [0.0, 0.0],
        tint: [1.0, 0.9, 0.8],
    };
    let ubo = UniformBuffer::new(
        ctx,
        &program,
        "Camera",
        TypedData::F32(bytemuck::cast_slice(std::slice::from_ref(&camera))),
        BufferUsage::DynamicDraw,
    )?;
    log::info!(
        "camera block {} at slot {}: {} bytes uploaded ({} raw)",
        ubo.block_index(),
        ubo.binding(),
        ubo.buffer().byte_len(),
        std::mem::size_of::<Camera>()
    );

    // Recolor the first two corners in place; positions stay untouched.
    vbo.upload_attribute("a_color", TypedData::U8(&[0, 0, 0, 255, 255, 255, 0, 255]))?;

    vao.bind();
    let attrib = device.vertex_attrib(1);
    log::info!(
        "draw {} {} indices from {}: a_color = {} x {} (normalized: {})",
        ibo.count(),
        ibo.index_type(),
        vao.handle(),
        attrib.size,
        attrib.ty,
        attrib.normalized
    );
    vao.unbind();

    ctx.use_program(None);
    Ok(())
}

fn advance_particles(device: &SoftDevice, ctx: &DeviceContext) -> Result<()> {
    let particles = [
        Particle {
            pos: [0.0, 0.0],
            vel: [1.0, 0.0],
        },
        Particle {
            pos: [0.2, 0.4],
            vel: [0.0, -2.0],
        },
        Particle {
            pos: [-0.3, 0.1],
            vel: [0.5, 0.5],
        },
    ];
    let byte_len = particles.len() * std::mem::size_of::<[f32; 2]>();

    let program = device
        .create_program(ProgramLayout::new().attribute("a_particle", 0))
        .context("could not allocate the update program")?;
    ctx.use_program(Some(program.handle()));

    let out = FeedbackBuffer::zeroed(ctx, byte_len)?;
    let tf = TransformFeedback::new(ctx, &[FeedbackOutput::whole(&out)])?;

    tf.begin(FeedbackPrimitive::Points)?;
    // The soft device runs no shaders; emit what the update stage would write.
    for p in &particles {
        let next = [p.pos[0] + p.vel[0] * STEP, p.pos[1] + p.vel[1] * STEP];
        device.emit_feedback(0, bytemuck::bytes_of(&next));
    }
    tf.end()?;

    let bytes = out
        .buffer()
        .read_back()
        .context("soft device cannot read buffers back")?;
    for (i, chunk) in bytes.chunks_exact(8).enumerate() {
        let pos: [f32; 2] = bytemuck::pod_read_unaligned(chunk);
        log::info!("particle {i}: ({:.4}, {:.4})", pos[0], pos[1]);
    }

    tf.unbind()?;
    ctx.use_program(None);
    Ok(())
}
