mod common;

use bindery_engine::buffer::FeedbackBuffer;
use bindery_engine::device::{FeedbackPrimitive, IndexedTarget};
use bindery_engine::error::ResourceKind;
use bindery_engine::feedback::{
    bind_feedback_outputs, FeedbackOutput, FeedbackState, TransformFeedback,
};
use bindery_engine::{BufferObject, ResourceError};

use common::setup;

#[test]
fn capture_region_closes_once() {
    let (device, ctx) = setup();
    let out = FeedbackBuffer::zeroed(&ctx, 64).unwrap();
    let tf = TransformFeedback::new(&ctx, &[FeedbackOutput::whole(&out)]).unwrap();

    tf.begin(FeedbackPrimitive::Points).unwrap();
    assert_eq!(tf.state(), FeedbackState::Capturing);
    assert_eq!(device.feedback_active(), Some(FeedbackPrimitive::Points));

    tf.end().unwrap();
    assert_eq!(tf.state(), FeedbackState::Bound);
    assert_eq!(device.feedback_active(), None);

    assert_eq!(
        tf.end(),
        Err(ResourceError::InvalidFeedbackState {
            op: "end",
            state: FeedbackState::Bound,
        })
    );
    assert_eq!(device.count_calls("end_transform_feedback"), 1);
    assert!(device.take_errors().is_empty());
}

#[test]
fn outputs_receive_captured_varyings_by_position() {
    let (device, ctx) = setup();
    let positions = FeedbackBuffer::zeroed(&ctx, 16).unwrap();
    let velocities = FeedbackBuffer::zeroed(&ctx, 16).unwrap();
    let tf = TransformFeedback::new(
        &ctx,
        &[FeedbackOutput::whole(&positions), FeedbackOutput::whole(&velocities)],
    )
    .unwrap();

    tf.begin(FeedbackPrimitive::Points).unwrap();
    let pos: [f32; 4] = [1.0, 2.0, 3.0, 4.0];
    let vel: [f32; 4] = [-1.0, -2.0, -3.0, -4.0];
    assert_eq!(device.emit_feedback(0, bytemuck::cast_slice(&pos)), 16);
    assert_eq!(device.emit_feedback(1, bytemuck::cast_slice(&vel)), 16);
    tf.end().unwrap();

    assert_eq!(positions.buffer().read_back().unwrap(), bytemuck::cast_slice::<f32, u8>(&pos));
    assert_eq!(velocities.buffer().read_back().unwrap(), bytemuck::cast_slice::<f32, u8>(&vel));
}

#[test]
fn output_ranges_clip_the_capture() {
    let (device, ctx) = setup();
    let out = FeedbackBuffer::zeroed(&ctx, 8).unwrap();
    let tf = TransformFeedback::new(&ctx, &[FeedbackOutput::new(&out, 4, 4)]).unwrap();

    tf.begin(FeedbackPrimitive::Points).unwrap();
    assert_eq!(device.emit_feedback(0, &[9; 8]), 4);
    tf.end().unwrap();

    assert_eq!(device.contents(out.handle()).unwrap(), vec![0, 0, 0, 0, 9, 9, 9, 9]);
}

#[test]
fn each_capture_restarts_at_the_range_start() {
    let (device, ctx) = setup();
    let out = FeedbackBuffer::zeroed(&ctx, 8).unwrap();
    let tf = TransformFeedback::new(&ctx, &[FeedbackOutput::whole(&out)]).unwrap();

    tf.begin(FeedbackPrimitive::Points).unwrap();
    device.emit_feedback(0, &[1; 4]);
    tf.end().unwrap();

    tf.begin(FeedbackPrimitive::Points).unwrap();
    device.emit_feedback(0, &[2; 4]);
    tf.end().unwrap();

    assert_eq!(device.contents(out.handle()).unwrap(), vec![2, 2, 2, 2, 0, 0, 0, 0]);
}

#[test]
fn output_slots_belong_to_the_feedback_object() {
    let (device, ctx) = setup();
    let out = FeedbackBuffer::zeroed(&ctx, 16).unwrap();
    let tf = TransformFeedback::new(&ctx, &[FeedbackOutput::whole(&out)]).unwrap();
    assert_eq!(
        device
            .indexed_binding(IndexedTarget::TransformFeedback, 0)
            .map(|slot| slot.buffer),
        Some(out.handle())
    );

    tf.unbind().unwrap();
    assert_eq!(tf.state(), FeedbackState::Unbound);
    assert!(device.indexed_binding(IndexedTarget::TransformFeedback, 0).is_none());

    tf.bind().unwrap();
    assert!(device.indexed_binding(IndexedTarget::TransformFeedback, 0).is_some());
}

#[test]
fn extra_outputs_bind_after_construction() {
    let (device, ctx) = setup();
    let first = FeedbackBuffer::zeroed(&ctx, 16).unwrap();
    let second = FeedbackBuffer::zeroed(&ctx, 16).unwrap();
    let tf = TransformFeedback::new(&ctx, &[FeedbackOutput::whole(&first)]).unwrap();

    bind_feedback_outputs(&ctx, &[FeedbackOutput::whole(&second)], 1);

    let slot = device
        .indexed_binding(IndexedTarget::TransformFeedback, 1)
        .unwrap();
    assert_eq!(slot.buffer, second.handle());
    assert_eq!(tf.outputs().len(), 1);
}

#[test]
fn allocation_failure_is_a_creation_error() {
    let (device, ctx) = setup();
    device.set_fail_allocations(true);

    let err = TransformFeedback::new(&ctx, &[]).unwrap_err();
    assert_eq!(
        err,
        ResourceError::ResourceCreation {
            kind: ResourceKind::TransformFeedback,
            target: None,
        }
    );
}
