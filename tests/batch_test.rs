mod common;

use cgmath::vec2;
use common::test_utils::{BackendCall, recording_renderer};
use ember2d::{MAX_QUADS, MAX_TEXTURE_SLOTS, TextureHandle, VERTICES_PER_QUAD};

fn handle(native_id: u32) -> TextureHandle {
    TextureHandle {
        width: 4,
        height: 4,
        native_id,
    }
}

#[test]
fn draw_texture_appends_six_vertices() {
    let (mut gfx, log) = recording_renderer();

    gfx.draw_texture(handle(5), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    assert_eq!(gfx.quad_count(), 1);

    gfx.flush();
    let log = log.borrow();
    assert_eq!(log.submit_count(), 1);
    assert_eq!(log.submissions[0].len(), VERTICES_PER_QUAD);
}

#[test]
fn no_implicit_flush_within_capacity() {
    let (mut gfx, log) = recording_renderer();

    // Full quad buffer over the full slot table, still one batch.
    for i in 0..MAX_QUADS {
        let id = (i % MAX_TEXTURE_SLOTS) as u32 + 10;
        gfx.draw_texture(handle(id), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    }
    assert_eq!(log.borrow().submit_count(), 0);
    assert_eq!(gfx.quad_count(), MAX_QUADS);
    assert_eq!(gfx.slot_count(), MAX_TEXTURE_SLOTS);

    // The 1001st quad forces a synchronous flush before being buffered.
    gfx.draw_texture(handle(10), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    assert_eq!(log.borrow().submit_count(), 1);
    assert_eq!(
        log.borrow().submissions[0].len(),
        MAX_QUADS * VERTICES_PER_QUAD
    );
    assert_eq!(gfx.quad_count(), 1);
}

#[test]
fn ninth_distinct_texture_flushes() {
    let (mut gfx, log) = recording_renderer();

    for id in 1..=MAX_TEXTURE_SLOTS as u32 {
        gfx.draw_texture(handle(id * 100), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    }
    assert_eq!(log.borrow().submit_count(), 0);
    assert_eq!(gfx.slot_count(), MAX_TEXTURE_SLOTS);

    gfx.draw_texture(handle(999), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    assert_eq!(log.borrow().submit_count(), 1);
    assert_eq!(
        log.borrow().submissions[0].len(),
        MAX_TEXTURE_SLOTS * VERTICES_PER_QUAD
    );
    // The ninth texture starts the fresh batch at slot zero.
    assert_eq!(gfx.slot_count(), 1);
    assert_eq!(gfx.quad_count(), 1);
}

#[test]
fn repeated_texture_reuses_slot() {
    let (mut gfx, log) = recording_renderer();

    gfx.draw_texture(handle(7), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    gfx.draw_texture(handle(7), vec2(5.0, 5.0), vec2(1.0, 1.0), [1.0; 4]);
    gfx.draw_texture(handle(9), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    assert_eq!(gfx.slot_count(), 2);

    gfx.flush();
    let log = log.borrow();
    assert_eq!(log.binds(), vec![(0, 7), (1, 9)]);
    let vertices = &log.submissions[0];
    assert!(vertices[..12].iter().all(|v| v.tex_index == 0));
    assert!(vertices[12..].iter().all(|v| v.tex_index == 1));
}

#[test]
fn flush_resets_batch_state() {
    let (mut gfx, log) = recording_renderer();

    gfx.draw_texture(handle(3), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    gfx.draw_texture(handle(4), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    gfx.flush();
    assert_eq!(gfx.quad_count(), 0);
    assert_eq!(gfx.slot_count(), 0);

    // Flushing an empty batch submits nothing.
    gfx.flush();
    assert_eq!(log.borrow().submit_count(), 1);

    // A fresh batch starts its slot table from zero again.
    gfx.draw_texture(handle(4), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    gfx.flush();
    assert_eq!(&log.borrow().binds()[2..], &[(0, 4)]);
}

#[test]
fn unit_quad_translate_then_scale() {
    let (mut gfx, log) = recording_renderer();

    gfx.draw_rect(vec2(10.0, 10.0), vec2(20.0, 20.0), [1.0, 0.0, 0.0, 1.0]);
    gfx.flush();

    let log = log.borrow();
    let vertices = &log.submissions[0];
    assert_eq!(vertices.len(), VERTICES_PER_QUAD);
    for vertex in vertices {
        assert_eq!(vertex.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(vertex.tex_index, 0);
        assert_eq!(vertex.position[3], 1.0);
    }
    let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
    let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
    assert_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), 0.0);
    assert_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 20.0);
    assert_eq!(ys.iter().cloned().fold(f32::INFINITY, f32::min), 0.0);
    assert_eq!(ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 20.0);
}

#[test]
fn draw_rect_shares_the_textured_path() {
    let (mut gfx, log) = recording_renderer();

    gfx.draw_rect(vec2(0.0, 0.0), vec2(2.0, 2.0), [1.0; 4]);
    gfx.draw_texture(handle(5), vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    gfx.flush();

    // The reserved white texture occupies slot 0, the real texture slot 1.
    let white = gfx.white_texture();
    assert_eq!(white.native_id, 1);
    assert_eq!(log.borrow().binds(), vec![(0, 1), (1, 5)]);
}

#[test]
fn clear_does_not_disturb_the_batch() {
    let (mut gfx, log) = recording_renderer();

    gfx.draw_rect(vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    gfx.clear([0.1, 0.2, 0.3, 1.0]);
    gfx.draw_rect(vec2(1.0, 1.0), vec2(1.0, 1.0), [1.0; 4]);
    gfx.flush();

    let log = log.borrow();
    assert_eq!(log.submit_count(), 1);
    assert_eq!(log.submissions[0].len(), 2 * VERTICES_PER_QUAD);
    assert!(
        log.calls
            .iter()
            .any(|call| *call == BackendCall::Clear([0.1, 0.2, 0.3, 1.0]))
    );
}

#[test]
fn zero_handle_draw_is_skipped() {
    let (mut gfx, log) = recording_renderer();

    gfx.draw_texture(TextureHandle::NONE, vec2(0.0, 0.0), vec2(1.0, 1.0), [1.0; 4]);
    assert_eq!(gfx.quad_count(), 0);

    gfx.flush();
    assert_eq!(log.borrow().submit_count(), 0);
}

#[test]
fn draw_line_emits_a_rotated_quad() {
    let (mut gfx, log) = recording_renderer();

    gfx.draw_line(vec2(0.0, 0.0), vec2(10.0, 0.0), 2.0, [1.0; 4]);
    gfx.flush();

    let log = log.borrow();
    let vertices = &log.submissions[0];
    assert_eq!(vertices.len(), VERTICES_PER_QUAD);
    let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
    let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
    assert_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), 0.0);
    assert_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 10.0);
    assert_eq!(ys.iter().cloned().fold(f32::INFINITY, f32::min), -1.0);
    assert_eq!(ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 1.0);
}

#[test]
fn draw_rect_lines_outlines_with_four_quads() {
    let (mut gfx, log) = recording_renderer();

    gfx.draw_rect_lines(vec2(10.0, 10.0), vec2(20.0, 20.0), 1.0, [1.0; 4]);
    assert_eq!(gfx.quad_count(), 4);

    gfx.flush();
    assert_eq!(log.borrow().submissions[0].len(), 4 * VERTICES_PER_QUAD);
}
