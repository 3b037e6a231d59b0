use glam::Vec2;

use underline_text::config::TextStyle;
use underline_text::engine::Color;
use underline_text::error::UnderlineError;
use underline_text::renderer::Frame;
use underline_text::renderer::line::LineSegment;
use underline_text::renderer::text::Font;
use underline_text::scene::{SceneGraph, SceneHost, TextDisplay};

fn scene() -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add_font(Font::monospace(10, 20));
    scene
}

fn style() -> TextStyle {
    TextStyle { font_size: 20.0, word_wrap_width: 100.0, ..TextStyle::default() }
}

fn segment(length: f32) -> LineSegment {
    LineSegment { length, thickness: 2.0, color: Color::UNDERLINE_RED }
}

// -- node lifecycle / generational safety -----------------------------------

#[test]
fn add_group_returns_unique_nodes() {
    let mut scene = scene();
    let a = scene.add_group(None).unwrap();
    let b = scene.add_group(None).unwrap();
    assert_ne!(a, b);
    assert_eq!(scene.roots(), &[a, b]);
}

#[test]
fn destroy_marks_node_dead() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    assert!(scene.contains(g));
    assert!(scene.destroy(g));
    assert!(!scene.contains(g));
    assert!(scene.roots().is_empty());
}

#[test]
fn destroy_dead_node_returns_false() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    scene.destroy(g);
    assert!(!scene.destroy(g));
}

#[test]
fn generation_prevents_stale_access() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let old = scene.add_line(g, Vec2::ZERO, segment(10.0)).unwrap();
    scene.destroy(old);

    let new = scene.add_line(g, Vec2::ZERO, segment(20.0)).unwrap();
    assert_eq!(old.id(), new.id()); // recycled slot
    assert_ne!(old.generation(), new.generation());
    assert!(scene.line(old).is_none());
    assert_eq!(scene.line(new).map(|l| l.length), Some(20.0));
}

#[test]
fn destroy_cascades_to_children() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let t = scene.add_text(g, Vec2::ZERO, "hi", style()).unwrap();
    let l = scene.add_line(t, Vec2::ZERO, segment(10.0)).unwrap();
    assert_eq!(scene.len(), 3);

    scene.destroy(g);
    assert!(!scene.contains(t));
    assert!(!scene.contains(l));
    assert!(scene.is_empty());
}

#[test]
fn destroy_child_detaches_from_parent() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let a = scene.add_line(g, Vec2::ZERO, segment(1.0)).unwrap();
    let b = scene.add_line(g, Vec2::ZERO, segment(2.0)).unwrap();
    scene.destroy(a);
    assert_eq!(scene.children(g), &[b]);
}

#[test]
fn add_under_dead_parent_is_rejected() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    scene.destroy(g);
    let err = scene.add_line(g, Vec2::ZERO, segment(1.0)).unwrap_err();
    assert_eq!(err, UnderlineError::MissingNode(g));
}

#[test]
fn add_text_with_unknown_font_is_rejected() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let bad = TextStyle { font_id: 7, ..style() };
    let err = scene.add_text(g, Vec2::ZERO, "x", bad).unwrap_err();
    assert_eq!(err, UnderlineError::UnknownFont(7));
}

// -- transforms ----------------------------------------------------------------

#[test]
fn world_position_accumulates_ancestors() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    scene.set_position(g, Vec2::new(100.0, 50.0)).unwrap();
    let t = scene.add_text(g, Vec2::new(10.0, 5.0), "hi", style()).unwrap();
    let l = scene.add_line(t, Vec2::new(1.0, 16.0), segment(10.0)).unwrap();
    assert_eq!(scene.world_position(l), Some(Vec2::new(111.0, 71.0)));
    assert_eq!(scene.position(l), Some(Vec2::new(1.0, 16.0)));
}

// -- text nodes ----------------------------------------------------------------

#[test]
fn text_node_measures_wrapped_size() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    // 100px wrap: "aaaa bbbb " / "cccc"; the break space is measured.
    let t = scene.add_text(g, Vec2::ZERO, "aaaa bbbb cccc", style()).unwrap();
    let text = scene.text(t).unwrap();
    assert_eq!(text.wrapped_lines(), vec!["aaaa bbbb ", "cccc"]);
    assert_eq!(text.size(), Vec2::new(100.0, 40.0));
}

#[test]
fn text_node_size_includes_line_spacing() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let spaced = TextStyle { line_spacing: 5.0, ..style() };
    let t = scene.add_text(g, Vec2::ZERO, "aaaa bbbb cccc", spaced).unwrap();
    assert_eq!(scene.text(t).unwrap().size().y, 45.0);
}

#[test]
fn disabling_wrap_measures_single_line() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let t = scene.add_text(g, Vec2::ZERO, "aaaa bbbb cccc", style()).unwrap();
    let text = scene.text_mut(t).unwrap();
    text.set_word_wrap(false);
    assert_eq!(text.size(), Vec2::new(140.0, 20.0));
}

#[test]
fn set_text_style_rewraps() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let t = scene.add_text(g, Vec2::ZERO, "aaaa bbbb cccc", style()).unwrap();
    let wide = TextStyle { word_wrap_width: 500.0, ..style() };
    scene.set_text_style(t, wide).unwrap();
    assert_eq!(scene.text(t).unwrap().wrapped_lines().len(), 1);
}

#[test]
fn line_node_is_not_text() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let l = scene.add_line(g, Vec2::ZERO, segment(1.0)).unwrap();
    assert!(scene.text(l).is_none());
    assert!(scene.line(g).is_none());
}

// -- frame building --------------------------------------------------------------

#[test]
fn frame_collects_text_and_line_geometry() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let t = scene.add_text(g, Vec2::new(10.0, 10.0), "AB", style()).unwrap();
    scene.add_line(t, Vec2::new(0.0, 16.0), segment(20.0)).unwrap();

    let frame = Frame::build(&mut scene);
    assert_eq!(frame.text.vertices.len(), 8);
    assert_eq!(frame.lines.len(), 6);
    // Line sits at text origin + local offset, centred on y = 26.
    let ys: Vec<f32> = frame.lines.iter().map(|v| v.position[1]).collect();
    assert!(ys.contains(&25.0) && ys.contains(&27.0));
    assert_eq!(frame.line_bytes().len(), 6 * std::mem::size_of::<underline_text::renderer::line::LineVertex>());
}

#[test]
fn frame_hash_changes_with_geometry() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    let l = scene.add_line(g, Vec2::ZERO, segment(20.0)).unwrap();
    let mut frame = Frame::build(&mut scene);
    let before = frame.line_hash();

    frame.rebuild(&mut scene);
    assert_eq!(frame.line_hash(), before);

    scene.set_position(l, Vec2::new(3.0, 0.0)).unwrap();
    frame.rebuild(&mut scene);
    assert_ne!(frame.line_hash(), before);
}

#[test]
fn destroyed_nodes_are_not_drawn() {
    let mut scene = scene();
    let g = scene.add_group(None).unwrap();
    scene.add_line(g, Vec2::ZERO, segment(20.0)).unwrap();
    scene.destroy(g);
    let frame = Frame::build(&mut scene);
    assert!(frame.lines.is_empty());
}
