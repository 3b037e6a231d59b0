// Headless demo: lays out an underlined label and prints the geometry that
// would be uploaded to the GPU.
//
//   underline-text [config.json]
//
// Without an argument a built-in sample is used.  A config may name a font
// with `"font": { "glyphs": "glyphs.json", "atlas": "atlas.png" }`; otherwise
// the built-in monospace font is used.  Set RUST_LOG=debug to see
// the label's wrap and segment decisions.

use std::process::ExitCode;

use underline_text::renderer::Frame;
use underline_text::{LabelConfig, SceneGraph, TextStyle, UnderlineText};

const SAMPLE: &str = r#"{
    "text": "Hello world, this wraps around a narrow column of text",
    "x": 32.0,
    "y": 48.0,
    "style": { "font_size": 24.0, "word_wrap_width": 208.0, "line_spacing": 4.0 },
    "ranges": [[6, 16], [25, 40]]
}"#;

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => LabelConfig::load(path)?,
        None => LabelConfig::from_json(SAMPLE)?,
    };

    let mut scene = SceneGraph::new();
    let font_id = scene.add_font(config.load_font()?);
    let style = TextStyle { font_id, ..config.style.clone() };

    let mut label = UnderlineText::new(&mut scene, config.x, config.y, &config.text, style)?
        .with_underline_style(config.underline);

    println!("lines:");
    for (i, line) in label.wrapped_lines().iter().enumerate() {
        println!("  {i} @{:>3}  {line:?}", label.wrap_start_index(i));
    }

    for &(start, end) in &config.ranges {
        match label.add_underline(&mut scene, start, end) {
            Ok(added) => {
                println!("underline [{start}, {end}]:");
                for u in added {
                    println!(
                        "  line {}  x={:.1} y={:.1} width={:.1}",
                        u.line, u.offset.x, u.offset.y, u.width
                    );
                }
            }
            Err(e) => log::warn!("{e}"),
        }
    }

    let frame = Frame::build(&mut scene);
    println!(
        "frame: {} text vertices, {} line vertices ({} bytes, hash {:016x})",
        frame.text.vertices.len(),
        frame.lines.len(),
        frame.line_bytes().len(),
        frame.line_hash()
    );

    label.destroy(&mut scene);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
