use image::{Rgba, RgbaImage};
use staffwright::pipeline::{convert, transcribe};
use staffwright::render::{LayoutError, SheetRenderer, StaffLayout};
use staffwright::templates::{find_assets_dir, load_assets, StaffAssets};
use staffwright::{Pitch, PitchClass, StaffGeometry, Waveform};
use std::f64::consts::PI;
use std::path::Path;
use tempfile::TempDir;

const SAMPLE_RATE: u32 = 8000;

/// Concatenated one-second tones; `None` is a second of silence.
fn melody(freqs: &[Option<f64>]) -> Waveform {
    let per_beat = SAMPLE_RATE as usize;
    let mut samples = Vec::with_capacity(freqs.len() * per_beat);
    for freq in freqs {
        match freq {
            Some(f) => samples.extend(
                (0..per_beat).map(|i| (0.5 * (2.0 * PI * f * i as f64 / SAMPLE_RATE as f64).sin()) as f32),
            ),
            None => samples.extend(std::iter::repeat(0.0).take(per_beat)),
        }
    }
    Waveform::new(samples, SAMPLE_RATE)
}

fn bundled_assets() -> StaffAssets {
    load_assets(&find_assets_dir()).expect("bundled staff assets")
}

/// Tiny asset set: white template, one distinct colour per glyph.
fn write_test_assets(dir: &Path) {
    let manifest = r#"{
        "name": "test-staff",
        "template": "template.png",
        "glyphs": {
            "notehead": "note.png",
            "high_notehead": "high.png",
            "rest": "rest.png",
            "clef": "clef.png",
            "time_signature": "time.png"
        }
    }"#;
    std::fs::write(dir.join("manifest.json"), manifest).unwrap();

    let geometry = StaffGeometry::default();
    RgbaImage::from_pixel(geometry.canvas_width, geometry.canvas_height, Rgba([255, 255, 255, 255]))
        .save(dir.join("template.png"))
        .unwrap();
    let glyph = |name: &str, color: [u8; 4]| {
        RgbaImage::from_pixel(4, 4, Rgba(color)).save(dir.join(name)).unwrap();
    };
    glyph("note.png", [255, 0, 0, 255]);
    glyph("high.png", [0, 255, 0, 255]);
    glyph("rest.png", [0, 0, 255, 255]);
    glyph("clef.png", [0, 0, 0, 255]);
    glyph("time.png", [0, 0, 0, 255]);
}

#[test]
fn melody_becomes_notes_in_order() {
    let wave = melody(&[Some(440.0), None, Some(262.0), Some(659.0), Some(330.0)]);
    let notes = transcribe(&wave, 60.0).unwrap();
    assert_eq!(
        notes,
        vec![
            Pitch::note(PitchClass::A, 4),
            Pitch::Rest,
            Pitch::note(PitchClass::C, 4),
            Pitch::note(PitchClass::E, 5),
            Pitch::note(PitchClass::E, 4),
        ]
    );
}

#[test]
fn note_count_matches_window_count_at_other_tempos() {
    // 120 BPM halves the window, so five seconds give ten beats.
    let wave = melody(&[Some(440.0); 5]);
    let notes = transcribe(&wave, 120.0).unwrap();
    assert_eq!(notes.len(), 10);
    assert!(notes.iter().all(|p| *p == Pitch::note(PitchClass::A, 4)));
}

#[test]
fn renders_glyphs_at_layout_positions() {
    let dir = TempDir::new().unwrap();
    write_test_assets(dir.path());
    let assets = load_assets(dir.path()).unwrap();
    let geometry = StaffGeometry::default();
    let renderer = SheetRenderer::new(&geometry);
    let output = dir.path().join("sheet.png");

    let wave = melody(&[Some(440.0), None, Some(1047.0)]);
    let conversion = convert(&wave, 60.0, &renderer, &assets, &output, None).unwrap();
    assert_eq!(conversion.pages, vec![output.clone()]);

    let sheet = image::open(&output).unwrap().to_rgb8();
    assert_eq!(sheet.dimensions(), (geometry.canvas_width, geometry.canvas_height));

    let layout = StaffLayout::new(&geometry);
    let expected = [[255, 0, 0], [0, 0, 255], [0, 255, 0]];
    for (i, pitch) in conversion.notes.iter().enumerate() {
        let p = layout.place(i, pitch);
        let pixel = sheet.get_pixel(p.x.round() as u32 + 1, p.y.round() as u32 + 1);
        assert_eq!(pixel.0, expected[i], "glyph {} ({})", i, pitch);
    }
}

#[test]
fn empty_recording_renders_a_blank_staff() {
    let dir = TempDir::new().unwrap();
    write_test_assets(dir.path());
    let assets = load_assets(dir.path()).unwrap();
    let geometry = StaffGeometry::default();
    let renderer = SheetRenderer::new(&geometry);
    let output = dir.path().join("empty.png");

    let wave = Waveform::new(Vec::new(), SAMPLE_RATE);
    let conversion = convert(&wave, 60.0, &renderer, &assets, &output, None).unwrap();
    assert!(conversion.notes.is_empty());
    assert_eq!(conversion.pages.len(), 1);

    let sheet = image::open(&output).unwrap().to_rgb8();
    let coloured = sheet
        .pixels()
        .filter(|p| matches!(p.0, [255, 0, 0] | [0, 255, 0] | [0, 0, 255]))
        .count();
    assert_eq!(coloured, 0);
}

#[test]
fn overflow_with_page_limit_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let assets = bundled_assets();
    let geometry = StaffGeometry {
        ledger_count: 1,
        ..StaffGeometry::default()
    };
    let renderer = SheetRenderer::new(&geometry);
    let output = dir.path().join("sheet.png");

    // Seventeen beats against a sixteen-note page.
    let wave = melody(&[None; 17]);
    let err = convert(&wave, 60.0, &renderer, &assets, &output, Some(1)).unwrap_err();
    assert_eq!(
        err.downcast_ref::<LayoutError>(),
        Some(&LayoutError::Overflow {
            notes: 17,
            capacity: 16,
            pages: 1
        })
    );
    assert!(!output.exists());
}

#[test]
fn overflow_without_limit_adds_pages() {
    let dir = TempDir::new().unwrap();
    let assets = bundled_assets();
    let geometry = StaffGeometry {
        ledger_count: 1,
        ..StaffGeometry::default()
    };
    let renderer = SheetRenderer::new(&geometry);
    let output = dir.path().join("sheet.png");

    let wave = melody(&[Some(440.0); 20]);
    let conversion = convert(&wave, 60.0, &renderer, &assets, &output, None).unwrap();
    assert_eq!(conversion.notes.len(), 20);
    assert_eq!(
        conversion.pages,
        vec![output.clone(), dir.path().join("sheet-2.png")]
    );
    assert!(conversion.pages.iter().all(|p| p.exists()));
}

#[test]
fn zero_page_limit_is_rejected() {
    let dir = TempDir::new().unwrap();
    let assets = bundled_assets();
    let geometry = StaffGeometry::default();
    let renderer = SheetRenderer::new(&geometry);
    let output = dir.path().join("sheet.png");

    let wave = Waveform::new(Vec::new(), SAMPLE_RATE);
    let err = convert(&wave, 60.0, &renderer, &assets, &output, Some(0)).unwrap_err();
    assert!(err.to_string().contains("max_pages"));
    assert!(err.downcast_ref::<LayoutError>().is_none());
    assert!(!output.exists());
}

#[test]
fn missing_assets_are_fatal() {
    let dir = TempDir::new().unwrap();
    assert!(load_assets(dir.path()).is_err());
}

#[test]
fn jpeg_output_is_supported() {
    let dir = TempDir::new().unwrap();
    let assets = bundled_assets();
    let geometry = StaffGeometry::default();
    let renderer = SheetRenderer::new(&geometry);
    let output = dir.path().join("sheet.jpg");

    let wave = melody(&[Some(440.0), Some(494.0)]);
    convert(&wave, 60.0, &renderer, &assets, &output, None).unwrap();
    let sheet = image::open(&output).unwrap();
    assert_eq!(sheet.width(), geometry.canvas_width);
}
