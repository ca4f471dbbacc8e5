use egui::{Color32, Pos2, Rect, Vec2};
use mandala_paint::export::{
    ExportFormat, PngTask, RasterJob, export_json, export_svg, import_json, import_svg, render_png,
};
use mandala_paint::view::ViewTransform;
use mandala_paint::{Drawing, GesturePhase, SymmetricReplicator};

fn mandala() -> SymmetricReplicator {
    let mut replicator = SymmetricReplicator::default();
    replicator.set_rotations(4);
    replicator.set_simplify(false);
    replicator.set_brush_color(Color32::from_rgb(0x12, 0x34, 0x56));
    replicator.set_brush_size(2.5);
    for end in [Pos2::new(40.0, 10.0), Pos2::new(-20.0, 60.0)] {
        replicator.begin_stroke(Pos2::new(5.0, 5.0), GesturePhase::Idle);
        replicator.add_point(end);
        replicator.end_stroke();
    }
    replicator
}

fn close(a: Pos2, b: Pos2) -> bool {
    (a - b).length() < 0.01
}

#[test]
fn test_svg_export_then_import_keeps_groups() {
    let replicator = mandala();
    let svg = export_svg(replicator.drawing(), Color32::from_rgb(250, 240, 230), Vec2::new(800.0, 600.0));
    assert!(svg.starts_with("<svg"));
    assert_eq!(svg.matches("<g id=").count(), 2);
    assert_eq!(svg.matches("<polyline").count(), 20);

    let imported = import_svg(&svg).unwrap();
    assert_eq!(imported.background, Some(Color32::from_rgb(250, 240, 230)));
    assert_eq!(imported.drawing.len(), replicator.drawing().len());

    for (original, read) in replicator.drawing().groups().iter().zip(imported.drawing.groups()) {
        assert_eq!(original.len(), read.len());
        for (a, b) in original.strokes().iter().zip(read.strokes()) {
            assert_eq!(a.color(), b.color());
            assert_eq!(a.width(), b.width());
            assert!(a.points().iter().zip(b.points()).all(|(p, q)| close(*p, *q)));
        }
    }
}

#[test]
fn test_svg_import_ignores_unexpected_content() {
    let text = r##"<?xml version="1.0"?>
        <svg xmlns="http://www.w3.org/2000/svg" width="200" height="100">
            <title>made elsewhere</title>
            <g>
                <circle cx="5" cy="5" r="3"/>
                <path d="M 100 50 L 110 50" stroke="#0000ff"/>
                <path d="10 10 20 0"/>
                <g><polyline points="100,50 100,60"/></g>
            </g>
            <g><text>no strokes here</text></g>
            <polyline points="100,50"/>
        </svg>"##;

    let imported = import_svg(text).unwrap();
    assert_eq!(imported.drawing.len(), 1);
    let strokes = imported.drawing.groups()[0].strokes();
    assert_eq!(strokes.len(), 2);
    // No view box: the document center becomes the origin
    assert_eq!(strokes[0].points(), &[Pos2::new(0.0, 0.0), Pos2::new(10.0, 0.0)]);
    assert_eq!(strokes[0].color(), Color32::from_rgb(0, 0, 255));
    assert_eq!(strokes[1].points(), &[Pos2::new(0.0, 0.0), Pos2::new(0.0, 10.0)]);
}

#[test]
fn test_svg_import_of_curved_group() {
    let text = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 200">
            <g fill="none" stroke="#ff0000" stroke-width="4" stroke-linecap="round">
                <path d="M110,100c10,0 20,5 30,20"/>
                <path d="M90,100c-10,0 -20,-5 -30,-20"/>
            </g>
            <g stroke="#00ff00"><path d="M100,100 L110,100 L110,110 Z"/></g>
        </svg>"##;

    let imported = import_svg(text).unwrap();
    assert_eq!(imported.drawing.len(), 2);

    let curved = imported.drawing.groups()[0].strokes();
    assert_eq!(curved.len(), 2);
    for stroke in curved {
        assert_eq!(stroke.color(), Color32::from_rgb(255, 0, 0));
        assert_eq!(stroke.width(), 4.0);
        assert!(stroke.len() > 2);
    }
    assert!(close(curved[0].points()[0], Pos2::new(10.0, 0.0)));
    assert!(close(*curved[0].points().last().unwrap(), Pos2::new(40.0, 20.0)));

    let closed = &imported.drawing.groups()[1].strokes()[0];
    assert_eq!(closed.color(), Color32::from_rgb(0, 255, 0));
    assert_eq!(closed.points().first(), closed.points().last());
    assert_eq!(closed.len(), 4);
}

#[test]
fn test_json_export_round_trip() {
    let replicator = mandala();
    let json = export_json(replicator.drawing()).unwrap();
    assert_eq!(&import_json(&json).unwrap(), replicator.drawing());
}

#[test]
fn test_png_task_renders_the_view() {
    let replicator = mandala();
    let canvas = Rect::from_min_size(Pos2::new(10.0, 10.0), Vec2::new(120.0, 80.0));
    let job = RasterJob::snapshot(replicator.drawing(), Color32::WHITE, ViewTransform::default(), canvas);
    assert_eq!((job.width, job.height), (120, 80));

    let bytes = futures::executor::block_on(PngTask::spawn(job.clone()).finish()).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (120, 80));
    // Both primary strokes start at (5, 5)
    let center = decoded.get_pixel(60 + 5, 40 + 5);
    assert_eq!(center.0, [0x12, 0x34, 0x56, 255]);
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 255, 255, 255]);

    assert_eq!(render_png(&job).unwrap(), bytes);
}

#[test]
fn test_png_of_empty_drawing_is_background() {
    let job = RasterJob {
        drawing: Drawing::new(),
        background: Color32::from_rgb(10, 20, 30),
        view: ViewTransform::default(),
        width: 8,
        height: 8,
    };
    let decoded = image::load_from_memory(&render_png(&job).unwrap()).unwrap().to_rgba8();
    assert!(decoded.pixels().all(|p| p.0 == [10, 20, 30, 255]));
}

#[test]
fn test_export_file_names() {
    assert_eq!(ExportFormat::Png.file_name(), "mandala.png");
    assert_eq!(ExportFormat::Svg.file_name(), "mandala.svg");
    assert_eq!(ExportFormat::Json.file_name(), "mandala.json");
    assert_eq!(ExportFormat::Svg.mime(), "image/svg+xml");
}
