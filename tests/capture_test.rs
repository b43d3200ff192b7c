//! Integration tests for capture sessions and response assembly.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use scriptmark::assemble::{assemble_question, finalize_question};
use scriptmark::capture::{CaptureMode, CaptureOptions, CaptureSession};
use scriptmark::compose::{Captioner, Composer, RenderScale, RenderedPages};
use scriptmark::error::Result;
use scriptmark::model::{
    ContentKind, DocumentRole, EncodedImage, PartLabel, Point, Question, Region, Shape, Rect,
};
use scriptmark::parts::PartTree;

/// Captioner producing a fixed-height strip, so heights are predictable.
struct StripCaptioner;

impl Captioner for StripCaptioner {
    fn caption(&self, _text: &str) -> Result<RgbaImage> {
        Ok(RgbaImage::from_pixel(10, 6, Rgba([0, 0, 0, 255])))
    }
}

fn composer() -> Composer {
    Composer::new(Arc::new(StripCaptioner))
}

fn label(s: &str) -> PartLabel {
    s.parse().unwrap()
}

fn pages() -> RenderedPages {
    RenderedPages::new(vec![RgbaImage::from_pixel(
        800,
        1000,
        Rgba([240, 240, 240, 255]),
    )])
}

fn select(session: &mut CaptureSession, pages: &RenderedPages, from: Point, to: Point) -> u32 {
    session.begin_selection(0, from).unwrap();
    session.update_selection(to);
    // the page is shown at half its rendered width
    let scale = RenderScale::fit(400.0, 800).unwrap();
    session.end_selection(pages, scale).unwrap().seq
}

fn question_one() -> Question {
    Question::new(101, 1, "Explain the water cycle")
        .with_parts(PartTree::from_strings(1, &["1.1"]).unwrap())
}

#[tokio::test]
async fn test_main_and_part_text_merge_on_submit() {
    let composer = composer();
    let pages = pages();
    let mut session = CaptureSession::new(
        9,
        DocumentRole::AnswerScript,
        CaptureMode::Selective,
        vec![question_one()],
        CaptureOptions::default(),
    )
    .unwrap();

    let main = select(&mut session, &pages, Point::new(10.0, 10.0), Point::new(110.0, 30.0));
    let part = select(&mut session, &pages, Point::new(10.0, 50.0), Point::new(60.0, 90.0));
    session.set_part(part, Some(label("1.1"))).unwrap();
    assert_eq!(session.regions()[main as usize - 1].crop.height, 40);

    let response = session.finish_question(&composer).await.unwrap().clone();
    assert_eq!(response.images.text_images.len(), 1);
    assert_eq!(response.parts.len(), 1);
    assert_eq!(response.parts[0].label, label("1.1"));
    assert_eq!(response.parts[0].images.text_images.len(), 1);

    let payload = finalize_question(&response, &composer).await.unwrap();
    assert_eq!(payload.text_images.len(), 1);
    assert!(payload.table_images.is_empty());
    // caption + main crop (200x40) + part crop (100x80)
    let merged = &payload.text_images[0];
    assert_eq!((merged.width, merged.height), (200, 6 + 40 + 80));
}

#[tokio::test]
async fn test_tables_and_diagrams_stay_separate() {
    let question = Question::new(7, 2, "Data")
        .with_parts(PartTree::from_strings(2, &["2.1", "2.2"]).unwrap());
    let crop = EncodedImage::from_rgba(&RgbaImage::new(20, 10)).unwrap();
    let shape = Shape::Rect(Rect::new(0.0, 0.0, 20.0, 10.0));
    let regions = vec![
        Region::new(1, 0, shape.clone(), crop.clone()).with_kind(ContentKind::Table),
        Region::new(2, 0, shape.clone(), crop.clone()).with_kind(ContentKind::Table),
        Region::new(3, 0, shape.clone(), crop.clone())
            .with_kind(ContentKind::Diagram)
            .with_part(Some(label("2.2"))),
        Region::new(4, 0, shape.clone(), crop.clone()).with_part(Some(label("2.2"))),
        Region::new(5, 0, shape, crop).with_part(Some(label("2.2"))),
    ];

    let composer = composer();
    let response = assemble_question(&question, 1, &regions, &composer)
        .await
        .unwrap();
    assert_eq!(response.original_index, 1);
    assert!(response.images.text_images.is_empty());
    assert_eq!(response.images.table_images.len(), 2);
    for table in &response.images.table_images {
        assert_eq!(table.sources.len(), 1);
        assert_eq!(table.caption, "Question 2");
    }

    let empty = response.part(&label("2.1")).unwrap();
    assert!(empty.images.is_empty());
    let filled = response.part(&label("2.2")).unwrap();
    assert_eq!(filled.images.diagram_images[0].caption, "Part 2.2");
    assert_eq!(filled.images.text_images.len(), 1);
    assert_eq!(filled.images.text_images[0].sources.len(), 2);

    let payload = finalize_question(&response, &composer).await.unwrap();
    assert_eq!(payload.table_images.len(), 2);
    assert_eq!(payload.diagram_images.len(), 1);
    // only part text: one merged image under the question caption
    assert_eq!(payload.text_images.len(), 1);
    assert_eq!(payload.text_images[0].height, 6 + 10 + 10);
}

#[tokio::test]
async fn test_unknown_part_is_rejected() {
    let crop = EncodedImage::from_rgba(&RgbaImage::new(4, 4)).unwrap();
    let regions = vec![Region::new(
        1,
        0,
        Shape::Rect(Rect::new(0.0, 0.0, 4.0, 4.0)),
        crop,
    )
    .with_part(Some(label("1.4")))];
    let err = assemble_question(&question_one(), 0, &regions, &composer())
        .await
        .unwrap_err();
    assert!(matches!(err, scriptmark::Error::Validation(_)));
}

#[tokio::test]
async fn test_reorder_changes_stitch_order() {
    let composer = composer();
    let pages = RenderedPages::new(vec![RgbaImage::from_fn(400, 400, |_, y| {
        if y < 200 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    })]);
    let mut session = CaptureSession::new(
        1,
        DocumentRole::QuestionPaper,
        CaptureMode::Sequential,
        vec![Question::new(1, 1, "Q")],
        CaptureOptions::default(),
    )
    .unwrap();

    let mut capture = |from: Point, to: Point| {
        session.begin_selection(0, from).unwrap();
        session.update_selection(to);
        session.end_selection(&pages, RenderScale::IDENTITY).unwrap();
    };
    capture(Point::new(0.0, 0.0), Point::new(50.0, 50.0)); // red
    capture(Point::new(0.0, 300.0), Point::new(50.0, 350.0)); // blue
    session.move_region(2, 1).unwrap();

    let response = session.finish_question(&composer).await.unwrap();
    let image = response.images.text_images[0].image.decode().unwrap();
    // below the caption strip the blue crop comes first
    assert_eq!(image.get_pixel(25, 6), &Rgba([0, 0, 255, 255]));
    assert_eq!(image.get_pixel(25, 56), &Rgba([255, 0, 0, 255]));
}

#[test]
fn test_freehand_tool_records_outline() {
    let pages = pages();
    let mut session = CaptureSession::new(
        1,
        DocumentRole::MarkingScheme,
        CaptureMode::Selective,
        vec![Question::new(1, 1, "Q")],
        CaptureOptions::new().freehand(),
    )
    .unwrap();
    session.begin_selection(0, Point::new(0.0, 0.0)).unwrap();
    session.update_selection(Point::new(100.0, 0.0));
    session.update_selection(Point::new(100.0, 100.0));
    session.update_selection(Point::new(0.0, 100.0));
    let region = session
        .end_selection(&pages, RenderScale::IDENTITY)
        .unwrap();
    assert!(region.shape.is_freeform());
    assert_eq!((region.crop.width, region.crop.height), (100, 100));
}
