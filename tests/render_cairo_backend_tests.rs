#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use plot_metrics::ChartError;
use plot_metrics::charts::price_prediction_plot_spec;
use plot_metrics::data::PricePredictionGenerator;
use plot_metrics::host::{HeadlessContainer, ResizeObserver};
use plot_metrics::plot::render_plot;
use plot_metrics::render::{CairoContextRenderer, CairoRenderer, Renderer};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_follows_frame_size() {
    let dataset = PricePredictionGenerator::default().generate();
    let frame = render_plot(&price_prediction_plot_spec(480, &dataset)).expect("render");

    let mut renderer = CairoRenderer::new(10, 10).expect("renderer");
    renderer.render(&frame).expect("cairo render");

    assert_eq!(renderer.surface().width(), 480);
    assert_eq!(renderer.surface().height(), 150);
    let stats = renderer.last_stats();
    assert_eq!(stats.polygons_drawn, 2);
    assert_eq!(stats.texts_drawn, frame.texts.len());

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let dataset = PricePredictionGenerator::default().generate();
    let frame = render_plot(&price_prediction_plot_spec(600, &dataset)).expect("render");

    let surface = ImageSurface::create(Format::ARgb32, 600, 150).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = CairoRenderer::new(1, 1).expect("renderer");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("context render");
    assert_eq!(renderer.last_stats().lines_drawn, frame.lines.len());
}

#[test]
fn cairo_container_redraws_on_resize() {
    let observer = ResizeObserver::new();
    let renderer = CairoRenderer::new(1, 1).expect("renderer");
    let mut host = plot_metrics::charts::price_prediction_chart::<HeadlessContainer<CairoRenderer>>(
        &PricePredictionGenerator::default(),
    );
    host.mount(
        Some(HeadlessContainer::with_renderer(640, renderer)),
        &observer,
    )
    .expect("mount");
    observer.notify(320);

    let container = host.unmount().expect("container returned");
    assert_eq!(container.renderer().surface().width(), 320);
}
