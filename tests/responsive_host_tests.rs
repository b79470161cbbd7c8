use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use plot_metrics::charts::{cpu_usage_chart, cpu_usage_plot_spec, price_prediction_chart};
use plot_metrics::data::{CpuUsageGenerator, Dataset, PricePredictionGenerator};
use plot_metrics::host::{
    ChartContainer, HeadlessContainer, ResizeObserver, ResponsiveChartHost, Visual,
};
use plot_metrics::plot::PlotSpec;
use plot_metrics::render::SvgRenderer;
use plot_metrics::{ChartError, ChartResult};

fn generator() -> CpuUsageGenerator {
    let end: DateTime<Utc> = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .expect("valid anchor");
    CpuUsageGenerator::new(end).with_seed(5)
}

/// Container whose backend refuses visuals wider than `max_width`.
struct WidthLimitedContainer {
    inner: HeadlessContainer,
    max_width: u32,
}

impl WidthLimitedContainer {
    fn new(width: u32, max_width: u32) -> Self {
        Self {
            inner: HeadlessContainer::new(width),
            max_width,
        }
    }
}

impl ChartContainer for WidthLimitedContainer {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn attach(&mut self, visual: &Visual) -> ChartResult<()> {
        if visual.width() > self.max_width {
            return Err(ChartError::InvalidData(format!(
                "surface width {} exceeds backend limit",
                visual.width()
            )));
        }
        self.inner.attach(visual)
    }

    fn detach(&mut self, visual: &Visual) {
        self.inner.detach(visual);
    }
}

fn attached_widths<B>(host: &ResponsiveChartHost<HeadlessContainer, B>) -> Vec<u32>
where
    B: Fn(u32, &Dataset) -> PlotSpec + 'static,
{
    host.with_container(|container| {
        container
            .expect("mounted container")
            .attached()
            .iter()
            .map(|entry| entry.width)
            .collect()
    })
}

#[test]
fn resize_scenario_keeps_single_visual_and_stops_after_unmount() {
    let observer = ResizeObserver::new();
    let mut host = cpu_usage_chart::<HeadlessContainer>(&generator());
    assert_eq!(host.dataset_len(), 24);

    host.mount(Some(HeadlessContainer::new(600)), &observer)
        .expect("mount");
    assert!(host.is_mounted());
    assert_eq!(observer.listener_count(), 1);
    assert_eq!(attached_widths(&host), vec![600]);
    let first = host.current_visual().expect("visual");

    assert_eq!(observer.notify(300), 1);
    assert_eq!(attached_widths(&host), vec![300]);
    let second = host.current_visual().expect("visual");
    assert_ne!(first.id(), second.id());
    assert_eq!(second.width(), 300);
    host.with_container(|container| {
        let container = container.expect("mounted container");
        assert_eq!(container.attach_count(), 2);
        assert_eq!(container.detach_count(), 1);
    });

    let container = host.unmount().expect("container returned");
    assert_eq!(container.attached_count(), 0);
    assert_eq!(observer.listener_count(), 0);
    assert!(!host.is_mounted());

    assert_eq!(observer.notify(500), 0);
    assert!(host.current_visual().is_none());
    assert_eq!(container.attach_count(), 2);
}

#[test]
fn repeated_resizes_leave_exactly_one_visual() {
    let observer = ResizeObserver::new();
    let mut host = price_prediction_chart::<HeadlessContainer>(&PricePredictionGenerator::default());
    host.mount(Some(HeadlessContainer::new(400)), &observer)
        .expect("mount");

    let widths = [320, 480, 640, 800, 1_024, 1_024];
    for width in widths {
        host.on_resize(width).expect("resize");
    }
    assert_eq!(attached_widths(&host), vec![1_024]);

    host.with_container(|container| {
        let container = container.expect("mounted container");
        assert_eq!(container.attach_count(), widths.len() + 1);
        assert_eq!(container.detach_count(), widths.len());
        assert_eq!(container.renderer().frames_rendered, widths.len() + 1);
    });
}

#[test]
fn mount_then_unmount_leaves_no_visual() {
    let observer = ResizeObserver::new();
    let mut host = cpu_usage_chart::<HeadlessContainer>(&generator());
    host.mount(Some(HeadlessContainer::new(500)), &observer)
        .expect("mount");

    let container = host.unmount().expect("container returned");
    assert_eq!(container.attached_count(), 0);
    assert_eq!(container.detach_count(), 1);
    assert!(host.unmount().is_none());
}

#[test]
fn absent_container_is_a_silent_noop() {
    let observer = ResizeObserver::new();
    let mut host = cpu_usage_chart::<HeadlessContainer>(&generator());

    host.mount(None, &observer).expect("absent container is not an error");
    assert!(!host.is_mounted());
    assert_eq!(observer.listener_count(), 0);
    assert!(host.current_visual().is_none());

    host.on_resize(300).expect("resize without container");
    assert!(host.unmount().is_none());
}

#[test]
fn second_mount_is_rejected() {
    let observer = ResizeObserver::new();
    let mut host = cpu_usage_chart::<HeadlessContainer>(&generator());
    host.mount(Some(HeadlessContainer::new(500)), &observer)
        .expect("mount");

    assert!(
        host.mount(Some(HeadlessContainer::new(700)), &observer)
            .is_err()
    );
    assert_eq!(observer.listener_count(), 1);
    assert_eq!(attached_widths(&host), vec![500]);
}

#[test]
fn dropping_mounted_host_unsubscribes() {
    let observer = ResizeObserver::new();
    {
        let mut host = cpu_usage_chart::<HeadlessContainer>(&generator());
        host.mount(Some(HeadlessContainer::new(500)), &observer)
            .expect("mount");
        assert_eq!(observer.listener_count(), 1);
    }
    assert_eq!(observer.listener_count(), 0);
    assert_eq!(observer.notify(640), 0);
}

#[test]
fn failed_regeneration_keeps_previous_visual() {
    let observer = ResizeObserver::new();
    let builder = |width: u32, dataset: &Dataset| {
        if width < 200 {
            PlotSpec::new(0, 100)
        } else {
            cpu_usage_plot_spec(width, dataset)
        }
    };
    let mut host = ResponsiveChartHost::new(generator().generate(), builder);
    host.mount(Some(HeadlessContainer::new(600)), &observer)
        .expect("mount");

    assert_eq!(observer.notify(100), 1);
    assert_eq!(attached_widths(&host), vec![600]);

    assert!(host.on_resize(150).is_err());
    assert_eq!(attached_widths(&host), vec![600]);

    host.on_resize(250).expect("resize");
    assert_eq!(attached_widths(&host), vec![250]);
}

#[test]
fn failed_initial_render_keeps_container_unsubscribed() {
    let observer = ResizeObserver::new();
    let mut host =
        ResponsiveChartHost::new(generator().generate(), |_: u32, _: &Dataset| PlotSpec::new(0, 0));

    assert!(
        host.mount(Some(HeadlessContainer::new(600)), &observer)
            .is_err()
    );
    assert!(!host.is_mounted());
    assert_eq!(observer.listener_count(), 0);

    let container = host.unmount().expect("container kept");
    assert_eq!(container.attached_count(), 0);
}

#[test]
fn reentrant_notification_is_skipped() {
    let observer = ResizeObserver::new();
    let nested = observer.clone();
    let calls = Rc::new(Cell::new(0));
    let builder_calls = Rc::clone(&calls);

    // The first resize re-notifies from inside the builder.
    let builder = move |width: u32, dataset: &Dataset| {
        builder_calls.set(builder_calls.get() + 1);
        if builder_calls.get() == 2 {
            nested.notify(width + 10);
        }
        cpu_usage_plot_spec(width, dataset)
    };
    let mut host = ResponsiveChartHost::new(generator().generate(), builder);
    host.mount(Some(HeadlessContainer::new(600)), &observer)
        .expect("mount");

    assert_eq!(observer.notify(420), 1);
    assert_eq!(calls.get(), 2);
    assert_eq!(attached_widths(&host), vec![420]);
}

#[test]
fn svg_container_holds_latest_document() {
    let observer = ResizeObserver::new();
    let mut host = cpu_usage_chart::<HeadlessContainer<SvgRenderer>>(&generator());
    host.mount(
        Some(HeadlessContainer::with_renderer(640, SvgRenderer::new())),
        &observer,
    )
    .expect("mount");
    observer.notify(360);

    let container = host.unmount().expect("container returned");
    let document = container.renderer().document();
    assert!(document.contains(r#"width="360""#));
    assert_eq!(document.matches("<polygon").count(), 1);
}

#[test]
fn rejected_attach_restores_previous_visual() {
    let observer = ResizeObserver::new();
    let mut host = cpu_usage_chart::<WidthLimitedContainer>(&generator());
    host.mount(Some(WidthLimitedContainer::new(600, 1_000)), &observer)
        .expect("mount");
    let before = host.current_visual().expect("visual");

    assert_eq!(observer.notify(5_000), 1);
    let after = host.current_visual().expect("visual kept");
    assert_eq!(after.id(), before.id());

    assert!(host.on_resize(2_000).is_err());
    host.with_container(|container| {
        let attached = container.expect("mounted container").inner.attached();
        assert_eq!(attached.len(), 1);
        assert_eq!(attached[0].id, before.id());
        assert_eq!(attached[0].width, 600);
    });

    host.on_resize(800).expect("resize within limit");
    assert_eq!(host.current_visual().expect("visual").width(), 800);
}

#[test]
fn resize_is_ignored_after_failed_initial_render() {
    let observer = ResizeObserver::new();
    let mut host = cpu_usage_chart::<WidthLimitedContainer>(&generator());

    assert!(
        host.mount(Some(WidthLimitedContainer::new(2_000, 1_000)), &observer)
            .is_err()
    );
    assert!(!host.is_mounted());

    host.on_resize(500).expect("resize while unsubscribed");
    assert!(host.current_visual().is_none());
    assert!(
        host.mount(Some(WidthLimitedContainer::new(500, 1_000)), &observer)
            .is_err()
    );

    let container = host.unmount().expect("container kept");
    assert_eq!(container.inner.attached_count(), 0);
}
