use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, error, trace, warn};

use crate::data::Dataset;
use crate::error::{ChartError, ChartResult};
use crate::host::{ChartContainer, ResizeObserver, Subscription, Visual, VisualId};
use crate::plot::{PlotSpec, render_plot};

struct HostState<C, B> {
    container: Option<C>,
    dataset: Dataset,
    spec_builder: B,
    current: Option<Visual>,
    next_visual_id: u64,
}

impl<C, B> HostState<C, B>
where
    C: ChartContainer,
    B: Fn(u32, &Dataset) -> PlotSpec,
{
    /// Renders at `width` and swaps the result in for the current visual.
    ///
    /// The frame is compiled before the container is touched. On any
    /// failure the previous visual is left (or put back) in place.
    fn regenerate(&mut self, width: u32) -> ChartResult<()> {
        let Some(container) = self.container.as_mut() else {
            return Ok(());
        };

        let spec = (self.spec_builder)(width, &self.dataset);
        let frame = render_plot(&spec)?;
        self.next_visual_id += 1;
        let visual = Visual::new(VisualId::new(self.next_visual_id), frame);

        let previous = self.current.take();
        if let Some(previous) = &previous {
            container.detach(previous);
        }
        if let Err(err) = container.attach(&visual) {
            if let Some(previous) = previous {
                match container.attach(&previous) {
                    Ok(()) => self.current = Some(previous),
                    Err(restore) => warn!(
                        error = %restore,
                        visual = previous.id().raw(),
                        "failed to restore previous chart visual"
                    ),
                }
            }
            return Err(err);
        }
        trace!(
            visual = visual.id().raw(),
            width = visual.width(),
            height = visual.height(),
            "attached chart visual"
        );
        self.current = Some(visual);
        Ok(())
    }

    fn teardown(&mut self) -> Option<C> {
        let mut container = self.container.take()?;
        if let Some(visual) = self.current.take() {
            container.detach(&visual);
        }
        Some(container)
    }
}

/// Keeps exactly one chart visual attached to a container, re-rendered at
/// the container's width whenever it changes.
///
/// `B` builds the plot for a given width from the dataset fixed at
/// construction. The host is single-threaded: state lives behind
/// `Rc<RefCell<_>>` so the resize subscription can reach it.
pub struct ResponsiveChartHost<C, B>
where
    C: ChartContainer + 'static,
    B: Fn(u32, &Dataset) -> PlotSpec + 'static,
{
    state: Rc<RefCell<HostState<C, B>>>,
    subscription: Option<Subscription>,
}

impl<C, B> ResponsiveChartHost<C, B>
where
    C: ChartContainer + 'static,
    B: Fn(u32, &Dataset) -> PlotSpec + 'static,
{
    #[must_use]
    pub fn new(dataset: Dataset, spec_builder: B) -> Self {
        Self {
            state: Rc::new(RefCell::new(HostState {
                container: None,
                dataset,
                spec_builder,
                current: None,
                next_visual_id: 0,
            })),
            subscription: None,
        }
    }

    /// Renders the first visual at the container's width and starts
    /// following `observer`.
    ///
    /// A missing container is not an error: nothing is attached and the host
    /// stays unmounted. If the first render fails the container is kept
    /// (retrievable through [`Self::unmount`]) but no subscription is made.
    pub fn mount(&mut self, container: Option<C>, observer: &ResizeObserver) -> ChartResult<()> {
        let Some(container) = container else {
            debug!("no container available; chart not mounted");
            return Ok(());
        };
        if self.has_container() {
            return Err(ChartError::InvalidData(
                "chart host is already mounted".to_owned(),
            ));
        }

        let width = container.width();
        {
            let mut state = self.borrow_state_mut()?;
            state.container = Some(container);
            state.regenerate(width)?;
        }

        let weak = Rc::downgrade(&self.state);
        self.subscription = Some(observer.subscribe(move |width| handle_resize(&weak, width)));
        debug!(width, "mounted responsive chart");
        Ok(())
    }

    /// Replaces the attached visual with one rendered at `new_width`.
    ///
    /// Does nothing unless the host is mounted.
    pub fn on_resize(&mut self, new_width: u32) -> ChartResult<()> {
        if !self.is_mounted() {
            return Ok(());
        }
        let mut state = self.borrow_state_mut()?;
        if state.container.is_none() {
            return Ok(());
        }
        trace!(width = new_width, "regenerating chart");
        state.regenerate(new_width)
    }

    /// Stops observing resizes, detaches the visual and hands the container
    /// back.
    pub fn unmount(&mut self) -> Option<C> {
        self.subscription.take();
        let container = match self.state.try_borrow_mut() {
            Ok(mut state) => state.teardown(),
            Err(_) => {
                warn!("chart host busy during unmount; container left in place");
                None
            }
        };
        if container.is_some() {
            debug!("unmounted responsive chart");
        }
        container
    }

    /// `true` while subscribed to an observer.
    ///
    /// After a failed first render this stays `false`, yet the host still
    /// holds the container until [`Self::unmount`] returns it; a second
    /// `mount` is rejected until then.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    #[must_use]
    pub fn current_visual(&self) -> Option<Visual> {
        self.state
            .try_borrow()
            .ok()
            .and_then(|state| state.current.clone())
    }

    /// Runs `f` against the held container, if any.
    pub fn with_container<T>(&self, f: impl FnOnce(Option<&C>) -> T) -> T {
        match self.state.try_borrow() {
            Ok(state) => f(state.container.as_ref()),
            Err(_) => f(None),
        }
    }

    #[must_use]
    pub fn dataset_len(&self) -> usize {
        self.state.try_borrow().map_or(0, |state| state.dataset.len())
    }

    fn has_container(&self) -> bool {
        self.with_container(|container| container.is_some())
    }

    fn borrow_state_mut(&self) -> ChartResult<std::cell::RefMut<'_, HostState<C, B>>> {
        self.state.try_borrow_mut().map_err(|_| {
            ChartError::InvalidData("chart host is already handling a resize".to_owned())
        })
    }
}

impl<C, B> Drop for ResponsiveChartHost<C, B>
where
    C: ChartContainer + 'static,
    B: Fn(u32, &Dataset) -> PlotSpec + 'static,
{
    fn drop(&mut self) {
        let _ = self.unmount();
    }
}

fn handle_resize<C, B>(state: &Weak<RefCell<HostState<C, B>>>, width: u32)
where
    C: ChartContainer,
    B: Fn(u32, &Dataset) -> PlotSpec,
{
    let Some(shared) = state.upgrade() else {
        return;
    };
    let Ok(mut state) = shared.try_borrow_mut() else {
        warn!(width, "skipping re-entrant resize notification");
        return;
    };
    if state.container.is_none() {
        return;
    }
    trace!(width, "regenerating chart after resize notification");
    if let Err(err) = state.regenerate(width) {
        error!(error = %err, width, "failed to regenerate chart after resize");
    }
}
