use crate::api::options::ScrubsOptions;
use crate::api::types::{InstanceId, ScrubEvent};
use crate::core::capability::Capabilities;
use crate::core::scheduler::{FrameHandle, FrameScheduler};
use crate::error::{Result, ScrubsError};
use crate::input::event::{InputEvent, Pointer};
use crate::input::tracker::InputTracker;
use crate::motion::engine::{MotionEngine, MoveRequest};
use crate::motion::momentum::{Momentum, MomentumPhase, MomentumStep};
use crate::renderer::traits::Surface;

/// Whether a pointer sequence is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// What a pending frame will do when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
enum FrameWork {
    /// Apply the latest coalesced pointer-move.
    Input(Pointer),
    /// Run one momentum step.
    Momentum,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingFrame {
    handle: FrameHandle,
    work: FrameWork,
}

/// One bound scrubber: input tracking, motion and momentum for a single container.
///
/// All host interaction goes through the surface `S` and the scheduler `F`.
/// Callback notifications are queued; hosts call [`Scrubber::drain_events`]
/// after each operation and dispatch them once the scrubber is no longer borrowed.
pub struct Scrubber<S: Surface, F: FrameScheduler> {
    id: InstanceId,
    options: ScrubsOptions,
    engine: MotionEngine,
    tracker: InputTracker,
    /// Present only when momentum is enabled.
    momentum: Option<Momentum>,
    drag: DragState,
    /// At most one frame is ever outstanding.
    pending: Option<PendingFrame>,
    surface: S,
    scheduler: F,
    events: Vec<ScrubEvent>,
    bound: bool,
}

impl<S: Surface, F: FrameScheduler> Scrubber<S, F> {
    /// Bind a scrubber: position it at `startAt` and queue [`ScrubEvent::Init`].
    pub fn new(
        id: InstanceId,
        options: ScrubsOptions,
        capabilities: Capabilities,
        surface: S,
        scheduler: F,
    ) -> Self {
        let options = options.normalized();
        let engine = MotionEngine::new(&options, capabilities);
        let tracker = InputTracker::new(options.axis());
        let momentum = options.momentum.then(|| Momentum::new(options.friction));

        let mut scrubber = Self {
            id,
            options,
            engine,
            tracker,
            momentum,
            drag: DragState::Idle,
            pending: None,
            surface,
            scheduler,
            events: Vec::new(),
            bound: true,
        };
        scrubber.surface.set_transitions(true);
        let start_at = scrubber.engine.start_at();
        scrubber.render(MoveRequest::reset(start_at));
        scrubber.events.push(ScrubEvent::Init);
        log::info!("scrubs {}: bound ({:?})", id, capabilities.mode);
        scrubber
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn options(&self) -> &ScrubsOptions {
        &self.options
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    pub fn is_input_active(&self) -> bool {
        self.drag == DragState::Dragging
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn momentum_phase(&self) -> MomentumPhase {
        self.momentum
            .as_ref()
            .map(Momentum::phase)
            .unwrap_or_default()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Current smoothed pointer velocity (percent per second).
    pub fn velocity(&self) -> f64 {
        self.tracker.velocity()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    /// Take queued notifications, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ScrubEvent> + '_ {
        self.events.drain(..)
    }

    // ---- Public operations ----

    /// Canonical percent.
    pub fn percent(&self) -> Result<f64> {
        self.ensure_bound()?;
        Ok(self.engine.percent())
    }

    /// Snap back to `startAt`. No notification.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_bound()?;
        self.interrupt_momentum();
        let start_at = self.engine.start_at();
        self.render(MoveRequest::reset(start_at));
        Ok(())
    }

    /// Move to 0. No notification.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_bound()?;
        self.interrupt_momentum();
        self.render(MoveRequest::to(0.0).silent());
        Ok(())
    }

    /// Move to 100. No notification.
    pub fn end(&mut self) -> Result<()> {
        self.ensure_bound()?;
        self.interrupt_momentum();
        self.render(MoveRequest::to(100.0).silent());
        Ok(())
    }

    /// Programmatic move. `sticky` keeps the position for this call even when
    /// the scrubber would snap. A NaN or infinite percent is ignored.
    pub fn scrub(&mut self, percent: f64, sticky: bool) -> Result<()> {
        self.ensure_bound()?;
        if !percent.is_finite() {
            log::debug!("scrubs {}: ignoring non-finite scrub target", self.id);
            return Ok(());
        }
        self.interrupt_momentum();
        self.render(MoveRequest::to(percent).sticky(sticky));
        Ok(())
    }

    /// Tear down: cancel any pending frame and refuse further operations.
    pub fn destroy(&mut self) -> Result<()> {
        self.ensure_bound()?;
        self.cancel_pending();
        if let Some(momentum) = &mut self.momentum {
            momentum.cancel();
        }
        self.drag = DragState::Idle;
        self.bound = false;
        log::info!("scrubs {}: destroyed", self.id);
        Ok(())
    }

    // ---- Host entry points ----

    /// Feed one pointer event. Ignored when built-in input is disabled.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<()> {
        self.ensure_bound()?;
        if !self.options.input {
            return Ok(());
        }
        match event {
            InputEvent::PointerDown(pointer) => self.begin_drag(pointer),
            InputEvent::PointerMove(pointer) => self.queue_move(pointer),
            InputEvent::PointerUp { time_ms } | InputEvent::PointerCancel { time_ms } => {
                self.end_drag(time_ms)
            }
        }
        Ok(())
    }

    /// A frame requested through the scheduler fired.
    /// Frames that are not the pending one (stale or cancelled) are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) {
        if !self.bound {
            return;
        }
        let Some(pending) = self.pending.filter(|p| p.handle == handle) else {
            log::debug!("scrubs {}: ignoring stale frame {:?}", self.id, handle);
            return;
        };
        self.pending = None;
        self.scheduler.fired(handle);

        match pending.work {
            FrameWork::Input(pointer) => {
                if self.is_input_active() {
                    self.apply_pointer(&pointer);
                }
            }
            FrameWork::Momentum => self.momentum_frame(now_ms),
        }
    }

    // ---- Internals ----

    fn ensure_bound(&self) -> Result<()> {
        if self.bound {
            Ok(())
        } else {
            Err(ScrubsError::NotBound(self.id))
        }
    }

    fn render(&mut self, request: MoveRequest) {
        let input_active = self.is_input_active();
        let mv = self.engine.move_to(request, input_active);
        for style in &mv.styles {
            self.surface.apply(style);
        }
        if let Some(event) = mv.event {
            self.events.push(event);
        }
    }

    fn begin_drag(&mut self, pointer: Pointer) {
        if self.is_input_active() {
            // A second touch while one is down: treat as a plain sample.
            self.apply_pointer(&pointer);
            return;
        }

        self.cancel_pending();
        self.drag = DragState::Dragging;
        self.surface.set_transitions(false);
        self.events.push(ScrubEvent::Start(self.engine.percent()));

        if let Some(momentum) = &mut self.momentum {
            if momentum.is_active() {
                log::debug!("scrubs {}: momentum interrupted by pointer down", self.id);
            }
            momentum.cancel();
            let origin = self.tracker.sample(&pointer);
            self.tracker.reset(origin);
        }

        log::debug!("scrubs {}: drag begin", self.id);
        self.apply_pointer(&pointer);
    }

    fn queue_move(&mut self, pointer: Pointer) {
        if !self.is_input_active() {
            return;
        }
        match &mut self.pending {
            // Coalesce: the frame already requested will use the newest position.
            Some(PendingFrame {
                work: FrameWork::Input(queued),
                ..
            }) => *queued = pointer,
            Some(_) => {}
            None => self.schedule(FrameWork::Input(pointer)),
        }
    }

    fn end_drag(&mut self, time_ms: f64) {
        if !self.is_input_active() {
            return;
        }

        // Apply a coalesced move that has not rendered yet before releasing.
        if let Some(PendingFrame {
            handle,
            work: FrameWork::Input(pointer),
        }) = self.pending
        {
            self.scheduler.cancel(handle);
            self.pending = None;
            self.apply_pointer(&pointer);
        }

        self.drag = DragState::Idle;
        log::debug!("scrubs {}: drag end", self.id);

        let percent = self.engine.percent();
        let velocity = self.tracker.velocity();
        let fling = self
            .momentum
            .as_mut()
            .and_then(|m| m.release(percent, velocity, time_ms));

        match fling {
            Some(fling) => {
                log::debug!(
                    "scrubs {}: momentum release at {:.1}%/s toward {}",
                    self.id,
                    velocity,
                    fling.target
                );
                self.schedule(FrameWork::Momentum);
            }
            None => self.settle(MoveRequest::current()),
        }
    }

    fn apply_pointer(&mut self, pointer: &Pointer) {
        match self.tracker.track(pointer) {
            Some(sample) => self.render(MoveRequest::to(sample.percent)),
            None => log::warn!("scrubs {}: container has no size, sample dropped", self.id),
        }
    }

    fn momentum_frame(&mut self, now_ms: f64) {
        if self.is_input_active() {
            return;
        }
        let Some(step) = self.momentum.as_mut().and_then(|m| m.advance(now_ms)) else {
            return;
        };
        match step {
            MomentumStep::Coast(percent) => {
                self.render(MoveRequest::to(percent).sticky(true));
                self.schedule(FrameWork::Momentum);
            }
            MomentumStep::Settle(percent) => {
                log::debug!("scrubs {}: momentum settled at {}", self.id, percent);
                self.settle(MoveRequest::to(percent).sticky(true));
            }
        }
    }

    /// Final placement after input or momentum ends; transitions come back on.
    fn settle(&mut self, request: MoveRequest) {
        self.render(request);
        self.surface.set_transitions(true);
    }

    /// Stop a fling in progress so a programmatic move is not overwritten by
    /// the next momentum frame.
    fn interrupt_momentum(&mut self) {
        let coasting = matches!(
            self.pending,
            Some(PendingFrame {
                work: FrameWork::Momentum,
                ..
            })
        );
        if !coasting {
            return;
        }
        self.cancel_pending();
        if let Some(momentum) = &mut self.momentum {
            momentum.cancel();
        }
        self.surface.set_transitions(true);
    }

    fn schedule(&mut self, work: FrameWork) {
        if self.pending.is_some() {
            return;
        }
        let handle = self.scheduler.request();
        self.pending = Some(PendingFrame { handle, work });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.scheduler.cancel(pending.handle);
        }
    }
}
